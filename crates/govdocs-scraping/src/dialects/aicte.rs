use scraper::{Html, Selector};

use govdocs_domain::error::{Error, Result};
use govdocs_domain::ports::providers::{DialectScraper, DiscoveredLink, ListingPage};

use super::moe::resolve_url;
use super::{extension_of, resolve_title};

/// AICTE-style listing: a flat `ul.approval-list` / `ol.circulars` of
/// anchors with no dedicated pager markup — pagination is driven by a
/// numbered page-link strip instead.
#[derive(Debug, Default)]
pub struct AicteScraper;

impl AicteScraper {
    /// Construct a stateless scraper instance.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DialectScraper for AicteScraper {
    fn parse_listing(&self, html: &str, page_url: &str) -> Result<ListingPage> {
        let document = Html::parse_document(html);
        let item_selector = Selector::parse("ul.approval-list a[href], ol.circulars a[href]")
            .map_err(|e| Error::ExtractionFailed { message: e.to_string() })?;

        let mut links = Vec::new();
        for anchor in document.select(&item_selector) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let url = resolve_url(page_url, href);
            let text: String = anchor.text().collect::<String>();
            links.push(DiscoveredLink {
                file_type: extension_of(&url),
                title: Some(resolve_title(Some(&text), &url)),
                url,
            });
        }

        if links.is_empty() {
            return Err(Error::ExtractionFailed {
                message: "aicte dialect: no approval/circular list items matched".to_string(),
            });
        }

        let page_link_selector = Selector::parse("div.pagination a")
            .map_err(|e| Error::ExtractionFailed { message: e.to_string() })?;
        let next_page_url = document
            .select(&page_link_selector)
            .find(|a| a.text().collect::<String>().trim().eq_ignore_ascii_case("next"))
            .and_then(|a| a.value().attr("href"))
            .map(|href| resolve_url(page_url, href));

        Ok(ListingPage { links, next_page_url })
    }

    fn dialect_name(&self) -> &str {
        "aicte"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flat_approval_list() {
        let html = r#"
            <ol class="circulars">
                <li><a href="https://aicte.test/docs/approval-2024-17.pdf">Approval 2024/17</a></li>
            </ol>
            <div class="pagination"><a href="?p=2">Next</a></div>
        "#;
        let page = AicteScraper::new().parse_listing(html, "https://aicte.test/circulars").unwrap();
        assert_eq!(page.links.len(), 1);
        assert!(page.next_page_url.is_some());
    }
}

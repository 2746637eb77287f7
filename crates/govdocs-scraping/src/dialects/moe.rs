use scraper::{Html, Selector};

use govdocs_domain::error::{Error, Result};
use govdocs_domain::ports::providers::{DialectScraper, DiscoveredLink, ListingPage};

use super::{extension_of, resolve_title};

/// Ministry-of-education style listing: a `table.notice-list` of rows, each
/// holding one anchor to the document and a `a.next` pager link.
#[derive(Debug, Default)]
pub struct MoeScraper;

impl MoeScraper {
    /// Construct a stateless scraper instance.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DialectScraper for MoeScraper {
    fn parse_listing(&self, html: &str, page_url: &str) -> Result<ListingPage> {
        let document = Html::parse_document(html);
        let row_selector = Selector::parse("table.notice-list tr, table.notice-board tr")
            .map_err(|e| Error::ExtractionFailed { message: e.to_string() })?;
        let anchor_selector =
            Selector::parse("a[href]").map_err(|e| Error::ExtractionFailed { message: e.to_string() })?;

        let mut links = Vec::new();
        for row in document.select(&row_selector) {
            let Some(anchor) = row.select(&anchor_selector).next() else {
                continue;
            };
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
                message: "moe dialect: no notice rows matched expected table structure".to_string(),
            });
        }

        let next_selector =
            Selector::parse("a.next, a[rel=next]").map_err(|e| Error::ExtractionFailed { message: e.to_string() })?;
        let next_page_url = document
            .select(&next_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| resolve_url(page_url, href));

        Ok(ListingPage { links, next_page_url })
    }

    fn dialect_name(&self) -> &str {
        "moe"
    }
}

/// Resolve a possibly-relative `href` against the page it was found on.
pub(super) fn resolve_url(page_url: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    match url::Url::parse(page_url).and_then(|base| base.join(href)) {
        Ok(joined) => joined.to_string(),
        Err(_) => href.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_notice_table_rows() {
        let html = r#"
            <table class="notice-list">
                <tr><td><a href="/docs/circular-1.pdf">Circular 1</a></td></tr>
                <tr><td><a href="/docs/circular-2.pdf">Circular 2</a></td></tr>
            </table>
            <a class="next" href="/notices?page=2">Next</a>
        "#;
        let page = MoeScraper::new().parse_listing(html, "https://moe.test/notices").unwrap();
        assert_eq!(page.links.len(), 2);
        assert_eq!(page.links[0].file_type.as_deref(), Some("pdf"));
        assert_eq!(page.next_page_url.as_deref(), Some("https://moe.test/notices?page=2"));
    }

    #[test]
    fn empty_table_is_extraction_failure() {
        let result = MoeScraper::new().parse_listing("<html></html>", "https://moe.test/notices");
        assert!(result.is_err());
    }
}

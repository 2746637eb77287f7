use scraper::{Html, Selector};

use govdocs_domain::error::{Error, Result};
use govdocs_domain::ports::providers::{DialectScraper, DiscoveredLink, ListingPage};

use super::moe::resolve_url;
use super::{extension_of, resolve_title};

/// UGC-style listing: document links inside `div.view-content` cards, each
/// wrapping a single anchor, with pagination under `ul.pager`.
#[derive(Debug, Default)]
pub struct UgcScraper;

impl UgcScraper {
    /// Construct a stateless scraper instance.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DialectScraper for UgcScraper {
    fn parse_listing(&self, html: &str, page_url: &str) -> Result<ListingPage> {
        let document = Html::parse_document(html);
        let card_selector =
            Selector::parse("div.view-content .views-row a[href], div.view-content article a[href]")
                .map_err(|e| Error::ExtractionFailed { message: e.to_string() })?;

        let mut links = Vec::new();
        for anchor in document.select(&card_selector) {
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
                message: "ugc dialect: no view-content cards matched expected structure".to_string(),
            });
        }

        let next_selector = Selector::parse("ul.pager li.pager-next a, a[rel=next]")
            .map_err(|e| Error::ExtractionFailed { message: e.to_string() })?;
        let next_page_url = document
            .select(&next_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| resolve_url(page_url, href));

        Ok(ListingPage { links, next_page_url })
    }

    fn dialect_name(&self) -> &str {
        "ugc"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_view_content_cards() {
        let html = r#"
            <div class="view-content">
                <div class="views-row"><a href="/public_notices/grant-17.pdf">Grant Notice 17</a></div>
                <div class="views-row"><a href="/public_notices/grant-18.pdf">Grant Notice 18</a></div>
            </div>
            <ul class="pager"><li class="pager-next"><a href="/notices?page=3">next</a></li></ul>
        "#;
        let page = UgcScraper::new().parse_listing(html, "https://ugc.test/notices").unwrap();
        assert_eq!(page.links.len(), 2);
        assert_eq!(page.next_page_url.as_deref(), Some("https://ugc.test/notices?page=3"));
    }
}

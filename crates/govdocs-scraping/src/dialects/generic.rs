use scraper::{Html, Selector};

use govdocs_domain::error::{Error, Result};
use govdocs_domain::ports::providers::{DialectScraper, DiscoveredLink, ListingPage};

use super::moe::resolve_url;
use super::{extension_of, resolve_title, DOCUMENT_EXTENSIONS};

/// Link text keywords treated as document hints when the href has no
/// recognizable extension (spec §4.C fallback heuristic).
const KEYWORD_HINTS: &[&str] = &["circular", "notice", "notification", "order", "gazette", "download"];

/// Heuristic fallback for sites with no dedicated dialect: every anchor on
/// the page whose href extension or link text suggests a document.
#[derive(Debug, Default)]
pub struct GenericScraper;

impl GenericScraper {
    /// Construct a stateless scraper instance.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl DialectScraper for GenericScraper {
    fn parse_listing(&self, html: &str, page_url: &str) -> Result<ListingPage> {
        let document = Html::parse_document(html);
        let anchor_selector =
            Selector::parse("a[href]").map_err(|e| Error::ExtractionFailed { message: e.to_string() })?;

        let mut links = Vec::new();
        for anchor in document.select(&anchor_selector) {
            let Some(href) = anchor.value().attr("href") else {
                continue;
            };
            let url = resolve_url(page_url, href);
            let extension = extension_of(&url);
            let text: String = anchor.text().collect::<String>();
            let lower_text = text.to_lowercase();

            let looks_like_document = extension
                .as_deref()
                .is_some_and(|ext| DOCUMENT_EXTENSIONS.contains(&ext))
                || KEYWORD_HINTS.iter().any(|kw| lower_text.contains(kw));

            if !looks_like_document {
                continue;
            }

            links.push(DiscoveredLink {
                file_type: extension,
                title: Some(resolve_title(Some(&text), &url)),
                url,
            });
        }

        // A listing page with zero matching anchors is a legitimate empty
        // result for the generic dialect, not a structural failure — there
        // is no fixed expected shape to have failed to match.
        let next_selector = Selector::parse("a[rel=next], a.next, a.pagination-next")
            .map_err(|e| Error::ExtractionFailed { message: e.to_string() })?;
        let next_page_url = document
            .select(&next_selector)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| resolve_url(page_url, href));

        Ok(ListingPage { links, next_page_url })
    }

    fn dialect_name(&self) -> &str {
        "generic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_anchors_by_extension_or_keyword() {
        let html = r#"
            <a href="/files/report.pdf">Annual Report</a>
            <a href="/about">About Us</a>
            <a href="/notices/order-5">Order No. 5</a>
        "#;
        let page = GenericScraper::new().parse_listing(html, "https://site.test/").unwrap();
        assert_eq!(page.links.len(), 2);
    }

    #[test]
    fn no_matches_returns_empty_listing_not_an_error() {
        let page = GenericScraper::new()
            .parse_listing("<a href=\"/about\">About</a>", "https://site.test/")
            .unwrap();
        assert!(page.links.is_empty());
    }
}

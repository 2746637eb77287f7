//! Site-dialect link discovery (spec §4.C).
//!
//! Each dialect implements [`DialectScraper`] over the known DOM shape of
//! one source family. `GenericScraper` is the heuristic fallback for
//! unknown sites, matching anchors by extension or keyword.

mod aicte;
mod generic;
mod moe;
mod ugc;

pub use aicte::AicteScraper;
pub use generic::GenericScraper;
pub use moe::MoeScraper;
pub use ugc::UgcScraper;

/// File extensions the generic dialect treats as a document link (spec §4.C).
pub const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "ppt", "pptx", "xls", "xlsx"];

/// Replace filesystem-unsafe characters, then truncate to 100 characters
/// before the caller appends a timestamp and extension (spec §4.C).
#[must_use]
pub fn sanitize_filename(raw: &str) -> String {
    let sanitized: String = raw
        .chars()
        .map(|c| match c {
            ':' | '"' | '/' | '\\' | '?' | '*' => '-',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let trimmed = sanitized.trim();
    trimmed.chars().take(100).collect()
}

/// Title tie-break: anchor text if non-empty, else the URL's last path
/// segment (spec §4.C).
#[must_use]
pub fn resolve_title(anchor_text: Option<&str>, url: &str) -> String {
    if let Some(text) = anchor_text {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(url)
        .to_string()
}

/// File extension implied by a URL's path, lowercased, without the dot.
#[must_use]
pub fn extension_of(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('.').next().map(str::to_lowercase).filter(|ext| ext.len() <= 5)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_filename_replaces_unsafe_characters() {
        assert_eq!(sanitize_filename("Notice: \"Fees\" / Update?*"), "Notice- -Fees- - Update--");
    }

    #[test]
    fn sanitize_filename_truncates_to_100_chars() {
        let long = "x".repeat(150);
        assert_eq!(sanitize_filename(&long).chars().count(), 100);
    }

    #[test]
    fn resolve_title_falls_back_to_last_path_segment() {
        assert_eq!(
            resolve_title(Some("   "), "https://example.test/docs/circular-17.pdf"),
            "circular-17.pdf"
        );
    }

    #[test]
    fn extension_of_ignores_query_string() {
        assert_eq!(extension_of("https://x.test/a.pdf?download=1"), Some("pdf".to_string()));
    }
}

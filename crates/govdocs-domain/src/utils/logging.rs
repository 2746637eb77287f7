//! Unicode-safe helpers for log lines.
//!
//! Spec §7 requires that a logger which cannot represent a string falls back
//! to a placeholder rather than panicking. `tracing`'s formatters never
//! panic on arbitrary `Display` output, but upstream scraped titles can
//! contain control characters or extremely long runs that are unpleasant in
//! logs; `safe_display` truncates and strips those before the value ever
//! reaches a `tracing` call site.

const MAX_LOG_CHARS: usize = 200;

/// Render `s` for logging: strip control characters, cap length, and fall
/// back to a byte-count placeholder if nothing printable survives.
#[must_use]
pub fn safe_display(s: &str) -> String {
    let cleaned: String = s
        .chars()
        .filter(|c| !c.is_control() || *c == ' ')
        .take(MAX_LOG_CHARS)
        .collect();

    if cleaned.trim().is_empty() && !s.is_empty() {
        return format!("[non-ascii title, {} chars]", s.chars().count());
    }

    if s.chars().count() > MAX_LOG_CHARS {
        format!("{cleaned}…")
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::safe_display;

    #[test]
    fn passes_through_plain_ascii() {
        assert_eq!(safe_display("Education Policy 2026"), "Education Policy 2026");
    }

    #[test]
    fn truncates_long_titles() {
        let long = "a".repeat(500);
        let out = safe_display(&long);
        assert!(out.ends_with('…'));
        assert!(out.chars().count() <= super::MAX_LOG_CHARS + 1);
    }

    #[test]
    fn falls_back_for_unprintable_input() {
        let control_only: String = std::iter::repeat('\u{0001}').take(5).collect();
        assert_eq!(safe_display(&control_only), "[non-ascii title, 5 chars]");
    }
}

//! Heuristic recipe field extraction from HTML pages and PDF documents.
//!
//! Both extractors are best-effort: every field is filled by an ordered chain
//! of named strategies where the first success wins, and a field that no
//! strategy can fill gets a placeholder string instead of failing the whole
//! operation.

pub mod html;
pub mod pdf;

pub use html::extract_recipe_from_html;
pub use pdf::{extract_recipe_from_pdf, parse_recipe_text};

/// Maximum title length before truncation.
const MAX_TITLE_CHARS: usize = 100;

/// Cap a title at [`MAX_TITLE_CHARS`] characters, appending an ellipsis.
/// Operates on chars so multi-byte titles are never split mid-codepoint.
fn truncate_title(title: &str) -> String {
    if title.chars().count() > MAX_TITLE_CHARS {
        let mut t: String = title.chars().take(MAX_TITLE_CHARS).collect();
        t.push_str("...");
        t
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_title_short_unchanged() {
        assert_eq!(truncate_title("Lemon Tart"), "Lemon Tart");
    }

    #[test]
    fn test_truncate_title_long_gets_ellipsis() {
        let long = "a".repeat(150);
        let out = truncate_title(&long);
        assert_eq!(out.chars().count(), 103);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_truncate_title_multibyte_boundary() {
        let long = "é".repeat(120);
        let out = truncate_title(&long);
        assert!(out.starts_with("é"));
        assert!(out.ends_with("..."));
    }
}

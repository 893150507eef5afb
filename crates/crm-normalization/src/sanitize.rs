//! Markup stripping and dangerous-content detection.
//!
//! This is best-effort cleaning of spreadsheet exports, not a security boundary.

use std::sync::LazyLock;

use regex::Regex;

/// Patterns that reject a whole file when found anywhere in its text
/// (compared case-insensitively).
pub const DANGEROUS_PATTERNS: &[&str] = &[
    "<script",
    "javascript:",
    "data:text/html",
    "vbscript:",
    "<iframe",
    "<embed",
    "<object",
];

/// Fragments that mark a value as HTML/CSS rather than data.
pub const MARKUP_KEYWORDS: &[&str] = &[
    "style=",
    "margin",
    "padding",
    "font-",
    "color:",
    "background",
    "border",
    "display:",
    "width:",
    "height:",
    "px;",
    "class=",
    "{",
    "}",
    "<",
    ">",
];

static STYLE_ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bstyle\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+)"#)
        .expect("Invalid style attribute regex")
});

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("Invalid HTML tag regex"));

/// One CSS value: a length, a bare zero or a keyword.
const CSS_VALUE: &str = r"(?:[-+]?(?:\d+(?:\.\d+)?|\.\d+)(?:px|pt|em|rem|%|vh|vw)|0\b|(?:auto|inherit|initial|none|normal|bold|italic)\b)";

/// A declaration is either `;`-terminated with space-free values
/// (`font-family: Arial, sans-serif;`) or made only of CSS values
/// (`margin: 0 auto`). Prose after a colon matches neither and is kept.
static CSS_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"(?i)\b(?:margin|padding|font-[a-z]+)(?:-[a-z]+)*\s*:\s*(?:[^;\s]+(?:,\s*[^;\s]+)*\s*;|{CSS_VALUE}(?:[\s,]+{CSS_VALUE})*\s*;?)"
    );
    Regex::new(&pattern).expect("Invalid CSS declaration regex")
});

/// Returns the first dangerous pattern found in `text`.
pub fn find_dangerous_pattern(text: &str) -> Option<&'static str> {
    let lowered = text.to_ascii_lowercase();
    DANGEROUS_PATTERNS
        .iter()
        .copied()
        .find(|pattern| lowered.contains(pattern))
}

/// True when the value contains any HTML/CSS keyword.
pub fn looks_like_markup(value: &str) -> bool {
    let lowered = value.to_ascii_lowercase();
    MARKUP_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}

/// Strip tags, inline styles and CSS declarations from a free-text value.
///
/// Whitespace runs collapse to a single space and the result is trimmed, so an
/// all-markup value comes back empty.
pub fn sanitize_text(raw: &str) -> String {
    let without_styles = STYLE_ATTRIBUTE.replace_all(raw, "");
    let without_tags = HTML_TAG.replace_all(&without_styles, " ");
    let without_css = CSS_DECLARATION.replace_all(&without_tags, " ");
    let decoded = without_css.replace("&nbsp;", " ");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_patterns_case_insensitively() {
        assert_eq!(
            find_dangerous_pattern("name\n<SCRIPT>alert(1)</SCRIPT>"),
            Some("<script")
        );
        assert_eq!(
            find_dangerous_pattern("a,JavaScript:void(0)"),
            Some("javascript:")
        );
        assert_eq!(find_dangerous_pattern("plain,text\n1,2"), None);
    }

    #[test]
    fn strips_tags_and_styles() {
        assert_eq!(
            sanitize_text(r#"<p style="color: red">Hello <b>world</b></p>"#),
            "Hello world"
        );
        assert_eq!(sanitize_text("<span class='x'>Acme&nbsp;Inc</span>"), "Acme Inc");
    }

    #[test]
    fn strips_css_declarations() {
        assert_eq!(sanitize_text("margin: 0; padding: 4px; Renewal"), "Renewal");
        assert_eq!(sanitize_text("font-size: 12pt; Call back"), "Call back");
        assert_eq!(
            sanitize_text("font-family: Arial, sans-serif; Quarterly review"),
            "Quarterly review"
        );
        assert_eq!(sanitize_text("Renewal margin: 0 auto"), "Renewal");
    }

    #[test]
    fn prose_after_a_css_word_is_kept() {
        let note = "Negotiate margin: keep above 20 percent for renewal";
        assert_eq!(sanitize_text(note), note);
        assert_eq!(
            sanitize_text("Padding: extra week; then invoice"),
            "Padding: extra week; then invoice"
        );
        assert_eq!(sanitize_text("font-size: large print please"), "font-size: large print please");
    }

    #[test]
    fn pure_markup_becomes_empty() {
        assert_eq!(sanitize_text("<br/><div></div>"), "");
    }

    #[test]
    fn plain_text_is_only_trimmed() {
        assert_eq!(sanitize_text("  Follow up   next week "), "Follow up next week");
    }

    #[test]
    fn markup_keywords() {
        assert!(looks_like_markup("style=\"x\""));
        assert!(looks_like_markup("MARGIN: 0"));
        assert!(!looks_like_markup("2024-12-31"));
    }
}

//! Small helpers over `scraper` shared by the page parsers.

use scraper::{ElementRef, Selector};

use crate::{error::FflError, Result};

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| FflError::malformed(format!("bad selector {css}: {e:?}")))
}

/// Concatenated, trimmed text content of an element.
pub(crate) fn text_of(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

pub(crate) fn has_class(el: &ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

/// Parse a points cell; ESPN shows `--` for zero.
pub(crate) fn parse_points(raw: &str) -> Option<f64> {
    let cleaned = raw.trim();
    if cleaned.is_empty() || cleaned == "--" {
        return Some(0.0);
    }
    cleaned.replace(',', "").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_text_and_class_helpers() {
        let doc = Html::parse_fragment(r#"<div class="a b"> hello <b>world</b> </div>"#);
        let sel = selector("div").unwrap();
        let div = doc.select(&sel).next().unwrap();
        assert_eq!(text_of(&div), "hello world");
        assert!(has_class(&div, "b"));
        assert!(!has_class(&div, "c"));
    }

    #[test]
    fn test_parse_points() {
        assert_eq!(parse_points("--"), Some(0.0));
        assert_eq!(parse_points(" 12.5 "), Some(12.5));
        assert_eq!(parse_points("1,024"), Some(1024.0));
        assert_eq!(parse_points("Box"), None);
    }

    #[test]
    fn test_bad_selector_is_error() {
        assert!(selector("tr[").is_err());
    }
}

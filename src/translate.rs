//! Horizontal offset of a slideshow track, read from its `translate3d` transform.

use std::sync::LazyLock;

use regex::Regex;
use web_sys::HtmlElement;

static TRANSLATE3D: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^translate3d\((.*?)px.*\)$").expect("valid translate3d pattern"));

/// Extracts `|x|` from a `translate3d(x px, ...)` transform.
///
/// Returns `None` when the string is not a `translate3d` transform, or when the
/// x offset is zero or not a number.
pub fn parse_translate_x(transform: &str) -> Option<f64> {
    let caps = TRANSLATE3D.captures(transform)?;
    let offset: f64 = caps.get(1)?.as_str().trim().parse().ok()?;
    (offset != 0.0 && !offset.is_nan()).then(|| offset.abs())
}

/// Reads the inline (prefixed first) transform of `element` and extracts its offset.
pub fn translate_offset(element: &HtmlElement) -> Option<f64> {
    let style = element.style();
    let transform = ["-webkit-transform", "transform"]
        .iter()
        .filter_map(|name| style.get_property_value(name).ok())
        .find(|value| !value.is_empty())?;
    parse_translate_x(&transform)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_offset_is_made_positive() {
        assert_eq!(parse_translate_x("translate3d(-750px, 0px, 0px)"), Some(750.0));
    }

    #[test]
    fn test_positive_and_fractional_offsets() {
        assert_eq!(parse_translate_x("translate3d(12px, 0px, 0px)"), Some(12.0));
        assert_eq!(parse_translate_x("translate3d(-1234.5px, 0px, 0px)"), Some(1234.5));
    }

    #[test]
    fn test_zero_offset_is_absent() {
        assert_eq!(parse_translate_x("translate3d(0px, 0px, 0px)"), None);
        assert_eq!(parse_translate_x("translate3d(-0px, 0px, 0px)"), None);
    }

    #[test]
    fn test_other_transforms_are_absent() {
        assert_eq!(parse_translate_x(""), None);
        assert_eq!(parse_translate_x("none"), None);
        assert_eq!(parse_translate_x("translateX(-750px)"), None);
        assert_eq!(parse_translate_x("scale(2) translate3d(-750px, 0px, 0px)"), None);
    }

    #[test]
    fn test_non_numeric_offset_is_absent() {
        assert_eq!(parse_translate_x("translate3d(abcpx, 0px, 0px)"), None);
        assert_eq!(parse_translate_x("translate3d(px, 0px, 0px)"), None);
    }
}

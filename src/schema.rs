//! Data structures and types shared by the viewer.
//!
//! This module defines the error type, the configuration options accepted from
//! JavaScript, and the small value types passed between the layout code and the
//! DOM glue.

use serde::Deserialize;
use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors that can occur while creating, rendering or destroying pages.
#[derive(Debug, Error)]
pub enum ViewerError {
    /// No global `window` object (not running in a browser main thread).
    #[error("No window")]
    NoWindow,
    /// The window has no document.
    #[error("No document")]
    NoDocument,
    /// A DOM call failed.
    #[error("DOM error: {0}")]
    Dom(String),
    /// The page was never created with `create_page`.
    #[error("Page {0} has not been created")]
    UnknownPage(u32),
    /// PDF.js rejected a request or returned something unexpected.
    #[error("PDF.js error: {0}")]
    PdfJs(String),
    /// The render task for a page was rejected.
    #[error("Rendering page {page} failed: {reason}")]
    Render { page: u32, reason: String },
    /// The render callback threw.
    #[error("Render callback threw: {0}")]
    Callback(String),
    /// A viewport with a non-positive width cannot be fitted.
    #[error("Invalid viewport width: {0}")]
    InvalidViewport(f64),
}

impl ViewerError {
    /// Wraps a thrown JS value as a DOM error.
    pub fn dom(value: JsValue) -> Self {
        Self::Dom(describe(&value))
    }

    /// Wraps a thrown JS value as a PDF.js error.
    pub fn pdfjs(value: JsValue) -> Self {
        Self::PdfJs(describe(&value))
    }
}

impl From<ViewerError> for JsValue {
    fn from(err: ViewerError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Best-effort text for a thrown JS value.
pub(crate) fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Render state of a page canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageState {
    /// The canvas holds no page pixels.
    #[default]
    Unloaded,
    /// The page has been rendered into the canvas.
    Loaded,
}

impl PageState {
    /// Value mirrored into the container's `data-loaded` attribute.
    pub fn as_data_attr(self) -> &'static str {
        match self {
            PageState::Unloaded => "false",
            PageState::Loaded => "true",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PageState::Unloaded => "unloaded",
            PageState::Loaded => "loaded",
        }
    }
}

/// Page dimensions in CSS pixels at a given zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Configuration options for the viewer.
///
/// All fields are optional when deserialized; missing ones take the defaults below.
///
/// # Examples
///
/// Defaults (fill 99% of the window width, Swiper slide classes):
/// ```json
/// {}
/// ```
///
/// Full-width transparent pages:
/// ```json
/// { "width_fill": 1.0, "opaque": false }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewerOptions {
    /// Fraction of the available width a rendered page should occupy.
    pub width_fill: f64,
    /// Class attribute of the page container.
    pub page_class: String,
    /// Class attribute of the element wrapping the canvas.
    pub wrapper_class: String,
    /// Render onto an opaque canvas (`alpha: false`, `mozOpaque`).
    pub opaque: bool,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            width_fill: 0.99,
            page_class: "page swiper-slide".into(),
            wrapper_class: "canvasWrapper".into(),
            opaque: true,
        }
    }
}

impl ViewerOptions {
    /// Parses options from JSON, falling back to defaults on absent or invalid input.
    pub fn from_json(options_json: Option<&str>) -> Self {
        match options_json {
            Some(s) => serde_json::from_str(s).unwrap_or_default(),
            None => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ViewerOptions::from_json(None);
        assert_eq!(options.width_fill, 0.99);
        assert_eq!(options.page_class, "page swiper-slide");
        assert_eq!(options.wrapper_class, "canvasWrapper");
        assert!(options.opaque);
    }

    #[test]
    fn test_partial_options() {
        let options = ViewerOptions::from_json(Some(r#"{"width_fill": 1.0, "opaque": false}"#));
        assert_eq!(options.width_fill, 1.0);
        assert!(!options.opaque);
        assert_eq!(options.wrapper_class, "canvasWrapper");
    }

    #[test]
    fn test_invalid_options_fall_back() {
        assert_eq!(ViewerOptions::from_json(Some("not json")), ViewerOptions::default());
        assert_eq!(ViewerOptions::from_json(Some("{}")), ViewerOptions::default());
    }

    #[test]
    fn test_page_state_strings() {
        assert_eq!(PageState::default(), PageState::Unloaded);
        assert_eq!(PageState::Loaded.as_data_attr(), "true");
        assert_eq!(PageState::Unloaded.as_data_attr(), "false");
        assert_eq!(PageState::Loaded.as_str(), "loaded");
        assert_eq!(PageState::Unloaded.as_str(), "unloaded");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ViewerError::UnknownPage(4).to_string(),
            "Page 4 has not been created"
        );
        let err = ViewerError::Render {
            page: 2,
            reason: "cancelled".into(),
        };
        assert_eq!(err.to_string(), "Rendering page 2 failed: cancelled");
    }
}

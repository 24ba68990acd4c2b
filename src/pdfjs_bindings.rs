//! JavaScript bindings for PDF.js
//!
//! This module binds the handful of PDF.js objects the viewer drives: the loaded
//! document, its pages, and the viewports they report. The host page loads
//! PDF.js and passes the `PDFDocumentProxy` in; no bridge module is needed.

use js_sys::{Array, Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

use crate::schema::{Viewport, ViewerError};

#[wasm_bindgen]
extern "C" {
    /// A loaded document (`pdfjsLib.getDocument(...).promise`).
    #[wasm_bindgen(typescript_type = "PDFDocumentProxy")]
    pub type PdfDocumentProxy;

    #[wasm_bindgen(method, getter, js_name = numPages)]
    pub fn num_pages(this: &PdfDocumentProxy) -> u32;

    /// Resolves to a `PDFPageProxy` for a 1-based page number.
    #[wasm_bindgen(method, catch, js_name = getPage)]
    pub async fn get_page(this: &PdfDocumentProxy, page_number: u32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(typescript_type = "PDFPageProxy")]
    pub type PdfPageProxy;

    #[wasm_bindgen(method, getter, js_name = pageNumber)]
    pub fn page_number(this: &PdfPageProxy) -> u32;

    #[wasm_bindgen(method, catch, js_name = getViewport)]
    pub fn get_viewport(this: &PdfPageProxy, params: &JsValue) -> Result<PageViewport, JsValue>;

    /// Returns a `RenderTask` (PDF.js >= 2) or a thenable (older releases).
    #[wasm_bindgen(method, catch)]
    pub fn render(this: &PdfPageProxy, params: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(typescript_type = "PageViewport")]
    pub type PageViewport;

    #[wasm_bindgen(method, getter)]
    pub fn width(this: &PageViewport) -> f64;

    #[wasm_bindgen(method, getter)]
    pub fn height(this: &PageViewport) -> f64;
}

impl From<&PageViewport> for Viewport {
    fn from(viewport: &PageViewport) -> Self {
        Viewport {
            width: viewport.width(),
            height: viewport.height(),
        }
    }
}

/// Gets the viewport of `page` at `scale`.
pub fn viewport_at(page: &PdfPageProxy, scale: f64) -> Result<PageViewport, ViewerError> {
    let params = Object::new();
    set(&params, "scale", &JsValue::from_f64(scale))?;
    page.get_viewport(&params).map_err(ViewerError::pdfjs)
}

/// Builds the `page.render` parameter object.
pub fn render_params(
    ctx: &CanvasRenderingContext2d,
    viewport: &PageViewport,
    transform: Option<[f64; 6]>,
) -> Result<JsValue, ViewerError> {
    let params = Object::new();
    set(&params, "canvasContext", ctx)?;
    set(&params, "viewport", viewport)?;
    let transform = match transform {
        Some(matrix) => matrix
            .iter()
            .map(|v| JsValue::from_f64(*v))
            .collect::<Array>()
            .into(),
        None => JsValue::NULL,
    };
    set(&params, "transform", &transform)?;
    Ok(params.into())
}

/// Promise settling when a render started by `page.render` finishes.
pub fn render_completion(task: &JsValue) -> Promise {
    match Reflect::get(task, &JsValue::from_str("promise")) {
        Ok(promise) if promise.is_instance_of::<Promise>() => promise.unchecked_into(),
        // Older PDF.js returns the thenable itself.
        _ => Promise::resolve(task),
    }
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), ViewerError> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(ViewerError::pdfjs)
}

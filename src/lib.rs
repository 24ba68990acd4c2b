//! Lazy PDF.js page rendering for slideshow viewers.
//!
//! Each page gets its own container and canvas. Canvases are sized for the
//! device pixel ratio, rendered when their slide comes into view, and cleared
//! again when it leaves.

pub mod layout;
pub mod page;
pub mod pdfjs_bindings;
pub mod scale;
pub mod schema;
pub mod translate;
pub mod viewer;

use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

pub use schema::{PageState, ViewerError, ViewerOptions};
pub use viewer::PdfSlideViewer;

/// Installs the panic hook and routes `tracing` output to the browser console.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // Already installed when the module is instantiated twice.
    let _ = tracing_wasm::try_set_as_global_default();
}

/// Horizontal offset of a slideshow track from its inline `translate3d`
/// transform, `undefined` when absent or zero.
#[wasm_bindgen]
pub fn get_translate(element: &HtmlElement) -> Option<f64> {
    translate::translate_offset(element)
}

//! The JavaScript-facing viewer.
//!
//! `PdfSlideViewer` owns one [`PageHandle`] per created page, keyed by page
//! number. The host appends the returned containers to its slideshow, calls
//! `render_page` for slides coming into view and `destroy_page` for slides that
//! scrolled far enough away to give their pixels back.
//!
//! ```javascript
//! import init, { PdfSlideViewer } from 'pdf-slide-viewer';
//!
//! await init();
//! const pdf = await pdfjsLib.getDocument(url).promise;
//! const viewer = new PdfSlideViewer(pdf, JSON.stringify({ width_fill: 0.99 }));
//!
//! for (let n = 1; n <= viewer.page_count(); n++) {
//!     track.appendChild(viewer.create_page(n));
//! }
//! await viewer.render_page(1, (page) => console.log('rendered', page.pageNumber));
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;

use js_sys::Function;
use tracing::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlElement, Window};

use crate::layout::{CanvasLayout, fit_scale};
use crate::page::PageHandle;
use crate::pdfjs_bindings::{
    PdfDocumentProxy, PdfPageProxy, render_completion, render_params, viewport_at,
};
use crate::scale::OutputScale;
use crate::schema::{Viewport, ViewerError, ViewerOptions, describe};

/// Renders the pages of one PDF.js document into slideshow canvases.
#[wasm_bindgen]
pub struct PdfSlideViewer {
    pdf: PdfDocumentProxy,
    options: ViewerOptions,
    pages: RefCell<BTreeMap<u32, PageHandle>>,
}

#[wasm_bindgen]
impl PdfSlideViewer {
    /// Wraps a loaded `PDFDocumentProxy`. `options_json` is parsed into
    /// [`ViewerOptions`]; absent or invalid JSON yields the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(pdf: PdfDocumentProxy, options_json: Option<String>) -> PdfSlideViewer {
        let options = ViewerOptions::from_json(options_json.as_deref());
        debug!(?options, "viewer created");
        Self {
            pdf,
            options,
            pages: RefCell::new(BTreeMap::new()),
        }
    }

    pub fn page_count(&self) -> u32 {
        self.pdf.num_pages()
    }

    /// Creates the elements for a page and returns its container for the host to
    /// append. Creating the same page twice returns the existing container.
    pub fn create_page(&self, page_number: u32) -> Result<HtmlElement, JsValue> {
        let mut pages = self.pages.borrow_mut();
        if let Some(handle) = pages.get(&page_number) {
            return Ok(handle.container().clone());
        }

        let document = document()?;
        let handle = PageHandle::create(&document, page_number, &self.options)?;
        let container = handle.container().clone();
        pages.insert(page_number, handle);
        debug!(page = page_number, "page created");
        Ok(container)
    }

    /// Renders a created page at the available width.
    ///
    /// Resolves with the `PDFPageProxy` once the canvas holds the page, after
    /// calling `callback(pdfPage)` if one was given. Rejects with a message if the
    /// page is unknown, PDF.js fails, or the callback throws.
    pub async fn render_page(
        &self,
        page_number: u32,
        callback: Option<Function>,
    ) -> Result<PdfPageProxy, JsValue> {
        match self.render(page_number, callback.as_ref()).await {
            Ok(page) => Ok(page),
            Err(err) => {
                warn!(page = page_number, error = %err, "render failed");
                Err(err.into())
            }
        }
    }

    /// Frees the pixels of a loaded page. Returns whether the page was loaded.
    pub fn destroy_page(&self, page_number: u32) -> Result<bool, JsValue> {
        let mut pages = self.pages.borrow_mut();
        let handle = pages
            .get_mut(&page_number)
            .ok_or(ViewerError::UnknownPage(page_number))?;
        let cleared = handle.destroy()?;
        if cleared {
            debug!(page = page_number, "page destroyed");
        }
        Ok(cleared)
    }

    /// `"loaded"` or `"unloaded"` for a created page, `undefined` otherwise.
    pub fn page_state(&self, page_number: u32) -> Option<String> {
        self.pages
            .borrow()
            .get(&page_number)
            .map(|handle| handle.state().as_str().to_string())
    }

    /// Forgets a page and detaches its container. Returns whether it existed.
    pub fn remove_page(&self, page_number: u32) -> bool {
        match self.pages.borrow_mut().remove(&page_number) {
            Some(handle) => {
                handle.detach();
                debug!(page = page_number, "page removed");
                true
            }
            None => false,
        }
    }
}

impl PdfSlideViewer {
    async fn render(
        &self,
        page_number: u32,
        callback: Option<&Function>,
    ) -> Result<PdfPageProxy, ViewerError> {
        if !self.pages.borrow().contains_key(&page_number) {
            return Err(ViewerError::UnknownPage(page_number));
        }
        let window = web_sys::window().ok_or(ViewerError::NoWindow)?;

        let page: PdfPageProxy = self
            .pdf
            .get_page(page_number)
            .await
            .map_err(ViewerError::pdfjs)?
            .unchecked_into();

        let unscaled = viewport_at(&page, 1.0)?;
        let zoom = fit_scale(
            available_width(&window)?,
            unscaled.width(),
            self.options.width_fill,
        )?;
        let viewport = viewport_at(&page, zoom)?;

        // The page may have been removed while getPage was pending.
        let (ctx, layout) = {
            let pages = self.pages.borrow();
            let handle = pages
                .get(&page_number)
                .ok_or(ViewerError::UnknownPage(page_number))?;
            let ctx = handle.context()?;
            let output = OutputScale::detect(&window, &ctx);
            let layout = CanvasLayout::compute(Viewport::from(&viewport), &output);
            handle.apply_layout(&layout)?;
            (ctx, layout)
        };

        let params = render_params(&ctx, &viewport, layout.transform)?;
        let task = page.render(&params).map_err(|e| ViewerError::Render {
            page: page_number,
            reason: describe(&e),
        })?;
        JsFuture::from(render_completion(&task))
            .await
            .map_err(|e| ViewerError::Render {
                page: page_number,
                reason: describe(&e),
            })?;

        match self.pages.borrow_mut().get_mut(&page_number) {
            Some(handle) => handle.mark_loaded()?,
            None => debug!(page = page_number, "page removed during render"),
        }
        info!(
            page = page_number,
            width = layout.canvas_width,
            height = layout.canvas_height,
            "page rendered"
        );

        if let Some(callback) = callback {
            callback
                .call1(&JsValue::NULL, &page)
                .map_err(|e| ViewerError::Callback(describe(&e)))?;
        }
        Ok(page)
    }
}

fn document() -> Result<Document, ViewerError> {
    web_sys::window()
        .ok_or(ViewerError::NoWindow)?
        .document()
        .ok_or(ViewerError::NoDocument)
}

/// `window.innerWidth`, falling back to the body's client width.
fn available_width(window: &Window) -> Result<f64, ViewerError> {
    let inner = window
        .inner_width()
        .ok()
        .and_then(|width| width.as_f64())
        .filter(|width| *width > 0.0);
    if let Some(width) = inner {
        return Ok(width);
    }
    let document = window.document().ok_or(ViewerError::NoDocument)?;
    Ok(document
        .body()
        .map(|body| f64::from(body.client_width()))
        .unwrap_or(0.0))
}

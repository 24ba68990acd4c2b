//! Per-page DOM elements and their render state.

use js_sys::{Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

use crate::layout::{CanvasLayout, px};
use crate::schema::{PageState, ViewerError, ViewerOptions};

/// The container, wrapper and canvas of one page.
///
/// ```html
/// <div class="page swiper-slide" id="pageContainer3" data-page-number="3" data-loaded="false">
///   <div class="canvasWrapper"><canvas id="page3"></canvas></div>
/// </div>
/// ```
#[derive(Debug)]
pub struct PageHandle {
    container: HtmlElement,
    wrapper: HtmlElement,
    canvas: HtmlCanvasElement,
    opaque: bool,
    state: PageState,
}

impl PageHandle {
    /// Creates the detached elements for page `number`.
    pub fn create(
        document: &Document,
        number: u32,
        options: &ViewerOptions,
    ) -> Result<Self, ViewerError> {
        let container: HtmlElement = create(document, "div")?;
        let wrapper: HtmlElement = create(document, "div")?;
        let canvas: HtmlCanvasElement = create(document, "canvas")?;

        container.set_class_name(&options.page_class);
        container
            .set_attribute("id", &format!("pageContainer{}", number))
            .map_err(ViewerError::dom)?;
        container
            .set_attribute("data-page-number", &number.to_string())
            .map_err(ViewerError::dom)?;
        wrapper.set_class_name(&options.wrapper_class);
        canvas
            .set_attribute("id", &format!("page{}", number))
            .map_err(ViewerError::dom)?;
        if options.opaque {
            // Firefox-only hint, ignored elsewhere.
            Reflect::set(&canvas, &JsValue::from_str("mozOpaque"), &JsValue::TRUE)
                .map_err(ViewerError::dom)?;
        }

        wrapper.append_child(&canvas).map_err(ViewerError::dom)?;
        container.append_child(&wrapper).map_err(ViewerError::dom)?;

        let handle = Self {
            container,
            wrapper,
            canvas,
            opaque: options.opaque,
            state: PageState::Unloaded,
        };
        handle.sync_state_attr()?;
        Ok(handle)
    }

    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    pub fn state(&self) -> PageState {
        self.state
    }

    /// The canvas 2D context, requested without alpha for opaque pages.
    pub fn context(&self) -> Result<CanvasRenderingContext2d, ViewerError> {
        let attrs = Object::new();
        Reflect::set(&attrs, &JsValue::from_str("alpha"), &JsValue::from_bool(!self.opaque))
            .map_err(ViewerError::dom)?;
        self.canvas
            .get_context_with_context_options("2d", &attrs)
            .map_err(ViewerError::dom)?
            .ok_or_else(|| ViewerError::Dom("No 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| ViewerError::Dom("Failed to cast to CanvasRenderingContext2d".into()))
    }

    /// Sizes the canvas buffer, the canvas box and the wrapper box.
    pub fn apply_layout(&self, layout: &CanvasLayout) -> Result<(), ViewerError> {
        self.canvas.set_width(layout.canvas_width);
        self.canvas.set_height(layout.canvas_height);
        set_size(&self.canvas, layout.style_width, layout.style_height)?;
        set_size(&self.wrapper, layout.wrapper_width, layout.wrapper_height)
    }

    pub fn mark_loaded(&mut self) -> Result<(), ViewerError> {
        self.state = PageState::Loaded;
        self.sync_state_attr()
    }

    /// Clears a loaded page's pixels. Returns whether anything was cleared.
    pub fn destroy(&mut self) -> Result<bool, ViewerError> {
        if self.state != PageState::Loaded {
            return Ok(false);
        }
        let ctx = self.context()?;
        ctx.clear_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
        self.state = PageState::Unloaded;
        self.sync_state_attr()?;
        Ok(true)
    }

    /// Detaches the container from whatever parent the host put it in.
    pub fn detach(&self) {
        self.container.remove();
    }

    fn sync_state_attr(&self) -> Result<(), ViewerError> {
        self.container
            .set_attribute("data-loaded", self.state.as_data_attr())
            .map_err(ViewerError::dom)
    }
}

fn create<T: JsCast>(document: &Document, tag: &str) -> Result<T, ViewerError> {
    document
        .create_element(tag)
        .map_err(ViewerError::dom)?
        .dyn_into::<T>()
        .map_err(|_| ViewerError::Dom(format!("<{}> has an unexpected type", tag)))
}

fn set_size(element: &HtmlElement, width: f64, height: f64) -> Result<(), ViewerError> {
    let style = element.style();
    style
        .set_property("width", &px(width))
        .map_err(ViewerError::dom)?;
    style
        .set_property("height", &px(height))
        .map_err(ViewerError::dom)
}

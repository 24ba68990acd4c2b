//! Canvas sizing for a rendered page.

use crate::scale::{OutputScale, approximate_fraction, round_to_divide};
use crate::schema::{Viewport, ViewerError};

/// Zoom that makes a page of `page_width` occupy `fill` of `available_width`.
pub fn fit_scale(available_width: f64, page_width: f64, fill: f64) -> Result<f64, ViewerError> {
    if !(page_width > 0.0) {
        return Err(ViewerError::InvalidViewport(page_width));
    }
    Ok(available_width * fill / page_width)
}

/// Element sizes for one page at one viewport and output scale.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasLayout {
    /// Backing buffer size in device pixels.
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Canvas CSS box in CSS pixels.
    pub style_width: f64,
    pub style_height: f64,
    /// Wrapper CSS box, the unsnapped viewport size.
    pub wrapper_width: f64,
    pub wrapper_height: f64,
    /// Transform passed to `page.render`, if the output is scaled.
    pub transform: Option<[f64; 6]>,
}

impl CanvasLayout {
    pub fn compute(viewport: Viewport, output: &OutputScale) -> Self {
        let (fx_num, fx_den) = approximate_fraction(output.sx);
        let (fy_num, fy_den) = approximate_fraction(output.sy);

        Self {
            canvas_width: round_to_divide(viewport.width * output.sx, fx_num) as u32,
            canvas_height: round_to_divide(viewport.height * output.sy, fy_num) as u32,
            style_width: round_to_divide(viewport.width, fx_den),
            style_height: round_to_divide(viewport.height, fy_den),
            wrapper_width: viewport.width,
            wrapper_height: viewport.height,
            transform: output.transform(),
        }
    }
}

/// Formats a length for an inline style.
pub(crate) fn px(value: f64) -> String {
    format!("{}px", value)
}

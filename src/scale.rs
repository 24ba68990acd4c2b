//! Output scaling for high-DPI canvases.
//!
//! A canvas backing buffer has to be sized in device pixels while its CSS box stays
//! in CSS pixels. When the ratio between the two is fractional (1.5, 1.25, ...) the
//! buffer and box sizes are snapped to multiples of a small rational approximation of
//! the ratio so the page is not resampled at sub-pixel offsets.
//!
//! `approximate_fraction`, `round_to_divide` and the backing-store lookup in
//! `OutputScale::detect` follow mozilla/pdf.js `web/ui_utils.js` (Apache-2.0).

use js_sys::Reflect;
use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, Window};

/// Largest denominator considered by [`approximate_fraction`].
pub const MAX_FRACTION_ORDER: u32 = 8;

/// Vendor-specific backing-store ratio properties, checked in order.
const BACKING_STORE_PROPERTIES: [&str; 5] = [
    "webkitBackingStorePixelRatio",
    "mozBackingStorePixelRatio",
    "msBackingStorePixelRatio",
    "oBackingStorePixelRatio",
    "backingStorePixelRatio",
];

/// Approximates a positive float as `(numerator, denominator)` using a Farey
/// sequence search of order [`MAX_FRACTION_ORDER`].
///
/// Values above one are approximated through their reciprocal, so for `x > 1`
/// the bound applies to the numerator of the reciprocal approximation. The
/// returned denominator is always in `1..=8`.
///
/// Inputs are pixel ratios, so the numerator is a `u32`: integers above
/// `u32::MAX` saturate to `(u32::MAX, 1)`.
///
/// ```
/// use pdf_slide_viewer::scale::approximate_fraction;
///
/// assert_eq!(approximate_fraction(1.5), (3, 2));
/// assert_eq!(approximate_fraction(0.25), (1, 4));
/// ```
pub fn approximate_fraction(x: f64) -> (u32, u32) {
    // Fast path for integers and their inversions.
    if x.floor() == x {
        return (x as u32, 1);
    }

    let xinv = 1.0 / x;
    if xinv > f64::from(MAX_FRACTION_ORDER) {
        return (1, MAX_FRACTION_ORDER);
    } else if xinv.floor() == xinv {
        return (1, xinv as u32);
    }

    let inverted = x > 1.0;
    let target = if inverted { xinv } else { x };

    // a/b and c/d are neighbours in the Farey sequence.
    let (mut a, mut b, mut c, mut d) = (0u32, 1u32, 1u32, 1u32);
    loop {
        let (p, q) = (a + c, b + d);
        if q > MAX_FRACTION_ORDER {
            break;
        }
        if target <= f64::from(p) / f64::from(q) {
            c = p;
            d = q;
        } else {
            a = p;
            b = q;
        }
    }

    // 0/1 only survives as the left neighbour for x > 16; its reciprocal has no
    // denominator, so the right neighbour wins.
    let left_closer = target - f64::from(a) / f64::from(b) < f64::from(c) / f64::from(d) - target;
    let (num, den) = if left_closer && a != 0 { (a, b) } else { (c, d) };

    if inverted { (den, num) } else { (num, den) }
}

/// Rounds `x` up to the next multiple of `div`, leaving exact multiples untouched.
pub fn round_to_divide(x: f64, div: u32) -> f64 {
    let div = f64::from(div);
    let r = x % div;
    if r == 0.0 { x } else { (x - r + div).round() }
}

/// Per-axis ratio between device pixels and CSS pixels for one canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputScale {
    pub sx: f64,
    pub sy: f64,
    /// True when either axis differs from 1.
    pub scaled: bool,
}

impl OutputScale {
    /// Builds the scale from a device pixel ratio and a backing-store ratio.
    ///
    /// A ratio that is missing (zero, negative or NaN) counts as 1.
    pub fn from_ratios(device_pixel_ratio: f64, backing_store_ratio: f64) -> Self {
        let ratio = or_one(device_pixel_ratio) / or_one(backing_store_ratio);
        Self {
            sx: ratio,
            sy: ratio,
            scaled: ratio != 1.0,
        }
    }

    /// Reads the current ratios from the window and the canvas context.
    pub fn detect(window: &Window, ctx: &CanvasRenderingContext2d) -> Self {
        let backing_store = BACKING_STORE_PROPERTIES
            .iter()
            .filter_map(|name| Reflect::get(ctx, &JsValue::from_str(name)).ok())
            .filter_map(|value| value.as_f64())
            .find(|value| *value > 0.0)
            .unwrap_or(1.0);
        Self::from_ratios(window.device_pixel_ratio(), backing_store)
    }

    /// Canvas transform handed to the renderer, `None` when no scaling is needed.
    pub fn transform(&self) -> Option<[f64; 6]> {
        self.scaled.then_some([self.sx, 0.0, 0.0, self.sy, 0.0, 0.0])
    }
}

impl Default for OutputScale {
    fn default() -> Self {
        Self::from_ratios(1.0, 1.0)
    }
}

fn or_one(ratio: f64) -> f64 {
    if ratio > 0.0 { ratio } else { 1.0 }
}

//! Gradient strip rendering.

use image::{Rgba, RgbaImage};

use ramp_core::Colormap;

/// Default strip width in pixels — one column per gradient sample.
pub const DEFAULT_STRIP_WIDTH: u32 = 256;
/// Default strip height in pixels.
pub const DEFAULT_STRIP_HEIGHT: u32 = 32;

/// Render a colormap as a horizontal gradient strip.
///
/// Column `x` samples the colormap at `t = x / (width - 1)`; every row is
/// identical. A width of 1 samples at `t = 0`.
pub fn gradient_strip(cmap: &Colormap, width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, _| {
        let t = if width > 1 {
            x as f32 / (width - 1) as f32
        } else {
            0.0
        };
        Rgba(to_rgba8(cmap.color_at(t)))
    })
}

/// Quantize an RGBA f32 color in [0, 1] to 8-bit with round-to-nearest.
fn to_rgba8(color: [f32; 4]) -> [u8; 4] {
    color.map(|v| (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8)
}

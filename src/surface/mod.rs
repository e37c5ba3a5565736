//! Drawing surfaces, the capability the executor draws through.
//!
//! Color and paper values are on the DBN 0..100 scale and are clamped by the
//! surface itself. A value `v` becomes the gray `255 * (100 - v) / 100`, so 0
//! renders white and 100 renders black.

pub mod canvas;
pub mod recorder;

pub use canvas::Canvas;
pub use recorder::{RecordingSurface, SurfaceCall};

/// A target the executor can draw on.
pub trait DrawingSurface {
    fn set_pen_size(&mut self, size: f64);
    fn set_color(&mut self, value: f64);
    /// Fill the whole surface with `value`, keeping the current color.
    fn set_paper(&mut self, value: f64);
    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);
    /// `(x1, y1)` and `(x2, y2)` are opposite corners.
    fn draw_rect(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);
    fn draw_circle(&mut self, x: f64, y: f64, r: f64);
    fn fill_rect(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);
    fn fill_circle(&mut self, x: f64, y: f64, r: f64);
    fn width(&self) -> f64;
    fn height(&self) -> f64;
}

/// Clamp a color or paper value to 0..100. NaN clamps to 0.
pub fn clamp_level(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// Grayscale intensity for a DBN value, after clamping.
pub fn gray_level(value: f64) -> u8 {
    let v = clamp_level(value);
    (255.0 * (100.0 - v) / 100.0).floor() as u8
}

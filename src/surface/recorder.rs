//! A surface that remembers every call instead of drawing.

use serde::Serialize;

use super::DrawingSurface;

/// One call made on a [`DrawingSurface`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SurfaceCall {
    PenSize(f64),
    Color(f64),
    Paper(f64),
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    Rect { x1: f64, y1: f64, x2: f64, y2: f64 },
    Circle { x: f64, y: f64, r: f64 },
    FillRect { x1: f64, y1: f64, x2: f64, y2: f64 },
    FillCircle { x: f64, y: f64, r: f64 },
}

/// A surface that records calls in order. Values are stored exactly as
/// received, before any clamping.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<SurfaceCall> {
        self.calls
    }
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new(400.0, 400.0)
    }
}

impl DrawingSurface for RecordingSurface {
    fn set_pen_size(&mut self, size: f64) {
        self.calls.push(SurfaceCall::PenSize(size));
    }

    fn set_color(&mut self, value: f64) {
        self.calls.push(SurfaceCall::Color(value));
    }

    fn set_paper(&mut self, value: f64) {
        self.calls.push(SurfaceCall::Paper(value));
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.calls.push(SurfaceCall::Line { x1, y1, x2, y2 });
    }

    fn draw_rect(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.calls.push(SurfaceCall::Rect { x1, y1, x2, y2 });
    }

    fn draw_circle(&mut self, x: f64, y: f64, r: f64) {
        self.calls.push(SurfaceCall::Circle { x, y, r });
    }

    fn fill_rect(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.calls.push(SurfaceCall::FillRect { x1, y1, x2, y2 });
    }

    fn fill_circle(&mut self, x: f64, y: f64, r: f64) {
        self.calls.push(SurfaceCall::FillCircle { x, y, r });
    }

    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }
}

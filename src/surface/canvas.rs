//! Software raster canvas.
//!
//! A grayscale pixel buffer using DBN coordinates: the origin is the
//! lower-left corner and y grows upward. Each byte is a gray level, 0 black
//! and 255 white. Strokes are stamped with a square pen; anything outside the
//! raster is clipped.

use std::io::{self, Write};

use super::{gray_level, DrawingSurface};

const WHITE: u8 = 255;
const BLACK: u8 = 0;

/// Gray levels below this count as ink in the text preview.
const INK_THRESHOLD: u8 = 128;

/// Coordinates and radii are clamped to this magnitude; infinities included.
const COORD_LIMIT: f64 = 1e300;

#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    /// Row-major, row 0 is the top of the image.
    pixels: Vec<u8>,
    pen_size: f64,
    ink: u8,
}

impl Canvas {
    /// Create a white canvas with a black 1-pixel pen.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![WHITE; width * height],
            pen_size: 1.0,
            ink: BLACK,
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Current stroke and fill gray.
    pub fn ink(&self) -> u8 {
        self.ink
    }

    /// Gray at raster position `(col, row)`, row 0 at the top.
    pub fn pixel(&self, col: usize, row: usize) -> Option<u8> {
        if col < self.width && row < self.height {
            Some(self.pixels[row * self.width + col])
        } else {
            None
        }
    }

    /// Gray at DBN coordinates.
    pub fn sample(&self, x: f64, y: f64) -> Option<u8> {
        let (col, row) = self.to_raster(x, y)?;
        if col < 0.0 || row < 0.0 {
            return None;
        }
        self.pixel(col as usize, row as usize)
    }

    /// Encode as a binary PGM (P5) image.
    pub fn write_pgm<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "P5\n{} {}\n255\n", self.width, self.height)?;
        out.write_all(&self.pixels)?;
        out.flush()
    }

    /// Render a text preview with half-block characters, at most `columns`
    /// characters wide. Each character covers two vertically stacked
    /// samples.
    pub fn preview(&self, columns: usize) -> String {
        if self.width == 0 || self.height == 0 || columns == 0 {
            return String::new();
        }

        let step = self.width.div_ceil(columns).max(1);
        let cols = self.width.div_ceil(step);
        let rows = self.height.div_ceil(step * 2);

        let is_ink = |col: usize, row: usize| {
            self.pixel(col, row)
                .is_some_and(|gray| gray < INK_THRESHOLD)
        };

        let mut out = String::with_capacity((cols + 1) * rows * 3);
        for r in 0..rows {
            let top_row = r * 2 * step;
            let bottom_row = top_row + step;
            for c in 0..cols {
                let col = c * step;
                let ch = match (is_ink(col, top_row), is_ink(col, bottom_row)) {
                    (true, true) => '█',
                    (true, false) => '▀',
                    (false, true) => '▄',
                    (false, false) => ' ',
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }

    // -----------------------------------------------------------------------
    // Rasterization
    //
    // Geometry stays in f64 until it has been clipped to the raster plus a
    // pen-sized margin, so integer coordinates are always small.
    // -----------------------------------------------------------------------

    /// Rounded raster position of a DBN point, or None for NaN.
    fn to_raster(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if x.is_nan() || y.is_nan() {
            return None;
        }
        let col = x.round().clamp(-COORD_LIMIT, COORD_LIMIT);
        let row = (self.height as f64 - 1.0) - y.round().clamp(-COORD_LIMIT, COORD_LIMIT);
        Some((col, row))
    }

    fn last_col(&self) -> f64 {
        self.width as f64 - 1.0
    }

    fn last_row(&self) -> f64 {
        self.height as f64 - 1.0
    }

    fn put(&mut self, col: i64, row: i64, gray: u8) {
        if col >= 0 && row >= 0 && (col as usize) < self.width && (row as usize) < self.height {
            let idx = row as usize * self.width + col as usize;
            self.pixels[idx] = gray;
        }
    }

    /// Side length of the square pen, in pixels.
    fn pen_side(&self) -> i64 {
        let limit = self.width.max(self.height).max(1) as i64;
        if self.pen_size.is_finite() && self.pen_size >= 1.0 {
            (self.pen_size.round() as i64).min(limit)
        } else {
            1
        }
    }

    fn stamp(&mut self, col: i64, row: i64) {
        let side = self.pen_side();
        let offset = (side - 1) / 2;
        for dy in 0..side {
            for dx in 0..side {
                self.put(col - offset + dx, row - offset + dy, self.ink);
            }
        }
    }

    /// Whether a box of half-size `reach` around `(col, row)` overlaps the
    /// raster.
    fn touches_raster(&self, col: f64, row: f64, reach: f64) -> bool {
        col + reach >= 0.0
            && col - reach <= self.last_col()
            && row + reach >= 0.0
            && row - reach <= self.last_row()
    }

    /// Liang-Barsky clip of a segment to the raster grown by one pen width.
    /// A clipped endpoint lands exactly on the edge that cut it.
    fn clip_segment(
        &self,
        (x0, y0): (f64, f64),
        (x1, y1): (f64, f64),
    ) -> Option<((f64, f64), (f64, f64))> {
        let margin = self.pen_side() as f64;
        let (low, last_col, last_row) = (-margin, self.last_col() + margin, self.last_row() + margin);
        let (dx, dy) = (x1 - x0, y1 - y0);
        let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
        let (mut from, mut to) = ((x0, y0), (x1, y1));

        for (p, q, edge) in [
            (-dx, x0 - low, Edge::Col(low)),
            (dx, last_col - x0, Edge::Col(last_col)),
            (-dy, y0 - low, Edge::Row(low)),
            (dy, last_row - y0, Edge::Row(last_row)),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let t = q / p;
            let point = match edge {
                Edge::Col(col) => (col, y0 + t * dy),
                Edge::Row(row) => (x0 + t * dx, row),
            };
            if p < 0.0 {
                if t > t1 {
                    return None;
                }
                if t > t0 {
                    t0 = t;
                    from = point;
                }
            } else {
                if t < t0 {
                    return None;
                }
                if t < t1 {
                    t1 = t;
                    to = point;
                }
            }
        }

        Some((from, to))
    }

    /// Bresenham between two raster points, after clipping.
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64)) {
        let Some((from, to)) = self.clip_segment(from, to) else {
            return;
        };
        let (x1, y1) = (from.0.round() as i64, from.1.round() as i64);
        let (x2, y2) = (to.0.round() as i64, to.1.round() as i64);

        let dx = (x2 - x1).abs();
        let dy = -(y2 - y1).abs();
        let sx = if x1 < x2 { 1 } else { -1 };
        let sy = if y1 < y2 { 1 } else { -1 };
        let mut err = dx + dy;
        let mut x = x1;
        let mut y = y1;

        loop {
            self.stamp(x, y);

            if x == x2 && y == y2 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                if x == x2 {
                    break;
                }
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                if y == y2 {
                    break;
                }
                err += dx;
                y += sy;
            }
        }
    }

    fn circle_points(&mut self, cx: i64, cy: i64, x: i64, y: i64) {
        self.stamp(cx + x, cy + y);
        self.stamp(cx - x, cy + y);
        self.stamp(cx + x, cy - y);
        self.stamp(cx - x, cy - y);
        self.stamp(cx + y, cy + x);
        self.stamp(cx - y, cy + x);
        self.stamp(cx + y, cy - x);
        self.stamp(cx - y, cy - x);
    }

    /// Outline for radii too large to walk point by point: ink every raster
    /// pixel whose distance from the center is within half a pen of `r`.
    fn stroke_ring(&mut self, cx: f64, cy: f64, r: f64) {
        let half = self.pen_side() as f64 / 2.0;
        for row in 0..self.height {
            for col in 0..self.width {
                let d = (col as f64 - cx).hypot(row as f64 - cy);
                if (d - r).abs() <= half {
                    self.pixels[row * self.width + col] = self.ink;
                }
            }
        }
    }
}

/// A raster boundary line used when clipping.
#[derive(Clone, Copy)]
enum Edge {
    Col(f64),
    Row(f64),
}

/// Rounded absolute radius, or None for NaN.
fn radius_px(r: f64) -> Option<f64> {
    if r.is_nan() {
        None
    } else {
        Some(r.abs().round().min(COORD_LIMIT))
    }
}

impl DrawingSurface for Canvas {
    fn set_pen_size(&mut self, size: f64) {
        self.pen_size = size;
    }

    fn set_color(&mut self, value: f64) {
        self.ink = gray_level(value);
    }

    fn set_paper(&mut self, value: f64) {
        self.pixels.fill(gray_level(value));
    }

    fn draw_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        if let (Some(from), Some(to)) = (self.to_raster(x1, y1), self.to_raster(x2, y2)) {
            self.stroke_line(from, to);
        }
    }

    fn draw_rect(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let (Some((c1, r1)), Some((c2, r2))) = (self.to_raster(x1, y1), self.to_raster(x2, y2))
        else {
            return;
        };
        self.stroke_line((c1, r1), (c2, r1));
        self.stroke_line((c1, r2), (c2, r2));
        self.stroke_line((c1, r1), (c1, r2));
        self.stroke_line((c2, r1), (c2, r2));
    }

    /// Midpoint circle outline. Radii beyond a few raster sizes fall back to
    /// a distance test over the raster.
    fn draw_circle(&mut self, x: f64, y: f64, r: f64) {
        let (Some((cx, cy)), Some(r)) = (self.to_raster(x, y), radius_px(r)) else {
            return;
        };
        if !self.touches_raster(cx, cy, r + self.pen_side() as f64) {
            return;
        }
        if r > 2.0 * (self.width + self.height) as f64 {
            self.stroke_ring(cx, cy, r);
            return;
        }

        let (cx, cy, r) = (cx as i64, cy as i64, r as i64);
        let mut px = r;
        let mut py = 0;
        let mut p = 1 - r;

        self.circle_points(cx, cy, px, py);

        while px > py {
            py += 1;
            if p <= 0 {
                p += 2 * py + 1;
            } else {
                px -= 1;
                p += 2 * py - 2 * px + 1;
            }
            self.circle_points(cx, cy, px, py);
        }
    }

    fn fill_rect(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        let (Some((c1, r1)), Some((c2, r2))) = (self.to_raster(x1, y1), self.to_raster(x2, y2))
        else {
            return;
        };
        let (col_min, col_max) = (c1.min(c2).max(0.0), c1.max(c2).min(self.last_col()));
        let (row_min, row_max) = (r1.min(r2).max(0.0), r1.max(r2).min(self.last_row()));
        if col_min > col_max || row_min > row_max {
            return;
        }

        let (col_min, col_max) = (col_min as usize, col_max as usize);
        for row in row_min as usize..=row_max as usize {
            let start = row * self.width;
            self.pixels[start + col_min..=start + col_max].fill(self.ink);
        }
    }

    fn fill_circle(&mut self, x: f64, y: f64, r: f64) {
        let (Some((cx, cy)), Some(r)) = (self.to_raster(x, y), radius_px(r)) else {
            return;
        };
        let row_min = (cy - r).max(0.0);
        let row_max = (cy + r).min(self.last_row());
        if row_min > row_max {
            return;
        }

        for row in row_min as usize..=row_max as usize {
            let dy = (row as f64 - cy).abs();
            // Factored so huge radii reach inf, never inf - inf.
            let reach = (r - dy) * (r + dy);
            if reach < 0.0 {
                continue;
            }
            let span = reach.sqrt().floor();
            let col_min = (cx - span).max(0.0);
            let col_max = (cx + span).min(self.last_col());
            if col_min > col_max {
                continue;
            }
            let start = row * self.width;
            self.pixels[start + col_min as usize..=start + col_max as usize].fill(self.ink);
        }
    }

    fn width(&self) -> f64 {
        self.width as f64
    }

    fn height(&self) -> f64 {
        self.height as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Interpreter;

    fn ink_count(canvas: &Canvas) -> usize {
        canvas.pixels().iter().filter(|&&g| g == BLACK).count()
    }

    #[test]
    fn new_canvas_is_white() {
        let canvas = Canvas::new(4, 3);
        assert_eq!(canvas.pixels().len(), 12);
        assert!(canvas.pixels().iter().all(|&g| g == WHITE));
        assert_eq!(canvas.width(), 4.0);
        assert_eq!(canvas.height(), 3.0);
    }

    #[test]
    fn origin_is_bottom_left() {
        let mut canvas = Canvas::new(10, 10);
        canvas.draw_line(0.0, 0.0, 0.0, 0.0);
        assert_eq!(canvas.pixel(0, 9), Some(BLACK));
        assert_eq!(canvas.sample(0.0, 0.0), Some(BLACK));
        assert_eq!(canvas.pixel(0, 0), Some(WHITE));
    }

    #[test]
    fn color_is_clamped_and_inverted() {
        let mut canvas = Canvas::new(2, 2);
        canvas.set_color(150.0);
        assert_eq!(canvas.ink(), 0);
        canvas.set_color(-10.0);
        assert_eq!(canvas.ink(), 255);
        canvas.set_color(50.0);
        assert_eq!(canvas.ink(), 127);
    }

    #[test]
    fn paper_fills_and_keeps_ink() {
        let mut canvas = Canvas::new(3, 3);
        canvas.set_color(100.0);
        canvas.set_paper(50.0);
        assert!(canvas.pixels().iter().all(|&g| g == 127));
        assert_eq!(canvas.ink(), BLACK);
    }

    #[test]
    fn horizontal_line() {
        let mut canvas = Canvas::new(10, 10);
        canvas.draw_line(2.0, 5.0, 6.0, 5.0);
        assert_eq!(ink_count(&canvas), 5);
        for x in 2..=6 {
            assert_eq!(canvas.sample(x as f64, 5.0), Some(BLACK));
        }
    }

    #[test]
    fn diagonal_line_hits_both_ends() {
        let mut canvas = Canvas::new(10, 10);
        canvas.draw_line(0.0, 0.0, 9.0, 9.0);
        assert_eq!(ink_count(&canvas), 10);
        assert_eq!(canvas.sample(9.0, 9.0), Some(BLACK));
    }

    #[test]
    fn thick_pen_stamps_squares() {
        let mut canvas = Canvas::new(10, 10);
        canvas.set_pen_size(3.0);
        canvas.draw_line(5.0, 5.0, 5.0, 5.0);
        assert_eq!(ink_count(&canvas), 9);
        assert_eq!(canvas.sample(4.0, 4.0), Some(BLACK));
        assert_eq!(canvas.sample(6.0, 6.0), Some(BLACK));
    }

    #[test]
    fn zero_pen_still_draws_one_pixel() {
        let mut canvas = Canvas::new(5, 5);
        canvas.set_pen_size(0.0);
        canvas.draw_line(1.0, 1.0, 1.0, 1.0);
        assert_eq!(ink_count(&canvas), 1);
    }

    #[test]
    fn rect_outline() {
        let mut canvas = Canvas::new(10, 10);
        canvas.draw_rect(1.0, 1.0, 4.0, 4.0);
        assert_eq!(ink_count(&canvas), 12);
        assert_eq!(canvas.sample(2.0, 2.0), Some(WHITE));
    }

    #[test]
    fn fill_rect_any_corner_order() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_rect(4.0, 4.0, 1.0, 1.0);
        assert_eq!(ink_count(&canvas), 16);
    }

    #[test]
    fn circle_outline_is_symmetric() {
        let mut canvas = Canvas::new(21, 21);
        canvas.draw_circle(10.0, 10.0, 5.0);
        assert_eq!(canvas.sample(15.0, 10.0), Some(BLACK));
        assert_eq!(canvas.sample(5.0, 10.0), Some(BLACK));
        assert_eq!(canvas.sample(10.0, 15.0), Some(BLACK));
        assert_eq!(canvas.sample(10.0, 5.0), Some(BLACK));
        assert_eq!(canvas.sample(10.0, 10.0), Some(WHITE));
    }

    #[test]
    fn fill_circle_covers_center() {
        let mut canvas = Canvas::new(21, 21);
        canvas.fill_circle(10.0, 10.0, 3.0);
        assert_eq!(canvas.sample(10.0, 10.0), Some(BLACK));
        assert_eq!(canvas.sample(13.0, 10.0), Some(BLACK));
        assert_eq!(canvas.sample(13.0, 13.0), Some(WHITE));
    }

    #[test]
    fn off_canvas_shapes_are_clipped() {
        let mut canvas = Canvas::new(5, 5);
        canvas.draw_line(-10.0, 2.0, 20.0, 2.0);
        canvas.fill_rect(-50.0, -50.0, -10.0, -10.0);
        canvas.fill_circle(100.0, 100.0, 3.0);
        assert_eq!(ink_count(&canvas), 5);
    }

    #[test]
    fn huge_line_is_clipped_to_raster() {
        let mut canvas = Canvas::new(10, 10);
        Interpreter::run("line 0 0 9999999999999999999999999 0", &mut canvas).unwrap();
        assert_eq!(ink_count(&canvas), 10);
        for col in 0..10 {
            assert_eq!(canvas.pixel(col, 9), Some(BLACK));
        }

        let mut canvas = Canvas::new(10, 10);
        canvas.draw_line(f64::NEG_INFINITY, 3.0, f64::INFINITY, 3.0);
        assert_eq!(ink_count(&canvas), 10);
        assert_eq!(canvas.sample(9.0, 3.0), Some(BLACK));
    }

    #[test]
    fn huge_steep_line_keeps_its_slope() {
        let mut canvas = Canvas::new(10, 10);
        canvas.draw_line(0.0, 0.0, 1e25, 1e25);
        assert_eq!(ink_count(&canvas), 10);
        for i in 0..10 {
            assert_eq!(canvas.sample(i as f64, i as f64), Some(BLACK));
        }
    }

    #[test]
    fn huge_rect_keeps_visible_edges() {
        let mut canvas = Canvas::new(10, 10);
        canvas.draw_rect(-1e20, 2.0, 1e20, 7.0);
        assert_eq!(ink_count(&canvas), 20);
        assert_eq!(canvas.sample(0.0, 2.0), Some(BLACK));
        assert_eq!(canvas.sample(9.0, 7.0), Some(BLACK));
        assert_eq!(canvas.sample(5.0, 5.0), Some(WHITE));
    }

    #[test]
    fn huge_circle_outline_misses_enclosed_raster() {
        let mut canvas = Canvas::new(10, 10);
        Interpreter::run("circle 0 0 2000000000", &mut canvas).unwrap();
        assert_eq!(ink_count(&canvas), 0);
    }

    #[test]
    fn huge_circle_outline_crossing_raster_draws_arc() {
        let mut canvas = Canvas::new(10, 10);
        canvas.draw_circle(-1e9, 5.0, 1e9 + 5.0);
        assert_eq!(ink_count(&canvas), 10);
        for y in 0..10 {
            assert_eq!(canvas.sample(5.0, y as f64), Some(BLACK));
        }
    }

    #[test]
    fn huge_fill_circle_covers_raster() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_circle(5.0, 5.0, 5e9);
        assert_eq!(ink_count(&canvas), 100);

        let mut canvas = Canvas::new(10, 10);
        canvas.fill_circle(0.0, 0.0, f64::INFINITY);
        assert_eq!(ink_count(&canvas), 100);
    }

    #[test]
    fn huge_fills_far_away_draw_nothing() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_circle(1e30, -1e30, 3.0);
        canvas.draw_circle(-1e30, 1e30, 3.0);
        canvas.fill_rect(1e30, 1e30, 2e30, 2e30);
        assert_eq!(ink_count(&canvas), 0);

        canvas.fill_rect(-1e30, -1e30, 1e30, 1e30);
        assert_eq!(ink_count(&canvas), 100);
    }

    #[test]
    fn nan_geometry_is_ignored() {
        let mut canvas = Canvas::new(5, 5);
        canvas.draw_line(f64::NAN, 0.0, 4.0, 4.0);
        canvas.fill_circle(2.0, 2.0, f64::NAN);
        assert_eq!(ink_count(&canvas), 0);
    }

    #[test]
    fn pgm_header_and_body() {
        let mut canvas = Canvas::new(3, 2);
        canvas.set_paper(100.0);
        let mut out = Vec::new();
        canvas.write_pgm(&mut out).unwrap();
        let header = b"P5\n3 2\n255\n";
        assert_eq!(&out[..header.len()], header);
        assert_eq!(&out[header.len()..], &[0u8; 6]);
    }

    #[test]
    fn preview_half_blocks() {
        let mut canvas = Canvas::new(2, 2);
        // Top-left and both bottom pixels.
        canvas.draw_line(0.0, 1.0, 0.0, 1.0);
        canvas.draw_line(0.0, 0.0, 1.0, 0.0);
        assert_eq!(canvas.preview(80), "█▄\n");
    }

    #[test]
    fn preview_downscales_to_columns() {
        let canvas = Canvas::new(100, 40);
        let text = canvas.preview(10);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.chars().count() == 10));
    }
}

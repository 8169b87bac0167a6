//! Lines and rectangles drawn into the framebuffer.
//!
//! Everything goes through [`FrameBuffer::set_pixel`] semantics: points
//! outside the panel are dropped one by one.

use embedded_graphics::prelude::Point;

use super::framebuffer::FrameBuffer;
use super::{HEIGHT, WIDTH};
use crate::hal::Color;

/// Bresenham line points from `start` to `end`, both inclusive.
///
/// Works in every octant using separate x/y error terms. Error arithmetic
/// is done in `i64` so extreme `i32` endpoints cannot overflow.
#[derive(Debug, Clone)]
pub struct LinePoints {
    x: i64,
    y: i64,
    end_x: i64,
    end_y: i64,
    dx: i64,
    dy: i64,
    sx: i64,
    sy: i64,
    err: i64,
    done: bool,
}

impl LinePoints {
    /// Points on the segment `start..=end`.
    #[allow(clippy::arithmetic_side_effects)] // i32 differences fit in i64
    pub fn new(start: Point, end: Point) -> Self {
        let (x0, y0) = (i64::from(start.x), i64::from(start.y));
        let (x1, y1) = (i64::from(end.x), i64::from(end.y));
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        Self {
            x: x0,
            y: y0,
            end_x: x1,
            end_y: y1,
            dx,
            dy,
            sx: if x0 < x1 { 1 } else { -1 },
            sy: if y0 < y1 { 1 } else { -1 },
            err: dx + dy,
            done: false,
        }
    }
}

impl Iterator for LinePoints {
    type Item = Point;

    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    // x and y stay between the i32 endpoints
    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }
        let point = Point::new(self.x as i32, self.y as i32);
        if self.x == self.end_x && self.y == self.end_y {
            self.done = true;
            return Some(point);
        }
        let e2 = 2 * self.err;
        if e2 >= self.dy {
            self.err += self.dy;
            self.x += self.sx;
        }
        if e2 <= self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(point)
    }
}

/// Draw a line, endpoints inclusive.
pub fn line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
    for p in LinePoints::new(Point::new(x0, y0), Point::new(x1, y1)) {
        fb.set_pixel(p.x, p.y, color);
    }
}

/// Draw a rectangle outline with its top-left corner at `(x, y)`.
///
/// Non-positive sizes are not special-cased; they produce degenerate edges.
pub fn rect(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, color: Color) {
    let right = x.saturating_add(w).saturating_sub(1);
    let bottom = y.saturating_add(h).saturating_sub(1);
    line(fb, x, y, right, y, color);
    line(fb, x, y, x, bottom, color);
    line(fb, right, y, right, bottom, color);
    line(fb, x, bottom, right, bottom, color);
}

/// Fill a rectangle, clipped to the panel. Non-positive sizes draw nothing.
pub fn fill_rect(fb: &mut FrameBuffer, x: i32, y: i32, w: i32, h: i32, color: Color) {
    if w <= 0 || h <= 0 {
        return;
    }
    let (x0, x1) = clip(x, w, WIDTH);
    let (y0, y1) = clip(y, h, HEIGHT);
    if x0 >= x1 {
        return;
    }
    for row in y0..y1 {
        fb.fill_span(row, x0, x1, color);
    }
}

/// Clip `start..start + len` to `0..limit`.
#[allow(
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)] // limit is a panel dimension; results are clamped to 0..=limit
fn clip(start: i32, len: i32, limit: usize) -> (usize, usize) {
    let limit = limit as i64;
    let lo = i64::from(start).clamp(0, limit);
    let hi = (i64::from(start) + i64::from(len)).clamp(0, limit);
    (lo as usize, hi as usize)
}

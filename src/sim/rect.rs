//! Integer axis-aligned rectangles
//!
//! Every hitbox in the simulation is an integer rect; continuous entity
//! positions are rounded into one on each change so a rider and its
//! platform can never disagree by a sub-pixel.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle: `(x, y)` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_center(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Self::new(cx - w / 2, cy - h / 2, w, h)
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.w / 2
    }

    pub fn center_y(&self) -> i32 {
        self.y + self.h / 2
    }

    pub fn center(&self) -> (i32, i32) {
        (self.center_x(), self.center_y())
    }

    /// Translate so the left edge lands on `left`.
    pub fn set_left(&mut self, left: i32) {
        self.x = left;
    }

    /// Translate so the right edge lands on `right`.
    pub fn set_right(&mut self, right: i32) {
        self.x = right - self.w;
    }

    /// Translate so the center lands on `(cx, cy)`.
    pub fn set_center(&mut self, cx: i32, cy: i32) {
        self.x = cx - self.w / 2;
        self.y = cy - self.h / 2;
    }

    /// Strict overlap test; touching edges do not count and a zero-size
    /// rect overlaps nothing.
    pub fn overlaps(&self, other: Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    /// Overlapping region of two rects; zero-size when they don't overlap.
    pub fn intersection(&self, other: Rect) -> Rect {
        let left = self.left().max(other.left());
        let top = self.top().max(other.top());
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right > left && bottom > top {
            Rect::new(left, top, right - left, bottom - top)
        } else {
            Rect::default()
        }
    }

    /// Point containment, half-open: the right and bottom edges are outside.
    pub fn contains_point(&self, px: i32, py: i32) -> bool {
        px >= self.left() && px < self.right() && py >= self.top() && py < self.bottom()
    }

    /// Grow (or shrink, with negative deltas) around the center.
    pub fn inflate(&self, dw: i32, dh: i32) -> Rect {
        Rect::new(self.x - dw / 2, self.y - dh / 2, self.w + dw, self.h + dh)
    }

    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }
}

// File: crates/pricechart-core/src/geometry.rs
// Summary: Pixel-space primitives: plot rectangle, points, and vector paths.

use std::fmt::Write as _;

use crate::types::Canvas;

/// Plot area inside the canvas paddings, in pixels (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotRect {
    pub const fn from_ltrb(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self { left, top, right, bottom }
    }

    /// Plot area of `canvas`; never narrower or shorter than one pixel.
    pub fn from_canvas(canvas: &Canvas) -> Self {
        let left = canvas.insets.left;
        let top = canvas.insets.top;
        let right = (canvas.width - canvas.insets.right).max(left + 1.0);
        let bottom = (canvas.height - canvas.insets.bottom).max(top + 1.0);
        Self { left, top, right, bottom }
    }

    pub fn width(&self) -> f64 { self.right - self.left }
    pub fn height(&self) -> f64 { self.bottom - self.top }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self { Self { x, y } }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Cubic Bezier: two control points, then the end point.
    CubicTo(Point, Point, Point),
    Close,
}

impl PathCommand {
    /// Pen position after this command (`None` for `Close`).
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            Self::MoveTo(p) | Self::LineTo(p) | Self::CubicTo(_, _, p) => Some(p),
            Self::Close => None,
        }
    }
}

/// Backend-neutral vector path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    pub commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self { Self::default() }

    pub fn is_empty(&self) -> bool { self.commands.is_empty() }

    pub fn move_to(&mut self, p: Point) { self.commands.push(PathCommand::MoveTo(p)); }
    pub fn line_to(&mut self, p: Point) { self.commands.push(PathCommand::LineTo(p)); }
    pub fn cubic_to(&mut self, c1: Point, c2: Point, p: Point) {
        self.commands.push(PathCommand::CubicTo(c1, c2, p));
    }
    pub fn close(&mut self) { self.commands.push(PathCommand::Close); }

    pub fn first_point(&self) -> Option<Point> {
        self.commands.iter().find_map(PathCommand::end_point)
    }

    /// Last drawn point, ignoring a trailing `Close`.
    pub fn last_point(&self) -> Option<Point> {
        self.commands.iter().rev().find_map(PathCommand::end_point)
    }

    /// SVG path data (`d` attribute).
    pub fn to_svg(&self) -> String {
        let mut d = String::new();
        for cmd in &self.commands {
            if !d.is_empty() {
                d.push(' ');
            }
            // Writing to a String cannot fail.
            let _ = match *cmd {
                PathCommand::MoveTo(p) => write!(d, "M{},{}", p.x, p.y),
                PathCommand::LineTo(p) => write!(d, "L{},{}", p.x, p.y),
                PathCommand::CubicTo(a, b, p) => write!(d, "C{},{},{},{},{},{}", a.x, a.y, b.x, b.y, p.x, p.y),
                PathCommand::Close => write!(d, "Z"),
            };
        }
        d
    }
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}

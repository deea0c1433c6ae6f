// File: crates/pricechart-core/src/curve.rs
// Summary: Candle geometry and smoothed line/area paths in pixel space.

use crate::geometry::{Path, Point};
use crate::sample::Sample;
use crate::scale::{ScaleTransform, Scaler};
use crate::types::Rgba;

/// Candle sizing heuristics.
///
/// The fill ratio grows with density so that tightly packed candles stay
/// visible: spacing >= `sparse_spacing` uses `sparse_fill`, spacing >=
/// `medium_spacing` uses `medium_fill`, anything tighter uses `dense_fill`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CandleStyle {
    pub sparse_spacing: f64,
    pub medium_spacing: f64,
    pub sparse_fill: f64,
    pub medium_fill: f64,
    pub dense_fill: f64,
    /// Minimum body width, px.
    pub min_width: f64,
    /// Minimum body height, px (keeps doji candles visible).
    pub min_body_height: f64,
}

impl Default for CandleStyle {
    fn default() -> Self {
        Self {
            sparse_spacing: 24.0,
            medium_spacing: 8.0,
            sparse_fill: 0.60,
            medium_fill: 0.85,
            dense_fill: 0.95,
            min_width: 2.0,
            min_body_height: 2.0,
        }
    }
}

impl CandleStyle {
    pub fn fill_ratio(&self, spacing: f64) -> f64 {
        if spacing >= self.sparse_spacing {
            self.sparse_fill
        } else if spacing >= self.medium_spacing {
            self.medium_fill
        } else {
            self.dense_fill
        }
    }

    /// Body width for `count` candles across `plot_width` pixels.
    pub fn body_width(&self, plot_width: f64, count: usize) -> f64 {
        let spacing = plot_width / count.max(1) as f64;
        (spacing * self.fill_ratio(spacing)).max(self.min_width)
    }
}

/// One candle in pixel space. `top <= bottom` (y grows downward).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CandleGeometry {
    /// Column center.
    pub x: f64,
    pub left: f64,
    pub width: f64,
    /// Body top / bottom.
    pub top: f64,
    pub bottom: f64,
    /// Wick ends (high / low).
    pub wick_top: f64,
    pub wick_bottom: f64,
    pub color: Rgba,
    pub bullish: bool,
}

pub fn build_candles(samples: &[Sample], scaler: &Scaler, style: &CandleStyle, up: Rgba, down: Rgba) -> Vec<CandleGeometry> {
    if samples.is_empty() {
        return Vec::new();
    }
    let width = style.body_width(scaler.plot.width(), samples.len());
    let half = width * 0.5;

    samples
        .iter()
        .map(|s| {
            let x = scaler.x_to_pixel(s.t);
            let y_o = scaler.y_to_pixel(s.open);
            let y_c = scaler.y_to_pixel(s.close);
            let y_h = scaler.y_to_pixel(s.high);
            let y_l = scaler.y_to_pixel(s.low);

            let mut top = y_o.min(y_c);
            let mut bottom = y_o.max(y_c);
            if bottom - top < style.min_body_height {
                let mid = (top + bottom) * 0.5;
                top = mid - style.min_body_height * 0.5;
                bottom = mid + style.min_body_height * 0.5;
            }

            let bullish = s.is_bullish();
            CandleGeometry {
                x,
                left: x - half,
                width,
                top,
                bottom,
                wick_top: y_h.min(y_l),
                wick_bottom: y_h.max(y_l),
                color: if bullish { up } else { down },
                bullish,
            }
        })
        .collect()
}

/// Projected close of every sample.
pub fn close_points(samples: &[Sample], scaler: &Scaler) -> Vec<Point> {
    samples.iter().map(|s| scaler.project(s.t, s.close)).collect()
}

/// Catmull-Rom spline through `pts`, emitted as cubic Beziers.
///
/// The end points are duplicated so the curve starts and ends exactly on the
/// first and last point. One point gives a lone `MoveTo`.
pub fn smooth_path(pts: &[Point]) -> Path {
    let mut path = Path::new();
    let (first, last) = match (pts.first(), pts.last()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return path,
    };
    path.move_to(first);
    if pts.len() == 1 {
        return path;
    }

    let mut p = Vec::with_capacity(pts.len() + 2);
    p.push(first);
    p.extend_from_slice(pts);
    p.push(last);

    for w in p.windows(4) {
        let (p0, p1, p2, p3) = (w[0], w[1], w[2], w[3]);
        let c1 = Point::new(p1.x + (p2.x - p0.x) / 6.0, p1.y + (p2.y - p0.y) / 6.0);
        let c2 = Point::new(p2.x - (p3.x - p1.x) / 6.0, p2.y - (p3.y - p1.y) / 6.0);
        path.cubic_to(c1, c2, p2);
    }
    path
}

/// Closed fill region: the smoothed curve, then down to `baseline_y` under the
/// last point and back under the first.
pub fn area_path(pts: &[Point], baseline_y: f64) -> Path {
    let mut path = smooth_path(pts);
    let (first, last) = match (pts.first(), pts.last()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return path,
    };
    path.line_to(Point::new(last.x, baseline_y));
    path.line_to(Point::new(first.x, baseline_y));
    path.close();
    path
}

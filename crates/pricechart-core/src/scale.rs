// File: crates/pricechart-core/src/scale.rs
// Summary: Affine time (X) and value (Y) transforms from a Domain onto a PlotRect.

use crate::domain::Domain;
use crate::geometry::{PlotRect, Point};

/// Epoch-ms time coordinate.
pub type Logical = i64;
/// Price coordinate.
pub type Value = f64;

/// General scale transform operations for X/Y axes.
pub trait ScaleTransform {
    fn x_to_pixel(&self, t: Logical) -> f64;
    fn y_to_pixel(&self, v: Value) -> f64;
    fn x_from_pixel(&self, px: f64) -> f64;
    fn y_from_pixel(&self, py: f64) -> Value;
}

/// Linear domain -> pixel mapping. Values outside the domain extrapolate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scaler {
    pub domain: Domain,
    pub plot: PlotRect,
}

impl Scaler {
    pub fn new(domain: Domain, plot: PlotRect) -> Self {
        Self { domain, plot }
    }

    /// Project a `(t, value)` pair.
    #[inline]
    pub fn project(&self, t: Logical, v: Value) -> Point {
        Point::new(self.x_to_pixel(t), self.y_to_pixel(v))
    }

    /// Pixel row of the domain floor (the area-fill baseline).
    pub fn baseline_y(&self) -> f64 {
        self.y_to_pixel(self.domain.y_min)
    }

    /// Half the value span; finite for any finite bounds.
    fn half_y_span(&self) -> f64 {
        let half = self.domain.y_max * 0.5 - self.domain.y_min * 0.5;
        if half > 0.0 { half } else { 0.5 }
    }
}

impl ScaleTransform for Scaler {
    #[inline]
    fn x_to_pixel(&self, t: Logical) -> f64 {
        self.plot.left + (t as f64 - self.domain.x_min as f64) * self.plot.width() / self.domain.x_span()
    }

    #[inline]
    fn y_to_pixel(&self, v: Value) -> f64 {
        let frac = (v * 0.5 - self.domain.y_min * 0.5) / self.half_y_span();
        self.plot.bottom - frac * self.plot.height()
    }

    #[inline]
    fn x_from_pixel(&self, px: f64) -> f64 {
        self.domain.x_min as f64 + (px - self.plot.left) * self.domain.x_span() / self.plot.width()
    }

    #[inline]
    fn y_from_pixel(&self, py: f64) -> Value {
        let frac = (self.plot.bottom - py) / self.plot.height();
        self.domain.y_min + 2.0 * (frac * self.half_y_span())
    }
}

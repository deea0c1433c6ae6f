// File: crates/pricechart-core/src/domain.rs
// Summary: Time/value domain extents of a sample window, with value padding.

use crate::sample::Sample;

/// Which prices bound the value axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueExtent {
    /// Lows and highs (candles).
    HighLow,
    /// Closes only (line).
    Close,
}

/// Value-axis padding fractions, as a share of the raw value span.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleOptions {
    pub candle_padding: f64,
    pub line_padding: f64,
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self { candle_padding: 0.02, line_padding: 0.07 }
    }
}

/// Data extents of the active window.
/// Contract: `y_max > y_min` and `x_max >= x_min`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Domain {
    pub x_min: i64,
    pub x_max: i64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Domain {
    /// Extents of `samples` (sorted by `t`); `None` when empty.
    ///
    /// The value range is widened by `padding_fraction` of its span on both
    /// sides; a zero span counts as 1.
    pub fn from_samples(samples: &[Sample], extent: ValueExtent, padding_fraction: f64) -> Option<Self> {
        let first = samples.first()?;
        let last = samples.last()?;

        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for s in samples {
            let (l, h) = match extent {
                ValueExtent::HighLow => (s.low.min(s.high), s.high.max(s.low)),
                ValueExtent::Close => (s.close, s.close),
            };
            lo = lo.min(l);
            hi = hi.max(h);
        }

        // Finite prices near +-f64::MAX can still overflow the span.
        let span = (hi - lo).min(f64::MAX);
        let span = if span > 0.0 { span } else { 1.0 };
        let pad = span * padding_fraction.max(0.0);
        let (y_min, y_max) = if pad > 0.0 { (lo - pad, hi + pad) } else { (lo, lo + span) };
        let (y_min, y_max) = (y_min.max(-f64::MAX), y_max.min(f64::MAX));

        Some(Self { x_min: first.t, x_max: last.t.max(first.t), y_min, y_max })
    }

    /// Time span in ms, never below 1.
    pub fn x_span(&self) -> f64 {
        (self.x_max as f64 - self.x_min as f64).max(1.0)
    }

    /// Value span; saturates at `f64::MAX`.
    pub fn y_span(&self) -> f64 {
        (self.y_max - self.y_min).min(f64::MAX)
    }
}

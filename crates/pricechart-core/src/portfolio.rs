// File: crates/pricechart-core/src/portfolio.rs
// Summary: Merges per-ticker price series into one portfolio-level series.

use std::collections::BTreeSet;

use tracing::debug;

use crate::sample::Sample;

/// A position: share count and that ticker's normalized price series.
#[derive(Clone, Debug, PartialEq)]
pub struct Holding {
    pub ticker: String,
    pub shares: f64,
    pub samples: Vec<Sample>,
}

impl Holding {
    pub fn new(ticker: impl Into<String>, shares: f64, samples: Vec<Sample>) -> Self {
        Self { ticker: ticker.into(), shares, samples }
    }
}

/// Sum `shares * price` across holdings at every timestamp any holding reports.
///
/// A holding without a sample at a timestamp contributes its last known
/// sample (forward fill). Timestamps earlier than some holding's first sample
/// are skipped, so every output point covers the whole portfolio.
pub fn merge_holdings(holdings: &[Holding]) -> Vec<Sample> {
    if holdings.is_empty() || holdings.iter().any(|h| h.samples.is_empty()) {
        return Vec::new();
    }

    let stamps: BTreeSet<i64> = holdings.iter().flat_map(|h| h.samples.iter().map(|s| s.t)).collect();
    // Per-holding cursor into its (sorted) samples.
    let mut cursors = vec![0usize; holdings.len()];
    let mut out = Vec::with_capacity(stamps.len());

    'stamps: for t in stamps {
        let mut merged = Sample::new(t, 0.0, 0.0, 0.0, 0.0);
        for (h, cursor) in holdings.iter().zip(cursors.iter_mut()) {
            while *cursor + 1 < h.samples.len() && h.samples[*cursor + 1].t <= t {
                *cursor += 1;
            }
            let s = h.samples[*cursor];
            if s.t > t {
                continue 'stamps;
            }
            merged.open += h.shares * s.open;
            merged.high += h.shares * s.high;
            merged.low += h.shares * s.low;
            merged.close += h.shares * s.close;
        }
        out.push(merged);
    }

    debug!("merge_holdings: {} holdings -> {} points", holdings.len(), out.len());
    out
}

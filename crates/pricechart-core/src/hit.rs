// File: crates/pricechart-core/src/hit.rs
// Summary: Pointer hit-testing: nearest sample by projected x.

use crate::geometry::clamp;
use crate::sample::Sample;
use crate::scale::{ScaleTransform, Scaler};

/// Lookup strategy. Both return the same index for monotonically
/// increasing x; `Binary` relies on that ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HitStrategy {
    #[default]
    Linear,
    Binary,
}

impl HitStrategy {
    pub fn nearest(&self, xs: &[f64], pointer_x: f64) -> Option<usize> {
        match self {
            Self::Linear => nearest_index(xs, pointer_x),
            Self::Binary => nearest_index_sorted(xs, pointer_x),
        }
    }
}

/// Index of the x closest to `pointer_x`; ties go to the earlier index.
/// `None` only when `xs` is empty.
pub fn nearest_index(xs: &[f64], pointer_x: f64) -> Option<usize> {
    if xs.is_empty() {
        return None;
    }
    let lo = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let pointer_x = if lo <= hi { clamp(pointer_x, lo, hi) } else { pointer_x };

    let mut best = 0usize;
    let mut best_dist = f64::INFINITY;
    for (i, &x) in xs.iter().enumerate() {
        let dist = (x - pointer_x).abs();
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    Some(best)
}

/// Same contract as [`nearest_index`] for ascending `xs`, in O(log n).
pub fn nearest_index_sorted(xs: &[f64], pointer_x: f64) -> Option<usize> {
    if xs.is_empty() {
        return None;
    }
    if pointer_x.is_nan() {
        return Some(0);
    }
    let pointer_x = clamp(pointer_x, xs[0], xs[xs.len() - 1]);
    // First index whose x is at or right of the pointer.
    let i = xs.partition_point(|&x| x < pointer_x);
    if i == 0 {
        return Some(0);
    }
    if i == xs.len() {
        return Some(xs.len() - 1);
    }
    // Among equal xs the earliest wins, so walk back over a run on the left.
    let mut left = i - 1;
    while left > 0 && xs[left - 1] == xs[left] {
        left -= 1;
    }
    let dl = pointer_x - xs[left];
    let dr = xs[i] - pointer_x;
    Some(if dl <= dr { left } else { i })
}

/// Nearest sample to `pointer_x` under `scaler`.
pub fn nearest_sample(samples: &[Sample], scaler: &Scaler, pointer_x: f64) -> Option<usize> {
    let xs: Vec<f64> = samples.iter().map(|s| scaler.x_to_pixel(s.t)).collect();
    nearest_index(&xs, pointer_x)
}

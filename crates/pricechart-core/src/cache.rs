// File: crates/pricechart-core/src/cache.rs
// Summary: Caller-side helpers: render memoization keyed by input hash, and fetch request tokens.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use tracing::trace;

use crate::chart::{ChartController, RenderModel};
use crate::config::ChartConfig;
use crate::sample::{RawSample, RawTimestamp};

/// 64-bit fingerprint of a render's full input tuple.
pub fn render_key(raw: &[RawSample], config: &ChartConfig, now: i64) -> u64 {
    let mut h = DefaultHasher::new();
    raw.len().hash(&mut h);
    for r in raw {
        match &r.timestamp {
            RawTimestamp::Millis(ms) => (0u8, ms.to_bits()).hash(&mut h),
            RawTimestamp::Text(s) => (1u8, s).hash(&mut h),
            RawTimestamp::Missing => 2u8.hash(&mut h),
        }
        hash_f64s(&mut h, &[r.open, r.high, r.low, r.close]);
    }
    hash_config(&mut h, config);
    now.hash(&mut h);
    h.finish()
}

fn hash_f64s<H: Hasher>(h: &mut H, values: &[f64]) {
    for v in values {
        v.to_bits().hash(h);
    }
}

fn hash_config<H: Hasher>(h: &mut H, c: &ChartConfig) {
    c.mode.hash(h);
    c.timeframe.hash(h);
    let i = &c.canvas.insets;
    hash_f64s(h, &[c.canvas.width, c.canvas.height, i.left, i.right, i.top, i.bottom]);
    c.theme.hash(h);
    (c.up_color, c.down_color, c.line_color).hash(h);
    c.filter.hash(h);
    hash_f64s(h, &[c.scale.candle_padding, c.scale.line_padding]);
    let s = &c.candles;
    hash_f64s(
        h,
        &[s.sparse_spacing, s.medium_spacing, s.sparse_fill, s.medium_fill, s.dense_fill, s.min_width, s.min_body_height],
    );
    c.ticks.hash(h);
    c.hit.hash(h);
}

/// Single-entry memo of the last render.
#[derive(Debug, Default)]
pub struct RenderCache {
    entry: Option<(u64, RenderModel)>,
    hits: u64,
    misses: u64,
}

impl RenderCache {
    pub fn new() -> Self { Self::default() }

    /// Cached model when the inputs hash the same as last time, else a fresh render.
    pub fn render(&mut self, raw: &[RawSample], config: &ChartConfig, now: i64) -> &RenderModel {
        let key = render_key(raw, config, now);
        let entry = match self.entry.take() {
            Some((k, model)) if k == key => {
                self.hits += 1;
                trace!("render cache hit {:016x}", key);
                (k, model)
            }
            _ => {
                self.misses += 1;
                (key, ChartController::render(raw, config, now))
            }
        };
        &self.entry.insert(entry).1
    }

    pub fn hits(&self) -> u64 { self.hits }
    pub fn misses(&self) -> u64 { self.misses }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}

/// Tag attached to a sample fetch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 { self.0 }
}

/// Issues monotonically increasing request tokens; only the latest is current.
///
/// Fetch results carrying a superseded token should be discarded instead of
/// rendered.
#[derive(Debug, Default)]
pub struct RequestTokens {
    latest: u64,
}

impl RequestTokens {
    pub fn new() -> Self { Self::default() }

    pub fn issue(&mut self) -> RequestToken {
        self.latest += 1;
        RequestToken(self.latest)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest
    }
}

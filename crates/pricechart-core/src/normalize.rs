// File: crates/pricechart-core/src/normalize.rs
// Summary: Validates raw samples into a sorted, de-duplicated Sample sequence.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::Value;
use tracing::debug;

use crate::error::{ChartError, Result};
use crate::sample::{RawSample, RawTimestamp, Sample};

/// Largest representable instant magnitude, in ms (+-100,000,000 days).
const MAX_EPOCH_MS: f64 = 8.64e15;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
];

/// Normalize raw samples: drop malformed records, coerce timestamps to epoch
/// ms, sort ascending and collapse duplicate timestamps to the record that
/// appeared last in `raw`.
///
/// Naive date/time strings are read as wall-clock time in `tz`.
pub fn normalize(raw: &[RawSample], tz: FixedOffset) -> Vec<Sample> {
    let mut out: Vec<Sample> = raw
        .iter()
        .filter_map(|r| {
            let t = parse_timestamp(&r.timestamp, tz)?;
            let prices = [r.open, r.high, r.low, r.close];
            if !prices.iter().all(|p| p.is_finite()) {
                return None;
            }
            Some(Sample::new(t, r.open, r.high, r.low, r.close))
        })
        .collect();

    let dropped = raw.len() - out.len();
    if dropped > 0 {
        debug!("normalize: dropped {} of {} malformed samples", dropped, raw.len());
    }

    // Stable sort keeps input order among equal timestamps, so the last of
    // each run is the latest write.
    out.sort_by_key(|s| s.t);
    let mut deduped: Vec<Sample> = Vec::with_capacity(out.len());
    for s in out {
        match deduped.last_mut() {
            Some(prev) if prev.t == s.t => *prev = s,
            _ => deduped.push(s),
        }
    }
    deduped
}

/// Parse a JSON array of input-contract objects and normalize it.
///
/// Fails only when `text` is not valid JSON or not an array; bad elements are
/// dropped like any other malformed sample.
pub fn normalize_json(text: &str, tz: FixedOffset) -> Result<Vec<Sample>> {
    let doc: Value = serde_json::from_str(text)?;
    let items = doc
        .as_array()
        .ok_or_else(|| ChartError::InvalidInput("expected a JSON array of samples".into()))?;
    let raw: Vec<RawSample> = items.iter().map(RawSample::from_json).collect();
    Ok(normalize(&raw, tz))
}

/// Coerce a raw timestamp to epoch milliseconds; `None` when it cannot be read.
pub fn parse_timestamp(ts: &RawTimestamp, tz: FixedOffset) -> Option<i64> {
    match ts {
        RawTimestamp::Millis(ms) => millis_from_f64(*ms),
        RawTimestamp::Text(s) => parse_text(s, tz),
        RawTimestamp::Missing => None,
    }
}

fn millis_from_f64(ms: f64) -> Option<i64> {
    if !ms.is_finite() || ms.abs() > MAX_EPOCH_MS {
        return None;
    }
    let t = ms.trunc() as i64;
    // Reject instants chrono cannot represent so later calendar math is total.
    DateTime::from_timestamp_millis(t).map(|_| t)
}

fn parse_text(s: &str, tz: FixedOffset) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let digits = s.strip_prefix(['-', '+']).unwrap_or(s);
    if !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
        return s.parse::<i64>().ok().and_then(|ms| millis_from_f64(ms as f64));
    }

    // "2024-01-02 10:00:00" is accepted as "2024-01-02T10:00:00".
    let iso = match s.find(' ') {
        Some(10) => s.replacen(' ', "T", 1),
        _ => s.to_string(),
    };

    if let Ok(dt) = DateTime::parse_from_rfc3339(&iso) {
        return Some(dt.timestamp_millis());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(&iso, fmt) {
            return Some(local_millis(naive, tz));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(&iso, "%Y-%m-%d") {
        return Some(local_millis(date.and_time(NaiveTime::MIN), tz));
    }
    None
}

/// Epoch ms of a wall-clock time in `tz`.
pub(crate) fn local_millis(naive: NaiveDateTime, tz: FixedOffset) -> i64 {
    naive.and_utc().timestamp_millis() - i64::from(tz.local_minus_utc()) * 1000
}

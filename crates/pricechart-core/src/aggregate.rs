// File: crates/pricechart-core/src/aggregate.rs
// Summary: OHLC bucket aggregation into calendar weeks or months.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveTime};
use tracing::{debug, warn};

use crate::normalize::local_millis;
use crate::sample::Sample;

/// Calendar granularity of an aggregated candle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Period {
    /// Sunday-to-Saturday weeks.
    Weekly,
    /// Calendar months.
    Monthly,
}

/// Aggregate samples into one candle per calendar bucket.
///
/// For each bucket: open = first open, close = last close (arrival order),
/// high = max high, low = min low, t = bucket start (local midnight in `tz`).
/// A bucket holding a single sample keeps that sample as-is. Output is sorted
/// by bucket start.
pub fn aggregate(samples: &[Sample], period: Period, tz: FixedOffset) -> Vec<Sample> {
    if samples.is_empty() {
        return Vec::new();
    }

    let mut buckets: BTreeMap<i64, Vec<Sample>> = BTreeMap::new();
    for s in samples {
        match bucket_start(s.t, period, tz) {
            Some(key) => buckets.entry(key).or_default().push(*s),
            None => warn!("aggregate: timestamp {} out of calendar range, skipped", s.t),
        }
    }

    let out: Vec<Sample> = buckets
        .into_iter()
        .map(|(start, members)| reduce_bucket(start, &members))
        .collect();
    debug!("aggregate: {} samples -> {} {:?} buckets", samples.len(), out.len(), period);
    out
}

fn reduce_bucket(start: i64, members: &[Sample]) -> Sample {
    let first = members[0];
    if members.len() == 1 {
        return first;
    }
    let last = members[members.len() - 1];
    let mut high = first.high;
    let mut low = first.low;
    for s in &members[1..] {
        high = high.max(s.high);
        low = low.min(s.low);
    }
    Sample { t: start, open: first.open, high, low, close: last.close }
}

/// Start of the bucket containing `t`, as epoch ms.
pub fn bucket_start(t: i64, period: Period, tz: FixedOffset) -> Option<i64> {
    let local = DateTime::from_timestamp_millis(t)?.with_timezone(&tz);
    let date = local.date_naive();
    let start: NaiveDate = match period {
        Period::Weekly => date - Duration::days(i64::from(date.weekday().num_days_from_sunday())),
        Period::Monthly => date - Duration::days(i64::from(date.day0())),
    };
    Some(local_millis(start.and_time(NaiveTime::MIN), tz))
}

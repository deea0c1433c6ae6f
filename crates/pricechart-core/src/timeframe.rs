// File: crates/pricechart-core/src/timeframe.rs
// Summary: Timeframe policies (window, session clip, aggregation) and the filter stage.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Offset, Timelike, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::aggregate::{aggregate, Period};
use crate::error::ChartError;
use crate::sample::Sample;

pub const MINUTE_MS: i64 = 60_000;
pub const HOUR_MS: i64 = 60 * MINUTE_MS;
pub const DAY_MS: i64 = 24 * HOUR_MS;

/// Named window-and-granularity policy applied before rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Timeframe {
    Day1,
    Week1,
    Month1,
    Year1,
    All,
}

impl Timeframe {
    pub const ALL: [Timeframe; 5] = [Self::Day1, Self::Week1, Self::Month1, Self::Year1, Self::All];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day1 => "1D",
            Self::Week1 => "1W",
            Self::Month1 => "1M",
            Self::Year1 => "1Y",
            Self::All => "ALL",
        }
    }

    /// Look-back window in ms; `None` keeps the whole series.
    pub fn window_ms(&self) -> Option<i64> {
        match self {
            Self::Day1 => Some(DAY_MS),
            Self::Week1 => Some(7 * DAY_MS),
            Self::Month1 => Some(28 * DAY_MS),
            Self::Year1 => Some(365 * DAY_MS),
            Self::All => None,
        }
    }

    /// Nominal candle size in calendar days.
    pub fn bucket_days(&self) -> u32 {
        match self {
            Self::Day1 | Self::Week1 | Self::Month1 => 1,
            Self::Year1 => 7,
            Self::All => 30,
        }
    }

    /// Aggregation applied after windowing, if any.
    pub fn period(&self) -> Option<Period> {
        match self {
            Self::Year1 => Some(Period::Weekly),
            Self::All => Some(Period::Monthly),
            _ => None,
        }
    }
}

impl Default for Timeframe {
    fn default() -> Self { Self::Day1 }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::ALL
            .into_iter()
            .find(|tf| tf.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| ChartError::UnknownTimeframe(s.to_string()))
    }
}

impl TryFrom<String> for Timeframe {
    type Error = ChartError;
    fn try_from(s: String) -> Result<Self, Self::Error> { s.parse() }
}

/// Trading-session window in local minutes after midnight (inclusive bounds).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TradingSession {
    pub open_minute: u32,
    pub close_minute: u32,
}

impl TradingSession {
    /// `ms_of_day` is local milliseconds after midnight; the close is the
    /// exact instant `close_minute:00.000`.
    pub fn contains_ms(&self, ms_of_day: i64) -> bool {
        let open = i64::from(self.open_minute) * MINUTE_MS;
        let close = i64::from(self.close_minute) * MINUTE_MS;
        ms_of_day >= open && ms_of_day <= close
    }
}

impl Default for TradingSession {
    /// 09:30-16:00.
    fn default() -> Self {
        Self { open_minute: 9 * 60 + 30, close_minute: 16 * 60 }
    }
}

/// Caller-supplied knobs for the filter stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FilterOptions {
    /// The series is intraday-granular; clip `1D` to the trading session.
    pub intraday: bool,
    pub session: TradingSession,
    /// Cap on points kept for `1D`.
    pub max_intraday_points: usize,
    /// Offset used for "local" time of day and calendar buckets.
    pub tz: FixedOffset,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            intraday: false,
            session: TradingSession::default(),
            max_intraday_points: 300,
            tz: utc(),
        }
    }
}

pub(crate) fn utc() -> FixedOffset {
    Utc.fix()
}

/// Select (and for `1Y`/`ALL`, aggregate) the samples relevant to `timeframe`.
///
/// `samples` must be sorted ascending by `t`; the output preserves that order.
pub fn filter(samples: &[Sample], timeframe: Timeframe, now: i64, opts: &FilterOptions) -> Vec<Sample> {
    let out = match timeframe {
        Timeframe::Day1 => {
            let from = now.saturating_sub(DAY_MS);
            let mut kept: Vec<Sample> = samples
                .iter()
                .filter(|s| s.t >= from && s.t <= now)
                .filter(|s| !opts.intraday || in_session(s.t, opts))
                .copied()
                .collect();
            if kept.len() > opts.max_intraday_points {
                kept.drain(..kept.len() - opts.max_intraday_points);
            }
            kept
        }
        tf => {
            let windowed: Vec<Sample> = match tf.window_ms() {
                Some(w) => {
                    let from = now.saturating_sub(w);
                    samples.iter().filter(|s| s.t >= from).copied().collect()
                }
                None => samples.to_vec(),
            };
            match tf.period() {
                Some(period) => aggregate(&windowed, period, opts.tz),
                None => windowed,
            }
        }
    };
    debug!("filter {}: {} -> {} samples", timeframe, samples.len(), out.len());
    out
}

fn in_session(t: i64, opts: &FilterOptions) -> bool {
    match DateTime::from_timestamp_millis(t) {
        Some(dt) => {
            let local = dt.with_timezone(&opts.tz);
            let ms_of_day = i64::from(local.num_seconds_from_midnight()) * 1000
                + i64::from(local.timestamp_subsec_millis());
            opts.session.contains_ms(ms_of_day)
        }
        None => false,
    }
}

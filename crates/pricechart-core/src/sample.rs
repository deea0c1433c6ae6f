// File: crates/pricechart-core/src/sample.rs
// Summary: Price sample model: raw (untrusted) records and normalized OHLC samples.

use serde_json::Value;

/// Timestamp as delivered by the data collaborator.
#[derive(Clone, Debug, PartialEq)]
pub enum RawTimestamp {
    /// Epoch milliseconds (may be fractional or non-finite).
    Millis(f64),
    /// ISO-8601 / RFC 3339 date string, or a decimal epoch-ms string.
    Text(String),
    Missing,
}

impl From<i64> for RawTimestamp {
    fn from(ms: i64) -> Self { Self::Millis(ms as f64) }
}

impl From<f64> for RawTimestamp {
    fn from(ms: f64) -> Self { Self::Millis(ms) }
}

impl From<&str> for RawTimestamp {
    fn from(s: &str) -> Self { Self::Text(s.to_string()) }
}

impl From<String> for RawTimestamp {
    fn from(s: String) -> Self { Self::Text(s) }
}

/// Untrusted OHLC record. Missing or non-numeric prices are NaN.
#[derive(Clone, Debug, PartialEq)]
pub struct RawSample {
    pub timestamp: RawTimestamp,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl RawSample {
    pub fn new(timestamp: impl Into<RawTimestamp>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self { timestamp: timestamp.into(), open, high, low, close }
    }

    /// Line-only record (`{x, y}`): all four prices equal `y`.
    pub fn close_only(timestamp: impl Into<RawTimestamp>, y: f64) -> Self {
        Self::new(timestamp, y, y, y, y)
    }

    /// Lenient conversion from one element of the input array.
    ///
    /// Accepts `{x|timestamp, open, high, low, close}` or `{x, y}`. Prices may be
    /// numbers or numeric strings; anything else becomes NaN and the record is
    /// later dropped by the normalizer.
    pub fn from_json(value: &Value) -> Self {
        let ts = value
            .get("x")
            .or_else(|| value.get("timestamp"))
            .map(json_timestamp)
            .unwrap_or(RawTimestamp::Missing);

        let has_ohlc = ["open", "high", "low", "close"].iter().any(|k| value.get(k).is_some());
        if !has_ohlc {
            if let Some(y) = value.get("y") {
                return Self::close_only(ts, json_number(y));
            }
        }

        let field = |k: &str| value.get(k).map(json_number).unwrap_or(f64::NAN);
        Self {
            timestamp: ts,
            open: field("open"),
            high: field("high"),
            low: field("low"),
            close: field("close"),
        }
    }
}

fn json_timestamp(v: &Value) -> RawTimestamp {
    match v {
        Value::Number(n) => n.as_f64().map(RawTimestamp::Millis).unwrap_or(RawTimestamp::Missing),
        Value::String(s) => RawTimestamp::Text(s.clone()),
        _ => RawTimestamp::Missing,
    }
}

fn json_number(v: &Value) -> f64 {
    match v {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// Normalized OHLC sample. `t` is epoch milliseconds; prices are finite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub t: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Sample {
    pub const fn new(t: i64, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self { t, open, high, low, close }
    }

    /// Flat sample carrying a single price.
    pub const fn flat(t: i64, price: f64) -> Self {
        Self::new(t, price, price, price, price)
    }

    /// `close >= open`.
    pub fn is_bullish(&self) -> bool { self.close >= self.open }
}

impl From<Sample> for RawSample {
    fn from(s: Sample) -> Self {
        RawSample::new(s.t, s.open, s.high, s.low, s.close)
    }
}

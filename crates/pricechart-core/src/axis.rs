// File: crates/pricechart-core/src/axis.rs
// Summary: Axis tick layout and labels for the time and price axes.

use chrono::{DateTime, FixedOffset};

use crate::geometry::clamp;
use crate::scale::{ScaleTransform, Scaler};
use crate::timeframe::Timeframe;

/// One axis tick: its data value, pixel position along the axis, and label.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub value: f64,
    pub pixel: f64,
    pub label: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TickOptions {
    pub x_count: usize,
    pub y_count: usize,
}

impl Default for TickOptions {
    fn default() -> Self {
        Self { x_count: 6, y_count: 5 }
    }
}

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// Compute a "nice" step close to range/target using 1/2/5*10^k.
pub fn nice_step(range: f64, target: usize) -> f64 {
    let raw = (range / target.max(1) as f64).max(f64::EPSILON);
    let base = 10f64.powf(raw.log10().floor());
    let n = raw / base;
    let nice = if n <= 1.0 {
        1.0
    } else if n <= 2.0 {
        2.0
    } else if n <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * base
}

/// Nice values inside `[min, max]`, plus the step used.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> (Vec<f64>, f64) {
    let step = nice_step((max - min).abs().min(f64::MAX), target);
    let mut v = Vec::new();
    if !(step.is_finite() && min.is_finite() && max.is_finite()) {
        return (v, step);
    }
    let start = (min / step).ceil() * step;
    for i in 0..100 {
        let t = start + step * i as f64;
        if t > max + step * 1e-9 {
            break;
        }
        v.push(t);
    }
    (v, step)
}

/// Decimal places needed to tell ticks `step` apart.
fn price_decimals(step: f64) -> usize {
    if step >= 1.0 {
        0
    } else {
        (-step.log10().floor()).clamp(0.0, 8.0) as usize
    }
}

pub fn price_ticks(scaler: &Scaler, target: usize) -> Vec<Tick> {
    let (values, step) = nice_ticks(scaler.domain.y_min, scaler.domain.y_max, target);
    let decimals = price_decimals(step);
    values
        .into_iter()
        .map(|v| Tick {
            value: v,
            pixel: clamp(scaler.y_to_pixel(v), scaler.plot.top, scaler.plot.bottom),
            label: format!("{:.*}", decimals, v),
        })
        .collect()
}

/// strftime pattern for time labels at `timeframe` granularity.
pub fn time_format(timeframe: Timeframe) -> &'static str {
    match timeframe {
        Timeframe::Day1 => "%H:%M",
        Timeframe::Week1 | Timeframe::Month1 | Timeframe::Year1 => "%b %d",
        Timeframe::All => "%b %Y",
    }
}

pub fn time_label(t: i64, timeframe: Timeframe, tz: FixedOffset) -> String {
    match DateTime::from_timestamp_millis(t) {
        Some(dt) => dt.with_timezone(&tz).format(time_format(timeframe)).to_string(),
        None => String::new(),
    }
}

/// Evenly spaced time ticks across the domain; a single tick when the domain
/// is one instant.
pub fn time_ticks(scaler: &Scaler, timeframe: Timeframe, tz: FixedOffset, count: usize) -> Vec<Tick> {
    let (x_min, x_max) = (scaler.domain.x_min, scaler.domain.x_max);
    let stops = if x_max == x_min {
        vec![x_min as f64]
    } else {
        linspace(x_min as f64, x_max as f64, count.max(2))
    };
    stops
        .into_iter()
        .map(|v| {
            let t = v.round() as i64;
            Tick { value: t as f64, pixel: scaler.x_to_pixel(t), label: time_label(t, timeframe, tz) }
        })
        .collect()
}

// File: crates/pricechart-core/src/config.rs
// Summary: Render configuration: recognized external options and the validated engine config.

use std::fmt;
use std::str::FromStr;

use chrono::FixedOffset;
use serde::Deserialize;

use crate::axis::TickOptions;
use crate::curve::CandleStyle;
use crate::domain::{ScaleOptions, ValueExtent};
use crate::error::{ChartError, Result};
use crate::hit::HitStrategy;
use crate::theme::{self, Theme};
use crate::timeframe::{FilterOptions, Timeframe};
use crate::types::{Canvas, Insets, Rgba, HEIGHT, WIDTH};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum RenderMode {
    Candle,
    #[default]
    Line,
}

impl RenderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Candle => "candle",
            Self::Line => "line",
        }
    }

    /// Prices that bound the value axis in this mode.
    pub fn value_extent(&self) -> ValueExtent {
        match self {
            Self::Candle => ValueExtent::HighLow,
            Self::Line => ValueExtent::Close,
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderMode {
    type Err = ChartError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "candle" => Ok(Self::Candle),
            "line" => Ok(Self::Line),
            _ => Err(ChartError::UnknownMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for RenderMode {
    type Error = ChartError;
    fn try_from(s: String) -> std::result::Result<Self, Self::Error> { s.parse() }
}

/// Everything a render depends on besides the samples and `now`.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
    pub mode: RenderMode,
    pub timeframe: Timeframe,
    pub canvas: Canvas,
    pub theme: Theme,
    /// Overrides for the theme's candle and line colors.
    pub up_color: Option<Rgba>,
    pub down_color: Option<Rgba>,
    pub line_color: Option<Rgba>,
    pub filter: FilterOptions,
    pub scale: ScaleOptions,
    pub candles: CandleStyle,
    pub ticks: TickOptions,
    pub hit: HitStrategy,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::default(),
            timeframe: Timeframe::default(),
            canvas: Canvas::default(),
            theme: Theme::default(),
            up_color: None,
            down_color: None,
            line_color: None,
            filter: FilterOptions::default(),
            scale: ScaleOptions::default(),
            candles: CandleStyle::default(),
            ticks: TickOptions::default(),
            hit: HitStrategy::default(),
        }
    }
}

impl ChartConfig {
    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_timeframe(mut self, timeframe: Timeframe) -> Self {
        self.timeframe = timeframe;
        self
    }

    pub fn with_canvas(mut self, canvas: Canvas) -> Self {
        self.canvas = canvas;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn up(&self) -> Rgba { self.up_color.unwrap_or(self.theme.candle_up) }
    pub fn down(&self) -> Rgba { self.down_color.unwrap_or(self.theme.candle_down) }
    pub fn line(&self) -> Rgba { self.line_color.unwrap_or(self.theme.line_stroke) }

    /// Value-axis padding fraction for the current mode.
    pub fn padding_fraction(&self) -> f64 {
        match self.mode {
            RenderMode::Candle => self.scale.candle_padding,
            RenderMode::Line => self.scale.line_padding,
        }
    }
}

/// Recognized external options (camelCase JSON). Missing keys take defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChartOptions {
    pub mode: RenderMode,
    pub timeframe: Timeframe,
    pub width: f64,
    pub height: f64,
    pub padding_top: f64,
    pub padding_right: f64,
    pub padding_bottom: f64,
    pub padding_left: f64,
    pub up_color: Option<String>,
    pub down_color: Option<String>,
    pub line_color: Option<String>,
    pub theme: String,
    /// Clip `1D` to trading-session minutes.
    pub intraday: bool,
    /// Local time offset from UTC for sessions, buckets and labels.
    pub utc_offset_minutes: i32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        let insets = Insets::default();
        Self {
            mode: RenderMode::default(),
            timeframe: Timeframe::default(),
            width: WIDTH,
            height: HEIGHT,
            padding_top: insets.top,
            padding_right: insets.right,
            padding_bottom: insets.bottom,
            padding_left: insets.left,
            up_color: None,
            down_color: None,
            line_color: None,
            theme: "light".to_string(),
            intraday: false,
            utc_offset_minutes: 0,
        }
    }
}

impl ChartOptions {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validate colors and offset, and resolve the theme preset.
    pub fn into_config(self) -> Result<ChartConfig> {
        let color = |c: Option<String>| -> Result<Option<Rgba>> {
            c.map(|s| s.parse::<Rgba>()).transpose()
        };
        let tz = FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60)).ok_or_else(|| {
            ChartError::InvalidInput(format!("utcOffsetMinutes out of range: {}", self.utc_offset_minutes))
        })?;
        if !(self.width.is_finite() && self.height.is_finite()) {
            return Err(ChartError::InvalidInput("canvas width/height must be finite".into()));
        }

        let defaults = ChartConfig::default();
        Ok(ChartConfig {
            mode: self.mode,
            timeframe: self.timeframe,
            canvas: Canvas::new(
                self.width,
                self.height,
                Insets::new(self.padding_left, self.padding_right, self.padding_top, self.padding_bottom),
            ),
            theme: theme::find(&self.theme),
            up_color: color(self.up_color)?,
            down_color: color(self.down_color)?,
            line_color: color(self.line_color)?,
            filter: FilterOptions { intraday: self.intraday, tz, ..defaults.filter },
            ..defaults
        })
    }
}

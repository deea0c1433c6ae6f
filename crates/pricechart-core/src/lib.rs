// File: crates/pricechart-core/src/lib.rs
// Summary: Core library entry point; price samples in, immutable render model out.

pub mod aggregate;
pub mod axis;
pub mod cache;
pub mod chart;
pub mod config;
pub mod curve;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod normalize;
pub mod portfolio;
pub mod sample;
pub mod scale;
pub mod theme;
pub mod timeframe;
pub mod types;

pub use aggregate::{aggregate, Period};
pub use cache::{RenderCache, RequestToken, RequestTokens};
pub use chart::{ChartController, HoverState, ModelBody, Palette, PriceChange, RenderModel};
pub use config::{ChartConfig, ChartOptions, RenderMode};
pub use curve::{CandleGeometry, CandleStyle};
pub use domain::{Domain, ScaleOptions, ValueExtent};
pub use error::{ChartError, Result};
pub use geometry::{Path, PathCommand, PlotRect, Point};
pub use hit::HitStrategy;
pub use normalize::{normalize, normalize_json};
pub use portfolio::{merge_holdings, Holding};
pub use sample::{RawSample, RawTimestamp, Sample};
pub use scale::{ScaleTransform, Scaler};
pub use theme::Theme;
pub use timeframe::{filter, FilterOptions, Timeframe, TradingSession};
pub use types::{Canvas, Insets, Rgba};

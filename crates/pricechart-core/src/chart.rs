// File: crates/pricechart-core/src/chart.rs
// Summary: Render pipeline (samples -> RenderModel) and pointer hover lookup.

use tracing::{debug, trace};

use crate::axis::{price_ticks, time_ticks, Tick};
use crate::config::{ChartConfig, RenderMode};
use crate::curve::{area_path, build_candles, close_points, smooth_path, CandleGeometry};
use crate::domain::Domain;
use crate::geometry::{Path, PlotRect, Point};
use crate::hit::HitStrategy;
use crate::normalize::normalize;
use crate::sample::{RawSample, Sample};
use crate::scale::Scaler;
use crate::timeframe::{filter, Timeframe};
use crate::types::Rgba;

/// Colors resolved for one render (theme plus caller overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Palette {
    pub background: Rgba,
    pub grid: Rgba,
    pub axis_label: Rgba,
    pub baseline: Rgba,
    pub crosshair: Rgba,
    pub line: Rgba,
    pub area_fill: Rgba,
    pub up: Rgba,
    pub down: Rgba,
}

impl Palette {
    pub fn from_config(config: &ChartConfig) -> Self {
        let t = &config.theme;
        let line = config.line();
        Self {
            background: t.background,
            grid: t.grid,
            axis_label: t.axis_label,
            baseline: t.baseline,
            crosshair: t.crosshair,
            line,
            // An overridden line color carries the theme's fill opacity.
            area_fill: match config.line_color {
                Some(c) => c.with_alpha(t.area_fill.a),
                None => t.area_fill,
            },
            up: config.up(),
            down: config.down(),
        }
    }
}

/// Geometry to draw.
#[derive(Clone, Debug, PartialEq)]
pub enum ModelBody {
    /// No samples in the active window; draw a "no data for this range" state.
    Empty,
    Candles(Vec<CandleGeometry>),
    Line { path: Path, area: Path },
}

/// Immutable description of one chart frame, in pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderModel {
    pub mode: RenderMode,
    pub timeframe: Timeframe,
    pub width: f64,
    pub height: f64,
    pub plot: PlotRect,
    pub domain: Option<Domain>,
    pub body: ModelBody,
    pub x_ticks: Vec<Tick>,
    pub y_ticks: Vec<Tick>,
    /// Pixel row of the value-domain floor.
    pub baseline_y: f64,
    pub palette: Palette,
    /// Samples of the active window (after filtering and aggregation).
    pub samples: Vec<Sample>,
    /// Projected `(t, close)` of each sample, for hover.
    pub anchors: Vec<Point>,
    pub hit: HitStrategy,
}

impl RenderModel {
    pub fn is_empty(&self) -> bool {
        matches!(self.body, ModelBody::Empty)
    }

    pub fn hover(&self, pointer_x: f64) -> Option<HoverState> {
        ChartController::hover(self, pointer_x)
    }

    /// Price-change badge for the sample at `index`, relative to the first
    /// sample of the window.
    pub fn price_change(&self, index: usize) -> Option<PriceChange> {
        let first = self.samples.first()?;
        let s = self.samples.get(index)?;
        Some(PriceChange::between(first.close, s.close))
    }
}

/// `{ value, delta, pct }` badge shown while hovering.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PriceChange {
    pub value: f64,
    pub delta: f64,
    /// Percent change; 0 when the reference value is 0.
    pub pct: f64,
}

impl PriceChange {
    pub fn between(reference: f64, value: f64) -> Self {
        let delta = value - reference;
        let pct = if reference != 0.0 { delta / reference * 100.0 } else { 0.0 };
        Self { value, delta, pct }
    }
}

/// Pointer position snapped to the nearest sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HoverState {
    pub index: usize,
    pub pixel_x: f64,
    pub pixel_y: f64,
    pub change: PriceChange,
}

/// Stateless orchestration of the render pipeline.
pub struct ChartController;

impl ChartController {
    /// Build the full render model. Pure: identical arguments give equal models.
    ///
    /// `now` is epoch ms and anchors the timeframe window.
    pub fn render(raw: &[RawSample], config: &ChartConfig, now: i64) -> RenderModel {
        let normalized = normalize(raw, config.filter.tz);
        Self::render_samples(&normalized, config, now)
    }

    /// Same as [`ChartController::render`] for an already-normalized series.
    pub fn render_samples(samples: &[Sample], config: &ChartConfig, now: i64) -> RenderModel {
        let window = filter(samples, config.timeframe, now, &config.filter);
        let plot = PlotRect::from_canvas(&config.canvas);
        let palette = Palette::from_config(config);

        let domain = Domain::from_samples(&window, config.mode.value_extent(), config.padding_fraction());
        let Some(domain) = domain else {
            debug!("render {} {}: empty window", config.mode, config.timeframe);
            return RenderModel {
                mode: config.mode,
                timeframe: config.timeframe,
                width: config.canvas.width,
                height: config.canvas.height,
                plot,
                domain: None,
                body: ModelBody::Empty,
                x_ticks: Vec::new(),
                y_ticks: Vec::new(),
                baseline_y: plot.bottom,
                palette,
                samples: Vec::new(),
                anchors: Vec::new(),
                hit: config.hit,
            };
        };

        let scaler = Scaler::new(domain, plot);
        let anchors = close_points(&window, &scaler);
        let baseline_y = scaler.baseline_y();
        let body = match config.mode {
            RenderMode::Candle => {
                ModelBody::Candles(build_candles(&window, &scaler, &config.candles, palette.up, palette.down))
            }
            RenderMode::Line => ModelBody::Line {
                path: smooth_path(&anchors),
                area: area_path(&anchors, baseline_y),
            },
        };
        debug!("render {} {}: {} samples", config.mode, config.timeframe, window.len());

        RenderModel {
            mode: config.mode,
            timeframe: config.timeframe,
            width: config.canvas.width,
            height: config.canvas.height,
            plot,
            domain: Some(domain),
            body,
            x_ticks: time_ticks(&scaler, config.timeframe, config.filter.tz, config.ticks.x_count),
            y_ticks: price_ticks(&scaler, config.ticks.y_count),
            baseline_y,
            palette,
            samples: window,
            anchors,
            hit: config.hit,
        }
    }

    /// Snap `pointer_x` to the nearest sample of `model`; `None` without samples.
    pub fn hover(model: &RenderModel, pointer_x: f64) -> Option<HoverState> {
        let xs: Vec<f64> = model.anchors.iter().map(|p| p.x).collect();
        let index = model.hit.nearest(&xs, pointer_x)?;
        let anchor = model.anchors[index];
        let change = model.price_change(index)?;
        trace!("hover x={} -> index {}", pointer_x, index);
        Some(HoverState { index, pixel_x: anchor.x, pixel_y: anchor.y, change })
    }
}

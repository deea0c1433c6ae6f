// File: crates/pricechart-core/tests/render.rs
// Purpose: End-to-end render model checks: purity, empty state, hover, options.

use chrono::{TimeZone, Utc};
use pricechart_core::timeframe::DAY_MS;
use pricechart_core::{
    ChartConfig, ChartController, ChartOptions, ModelBody, PriceChange, RawSample, RenderMode, Rgba, Theme,
    Timeframe,
};

fn now() -> i64 {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap().timestamp_millis()
}

fn daily(n: i64) -> Vec<RawSample> {
    (0..n)
        .map(|i| {
            let p = 100.0 + (i as f64 * 0.4).sin() * 6.0 + i as f64 * 0.1;
            RawSample::new(now() - (n - 1 - i) * DAY_MS, p, p + 1.5, p - 1.5, p + 0.5)
        })
        .collect()
}

fn month_config(mode: RenderMode) -> ChartConfig {
    ChartConfig::default().with_mode(mode).with_timeframe(Timeframe::Month1)
}

#[test]
fn render_is_pure() {
    let raw = daily(90);
    for mode in [RenderMode::Line, RenderMode::Candle] {
        let cfg = month_config(mode);
        let a = ChartController::render(&raw, &cfg, now());
        let b = ChartController::render(&raw, &cfg, now());
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }
}

#[test]
fn candle_mode_draws_one_candle_per_sample() {
    let model = ChartController::render(&daily(90), &month_config(RenderMode::Candle), now());
    assert_eq!(model.samples.len(), 29);
    match &model.body {
        ModelBody::Candles(c) => assert_eq!(c.len(), 29),
        other => panic!("expected candles, got {other:?}"),
    }
    // Candles stay inside the padded value range.
    let plot = model.plot;
    if let ModelBody::Candles(c) = &model.body {
        assert!(c.iter().all(|c| c.wick_top >= plot.top - 1e-9 && c.wick_bottom <= plot.bottom + 1e-9));
    }
}

#[test]
fn line_mode_builds_path_and_area() {
    let model = ChartController::render(&daily(90), &month_config(RenderMode::Line), now());
    let ModelBody::Line { path, area } = &model.body else {
        panic!("expected a line body");
    };
    let first = model.anchors[0];
    let last = *model.anchors.last().unwrap();
    assert_eq!(path.first_point(), Some(first));
    assert_eq!(path.last_point(), Some(last));
    assert!(area.to_svg().ends_with('Z'));
    assert_eq!(model.baseline_y, model.plot.bottom);
    assert!(!model.x_ticks.is_empty());
    assert!(!model.y_ticks.is_empty());
    assert!(model.y_ticks.iter().all(|t| t.pixel >= model.plot.top && t.pixel <= model.plot.bottom));
}

#[test]
fn empty_window_renders_the_empty_state() {
    // Data entirely older than the 1D window.
    let raw = vec![RawSample::new(now() - 10 * DAY_MS, 1.0, 2.0, 0.5, 1.5)];
    let model = ChartController::render(&raw, &ChartConfig::default(), now());
    assert!(model.is_empty());
    assert!(model.domain.is_none());
    assert!(model.x_ticks.is_empty() && model.y_ticks.is_empty());
    assert_eq!(model.hover(500.0), None);

    let model = ChartController::render(&[], &ChartConfig::default(), now());
    assert!(model.is_empty());
}

#[test]
fn single_sample_renders_without_nan() {
    let raw = vec![RawSample::close_only(now() - 3_600_000, 250.0)];
    let model = ChartController::render(&raw, &ChartConfig::default(), now());
    assert_eq!(model.anchors.len(), 1);
    assert!(model.anchors[0].x.is_finite() && model.anchors[0].y.is_finite());
    assert_eq!(model.x_ticks.len(), 1);
    let hover = model.hover(0.0).unwrap();
    assert_eq!(hover.index, 0);
    assert_eq!(hover.change, PriceChange { value: 250.0, delta: 0.0, pct: 0.0 });
}

#[test]
fn hover_reports_change_from_the_first_sample() {
    let model = ChartController::render(&daily(90), &month_config(RenderMode::Line), now());
    let last = model.anchors.len() - 1;
    let hover = model.hover(model.plot.right + 50.0).unwrap();
    assert_eq!(hover.index, last);
    assert_eq!(hover.pixel_x, model.anchors[last].x);

    let first = model.samples[0].close;
    let value = model.samples[last].close;
    assert!((hover.change.delta - (value - first)).abs() < 1e-9);
    assert!((hover.change.pct - (value - first) / first * 100.0).abs() < 1e-9);

    assert_eq!(model.hover(model.plot.left - 50.0).unwrap().index, 0);
}

#[test]
fn price_change_against_zero_is_zero_percent() {
    let c = PriceChange::between(0.0, 5.0);
    assert_eq!(c.delta, 5.0);
    assert_eq!(c.pct, 0.0);
    let c = PriceChange::between(200.0, 150.0);
    assert_eq!(c.pct, -25.0);
}

#[test]
fn color_overrides_reach_the_palette() {
    let mut cfg = month_config(RenderMode::Candle).with_theme(Theme::dark());
    cfg.up_color = Some(Rgba::rgb(1, 2, 3));
    cfg.line_color = Some(Rgba::rgb(9, 9, 9));
    let model = ChartController::render(&daily(40), &cfg, now());
    assert_eq!(model.palette.up, Rgba::rgb(1, 2, 3));
    assert_eq!(model.palette.down, Theme::dark().candle_down);
    assert_eq!(model.palette.background, Theme::dark().background);
    assert_eq!(model.palette.area_fill, Rgba::from_argb(Theme::dark().area_fill.a, 9, 9, 9));
    if let ModelBody::Candles(c) = &model.body {
        assert!(c.iter().filter(|c| c.bullish).all(|c| c.color == Rgba::rgb(1, 2, 3)));
    }
}

#[test]
fn options_from_json() {
    let opts = ChartOptions::from_json(
        r##"{"mode": "candle", "timeframe": "1Y", "width": 640, "height": 320,
            "upColor": "#0f0", "theme": "dark", "intraday": true, "utcOffsetMinutes": -300}"##,
    )
    .unwrap();
    let cfg = opts.into_config().unwrap();
    assert_eq!(cfg.mode, RenderMode::Candle);
    assert_eq!(cfg.timeframe, Timeframe::Year1);
    assert_eq!(cfg.canvas.width, 640.0);
    assert_eq!(cfg.canvas.insets.left, 40.0);
    assert_eq!(cfg.up(), Rgba::rgb(0, 255, 0));
    assert_eq!(cfg.theme, Theme::dark());
    assert!(cfg.filter.intraday);
    assert_eq!(cfg.filter.tz.local_minus_utc(), -300 * 60);

    let defaults = ChartOptions::from_json("{}").unwrap().into_config().unwrap();
    assert_eq!(defaults, ChartConfig::default());
}

#[test]
fn invalid_options_are_rejected() {
    assert!(ChartOptions::from_json(r#"{"mode": "bars"}"#).is_err());
    assert!(ChartOptions::from_json(r#"{"timeframe": "5Y"}"#).is_err());
    let bad_color = ChartOptions { line_color: Some("#zzz".into()), ..ChartOptions::default() };
    assert!(bad_color.into_config().is_err());
    let bad_offset = ChartOptions { utc_offset_minutes: 24 * 60, ..ChartOptions::default() };
    assert!(bad_offset.into_config().is_err());
    // Unknown themes fall back to light.
    let unknown = ChartOptions { theme: "neon".into(), ..ChartOptions::default() };
    assert_eq!(unknown.into_config().unwrap().theme, Theme::light());
}

#[test]
fn huge_prices_render_finite_geometry() {
    let raw = vec![
        RawSample::new(now() - 2 * 3_600_000, 1e308, 1e308, -1e308, -1e308),
        RawSample::new(now() - 3_600_000, -1e308, 1e308, -1e308, 1e308),
    ];
    for mode in [RenderMode::Line, RenderMode::Candle] {
        let model = ChartController::render(&raw, &ChartConfig::default().with_mode(mode), now());
        assert!(model.anchors.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
        assert!(!model.y_ticks.is_empty());
        assert!(model.y_ticks.iter().all(|t| t.value.is_finite() && t.pixel.is_finite()));
        assert!(model.baseline_y.is_finite());
    }
}

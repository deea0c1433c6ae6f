// File: crates/pricechart-render-skia/tests/smoke.rs
// Purpose: End-to-end rasterization smoke tests (PNG file, PNG bytes, RGBA buffer).

use pricechart_core::{ChartConfig, ChartController, RawSample, RenderMode, RenderModel, Timeframe};
use pricechart_render_skia::{SkiaRenderer, SurfaceOptions};

const DAY_MS: i64 = 86_400_000;

fn model(mode: RenderMode) -> RenderModel {
    let raw: Vec<RawSample> = (0..40i64)
        .map(|i| {
            let p = 50.0 + (i as f64 * 0.5).sin() * 3.0;
            RawSample::new(i * DAY_MS, p, p + 1.0, p - 1.0, p + 0.4)
        })
        .collect();
    let cfg = ChartConfig::default().with_mode(mode).with_timeframe(Timeframe::Month1);
    ChartController::render(&raw, &cfg, 39 * DAY_MS)
}

fn quiet() -> SkiaRenderer {
    SkiaRenderer::new(SurfaceOptions { draw_labels: false, ..SurfaceOptions::default() })
}

#[test]
fn render_smoke_png() {
    let renderer = SkiaRenderer::default();
    let line = model(RenderMode::Line);

    let out = std::path::PathBuf::from("target/test_out/smoke_line.png");
    renderer.render_to_png(&line, None, &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    let hover = line.hover(500.0);
    let bytes = renderer.render_png_bytes(&line, hover.as_ref()).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");

    let candles = renderer.render_png_bytes(&model(RenderMode::Candle), None).expect("candle bytes");
    let img = image::load_from_memory(&candles).expect("decode png").to_rgba8();
    assert_eq!((img.width(), img.height()), (1000, 400));
}

#[test]
fn render_rgba8_buffer() {
    let m = model(RenderMode::Candle);
    let (px, w, h, stride) = quiet().render_rgba8(&m, None).expect("rgba render");
    assert_eq!((w, h), (1000, 400));
    assert_eq!(w as usize * h as usize * 4, px.len());
    assert_eq!(stride, w as usize * 4);

    // Top-left corner is opaque background.
    let bg = m.palette.background;
    assert_eq!(&px[0..4], &[bg.r, bg.g, bg.b, 255]);

    // Some candle body pixel carries its color.
    let c = match &m.body {
        pricechart_core::ModelBody::Candles(c) => c[c.len() / 2],
        other => panic!("expected candles, got {other:?}"),
    };
    let x = c.x.round() as usize;
    let y = ((c.top + c.bottom) * 0.5).round() as usize;
    let i = y * stride + x * 4;
    assert_eq!(&px[i..i + 3], &[c.color.r, c.color.g, c.color.b]);
}

#[test]
fn empty_model_still_renders() {
    let empty = ChartController::render(&[], &ChartConfig::default(), 0);
    assert!(empty.is_empty());
    let bytes = SkiaRenderer::default().render_png_bytes(&empty, None).expect("empty render");
    assert!(bytes.starts_with(&[137, 80, 78, 71]));
}

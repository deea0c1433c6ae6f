// File: crates/pricechart-render-skia/tests/snapshot.rs
// Purpose: Golden snapshot harness with bless flow.
// Behavior:
// - Renders deterministic line and candle charts to PNG bytes (labels off).
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot files.
// - Else, if a snapshot exists, compares decoded pixels for an exact match.
// - Else, logs a note and returns without failing to ease first run.

use pricechart_core::{ChartConfig, ChartController, RawSample, RenderMode, Theme, Timeframe};
use pricechart_render_skia::{SkiaRenderer, SurfaceOptions};

const HOUR_MS: i64 = 3_600_000;

fn render_bytes(mode: RenderMode) -> Vec<u8> {
    let raw: Vec<RawSample> = (0..24i64)
        .map(|i| {
            let p = 10.0 + (i % 5) as f64 - (i % 3) as f64 * 0.5;
            RawSample::new(i * HOUR_MS, p, p + 0.8, p - 0.6, p + if i % 2 == 0 { 0.4 } else { -0.3 })
        })
        .collect();
    let cfg = ChartConfig::default()
        .with_mode(mode)
        .with_timeframe(Timeframe::Day1)
        .with_theme(Theme::dark());
    let model = ChartController::render(&raw, &cfg, 23 * HOUR_MS);
    let hover = model.hover(model.plot.left + model.plot.width() * 0.4);

    // Labels off to avoid font differences across platforms.
    let renderer = SkiaRenderer::new(SurfaceOptions { draw_labels: false, ..SurfaceOptions::default() });
    renderer.render_png_bytes(&model, hover.as_ref()).expect("render png")
}

fn check_golden(name: &str, bytes: &[u8]) {
    let snap_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__");
    let snap_path = snap_dir.join(name);

    let update = std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if update {
        std::fs::create_dir_all(&snap_dir).expect("create snapshots dir");
        std::fs::write(&snap_path, bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", snap_path.display(), bytes.len());
        return;
    }

    if snap_path.exists() {
        let want = std::fs::read(&snap_path).expect("read snapshot");
        // Compare decoded pixel buffers to avoid PNG encoder variance
        let got_img = image::load_from_memory(bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "rendered pixels differ from golden snapshot: {}", snap_path.display());
    } else {
        eprintln!("[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.", snap_path.display());
    }
}

#[test]
fn golden_line_chart() {
    check_golden("line_1d_dark.png", &render_bytes(RenderMode::Line));
}

#[test]
fn golden_candle_chart() {
    check_golden("candle_1d_dark.png", &render_bytes(RenderMode::Candle));
}

#[test]
fn rendering_is_deterministic() {
    let a = image::load_from_memory(&render_bytes(RenderMode::Line)).expect("decode a").to_rgba8();
    let b = image::load_from_memory(&render_bytes(RenderMode::Line)).expect("decode b").to_rgba8();
    assert_eq!(a.as_raw(), b.as_raw());
}

// File: crates/pricechart-render-skia/src/lib.rs
// Summary: Rasterizes a pricechart RenderModel on a Skia CPU surface (PNG bytes, PNG file, RGBA8).

use anyhow::{Context, Result};
use skia_safe as skia;
use tracing::debug;

use pricechart_core::{CandleGeometry, HoverState, ModelBody, Palette, Path, PathCommand, RenderModel, Rgba};

pub mod text;

use text::{Anchor, TextShaper};

/// Stroke and label settings of the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceOptions {
    /// Draw tick labels and the empty-state message; off for pixel snapshots.
    pub draw_labels: bool,
    pub line_width: f32,
    pub label_size: f32,
    /// Hover marker radius, px.
    pub marker_radius: f32,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self { draw_labels: true, line_width: 2.0, label_size: 11.0, marker_radius: 4.0 }
    }
}

pub struct SkiaRenderer {
    pub options: SurfaceOptions,
    text: TextShaper,
}

impl Default for SkiaRenderer {
    fn default() -> Self { Self::new(SurfaceOptions::default()) }
}

impl SkiaRenderer {
    pub fn new(options: SurfaceOptions) -> Self {
        Self { options, text: TextShaper::new() }
    }

    /// Encode `model` (plus the optional hover crosshair) as PNG bytes.
    pub fn render_png_bytes(&self, model: &RenderModel, hover: Option<&HoverState>) -> Result<Vec<u8>> {
        let mut surface = self.rasterize(model, hover)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render to a PNG file at `output_png_path`, creating parent directories.
    pub fn render_to_png(
        &self,
        model: &RenderModel,
        hover: Option<&HoverState>,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let bytes = self.render_png_bytes(model, hover)?;
        let path = output_png_path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        std::fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
        Ok(())
    }

    /// Unpremultiplied RGBA8 pixels as `(pixels, width, height, stride)`.
    pub fn render_rgba8(&self, model: &RenderModel, hover: Option<&HoverState>) -> Result<(Vec<u8>, u32, u32, usize)> {
        let mut surface = self.rasterize(model, hover)?;
        let (w, h) = (surface.width(), surface.height());
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let stride = w as usize * 4;
        let mut pixels = vec![0u8; stride * h as usize];
        if !surface.read_pixels(&info, &mut pixels, stride, (0, 0)) {
            anyhow::bail!("read_pixels failed for {w}x{h} surface");
        }
        Ok((pixels, w as u32, h as u32, stride))
    }

    fn rasterize(&self, model: &RenderModel, hover: Option<&HoverState>) -> Result<skia::Surface> {
        let w = (model.width.round() as i32).max(1);
        let h = (model.height.round() as i32).max(1);
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| anyhow::anyhow!("failed to create {w}x{h} raster surface"))?;
        let canvas = surface.canvas();
        let palette = &model.palette;

        canvas.clear(color(palette.background));
        draw_grid(canvas, model);
        draw_baseline(canvas, model);

        match &model.body {
            ModelBody::Empty => {
                if self.options.draw_labels {
                    let x = ((model.plot.left + model.plot.right) * 0.5) as f32;
                    let y = ((model.plot.top + model.plot.bottom) * 0.5) as f32;
                    let size = self.options.label_size + 3.0;
                    self.text.draw(canvas, "No data for this range", x, y, Anchor::Center, size, color(palette.axis_label), false);
                }
            }
            ModelBody::Candles(candles) => draw_candles(canvas, candles),
            ModelBody::Line { path, area } => {
                draw_area(canvas, area, model);
                draw_line(canvas, path, palette.line, self.options.line_width);
            }
        }

        if self.options.draw_labels {
            self.draw_labels(canvas, model);
        }
        if let Some(hover) = hover {
            self.draw_crosshair(canvas, model, hover);
        }
        debug!("rasterized {}x{} {} frame", w, h, model.mode);
        Ok(surface)
    }

    fn draw_labels(&self, canvas: &skia::Canvas, model: &RenderModel) {
        let size = self.options.label_size;
        let c = color(model.palette.axis_label);
        let plot = &model.plot;
        for t in &model.y_ticks {
            let y = t.pixel as f32 + size * 0.35;
            self.text.draw(canvas, &t.label, plot.left as f32 - 6.0, y, Anchor::Right, size, c, true);
        }
        let last = model.x_ticks.len().saturating_sub(1);
        for (i, t) in model.x_ticks.iter().enumerate() {
            // Outermost labels stay inside the plot edges.
            let anchor = match i {
                0 if last > 0 => Anchor::Left,
                i if i == last && last > 0 => Anchor::Right,
                _ => Anchor::Center,
            };
            let y = plot.bottom as f32 + size + 6.0;
            self.text.draw(canvas, &t.label, t.pixel as f32, y, anchor, size, c, false);
        }
    }

    fn draw_crosshair(&self, canvas: &skia::Canvas, model: &RenderModel, hover: &HoverState) {
        let plot = &model.plot;
        let (x, y) = (hover.pixel_x as f32, hover.pixel_y as f32);

        let mut paint = stroke_paint(model.palette.crosshair, 1.0);
        paint.set_anti_alias(false);
        canvas.draw_line((x, plot.top as f32), (x, plot.bottom as f32), &paint);

        let mut dot = fill_paint(model.palette.line);
        canvas.draw_circle((x, y), self.options.marker_radius, &dot);
        dot.set_color(color(model.palette.background));
        canvas.draw_circle((x, y), self.options.marker_radius * 0.5, &dot);

        if self.options.draw_labels {
            let c = hover.change;
            let label = format!("{:.2}  {:+.2} ({:+.2}%)", c.value, c.delta, c.pct);
            let size = self.options.label_size;
            let width = self.text.measure_width(&label, size, true);
            // Flip to the left of the crosshair near the right edge.
            let (lx, anchor) = if x + 8.0 + width > plot.right as f32 { (x - 8.0, Anchor::Right) } else { (x + 8.0, Anchor::Left) };
            self.text.draw(canvas, &label, lx, plot.top as f32 + size + 2.0, anchor, size, color(model.palette.axis_label), true);
        }
    }
}

// ---- helpers ----------------------------------------------------------------

fn color(c: Rgba) -> skia::Color {
    skia::Color::from_argb(c.a, c.r, c.g, c.b)
}

fn stroke_paint(c: Rgba, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_color(color(c));
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint
}

fn fill_paint(c: Rgba) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_color(color(c));
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint
}

fn to_skia_path(path: &Path) -> skia::Path {
    let mut out = skia::Path::new();
    let pt = |p: pricechart_core::Point| skia::Point::new(p.x as f32, p.y as f32);
    for cmd in &path.commands {
        match *cmd {
            PathCommand::MoveTo(p) => {
                out.move_to(pt(p));
            }
            PathCommand::LineTo(p) => {
                out.line_to(pt(p));
            }
            PathCommand::CubicTo(a, b, p) => {
                out.cubic_to(pt(a), pt(b), pt(p));
            }
            PathCommand::Close => {
                out.close();
            }
        }
    }
    out
}

fn draw_grid(canvas: &skia::Canvas, model: &RenderModel) {
    let plot = &model.plot;
    let mut paint = stroke_paint(model.palette.grid, 1.0);
    paint.set_anti_alias(false);
    for t in &model.x_ticks {
        let x = t.pixel as f32;
        canvas.draw_line((x, plot.top as f32), (x, plot.bottom as f32), &paint);
    }
    for t in &model.y_ticks {
        let y = t.pixel as f32;
        canvas.draw_line((plot.left as f32, y), (plot.right as f32, y), &paint);
    }
}

fn draw_baseline(canvas: &skia::Canvas, model: &RenderModel) {
    let plot = &model.plot;
    let y = model.baseline_y as f32;
    let paint = stroke_paint(model.palette.baseline, 1.0);
    canvas.draw_line((plot.left as f32, y), (plot.right as f32, y), &paint);
}

/// Vertical gradient from the area color at the plot top to transparent at the baseline.
fn draw_area(canvas: &skia::Canvas, area: &Path, model: &RenderModel) {
    if area.is_empty() {
        return;
    }
    let Palette { area_fill, .. } = model.palette;
    let top = skia::Point::new(0.0, model.plot.top as f32);
    let bottom = skia::Point::new(0.0, model.baseline_y as f32);
    let colors = [color(area_fill), color(area_fill.with_alpha(0))];
    let shader = skia::Shader::linear_gradient((top, bottom), &colors[..], None, skia::TileMode::Clamp, None, None);

    let mut paint = fill_paint(area_fill);
    paint.set_shader(shader);
    canvas.draw_path(&to_skia_path(area), &paint);
}

fn draw_line(canvas: &skia::Canvas, path: &Path, c: Rgba, width: f32) {
    if path.commands.len() < 2 {
        return;
    }
    let mut paint = stroke_paint(c, width);
    paint.set_stroke_join(skia::paint::Join::Round);
    paint.set_stroke_cap(skia::paint::Cap::Round);
    canvas.draw_path(&to_skia_path(path), &paint);
}

fn draw_candles(canvas: &skia::Canvas, candles: &[CandleGeometry]) {
    let mut wick = stroke_paint(Rgba::rgb(0, 0, 0), 1.0);
    let mut body = fill_paint(Rgba::rgb(0, 0, 0));
    for c in candles {
        wick.set_color(color(c.color));
        body.set_color(color(c.color));
        let x = c.x as f32;
        canvas.draw_line((x, c.wick_top as f32), (x, c.wick_bottom as f32), &wick);
        let rect = skia::Rect::from_ltrb(c.left as f32, c.top as f32, (c.left + c.width) as f32, c.bottom as f32);
        canvas.draw_rect(rect, &body);
    }
}

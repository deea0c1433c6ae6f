// File: crates/pricechart-core/src/theme.rs
// Summary: Light/Dark theming for chart colors.

use tracing::warn;

use crate::types::Rgba;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Theme {
    pub name: &'static str,
    pub background: Rgba,
    pub grid: Rgba,
    pub axis_label: Rgba,
    pub baseline: Rgba,
    pub crosshair: Rgba,
    pub line_stroke: Rgba,
    /// Area gradient color at the curve; fades to transparent at the baseline.
    pub area_fill: Rgba,
    pub candle_up: Rgba,
    pub candle_down: Rgba,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Rgba::rgb(255, 255, 255),
            grid: Rgba::rgb(240, 240, 242),
            axis_label: Rgba::rgb(90, 90, 100),
            baseline: Rgba::rgb(0xe6, 0xe6, 0xe6),
            crosshair: Rgba::rgb(0xcf, 0xef, 0xff),
            line_stroke: Rgba::rgb(0x00, 0xc2, 0x7a),
            area_fill: Rgba::from_argb(71, 0x00, 0xc2, 0x7a),
            candle_up: Rgba::rgb(20, 160, 90),
            candle_down: Rgba::rgb(200, 60, 60),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Rgba::rgb(18, 18, 20),
            grid: Rgba::rgb(40, 40, 45),
            axis_label: Rgba::rgb(200, 200, 210),
            baseline: Rgba::rgb(70, 70, 78),
            crosshair: Rgba::rgb(120, 140, 160),
            line_stroke: Rgba::rgb(0x00, 0xd6, 0x87),
            area_fill: Rgba::from_argb(90, 0x00, 0xd6, 0x87),
            candle_up: Rgba::rgb(40, 200, 120),
            candle_down: Rgba::rgb(220, 80, 80),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    match presets().into_iter().find(|t| t.name.eq_ignore_ascii_case(name.trim())) {
        Some(t) => t,
        None => {
            warn!("unknown theme '{}', using light", name);
            Theme::light()
        }
    }
}

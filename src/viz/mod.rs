//! Rendering layer: draw a [`ChartSpec`] to **SVG** or **PNG**.
//!
//! - Output format chosen from the file extension (`.svg`, anything else → PNG)
//! - Locale-aware number labels (`30,000` vs `30.000`)
//! - Continuous color bar for the map and bar charts, country legend for bubbles
//!
//! A [`ChartSpec`] carries every encoding decision; this module only lays it out.

pub mod bar;
pub mod bubble;
pub mod legend;
pub mod map;
pub mod text;
pub mod util;

use crate::charts::ChartSpec;
use anyhow::Result;

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;
use std::sync::Once;

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

/// Canvas size and number locale for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    /// Locale tag for number labels, see [`util::map_locale`].
    pub locale: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            locale: "en".into(),
        }
    }
}

impl RenderOptions {
    /// Defaults sized for `spec`: the map carries its own canvas size.
    pub fn for_spec(spec: &ChartSpec) -> Self {
        match spec {
            ChartSpec::Map(m) => Self {
                width: m.width,
                height: m.height,
                ..Self::default()
            },
            _ => Self::default(),
        }
    }

    pub fn with_locale(mut self, tag: &str) -> Self {
        self.locale = tag.to_string();
        self
    }
}

/// Draw `spec` to `out_path`.
pub fn render_chart<P: AsRef<Path>>(spec: &ChartSpec, out_path: P, opts: &RenderOptions) -> Result<()> {
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let size = (opts.width.max(200), opts.height.max(150));

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), size).into_drawing_area();
        draw_spec(root, spec, opts)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), size).into_drawing_area();
        draw_spec(root, spec, opts)?;
    }
    log::debug!("rendered {} chart to {}", kind_name(spec), out_path.display());
    Ok(())
}

fn kind_name(spec: &ChartSpec) -> &'static str {
    match spec {
        ChartSpec::Map(_) => "map",
        ChartSpec::Bar(_) => "bar",
        ChartSpec::Bubble(_) => "bubble",
    }
}

fn draw_spec<DB>(root: DrawingArea<DB, Shift>, spec: &ChartSpec, opts: &RenderOptions) -> Result<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(|e| anyhow::anyhow!("{:?}", e))?;
    match spec {
        ChartSpec::Map(m) => map::draw_map(&root, m, &opts.locale)?,
        ChartSpec::Bar(b) => bar::draw_bar(&root, b, &opts.locale)?,
        ChartSpec::Bubble(b) => bubble::draw_bubble(&root, b, &opts.locale)?,
    }
    root.present().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(())
}

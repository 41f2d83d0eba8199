use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use std::ops::Range;

use super::legend::draw_color_bar;
use super::util::to_rgb;
use crate::charts::{GeoPoint, MapSpec};

const LEGEND_W: u32 = 150;
/// Web-map tile size: the whole world is `TILE_PX * 2^zoom` pixels wide.
const TILE_PX: f64 = 512.0;
const OCEAN: RGBColor = RGBColor(232, 238, 244);

/// Visible `(lon, lat)` window of an equirectangular view at `zoom`, kept inside
/// the world bounds.
pub fn view_window(center: GeoPoint, zoom: f64, width: u32, height: u32) -> (Range<f64>, Range<f64>) {
    let lon_span = 360.0 * width as f64 / (TILE_PX * 2f64.powf(zoom));
    let lat_span = (lon_span * height as f64 / width.max(1) as f64).min(180.0);
    (
        clamp_window(center.lon, lon_span.min(360.0), -180.0, 180.0),
        clamp_window(center.lat, lat_span, -90.0, 90.0),
    )
}

fn clamp_window(center: f64, span: f64, lo: f64, hi: f64) -> Range<f64> {
    let mut a = center - span / 2.0;
    let mut b = center + span / 2.0;
    if a < lo {
        b += lo - a;
        a = lo;
    }
    if b > hi {
        a -= b - hi;
        b = hi;
    }
    a.max(lo)..b
}

/// Filled region polygons in feature order, color bar on the right.
pub fn draw_map<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &MapSpec,
    locale: &str,
) -> Result<()> {
    let (w, _) = root.dim_in_pixel();
    let (plot_area, legend_area) = root.split_horizontally(w - LEGEND_W.min(w / 4));
    let (pw, ph) = plot_area.dim_in_pixel();
    let (lon, lat) = view_window(spec.center, spec.zoom, pw, ph);

    let chart = ChartBuilder::on(&plot_area)
        .margin(10)
        .caption(&spec.title, (FontFamily::SansSerif, 22))
        .build_cartesian_2d(lon, lat)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    chart
        .plotting_area()
        .fill(&OCEAN)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    for feature in &spec.features {
        let Some(geometry) = spec.regions.get(&feature.country_code) else {
            continue;
        };
        let fill = to_rgb(feature.color).mix(spec.opacity).filled();
        for ring in geometry.exterior_rings() {
            let pts: Vec<(f64, f64)> = ring.iter().map(|p| (p[0], p[1])).collect();
            chart
                .plotting_area()
                .draw(&Polygon::new(pts.clone(), fill))
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            chart
                .plotting_area()
                .draw(&PathElement::new(pts, WHITE.stroke_width(1)))
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        }
    }

    draw_color_bar(
        &legend_area,
        spec.color_scale,
        spec.color_domain,
        &spec.legend_title,
        locale,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_zoom_shows_whole_world() {
        let (lon, lat) = view_window(GeoPoint { lat: 20.0, lon: 0.0 }, 1.1, 1150, 640);
        assert_eq!(lon, -180.0..180.0);
        assert!(lat.start >= -90.0 && lat.end <= 90.0);
        assert!(lat.end - lat.start > 150.0);
    }

    #[test]
    fn zoomed_window_is_centered_and_clamped() {
        let (lon, lat) = view_window(GeoPoint { lat: 80.0, lon: 10.0 }, 3.0, 1024, 512);
        assert!((lon.start - -35.0).abs() < 1e-9 && (lon.end - 55.0).abs() < 1e-9);
        // 45 degrees tall, pushed down from the pole.
        assert!((lat.end - 90.0).abs() < 1e-9 && (lat.start - 45.0).abs() < 1e-9);
    }
}

use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;

use super::legend::draw_legend_panel;
use super::util::{compute_left_label_area_px, format_count, to_rgb};
use crate::charts::{Bubble, BubbleSpec};

/// Fallback GDP range when there is nothing to plot.
const EMPTY_Y_RANGE: (f64, f64) = (100.0, 100_000.0);

/// Scatter of sized bubbles with a country legend on the right.
///
/// Y values are plotted in axis space: `log10(gdp)` when `log_y` is set,
/// and tick labels are mapped back to GDP.
pub fn draw_bubble<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &BubbleSpec,
    locale: &str,
) -> Result<()> {
    let (w, _) = root.dim_in_pixel();
    let legend_w = ((w as f64) * 0.2).clamp(120.0, 260.0) as u32;
    let (plot_area, legend_area) = root.split_horizontally(w - legend_w.min(w / 3));

    let to_axis = |v: f64| if spec.log_y { v.log10() } else { v };
    let from_axis = |v: f64| if spec.log_y { 10f64.powf(v) } else { v };

    let (lo, hi) = spec
        .bubbles
        .iter()
        .map(|b| b.gdp_per_capita)
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .map(|(lo, hi)| (lo / 1.5, hi * 1.5))
        .unwrap_or(EMPTY_Y_RANGE);
    let (y0, y1) = (to_axis(lo), to_axis(hi));

    let y_label_fmt = |v: &f64| format_count(from_axis(*v).round().max(0.0) as u64, locale);
    let y_ticks: Vec<String> = (0..=8)
        .map(|i| y_label_fmt(&(y0 + (y1 - y0) * i as f64 / 8.0)))
        .collect();
    let left = compute_left_label_area_px(y_ticks.iter().map(String::as_str), 12);

    let (x0, x1) = spec.x_range;
    let mut chart = ChartBuilder::on(&plot_area)
        .margin(16)
        .caption(&spec.title, (FontFamily::SansSerif, 22))
        .set_label_area_size(LabelAreaPosition::Left, left)
        .set_label_area_size(LabelAreaPosition::Bottom, 48)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let x_label_fmt = |v: &f64| format!("{:.0}", v);
    chart
        .configure_mesh()
        .x_desc(spec.x_title.as_str())
        .y_desc(spec.y_title.as_str())
        .x_labels(10)
        .y_labels(8)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style((FontFamily::SansSerif, 12))
        .axis_desc_style((FontFamily::SansSerif, 16))
        .draw()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    // Largest first so small bubbles stay visible on top.
    let mut order: Vec<&Bubble> = spec.bubbles.iter().collect();
    order.sort_by(|a, b| b.diameter.total_cmp(&a.diameter));
    let radius = |b: &Bubble| ((b.diameter / 2.0).round() as i32).max(2);

    chart
        .draw_series(order.iter().map(|b| {
            Circle::new(
                (b.life_expectancy, to_axis(b.gdp_per_capita)),
                radius(b),
                to_rgb(b.color).mix(0.7).filled(),
            )
        }))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    chart
        .draw_series(order.iter().map(|b| {
            Circle::new(
                (b.life_expectancy, to_axis(b.gdp_per_capita)),
                radius(b),
                WHITE.stroke_width(1),
            )
        }))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let mut items: Vec<(String, RGBColor)> = Vec::new();
    for b in &spec.bubbles {
        if !items.iter().any(|(name, _)| name == &b.country) {
            items.push((b.country.clone(), to_rgb(b.color)));
        }
    }
    draw_legend_panel(&legend_area, &items, &spec.legend_title)
}

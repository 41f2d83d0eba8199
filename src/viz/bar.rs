use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::legend::draw_color_bar;
use super::text::truncate_to_width;
use super::util::{choose_axis_scale, compute_left_label_area_px, format_count, format_scaled, to_rgb};
use crate::charts::BarSpec;

const LEGEND_W: u32 = 150;

/// One bar per category, value labels above the bars, color bar on the right.
pub fn draw_bar<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spec: &BarSpec,
    locale: &str,
) -> Result<()> {
    let (w, _) = root.dim_in_pixel();
    let (plot_area, legend_area) = root.split_horizontally(w - LEGEND_W.min(w / 4));

    let slots = spec.bars.len().max(1) as u32;
    let max_pop = spec.bars.iter().map(|b| b.population).max().unwrap_or(0) as f64;
    let (yscale, scale_word) = choose_axis_scale(max_pop);
    // Headroom for the value labels.
    let y_top = if max_pop > 0.0 { max_pop * 1.12 / yscale } else { 1.0 };
    let y_title = if scale_word.is_empty() {
        spec.y_title.clone()
    } else {
        format!("{} ({scale_word})", spec.y_title)
    };

    let y_ticks: Vec<String> = (0..=10)
        .map(|i| format_scaled(y_top * i as f64 / 10.0, locale))
        .collect();
    let left = compute_left_label_area_px(y_ticks.iter().map(String::as_str), 12);

    let mut chart = ChartBuilder::on(&plot_area)
        .margin(16)
        .caption(&spec.title, (FontFamily::SansSerif, 22))
        .set_label_area_size(LabelAreaPosition::Left, left)
        .set_label_area_size(LabelAreaPosition::Bottom, 56)
        .build_cartesian_2d((0u32..slots).into_segmented(), 0f64..y_top)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let (plot_w, _) = chart.plotting_area().dim_in_pixel();
    let slot_px = plot_w / slots;
    let names: Vec<String> = spec
        .bars
        .iter()
        .map(|b| truncate_to_width(&b.country, 12, slot_px.saturating_sub(4)))
        .collect();
    let x_label_fmt = |v: &SegmentValue<u32>| match v {
        SegmentValue::CenterOf(i) => names.get(*i as usize).cloned().unwrap_or_default(),
        _ => String::new(),
    };
    let y_label_fmt = |v: &f64| format_scaled(*v, locale);

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc(spec.x_title.as_str())
        .y_desc(y_title)
        .x_labels(slots as usize)
        .y_labels(10)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style((FontFamily::SansSerif, 12))
        .axis_desc_style((FontFamily::SansSerif, 16))
        .draw()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let side_margin = (slot_px as f64 * 0.15) as u32;
    chart
        .draw_series(spec.bars.iter().enumerate().map(|(i, b)| {
            let i = i as u32;
            let mut rect = Rectangle::new(
                [
                    (SegmentValue::Exact(i), 0.0),
                    (SegmentValue::Exact(i + 1), b.population as f64 / yscale),
                ],
                to_rgb(b.color).filled(),
            );
            rect.set_margin(0, 0, side_margin, side_margin);
            rect
        }))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    if spec.show_values {
        let value_style = TextStyle::from((FontFamily::SansSerif, 12))
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        chart
            .draw_series(spec.bars.iter().enumerate().map(|(i, b)| {
                Text::new(
                    format_count(b.population, locale),
                    (SegmentValue::CenterOf(i as u32), b.population as f64 / yscale),
                    value_style.clone(),
                )
            }))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }

    draw_color_bar(
        &legend_area,
        spec.color_scale,
        spec.color_domain,
        &spec.legend_title,
        locale,
    )
}

//! Legend panels drawn next to the plot area: a categorical list and a continuous color bar.

use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::{truncate_to_width, wrap_text_to_width};
use super::util::{choose_axis_scale, format_scaled, to_rgb};
use crate::palette::ColorScale;

const FONT_PX: u32 = 13;
const TITLE_FONT_PX: u32 = 15;
const PAD: i32 = 8;

fn draw_title<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, title: &str) -> Result<i32> {
    if title.trim().is_empty() {
        return Ok(PAD);
    }
    let (w, _) = area.dim_in_pixel();
    let style = TextStyle::from((FontFamily::SansSerif, TITLE_FONT_PX))
        .pos(Pos::new(HPos::Left, VPos::Top));
    let text = truncate_to_width(title, TITLE_FONT_PX, w.saturating_sub(2 * PAD as u32));
    area.draw(&Text::new(text, (PAD, PAD), style))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(PAD + TITLE_FONT_PX as i32 + 8)
}

/// Single-column list of colored markers and (wrapped) labels.
/// Items that do not fit the panel height are summarized as "+N more".
pub fn draw_legend_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    items: &[(String, RGBColor)],
    title: &str,
) -> Result<()> {
    let (w_u32, h_u32) = area.dim_in_pixel();
    let (w, h) = (w_u32 as i32, h_u32 as i32);

    let line_h: i32 = FONT_PX as i32 + 2;
    let row_gap: i32 = 4;
    let marker_radius: i32 = 5;
    let text_x = PAD + 2 * marker_radius + 8;
    let max_text_w = (w - text_x - PAD).max(40) as u32;
    let label_style =
        TextStyle::from((FontFamily::SansSerif, FONT_PX)).pos(Pos::new(HPos::Left, VPos::Center));

    let mut y = draw_title(area, title)?;
    for (idx, (label, color)) in items.iter().enumerate() {
        let lines = wrap_text_to_width(label, FONT_PX, max_text_w);
        let block_h = (lines.len().max(1) as i32) * line_h;
        if y + block_h + line_h > h {
            let rest = items.len() - idx;
            area.draw(&Text::new(
                format!("+{rest} more"),
                (text_x, y + line_h / 2),
                label_style.clone(),
            ))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            break;
        }

        area.draw(&Circle::new(
            (PAD + marker_radius, y + line_h / 2),
            marker_radius,
            color.filled(),
        ))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

        for (i, line) in lines.iter().enumerate() {
            let line_center_y = y + (i as i32) * line_h + line_h / 2;
            area.draw(&Text::new(
                line.as_str(),
                (text_x, line_center_y),
                label_style.clone(),
            ))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        }
        y += block_h + row_gap;
    }
    Ok(())
}

/// Vertical gradient for a continuous scale over `domain`, max at the top.
pub fn draw_color_bar<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    scale: ColorScale,
    domain: (f64, f64),
    title: &str,
    locale: &str,
) -> Result<()> {
    let (_, h_u32) = area.dim_in_pixel();
    let h = h_u32 as i32;

    let top = draw_title(area, title)? + 4;
    let bottom = (h - 3 * PAD).max(top + 20);
    let bar_x0 = PAD;
    let bar_x1 = PAD + 18;
    let steps = (bottom - top).max(1);

    for i in 0..steps {
        // i = 0 is the top row, which carries the maximum.
        let t = 1.0 - i as f64 / steps as f64;
        let color = to_rgb(scale.at(t));
        area.draw(&Rectangle::new(
            [(bar_x0, top + i), (bar_x1, top + i + 1)],
            color.filled(),
        ))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }
    area.draw(&Rectangle::new([(bar_x0, top), (bar_x1, bottom)], BLACK.mix(0.4)))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    let (lo, hi) = domain;
    let (scale_div, scale_word) = choose_axis_scale(lo.abs().max(hi.abs()));
    let label_style =
        TextStyle::from((FontFamily::SansSerif, FONT_PX)).pos(Pos::new(HPos::Left, VPos::Center));
    let ticks = 4;
    for k in 0..=ticks {
        let frac = k as f64 / ticks as f64;
        let value = hi - (hi - lo) * frac;
        let y = top + ((bottom - top) as f64 * frac).round() as i32;
        area.draw(&PathElement::new(
            vec![(bar_x1, y), (bar_x1 + 4, y)],
            BLACK.stroke_width(1),
        ))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        area.draw(&Text::new(
            format_scaled(value / scale_div, locale),
            (bar_x1 + 8, y),
            label_style.clone(),
        ))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }
    if !scale_word.is_empty() {
        area.draw(&Text::new(
            format!("({scale_word})"),
            (bar_x0, bottom + PAD + FONT_PX as i32 / 2),
            label_style,
        ))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }
    Ok(())
}

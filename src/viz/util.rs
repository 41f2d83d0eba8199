//! Utility functions for visualization: colors, scaling, locale mapping, label sizing.

use crate::palette::Rgb;
use num_format::{Locale, ToFormattedString};
use plotters::prelude::*;

use super::text::estimate_text_width_px;

#[inline]
pub fn to_rgb(c: Rgb) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

/// Pick a single axis scale and its human label based on the overall magnitude.
/// Returns (scale, label), e.g. (1e6, "millions").
pub fn choose_axis_scale(max_abs: f64) -> (f64, &'static str) {
    if max_abs >= 1.0e12 {
        (1.0e12, "trillions")
    } else if max_abs >= 1.0e9 {
        (1.0e9, "billions")
    } else if max_abs >= 1.0e6 {
        (1.0e6, "millions")
    } else if max_abs >= 1.0e3 {
        (1.0e3, "thousands")
    } else {
        (1.0, "")
    }
}

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `pt_BR`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'), // default
    }
}

/// Whole number with locale thousands separators, e.g. `1,318,683,096`.
pub fn format_count(v: u64, locale_tag: &str) -> String {
    let (locale, _) = map_locale(locale_tag);
    v.to_formatted_string(locale)
}

/// Scaled tick value with magnitude-dependent precision and the locale's decimal separator.
pub fn format_scaled(v: f64, locale_tag: &str) -> String {
    let (_, dec_sep) = map_locale(locale_tag);
    let a = v.abs();
    let prec = if a >= 100.0 {
        0
    } else if a >= 10.0 {
        1
    } else {
        2
    };
    let s = format!("{:.*}", prec, v);
    if dec_sep == '.' { s } else { s.replace('.', &dec_sep.to_string()) }
}

/// Compute a tight left label area width for the Y axis (in pixels),
/// based on the formatted tick labels that will appear.
///
/// Returns a width clamped to a sensible range to avoid extremes.
pub fn compute_left_label_area_px<'a>(
    labels: impl IntoIterator<Item = &'a str>,
    font_px: u32,
) -> u32 {
    let max_px = labels
        .into_iter()
        .map(|s| estimate_text_width_px(s, font_px))
        .max()
        .unwrap_or(0);
    // Room for tick marks and the rotated axis title.
    max_px.saturating_add(40).clamp(60, 160)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_use_locale_separators() {
        assert_eq!(format_count(1_318_683_096, "en"), "1,318,683,096");
        assert_eq!(format_count(82_400_996, "de"), "82.400.996");
    }

    #[test]
    fn scaled_values_pick_precision_by_magnitude() {
        assert_eq!(format_scaled(1318.68, "en"), "1319");
        assert_eq!(format_scaled(12.345, "en"), "12.3");
        assert_eq!(format_scaled(1.5, "de"), "1,50");
        assert_eq!(choose_axis_scale(2.5e8), (1.0e6, "millions"));
    }
}

//! Declarative chart specifications.
//!
//! Builders shape records into plain values (data + encodings) that the [`crate::viz`]
//! layer draws. Nothing here depends on a rendering backend, so every spec can be
//! inspected in tests or exported as JSON.

use crate::geo::{Boundaries, Geometry};
use crate::models::{Continent, Record};
use crate::palette::{ColorScale, Rgb, set1};
use crate::stats;
use ahash::AHashMap;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MAP_ZOOM: f64 = 1.1;
pub const MAP_OPACITY: f64 = 1.0;
pub const MAP_WIDTH: u32 = 1300;
pub const MAP_HEIGHT: u32 = 700;
pub const BUBBLE_X_RANGE: (f64, f64) = (40.0, 85.0);
/// Diameter in pixels of the most populous bubble.
pub const BUBBLE_SIZE_MAX: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// One joined (record, region) row of the choropleth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapFeature {
    pub country: String,
    pub country_code: String,
    pub year: i32,
    pub population: u64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSpec {
    pub title: String,
    pub legend_title: String,
    pub color_scale: ColorScale,
    /// `[min, max]` population over `features`.
    pub color_domain: (f64, f64),
    pub center: GeoPoint,
    pub zoom: f64,
    pub opacity: f64,
    pub width: u32,
    pub height: u32,
    /// Painted in order; a later row for the same region paints over earlier ones.
    pub features: Vec<MapFeature>,
    /// Geometry of every region referenced by `features`.
    pub regions: BTreeMap<String, Geometry>,
    /// Records dropped because their country code has no boundary.
    pub unmatched: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub country: String,
    pub population: u64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSpec {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub legend_title: String,
    pub color_scale: ColorScale,
    pub color_domain: (f64, f64),
    pub show_values: bool,
    pub bars: Vec<Bar>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub country: String,
    pub life_expectancy: f64,
    pub gdp_per_capita: f64,
    pub population: u64,
    /// Marker diameter in pixels, proportional to the square root of population.
    pub diameter: f64,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BubbleSpec {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub legend_title: String,
    pub x_range: (f64, f64),
    pub log_y: bool,
    pub size_max: f64,
    pub bubbles: Vec<Bubble>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Map(MapSpec),
    Bar(BarSpec),
    Bubble(BubbleSpec),
}

impl From<MapSpec> for ChartSpec {
    fn from(s: MapSpec) -> Self {
        ChartSpec::Map(s)
    }
}

impl From<BarSpec> for ChartSpec {
    fn from(s: BarSpec) -> Self {
        ChartSpec::Bar(s)
    }
}

impl From<BubbleSpec> for ChartSpec {
    fn from(s: BubbleSpec) -> Self {
        ChartSpec::Bubble(s)
    }
}

fn population_domain<'a>(pops: impl Iterator<Item = &'a u64>) -> (f64, f64) {
    pops.fold(None, |acc: Option<(u64, u64)>, &p| match acc {
        None => Some((p, p)),
        Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
    })
    .map(|(lo, hi)| (lo as f64, hi as f64))
    .unwrap_or((0.0, 0.0))
}

/// Choropleth of population over every record that has a boundary.
///
/// Records whose `country_code` is missing from `boundaries` are left out and
/// counted in [`MapSpec::unmatched`].
pub fn build_world_map(
    records: &[Record],
    boundaries: &Boundaries,
    center_lat: f64,
    center_lon: f64,
) -> MapSpec {
    let mut regions = BTreeMap::new();
    let mut joined: Vec<&Record> = Vec::with_capacity(records.len());
    let mut unmatched = 0usize;
    for r in records {
        match boundaries.get(&r.country_code) {
            Some(b) => {
                regions
                    .entry(r.country_code.clone())
                    .or_insert_with(|| b.geometry.clone());
                joined.push(r);
            }
            None => {
                debug!("no boundary for {} ({})", r.country, r.country_code);
                unmatched += 1;
            }
        }
    }

    let color_scale = ColorScale::Sunsetdark;
    let color_domain = population_domain(joined.iter().map(|r| &r.population));
    let features = joined
        .into_iter()
        .map(|r| MapFeature {
            country: r.country.clone(),
            country_code: r.country_code.clone(),
            year: r.year,
            population: r.population,
            color: color_scale.for_value(r.population as f64, color_domain.0, color_domain.1),
        })
        .collect();

    MapSpec {
        title: "World map".into(),
        legend_title: "Population".into(),
        color_scale,
        color_domain,
        center: GeoPoint {
            lat: center_lat,
            lon: center_lon,
        },
        zoom: MAP_ZOOM,
        opacity: MAP_OPACITY,
        width: MAP_WIDTH,
        height: MAP_HEIGHT,
        features,
        regions,
        unmatched,
    }
}

/// Bar chart of a top-N result, colored with the default scale.
pub fn build_bar_chart(top_n: &[Record]) -> BarSpec {
    build_bar_chart_with_scale(top_n, ColorScale::default())
}

/// Bar chart of a top-N result. Bars keep the input order.
pub fn build_bar_chart_with_scale(top_n: &[Record], color_scale: ColorScale) -> BarSpec {
    let color_domain = population_domain(top_n.iter().map(|r| &r.population));
    let bars = top_n
        .iter()
        .map(|r| Bar {
            country: r.country.clone(),
            population: r.population,
            color: color_scale.for_value(r.population as f64, color_domain.0, color_domain.1),
        })
        .collect();
    let title = match top_n.first() {
        Some(first) => format!(
            "Top {} most populous countries in {}",
            top_n.len(),
            first.year
        ),
        None => "Most populous countries".to_string(),
    };
    BarSpec {
        title,
        x_title: "Countries".into(),
        y_title: "Population".into(),
        legend_title: "Population".into(),
        color_scale,
        color_domain,
        show_values: true,
        bars,
    }
}

/// Life expectancy (x) against GDP per capita (log y) for one continent and year.
pub fn build_bubble_chart(records: &[Record], continent: Continent, year: i32) -> BubbleSpec {
    let subset: Vec<&Record> = stats::select(records, continent, year).collect();
    let max_pop = subset.iter().map(|r| r.population).max().unwrap_or(0);

    let mut colors: AHashMap<&str, Rgb> = AHashMap::new();
    let bubbles = subset
        .iter()
        .map(|r| {
            let next = colors.len();
            let color = *colors.entry(r.country.as_str()).or_insert_with(|| set1(next));
            let diameter = if max_pop == 0 {
                0.0
            } else {
                BUBBLE_SIZE_MAX * (r.population as f64 / max_pop as f64).sqrt()
            };
            Bubble {
                country: r.country.clone(),
                life_expectancy: r.life_expectancy,
                gdp_per_capita: r.gdp_per_capita,
                population: r.population,
                diameter,
                color,
            }
        })
        .collect();

    BubbleSpec {
        title: "Life expectancy vs GDP per capita".into(),
        x_title: "Life expectancy".into(),
        y_title: "GDP per capita".into(),
        legend_title: "Countries".into(),
        x_range: BUBBLE_X_RANGE,
        log_y: true,
        size_max: BUBBLE_SIZE_MAX,
        bubbles,
    }
}

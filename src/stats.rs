//! Aggregations behind the dashboard panels.
//!
//! All functions are pure scans over a record slice; none of them mutate it.

use crate::error::{DashError, Result};
use crate::models::{Continent, ContinentExtrema, GlobalSummary, Metric, Record};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Records of one continent in one year, in input order.
pub fn select(
    records: &[Record],
    continent: Continent,
    year: i32,
) -> impl Iterator<Item = &Record> {
    records
        .iter()
        .filter(move |r| r.continent == continent && r.year == year)
}

/// The `n` most populous countries of `continent` in `year`.
///
/// Sorted by population descending; equal populations are ordered by country name.
/// Empty when nothing matches.
pub fn top_n_populous(records: &[Record], continent: Continent, year: i32, n: usize) -> Vec<Record> {
    let mut hits: Vec<&Record> = select(records, continent, year).collect();
    hits.sort_by(|a, b| {
        b.population
            .cmp(&a.population)
            .then_with(|| a.country.cmp(&b.country))
    });
    hits.into_iter().take(n).cloned().collect()
}

/// All-time extrema of a continent: every year in `records` takes part.
pub fn continent_extrema(records: &[Record], continent: Continent) -> Result<ContinentExtrema> {
    let subset: Vec<&Record> = records.iter().filter(|r| r.continent == continent).collect();
    extrema_of(&subset, continent, None)
}

/// Extrema of a continent restricted to one year.
pub fn continent_extrema_in_year(
    records: &[Record],
    continent: Continent,
    year: i32,
) -> Result<ContinentExtrema> {
    let subset: Vec<&Record> = select(records, continent, year).collect();
    extrema_of(&subset, continent, Some(year))
}

/// World population in `year`, plus country/continent counts over the whole table.
pub fn global_summary(records: &[Record], year: i32) -> GlobalSummary {
    let population = records
        .iter()
        .filter(|r| r.year == year)
        .map(|r| r.population)
        .sum();
    let countries: BTreeSet<&str> = records.iter().map(|r| r.country.as_str()).collect();
    let continents: BTreeSet<Continent> = records.iter().map(|r| r.continent).collect();
    GlobalSummary {
        year,
        population,
        countries: countries.len(),
        continents: continents.len(),
    }
}

fn extrema_of(
    subset: &[&Record],
    continent: Continent,
    year: Option<i32>,
) -> Result<ContinentExtrema> {
    let empty = || DashError::EmptySelection { continent, year };
    let pick = |metric: Metric, want: Ordering| -> Result<String> {
        arg_extreme(subset, metric, want)
            .map(|r| r.country.clone())
            .ok_or_else(empty)
    };
    Ok(ContinentExtrema {
        continent,
        year,
        most_populous: pick(Metric::Population, Ordering::Greater)?,
        highest_life_expectancy: pick(Metric::LifeExpectancy, Ordering::Greater)?,
        highest_gdp_per_capita: pick(Metric::GdpPerCapita, Ordering::Greater)?,
        least_populous: pick(Metric::Population, Ordering::Less)?,
        lowest_life_expectancy: pick(Metric::LifeExpectancy, Ordering::Less)?,
        lowest_gdp_per_capita: pick(Metric::GdpPerCapita, Ordering::Less)?,
    })
}

/// First record whose metric beats every other in direction `want`.
/// Ties keep the earlier record, so the result follows dataset order.
fn arg_extreme<'a>(subset: &[&'a Record], metric: Metric, want: Ordering) -> Option<&'a Record> {
    subset.iter().copied().reduce(|best, r| {
        if metric.value(r).total_cmp(&metric.value(best)) == want {
            r
        } else {
            best
        }
    })
}

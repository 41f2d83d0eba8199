//! The in-memory demographic table.
//!
//! A [`Dataset`] is built once (from the bundled Gapminder snapshot or a CSV with the
//! same header), validated, and then shared read-only. Cloning is cheap: the records
//! live behind an `Arc`.

use crate::error::{DashError, Result};
use crate::models::{Continent, Record};
use crate::stats;
use csv::ReaderBuilder;
use log::{debug, info};
use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

/// Gapminder table (142 countries, every fifth year 1952 to 2007), embedded at compile time.
const BUNDLED_CSV: &str = include_str!("../data/gapminder.csv");

#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[Record]>,
}

impl Dataset {
    /// Validate and freeze a set of records.
    ///
    /// Records are sorted by (country, year). Fails on a repeated (country, year)
    /// pair, a non-positive or non-finite life expectancy / GDP per capita, or a
    /// country code that is not three ASCII letters.
    pub fn new(mut records: Vec<Record>) -> Result<Self> {
        for r in &records {
            validate(r)?;
        }
        records.sort_by(|a, b| a.country.cmp(&b.country).then(a.year.cmp(&b.year)));
        if let Some(pair) = records
            .windows(2)
            .find(|w| w[0].country == w[1].country && w[0].year == w[1].year)
        {
            return Err(DashError::DuplicateRecord {
                country: pair[0].country.clone(),
                year: pair[0].year,
            });
        }
        debug!("dataset validated: {} records", records.len());
        Ok(Self {
            records: records.into(),
        })
    }

    /// The Gapminder snapshot shipped with the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_csv_reader(BUNDLED_CSV.as_bytes())
    }

    /// Parse a Gapminder-style CSV (`country,continent,year,lifeExp,pop,gdpPercap,iso_alpha,iso_num`).
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let records = rdr
            .deserialize::<Record>()
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Self::new(records)
    }

    /// Load a CSV file. Absent or unparsable files are reported as
    /// [`DashError::MissingResource`].
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let missing = |reason: String| DashError::MissingResource {
            path: path.to_path_buf(),
            reason,
        };
        let file = std::fs::File::open(path).map_err(|e| missing(e.to_string()))?;
        let ds = Self::from_csv_reader(file).map_err(|e| match e {
            DashError::Csv(e) => missing(e.to_string()),
            other => other,
        })?;
        info!("loaded {} records from {}", ds.len(), path.display());
        Ok(ds)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct continents, in enum order.
    pub fn continents(&self) -> Vec<Continent> {
        let set: BTreeSet<Continent> = self.records.iter().map(|r| r.continent).collect();
        set.into_iter().collect()
    }

    /// Distinct years, ascending.
    pub fn years(&self) -> Vec<i32> {
        let set: BTreeSet<i32> = self.records.iter().map(|r| r.year).collect();
        set.into_iter().collect()
    }

    pub fn latest_year(&self) -> Option<i32> {
        self.records.iter().map(|r| r.year).max()
    }

    /// Distinct country names, sorted.
    pub fn countries(&self) -> Vec<&str> {
        let set: BTreeSet<&str> = self.records.iter().map(|r| r.country.as_str()).collect();
        set.into_iter().collect()
    }

    /// Records of one continent in one year, in dataset order.
    pub fn filter(&self, continent: Continent, year: i32) -> Vec<&Record> {
        stats::select(&self.records, continent, year).collect()
    }
}

impl AsRef<[Record]> for Dataset {
    fn as_ref(&self) -> &[Record] {
        self.records()
    }
}

fn validate(r: &Record) -> Result<()> {
    let invalid = |reason: &str| DashError::InvalidRecord {
        country: r.country.clone(),
        year: r.year,
        reason: reason.to_string(),
    };
    if r.country.trim().is_empty() {
        return Err(invalid("empty country name"));
    }
    if !(r.life_expectancy.is_finite() && r.life_expectancy > 0.0) {
        return Err(invalid("life expectancy must be a positive number"));
    }
    if !(r.gdp_per_capita.is_finite() && r.gdp_per_capita > 0.0) {
        return Err(invalid("GDP per capita must be a positive number"));
    }
    if r.country_code.len() != 3 || !r.country_code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(invalid("country code must be three ASCII letters"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_table_loads_and_is_sorted() {
        let ds = Dataset::bundled().unwrap();
        assert_eq!(ds.len(), 1704);
        assert_eq!(ds.years(), (1952..=2007).step_by(5).collect::<Vec<_>>());
        assert_eq!(ds.continents().len(), 5);
        assert_eq!(ds.countries().len(), 142);
        assert_eq!(ds.latest_year(), Some(2007));
        let first = &ds.records()[0];
        assert_eq!((first.country.as_str(), first.year), ("Afghanistan", 1952));
    }

    #[test]
    fn quoted_country_names_survive_parsing() {
        let ds = Dataset::bundled().unwrap();
        assert!(ds.countries().contains(&"Congo, Dem. Rep."));
        assert!(ds.countries().contains(&"Cote d'Ivoire"));
    }

    #[test]
    fn every_country_has_every_year() {
        let ds = Dataset::bundled().unwrap();
        let years = ds.years().len();
        for country in ds.countries() {
            let n = ds.records().iter().filter(|r| r.country == country).count();
            assert_eq!(n, years, "{country}");
        }
    }

    #[test]
    fn filter_matches_the_stats_selection() {
        let ds = Dataset::bundled().unwrap();
        let picked = ds.filter(Continent::Africa, 1992);
        assert_eq!(picked.len(), 52);
        assert!(picked.iter().all(|r| r.continent == Continent::Africa && r.year == 1992));
        assert!(picked.windows(2).all(|w| w[0].country < w[1].country));
    }
}

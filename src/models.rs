use crate::error::DashError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Continents present in the Gapminder table.
///
/// Deserializes through [`FromStr`], so `africa` in a CSV cell is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Continent {
    Africa,
    Americas,
    Asia,
    Europe,
    Oceania,
}

impl Continent {
    pub const ALL: [Continent; 5] = [
        Continent::Africa,
        Continent::Americas,
        Continent::Asia,
        Continent::Europe,
        Continent::Oceania,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Continent::Africa => "Africa",
            Continent::Americas => "Americas",
            Continent::Asia => "Asia",
            Continent::Europe => "Europe",
            Continent::Oceania => "Oceania",
        }
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive; surrounding whitespace is ignored.
impl FromStr for Continent {
    type Err = DashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Continent::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DashError::UnknownContinent(s.to_string()))
    }
}

impl TryFrom<String> for Continent {
    type Error = DashError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// One (country, year) observation.
///
/// Field names (de)serialize to the Gapminder column names, so a CSV written by
/// [`crate::storage::save_csv`] can be loaded back as a dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub country: String,
    pub continent: Continent,
    pub year: i32,
    #[serde(rename = "lifeExp")]
    pub life_expectancy: f64,
    #[serde(rename = "pop")]
    pub population: u64,
    #[serde(rename = "gdpPercap")]
    pub gdp_per_capita: f64,
    #[serde(rename = "iso_alpha")]
    pub country_code: String,
    pub iso_num: u16,
}

/// Numeric columns a record can be ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    Population,
    LifeExpectancy,
    GdpPerCapita,
}

impl Metric {
    pub const ALL: [Metric; 3] = [
        Metric::Population,
        Metric::LifeExpectancy,
        Metric::GdpPerCapita,
    ];

    pub fn value(&self, r: &Record) -> f64 {
        match self {
            Metric::Population => r.population as f64,
            Metric::LifeExpectancy => r.life_expectancy,
            Metric::GdpPerCapita => r.gdp_per_capita,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Population => "Population",
            Metric::LifeExpectancy => "Life expectancy",
            Metric::GdpPerCapita => "GDP per capita",
        }
    }
}

/// Countries achieving the max/min of each metric within a continent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContinentExtrema {
    pub continent: Continent,
    pub year: Option<i32>,
    pub most_populous: String,
    pub highest_life_expectancy: String,
    pub highest_gdp_per_capita: String,
    pub least_populous: String,
    pub lowest_life_expectancy: String,
    pub lowest_gdp_per_capita: String,
}

impl ContinentExtrema {
    /// `(max, min)` country names for one metric.
    pub fn by_metric(&self, metric: Metric) -> (&str, &str) {
        match metric {
            Metric::Population => (&self.most_populous, &self.least_populous),
            Metric::LifeExpectancy => (
                &self.highest_life_expectancy,
                &self.lowest_life_expectancy,
            ),
            Metric::GdpPerCapita => (&self.highest_gdp_per_capita, &self.lowest_gdp_per_capita),
        }
    }
}

/// Headline metrics shown next to the world map.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GlobalSummary {
    pub year: i32,
    pub population: u64,
    pub countries: usize,
    pub continents: usize,
}

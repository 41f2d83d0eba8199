use crate::charts::ChartSpec;
use crate::error::Result;
use crate::models::Record;
use csv::WriterBuilder;
use std::borrow::Cow;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Prefix cells that a spreadsheet would evaluate as a formula.
fn guard_cell(s: &str) -> Cow<'_, str> {
    if s.starts_with(['=', '+', '-', '@']) {
        Cow::Owned(format!("'{s}"))
    } else {
        Cow::Borrowed(s)
    }
}

/// Save records as CSV with the Gapminder header, so the file loads back as a dataset.
pub fn save_csv<P: AsRef<Path>>(records: &[Record], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.write_record([
        "country",
        "continent",
        "year",
        "lifeExp",
        "pop",
        "gdpPercap",
        "iso_alpha",
        "iso_num",
    ])?;
    for r in records {
        wtr.serialize((
            guard_cell(&r.country),
            r.continent.as_str(),
            r.year,
            r.life_expectancy,
            r.population,
            r.gdp_per_capita,
            guard_cell(&r.country_code),
            r.iso_num,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save records as a pretty JSON array.
pub fn save_json<P: AsRef<Path>>(records: &[Record], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(records)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Save a chart specification as pretty JSON.
pub fn save_spec_json<P: AsRef<Path>>(spec: &ChartSpec, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(spec)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

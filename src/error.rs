//! Error type for the library.
//!
//! Library functions return [`DashError`]; the binaries wrap it in `anyhow` with context.

use crate::models::Continent;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashError {
    /// Boundary or dataset file absent or unparsable. Fatal at startup.
    #[error("cannot load {}: {reason}", path.display())]
    MissingResource { path: PathBuf, reason: String },

    /// A filter matched no records where at least one is required.
    #[error("no data for continent {continent}{}", year.map(|y| format!(" in {y}")).unwrap_or_default())]
    EmptySelection {
        continent: Continent,
        year: Option<i32>,
    },

    #[error("invalid record for {country} ({year}): {reason}")]
    InvalidRecord {
        country: String,
        year: i32,
        reason: String,
    },

    #[error("duplicate record for {country} in {year}")]
    DuplicateRecord { country: String, year: i32 },

    #[error("unknown continent: {0}")]
    UnknownContinent(String),

    #[error("unknown color scale: {0}")]
    UnknownColorScale(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = DashError> = std::result::Result<T, E>;

//! world_dash
//!
//! Computations behind a small Gapminder dashboard: per-continent rankings and
//! extrema, global summary metrics, and declarative chart specs (choropleth world
//! map, bar chart, bubble chart) that can be rendered to SVG/PNG or exported as
//! JSON. Pairs with the `wdash` CLI and the `wdash-gui` desktop window.
//!
//! ### Features
//! - Bundled Gapminder snapshot, or any CSV with the same header
//! - Top-N most populous countries, continent extrema, world totals
//! - Map/bar/bubble chart specs with fixed visual encodings
//! - SVG/PNG rendering with locale-aware number labels
//!
//! ### Example
//! ```no_run
//! use world_dash::{Continent, Dataset, charts, stats, viz};
//!
//! let data = Dataset::bundled()?;
//! let top = stats::top_n_populous(data.records(), Continent::Asia, 2007, 5);
//! let spec = charts::build_bar_chart(&top);
//! viz::render_chart(&spec.into(), "top5.svg", &viz::RenderOptions::default())?;
//! let summary = stats::global_summary(data.records(), 2007);
//! println!("{:#?}", summary);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod charts;
pub mod dataset;
pub mod error;
pub mod geo;
pub mod models;
pub mod palette;
pub mod stats;
pub mod storage;
pub mod viz;

pub use charts::ChartSpec;
pub use dataset::Dataset;
pub use error::DashError;
pub use geo::Boundaries;
pub use models::{Continent, ContinentExtrema, GlobalSummary, Metric, Record};
pub use palette::ColorScale;

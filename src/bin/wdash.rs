use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use std::path::{Path, PathBuf};
use world_dash::viz::util::format_count;
use world_dash::viz::{self, RenderOptions};
use world_dash::{Boundaries, ChartSpec, ColorScale, Continent, Dataset, Metric, Record};
use world_dash::{charts, stats, storage};

#[derive(Parser, Debug)]
#[command(
    name = "wdash",
    version,
    about = "Rank, summarize & chart the Gapminder dataset by continent"
)]
struct Cli {
    /// Load records from this CSV instead of the bundled snapshot.
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    /// Locale for number formatting (en, de, fr, es, it, pt, nl).
    #[arg(long, global = true, default_value = "en")]
    locale: String,
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// World population, number of countries and continents.
    Summary(YearArg),
    /// The most populous countries of a continent.
    Top(TopArgs),
    /// Countries with the highest/lowest population, life expectancy and GDP per capita.
    Extrema(ExtremaArgs),
    /// Render the population choropleth.
    Map(MapArgs),
    /// Render the top-N bar chart.
    Bar(BarArgs),
    /// Render life expectancy vs GDP per capita for one continent.
    Bubble(BubbleArgs),
    /// Save (a selection of) the records as CSV or JSON.
    Export(ExportArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct YearArg {
    /// Year (defaults to the latest year in the data).
    #[arg(short, long)]
    year: Option<i32>,
}

#[derive(Args, Debug)]
struct TopArgs {
    /// Continent (Africa, Americas, Asia, Europe, Oceania).
    #[arg(short, long)]
    continent: Continent,
    #[command(flatten)]
    year: YearArg,
    /// How many countries to list.
    #[arg(short, default_value_t = 5)]
    n: usize,
}

#[derive(Args, Debug)]
struct ExtremaArgs {
    #[arg(short, long)]
    continent: Continent,
    /// Restrict to one year; all years take part when omitted.
    #[arg(short, long)]
    year: Option<i32>,
}

#[derive(Args, Debug)]
struct MapArgs {
    /// GeoJSON FeatureCollection keyed by ISO alpha-3 code.
    #[arg(long)]
    boundaries: PathBuf,
    /// Output image (.svg or .png).
    #[arg(long)]
    out: PathBuf,
    #[arg(long, default_value_t = 20.0, allow_negative_numbers = true)]
    lat: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    lon: f64,
    /// Also write the chart spec as JSON.
    #[arg(long)]
    spec_json: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct BarArgs {
    #[command(flatten)]
    top: TopArgs,
    /// Sequential color scale (sunsetdark, viridis, blues, reds).
    #[arg(long, default_value_t = ColorScale::Sunsetdark)]
    scale: ColorScale,
    #[arg(long)]
    out: PathBuf,
    #[arg(long)]
    spec_json: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct BubbleArgs {
    #[arg(short, long)]
    continent: Continent,
    #[command(flatten)]
    year: YearArg,
    #[arg(long)]
    out: PathBuf,
    #[arg(long)]
    spec_json: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[arg(long)]
    out: PathBuf,
    /// Output format. If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    #[arg(short, long)]
    continent: Option<Continent>,
    #[arg(short, long)]
    year: Option<i32>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let data = match cli.data.as_ref() {
        Some(path) => Dataset::from_csv_path(path)?,
        None => Dataset::bundled().context("loading bundled dataset")?,
    };
    let locale = cli.locale.as_str();
    match cli.cmd {
        Command::Summary(args) => cmd_summary(&data, args, locale),
        Command::Top(args) => cmd_top(&data, args, locale),
        Command::Extrema(args) => cmd_extrema(&data, args),
        Command::Map(args) => cmd_map(&data, args, locale),
        Command::Bar(args) => cmd_bar(&data, args, locale),
        Command::Bubble(args) => cmd_bubble(&data, args, locale),
        Command::Export(args) => cmd_export(&data, args),
    }
}

fn resolve_year(data: &Dataset, year: Option<i32>) -> Result<i32> {
    year.or_else(|| data.latest_year())
        .ok_or_else(|| anyhow::anyhow!("dataset is empty"))
}

fn cmd_summary(data: &Dataset, args: YearArg, locale: &str) -> Result<()> {
    let year = resolve_year(data, args.year)?;
    let s = stats::global_summary(data.records(), year);
    println!("Population ({}): {}", s.year, format_count(s.population, locale));
    println!("Countries:  {}", s.countries);
    println!("Continents: {}", s.continents);
    Ok(())
}

fn cmd_top(data: &Dataset, args: TopArgs, locale: &str) -> Result<()> {
    let year = resolve_year(data, args.year.year)?;
    let top = stats::top_n_populous(data.records(), args.continent, year, args.n);
    if top.is_empty() {
        eprintln!("No records for {} in {}", args.continent, year);
    }
    for (rank, r) in top.iter().enumerate() {
        println!(
            "{:>2}. {:<28} {:>15}",
            rank + 1,
            r.country,
            format_count(r.population, locale)
        );
    }
    Ok(())
}

fn cmd_extrema(data: &Dataset, args: ExtremaArgs) -> Result<()> {
    let ex = match args.year {
        Some(year) => stats::continent_extrema_in_year(data.records(), args.continent, year)?,
        None => stats::continent_extrema(data.records(), args.continent)?,
    };
    for metric in Metric::ALL {
        let (max, min) = ex.by_metric(metric);
        println!("{:<16} highest: {:<24} lowest: {}", metric.label(), max, min);
    }
    Ok(())
}

fn write_spec(spec: &ChartSpec, out: &Path, spec_json: Option<&Path>, locale: &str) -> Result<()> {
    let opts = RenderOptions::for_spec(spec).with_locale(locale);
    viz::render_chart(spec, out, &opts)
        .with_context(|| format!("rendering {}", out.display()))?;
    eprintln!("Wrote chart to {}", out.display());
    if let Some(path) = spec_json {
        storage::save_spec_json(spec, path)?;
        eprintln!("Wrote spec to {}", path.display());
    }
    Ok(())
}

fn cmd_map(data: &Dataset, args: MapArgs, locale: &str) -> Result<()> {
    let boundaries = Boundaries::from_path(&args.boundaries)?;
    let spec = charts::build_world_map(data.records(), &boundaries, args.lat, args.lon);
    if spec.unmatched > 0 {
        eprintln!("{} records had no boundary and were left out", spec.unmatched);
    }
    write_spec(&spec.into(), &args.out, args.spec_json.as_deref(), locale)
}

fn cmd_bar(data: &Dataset, args: BarArgs, locale: &str) -> Result<()> {
    let year = resolve_year(data, args.top.year.year)?;
    let top = stats::top_n_populous(data.records(), args.top.continent, year, args.top.n);
    let spec = charts::build_bar_chart_with_scale(&top, args.scale);
    write_spec(&spec.into(), &args.out, args.spec_json.as_deref(), locale)
}

fn cmd_bubble(data: &Dataset, args: BubbleArgs, locale: &str) -> Result<()> {
    let year = resolve_year(data, args.year.year)?;
    let spec = charts::build_bubble_chart(data.records(), args.continent, year);
    write_spec(&spec.into(), &args.out, args.spec_json.as_deref(), locale)
}

fn cmd_export(data: &Dataset, args: ExportArgs) -> Result<()> {
    let rows: Vec<Record> = data
        .records()
        .iter()
        .filter(|r| args.continent.is_none_or(|c| r.continent == c))
        .filter(|r| args.year.is_none_or(|y| r.year == y))
        .cloned()
        .collect();

    let fmt = match args.format {
        Some(OutFormat::Csv) => "csv",
        Some(OutFormat::Json) => "json",
        None => args.out.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
    }
    .to_ascii_lowercase();
    match fmt.as_str() {
        "csv" => storage::save_csv(&rows, &args.out)?,
        "json" => storage::save_json(&rows, &args.out)?,
        other => anyhow::bail!("unsupported format: {}", other),
    }
    eprintln!("Saved {} rows to {}", rows.len(), args.out.display());
    Ok(())
}

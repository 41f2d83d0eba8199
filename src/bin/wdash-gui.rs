/*!
 * Desktop dashboard for world-dash
 *
 * A cross-platform window over the bundled Gapminder snapshot:
 * - Continent and year selection
 * - World map trigger with the global headline metrics
 * - Top-5 table and extrema for the selected continent
 * - Chart export (PNG/SVG) to a chosen folder
 *
 * Platform support: Windows, macOS, Linux
 */

use anyhow::Result;
use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use world_dash::viz::util::format_count;
use world_dash::viz::{self, RenderOptions};
use world_dash::{Boundaries, ChartSpec, Continent, ContinentExtrema, Dataset, GlobalSummary, Metric, Record};
use world_dash::{charts, stats};

const TOP_N: usize = 5;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let data = match Dataset::bundled() {
        Ok(data) => data,
        Err(err) => {
            log::error!("cannot load bundled dataset: {err}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 680.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Gapminder dashboard - world-dash"),
        ..Default::default()
    };

    eframe::run_native(
        "Gapminder dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(DashApp::new(data)))),
    )
}

/// Main application state
struct DashApp {
    data: Dataset,
    years: Vec<i32>,

    // Selection
    continent: Continent,
    year: i32,
    show_world: bool,

    // Derived views, refreshed when the selection changes
    summary: GlobalSummary,
    top: Vec<Record>,
    extrema: Option<ContinentExtrema>,

    // Export options
    output_path: String,
    boundaries_path: String,
    plot_format: PlotFormat,
    locale: String,

    // UI state
    is_loading: bool,
    status_message: String,
    error_message: String,

    // Background operation
    operation_receiver: Option<mpsc::Receiver<OperationResult>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PlotFormat {
    Png,
    Svg,
}

impl PlotFormat {
    fn extension(self) -> &'static str {
        match self {
            PlotFormat::Png => "png",
            PlotFormat::Svg => "svg",
        }
    }
}

#[derive(Debug)]
enum OperationResult {
    Success(String),
    Error(String),
}

impl DashApp {
    fn new(data: Dataset) -> Self {
        // Default to user's home directory for output
        let home_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .to_string_lossy()
            .to_string();
        let years = data.years();
        let year = data.latest_year().unwrap_or_default();
        let continent = Continent::Asia;

        let mut app = Self {
            summary: stats::global_summary(data.records(), year),
            data,
            years,
            continent,
            year,
            show_world: false,
            top: Vec::new(),
            extrema: None,
            output_path: home_dir,
            boundaries_path: String::new(),
            plot_format: PlotFormat::Png,
            locale: "en".to_string(),
            is_loading: false,
            status_message: String::new(),
            error_message: String::new(),
            operation_receiver: None,
        };
        app.refresh();
        app
    }

    fn refresh(&mut self) {
        let records = self.data.records();
        self.summary = stats::global_summary(records, self.year);
        self.top = stats::top_n_populous(records, self.continent, self.year, TOP_N);
        self.extrema = match stats::continent_extrema(records, self.continent) {
            Ok(ex) => Some(ex),
            Err(err) => {
                log::warn!("{err}");
                None
            }
        };
    }

    fn validate_inputs(&self) -> Result<()> {
        if self.output_path.trim().is_empty() {
            anyhow::bail!("Please specify an output directory");
        }
        Ok(())
    }

    fn start_export(&mut self) {
        if let Err(err) = self.validate_inputs() {
            self.error_message = format!("Validation error: {}", err);
            return;
        }

        self.is_loading = true;
        self.error_message.clear();
        self.status_message = "Rendering charts...".to_string();

        let (sender, receiver) = mpsc::channel();
        self.operation_receiver = Some(receiver);

        let config = ExportConfig {
            data: self.data.clone(),
            continent: self.continent,
            year: self.year,
            output_dir: PathBuf::from(&self.output_path),
            boundaries: (!self.boundaries_path.trim().is_empty())
                .then(|| PathBuf::from(self.boundaries_path.trim())),
            format: self.plot_format,
            locale: self.locale.clone(),
        };

        thread::spawn(move || {
            let _ = sender.send(perform_export(config));
        });
    }

    fn check_operation_result(&mut self) {
        if let Some(receiver) = &self.operation_receiver
            && let Ok(result) = receiver.try_recv()
        {
            self.is_loading = false;
            self.operation_receiver = None;

            match result {
                OperationResult::Success(message) => {
                    self.status_message = message;
                    self.error_message.clear();
                }
                OperationResult::Error(error) => {
                    self.error_message = error;
                    self.status_message.clear();
                }
            }
        }
    }

    fn selection_ui(&mut self, ui: &mut egui::Ui) {
        let before = (self.continent, self.year);
        ui.horizontal(|ui| {
            ui.label("Continent:");
            egui::ComboBox::from_id_salt("continent")
                .selected_text(self.continent.as_str())
                .show_ui(ui, |ui| {
                    for c in self.data.continents() {
                        ui.selectable_value(&mut self.continent, c, c.as_str());
                    }
                });

            ui.label("Year:");
            egui::ComboBox::from_id_salt("year")
                .selected_text(self.year.to_string())
                .show_ui(ui, |ui| {
                    for y in &self.years {
                        ui.selectable_value(&mut self.year, *y, y.to_string());
                    }
                });

            if ui.button("World map").clicked() {
                self.show_world = !self.show_world;
            }
        });
        if before != (self.continent, self.year) {
            self.refresh();
        }
    }

    fn world_ui(&self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.label(format!("World in {}", self.summary.year));
            ui.add_space(5.0);
            egui::Grid::new("world_metrics").striped(true).show(ui, |ui| {
                ui.label("Population");
                ui.label(format_count(self.summary.population, &self.locale));
                ui.end_row();
                ui.label("Countries");
                ui.label(self.summary.countries.to_string());
                ui.end_row();
                ui.label("Continents");
                ui.label(self.summary.continents.to_string());
                ui.end_row();
            });
        });
    }

    fn continent_ui(&self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.label(format!(
                "Top {} most populous countries in {} ({})",
                TOP_N, self.continent, self.year
            ));
            ui.add_space(5.0);
            if self.top.is_empty() {
                ui.label("No data for this selection.");
            }
            egui::Grid::new("top_table").striped(true).show(ui, |ui| {
                for (rank, r) in self.top.iter().enumerate() {
                    ui.label(format!("{}.", rank + 1));
                    ui.label(&r.country);
                    ui.label(format_count(r.population, &self.locale));
                    ui.end_row();
                }
            });
        });

        ui.add_space(10.0);

        ui.group(|ui| {
            ui.label(format!("Extrema in {} (all years)", self.continent));
            ui.add_space(5.0);
            match &self.extrema {
                Some(ex) => {
                    egui::Grid::new("extrema").striped(true).show(ui, |ui| {
                        ui.label("");
                        ui.label("Highest");
                        ui.label("Lowest");
                        ui.end_row();
                        for metric in Metric::ALL {
                            let (max, min) = ex.by_metric(metric);
                            ui.label(metric.label());
                            ui.label(max);
                            ui.label(min);
                            ui.end_row();
                        }
                    });
                }
                None => {
                    ui.label("No data for this continent.");
                }
            }
        });
    }
}

impl eframe::App for DashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed background operations
        self.check_operation_result();

        // Request repaint if loading (for spinner animation)
        if self.is_loading {
            ctx.request_repaint();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Gapminder Dashboard");
                ui.add_space(10.0);

                self.selection_ui(ui);
                ui.add_space(10.0);

                if self.show_world {
                    self.world_ui(ui);
                    ui.add_space(10.0);
                }
                self.continent_ui(ui);

                ui.add_space(10.0);

                ui.collapsing("Export Charts", |ui| {
                    ui.horizontal(|ui| {
                        ui.label("Output path:");
                        ui.text_edit_singleline(&mut self.output_path);
                        if ui.button("Browse").clicked()
                            && let Some(path) = rfd::FileDialog::new().pick_folder()
                        {
                            self.output_path = path.to_string_lossy().to_string();
                        }
                    });

                    ui.horizontal(|ui| {
                        ui.label("Boundaries:");
                        ui.text_edit_singleline(&mut self.boundaries_path)
                            .on_hover_text("Optional GeoJSON file; enables the world map export");
                        if ui.button("Browse").clicked()
                            && let Some(path) = rfd::FileDialog::new()
                                .add_filter("GeoJSON", &["json", "geojson"])
                                .pick_file()
                        {
                            self.boundaries_path = path.to_string_lossy().to_string();
                        }
                    });

                    ui.horizontal(|ui| {
                        ui.label("Chart format:");
                        ui.radio_value(&mut self.plot_format, PlotFormat::Png, "PNG");
                        ui.radio_value(&mut self.plot_format, PlotFormat::Svg, "SVG");
                    });

                    ui.horizontal(|ui| {
                        ui.label("Locale:");
                        egui::ComboBox::from_id_salt("locale")
                            .selected_text(&self.locale)
                            .show_ui(ui, |ui| {
                                ui.selectable_value(&mut self.locale, "en".to_string(), "English (en)");
                                ui.selectable_value(&mut self.locale, "de".to_string(), "German (de)");
                                ui.selectable_value(&mut self.locale, "fr".to_string(), "French (fr)");
                                ui.selectable_value(&mut self.locale, "es".to_string(), "Spanish (es)");
                                ui.selectable_value(&mut self.locale, "it".to_string(), "Italian (it)");
                            });
                    });

                    ui.add_space(5.0);
                    ui.horizontal(|ui| {
                        if ui.add_enabled(!self.is_loading, egui::Button::new("Export")).clicked() {
                            self.start_export();
                        }

                        if self.is_loading {
                            ui.spinner();
                            ui.label("Processing...");
                        }
                    });
                });

                ui.add_space(10.0);

                // Status messages
                if !self.status_message.is_empty() {
                    ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
                }

                if !self.error_message.is_empty() {
                    ui.colored_label(egui::Color32::RED, &self.error_message);
                }
            });
        });
    }
}

#[derive(Debug)]
struct ExportConfig {
    data: Dataset,
    continent: Continent,
    year: i32,
    output_dir: PathBuf,
    boundaries: Option<PathBuf>,
    format: PlotFormat,
    locale: String,
}

fn perform_export(config: ExportConfig) -> OperationResult {
    let records = config.data.records();
    let mut specs: Vec<(String, ChartSpec)> = Vec::new();

    if let Some(path) = &config.boundaries {
        let boundaries = match Boundaries::from_path(path) {
            Ok(b) => b,
            Err(err) => return OperationResult::Error(format!("Failed to load boundaries: {}", err)),
        };
        let spec = charts::build_world_map(records, &boundaries, 20.0, 0.0);
        specs.push(("wdash_map".into(), spec.into()));
    }

    let top = stats::top_n_populous(records, config.continent, config.year, TOP_N);
    specs.push(("wdash_top".into(), charts::build_bar_chart(&top).into()));
    specs.push((
        "wdash_bubble".into(),
        charts::build_bubble_chart(records, config.continent, config.year).into(),
    ));

    let mut output_files = Vec::new();
    for (stem, spec) in &specs {
        let path = config
            .output_dir
            .join(format!("{}.{}", stem, config.format.extension()));
        let opts = RenderOptions::for_spec(spec).with_locale(&config.locale);
        if let Err(err) = viz::render_chart(spec, &path, &opts) {
            return OperationResult::Error(format!("Failed to create chart: {}", err));
        }
        output_files.push(path.to_string_lossy().to_string());
    }

    OperationResult::Success(format!(
        "Exported {} charts for {} ({})\n\nFiles created:\n{}",
        output_files.len(),
        config.continent,
        config.year,
        output_files.join("\n")
    ))
}

use log::{debug, info, warn};

use likert_scoring::builder::{label_slug, DatasetBuilder};
use likert_scoring::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use calamine::{open_workbook, Reader, Xlsx};

use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::dashboard::config_reader::*;
use crate::dashboard::io_common::{dataset_label, fingerprint, simplify_file_name};
use crate::dashboard::state::{DashboardAction, DashboardState};

pub mod config_reader;
pub mod demo;
pub mod io_common;
pub mod io_csv;
pub mod io_xlsx;
pub mod report;
pub mod state;

#[derive(Debug, Snafu)]
pub enum DashboardError {
    #[snafu(display("Error reading file {path}"))]
    OpeningFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening workbook {path}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("Worksheet {name} not found in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("No header row found in {path}"))]
    EmptyTable { path: String },
    #[snafu(display(""))]
    OpeningJson { source: std::io::Error },
    #[snafu(display(""))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Dataset labels must be strings or numbers"))]
    ParsingJsonLabel {},
    #[snafu(display("Error writing summary to {path}"))]
    WritingSummary {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Unknown input provider {provider}"))]
    UnknownProvider { provider: String },
    #[snafu(display("{source}"))]
    UnknownIndex { source: ScoringError },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type DashResult<T> = Result<T, DashboardError>;
pub type BDashResult<T> = Result<T, Box<DashboardError>>;

/// A survey table, as parsed by the readers. Column order is the file
/// order; the rows hold their cells keyed by column name.
#[derive(PartialEq, Debug, Clone)]
pub struct ParsedTable {
    pub columns: Vec<String>,
    pub rows: Vec<SurveyRow>,
}

impl ParsedTable {
    /// Number of columns that belong to the survey catalog.
    pub fn known_columns(&self) -> usize {
        self.columns
            .iter()
            .filter(|name| is_catalog_column(name))
            .count()
    }
}

fn ingest_source(source: &SourceFile) -> BDashResult<Dataset> {
    let provider = source.provider();
    info!(
        "Attempting to read survey file {:?} ({})",
        source.file_path, provider
    );
    let raw = fs::read(&source.file_path).context(OpeningFileSnafu {
        path: source.file_path.clone(),
    })?;
    let table = match provider.as_str() {
        "csv" => io_csv::read_csv_from(
            raw.as_slice(),
            simplify_file_name(&source.file_path).as_str(),
        )?,
        "xlsx" => io_xlsx::read_xlsx_table(
            &source.file_path,
            source.excel_worksheet_name.as_deref(),
        )?,
        _ => UnknownProviderSnafu {
            provider: provider.as_str(),
        }
        .fail()?,
    };
    debug!(
        "ingest_source: {}: {} rows, {} of {} columns in the catalog",
        simplify_file_name(&source.file_path),
        table.rows.len(),
        table.known_columns(),
        table.columns.len()
    );

    let label = match source.label()? {
        Some(label) => label,
        None => dataset_label(&source.file_path),
    };
    let id = format!("{}-{}", label_slug(&label), fingerprint(&raw));
    let mut builder = DatasetBuilder::new(&label).id(&id);
    for row in table.rows {
        builder.push_row(row);
    }
    Ok(builder.build())
}

pub fn run_dashboard(args: &Args) -> DashResult<()> {
    let config = match &args.config {
        Some(path) => read_config(path)?,
        None => default_config(),
    };
    debug!("run_dashboard: config: {:?}", config);

    // Command-line flags win over the configuration file.
    let hall_filter = args
        .hall
        .clone()
        .or_else(|| config.hall_filter.clone())
        .unwrap_or_else(|| HALL_FILTER_ALL.to_string());
    let trend_index = args
        .trend_index
        .clone()
        .or_else(|| config.trend_index.clone())
        .unwrap_or_else(|| "satisfaction".to_string());
    if index_by_key(&trend_index).is_none() {
        whatever!("Unknown trend index '{}'", trend_index);
    }

    let mut state = DashboardState::default();
    state = state.apply(DashboardAction::SetHallFilter(hall_filter.clone()));
    state = state.apply(DashboardAction::SetTrendIndex(trend_index.clone()));

    // The demo dataset loads first, so uploads land next to the baseline.
    // A run with nothing else to show falls back to it as well.
    let no_sources = args.input.is_empty() && config.source_files.is_empty();
    if args.demo || config.include_demo_data.unwrap_or(false) || no_sources {
        let demo_dataset = whatever!(
            demo::demo_dataset(args.demo_data.as_deref()),
            "Could not load the demo dataset"
        );
        info!(
            "Loaded dataset '{}' (demo): {} rows",
            demo_dataset.label,
            demo_dataset.rows.len()
        );
        state = state.apply(DashboardAction::AddDataset(demo_dataset));
    }

    let mut sources: Vec<SourceFile> = config.source_files.clone();
    for path in &args.input {
        sources.push(SourceFile::from_path(
            path,
            args.input_type.clone(),
            args.excel_worksheet_name.clone(),
        ));
    }

    // Every source stays isolated: one unreadable file must not block the
    // others from loading.
    let mut failures: usize = 0;
    for source in &sources {
        match ingest_source(source) {
            Ok(dataset) => {
                info!(
                    "Loaded dataset '{}' (uploaded): {} rows",
                    dataset.label,
                    dataset.rows.len()
                );
                state = state.apply(DashboardAction::AddDataset(dataset));
            }
            Err(e) => {
                failures += 1;
                warn!("run_dashboard: could not ingest {}: {}", source.file_path, e);
                eprintln!("Could not ingest {}: {}", source.file_path, e);
            }
        }
    }
    if failures > 0 && state.datasets.is_empty() {
        whatever!("No dataset could be ingested");
    }

    info!("Hall filter: {}, trend index: {}", hall_filter, trend_index);

    let summary = report::build_summary(&state, &config.output_settings.survey_title)?;
    let pretty_js_summary = serde_json::to_string_pretty(&summary).context(ParsingJsonSnafu {})?;

    let out_path = args
        .out
        .clone()
        .or_else(|| config.output_settings.output_path.clone());
    match out_path.as_deref() {
        None | Some("") | Some("stdout") => println!("{}", pretty_js_summary),
        Some(path) => {
            fs::write(path, pretty_js_summary.as_str()).context(WritingSummarySnafu { path })?;
            info!("Summary written to {}", path);
        }
    }

    // The reference summary, if provided for comparison
    if let Some(reference_path) = &args.reference {
        let reference = read_summary(reference_path)?;
        let pretty_js_reference =
            serde_json::to_string_pretty(&reference).context(ParsingJsonSnafu {})?;
        if pretty_js_reference != pretty_js_summary {
            warn!("Found differences with the reference summary");
            print_diff(
                pretty_js_reference.as_str(),
                pretty_js_summary.as_ref(),
                "\n",
            );
            whatever!("Difference detected between calculated summary and reference summary")
        }
    }

    Ok(())
}

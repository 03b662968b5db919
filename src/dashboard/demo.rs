// The built-in demo dataset.

use crate::dashboard::*;

/// A small hand-made survey, embedded so the dashboard always has
/// something to draw.
pub const DEMO_SURVEY_CSV: &str = include_str!("../../data/reslife_demo.csv");

pub const DEMO_LABEL: &str = "ResLife Demo 2024";
pub const DEMO_ID: &str = "demo";

/// Builds the demo dataset, from the embedded sample or from an override
/// file when one is given.
pub fn demo_dataset(path: Option<&str>) -> BDashResult<Dataset> {
    let table = match path {
        Some(path) => io_csv::read_csv_table(path)?,
        None => io_csv::read_csv_from(DEMO_SURVEY_CSV.as_bytes(), "embedded demo data")?,
    };
    debug!(
        "demo_dataset: {} rows, {} of {} columns in the catalog",
        table.rows.len(),
        table.known_columns(),
        table.columns.len()
    );
    let mut builder = DatasetBuilder::demo(DEMO_LABEL).id(DEMO_ID);
    for row in table.rows {
        builder.push_row(row);
    }
    Ok(builder.build())
}

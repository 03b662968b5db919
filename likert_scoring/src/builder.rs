pub use crate::catalog::*;

/// A builder for assembling survey datasets row by row.
///
/// ```
/// pub use likert_scoring::builder::DatasetBuilder;
///
/// let mut builder = DatasetBuilder::new("ResLife_2026");
///
/// builder.push_text_row(&[
///     ("Which residence hall do you live in?", "Pine Hall"),
///     ("Overall, I am satisfied with my housing experience this year", "4"),
/// ]);
///
/// let dataset = builder.build();
/// assert_eq!(dataset.id, "reslife-2026");
/// assert_eq!(dataset.rows.len(), 1);
/// ```
pub struct DatasetBuilder {
    pub(crate) _label: String,
    pub(crate) _provenance: Provenance,
    pub(crate) _id: Option<String>,
    pub(crate) _rows: Vec<SurveyRow>,
}

impl DatasetBuilder {
    pub fn new(label: &str) -> DatasetBuilder {
        DatasetBuilder {
            _label: label.to_string(),
            _provenance: Provenance::Uploaded,
            _id: None,
            _rows: Vec::new(),
        }
    }

    /// Starts the built-in demo dataset. Demo datasets cannot be removed
    /// from a dashboard once added.
    pub fn demo(label: &str) -> DatasetBuilder {
        let mut builder = DatasetBuilder::new(label);
        builder._provenance = Provenance::Demo;
        builder
    }

    /// Overrides the identifier derived from the label. Hosts that ingest
    /// files use this to keep identical labels distinct.
    pub fn id(mut self, id: &str) -> DatasetBuilder {
        self._id = Some(id.to_string());
        self
    }

    pub fn push_row(&mut self, row: SurveyRow) {
        self._rows.push(row);
    }

    /// Adds one response with textual cells. The simplest use case for
    /// hand-written datasets. Blank texts become empty cells.
    pub fn push_text_row(&mut self, cells: &[(&str, &str)]) {
        let mut row = SurveyRow::new();
        for (column, value) in cells {
            if value.trim().is_empty() {
                row.set(column, CellValue::Empty);
            } else {
                row.set(column, CellValue::Text(value.to_string()));
            }
        }
        self.push_row(row);
    }

    pub fn build(self) -> Dataset {
        let id = match self._id {
            Some(id) => id,
            None => label_slug(&self._label),
        };
        Dataset {
            id,
            label: self._label,
            provenance: self._provenance,
            rows: self._rows,
        }
    }
}

/// Lowercases a label into a dash-separated identifier. `build` falls back
/// to it when no explicit id was set; hosts can call it to derive their own.
pub fn label_slug(label: &str) -> String {
    let mut out = String::new();
    for c in label.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_end_matches('-').to_string()
}

// ********* Input data structures ***********

use std::collections::HashMap;
use std::error::Error;
use std::fmt::Display;

/// The raw content of one spreadsheet cell, before any coercion.
///
/// CSV ingestion only produces `Text` and `Empty`; Excel ingestion can also
/// produce `Number`. Anything a survey platform exports beyond these is
/// degraded to its textual rendering by the readers.
#[derive(PartialEq, Debug, Clone)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Empty,
}

impl CellValue {
    /// The trimmed textual content of the cell, or `None` when the cell is
    /// empty or blank. Integral numbers render without a decimal point so
    /// that a numeric class-year column matches its textual counterpart.
    pub fn trimmed(&self) -> Option<String> {
        match self {
            CellValue::Text(s) => {
                let t = s.trim();
                if t.is_empty() {
                    None
                } else {
                    Some(t.to_string())
                }
            }
            CellValue::Number(x) if x.fract() == 0.0 => Some(format!("{}", *x as i64)),
            CellValue::Number(x) => Some(format!("{}", x)),
            CellValue::Empty => None,
        }
    }
}

/// One survey response: a mapping from column name to raw cell value.
///
/// Rows are immutable once built. Missing columns and absent cells are the
/// same thing for every consumer in this crate.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct SurveyRow {
    cells: HashMap<String, CellValue>,
}

impl SurveyRow {
    pub fn new() -> SurveyRow {
        SurveyRow::default()
    }

    pub fn from_pairs(pairs: &[(&str, CellValue)]) -> SurveyRow {
        let mut row = SurveyRow::new();
        for (column, value) in pairs {
            row.set(column, value.clone());
        }
        row
    }

    pub fn set(&mut self, column: &str, value: CellValue) {
        self.cells.insert(column.to_string(), value);
    }

    pub fn cell(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    /// Trimmed text of the named column, `None` for absent or blank cells.
    pub fn trimmed(&self, column: &str) -> Option<String> {
        self.cell(column).and_then(|c| c.trimmed())
    }
}

/// Where a dataset came from. The demo dataset is permanent; uploaded
/// datasets can be removed from the active set.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Provenance {
    Demo,
    Uploaded,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Demo => "demo",
            Provenance::Uploaded => "uploaded",
        }
    }
}

/// One ingested survey administration: an ordered sequence of rows plus
/// identification and provenance.
#[derive(PartialEq, Debug, Clone)]
pub struct Dataset {
    pub id: String,
    pub label: String,
    pub provenance: Provenance,
    pub rows: Vec<SurveyRow>,
}

// ******** Output data structures *********

/// The mean Likert score of one question over a row set.
///
/// `mean` is `None` when no row in the set had a coercible response for the
/// question. The numeric sentinel used by charting layers is produced by
/// [`QuestionStat::mean_or_zero`]: a genuine Likert mean is always within
/// [1, 5], so 0.0 can only ever mean "no data".
#[derive(PartialEq, Debug, Clone)]
pub struct QuestionStat {
    pub question: String,
    pub mean: Option<f64>,
    pub responses: u32,
}

impl QuestionStat {
    pub fn mean_or_zero(&self) -> f64 {
        self.mean.unwrap_or(0.0)
    }
}

/// The composite score of one index over a row set, together with the
/// per-question statistics it was derived from.
#[derive(PartialEq, Debug, Clone)]
pub struct IndexScore {
    pub key: &'static str,
    pub label: &'static str,
    pub color: &'static str,
    pub score: Option<f64>,
    pub questions: Vec<QuestionStat>,
}

impl IndexScore {
    pub fn score_or_zero(&self) -> f64 {
        self.score.unwrap_or(0.0)
    }
}

/// Grouped-bar comparison data: one row per index, one numeric column per
/// dataset label. Cell values are rounded to two decimals; `None` marks an
/// index with no data in that dataset.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct ComparisonMatrix {
    pub columns: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonMatrix {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(PartialEq, Debug, Clone)]
pub struct ComparisonRow {
    pub index_key: &'static str,
    pub index_label: &'static str,
    pub scores: Vec<Option<f64>>,
}

/// Ordering key for trend display, derived from the dataset label and its
/// insertion position, never stored. Datasets without a detectable year sort
/// before those with one; within each group the insertion sequence decides.
#[derive(Eq, PartialEq, Debug, Clone, Copy, PartialOrd, Ord)]
pub struct OrderKey {
    pub year: Option<u16>,
    pub inserted: usize,
}

#[derive(PartialEq, Debug, Clone)]
pub struct TrendPoint {
    pub label: String,
    pub year: Option<u16>,
    pub score: f64,
}

/// A chronologically ordered series of one index's scores across datasets.
///
/// Datasets without data for the index are dropped rather than plotted as
/// zero. `domain` is the auto-zoomed y-axis range, clamped to the Likert
/// scale; it is `None` for an empty series.
#[derive(PartialEq, Debug, Clone)]
pub struct TrendSeries {
    pub index_key: &'static str,
    pub index_label: &'static str,
    pub color: &'static str,
    pub points: Vec<TrendPoint>,
    pub domain: Option<(f64, f64)>,
}

impl TrendSeries {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Count and rate tabulations over a row set, plus sampled free-text
/// responses for qualitative display.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct DemographicSummary {
    /// (value, count) per distinct trimmed hall answer, count-descending.
    pub halls: Vec<(String, u32)>,
    /// (value, count) per distinct trimmed class-year answer, count-descending.
    pub class_years: Vec<(String, u32)>,
    /// Fraction of answered RA questions equal to "Yes"; `None` when no row
    /// answered at all.
    pub ra_yes_rate: Option<f64>,
    pub voices: Vec<VoiceSample>,
}

/// Up to [`VOICE_SAMPLE_CAP`] distinct free-text answers for one open-ended
/// column, in row order. A sample, not a corpus.
#[derive(PartialEq, Debug, Clone)]
pub struct VoiceSample {
    pub column: &'static str,
    pub responses: Vec<String>,
}

/// Errors raised by the aggregation entry points.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ScoringError {
    UnknownIndex(String),
}

impl Error for ScoringError {}

impl Display for ScoringError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringError::UnknownIndex(key) => write!(f, "unknown index key: {}", key),
        }
    }
}

// ********* The survey catalog **********

// Column names are the verbatim headers of the survey export. Matching is
// exact: no fuzzy matching, no renaming tolerance.

pub const HALL_COLUMN: &str = "Which residence hall do you live in?";
pub const CLASS_YEAR_COLUMN: &str = "What is your class year?";
pub const RA_COLUMN: &str = "Do you have an RA assigned to your floor or wing?";

pub const OPEN_ENDED_COLUMNS: [&str; 2] = [
    "What do you like most about living in your hall?",
    "What is one thing you would change about your hall?",
];

/// Sentinel hall-filter value that bypasses filtering (case-insensitive).
pub const HALL_FILTER_ALL: &str = "all";

/// Maximum number of free-text answers sampled per open-ended column.
pub const VOICE_SAMPLE_CAP: usize = 5;

/// An additional row-eligibility requirement attached to an index.
///
/// Eligibility composes with whatever row subset the caller already
/// selected (typically a hall filter); it never replaces it.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum Eligibility {
    /// The trimmed value of `column` must equal `value` exactly.
    ColumnEquals {
        column: &'static str,
        value: &'static str,
    },
}

impl Eligibility {
    pub fn admits(&self, row: &SurveyRow) -> bool {
        match self {
            Eligibility::ColumnEquals { column, value } => {
                row.trimmed(column).as_deref() == Some(*value)
            }
        }
    }
}

/// A composite construct of the survey: several related questions averaged
/// into one score. The catalog of indices is fixed at compile time and never
/// mutated at runtime.
#[derive(PartialEq, Debug, Clone)]
pub struct IndexDefinition {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    /// Display color for chart payloads.
    pub color: &'static str,
    /// Question columns in display order.
    pub questions: &'static [&'static str],
    pub eligibility: Option<Eligibility>,
}

/// The six indices of the residence-life survey, in display order.
pub const INDEX_CATALOG: [IndexDefinition; 6] = [
    IndexDefinition {
        key: "belonging",
        label: "Belonging & Community",
        description: "Whether residents feel at home and connected in their hall.",
        color: "#4e79a7",
        questions: &[
            "I feel a sense of belonging in my hall community",
            "I have made meaningful connections with other residents",
            "Hall events and traditions help me feel included",
        ],
        eligibility: None,
    },
    IndexDefinition {
        key: "safety",
        label: "Safety & Security",
        description: "Perceived physical safety in and around the building.",
        color: "#e15759",
        questions: &[
            "I feel safe in my residence hall at night",
            "Building entrances and access controls work reliably",
            "I know how to reach campus safety staff when I need them",
        ],
        eligibility: None,
    },
    IndexDefinition {
        key: "facilities",
        label: "Facilities & Maintenance",
        description: "Condition of rooms and shared spaces, responsiveness of repairs.",
        color: "#76b7b2",
        questions: &[
            "My room is in good physical condition",
            "Shared spaces such as lounges and kitchens are clean and usable",
            "Maintenance requests are resolved in a reasonable time",
        ],
        eligibility: None,
    },
    IndexDefinition {
        key: "ra_support",
        label: "RA Support",
        description: "Quality of resident-assistant support, for residents who have one.",
        color: "#f28e2b",
        questions: &[
            "My RA is approachable and easy to reach",
            "My RA shares important information in a timely way",
            "My RA handles concerns on my floor effectively",
        ],
        eligibility: Some(Eligibility::ColumnEquals {
            column: RA_COLUMN,
            value: "Yes",
        }),
    },
    IndexDefinition {
        key: "programming",
        label: "Programming & Events",
        description: "Relevance and reach of hall programming.",
        color: "#59a14f",
        questions: &[
            "Hall programming is relevant to my interests",
            "Events are scheduled at times I can attend",
            "I feel encouraged to take part in hall programming",
        ],
        eligibility: None,
    },
    IndexDefinition {
        key: "satisfaction",
        label: "Overall Satisfaction",
        description: "Summary judgment of the housing experience.",
        color: "#b07aa1",
        questions: &[
            "Overall, I am satisfied with my housing experience this year",
            "I would choose to live on campus again",
            "I would recommend my hall to an incoming student",
        ],
        eligibility: None,
    },
];

pub fn index_by_key(key: &str) -> Option<&'static IndexDefinition> {
    INDEX_CATALOG.iter().find(|def| def.key == key)
}

/// True when a column name belongs to the survey catalog: a scored
/// question, a demographic column or an open-ended prompt.
pub fn is_catalog_column(name: &str) -> bool {
    if name == HALL_COLUMN || name == CLASS_YEAR_COLUMN || name == RA_COLUMN {
        return true;
    }
    if OPEN_ENDED_COLUMNS.contains(&name) {
        return true;
    }
    INDEX_CATALOG
        .iter()
        .any(|def| def.questions.contains(&name))
}

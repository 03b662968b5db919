use clap::Parser;

/// This is a residence-life survey tabulation program.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON configuration file describing the survey sources and the
    /// output settings. The command-line flags below override the corresponding fields. For more
    /// information about the file format, read the documentation of the likert_scoring crate.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,
    /// (file path) A reference summary in JSON format. If provided, respulse will check that the
    /// computed summary matches the reference and fail the run when it does not.
    #[clap(short, long, value_parser)]
    pub reference: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the survey will be written in
    /// JSON format to the given location. Setting this option overrides the path that may be
    /// specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path, repeatable) A survey export to ingest as one dataset. Every file stays
    /// isolated: a file that cannot be read is reported and skipped without blocking the others.
    #[clap(short, long, value_parser)]
    pub input: Vec<String>,

    /// (default csv) The type of the inputs: csv or xlsx. Files ending in .xlsx are detected
    /// without this flag.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (hall name or 'all') Narrows every panel to the residents of one hall. The name is matched
    /// exactly after trimming whitespace.
    #[clap(long, value_parser)]
    pub hall: Option<String>,

    /// (default satisfaction) The key of the index drawn in the year-over-year trend panel.
    #[clap(long, value_parser)]
    pub trend_index: Option<String>,

    /// When using an Excel file, indicates the name of the worksheet to use.
    #[clap(long, value_parser)]
    pub excel_worksheet_name: Option<String>,

    // Other arguments
    /// If passed as an argument, loads the built-in demo administration in front of the inputs.
    /// A run with no inputs and no configured sources loads it automatically.
    #[clap(long, takes_value = false)]
    pub demo: bool,

    /// (file path, optional) Replaces the embedded demo data with a CSV file. Unlike --input
    /// files, a demo override that cannot be read aborts the run.
    #[clap(long, value_parser)]
    pub demo_data: Option<String>,

    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}

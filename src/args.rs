use clap::Parser;

/// This is a tallying program for votes collected with a Google Form.
#[derive(Parser, Debug, Clone, Default)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path) The list of eligible voting tokens, one per line. Setting this option overrides the
    /// path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub tokens: Option<String>,

    /// (file path) The responses exported from the Google Form in CSV format. Setting this option
    /// overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub results: Option<String>,

    /// (file path, optional) A JSON file describing the vote: title and location of the input files.
    /// Relative paths are resolved from the directory of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (file path, 'stdout' or empty) If specified, the summary of the vote will be written in JSON format to the given
    /// location. Setting this option overrides the path that may be specified with the --config option.
    #[clap(short, long, value_parser)]
    pub out: Option<String>,

    /// (file path or empty) If specified, the text report is written to this file instead of the standard output.
    #[clap(long, value_parser)]
    pub report: Option<String>,

    /// (file path) A reference file containing the text report of a vote. If provided, the tally
    /// is checked against the reference.
    #[clap(long, value_parser)]
    pub reference: Option<String>,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard error.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}

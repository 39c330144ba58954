// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// One row of the vote export: when the form was submitted, the token typed
/// in by the voter and the selected option.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Vote {
    pub time: String,
    pub token: String,
    pub option: String,
}

impl Vote {
    pub fn new(time: &str, token: &str, option: &str) -> Vote {
        Vote {
            time: time.to_string(),
            token: token.to_string(),
            option: option.to_string(),
        }
    }
}

// ******** Output data structures *********

/// The number of votes for one option.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct OptionCount {
    pub option: String,
    pub count: u64,
}

/// The outcome of a tally.
///
/// `abstentions` is signed: votes cast with unknown tokens are still counted
/// in `votes_cast`, so it goes below zero when there are more of them than
/// eligible voters who did not vote.
#[derive(PartialEq, Debug, Clone)]
pub struct TallyResult {
    /// The options sorted by increasing count. Ties keep the order in which
    /// the options were first seen.
    pub tally: Vec<OptionCount>,
    pub total_eligible: u64,
    pub votes_cast: u64,
    pub abstentions: i64,
    /// Problems found while tallying, in the order they were found.
    pub errors: Vec<String>,
}

/// The message shown when a vote export contains more than the token and one
/// multiple choice answer.
pub const MULTIPLE_QUESTIONS_MESSAGE: &str = "Detected more than a single question in the Google Form. \nIt says 'A vote is a single multiple choice question asked to all eligible alumni'. \nPlease go and evaluate the vote by hand and RTFM next time. \n";

/// Errors that prevent reading the vote export.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum IngestError {
    /// A line did not split into exactly `time,token,option`.
    /// `lineno` is 1-based and counts the header line.
    MultipleQuestions { lineno: usize, fields: usize },
}

impl Error for IngestError {}

impl Display for IngestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestError::MultipleQuestions { .. } => write!(f, "{}", MULTIPLE_QUESTIONS_MESSAGE),
        }
    }
}

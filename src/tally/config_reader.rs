use crate::tally::*;

use serde::{Deserialize, Serialize};

/// The description of a vote, read from the --config file.
#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoteConfig {
    pub title: Option<String>,
    #[serde(rename = "tokensFile")]
    pub tokens_file: Option<String>,
    #[serde(rename = "resultsFile")]
    pub results_file: Option<String>,
    #[serde(rename = "outputFile")]
    pub output_file: Option<String>,
}

impl VoteConfig {
    /// Resolves the file paths against the directory of the configuration.
    pub fn relative_to(self, root: &Path) -> VoteConfig {
        let root = root.display().to_string();
        VoteConfig {
            title: self.title,
            tokens_file: self.tokens_file.map(|p| resolve_path(&root, &p)),
            results_file: self.results_file.map(|p| resolve_path(&root, &p)),
            output_file: self.output_file.map(|p| resolve_path(&root, &p)),
        }
    }
}

/// The description of the vote written at the top of the JSON summary.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub title: Option<String>,
    #[serde(rename = "tokensFile")]
    pub tokens_file: String,
    #[serde(rename = "resultsFile")]
    pub results_file: String,
}

pub fn read_config(path: &str) -> PortalResult<VoteConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_config: content: {:?}", contents);
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })
}

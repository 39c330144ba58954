mod config_reader;
mod io_common;

use log::{debug, info, warn};

use portal_votes::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::Path;

use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

use crate::args::Args;
use crate::tally::config_reader::*;
use crate::tally::io_common::*;

#[derive(Debug, Snafu)]
pub enum PortalError {
    #[snafu(display("Error reading file {path}"))]
    ReadingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error writing file {path}"))]
    WritingFile {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error opening configuration {path}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing configuration {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error serializing the summary"))]
    WritingJson { source: serde_json::Error },
    #[snafu(display("The vote export {path} was rejected:\n{source}"))]
    Ingest { source: IngestError, path: String },
    #[snafu(display("No {what} file provided, use --{what} or the configuration file"))]
    MissingInput { what: String },
    #[snafu(display("Cannot find the directory of the configuration file {path}"))]
    MissingParentDir { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type PortalResult<T> = Result<T, PortalError>;

/// Everything needed to run one tally, after merging the command line with
/// the configuration file.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct VoteSettings {
    pub title: Option<String>,
    pub tokens_path: String,
    pub results_path: String,
    pub out: Option<String>,
    pub report: Option<String>,
    pub reference: Option<String>,
}

pub fn resolve_settings(args: &Args) -> PortalResult<VoteSettings> {
    let config: VoteConfig = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            info!("config: {:?}", config);
            let root_p = Path::new(config_path.as_str())
                .parent()
                .context(MissingParentDirSnafu {
                    path: config_path.clone(),
                })?;
            config.relative_to(root_p)
        }
        None => VoteConfig::default(),
    };

    let tokens_path = args
        .tokens
        .clone()
        .or(config.tokens_file)
        .context(MissingInputSnafu { what: "tokens" })?;
    let results_path = args
        .results
        .clone()
        .or(config.results_file)
        .context(MissingInputSnafu { what: "results" })?;
    let out = args.out.clone().or(config.output_file);

    Ok(VoteSettings {
        title: config.title,
        tokens_path,
        results_path,
        out,
        report: args.report.clone(),
        reference: args.reference.clone(),
    })
}

fn result_stats_to_json(res: &TallyResult) -> JSValue {
    let tally: Vec<JSValue> = res
        .tally
        .iter()
        .map(|oc| {
            json!({
                "option": oc.option,
                "count": oc.count,
                "percentage": format_number(res.percentage(oc.count)),
            })
        })
        .collect();
    json!({
        "totalEligible": res.total_eligible,
        "votesCast": res.votes_cast,
        "abstentions": res.abstentions,
        "errors": res.errors,
        "tally": tally,
    })
}

fn build_summary_js(settings: &VoteSettings, res: &TallyResult) -> JSValue {
    let c = OutputConfig {
        title: settings.title.clone(),
        tokens_file: simplify_file_name(&settings.tokens_path),
        results_file: simplify_file_name(&settings.results_path),
    };
    json!({
        "config": c,
        "results": result_stats_to_json(res) })
}

/// Reads both files, tallies the vote and writes the outputs.
pub fn run_vote(settings: &VoteSettings) -> PortalResult<TallyResult> {
    let mut session = VoteSession::new();

    info!("Attempting to read token file {:?}", settings.tokens_path);
    session.load_tokens(&read_input(&settings.tokens_path)?);

    info!("Attempting to read results file {:?}", settings.results_path);
    let votes_text = read_input(&settings.results_path)?;
    if let Err(e) = session.load_votes(&votes_text) {
        // The explanation takes the place of the report.
        if let Some(msg) = session.results() {
            write_output(settings.report.as_deref(), msg)?;
        }
        return Err(e).context(IngestSnafu {
            path: settings.results_path.clone(),
        });
    }

    let res = match session.last_tally() {
        Some(res) => res.clone(),
        None => whatever!("No tally available after loading both files"),
    };
    let report = res.report();
    debug!("report: {:?}", report);
    write_output(settings.report.as_deref(), &report)?;

    if let Some(out) = &settings.out {
        let summary_js = build_summary_js(settings, &res);
        let pretty_js_summary =
            serde_json::to_string_pretty(&summary_js).context(WritingJsonSnafu {})?;
        write_output(Some(out.as_str()), &pretty_js_summary)?;
    }

    // The reference report, if provided for comparison
    if let Some(reference_p) = &settings.reference {
        let reference = fs::read_to_string(reference_p).context(ReadingFileSnafu {
            path: reference_p.clone(),
        })?;
        let reference = reference.trim_end_matches(|c: char| c == '\n' || c == '\r');
        if reference != report {
            warn!("Found differences with the reference report");
            print_diff(reference, report.as_str(), "\n");
            whatever!("Difference detected between calculated report and reference report")
        }
        info!("The report matches the reference {:?}", reference_p);
    }

    Ok(res)
}

pub fn run(args: &Args) -> PortalResult<TallyResult> {
    let settings = resolve_settings(args)?;
    debug!("settings: {:?}", settings);
    run_vote(&settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const TOKENS: &str = "a\nb\nc\n";
    const RESULTS: &str = "Timestamp,What is your voting token?,Do you approve?\n\
                           2022/05/04 10:00:00,a,Yes\n\
                           2022/05/04 10:01:00,b,No\n\
                           2022/05/04 10:02:00,z,Yes\n";
    const REPORT: &str = "Error: Invalid voting token z\n\
                          \n\
                          Results:\n\
                          Option No: 1 33.33333333333333%\n\
                          Option Yes: 2 66.66666666666666%\n\
                          \n\
                          3 Vote(s) / 0 Abstain(s) / 3 Total";

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn write(dir: &TempDir, name: &str, content: &str) -> String {
        let p: PathBuf = dir.path().join(name);
        fs::write(&p, content).unwrap();
        p.display().to_string()
    }

    fn settings(dir: &TempDir) -> VoteSettings {
        VoteSettings {
            title: None,
            tokens_path: write(dir, "tokens.csv", TOKENS),
            results_path: write(dir, "results.csv", RESULTS),
            out: None,
            report: Some(dir.path().join("report.txt").display().to_string()),
            reference: None,
        }
    }

    #[test]
    fn tally_files() {
        init();
        let dir = tempfile::tempdir().unwrap();
        let s = settings(&dir);
        let res = run_vote(&s).unwrap();
        assert_eq!(res.votes_cast, 3);
        assert_eq!(res.abstentions, 0);
        let report = fs::read_to_string(s.report.unwrap()).unwrap();
        assert_eq!(report, REPORT);
    }

    #[test]
    fn json_summary() {
        init();
        let dir = tempfile::tempdir().unwrap();
        let mut s = settings(&dir);
        s.title = Some("Approval".to_string());
        s.out = Some(dir.path().join("summary.json").display().to_string());
        run_vote(&s).unwrap();

        let js: JSValue =
            serde_json::from_str(&fs::read_to_string(s.out.unwrap()).unwrap()).unwrap();
        assert_eq!(
            js,
            json!({
                "config": {
                    "title": "Approval",
                    "tokensFile": "tokens.csv",
                    "resultsFile": "results.csv",
                },
                "results": {
                    "totalEligible": 3,
                    "votesCast": 3,
                    "abstentions": 0,
                    "errors": ["Error: Invalid voting token z"],
                    "tally": [
                        {"option": "No", "count": 1, "percentage": "33.33333333333333"},
                        {"option": "Yes", "count": 2, "percentage": "66.66666666666666"},
                    ],
                },
            })
        );
    }

    #[test]
    fn rejected_export() {
        init();
        let dir = tempfile::tempdir().unwrap();
        let mut s = settings(&dir);
        s.results_path = write(&dir, "results.csv", "Timestamp,Token,Q1,Q2\nt,a,X,Y\n");
        let err = run_vote(&s).unwrap_err();
        assert!(matches!(
            err,
            PortalError::Ingest {
                source: IngestError::MultipleQuestions { lineno: 2, fields: 4 },
                ..
            }
        ));
        let report = fs::read_to_string(s.report.unwrap()).unwrap();
        assert_eq!(report, MULTIPLE_QUESTIONS_MESSAGE);
    }

    #[test]
    fn missing_file() {
        init();
        let dir = tempfile::tempdir().unwrap();
        let mut s = settings(&dir);
        s.tokens_path = dir.path().join("nope.csv").display().to_string();
        assert!(matches!(run_vote(&s), Err(PortalError::ReadingFile { .. })));
    }

    #[test]
    fn reference_check() {
        init();
        let dir = tempfile::tempdir().unwrap();
        let mut s = settings(&dir);
        s.reference = Some(write(&dir, "expected.txt", &format!("{}\n", REPORT)));
        assert!(run_vote(&s).is_ok());

        s.reference = Some(write(&dir, "expected.txt", "\nResults:\n"));
        assert!(matches!(run_vote(&s), Err(PortalError::Whatever { .. })));
    }

    #[test]
    fn settings_from_config() {
        init();
        let dir = tempfile::tempdir().unwrap();
        write(&dir, "tokens.csv", TOKENS);
        write(&dir, "results.csv", RESULTS);
        let config_path = write(
            &dir,
            "vote.json",
            r#"{"title": "Approval", "tokensFile": "tokens.csv", "resultsFile": "results.csv"}"#,
        );
        let args = Args {
            config: Some(config_path),
            report: Some(dir.path().join("report.txt").display().to_string()),
            ..Args::default()
        };
        let s = resolve_settings(&args).unwrap();
        assert_eq!(s.title, Some("Approval".to_string()));
        assert_eq!(
            s.tokens_path,
            dir.path().join("tokens.csv").display().to_string()
        );
        assert_eq!(s.out, None);
        let res = run(&args).unwrap();
        assert_eq!(res.total_eligible, 3);
    }

    #[test]
    fn command_line_overrides_config() {
        init();
        let dir = tempfile::tempdir().unwrap();
        let config_path = write(
            &dir,
            "vote.json",
            r#"{"tokensFile": "tokens.csv", "resultsFile": "results.csv", "outputFile": "summary.json"}"#,
        );
        let args = Args {
            config: Some(config_path),
            tokens: Some("/elsewhere/tokens.csv".to_string()),
            ..Args::default()
        };
        let s = resolve_settings(&args).unwrap();
        assert_eq!(s.tokens_path, "/elsewhere/tokens.csv");
        assert_eq!(
            s.results_path,
            dir.path().join("results.csv").display().to_string()
        );
        assert_eq!(
            s.out,
            Some(dir.path().join("summary.json").display().to_string())
        );
    }

    #[test]
    fn missing_inputs() {
        init();
        let args = Args {
            results: Some("results.csv".to_string()),
            ..Args::default()
        };
        assert!(matches!(
            resolve_settings(&args),
            Err(PortalError::MissingInput { what }) if what == "tokens"
        ));
    }

    #[test]
    fn bad_config() {
        init();
        let dir = tempfile::tempdir().unwrap();
        let config_path = write(&dir, "vote.json", "{ not json");
        let args = Args {
            config: Some(config_path),
            ..Args::default()
        };
        assert!(matches!(
            resolve_settings(&args),
            Err(PortalError::ParsingJson { .. })
        ));
    }
}

use log::{info, warn};

use crate::config::*;
use crate::ingest::{parse_tokens, parse_votes};
use crate::tally;

/// The inputs of a vote as they get loaded by a front-end.
///
/// Each file can be loaded, reloaded or cleared independently. The report is
/// recomputed after every change and is only available when both the tokens
/// and the votes are present.
///
/// ```
/// use portal_votes::VoteSession;
///
/// let mut session = VoteSession::new();
/// session.load_tokens("a\nb\n");
/// assert_eq!(session.results(), None);
/// session.load_votes("Timestamp,Token,Choice\nt,a,Yes\n")?;
/// assert!(session.results().unwrap().ends_with("1 Vote(s) / 1 Abstain(s) / 2 Total"));
/// # Ok::<(), portal_votes::IngestError>(())
/// ```
#[derive(PartialEq, Debug, Clone, Default)]
pub struct VoteSession {
    tokens: Option<Vec<String>>,
    votes: Option<Vec<Vote>>,
    results: Option<String>,
    last_tally: Option<TallyResult>,
}

impl VoteSession {
    pub fn new() -> VoteSession {
        VoteSession::default()
    }

    pub fn tokens(&self) -> Option<&[String]> {
        self.tokens.as_deref()
    }

    pub fn votes(&self) -> Option<&[Vote]> {
        self.votes.as_deref()
    }

    /// The current report, or the explanation of why the last vote export
    /// was rejected.
    pub fn results(&self) -> Option<&str> {
        self.results.as_deref()
    }

    /// The tally behind the current report.
    pub fn last_tally(&self) -> Option<&TallyResult> {
        self.last_tally.as_ref()
    }

    /// Replaces the tokens with the content of a token file.
    pub fn load_tokens(&mut self, text: &str) {
        let tokens = parse_tokens(text);
        info!("{} token(s) loaded", tokens.len());
        self.tokens = Some(tokens);
        self.refresh();
    }

    /// Replaces the votes with the content of a vote export.
    ///
    /// A rejected export leaves the previous votes in place. The report then
    /// holds the rejection message until the next change.
    pub fn load_votes(&mut self, text: &str) -> Result<(), IngestError> {
        match parse_votes(text) {
            Ok(votes) => {
                info!("{} vote(s) loaded", votes.len());
                self.votes = Some(votes);
                self.refresh();
                Ok(())
            }
            Err(e) => {
                warn!("load_votes: rejected vote export: {:?}", e);
                self.results = Some(MULTIPLE_QUESTIONS_MESSAGE.to_string());
                self.last_tally = None;
                Err(e)
            }
        }
    }

    pub fn clear_tokens(&mut self) {
        self.tokens = None;
        self.refresh();
    }

    pub fn clear_votes(&mut self) {
        self.votes = None;
        self.refresh();
    }

    fn refresh(&mut self) {
        match (&self.tokens, &self.votes) {
            (Some(tokens), Some(votes)) => {
                let res = tally(tokens, votes);
                self.results = Some(res.report());
                self.last_tally = Some(res);
            }
            _ => {
                self.results = None;
                self.last_tally = None;
            }
        }
    }
}

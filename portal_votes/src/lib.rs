/*!
Tallies single-question votes collected with a Google Form.

Every eligible voter receives an opaque token. The form asks for the token and
for one multiple choice answer. This crate checks the answers against the list
of tokens, counts the options and renders a plain text summary:

```
use portal_votes::*;

let tokens = parse_tokens("a\nb\nc\n");
let votes = parse_votes("Timestamp,Token,Choice\n2022/01/01,a,Yes\n2022/01/01,b,No\n")?;
let report = evaluate(&tokens, &votes);
assert!(report.ends_with("2 Vote(s) / 1 Abstain(s) / 3 Total"));
# Ok::<(), IngestError>(())
```

See the [manual] for the input formats and the known quirks of the tally.
*/
mod config;
mod ingest;
pub mod manual;
mod session;

use log::{debug, info, warn};

use std::collections::{HashMap, HashSet};

pub use crate::config::*;
pub use crate::ingest::*;
pub use crate::session::*;

/// Runs the tally and renders the report.
///
/// This is the same as `tally(tokens, votes).report()`.
pub fn evaluate(tokens: &[String], votes: &[Vote]) -> String {
    tally(tokens, votes).report()
}

/// Counts the votes.
///
/// Arguments:
/// * `tokens` the tokens of all the eligible voters. Duplicates are ignored.
/// * `votes` the rows of the vote export, in file order.
///
/// Only the last vote of each token is counted. A vote with a token that is
/// not in `tokens` is reported in `TallyResult::errors` but it is still counted.
pub fn tally(tokens: &[String], votes: &[Vote]) -> TallyResult {
    info!(
        "tally: Processing {:?} tokens and {:?} votes",
        tokens.len(),
        votes.len()
    );
    let eligible: HashSet<&str> = tokens.iter().map(|t| t.as_str()).collect();

    let mut errors: Vec<String> = Vec::new();

    // What everyone voted for. A token keeps the position of its first vote.
    let mut cast_votes: Vec<(&str, &str)> = Vec::new();
    let mut cast_index: HashMap<&str, usize> = HashMap::new();
    for v in votes.iter() {
        if !eligible.contains(v.token.as_str()) {
            warn!("tally: invalid voting token {:?} at {:?}", v.token, v.time);
            errors.push(format!("Error: Invalid voting token {}", v.token));
        }
        match cast_index.get(v.token.as_str()) {
            Some(&idx) => {
                debug!(
                    "tally: token {:?} voted again: {:?} -> {:?}",
                    v.token, cast_votes[idx].1, v.option
                );
                cast_votes[idx].1 = v.option.as_str();
            }
            None => {
                cast_index.insert(v.token.as_str(), cast_votes.len());
                cast_votes.push((v.token.as_str(), v.option.as_str()));
            }
        }
    }

    let total_eligible = eligible.len() as u64;
    let votes_cast = cast_votes.len() as u64;
    let abstentions = total_eligible as i64 - votes_cast as i64;
    if abstentions < 0 {
        warn!(
            "tally: more votes than eligible voters: {} votes, {} eligible",
            votes_cast, total_eligible
        );
    }

    // Options in order of first appearance.
    let mut tally: Vec<OptionCount> = Vec::new();
    let mut tally_index: HashMap<&str, usize> = HashMap::new();
    for &(_, option) in cast_votes.iter() {
        match tally_index.get(option) {
            Some(&idx) => tally[idx].count += 1,
            None => {
                tally_index.insert(option, tally.len());
                tally.push(OptionCount {
                    option: option.to_string(),
                    count: 1,
                });
            }
        }
    }
    // Stable: equal counts stay in order of appearance.
    tally.sort_by_key(|oc| oc.count);
    debug!("tally: sorted tally: {:?}", tally);

    info!(
        "tally: {} vote(s), {} abstention(s), {} eligible, {} error(s)",
        votes_cast,
        abstentions,
        total_eligible,
        errors.len()
    );

    TallyResult {
        tally,
        total_eligible,
        votes_cast,
        abstentions,
        errors,
    }
}

impl TallyResult {
    /// The share of eligible voters that picked an option, in percent.
    ///
    /// Not guarded against an empty list of tokens: the result is then `NaN`
    /// or infinite.
    pub fn percentage(&self, count: u64) -> f64 {
        (count as f64 / self.total_eligible as f64) * 100.0
    }

    /// The text summary of the tally.
    ///
    /// The errors come first, followed by the options by increasing count
    /// and the overall counters. Lines are separated by `\n`, without a final
    /// newline.
    pub fn report(&self) -> String {
        let mut lines: Vec<String> = self.errors.clone();
        lines.push("".to_string());
        lines.push("Results:".to_string());
        for oc in self.tally.iter() {
            lines.push(format!(
                "Option {}: {} {}%",
                oc.option,
                oc.count,
                format_number(self.percentage(oc.count))
            ));
        }
        lines.push("".to_string());
        lines.push(format!(
            "{} Vote(s) / {} Abstain(s) / {} Total",
            self.votes_cast, self.abstentions, self.total_eligible
        ));
        lines.join("\n")
    }
}

/// Formats a number the way a browser prints it.
///
/// This is the shortest representation that reads back to the same value:
/// whole numbers have no fractional part (`50`), very large and very small
/// magnitudes use an exponent (`1e+21`, `1e-7`), and the special values are
/// spelled `NaN` and `Infinity`.
pub fn format_number(x: f64) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }
    if x < 0.0 {
        return format!("-{}", format_number(-x));
    }
    if x.is_infinite() {
        return "Infinity".to_string();
    }

    // Shortest round-trip digits, as d.ddde[-]x
    let sci = format!("{:e}", x);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    let n = exp + 1;

    if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int_part, frac_part) = digits.split_at(n as usize);
        format!("{}.{}", int_part, frac_part)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let e = n - 1;
        let sign = if e < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{}e{}{}", first, sign, e.abs())
        } else {
            format!("{}.{}e{}{}", first, rest, sign, e.abs())
        }
    }
}

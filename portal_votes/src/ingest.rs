// Primitives for reading the token list and the Google Forms export.
//
// Both files are read line by line and split on commas by hand: the export
// has no quoting and a line with an extra comma must be rejected, which a CSV
// reader would happily accept.

use log::debug;

use crate::config::*;

/// Trims a line, including carriage returns and a byte order mark.
fn clean_line(line: &str) -> &str {
    line.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Reads the list of eligible tokens: one token per line, no header.
/// Blank lines are skipped.
pub fn parse_tokens(text: &str) -> Vec<String> {
    let tokens: Vec<String> = text
        .split('\n')
        .map(clean_line)
        .filter(|l| !l.is_empty())
        .map(|l| l.to_string())
        .collect();
    debug!("parse_tokens: {} token(s)", tokens.len());
    tokens
}

/// Reads the responses exported from the form.
///
/// The first line is the header and is skipped. Each other non-blank line
/// must be `time,token,option`. If any line has another number of fields, the
/// form asked more than one question and nothing is returned.
pub fn parse_votes(text: &str) -> Result<Vec<Vote>, IngestError> {
    let mut res: Vec<Vote> = Vec::new();
    for (idx, raw) in text.split('\n').enumerate().skip(1) {
        let line = clean_line(raw);
        if line.is_empty() {
            continue;
        }
        let lineno = idx + 1;
        let fields: Vec<&str> = line.split(',').collect();
        debug!("parse_votes: lineno: {:?} fields: {:?}", lineno, fields);
        match fields.as_slice() {
            [time, token, option] => res.push(Vote::new(time, token, option)),
            _ => {
                return Err(IngestError::MultipleQuestions {
                    lineno,
                    fields: fields.len(),
                })
            }
        }
    }
    Ok(res)
}

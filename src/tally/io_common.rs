// Reading inputs and writing outputs.

use std::path::{Path, PathBuf};

use crate::tally::*;

/// Destination name that sends an output to the standard output.
pub const STDOUT: &str = "stdout";

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or(path)
        .to_string()
}

pub fn resolve_path(root: &str, path: &str) -> String {
    let p: PathBuf = [root, path].iter().collect();
    p.as_path().display().to_string()
}

pub fn read_input(path: &str) -> PortalResult<String> {
    let contents = fs::read_to_string(path).context(ReadingFileSnafu { path })?;
    debug!("read_input: {:?}: {} bytes", path, contents.len());
    Ok(contents)
}

/// Writes to the given file, or to the standard output if no file is given.
pub fn write_output(dest: Option<&str>, content: &str) -> PortalResult<()> {
    match dest {
        None | Some(STDOUT) | Some("") => {
            println!("{}", content);
            Ok(())
        }
        Some(path) => {
            info!("Writing {:?}", path);
            fs::write(path, content).context(WritingFileSnafu { path })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names() {
        assert_eq!(simplify_file_name("/tmp/votes/results.csv"), "results.csv");
        assert_eq!(simplify_file_name("tokens.csv"), "tokens.csv");
    }

    #[test]
    fn relative_paths() {
        assert_eq!(resolve_path("/votes", "tokens.csv"), "/votes/tokens.csv");
        assert_eq!(resolve_path("", "tokens.csv"), "tokens.csv");
        assert_eq!(resolve_path("/votes", "/data/tokens.csv"), "/data/tokens.csv");
    }

    #[test]
    fn write_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("report.txt").display().to_string();
        write_output(Some(p.as_str()), "Results:").unwrap();
        assert_eq!(read_input(&p).unwrap(), "Results:");
    }
}

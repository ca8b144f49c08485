use std::fs;
use std::io::Write;
use std::path::Path;

use log::info;

use crate::core::sections::TargetHeadingSet;
use crate::error::MergeError;

/// Trimmed, non-blank lines of newline-delimited text.
pub fn parse_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read the caller's question list, one question per line.
pub fn read_questions<P: AsRef<Path>>(path: P) -> Result<Vec<String>, MergeError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|e| MergeError::input(path, e))?;
    let questions = parse_lines(&raw);
    info!("read {} questions from {}", questions.len(), path.display());
    Ok(questions)
}

/// Load a previously saved matched-headings file.
pub fn load_matched_headings<P: AsRef<Path>>(path: P) -> Result<TargetHeadingSet, MergeError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|e| MergeError::input(path, e))?;
    let headings: TargetHeadingSet = parse_lines(&raw).into_iter().collect();
    info!("loaded {} matched headings from {}", headings.len(), path.display());
    Ok(headings)
}

/// Persist matched headings, one per line, replacing `path` atomically.
pub fn save_matched_headings<P: AsRef<Path>>(path: P, headings: &TargetHeadingSet) -> Result<(), MergeError> {
    let path = path.as_ref();
    let write_err = |e: std::io::Error| MergeError::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    for heading in headings.iter() {
        writeln!(tmp, "{}", heading).map_err(write_err)?;
    }
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    info!("saved {} matched headings to {}", headings.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse_lines("  a \n\n\t\nb\r\n"), vec!["a", "b"]);
    }

    #[test]
    fn saved_headings_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matched_questions.txt");
        let headings: TargetHeadingSet = ["2. Scope", "1. Overview"].into_iter().collect();

        save_matched_headings(&path, &headings).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1. Overview\n2. Scope\n");
        assert_eq!(load_matched_headings(&path).unwrap(), headings);
    }

    #[test]
    fn missing_question_file_is_input_not_found() {
        let err = read_questions("/no/such/prompt.txt").unwrap_err();
        assert!(matches!(err, MergeError::InputNotFound { .. }));
    }
}

use std::path::Path;

use crate::error::PipelineError;

/// Load a one-literal-per-line word list (interjections, expressions).
/// Blank lines are skipped; entries keep their case, matching is the
/// pattern compiler's concern.
pub fn load_word_list(path: &Path) -> Result<Vec<String>, PipelineError> {
    let content = std::fs::read_to_string(path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_word_list() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "uh\num\n\nhmm\n").unwrap();

        let list = load_word_list(file.path()).unwrap();
        assert_eq!(list, vec!["uh", "um", "hmm"]);
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(load_word_list(Path::new("/nonexistent/interjections.txt")).is_err());
    }
}

use std::path::Path;

use regex::Regex;

use crate::error::PipelineError;
use crate::io::config::load_word_list;
use crate::models::CleaningMeasures;

use super::normalize::normalize_sentence;
use super::patterns::{
    compile_expression_patterns, compile_interjection_patterns, count_words,
    remove_errors, remove_expressions, remove_incomplete_words_and_phrases,
    remove_interjections, remove_markers_and_symbols, remove_parentheses, remove_pauses,
    remove_repetitions, remove_retracings,
};
use super::synonyms::SynonymMap;

/// Optional per-corpus cleaning configuration.
///
/// Interjection and expression removal only run when a word list was
/// supplied; synonym reduction only when a synonym map was supplied.
#[derive(Debug, Default)]
pub struct CleaningConfig {
    pub interjections: Option<Vec<Regex>>,
    pub expressions: Option<Vec<Regex>>,
    pub synonyms: Option<SynonymMap>,
}

impl CleaningConfig {
    /// Load configuration from the optional file paths given on the CLI
    pub fn from_paths(
        interjections: Option<&Path>,
        expressions: Option<&Path>,
        synonyms: Option<&Path>,
    ) -> Result<Self, PipelineError> {
        let interjections = match interjections {
            Some(path) => {
                let literals = load_word_list(path)?;
                Some(
                    compile_interjection_patterns(&literals)
                        .map_err(|e| PipelineError::config(path, e.to_string()))?,
                )
            }
            None => None,
        };
        let expressions = match expressions {
            Some(path) => {
                let literals = load_word_list(path)?;
                Some(
                    compile_expression_patterns(&literals)
                        .map_err(|e| PipelineError::config(path, e.to_string()))?,
                )
            }
            None => None,
        };
        let synonyms = match synonyms {
            Some(path) => Some(SynonymMap::from_path(path)?),
            None => None,
        };

        Ok(Self {
            interjections,
            expressions,
            synonyms,
        })
    }
}

/// Outcome of cleaning one transcript line.
///
/// `text` is `None` when the line reduced to nothing; its measures record
/// is still returned, zero-valued, so every input line has a record.
#[derive(Debug)]
pub struct CleanedLine {
    pub text: Option<String>,
    pub reduced: Option<String>,
    pub measures: CleaningMeasures,
}

impl CleanedLine {
    pub fn is_dropped(&self) -> bool {
        self.text.is_none()
    }
}

/// Run the full cleaning pipeline over one line of dialog.
///
/// Pass order is load-bearing: interjections and expressions must go before
/// incomplete-word stripping because their disfluency markers overlap, and
/// the counted bracket annotations must be resolved before the generic
/// symbol stripper destroys their syntax.
pub fn clean_line(line: &str, config: &CleaningConfig) -> Result<CleanedLine, PipelineError> {
    let (clean, pauses) = remove_pauses(line);
    let clean = remove_parentheses(&clean);

    let (clean, nb_interjections) = match &config.interjections {
        Some(patterns) => remove_interjections(&clean, patterns),
        None => (clean, 0),
    };
    let (clean, nb_expressions) = match &config.expressions {
        Some(patterns) => remove_expressions(&clean, patterns),
        None => (clean, 0),
    };

    let (clean, nb_inc_words, nb_inc_phrases) = remove_incomplete_words_and_phrases(&clean);
    let (clean, nb_errors) = remove_errors(&clean)?;
    let (clean, nb_repetitions) = remove_repetitions(&clean)?;
    let (clean, nb_retracings) = remove_retracings(&clean)?;
    let clean = remove_markers_and_symbols(&clean);

    let total_word_count = count_words(&clean);

    let Some(text) = normalize_sentence(&clean) else {
        // Line had no content left; zero-valued record for bookkeeping
        return Ok(CleanedLine {
            text: None,
            reduced: None,
            measures: CleaningMeasures::default(),
        });
    };

    let (reduced, nb_synonyms) = match &config.synonyms {
        Some(map) => {
            let (reduced, count) = map.reduce(&text);
            (normalize_sentence(&reduced), count)
        }
        None => (None, 0),
    };

    let measures = CleaningMeasures {
        nb_pauses_total: pauses.total(),
        nb_pauses_short: pauses.short,
        nb_pauses_medium: pauses.medium,
        nb_pauses_long: pauses.long,
        nb_pauses_other: pauses.other,
        nb_interjections,
        nb_expressions,
        nb_inc_words,
        nb_inc_phrases,
        nb_errors,
        nb_repetitions,
        nb_retracings,
        nb_synonyms,
        total_word_count,
    };

    Ok(CleanedLine {
        text: Some(text),
        reduced,
        measures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaning::patterns::compile_interjection_patterns;

    fn config_with_interjections(literals: &[&str]) -> CleaningConfig {
        let literals: Vec<String> = literals.iter().map(|s| s.to_string()).collect();
        CleaningConfig {
            interjections: Some(compile_interjection_patterns(&literals).unwrap()),
            expressions: None,
            synonyms: None,
        }
    }

    #[test]
    fn test_full_pipeline_line() {
        let config = config_with_interjections(&["uh"]);
        let cleaned =
            clean_line("well uh (.) he had two mouses [: mice] [*] yesterday", &config).unwrap();

        let text = cleaned.text.unwrap();
        assert!(text.contains("mice"));
        assert!(!text.contains("mouses"));
        assert!(!text.contains("uh "));
        assert_eq!(cleaned.measures.nb_pauses_short, 1);
        assert_eq!(cleaned.measures.nb_pauses_total, 1);
        assert_eq!(cleaned.measures.nb_interjections, 1);
        assert_eq!(cleaned.measures.nb_errors, 1);
        assert!(cleaned.measures.total_word_count >= 5);
    }

    #[test]
    fn test_empty_line_is_dropped_with_zero_measures() {
        let config = CleaningConfig::default();
        let cleaned = clean_line("(.) (..) [*]", &config).unwrap();

        assert!(cleaned.is_dropped());
        assert_eq!(cleaned.measures, CleaningMeasures::default());
    }

    #[test]
    fn test_pipeline_idempotent_on_clean_text() {
        let config = CleaningConfig::default();
        let first = clean_line("the boy is on the stool", &config).unwrap();
        let text = first.text.clone().unwrap();

        let second = clean_line(&text, &config).unwrap();
        assert_eq!(second.text.as_deref(), Some(text.as_str()));
        assert_eq!(second.measures.nb_pauses_total, 0);
        assert_eq!(second.measures.nb_errors, 0);
        assert_eq!(second.measures.nb_repetitions, 0);
        assert_eq!(second.measures.nb_retracings, 0);
    }

    #[test]
    fn test_repetition_counted_in_pipeline() {
        let config = CleaningConfig::default();
        let cleaned = clean_line("<I wanted> [/] I wanted to go", &config).unwrap();

        assert_eq!(cleaned.measures.nb_repetitions, 1);
        assert_eq!(cleaned.text.as_deref(), Some("I wanted to go."));
    }
}

use std::ops::{Add, AddAssign};

use serde::Serialize;

use super::participant::ParticipantInfo;

/// Named counters exported per measure, in output column order
pub const MEASURE_COLUMNS: [&str; 13] = [
    "nbPausesTotal",
    "nbPausesShort",
    "nbPausesMedium",
    "nbPausesLong",
    "nbPausesOther",
    "nbInterjections",
    "nbExpressions",
    "nbIncWords",
    "nbIncPhrases",
    "nbErrors",
    "nbRepetitions",
    "nbRetracings",
    "nbSynonyms",
];

/// Per-line cleaning counters.
///
/// One record per cleaned line; records sum across lines and files. The
/// pause subtypes always add up to `nb_pauses_total`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CleaningMeasures {
    pub nb_pauses_total: u32,
    pub nb_pauses_short: u32,
    pub nb_pauses_medium: u32,
    pub nb_pauses_long: u32,
    pub nb_pauses_other: u32,
    pub nb_interjections: u32,
    pub nb_expressions: u32,
    pub nb_inc_words: u32,
    pub nb_inc_phrases: u32,
    pub nb_errors: u32,
    pub nb_repetitions: u32,
    pub nb_retracings: u32,
    pub nb_synonyms: u32,
    pub total_word_count: u32,
}

impl CleaningMeasures {
    /// Counter value by exported column name
    pub fn get(&self, name: &str) -> u32 {
        match name {
            "nbPausesTotal" => self.nb_pauses_total,
            "nbPausesShort" => self.nb_pauses_short,
            "nbPausesMedium" => self.nb_pauses_medium,
            "nbPausesLong" => self.nb_pauses_long,
            "nbPausesOther" => self.nb_pauses_other,
            "nbInterjections" => self.nb_interjections,
            "nbExpressions" => self.nb_expressions,
            "nbIncWords" => self.nb_inc_words,
            "nbIncPhrases" => self.nb_inc_phrases,
            "nbErrors" => self.nb_errors,
            "nbRepetitions" => self.nb_repetitions,
            "nbRetracings" => self.nb_retracings,
            "nbSynonyms" => self.nb_synonyms,
            "totalWordCount" => self.total_word_count,
            _ => 0,
        }
    }

    /// Ratio of a counter to the total word count (0 when no words)
    pub fn ratio(&self, name: &str) -> f64 {
        if self.total_word_count == 0 {
            return 0.0;
        }
        f64::from(self.get(name)) / f64::from(self.total_word_count)
    }
}

impl AddAssign<&CleaningMeasures> for CleaningMeasures {
    fn add_assign(&mut self, rhs: &CleaningMeasures) {
        self.nb_pauses_total += rhs.nb_pauses_total;
        self.nb_pauses_short += rhs.nb_pauses_short;
        self.nb_pauses_medium += rhs.nb_pauses_medium;
        self.nb_pauses_long += rhs.nb_pauses_long;
        self.nb_pauses_other += rhs.nb_pauses_other;
        self.nb_interjections += rhs.nb_interjections;
        self.nb_expressions += rhs.nb_expressions;
        self.nb_inc_words += rhs.nb_inc_words;
        self.nb_inc_phrases += rhs.nb_inc_phrases;
        self.nb_errors += rhs.nb_errors;
        self.nb_repetitions += rhs.nb_repetitions;
        self.nb_retracings += rhs.nb_retracings;
        self.nb_synonyms += rhs.nb_synonyms;
        self.total_word_count += rhs.total_word_count;
    }
}

impl Add for CleaningMeasures {
    type Output = CleaningMeasures;

    fn add(mut self, rhs: CleaningMeasures) -> CleaningMeasures {
        self += &rhs;
        self
    }
}

impl<'a> std::iter::Sum<&'a CleaningMeasures> for CleaningMeasures {
    fn sum<I: Iterator<Item = &'a CleaningMeasures>>(iter: I) -> Self {
        let mut total = CleaningMeasures::default();
        for measures in iter {
            total += measures;
        }
        total
    }
}

/// Per-file aggregate exported to the corpus measures table: one summed
/// measures record tied to the participant parsed from the filename
#[derive(Debug, Clone, Default, Serialize)]
pub struct CorpusRecord {
    pub participant: ParticipantInfo,
    pub measures: CleaningMeasures,
}

impl CorpusRecord {
    /// Sum a file's per-line records into one corpus row
    pub fn from_lines(participant: ParticipantInfo, lines: &[CleaningMeasures]) -> Self {
        Self {
            participant,
            measures: lines.iter().sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregation_and_ratio() {
        let first = CleaningMeasures {
            nb_pauses_total: 3,
            total_word_count: 10,
            ..Default::default()
        };
        let second = CleaningMeasures {
            nb_pauses_total: 5,
            total_word_count: 20,
            ..Default::default()
        };

        let corpus: CleaningMeasures = [first, second].iter().sum();
        assert_eq!(corpus.nb_pauses_total, 8);
        assert_eq!(corpus.total_word_count, 30);
        assert!((corpus.ratio("nbPausesTotal") - 8.0 / 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_ratio_with_no_words() {
        let empty = CleaningMeasures::default();
        assert_eq!(empty.ratio("nbErrors"), 0.0);
    }

    #[test]
    fn test_get_matches_fields() {
        let measures = CleaningMeasures {
            nb_errors: 2,
            nb_retracings: 4,
            ..Default::default()
        };
        assert_eq!(measures.get("nbErrors"), 2);
        assert_eq!(measures.get("nbRetracings"), 4);
        assert_eq!(measures.get("nbSynonyms"), 0);
    }
}

use std::fmt::Write as _;
use std::path::Path;

use crate::error::PipelineError;
use crate::models::{CorpusRecord, Sentence, MEASURE_COLUMNS};

fn ensure_parent(path: &Path) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Write cleaned dialog lines, one per line
pub fn save_dialog(path: &Path, lines: &[String]) -> Result<(), PipelineError> {
    ensure_parent(path)?;
    let mut content = lines.join("\n");
    content.push('\n');
    std::fs::write(path, content)?;
    Ok(())
}

/// Write tagged sentences as `surface lemma tag [certainty]` token lines
/// with a blank line separating sentences
pub fn save_tags(path: &Path, sentences: &[Sentence]) -> Result<(), PipelineError> {
    ensure_parent(path)?;
    let mut content = String::new();

    for sentence in sentences {
        for word in sentence {
            match word.certainty {
                Some(certainty) => {
                    let _ = writeln!(
                        content,
                        "{} {} {} {}",
                        word.surface, word.lemma, word.pos, certainty
                    );
                }
                None => {
                    let _ = writeln!(content, "{} {} {}", word.surface, word.lemma, word.pos);
                }
            }
        }
        content.push('\n');
    }

    std::fs::write(path, content)?;
    Ok(())
}

/// Write the per-file measures table: one row per corpus file with raw
/// counters, their word-count ratios, the word total and the diagnostic
/// status parsed from the filename
pub fn write_measures_csv(path: &Path, records: &[CorpusRecord]) -> Result<(), PipelineError> {
    ensure_parent(path)?;
    let mut content = String::new();

    content.push_str("idParticipant,interviewNumber");
    for column in MEASURE_COLUMNS {
        let _ = write!(content, ",{column},{column}Ratio");
    }
    content.push_str(",totalWordCount,status\n");

    for record in records {
        let _ = write!(
            content,
            "{},{}",
            record.participant.id_participant, record.participant.interview_number
        );
        for column in MEASURE_COLUMNS {
            let _ = write!(
                content,
                ",{},{}",
                record.measures.get(column),
                record.measures.ratio(column)
            );
        }
        let _ = writeln!(
            content,
            ",{},{}",
            record.measures.total_word_count, record.participant.status
        );
    }

    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CleaningMeasures, ParticipantInfo, PosTag, TaggedWord};

    #[test]
    fn test_save_dialog_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CleanedDialogs/PAR/Original/x.txt");

        save_dialog(&path, &["One line.".to_string(), "Two.".to_string()]).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "One line.\nTwo.\n");
    }

    #[test]
    fn test_save_tags_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tags.txt");

        let sentences = vec![
            vec![
                TaggedWord::new("The", "the", PosTag::Det),
                TaggedWord {
                    certainty: Some(0.87),
                    ..TaggedWord::new("boy", "boy", PosTag::Noun)
                },
            ],
            vec![TaggedWord::new("Runs", "run", PosTag::Verb)],
        ];
        save_tags(&path, &sentences).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "The the DET\nboy boy NOUN 0.87\n\nRuns run VERB\n\n");
    }

    #[test]
    fn test_measures_csv_header_and_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("measures.csv");

        let record = CorpusRecord {
            participant: ParticipantInfo {
                status: "control".to_string(),
                id_participant: "1042".to_string(),
                interview_number: "2a".to_string(),
            },
            measures: CleaningMeasures {
                nb_pauses_total: 4,
                nb_pauses_short: 4,
                total_word_count: 16,
                ..Default::default()
            },
        };
        write_measures_csv(&path, &[record]).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let mut lines = written.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("idParticipant,interviewNumber,nbPausesTotal,nbPausesTotalRatio"));
        assert!(header.ends_with("totalWordCount,status"));

        let row = lines.next().unwrap();
        assert!(row.starts_with("1042,2a,4,0.25,4,0.25"));
        assert!(row.ends_with("16,control"));
    }
}

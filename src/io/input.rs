use std::path::Path;

use crate::error::PipelineError;
use crate::models::{PosTag, Sentence, TaggedWord};

// CHAT-format line prefix carrying the morphological tier
const MORPHOLOGY_CODE: &str = "%mor:\t";

/// One speaker utterance extracted from a two-speaker chat transcript
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialogLine {
    /// Raw dialog text, continuation lines folded in
    pub text: String,
    /// Morphological tier accompanying the utterance, when present
    pub morphology: String,
    /// 1-based utterance order within the transcript
    pub position: usize,
    /// Speaker code that produced the utterance (e.g. `*PAR:`)
    pub speaker: String,
}

/// Read a transcript into processable lines. Chat files keep their
/// physical lines for the speaker-code parser; plain text files get a
/// naive sentence segmentation.
pub fn read_transcript_lines(path: &Path, is_chat_file: bool) -> Result<Vec<String>, PipelineError> {
    let content = std::fs::read_to_string(path)?;

    if is_chat_file {
        Ok(content.replace('\r', "").split('\n').map(str::to_string).collect())
    } else {
        Ok(split_sentences(&content))
    }
}

/// Naive sentence segmentation for plain-text transcripts: break after
/// `.`, `?` or `!`. Clinical transcripts rarely contain abbreviations, so
/// this stays deliberately simple.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    for ch in text.chars() {
        current.push(ch);
        if matches!(ch, '.' | '?' | '!') {
            let sentence = current.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            current.clear();
        }
    }

    let rest = current.trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }

    sentences
}

/// Split a chat transcript into the two speakers' dialog lines.
///
/// A speaker line starts with its code (`*PAR:`/`*EXP:`); `%mor:` lines
/// attach the morphological tier to the pending utterance and lines
/// starting with a tab continue whichever tier is open. Any other line
/// closes the pending utterance.
pub fn extract_two_speaker_dialogs(
    lines: &[String],
    speaker_1_code: &str,
    speaker_2_code: &str,
) -> (Vec<DialogLine>, Vec<DialogLine>) {
    let mut speaker_1_dialog = Vec::new();
    let mut speaker_2_dialog = Vec::new();

    let mut current = DialogLine::default();
    let mut count = 0usize;
    let mut in_morphology = false;

    let mut flush = |current: &mut DialogLine,
                     speaker_1_dialog: &mut Vec<DialogLine>,
                     speaker_2_dialog: &mut Vec<DialogLine>| {
        if !current.text.is_empty() {
            let done = std::mem::take(current);
            if done.speaker == speaker_1_code {
                speaker_1_dialog.push(done);
            } else if done.speaker == speaker_2_code {
                speaker_2_dialog.push(done);
            }
        } else {
            *current = DialogLine::default();
        }
    };

    for line in lines {
        if line.starts_with('\t') {
            let folded = line.replace('\t', " ");
            if in_morphology {
                current.morphology.push_str(&folded);
            } else {
                current.text.push_str(&folded);
            }
        } else if let Some(tier) = line.strip_prefix(MORPHOLOGY_CODE) {
            current.morphology = tier.to_string();
            in_morphology = true;
        } else {
            in_morphology = false;
            if count > 0 {
                current.position = count;
                flush(&mut current, &mut speaker_1_dialog, &mut speaker_2_dialog);
            }

            for code in [speaker_1_code, speaker_2_code] {
                if line.starts_with(code) {
                    current.text = line.get(code.len() + 1..).unwrap_or("").to_string();
                    current.speaker = code.to_string();
                    count += 1;
                    break;
                }
            }
        }
    }

    // Close the final utterance when the file doesn't end with a trailer line
    if count > 0 {
        current.position = count;
        flush(&mut current, &mut speaker_1_dialog, &mut speaker_2_dialog);
    }

    (speaker_1_dialog, speaker_2_dialog)
}

/// Parse a tagged transcript file into sentences.
///
/// Token lines are whitespace-delimited `surface lemma tag` with an
/// optional fourth certainty column; any line with a different column
/// count acts as a sentence boundary rather than aborting the file.
pub fn parse_tagged_file(path: &Path) -> Result<Vec<Sentence>, PipelineError> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_tagged_lines(&content))
}

/// Parse tagged-token lines from an in-memory string
pub fn parse_tagged_lines(content: &str) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut current: Sentence = Vec::new();

    for line in content.lines() {
        let columns: Vec<&str> = line.split_whitespace().collect();
        match columns.as_slice() {
            [surface, lemma, tag] => {
                current.push(TaggedWord {
                    surface: surface.to_string(),
                    lemma: lemma.to_string(),
                    pos: PosTag::parse(tag),
                    certainty: None,
                });
            }
            [surface, lemma, tag, certainty] => {
                current.push(TaggedWord {
                    surface: surface.to_string(),
                    lemma: lemma.to_string(),
                    pos: PosTag::parse(tag),
                    certainty: certainty.parse::<f64>().ok(),
                });
            }
            _ => {
                // sentence boundary (blank or malformed line)
                if !current.is_empty() {
                    sentences.push(std::mem::take(&mut current));
                }
            }
        }
    }

    if !current.is_empty() {
        sentences.push(current);
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_two_speaker_extraction() {
        let transcript = lines(&[
            "@Begin",
            "*PAR:\twell the boy is falling .",
            "%mor:\tadv|well det|the n|boy aux|be part|fall .",
            "*EXP:\tanything else ?",
            "*PAR:\tthe water (.) overflows .",
            "@End",
        ]);

        let (par, exp) = extract_two_speaker_dialogs(&transcript, "*PAR:", "*EXP:");

        assert_eq!(par.len(), 2);
        assert_eq!(exp.len(), 1);
        assert_eq!(par[0].text, "well the boy is falling .");
        assert!(par[0].morphology.starts_with("adv|well"));
        assert_eq!(par[0].position, 1);
        assert_eq!(par[1].position, 3);
        assert_eq!(exp[0].text, "anything else ?");
    }

    #[test]
    fn test_continuation_lines_folded() {
        let transcript = lines(&[
            "*PAR:\tthe boy is",
            "\treaching for the jar .",
            "@End",
        ]);

        let (par, _) = extract_two_speaker_dialogs(&transcript, "*PAR:", "*EXP:");

        assert_eq!(par.len(), 1);
        assert_eq!(par[0].text, "the boy is reaching for the jar .");
    }

    #[test]
    fn test_final_utterance_without_trailer() {
        let transcript = lines(&["*PAR:\tthat is all ."]);

        let (par, _) = extract_two_speaker_dialogs(&transcript, "*PAR:", "*EXP:");

        assert_eq!(par.len(), 1);
        assert_eq!(par[0].text, "that is all .");
    }

    #[test]
    fn test_split_sentences() {
        let sentences = split_sentences("The boy fell. The girl laughed! Why? done");

        assert_eq!(
            sentences,
            vec!["The boy fell.", "The girl laughed!", "Why?", "done"]
        );
    }

    #[test]
    fn test_parse_tagged_lines() {
        let content = "the the DET\nboy boy NOUN 0.99\n\nruns run VERB\n";
        let sentences = parse_tagged_lines(content);

        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].len(), 2);
        assert_eq!(sentences[0][1].certainty, Some(0.99));
        assert_eq!(sentences[1][0].pos, PosTag::Verb);
    }

    #[test]
    fn test_malformed_line_is_boundary() {
        let content = "the the DET\nbroken line with too many columns here\nboy boy NOUN\n";
        let sentences = parse_tagged_lines(content);

        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].len(), 1);
        assert_eq!(sentences[1].len(), 1);
    }
}

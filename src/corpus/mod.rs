//! Corpus-level drivers: walk a transcript directory, run the cleaning or
//! tag-adjustment flow per file and write each file's outputs as soon as
//! that file completes.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::adjust::{english, french, EnglishAdjustments};
use crate::cleaning::{clean_line, CleaningConfig};
use crate::error::PipelineError;
use crate::io::{
    extract_two_speaker_dialogs, parse_tagged_file, read_transcript_lines, save_dialog, save_tags,
};
use crate::models::{
    CleaningMeasures, CorpusRecord, ParticipantInfo, PosTag, Sentence, UniversalTagMap,
};

const PARTICIPANT_CODE: &str = "*PAR:";
const INTERVIEWER_CODE: &str = "*EXP:";

/// Output directory tree for a corpus run, rooted at the `-o` directory
#[derive(Debug, Clone)]
pub struct OutputLayout {
    pub participant_dialogs: PathBuf,
    pub interviewer_dialogs: PathBuf,
    pub participant_dialogs_reduced: PathBuf,
    pub interviewer_dialogs_reduced: PathBuf,
    pub adjusted_tags: PathBuf,
}

impl OutputLayout {
    pub fn rooted(root: &Path) -> Self {
        Self {
            participant_dialogs: root.join("CleanedDialogs/PAR/Original"),
            interviewer_dialogs: root.join("CleanedDialogs/INT/Original"),
            participant_dialogs_reduced: root.join("CleanedDialogs/PAR/SynonymReduced"),
            interviewer_dialogs_reduced: root.join("CleanedDialogs/INT/SynonymReduced"),
            adjusted_tags: root.join("TaggedDialogsAdjusted"),
        }
    }
}

/// Regular files in the corpus directory, hidden files skipped, sorted by
/// name so runs are reproducible
pub fn list_corpus_files(corpus_path: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let mut files = Vec::new();

    for entry in std::fs::read_dir(corpus_path)? {
        let entry = entry?;
        let path = entry.path();
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.starts_with('.'))
            .unwrap_or(true);
        if hidden || !path.is_file() {
            continue;
        }
        files.push(path);
    }

    files.sort();
    Ok(files)
}

/// Diagnostic classes present in the corpus: the alphabetic filename
/// prefixes before the first `_` (e.g. `AD`, `CTRL`)
pub fn corpus_classes(corpus_path: &Path) -> Result<BTreeSet<String>, PipelineError> {
    let mut classes = BTreeSet::new();

    for path in list_corpus_files(corpus_path)? {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let prefix: String = name.chars().take_while(char::is_ascii_alphabetic).collect();
        if !prefix.is_empty() && name[prefix.len()..].starts_with('_') {
            classes.insert(prefix);
        }
    }

    Ok(classes)
}

fn cleaned_file_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("transcript");
    format!("{stem}.txt")
}

fn participant_for(path: &Path) -> ParticipantInfo {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    match ParticipantInfo::from_file_name(name) {
        Some(info) => info,
        None => {
            warn!(file = %path.display(), "filename does not follow status_id-interview, keeping empty metadata");
            ParticipantInfo::default()
        }
    }
}

/// Clean a list of raw dialog lines. Returns the kept normalized lines,
/// the synonym-reduced variants (when configured) and one measures record
/// per kept line. A line that hits the rewrite iteration cap is skipped
/// with a warning so the rest of the file still goes through.
fn clean_dialog_lines(
    lines: &[String],
    config: &CleaningConfig,
) -> Result<(Vec<String>, Vec<String>, Vec<CleaningMeasures>), PipelineError> {
    let mut cleaned = Vec::new();
    let mut reduced = Vec::new();
    let mut measures = Vec::new();

    for line in lines {
        let outcome = match clean_line(line, config) {
            Ok(outcome) => outcome,
            Err(PipelineError::FixedPoint { limit }) => {
                warn!(limit, line = %line, "line did not settle within the rewrite cap, skipping it");
                continue;
            }
            Err(e) => return Err(e),
        };

        measures.push(outcome.measures);
        if let Some(text) = outcome.text {
            cleaned.push(text);
        }
        if let Some(text) = outcome.reduced {
            reduced.push(text);
        }
    }

    Ok((cleaned, reduced, measures))
}

/// Clean every transcript in the corpus directory.
///
/// `.cha` files are split into participant and interviewer dialogs; plain
/// `.txt` files hold a participant dialog only. Each file's cleaned
/// outputs are written as soon as that file finishes, so a failure later
/// in the batch cannot lose them. Returns one aggregated measures record
/// per processed file.
pub fn clean_corpus(
    corpus_path: &Path,
    config: &CleaningConfig,
    layout: &OutputLayout,
) -> Result<Vec<CorpusRecord>, PipelineError> {
    let mut records = Vec::new();

    for path in list_corpus_files(corpus_path)? {
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let is_chat_file = extension == "cha";
        if !is_chat_file && extension != "txt" {
            debug!(file = %path.display(), "unsupported extension, skipping");
            continue;
        }

        info!(file = %path.display(), "cleaning transcript");
        let participant = participant_for(&path);
        let transcript_lines = read_transcript_lines(&path, is_chat_file)?;
        let out_name = cleaned_file_name(&path);

        let participant_lines = if is_chat_file {
            let (participant_dialog, interviewer_dialog) =
                extract_two_speaker_dialogs(&transcript_lines, PARTICIPANT_CODE, INTERVIEWER_CODE);

            let interviewer_lines: Vec<String> =
                interviewer_dialog.into_iter().map(|d| d.text).collect();
            let (clean, reduced, _) = clean_dialog_lines(&interviewer_lines, config)?;
            save_dialog(&layout.interviewer_dialogs.join(&out_name), &clean)?;
            if config.synonyms.is_some() {
                save_dialog(&layout.interviewer_dialogs_reduced.join(&out_name), &reduced)?;
            }

            participant_dialog.into_iter().map(|d| d.text).collect()
        } else {
            transcript_lines
        };

        let (clean, reduced, line_measures) = clean_dialog_lines(&participant_lines, config)?;
        save_dialog(&layout.participant_dialogs.join(&out_name), &clean)?;
        if config.synonyms.is_some() {
            save_dialog(&layout.participant_dialogs_reduced.join(&out_name), &reduced)?;
        }

        records.push(CorpusRecord::from_lines(participant, &line_measures));
    }

    Ok(records)
}

fn universalize(sentences: &mut [Sentence], map: &UniversalTagMap) {
    for sentence in sentences.iter_mut() {
        for word in sentence.iter_mut() {
            if let PosTag::Native(native) = &word.pos {
                if let Some(universal) = map.get(native) {
                    word.pos = universal.clone();
                }
            }
        }
    }
}

fn adjust_corpus<F>(
    corpus_path: &Path,
    layout: &OutputLayout,
    tag_map: Option<&UniversalTagMap>,
    mut adjust: F,
) -> Result<(), PipelineError>
where
    F: FnMut(&[Sentence]) -> Vec<Sentence>,
{
    for path in list_corpus_files(corpus_path)? {
        info!(file = %path.display(), "adjusting tags");
        let mut sentences = parse_tagged_file(&path)?;
        if let Some(map) = tag_map {
            universalize(&mut sentences, map);
        }

        let adjusted = adjust(&sentences);

        let file_name = path.file_name().map(PathBuf::from).unwrap_or_default();
        save_tags(&layout.adjusted_tags.join(file_name), &adjusted)?;
    }

    Ok(())
}

/// Run the English tag adjuster over every tagged file in the corpus,
/// writing each file's adjusted tags and returning corpus-level counters
pub fn adjust_corpus_english(
    corpus_path: &Path,
    layout: &OutputLayout,
    tag_map: Option<&UniversalTagMap>,
) -> Result<EnglishAdjustments, PipelineError> {
    let mut counts = EnglishAdjustments::default();

    adjust_corpus(corpus_path, layout, tag_map, |sentences| {
        english::adjust_dialog(sentences, &mut counts)
    })?;

    Ok(counts)
}

/// Run the French tag adjuster over every tagged file in the corpus,
/// returning the total number of fixes
pub fn adjust_corpus_french(
    corpus_path: &Path,
    layout: &OutputLayout,
    tag_map: Option<&UniversalTagMap>,
) -> Result<u32, PipelineError> {
    let mut total = 0;

    adjust_corpus(corpus_path, layout, tag_map, |sentences| {
        let (adjusted, count) = french::adjust_dialog(sentences);
        total += count;
        adjusted
    })?;

    Ok(total)
}

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::PipelineError;

/// Retry cap for fixed-point rewrites; well-formed transcripts converge in
/// one or two passes, the cap only guards against adversarial input
const FIXED_POINT_LIMIT: usize = 100;

// Runs of whitespace, collapsed at the entry of every pass so the
// word-boundary patterns below match reliably
static MULTI_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s\s+").unwrap());

// Pauses: (.) short, (..) medium, (...) long, (....)+ other
static PAUSE_SHORT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\.\)").unwrap());
static PAUSE_MEDIUM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\.\.\)").unwrap());
static PAUSE_LONG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\.\.\.\)").unwrap());
static PAUSE_OTHER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\.\.\.\.+\)").unwrap());

static PARENS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[()]").unwrap());

// Incomplete words carry a leading disfluency marker: &word, &+word, &-word
static INC_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"&[a-zA-Z0-9À-ÿ_+-]+").unwrap());
// An ellipsis marks an incomplete phrase; collapsed to a terminal dot
static INC_PHRASE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\.\.").unwrap());

// Error annotations: <original phrase> [: correction] and word [: correction]
static ERR_PHRASE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.*)<.+?>\s\[:(.+?)\](.*)").unwrap());
static ERR_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(.*?)([a-zA-Z0-9À-ÿ_']+?)\s\[:(.+?)\](.*)").unwrap());

// Repetitions ([/]) and retracings ([//])
static REP_PHRASE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.+?> \[/\]").unwrap());
static REP_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9À-ÿ_']+ \[/\]").unwrap());
static RETR_PHRASE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.+?> \[//\]").unwrap());
static RETR_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9À-ÿ_']+ \[//\]").unwrap());

// Residual annotation syntax once the counted passes have run
static MARKER_RESIDUE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(\+,)|^(,)|\[.+?\]|<.+?>|[<>\[\]+="/]|&=[a-zA-ZÀ-ÿ0-9_-]+"#).unwrap()
});
static DISALLOWED_CHAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-zA-Z0-9À-ÿ\s,\._;\-?!'’œ]").unwrap());
// Compound words sometimes transcribed with a "+" joiner: cerf+volant
static COMPOUND_JOIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-z]+)\+([a-z]+)").unwrap());
// Some French transcripts glue a stray leading "0" onto words
static ZERO_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b0([a-zA-ZÀ-ÿ0-9_-])").unwrap());

// Alphabetic token (accented letters included) for the raw word count
static WORD_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-ZÀ-ÿ,'-]+$").unwrap());

/// Pause counts by subtype; the exported total is always their sum
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PauseCounts {
    pub short: u32,
    pub medium: u32,
    pub long: u32,
    pub other: u32,
}

impl PauseCounts {
    pub fn total(&self) -> u32 {
        self.short + self.medium + self.long + self.other
    }
}

/// Collapse runs of whitespace to a single space
pub fn squeeze_whitespace(text: &str) -> String {
    MULTI_SPACE_RE.replace_all(text, " ").into_owned()
}

/// Strip parenthesized dot-runs, counting them by pause length
pub fn remove_pauses(text: &str) -> (String, PauseCounts) {
    let mut clean = squeeze_whitespace(text);
    let mut counts = PauseCounts::default();

    for (re, slot) in [
        (&PAUSE_SHORT_RE, &mut counts.short),
        (&PAUSE_MEDIUM_RE, &mut counts.medium),
        (&PAUSE_LONG_RE, &mut counts.long),
        (&PAUSE_OTHER_RE, &mut counts.other),
    ] {
        *slot = re.find_iter(&clean).count() as u32;
        clean = re.replace_all(&clean, "").into_owned();
    }

    (clean, counts)
}

/// Strip any bare parentheses left after pause removal
pub fn remove_parentheses(text: &str) -> String {
    let clean = squeeze_whitespace(text);
    PARENS_RE.replace_all(&clean, "").into_owned()
}

/// Compile the per-literal interjection patterns: the literal at word
/// boundaries, optionally prefixed by the `&-` disfluency marker
pub fn compile_interjection_patterns(literals: &[String]) -> Result<Vec<Regex>, regex::Error> {
    literals
        .iter()
        .map(|lit| Regex::new(&format!(r"(?i)\b(&[-])*{}\b", regex::escape(lit))))
        .collect()
}

/// Compile the per-literal expression patterns: `&=` followed by the literal
pub fn compile_expression_patterns(literals: &[String]) -> Result<Vec<Regex>, regex::Error> {
    literals
        .iter()
        .map(|lit| Regex::new(&format!(r"(?i)&=\b{}\b", regex::escape(lit))))
        .collect()
}

/// Remove configured interjections, counting matches across all literals
pub fn remove_interjections(text: &str, patterns: &[Regex]) -> (String, u32) {
    strip_literal_patterns(text, patterns)
}

/// Remove configured paralinguistic expressions (e.g. `&=laugh`)
pub fn remove_expressions(text: &str, patterns: &[Regex]) -> (String, u32) {
    strip_literal_patterns(text, patterns)
}

fn strip_literal_patterns(text: &str, patterns: &[Regex]) -> (String, u32) {
    let mut clean = squeeze_whitespace(text);
    let mut count = 0;

    for re in patterns {
        count += re.find_iter(&clean).count() as u32;
        clean = re.replace_all(&clean, "").into_owned();
    }

    (clean, count)
}

/// Remove disfluency-marked incomplete words and collapse ellipses,
/// returning (text, incomplete word count, incomplete phrase count)
pub fn remove_incomplete_words_and_phrases(text: &str) -> (String, u32, u32) {
    let clean = squeeze_whitespace(text);

    let nb_words = INC_WORD_RE.find_iter(&clean).count() as u32;
    let clean = INC_WORD_RE.replace_all(&clean, "").into_owned();

    let nb_phrases = INC_PHRASE_RE.find_iter(&clean).count() as u32;
    let clean = INC_PHRASE_RE.replace_all(&clean, ".").into_owned();

    (clean, nb_words, nb_phrases)
}

/// Replace error annotations with their bracketed correction.
///
/// Applied to a fixed point because resolving one annotation can expose a
/// nested or adjacent one.
pub fn remove_errors(text: &str) -> Result<(String, u32), PipelineError> {
    let mut clean = squeeze_whitespace(text);
    let mut count = 0;

    // <phrase> [: correction]
    let mut iterations = 0;
    while let Some(caps) = ERR_PHRASE_RE.captures(&clean) {
        clean = format!("{}{}{}", &caps[1], &caps[2], &caps[3]);
        count += 1;
        iterations += 1;
        if iterations >= FIXED_POINT_LIMIT {
            return Err(PipelineError::FixedPoint {
                limit: FIXED_POINT_LIMIT,
            });
        }
    }

    // word [: correction]
    let mut iterations = 0;
    while let Some(caps) = ERR_WORD_RE.captures(&clean) {
        clean = format!("{}{}{}", &caps[1], &caps[3], &caps[4]);
        count += 1;
        iterations += 1;
        if iterations >= FIXED_POINT_LIMIT {
            return Err(PipelineError::FixedPoint {
                limit: FIXED_POINT_LIMIT,
            });
        }
    }

    Ok((clean, count))
}

/// Delete repeated spans: `<phrase> [/]`, `word [/]`, and the text-only
/// comma form where a phrase is immediately restated (`la voiture, la
/// voiture`). Iterated to a fixed point.
pub fn remove_repetitions(text: &str) -> Result<(String, u32), PipelineError> {
    let mut clean = squeeze_whitespace(text);
    let mut count = 0;
    let mut iterations = 0;

    loop {
        let before = clean.clone();

        count += REP_PHRASE_RE.find_iter(&clean).count() as u32;
        clean = REP_PHRASE_RE.replace_all(&clean, "").into_owned();

        count += REP_WORD_RE.find_iter(&clean).count() as u32;
        clean = REP_WORD_RE.replace_all(&clean, "").into_owned();

        if let Some((start, end)) = find_comma_duplicate(&clean) {
            clean.replace_range(start..end, "");
            count += 1;
        }

        if clean == before {
            break;
        }
        iterations += 1;
        if iterations >= FIXED_POINT_LIMIT {
            return Err(PipelineError::FixedPoint {
                limit: FIXED_POINT_LIMIT,
            });
        }
    }

    Ok((clean, count))
}

/// Delete retraced spans: `<phrase> [//]` and `word [//]`, to a fixed point
pub fn remove_retracings(text: &str) -> Result<(String, u32), PipelineError> {
    let mut clean = squeeze_whitespace(text);
    let mut count = 0;
    let mut iterations = 0;

    loop {
        let before = clean.clone();

        count += RETR_PHRASE_RE.find_iter(&clean).count() as u32;
        clean = RETR_PHRASE_RE.replace_all(&clean, "").into_owned();

        count += RETR_WORD_RE.find_iter(&clean).count() as u32;
        clean = RETR_WORD_RE.replace_all(&clean, "").into_owned();

        if clean == before {
            break;
        }
        iterations += 1;
        if iterations >= FIXED_POINT_LIMIT {
            return Err(PipelineError::FixedPoint {
                limit: FIXED_POINT_LIMIT,
            });
        }
    }

    Ok((clean, count))
}

/// Locate a phrase followed by ", " that repeats later in the text.
/// Returns the byte range of the phrase plus its trailing comma-space.
fn find_comma_duplicate(text: &str) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let in_class = |b: u8| b == b' ' || b == b',' || b.is_ascii_alphabetic();
    let is_word = |b: u8| b.is_ascii_alphanumeric() || b == b'_';

    for start in 0..bytes.len() {
        if !bytes[start].is_ascii_alphabetic() {
            continue;
        }
        if start > 0 && is_word(bytes[start - 1]) {
            continue;
        }

        let mut end = start;
        while end < bytes.len() && in_class(bytes[end]) {
            end += 1;
        }

        // Prefer the longest candidate phrase within the run
        let commas: Vec<usize> = text[start..end]
            .match_indices(", ")
            .map(|(i, _)| start + i)
            .collect();
        for &comma in commas.iter().rev() {
            let phrase = text[start..comma].trim_end();
            if phrase.is_empty() {
                continue;
            }
            if text[comma + 2..].contains(phrase) {
                return Some((start, comma + 2));
            }
        }
    }

    None
}

/// Strip leftover annotation syntax and disallowed characters, and restore
/// `+`-joined compound words to their hyphenated form
pub fn remove_markers_and_symbols(text: &str) -> String {
    let clean = squeeze_whitespace(text);

    let clean = COMPOUND_JOIN_RE.replace_all(&clean, "${1}-${2}").into_owned();
    let clean = MARKER_RESIDUE_RE.replace_all(&clean, "").into_owned();
    let clean = DISALLOWED_CHAR_RE.replace_all(&clean, "").into_owned();

    ZERO_PREFIX_RE.replace_all(&clean, "${1}").into_owned()
}

/// Count space-delimited alphabetic tokens (accented letters included)
pub fn count_words(text: &str) -> u32 {
    squeeze_whitespace(text)
        .split(' ')
        .filter(|token| WORD_TOKEN_RE.is_match(token))
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pause_counting() {
        let (clean, pauses) = remove_pauses("well (.) um (..) I (...) think");

        assert_eq!(pauses.short, 1);
        assert_eq!(pauses.medium, 1);
        assert_eq!(pauses.long, 1);
        assert_eq!(pauses.other, 0);
        assert_eq!(pauses.total(), 3);
        assert!(!clean.contains("(."));
    }

    #[test]
    fn test_longer_pause_counts_as_other() {
        let (clean, pauses) = remove_pauses("so (.....) yes");
        assert_eq!(pauses.other, 1);
        assert_eq!(pauses.total(), 1);
        assert_eq!(squeeze_whitespace(&clean).trim(), "so yes");
    }

    #[test]
    fn test_pause_removal_idempotent() {
        let (clean, _) = remove_pauses("well (.) then");
        let (again, pauses) = remove_pauses(&clean);
        assert_eq!(pauses.total(), 0);
        assert_eq!(again, clean);
    }

    #[test]
    fn test_interjections_with_and_without_marker() {
        let patterns =
            compile_interjection_patterns(&["uh".to_string(), "um".to_string()]).unwrap();
        let (clean, count) = remove_interjections("well uh I um think", &patterns);

        assert_eq!(count, 2);
        assert!(!clean.contains("uh"));
        assert!(!clean.contains("um"));
        assert!(clean.contains("think"));
    }

    #[test]
    fn test_expressions() {
        let patterns = compile_expression_patterns(&["laugh".to_string()]).unwrap();
        let (clean, count) = remove_expressions("and then &=laugh he fell", &patterns);

        assert_eq!(count, 1);
        assert!(!clean.contains("laugh"));
    }

    #[test]
    fn test_incomplete_words_and_phrases() {
        let (clean, words, phrases) =
            remove_incomplete_words_and_phrases("I &wan want to go ... now");

        assert_eq!(words, 1);
        assert_eq!(phrases, 1);
        assert!(!clean.contains('&'));
        assert!(!clean.contains("..."));
        assert!(clean.contains('.'));
    }

    #[test]
    fn test_error_correction_single_word() {
        let (clean, count) = remove_errors("he had two mouses [: mice] [*] yesterday").unwrap();

        assert_eq!(count, 1);
        assert!(clean.contains("mice"));
        assert!(!clean.contains("mouses"));
    }

    #[test]
    fn test_error_correction_phrase() {
        let (clean, count) = remove_errors("It was <de composed> [: decomposed] [*] .").unwrap();

        assert_eq!(count, 1);
        assert!(clean.contains("decomposed"));
        assert!(!clean.contains("de composed"));
    }

    #[test]
    fn test_repetition_phrase() {
        let (clean, count) = remove_repetitions("<I wanted> [/] I wanted to go").unwrap();

        assert_eq!(count, 1);
        assert_eq!(squeeze_whitespace(&clean).trim(), "I wanted to go");
    }

    #[test]
    fn test_repetition_single_word() {
        let (clean, count) = remove_repetitions("it's [/] it's like a dog").unwrap();

        assert_eq!(count, 1);
        assert!(!clean.contains("[/]"));
        assert!(clean.contains("it's like a dog"));
    }

    #[test]
    fn test_repetition_comma_form() {
        let (clean, count) = remove_repetitions("la voiture, la voiture").unwrap();

        assert_eq!(count, 1);
        assert_eq!(clean.trim(), "la voiture");
    }

    #[test]
    fn test_retracing() {
        let (clean, count) =
            remove_retracings("<I wanted> [//] uh I thought I wanted to invite Margie").unwrap();

        assert_eq!(count, 1);
        assert!(!clean.contains("[//]"));
        assert!(clean.contains("I thought"));
    }

    #[test]
    fn test_markers_and_symbols() {
        let clean = remove_markers_and_symbols("so [*] <like> the cerf+volant % flew");

        assert!(!clean.contains("[*]"));
        assert!(!clean.contains('<'));
        assert!(!clean.contains('%'));
        assert!(clean.contains("cerf-volant"));
    }

    #[test]
    fn test_zero_prefix_stripped() {
        let clean = remove_markers_and_symbols("le 0chien dort");
        assert!(clean.contains("chien"));
        assert!(!clean.contains("0chien"));
    }

    #[test]
    fn test_count_words_accented() {
        assert_eq!(count_words("le garçon était là"), 4);
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words(". !"), 0);
    }
}

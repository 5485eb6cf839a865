use once_cell::sync::Lazy;
use regex::Regex;

use super::patterns::squeeze_whitespace;

// One space directly before sentence-internal punctuation
static SPACE_BEFORE_PUNCT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r" ([.,?])").unwrap());

/// Normalize a cleaned line into sentence shape: collapse whitespace, trim,
/// capitalize the first letter, split named-entity underscores, tighten
/// punctuation spacing and guarantee terminal punctuation.
///
/// Returns `None` when nothing alphabetic remains; callers drop such lines.
pub fn normalize_sentence(text: &str) -> Option<String> {
    let clean = squeeze_whitespace(text);
    let clean = clean.trim();

    let mut chars = clean.chars();
    let clean = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    };

    // Named entities are joined with underscores by the tagger side
    let clean = clean.replace('_', " ");

    let clean = SPACE_BEFORE_PUNCT_RE.replace_all(&clean, "${1}").into_owned();
    let mut clean = squeeze_whitespace(&clean);

    if !clean.ends_with('.') && !clean.ends_with('?') && !clean.ends_with('!') {
        clean.push('.');
    }

    if !clean.chars().any(|c| c.is_alphabetic()) {
        return None;
    }

    Some(clean)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_capitalize_terminate() {
        assert_eq!(normalize_sentence(" hello world "), Some("Hello world.".to_string()));
    }

    #[test]
    fn test_punctuation_only_is_dropped() {
        assert_eq!(normalize_sentence(" . , ?"), None);
        assert_eq!(normalize_sentence(""), None);
    }

    #[test]
    fn test_space_before_punctuation_removed() {
        assert_eq!(
            normalize_sentence("well , I think ."),
            Some("Well, I think.".to_string())
        );
    }

    #[test]
    fn test_underscore_split_and_question_kept() {
        assert_eq!(
            normalize_sentence("who is Mary_Smith ?"),
            Some("Who is Mary Smith?".to_string())
        );
    }

    #[test]
    fn test_accented_first_letter() {
        assert_eq!(normalize_sentence("été chaud"), Some("Été chaud.".to_string()));
    }

    #[test]
    fn test_idempotent_on_normalized_text() {
        let once = normalize_sentence("  the boy   runs  ").unwrap();
        let twice = normalize_sentence(&once).unwrap();
        assert_eq!(once, twice);
    }
}

use crate::models::{PosTag, Sentence, TaggedWord};

/// Repair French contractions the tagger leaves split, plus one known
/// mis-lemmatization.
///
/// "de les" merges into the contracted "des" and "de le" into "du" (one
/// token replaces the pair). "nous sommes" mis-lemmatized as "sommer" is
/// relemmatized to "être"; the ADP retag there reproduces the reference
/// rule table as-is. Surface comparisons are case-insensitive. Returns the
/// rebuilt sentence and the number of fixes.
pub fn adjust_sentence(sentence: &[TaggedWord]) -> (Sentence, u32) {
    let mut adjusted: Sentence = Vec::new();
    let mut count = 0;

    for word in sentence {
        let surface = word.surface.to_lowercase();
        let previous_is_de = adjusted
            .last()
            .map(|prev| prev.surface.to_lowercase() == "de")
            .unwrap_or(false);
        let previous_is_nous = adjusted
            .last()
            .map(|prev| prev.surface.to_lowercase() == "nous")
            .unwrap_or(false);

        if surface == "les" && previous_is_de {
            adjusted.pop();
            adjusted.push(contracted("des", "de les", word));
            count += 1;
        } else if surface == "le" && previous_is_de {
            adjusted.pop();
            adjusted.push(contracted("du", "de le", word));
            count += 1;
        } else if surface == "sommes" && word.lemma.to_lowercase() == "sommer" && previous_is_nous
        {
            let mut fixed = word.clone();
            fixed.lemma = "être".to_string();
            fixed.pos = PosTag::Adp;
            adjusted.push(fixed);
            count += 1;
        } else {
            adjusted.push(word.clone());
        }
    }

    (adjusted, count)
}

/// Adjust a whole tagged dialog, returning the rebuilt sentences and the
/// total fix count
pub fn adjust_dialog(sentences: &[Sentence]) -> (Vec<Sentence>, u32) {
    let mut adjusted = Vec::with_capacity(sentences.len());
    let mut count = 0;

    for sentence in sentences {
        let (fixed, fixes) = adjust_sentence(sentence);
        adjusted.push(fixed);
        count += fixes;
    }

    (adjusted, count)
}

fn contracted(surface: &str, lemma: &str, source: &TaggedWord) -> TaggedWord {
    TaggedWord {
        surface: surface.to_string(),
        lemma: lemma.to_string(),
        pos: PosTag::Adp,
        certainty: source.certainty,
    }
}

use super::pos::PosTag;

/// One tagged token from an external POS tagger: the surface form as it
/// appeared in the transcript, its lemma, the tag, and an optional tagger
/// certainty. Adjustment rules build replacement values rather than
/// mutating tokens in place.
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedWord {
    pub surface: String,
    pub lemma: String,
    pub pos: PosTag,
    pub certainty: Option<f64>,
}

impl TaggedWord {
    pub fn new(surface: &str, lemma: &str, pos: PosTag) -> Self {
        Self {
            surface: surface.to_string(),
            lemma: lemma.to_string(),
            pos,
            certainty: None,
        }
    }

    /// Copy of this token with a different tag
    pub fn retagged(&self, pos: PosTag) -> Self {
        Self {
            pos,
            ..self.clone()
        }
    }

    /// Copy of this token with a different lemma
    pub fn relemmatized(&self, lemma: &str) -> Self {
        Self {
            lemma: lemma.to_string(),
            ..self.clone()
        }
    }
}

/// Ordered token sequence for one sentence
pub type Sentence = Vec<TaggedWord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retagged_keeps_other_fields() {
        let word = TaggedWord::new("sleeping", "sleep", PosTag::Noun);
        let fixed = word.retagged(PosTag::Verb);

        assert_eq!(fixed.surface, "sleeping");
        assert_eq!(fixed.lemma, "sleep");
        assert_eq!(fixed.pos, PosTag::Verb);
        // original untouched
        assert_eq!(word.pos, PosTag::Noun);
    }
}

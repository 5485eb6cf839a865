use crate::models::{PosTag, Sentence, TaggedWord};

/// Running totals for each English adjustment rule, accumulated across a
/// whole corpus run and reported at the end
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnglishAdjustments {
    pub compose_count: u32,
    pub looks_like_count: u32,
    pub aux_verb_count: u32,
    pub conj_count: u32,
    pub tag_reduction_count: u32,
}

impl EnglishAdjustments {
    pub fn total(&self) -> u32 {
        self.compose_count
            + self.looks_like_count
            + self.aux_verb_count
            + self.conj_count
            + self.tag_reduction_count
    }
}

// Auxiliary lemmas whose main verb directly follows ("he can swim")
const AUX_NEXT_LEMMAS: [&str; 7] = ["be", "can", "have", "may", "must", "should", "will"];
// Auxiliary lemmas whose main verb sits two tokens ahead ("do you like it")
const AUX_SKIP_ONE_LEMMAS: [&str; 6] = ["do", "may", "must", "need", "shall", "would"];

/// Default adjustment pipeline for one English sentence
pub fn adjust_sentence(sentence: &[TaggedWord], counts: &mut EnglishAdjustments) -> Sentence {
    let (adjusted, compose) = compose_tagging(sentence);
    counts.compose_count += compose;

    let (adjusted, looks_like) = extract_looks_like(&adjusted);
    counts.looks_like_count += looks_like;

    let (adjusted, aux) = identify_auxiliary_verbs(&adjusted);
    counts.aux_verb_count += aux;

    adjusted
}

/// Default adjustment pipeline over a whole tagged dialog
pub fn adjust_dialog(sentences: &[Sentence], counts: &mut EnglishAdjustments) -> Vec<Sentence> {
    sentences
        .iter()
        .map(|sentence| adjust_sentence(sentence, counts))
        .collect()
}

/// Repair systematic mis-tags around the copula "be".
///
/// Drops the "throat" filler tokens (throat-clearing marks in
/// DementiaBank), relemmatizes `'re` contractions to "be", retags a
/// possessive-marked `'s` to the verb "be", and, right after such a
/// repair, retags a following "-ing" token to VERB (progressive aspect
/// mis-tagged as a noun).
pub fn compose_tagging(sentence: &[TaggedWord]) -> (Sentence, u32) {
    let mut adjusted = Vec::with_capacity(sentence.len());
    let mut count = 0;
    let mut be_pos_flag = false;

    for word in sentence {
        if word.lemma == "throat" {
            continue;
        }

        let mut out = word.clone();

        if word.pos == PosTag::Verb && word.surface == "'re" && word.lemma == "'re" {
            out.lemma = "be".to_string();
            count += 1;
        }

        if be_pos_flag {
            if word.surface.ends_with("ing") && word.pos != PosTag::Verb {
                out.pos = PosTag::Verb;
                count += 1;
            }
            // the flag only survives across dropped "throat" tokens
            be_pos_flag = false;
        }

        if word.pos == PosTag::Adp && word.surface == "'s" && word.lemma == "'s" {
            out.lemma = "be".to_string();
            out.pos = PosTag::Verb;
            be_pos_flag = true;
            count += 1;
        }

        adjusted.push(out);
    }

    (adjusted, count)
}

#[derive(Debug, Default)]
struct LooksLikeState {
    saw_it: bool,
    saw_look: bool,
    saw_as: bool,
}

impl LooksLikeState {
    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Delete the filler constructions "looks like", "looks as though/if" and
/// "it looks like/as though/if" in their entirety.
///
/// The already-emitted "look", "as" and "it" tokens are removed
/// retroactively once the completing word arrives; the scan state resets
/// whenever a non-matching token breaks the sequence. A "though"/"if"
/// token is never re-emitted, matching the reference rule table.
pub fn extract_looks_like(sentence: &[TaggedWord]) -> (Sentence, u32) {
    let mut adjusted: Sentence = Vec::new();
    let mut count = 0;
    let mut state = LooksLikeState::default();

    for word in sentence {
        match word.lemma.as_str() {
            "it" => {
                adjusted.push(word.clone());
                state.saw_it = true;
            }
            "look" => {
                adjusted.push(word.clone());
                state.saw_look = true;
            }
            "like" => {
                if state.saw_look {
                    adjusted.pop();
                    count += 1;
                    if state.saw_it {
                        adjusted.pop();
                        count += 1;
                    }
                } else {
                    adjusted.push(word.clone());
                }
                state.reset();
            }
            "as" => {
                if state.saw_look {
                    state.saw_as = true;
                }
                adjusted.push(word.clone());
            }
            "though" | "if" => {
                if state.saw_as {
                    adjusted.pop(); // "as"
                    count += 1;
                    adjusted.pop(); // "look"
                    count += 1;
                    if state.saw_it {
                        adjusted.pop();
                        count += 1;
                    }
                }
                state.reset();
            }
            _ => {
                adjusted.push(word.clone());
                state.reset();
            }
        }
    }

    (adjusted, count)
}

/// Retag auxiliary constructions from VERB to AUX_VERB.
///
/// Covers the common English auxiliaries: one set expects the main verb
/// immediately after the auxiliary, the other allows one intervening
/// token (do-support, questions).
pub fn identify_auxiliary_verbs(sentence: &[TaggedWord]) -> (Sentence, u32) {
    let mut adjusted = Vec::with_capacity(sentence.len());
    let mut count = 0;

    for (idx, word) in sentence.iter().enumerate() {
        let next_is_verb = sentence
            .get(idx + 1)
            .map(|w| w.pos == PosTag::Verb)
            .unwrap_or(false);
        let second_is_verb = sentence
            .get(idx + 2)
            .map(|w| w.pos == PosTag::Verb)
            .unwrap_or(false);

        if word.pos == PosTag::Verb
            && AUX_NEXT_LEMMAS.contains(&word.lemma.as_str())
            && next_is_verb
        {
            adjusted.push(word.retagged(PosTag::AuxVerb));
            count += 1;
        } else if word.pos == PosTag::Verb
            && AUX_SKIP_ONE_LEMMAS.contains(&word.lemma.as_str())
            && second_is_verb
        {
            adjusted.push(word.retagged(PosTag::AuxVerb));
            count += 1;
        } else {
            adjusted.push(word.clone());
        }
    }

    (adjusted, count)
}

/// Optional pass, not part of the default pipeline: split a coordinated
/// subject "N1 and N2 V" into the two sentences "N1 V" and "N2 V",
/// considering only noun/verb/conjunction/adposition/pronoun tokens.
pub fn resolve_conjunctions(sentence: &[TaggedWord]) -> (Vec<Sentence>, u32) {
    let filtered: Vec<&TaggedWord> = sentence
        .iter()
        .filter(|w| {
            matches!(
                w.pos,
                PosTag::Noun | PosTag::Verb | PosTag::Conj | PosTag::Adp | PosTag::Pron
            )
        })
        .collect();

    for i in 0..filtered.len().saturating_sub(3) {
        let coordinated = filtered[i].pos == PosTag::Noun
            && filtered[i + 1].pos == PosTag::Conj
            && filtered[i + 1].lemma == "and"
            && filtered[i + 2].pos == PosTag::Noun
            && filtered[i + 3].pos == PosTag::Verb;
        if !coordinated {
            continue;
        }

        let before: Sentence = filtered[..i].iter().map(|w| (*w).clone()).collect();
        let after: Sentence = filtered[i + 4..].iter().map(|w| (*w).clone()).collect();

        let mut first = before.clone();
        first.push(filtered[i].clone());
        first.push(filtered[i + 3].clone());
        first.extend(after.iter().cloned());

        let mut second = before;
        second.push(filtered[i + 2].clone());
        second.push(filtered[i + 3].clone());
        second.extend(after);

        return (vec![first, second], 1);
    }

    (vec![sentence.to_vec()], 0)
}

/// Optional pass, not part of the default pipeline: reduce a sentence to
/// its content-word skeleton for basic syntactic pattern analysis.
///
/// Keeps nouns, adpositions and verbs (except "seem"), merges "be" plus a
/// following adjective into a single `be+adj` lemma (undone again when a
/// noun follows), keeps the "and" conjunction, renames existential
/// "there" and the pronoun "it" to nouns when followed by their verb, and
/// drops "I think"-style pronoun-verb pairs.
pub fn reduce_tags(sentence: &[TaggedWord]) -> (Sentence, u32) {
    let mut reduced: Sentence = Vec::new();
    let mut count = 0;
    let mut previous_pos: Option<PosTag> = None;
    let mut existential: Option<TaggedWord> = None;
    let mut existential_flag = false;
    let mut pronoun: Option<TaggedWord> = None;
    let mut pronoun_flag: u8 = 0; // 1 = "it", 2 = "I"
    let mut be_plus_adj_flag = false;

    for word in sentence {
        if be_plus_adj_flag {
            be_plus_adj_flag = false;
            // a noun follows "be+adj": restore the plain "be" verb
            if word.pos == PosTag::Noun {
                if let Some(merged) = reduced.pop() {
                    let mut restored = merged;
                    restored.lemma = "be".to_string();
                    restored.certainty = Some(1.0);
                    reduced.push(restored);
                    count += 1;
                }
            }
        }

        if word.pos == PosTag::Noun || word.pos == PosTag::Adp {
            reduced.push(word.clone());
            previous_pos = Some(word.pos.clone());
            existential_flag = false;
            pronoun_flag = 0;
        }

        if word.pos == PosTag::Verb
            && word.lemma != "seem"
            && pronoun_flag == 0
            && !existential_flag
        {
            reduced.push(word.clone());
            previous_pos = Some(PosTag::Verb);
        }

        if word.pos == PosTag::Adj
            && previous_pos == Some(PosTag::Verb)
            && reduced.last().map(|w| w.lemma == "be").unwrap_or(false)
        {
            if let Some(be) = reduced.pop() {
                let mut merged = be;
                merged.lemma = format!("be+{}", word.lemma);
                previous_pos = Some(merged.pos.clone());
                reduced.push(merged);
                be_plus_adj_flag = true;
                existential_flag = false;
                pronoun_flag = 0;
                count += 1;
            }
        }

        if word.pos == PosTag::Conj && word.lemma == "and" {
            reduced.push(word.clone());
            existential_flag = false;
            pronoun_flag = 0;
        }

        if word.lemma == "there" {
            existential = Some(word.clone());
            existential_flag = true;
            pronoun_flag = 0;
        }

        if word.pos == PosTag::Pron {
            if word.lemma == "it" {
                pronoun_flag = 1;
            } else if word.lemma == "i" {
                pronoun_flag = 2;
            }
            pronoun = Some(word.clone());
            existential_flag = false;
        }

        if word.pos == PosTag::Verb {
            if existential_flag && word.lemma == "be" {
                if let Some(there) = existential.take() {
                    reduced.push(there.retagged(PosTag::Noun));
                }
                reduced.push(word.clone());
                previous_pos = Some(PosTag::Verb);
                existential_flag = false;
                count += 1;
            } else if existential_flag && word.lemma != "seem" {
                reduced.push(word.clone());
                previous_pos = Some(PosTag::Verb);
                existential_flag = false;
            }

            if pronoun_flag == 1 && word.lemma != "seem" {
                if let Some(it) = pronoun.take() {
                    reduced.push(it.retagged(PosTag::Noun));
                }
                reduced.push(word.clone());
                previous_pos = Some(PosTag::Verb);
                pronoun_flag = 0;
                count += 1;
            }

            if pronoun_flag == 2 {
                // "I think" / "I guess": neither pronoun nor verb is kept
                pronoun_flag = 0;
            }
        }
    }

    (reduced, count)
}

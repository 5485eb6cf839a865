use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use crate::error::PipelineError;

/// Part-of-speech tag attached to a token.
///
/// The named variants are the Universal POS categories (plus `AuxVerb`,
/// which the English adjuster assigns to auxiliary constructions). Tags a
/// tagger emits in its own native tagset are carried as `Native` until a
/// [`UniversalTagMap`] maps them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PosTag {
    Adj,
    Adp,
    Adv,
    Aux,
    AuxVerb,
    Cconj,
    Conj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Punct,
    Sconj,
    Verb,
    /// Tagger-native tag not yet universalized
    Native(String),
}

impl PosTag {
    /// Parse a tag string; anything outside the universal set is `Native`
    pub fn parse(s: &str) -> Self {
        match s {
            "ADJ" => PosTag::Adj,
            "ADP" => PosTag::Adp,
            "ADV" => PosTag::Adv,
            "AUX" => PosTag::Aux,
            "AUX_VERB" => PosTag::AuxVerb,
            "CCONJ" => PosTag::Cconj,
            "CONJ" => PosTag::Conj,
            "DET" => PosTag::Det,
            "INTJ" => PosTag::Intj,
            "NOUN" => PosTag::Noun,
            "NUM" => PosTag::Num,
            "PART" => PosTag::Part,
            "PRON" => PosTag::Pron,
            "PUNCT" => PosTag::Punct,
            "SCONJ" => PosTag::Sconj,
            "VERB" => PosTag::Verb,
            other => PosTag::Native(other.to_string()),
        }
    }

    /// Tag string as written in tagged transcript files
    pub fn as_str(&self) -> &str {
        match self {
            PosTag::Adj => "ADJ",
            PosTag::Adp => "ADP",
            PosTag::Adv => "ADV",
            PosTag::Aux => "AUX",
            PosTag::AuxVerb => "AUX_VERB",
            PosTag::Cconj => "CCONJ",
            PosTag::Conj => "CONJ",
            PosTag::Det => "DET",
            PosTag::Intj => "INTJ",
            PosTag::Noun => "NOUN",
            PosTag::Num => "NUM",
            PosTag::Part => "PART",
            PosTag::Pron => "PRON",
            PosTag::Punct => "PUNCT",
            PosTag::Sconj => "SCONJ",
            PosTag::Verb => "VERB",
            PosTag::Native(s) => s,
        }
    }
}

impl fmt::Display for PosTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping from a tagger's native tagset to Universal POS tags.
///
/// Loaded from a plain two-column file, one `native universal` pair per
/// line. Lookups are case-insensitive on the native tag.
#[derive(Debug, Clone, Default)]
pub struct UniversalTagMap {
    map: HashMap<String, PosTag>,
}

impl UniversalTagMap {
    /// Load a mapping file; a line without exactly two columns is fatal
    pub fn from_path(path: &Path) -> Result<Self, PipelineError> {
        let content = std::fs::read_to_string(path)?;
        let mut map = HashMap::new();

        for (number, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let mut columns = line.split_whitespace();
            match (columns.next(), columns.next(), columns.next()) {
                (Some(native), Some(universal), None) => {
                    map.insert(native.to_lowercase(), PosTag::parse(universal));
                }
                _ => {
                    return Err(PipelineError::config(
                        path,
                        format!("expected two columns on line {}", number + 1),
                    ));
                }
            }
        }

        Ok(Self { map })
    }

    /// Universal tag for a native tag, if the mapping knows it
    pub fn get(&self, native: &str) -> Option<&PosTag> {
        self.map.get(&native.to_lowercase())
    }

    /// Number of mapped native tags
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

use std::collections::BTreeMap;
use std::path::Path;

use regex::Regex;

use crate::error::PipelineError;

/// Lexical canonicalization rules loaded from a JSON object mapping a
/// canonical term to its variant list, e.g. `{"woman": ["girl", "mother",
/// "wife"]}`. Applied after cleaning to reduce vocabulary sparsity.
///
/// Canonical keys iterate in sorted order so a run is reproducible;
/// configurations are expected to keep variant sets disjoint.
#[derive(Debug)]
pub struct SynonymMap {
    rules: Vec<(String, Regex)>,
}

impl SynonymMap {
    /// Load and compile a synonym configuration file
    pub fn from_path(path: &Path) -> Result<Self, PipelineError> {
        let content = std::fs::read_to_string(path)?;
        let mapping: BTreeMap<String, Vec<String>> = serde_json::from_str(&content)
            .map_err(|e| PipelineError::config(path, e.to_string()))?;

        let mut rules = Vec::with_capacity(mapping.len());
        for (canonical, variants) in mapping {
            if variants.is_empty() {
                continue;
            }
            let alternation = variants
                .iter()
                .map(|v| regex::escape(v))
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!(r"(?i)\b({})\b", alternation);
            let re = Regex::new(&pattern)
                .map_err(|e| PipelineError::config(path, e.to_string()))?;
            rules.push((canonical, re));
        }

        Ok(Self { rules })
    }

    /// Substitute every variant occurrence with its canonical term,
    /// returning the reduced text and the substitution count
    pub fn reduce(&self, text: &str) -> (String, u32) {
        let mut reduced = text.to_string();
        let mut count = 0;

        for (canonical, re) in &self.rules {
            count += re.find_iter(&reduced).count() as u32;
            reduced = re.replace_all(&reduced, canonical.as_str()).into_owned();
        }

        (reduced, count)
    }

    /// Number of canonical terms configured
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

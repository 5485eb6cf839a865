use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the cleaning and adjustment pipeline.
///
/// Configuration problems are fatal and reported before a batch starts;
/// a `FixedPoint` overrun only affects the offending line, which callers
/// skip with a warning so the rest of the batch proceeds.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A configuration file is missing or malformed
    #[error("configuration error in {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    /// A pattern rewrite did not converge within the iteration cap
    #[error("pattern rewrite did not converge after {limit} passes")]
    FixedPoint { limit: usize },

    /// Underlying filesystem failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl PipelineError {
    /// Shorthand for a configuration error tied to a file path
    pub fn config(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

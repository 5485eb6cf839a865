//! Clinical speech transcript toolkit: cleaning and normalization of
//! CHAT-style transcripts plus rule-based POS tag adjustment for English
//! and French tagger output.

pub mod adjust;
pub mod cleaning;
pub mod corpus;
pub mod error;
pub mod io;
pub mod models;

pub use adjust::EnglishAdjustments;
pub use cleaning::{clean_line, CleanedLine, CleaningConfig, SynonymMap};
pub use corpus::{
    adjust_corpus_english, adjust_corpus_french, clean_corpus, corpus_classes, list_corpus_files,
    OutputLayout,
};
pub use error::PipelineError;
pub use models::{
    CleaningMeasures, CorpusRecord, ParticipantInfo, PosTag, Sentence, TaggedWord,
    UniversalTagMap, MEASURE_COLUMNS,
};

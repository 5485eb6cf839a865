pub mod cleaner;
pub mod normalize;
pub mod patterns;
pub mod synonyms;

pub use cleaner::*;
pub use normalize::*;
pub use patterns::*;
pub use synonyms::*;

pub mod english;
pub mod french;

pub use english::EnglishAdjustments;

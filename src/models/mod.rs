pub mod measures;
pub mod participant;
pub mod pos;
pub mod tagged;

pub use measures::*;
pub use participant::*;
pub use pos::*;
pub use tagged::*;

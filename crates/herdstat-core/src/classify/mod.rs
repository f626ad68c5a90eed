pub mod engine;
pub mod outcome;

pub use engine::{classify, classify_animal, classify_category, PregnancyIndex};
pub use outcome::HerdComposition;

pub mod generation;

pub use generation::{coverage_pairs, GenerationController, GenerationResult};

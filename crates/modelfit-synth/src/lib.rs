//! Mock column synthesis.
//!
//! Fabricates plausible values for columns a model requires but a dataset
//! lacks, producing a reduced sample dataset that can still be submitted for
//! execution. Values come from a name-based heuristic and an injectable RNG;
//! a fixed seed reproduces the same output.

pub mod engine;
pub mod errors;
pub mod heuristics;
pub mod model;
pub mod output;

pub use engine::MockColumnSynthesizer;
pub use errors::SynthError;
pub use heuristics::{MockValue, mock_value, rule_for};
pub use model::{SynthOptions, SynthesizedDataset};

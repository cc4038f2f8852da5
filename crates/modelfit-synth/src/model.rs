use serde::{Deserialize, Serialize};

/// Options for mock column synthesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthOptions {
    /// Maximum number of source rows carried into the output.
    pub sample_rows: usize,
    /// Fixed RNG seed. `None` draws fresh values on every call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SynthOptions {
    fn default() -> Self {
        Self {
            sample_rows: 10,
            seed: None,
        }
    }
}

/// Reduced dataset with mock columns appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesizedDataset {
    /// Re-serialized CSV, newline-joined, no trailing newline.
    pub text: String,
    /// Output header.
    pub columns: Vec<String>,
    /// Columns actually appended (requested columns already present are skipped).
    pub added_columns: Vec<String>,
    pub rows: usize,
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::verdict::StructuralVerdict;

/// Structural-validation response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralReport {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Columns the validator found in the dataset.
    #[serde(default)]
    pub csv_columns: Vec<String>,
    /// Columns the model declares as inputs.
    #[serde(default)]
    pub model_input_columns: Vec<String>,
}

/// Structural response together with its classified verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralCheck {
    pub report: StructuralReport,
    pub verdict: StructuralVerdict,
}

impl StructuralCheck {
    pub fn from_report(report: StructuralReport) -> Self {
        let verdict = StructuralVerdict::classify(&report);
        Self { report, verdict }
    }
}

impl From<StructuralReport> for StructuralCheck {
    fn from(report: StructuralReport) -> Self {
        Self::from_report(report)
    }
}

/// Execution-validation response body. Metrics may be nested.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExecutionReport {
    #[serde(default)]
    pub model_name: String,
    #[serde(default)]
    pub metrics: Map<String, Value>,
}

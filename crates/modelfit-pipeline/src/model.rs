use std::collections::BTreeMap;
use std::fmt;

use modelfit_core::ColumnMatchReport;
use modelfit_eval::{ClassifiedMetrics, OutcomeSummary};
use modelfit_remote::StructuralVerdict;
use modelfit_synth::SynthOptions;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::errors::ErrorKind;

/// How far a run progressed. Never moves backwards within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStage {
    None,
    Csv,
    Model,
    Complete,
}

impl ValidationStage {
    pub fn as_str(self) -> &'static str {
        match self {
            ValidationStage::None => "none",
            ValidationStage::Csv => "csv",
            ValidationStage::Model => "model",
            ValidationStage::Complete => "complete",
        }
    }
}

impl fmt::Display for ValidationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `Auto` stops after the structural check; `Full` runs every stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineMode {
    Auto,
    #[default]
    Full,
}

impl PipelineMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PipelineMode::Auto => "auto",
            PipelineMode::Full => "full",
        }
    }
}

impl fmt::Display for PipelineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineOptions {
    #[serde(default)]
    pub mode: PipelineMode,
    #[serde(default)]
    pub synthesis: SynthOptions,
}

/// Which fallback got the dataset past a missing-column failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackStrategy {
    /// Execution ran on a reduced dataset with mock columns appended.
    SynthesizedDataset,
    /// Execution ran on the candidate column list.
    ColumnList,
}

/// Structural result of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StructuralOutcome {
    Clean,
    /// The dataset failed the strict check but a fallback execution succeeded.
    FallbackApplied {
        missing: Vec<String>,
        strategy: FallbackStrategy,
    },
    Failed {
        reason: String,
    },
}

impl StructuralOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            StructuralOutcome::Clean => "clean",
            StructuralOutcome::FallbackApplied { .. } => "fallback_applied",
            StructuralOutcome::Failed { .. } => "failed",
        }
    }
}

/// Per-stage sub-result.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StageResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub details: Value,
    /// Set when the stage passed only through a fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mock_columns_added: Vec<String>,
}

/// Result of a standalone structural check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvCheckResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub dataset_columns: Vec<String>,
    pub schema_columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mock_columns_added: Vec<String>,
    pub verdict: StructuralVerdict,
    /// Local comparison of the dataset header against the schema.
    pub column_match: ColumnMatchReport,
}

/// Result of a standalone execution check. Metrics are flattened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelCheckResult {
    pub model_name: String,
    pub metrics: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeError {
    pub kind: ErrorKind,
    pub message: String,
}

/// Everything a pipeline run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub run_id: Uuid,
    pub mode: PipelineMode,
    pub stage: ValidationStage,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structural: Option<StructuralOutcome>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csv_result: Option<StageResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_result: Option<StageResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_match: Option<ColumnMatchReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<ClassifiedMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<OutcomeError>,
    pub duration_ms: u128,
}

impl ValidationOutcome {
    pub fn new(run_id: Uuid, mode: PipelineMode) -> Self {
        Self {
            run_id,
            mode,
            stage: ValidationStage::None,
            success: false,
            structural: None,
            csv_result: None,
            model_result: None,
            column_match: None,
            model_name: None,
            metrics: None,
            error: None,
            duration_ms: 0,
        }
    }

    /// Columns synthesized to get past the structural check, if any.
    pub fn mock_columns_added(&self) -> &[String] {
        self.csv_result
            .as_ref()
            .map(|result| result.mock_columns_added.as_slice())
            .unwrap_or_default()
    }

    pub fn summary(&self) -> OutcomeSummary {
        OutcomeSummary {
            run_id: self.run_id.to_string(),
            mode: self.mode.to_string(),
            stage: self.stage.to_string(),
            success: self.success,
            structural: self
                .structural
                .as_ref()
                .map(StructuralOutcome::label)
                .unwrap_or("not_run")
                .to_string(),
            model_name: self.model_name.clone(),
            warning: self
                .csv_result
                .as_ref()
                .and_then(|result| result.warning.clone()),
            mock_columns_added: self.mock_columns_added().to_vec(),
            error: self
                .error
                .as_ref()
                .map(|error| format!("{}: {}", error.kind.as_str(), error.message)),
            duration_ms: self.duration_ms,
        }
    }
}

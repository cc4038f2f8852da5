use modelfit_core::ModelSchema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Machine-readable model description, canonical field names.
///
/// Documents may use the aliases listed in [`crate::normalize_metadata`];
/// they are rewritten to these names before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ModelMetadata {
    /// Model display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Required input columns in declaration order.
    #[serde(default)]
    pub inputs: Vec<ColumnLabel>,
    /// Outcome (prediction target) column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ColumnLabel>,
}

/// A column reference: either a bare label or a descriptive object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ColumnLabel {
    Label(String),
    Spec(ColumnSpec),
}

impl ColumnLabel {
    pub fn label(&self) -> &str {
        match self {
            ColumnLabel::Label(label) => label,
            ColumnLabel::Spec(spec) => &spec.label,
        }
    }
}

/// Descriptive column entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnSpec {
    pub label: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ModelMetadata {
    /// Project the document onto the column contract used for matching.
    pub fn to_model_schema(&self) -> ModelSchema {
        ModelSchema {
            model_name: self.name.clone(),
            required_columns: self
                .inputs
                .iter()
                .map(|input| input.label().to_string())
                .collect(),
            outcome: self.outcome.as_ref().map(|outcome| outcome.label().to_string()),
        }
    }
}

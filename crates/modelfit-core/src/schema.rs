use std::collections::BTreeSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input contract a model declares: required column labels plus its outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ModelSchema {
    /// Model name when the description document provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    /// Required input column labels in declaration order (may repeat).
    pub required_columns: Vec<String>,
    /// Declared outcome label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
}

impl ModelSchema {
    pub fn new(required_columns: Vec<String>) -> Self {
        Self {
            model_name: None,
            required_columns,
            outcome: None,
        }
    }

    /// Required columns treated as a set.
    pub fn required_set(&self) -> BTreeSet<&str> {
        self.required_columns.iter().map(String::as_str).collect()
    }

    /// Required columns in declaration order with duplicates removed.
    pub fn unique_required(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.required_columns
            .iter()
            .filter(|name| seen.insert(name.as_str()))
            .cloned()
            .collect()
    }
}

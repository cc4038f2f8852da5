use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::schema::ModelSchema;

/// Column-set comparison between a dataset header and a model schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMatchReport {
    /// Required by the schema but absent from the dataset.
    pub missing_columns: BTreeSet<String>,
    /// Present in the dataset but unknown to the schema. Informational only.
    pub extra_columns: BTreeSet<String>,
}

impl ColumnMatchReport {
    /// True when every required column is present.
    pub fn is_satisfied(&self) -> bool {
        self.missing_columns.is_empty()
    }
}

/// Compare dataset columns against the schema's required inputs.
///
/// Matching is exact and case-sensitive.
pub fn match_columns<S: AsRef<str>>(
    dataset_columns: &[S],
    schema: &ModelSchema,
) -> ColumnMatchReport {
    let dataset: BTreeSet<&str> = dataset_columns.iter().map(|name| name.as_ref()).collect();
    let required = schema.required_set();

    ColumnMatchReport {
        missing_columns: required
            .difference(&dataset)
            .map(|name| name.to_string())
            .collect(),
        extra_columns: dataset
            .difference(&required)
            .map(|name| name.to_string())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_is_case_sensitive() {
        let schema = ModelSchema::new(vec!["Age".to_string()]);
        let report = match_columns(&["age"], &schema);
        assert!(report.missing_columns.contains("Age"));
        assert!(report.extra_columns.contains("age"));
    }
}

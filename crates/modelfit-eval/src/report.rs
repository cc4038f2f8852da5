use std::collections::BTreeMap;

use modelfit_profile::{ColumnStatistic, ColumnSummary, DatasetProfile};
use serde::{Deserialize, Serialize};

use crate::model::{ClassifiedMetrics, MetricCategory};

/// Flattened view of a validation run, as shown in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeSummary {
    pub run_id: String,
    pub mode: String,
    pub stage: String,
    pub success: bool,
    /// `clean`, `fallback_applied` or `failed`.
    pub structural: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mock_columns_added: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration_ms: u128,
}

/// Render a deterministic markdown report.
pub fn render_report(
    profile: &DatasetProfile,
    outcome: Option<&OutcomeSummary>,
    metrics: Option<&ClassifiedMetrics>,
) -> String {
    let mut lines = Vec::new();

    lines.push("# Modelfit Validation Report".to_string());
    lines.push(String::new());

    if let Some(outcome) = outcome {
        lines.push("## Run summary".to_string());
        lines.push(format!("- run_id: {}", outcome.run_id));
        lines.push(format!("- mode: {}", outcome.mode));
        lines.push(format!("- stage: {}", outcome.stage));
        lines.push(format!("- success: {}", outcome.success));
        lines.push(format!("- structural: {}", outcome.structural));
        if let Some(model_name) = &outcome.model_name {
            lines.push(format!("- model: {model_name}"));
        }
        if let Some(warning) = &outcome.warning {
            lines.push(format!("- warning: {warning}"));
        }
        if !outcome.mock_columns_added.is_empty() {
            lines.push(format!(
                "- mock_columns_added: {}",
                outcome.mock_columns_added.join(", ")
            ));
        }
        if let Some(error) = &outcome.error {
            lines.push(format!("- error: {error}"));
        }
        lines.push(format!("- duration_ms: {}", outcome.duration_ms));
        lines.push(String::new());
    }

    lines.push("## Dataset profile".to_string());
    lines.push(format!("- rows: {}", profile.row_count));
    lines.push(format!("- columns: {}", profile.column_count));
    lines.push(format!("- completeness: {:.2}%", profile.completeness));
    if profile.dropped_rows > 0 {
        lines.push(format!("- dropped_rows: {}", profile.dropped_rows));
    }
    lines.push(String::new());
    lines.push("| column | kind | count | missing | distinct | summary |".to_string());
    lines.push("| --- | --- | --- | --- | --- | --- |".to_string());
    for column in &profile.columns {
        lines.push(column_row(column));
    }
    lines.push(String::new());

    if let Some(metrics) = metrics {
        lines.push("## Metrics".to_string());
        for category in [
            MetricCategory::Performance,
            MetricCategory::Fairness,
            MetricCategory::Explainability,
            MetricCategory::Other,
        ] {
            push_bucket(&mut lines, category.as_str(), metrics.bucket(category));
        }
        lines.push("### bias".to_string());
        lines.push(format!("- bias_score: {:.2}", metrics.bias.bias_score));
        for (name, value) in &metrics.bias.metrics {
            lines.push(format!("- {name}: {value:.4}"));
        }
        lines.push(String::new());
        lines.push("Suggestions:".to_string());
        for suggestion in &metrics.bias.suggestions {
            lines.push(format!("- {suggestion}"));
        }
        lines.push(String::new());
    }

    lines.push("## Recommendations".to_string());
    lines.extend(recommendations(profile, outcome));
    lines.join("\n")
}

fn column_row(column: &ColumnStatistic) -> String {
    let (kind, summary) = match &column.summary {
        ColumnSummary::Numerical(stats) => (
            "numerical",
            format!(
                "min {:.2}, median {:.2}, max {:.2}, mean {:.2}, std {:.2}",
                stats.min, stats.quartiles.median, stats.max, stats.mean, stats.std_dev
            ),
        ),
        ColumnSummary::Categorical(stats) => (
            "categorical",
            stats
                .most_common
                .as_ref()
                .map(|entry| format!("top {} ({})", entry.value, entry.count))
                .unwrap_or_else(|| "-".to_string()),
        ),
    };
    format!(
        "| {} | {} | {} | {} | {} | {} |",
        column.name, kind, column.count, column.missing_count, column.distinct_count, summary
    )
}

fn push_bucket(lines: &mut Vec<String>, title: &str, bucket: &BTreeMap<String, f64>) {
    if bucket.is_empty() {
        return;
    }
    lines.push(format!("### {title}"));
    lines.push("| metric | value |".to_string());
    lines.push("| --- | --- |".to_string());
    for (name, value) in bucket {
        lines.push(format!("| {name} | {value:.4} |"));
    }
    lines.push(String::new());
}

fn recommendations(profile: &DatasetProfile, outcome: Option<&OutcomeSummary>) -> Vec<String> {
    let mut lines = Vec::new();
    if profile.dropped_rows > 0 {
        lines.push("- fix rows whose cell count differs from the header.".to_string());
    }
    if profile.completeness < 90.0 {
        lines.push("- fill or impute missing values before submission.".to_string());
    }
    if let Some(outcome) = outcome {
        if !outcome.mock_columns_added.is_empty() {
            lines.push(
                "- supply the synthesized columns with real data; mock values do not reflect the population."
                    .to_string(),
            );
        }
        if !outcome.success {
            lines.push(format!(
                "- resolve the failure at stage '{}' and rerun the validation.",
                outcome.stage
            ));
        }
    }
    if lines.is_empty() {
        lines.push("- no issues detected; compare profiles across runs for drift.".to_string());
    }
    lines
}

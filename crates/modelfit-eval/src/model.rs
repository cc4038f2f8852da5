use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Semantic category a metric name is sorted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricCategory {
    Performance,
    Fairness,
    Bias,
    Explainability,
    Other,
}

impl MetricCategory {
    /// Categories that are matched by keyword. `Other` collects the rest.
    pub const KEYWORD_CATEGORIES: [MetricCategory; 4] = [
        MetricCategory::Performance,
        MetricCategory::Fairness,
        MetricCategory::Bias,
        MetricCategory::Explainability,
    ];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            MetricCategory::Performance => &[
                "accuracy",
                "precision",
                "recall",
                "f1",
                "auc",
                "roc",
                "mse",
                "rmse",
                "mae",
                "r2",
                "log_loss",
                "specificity",
                "sensitivity",
            ],
            MetricCategory::Fairness => &[
                "demographic_parity",
                "equalized_odds",
                "equal_opportunity",
                "disparate_impact",
                "statistical_parity",
                "calibration",
                "bias",
                "fairness",
            ],
            MetricCategory::Bias => &["bias", "disparate_impact", "disparity"],
            MetricCategory::Explainability => &[
                "feature_importance",
                "importance",
                "shap",
                "lime",
                "permutation",
                "explain",
                "attribution",
            ],
            MetricCategory::Other => &[],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MetricCategory::Performance => "performance",
            MetricCategory::Fairness => "fairness",
            MetricCategory::Bias => "bias",
            MetricCategory::Explainability => "explainability",
            MetricCategory::Other => "other",
        }
    }
}

/// Bias bucket with its aggregate score and mitigation hints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiasBucket {
    pub metrics: BTreeMap<String, f64>,
    pub bias_score: f64,
    pub suggestions: Vec<String>,
}

/// Metrics partitioned into semantic buckets. A metric may appear in more
/// than one bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedMetrics {
    pub performance: BTreeMap<String, f64>,
    pub fairness: BTreeMap<String, f64>,
    pub bias: BiasBucket,
    pub explainability: BTreeMap<String, f64>,
    /// Metrics no keyword matched, under their full key.
    pub other: BTreeMap<String, f64>,
}

impl ClassifiedMetrics {
    pub fn bucket(&self, category: MetricCategory) -> &BTreeMap<String, f64> {
        match category {
            MetricCategory::Performance => &self.performance,
            MetricCategory::Fairness => &self.fairness,
            MetricCategory::Bias => &self.bias.metrics,
            MetricCategory::Explainability => &self.explainability,
            MetricCategory::Other => &self.other,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.performance.is_empty()
            && self.fairness.is_empty()
            && self.bias.metrics.is_empty()
            && self.explainability.is_empty()
            && self.other.is_empty()
    }
}

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::model::{BiasBucket, ClassifiedMetrics, MetricCategory};

const DEFAULT_BIAS_SCORE: f64 = 0.1;

const BIAS_FOUND_SUGGESTIONS: &[&str] = &[
    "Review how protected groups are represented in the training data.",
    "Rebalance the training set by reweighing or resampling under-represented groups.",
    "Compare decision thresholds per group and adjust where error rates diverge.",
    "Track these bias metrics on every retraining cycle.",
];

const NO_BIAS_SUGGESTIONS: &[&str] = &[
    "No bias metrics were reported; add fairness metrics to the model evaluation.",
    "Confirm protected attributes are available in the dataset before deployment.",
];

/// Keyword categories a metric key falls into. Empty means `other`.
pub fn categories_for(key: &str) -> Vec<MetricCategory> {
    let lower = key.to_lowercase();
    MetricCategory::KEYWORD_CATEGORIES
        .into_iter()
        .filter(|category| {
            category
                .keywords()
                .iter()
                .any(|keyword| lower.contains(keyword))
        })
        .collect()
}

/// Partition a flat metric map into semantic buckets.
///
/// Entries are keyed by the last dot segment of the metric key. When two
/// metrics share that segment within a bucket, the later one keeps its full
/// key, except that a bare key always owns its own name and pushes the earlier
/// entry out to its full key. No metric is ever dropped.
pub fn classify(metrics: &BTreeMap<String, f64>) -> ClassifiedMetrics {
    let mut performance = Bucket::default();
    let mut fairness = Bucket::default();
    let mut bias = Bucket::default();
    let mut explainability = Bucket::default();
    let mut other = BTreeMap::new();

    for (key, &value) in metrics {
        let categories = categories_for(key);
        if categories.is_empty() {
            other.insert(key.clone(), value);
            continue;
        }
        debug!(metric = %key, categories = ?categories, "classified metric");
        for category in categories {
            let bucket = match category {
                MetricCategory::Performance => &mut performance,
                MetricCategory::Fairness => &mut fairness,
                MetricCategory::Bias => &mut bias,
                MetricCategory::Explainability => &mut explainability,
                MetricCategory::Other => {
                    other.insert(key.clone(), value);
                    continue;
                }
            };
            bucket.insert(key, value);
        }
    }

    ClassifiedMetrics {
        performance: performance.entries,
        fairness: fairness.entries,
        bias: bias_bucket(bias.entries),
        explainability: explainability.entries,
        other,
    }
}

/// Bucket entries plus the full key currently sitting on each short name.
#[derive(Default)]
struct Bucket {
    entries: BTreeMap<String, f64>,
    owners: HashMap<String, String>,
}

impl Bucket {
    fn insert(&mut self, key: &str, value: f64) {
        let short = key.rsplit('.').next().unwrap_or(key);
        match self.owners.get(short) {
            None => {
                self.owners.insert(short.to_string(), key.to_string());
                self.entries.insert(short.to_string(), value);
            }
            Some(owner) if key == short => {
                let owner = owner.clone();
                if let Some(previous) = self.entries.remove(short) {
                    self.entries.insert(owner, previous);
                }
                self.owners.insert(short.to_string(), key.to_string());
                self.entries.insert(short.to_string(), value);
            }
            Some(_) => {
                self.entries.insert(key.to_string(), value);
            }
        }
    }
}

fn bias_bucket(metrics: BTreeMap<String, f64>) -> BiasBucket {
    let (bias_score, suggestions) = if metrics.is_empty() {
        (DEFAULT_BIAS_SCORE, NO_BIAS_SUGGESTIONS)
    } else {
        let mean = metrics.values().sum::<f64>() / metrics.len() as f64;
        ((mean * 100.0).round() / 100.0, BIAS_FOUND_SUGGESTIONS)
    };
    BiasBucket {
        metrics,
        bias_score,
        suggestions: suggestions.iter().map(|line| line.to_string()).collect(),
    }
}

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Tunable constants for column classification and summaries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileOptions {
    /// A column is numerical when strictly more than this share of its
    /// non-missing values parse as finite numbers.
    pub numeric_threshold: f64,
    pub min_histogram_bins: usize,
    pub max_histogram_bins: usize,
    /// Distinct values kept as samples for categorical columns.
    pub sample_limit: usize,
    /// Entries kept in a categorical histogram.
    pub top_values: usize,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            numeric_threshold: 0.8,
            min_histogram_bins: 5,
            max_histogram_bins: 10,
            sample_limit: 20,
            top_values: 15,
        }
    }
}

/// Statistical profile of a whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DatasetProfile {
    pub row_count: usize,
    pub column_count: usize,
    pub columns: Vec<ColumnStatistic>,
    /// Percentage of non-missing cells, rounded to 2 decimals.
    pub completeness: f64,
    /// Rows discarded because their width differed from the header's.
    pub dropped_rows: usize,
}

impl DatasetProfile {
    pub fn column(&self, name: &str) -> Option<&ColumnStatistic> {
        self.columns.iter().find(|column| column.name == name)
    }
}

/// Per-column statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnStatistic {
    pub name: String,
    /// Non-missing cell count.
    pub count: usize,
    pub distinct_count: usize,
    pub missing_count: usize,
    #[serde(flatten)]
    pub summary: ColumnSummary,
}

impl ColumnStatistic {
    pub fn is_numerical(&self) -> bool {
        matches!(self.summary, ColumnSummary::Numerical(_))
    }

    pub fn numerical(&self) -> Option<&NumericalSummary> {
        match &self.summary {
            ColumnSummary::Numerical(summary) => Some(summary),
            ColumnSummary::Categorical(_) => None,
        }
    }

    pub fn categorical(&self) -> Option<&CategoricalSummary> {
        match &self.summary {
            ColumnSummary::Categorical(summary) => Some(summary),
            ColumnSummary::Numerical(_) => None,
        }
    }
}

/// Kind-specific part of a column statistic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnSummary {
    Numerical(NumericalSummary),
    Categorical(CategoricalSummary),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NumericalSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub quartiles: Quartiles,
    pub histogram: Vec<HistogramBucket>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Quartiles {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

/// Equal-width histogram bucket. Upper edges are exclusive except for the
/// last bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HistogramBucket {
    pub label: String,
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CategoricalSummary {
    pub sample_values: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub most_common: Option<FrequencyEntry>,
    pub histogram: Vec<FrequencyEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FrequencyEntry {
    pub value: String,
    pub count: usize,
}

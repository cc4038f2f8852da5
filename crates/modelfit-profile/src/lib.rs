//! Column statistics profiler.
//!
//! Turns raw CSV text into typed per-column statistics: numerical columns get
//! moments, quartiles and an equal-width histogram; everything else gets a
//! frequency summary.

pub mod model;
pub mod profiler;
pub mod stats;

pub use model::{
    CategoricalSummary, ColumnStatistic, ColumnSummary, DatasetProfile, FrequencyEntry,
    HistogramBucket, NumericalSummary, ProfileOptions, Quartiles,
};
pub use profiler::{ColumnProfiler, profile};

use schemars::schema::RootSchema;
use schemars::schema_for;

/// Emit the JSON Schema for profile reports.
pub fn profile_json_schema() -> RootSchema {
    schema_for!(DatasetProfile)
}

//! Metric classification and report rendering.

pub mod classifier;
pub mod errors;
pub mod metrics;
pub mod model;
pub mod report;

pub use classifier::{categories_for, classify};
pub use errors::EvalError;
pub use metrics::{flatten_metrics, parse_metrics};
pub use model::{BiasBucket, ClassifiedMetrics, MetricCategory};
pub use report::{OutcomeSummary, render_report};

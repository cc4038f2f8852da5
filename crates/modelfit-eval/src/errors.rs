use thiserror::Error;

/// Errors emitted while reading metric documents.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("invalid metrics document: {0}")]
    InvalidMetrics(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

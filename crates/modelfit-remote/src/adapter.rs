use async_trait::async_trait;

use crate::errors::Result;
use crate::model::{ExecutionReport, StructuralCheck};

/// Dataset representation submitted for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionPayload {
    /// Raw CSV bytes.
    Dataset(Vec<u8>),
    /// Column-list substitute used when no usable dataset exists.
    Columns(Vec<String>),
}

/// Trait implemented by external validator backends.
#[async_trait]
pub trait ValidatorAdapter: Send + Sync {
    /// Backend identifier (e.g. `http`).
    fn backend(&self) -> &'static str;

    /// Check that a dataset's columns satisfy the described model.
    async fn check_structure(&self, metadata: &str, dataset: &[u8]) -> Result<StructuralCheck>;

    /// Run the model against a dataset (or column list) and return its metrics.
    async fn execute(
        &self,
        metadata: &str,
        payload: ExecutionPayload,
        column_metadata: Option<&str>,
    ) -> Result<ExecutionReport>;
}

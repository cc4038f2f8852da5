use modelfit_meta::MetaError;
use modelfit_remote::RemoteError;
use modelfit_synth::SynthError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable failure class attached to every failed outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    EmptyDataset,
    NoValidRows,
    MissingRequiredColumns,
    StructuralInvalid,
    InvalidMetadataFormat,
    ServiceUnavailable,
    ModelExecutionFailed,
    SynthesisFailed,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::EmptyDataset => "empty_dataset",
            ErrorKind::NoValidRows => "no_valid_rows",
            ErrorKind::MissingRequiredColumns => "missing_required_columns",
            ErrorKind::StructuralInvalid => "structural_invalid",
            ErrorKind::InvalidMetadataFormat => "invalid_metadata_format",
            ErrorKind::ServiceUnavailable => "service_unavailable",
            ErrorKind::ModelExecutionFailed => "model_execution_failed",
            ErrorKind::SynthesisFailed => "synthesis_failed",
        }
    }
}

/// Errors emitted by the validation pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Dataset(#[from] modelfit_core::Error),
    #[error(transparent)]
    Metadata(#[from] MetaError),
    #[error("{message}")]
    MissingRequiredColumns { columns: Vec<String>, message: String },
    #[error("{0}")]
    StructuralInvalid(String),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Synthesis(#[from] SynthError),
}

impl PipelineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PipelineError::Dataset(modelfit_core::Error::EmptyDataset) => ErrorKind::EmptyDataset,
            PipelineError::Dataset(modelfit_core::Error::NoValidRows { .. }) => {
                ErrorKind::NoValidRows
            }
            PipelineError::Metadata(_) => ErrorKind::InvalidMetadataFormat,
            PipelineError::MissingRequiredColumns { .. } => ErrorKind::MissingRequiredColumns,
            PipelineError::StructuralInvalid(_) => ErrorKind::StructuralInvalid,
            PipelineError::Remote(RemoteError::ModelExecutionFailed(_)) => {
                ErrorKind::ModelExecutionFailed
            }
            PipelineError::Remote(_) => ErrorKind::ServiceUnavailable,
            PipelineError::Synthesis(SynthError::EmptyDataset) => ErrorKind::EmptyDataset,
            PipelineError::Synthesis(_) => ErrorKind::SynthesisFailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_errors_map_to_service_or_execution_kinds() {
        let err = PipelineError::from(RemoteError::InvalidResponse("garbage".to_string()));
        assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
        let err = PipelineError::from(RemoteError::ModelExecutionFailed("boom".to_string()));
        assert_eq!(err.kind(), ErrorKind::ModelExecutionFailed);
    }

    #[test]
    fn kinds_serialize_snake_case() {
        let value = serde_json::to_value(ErrorKind::InvalidMetadataFormat).expect("serialize");
        assert_eq!(value, "invalid_metadata_format");
    }
}

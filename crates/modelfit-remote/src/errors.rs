use thiserror::Error;

/// Failures talking to the external validator.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// Transport failure or a non-2xx response not otherwise classified.
    #[error("validator unavailable: {0}")]
    ServiceUnavailable(String),
    /// The validator reported that running the model failed.
    #[error("model execution failed: {0}")]
    ModelExecutionFailed(String),
    /// A 2xx response whose body does not match the contract.
    #[error("invalid validator response: {0}")]
    InvalidResponse(String),
}

impl RemoteError {
    pub fn message(&self) -> &str {
        match self {
            RemoteError::ServiceUnavailable(message)
            | RemoteError::ModelExecutionFailed(message)
            | RemoteError::InvalidResponse(message) => message,
        }
    }

    /// Classify the message of a failed (non-2xx) call.
    pub fn from_failure_message(message: String) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("model") && lower.contains("execution") {
            RemoteError::ModelExecutionFailed(message)
        } else {
            RemoteError::ServiceUnavailable(message)
        }
    }
}

pub type Result<T> = std::result::Result<T, RemoteError>;

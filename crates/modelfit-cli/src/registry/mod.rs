mod logging;
mod run;

pub use logging::{init_console_logging, init_run_logging};
pub use run::{RunContext, RunInputs, start_run, write_json, write_text};

use thiserror::Error;

/// Failures while laying out a run directory or its log sink.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("run directory io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("run artifact serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not install log subscriber: {0}")]
    Logging(String),
}

pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

use thiserror::Error;

/// Errors emitted by the synthesizer.
#[derive(Debug, Error)]
pub enum SynthError {
    #[error("dataset has no header line")]
    EmptyDataset,
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("encoding error: {0}")]
    Encoding(String),
}

use thiserror::Error;

/// Core error type shared across Modelfit crates.
#[derive(Debug, Error)]
pub enum Error {
    /// The input has no non-blank lines, so there is no header.
    #[error("dataset is empty")]
    EmptyDataset,
    /// Every data row disagrees with the header's cell count (or there are none).
    #[error("dataset has no valid rows ({dropped} row(s) dropped)")]
    NoValidRows { dropped: usize },
}

/// Convenience alias for results returned by Modelfit crates.
pub type Result<T> = std::result::Result<T, Error>;

//! Client side of the external model validator.
//!
//! The validator is consumed through [`ValidatorAdapter`]. Responses are
//! classified here, at the boundary, so callers branch on typed verdicts
//! instead of message text.

pub mod adapter;
pub mod errors;
pub mod http;
pub mod model;
pub mod options;
pub mod verdict;

pub use adapter::{ExecutionPayload, ValidatorAdapter};
pub use errors::{RemoteError, Result};
pub use http::HttpValidator;
pub use model::{ExecutionReport, StructuralCheck, StructuralReport};
pub use options::RemoteOptions;
pub use verdict::{MISSING_COLUMNS_MARKER, StructuralVerdict, parse_missing_columns};

//! Model-description document contracts and validation.
//!
//! A model description is a JSON document declaring the model's required
//! input columns and its outcome label. This crate parses it into a
//! [`modelfit_core::ModelSchema`] and reports structural issues.

pub mod errors;
pub mod model;
pub mod schema;
pub mod validate;

pub use errors::{IssueSeverity, MetaError, Result, ValidationIssue, ValidationReport};
pub use model::{ColumnLabel, ColumnSpec, ModelMetadata};
pub use schema::metadata_json_schema;
pub use validate::{
    load_model_schema, normalize_metadata, parse_column_metadata, parse_model_metadata,
    validate_metadata_json,
};

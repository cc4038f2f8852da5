//! Core contracts and helpers for Modelfit.
//!
//! This crate defines the dataset tokenizer, the model schema shape, and the
//! column matcher shared by the profiler, the synthesizer, and the pipeline.

pub mod dataset;
pub mod error;
pub mod matcher;
pub mod schema;

pub use dataset::{Dataset, QuotedRowParser, RowParser, non_blank_lines};
pub use error::{Error, Result};
pub use matcher::{ColumnMatchReport, match_columns};
pub use schema::ModelSchema;

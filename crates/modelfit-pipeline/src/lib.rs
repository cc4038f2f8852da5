//! Validation orchestrator.
//!
//! Sequences the structural check, the optional mock-column fallback and the
//! execution check against a [`modelfit_remote::ValidatorAdapter`], and
//! reports how far a run progressed.

pub mod engine;
pub mod errors;
pub mod model;

pub use engine::{ValidationPipeline, ValidationRequest, candidate_columns};
pub use errors::{ErrorKind, PipelineError};
pub use model::{
    CsvCheckResult, FallbackStrategy, ModelCheckResult, OutcomeError, PipelineMode,
    PipelineOptions, StageResult, StructuralOutcome, ValidationOutcome, ValidationStage,
};

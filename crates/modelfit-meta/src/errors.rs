use serde::Serialize;
use thiserror::Error;

/// How much a metadata issue matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Error,
    Warning,
}

/// One finding about a model-description document, located by JSON pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub severity: IssueSeverity,
    pub code: &'static str,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ValidationIssue {
    pub fn error(code: &'static str, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_severity(IssueSeverity::Error, code, path.into(), message.into())
    }

    pub fn warning(
        code: &'static str,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::with_severity(IssueSeverity::Warning, code, path.into(), message.into())
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    fn with_severity(
        severity: IssueSeverity,
        code: &'static str,
        path: String,
        message: String,
    ) -> Self {
        Self {
            severity,
            code,
            path,
            message,
            hint: None,
        }
    }
}

/// Issues found in one document, split by severity.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Warnings alone do not make a document unusable.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        match issue.severity {
            IssueSeverity::Error => self.errors.push(issue),
            IssueSeverity::Warning => self.warnings.push(issue),
        }
    }

    pub fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors.iter().chain(&self.warnings)
    }

    /// `path: message` pairs of every error, `; ` separated.
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|issue| format!("{}: {}", issue.path, issue.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Errors raised while reading model or column metadata.
#[derive(Debug, Error)]
pub enum MetaError {
    /// The document is not JSON or does not have the expected shape.
    #[error("invalid metadata format: {0}")]
    InvalidFormat(String),
    /// The embedded JSON Schema could not be built.
    #[error("schema error: {0}")]
    Schema(String),
}

/// Result type for metadata operations.
pub type Result<T> = std::result::Result<T, MetaError>;

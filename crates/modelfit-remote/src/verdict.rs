use serde::{Deserialize, Serialize};

use crate::model::StructuralReport;

/// Prefix the validator uses to report absent required columns.
pub const MISSING_COLUMNS_MARKER: &str = "Missing required columns: ";

/// Typed outcome of a structural check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StructuralVerdict {
    Valid,
    /// Recoverable failure: the listed required columns are absent.
    MissingColumns { columns: Vec<String>, message: String },
    Invalid { message: String },
}

impl StructuralVerdict {
    pub fn classify(report: &StructuralReport) -> Self {
        if report.valid {
            return StructuralVerdict::Valid;
        }
        let message = report
            .message
            .clone()
            .filter(|message| !message.trim().is_empty())
            .unwrap_or_else(|| "structural validation failed".to_string());

        match parse_missing_columns(&message) {
            Some(columns) => StructuralVerdict::MissingColumns { columns, message },
            None => StructuralVerdict::Invalid { message },
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, StructuralVerdict::Valid)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            StructuralVerdict::Valid => None,
            StructuralVerdict::MissingColumns { message, .. }
            | StructuralVerdict::Invalid { message } => Some(message),
        }
    }
}

/// Extract the column list following [`MISSING_COLUMNS_MARKER`].
///
/// The list runs to the end of the line. Entries are trimmed of whitespace,
/// brackets and quotes; blanks and repeats are dropped. Returns `None` when
/// the marker is absent or names no columns.
pub fn parse_missing_columns(message: &str) -> Option<Vec<String>> {
    let (_, rest) = message.split_once(MISSING_COLUMNS_MARKER)?;
    let list = rest.lines().next().unwrap_or_default();

    let mut columns: Vec<String> = Vec::new();
    for entry in list.split(',') {
        let name = entry.trim_matches(|ch: char| {
            ch.is_whitespace() || matches!(ch, '[' | ']' | '{' | '}' | '\'' | '"')
        });
        if !name.is_empty() && !columns.iter().any(|existing| existing == name) {
            columns.push(name.to_string());
        }
    }

    if columns.is_empty() { None } else { Some(columns) }
}

use std::collections::BTreeSet;

use jsonschema::JSONSchema;
use modelfit_core::ModelSchema;
use serde_json::{Map, Value};

use crate::errors::{MetaError, Result, ValidationIssue, ValidationReport};
use crate::model::ModelMetadata;
use crate::schema::metadata_json_schema;

const NAME_ALIASES: &[&str] = &["model_name"];
const INPUT_ALIASES: &[&str] = &["input_columns", "required_columns", "features"];
const OUTCOME_ALIASES: &[&str] = &["target", "output"];

/// Rewrite alias keys to the canonical `name` / `inputs` / `outcome` fields.
///
/// The canonical key wins when a document carries both. Column objects using
/// `name` instead of `label` are rewritten as well.
pub fn normalize_metadata(document: &Value) -> Value {
    let Some(object) = document.as_object() else {
        return document.clone();
    };

    let mut normalized = object.clone();
    promote_alias(&mut normalized, "name", NAME_ALIASES);
    promote_alias(&mut normalized, "inputs", INPUT_ALIASES);
    promote_alias(&mut normalized, "outcome", OUTCOME_ALIASES);

    if let Some(Value::Array(inputs)) = normalized.get_mut("inputs") {
        for input in inputs.iter_mut() {
            normalize_column(input);
        }
    }
    if let Some(outcome) = normalized.get_mut("outcome") {
        normalize_column(outcome);
    }

    Value::Object(normalized)
}

fn promote_alias(object: &mut Map<String, Value>, canonical: &str, aliases: &[&str]) {
    for alias in aliases {
        if let Some(value) = object.remove(*alias) {
            object.entry(canonical.to_string()).or_insert(value);
        }
    }
}

fn normalize_column(column: &mut Value) {
    if let Value::Object(entry) = column {
        if !entry.contains_key("label") {
            if let Some(name) = entry.remove("name") {
                entry.insert("label".to_string(), name);
            }
        }
    }
}

/// Validate a model-description document against the JSON Schema and the
/// semantic rules (empty inputs, duplicate or blank labels).
pub fn validate_metadata_json(document: &Value) -> Result<ValidationReport> {
    let mut report = ValidationReport::default();

    if !document.is_object() {
        report.push(ValidationIssue::error(
            "not_an_object",
            "/",
            "model metadata must be a JSON object",
        ));
        return Ok(report);
    }

    let normalized = normalize_metadata(document);
    let schema = serde_json::to_value(metadata_json_schema())
        .map_err(|err| MetaError::Schema(err.to_string()))?;
    let compiled = JSONSchema::compile(&schema).map_err(|err| MetaError::Schema(err.to_string()))?;

    if let Err(errors) = compiled.validate(&normalized) {
        for error in errors {
            let path = normalized_json_pointer(&error.instance_path.to_string());
            report.push(ValidationIssue::error(
                "schema_violation",
                path,
                error.to_string(),
            ));
        }
    }

    if !report.is_ok() {
        return Ok(report);
    }

    let metadata: ModelMetadata = serde_json::from_value(normalized)
        .map_err(|err| MetaError::InvalidFormat(err.to_string()))?;
    check_semantics(&metadata, &mut report);
    Ok(report)
}

fn check_semantics(metadata: &ModelMetadata, report: &mut ValidationReport) {
    if metadata.inputs.is_empty() {
        report.push(
            ValidationIssue::warning(
                "no_inputs",
                "/inputs",
                "model declares no required input columns",
            )
            .with_hint("every dataset will pass structural matching"),
        );
    }

    let mut seen = BTreeSet::new();
    for (idx, input) in metadata.inputs.iter().enumerate() {
        let label = input.label();
        let path = format!("/inputs/{idx}");
        if label.trim().is_empty() {
            report.push(ValidationIssue::error("blank_label", path, "input label is blank"));
            continue;
        }
        if !seen.insert(label) {
            report.push(
                ValidationIssue::warning(
                    "duplicate_input",
                    path,
                    format!("input '{label}' is declared more than once"),
                )
                .with_hint("duplicates are matched as a single column"),
            );
        }
    }

    if let Some(outcome) = &metadata.outcome {
        if seen.contains(outcome.label()) {
            report.push(ValidationIssue::warning(
                "outcome_in_inputs",
                "/outcome",
                format!("outcome '{}' is also a required input", outcome.label()),
            ));
        }
    }
}

/// Parse and validate a model-description document.
pub fn parse_model_metadata(text: &str) -> Result<ModelMetadata> {
    let document: Value =
        serde_json::from_str(text).map_err(|err| MetaError::InvalidFormat(err.to_string()))?;

    let report = validate_metadata_json(&document)?;
    if !report.is_ok() {
        return Err(MetaError::InvalidFormat(report.error_summary()));
    }

    serde_json::from_value(normalize_metadata(&document))
        .map_err(|err| MetaError::InvalidFormat(err.to_string()))
}

/// Parse a model-description document straight into its column contract.
pub fn load_model_schema(text: &str) -> Result<ModelSchema> {
    parse_model_metadata(text).map(|metadata| metadata.to_model_schema())
}

/// Parse optional column metadata. It is forwarded verbatim to the
/// execution stage, so only its outer shape is checked.
pub fn parse_column_metadata(text: &str) -> Result<Value> {
    let value: Value =
        serde_json::from_str(text).map_err(|err| MetaError::InvalidFormat(err.to_string()))?;
    if value.is_object() || value.is_array() {
        Ok(value)
    } else {
        Err(MetaError::InvalidFormat(
            "column metadata must be a JSON object or array".to_string(),
        ))
    }
}

fn normalized_json_pointer(pointer: &str) -> String {
    if pointer.is_empty() {
        "/".to_string()
    } else {
        pointer.to_string()
    }
}

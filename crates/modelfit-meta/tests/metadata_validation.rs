use modelfit_meta::{
    MetaError, load_model_schema, metadata_json_schema, parse_column_metadata,
    parse_model_metadata, validate_metadata_json,
};
use serde_json::json;

#[test]
fn canonical_document_parses_into_schema() {
    let text = r#"{
        "name": "readmission",
        "inputs": ["age", {"label": "bmi", "type": "float"}],
        "outcome": {"label": "readmitted"}
    }"#;

    let schema = load_model_schema(text).expect("load schema");
    assert_eq!(schema.model_name.as_deref(), Some("readmission"));
    assert_eq!(schema.required_columns, vec!["age", "bmi"]);
    assert_eq!(schema.outcome.as_deref(), Some("readmitted"));
}

#[test]
fn aliased_fields_are_accepted() {
    let text = r#"{
        "model_name": "risk",
        "input_columns": [{"name": "glucose"}, "sex"],
        "target": "diabetic"
    }"#;

    let schema = load_model_schema(text).expect("load aliased schema");
    assert_eq!(schema.model_name.as_deref(), Some("risk"));
    assert_eq!(schema.required_columns, vec!["glucose", "sex"]);
    assert_eq!(schema.outcome.as_deref(), Some("diabetic"));
}

#[test]
fn non_json_is_invalid_format() {
    let err = parse_model_metadata("not json").unwrap_err();
    assert!(matches!(err, MetaError::InvalidFormat(_)));
}

#[test]
fn wrong_input_shape_is_reported_with_path() {
    let report = validate_metadata_json(&json!({"inputs": [42]})).expect("validate");
    assert!(!report.is_ok());
    assert!(
        report
            .errors
            .iter()
            .any(|issue| issue.code == "schema_violation" && issue.path.starts_with("/inputs"))
    );

    let err = parse_model_metadata(r#"{"inputs": [42]}"#).unwrap_err();
    assert!(matches!(err, MetaError::InvalidFormat(_)));
}

#[test]
fn array_document_is_rejected() {
    let report = validate_metadata_json(&json!(["age"])).expect("validate");
    assert_eq!(report.errors[0].code, "not_an_object");
}

#[test]
fn duplicates_and_empty_inputs_only_warn() {
    let report = validate_metadata_json(&json!({"inputs": ["a", "a"], "outcome": "a"}))
        .expect("validate");
    assert!(report.is_ok());
    let codes: Vec<&str> = report.warnings.iter().map(|w| w.code).collect();
    assert_eq!(codes, vec!["duplicate_input", "outcome_in_inputs"]);

    let report = validate_metadata_json(&json!({})).expect("validate");
    assert!(report.is_ok());
    assert_eq!(report.warnings[0].code, "no_inputs");
}

#[test]
fn blank_label_is_an_error() {
    let report = validate_metadata_json(&json!({"inputs": ["  "]})).expect("validate");
    assert_eq!(report.errors[0].code, "blank_label");
}

#[test]
fn column_metadata_must_be_object_or_array() {
    assert!(parse_column_metadata(r#"{"age": {"unit": "years"}}"#).is_ok());
    assert!(parse_column_metadata("[1, 2]").is_ok());
    assert!(matches!(
        parse_column_metadata("\"age\""),
        Err(MetaError::InvalidFormat(_))
    ));
    assert!(matches!(
        parse_column_metadata("{broken"),
        Err(MetaError::InvalidFormat(_))
    ));
}

#[test]
fn json_schema_describes_inputs() {
    let schema = serde_json::to_value(metadata_json_schema()).expect("serialize schema");
    assert!(schema["properties"]["inputs"].is_object());
    assert!(schema["definitions"]["ColumnSpec"]["required"]
        .as_array()
        .expect("required list")
        .contains(&json!("label")));
}

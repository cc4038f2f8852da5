use modelfit_remote::{
    ExecutionPayload, HttpValidator, RemoteError, RemoteOptions, StructuralVerdict,
    ValidatorAdapter,
};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const METADATA: &str = r#"{"name":"risk","inputs":["age","bmi"],"outcome":"label"}"#;

fn validator(server: &MockServer) -> HttpValidator {
    HttpValidator::new(RemoteOptions {
        base_url: server.uri(),
        timeout_secs: 5,
        ..RemoteOptions::default()
    })
    .expect("client")
}

#[tokio::test]
async fn structural_check_posts_metadata_and_csv_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/validate-csv"))
        .and(body_string_contains("name=\"model_metadata\""))
        .and(body_string_contains("filename=\"dataset.csv\""))
        .and(body_string_contains("age,bmi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "valid": true,
            "csv_columns": ["age", "bmi"],
            "model_input_columns": ["age", "bmi"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let check = validator(&server)
        .check_structure(METADATA, b"age,bmi\n30,22.5\n")
        .await
        .expect("structural check");
    assert_eq!(check.verdict, StructuralVerdict::Valid);
    assert_eq!(check.report.csv_columns, vec!["age", "bmi"]);
}

#[tokio::test]
async fn missing_columns_message_is_classified_at_the_boundary() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/validate-csv"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "valid": false,
            "message": "Missing required columns: bmi, smoker",
            "csv_columns": ["age"],
            "model_input_columns": ["age", "bmi", "smoker"]
        })))
        .mount(&server)
        .await;

    let check = validator(&server)
        .check_structure(METADATA, b"age\n30\n")
        .await
        .expect("structural check");
    match check.verdict {
        StructuralVerdict::MissingColumns { columns, message } => {
            assert_eq!(columns, vec!["bmi", "smoker"]);
            assert_eq!(message, "Missing required columns: bmi, smoker");
        }
        other => panic!("unexpected verdict {other:?}"),
    }
}

#[tokio::test]
async fn execution_with_column_list_sends_csv_columns_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/validate-model"))
        .and(body_string_contains("name=\"csv_columns\""))
        .and(body_string_contains(r#"["age","bmi"]"#))
        .and(body_string_contains("name=\"column_metadata\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model_name": "risk",
            "metrics": {"performance": {"accuracy": 0.91}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let report = validator(&server)
        .execute(
            METADATA,
            ExecutionPayload::Columns(vec!["age".to_string(), "bmi".to_string()]),
            Some(r#"{"age":{"type":"int"}}"#),
        )
        .await
        .expect("execution");
    assert_eq!(report.model_name, "risk");
    assert_eq!(report.metrics["performance"]["accuracy"], json!(0.91));
}

#[tokio::test]
async fn execution_failure_detail_maps_to_model_execution_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/validate-model"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "detail": "Model execution failed: shape mismatch"
        })))
        .mount(&server)
        .await;

    let err = validator(&server)
        .execute(METADATA, ExecutionPayload::Dataset(b"age\n1\n".to_vec()), None)
        .await
        .expect_err("execution should fail");
    assert_eq!(
        err,
        RemoteError::ModelExecutionFailed("Model execution failed: shape mismatch".to_string())
    );
}

#[tokio::test]
async fn other_http_failures_are_service_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let err = validator(&server)
        .check_structure(METADATA, b"age\n1\n")
        .await
        .expect_err("structural check should fail");
    assert_eq!(err, RemoteError::ServiceUnavailable("upstream down".to_string()));
}

#[tokio::test]
async fn undecodable_success_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let err = validator(&server)
        .execute(METADATA, ExecutionPayload::Dataset(Vec::new()), None)
        .await
        .expect_err("body is not json");
    assert!(matches!(err, RemoteError::InvalidResponse(_)));
}

#[tokio::test]
async fn unreachable_validator_is_service_unavailable() {
    let server = MockServer::start().await;
    let options = RemoteOptions {
        base_url: server.uri(),
        timeout_secs: 2,
        ..RemoteOptions::default()
    };
    drop(server);

    let err = HttpValidator::new(options)
        .expect("client")
        .check_structure(METADATA, b"age\n1\n")
        .await
        .expect_err("nothing listening");
    assert!(matches!(err, RemoteError::ServiceUnavailable(_)));
}

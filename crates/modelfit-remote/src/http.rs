use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::adapter::{ExecutionPayload, ValidatorAdapter};
use crate::errors::{RemoteError, Result};
use crate::model::{ExecutionReport, StructuralCheck, StructuralReport};
use crate::options::RemoteOptions;

/// Validator reached over HTTP with multipart form requests.
#[derive(Debug, Clone)]
pub struct HttpValidator {
    options: RemoteOptions,
    client: reqwest::Client,
}

impl HttpValidator {
    pub fn new(options: RemoteOptions) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout())
            .build()
            .map_err(|err| {
                RemoteError::ServiceUnavailable(format!("failed to build http client: {err}"))
            })?;
        Ok(Self { options, client })
    }

    pub fn options(&self) -> &RemoteOptions {
        &self.options
    }

    async fn post_form<T: DeserializeOwned>(&self, url: &str, form: Form) -> Result<T> {
        debug!(url = %url, "posting to validator");
        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| RemoteError::ServiceUnavailable(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| RemoteError::ServiceUnavailable(err.to_string()))?;

        if !status.is_success() {
            let message = failure_message(status.as_u16(), &body);
            warn!(url = %url, status = status.as_u16(), message = %message, "validator call failed");
            return Err(RemoteError::from_failure_message(message));
        }

        serde_json::from_str(&body).map_err(|err| RemoteError::InvalidResponse(err.to_string()))
    }
}

#[async_trait]
impl ValidatorAdapter for HttpValidator {
    fn backend(&self) -> &'static str {
        "http"
    }

    async fn check_structure(&self, metadata: &str, dataset: &[u8]) -> Result<StructuralCheck> {
        let form = Form::new()
            .text("model_metadata", metadata.to_string())
            .part("csv_file", csv_part(dataset.to_vec())?);
        let report: StructuralReport = self.post_form(&self.options.structural_url(), form).await?;
        Ok(StructuralCheck::from_report(report))
    }

    async fn execute(
        &self,
        metadata: &str,
        payload: ExecutionPayload,
        column_metadata: Option<&str>,
    ) -> Result<ExecutionReport> {
        let mut form = Form::new().text("model_metadata", metadata.to_string());
        form = match payload {
            ExecutionPayload::Dataset(bytes) => form.part("csv_file", csv_part(bytes)?),
            ExecutionPayload::Columns(columns) => {
                let encoded = serde_json::to_string(&columns)
                    .map_err(|err| RemoteError::InvalidResponse(err.to_string()))?;
                form.text("csv_columns", encoded)
            }
        };
        if let Some(column_metadata) = column_metadata {
            form = form.text("column_metadata", column_metadata.to_string());
        }
        self.post_form(&self.options.execution_url(), form).await
    }
}

fn csv_part(bytes: Vec<u8>) -> Result<Part> {
    Part::bytes(bytes)
        .file_name("dataset.csv")
        .mime_str("text/csv")
        .map_err(|err| RemoteError::ServiceUnavailable(err.to_string()))
}

/// Human-readable message of a failed call: the JSON `detail`, `message` or
/// `error` field when present, otherwise the raw body.
fn failure_message(status: u16, body: &str) -> String {
    if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(body) {
        for key in ["detail", "message", "error"] {
            match object.get(key) {
                Some(Value::String(text)) if !text.trim().is_empty() => return text.clone(),
                Some(Value::Null) | None => {}
                Some(other @ (Value::Array(_) | Value::Object(_))) => return other.to_string(),
                Some(_) => {}
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("validator returned HTTP {status}")
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_detail_then_message_then_error() {
        assert_eq!(
            failure_message(500, r#"{"error":"c","message":"b","detail":"a"}"#),
            "a"
        );
        assert_eq!(failure_message(500, r#"{"error":"c","message":"b"}"#), "b");
        assert_eq!(failure_message(500, r#"{"error":"c"}"#), "c");
    }

    #[test]
    fn falls_back_to_raw_body_or_status() {
        assert_eq!(failure_message(502, "  Bad Gateway \n"), "Bad Gateway");
        assert_eq!(failure_message(503, ""), "validator returned HTTP 503");
        assert_eq!(failure_message(500, r#"{"other":1}"#), r#"{"other":1}"#);
    }

    #[test]
    fn structured_detail_is_rendered_as_json() {
        let message = failure_message(422, r#"{"detail":[{"loc":["body"],"msg":"field required"}]}"#);
        assert!(message.contains("field required"));
    }
}

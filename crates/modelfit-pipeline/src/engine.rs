use std::time::Instant;

use modelfit_core::{ColumnMatchReport, Dataset, ModelSchema, QuotedRowParser, match_columns};
use modelfit_eval::{classify, flatten_metrics};
use modelfit_meta::{load_model_schema, parse_column_metadata};
use modelfit_remote::{ExecutionPayload, StructuralCheck, StructuralVerdict, ValidatorAdapter};
use modelfit_synth::MockColumnSynthesizer;
use serde_json::{Value, json};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::PipelineError;
use crate::model::{
    CsvCheckResult, FallbackStrategy, ModelCheckResult, OutcomeError, PipelineMode,
    PipelineOptions, StageResult, StructuralOutcome, ValidationOutcome, ValidationStage,
};

/// Inputs of one validation run. The metadata text is forwarded verbatim.
#[derive(Debug, Clone, Copy)]
pub struct ValidationRequest<'a> {
    pub metadata: &'a str,
    pub dataset: &'a [u8],
    pub column_metadata: Option<&'a str>,
    /// Run identifier; a fresh v4 id is drawn when unset.
    pub run_id: Option<Uuid>,
}

impl<'a> ValidationRequest<'a> {
    pub fn new(metadata: &'a str, dataset: &'a [u8]) -> Self {
        Self {
            metadata,
            dataset,
            column_metadata: None,
            run_id: None,
        }
    }

    pub fn with_run_id(mut self, run_id: Uuid) -> Self {
        self.run_id = Some(run_id);
        self
    }

    pub fn with_column_metadata(mut self, column_metadata: &'a str) -> Self {
        self.column_metadata = Some(column_metadata);
        self
    }
}

/// Drives a dataset through structural and execution validation.
pub struct ValidationPipeline<A: ValidatorAdapter> {
    adapter: A,
    options: PipelineOptions,
    synthesizer: MockColumnSynthesizer,
}

impl<A: ValidatorAdapter> ValidationPipeline<A> {
    pub fn new(adapter: A) -> Self {
        Self::with_options(adapter, PipelineOptions::default())
    }

    pub fn with_options(adapter: A, options: PipelineOptions) -> Self {
        let synthesizer = MockColumnSynthesizer::new(options.synthesis.clone());
        Self {
            adapter,
            options,
            synthesizer,
        }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Structural check only, without fallbacks.
    pub async fn run_structural_check(
        &self,
        metadata: &str,
        dataset: &[u8],
    ) -> Result<CsvCheckResult, PipelineError> {
        let schema = load_model_schema(metadata)?;
        let header = dataset_header(dataset)?;
        let column_match = match_columns(&header, &schema);
        let check = self.adapter.check_structure(metadata, dataset).await?;
        Ok(csv_check_result(check, header, &schema, column_match))
    }

    /// Execution check only. Metrics come back flattened.
    pub async fn run_execution_check(
        &self,
        metadata: &str,
        payload: ExecutionPayload,
        column_metadata: Option<&str>,
    ) -> Result<ModelCheckResult, PipelineError> {
        load_model_schema(metadata)?;
        if let Some(column_metadata) = column_metadata {
            parse_column_metadata(column_metadata)?;
        }
        self.execute(metadata, payload, column_metadata).await
    }

    /// Run with the configured mode.
    pub async fn run(&self, request: ValidationRequest<'_>) -> ValidationOutcome {
        self.run_with_mode(request, self.options.mode).await
    }

    /// Run the pipeline. Failures are recorded in the outcome, never returned.
    pub async fn run_with_mode(
        &self,
        request: ValidationRequest<'_>,
        mode: PipelineMode,
    ) -> ValidationOutcome {
        let started = Instant::now();
        let mut run = Run::new(request.run_id.unwrap_or_else(Uuid::new_v4), mode);
        info!(
            run_id = %run.id(),
            mode = %mode,
            backend = self.adapter.backend(),
            bytes = request.dataset.len(),
            "validation started"
        );
        self.drive(&mut run, request).await;
        run.finish(started)
    }

    async fn drive(&self, run: &mut Run, request: ValidationRequest<'_>) {
        let schema = match load_model_schema(request.metadata) {
            Ok(schema) => schema,
            Err(err) => return run.fail(err.into()),
        };
        if let Some(column_metadata) = request.column_metadata {
            if let Err(err) = parse_column_metadata(column_metadata) {
                return run.fail(err.into());
            }
        }
        let header = match dataset_header(request.dataset) {
            Ok(header) => header,
            Err(err) => return run.fail(err),
        };
        let column_match = match_columns(&header, &schema);
        run.outcome.column_match = Some(column_match.clone());

        run.advance(ValidationStage::Csv);
        let check = match self
            .adapter
            .check_structure(request.metadata, request.dataset)
            .await
        {
            Ok(check) => check,
            Err(err) => {
                run.outcome.csv_result = Some(failed_stage(err.to_string(), Value::Null));
                return run.fail(err.into());
            }
        };
        let details = serde_json::to_value(&check.report).unwrap_or_default();

        match check.verdict {
            StructuralVerdict::Valid => {
                if !column_match.is_satisfied() {
                    warn!(
                        run_id = %run.id(),
                        missing = ?column_match.missing_columns,
                        "validator accepted columns the local matcher reports missing"
                    );
                }
                run.outcome.structural = Some(StructuralOutcome::Clean);
                run.outcome.csv_result = Some(StageResult {
                    success: true,
                    message: check.report.message.clone(),
                    details,
                    ..StageResult::default()
                });
                if run.outcome.mode == PipelineMode::Auto {
                    run.outcome.success = true;
                    return;
                }

                run.advance(ValidationStage::Model);
                let payload = ExecutionPayload::Dataset(request.dataset.to_vec());
                match self
                    .execute(request.metadata, payload, request.column_metadata)
                    .await
                {
                    Ok(result) => run.complete(result),
                    Err(err) => {
                        run.outcome.model_result =
                            Some(failed_stage(err.to_string(), Value::Null));
                        run.fail(err);
                    }
                }
            }
            StructuralVerdict::Invalid { message } => {
                run.outcome.structural = Some(StructuralOutcome::Failed {
                    reason: message.clone(),
                });
                run.outcome.csv_result = Some(failed_stage(message.clone(), details));
                run.fail(PipelineError::StructuralInvalid(message));
            }
            StructuralVerdict::MissingColumns { columns, message } => {
                if run.outcome.mode == PipelineMode::Auto {
                    run.outcome.structural = Some(StructuralOutcome::Failed {
                        reason: message.clone(),
                    });
                    run.outcome.csv_result = Some(failed_stage(message.clone(), details));
                    return run.fail(PipelineError::MissingRequiredColumns { columns, message });
                }
                let failure = MissingColumns {
                    missing: columns,
                    message,
                    reported: check.report.csv_columns,
                    details,
                };
                self.fallback(run, request, &schema, failure).await;
            }
        }
    }

    /// Try the synthesized dataset, then the candidate column list. The
    /// stage stays at `csv` until one of them executes successfully.
    async fn fallback(
        &self,
        run: &mut Run,
        request: ValidationRequest<'_>,
        schema: &ModelSchema,
        mut failure: MissingColumns,
    ) {
        warn!(
            run_id = %run.id(),
            missing = ?failure.missing,
            "structural check reported missing columns; trying fallbacks"
        );

        let text = String::from_utf8_lossy(request.dataset);
        let synthesized = match self.synthesizer.synthesize(&failure.missing, &text) {
            Ok(dataset) => {
                let payload = ExecutionPayload::Dataset(dataset.text.into_bytes());
                self.execute(request.metadata, payload, request.column_metadata)
                    .await
            }
            Err(err) => Err(err.into()),
        };
        let synthesized_err = match synthesized {
            Ok(result) => {
                return run.fallback_succeeded(
                    result,
                    failure,
                    FallbackStrategy::SynthesizedDataset,
                );
            }
            Err(err) => {
                warn!(run_id = %run.id(), error = %err, "synthesized-dataset fallback failed");
                err
            }
        };

        let candidates =
            candidate_columns(&schema.required_columns, &failure.reported, &failure.missing);
        let payload = ExecutionPayload::Columns(candidates);
        let column_list_err = match self
            .execute(request.metadata, payload, request.column_metadata)
            .await
        {
            Ok(result) => {
                return run.fallback_succeeded(result, failure, FallbackStrategy::ColumnList);
            }
            Err(err) => {
                warn!(run_id = %run.id(), error = %err, "column-list fallback failed");
                err
            }
        };

        failure.details["fallback_errors"] = json!([
            fallback_error(FallbackStrategy::SynthesizedDataset, &synthesized_err),
            fallback_error(FallbackStrategy::ColumnList, &column_list_err),
        ]);
        run.outcome.structural = Some(StructuralOutcome::Failed {
            reason: failure.message.clone(),
        });
        run.outcome.csv_result = Some(failed_stage(failure.message.clone(), failure.details));
        run.fail(PipelineError::MissingRequiredColumns {
            columns: failure.missing,
            message: failure.message,
        });
    }

    async fn execute(
        &self,
        metadata: &str,
        payload: ExecutionPayload,
        column_metadata: Option<&str>,
    ) -> Result<ModelCheckResult, PipelineError> {
        let report = self
            .adapter
            .execute(metadata, payload, column_metadata)
            .await?;
        Ok(ModelCheckResult {
            model_name: report.model_name,
            metrics: flatten_metrics(&report.metrics),
        })
    }
}

/// Ordered union of schema-required, reported dataset and missing columns.
pub fn candidate_columns(required: &[String], reported: &[String], missing: &[String]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for name in required.iter().chain(reported).chain(missing) {
        if !columns.contains(name) {
            columns.push(name.clone());
        }
    }
    columns
}

fn dataset_header(dataset: &[u8]) -> Result<Vec<String>, PipelineError> {
    let text = String::from_utf8_lossy(dataset);
    Ok(Dataset::header(&text, &QuotedRowParser)?)
}

fn csv_check_result(
    check: StructuralCheck,
    header: Vec<String>,
    schema: &ModelSchema,
    column_match: ColumnMatchReport,
) -> CsvCheckResult {
    let StructuralCheck { report, verdict } = check;
    let dataset_columns = if report.csv_columns.is_empty() {
        header
    } else {
        report.csv_columns
    };
    let schema_columns = if report.model_input_columns.is_empty() {
        schema.unique_required()
    } else {
        report.model_input_columns
    };
    CsvCheckResult {
        valid: verdict.is_valid(),
        message: verdict.message().map(str::to_string).or(report.message),
        dataset_columns,
        schema_columns,
        mock_columns_added: Vec::new(),
        verdict,
        column_match,
    }
}

fn failed_stage(message: String, details: Value) -> StageResult {
    StageResult {
        success: false,
        message: Some(message),
        details,
        ..StageResult::default()
    }
}

fn fallback_error(strategy: FallbackStrategy, err: &PipelineError) -> Value {
    json!({
        "strategy": strategy,
        "kind": err.kind(),
        "message": err.to_string(),
    })
}

/// Mutable state of a single run.
/// A missing-columns verdict together with what the validator reported.
struct MissingColumns {
    missing: Vec<String>,
    message: String,
    reported: Vec<String>,
    details: Value,
}

struct Run {
    outcome: ValidationOutcome,
}

impl Run {
    fn new(run_id: Uuid, mode: PipelineMode) -> Self {
        Self {
            outcome: ValidationOutcome::new(run_id, mode),
        }
    }

    fn id(&self) -> Uuid {
        self.outcome.run_id
    }

    fn advance(&mut self, stage: ValidationStage) {
        let from = self.outcome.stage;
        if stage > from {
            self.outcome.stage = stage;
            info!(run_id = %self.id(), from = %from, to = %stage, "stage transition");
        }
    }

    fn fail(&mut self, err: PipelineError) {
        warn!(
            run_id = %self.id(),
            stage = %self.outcome.stage,
            kind = err.kind().as_str(),
            error = %err,
            "validation halted"
        );
        self.outcome.success = false;
        self.outcome.error = Some(OutcomeError {
            kind: err.kind(),
            message: err.to_string(),
        });
    }

    fn fallback_succeeded(
        &mut self,
        result: ModelCheckResult,
        failure: MissingColumns,
        strategy: FallbackStrategy,
    ) {
        let MissingColumns {
            missing,
            message,
            mut details,
            ..
        } = failure;
        info!(
            run_id = %self.id(),
            strategy = ?strategy,
            missing = ?missing,
            "fallback execution succeeded"
        );
        details["fallback_strategy"] = json!(strategy);
        self.outcome.structural = Some(StructuralOutcome::FallbackApplied {
            missing: missing.clone(),
            strategy,
        });
        self.outcome.csv_result = Some(StageResult {
            success: true,
            message: Some(message.clone()),
            details,
            warning: Some(message),
            mock_columns_added: missing,
        });
        self.advance(ValidationStage::Model);
        self.complete(result);
    }

    fn complete(&mut self, result: ModelCheckResult) {
        let metrics = classify(&result.metrics);
        self.outcome.model_result = Some(StageResult {
            success: true,
            message: Some(format!("model '{}' executed", result.model_name)),
            details: json!({
                "model_name": result.model_name,
                "metrics": result.metrics,
            }),
            ..StageResult::default()
        });
        self.outcome.model_name = Some(result.model_name);
        self.outcome.metrics = Some(metrics);
        self.advance(ValidationStage::Complete);
        self.outcome.success = true;
    }

    fn finish(mut self, started: Instant) -> ValidationOutcome {
        self.outcome.duration_ms = started.elapsed().as_millis();
        info!(
            run_id = %self.id(),
            stage = %self.outcome.stage,
            success = self.outcome.success,
            duration_ms = self.outcome.duration_ms as u64,
            "validation finished"
        );
        self.outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn candidates_keep_first_occurrence_order() {
        let columns = candidate_columns(
            &names(&["age", "bmi", "age"]),
            &names(&["id", "age"]),
            &names(&["bmi", "smoker"]),
        );
        assert_eq!(columns, names(&["age", "bmi", "id", "smoker"]));
    }
}

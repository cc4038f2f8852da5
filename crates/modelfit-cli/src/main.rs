mod config;
mod registry;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use modelfit_core::{Dataset, QuotedRowParser, match_columns};
use modelfit_eval::{EvalError, classify, parse_metrics, render_report};
use modelfit_meta::{MetaError, load_model_schema, validate_metadata_json};
use modelfit_pipeline::{PipelineMode, PipelineOptions, ValidationPipeline, ValidationRequest};
use modelfit_profile::profile;
use modelfit_remote::{HttpValidator, RemoteError};
use modelfit_synth::{MockColumnSynthesizer, SynthError, SynthOptions};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use config::{ConfigError, load_config};
use registry::{
    RunContext, RunInputs, init_console_logging, init_run_logging, start_run, write_json,
    write_text,
};

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("dataset error: {0}")]
    Dataset(#[from] modelfit_core::Error),
    #[error("metadata error: {0}")]
    Metadata(#[from] MetaError),
    #[error("synthesis error: {0}")]
    Synthesis(#[from] SynthError),
    #[error("validator error: {0}")]
    Remote(#[from] RemoteError),
    #[error("metrics error: {0}")]
    Eval(#[from] EvalError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("metadata has {0} error(s)")]
    MetadataIssues(usize),
    #[error("validation failed at stage {stage} ({kind}): {message}")]
    ValidationFailed {
        stage: String,
        kind: String,
        message: String,
    },
}

#[derive(Parser, Debug)]
#[command(name = "modelfit", version, about = "Modelfit CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Profile the columns of a CSV file.
    Profile(ProfileArgs),
    /// Compare a CSV header against a model description.
    Match(MatchArgs),
    /// Append mock values for missing columns to a CSV sample.
    Synthesize(SynthesizeArgs),
    /// Classify a metrics JSON document into buckets.
    Classify(ClassifyArgs),
    /// Validate a model-description document.
    LintMetadata(LintArgs),
    /// Run the validation pipeline against the external validator.
    Validate(ValidateArgs),
}

#[derive(Args, Debug)]
struct ProfileArgs {
    /// CSV file to profile.
    csv: PathBuf,
    /// Write the profile JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct MatchArgs {
    #[arg(long)]
    metadata: PathBuf,
    #[arg(long)]
    csv: PathBuf,
}

#[derive(Args, Debug)]
struct SynthesizeArgs {
    #[arg(long)]
    csv: PathBuf,
    /// Columns to synthesize (comma separated).
    #[arg(long, value_delimiter = ',', required = true)]
    columns: Vec<String>,
    /// Maximum number of source rows kept.
    #[arg(long, default_value_t = 10)]
    rows: usize,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ClassifyArgs {
    /// Metrics JSON (flat, nested, or a full execution response).
    metrics: PathBuf,
}

#[derive(Args, Debug)]
struct LintArgs {
    metadata: PathBuf,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    #[arg(long)]
    metadata: PathBuf,
    #[arg(long)]
    csv: PathBuf,
    #[arg(long)]
    column_metadata: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = ModeArg::Full)]
    mode: ModeArg,
    /// Config file (defaults to ./modelfit.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Validator base URL; overrides config and environment.
    #[arg(long)]
    validator_url: Option<String>,
    /// Output directory for runs; overrides config.
    #[arg(long)]
    run_dir: Option<PathBuf>,
    /// Seed for mock column values; overrides config.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Auto,
    Full,
}

impl From<ModeArg> for PipelineMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Auto => PipelineMode::Auto,
            ModeArg::Full => PipelineMode::Full,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Profile(args) => {
            init_console_logging()?;
            run_profile(args)
        }
        Command::Match(args) => {
            init_console_logging()?;
            run_match(args)
        }
        Command::Synthesize(args) => {
            init_console_logging()?;
            run_synthesize(args)
        }
        Command::Classify(args) => {
            init_console_logging()?;
            run_classify(args)
        }
        Command::LintMetadata(args) => {
            init_console_logging()?;
            run_lint(args)
        }
        Command::Validate(args) => run_validate(args).await,
    }
}

fn run_profile(args: ProfileArgs) -> Result<(), CliError> {
    let text = read_text(&args.csv)?;
    let report = profile(&text)?;
    tracing::info!(
        event = "profile_finished",
        rows = report.row_count,
        columns = report.column_count,
        completeness = report.completeness
    );
    emit_json(&report, args.out.as_deref())
}

fn run_match(args: MatchArgs) -> Result<(), CliError> {
    let schema = load_model_schema(&read_text(&args.metadata)?)?;
    let header = Dataset::header(&read_text(&args.csv)?, &QuotedRowParser)?;
    let report = match_columns(&header, &schema);
    emit_json(&report, None)
}

fn run_synthesize(args: SynthesizeArgs) -> Result<(), CliError> {
    let text = read_text(&args.csv)?;
    let synthesizer = MockColumnSynthesizer::new(SynthOptions {
        sample_rows: args.rows,
        seed: args.seed,
    });
    let result = synthesizer.synthesize(&args.columns, &text)?;
    match args.out {
        Some(path) => {
            write_text(&path, &result.text)?;
            tracing::info!(event = "synthesized_written", path = %path.display());
        }
        None => println!("{}", result.text),
    }
    Ok(())
}

fn run_classify(args: ClassifyArgs) -> Result<(), CliError> {
    let metrics = parse_metrics(&read_text(&args.metrics)?)?;
    emit_json(&classify(&metrics), None)
}

fn run_lint(args: LintArgs) -> Result<(), CliError> {
    let text = read_text(&args.metadata)?;
    let document: serde_json::Value = serde_json::from_str(&text)
        .map_err(|err| MetaError::InvalidFormat(err.to_string()))?;
    let report = validate_metadata_json(&document)?;
    for issue in report.issues() {
        tracing::debug!(code = issue.code, path = %issue.path, "metadata issue");
    }
    emit_json(&report, None)?;
    if report.is_ok() {
        Ok(())
    } else {
        Err(CliError::MetadataIssues(report.errors.len()))
    }
}

async fn run_validate(args: ValidateArgs) -> Result<(), CliError> {
    let mut config = load_config(args.config.as_deref())?.with_env(|key| std::env::var(key).ok());
    if let Some(url) = args.validator_url {
        config.validator.base_url = url;
    }
    if let Some(dir) = args.run_dir {
        config.runs.dir = dir;
    }
    if args.seed.is_some() {
        config.synthesis.seed = args.seed;
    }
    let mode = PipelineMode::from(args.mode);

    let run_id = Uuid::new_v4();
    let run_ctx = RunContext {
        run_id: run_id.to_string(),
        started_at: chrono::Utc::now(),
        mode: mode.to_string(),
        run_dir: config.runs.dir.clone(),
        inputs: RunInputs {
            metadata: args.metadata.clone(),
            dataset: args.csv.clone(),
            column_metadata: args.column_metadata.clone(),
        },
        validator: config.validator.clone(),
        synthesis: config.synthesis.clone(),
    };
    let run_paths = start_run(&run_ctx)?;
    init_run_logging(&run_paths.logs_path)?;

    tracing::info!(
        event = "run_started",
        run_id = %run_id,
        mode = %mode,
        validator = %config.validator.base_url
    );

    let metadata = read_text(&args.metadata)?;
    let dataset = std::fs::read(&args.csv).map_err(|source| CliError::Read {
        path: args.csv.clone(),
        source,
    })?;
    let column_metadata = match &args.column_metadata {
        Some(path) => Some(read_text(path)?),
        None => None,
    };

    let dataset_profile = match profile(&String::from_utf8_lossy(&dataset)) {
        Ok(dataset_profile) => {
            write_json(&run_paths.profile_path, &dataset_profile)?;
            tracing::info!(event = "profile_written", path = %run_paths.profile_path.display());
            Some(dataset_profile)
        }
        Err(err) => {
            tracing::warn!(event = "profile_skipped", error = %err);
            None
        }
    };

    let validator = HttpValidator::new(config.validator.clone())?;
    let pipeline = ValidationPipeline::with_options(
        validator,
        PipelineOptions {
            mode,
            synthesis: config.synthesis.clone(),
        },
    );
    let mut request = ValidationRequest::new(&metadata, &dataset).with_run_id(run_id);
    if let Some(column_metadata) = column_metadata.as_deref() {
        request = request.with_column_metadata(column_metadata);
    }
    let outcome = pipeline.run(request).await;

    write_json(&run_paths.outcome_path, &outcome)?;
    tracing::info!(event = "outcome_written", path = %run_paths.outcome_path.display());

    if let Some(dataset_profile) = &dataset_profile {
        let summary = outcome.summary();
        let report = render_report(dataset_profile, Some(&summary), outcome.metrics.as_ref());
        write_text(&run_paths.report_path, &report)?;
        tracing::info!(event = "report_written", path = %run_paths.report_path.display());
    }

    println!("{}", serde_json::to_string_pretty(&outcome.summary())?);
    tracing::info!(
        event = "run_finished",
        status = if outcome.success { "success" } else { "failure" },
        run_dir = %run_paths.root.display(),
        duration_ms = outcome.duration_ms as u64
    );

    match outcome.error {
        Some(error) if !outcome.success => Err(CliError::ValidationFailed {
            stage: outcome.stage.to_string(),
            kind: error.kind.as_str().to_string(),
            message: error.message,
        }),
        _ => Ok(()),
    }
}

fn read_text(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn emit_json<T: Serialize>(value: &T, out: Option<&Path>) -> Result<(), CliError> {
    match out {
        Some(path) => {
            write_json(path, value)?;
            tracing::info!(event = "json_written", path = %path.display());
        }
        None => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

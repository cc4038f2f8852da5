use std::fs::{OpenOptions, create_dir_all};
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::{DateTime, Utc};
use modelfit_remote::RemoteOptions;
use modelfit_synth::SynthOptions;
use serde::Serialize;

use super::{RegistryError, RegistryResult};

/// Metadata captured at run start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub mode: String,
    pub run_dir: PathBuf,
    pub inputs: RunInputs,
    pub validator: RemoteOptions,
    pub synthesis: SynthOptions,
}

/// Input files of a validation run.
#[derive(Debug, Clone, Serialize)]
pub struct RunInputs {
    pub metadata: PathBuf,
    pub dataset: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_metadata: Option<PathBuf>,
}

/// JSON config written to each run directory.
#[derive(Debug, Serialize)]
pub struct RunConfig {
    pub run_id: String,
    pub started_at: String,
    pub mode: String,
    pub inputs: RunInputs,
    pub validator: RemoteOptions,
    pub synthesis: SynthOptions,
    pub git: GitInfo,
}

/// Git metadata for reproducibility.
#[derive(Debug, Serialize)]
pub struct GitInfo {
    pub commit: Option<String>,
    pub dirty: Option<bool>,
}

/// Paths for run artifacts.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub root: PathBuf,
    pub logs_path: PathBuf,
    pub profile_path: PathBuf,
    pub outcome_path: PathBuf,
    pub report_path: PathBuf,
}

pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let root = ctx.run_dir.join(format!("{timestamp}__run_{}", ctx.run_id));

    create_dir_all(&root)?;

    let config = RunConfig {
        run_id: ctx.run_id.clone(),
        started_at: ctx.started_at.to_rfc3339(),
        mode: ctx.mode.clone(),
        inputs: ctx.inputs.clone(),
        validator: ctx.validator.clone(),
        synthesis: ctx.synthesis.clone(),
        git: collect_git_info(),
    };
    write_json(&root.join("config.json"), &config)?;

    let logs_path = root.join("logs.ndjson");
    OpenOptions::new().create(true).append(true).open(&logs_path)?;

    Ok(RunPaths {
        profile_path: root.join("profile.json"),
        outcome_path: root.join("outcome.json"),
        report_path: root.join("report.md"),
        logs_path,
        root,
    })
}

pub fn collect_git_info() -> GitInfo {
    let commit = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
            } else {
                None
            }
        })
        .filter(|value| !value.is_empty());

    let dirty = Command::new("git")
        .args(["status", "--porcelain"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| !output.stdout.is_empty());

    GitInfo { commit, dirty }
}

/// Write pretty JSON, creating the parent directory when needed.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> RegistryResult<()> {
    ensure_parent(path)?;
    let file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(path)?;
    serde_json::to_writer_pretty(file, value).map_err(RegistryError::from)
}

pub fn write_text(path: &Path, text: &str) -> RegistryResult<()> {
    ensure_parent(path)?;
    std::fs::write(path, text)?;
    Ok(())
}

fn ensure_parent(path: &Path) -> RegistryResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_directory_layout() {
        let base = std::env::temp_dir().join(format!("modelfit-run-{}", std::process::id()));
        let started_at = DateTime::parse_from_rfc3339("2026-03-01T10:20:30Z")
            .expect("timestamp")
            .with_timezone(&Utc);
        let ctx = RunContext {
            run_id: "abc".to_string(),
            started_at,
            mode: "full".to_string(),
            run_dir: base.clone(),
            inputs: RunInputs {
                metadata: PathBuf::from("model.json"),
                dataset: PathBuf::from("data.csv"),
                column_metadata: None,
            },
            validator: RemoteOptions::default(),
            synthesis: SynthOptions::default(),
        };

        let paths = start_run(&ctx).expect("start run");
        assert_eq!(paths.root, base.join("2026-03-01T10-20-30Z__run_abc"));
        assert!(paths.logs_path.exists());

        let config: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(paths.root.join("config.json")).expect("config.json"),
        )
        .expect("json");
        assert_eq!(config["run_id"], "abc");
        assert_eq!(config["validator"]["execution_path"], "/validate-model");
        assert!(config["git"].is_object());

        std::fs::remove_dir_all(&base).ok();
    }
}

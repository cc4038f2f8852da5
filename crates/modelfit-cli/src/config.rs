use std::path::{Path, PathBuf};

use modelfit_remote::RemoteOptions;
use modelfit_synth::SynthOptions;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "modelfit.toml";

/// Environment variable overriding `validator.base_url`.
pub const VALIDATOR_URL_ENV: &str = "MODELFIT_VALIDATOR_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelfitConfig {
    pub validator: RemoteOptions,
    pub synthesis: SynthOptions,
    pub runs: RunsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunsConfig {
    pub dir: PathBuf,
}

impl Default for RunsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("runs"),
        }
    }
}

impl ModelfitConfig {
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply environment overrides through `lookup`.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(VALIDATOR_URL_ENV).filter(|url| !url.trim().is_empty()) {
            self.validator.base_url = url.trim().to_string();
        }
        self
    }
}

/// Load the explicit config file, or `modelfit.toml` when present, or defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<ModelfitConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                return Ok(ModelfitConfig::default());
            }
            default
        }
    };
    let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    ModelfitConfig::from_toml(&text, &path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ModelfitConfig::from_toml(
            "[validator]\nbase_url = \"http://validator:9000\"\n\n[synthesis]\nseed = 42\n",
            Path::new("modelfit.toml"),
        )
        .expect("config");
        assert_eq!(config.validator.base_url, "http://validator:9000");
        assert_eq!(config.validator.structural_path, "/validate-csv");
        assert_eq!(config.validator.timeout_secs, 60);
        assert_eq!(config.synthesis.seed, Some(42));
        assert_eq!(config.synthesis.sample_rows, 10);
        assert_eq!(config.runs.dir, PathBuf::from("runs"));
    }

    #[test]
    fn empty_file_equals_default_config() {
        let config = ModelfitConfig::from_toml("", Path::new("modelfit.toml")).expect("config");
        assert_eq!(config, ModelfitConfig::default());

        let seeded =
            ModelfitConfig::from_toml("[synthesis]\nseed = 3\n", Path::new("modelfit.toml"))
                .expect("config");
        assert_ne!(seeded, config);
        assert_eq!(seeded.validator, config.validator);
    }

    #[test]
    fn env_overrides_file_url() {
        let config = ModelfitConfig::default().with_env(|key| {
            (key == VALIDATOR_URL_ENV).then(|| " http://env:1234 ".to_string())
        });
        assert_eq!(config.validator.base_url, "http://env:1234");

        let untouched = ModelfitConfig::default().with_env(|_| Some(String::new()));
        assert_eq!(untouched.validator.base_url, "http://localhost:8000");
    }

    #[test]
    fn malformed_file_is_reported_with_path() {
        let err = ModelfitConfig::from_toml("[validator\n", Path::new("bad.toml"))
            .expect_err("malformed");
        assert!(err.to_string().contains("bad.toml"));
    }
}

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Location and limits of the external validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteOptions {
    pub base_url: String,
    pub structural_path: String,
    pub execution_path: String,
    pub timeout_secs: u64,
}

impl Default for RemoteOptions {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            structural_path: "/validate-csv".to_string(),
            execution_path: "/validate-model".to_string(),
            timeout_secs: 60,
        }
    }
}

impl RemoteOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn structural_url(&self) -> String {
        join_url(&self.base_url, &self.structural_path)
    }

    pub fn execution_url(&self) -> String {
        join_url(&self.base_url, &self.execution_path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_without_doubled_slashes() {
        let options = RemoteOptions {
            base_url: "http://validator:9000/".to_string(),
            ..RemoteOptions::default()
        };
        assert_eq!(options.structural_url(), "http://validator:9000/validate-csv");
        assert_eq!(
            RemoteOptions::default().execution_url(),
            "http://localhost:8000/validate-model"
        );
    }
}

use crate::error::{FlowRecError, Result};
use serde::Deserialize;
use std::path::Path;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// What the merger does with a violation that carries no permission descriptor.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MissingPermissionsPolicy {
    /// Fail the merge.
    #[default]
    Reject,
    /// Treat the record as unreadable and unwritable.
    Deny,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MergeConfig {
    pub missing_permissions: MissingPermissionsPolicy,
    /// Upper bound on the number of node results `try_merge` accepts.
    /// Unbounded when absent.
    pub max_nodes: Option<usize>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            missing_permissions: MissingPermissionsPolicy::Reject,
            max_nodes: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct FlowRecConfig {
    pub merge: MergeConfig,
    pub log: LogConfig,
}

impl FlowRecConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: FlowRecConfig = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!("Loading configuration from {}", path.as_ref().display());
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.merge.max_nodes == Some(0) {
            return Err(FlowRecError::Config(
                "merge.max_nodes must be at least 1".to_string(),
            ));
        }
        if !LOG_LEVELS.contains(&self.log.level.to_ascii_lowercase().as_str()) {
            return Err(FlowRecError::Config(format!(
                "log.level '{}' must be one of: {}",
                self.log.level,
                LOG_LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}

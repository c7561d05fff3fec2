use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::mode::AnalyzerMode;

pub const DEFAULT_CONFIG_FILE: &str = "hopethread.yaml";

fn default_hope_thread_threshold() -> f64 {
    0.85
}

fn default_history_window_days() -> u32 {
    30
}

fn default_similar_limit() -> usize {
    10
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalyzerConfig {
    #[serde(default)]
    pub mode: AnalyzerMode,
    /// Empathy score at or above which a post is surfaced as a Hope Thread.
    #[serde(default = "default_hope_thread_threshold")]
    pub hope_thread_threshold: f64,
    #[serde(default = "default_history_window_days")]
    pub history_window_days: u32,
    #[serde(default = "default_similar_limit")]
    pub similar_limit: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            mode: AnalyzerMode::default(),
            hope_thread_threshold: default_hope_thread_threshold(),
            history_window_days: default_history_window_days(),
            similar_limit: default_similar_limit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("hope_thread_threshold must be within [0, 1], got {0}")]
    ThresholdOutOfRange(f64),
    #[error("history_window_days must be at least 1")]
    EmptyHistoryWindow,
    #[error("similar_limit must be at least 1")]
    ZeroSimilarLimit,
}

impl AnalyzerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.hope_thread_threshold) {
            return Err(ConfigError::ThresholdOutOfRange(self.hope_thread_threshold));
        }
        if self.history_window_days == 0 {
            return Err(ConfigError::EmptyHistoryWindow);
        }
        if self.similar_limit == 0 {
            return Err(ConfigError::ZeroSimilarLimit);
        }
        Ok(())
    }
}

/// Read and validate a YAML config file.
pub fn load_config(path: &Path) -> Result<AnalyzerConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: AnalyzerConfig = serde_yaml::from_str(&raw)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("validating config {}", path.display()))?;
    tracing::debug!(path = %path.display(), mode = config.mode.as_str(), "loaded analyzer config");
    Ok(config)
}

/// Explicit path must exist; otherwise `hopethread.yaml` in `dir` is used when
/// present, falling back to defaults.
pub fn resolve_config(explicit: Option<&Path>, dir: &Path) -> Result<AnalyzerConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    let candidate = dir.join(DEFAULT_CONFIG_FILE);
    if candidate.is_file() {
        load_config(&candidate)
    } else {
        Ok(AnalyzerConfig::default())
    }
}

//! Top-level configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    defaults, EngineConfig, ExplainConfig, KnowledgeConfig, ObservabilityConfig, ScoringConfig,
};
use crate::constants::MIN_RETRIEVAL_K;
use crate::errors::ConfigError;
use crate::models::Severity;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`HEVAL_*`)
/// 2. TOML config file
/// 3. Compiled defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HevalConfig {
    pub scoring: ScoringConfig,
    pub knowledge: KnowledgeConfig,
    pub explain: ExplainConfig,
    pub engine: EngineConfig,
    pub observability: ObservabilityConfig,
}

impl HevalConfig {
    /// Load configuration: defaults, then the TOML file (if given), then the
    /// process environment. The result is validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file. Unknown keys are ignored, missing keys take defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `HEVAL_*` overrides read through `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(defaults::ENV_SIMILARITY_FLOOR) {
            self.knowledge.similarity_floor = parse_value(defaults::ENV_SIMILARITY_FLOOR, &raw)?;
        }
        if let Some(raw) = lookup(defaults::ENV_RETRIEVAL_TIMEOUT_MS) {
            self.explain.retrieval_timeout_ms =
                parse_value(defaults::ENV_RETRIEVAL_TIMEOUT_MS, &raw)?;
        }
        if let Some(raw) = lookup(defaults::ENV_RETRIEVAL_K) {
            self.explain.retrieval_k = parse_value(defaults::ENV_RETRIEVAL_K, &raw)?;
        }
        if let Some(raw) = lookup(defaults::ENV_LOG) {
            self.observability.log_filter = raw;
        }
        Ok(())
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let floor = self.knowledge.similarity_floor;
        if !floor.is_finite() || !(-1.0..=1.0).contains(&floor) {
            return Err(ConfigError::ValidationFailed {
                field: "knowledge.similarity_floor".to_string(),
                message: "must be between -1.0 and 1.0".to_string(),
            });
        }
        if self.knowledge.embedding_dimensions == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "knowledge.embedding_dimensions".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.explain.retrieval_k < MIN_RETRIEVAL_K {
            return Err(ConfigError::ValidationFailed {
                field: "explain.retrieval_k".to_string(),
                message: format!("must be at least {MIN_RETRIEVAL_K}"),
            });
        }
        if self.explain.retrieval_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "explain.retrieval_timeout_ms".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.explain.retrieval_workers == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "explain.retrieval_workers".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.explain.retrieval_queue_capacity == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "explain.retrieval_queue_capacity".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }

        let multipliers = &self.scoring.severity_multipliers;
        for severity in Severity::all() {
            if multipliers.multiplier(*severity) == 0 {
                return Err(ConfigError::ValidationFailed {
                    field: format!("scoring.severity_multipliers.{severity}"),
                    message: "must be greater than 0".to_string(),
                });
            }
        }
        let ordered = multipliers.critical >= multipliers.major
            && multipliers.major >= multipliers.minor
            && multipliers.minor >= multipliers.cosmetic;
        if !ordered {
            return Err(ConfigError::ValidationFailed {
                field: "scoring.severity_multipliers".to_string(),
                message: "must satisfy critical >= major >= minor >= cosmetic".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        field: field.to_string(),
        message: format!("cannot parse '{raw}'"),
    })
}

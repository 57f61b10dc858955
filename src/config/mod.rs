//! Engine settings loaded from YAML.
//!
//! ```yaml
//! default_page_size: 100
//! simulation:
//!   enabled: true
//!   base_latency: 250ms
//!   jitter: 450ms
//!   failure_keyword: error
//! ```
//!
//! Every field is optional; missing fields take the defaults shown above,
//! except `simulation.enabled`, which defaults to `false`.

pub mod duration;

use duration::deserialize_duration;
use query_engine::simulation::{DEFAULT_BASE_LATENCY, DEFAULT_FAILURE_KEYWORD, DEFAULT_JITTER};
use query_engine::{MockBackend, QueryEngine, QueryError, DEFAULT_PAGE_SIZE};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Error type for settings loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error reading the settings file
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Backend simulation settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Use the mock backend instead of answering immediately
    pub enabled: bool,

    #[serde(deserialize_with = "deserialize_duration")]
    pub base_latency: Duration,

    /// Upper bound of the random latency added to `base_latency`
    #[serde(deserialize_with = "deserialize_duration")]
    pub jitter: Duration,

    /// Whole word that makes a query fail; `null` disables failures
    pub failure_keyword: Option<String>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            base_latency: DEFAULT_BASE_LATENCY,
            jitter: DEFAULT_JITTER,
            failure_keyword: Some(DEFAULT_FAILURE_KEYWORD.to_string()),
        }
    }
}

/// Top-level engine settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub simulation: SimulationSettings,

    /// Page size for requests that do not set one
    pub default_page_size: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            simulation: SimulationSettings::default(),
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl EngineSettings {
    /// Load settings from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from a YAML string. An empty document yields the
    /// defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Build a query engine with these settings.
    pub fn build_engine(&self) -> Result<QueryEngine, QueryError> {
        let engine = QueryEngine::new()?.with_default_page_size(self.default_page_size);
        if !self.simulation.enabled {
            return Ok(engine);
        }
        let mock = MockBackend::new()
            .with_latency(self.simulation.base_latency, self.simulation.jitter)
            .with_failure_keyword(self.simulation.failure_keyword.as_deref());
        Ok(engine.with_simulation(mock))
    }
}

//! Run configuration
//!
//! A `CoreConfig` is an immutable value handed to each stage. It can be read
//! from a YAML file; every field is optional there:
//!
//! ```yaml
//! stopwords:
//!   english: true
//!   extra: [transformer]
//! max_nonlast_names: 1
//! percentile: 90
//! max_nodes: 48
//! normalize_histograms: false
//! ```

use crate::histogram::Stopwords;
use crate::normalize::{NormalizeOptions, DEFAULT_MAX_NONLAST_NAMES};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Which words word-frequency histograms skip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StopwordConfig {
    /// Use the English list plus the domain list
    pub english: bool,
    /// Additional words
    pub extra: Vec<String>,
}

impl Default for StopwordConfig {
    fn default() -> Self {
        Self {
            english: true,
            extra: Vec::new(),
        }
    }
}

impl StopwordConfig {
    pub fn build(&self) -> Stopwords {
        let base = if self.english {
            Stopwords::english()
        } else {
            Stopwords::empty()
        };
        base.with_extra(self.extra.iter().cloned())
    }
}

/// Configuration for one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub stopwords: StopwordConfig,
    /// Non-last author names kept as initials; `None` keeps all
    pub max_nonlast_names: Option<usize>,
    /// Word histogram cutoff percentile, disabled when `None`
    pub percentile: Option<f64>,
    /// Nodes kept when reducing graphs, disabled when `None`
    pub max_nodes: Option<usize>,
    /// Write word histograms as fractions of the total
    pub normalize_histograms: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            stopwords: StopwordConfig::default(),
            max_nonlast_names: Some(DEFAULT_MAX_NONLAST_NAMES),
            percentile: None,
            max_nodes: None,
            normalize_histograms: false,
        }
    }
}

impl CoreConfig {
    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        let config: CoreConfig = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_yaml_str(&text)?;
        tracing::debug!(path = %path.as_ref().display(), "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(p) = self.percentile {
            if !(0.0..=100.0).contains(&p) {
                return Err(ConfigError::Invalid(format!(
                    "percentile must be within 0..=100, got {}",
                    p
                )));
            }
        }
        if self.max_nodes == Some(0) {
            return Err(ConfigError::Invalid("max_nodes must be positive".to_string()));
        }
        Ok(())
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            max_nonlast_names: self.max_nonlast_names,
        }
    }

    pub fn stopword_set(&self) -> Stopwords {
        self.stopwords.build()
    }

    pub fn with_max_nonlast_names(mut self, max: Option<usize>) -> Self {
        self.max_nonlast_names = max;
        self
    }

    pub fn with_percentile(mut self, percentile: f64) -> Self {
        self.percentile = Some(percentile);
        self
    }

    pub fn with_max_nodes(mut self, max_nodes: usize) -> Self {
        self.max_nodes = Some(max_nodes);
        self
    }

    pub fn with_normalized_histograms(mut self, normalize: bool) -> Self {
        self.normalize_histograms = normalize;
        self
    }
}

// WHY: one place resolves defaults, the optional TOML file and CLI/env
// overrides into validated settings for both summarizers

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::extractive::DEFAULT_SENTENCE_COUNT;
use crate::generative::inference_api::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::generative::{GenerationParams, InferenceApiConfig};
use crate::lsa::LsaConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractiveSettings {
    pub sentence_count: usize,
    pub reduction_ratio: f64,
    pub use_stop_words: bool,
}

impl Default for ExtractiveSettings {
    fn default() -> Self {
        Self {
            sentence_count: DEFAULT_SENTENCE_COUNT,
            reduction_ratio: 1.0,
            use_stop_words: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerativeSettings {
    pub endpoint: String,
    pub model: String,
    pub api_token: Option<String>,
    pub max_length: usize,
    pub min_length: usize,
    pub max_input_tokens: usize,
    pub timeout_secs: u64,
}

impl Default for GenerativeSettings {
    fn default() -> Self {
        let params = GenerationParams::default();
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_token: None,
            max_length: params.max_length,
            min_length: params.min_length,
            max_input_tokens: 1024,
            timeout_secs: 120,
        }
    }
}

/// Settings for the whole application
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrevityConfig {
    pub extractive: ExtractiveSettings,
    pub generative: GenerativeSettings,
}

impl BrevityConfig {
    /// Load settings from a TOML file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml(&contents).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Reject settings that no summarizer can honor
    pub fn validate(&self) -> Result<(), ConfigError> {
        let extractive = &self.extractive;
        let generative = &self.generative;

        if extractive.sentence_count == 0 {
            return Err(ConfigError::Invalid("extractive.sentence_count must be at least 1".into()));
        }
        if !(extractive.reduction_ratio > 0.0 && extractive.reduction_ratio <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "extractive.reduction_ratio must be in (0, 1], got {}",
                extractive.reduction_ratio
            )));
        }
        if generative.max_length == 0 {
            return Err(ConfigError::Invalid("generative.max_length must be positive".into()));
        }
        if generative.min_length > generative.max_length {
            return Err(ConfigError::Invalid(format!(
                "generative.min_length ({}) exceeds generative.max_length ({})",
                generative.min_length, generative.max_length
            )));
        }
        if generative.max_input_tokens == 0 {
            return Err(ConfigError::Invalid("generative.max_input_tokens must be positive".into()));
        }
        if generative.endpoint.trim().is_empty() || generative.model.trim().is_empty() {
            return Err(ConfigError::Invalid("generative.endpoint and generative.model are required".into()));
        }
        Ok(())
    }

    pub fn lsa_config(&self) -> LsaConfig {
        LsaConfig {
            reduction_ratio: self.extractive.reduction_ratio,
            use_stop_words: self.extractive.use_stop_words,
        }
    }

    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            max_length: self.generative.max_length,
            min_length: self.generative.min_length,
            do_sample: false,
        }
    }

    pub fn inference_api_config(&self) -> InferenceApiConfig {
        InferenceApiConfig {
            endpoint: self.generative.endpoint.clone(),
            model: self.generative.model.clone(),
            api_token: self.generative.api_token.clone(),
            timeout: Duration::from_secs(self.generative.timeout_secs),
            max_input_tokens: self.generative.max_input_tokens,
        }
    }
}

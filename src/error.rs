// WHY: each summarizer reports failures as values; these enums are the typed
// form before the wrapper boundary turns them into user-facing strings

use thiserror::Error;

/// Failures inside the extractive path
#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("sentence segmentation failed: {0}")]
    Segmentation(String),

    #[error("word tokenizer could not be built: {0}")]
    Tokenizer(String),

    #[error("singular value decomposition did not converge after {sweeps} sweeps")]
    NoConvergence { sweeps: usize },

    #[error("term matrix contains non-finite values")]
    NonFinite,
}

/// Failures raised by a generative backend
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("input text is empty")]
    EmptyInput,

    #[error("input is too long for the model: about {estimated} tokens, limit is {limit}")]
    InputTooLong { estimated: usize, limit: usize },

    #[error("model backend is unavailable: {0}")]
    Unavailable(String),

    #[error("model backend returned an error: {0}")]
    Backend(String),

    #[error("unexpected response from model backend: {0}")]
    MalformedResponse(String),

    #[error("model backend returned an empty summary")]
    EmptySummary,
}

impl From<reqwest::Error> for GenerationError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            GenerationError::Unavailable(error.to_string())
        } else if error.is_decode() {
            GenerationError::MalformedResponse(error.to_string())
        } else {
            GenerationError::Backend(error.to_string())
        }
    }
}

/// Invalid configuration values
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

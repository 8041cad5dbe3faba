pub mod config;
pub mod dispatcher;
pub mod error;
pub mod extractive;
pub mod frontend;
pub mod generative;
pub mod lsa;
pub mod reader;
pub mod sentence_detector;

// Re-export main types for convenient access
pub use config::BrevityConfig;
pub use dispatcher::{
    SummarizationDispatcher, SummarizationRequest, SummarizationResult, SummaryMethod,
};
pub use error::{ConfigError, GenerationError, SummarizeError};
pub use extractive::{SentenceSummarizer, DEFAULT_SENTENCE_COUNT, TOO_SHORT_MESSAGE};
pub use generative::{
    GenerationParams, GenerativeSummarizer, InferenceApiConfig, InferenceApiGenerator,
    TextGenerator,
};
pub use sentence_detector::{SentenceDetector, SentenceDocument, Span};

// WHY: the sequence-to-sequence model runs behind a hosted inference endpoint;
// this client is built once at startup and reused for every request

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{estimate_tokens, GenerationParams, TextGenerator};
use crate::error::GenerationError;

pub const DEFAULT_ENDPOINT: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_MODEL: &str = "facebook/bart-large-cnn";

/// Longest body excerpt quoted in error messages
const ERROR_EXCERPT_CHARS: usize = 200;

/// Connection settings for the inference endpoint
#[derive(Debug, Clone)]
pub struct InferenceApiConfig {
    pub endpoint: String,
    pub model: String,
    pub api_token: Option<String>,
    pub timeout: Duration,
    /// Context window of the model, in tokens
    pub max_input_tokens: usize,
}

impl Default for InferenceApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_token: None,
            timeout: Duration::from_secs(120),
            max_input_tokens: 1024,
        }
    }
}

#[derive(Serialize)]
struct SummarizationPayload<'a> {
    inputs: &'a str,
    parameters: &'a GenerationParams,
    options: RequestOptions,
}

#[derive(Serialize)]
struct RequestOptions {
    wait_for_model: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Summaries(Vec<SummaryEntry>),
    Failure { error: String },
}

#[derive(Deserialize)]
struct SummaryEntry {
    summary_text: String,
}

/// Summarization model served over HTTP
pub struct InferenceApiGenerator {
    client: Client,
    url: String,
    model: String,
    api_token: Option<String>,
    max_input_tokens: usize,
}

impl InferenceApiGenerator {
    /// Build the HTTP client for the configured model
    pub fn connect(config: InferenceApiConfig) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("brevity/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let url = format!("{}/models/{}", config.endpoint.trim_end_matches('/'), config.model);
        info!(%url, timeout_secs = config.timeout.as_secs(), "Configured inference backend");

        Ok(Self {
            client,
            url,
            model: config.model,
            api_token: config.api_token,
            max_input_tokens: config.max_input_tokens,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TextGenerator for InferenceApiGenerator {
    fn generate(&self, text: &str, params: &GenerationParams) -> Result<String, GenerationError> {
        let estimated = estimate_tokens(text);
        if estimated > self.max_input_tokens {
            return Err(GenerationError::InputTooLong {
                estimated,
                limit: self.max_input_tokens,
            });
        }

        let payload = SummarizationPayload {
            inputs: text,
            parameters: params,
            options: RequestOptions { wait_for_model: true },
        };

        let mut request = self.client.post(&self.url).json(&payload);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        debug!(model = %self.model, estimated_tokens = estimated, "Sending summarization request");
        let response = request.send()?;
        let status = response.status();
        let body = response.text()?;

        parse_response(status, &body)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Extract the generated text from an inference response body
pub fn parse_response(status: StatusCode, body: &str) -> Result<String, GenerationError> {
    match serde_json::from_str::<InferenceResponse>(body) {
        Ok(InferenceResponse::Summaries(entries)) if status.is_success() => entries
            .into_iter()
            .next()
            .map(|entry| entry.summary_text)
            .ok_or_else(|| GenerationError::MalformedResponse("empty result list".to_string())),
        Ok(InferenceResponse::Summaries(_)) => Err(GenerationError::Backend(format!("HTTP {status}"))),
        Ok(InferenceResponse::Failure { error }) if status == StatusCode::SERVICE_UNAVAILABLE => {
            Err(GenerationError::Unavailable(error))
        }
        Ok(InferenceResponse::Failure { error }) => Err(GenerationError::Backend(error)),
        Err(_) if !status.is_success() => Err(GenerationError::Backend(format!(
            "HTTP {status}: {}",
            excerpt(body)
        ))),
        Err(e) => Err(GenerationError::MalformedResponse(e.to_string())),
    }
}

fn excerpt(body: &str) -> String {
    body.trim().chars().take(ERROR_EXCERPT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_summary() {
        let body = r#"[{"summary_text": "The mayor resigned after the vote."}]"#;
        assert_eq!(
            parse_response(StatusCode::OK, body).unwrap(),
            "The mayor resigned after the vote."
        );
    }

    #[test]
    fn test_parse_ignores_extra_fields() {
        let body = r#"[{"summary_text": "Short.", "score": 0.9}, {"summary_text": "Other."}]"#;
        assert_eq!(parse_response(StatusCode::OK, body).unwrap(), "Short.");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_response(StatusCode::SERVICE_UNAVAILABLE, r#"{"error": "Model is loading"}"#),
            Err(GenerationError::Unavailable(msg)) if msg == "Model is loading"
        ));
        assert!(matches!(
            parse_response(StatusCode::BAD_REQUEST, r#"{"error": "index out of range in self"}"#),
            Err(GenerationError::Backend(msg)) if msg == "index out of range in self"
        ));
        assert!(matches!(
            parse_response(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>"),
            Err(GenerationError::Backend(msg)) if msg == "HTTP 502 Bad Gateway: <html>bad gateway</html>"
        ));
        assert!(matches!(
            parse_response(StatusCode::OK, "[]"),
            Err(GenerationError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_response(StatusCode::OK, "not json"),
            Err(GenerationError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_url_and_input_limit() {
        let config = InferenceApiConfig {
            endpoint: "http://127.0.0.1:9/".to_string(),
            max_input_tokens: 4,
            ..InferenceApiConfig::default()
        };
        let generator = InferenceApiGenerator::connect(config).unwrap();
        assert_eq!(generator.url(), "http://127.0.0.1:9/models/facebook/bart-large-cnn");

        let result = generator.generate("one two three four five", &GenerationParams::default());
        assert!(matches!(
            result,
            Err(GenerationError::InputTooLong { estimated: 5, limit: 4 })
        ));
    }

    #[test]
    fn test_payload_shape() {
        let params = GenerationParams::default();
        let payload = SummarizationPayload {
            inputs: "Text.",
            parameters: &params,
            options: RequestOptions { wait_for_model: true },
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "inputs": "Text.",
                "parameters": {"max_length": 130, "min_length": 30, "do_sample": false},
                "options": {"wait_for_model": true}
            })
        );
    }
}

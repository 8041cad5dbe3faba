// HTTP behavior of the inference backend against a local stub server
// WHY: request shape and failure mapping must hold without network access

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use brevity::{
    GenerationError, GenerationParams, InferenceApiConfig, InferenceApiGenerator,
    SummarizationDispatcher, TextGenerator,
};

/// Request as seen by the stub server
struct CapturedRequest {
    request_line: String,
    headers: Vec<(String, String)>,
    body: serde_json::Value,
}

impl CapturedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Serve one canned response and hand back the request that triggered it
fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind stub server");
    let endpoint = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().expect("Stub server accept failed");
        let mut reader = BufReader::new(stream);

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();

        let mut headers = Vec::new();
        loop {
            let mut line = String::new();
            reader.read_line(&mut line).unwrap();
            let line = line.trim_end();
            if line.is_empty() {
                break;
            }
            if let Some((key, value)) = line.split_once(':') {
                headers.push((key.trim().to_string(), value.trim().to_string()));
            }
        }

        let length: usize = headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.parse().ok())
            .unwrap_or(0);
        let mut raw_body = vec![0u8; length];
        reader.read_exact(&mut raw_body).unwrap();

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let mut stream = reader.into_inner();
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();

        CapturedRequest {
            request_line: request_line.trim_end().to_string(),
            headers,
            body: serde_json::from_slice(&raw_body).unwrap_or(serde_json::Value::Null),
        }
    });

    (endpoint, handle)
}

fn generator_for(endpoint: String, api_token: Option<&str>) -> InferenceApiGenerator {
    InferenceApiGenerator::connect(InferenceApiConfig {
        endpoint,
        model: "test-org/test-model".to_string(),
        api_token: api_token.map(str::to_string),
        timeout: Duration::from_secs(10),
        max_input_tokens: 1024,
    })
    .expect("Failed to build HTTP client")
}

#[test]
fn test_successful_summary_request() {
    let (endpoint, server) = serve_once(
        "200 OK",
        r#"[{"summary_text": "Researchers found microbes that survive extreme heat."}]"#,
    );
    let generator = generator_for(endpoint, Some("secret-token"));

    let summary = generator
        .generate("Soils near vents held unusual microbes.", &GenerationParams::default())
        .unwrap();
    assert_eq!(summary, "Researchers found microbes that survive extreme heat.");

    let request = server.join().unwrap();
    assert_eq!(request.request_line, "POST /models/test-org/test-model HTTP/1.1");
    assert_eq!(request.header("authorization"), Some("Bearer secret-token"));
    assert_eq!(
        request.body,
        serde_json::json!({
            "inputs": "Soils near vents held unusual microbes.",
            "parameters": {"max_length": 130, "min_length": 30, "do_sample": false},
            "options": {"wait_for_model": true}
        })
    );
}

#[test]
fn test_request_without_token_has_no_authorization() {
    let (endpoint, server) = serve_once("200 OK", r#"[{"summary_text": "Fine."}]"#);
    let generator = generator_for(endpoint, None);

    generator.generate("Some text.", &GenerationParams::default()).unwrap();

    let request = server.join().unwrap();
    assert_eq!(request.header("authorization"), None);
}

#[test]
fn test_loading_model_maps_to_unavailable() {
    let (endpoint, server) = serve_once(
        "503 Service Unavailable",
        r#"{"error": "Model test-org/test-model is currently loading", "estimated_time": 20.0}"#,
    );
    let generator = generator_for(endpoint, None);

    let result = generator.generate("Some text.", &GenerationParams::default());
    server.join().unwrap();

    assert!(matches!(
        result,
        Err(GenerationError::Unavailable(msg)) if msg.contains("currently loading")
    ));
}

#[test]
fn test_backend_error_reaches_dispatcher_as_message() {
    let (endpoint, server) = serve_once("400 Bad Request", r#"{"error": "index out of range in self"}"#);
    let generator = generator_for(endpoint, None);

    let config = brevity::BrevityConfig::default();
    let dispatcher = SummarizationDispatcher::from_config(&config, Arc::new(generator)).unwrap();
    let result = dispatcher.summarize("Some text to summarize.", Some("Abstractive"));
    server.join().unwrap();

    assert_eq!(result.original_text, "Some text to summarize.");
    assert_eq!(
        result.summary_text,
        "Error in abstractive summarization: model backend returned an error: index out of range in self"
    );
}

#[test]
fn test_unreachable_endpoint_maps_to_unavailable() {
    // Bind then drop to get a port with nothing listening
    let endpoint = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };
    let generator = generator_for(endpoint, None);

    let result = generator.generate("Some text.", &GenerationParams::default());
    assert!(matches!(result, Err(GenerationError::Unavailable(_))), "got {result:?}");
}

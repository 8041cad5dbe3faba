// Integration test utilities and common code
// WHY: every integration test needs a dispatcher wired to a substitute model

#![allow(dead_code)]

pub mod fixtures;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

use brevity::config::BrevityConfig;
use brevity::{GenerationError, GenerationParams, SummarizationDispatcher, TextGenerator};

/// Stand-in model that writes a deterministic summary and records its calls
pub struct RecordingGenerator {
    calls: AtomicUsize,
    last_params: Mutex<Option<GenerationParams>>,
}

impl RecordingGenerator {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            last_params: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_params(&self) -> Option<GenerationParams> {
        *self.last_params.lock().unwrap()
    }
}

impl TextGenerator for RecordingGenerator {
    fn generate(&self, text: &str, params: &GenerationParams) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_params.lock().unwrap() = Some(*params);

        // Paraphrase-like output: reversed words padded to the minimum length
        let mut words: Vec<String> = text
            .split_whitespace()
            .rev()
            .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        while words.len() < params.min_length {
            words.push("summary".to_string());
        }
        words.truncate(params.max_length);
        Ok(format!("In short, {}.", words.join(" ")))
    }

    fn model_name(&self) -> &str {
        "recording"
    }
}

/// Stand-in model that always fails
pub struct FailingGenerator(pub fn() -> GenerationError);

impl TextGenerator for FailingGenerator {
    fn generate(&self, _text: &str, _params: &GenerationParams) -> Result<String, GenerationError> {
        Err((self.0)())
    }

    fn model_name(&self) -> &str {
        "failing"
    }
}

pub fn dispatcher_with(generator: Arc<dyn TextGenerator>) -> SummarizationDispatcher {
    SummarizationDispatcher::from_config(&BrevityConfig::default(), generator)
        .expect("Failed to build dispatcher")
}

/// Split an extractive summary back into the indices of the source sentences
/// it was built from, or `None` when it is not a single-space join of them
pub fn match_source_sentences(summary: &str, sources: &[&str]) -> Option<Vec<usize>> {
    let mut remaining = summary;
    let mut indices = Vec::new();

    for (index, sentence) in sources.iter().enumerate() {
        if let Some(rest) = remaining.strip_prefix(sentence) {
            indices.push(index);
            if rest.is_empty() {
                return Some(indices);
            }
            remaining = rest.strip_prefix(' ')?;
        }
    }
    None
}

/// Temporary directory holding input documents
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();

        Self {
            temp_dir,
            root_path,
        }
    }

    /// Create an input document with given content
    pub fn create_document<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }

        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }
}

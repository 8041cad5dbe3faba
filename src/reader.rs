use anyhow::{Context, Result};
use std::fmt;
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, BufReader};
use tracing::{debug, info};

/// Where the text to summarize comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::File(path) => write!(f, "{}", path.display()),
            InputSource::Stdin => write!(f, "<stdin>"),
        }
    }
}

impl From<Option<PathBuf>> for InputSource {
    fn from(path: Option<PathBuf>) -> Self {
        path.map(InputSource::File).unwrap_or(InputSource::Stdin)
    }
}

/// Configuration for input reading behavior
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Buffer size for async reading
    pub buffer_size: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self { buffer_size: 8192 }
    }
}

/// Statistics for one read
#[derive(Debug, Clone)]
pub struct ReadStats {
    pub source: String,
    pub lines_read: u64,
    pub bytes_read: u64,
    pub duration_ms: u64,
}

/// Async reader that loads a whole document and checks it is valid UTF-8
pub struct AsyncInputReader {
    config: ReaderConfig,
}

impl AsyncInputReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    pub async fn read(&self, source: &InputSource) -> Result<(String, ReadStats)> {
        let start_time = std::time::Instant::now();
        debug!("Starting async read of {}", source);

        let bytes = match source {
            InputSource::File(path) => {
                let file = File::open(path)
                    .await
                    .with_context(|| format!("Failed to open input file {}", path.display()))?;
                self.read_all(file).await
            }
            InputSource::Stdin => self.read_all(tokio::io::stdin()).await,
        }
        .with_context(|| format!("Failed to read {source}"))?;

        let text = String::from_utf8(bytes).map_err(|e| {
            anyhow::anyhow!(
                "Input {} is not valid UTF-8 (invalid byte at offset {})",
                source,
                e.utf8_error().valid_up_to()
            )
        })?;

        let stats = ReadStats {
            source: source.to_string(),
            lines_read: text.lines().count() as u64,
            bytes_read: text.len() as u64,
            duration_ms: start_time.elapsed().as_millis() as u64,
        };

        info!(
            "Read {}: {} lines, {} bytes in {}ms",
            stats.source, stats.lines_read, stats.bytes_read, stats.duration_ms
        );
        Ok((text, stats))
    }

    async fn read_all<R: AsyncRead + Unpin>(&self, source: R) -> std::io::Result<Vec<u8>> {
        let mut reader = BufReader::with_capacity(self.config.buffer_size, source);
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        Ok(bytes)
    }
}

/// Read a whole input with default configuration
pub async fn read_input(source: &InputSource) -> Result<String> {
    let reader = AsyncInputReader::new(ReaderConfig::default());
    let (text, _stats) = reader.read(source).await?;
    Ok(text)
}

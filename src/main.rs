use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use brevity::config::BrevityConfig;
use brevity::frontend::{self, InteractiveSession};
use brevity::generative::InferenceApiGenerator;
use brevity::reader::{self, InputSource};
use brevity::{SummarizationDispatcher, SummarizationResult, SummaryMethod};

#[derive(Parser, Debug)]
#[command(name = "brevity")]
#[command(about = "Extractive (LSA) and abstractive (generative model) text summarization")]
#[command(version)]
struct Args {
    /// TOML configuration file
    #[arg(long, global = true, env = "BREVITY_CONFIG")]
    config: Option<PathBuf>,

    /// Base URL of the model inference endpoint
    #[arg(long, global = true, env = "BREVITY_ENDPOINT")]
    endpoint: Option<String>,

    /// Summarization model served by the endpoint
    #[arg(long, global = true, env = "BREVITY_MODEL")]
    model: Option<String>,

    /// Bearer token for the inference endpoint
    #[arg(long, global = true, env = "BREVITY_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// Timeout for one generation request
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Suppress the progress spinner
    #[arg(long, global = true)]
    no_progress: bool,

    /// Log at debug level instead of info
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize a file or standard input once
    Summarize {
        /// "Extractive" selects sentence extraction; any other value uses Abstractive
        #[arg(short, long, default_value = SummaryMethod::ABSTRACTIVE_TAG)]
        method: String,

        /// Input file (reads standard input when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Sentences kept by an extractive summary
        #[arg(short, long)]
        sentences: Option<usize>,

        /// Print the result as JSON instead of two columns
        #[arg(long)]
        json: bool,

        /// Total width of the two-column display
        #[arg(long, default_value_t = 100)]
        width: usize,
    },

    /// Summarize texts typed at the terminal until :quit
    Interactive {
        /// Method used when the prompt is left empty
        #[arg(short, long, default_value = SummaryMethod::EXTRACTIVE_TAG)]
        method: String,

        /// Sentences kept by an extractive summary
        #[arg(short, long)]
        sentences: Option<usize>,

        /// Total width of the two-column display
        #[arg(long, default_value_t = 100)]
        width: usize,
    },
}

fn init_logging(verbose: u8) {
    // WHY: stdout carries the summaries, so structured logs go to stderr
    let default_level = if verbose > 0 { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .json()
        .init();
}

/// Defaults, then the config file, then flags and environment
fn load_config(args: &Args) -> Result<BrevityConfig> {
    let mut config = match &args.config {
        Some(path) => BrevityConfig::from_file(path)?,
        None => BrevityConfig::default(),
    };

    if let Some(endpoint) = &args.endpoint {
        config.generative.endpoint = endpoint.clone();
    }
    if let Some(model) = &args.model {
        config.generative.model = model.clone();
    }
    if let Some(token) = &args.api_token {
        config.generative.api_token = Some(token.clone());
    }
    if let Some(timeout) = args.timeout_secs {
        config.generative.timeout_secs = timeout;
    }

    let sentences = match &args.command {
        Command::Summarize { sentences, .. } | Command::Interactive { sentences, .. } => *sentences,
    };
    if let Some(count) = sentences {
        config.extractive.sentence_count = count;
    }

    config.validate()?;
    Ok(config)
}

/// Load the generative backend once and wire both summarizers
fn connect(config: &BrevityConfig) -> Result<SummarizationDispatcher> {
    info!(model = %config.generative.model, "Initializing summarization backends");

    let generator = InferenceApiGenerator::connect(config.inference_api_config())
        .context("Failed to initialize generative backend")?;
    let dispatcher = SummarizationDispatcher::from_config(config, Arc::new(generator))
        .context("Failed to initialize extractive summarizer")?;

    Ok(dispatcher)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args)?;
    let show_progress = !args.no_progress;
    info!("Starting brevity v{}", env!("CARGO_PKG_VERSION"));

    // WHY: the HTTP backend blocks, so it is built, used and dropped on a
    // blocking worker rather than on the async runtime
    match args.command {
        Command::Summarize { method, input, json, width, .. } => {
            let source = InputSource::from(input);
            let text = reader::read_input(&source).await?;

            let result = tokio::task::spawn_blocking(move || -> Result<SummarizationResult> {
                let dispatcher = connect(&config)?;
                Ok(frontend::summarize_with_progress(&dispatcher, &text, Some(&method), show_progress))
            })
            .await
            .context("Summarization worker panicked")??;

            let mut stdout = std::io::stdout().lock();
            if json {
                writeln!(stdout, "{}", serde_json::to_string_pretty(&result)?)?;
            } else {
                write!(stdout, "{}", frontend::render_side_by_side(&result, width))?;
            }
        }
        Command::Interactive { method, width, .. } => {
            let shown = tokio::task::spawn_blocking(move || -> Result<usize> {
                let dispatcher = connect(&config)?;
                let stdin = std::io::stdin();
                let stdout = std::io::stdout();

                InteractiveSession::new(&dispatcher, stdin.lock(), stdout.lock())
                    .with_default_method(method)
                    .with_width(width)
                    .with_progress(show_progress)
                    .run()
            })
            .await
            .context("Interactive session panicked")??;

            info!(summaries = shown, "Interactive session finished");
        }
    }

    Ok(())
}

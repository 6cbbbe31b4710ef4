use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use sift_agent::Orchestrator;
use sift_config::{ConfigLoader, SiftConfig};
use sift_llm::OpenAiClient;
use sift_retrieval::InMemoryRetriever;
use sift_tools::{FounderProfile, ProgramCatalog};

/// Sift — agentic RAG retrieval and generation core
#[derive(Parser)]
#[command(name = "sift", version, about, long_about = None)]
struct Cli {
    /// Path to sift.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (e.g. debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer one query against a JSON document corpus
    Ask {
        /// The question to answer
        query: String,

        /// Corpus file: a JSON array of {"text": ..., "metadata": {...}}
        #[arg(long)]
        corpus: PathBuf,

        /// Founder profile JSON for eligibility-aware answers
        #[arg(long)]
        profile: Option<PathBuf>,

        /// Override the per-search document count
        #[arg(short, long)]
        k: Option<usize>,
    },
    /// Show the resolved configuration
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let loader = ConfigLoader::load(cli.config.as_deref())?;
    let mut config = loader.get();
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    init_logging(&config);
    info!(config = %loader.path().display(), "configuration loaded");

    match cli.command {
        Commands::Ask { query, corpus, profile, k } => {
            if let Some(k) = k {
                config.retrieval.k = k;
            }
            ask(config, &query, &corpus, profile.as_deref()).await
        }
        Commands::Config => {
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

async fn ask(
    config: SiftConfig,
    query: &str,
    corpus: &std::path::Path,
    profile: Option<&std::path::Path>,
) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(corpus)
        .with_context(|| format!("reading corpus {}", corpus.display()))?;
    let retriever = InMemoryRetriever::from_json(&raw)?;
    info!(documents = retriever.len(), "corpus loaded");

    let profile: Option<FounderProfile> = match profile {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading profile {}", path.display()))?;
            Some(serde_json::from_str(&raw)?)
        }
        None => None,
    };

    let api_key = config
        .llm
        .api_key
        .clone()
        .context("no API key configured; set llm.api_key or OPENAI_API_KEY")?;
    let llm = OpenAiClient::new(
        api_key,
        config.llm.model.clone(),
        Duration::from_secs(config.llm.timeout_secs),
    )
    .with_base_url(config.llm.base_url.clone())
    .with_sampling(config.llm.temperature, config.llm.max_tokens);

    let mut orchestrator = Orchestrator::new(Arc::new(llm), Arc::new(retriever), config.clone());
    if let Some(path) = &config.tools.catalog_path {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading program catalog {}", path.display()))?;
        let catalog = ProgramCatalog::from_json(&raw)?;
        info!(programs = catalog.len(), "program catalog loaded");
        orchestrator = orchestrator.with_catalog(catalog);
    }

    let result = orchestrator.run(query, profile.as_ref()).await;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

fn init_logging(config: &SiftConfig) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

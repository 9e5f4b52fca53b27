use anyhow::Result;
use clap::{Parser, Subcommand};
use core::builder::{self, CancelToken};
use core::config::{self, Config};
use core::persist;
use core::query::QueryEngine;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "engine")]
#[command(about = "Keyword search over a local document collection", long_about = None)]
struct Cli {
    /// Path to config.json
    #[arg(long, default_value = "config.json")]
    config: String,
    /// Path to the persisted index
    #[arg(long, default_value = "index.json")]
    index: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Refresh the index if stale, then answer the request batch
    Run {
        /// Path to requests.json
        #[arg(long, default_value = "requests.json")]
        requests: String,
        /// Output answers file
        #[arg(long, default_value = "answers.json")]
        answers: String,
    },
    /// Rebuild the index regardless of staleness
    Build,
    /// Answer ad-hoc queries, printing JSON to stdout
    Search {
        /// Queries to run
        queries: Vec<String>,
        /// Also print raw token positions per matching document
        #[arg(long, default_value_t = false)]
        positions: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;
    tracing::info!(engine = %config.engine_name, "starting");

    match cli.command {
        Commands::Run { requests, answers } => run(&config, &cli.index, &requests, &answers),
        Commands::Build => build(&config, &cli.index),
        Commands::Search { queries, positions } => search(&config, &cli.index, &queries, positions),
    }
}

fn run(config: &Config, index_path: &str, requests_path: &str, answers_path: &str) -> Result<()> {
    let (index, _skipped) = builder::manage(config, index_path, &CancelToken::new())?;
    let engine = QueryEngine::new(index, config.max_responses_per_query);

    let requests = config::load_requests(requests_path)?;
    let answers = engine.process_batch(&requests);
    persist::write_answers(answers_path, &answers)?;
    tracing::info!(queries = answers.len(), output = answers_path, "batch answered");
    Ok(())
}

fn build(config: &Config, index_path: &str) -> Result<()> {
    let docs = config.enumerate_documents()?;
    let outcome = builder::build(&docs, &CancelToken::new())?;
    persist::save_index(index_path, &outcome.index)?;
    for doc in &outcome.skipped {
        tracing::warn!(doc_id = doc.id, path = %doc.path.display(), reason = %doc.reason, "document omitted");
    }
    Ok(())
}

fn search(config: &Config, index_path: &str, queries: &[String], positions: bool) -> Result<()> {
    let (index, _skipped) = builder::manage(config, index_path, &CancelToken::new())?;
    let engine = QueryEngine::new(index, config.max_responses_per_query);

    let answers = engine.process_batch(queries);
    println!("{}", serde_json::to_string_pretty(&answers)?);
    if positions {
        for query in queries.iter().take(core::query::MAX_BATCH_QUERIES) {
            let report = engine.position_report(query);
            if !report.is_empty() {
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
    }
    Ok(())
}

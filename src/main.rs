// main.rs
use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use emotionchain::cli::{self, Args, Commands};
use emotionchain::Config;

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("emotionchain={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // init must work even when the existing file is malformed
    let config = match args.command {
        Commands::Init { .. } => Config::default(),
        _ => Config::load(args.config.clone()).context("Failed to load configuration")?,
    };
    init_tracing(args.log_level.as_deref().unwrap_or(&config.log_level));

    match args.command {
        Commands::Classify { text, json } => cli::handle_classify(&text, json).await,
        Commands::Contracts { json } => cli::handle_contracts(json).await,
        Commands::Process {
            contract,
            texts,
            json,
        } => cli::handle_process(&config, &contract, &texts, json).await,
        Commands::Create {
            name,
            contract_type,
            description,
            conditions,
            texts,
            json,
        } => {
            cli::handle_create(&config, &name, contract_type, &description, conditions, &texts, json).await
        }
        Commands::Session { contract } => cli::handle_session(&config, contract.as_deref()).await,
        Commands::Init { force } => cli::handle_init(args.config, force).await,
    }
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::classifier;
use crate::config::Config;
use crate::core::{Condition, ContractType};
use crate::demo;
use crate::formatter::{
    format_contract, format_contract_list, format_emotion, format_emotion_feed, format_header,
    format_transaction_feed,
};
use crate::session::{Session, Submission};

#[derive(Parser, Debug)]
#[command(name = "emotionchain")]
#[command(about = "Emotion-driven contract state machine demo")]
pub struct Args {
    /// Path to config.json (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level when RUST_LOG is unset
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a piece of text
    Classify {
        text: String,
        #[arg(long)]
        json: bool,
    },
    /// List the demo contracts
    Contracts {
        #[arg(long)]
        json: bool,
    },
    /// Submit texts in order against one contract
    Process {
        #[arg(short, long, default_value = "contract-1")]
        contract: String,
        #[arg(required = true)]
        texts: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Create a contract for the demo wallet, then submit texts against it
    Create {
        name: String,
        #[arg(short = 't', long = "type", default_value = "relationship")]
        contract_type: ContractType,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Rule as emotion:action, e.g. angry:pause (repeatable)
        #[arg(long = "condition")]
        conditions: Vec<Condition>,
        texts: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Read submissions from stdin, one per line
    Session {
        #[arg(short, long)]
        contract: Option<String>,
    },
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", out);
    Ok(())
}

fn connected_session(config: &Config, contract: Option<&str>) -> Result<Session> {
    let mut session = Session::from_config(config);
    session.connect(demo::user(), demo::contracts());
    if let Some(id) = contract {
        session
            .select(id)
            .with_context(|| format!("Cannot select contract {}", id))?;
    }
    Ok(session)
}

fn print_submission(submission: &Submission) {
    println!("{}", format_emotion(&submission.emotion));
    println!("  signature: {}", submission.signature.to_string().dimmed());
    match &submission.transaction {
        Some(tx) => println!("  tx {} {}", tx.id.cyan(), tx.status),
        None => println!("  {}", "no contract processed".yellow()),
    }
}

fn print_dashboard(session: &Session, config: &Config) {
    println!("{}", format_header(session.user()));
    println!();
    if let Some(contract) = session.selected_contract() {
        println!("{}", format_contract(contract, config.history_preview));
    }
    println!("{}", "Emotion History".cyan().bold());
    println!("{}", format_emotion_feed(session.emotions()));
    println!();
    println!("{}", "Transactions".cyan().bold());
    println!("{}", format_transaction_feed(session.transactions()));
}

pub async fn handle_classify(text: &str, json: bool) -> Result<()> {
    let data = classifier::classify(text);
    if json {
        return print_json(&data);
    }
    println!("{}", format_emotion(&data));
    Ok(())
}

pub async fn handle_contracts(json: bool) -> Result<()> {
    let contracts = demo::contracts();
    if json {
        return print_json(&contracts);
    }
    println!("{}", "Available Contracts".cyan().bold());
    println!("{}", format_contract_list(&contracts, None));
    Ok(())
}

async fn submit_all(session: &mut Session, config: &Config, texts: &[String], json: bool) -> Result<()> {
    let mut submissions = Vec::new();
    for text in texts {
        if let Some(submission) = session.submit_text(text).await? {
            if !json {
                print_submission(&submission);
            }
            submissions.push(submission);
        }
    }

    if json {
        let value = serde_json::json!({
            "contract": session.selected_contract(),
            "submissions": submissions,
            "transactions": session.transactions(),
        });
        return print_json(&value);
    }

    println!();
    print_dashboard(session, config);
    Ok(())
}

pub async fn handle_process(config: &Config, contract: &str, texts: &[String], json: bool) -> Result<()> {
    let mut session = connected_session(config, Some(contract))?;
    submit_all(&mut session, config, texts, json).await
}

pub async fn handle_create(
    config: &Config,
    name: &str,
    contract_type: ContractType,
    description: &str,
    conditions: Vec<Condition>,
    texts: &[String],
    json: bool,
) -> Result<()> {
    let mut session = connected_session(config, None)?;
    let parties = session
        .user()
        .map(|u| vec![u.wallet_address.clone()])
        .unwrap_or_default();

    let contract = session
        .engine()
        .create_contract(name, description, contract_type, parties, conditions)
        .await;
    let id = contract.id.clone();
    session.add_contract(contract);
    session.select(&id)?;

    if !json {
        println!("{} {}", "Created".green(), id.cyan());
    }
    submit_all(&mut session, config, texts, json).await
}

pub async fn handle_init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = path.unwrap_or_else(Config::default_path);
    if path.exists() && !force {
        println!("{} {}", "Config already exists:".yellow(), path.display());
        return Ok(());
    }

    Config::default()
        .save(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("{} {}", "Wrote".green(), path.display());
    Ok(())
}

pub async fn handle_session(config: &Config, contract: Option<&str>) -> Result<()> {
    let mut session = connected_session(config, contract)?;
    println!("{}", format_header(session.user()));
    println!(
        "{}",
        "Type how you feel. :contracts lists, :select <id> switches, :quit exits.".dimmed()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line.split_once(' ').unwrap_or((line, "")) {
            (":quit", _) => break,
            (":contracts", _) => {
                println!("{}", format_contract_list(session.contracts(), session.selected_id()));
            }
            (":select", id) => match session.select(id.trim()) {
                Ok(()) => {
                    if let Some(c) = session.selected_contract() {
                        println!("{}", format_contract(c, config.history_preview));
                    }
                }
                Err(e) => println!("{}", e.to_string().red()),
            },
            _ => {
                if let Some(submission) = session.submit_text(line).await? {
                    print_submission(&submission);
                    if let Some(c) = session.selected_contract() {
                        println!("  {} {} {}", c.name, c.state.emoji(), c.state);
                    }
                }
            }
        }
    }

    println!();
    print_dashboard(&session, config);
    Ok(())
}

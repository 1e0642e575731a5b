use chrono::{DateTime, Local, Utc};
use colored::*;

use crate::core::{Contract, ContractState, Emotion, EmotionData, Transaction, TransactionStatus, User};
use crate::engine::suggested_action;
use crate::utils::shorten;

fn local_time(ts: &DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

fn paint_emotion(emotion: Emotion) -> ColoredString {
    match emotion {
        Emotion::Happy => emotion.name().yellow(),
        Emotion::Sad => emotion.name().blue(),
        Emotion::Angry => emotion.name().red(),
        Emotion::Calm => emotion.name().green(),
        Emotion::Neutral => emotion.name().normal(),
    }
}

fn paint_state(state: ContractState) -> ColoredString {
    let label = state.to_string();
    match state {
        ContractState::Active => label.green(),
        ContractState::Paused => label.yellow(),
        ContractState::Alerted => label.red(),
        ContractState::Completed => label.blue(),
    }
}

pub fn status_icon(status: TransactionStatus) -> &'static str {
    match status {
        TransactionStatus::Pending => "⏳",
        TransactionStatus::Confirmed => "✅",
        TransactionStatus::Failed => "❌",
    }
}

pub fn format_header(user: Option<&User>) -> String {
    match user {
        Some(user) => format!(
            "{}{}  👤 {}  💳 {}",
            "Emotion".bold(),
            "Chain".cyan().bold(),
            user.name,
            user.short_address().cyan()
        ),
        None => format!("{}{}  (wallet not connected)", "Emotion".bold(), "Chain".cyan().bold()),
    }
}

pub fn format_emotion(data: &EmotionData) -> String {
    format!(
        "{} {} ({:.0}% confidence) at {}",
        data.emotion.emoji(),
        paint_emotion(data.emotion),
        data.confidence * 100.0,
        local_time(&data.timestamp).dimmed()
    )
}

/// Full card for one contract, with its `history_limit` newest entries
pub fn format_contract(contract: &Contract, history_limit: usize) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", contract.name.bold()));
    out.push_str(&format!(
        "  {} {}  ·  {}\n",
        contract.state.emoji(),
        paint_state(contract.state),
        contract.contract_type
    ));
    out.push_str(&format!("  {}\n", contract.description.dimmed()));

    out.push_str("  Parties:\n");
    for party in &contract.parties {
        out.push_str(&format!("    - {}\n", shorten(party, 6, 4)));
    }

    out.push_str("  Conditions:\n");
    for condition in &contract.conditions {
        out.push_str(&format!(
            "    {} {} → {} ({})\n",
            condition.emotion.emoji(),
            paint_emotion(condition.emotion),
            condition.action,
            suggested_action(condition.emotion, contract.contract_type)
        ));
    }

    out.push_str("  Recent activity:\n");
    for entry in contract.recent_history(history_limit) {
        let emotion = entry
            .emotion
            .map(|e| format!(" [{} {}]", e.emoji(), e))
            .unwrap_or_default();
        out.push_str(&format!(
            "    {} {}{}\n",
            local_time(&entry.timestamp).dimmed(),
            entry.action,
            emotion
        ));
        if let Some(hash) = &entry.tx_hash {
            out.push_str(&format!("      TX: {}\n", shorten(hash, 10, 8).dimmed()));
        }
    }

    out
}

/// One line per contract; the selected one is marked
pub fn format_contract_list(contracts: &[Contract], selected: Option<&str>) -> String {
    contracts
        .iter()
        .map(|c| {
            let marker = if Some(c.id.as_str()) == selected { "▶" } else { " " };
            format!(
                "{} {:<12} {:<26} {:<11} {}",
                marker,
                c.id.cyan(),
                c.name,
                paint_state(c.state),
                c.contract_type.to_string().dimmed()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Newest first
pub fn format_emotion_feed(emotions: &[EmotionData]) -> String {
    if emotions.is_empty() {
        return "No emotions detected yet".yellow().to_string();
    }

    let mut sorted: Vec<_> = emotions.iter().rev().collect();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted
        .into_iter()
        .map(|e| format!("  {}", format_emotion(e)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Newest first
pub fn format_transaction_feed(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions yet".yellow().to_string();
    }

    let mut sorted: Vec<_> = transactions.iter().rev().collect();
    sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    sorted
        .into_iter()
        .map(|tx| {
            let emotion = tx
                .emotion_data
                .as_ref()
                .map(|d| format!(" {} {}", d.emotion.emoji(), paint_emotion(d.emotion)))
                .unwrap_or_default();
            format!(
                "  {} {} TX: {}  {}{}  {}",
                status_icon(tx.status),
                tx.status,
                shorten(&tx.hash, 10, 8),
                tx.contract_id.cyan(),
                emotion,
                local_time(&tx.timestamp).dimmed()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

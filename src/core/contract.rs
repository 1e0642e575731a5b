use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::emotion::Emotion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContractType {
    Relationship,
    MentalHealth,
    Freelance,
}

impl std::fmt::Display for ContractType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractType::Relationship => write!(f, "relationship"),
            ContractType::MentalHealth => write!(f, "mental-health"),
            ContractType::Freelance => write!(f, "freelance"),
        }
    }
}

impl std::str::FromStr for ContractType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "relationship" => Ok(ContractType::Relationship),
            "mental-health" => Ok(ContractType::MentalHealth),
            "freelance" => Ok(ContractType::Freelance),
            _ => Err(format!("unknown contract type: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractState {
    Active,
    Paused,
    Alerted,
    Completed,
}

impl ContractState {
    pub fn emoji(&self) -> &'static str {
        match self {
            ContractState::Active => "🟢",
            ContractState::Paused => "⏸️",
            ContractState::Alerted => "🚨",
            ContractState::Completed => "✅",
        }
    }
}

impl std::fmt::Display for ContractState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContractState::Active => write!(f, "active"),
            ContractState::Paused => write!(f, "paused"),
            ContractState::Alerted => write!(f, "alerted"),
            ContractState::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionAction {
    Pause,
    Alert,
    Continue,
    Payout,
}

impl std::fmt::Display for ConditionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConditionAction::Pause => write!(f, "pause"),
            ConditionAction::Alert => write!(f, "alert"),
            ConditionAction::Continue => write!(f, "continue"),
            ConditionAction::Payout => write!(f, "payout"),
        }
    }
}

impl std::str::FromStr for ConditionAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pause" => Ok(ConditionAction::Pause),
            "alert" => Ok(ConditionAction::Alert),
            "continue" => Ok(ConditionAction::Continue),
            "payout" => Ok(ConditionAction::Payout),
            _ => Err(format!("unknown condition action: {}", s)),
        }
    }
}

/// Declares that a contract reacts to `emotion`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub emotion: Emotion,
    pub action: ConditionAction,

    /// Declared but never consulted by the rule engine
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
}

impl Condition {
    pub fn new(emotion: Emotion, action: ConditionAction) -> Self {
        Self {
            emotion,
            action,
            threshold: None,
        }
    }
}

/// Parses `emotion:action`, e.g. `angry:pause`
impl std::str::FromStr for Condition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (emotion, action) = s
            .split_once(':')
            .ok_or_else(|| format!("expected emotion:action, got {}", s))?;
        Ok(Condition::new(emotion.parse()?, action.parse()?))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<Emotion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
}

/// Simulated agreement whose state is gated by observed emotions.
///
/// `id`, `contract_type` and `conditions` are fixed at creation. Only the
/// rule engine changes `state` and appends to `history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub contract_type: ContractType,
    pub state: ContractState,
    pub parties: Vec<String>,
    pub conditions: Vec<Condition>,
    pub history: Vec<HistoryEntry>,
}

impl Contract {
    /// First condition declared for `emotion`, if any
    pub fn condition_for(&self, emotion: Emotion) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.emotion == emotion)
    }

    /// Most recent `limit` history entries, newest first
    pub fn recent_history(&self, limit: usize) -> Vec<&HistoryEntry> {
        let mut entries: Vec<_> = self.history.iter().rev().collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(limit);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn entry(action: &str, age_secs: i64) -> HistoryEntry {
        HistoryEntry {
            timestamp: Utc::now() - Duration::seconds(age_secs),
            action: action.to_string(),
            emotion: None,
            party: None,
            tx_hash: None,
        }
    }

    fn sample() -> Contract {
        Contract {
            id: "contract-x".to_string(),
            name: "Sample".to_string(),
            description: String::new(),
            contract_type: ContractType::MentalHealth,
            state: ContractState::Active,
            parties: vec![],
            conditions: vec![
                Condition::new(Emotion::Sad, ConditionAction::Alert),
                Condition::new(Emotion::Happy, ConditionAction::Continue),
            ],
            history: (0..7).map(|i| entry(&format!("step {}", i), 100 - i)).collect(),
        }
    }

    #[test]
    fn test_condition_lookup() {
        let contract = sample();
        assert_eq!(
            contract.condition_for(Emotion::Sad).map(|c| c.action),
            Some(ConditionAction::Alert)
        );
        assert!(contract.condition_for(Emotion::Angry).is_none());
    }

    #[test]
    fn test_recent_history_newest_first() {
        let contract = sample();
        let recent = contract.recent_history(5);

        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].action, "step 6");
        assert_eq!(recent[4].action, "step 2");
    }

    #[test]
    fn test_contract_wire_format() {
        let value = serde_json::to_value(sample()).unwrap();

        assert_eq!(value["type"], "mental-health");
        assert_eq!(value["state"], "active");
        assert_eq!(value["conditions"][0]["action"], "alert");
        assert!(value["conditions"][0].get("threshold").is_none());
    }

    #[test]
    fn test_history_entry_uses_tx_hash_key() {
        let mut e = entry("Contract created", 0);
        e.tx_hash = Some("0xabc".to_string());
        let value = serde_json::to_value(&e).unwrap();

        assert_eq!(value["txHash"], "0xabc");
        assert!(value.get("emotion").is_none());
    }

    #[test]
    fn test_parse_condition() {
        let condition: Condition = "Angry:pause".parse().unwrap();
        assert_eq!(condition, Condition::new(Emotion::Angry, ConditionAction::Pause));

        assert!("angry".parse::<Condition>().is_err());
        assert!("angry:explode".parse::<Condition>().is_err());
        assert!("bored:pause".parse::<Condition>().is_err());
    }

    #[test]
    fn test_parse_contract_type() {
        assert_eq!(
            "mental-health".parse::<ContractType>().unwrap(),
            ContractType::MentalHealth
        );
        assert_eq!(" Freelance ".parse::<ContractType>().unwrap(), ContractType::Freelance);
        assert!("mental_health".parse::<ContractType>().is_err());
    }
}

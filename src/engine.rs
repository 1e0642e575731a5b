//! Emotion-to-contract rule engine.
//!
//! Transitions are keyed by `(contract type, current state, emotion)` and
//! only apply when the contract declares a condition for that emotion.
//! Every invocation appends exactly one history entry and emits one
//! transaction, whether or not the state moved.

use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::core::{
    ChainError, Condition, Contract, ContractState, ContractType, Emotion, EmotionData,
    HistoryEntry, Result, Transaction,
};
use crate::utils::random_tx_hash;

pub const NO_ACTION: &str = "no action";
pub const PROCESS_ACTION: &str = "processEmotion";
pub const CREATED_ACTION: &str = "Contract created";

/// Outcome of evaluating one emotion against one contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub next: ContractState,
    pub action: &'static str,
}

/// The transition table. `None` means the combination has no rule.
pub fn rule(
    contract_type: ContractType,
    state: ContractState,
    emotion: Emotion,
) -> Option<Transition> {
    use ContractState::*;
    use ContractType::*;

    let (next, action) = match (contract_type, state, emotion) {
        (Relationship, Active, Emotion::Angry) => (Paused, "paused due to anger"),
        (Relationship, Paused, Emotion::Calm) => (Active, "resumed due to calmness"),
        (MentalHealth, Active, Emotion::Sad) => (Alerted, "alert triggered due to sadness"),
        (MentalHealth, Alerted, Emotion::Happy) => (Active, "alert cleared due to happiness"),
        // Only the incoming emotion is checked, not every party's.
        (Freelance, Active, Emotion::Calm) => (Completed, "payment approved due to calm state"),
        _ => return None,
    };

    Some(Transition { next, action })
}

/// Condition gate first, then the table. Condition thresholds are ignored.
pub fn evaluate(contract: &Contract, emotion: Emotion) -> Transition {
    let unchanged = Transition {
        next: contract.state,
        action: NO_ACTION,
    };

    if contract.condition_for(emotion).is_none() {
        return unchanged;
    }

    rule(contract.contract_type, contract.state, emotion).unwrap_or(unchanged)
}

/// New contract value with `data` applied and one history entry appended.
pub fn apply_emotion(contract: &Contract, data: &EmotionData, actor: &str, tx_hash: &str) -> Contract {
    let transition = evaluate(contract, data.emotion);

    let mut updated = contract.clone();
    updated.state = transition.next;
    updated.history.push(HistoryEntry {
        timestamp: Utc::now(),
        action: transition.action.to_string(),
        emotion: Some(data.emotion),
        party: Some(actor.to_string()),
        tx_hash: Some(tx_hash.to_string()),
    });
    updated
}

/// Preview label shown next to a contract before anything is processed
pub fn suggested_action(emotion: Emotion, contract_type: ContractType) -> &'static str {
    match (contract_type, emotion) {
        (ContractType::Relationship, Emotion::Angry) => "Pause contract",
        (ContractType::Relationship, Emotion::Calm | Emotion::Happy) => "Continue contract",
        (ContractType::MentalHealth, Emotion::Sad) => "Alert support",
        (ContractType::MentalHealth, Emotion::Happy) => "Clear alerts",
        (ContractType::Freelance, Emotion::Calm) => "Approve payment",
        (ContractType::Freelance, Emotion::Angry) => "Hold payment",
        _ => "No action",
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Processed {
    pub updated_contract: Contract,
    pub transaction: Transaction,
}

/// Applies emotions to contracts and simulates confirmation latency.
#[derive(Debug, Clone, Default)]
pub struct RuleEngine {
    confirm_delay: Duration,
    create_delay: Duration,
}

impl RuleEngine {
    pub fn new(confirm_delay: Duration, create_delay: Duration) -> Self {
        Self {
            confirm_delay,
            create_delay,
        }
    }

    /// Pure half of processing: the updated contract and a still-pending
    /// transaction. `contracts` is never modified.
    pub fn prepare(
        &self,
        contract_id: &str,
        data: &EmotionData,
        actor: &str,
        contracts: &[Contract],
    ) -> Result<Processed> {
        let contract = contracts
            .iter()
            .find(|c| c.id == contract_id)
            .ok_or_else(|| ChainError::ContractNotFound(contract_id.to_string()))?;

        let transaction = Transaction::pending(contract_id, PROCESS_ACTION, Some(data.clone()));
        let updated_contract = apply_emotion(contract, data, actor, &transaction.hash);

        Ok(Processed {
            updated_contract,
            transaction,
        })
    }

    /// Process `data` against `contract_id`.
    ///
    /// The transaction is created pending and is confirmed before this
    /// returns; callers never observe the pending state.
    pub async fn process_emotion(
        &self,
        contract_id: &str,
        data: &EmotionData,
        actor: &str,
        contracts: &[Contract],
    ) -> Result<Processed> {
        let mut processed = self.prepare(contract_id, data, actor, contracts)?;

        tracing::debug!(
            contract = %contract_id,
            tx = %processed.transaction.id,
            "Transaction pending"
        );

        if !self.confirm_delay.is_zero() {
            tokio::time::sleep(self.confirm_delay).await;
        }
        processed.transaction.confirm()?;

        let last = processed.updated_contract.history.last().map(|h| h.action.as_str());
        tracing::info!(
            contract = %contract_id,
            emotion = %data.emotion,
            state = %processed.updated_contract.state,
            action = last.unwrap_or(NO_ACTION),
            "Emotion processed"
        );

        Ok(processed)
    }

    /// New active contract with a single creation entry in its history
    pub async fn create_contract(
        &self,
        name: &str,
        description: &str,
        contract_type: ContractType,
        parties: Vec<String>,
        conditions: Vec<Condition>,
    ) -> Contract {
        if !self.create_delay.is_zero() {
            tokio::time::sleep(self.create_delay).await;
        }

        let contract = Contract {
            id: format!("contract-{}", Uuid::new_v4()),
            name: name.to_string(),
            description: description.to_string(),
            contract_type,
            state: ContractState::Active,
            parties,
            conditions,
            history: vec![HistoryEntry {
                timestamp: Utc::now(),
                action: CREATED_ACTION.to_string(),
                emotion: None,
                party: None,
                tx_hash: Some(random_tx_hash()),
            }],
        };

        tracing::info!(contract = %contract.id, kind = %contract_type, "Contract created");
        contract
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::emotion::EmotionData;
use crate::core::error::{ChainError, Result};
use crate::utils::random_tx_hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    /// Reserved; nothing produces it yet.
    Failed,
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "pending"),
            TransactionStatus::Confirmed => write!(f, "confirmed"),
            TransactionStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Record of one rule-engine invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub hash: String,
    pub timestamp: DateTime<Utc>,
    pub contract_id: String,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion_data: Option<EmotionData>,
    pub status: TransactionStatus,
}

impl Transaction {
    /// Create a transaction in `Pending` status with a fresh id and hash
    pub fn pending(contract_id: &str, action: &str, emotion_data: Option<EmotionData>) -> Self {
        Self {
            id: format!("tx-{}", Uuid::new_v4()),
            hash: random_tx_hash(),
            timestamp: Utc::now(),
            contract_id: contract_id.to_string(),
            action: action.to_string(),
            emotion_data,
            status: TransactionStatus::Pending,
        }
    }

    pub fn confirm(&mut self) -> Result<()> {
        self.settle(TransactionStatus::Confirmed)
    }

    pub fn fail(&mut self) -> Result<()> {
        self.settle(TransactionStatus::Failed)
    }

    // Pending is the only state that may move, and only once.
    fn settle(&mut self, to: TransactionStatus) -> Result<()> {
        if self.status != TransactionStatus::Pending {
            return Err(ChainError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::emotion::Emotion;

    #[test]
    fn test_new_transaction_is_pending() {
        let tx = Transaction::pending("contract-1", "processEmotion", None);

        assert_eq!(tx.status, TransactionStatus::Pending);
        assert!(tx.id.starts_with("tx-"));
        assert!(tx.hash.starts_with("0x"));
        assert_eq!(tx.hash.len(), 66);
    }

    #[test]
    fn test_confirm_once() {
        let mut tx = Transaction::pending("contract-1", "processEmotion", None);
        tx.confirm().unwrap();
        assert_eq!(tx.status, TransactionStatus::Confirmed);

        let err = tx.confirm().unwrap_err();
        assert!(matches!(
            err,
            ChainError::InvalidTransition {
                from: TransactionStatus::Confirmed,
                to: TransactionStatus::Confirmed,
            }
        ));
        assert!(tx.fail().is_err());
    }

    #[test]
    fn test_failed_is_final() {
        let mut tx = Transaction::pending("contract-2", "processEmotion", None);
        tx.fail().unwrap();
        assert_eq!(tx.status, TransactionStatus::Failed);
        assert!(tx.confirm().is_err());
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let data = EmotionData::new(Emotion::Calm, 0.7);
        let tx = Transaction::pending("contract-3", "processEmotion", Some(data));
        let value = serde_json::to_value(&tx).unwrap();

        assert_eq!(value["contractId"], "contract-3");
        assert_eq!(value["status"], "pending");
        assert_eq!(value["emotionData"]["emotion"], "calm");
    }
}

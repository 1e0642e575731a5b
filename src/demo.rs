//! Seed data loaded into a session when the demo wallet connects.

use chrono::{Duration, Utc};

use crate::core::{
    Condition, ConditionAction, Contract, ContractState, ContractType, Emotion, HistoryEntry, User,
};

pub const WALLET_ADDRESS: &str = "0x742d35Cc6634C0532925a3b844Bc454e4438f44e";

pub fn user() -> User {
    User {
        id: "user-1".to_string(),
        name: "Alex Johnson".to_string(),
        wallet_address: WALLET_ADDRESS.to_string(),
        avatar: String::new(),
    }
}

#[allow(clippy::too_many_arguments)]
fn seed(
    id: &str,
    name: &str,
    description: &str,
    contract_type: ContractType,
    counterparty: &str,
    conditions: Vec<Condition>,
    days_ago: i64,
    tx_hash: &str,
) -> Contract {
    Contract {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        contract_type,
        state: ContractState::Active,
        parties: vec![WALLET_ADDRESS.to_string(), counterparty.to_string()],
        conditions,
        history: vec![HistoryEntry {
            timestamp: Utc::now() - Duration::days(days_ago),
            action: "Contract created".to_string(),
            emotion: None,
            party: None,
            tx_hash: Some(tx_hash.to_string()),
        }],
    }
}

/// One contract of each type, all active
pub fn contracts() -> Vec<Contract> {
    vec![
        seed(
            "contract-1",
            "Relationship Agreement",
            "A contract that pauses when either party is angry, and continues when calm.",
            ContractType::Relationship,
            "0x8f3Cf7ad23Cd3CaDbD9735AFf958023239c6A063",
            vec![
                Condition::new(Emotion::Angry, ConditionAction::Pause),
                Condition::new(Emotion::Calm, ConditionAction::Continue),
            ],
            1,
            "0x7c3ea01fc562aac8a3d25dd3ab2c9136f9791d3000f6271cca76263889657e5e",
        ),
        seed(
            "contract-2",
            "Mental Health Support",
            "Alerts support system when sadness is detected, clears alerts when happiness is detected.",
            ContractType::MentalHealth,
            "0x9e4c14403d7d9a499dc5d361c212c2f3e7eabd61",
            vec![
                Condition::new(Emotion::Sad, ConditionAction::Alert),
                Condition::new(Emotion::Happy, ConditionAction::Continue),
            ],
            2,
            "0x29a75b9f332f6e61c45d2a350a3e8b052ee54b8b774bd47e3e11f716e9eccc7d",
        ),
        seed(
            "contract-3",
            "Freelance Payment",
            "Approves payment when both parties are in a calm state.",
            ContractType::Freelance,
            "0xdac17f958d2ee523a2206206994597c13d831ec7",
            vec![
                Condition::new(Emotion::Calm, ConditionAction::Payout),
                Condition::new(Emotion::Angry, ConditionAction::Pause),
            ],
            3,
            "0x83f27026219260952bc595008dd7156e054a8e6833aa5cf0705e4af7e9a76d98",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_contracts() {
        let contracts = contracts();

        assert_eq!(contracts.len(), 3);
        assert!(contracts.iter().all(|c| c.state == ContractState::Active));
        assert!(contracts.iter().all(|c| c.history.len() == 1));
        assert!(contracts.iter().all(|c| c.parties[0] == WALLET_ADDRESS));
        assert_eq!(contracts[1].contract_type, ContractType::MentalHealth);
    }

    #[test]
    fn test_demo_user() {
        assert_eq!(user().short_address(), "0x742d...f44e");
    }
}

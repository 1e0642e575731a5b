//! In-memory state behind one connected wallet.
//!
//! Holds the contract list, the current selection and the two append-only
//! feeds (emotions observed, transactions processed). Every mutating
//! operation takes `&mut self`, so a session handles one submission at a
//! time. Nothing here survives the process.

use serde::Serialize;

use crate::classifier::EmotionClassifier;
use crate::config::Config;
use crate::core::{ChainError, Contract, EmotionData, Result, Transaction, User};
use crate::engine::RuleEngine;
use crate::signer::{MockSigner, Signature, Signer};

/// Result of one text submission
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub emotion: EmotionData,
    pub signature: Signature,
    /// Present when a contract was selected and processing succeeded
    pub transaction: Option<Transaction>,
}

pub struct Session {
    classifier: EmotionClassifier,
    signer: Box<dyn Signer>,
    engine: RuleEngine,
    user: Option<User>,
    contracts: Vec<Contract>,
    selected: Option<String>,
    emotions: Vec<EmotionData>,
    transactions: Vec<Transaction>,
}

impl Session {
    /// Session with the keyword classifier and mock wallet, timed by `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config,
            EmotionClassifier::new(config.delays.classify()),
            Box::new(MockSigner::new(config.delays.sign())),
        )
    }

    pub fn new(config: &Config, classifier: EmotionClassifier, signer: Box<dyn Signer>) -> Self {
        Self {
            classifier,
            signer,
            engine: RuleEngine::new(config.delays.confirm(), config.delays.create()),
            user: None,
            contracts: Vec::new(),
            selected: None,
            emotions: Vec::new(),
            transactions: Vec::new(),
        }
    }

    /// Connect `user` and load `contracts`, selecting the first one.
    pub fn connect(&mut self, user: User, contracts: Vec<Contract>) {
        tracing::info!(user = %user.name, wallet = %user.wallet_address, "Wallet connected");

        self.selected = contracts.first().map(|c| c.id.clone());
        self.contracts = contracts;
        self.user = Some(user);
    }

    /// Drop the wallet and everything loaded or recorded since connecting.
    pub fn disconnect(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!(user = %user.name, "Wallet disconnected");
        }
        self.contracts.clear();
        self.selected = None;
        self.emotions.clear();
        self.transactions.clear();
    }

    pub fn is_connected(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    pub fn contracts(&self) -> &[Contract] {
        &self.contracts
    }

    pub fn contract(&self, id: &str) -> Option<&Contract> {
        self.contracts.iter().find(|c| c.id == id)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_contract(&self) -> Option<&Contract> {
        self.selected.as_deref().and_then(|id| self.contract(id))
    }

    pub fn select(&mut self, contract_id: &str) -> Result<()> {
        if self.contract(contract_id).is_none() {
            return Err(ChainError::ContractNotFound(contract_id.to_string()));
        }
        self.selected = Some(contract_id.to_string());
        Ok(())
    }

    /// Add a contract created while connected.
    pub fn add_contract(&mut self, contract: Contract) {
        self.contracts.push(contract);
    }

    /// Emotion feed in arrival order
    pub fn emotions(&self) -> &[EmotionData] {
        &self.emotions
    }

    /// Transaction feed in arrival order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Classify, sign and record `text`, then process it against the
    /// selected contract if there is one.
    ///
    /// Blank text or a disconnected session is a no-op.
    pub async fn submit_text(&mut self, text: &str) -> Result<Option<Submission>> {
        let address = match &self.user {
            Some(user) if !text.trim().is_empty() => user.wallet_address.clone(),
            _ => return Ok(None),
        };

        let emotion = self.classifier.detect(text).await;
        let signature = self.signer.sign(&emotion, &address).await?;
        self.emotions.push(emotion.clone());

        let transaction = match self.selected.clone() {
            Some(id) => self.process_contract(&id, Some(emotion.clone())).await,
            None => None,
        };

        Ok(Some(Submission {
            emotion,
            signature,
            transaction,
        }))
    }

    /// Select `contract_id` and process the latest recorded emotion on it.
    ///
    /// An unknown id is logged and leaves the selection unchanged.
    pub async fn process_latest(&mut self, contract_id: &str) -> Option<Transaction> {
        if let Err(e) = self.select(contract_id) {
            tracing::error!(contract = %contract_id, "Error processing emotion on contract: {}", e);
            return None;
        }
        self.process_contract(contract_id, None).await
    }

    /// Process `emotion` (or the latest recorded one) against a contract.
    ///
    /// Failures are logged and leave the session unchanged.
    pub async fn process_contract(
        &mut self,
        contract_id: &str,
        emotion: Option<EmotionData>,
    ) -> Option<Transaction> {
        let address = self.user.as_ref()?.wallet_address.clone();
        let emotion = emotion.or_else(|| self.emotions.last().cloned())?;

        match self
            .engine
            .process_emotion(contract_id, &emotion, &address, &self.contracts)
            .await
        {
            Ok(processed) => {
                let updated = processed.updated_contract;
                if let Some(slot) = self.contracts.iter_mut().find(|c| c.id == updated.id) {
                    *slot = updated;
                }
                self.transactions.push(processed.transaction.clone());
                Some(processed.transaction)
            }
            Err(e) => {
                tracing::error!(contract = %contract_id, "Error processing emotion on contract: {}", e);
                None
            }
        }
    }
}

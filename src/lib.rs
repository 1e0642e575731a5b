//! EmotionChain: text emotions driving simulated contract state.
//!
//! Text goes through the keyword [`classifier`], is signed by a
//! [`signer::Signer`], and is applied to a contract by the rule
//! [`engine`]. A [`session::Session`] holds the in-memory contract list and
//! the emotion and transaction feeds for one connected wallet.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod core;
pub mod demo;
pub mod engine;
pub mod formatter;
pub mod session;
pub mod signer;
pub mod utils;

pub use crate::classifier::{classify, EmotionClassifier};
pub use crate::config::Config;
pub use crate::core::{ChainError, Contract, Emotion, EmotionData, Result, Transaction};
pub use crate::engine::{Processed, RuleEngine};
pub use crate::session::Session;
pub use crate::signer::{MockSigner, Signature, Signer};

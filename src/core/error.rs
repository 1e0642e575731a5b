use thiserror::Error;

use crate::core::transaction::TransactionStatus;

#[derive(Error, Debug)]
pub enum ChainError {
    #[error("Contract with ID {0} not found")]
    ContractNotFound(String),

    #[error("Invalid transaction transition: {from} -> {to}")]
    InvalidTransition {
        from: TransactionStatus,
        to: TransactionStatus,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ChainError>;

pub mod contract;
pub mod emotion;
pub mod error;
pub mod transaction;
pub mod user;

pub use contract::{Condition, ConditionAction, Contract, ContractState, ContractType, HistoryEntry};
pub use emotion::{Emotion, EmotionData};
pub use error::{ChainError, Result};
pub use transaction::{Transaction, TransactionStatus};
pub use user::User;

//! Wallet signing capability.
//!
//! The rule engine never signs anything itself; the session signs each
//! observation before processing it, through whatever [`Signer`] it was
//! built with.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::{EmotionData, Result};
use crate::utils::random_hex;

/// Hex-encoded signature over an emotion observation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(pub String);

impl std::fmt::Display for Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[async_trait]
pub trait Signer: Send + Sync {
    /// Sign `data` on behalf of `address`.
    async fn sign(&self, data: &EmotionData, address: &str) -> Result<Signature>;
}

/// Stand-in wallet: random hex after a short delay. Never fails.
#[derive(Debug, Clone, Default)]
pub struct MockSigner {
    delay: Duration,
}

impl MockSigner {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Signer for MockSigner {
    async fn sign(&self, data: &EmotionData, address: &str) -> Result<Signature> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let signature = Signature(format!("0x{}", random_hex(&mut rand::thread_rng(), 64)));
        tracing::debug!(
            emotion = %data.emotion,
            address = %address,
            "Signed emotion data"
        );
        Ok(signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Emotion;

    #[tokio::test]
    async fn test_mock_signature_shape() {
        let signer = MockSigner::default();
        let data = EmotionData::new(Emotion::Happy, 0.8);

        let sig = signer.sign(&data, "0xabc").await.unwrap();
        assert!(sig.0.starts_with("0x"));
        assert_eq!(sig.0.len(), 66);
    }

    #[tokio::test]
    async fn test_signatures_differ() {
        let signer = MockSigner::default();
        let data = EmotionData::new(Emotion::Calm, 0.6);

        let a = signer.sign(&data, "0xabc").await.unwrap();
        let b = signer.sign(&data, "0xabc").await.unwrap();
        assert_ne!(a, b);
    }
}

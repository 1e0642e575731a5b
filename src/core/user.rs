use serde::{Deserialize, Serialize};

/// Connected wallet owner. Lives only as long as the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub wallet_address: String,
    pub avatar: String,
}

impl User {
    /// `0x742d...f44e` style short form used in headers
    pub fn short_address(&self) -> String {
        crate::utils::shorten(&self.wallet_address, 6, 4)
    }
}

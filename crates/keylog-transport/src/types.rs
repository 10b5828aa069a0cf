//! Request and response types exchanged with a wallet service.

use serde::{Deserialize, Serialize};
use std::fmt;

use keylog_core::TxId;

/// A wallet address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(pub String);

impl Address {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A secret used to unlock the wallet. Never printed.
#[derive(Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential([REDACTED])")
    }
}

/// Token returned by a successful unlock, required to send transactions.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthToken(pub String);

impl AuthToken {
    /// Generate a random 128-bit token.
    pub fn random() -> Self {
        use rand::Rng;
        let bytes: [u8; 16] = rand::thread_rng().gen();
        Self(hex::encode(bytes))
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = self.0.get(..6).unwrap_or(&self.0);
        write!(f, "AuthToken({prefix}..)")
    }
}

/// Balance held by an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub address: Address,
    pub amount: u64,
}

/// Acknowledgement of a broadcast transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxReceipt {
    /// Transaction hash (the chain's canonical id).
    pub tx_hash: TxId,
    /// Number of records in the broadcast chain.
    pub record_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_debug_redacted() {
        let cred = Credential::new("hunter2");
        assert_eq!(format!("{:?}", cred), "Credential([REDACTED])");
        assert_eq!(cred.expose(), "hunter2");
    }

    #[test]
    fn test_auth_token_random() {
        let a = AuthToken::random();
        let b = AuthToken::random();
        assert_ne!(a, b);
        assert_eq!(a.0.len(), 32);
        assert!(format!("{:?}", a).ends_with("..)"));
    }
}

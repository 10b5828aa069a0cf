//! Wallet service abstraction.
//!
//! The service handles balance lookups, wallet unlock and transaction
//! broadcast. Implementations may use HTTP, a local node or anything else;
//! the validator core never sees them.

use async_trait::async_trait;

use keylog_core::RecordChain;

use crate::error::Result;
use crate::types::{Address, AuthToken, Balance, Credential, TxReceipt};

/// Capability interface for a remote wallet service.
///
/// Implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait WalletService: Send + Sync {
    /// Fetch the balance held by an address.
    async fn fetch_balance(&self, address: &Address) -> Result<Balance>;

    /// Exchange a credential for an auth token.
    async fn unlock(&self, credential: &Credential) -> Result<AuthToken>;

    /// Broadcast an assembled chain. Requires a token from [`unlock`](Self::unlock).
    async fn send_transaction(&self, token: &AuthToken, chain: &RecordChain) -> Result<TxReceipt>;
}

/// A simple in-memory wallet service for testing.
///
/// Keeps balances, accepted credentials, issued tokens and every broadcast
/// chain behind a tokio `RwLock`. Failures can be injected per operation.
pub mod memory {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use tokio::sync::RwLock;

    use crate::error::TransportError;

    #[derive(Debug, Default)]
    struct State {
        balances: HashMap<Address, u64>,
        credentials: HashSet<Credential>,
        tokens: HashSet<AuthToken>,
        broadcasts: Vec<RecordChain>,
        offline: bool,
        reject_broadcasts: bool,
    }

    /// In-memory wallet service implementation.
    #[derive(Debug, Default)]
    pub struct MemoryWalletService {
        state: RwLock<State>,
    }

    impl MemoryWalletService {
        /// Create an empty service that accepts no credentials.
        pub fn new() -> Self {
            Self::default()
        }

        /// Accept the given credential for unlock.
        pub fn with_credential(mut self, credential: Credential) -> Self {
            self.state.get_mut().credentials.insert(credential);
            self
        }

        /// Seed a balance.
        pub fn with_balance(mut self, address: Address, amount: u64) -> Self {
            self.state.get_mut().balances.insert(address, amount);
            self
        }

        /// Simulate the service being unreachable.
        pub async fn set_offline(&self, offline: bool) {
            self.state.write().await.offline = offline;
        }

        /// Make every broadcast fail.
        pub async fn set_reject_broadcasts(&self, reject: bool) {
            self.state.write().await.reject_broadcasts = reject;
        }

        /// Chains broadcast so far, in order.
        pub async fn broadcasts(&self) -> Vec<RecordChain> {
            self.state.read().await.broadcasts.clone()
        }

        /// Number of tokens issued so far.
        pub async fn issued_tokens(&self) -> usize {
            self.state.read().await.tokens.len()
        }
    }

    #[async_trait]
    impl WalletService for MemoryWalletService {
        async fn fetch_balance(&self, address: &Address) -> Result<Balance> {
            let state = self.state.read().await;
            if state.offline {
                return Err(TransportError::BalanceUnavailable {
                    address: address.to_string(),
                    reason: "service offline".into(),
                });
            }

            let amount = state.balances.get(address).copied().unwrap_or(0);
            Ok(Balance {
                address: address.clone(),
                amount,
            })
        }

        async fn unlock(&self, credential: &Credential) -> Result<AuthToken> {
            let mut state = self.state.write().await;
            if state.offline {
                return Err(TransportError::Unavailable("service offline".into()));
            }
            if !state.credentials.contains(credential) {
                tracing::warn!("unlock rejected: unknown credential");
                return Err(TransportError::UnlockFailure("invalid credential".into()));
            }

            let token = AuthToken::random();
            state.tokens.insert(token.clone());
            tracing::debug!(?token, "wallet unlocked");
            Ok(token)
        }

        async fn send_transaction(
            &self,
            token: &AuthToken,
            chain: &RecordChain,
        ) -> Result<TxReceipt> {
            let mut state = self.state.write().await;
            if state.offline {
                return Err(TransportError::Unavailable("service offline".into()));
            }
            if !state.tokens.contains(token) {
                return Err(TransportError::Unauthorized);
            }
            if state.reject_broadcasts {
                return Err(TransportError::BroadcastFailure(
                    "transaction rejected by service".into(),
                ));
            }

            let tx_hash = chain
                .compute_id()
                .map_err(|e| TransportError::BroadcastFailure(e.to_string()))?;

            state.broadcasts.push(chain.clone());
            tracing::debug!(%tx_hash, records = chain.len(), "transaction broadcast");

            Ok(TxReceipt {
                tx_hash,
                record_count: chain.len(),
            })
        }
    }
}

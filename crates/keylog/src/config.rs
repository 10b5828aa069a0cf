//! Hot wallet configuration.

use serde::{Deserialize, Serialize};

/// Configuration for [`HotWallet`](crate::HotWallet).
///
/// Deserializable so a host can embed it in its own config file; missing
/// fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// Refuse to broadcast chains with key-log violations.
    ///
    /// When false, violations are logged and the chain is sent anyway.
    pub reject_invalid_chains: bool,

    /// Refuse to broadcast when record 2 requires continuation but record 3
    /// is blank.
    pub require_continuation_record: bool,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            reject_invalid_chains: true,
            require_continuation_record: true,
        }
    }
}

//! Error types for the wallet service transport.

use thiserror::Error;

/// Errors raised by a wallet service.
///
/// These never describe chain-validation problems; those are
/// `keylog_core::ChainRejected`.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The credential was refused or the unlock call failed.
    #[error("unlock failed: {0}")]
    UnlockFailure(String),

    /// The service refused or failed to broadcast the transaction.
    #[error("broadcast failed: {0}")]
    BroadcastFailure(String),

    /// The balance for an address could not be fetched.
    #[error("balance unavailable for {address}: {reason}")]
    BalanceUnavailable { address: String, reason: String },

    /// The auth token is unknown or expired.
    #[error("unauthorized: auth token not recognized")]
    Unauthorized,

    /// The service could not be reached.
    #[error("service unavailable: {0}")]
    Unavailable(String),
}

/// Result type for transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;

//! Error types for the hot wallet.

use keylog_core::{ChainRejected, CoreError, WizardError};
use keylog_transport::TransportError;
use thiserror::Error;

/// Errors that can occur while building and broadcasting a transaction.
#[derive(Debug, Error)]
pub enum WalletError {
    /// The chain broke one or more key-log rules.
    #[error("{0}")]
    ChainRejected(#[from] ChainRejected),

    /// Record 2 requires a continuation record but none was filled in.
    #[error("record 2 requires a continuation record, but record 3 is blank")]
    MissingContinuation,

    /// Wallet service error (unlock, broadcast, balance).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Wizard used out of order.
    #[error("wizard error: {0}")]
    Wizard(#[from] WizardError),

    /// Chain encoding error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),
}

/// Result type for wallet operations.
pub type Result<T> = std::result::Result<T, WalletError>;

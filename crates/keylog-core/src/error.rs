//! Error types for the Keylog core.

use thiserror::Error;

use crate::validation::ChainValidationViolation;
use crate::wizard::WizardStep;

/// Core errors that can occur while encoding or decoding chains.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("encoding error: {0}")]
    EncodingError(String),

    #[error("decoding error: {0}")]
    DecodingError(String),

    #[error("invalid transaction id: {0}")]
    InvalidTxId(#[from] hex::FromHexError),
}

/// A chain that failed one or more key-log checks.
///
/// Carries every violation found in a single pass, in check order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("chain violates {} key-log rule(s): {}", .violations.len(), join_violations(.violations))]
pub struct ChainRejected {
    pub violations: Vec<ChainValidationViolation>,
}

fn join_violations(violations: &[ChainValidationViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Errors raised by a rotation source.
#[derive(Debug, Error)]
pub enum RotationError {
    /// Rotation indices are 1-based.
    #[error("invalid rotation index: {0}")]
    InvalidIndex(u32),

    #[error("rotation source unavailable: {0}")]
    SourceUnavailable(String),
}

/// Errors raised by the record wizard.
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("cannot {action} from step {from:?}")]
    InvalidTransition {
        from: WizardStep,
        action: &'static str,
    },

    /// Record 3 is only editable while record 2 triggers continuation.
    #[error("record 3 is not required for the current record 2")]
    ContinuationNotRequired,

    #[error("rotation error: {0}")]
    Rotation(#[from] RotationError),
}

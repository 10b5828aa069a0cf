//! # Keylog Core
//!
//! Pure primitives for key-rotation record chains: records, the
//! continuation rule, chain validation and chain assembly.
//!
//! This crate contains no I/O, no networking and no async code. Every
//! operation reads its inputs and returns a fresh result.
//!
//! ## Key Types
//!
//! - [`Record`] - One node in a key-rotation chain
//! - [`ValidationResult`] - Every key-log violation found in a chain
//! - [`RecordChain`] - Two or three signed records, ready to broadcast
//! - [`Wizard`] - The record-collection state machine
//!
//! ## Key-log Rules
//!
//! For records `r1, r2[, r3]`, each check is skipped when either side is empty:
//!
//! 1. `r1.twice_prerotated_key_hash == r2.prerotated_key_hash`
//! 2. `r1.prerotated_key_hash == r2.public_key`
//! 3. `r1.twice_prerotated_key_hash == r3.public_key` (continuation only)
//! 4. `r2.twice_prerotated_key_hash == r3.prerotated_key_hash` (continuation only)
//!
//! ```rust
//! use keylog_core::{validate_chain, Output, Record};
//!
//! let r1 = Record::new().public_key("PK1").prerotated_key_hash("H1").twice_prerotated_key_hash("H2");
//! let r2 = Record::new()
//!     .public_key("H1")
//!     .prerotated_key_hash("H2")
//!     .twice_prerotated_key_hash("H3")
//!     .outputs(vec![Output::new("H2", 5)]);
//!
//! assert!(!r2.requires_continuation());
//! assert!(validate_chain(&r1, &r2, None).ok);
//! ```

pub mod canonical;
pub mod chain;
pub mod crypto;
pub mod error;
pub mod record;
pub mod rotation;
pub mod types;
pub mod validation;
pub mod wizard;

pub use canonical::{canonical_chain_bytes, CHAIN_VERSION};
pub use chain::{
    assemble_chain, assemble_chain_with_placeholders, PlaceholderSignatures, RecordChain,
    SignatureSource, SignedRecord,
};
pub use crypto::Blake3Hash;
pub use error::{ChainRejected, CoreError, RotationError, WizardError};
pub use record::{Output, Record};
pub use rotation::{MockRotationSource, RotationKeys, RotationSource, SeededRotationSource};
pub use types::{KeyField, RecordPosition, TxId};
pub use validation::{
    requires_continuation, validate_chain, ChainCheck, ChainValidationViolation,
    ValidationResult, CONSISTENT_MESSAGE,
};
pub use wizard::{Wizard, WizardStep};

//! # Keylog
//!
//! A hot wallet built on key-rotation record chains.
//!
//! ## Overview
//!
//! - **Records**: each binds the current key to commitments for the next two keys
//! - **Validation**: the key-log rules that must hold between consecutive records
//! - **Continuation**: a third record, required when funds leave the rotation
//!   chain or a relationship is declared
//! - **Broadcast**: assembled chains handed to an injected [`WalletService`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use keylog::{HotWallet, WalletConfig, Wizard};
//! use keylog::transport::{Credential, MemoryWalletService};
//!
//! async fn example() {
//!     let service = MemoryWalletService::new().with_credential(Credential::new("pw"));
//!     let wallet = HotWallet::new(service, WalletConfig::default());
//!
//!     let mut wizard = Wizard::new();
//!     // ... fill records, advance to ReadyToAssemble ...
//!
//!     let report = wallet
//!         .broadcast_wizard(&wizard, &Credential::new("pw"))
//!         .await
//!         .unwrap();
//!     println!("broadcast {}", report.receipt.tx_hash);
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `keylog::core` - Records, validation, assembly, wizard
//! - `keylog::transport` - Wallet service capability

pub mod config;
pub mod error;
pub mod wallet;

pub use keylog_core as core;
pub use keylog_transport as transport;

pub use config::WalletConfig;
pub use error::{Result, WalletError};
pub use wallet::{BroadcastReport, HotWallet};

pub use keylog_core::{
    assemble_chain, requires_continuation, validate_chain, ChainValidationViolation, Output,
    Record, RecordChain, ValidationResult, Wizard, WizardStep,
};
pub use keylog_transport::WalletService;

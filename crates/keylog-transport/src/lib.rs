//! # Keylog Transport
//!
//! The wallet service capability that a hot wallet talks to.
//!
//! ## Overview
//!
//! The validator core is pure; everything that touches the network goes
//! through [`WalletService`]:
//!
//! - `fetch_balance` - balance held by an address
//! - `unlock` - exchange a credential for an [`AuthToken`]
//! - `send_transaction` - broadcast an assembled `RecordChain`
//!
//! Calls are sequential and dependent: unlock must succeed before a
//! transaction is sent, and any failure aborts the rest of the sequence.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use keylog_transport::{Credential, MemoryWalletService, WalletService};
//!
//! async fn example() {
//!     let service = MemoryWalletService::new().with_credential(Credential::new("pw"));
//!     let token = service.unlock(&Credential::new("pw")).await.unwrap();
//!     // let receipt = service.send_transaction(&token, &chain).await?;
//! }
//! ```

pub mod error;
pub mod service;
pub mod types;

pub use error::{Result, TransportError};
pub use service::{memory::MemoryWalletService, WalletService};
pub use types::{Address, AuthToken, Balance, Credential, TxReceipt};

//! # Keylog Testkit
//!
//! Testing utilities for Keylog.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Fixed scenarios with their expected validation errors
//! - **Generators**: Proptest strategies for records and consistent chains
//! - **Fixtures**: Named scenarios and a funded in-memory hot wallet
//!
//! ## Golden Vectors
//!
//! ```rust
//! use keylog_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, tx_id) in verify_all_vectors() {
//!     assert!(matches, "{name}: {tx_id}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use keylog_testkit::generators::ConsistentChain;
//!
//! proptest! {
//!     #[test]
//!     fn consistent_chains_validate(chain: ConsistentChain) {
//!         let result = keylog_core::validate_chain(
//!             &chain.record1,
//!             &chain.record2,
//!             chain.record3.as_ref(),
//!         );
//!         prop_assert!(result.ok);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use keylog_testkit::fixtures::WalletFixture;
//!
//! let fixture = WalletFixture::new();
//! let wizard = fixture.wizard(1, Some("merchant")).unwrap();
//! assert!(wizard.validate().ok);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{all_scenarios, Scenario, WalletFixture};
pub use generators::ConsistentChain;
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};

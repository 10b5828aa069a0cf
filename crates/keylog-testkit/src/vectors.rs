//! Golden vectors for chain validation and assembly.
//!
//! Each vector pins the continuation decision, the exact error strings and
//! the assembled chain length for one fixture scenario. The messages are
//! part of the user-facing contract and must not drift.

use keylog_core::{assemble_chain_with_placeholders, requires_continuation, validate_chain};

use crate::fixtures::{self, Scenario};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Builds the records under test.
    pub scenario: fn() -> Scenario,
    /// Whether record 2 requires a continuation record.
    pub expected_continuation: bool,
    /// Validation errors, in order.
    pub expected_errors: &'static [&'static str],
    /// Number of records in the assembled chain.
    pub expected_len: usize,
}

const SKIP_ONE: &str = "twice_prerotated_key_hash(Record1) != prerotated_key_hash(Record2)";
const CONTINUATION_KEY: &str =
    "twice_prerotated_key_hash(Record1) != public_key(Record3) [expected hashed match]";

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            scenario: fixtures::two_record_chain,
            expected_continuation: false,
            expected_errors: &[],
            expected_len: 2,
        },
        GoldenVector {
            scenario: fixtures::stale_prerotation,
            expected_continuation: false,
            expected_errors: &[SKIP_ONE],
            expected_len: 2,
        },
        GoldenVector {
            scenario: fixtures::continuation_chain,
            expected_continuation: true,
            expected_errors: &[],
            expected_len: 3,
        },
        GoldenVector {
            scenario: fixtures::wrong_continuation_key,
            expected_continuation: true,
            expected_errors: &[CONTINUATION_KEY],
            expected_len: 3,
        },
        GoldenVector {
            scenario: fixtures::relationship_continuation,
            expected_continuation: true,
            expected_errors: &[],
            expected_len: 3,
        },
        GoldenVector {
            scenario: fixtures::single_skip_one_mismatch,
            expected_continuation: false,
            expected_errors: &[SKIP_ONE],
            expected_len: 2,
        },
        GoldenVector {
            // Record 3 is filled with a blank record on assembly.
            scenario: fixtures::missing_continuation,
            expected_continuation: true,
            expected_errors: &[],
            expected_len: 3,
        },
    ]
}

/// Run every vector and report `(name, matches, tx_id_hex)`.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    all_vectors()
        .iter()
        .map(|v| {
            let s = (v.scenario)();
            let result = validate_chain(&s.record1, &s.record2, s.record3.as_ref());
            let chain = assemble_chain_with_placeholders(&s.record1, &s.record2, s.record3.as_ref());
            let tx_id = chain.compute_id().map(|id| id.to_hex()).unwrap_or_default();

            let matches = requires_continuation(Some(&s.record2)) == v.expected_continuation
                && result.errors == v.expected_errors
                && chain.len() == v.expected_len
                && !tx_id.is_empty();

            (s.name.to_string(), matches, tx_id)
        })
        .collect()
}

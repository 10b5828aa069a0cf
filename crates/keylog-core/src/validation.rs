//! Chain validation: the continuation rule and the key-log hash-chaining checks.
//!
//! Every check compares one key field of an earlier record with one key
//! field of a later record. A check is skipped when either side is empty;
//! only populated mismatches are reported. All violations are collected in
//! a single pass, in check order.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ChainRejected;
use crate::record::Record;
use crate::types::{KeyField, RecordPosition};

/// Message shown for a chain with no violations.
pub const CONSISTENT_MESSAGE: &str = "✓ Records appear consistent with the key-log rules.";

/// Check whether a record forces a continuation (third) record.
///
/// True iff some output pays an address other than the record's own
/// pre-rotated key hash, or the relationship is non-blank after trimming.
/// An absent record never requires continuation.
pub fn requires_continuation(record: Option<&Record>) -> bool {
    let Some(record) = record else {
        return false;
    };

    let leaves_chain = record
        .outputs
        .iter()
        .any(|o| o.address != record.prerotated_key_hash);

    leaves_chain || !record.relationship.trim().is_empty()
}

/// One of the four key-log checks, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainCheck {
    /// `twice_prerotated_key_hash(Record1) == prerotated_key_hash(Record2)`
    SkipOneHash,
    /// `prerotated_key_hash(Record1) == public_key(Record2)`
    NextKeyBinding,
    /// `twice_prerotated_key_hash(Record1) == public_key(Record3)`
    ContinuationKeyBinding,
    /// `twice_prerotated_key_hash(Record2) == prerotated_key_hash(Record3)`
    ContinuationSkipOneHash,
}

impl ChainCheck {
    /// All checks in the order their violations are reported.
    pub const ALL: [ChainCheck; 4] = [
        ChainCheck::SkipOneHash,
        ChainCheck::NextKeyBinding,
        ChainCheck::ContinuationKeyBinding,
        ChainCheck::ContinuationSkipOneHash,
    ];

    /// The earlier operand of the comparison.
    pub fn left(self) -> (RecordPosition, KeyField) {
        match self {
            ChainCheck::SkipOneHash | ChainCheck::ContinuationKeyBinding => {
                (RecordPosition::First, KeyField::TwicePrerotatedKeyHash)
            }
            ChainCheck::NextKeyBinding => (RecordPosition::First, KeyField::PrerotatedKeyHash),
            ChainCheck::ContinuationSkipOneHash => {
                (RecordPosition::Second, KeyField::TwicePrerotatedKeyHash)
            }
        }
    }

    /// The later operand of the comparison.
    pub fn right(self) -> (RecordPosition, KeyField) {
        match self {
            ChainCheck::SkipOneHash => (RecordPosition::Second, KeyField::PrerotatedKeyHash),
            ChainCheck::NextKeyBinding => (RecordPosition::Second, KeyField::PublicKey),
            ChainCheck::ContinuationKeyBinding => (RecordPosition::Third, KeyField::PublicKey),
            ChainCheck::ContinuationSkipOneHash => {
                (RecordPosition::Third, KeyField::PrerotatedKeyHash)
            }
        }
    }

    /// Whether the check only applies when a continuation record is required.
    pub fn needs_continuation(self) -> bool {
        self.right().0 == RecordPosition::Third
    }
}

impl fmt::Display for ChainCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (left_pos, left_field) = self.left();
        let (right_pos, right_field) = self.right();
        write!(f, "{left_field}({left_pos}) != {right_field}({right_pos})")?;
        // Hash-to-key comparisons are placeholders for a hashed match.
        if right_field == KeyField::PublicKey {
            f.write_str(" [expected hashed match]")?;
        }
        Ok(())
    }
}

/// A populated mismatch between two key fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{check}")]
pub struct ChainValidationViolation {
    /// Which check failed.
    pub check: ChainCheck,
    /// Value of the earlier field.
    pub left: String,
    /// Value of the later field.
    pub right: String,
}

/// Outcome of validating a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True iff `errors` is empty.
    pub ok: bool,
    /// Human-readable messages, one per violation, in check order.
    pub errors: Vec<String>,
    /// The structured violations behind `errors`.
    pub violations: Vec<ChainValidationViolation>,
}

impl ValidationResult {
    fn from_violations(violations: Vec<ChainValidationViolation>) -> Self {
        Self {
            ok: violations.is_empty(),
            errors: violations.iter().map(ToString::to_string).collect(),
            violations,
        }
    }

    /// Single-line message for display.
    pub fn summary(&self) -> String {
        if self.ok {
            CONSISTENT_MESSAGE.to_string()
        } else {
            format!("❌ {}", self.errors.join(" | "))
        }
    }

    /// Convert into a `Result` for `?` propagation.
    pub fn into_result(self) -> Result<(), ChainRejected> {
        if self.ok {
            Ok(())
        } else {
            Err(ChainRejected {
                violations: self.violations,
            })
        }
    }
}

/// Validate the hash-chaining rules across two or three records.
///
/// Checks against record 3 run only when record 2 requires continuation
/// and record 3 is supplied. A supplied record 3 is otherwise ignored.
pub fn validate_chain(
    record1: &Record,
    record2: &Record,
    record3: Option<&Record>,
) -> ValidationResult {
    let continuation = requires_continuation(Some(record2));

    let lookup = |position: RecordPosition| match position {
        RecordPosition::First => Some(record1),
        RecordPosition::Second => Some(record2),
        RecordPosition::Third => record3,
    };

    let mut violations = Vec::new();

    for check in ChainCheck::ALL {
        if check.needs_continuation() && !continuation {
            continue;
        }

        let (left_pos, left_field) = check.left();
        let (right_pos, right_field) = check.right();
        let (Some(left_record), Some(right_record)) = (lookup(left_pos), lookup(right_pos)) else {
            continue;
        };

        let left = left_record.key_field(left_field);
        let right = right_record.key_field(right_field);

        if left.is_empty() || right.is_empty() || left == right {
            continue;
        }

        violations.push(ChainValidationViolation {
            check,
            left: left.to_string(),
            right: right.to_string(),
        });
    }

    ValidationResult::from_violations(violations)
}

//! RecordChain: the transaction-ready form of two or three records.
//!
//! A chain is assembled once, at the moment a transaction is built, and is
//! never mutated afterwards. Assembly does not validate; callers run
//! [`crate::validation::validate_chain`] first.

use serde::{Deserialize, Serialize};

use crate::canonical::canonical_chain_bytes;
use crate::crypto::Blake3Hash;
use crate::error::CoreError;
use crate::record::Record;
use crate::types::{RecordPosition, TxId};
use crate::validation::requires_continuation;

/// Supplies the opaque signature attached to each assembled record.
///
/// The core never computes or checks signatures.
pub trait SignatureSource {
    fn signature_for(&self, position: RecordPosition, record: &Record) -> String;
}

/// Attaches `SIGNATURE_<n>_PLACEHOLDER` to record `n`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderSignatures;

impl SignatureSource for PlaceholderSignatures {
    fn signature_for(&self, position: RecordPosition, _record: &Record) -> String {
        format!("SIGNATURE_{}_PLACEHOLDER", position.index())
    }
}

/// A record annotated with its position and signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedRecord {
    /// 1-based position in the chain.
    #[serde(rename = "recordIndex")]
    pub record_index: u8,

    #[serde(flatten)]
    pub record: Record,

    /// Opaque signature supplied by the caller.
    pub signature: String,
}

impl SignedRecord {
    /// The position of this record, if its index is in range.
    pub fn position(&self) -> Option<RecordPosition> {
        RecordPosition::from_index(self.record_index)
    }
}

/// An ordered chain of 2 or 3 signed records with indices `1, 2[, 3]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ChainRepr")]
pub struct RecordChain {
    records: Vec<SignedRecord>,
}

#[derive(Deserialize)]
struct ChainRepr {
    records: Vec<SignedRecord>,
}

impl TryFrom<ChainRepr> for RecordChain {
    type Error = CoreError;

    fn try_from(repr: ChainRepr) -> Result<Self, Self::Error> {
        Self::from_signed(repr.records)
    }
}

impl RecordChain {
    /// Build a chain from already-signed records, checking length and indices.
    pub fn from_signed(records: Vec<SignedRecord>) -> Result<Self, CoreError> {
        if !(2..=3).contains(&records.len()) {
            return Err(CoreError::DecodingError(format!(
                "chain must hold 2 or 3 records, got {}",
                records.len()
            )));
        }

        for (i, signed) in records.iter().enumerate() {
            let expected = i + 1;
            if usize::from(signed.record_index) != expected {
                return Err(CoreError::DecodingError(format!(
                    "record at position {expected} has index {}",
                    signed.record_index
                )));
            }
        }

        Ok(Self { records })
    }

    /// The signed records in order.
    pub fn records(&self) -> &[SignedRecord] {
        &self.records
    }

    /// Number of records (2 or 3).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false; a chain holds at least two records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether the chain carries a continuation record.
    pub fn has_continuation(&self) -> bool {
        self.records.len() == 3
    }

    /// The record at the given position.
    pub fn get(&self, position: RecordPosition) -> Option<&SignedRecord> {
        self.records.get(usize::from(position.index()) - 1)
    }

    /// Canonical CBOR bytes of the chain.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, CoreError> {
        canonical_chain_bytes(self)
    }

    /// Compute the transaction id (Blake3 hash of canonical bytes).
    pub fn compute_id(&self) -> Result<TxId, CoreError> {
        let bytes = self.canonical_bytes()?;
        Ok(TxId(Blake3Hash::hash(&bytes).0))
    }
}

/// Assemble records into a chain.
///
/// The continuation record is included iff `record2` requires it. When it
/// is required but not supplied, an empty record takes position 3.
pub fn assemble_chain(
    record1: &Record,
    record2: &Record,
    record3: Option<&Record>,
    signatures: &dyn SignatureSource,
) -> RecordChain {
    let sign = |position: RecordPosition, record: &Record| SignedRecord {
        record_index: position.index(),
        signature: signatures.signature_for(position, record),
        record: record.clone(),
    };

    let mut records = vec![
        sign(RecordPosition::First, record1),
        sign(RecordPosition::Second, record2),
    ];

    if requires_continuation(Some(record2)) {
        let continuation = record3.cloned().unwrap_or_default();
        records.push(sign(RecordPosition::Third, &continuation));
    }

    RecordChain { records }
}

/// Assemble with [`PlaceholderSignatures`].
pub fn assemble_chain_with_placeholders(
    record1: &Record,
    record2: &Record,
    record3: Option<&Record>,
) -> RecordChain {
    assemble_chain(record1, record2, record3, &PlaceholderSignatures)
}

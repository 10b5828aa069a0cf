//! Record: one node in a key-rotation chain.
//!
//! A record binds the key currently authorizing it to commitments for the
//! next two keys. Records start empty and are filled field by field, either
//! by hand or from a rotation source.

use serde::{Deserialize, Serialize};

use crate::rotation::RotationKeys;
use crate::types::KeyField;

/// A single transaction output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Output {
    /// Destination address.
    pub address: String,
    /// Amount in the smallest unit. Never a float.
    pub amount: u64,
}

impl Output {
    /// Create a new output.
    pub fn new(address: impl Into<String>, amount: u64) -> Self {
        Self {
            address: address.into(),
            amount,
        }
    }
}

/// A node in a key-rotation chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// The key currently authorizing this record.
    pub public_key: String,

    /// Commitment to the key authorizing the next record.
    pub prerotated_key_hash: String,

    /// Commitment to the key authorizing the record after the next one.
    pub twice_prerotated_key_hash: String,

    /// Free-text marker. Non-blank values force a continuation record.
    #[serde(default)]
    pub relationship: String,

    /// Outputs (UTXO array).
    pub outputs: Vec<Output>,
}

impl Record {
    /// An empty record holding a single blank output.
    pub fn new() -> Self {
        Self {
            public_key: String::new(),
            prerotated_key_hash: String::new(),
            twice_prerotated_key_hash: String::new(),
            relationship: String::new(),
            outputs: vec![Output::default()],
        }
    }

    /// Set the public key.
    pub fn public_key(mut self, key: impl Into<String>) -> Self {
        self.public_key = key.into();
        self
    }

    /// Set the pre-rotated key hash.
    pub fn prerotated_key_hash(mut self, hash: impl Into<String>) -> Self {
        self.prerotated_key_hash = hash.into();
        self
    }

    /// Set the twice-pre-rotated key hash.
    pub fn twice_prerotated_key_hash(mut self, hash: impl Into<String>) -> Self {
        self.twice_prerotated_key_hash = hash.into();
        self
    }

    /// Set the relationship marker.
    pub fn relationship(mut self, relationship: impl Into<String>) -> Self {
        self.relationship = relationship.into();
        self
    }

    /// Replace all outputs.
    pub fn outputs(mut self, outputs: Vec<Output>) -> Self {
        self.outputs = outputs;
        self
    }

    /// Append a blank output.
    pub fn push_output(&mut self) -> &mut Output {
        self.outputs.push(Output::default());
        let last = self.outputs.len() - 1;
        &mut self.outputs[last]
    }

    /// Mutable access to the output at `index`.
    pub fn output_mut(&mut self, index: usize) -> Option<&mut Output> {
        self.outputs.get_mut(index)
    }

    /// Read one of the key-bearing fields.
    pub fn key_field(&self, field: KeyField) -> &str {
        match field {
            KeyField::PublicKey => &self.public_key,
            KeyField::PrerotatedKeyHash => &self.prerotated_key_hash,
            KeyField::TwicePrerotatedKeyHash => &self.twice_prerotated_key_hash,
        }
    }

    /// Check whether every field still holds its initial value.
    pub fn is_blank(&self) -> bool {
        self.public_key.is_empty()
            && self.prerotated_key_hash.is_empty()
            && self.twice_prerotated_key_hash.is_empty()
            && self.relationship.is_empty()
            && self
                .outputs
                .iter()
                .all(|o| o.address.is_empty() && o.amount == 0)
    }

    /// Check whether this record forces a continuation record.
    ///
    /// See [`crate::validation::requires_continuation`].
    pub fn requires_continuation(&self) -> bool {
        crate::validation::requires_continuation(Some(self))
    }

    /// Fill the key fields from a scanned rotation.
    pub fn apply_rotation(&mut self, keys: &RotationKeys) {
        self.public_key = keys.public_key.clone();
        self.prerotated_key_hash = keys.h_plus_1.clone();
        self.twice_prerotated_key_hash = keys.h_plus_2.clone();
    }

    /// Fill a continuation record from a scanned rotation.
    ///
    /// The pre-rotated hash is linked back to `previous`'s twice-pre-rotated
    /// hash; the scan's H+1 is not used.
    pub fn apply_continuation_rotation(&mut self, keys: &RotationKeys, previous: &Record) {
        self.public_key = keys.public_key.clone();
        self.twice_prerotated_key_hash = keys.h_plus_2.clone();
        self.prerotated_key_hash = previous.twice_prerotated_key_hash.clone();
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

//! Strong type definitions for the Keylog core.
//!
//! Positions, field references and transaction ids are newtypes or enums so
//! that error messages and assembled chains cannot mix them up.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 32-byte transaction identifier, computed as Blake3(canonical_bytes(chain)).
///
/// Two chains with identical records and signatures have the same TxId.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxId(pub [u8; 32]);

impl TxId {
    /// Create a new TxId from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from hex string.
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let bytes = hex::decode(s)?;
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| hex::FromHexError::InvalidStringLength)?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TxId({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for TxId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for TxId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

/// The 1-based position of a record within a chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum RecordPosition {
    First = 1,
    Second = 2,
    /// The continuation record.
    Third = 3,
}

impl RecordPosition {
    /// The record index as carried in assembled chains.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Try to parse from a 1-based index.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Self::First),
            2 => Some(Self::Second),
            3 => Some(Self::Third),
            _ => None,
        }
    }
}

impl fmt::Display for RecordPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Record{}", self.index())
    }
}

/// The key-bearing fields of a record that take part in chain checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyField {
    PublicKey,
    PrerotatedKeyHash,
    TwicePrerotatedKeyHash,
}

impl KeyField {
    /// The wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            KeyField::PublicKey => "public_key",
            KeyField::PrerotatedKeyHash => "prerotated_key_hash",
            KeyField::TwicePrerotatedKeyHash => "twice_prerotated_key_hash",
        }
    }
}

impl fmt::Display for KeyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

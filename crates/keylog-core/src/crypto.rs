//! Cryptographic primitives for the Keylog core.
//!
//! Blake3 hashing for transaction ids and an Ed25519 key ladder for
//! deterministic rotation sources. Nothing here signs or verifies.

use ed25519_dalek::SigningKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Domain separator for rotation key derivation.
pub const ROTATION_DOMAIN: &[u8] = b"keylog-rotation-v0:";

/// A 32-byte Blake3 hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Blake3Hash(pub [u8; 32]);

impl Blake3Hash {
    /// Compute the Blake3 hash of the given data.
    pub fn hash(data: &[u8]) -> Self {
        Self(*blake3::hash(data).as_bytes())
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Blake3Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Blake3({})", &self.to_hex()[..16])
    }
}

/// Derive the Ed25519 signing key for rotation `index` from a wallet seed.
///
/// secret = Blake3(ROTATION_DOMAIN || seed || index_be)
pub fn derive_rotation_key(seed: &[u8; 32], index: u32) -> SigningKey {
    let mut hasher = blake3::Hasher::new();
    hasher.update(ROTATION_DOMAIN);
    hasher.update(seed);
    hasher.update(&index.to_be_bytes());
    SigningKey::from_bytes(hasher.finalize().as_bytes())
}

/// Hex-encoded public key for rotation `index`.
pub fn rotation_public_key_hex(seed: &[u8; 32], index: u32) -> String {
    hex::encode(derive_rotation_key(seed, index).verifying_key().to_bytes())
}

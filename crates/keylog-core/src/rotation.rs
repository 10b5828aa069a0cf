//! Rotation sources: where the next rotation's key material comes from.
//!
//! A hardware wallet shows three values per rotation (address, H+1, H+2).
//! The core treats the provider as opaque behind [`RotationSource`].
//!
//! Hash fields are compared literally (see `validation`), so sources report
//! the successor keys themselves in the H+1 and H+2 slots.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::crypto::rotation_public_key_hex;
use crate::error::RotationError;

/// Key material for one rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationKeys {
    /// Key authorizing this rotation's record.
    pub public_key: String,
    /// Commitment to the next rotation's key.
    pub h_plus_1: String,
    /// Commitment to the key two rotations ahead.
    pub h_plus_2: String,
}

/// A provider of rotation key material, indexed from 1.
pub trait RotationSource {
    fn next_rotation(&self, index: u32) -> Result<RotationKeys, RotationError>;
}

/// Returns fixed mock strings for every rotation.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockRotationSource;

impl RotationSource for MockRotationSource {
    fn next_rotation(&self, index: u32) -> Result<RotationKeys, RotationError> {
        Ok(RotationKeys {
            public_key: format!("MockPubKey_for_Rotation{index}"),
            h_plus_1: format!("Mock_H+1_for_Rotation{index}"),
            h_plus_2: format!("Mock_H+2_for_Rotation{index}"),
        })
    }
}

/// Deterministic Ed25519 key ladder derived from a 32-byte seed.
///
/// Rotation `n` reports key `n`, key `n+1` and key `n+2`, so records filled
/// from consecutive rotations chain cleanly.
#[derive(Clone)]
pub struct SeededRotationSource {
    seed: [u8; 32],
}

impl SeededRotationSource {
    /// Create from a fixed seed.
    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self { seed }
    }

    /// Create from a random seed.
    pub fn generate() -> Self {
        let mut seed = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut seed);
        Self { seed }
    }
}

impl std::fmt::Debug for SeededRotationSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SeededRotationSource([REDACTED])")
    }
}

impl RotationSource for SeededRotationSource {
    fn next_rotation(&self, index: u32) -> Result<RotationKeys, RotationError> {
        if index == 0 || index > u32::MAX - 2 {
            return Err(RotationError::InvalidIndex(index));
        }

        Ok(RotationKeys {
            public_key: rotation_public_key_hex(&self.seed, index),
            h_plus_1: rotation_public_key_hex(&self.seed, index + 1),
            h_plus_2: rotation_public_key_hex(&self.seed, index + 2),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Output, Record};
    use crate::validation::validate_chain;

    #[test]
    fn test_mock_rotation_strings() {
        let keys = MockRotationSource.next_rotation(2).unwrap();
        assert_eq!(keys.public_key, "MockPubKey_for_Rotation2");
        assert_eq!(keys.h_plus_1, "Mock_H+1_for_Rotation2");
        assert_eq!(keys.h_plus_2, "Mock_H+2_for_Rotation2");
    }

    #[test]
    fn test_seeded_rejects_zero_index() {
        let source = SeededRotationSource::from_seed([0x11; 32]);
        assert!(matches!(
            source.next_rotation(0),
            Err(RotationError::InvalidIndex(0))
        ));
    }

    #[test]
    fn test_seeded_ladder_overlaps() {
        let source = SeededRotationSource::from_seed([0x11; 32]);
        let r1 = source.next_rotation(1).unwrap();
        let r2 = source.next_rotation(2).unwrap();

        assert_eq!(r1.h_plus_1, r2.public_key);
        assert_eq!(r1.h_plus_2, r2.h_plus_1);
    }

    #[test]
    fn test_seeded_scans_form_consistent_chain() {
        let source = SeededRotationSource::from_seed([0x07; 32]);

        let mut record1 = Record::new();
        record1.apply_rotation(&source.next_rotation(1).unwrap());

        let mut record2 = Record::new();
        record2.apply_rotation(&source.next_rotation(2).unwrap());
        record2.outputs = vec![Output::new("merchant", 10)];

        let mut record3 = Record::new();
        record3.apply_continuation_rotation(&source.next_rotation(3).unwrap(), &record2);

        assert!(record2.requires_continuation());
        let result = validate_chain(&record1, &record2, Some(&record3));
        assert!(result.ok, "unexpected errors: {:?}", result.errors);
    }

    #[test]
    fn test_debug_hides_seed() {
        let source = SeededRotationSource::from_seed([0xAB; 32]);
        assert!(!format!("{:?}", source).contains("171"));
    }
}

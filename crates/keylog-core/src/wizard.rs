//! Wizard: the record-collection state machine a front-end drives.
//!
//! ```text
//! CollectingRecord1 -> CollectingRecord2 -> CollectingRecord3 -> ReadyToAssemble
//!                                       \________________________/
//!                                      (no continuation required)
//! ```
//!
//! The branch out of `CollectingRecord2` is decided by
//! [`requires_continuation`] on record 2, re-evaluated on every edit.
//! Record 3 only exists while it is required; whenever record 2 stops
//! requiring it, record 3 is reset.

use serde::{Deserialize, Serialize};

use crate::chain::{assemble_chain, RecordChain, SignatureSource};
use crate::error::WizardError;
use crate::record::Record;
use crate::rotation::RotationSource;
use crate::validation::{requires_continuation, validate_chain, ValidationResult};

/// The step a wizard is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WizardStep {
    CollectingRecord1,
    CollectingRecord2,
    CollectingRecord3,
    ReadyToAssemble,
}

/// Record-collection state for one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wizard {
    step: WizardStep,
    record1: Record,
    record2: Record,
    record3: Record,
}

impl Wizard {
    /// A wizard at the first step with blank records.
    pub fn new() -> Self {
        Self {
            step: WizardStep::CollectingRecord1,
            record1: Record::new(),
            record2: Record::new(),
            record3: Record::new(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn record1(&self) -> &Record {
        &self.record1
    }

    pub fn record2(&self) -> &Record {
        &self.record2
    }

    /// Record 3, present only while record 2 requires continuation.
    pub fn record3(&self) -> Option<&Record> {
        self.continuation_required().then_some(&self.record3)
    }

    /// Whether record 2 currently requires a continuation record.
    pub fn continuation_required(&self) -> bool {
        requires_continuation(Some(&self.record2))
    }

    /// Move to the next step.
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        self.step = match self.step {
            WizardStep::CollectingRecord1 => WizardStep::CollectingRecord2,
            WizardStep::CollectingRecord2 if self.continuation_required() => {
                WizardStep::CollectingRecord3
            }
            WizardStep::CollectingRecord2 | WizardStep::CollectingRecord3 => {
                WizardStep::ReadyToAssemble
            }
            WizardStep::ReadyToAssemble => {
                return Err(WizardError::InvalidTransition {
                    from: self.step,
                    action: "advance",
                })
            }
        };
        Ok(self.step)
    }

    /// Move to the previous step.
    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        self.step = match self.step {
            WizardStep::CollectingRecord1 => {
                return Err(WizardError::InvalidTransition {
                    from: self.step,
                    action: "go back",
                })
            }
            WizardStep::CollectingRecord2 => WizardStep::CollectingRecord1,
            WizardStep::CollectingRecord3 => WizardStep::CollectingRecord2,
            WizardStep::ReadyToAssemble if self.continuation_required() => {
                WizardStep::CollectingRecord3
            }
            WizardStep::ReadyToAssemble => WizardStep::CollectingRecord2,
        };
        Ok(self.step)
    }

    /// Edit record 1.
    pub fn edit_record1(&mut self, edit: impl FnOnce(&mut Record)) {
        edit(&mut self.record1);
    }

    /// Edit record 2 and re-evaluate the continuation rule.
    ///
    /// Returns the (possibly changed) current step.
    pub fn edit_record2(&mut self, edit: impl FnOnce(&mut Record)) -> WizardStep {
        let was_required = self.continuation_required();
        edit(&mut self.record2);
        self.on_record2_changed(was_required);
        self.step
    }

    /// Edit record 3. Fails unless record 2 requires continuation.
    pub fn edit_record3(&mut self, edit: impl FnOnce(&mut Record)) -> Result<(), WizardError> {
        if !self.continuation_required() {
            return Err(WizardError::ContinuationNotRequired);
        }
        edit(&mut self.record3);
        Ok(())
    }

    /// Fill record 2 from a rotation source.
    pub fn scan_record2(
        &mut self,
        source: &dyn RotationSource,
        index: u32,
    ) -> Result<WizardStep, WizardError> {
        let keys = source.next_rotation(index)?;
        Ok(self.edit_record2(|r| r.apply_rotation(&keys)))
    }

    /// Fill record 3 from a rotation source, linked to record 2.
    pub fn scan_record3(
        &mut self,
        source: &dyn RotationSource,
        index: u32,
    ) -> Result<(), WizardError> {
        if !self.continuation_required() {
            return Err(WizardError::ContinuationNotRequired);
        }
        let keys = source.next_rotation(index)?;
        self.record3.apply_continuation_rotation(&keys, &self.record2);
        Ok(())
    }

    /// Validate the records collected so far.
    pub fn validate(&self) -> ValidationResult {
        validate_chain(&self.record1, &self.record2, self.record3())
    }

    /// Assemble the chain. Only allowed once the wizard is ready.
    pub fn assemble(&self, signatures: &dyn SignatureSource) -> Result<RecordChain, WizardError> {
        if self.step != WizardStep::ReadyToAssemble {
            return Err(WizardError::InvalidTransition {
                from: self.step,
                action: "assemble",
            });
        }
        Ok(assemble_chain(
            &self.record1,
            &self.record2,
            self.record3(),
            signatures,
        ))
    }

    /// Discard all records and return to the first step.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn on_record2_changed(&mut self, was_required: bool) {
        let required = self.continuation_required();

        if !required {
            self.record3 = Record::new();
            if self.step == WizardStep::CollectingRecord3 {
                self.step = WizardStep::CollectingRecord2;
            }
        } else if !was_required && self.step == WizardStep::ReadyToAssemble {
            self.step = WizardStep::CollectingRecord3;
        }
    }
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::PlaceholderSignatures;
    use crate::record::Output;
    use crate::rotation::{MockRotationSource, SeededRotationSource};

    fn on_chain(record: &mut Record) {
        record.public_key = "H1".into();
        record.prerotated_key_hash = "H2".into();
        record.outputs = vec![Output::new("H2", 5)];
    }

    #[test]
    fn test_two_record_flow() {
        let mut wizard = Wizard::new();
        assert_eq!(wizard.step(), WizardStep::CollectingRecord1);

        wizard.advance().unwrap();
        wizard.edit_record2(on_chain);
        assert_eq!(wizard.advance().unwrap(), WizardStep::ReadyToAssemble);

        let chain = wizard.assemble(&PlaceholderSignatures).unwrap();
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn test_three_record_flow() {
        let mut wizard = Wizard::new();
        wizard.advance().unwrap();
        wizard.edit_record2(|r| {
            on_chain(r);
            r.relationship = "attest".into();
        });

        assert_eq!(wizard.advance().unwrap(), WizardStep::CollectingRecord3);
        wizard.edit_record3(|r| r.public_key = "PK3".into()).unwrap();
        assert_eq!(wizard.advance().unwrap(), WizardStep::ReadyToAssemble);

        let chain = wizard.assemble(&PlaceholderSignatures).unwrap();
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.records()[2].record.public_key, "PK3");
    }

    #[test]
    fn test_continuation_dropped_resets_record3() {
        let mut wizard = Wizard::new();
        wizard.advance().unwrap();
        wizard.edit_record2(|r| r.relationship = "attest".into());
        wizard.advance().unwrap();
        wizard.edit_record3(|r| r.public_key = "PK3".into()).unwrap();

        let step = wizard.edit_record2(|r| {
            r.relationship.clear();
            on_chain(r);
        });

        assert_eq!(step, WizardStep::CollectingRecord2);
        assert!(wizard.record3().is_none());

        // Re-triggering shows a blank record 3, not the stale one.
        wizard.edit_record2(|r| r.relationship = "again".into());
        assert!(wizard.record3().unwrap().is_blank());
    }

    #[test]
    fn test_continuation_appearing_when_ready() {
        let mut wizard = Wizard::new();
        wizard.advance().unwrap();
        wizard.edit_record2(on_chain);
        wizard.advance().unwrap();

        let step = wizard.edit_record2(|r| r.outputs[0].address = "external-addr".into());
        assert_eq!(step, WizardStep::CollectingRecord3);
    }

    #[test]
    fn test_record3_edit_rejected_when_not_required() {
        let mut wizard = Wizard::new();
        let result = wizard.edit_record3(|r| r.public_key = "PK3".into());
        assert!(matches!(result, Err(WizardError::ContinuationNotRequired)));
    }

    #[test]
    fn test_invalid_transitions() {
        let mut wizard = Wizard::new();
        assert!(matches!(
            wizard.back(),
            Err(WizardError::InvalidTransition { .. })
        ));
        assert!(wizard.assemble(&PlaceholderSignatures).is_err());

        wizard.advance().unwrap();
        wizard.advance().unwrap();
        assert_eq!(wizard.step(), WizardStep::ReadyToAssemble);
        assert!(wizard.advance().is_err());
    }

    #[test]
    fn test_back_navigation() {
        let mut wizard = Wizard::new();
        wizard.advance().unwrap();
        wizard.edit_record2(|r| r.relationship = "attest".into());
        wizard.advance().unwrap();
        wizard.advance().unwrap();

        assert_eq!(wizard.back().unwrap(), WizardStep::CollectingRecord3);
        assert_eq!(wizard.back().unwrap(), WizardStep::CollectingRecord2);
        assert_eq!(wizard.back().unwrap(), WizardStep::CollectingRecord1);
    }

    #[test]
    fn test_scan_with_mock_source() {
        let mut wizard = Wizard::new();
        wizard.scan_record2(&MockRotationSource, 2).unwrap();
        assert_eq!(wizard.record2().public_key, "MockPubKey_for_Rotation2");

        // Blank output address differs from the mock H+1, so record 3 is due.
        assert!(wizard.continuation_required());
        wizard.scan_record3(&MockRotationSource, 3).unwrap();

        let record3 = wizard.record3().unwrap();
        assert_eq!(record3.public_key, "MockPubKey_for_Rotation3");
        assert_eq!(record3.prerotated_key_hash, "Mock_H+2_for_Rotation2");
        assert_eq!(record3.twice_prerotated_key_hash, "Mock_H+2_for_Rotation3");
    }

    #[test]
    fn test_seeded_scans_validate() {
        let source = SeededRotationSource::from_seed([0x09; 32]);
        let mut wizard = Wizard::new();
        let keys = source.next_rotation(1).unwrap();
        wizard.edit_record1(|r| r.apply_rotation(&keys));
        wizard.scan_record2(&source, 2).unwrap();
        wizard.edit_record2(|r| r.outputs = vec![Output::new("merchant", 25)]);
        wizard.scan_record3(&source, 3).unwrap();

        assert!(wizard.validate().ok);
    }

    #[test]
    fn test_reset() {
        let mut wizard = Wizard::new();
        wizard.edit_record1(|r| r.public_key = "PK1".into());
        wizard.advance().unwrap();
        wizard.reset();
        assert_eq!(wizard, Wizard::new());
    }
}

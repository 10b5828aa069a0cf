//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use keylog::{HotWallet, WalletConfig};
use keylog_core::{Output, Record, RotationSource, SeededRotationSource, Wizard};
use keylog_transport::{Address, Credential, MemoryWalletService};

/// Three records entered together, plus a label for reporting.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub record1: Record,
    pub record2: Record,
    pub record3: Option<Record>,
}

/// The first record of every scenario: keys `K1`, `H1`, `H2`.
pub fn genesis_record() -> Record {
    Record::new()
        .public_key("K1")
        .prerotated_key_hash("H1")
        .twice_prerotated_key_hash("H2")
}

/// A second record that rotates cleanly from [`genesis_record`] and pays
/// its own pre-rotated hash.
pub fn rotated_record() -> Record {
    Record::new()
        .public_key("H1")
        .prerotated_key_hash("H2")
        .twice_prerotated_key_hash("H3")
        .outputs(vec![Output::new("H2", 5)])
}

/// Two records, no continuation, consistent.
pub fn two_record_chain() -> Scenario {
    Scenario {
        name: "two-record chain",
        record1: genesis_record(),
        record2: rotated_record(),
        record3: None,
    }
}

/// Record 2 pays its own pre-rotated hash `H1` but record 1 committed to
/// `H2`; the skip-one check fails even though no continuation is needed.
pub fn stale_prerotation() -> Scenario {
    Scenario {
        name: "stale pre-rotation",
        record1: genesis_record(),
        record2: Record::new()
            .public_key("H1")
            .prerotated_key_hash("H1")
            .twice_prerotated_key_hash("H3")
            .outputs(vec![Output::new("H1", 5)]),
        record3: None,
    }
}

/// Record 2 pays an external address; record 3 binds `H2`, `H3`.
pub fn continuation_chain() -> Scenario {
    Scenario {
        name: "continuation chain",
        record1: genesis_record(),
        record2: rotated_record().outputs(vec![Output::new("merchant", 5)]),
        record3: Some(
            Record::new()
                .public_key("H2")
                .prerotated_key_hash("H3")
                .twice_prerotated_key_hash("H4"),
        ),
    }
}

/// As [`continuation_chain`] but record 3 carries the wrong public key.
pub fn wrong_continuation_key() -> Scenario {
    let mut scenario = continuation_chain();
    scenario.name = "wrong continuation key";
    if let Some(r3) = scenario.record3.as_mut() {
        r3.public_key = "WRONG".into();
    }
    scenario
}

/// Record 2 is marked with a relationship while still paying on-chain.
pub fn relationship_continuation() -> Scenario {
    let mut scenario = continuation_chain();
    scenario.name = "relationship continuation";
    scenario.record2 = rotated_record().relationship("attest");
    scenario
}

/// Single skip-one mismatch between records 1 and 2.
pub fn single_skip_one_mismatch() -> Scenario {
    Scenario {
        name: "single skip-one mismatch",
        record1: genesis_record().twice_prerotated_key_hash("X"),
        record2: rotated_record()
            .prerotated_key_hash("Y")
            .outputs(vec![Output::new("Y", 1)]),
        record3: None,
    }
}

/// Continuation is required but record 3 was never filled.
pub fn missing_continuation() -> Scenario {
    let mut scenario = continuation_chain();
    scenario.name = "missing continuation";
    scenario.record3 = None;
    scenario
}

/// Every scenario above, in a stable order.
pub fn all_scenarios() -> Vec<Scenario> {
    vec![
        two_record_chain(),
        stale_prerotation(),
        continuation_chain(),
        wrong_continuation_key(),
        relationship_continuation(),
        single_skip_one_mismatch(),
        missing_continuation(),
    ]
}

/// A funded hot wallet over an in-memory service.
pub struct WalletFixture {
    pub wallet: HotWallet<MemoryWalletService>,
    pub credential: Credential,
    pub funded: Address,
    pub rotation: SeededRotationSource,
}

impl WalletFixture {
    /// Create a fixture with a fixed seed and the default config.
    pub fn new() -> Self {
        Self::with_config(WalletConfig::default())
    }

    /// Create a fixture with the given config.
    pub fn with_config(config: WalletConfig) -> Self {
        let credential = Credential::new("fixture-passphrase");
        let funded = Address::new("fixture-funded");
        let service = MemoryWalletService::new()
            .with_credential(credential.clone())
            .with_balance(funded.clone(), 50_000);

        Self {
            wallet: HotWallet::new(service, config),
            credential,
            funded,
            rotation: SeededRotationSource::from_seed([0x42; 32]),
        }
    }

    /// Fill a wizard from the seeded ladder starting at `index`.
    ///
    /// Record 2 pays `payee`. Pass `None` to keep the funds on-chain, which
    /// leaves the wizard ready after record 2.
    pub fn wizard(&self, index: u32, payee: Option<&str>) -> Result<Wizard, keylog::WalletError> {
        let mut wizard = Wizard::new();

        let first = self
            .rotation
            .next_rotation(index)
            .map_err(keylog_core::WizardError::from)?;
        wizard.edit_record1(|r| r.apply_rotation(&first));
        wizard.advance()?;

        wizard.scan_record2(&self.rotation, index + 1)?;
        let payee = match payee {
            Some(payee) => payee.to_string(),
            None => wizard.record2().prerotated_key_hash.clone(),
        };
        wizard.edit_record2(|r| r.outputs = vec![Output::new(payee, 1_000)]);
        wizard.advance()?;

        if wizard.continuation_required() {
            wizard.scan_record3(&self.rotation, index + 2)?;
            wizard.advance()?;
        }

        Ok(wizard)
    }
}

impl Default for WalletFixture {
    fn default() -> Self {
        Self::new()
    }
}

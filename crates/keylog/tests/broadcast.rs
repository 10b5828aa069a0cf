//! End-to-end broadcast flows through the HotWallet.
//!
//! Covers the wizard, rotation sources, validation and the ordering
//! contract with the wallet service (unlock before send, abort on failure).

use std::sync::Mutex;

use async_trait::async_trait;
use keylog::core::{RotationSource, SeededRotationSource};
use keylog::transport::{
    Address, AuthToken, Balance, Credential, MemoryWalletService, TransportError, TxReceipt,
};
use keylog::{HotWallet, Output, RecordChain, WalletConfig, WalletError, WalletService, Wizard, WizardStep};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Wizard filled from a seeded rotation ladder, paying an external address.
fn seeded_wizard(seed: [u8; 32]) -> anyhow::Result<Wizard> {
    let source = SeededRotationSource::from_seed(seed);
    let mut wizard = Wizard::new();

    let first = source.next_rotation(1)?;
    wizard.edit_record1(|r| r.apply_rotation(&first));
    wizard.advance()?;

    wizard.scan_record2(&source, 2)?;
    wizard.edit_record2(|r| r.outputs = vec![Output::new("merchant-addr", 1_000)]);
    assert_eq!(wizard.advance()?, WizardStep::CollectingRecord3);

    wizard.scan_record3(&source, 3)?;
    assert_eq!(wizard.advance()?, WizardStep::ReadyToAssemble);
    Ok(wizard)
}

#[tokio::test]
async fn three_record_wizard_broadcasts() -> anyhow::Result<()> {
    init_tracing();

    let service = MemoryWalletService::new().with_credential(Credential::new("pw"));
    let wallet = HotWallet::new(service, WalletConfig::default());
    let wizard = seeded_wizard([0x21; 32])?;

    let report = wallet
        .broadcast_wizard(&wizard, &Credential::new("pw"))
        .await?;

    assert!(report.validation.ok);
    assert_eq!(report.chain.len(), 3);
    assert_eq!(report.receipt.tx_hash, report.chain.compute_id()?);

    let sent = wallet.service().broadcasts().await;
    assert_eq!(sent, vec![report.chain]);
    Ok(())
}

#[tokio::test]
async fn two_record_wizard_broadcasts() -> anyhow::Result<()> {
    init_tracing();

    let source = SeededRotationSource::from_seed([0x22; 32]);
    let mut wizard = Wizard::new();
    let first = source.next_rotation(1)?;
    wizard.edit_record1(|r| r.apply_rotation(&first));
    wizard.advance()?;
    wizard.scan_record2(&source, 2)?;

    // Pay back into the rotation chain: no continuation.
    let own = wizard.record2().prerotated_key_hash.clone();
    wizard.edit_record2(|r| r.outputs = vec![Output::new(own, 50)]);
    assert_eq!(wizard.advance()?, WizardStep::ReadyToAssemble);

    let service = MemoryWalletService::new().with_credential(Credential::new("pw"));
    let wallet = HotWallet::new(service, WalletConfig::default());
    let report = wallet
        .broadcast_wizard(&wizard, &Credential::new("pw"))
        .await?;

    assert_eq!(report.chain.len(), 2);
    Ok(())
}

#[tokio::test]
async fn tampered_record3_is_rejected_with_named_violation() -> anyhow::Result<()> {
    init_tracing();

    let mut wizard = seeded_wizard([0x23; 32])?;
    wizard.edit_record3(|r| r.prerotated_key_hash = "tampered".into())?;

    let service = MemoryWalletService::new().with_credential(Credential::new("pw"));
    let wallet = HotWallet::new(service, WalletConfig::default());
    let err = wallet
        .broadcast_wizard(&wizard, &Credential::new("pw"))
        .await
        .unwrap_err();

    let WalletError::ChainRejected(rejected) = err else {
        panic!("expected ChainRejected");
    };
    assert_eq!(rejected.violations.len(), 1);
    assert_eq!(
        rejected.violations[0].to_string(),
        "twice_prerotated_key_hash(Record2) != prerotated_key_hash(Record3)"
    );
    assert!(wallet.service().broadcasts().await.is_empty());
    Ok(())
}

/// Service that records the order of calls and can fail on unlock.
#[derive(Default)]
struct RecordingService {
    calls: Mutex<Vec<&'static str>>,
    fail_unlock: bool,
}

impl RecordingService {
    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn log(&self, call: &'static str) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl WalletService for RecordingService {
    async fn fetch_balance(&self, address: &Address) -> keylog::transport::Result<Balance> {
        self.log("fetch_balance");
        Ok(Balance {
            address: address.clone(),
            amount: 0,
        })
    }

    async fn unlock(&self, _credential: &Credential) -> keylog::transport::Result<AuthToken> {
        self.log("unlock");
        if self.fail_unlock {
            return Err(TransportError::UnlockFailure("locked out".into()));
        }
        Ok(AuthToken("token".into()))
    }

    async fn send_transaction(
        &self,
        token: &AuthToken,
        chain: &RecordChain,
    ) -> keylog::transport::Result<TxReceipt> {
        self.log("send_transaction");
        assert_eq!(token.0, "token");
        Ok(TxReceipt {
            tx_hash: chain
                .compute_id()
                .map_err(|e| TransportError::BroadcastFailure(e.to_string()))?,
            record_count: chain.len(),
        })
    }
}

#[tokio::test]
async fn unlock_precedes_send() -> anyhow::Result<()> {
    let wallet = HotWallet::new(RecordingService::default(), WalletConfig::default());
    let wizard = seeded_wizard([0x24; 32])?;

    wallet
        .broadcast_wizard(&wizard, &Credential::new("any"))
        .await?;

    assert_eq!(wallet.service().calls(), vec!["unlock", "send_transaction"]);
    Ok(())
}

#[tokio::test]
async fn unlock_failure_skips_send() -> anyhow::Result<()> {
    let service = RecordingService {
        fail_unlock: true,
        ..RecordingService::default()
    };
    let wallet = HotWallet::new(service, WalletConfig::default());
    let wizard = seeded_wizard([0x25; 32])?;

    let err = wallet
        .broadcast_wizard(&wizard, &Credential::new("any"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        WalletError::Transport(TransportError::UnlockFailure(_))
    ));
    assert_eq!(wallet.service().calls(), vec!["unlock"]);
    Ok(())
}

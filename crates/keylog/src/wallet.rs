//! The HotWallet: validate, assemble, unlock and broadcast.
//!
//! The wallet owns no chain logic of its own. It runs the core validator,
//! assembles the chain and drives the wallet service in a fixed order:
//! unlock must yield a token before a transaction is sent, and the first
//! failure aborts the rest.

use std::sync::Arc;

use keylog_core::{
    assemble_chain, requires_continuation, validate_chain, PlaceholderSignatures, Record,
    RecordChain, SignatureSource, ValidationResult, Wizard, WizardError, WizardStep,
};
use keylog_transport::{Address, Balance, Credential, TxReceipt, WalletService};

use crate::config::WalletConfig;
use crate::error::{Result, WalletError};

/// Outcome of a successful broadcast.
#[derive(Debug, Clone)]
pub struct BroadcastReport {
    /// Service acknowledgement.
    pub receipt: TxReceipt,
    /// The chain that was sent.
    pub chain: RecordChain,
    /// Validation outcome at send time. Only non-ok when
    /// `reject_invalid_chains` is off.
    pub validation: ValidationResult,
}

/// A hot wallet bound to a wallet service.
pub struct HotWallet<S: WalletService> {
    service: S,
    config: WalletConfig,
    signatures: Arc<dyn SignatureSource + Send + Sync>,
}

impl<S: WalletService> HotWallet<S> {
    /// Create a wallet with placeholder signatures.
    pub fn new(service: S, config: WalletConfig) -> Self {
        Self {
            service,
            config,
            signatures: Arc::new(PlaceholderSignatures),
        }
    }

    /// Use a different signature source for assembled records.
    pub fn with_signatures(mut self, signatures: Arc<dyn SignatureSource + Send + Sync>) -> Self {
        self.signatures = signatures;
        self
    }

    /// Get the service reference.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Get the configuration.
    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    /// Fetch the balance held by an address.
    pub async fn balance(&self, address: &Address) -> Result<Balance> {
        Ok(self.service.fetch_balance(address).await?)
    }

    /// Build and broadcast the chain collected by a wizard.
    ///
    /// The wizard must be at `ReadyToAssemble`.
    pub async fn broadcast_wizard(
        &self,
        wizard: &Wizard,
        credential: &Credential,
    ) -> Result<BroadcastReport> {
        if wizard.step() != WizardStep::ReadyToAssemble {
            return Err(WizardError::InvalidTransition {
                from: wizard.step(),
                action: "broadcast",
            }
            .into());
        }
        self.broadcast_records(wizard.record1(), wizard.record2(), wizard.record3(), credential)
            .await
    }

    /// Validate, assemble and broadcast two or three records.
    pub async fn broadcast_records(
        &self,
        record1: &Record,
        record2: &Record,
        record3: Option<&Record>,
        credential: &Credential,
    ) -> Result<BroadcastReport> {
        let validation = self.check(record1, record2, record3)?;

        let chain = assemble_chain(record1, record2, record3, self.signatures.as_ref());
        tracing::debug!(records = chain.len(), "chain assembled");

        let token = self.service.unlock(credential).await.map_err(|e| {
            tracing::warn!("unlock failed, aborting broadcast: {}", e);
            e
        })?;

        let receipt = self.service.send_transaction(&token, &chain).await.map_err(|e| {
            tracing::warn!("broadcast failed: {}", e);
            e
        })?;

        tracing::info!(tx_hash = %receipt.tx_hash, records = receipt.record_count, "transaction broadcast");

        Ok(BroadcastReport {
            receipt,
            chain,
            validation,
        })
    }

    /// Run the pre-broadcast checks configured for this wallet.
    fn check(
        &self,
        record1: &Record,
        record2: &Record,
        record3: Option<&Record>,
    ) -> Result<ValidationResult> {
        if self.config.require_continuation_record
            && requires_continuation(Some(record2))
            && record3.map_or(true, Record::is_blank)
        {
            return Err(WalletError::MissingContinuation);
        }

        let validation = validate_chain(record1, record2, record3);
        if !validation.ok {
            if self.config.reject_invalid_chains {
                tracing::warn!("chain rejected: {}", validation.summary());
                validation.clone().into_result()?;
            }
            tracing::warn!("broadcasting chain with violations: {}", validation.summary());
        }

        Ok(validation)
    }
}

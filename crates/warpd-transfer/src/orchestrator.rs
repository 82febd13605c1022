//! Transfer orchestrator
//!
//! Drives one transfer from the form values to a confirmed origin
//! transaction, recording each status change in the store history.

use crate::messages;
use crate::receipt::try_get_msg_id;
use std::sync::Arc;
use std::time::Duration;
use warpd_error::{ErrorKind, Result, WarpError};
use warpd_provider::MultiProtocolProvider;
use warpd_resilience::with_optional_timeout;
use warpd_store::AppStore;
use warpd_traits::{
    from_base_units, to_base_units, AccountsView, Notifier, RouteEngine, StatusUpdate, Token,
    TracingNotifier, TransactionFns, TransferContext, TransferDetails, TransferRemoteRequest,
    TransferStatus,
};

/// Values submitted from the transfer form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferForm {
    pub origin: String,
    pub destination: String,
    /// Index into the route engine's token list
    pub token_index: usize,
    /// Human-readable amount, or the item id for NFTs
    pub amount: String,
    pub recipient: String,
}

/// How a transfer attempt ended
#[derive(Debug, Clone, PartialEq)]
pub enum TransferOutcome {
    /// All transactions confirmed
    Confirmed {
        /// History index
        index: usize,
        /// Confirmed hashes, in emission order
        hashes: Vec<String>,
        /// Cross-chain message id, if found
        msg_id: Option<String>,
    },
    /// Aborted before any transaction; the entry keeps its status
    Cancelled {
        /// History index
        index: usize,
        /// Why the transfer was not sent
        reason: String,
    },
    /// Marked `Failed` in the history
    Failed {
        /// History index
        index: usize,
        /// Status at which the failure happened
        status: TransferStatus,
        /// Failure category
        kind: ErrorKind,
        /// Hashes confirmed before the failure
        hashes: Vec<String>,
    },
}

impl TransferOutcome {
    /// History index of the attempt
    pub fn index(&self) -> usize {
        match self {
            TransferOutcome::Confirmed { index, .. }
            | TransferOutcome::Cancelled { index, .. }
            | TransferOutcome::Failed { index, .. } => *index,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, TransferOutcome::Confirmed { .. })
    }
}

/// Progress of one attempt
#[derive(Debug)]
struct Attempt {
    index: usize,
    status: TransferStatus,
    hashes: Vec<String>,
}

/// Executes transfers against the store's current context
pub struct TransferOrchestrator {
    store: Arc<AppStore>,
    accounts: Arc<dyn AccountsView>,
    tx_fns: TransactionFns,
    notifier: Arc<dyn Notifier>,
    confirmation_timeout: Option<Duration>,
}

impl TransferOrchestrator {
    pub fn new(store: Arc<AppStore>, accounts: Arc<dyn AccountsView>, tx_fns: TransactionFns) -> Self {
        Self {
            store,
            accounts,
            tx_fns,
            notifier: Arc::new(TracingNotifier),
            confirmation_timeout: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Bounds every confirmation wait; expiry fails the transfer as a timeout
    pub fn with_confirmation_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.confirmation_timeout = timeout;
        self
    }

    /// Executes a transfer. Never fails; the outcome says how it ended.
    pub async fn execute_transfer(&self, form: &TransferForm) -> TransferOutcome {
        self.execute_transfer_with(form, || {}).await
    }

    /// Like [`execute_transfer`](Self::execute_transfer), calling `on_done`
    /// once the attempt has ended
    pub async fn execute_transfer_with(
        &self,
        form: &TransferForm,
        on_done: impl FnOnce() + Send,
    ) -> TransferOutcome {
        tracing::debug!(origin = %form.origin, destination = %form.destination, "Preparing transfer transaction(s)");

        let index = self.store.add_transfer(TransferContext::preparing(
            &form.origin,
            &form.destination,
            &form.recipient,
            &form.amount,
        ));
        self.store.start_transfer_loading();

        // Captured once; a context swap mid-transfer does not affect this attempt.
        let engine = self.store.route_engine();
        let provider = self.store.provider();

        let mut attempt = Attempt {
            index,
            status: TransferStatus::Preparing,
            hashes: Vec::new(),
        };

        let outcome = match self.run(&mut attempt, form, engine.as_ref(), &provider).await {
            Ok(msg_id) => TransferOutcome::Confirmed {
                index,
                hashes: attempt.hashes,
                msg_id,
            },
            Err(e) if e.is_soft() => {
                tracing::warn!(index, status = %attempt.status, error = %e, "Transfer cancelled");
                TransferOutcome::Cancelled {
                    index,
                    reason: e.to_string(),
                }
            }
            Err(e) => self.fail(attempt, form, &provider, e),
        };

        self.store.finish_transfer_loading();
        on_done();
        outcome
    }

    async fn run(
        &self,
        attempt: &mut Attempt,
        form: &TransferForm,
        engine: &dyn RouteEngine,
        provider: &MultiProtocolProvider,
    ) -> Result<Option<String>> {
        let no_route = || WarpError::NoRoute {
            origin: form.origin.clone(),
            destination: form.destination.clone(),
        };
        let origin_token = engine.token_by_index(form.token_index).ok_or_else(no_route)?;
        let connection = origin_token
            .connection_for_chain(&form.destination)
            .ok_or_else(no_route)?;

        let amount = base_amount(origin_token, &form.amount)?;
        let origin_amount = origin_token.amount(amount);

        let protocol = origin_token.protocol;
        let send = self.tx_fns.get(&protocol).cloned().ok_or_else(|| {
            WarpError::Transfer(format!("No transaction function for protocol {}", protocol))
        })?;
        let active_chain = self.accounts.active_chain(protocol);
        let origin_metadata = provider.chain_metadata(&form.origin)?;
        let sender = self
            .accounts
            .account_address_for_chain(origin_metadata)
            .ok_or_else(|| WarpError::NoActiveAccount(form.origin.clone()))?;

        self.store.set_transfer_details(
            attempt.index,
            TransferDetails {
                origin_token_address_or_denom: Some(origin_token.address_or_denom.clone()),
                dest_token_address_or_denom: Some(connection.token.address_or_denom.clone()),
                sender: Some(sender.clone()),
            },
        );

        if !engine
            .is_destination_collateral_sufficient(&origin_amount, &form.destination)
            .await?
        {
            self.notifier.error(messages::INSUFFICIENT_COLLATERAL);
            return Err(WarpError::InsufficientCollateral {
                destination: form.destination.clone(),
            });
        }

        let from_aux = protocol.is_auxiliary();
        let to_aux = connection.token.protocol.is_auxiliary();
        if from_aux || to_aux {
            if !self.accounts.is_aux_wallet_connected() {
                self.notifier.warn(messages::AUX_WALLET_REQUIRED);
            } else {
                if !engine
                    .is_amount_convertible(&origin_amount, &form.destination)
                    .await?
                {
                    self.notifier.error(messages::INCONVERTIBLE_AMOUNT);
                    return Err(WarpError::InconvertibleAmount { amount });
                }

                let check = engine.precision_loss(&origin_amount, &form.destination).await?;
                if !check.is_lossless() {
                    let loss = from_base_units(check.remainder, origin_token.decimals);
                    self.notifier.error(&messages::precision_loss(
                        &loss,
                        &origin_token.symbol,
                        check.decimal_diff,
                    ));
                    return Err(WarpError::PrecisionLoss {
                        remainder: check.remainder,
                        decimal_diff: check.decimal_diff,
                    });
                }
            }
        }

        self.advance(attempt, TransferStatus::CreatingTxs);
        let txs = engine
            .transfer_remote_txs(&TransferRemoteRequest {
                amount: origin_amount,
                destination: form.destination.clone(),
                sender,
                recipient: form.recipient.clone(),
            })
            .await?;

        let mut last_receipt = None;
        for tx in &txs {
            let (signing, confirming) = tx.category.statuses();
            let description = tx.category.description();

            self.advance(attempt, signing);
            let pending = send
                .send_transaction(tx, &form.origin, active_chain.as_deref())
                .await?;

            self.advance(attempt, confirming);
            let (mut hash, confirm) = pending.into_parts();
            let receipt = with_optional_timeout(
                self.confirmation_timeout,
                format!("confirm {} transaction {}", description, hash),
                confirm,
            )
            .await??;

            if from_aux {
                if let Some(inner) = receipt.inner_hash() {
                    hash = inner.to_string();
                }
            }

            tracing::info!(index = attempt.index, hash = %hash, "{} transaction confirmed", description);
            self.notifier.tx_success(
                &format!("{} transaction sent!", description),
                &hash,
                &form.origin,
            );
            attempt.hashes.push(hash);
            last_receipt = Some(receipt);
        }

        let msg_id = last_receipt.as_ref().and_then(try_get_msg_id);
        attempt.status = TransferStatus::ConfirmedTransfer;
        self.store.update_transfer_status(
            attempt.index,
            TransferStatus::ConfirmedTransfer,
            StatusUpdate::confirmed(attempt.hashes.last().cloned(), msg_id.clone()),
        );
        Ok(msg_id)
    }

    fn advance(&self, attempt: &mut Attempt, status: TransferStatus) {
        attempt.status = status;
        self.store
            .update_transfer_status(attempt.index, status, StatusUpdate::default());
    }

    fn fail(
        &self,
        attempt: Attempt,
        form: &TransferForm,
        provider: &MultiProtocolProvider,
        error: WarpError,
    ) -> TransferOutcome {
        tracing::error!(
            index = attempt.index,
            status = %attempt.status,
            error = %error,
            "Error at stage {}",
            attempt.status
        );
        self.store.update_transfer_status(
            attempt.index,
            TransferStatus::Failed,
            StatusUpdate::default(),
        );

        let origin_display_name = provider.display_name(&form.origin);
        if let Some(message) = messages::failure_message(&error, attempt.status, &origin_display_name) {
            self.notifier.error(&message);
        }

        TransferOutcome::Failed {
            index: attempt.index,
            status: attempt.status,
            kind: error.kind(),
            hashes: attempt.hashes,
        }
    }
}

/// Base-unit amount for `token`; NFT ids pass through unscaled
fn base_amount(token: &Token, amount: &str) -> Result<u128> {
    if token.is_nft() {
        return amount
            .trim()
            .parse()
            .map_err(|_| WarpError::InvalidAmount(format!("invalid token id: {}", amount)));
    }
    to_base_units(amount, token.decimals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use warpd_traits::{ProtocolType, TokenStandard};

    fn token(standard: TokenStandard, decimals: u8) -> Token {
        Token {
            chain_name: "sepolia".into(),
            protocol: ProtocolType::Ethereum,
            standard,
            decimals,
            symbol: "USDC".into(),
            address_or_denom: "0xrouter".into(),
            connections: Vec::new(),
        }
    }

    #[test]
    fn test_base_amount_scales_fungible() {
        let usdc = token(TokenStandard::EvmHypCollateral, 6);
        assert_eq!(base_amount(&usdc, "10").unwrap(), 10_000_000);
        assert_eq!(base_amount(&usdc, "0.5").unwrap(), 500_000);
    }

    #[test]
    fn test_base_amount_nft_passthrough() {
        let nft = token(TokenStandard::EvmHypERC721Collateral, 0);
        assert_eq!(base_amount(&nft, "42").unwrap(), 42);
        assert!(base_amount(&nft, "4.2").is_err());
    }

    #[test]
    fn test_outcome_index() {
        let outcome = TransferOutcome::Cancelled {
            index: 3,
            reason: "no".into(),
        };
        assert_eq!(outcome.index(), 3);
        assert!(!outcome.is_confirmed());
    }
}

//! Connected accounts and transaction submission

use crate::chain::{ChainMetadata, ProtocolType};
use crate::tx::{PendingTransaction, WarpTypedTransaction};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use warpd_error::Result;

/// Read-only view of the user's connected wallets
pub trait AccountsView: Send + Sync {
    /// Address of the active account able to sign on `chain`
    fn account_address_for_chain(&self, chain: &ChainMetadata) -> Option<String>;

    /// Name of the chain the wallet of `protocol` is currently on
    fn active_chain(&self, protocol: ProtocolType) -> Option<String>;

    /// Returns true if the auxiliary-family wallet is connected
    fn is_aux_wallet_connected(&self) -> bool;
}

/// Signs and submits a transaction through a connected wallet.
///
/// Implementations raise [`WarpError::ChainMismatch`], [`WarpError::Timeout`]
/// or [`WarpError::WalletRejection`] for those failure categories.
///
/// [`WarpError::ChainMismatch`]: warpd_error::WarpError::ChainMismatch
/// [`WarpError::Timeout`]: warpd_error::WarpError::Timeout
/// [`WarpError::WalletRejection`]: warpd_error::WarpError::WalletRejection
#[async_trait]
pub trait TransactionSender: Send + Sync {
    /// Signs and submits `tx` on `chain_name`
    async fn send_transaction(
        &self,
        tx: &WarpTypedTransaction,
        chain_name: &str,
        active_chain: Option<&str>,
    ) -> Result<PendingTransaction>;
}

/// Transaction senders keyed by protocol
pub type TransactionFns = HashMap<ProtocolType, Arc<dyn TransactionSender>>;

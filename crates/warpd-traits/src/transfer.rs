//! Transfer history entries and the transfer state machine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a transfer attempt.
///
/// Progression: `Preparing -> CreatingTxs -> (SigningApprove -> ConfirmingApprove)?
/// -> SigningTransfer -> ConfirmingTransfer -> ConfirmedTransfer`, or `Failed`
/// from any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransferStatus {
    /// Resolving route, account and checks
    Preparing,
    /// Requesting the transaction list from the route engine
    CreatingTxs,
    /// Waiting for the approval signature
    SigningApprove,
    /// Waiting for the approval receipt
    ConfirmingApprove,
    /// Waiting for the transfer signature
    SigningTransfer,
    /// Waiting for the transfer receipt
    ConfirmingTransfer,
    /// Transfer confirmed on the origin chain
    ConfirmedTransfer,
    /// Attempt failed
    Failed,
}

/// Statuses that end a transfer
pub const FINAL_TRANSFER_STATUSES: [TransferStatus; 2] =
    [TransferStatus::ConfirmedTransfer, TransferStatus::Failed];

impl TransferStatus {
    /// Returns true for terminal statuses
    pub fn is_final(&self) -> bool {
        FINAL_TRANSFER_STATUSES.contains(self)
    }

    /// Message shown when a transfer fails while in this status
    pub fn default_error_message(&self) -> Option<&'static str> {
        match self {
            Self::Preparing => Some("Error while preparing the transactions."),
            Self::CreatingTxs => Some("Error while creating the transactions."),
            Self::SigningApprove => Some("Error while signing the approve transaction."),
            Self::ConfirmingApprove => Some("Error while confirming the approve transaction."),
            Self::SigningTransfer => Some("Error while signing the transfer transaction."),
            Self::ConfirmingTransfer => Some("Error while confirming the transfer transaction."),
            Self::ConfirmedTransfer | Self::Failed => None,
        }
    }

    /// Serialized name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Preparing => "preparing",
            Self::CreatingTxs => "creating-txs",
            Self::SigningApprove => "signing-approve",
            Self::ConfirmingApprove => "confirming-approve",
            Self::SigningTransfer => "signing-transfer",
            Self::ConfirmingTransfer => "confirming-transfer",
            Self::ConfirmedTransfer => "confirmed-transfer",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category of a transaction produced by the route engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxCategory {
    /// Token allowance approval
    Approval,
    /// The cross-chain transfer itself
    Transfer,
}

impl TxCategory {
    /// (signing, confirming) statuses for this category
    pub fn statuses(&self) -> (TransferStatus, TransferStatus) {
        match self {
            Self::Approval => (TransferStatus::SigningApprove, TransferStatus::ConfirmingApprove),
            Self::Transfer => (TransferStatus::SigningTransfer, TransferStatus::ConfirmingTransfer),
        }
    }

    /// Title-cased description for notifications
    pub fn description(&self) -> &'static str {
        match self {
            Self::Approval => "Approval",
            Self::Transfer => "Transfer",
        }
    }
}

/// One submitted transfer attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferContext {
    /// Creation time, unix milliseconds
    pub timestamp: i64,
    /// Current status
    pub status: TransferStatus,
    /// Origin chain name
    pub origin: String,
    /// Destination chain name
    pub destination: String,
    /// Origin router address or denom, once resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_token_address_or_denom: Option<String>,
    /// Destination router address or denom, once resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_token_address_or_denom: Option<String>,
    /// Sender address, once resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    /// Recipient address
    pub recipient: String,
    /// Human-readable amount as entered
    pub amount: String,
    /// Cross-chain message id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg_id: Option<String>,
    /// Hash of the last origin transaction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_tx_hash: Option<String>,
}

impl TransferContext {
    /// New entry in `Preparing` status stamped with the current time
    pub fn preparing(
        origin: impl Into<String>,
        destination: impl Into<String>,
        recipient: impl Into<String>,
        amount: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: chrono::Utc::now().timestamp_millis(),
            status: TransferStatus::Preparing,
            origin: origin.into(),
            destination: destination.into(),
            origin_token_address_or_denom: None,
            dest_token_address_or_denom: None,
            sender: None,
            recipient: recipient.into(),
            amount: amount.into(),
            msg_id: None,
            origin_tx_hash: None,
        }
    }

    /// Applies a status update.
    ///
    /// The status always changes; `msg_id` and `origin_tx_hash` are only
    /// filled if still unset and the update carries a non-empty value.
    pub fn apply_update(&mut self, status: TransferStatus, update: &StatusUpdate) {
        self.status = status;
        fill_once(&mut self.msg_id, update.msg_id.as_deref());
        fill_once(&mut self.origin_tx_hash, update.origin_tx_hash.as_deref());
    }

    /// Fills route details once resolved, first write wins per field
    pub fn apply_details(&mut self, details: &TransferDetails) {
        fill_once(
            &mut self.origin_token_address_or_denom,
            details.origin_token_address_or_denom.as_deref(),
        );
        fill_once(
            &mut self.dest_token_address_or_denom,
            details.dest_token_address_or_denom.as_deref(),
        );
        fill_once(&mut self.sender, details.sender.as_deref());
    }
}

fn fill_once(slot: &mut Option<String>, value: Option<&str>) {
    let unset = slot.as_deref().map_or(true, str::is_empty);
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        if unset {
            *slot = Some(value.to_string());
        }
    }
}

/// Optional ids attached to a status update
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusUpdate {
    /// Cross-chain message id
    pub msg_id: Option<String>,
    /// Origin transaction hash
    pub origin_tx_hash: Option<String>,
}

impl StatusUpdate {
    /// Update carrying the final hash and message id
    pub fn confirmed(origin_tx_hash: Option<String>, msg_id: Option<String>) -> Self {
        Self {
            msg_id,
            origin_tx_hash,
        }
    }
}

/// Route details resolved after the entry was created
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferDetails {
    /// Origin router address or denom
    pub origin_token_address_or_denom: Option<String>,
    /// Destination router address or denom
    pub dest_token_address_or_denom: Option<String>,
    /// Sender address
    pub sender: Option<String>,
}

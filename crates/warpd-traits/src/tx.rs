//! Typed transactions, receipts and pending submissions

use crate::chain::ProtocolType;
use crate::transfer::TxCategory;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::fmt;
use warpd_error::Result;

/// Unsigned transaction built by the route engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarpTypedTransaction {
    /// Approval or transfer
    pub category: TxCategory,
    /// Protocol the transaction is encoded for
    pub protocol: ProtocolType,
    /// Protocol-specific encoded transaction, opaque to the client
    pub payload: serde_json::Value,
}

impl WarpTypedTransaction {
    /// Creates a transaction with an empty payload
    pub fn new(category: TxCategory, protocol: ProtocolType) -> Self {
        Self {
            category,
            protocol,
            payload: serde_json::Value::Null,
        }
    }

    /// Sets the payload
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

/// Event log emitted by an EVM transaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLog {
    /// Emitting contract
    pub address: String,
    /// Indexed topics, topic0 first
    pub topics: Vec<String>,
    /// Non-indexed data
    pub data: String,
}

/// Receipt nested in a protocol-level receipt (Fuel call receipts)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InnerReceipt {
    /// Hash in the protocol's own representation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
}

/// Confirmation receipt of a submitted transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedReceipt {
    /// Protocol of the confirmed transaction
    pub protocol: ProtocolType,
    /// Top-level transaction hash, when the protocol reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_hash: Option<String>,
    /// Nested receipts
    #[serde(default)]
    pub receipts: Vec<InnerReceipt>,
    /// Event logs
    #[serde(default)]
    pub logs: Vec<ReceiptLog>,
}

impl TypedReceipt {
    /// Empty receipt for a protocol
    pub fn new(protocol: ProtocolType) -> Self {
        Self {
            protocol,
            transaction_hash: None,
            receipts: Vec::new(),
            logs: Vec::new(),
        }
    }

    /// Hash of the first inner receipt, if any
    pub fn inner_hash(&self) -> Option<&str> {
        self.receipts
            .first()
            .and_then(|r| r.transaction_hash.as_deref())
    }
}

/// A submitted transaction awaiting confirmation.
///
/// The sender resolves the hash at submission time; awaiting [`confirm`]
/// waits for inclusion.
///
/// [`confirm`]: PendingTransaction::confirm
pub struct PendingTransaction {
    hash: String,
    confirm: BoxFuture<'static, Result<TypedReceipt>>,
}

impl PendingTransaction {
    /// Wraps a hash and its confirmation future
    pub fn new(hash: impl Into<String>, confirm: BoxFuture<'static, Result<TypedReceipt>>) -> Self {
        Self {
            hash: hash.into(),
            confirm,
        }
    }

    /// Hash returned at submission
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Splits into hash and confirmation future
    pub fn into_parts(self) -> (String, BoxFuture<'static, Result<TypedReceipt>>) {
        (self.hash, self.confirm)
    }

    /// Waits for the receipt
    pub async fn confirm(self) -> Result<TypedReceipt> {
        self.confirm.await
    }
}

impl fmt::Debug for PendingTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingTransaction")
            .field("hash", &self.hash)
            .finish_non_exhaustive()
    }
}

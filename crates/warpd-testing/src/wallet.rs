//! Connected-wallet fakes: accounts, transaction sender, auxiliary connector

use async_trait::async_trait;
use futures::FutureExt;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use warpd_error::{Result, WarpError};
use warpd_traits::{
    AccountsView, AuxChainClient, AuxChainConnector, AuxSigner, AuxWallet, ChainMetadata,
    InnerReceipt, PendingTransaction, ProtocolType, ReceiptLog, TransactionSender, TypedReceipt,
    WarpTypedTransaction,
};

/// Static view of connected accounts
#[derive(Debug, Clone, Default)]
pub struct MockAccounts {
    addresses: HashMap<String, String>,
    active_chains: HashMap<ProtocolType, String>,
    aux_connected: bool,
}

impl MockAccounts {
    /// No accounts connected
    pub fn new() -> Self {
        Self::default()
    }

    /// Connects `address` for `chain`
    pub fn with_account(mut self, chain: &str, address: &str) -> Self {
        self.addresses.insert(chain.to_string(), address.to_string());
        self
    }

    /// Sets the chain the `protocol` wallet is on
    pub fn with_active_chain(mut self, protocol: ProtocolType, chain: &str) -> Self {
        self.active_chains.insert(protocol, chain.to_string());
        self
    }

    /// Marks the auxiliary wallet as connected
    pub fn with_aux_connected(mut self, connected: bool) -> Self {
        self.aux_connected = connected;
        self
    }
}

impl AccountsView for MockAccounts {
    fn account_address_for_chain(&self, chain: &ChainMetadata) -> Option<String> {
        self.addresses.get(&chain.name).cloned()
    }

    fn active_chain(&self, protocol: ProtocolType) -> Option<String> {
        self.active_chains.get(&protocol).cloned()
    }

    fn is_aux_wallet_connected(&self) -> bool {
        self.aux_connected
    }
}

/// Scripted result of one `send_transaction` call
#[derive(Debug, Clone)]
pub enum SendOutcome {
    /// Submits and confirms with this receipt
    Confirm {
        /// Hash returned at submission
        hash: String,
        /// Receipt returned at confirmation
        receipt: TypedReceipt,
    },
    /// Submission fails
    Reject(WarpError),
    /// Submits, then confirmation fails
    FailConfirm {
        /// Hash returned at submission
        hash: String,
        /// Confirmation error
        error: WarpError,
    },
    /// Submits, and confirmation never completes
    Hang {
        /// Hash returned at submission
        hash: String,
    },
}

impl SendOutcome {
    /// Confirmation with an empty receipt for `protocol`
    pub fn confirm(hash: &str, protocol: ProtocolType) -> Self {
        SendOutcome::Confirm {
            hash: hash.to_string(),
            receipt: TypedReceipt {
                transaction_hash: Some(hash.to_string()),
                ..TypedReceipt::new(protocol)
            },
        }
    }

    /// EVM confirmation whose receipt carries a dispatch log for `msg_id`
    pub fn confirm_with_dispatch(hash: &str, dispatch_topic: &str, msg_id: &str) -> Self {
        SendOutcome::Confirm {
            hash: hash.to_string(),
            receipt: TypedReceipt {
                transaction_hash: Some(hash.to_string()),
                logs: vec![ReceiptLog {
                    address: "0xmailbox".to_string(),
                    topics: vec![dispatch_topic.to_string(), msg_id.to_string()],
                    data: String::new(),
                }],
                ..TypedReceipt::new(ProtocolType::Ethereum)
            },
        }
    }

    /// Fuel confirmation whose inner receipt reports `inner_hash`
    pub fn confirm_fuel(hash: &str, inner_hash: &str) -> Self {
        SendOutcome::Confirm {
            hash: hash.to_string(),
            receipt: TypedReceipt {
                transaction_hash: Some(hash.to_string()),
                receipts: vec![InnerReceipt {
                    transaction_hash: Some(inner_hash.to_string()),
                }],
                ..TypedReceipt::new(ProtocolType::Fuel)
            },
        }
    }
}

/// Record of one `send_transaction` call
#[derive(Debug, Clone, PartialEq)]
pub struct SentTransaction {
    /// The transaction
    pub tx: WarpTypedTransaction,
    /// Target chain
    pub chain_name: String,
    /// Chain the wallet reported as active
    pub active_chain: Option<String>,
}

/// Transaction sender that plays back scripted outcomes.
///
/// When the script runs out every call confirms with hash `0xtx{n}`.
#[derive(Debug, Default)]
pub struct MockSender {
    script: Mutex<VecDeque<SendOutcome>>,
    sent: Mutex<Vec<SentTransaction>>,
}

impl MockSender {
    /// Sender with an empty script
    pub fn new() -> Self {
        Self::default()
    }

    /// Sender playing back `outcomes` in order
    pub fn scripted(outcomes: impl IntoIterator<Item = SendOutcome>) -> Self {
        Self {
            script: Mutex::new(outcomes.into_iter().collect()),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Calls received so far
    pub fn sent(&self) -> Vec<SentTransaction> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl TransactionSender for MockSender {
    async fn send_transaction(
        &self,
        tx: &WarpTypedTransaction,
        chain_name: &str,
        active_chain: Option<&str>,
    ) -> Result<PendingTransaction> {
        let n = {
            let mut sent = self.sent.lock();
            sent.push(SentTransaction {
                tx: tx.clone(),
                chain_name: chain_name.to_string(),
                active_chain: active_chain.map(str::to_string),
            });
            sent.len()
        };
        let outcome = self
            .script
            .lock()
            .pop_front()
            .unwrap_or_else(|| SendOutcome::confirm(&format!("0xtx{}", n), tx.protocol));

        match outcome {
            SendOutcome::Confirm { hash, receipt } => {
                Ok(PendingTransaction::new(hash, async move { Ok::<_, WarpError>(receipt) }.boxed()))
            }
            SendOutcome::Reject(error) => Err(error),
            SendOutcome::FailConfirm { hash, error } => {
                Ok(PendingTransaction::new(hash, async move { Err::<TypedReceipt, _>(error) }.boxed()))
            }
            SendOutcome::Hang { hash } => Ok(PendingTransaction::new(
                hash,
                futures::future::pending().boxed(),
            )),
        }
    }
}

/// Auxiliary node connection
#[derive(Debug)]
pub struct MockAuxClient {
    chain: String,
}

impl AuxChainClient for MockAuxClient {
    fn chain_name(&self) -> &str {
        &self.chain
    }
}

/// Signer derived for an auxiliary wallet
#[derive(Debug)]
pub struct MockAuxSigner {
    address: String,
}

impl AuxSigner for MockAuxSigner {
    fn address(&self) -> &str {
        &self.address
    }
}

/// Auxiliary connector that can be made unreachable
#[derive(Debug)]
pub struct MockAuxConnector {
    reachable: bool,
    connects: AtomicUsize,
}

impl MockAuxConnector {
    /// Connector whose nodes are reachable
    pub fn new() -> Self {
        Self {
            reachable: true,
            connects: AtomicUsize::new(0),
        }
    }

    /// Connector that finds no node
    pub fn unreachable() -> Self {
        Self {
            reachable: false,
            connects: AtomicUsize::new(0),
        }
    }

    /// Number of connection attempts
    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

impl Default for MockAuxConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuxChainConnector for MockAuxConnector {
    async fn connect(&self, chain: &ChainMetadata) -> Result<Option<Arc<dyn AuxChainClient>>> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if !self.reachable {
            return Ok(None);
        }
        Ok(Some(Arc::new(MockAuxClient {
            chain: chain.name.clone(),
        })))
    }

    fn derive_signer(
        &self,
        wallet: &AuxWallet,
        _client: &Arc<dyn AuxChainClient>,
    ) -> Result<Arc<dyn AuxSigner>> {
        Ok(Arc::new(MockAuxSigner {
            address: wallet.address.clone(),
        }))
    }
}

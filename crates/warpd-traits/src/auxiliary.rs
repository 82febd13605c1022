//! Auxiliary-family wallet and chain connectivity
//!
//! The auxiliary protocol family has its own wallet connector. Its state
//! drives context rebuilds, and a live connection enables the
//! auxiliary-aware route engine.

use crate::chain::ChainMetadata;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use warpd_error::Result;

/// Network an auxiliary wallet is on
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuxNetwork {
    /// Network chain id
    pub chain_id: u64,
    /// Node URL
    pub url: String,
}

/// Snapshot of the auxiliary wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuxWallet {
    /// Account address
    pub address: String,
    /// Active network, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<AuxNetwork>,
    /// Whether the wallet can sign
    pub unlocked: bool,
}

impl AuxWallet {
    /// Unlocked wallet without a known network
    pub fn unlocked(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            network: None,
            unlocked: true,
        }
    }

    /// Sets the network
    pub fn on_network(mut self, chain_id: u64, url: impl Into<String>) -> Self {
        self.network = Some(AuxNetwork {
            chain_id,
            url: url.into(),
        });
        self
    }

    /// Chain id of the active network
    pub fn chain_id(&self) -> Option<u64> {
        self.network.as_ref().map(|n| n.chain_id)
    }
}

/// Signer attached to the provider for an auxiliary chain
pub trait AuxSigner: Send + Sync + fmt::Debug {
    /// Signer address
    fn address(&self) -> &str;
}

/// Live connection to an auxiliary chain node
pub trait AuxChainClient: Send + Sync + fmt::Debug {
    /// Chain the client is connected to
    fn chain_name(&self) -> &str;
}

/// Opens auxiliary chain connections and derives signers for them
#[async_trait]
pub trait AuxChainConnector: Send + Sync {
    /// Connects to `chain`, or returns `None` if no node is reachable
    async fn connect(&self, chain: &ChainMetadata) -> Result<Option<Arc<dyn AuxChainClient>>>;

    /// Derives a signer bound to `client` for `wallet`
    fn derive_signer(
        &self,
        wallet: &AuxWallet,
        client: &Arc<dyn AuxChainClient>,
    ) -> Result<Arc<dyn AuxSigner>>;
}

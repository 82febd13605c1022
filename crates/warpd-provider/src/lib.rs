//! # warpd Provider
//!
//! Multi-protocol provider built from the final chain-metadata map.
//!
//! The provider owns per-chain metadata with validated RPC endpoints, and
//! holds the signers attached to auxiliary-family chains once a wallet is
//! connected. Route engines are built from it through a
//! [`RouteEngineFactory`].
//!
//! ## Example
//!
//! ```
//! use warpd_provider::MultiProtocolProvider;
//! use warpd_traits::{ChainMap, ChainMetadata, ProtocolType};
//!
//! let mut chains = ChainMap::new();
//! chains.insert(
//!     "sepolia".to_string(),
//!     ChainMetadata::new("sepolia", 11155111, ProtocolType::Ethereum)
//!         .with_rpc("https://rpc.sepolia.org"),
//! );
//!
//! let provider = MultiProtocolProvider::new(chains).unwrap();
//! assert_eq!(provider.rpc_url("sepolia").unwrap().as_str(), "https://rpc.sepolia.org/");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod factory;

pub use factory::RouteEngineFactory;

use dashmap::DashMap;
use std::sync::Arc;
use thiserror::Error;
use url::Url;
use warpd_error::WarpError;
use warpd_traits::{AuxChainClient, AuxSigner, ChainMap, ChainMetadata, ProtocolType};

/// Provider-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    /// Invalid URL format
    #[error("Invalid RPC URL for {chain}: {reason}")]
    InvalidUrl {
        /// Chain the URL belongs to
        chain: String,
        /// Parse failure
        reason: String,
    },

    /// Chain not present in the metadata map
    #[error("Unknown chain: {0}")]
    UnknownChain(String),

    /// Chain has no RPC endpoint
    #[error("No RPC endpoint configured for {0}")]
    NoRpc(String),

    /// Signer requested for a non-auxiliary chain
    #[error("Chain {0} is not an auxiliary-family chain")]
    NotAuxiliary(String),
}

/// Result type for provider operations
pub type Result<T> = std::result::Result<T, ProviderError>;

impl From<ProviderError> for WarpError {
    fn from(err: ProviderError) -> Self {
        WarpError::Provider(err.to_string())
    }
}

/// Connection and signer attached to an auxiliary chain
#[derive(Debug, Clone)]
pub struct AuxAttachment {
    /// Live node connection
    pub client: Arc<dyn AuxChainClient>,
    /// Signer bound to that connection
    pub signer: Arc<dyn AuxSigner>,
}

/// Provider for every chain of the final metadata map
#[derive(Debug)]
pub struct MultiProtocolProvider {
    metadata: ChainMap<ChainMetadata>,
    aux: DashMap<String, AuxAttachment>,
}

impl MultiProtocolProvider {
    /// Creates a provider, validating every RPC URL
    pub fn new(metadata: ChainMap<ChainMetadata>) -> Result<Self> {
        for chain in metadata.values() {
            for rpc in &chain.rpc_urls {
                Url::parse(rpc).map_err(|e| ProviderError::InvalidUrl {
                    chain: chain.name.clone(),
                    reason: e.to_string(),
                })?;
            }
        }
        tracing::debug!(chains = metadata.len(), "Created multi-protocol provider");
        Ok(Self {
            metadata,
            aux: DashMap::new(),
        })
    }

    /// Provider with no chains
    pub fn empty() -> Self {
        Self {
            metadata: ChainMap::new(),
            aux: DashMap::new(),
        }
    }

    /// Full metadata map
    pub fn metadata(&self) -> &ChainMap<ChainMetadata> {
        &self.metadata
    }

    /// Metadata for `chain`
    pub fn chain_metadata(&self, chain: &str) -> Result<&ChainMetadata> {
        self.metadata
            .get(chain)
            .ok_or_else(|| ProviderError::UnknownChain(chain.to_string()))
    }

    /// Protocol family of `chain`
    pub fn protocol(&self, chain: &str) -> Result<ProtocolType> {
        self.chain_metadata(chain).map(|m| m.protocol)
    }

    /// Display name of `chain`, or the title-cased name if unknown
    pub fn display_name(&self, chain: &str) -> String {
        match self.metadata.get(chain) {
            Some(m) => m.display_name(),
            None => warpd_traits::to_title_case(chain),
        }
    }

    /// Chain names, sorted
    pub fn chain_names(&self) -> impl Iterator<Item = &str> {
        self.metadata.keys().map(String::as_str)
    }

    /// Returns true if any chain belongs to the auxiliary family
    pub fn has_aux_chain(&self) -> bool {
        self.metadata.values().any(|m| m.protocol.is_auxiliary())
    }

    /// Primary RPC endpoint of `chain`
    pub fn rpc_url(&self, chain: &str) -> Result<Url> {
        let meta = self.chain_metadata(chain)?;
        let rpc = meta
            .rpc_urls
            .first()
            .ok_or_else(|| ProviderError::NoRpc(chain.to_string()))?;
        Url::parse(rpc).map_err(|e| ProviderError::InvalidUrl {
            chain: chain.to_string(),
            reason: e.to_string(),
        })
    }

    /// Attaches a connection and signer to an auxiliary chain
    pub fn set_aux_signer(
        &self,
        chain: &str,
        client: Arc<dyn AuxChainClient>,
        signer: Arc<dyn AuxSigner>,
    ) -> Result<()> {
        if !self.protocol(chain)?.is_auxiliary() {
            return Err(ProviderError::NotAuxiliary(chain.to_string()));
        }
        tracing::debug!(chain, signer = signer.address(), "Attached auxiliary signer");
        self.aux
            .insert(chain.to_string(), AuxAttachment { client, signer });
        Ok(())
    }

    /// Signer attached to `chain`
    pub fn aux_signer(&self, chain: &str) -> Option<Arc<dyn AuxSigner>> {
        self.aux.get(chain).map(|a| a.signer.clone())
    }

    /// Connection attached to `chain`
    pub fn aux_client(&self, chain: &str) -> Option<Arc<dyn AuxChainClient>> {
        self.aux.get(chain).map(|a| a.client.clone())
    }
}

impl Default for MultiProtocolProvider {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Client(&'static str);

    impl AuxChainClient for Client {
        fn chain_name(&self) -> &str {
            self.0
        }
    }

    #[derive(Debug)]
    struct Signer;

    impl AuxSigner for Signer {
        fn address(&self) -> &str {
            "0xfuelsigner"
        }
    }

    fn chains() -> ChainMap<ChainMetadata> {
        let mut map = ChainMap::new();
        map.insert(
            "sepolia".into(),
            ChainMetadata::new("sepolia", 11155111, ProtocolType::Ethereum)
                .with_rpc("https://rpc.sepolia.org"),
        );
        map.insert(
            "fueltestnet".into(),
            ChainMetadata::new("fueltestnet", 0, ProtocolType::Fuel)
                .with_rpc("https://testnet.fuel.network/v1/graphql")
                .with_display_name("Fuel Testnet"),
        );
        map
    }

    #[test]
    fn test_invalid_url() {
        let mut map = chains();
        map.insert(
            "broken".into(),
            ChainMetadata::new("broken", 1, ProtocolType::Ethereum).with_rpc("not a url"),
        );
        let err = MultiProtocolProvider::new(map).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidUrl { ref chain, .. } if chain == "broken"));
    }

    #[test]
    fn test_lookup() {
        let provider = MultiProtocolProvider::new(chains()).unwrap();
        assert!(provider.has_aux_chain());
        assert_eq!(provider.protocol("fueltestnet").unwrap(), ProtocolType::Fuel);
        assert_eq!(provider.display_name("fueltestnet"), "Fuel Testnet");
        assert_eq!(provider.display_name("sepolia"), "Sepolia");
        assert_eq!(
            provider.protocol("mars"),
            Err(ProviderError::UnknownChain("mars".into()))
        );
        let names: Vec<_> = provider.chain_names().collect();
        assert_eq!(names, vec!["fueltestnet", "sepolia"]);
    }

    #[test]
    fn test_empty_provider() {
        let provider = MultiProtocolProvider::empty();
        assert!(!provider.has_aux_chain());
        assert!(provider.metadata().is_empty());
    }

    #[test]
    fn test_aux_signer_only_on_aux_chains() {
        let provider = MultiProtocolProvider::new(chains()).unwrap();
        let err = provider
            .set_aux_signer("sepolia", Arc::new(Client("sepolia")), Arc::new(Signer))
            .unwrap_err();
        assert_eq!(err, ProviderError::NotAuxiliary("sepolia".into()));

        provider
            .set_aux_signer("fueltestnet", Arc::new(Client("fueltestnet")), Arc::new(Signer))
            .unwrap();
        assert_eq!(
            provider.aux_signer("fueltestnet").unwrap().address(),
            "0xfuelsigner"
        );
        assert_eq!(
            provider.aux_client("fueltestnet").unwrap().chain_name(),
            "fueltestnet"
        );
    }

    #[test]
    fn test_error_converts() {
        let err: WarpError = ProviderError::NoRpc("sepolia".into()).into();
        assert!(matches!(err, WarpError::Provider(_)));
    }
}

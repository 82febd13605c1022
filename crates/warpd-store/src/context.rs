//! The provider + route engine bundle and the seam that builds it

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use warpd_provider::MultiProtocolProvider;
use warpd_traits::{
    AuxWallet, ChainMap, ChainMetadata, ChainMetadataOverride, EmptyRouteEngine, RouteConfig,
    RouteEngine,
};

/// Provider, route engine and chain metadata, always replaced as one unit
#[derive(Clone)]
pub struct AppContext {
    /// Provider over `chain_metadata`
    pub provider: Arc<MultiProtocolProvider>,
    /// Token-route engine
    pub route_engine: Arc<dyn RouteEngine>,
    /// Final chain metadata, overrides applied
    pub chain_metadata: ChainMap<ChainMetadata>,
    /// Whether any chain belongs to the auxiliary family
    pub has_aux_chain: bool,
}

impl AppContext {
    /// Bundle with no chains and an empty route engine
    pub fn empty() -> Self {
        Self {
            provider: Arc::new(MultiProtocolProvider::empty()),
            route_engine: Arc::new(EmptyRouteEngine),
            chain_metadata: ChainMap::new(),
            has_aux_chain: false,
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("chains", &self.chain_metadata.keys().collect::<Vec<_>>())
            .field("tokens", &self.route_engine.tokens().len())
            .field("has_aux_chain", &self.has_aux_chain)
            .finish()
    }
}

/// Inputs for a context build
#[derive(Debug, Clone, Default)]
pub struct ContextRequest {
    /// User route configs, merged over the registry defaults
    pub route_config_overrides: Vec<RouteConfig>,
    /// User chain-metadata overrides
    pub chain_metadata_overrides: ChainMap<ChainMetadataOverride>,
    /// Connected, unlocked auxiliary wallet
    pub aux_wallet: Option<AuxWallet>,
    /// Auxiliary chain to attach the wallet's signer to; `None` uses the
    /// builder's default
    pub aux_chain: Option<String>,
}

/// Builds an [`AppContext`].
///
/// Implementations absorb every failure and return [`AppContext::empty`]
/// instead, so callers never see a partial bundle.
#[async_trait]
pub trait ContextBuilder: Send + Sync {
    /// Builds the context for `request`
    async fn build(&self, request: ContextRequest) -> AppContext;
}

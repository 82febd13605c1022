//! Route engine construction seam

use crate::MultiProtocolProvider;
use std::sync::Arc;
use warpd_error::Result;
use warpd_traits::{RouteConfig, RouteEngine};

/// Builds route engines from a merged route config and a provider
pub trait RouteEngineFactory: Send + Sync {
    /// Standard engine
    fn from_config(
        &self,
        config: &RouteConfig,
        provider: Arc<MultiProtocolProvider>,
    ) -> Result<Arc<dyn RouteEngine>>;

    /// Engine that can also route through `aux_chain`, whose signer is
    /// already attached to `provider`
    fn from_config_with_aux(
        &self,
        config: &RouteConfig,
        provider: Arc<MultiProtocolProvider>,
        aux_chain: &str,
    ) -> Result<Arc<dyn RouteEngine>>;
}

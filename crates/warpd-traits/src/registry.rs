//! Registry and base route-config collaborators

use crate::chain::ChainMetadata;
use crate::route::RouteConfig;
use async_trait::async_trait;
use std::collections::BTreeSet;
use warpd_error::Result;

/// Listing of what a registry holds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryContent {
    /// Chains the registry has metadata for
    pub chains: BTreeSet<String>,
}

impl RegistryContent {
    /// Returns true if the registry knows `chain`
    pub fn contains(&self, chain: &str) -> bool {
        self.chains.contains(chain)
    }
}

/// Chain-metadata registry.
///
/// Implementations are expected to cache the listing, so that metadata
/// lookups after [`list_registry_content`] do not hit the network again.
///
/// [`list_registry_content`]: Registry::list_registry_content
#[async_trait]
pub trait Registry: Send + Sync {
    /// Location of the registry, for logs
    fn uri(&self) -> &str;

    /// Fetches (and caches) the full registry listing
    async fn list_registry_content(&self) -> Result<RegistryContent>;

    /// Returns the registry metadata for `chain`, if any
    async fn get_chain_metadata(&self, chain: &str) -> Result<Option<ChainMetadata>>;
}

/// Source of the registry-sourced default route configuration
#[async_trait]
pub trait RouteConfigSource: Send + Sync {
    /// Returns the base route configuration
    async fn base_route_config(&self) -> Result<RouteConfig>;
}

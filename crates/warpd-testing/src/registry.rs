//! Registry and route-config fakes

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use warpd_error::{Result, WarpError};
use warpd_traits::{ChainMap, ChainMetadata, Registry, RegistryContent, RouteConfig, RouteConfigSource};

/// In-memory registry that records lookups
#[derive(Debug, Default)]
pub struct MockRegistry {
    chains: ChainMap<ChainMetadata>,
    listing_failures: AtomicUsize,
    list_calls: AtomicUsize,
    lookups: Mutex<Vec<String>>,
}

impl MockRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds chain metadata
    pub fn with_chain(mut self, chain: ChainMetadata) -> Self {
        self.chains.insert(chain.name.clone(), chain);
        self
    }

    /// Makes the next `count` listings fail
    pub fn failing_listings(self, count: usize) -> Self {
        self.listing_failures.store(count, Ordering::SeqCst);
        self
    }

    /// Number of listing calls so far
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Chains looked up so far, in order
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().clone()
    }
}

#[async_trait]
impl Registry for MockRegistry {
    fn uri(&self) -> &str {
        "mock://registry"
    }

    async fn list_registry_content(&self) -> Result<RegistryContent> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .listing_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(WarpError::Registry("registry unreachable".into()));
        }
        Ok(RegistryContent {
            chains: self.chains.keys().cloned().collect(),
        })
    }

    async fn get_chain_metadata(&self, chain: &str) -> Result<Option<ChainMetadata>> {
        self.lookups.lock().push(chain.to_string());
        Ok(self.chains.get(chain).cloned())
    }
}

/// Fixed base route configuration
#[derive(Debug, Default)]
pub struct MockRouteSource {
    config: RouteConfig,
    fail: bool,
}

impl MockRouteSource {
    /// Source returning `config`
    pub fn new(config: RouteConfig) -> Self {
        Self {
            config,
            fail: false,
        }
    }

    /// Source that always fails
    pub fn failing() -> Self {
        Self {
            config: RouteConfig::default(),
            fail: true,
        }
    }
}

#[async_trait]
impl RouteConfigSource for MockRouteSource {
    async fn base_route_config(&self) -> Result<RouteConfig> {
        if self.fail {
            return Err(WarpError::Registry("route config unavailable".into()));
        }
        Ok(self.config.clone())
    }
}

//! Builds the provider + route engine bundle from registry data and user
//! overrides

use crate::assemble::{assemble_chain_metadata, assemble_route_config};
use async_trait::async_trait;
use std::sync::Arc;
use warpd_error::{Result, WarpError};
use warpd_provider::{MultiProtocolProvider, RouteEngineFactory};
use warpd_resilience::{with_backoff, BackoffConfig};
use warpd_store::{AppContext, ContextBuilder, ContextRequest};
use warpd_traits::{
    AuxChainConnector, AuxWallet, Notifier, Registry, RouteConfig, RouteConfigSource,
    RouteEngine, TracingNotifier,
};

/// Auxiliary chain used when a request names none
pub const DEFAULT_AUX_CHAIN: &str = "fueltestnet";

/// Notice shown when a context build fails
pub const CONTEXT_INIT_ERROR: &str =
    "Error initializing warp context. Please check connection status and configs.";

/// Builds [`AppContext`] bundles.
///
/// The registry listing is retried with backoff; every other failure ends
/// the build.
pub struct ContextInitializer {
    registry: Arc<dyn Registry>,
    route_source: Arc<dyn RouteConfigSource>,
    factory: Arc<dyn RouteEngineFactory>,
    aux_connector: Option<Arc<dyn AuxChainConnector>>,
    notifier: Arc<dyn Notifier>,
    backoff: BackoffConfig,
    default_aux_chain: String,
}

impl ContextInitializer {
    pub fn new(
        registry: Arc<dyn Registry>,
        route_source: Arc<dyn RouteConfigSource>,
        factory: Arc<dyn RouteEngineFactory>,
    ) -> Self {
        Self {
            registry,
            route_source,
            factory,
            aux_connector: None,
            notifier: Arc::new(TracingNotifier),
            backoff: BackoffConfig::default(),
            default_aux_chain: DEFAULT_AUX_CHAIN.to_string(),
        }
    }

    /// Enables auxiliary-chain signer attachment
    pub fn with_aux_connector(mut self, connector: Arc<dyn AuxChainConnector>) -> Self {
        self.aux_connector = Some(connector);
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    /// Retry policy for the registry listing
    pub fn with_backoff(mut self, backoff: BackoffConfig) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn with_default_aux_chain(mut self, chain: impl Into<String>) -> Self {
        self.default_aux_chain = chain.into();
        self
    }

    /// Registry this initializer reads from
    pub fn registry(&self) -> &Arc<dyn Registry> {
        &self.registry
    }

    /// Builds the context, propagating the first failure
    pub async fn try_init(&self, request: &ContextRequest) -> Result<AppContext> {
        tracing::debug!(registry = self.registry.uri(), "Initializing warp context");

        let base = self.route_source.base_route_config().await?;
        let route_config = assemble_route_config(base, &request.route_config_overrides);
        let chains = route_config.chain_names();

        let registry = self.registry.clone();
        let content = with_backoff(self.backoff.clone(), || {
            let registry = registry.clone();
            async move { registry.list_registry_content().await }
        })
        .await?;

        let assembled = assemble_chain_metadata(
            &chains,
            self.registry.as_ref(),
            &content,
            &request.chain_metadata_overrides,
        )
        .await?;
        let chain_metadata = assembled.chain_metadata_with_overrides;

        let provider = Arc::new(MultiProtocolProvider::new(chain_metadata.clone())?);
        let has_aux_chain = provider.has_aux_chain();

        let route_engine = self
            .build_engine(&route_config, provider.clone(), has_aux_chain, request)
            .await?;

        tracing::info!(
            chains = chain_metadata.len(),
            tokens = route_engine.tokens().len(),
            has_aux_chain,
            "Warp context initialized"
        );

        Ok(AppContext {
            provider,
            route_engine,
            chain_metadata,
            has_aux_chain,
        })
    }

    /// Builds the context; on failure notifies and returns an empty bundle
    pub async fn init(&self, request: &ContextRequest) -> AppContext {
        match self.try_init(request).await {
            Ok(context) => context,
            Err(e) => {
                tracing::error!(error = %e, "Error initializing warp context");
                self.notifier.error(CONTEXT_INIT_ERROR);
                AppContext::empty()
            }
        }
    }

    async fn build_engine(
        &self,
        route_config: &RouteConfig,
        provider: Arc<MultiProtocolProvider>,
        has_aux_chain: bool,
        request: &ContextRequest,
    ) -> Result<Arc<dyn RouteEngine>> {
        let aux_chain = request
            .aux_chain
            .as_deref()
            .unwrap_or(&self.default_aux_chain);

        if has_aux_chain {
            if let Some(wallet) = request.aux_wallet.as_ref().filter(|w| w.unlocked) {
                if self.attach_aux_signer(&provider, wallet, aux_chain).await? {
                    return self
                        .factory
                        .from_config_with_aux(route_config, provider, aux_chain);
                }
            }
        }

        self.factory.from_config(route_config, provider)
    }

    /// Returns true if a signer was attached to `aux_chain`
    async fn attach_aux_signer(
        &self,
        provider: &MultiProtocolProvider,
        wallet: &AuxWallet,
        aux_chain: &str,
    ) -> Result<bool> {
        let Some(connector) = &self.aux_connector else {
            return Ok(false);
        };
        let Ok(metadata) = provider.chain_metadata(aux_chain) else {
            tracing::debug!(aux_chain, "Auxiliary chain not in route, skipping signer");
            return Ok(false);
        };

        let Some(client) = connector.connect(metadata).await? else {
            tracing::warn!(aux_chain, "No auxiliary node reachable");
            return Ok(false);
        };
        let signer = connector.derive_signer(wallet, &client)?;
        provider
            .set_aux_signer(aux_chain, client, signer)
            .map_err(WarpError::from)?;
        Ok(true)
    }
}

#[async_trait]
impl ContextBuilder for ContextInitializer {
    async fn build(&self, request: ContextRequest) -> AppContext {
        self.init(&request).await
    }
}

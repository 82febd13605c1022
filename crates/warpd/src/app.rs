//! Application wiring: store, context initializer, reactor and orchestrator

use crate::config::{RegistryLocation, WarpdConfig};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use warpd_context::{
    ChainIdNetworks, ChangeDetection, ContextInitializer, FixedNetwork, NetworkResolver,
    WalletReactor, WatchWalletSource, FUEL_MAINNET_CHAIN_ID, FUEL_TESTNET_CHAIN_ID,
};
use warpd_error::Result;
use warpd_provider::RouteEngineFactory;
use warpd_resilience::BackoffConfig;
use warpd_store::{AppStore, FileStorage, StateStorage};
use warpd_traits::{
    AccountsView, AuxChainConnector, AuxWallet, Notifier, Registry, RouteConfigSource,
    TracingNotifier, TransactionFns,
};
use warpd_transfer::{TransferForm, TransferOrchestrator, TransferOutcome};

/// External systems the client talks to
pub struct Collaborators {
    pub registry: Arc<dyn Registry>,
    pub route_source: Arc<dyn RouteConfigSource>,
    pub engine_factory: Arc<dyn RouteEngineFactory>,
    /// Enables auxiliary-chain signers when present
    pub aux_connector: Option<Arc<dyn AuxChainConnector>>,
    pub accounts: Arc<dyn AccountsView>,
    pub tx_fns: TransactionFns,
    pub notifier: Arc<dyn Notifier>,
}

impl Collaborators {
    /// Collaborators with no auxiliary connector, notifying through `tracing`
    pub fn new(
        registry: Arc<dyn Registry>,
        route_source: Arc<dyn RouteConfigSource>,
        engine_factory: Arc<dyn RouteEngineFactory>,
        accounts: Arc<dyn AccountsView>,
        tx_fns: TransactionFns,
    ) -> Self {
        Self {
            registry,
            route_source,
            engine_factory,
            aux_connector: None,
            accounts,
            tx_fns,
            notifier: Arc::new(TracingNotifier),
        }
    }

    /// Like [`new`](Self::new), with the registry built by `connect` from the
    /// configured registry location
    pub fn from_config<F>(
        config: &WarpdConfig,
        connect: F,
        route_source: Arc<dyn RouteConfigSource>,
        engine_factory: Arc<dyn RouteEngineFactory>,
        accounts: Arc<dyn AccountsView>,
        tx_fns: TransactionFns,
    ) -> Result<Self>
    where
        F: FnOnce(&RegistryLocation) -> Result<Arc<dyn Registry>>,
    {
        let location = config.registry_location()?;
        let registry = connect(&location)?;
        tracing::debug!(
            url = %location.url,
            branch = ?location.branch,
            proxy = ?location.proxy_url.as_ref().map(|u| u.as_str()),
            "Registry connected"
        );
        Ok(Self::new(registry, route_source, engine_factory, accounts, tx_fns))
    }
}

/// A running client
pub struct WarpApp {
    config: WarpdConfig,
    store: Arc<AppStore>,
    initializer: Arc<ContextInitializer>,
    orchestrator: TransferOrchestrator,
}

impl WarpApp {
    /// Starts with the snapshot stored under `config.storage_dir`
    pub async fn start(config: WarpdConfig, collaborators: Collaborators) -> Result<Self> {
        let storage = Arc::new(FileStorage::new(config.storage_dir.clone()));
        Self::start_with_storage(config, collaborators, storage).await
    }

    /// Starts with an explicit storage backend.
    ///
    /// Restores the snapshot, fails any interrupted transfers, then builds
    /// the initial context.
    pub async fn start_with_storage(
        config: WarpdConfig,
        collaborators: Collaborators,
        storage: Arc<dyn StateStorage>,
    ) -> Result<Self> {
        config.validate()?;
        tracing::info!(
            registry = %config.registry_url,
            aux_chain = %config.aux_chain,
            "Starting warpd"
        );

        let mut initializer = ContextInitializer::new(
            collaborators.registry,
            collaborators.route_source,
            collaborators.engine_factory,
        )
        .with_notifier(collaborators.notifier.clone())
        .with_backoff(BackoffConfig::new().with_max_attempts(config.registry_backoff_attempts))
        .with_default_aux_chain(config.aux_chain.clone());
        if let Some(connector) = collaborators.aux_connector {
            initializer = initializer.with_aux_connector(connector);
        }
        let initializer = Arc::new(initializer);

        let store = Arc::new(AppStore::hydrate(initializer.clone(), storage).await);

        let orchestrator =
            TransferOrchestrator::new(store.clone(), collaborators.accounts, collaborators.tx_fns)
                .with_notifier(collaborators.notifier)
                .with_confirmation_timeout(config.confirmation_timeout());

        Ok(Self {
            config,
            store,
            initializer,
            orchestrator,
        })
    }

    pub fn config(&self) -> &WarpdConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<AppStore> {
        &self.store
    }

    pub fn initializer(&self) -> &Arc<ContextInitializer> {
        &self.initializer
    }

    pub async fn execute_transfer(&self, form: &TransferForm) -> TransferOutcome {
        self.orchestrator.execute_transfer(form).await
    }

    /// Rebuilds the engine whenever `wallets` reports a transition
    pub fn spawn_wallet_reactor(
        &self,
        wallets: watch::Receiver<Option<AuxWallet>>,
        detection: ChangeDetection,
    ) -> JoinHandle<()> {
        let resolver: Arc<dyn NetworkResolver> = match detection {
            ChangeDetection::Presence => Arc::new(FixedNetwork(self.config.aux_chain.clone())),
            ChangeDetection::Network => Arc::new(
                ChainIdNetworks::new(self.config.aux_chain.clone())
                    .with_network(FUEL_MAINNET_CHAIN_ID, "fuelignition")
                    .with_network(FUEL_TESTNET_CHAIN_ID, "fueltestnet"),
            ),
        };
        WalletReactor::new(self.initializer.clone(), self.store.clone())
            .with_detection(detection)
            .with_resolver(resolver)
            .spawn(WatchWalletSource::new(wallets))
    }
}

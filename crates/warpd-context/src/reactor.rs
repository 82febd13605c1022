//! Wallet-change reactor
//!
//! Watches the auxiliary wallet and rebuilds the provider and route engine
//! once per observed transition. Chain metadata and overrides in the store
//! are left untouched.

use crate::initializer::{ContextInitializer, DEFAULT_AUX_CHAIN};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use warpd_store::{AppStore, ContextRequest};
use warpd_traits::AuxWallet;

/// Fuel mainnet network chain id
pub const FUEL_MAINNET_CHAIN_ID: u64 = 9889;
/// Fuel testnet network chain id
pub const FUEL_TESTNET_CHAIN_ID: u64 = 0;

/// Which wallet transition triggers a rebuild
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChangeDetection {
    /// Wallet connected, disconnected, locked or unlocked
    #[default]
    Presence,
    /// Wallet network changed
    Network,
}

/// Observed wallet state. Both modes track the unlock state, so locking or
/// unlocking a connected wallet is a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tracked {
    Presence { connected: bool, unlocked: bool },
    Network { chain_id: Option<u64>, unlocked: bool },
}

impl ChangeDetection {
    fn observe(&self, wallet: Option<&AuxWallet>) -> Tracked {
        let unlocked = wallet.is_some_and(|w| w.unlocked);
        match self {
            ChangeDetection::Presence => Tracked::Presence {
                connected: wallet.is_some(),
                unlocked,
            },
            ChangeDetection::Network => Tracked::Network {
                chain_id: wallet.and_then(AuxWallet::chain_id),
                unlocked,
            },
        }
    }

    fn initial(&self) -> Tracked {
        self.observe(None)
    }
}

/// Picks the auxiliary chain to attach the wallet to
pub trait NetworkResolver: Send + Sync {
    /// Chain name for `wallet`'s current network
    fn resolve(&self, wallet: Option<&AuxWallet>) -> String;
}

/// Always resolves to the same chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedNetwork(pub String);

impl Default for FixedNetwork {
    fn default() -> Self {
        Self(DEFAULT_AUX_CHAIN.to_string())
    }
}

impl NetworkResolver for FixedNetwork {
    fn resolve(&self, _wallet: Option<&AuxWallet>) -> String {
        self.0.clone()
    }
}

/// Maps the wallet's network chain id to a chain name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainIdNetworks {
    networks: HashMap<u64, String>,
    fallback: String,
}

impl ChainIdNetworks {
    /// Empty mapping that always resolves to `fallback`
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            networks: HashMap::new(),
            fallback: fallback.into(),
        }
    }

    /// Fuel mainnet and testnet, falling back to the testnet
    pub fn fuel() -> Self {
        Self::new(DEFAULT_AUX_CHAIN)
            .with_network(FUEL_MAINNET_CHAIN_ID, "fuelignition")
            .with_network(FUEL_TESTNET_CHAIN_ID, "fueltestnet")
    }

    pub fn with_network(mut self, chain_id: u64, chain: impl Into<String>) -> Self {
        self.networks.insert(chain_id, chain.into());
        self
    }
}

impl NetworkResolver for ChainIdNetworks {
    fn resolve(&self, wallet: Option<&AuxWallet>) -> String {
        wallet
            .and_then(AuxWallet::chain_id)
            .and_then(|id| self.networks.get(&id))
            .unwrap_or(&self.fallback)
            .clone()
    }
}

/// Stream of auxiliary wallet snapshots
#[async_trait]
pub trait WalletEventSource: Send {
    /// Next wallet state; `None` when the source is closed
    async fn next_wallet(&mut self) -> Option<Option<AuxWallet>>;
}

/// Event source over a `watch` channel.
///
/// Yields the current value first, then every change.
#[derive(Debug)]
pub struct WatchWalletSource {
    rx: watch::Receiver<Option<AuxWallet>>,
    started: bool,
}

impl WatchWalletSource {
    pub fn new(rx: watch::Receiver<Option<AuxWallet>>) -> Self {
        Self { rx, started: false }
    }
}

#[async_trait]
impl WalletEventSource for WatchWalletSource {
    async fn next_wallet(&mut self) -> Option<Option<AuxWallet>> {
        if self.started {
            self.rx.changed().await.ok()?;
        }
        self.started = true;
        Some(self.rx.borrow_and_update().clone())
    }
}

/// Rebuilds the store's engine when the auxiliary wallet changes
pub struct WalletReactor {
    initializer: Arc<ContextInitializer>,
    store: Arc<AppStore>,
    detection: ChangeDetection,
    resolver: Arc<dyn NetworkResolver>,
    tracked: Tracked,
}

impl WalletReactor {
    /// Presence-tracking reactor resolving to the default auxiliary chain
    pub fn new(initializer: Arc<ContextInitializer>, store: Arc<AppStore>) -> Self {
        Self {
            initializer,
            store,
            detection: ChangeDetection::default(),
            resolver: Arc::new(FixedNetwork::default()),
            tracked: ChangeDetection::default().initial(),
        }
    }

    pub fn with_detection(mut self, detection: ChangeDetection) -> Self {
        self.detection = detection;
        self.tracked = detection.initial();
        self
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn NetworkResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    /// Handles one wallet snapshot; returns true if a rebuild was attempted
    pub async fn handle(&mut self, wallet: Option<&AuxWallet>) -> bool {
        let observed = self.detection.observe(wallet);
        if observed == self.tracked {
            return false;
        }
        self.tracked = observed;

        let aux_chain = self.resolver.resolve(wallet);
        let request = ContextRequest {
            route_config_overrides: self.store.route_config_overrides(),
            chain_metadata_overrides: self.store.chain_metadata_overrides(),
            aux_wallet: wallet.filter(|w| w.unlocked).cloned(),
            aux_chain: Some(aux_chain.clone()),
        };
        tracing::debug!(?observed, aux_chain = %aux_chain, "Auxiliary wallet changed, reinitializing");

        match self.initializer.try_init(&request).await {
            Ok(context) => {
                self.store
                    .replace_engine(context.provider, context.route_engine, context.has_aux_chain);
            }
            Err(e) => {
                tracing::error!(error = %e, aux_chain = %aux_chain, "Error reinitializing warp context");
            }
        }
        true
    }

    /// Runs the reactor until `source` closes
    pub async fn run(mut self, mut source: impl WalletEventSource) {
        while let Some(wallet) = source.next_wallet().await {
            self.handle(wallet.as_ref()).await;
        }
        tracing::debug!("Wallet event source closed");
    }

    /// Runs the reactor on a tokio task
    pub fn spawn(self, source: impl WalletEventSource + 'static) -> JoinHandle<()> {
        tokio::spawn(self.run(source))
    }
}

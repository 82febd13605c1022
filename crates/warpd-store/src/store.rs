//! The application store

use crate::context::{AppContext, ContextBuilder, ContextRequest};
use crate::storage::StateStorage;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;
use warpd_error::{Result, WarpError};
use warpd_provider::MultiProtocolProvider;
use warpd_traits::{
    ChainMap, ChainMetadata, ChainMetadataOverride, RouteConfig, RouteEngine, StatusUpdate,
    TransferContext, TransferDetails, TransferStatus,
};

/// Storage key of the persisted snapshot
pub const PERSIST_STATE_KEY: &str = "app-state";

/// Schema version of the persisted snapshot; older snapshots are discarded
pub const PERSIST_STATE_VERSION: u32 = 2;

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    version: u32,
    state: PersistedState,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedState {
    #[serde(default)]
    chain_metadata_overrides: ChainMap<ChainMetadataOverride>,
    #[serde(default)]
    transfers: Vec<TransferContext>,
}

#[derive(Debug, Default)]
struct StoreState {
    chain_metadata_overrides: ChainMap<ChainMetadataOverride>,
    route_config_overrides: Vec<RouteConfig>,
    context: AppContext,
    transfers: Vec<TransferContext>,
    transfers_in_flight: usize,
    sidebar_open: bool,
    show_env_select_modal: bool,
}

impl StoreState {
    fn persisted(&self) -> PersistedState {
        PersistedState {
            chain_metadata_overrides: self.chain_metadata_overrides.clone(),
            transfers: self.transfers.clone(),
        }
    }

    fn fail_unconfirmed(&mut self) -> usize {
        let mut changed = 0;
        for transfer in self.transfers.iter_mut().filter(|t| !t.status.is_final()) {
            transfer.status = TransferStatus::Failed;
            changed += 1;
        }
        changed
    }
}

/// Global application state.
///
/// Every mutator is a synchronous reducer applied under one write lock, so
/// concurrent tasks never observe a half-applied change. Context rebuilds
/// await outside the lock and swap the result in with a single write.
pub struct AppStore {
    state: RwLock<StoreState>,
    builder: Arc<dyn ContextBuilder>,
    storage: Arc<dyn StateStorage>,
    persist_lock: Mutex<()>,
    revision: watch::Sender<u64>,
}

impl AppStore {
    /// Empty store; nothing is restored
    pub fn new(builder: Arc<dyn ContextBuilder>, storage: Arc<dyn StateStorage>) -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            state: RwLock::new(StoreState::default()),
            builder,
            storage,
            persist_lock: Mutex::new(()),
            revision,
        }
    }

    /// Restores the persisted snapshot, fails unconfirmed transfers, then
    /// rebuilds the context from the restored overrides
    pub async fn hydrate(builder: Arc<dyn ContextBuilder>, storage: Arc<dyn StateStorage>) -> Self {
        let store = Self::new(builder, storage);
        tracing::debug!("Rehydrating state");
        store.restore();
        store.rebuild_context().await;
        tracing::debug!("Rehydration complete");
        store
    }

    /// Loads the persisted snapshot into the store.
    ///
    /// Returns true if a snapshot was applied. A missing, undecodable or
    /// wrong-version snapshot leaves the store untouched; the latter two are
    /// removed from storage.
    pub fn restore(&self) -> bool {
        let raw = match self.storage.get_item(PERSIST_STATE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return false,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read persisted state");
                return false;
            }
        };

        let snapshot = match serde_json::from_str::<Snapshot>(&raw) {
            Ok(s) if s.version == PERSIST_STATE_VERSION => s,
            Ok(s) => {
                tracing::warn!(
                    found = s.version,
                    expected = PERSIST_STATE_VERSION,
                    "Discarding persisted state with mismatched version"
                );
                self.discard_snapshot();
                return false;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Discarding undecodable persisted state");
                self.discard_snapshot();
                return false;
            }
        };

        let failed = {
            let mut state = self.state.write();
            state.chain_metadata_overrides = snapshot.state.chain_metadata_overrides;
            state.transfers = snapshot.state.transfers;
            state.fail_unconfirmed()
        };
        if failed > 0 {
            tracing::info!(count = failed, "Marked interrupted transfers as failed");
            self.persist();
        }
        self.bump();
        true
    }

    fn discard_snapshot(&self) {
        if let Err(e) = self.storage.remove_item(PERSIST_STATE_KEY) {
            tracing::warn!(error = %e, "Failed to remove persisted state");
        }
    }

    /// Rebuilds the context from the current overrides
    pub async fn rebuild_context(&self) {
        let request = {
            let state = self.state.read();
            ContextRequest {
                route_config_overrides: state.route_config_overrides.clone(),
                chain_metadata_overrides: state.chain_metadata_overrides.clone(),
                ..Default::default()
            }
        };
        let context = self.builder.build(request).await;
        self.set_app_context(context);
    }

    // ============ Context ============

    /// Current context bundle
    pub fn context(&self) -> AppContext {
        self.state.read().context.clone()
    }

    /// Current route engine
    pub fn route_engine(&self) -> Arc<dyn RouteEngine> {
        self.state.read().context.route_engine.clone()
    }

    /// Current provider
    pub fn provider(&self) -> Arc<MultiProtocolProvider> {
        self.state.read().context.provider.clone()
    }

    /// Current chain metadata
    pub fn chain_metadata(&self) -> ChainMap<ChainMetadata> {
        self.state.read().context.chain_metadata.clone()
    }

    /// Whether the current context includes an auxiliary chain
    pub fn has_aux_chain(&self) -> bool {
        self.state.read().context.has_aux_chain
    }

    /// Replaces the whole context bundle
    pub fn set_app_context(&self, context: AppContext) {
        tracing::debug!(?context, "Setting app context");
        self.state.write().context = context;
        self.bump();
    }

    /// Replaces provider, engine and aux flag, keeping chain metadata and
    /// overrides
    pub fn replace_engine(
        &self,
        provider: Arc<MultiProtocolProvider>,
        route_engine: Arc<dyn RouteEngine>,
        has_aux_chain: bool,
    ) {
        {
            let mut state = self.state.write();
            state.context.provider = provider;
            state.context.route_engine = route_engine;
            state.context.has_aux_chain = has_aux_chain;
        }
        self.bump();
    }

    // ============ Overrides ============

    /// User chain-metadata overrides
    pub fn chain_metadata_overrides(&self) -> ChainMap<ChainMetadataOverride> {
        self.state.read().chain_metadata_overrides.clone()
    }

    /// User route-config overrides
    pub fn route_config_overrides(&self) -> Vec<RouteConfig> {
        self.state.read().route_config_overrides.clone()
    }

    /// Replaces the chain-metadata overrides and rebuilds the context.
    ///
    /// Entries set to `None` are dropped.
    pub async fn set_chain_metadata_overrides(
        &self,
        overrides: ChainMap<Option<ChainMetadataOverride>>,
    ) {
        tracing::debug!("Setting chain overrides in store");
        let overrides: ChainMap<ChainMetadataOverride> = overrides
            .into_iter()
            .filter_map(|(chain, o)| o.map(|o| (chain, o)))
            .collect();
        let request = ContextRequest {
            route_config_overrides: self.route_config_overrides(),
            chain_metadata_overrides: overrides.clone(),
            ..Default::default()
        };
        let context = self.builder.build(request).await;
        {
            let mut state = self.state.write();
            state.chain_metadata_overrides = overrides;
            state.context = context;
        }
        self.persist();
        self.bump();
    }

    /// Replaces the route-config overrides and rebuilds the context
    pub async fn set_route_config_overrides(&self, overrides: Vec<RouteConfig>) {
        tracing::debug!(count = overrides.len(), "Setting route config overrides in store");
        let request = ContextRequest {
            route_config_overrides: overrides.clone(),
            chain_metadata_overrides: self.chain_metadata_overrides(),
            ..Default::default()
        };
        let context = self.builder.build(request).await;
        {
            let mut state = self.state.write();
            state.route_config_overrides = overrides;
            state.context = context;
        }
        self.bump();
    }

    // ============ Transfers ============

    /// Snapshot of the transfer history
    pub fn transfers(&self) -> Vec<TransferContext> {
        self.state.read().transfers.clone()
    }

    /// Transfer at `index`
    pub fn transfer(&self, index: usize) -> Option<TransferContext> {
        self.state.read().transfers.get(index).cloned()
    }

    /// Appends a transfer and returns its index
    pub fn add_transfer(&self, transfer: TransferContext) -> usize {
        let index = {
            let mut state = self.state.write();
            state.transfers.push(transfer);
            state.transfers.len() - 1
        };
        self.persist();
        self.bump();
        index
    }

    /// Clears the transfer history
    pub fn reset_transfers(&self) {
        self.state.write().transfers.clear();
        self.persist();
        self.bump();
    }

    /// Sets the status of a transfer; ids in `update` are only recorded the
    /// first time they are supplied. Out-of-range indices are ignored.
    pub fn update_transfer_status(&self, index: usize, status: TransferStatus, update: StatusUpdate) {
        let updated = {
            let mut state = self.state.write();
            match state.transfers.get_mut(index) {
                Some(transfer) => {
                    transfer.apply_update(status, &update);
                    true
                }
                None => false,
            }
        };
        if updated {
            tracing::debug!(index, %status, "Updated transfer status");
            self.persist();
            self.bump();
        } else {
            tracing::debug!(index, "Ignoring status update for unknown transfer");
        }
    }

    /// Records route details resolved after the transfer was added
    pub fn set_transfer_details(&self, index: usize, details: TransferDetails) {
        let updated = {
            let mut state = self.state.write();
            match state.transfers.get_mut(index) {
                Some(transfer) => {
                    transfer.apply_details(&details);
                    true
                }
                None => false,
            }
        };
        if updated {
            self.persist();
            self.bump();
        }
    }

    /// Marks every non-final transfer as failed; returns how many changed
    pub fn fail_unconfirmed_transfers(&self) -> usize {
        let changed = self.state.write().fail_unconfirmed();
        if changed > 0 {
            self.persist();
            self.bump();
        }
        changed
    }

    // ============ UI flags ============

    /// Whether any transfer is being executed
    pub fn transfer_loading(&self) -> bool {
        self.state.read().transfers_in_flight > 0
    }

    /// Number of transfers being executed
    pub fn transfers_in_flight(&self) -> usize {
        self.state.read().transfers_in_flight
    }

    /// Marks one more transfer as executing
    pub fn start_transfer_loading(&self) {
        self.state.write().transfers_in_flight += 1;
        self.bump();
    }

    /// Marks one executing transfer as ended
    pub fn finish_transfer_loading(&self) {
        {
            let mut state = self.state.write();
            state.transfers_in_flight = state.transfers_in_flight.saturating_sub(1);
        }
        self.bump();
    }

    /// Whether the sidebar is open
    pub fn sidebar_open(&self) -> bool {
        self.state.read().sidebar_open
    }

    /// Opens or closes the sidebar
    pub fn set_sidebar_open(&self, open: bool) {
        self.state.write().sidebar_open = open;
        self.bump();
    }

    /// Whether the environment selection modal is shown
    pub fn show_env_select_modal(&self) -> bool {
        self.state.read().show_env_select_modal
    }

    /// Shows or hides the environment selection modal
    pub fn set_show_env_select_modal(&self, show: bool) {
        self.state.write().show_env_select_modal = show;
        self.bump();
    }

    // ============ Change notification ============

    /// Receiver of a counter bumped on every mutation
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    fn bump(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }

    fn persist(&self) {
        // Serialize under the persist lock so the last write is the newest state.
        let _guard = self.persist_lock.lock();
        let snapshot = Snapshot {
            version: PERSIST_STATE_VERSION,
            state: self.state.read().persisted(),
        };
        if let Err(e) = self.write_snapshot(&snapshot) {
            tracing::warn!(error = %e, "Failed to persist state");
        }
    }

    fn write_snapshot(&self, snapshot: &Snapshot) -> Result<()> {
        let json = serde_json::to_string(snapshot)?;
        self.storage
            .set_item(PERSIST_STATE_KEY, &json)
            .map_err(WarpError::from)
    }
}

impl std::fmt::Debug for AppStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppStore")
            .field("state", &*self.state.read())
            .finish_non_exhaustive()
    }
}

//! # warpd Context
//!
//! Builds the provider + route engine bundle for the warpd cross-chain
//! transfer client, and rebuilds it when the auxiliary wallet changes.
//!
//! - [`assemble_route_config`] / [`assemble_chain_metadata`] merge user
//!   overrides over registry data, restricted to the chains the routes use
//! - [`ContextInitializer`] runs the full build and implements the store's
//!   [`ContextBuilder`](warpd_store::ContextBuilder) seam
//! - [`WalletReactor`] swaps the engine on wallet transitions
//!
//! ## Example
//!
//! ```rust,ignore
//! use warpd_context::{ContextInitializer, WalletReactor, WatchWalletSource};
//!
//! let initializer = Arc::new(
//!     ContextInitializer::new(registry, route_source, factory)
//!         .with_aux_connector(connector),
//! );
//! let store = Arc::new(AppStore::hydrate(initializer.clone(), storage).await);
//!
//! let (wallet_tx, wallet_rx) = tokio::sync::watch::channel(None);
//! WalletReactor::new(initializer, store.clone()).spawn(WatchWalletSource::new(wallet_rx));
//! ```

#![forbid(unsafe_code)]

pub mod assemble;
pub mod initializer;
pub mod reactor;

pub use assemble::{assemble_chain_metadata, assemble_route_config, AssembledMetadata};
pub use initializer::{ContextInitializer, CONTEXT_INIT_ERROR, DEFAULT_AUX_CHAIN};
pub use reactor::{
    ChainIdNetworks, ChangeDetection, FixedNetwork, NetworkResolver, WalletEventSource,
    WalletReactor, WatchWalletSource, FUEL_MAINNET_CHAIN_ID, FUEL_TESTNET_CHAIN_ID,
};

//! # warpd - Cross-Chain Token Transfer Client
//!
//! warpd sequences cross-chain token transfers through a route engine and
//! the user's connected wallets, and keeps a persisted history of every
//! attempt.
//!
//! ## Crates
//!
//! | Crate | Description |
//! |-------|-------------|
//! | [`error`] | Error taxonomy and [`ErrorKind`](error::ErrorKind) classification |
//! | [`traits`] | Domain types and collaborator traits |
//! | [`provider`] | Multi-protocol provider and engine factory seam |
//! | [`resilience`] | Backoff and timeouts |
//! | [`store`] | Persisted application store |
//! | [`context`] | Context initializer and wallet-change reactor |
//! | [`transfer`] | Transfer orchestrator |
//!
//! ## Example
//!
//! ```ignore
//! use warpd::prelude::*;
//!
//! let config = WarpdConfig::load("warpd.json")?;
//! init_tracing(&config.log_filter);
//!
//! let app = WarpApp::start(config, collaborators).await?;
//! let outcome = app
//!     .execute_transfer(&TransferForm {
//!         origin: "sepolia".into(),
//!         destination: "fueltestnet".into(),
//!         token_index: 0,
//!         amount: "10".into(),
//!         recipient: "0x...".into(),
//!     })
//!     .await;
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod app;
pub mod config;
pub mod logging;

// ============================================================================
// Workspace re-exports
// ============================================================================

pub use warpd_context as context;
pub use warpd_error as error;
pub use warpd_provider as provider;
pub use warpd_resilience as resilience;
pub use warpd_store as store;
pub use warpd_traits as traits;
pub use warpd_transfer as transfer;

pub use app::{Collaborators, WarpApp};
pub use config::{RegistryLocation, WarpdConfig};
pub use logging::init_tracing;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::app::{Collaborators, WarpApp};
    pub use crate::config::{RegistryLocation, WarpdConfig};
    pub use crate::logging::init_tracing;
    pub use warpd_context::{ChangeDetection, ContextInitializer, WalletReactor};
    pub use warpd_store::{AppContext, AppStore, FileStorage, MemoryStorage, StateStorage};
    pub use warpd_traits::prelude::*;
    pub use warpd_transfer::{TransferForm, TransferOrchestrator, TransferOutcome};
}

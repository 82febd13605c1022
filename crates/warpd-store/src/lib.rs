//! # warpd Store
//!
//! Persisted application store for the warpd cross-chain transfer client.
//!
//! The store owns chain-metadata overrides, route-config overrides, the
//! transfer history, transient UI flags and the current [`AppContext`]
//! bundle. Overrides and transfers are persisted under the `app-state` key
//! of a [`StateStorage`] backend on every change.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use warpd_store::{AppContext, AppStore, ContextBuilder, ContextRequest, MemoryStorage};
//! use warpd_traits::TransferContext;
//!
//! struct NoContext;
//!
//! #[async_trait::async_trait]
//! impl ContextBuilder for NoContext {
//!     async fn build(&self, _request: ContextRequest) -> AppContext {
//!         AppContext::empty()
//!     }
//! }
//!
//! let store = AppStore::new(Arc::new(NoContext), Arc::new(MemoryStorage::new()));
//! let index = store.add_transfer(TransferContext::preparing("sepolia", "fueltestnet", "0xr", "1"));
//! assert_eq!(index, 0);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod context;
pub mod storage;
pub mod store;

pub use context::{AppContext, ContextBuilder, ContextRequest};
pub use storage::{FileStorage, MemoryStorage, StateStorage, StorageError};
pub use store::{AppStore, PERSIST_STATE_KEY, PERSIST_STATE_VERSION};

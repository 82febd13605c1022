//! # warpd Traits
//!
//! Domain types and collaborator traits for the warpd cross-chain transfer
//! client.
//!
//! The client sequences transfers and tracks their status; chain
//! connectivity, route resolution and transaction encoding live behind the
//! traits defined here.
//!
//! ## Collaborator Traits
//!
//! - [`Registry`] / [`RouteConfigSource`] - chain metadata and default routes
//! - [`RouteEngine`] - token routes, destination checks, transaction building
//! - [`AccountsView`] / [`TransactionSender`] - connected wallets
//! - [`AuxChainConnector`] - auxiliary-family chain connectivity
//! - [`Notifier`] - user-visible notices
//!
//! ## Example
//!
//! ```
//! use warpd_traits::prelude::*;
//!
//! let amount = to_base_units("10", 6).unwrap();
//! assert_eq!(amount, 10_000_000);
//! assert_eq!(
//!     TxCategory::Approval.statuses(),
//!     (TransferStatus::SigningApprove, TransferStatus::ConfirmingApprove)
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod accounts;
pub mod auxiliary;
pub mod chain;
pub mod engine;
pub mod notify;
pub mod registry;
pub mod route;
pub mod token;
pub mod transfer;
pub mod tx;

pub use accounts::{AccountsView, TransactionFns, TransactionSender};
pub use auxiliary::{AuxChainClient, AuxChainConnector, AuxNetwork, AuxSigner, AuxWallet};
pub use chain::{to_title_case, ChainMap, ChainMetadata, ChainMetadataOverride, ProtocolType};
pub use engine::{EmptyRouteEngine, RouteEngine, TransferRemoteRequest};
pub use notify::{Notice, NoticeLevel, Notifier, TracingNotifier};
pub use registry::{Registry, RegistryContent, RouteConfigSource};
pub use route::{RouteConfig, TokenConfig, TokenConnectionConfig, TokenStandard};
pub use token::{from_base_units, to_base_units, PrecisionCheck, Token, TokenAmount, TokenConnection};
pub use transfer::{
    StatusUpdate, TransferContext, TransferDetails, TransferStatus, TxCategory,
    FINAL_TRANSFER_STATUSES,
};
pub use tx::{InnerReceipt, PendingTransaction, ReceiptLog, TypedReceipt, WarpTypedTransaction};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        from_base_units, to_base_units, AccountsView, AuxChainConnector, AuxWallet, ChainMap,
        ChainMetadata, ChainMetadataOverride, Notifier, PendingTransaction, ProtocolType,
        Registry, RouteConfig, RouteConfigSource, RouteEngine, StatusUpdate, Token, TokenAmount,
        TransactionFns, TransactionSender, TransferContext, TransferStatus, TxCategory,
        TypedReceipt, WarpTypedTransaction,
    };
    pub use warpd_error::{ErrorKind, Result, WarpError};
}

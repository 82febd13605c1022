//! # warpd Transfer
//!
//! Transfer orchestration for the warpd cross-chain transfer client.
//!
//! [`TransferOrchestrator::execute_transfer`] appends a history entry,
//! checks the route, then signs and confirms each transaction the route
//! engine builds, in order. Every step is mirrored into the store:
//!
//! ```text
//! Preparing -> CreatingTxs -> (SigningApprove -> ConfirmingApprove)?
//!           -> SigningTransfer -> ConfirmingTransfer -> ConfirmedTransfer
//! ```
//!
//! Any failure moves the entry to `Failed` and shows a notice chosen by the
//! error's [`ErrorKind`](warpd_error::ErrorKind). Inconvertible amounts and
//! precision loss cancel the attempt without failing it.

#![forbid(unsafe_code)]

pub mod messages;
pub mod orchestrator;
pub mod receipt;

pub use orchestrator::{TransferForm, TransferOrchestrator, TransferOutcome};
pub use receipt::{try_get_msg_id, DISPATCH_ID_TOPIC};

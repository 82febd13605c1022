//! # warpd Error
//!
//! Unified error types for the warpd cross-chain transfer client.
//!
//! Every failure that can surface while building the transfer context or
//! executing a transfer maps onto one [`WarpError`] variant. Callers that need
//! to react to a *category* of failure (show a chain-mismatch hint, suppress a
//! message after a wallet rejection) match on [`WarpError::kind`] instead of
//! inspecting message text.
//!
//! ## Error Categories
//!
//! - Route and account resolution: [`WarpError::NoRoute`], [`WarpError::NoActiveAccount`]
//! - Destination checks: [`WarpError::InsufficientCollateral`]
//! - Soft aborts: [`WarpError::InconvertibleAmount`], [`WarpError::PrecisionLoss`]
//! - Wallet/chain failures: [`WarpError::ChainMismatch`], [`WarpError::Timeout`],
//!   [`WarpError::WalletRejection`]
//! - Context building: [`WarpError::ContextInit`]
//!
//! ## Example
//!
//! ```
//! use warpd_error::{ErrorKind, WarpError, Result};
//!
//! fn find_route(found: bool) -> Result<()> {
//!     if !found {
//!         return Err(WarpError::NoRoute {
//!             origin: "ethereum".into(),
//!             destination: "fueltestnet".into(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! assert_eq!(find_route(false).unwrap_err().kind(), ErrorKind::NoRoute);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use thiserror::Error;

/// The main error type for warpd operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WarpError {
    // ============ Route Errors ============
    /// No token route exists between the requested chains
    #[error("No token route found between chains {origin} and {destination}")]
    NoRoute {
        /// Origin chain name
        origin: String,
        /// Destination chain name
        destination: String,
    },

    /// No connected account can sign on the origin chain
    #[error("No active account found for origin chain {0}")]
    NoActiveAccount(String),

    /// Destination router does not hold enough collateral
    #[error("Insufficient destination collateral on {destination}")]
    InsufficientCollateral {
        /// Destination chain name
        destination: String,
    },

    // ============ Soft Aborts ============
    /// Amount cannot be represented on the destination token
    #[error("Amount {amount} cannot be converted to the destination token")]
    InconvertibleAmount {
        /// Amount in origin base units
        amount: u128,
    },

    /// Amount would lose precision when bridged
    #[error("Transfer would lose {remainder} base units of precision (decimal difference {decimal_diff})")]
    PrecisionLoss {
        /// Base units that would be dropped
        remainder: u128,
        /// Decimal places between origin and destination representations
        decimal_diff: i32,
    },

    // ============ Wallet / Chain Errors ============
    /// Wallet is connected to a different chain than the origin
    #[error("Wallet connected to wrong chain: expected {expected}, got {actual}")]
    ChainMismatch {
        /// Chain the transaction targets
        expected: String,
        /// Chain the wallet is on
        actual: String,
    },

    /// Transaction confirmation timed out
    #[error("Transaction timed out: {0}")]
    Timeout(String),

    /// Wallet user rejected the signature request
    #[error("Wallet rejected the transaction: {0}")]
    WalletRejection(String),

    /// Signing or submission failed for another reason
    #[error("Transaction failed: {0}")]
    Transfer(String),

    // ============ Context Errors ============
    /// Context (provider + route engine) could not be built
    #[error("Context initialization failed: {0}")]
    ContextInit(String),

    /// Registry lookup failed
    #[error("Registry error: {0}")]
    Registry(String),

    /// Provider construction or lookup failed
    #[error("Provider error: {0}")]
    Provider(String),

    // ============ Parsing / IO ============
    /// Invalid human-readable amount
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Persisted state could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON encode/decode error
    #[error("JSON error: {0}")]
    Json(String),
}

/// Convenient Result type using WarpError
pub type Result<T> = std::result::Result<T, WarpError>;

/// Structured classification of a [`WarpError`].
///
/// Collaborators attach the kind at the throw site by choosing the variant;
/// user-facing code branches on the kind only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`WarpError::NoRoute`]
    NoRoute,
    /// See [`WarpError::NoActiveAccount`]
    NoActiveAccount,
    /// See [`WarpError::InsufficientCollateral`]
    InsufficientCollateral,
    /// See [`WarpError::InconvertibleAmount`]
    InconvertibleAmount,
    /// See [`WarpError::PrecisionLoss`]
    PrecisionLoss,
    /// See [`WarpError::ChainMismatch`]
    ChainMismatch,
    /// See [`WarpError::Timeout`]
    Timeout,
    /// See [`WarpError::WalletRejection`]
    WalletRejection,
    /// See [`WarpError::ContextInit`]
    ContextInit,
    /// Anything else raised while transferring
    Transfer,
}

// ============ From implementations for common error types ============

impl From<std::io::Error> for WarpError {
    fn from(err: std::io::Error) -> Self {
        WarpError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for WarpError {
    fn from(err: serde_json::Error) -> Self {
        WarpError::Json(err.to_string())
    }
}

impl WarpError {
    /// Returns the structured kind used for user-facing classification
    pub fn kind(&self) -> ErrorKind {
        match self {
            WarpError::NoRoute { .. } => ErrorKind::NoRoute,
            WarpError::NoActiveAccount(_) => ErrorKind::NoActiveAccount,
            WarpError::InsufficientCollateral { .. } => ErrorKind::InsufficientCollateral,
            WarpError::InconvertibleAmount { .. } => ErrorKind::InconvertibleAmount,
            WarpError::PrecisionLoss { .. } => ErrorKind::PrecisionLoss,
            WarpError::ChainMismatch { .. } => ErrorKind::ChainMismatch,
            WarpError::Timeout(_) => ErrorKind::Timeout,
            WarpError::WalletRejection(_) => ErrorKind::WalletRejection,
            WarpError::ContextInit(_) | WarpError::Registry(_) | WarpError::Provider(_) => {
                ErrorKind::ContextInit
            }
            _ => ErrorKind::Transfer,
        }
    }

    /// Returns true for aborts that ask the user to reconsider rather than
    /// marking the attempt as failed
    pub fn is_soft(&self) -> bool {
        matches!(
            self,
            WarpError::InconvertibleAmount { .. } | WarpError::PrecisionLoss { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WarpError::NoRoute {
            origin: "ethereum".to_string(),
            destination: "fueltestnet".to_string(),
        };
        assert!(err.to_string().contains("ethereum"));
        assert!(err.to_string().contains("fueltestnet"));
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(
            WarpError::Timeout("block height exceeded".into()).kind(),
            ErrorKind::Timeout
        );
        assert_eq!(
            WarpError::WalletRejection("user closed popup".into()).kind(),
            ErrorKind::WalletRejection
        );
        assert_eq!(
            WarpError::Registry("offline".into()).kind(),
            ErrorKind::ContextInit
        );
        assert_eq!(
            WarpError::InvalidAmount("abc".into()).kind(),
            ErrorKind::Transfer
        );
    }

    #[test]
    fn test_soft_errors() {
        assert!(WarpError::InconvertibleAmount { amount: 1 }.is_soft());
        assert!(WarpError::PrecisionLoss {
            remainder: 5,
            decimal_diff: 9
        }
        .is_soft());
        assert!(!WarpError::Timeout("slow".into()).is_soft());
    }
}

//! User-facing transfer notices

use warpd_error::{ErrorKind, WarpError};
use warpd_traits::TransferStatus;

/// Shown when the destination router cannot cover the amount
pub const INSUFFICIENT_COLLATERAL: &str = "Insufficient collateral on destination for transfer";

/// Shown when an auxiliary chain is involved but its wallet is not connected
pub const AUX_WALLET_REQUIRED: &str = "Fuel Wallet connection is required to check if the selected amount can be converted without precision loss. We recommend connecting wallet before proceeding.";

/// Shown when the destination token cannot represent the amount
pub const INCONVERTIBLE_AMOUNT: &str =
    "Selected amount cannot be converted to the destination token.";

/// Shown when the wallet is on a different chain than the origin
pub const CHAIN_MISMATCH: &str = "Wallet must be connected to origin chain";

/// Fallback when the failing status has no message of its own
pub const GENERIC_FAILURE: &str = "Unable to transfer tokens.";

pub fn precision_loss(loss: &str, symbol: &str, decimal_diff: i32) -> String {
    format!(
        "Proceeding with this transfer will result in a precision loss of {} {}. \
         We recommend cancelling this transaction and choosing a different amount \
         (considering decimal difference of {}) to send",
        loss, symbol, decimal_diff
    )
}

pub fn timed_out(chain_display_name: &str) -> String {
    format!(
        "Transaction timed out, {} may be busy. Please try again.",
        chain_display_name
    )
}

/// Notice for a transfer that failed at `status`.
///
/// Returns `None` for wallet rejections; the wallet has already told the
/// user.
pub fn failure_message(
    error: &WarpError,
    status: TransferStatus,
    origin_display_name: &str,
) -> Option<String> {
    match error.kind() {
        ErrorKind::ChainMismatch => Some(CHAIN_MISMATCH.to_string()),
        ErrorKind::Timeout => Some(timed_out(origin_display_name)),
        ErrorKind::WalletRejection => None,
        _ => Some(
            status
                .default_error_message()
                .unwrap_or(GENERIC_FAILURE)
                .to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classified_messages() {
        let mismatch = WarpError::ChainMismatch {
            expected: "sepolia".into(),
            actual: "arbitrumsepolia".into(),
        };
        assert_eq!(
            failure_message(&mismatch, TransferStatus::SigningTransfer, "Sepolia").as_deref(),
            Some(CHAIN_MISMATCH)
        );

        let timeout = WarpError::Timeout("block height exceeded".into());
        assert_eq!(
            failure_message(&timeout, TransferStatus::ConfirmingTransfer, "Sepolia").unwrap(),
            "Transaction timed out, Sepolia may be busy. Please try again."
        );

        let rejected = WarpError::WalletRejection("user rejected the transaction".into());
        assert_eq!(failure_message(&rejected, TransferStatus::SigningApprove, "Fuel"), None);
    }

    #[test]
    fn test_status_defaults_and_fallback() {
        let err = WarpError::Transfer("boom".into());
        assert_eq!(
            failure_message(&err, TransferStatus::CreatingTxs, "Sepolia").as_deref(),
            Some("Error while creating the transactions.")
        );
        assert_eq!(
            failure_message(&err, TransferStatus::Failed, "Sepolia").as_deref(),
            Some(GENERIC_FAILURE)
        );
    }

    #[test]
    fn test_precision_loss_text() {
        let msg = precision_loss("0.000000001", "ETH", 9);
        assert!(msg.starts_with("Proceeding with this transfer will result in a precision loss of 0.000000001 ETH."));
        assert!(msg.contains("(considering decimal difference of 9)"));
    }
}

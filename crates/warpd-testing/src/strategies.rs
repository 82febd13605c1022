//! Property-test strategies

use proptest::prelude::*;
use warpd_traits::{StatusUpdate, TransferStatus};

/// Any transfer status
pub fn transfer_status() -> impl Strategy<Value = TransferStatus> {
    prop_oneof![
        Just(TransferStatus::Preparing),
        Just(TransferStatus::CreatingTxs),
        Just(TransferStatus::SigningApprove),
        Just(TransferStatus::ConfirmingApprove),
        Just(TransferStatus::SigningTransfer),
        Just(TransferStatus::ConfirmingTransfer),
        Just(TransferStatus::ConfirmedTransfer),
        Just(TransferStatus::Failed),
    ]
}

/// Optional id: absent, empty, or a hex-like value
pub fn optional_id() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        "0x[0-9a-f]{8}".prop_map(Some),
    ]
}

/// A status with an update payload
pub fn status_update() -> impl Strategy<Value = (TransferStatus, StatusUpdate)> {
    (transfer_status(), optional_id(), optional_id()).prop_map(|(status, msg_id, origin_tx_hash)| {
        (
            status,
            StatusUpdate {
                msg_id,
                origin_tx_hash,
            },
        )
    })
}

/// Sequence of status updates
pub fn status_updates(max_len: usize) -> impl Strategy<Value = Vec<(TransferStatus, StatusUpdate)>> {
    prop::collection::vec(status_update(), 0..max_len)
}

/// Human-readable decimal amount with up to `decimals` fraction digits
pub fn human_amount(decimals: u8) -> impl Strategy<Value = String> {
    let max_fraction = decimals as usize;
    (0u64..1_000_000, prop::collection::vec(0u8..10, 0..=max_fraction)).prop_map(
        |(whole, fraction)| {
            if fraction.is_empty() {
                whole.to_string()
            } else {
                let digits: String = fraction.iter().map(|d| char::from(b'0' + d)).collect();
                format!("{}.{}", whole, digits)
            }
        },
    )
}

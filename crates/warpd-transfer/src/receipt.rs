//! Message-id extraction from confirmation receipts

use warpd_traits::{ProtocolType, TypedReceipt};

/// topic0 of the mailbox `DispatchId(bytes32 indexed messageId)` event
pub const DISPATCH_ID_TOPIC: &str =
    "0x788dbc1b7152732178210e7f4d9d010ef016f9eafbe66786bd7169f56e0c353a";

/// Cross-chain message id dispatched by the transaction, if it can be found.
///
/// Only EVM receipts carry the dispatch log; other protocols yield `None`.
pub fn try_get_msg_id(receipt: &TypedReceipt) -> Option<String> {
    if receipt.protocol != ProtocolType::Ethereum {
        return None;
    }
    receipt
        .logs
        .iter()
        .find(|log| {
            log.topics
                .first()
                .is_some_and(|t| t.eq_ignore_ascii_case(DISPATCH_ID_TOPIC))
        })
        .and_then(|log| log.topics.get(1).cloned())
}

//! Route engine collaborator

use crate::token::{PrecisionCheck, Token, TokenAmount};
use crate::tx::WarpTypedTransaction;
use async_trait::async_trait;
use warpd_error::{Result, WarpError};

/// Parameters for building the transactions of one transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRemoteRequest {
    /// Amount of the origin token
    pub amount: TokenAmount,
    /// Destination chain name
    pub destination: String,
    /// Sender on the origin chain
    pub sender: String,
    /// Recipient on the destination chain
    pub recipient: String,
}

/// Token-route engine built from a route configuration and a provider.
///
/// Every query that may touch the network is async.
#[async_trait]
pub trait RouteEngine: Send + Sync {
    /// Tokens known to the engine, in route-config order
    fn tokens(&self) -> &[Token];

    /// Token at `index` of [`tokens`](RouteEngine::tokens)
    fn token_by_index(&self, index: usize) -> Option<&Token> {
        self.tokens().get(index)
    }

    /// Returns true if the destination router holds enough collateral
    async fn is_destination_collateral_sufficient(
        &self,
        amount: &TokenAmount,
        destination: &str,
    ) -> Result<bool>;

    /// Returns true if `amount` can be represented by the destination token
    async fn is_amount_convertible(&self, amount: &TokenAmount, destination: &str)
        -> Result<bool>;

    /// Computes the base units that bridging `amount` would drop
    async fn precision_loss(
        &self,
        amount: &TokenAmount,
        destination: &str,
    ) -> Result<PrecisionCheck>;

    /// Ordered transactions needed to complete the transfer
    async fn transfer_remote_txs(
        &self,
        request: &TransferRemoteRequest,
    ) -> Result<Vec<WarpTypedTransaction>>;
}

/// Engine with no tokens, used when no context could be built
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyRouteEngine;

fn not_initialized() -> WarpError {
    WarpError::ContextInit("route engine not initialized".into())
}

#[async_trait]
impl RouteEngine for EmptyRouteEngine {
    fn tokens(&self) -> &[Token] {
        &[]
    }

    async fn is_destination_collateral_sufficient(
        &self,
        _amount: &TokenAmount,
        _destination: &str,
    ) -> Result<bool> {
        Err(not_initialized())
    }

    async fn is_amount_convertible(
        &self,
        _amount: &TokenAmount,
        _destination: &str,
    ) -> Result<bool> {
        Err(not_initialized())
    }

    async fn precision_loss(
        &self,
        _amount: &TokenAmount,
        _destination: &str,
    ) -> Result<PrecisionCheck> {
        Err(not_initialized())
    }

    async fn transfer_remote_txs(
        &self,
        _request: &TransferRemoteRequest,
    ) -> Result<Vec<WarpTypedTransaction>> {
        Err(not_initialized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_engine_has_no_tokens() {
        let engine = EmptyRouteEngine;
        assert!(engine.tokens().is_empty());
        assert!(engine.token_by_index(0).is_none());
    }
}

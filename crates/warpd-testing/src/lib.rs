//! # warpd Testing Infrastructure
//!
//! Fakes for every collaborator trait plus property-test strategies:
//! - Registry, route-config source, route engine and engine factory fakes
//! - Scriptable transaction sender and static account view
//! - Auxiliary-chain connector
//! - Recording notifier
//!
//! ## Usage
//!
//! ```rust,ignore
//! use warpd_testing::*;
//!
//! let sender = MockSender::scripted([
//!     SendOutcome::confirm("0xapprove", ProtocolType::Ethereum),
//!     SendOutcome::FailConfirm {
//!         hash: "0xtransfer".into(),
//!         error: WarpError::Timeout("block not mined".into()),
//!     },
//! ]);
//!
//! proptest! {
//!     #[test]
//!     fn test_updates(updates in status_updates(16)) {
//!         // ...
//!     }
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod engine;
pub mod fixtures;
pub mod notifier;
pub mod registry;
pub mod strategies;
pub mod wallet;

pub use engine::{tokens_from_config, EngineCall, FactoryCall, MockEngineFactory, MockRouteEngine};
pub use fixtures::*;
pub use notifier::RecordingNotifier;
pub use registry::{MockRegistry, MockRouteSource};
pub use strategies::*;
pub use wallet::{
    MockAccounts, MockAuxClient, MockAuxConnector, MockAuxSigner, MockSender, SendOutcome,
    SentTransaction,
};

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use warpd_error::{ErrorKind, WarpError};
    use warpd_provider::MultiProtocolProvider;
    use warpd_traits::{
        ChainMap, ProtocolType, Registry, RouteEngine, TransactionSender, TxCategory,
        WarpTypedTransaction,
    };

    fn provider() -> MultiProtocolProvider {
        let mut chains = ChainMap::new();
        for chain in [sepolia(), fueltestnet()] {
            chains.insert(chain.name.clone(), chain);
        }
        MultiProtocolProvider::new(chains).unwrap()
    }

    #[test]
    fn test_tokens_from_config_resolves_connections() {
        let tokens = tokens_from_config(&fuel_route(), &provider()).unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].protocol, ProtocolType::Ethereum);
        let conn = tokens[0].connection_for_chain("fueltestnet").unwrap();
        assert_eq!(conn.token.protocol, ProtocolType::Fuel);
        assert_eq!(conn.token.decimals, 9);
    }

    #[test]
    fn test_tokens_from_config_unknown_chain() {
        let err = tokens_from_config(&evm_route(), &provider()).unwrap_err();
        assert!(matches!(err, WarpError::Provider(_)));
    }

    #[tokio::test]
    async fn test_registry_listing_failures() {
        let registry = MockRegistry::new().with_chain(sepolia()).failing_listings(1);
        assert!(registry.list_registry_content().await.is_err());
        let content = registry.list_registry_content().await.unwrap();
        assert!(content.contains("sepolia"));
        assert_eq!(registry.list_calls(), 2);
    }

    #[tokio::test]
    async fn test_sender_plays_script_then_defaults() {
        let sender = MockSender::scripted([SendOutcome::Reject(WarpError::WalletRejection(
            "denied".into(),
        ))]);
        let tx = WarpTypedTransaction::new(TxCategory::Transfer, ProtocolType::Ethereum);

        let err = sender.send_transaction(&tx, "sepolia", None).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WalletRejection);

        let pending = sender.send_transaction(&tx, "sepolia", None).await.unwrap();
        assert_eq!(pending.hash(), "0xtx2");
        assert!(pending.confirm().await.is_ok());
        assert_eq!(sender.sent().len(), 2);
    }

    #[tokio::test]
    async fn test_engine_records_calls() {
        let engine = MockRouteEngine::from_route_config(&fuel_route(), &provider())
            .unwrap()
            .with_collateral(false);
        let amount = engine.tokens()[0].amount(5);
        assert!(!engine
            .is_destination_collateral_sufficient(&amount, "fueltestnet")
            .await
            .unwrap());
        assert!(!engine.built_txs());
        assert_eq!(engine.calls().len(), 1);
    }

    proptest! {
        #[test]
        fn test_human_amount_parses(amount in human_amount(6)) {
            prop_assert!(warpd_traits::to_base_units(&amount, 6).is_ok());
        }
    }
}

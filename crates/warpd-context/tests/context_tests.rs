//! Context initialization and wallet-reactor behaviour against fakes

use std::sync::Arc;
use std::time::Duration;
use warpd_context::{
    ChainIdNetworks, ChangeDetection, ContextInitializer, WalletReactor, WatchWalletSource,
    CONTEXT_INIT_ERROR,
};
use warpd_resilience::BackoffConfig;
use warpd_store::{AppStore, ContextRequest, MemoryStorage};
use warpd_testing::{
    arbitrum_sepolia, fuel_route, fueltestnet, sepolia, FactoryCall, MockAuxConnector,
    MockEngineFactory, MockRegistry, MockRouteSource, RecordingNotifier,
};
use warpd_traits::{AuxWallet, ChainMap, ChainMetadataOverride};

fn fast_backoff() -> BackoffConfig {
    BackoffConfig::new()
        .with_initial_delay(Duration::from_millis(1))
        .with_jitter(0.0)
        .with_max_attempts(3)
}

fn full_registry() -> MockRegistry {
    MockRegistry::new()
        .with_chain(sepolia())
        .with_chain(fueltestnet())
        .with_chain(arbitrum_sepolia())
}

struct Harness {
    initializer: Arc<ContextInitializer>,
    factory: Arc<MockEngineFactory>,
    connector: Arc<MockAuxConnector>,
    notifier: Arc<RecordingNotifier>,
}

fn harness_with(registry: MockRegistry, connector: MockAuxConnector) -> Harness {
    let factory = Arc::new(MockEngineFactory::new());
    let connector = Arc::new(connector);
    let notifier = Arc::new(RecordingNotifier::new());
    let initializer = ContextInitializer::new(
        Arc::new(registry),
        Arc::new(MockRouteSource::new(fuel_route())),
        factory.clone(),
    )
    .with_aux_connector(connector.clone())
    .with_notifier(notifier.clone())
    .with_backoff(fast_backoff());
    Harness {
        initializer: Arc::new(initializer),
        factory,
        connector,
        notifier,
    }
}

fn harness() -> Harness {
    harness_with(full_registry(), MockAuxConnector::new())
}

fn fuel_wallet() -> AuxWallet {
    AuxWallet::unlocked("0xfuelwallet").on_network(0, "https://testnet.fuel.network/v1/graphql")
}

// ============================================================================
// Initializer
// ============================================================================

mod initializer {
    use super::*;

    #[tokio::test]
    async fn test_metadata_limited_to_referenced_chains() {
        let h = harness();
        let mut overrides = ChainMap::new();
        overrides.insert(
            "arbitrumsepolia".to_string(),
            ChainMetadataOverride {
                display_name: Some("Arb".into()),
                ..Default::default()
            },
        );
        let request = ContextRequest {
            chain_metadata_overrides: overrides,
            ..Default::default()
        };

        let context = h.initializer.try_init(&request).await.unwrap();

        let chains: Vec<_> = context.chain_metadata.keys().cloned().collect();
        assert_eq!(chains, vec!["fueltestnet", "sepolia"]);
        assert!(context.has_aux_chain);
        assert_eq!(context.route_engine.tokens().len(), 2);
    }

    #[tokio::test]
    async fn test_standard_factory_without_wallet() {
        let h = harness();

        h.initializer.try_init(&ContextRequest::default()).await.unwrap();

        assert_eq!(
            h.factory.calls(),
            vec![FactoryCall {
                tokens: 2,
                aux_chain: None
            }]
        );
        assert_eq!(h.connector.connects(), 0);
    }

    #[tokio::test]
    async fn test_unlocked_wallet_attaches_signer() {
        let h = harness();
        let request = ContextRequest {
            aux_wallet: Some(fuel_wallet()),
            ..Default::default()
        };

        let context = h.initializer.try_init(&request).await.unwrap();

        let signer = context.provider.aux_signer("fueltestnet").unwrap();
        assert_eq!(signer.address(), "0xfuelwallet");
        assert_eq!(
            h.factory.calls()[0].aux_chain.as_deref(),
            Some("fueltestnet")
        );
    }

    #[tokio::test]
    async fn test_locked_wallet_uses_standard_factory() {
        let h = harness();
        let request = ContextRequest {
            aux_wallet: Some(AuxWallet {
                unlocked: false,
                ..fuel_wallet()
            }),
            ..Default::default()
        };

        let context = h.initializer.try_init(&request).await.unwrap();

        assert!(context.provider.aux_signer("fueltestnet").is_none());
        assert_eq!(h.factory.calls()[0].aux_chain, None);
    }

    #[tokio::test]
    async fn test_unreachable_aux_node_falls_back() {
        let h = harness_with(full_registry(), MockAuxConnector::unreachable());
        let request = ContextRequest {
            aux_wallet: Some(fuel_wallet()),
            ..Default::default()
        };

        h.initializer.try_init(&request).await.unwrap();

        assert_eq!(h.connector.connects(), 1);
        assert_eq!(h.factory.calls()[0].aux_chain, None);
    }

    #[tokio::test]
    async fn test_registry_listing_retried() {
        let h = harness_with(full_registry().failing_listings(2), MockAuxConnector::new());

        let context = h.initializer.init(&ContextRequest::default()).await;

        assert_eq!(context.chain_metadata.len(), 2);
        assert!(h.notifier.errors().is_empty());
    }

    #[tokio::test]
    async fn test_failure_returns_empty_context_and_notifies() {
        let h = harness_with(full_registry().failing_listings(10), MockAuxConnector::new());

        assert!(h.initializer.try_init(&ContextRequest::default()).await.is_err());
        let context = h.initializer.init(&ContextRequest::default()).await;

        assert!(context.chain_metadata.is_empty());
        assert!(context.route_engine.tokens().is_empty());
        assert!(!context.has_aux_chain);
        assert_eq!(h.notifier.errors(), vec![CONTEXT_INIT_ERROR.to_string()]);
    }

    #[tokio::test]
    async fn test_missing_chain_is_absorbed() {
        let registry = MockRegistry::new().with_chain(sepolia());
        let h = harness_with(registry, MockAuxConnector::new());

        let context = h.initializer.init(&ContextRequest::default()).await;

        assert!(context.chain_metadata.is_empty());
        assert_eq!(h.notifier.errors().len(), 1);
        assert!(h.factory.calls().is_empty());
    }

    #[tokio::test]
    async fn test_route_source_failure_is_absorbed() {
        let notifier = Arc::new(RecordingNotifier::new());
        let initializer = ContextInitializer::new(
            Arc::new(full_registry()),
            Arc::new(MockRouteSource::failing()),
            Arc::new(MockEngineFactory::new()),
        )
        .with_notifier(notifier.clone());

        let context = initializer.init(&ContextRequest::default()).await;

        assert!(context.route_engine.tokens().is_empty());
        assert_eq!(notifier.errors().len(), 1);
    }
}

// ============================================================================
// Reactor
// ============================================================================

mod reactor {
    use super::*;

    async fn hydrated_store(initializer: Arc<ContextInitializer>) -> Arc<AppStore> {
        Arc::new(AppStore::hydrate(initializer, Arc::new(MemoryStorage::new())).await)
    }

    #[tokio::test]
    async fn test_rebuilds_once_per_transition() {
        let h = harness();
        let store = hydrated_store(h.initializer.clone()).await;
        let metadata_before = store.chain_metadata();
        let mut reactor = WalletReactor::new(h.initializer.clone(), store.clone());

        assert!(!reactor.handle(None).await);
        assert!(reactor.handle(Some(&fuel_wallet())).await);
        assert!(!reactor.handle(Some(&fuel_wallet())).await);

        assert!(store.provider().aux_signer("fueltestnet").is_some());
        assert_eq!(store.chain_metadata(), metadata_before);
        assert_eq!(h.factory.calls().len(), 2);

        assert!(reactor.handle(None).await);
        assert!(store.provider().aux_signer("fueltestnet").is_none());
        assert_eq!(h.factory.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_unlocking_connected_wallet_attaches_signer() {
        let h = harness();
        let store = hydrated_store(h.initializer.clone()).await;
        let mut reactor = WalletReactor::new(h.initializer.clone(), store.clone());
        let locked = AuxWallet {
            unlocked: false,
            ..fuel_wallet()
        };

        assert!(reactor.handle(Some(&locked)).await);
        assert_eq!(h.factory.calls().last().unwrap().aux_chain, None);
        assert!(store.provider().aux_signer("fueltestnet").is_none());

        assert!(reactor.handle(Some(&fuel_wallet())).await);
        assert_eq!(
            h.factory.calls().last().unwrap().aux_chain.as_deref(),
            Some("fueltestnet")
        );
        assert!(store.provider().aux_signer("fueltestnet").is_some());
        assert_eq!(h.connector.connects(), 1);

        // Locking again drops back to the standard engine.
        assert!(reactor.handle(Some(&locked)).await);
        assert!(store.provider().aux_signer("fueltestnet").is_none());
    }

    #[tokio::test]
    async fn test_failed_rebuild_keeps_previous_context() {
        let good = harness();
        let store = hydrated_store(good.initializer.clone()).await;
        assert_eq!(store.route_engine().tokens().len(), 2);

        let broken = harness_with(MockRegistry::new().failing_listings(100), MockAuxConnector::new());
        let mut reactor = WalletReactor::new(broken.initializer.clone(), store.clone());

        assert!(reactor.handle(Some(&fuel_wallet())).await);
        assert_eq!(store.route_engine().tokens().len(), 2);
        assert!(store.has_aux_chain());

        // The transition is still recorded.
        assert!(!reactor.handle(Some(&fuel_wallet())).await);
        // The reactor logs; it does not notify.
        assert!(broken.notifier.errors().is_empty());
    }

    #[tokio::test]
    async fn test_network_detection_resolves_chain() {
        let h = harness();
        let store = hydrated_store(h.initializer.clone()).await;
        let mut reactor = WalletReactor::new(h.initializer.clone(), store)
            .with_detection(ChangeDetection::Network)
            .with_resolver(Arc::new(ChainIdNetworks::fuel()));

        let mainnet = AuxWallet::unlocked("0xfuelwallet").on_network(9889, "https://mainnet.fuel.network");
        assert!(reactor.handle(Some(&mainnet)).await);
        // fuelignition is not part of the route, so no signer is attached.
        assert_eq!(h.factory.calls().last().unwrap().aux_chain, None);

        assert!(reactor.handle(Some(&fuel_wallet())).await);
        assert_eq!(
            h.factory.calls().last().unwrap().aux_chain.as_deref(),
            Some("fueltestnet")
        );
    }

    #[tokio::test]
    async fn test_spawned_reactor_follows_watch_channel() {
        let h = harness();
        let store = hydrated_store(h.initializer.clone()).await;
        let mut revisions = store.subscribe();

        let (wallet_tx, wallet_rx) = tokio::sync::watch::channel(None);
        let handle = WalletReactor::new(h.initializer.clone(), store.clone())
            .spawn(WatchWalletSource::new(wallet_rx));

        wallet_tx.send(Some(fuel_wallet())).unwrap();
        tokio::time::timeout(Duration::from_secs(5), revisions.changed())
            .await
            .unwrap()
            .unwrap();
        assert!(store.provider().aux_signer("fueltestnet").is_some());

        drop(wallet_tx);
        handle.await.unwrap();
    }
}

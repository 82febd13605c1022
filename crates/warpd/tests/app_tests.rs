//! End-to-end wiring of the client against fakes

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use warpd::prelude::*;
use warpd::store::PERSIST_STATE_KEY;
use warpd_testing::{
    fuel_route, fueltestnet, sepolia, FactoryCall, MockAccounts, MockAuxConnector,
    MockEngineFactory, MockRegistry, MockRouteSource, MockSender, RecordingNotifier,
};

struct Fakes {
    factory: Arc<MockEngineFactory>,
    sender: Arc<MockSender>,
    notifier: Arc<RecordingNotifier>,
}

fn wire(aux: bool) -> (Collaborators, Fakes) {
    let factory = Arc::new(MockEngineFactory::new());
    let sender = Arc::new(MockSender::new());
    let notifier = Arc::new(RecordingNotifier::new());

    let mut tx_fns = TransactionFns::new();
    tx_fns.insert(ProtocolType::Ethereum, sender.clone());

    let mut collaborators = Collaborators::new(
        Arc::new(MockRegistry::new().with_chain(sepolia()).with_chain(fueltestnet())),
        Arc::new(MockRouteSource::new(fuel_route())),
        factory.clone(),
        Arc::new(
            MockAccounts::new()
                .with_account("sepolia", "0xsender")
                .with_aux_connected(true),
        ),
        tx_fns,
    );
    collaborators.notifier = notifier.clone();
    if aux {
        collaborators.aux_connector = Some(Arc::new(MockAuxConnector::new()));
    }

    (
        collaborators,
        Fakes {
            factory,
            sender,
            notifier,
        },
    )
}

fn config(dir: &std::path::Path) -> WarpdConfig {
    WarpdConfig {
        storage_dir: dir.to_path_buf(),
        registry_backoff_attempts: 1,
        ..Default::default()
    }
}

fn form(amount: &str) -> TransferForm {
    TransferForm {
        origin: "sepolia".into(),
        destination: "fueltestnet".into(),
        token_index: 0,
        amount: amount.into(),
        recipient: "0xrecipient".into(),
    }
}

#[tokio::test]
async fn test_start_builds_context() {
    let dir = tempfile::tempdir().unwrap();
    let (collaborators, fakes) = wire(false);

    let app = WarpApp::start(config(dir.path()), collaborators).await.unwrap();

    let context = app.store().context();
    assert!(context.has_aux_chain);
    assert_eq!(context.route_engine.tokens().len(), 2);
    assert_eq!(
        fakes.factory.calls(),
        vec![FactoryCall {
            tokens: 2,
            aux_chain: None
        }]
    );
}

#[tokio::test]
async fn test_start_rejects_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let (collaborators, fakes) = wire(false);
    let config = WarpdConfig {
        aux_chain: String::new(),
        ..config(dir.path())
    };

    let result = WarpApp::start(config, collaborators).await;

    assert!(matches!(result, Err(WarpError::Config(_))));
    assert!(fakes.factory.calls().is_empty());
}

#[tokio::test]
async fn test_transfer_persists_across_restart() {
    let dir = tempfile::tempdir().unwrap();

    let (collaborators, fakes) = wire(false);
    let app = WarpApp::start(config(dir.path()), collaborators).await.unwrap();
    let outcome = app.execute_transfer(&form("1")).await;

    assert!(outcome.is_confirmed(), "{:?}", outcome);
    assert_eq!(fakes.sender.sent().len(), 1);
    assert_eq!(fakes.notifier.successes().len(), 1);
    assert!(!app.store().transfer_loading());
    assert!(dir.path().join(format!("{}.json", PERSIST_STATE_KEY)).exists());
    drop(app);

    let (collaborators, _) = wire(false);
    let restarted = WarpApp::start(config(dir.path()), collaborators).await.unwrap();
    let transfers = restarted.store().transfers();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].status, TransferStatus::ConfirmedTransfer);
    assert_eq!(transfers[0].sender.as_deref(), Some("0xsender"));
}

#[tokio::test]
async fn test_wallet_reactor_attaches_aux_signer() {
    let dir = tempfile::tempdir().unwrap();
    let (collaborators, fakes) = wire(true);
    let app = WarpApp::start(config(dir.path()), collaborators).await.unwrap();
    let mut revisions = app.store().subscribe();

    let (tx, rx) = watch::channel(None);
    let handle = app.spawn_wallet_reactor(rx, ChangeDetection::Presence);

    tx.send(Some(
        AuxWallet::unlocked("0xfuelwallet").on_network(0, "https://testnet.fuel.network/v1/graphql"),
    ))
    .unwrap();

    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            revisions.changed().await.unwrap();
            let built_with_aux = fakes
                .factory
                .calls()
                .iter()
                .any(|c| c.aux_chain.as_deref() == Some("fueltestnet"));
            if built_with_aux {
                break;
            }
        }
    })
    .await
    .unwrap();

    drop(tx);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_registry_built_from_configured_location() {
    let dir = tempfile::tempdir().unwrap();
    let config = WarpdConfig {
        registry_branch: Some("staging".into()),
        ..config(dir.path())
    };
    let mut seen = None;

    let collaborators = Collaborators::from_config(
        &config,
        |location| {
            seen = Some(location.clone());
            let registry: Arc<dyn Registry> =
                Arc::new(MockRegistry::new().with_chain(sepolia()).with_chain(fueltestnet()));
            Ok(registry)
        },
        Arc::new(MockRouteSource::new(fuel_route())),
        Arc::new(MockEngineFactory::new()),
        Arc::new(MockAccounts::new()),
        TransactionFns::new(),
    )
    .unwrap();
    let app = WarpApp::start(config, collaborators).await.unwrap();

    let location = seen.unwrap();
    assert_eq!(location.url.as_str(), warpd::config::DEFAULT_REGISTRY_URL);
    assert_eq!(location.branch.as_deref(), Some("staging"));
    assert!(app.store().has_aux_chain());
}

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Result, bail};
use async_trait::async_trait;

use client_gateway_core::{MockGateway, Operation, UserId};
use leaderboard_client::{Client, Frontend};
use runtime::{Intent, Runtime, RuntimeConfig, RuntimeHandle, SyncState};

fn runtime_for(gateway: &MockGateway) -> Runtime {
    Runtime::builder()
        .gateway(Arc::new(gateway.clone()))
        .build()
        .expect("runtime should build")
}

/// Waits for the first fully loaded snapshot, records it and quits.
struct LoadThenQuit {
    seen: Arc<Mutex<Option<SyncState>>>,
}

#[async_trait]
impl Frontend for LoadThenQuit {
    async fn run(&mut self, handle: RuntimeHandle) -> Result<()> {
        let mut watch = handle.watch();
        let state = watch
            .wait_for(|state| !state.users.is_empty() && state.history.total > 0)
            .await?
            .clone();
        *self.seen.lock().unwrap() = Some(state);
        Ok(())
    }
}

struct QuitImmediately;

#[async_trait]
impl Frontend for QuitImmediately {
    async fn run(&mut self, _handle: RuntimeHandle) -> Result<()> {
        Ok(())
    }
}

/// Starts a claim and quits while it is still in flight.
struct ClaimThenQuit;

#[async_trait]
impl Frontend for ClaimThenQuit {
    async fn run(&mut self, handle: RuntimeHandle) -> Result<()> {
        handle.select(Some(UserId::from("u1"))).await?;
        handle.submit(Intent::Claim)?;
        handle.watch().wait_for(|state| state.is_claiming()).await?;
        Ok(())
    }
}

struct Crashes;

#[async_trait]
impl Frontend for Crashes {
    async fn run(&mut self, _handle: RuntimeHandle) -> Result<()> {
        bail!("terminal went away")
    }
}

#[tokio::test]
async fn run_loads_initial_views_before_frontend_sees_them() {
    let gateway = MockGateway::new()
        .with_users([("Ada", 3), ("Bo", 1)])
        .with_claims("u1", &[3])
        .with_claims("u2", &[1]);
    let seen = Arc::new(Mutex::new(None));

    let client = Client::builder()
        .runtime(runtime_for(&gateway))
        .frontend(LoadThenQuit { seen: seen.clone() })
        .build()
        .unwrap();
    client.run().await.unwrap();

    let state = seen.lock().unwrap().take().expect("frontend saw a snapshot");
    assert_eq!(state.users.len(), 2);
    assert_eq!(state.leaderboard[0].name, "Ada");
    assert_eq!(state.history.total, 2);
}

#[tokio::test]
async fn initial_load_can_be_disabled() {
    let gateway = MockGateway::new().with_users([("Ada", 0)]);

    Client::builder()
        .runtime(runtime_for(&gateway))
        .frontend(QuitImmediately)
        .initialize_on_start(false)
        .build()
        .unwrap()
        .run()
        .await
        .unwrap();

    assert!(gateway.calls().is_empty());
}

#[tokio::test]
async fn queued_initial_load_finishes_before_shutdown() {
    let gateway = MockGateway::new().with_users([("Ada", 0)]);

    Client::builder()
        .runtime(runtime_for(&gateway))
        .frontend(QuitImmediately)
        .build()
        .unwrap()
        .run()
        .await
        .unwrap();

    assert_eq!(gateway.call_count(Operation::History), 1);
}

#[tokio::test]
async fn quitting_during_a_hung_claim_still_exits() {
    let (gateway, _gate) = MockGateway::new().with_users([("Ada", 0)]).gate_claims();
    let runtime = Runtime::builder()
        .config(RuntimeConfig::default().with_shutdown_grace(Duration::from_millis(50)))
        .gateway(Arc::new(gateway.clone()))
        .build()
        .unwrap();

    let client = Client::builder()
        .runtime(runtime)
        .frontend(ClaimThenQuit)
        .build()
        .unwrap();

    tokio::time::timeout(Duration::from_secs(3), client.run())
        .await
        .expect("client should exit while the claim is still held")
        .unwrap();

    assert_eq!(gateway.call_count(Operation::Claim), 1);
}

#[tokio::test]
async fn frontend_errors_are_returned_after_shutdown() {
    let gateway = MockGateway::new();

    let err = Client::builder()
        .runtime(runtime_for(&gateway))
        .frontend(Crashes)
        .build()
        .unwrap()
        .run()
        .await
        .unwrap_err();

    assert!(err.to_string().contains("terminal went away"));
}

#[tokio::test]
async fn builder_requires_runtime_and_frontend() {
    let err = Client::builder()
        .frontend(QuitImmediately)
        .build()
        .err()
        .unwrap();
    assert!(err.to_string().contains("Runtime is required"));

    let gateway = MockGateway::new();
    let err = Client::builder()
        .runtime(runtime_for(&gateway))
        .build()
        .err()
        .unwrap();
    assert!(err.to_string().contains("Frontend is required"));
}

#![allow(clippy::unwrap_used, clippy::expect_used)]

//! SDK gRPC client against a live in-process server.

mod support;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use configuration::api::grpc;
use configuration::domain::repo::{ClientScan, ConfigStore};
use configuration::domain::service::{Service, ServiceConfig};
use configuration::infra::storage::SeaOrmConfigStore;
use configuration::{CallContext, ConfigStatus, ConfigurationApi, ConfigurationError, RecordKey};
use configuration::{ClientConfig, GlobalConfig, NewGlobalConfig};
use configuration_sdk::{ConfigurationGrpcClient, GrpcClientConfig};
use support::{ctx, inmem_db, new_client, new_global, service};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

struct TestServer {
    client: ConfigurationGrpcClient,
    cancel: CancellationToken,
    handle: tokio::task::JoinHandle<anyhow::Result<()>>,
}

impl TestServer {
    async fn start() -> Self {
        let db = inmem_db().await;
        Self::start_with(service(&db)).await
    }

    async fn start_with<R: ConfigStore + 'static>(service: Arc<Service<R>>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let cancel = CancellationToken::new();

        let handle = tokio::spawn(grpc::serve(listener, service, cancel.clone()));

        let cfg = GrpcClientConfig::default().with_connect_timeout(Duration::from_secs(5));
        let client = ConfigurationGrpcClient::connect_with(format!("http://{addr}"), &cfg)
            .await
            .expect("Failed to connect to test server");

        Self {
            client,
            cancel,
            handle,
        }
    }

    async fn stop(self) {
        self.cancel.cancel();
        self.handle.await.unwrap().unwrap();
    }
}

/// Store that sleeps before every call.
struct SlowStore {
    inner: SeaOrmConfigStore,
    delay: Duration,
}

impl SlowStore {
    async fn pause(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

#[async_trait]
impl ConfigStore for SlowStore {
    async fn list_clients(&self, scan: ClientScan) -> anyhow::Result<Vec<ClientConfig>> {
        self.pause().await;
        self.inner.list_clients(scan).await
    }

    async fn find_client_by_tenant(
        &self,
        tenant_key: &str,
    ) -> anyhow::Result<Option<ClientConfig>> {
        self.pause().await;
        self.inner.find_client_by_tenant(tenant_key).await
    }

    async fn insert_client(&self, client: &ClientConfig) -> anyhow::Result<ClientConfig> {
        self.pause().await;
        self.inner.insert_client(client).await
    }

    async fn update_client(&self, client: &ClientConfig) -> anyhow::Result<u64> {
        self.pause().await;
        self.inner.update_client(client).await
    }

    async fn mark_deleted(&self, key: &RecordKey) -> anyhow::Result<u64> {
        self.pause().await;
        self.inner.mark_deleted(key).await
    }

    async fn list_globals(&self) -> anyhow::Result<Vec<GlobalConfig>> {
        self.pause().await;
        self.inner.list_globals().await
    }

    async fn find_global(&self, global_id: i32) -> anyhow::Result<Option<GlobalConfig>> {
        self.pause().await;
        self.inner.find_global(global_id).await
    }

    async fn find_active_global(&self) -> anyhow::Result<Option<GlobalConfig>> {
        self.pause().await;
        self.inner.find_active_global().await
    }

    async fn insert_global(&self, global: &NewGlobalConfig) -> anyhow::Result<GlobalConfig> {
        self.pause().await;
        self.inner.insert_global(global).await
    }

    async fn update_global(&self, global: &GlobalConfig) -> anyhow::Result<u64> {
        self.pause().await;
        self.inner.update_global(global).await
    }

    async fn remove(&self, key: &RecordKey) -> anyhow::Result<u64> {
        self.pause().await;
        self.inner.remove(key).await
    }

    async fn activate_global(&self, global: &GlobalConfig) -> anyhow::Result<u64> {
        self.pause().await;
        self.inner.activate_global(global).await
    }
}

#[tokio::test]
async fn empty_store_maps_to_status_errors() {
    let server = TestServer::start().await;

    let err = server.client.get_active_global(&ctx()).await.unwrap_err();
    assert_eq!(err, ConfigurationError::NoDefaultAvailable);

    let err = server.client.list_clients(&ctx()).await.unwrap_err();
    assert!(matches!(err, ConfigurationError::NotFound { .. }));

    let err = server
        .client
        .get_client(&ctx(), "missing-tenant")
        .await
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::NotFound { .. }));

    server.stop().await;
}

#[tokio::test]
async fn global_lifecycle_over_grpc() {
    let server = TestServer::start().await;
    let client = &server.client;

    let first = client
        .add_global(&ctx(), new_global("first", true))
        .await
        .unwrap();
    let second = client
        .add_global(&ctx(), new_global("second", false))
        .await
        .unwrap();
    assert_eq!(first.status, ConfigStatus::created(true));
    assert!(second.record.global_id > first.record.global_id);
    assert_eq!(second.record.transport.password, "secret");

    let activated = client
        .activate_global(&ctx(), second.record.clone())
        .await
        .unwrap();
    assert!(activated.record.active);
    assert_eq!(activated.status, ConfigStatus::updated(true));

    let active = client.get_active_global(&ctx()).await.unwrap();
    assert_eq!(active.global_id, second.record.global_id);

    let previous = client
        .get_global(&ctx(), first.record.global_id)
        .await
        .unwrap();
    assert!(!previous.active);

    let status = client
        .delete(&ctx(), RecordKey::GlobalId(first.record.global_id))
        .await
        .unwrap();
    assert_eq!(status, ConfigStatus::deleted(true));
    assert_eq!(client.list_globals(&ctx()).await.unwrap().len(), 1);

    server.stop().await;
}

#[tokio::test]
async fn client_lifecycle_over_grpc() {
    let server = TestServer::start().await;
    let client = &server.client;

    let created = client
        .add_client(&ctx(), new_client("012-031-234-542"))
        .await
        .unwrap();
    assert!(!created.record.client_uuid.is_nil());

    let mut record = client.get_client(&ctx(), "012-031-234-542").await.unwrap();
    assert_eq!(record, created.record);

    record.app_name = "renamed.example.com".to_owned();
    let status = client.update_client(&ctx(), record.clone()).await.unwrap();
    assert_eq!(status, ConfigStatus::updated(true));

    let status = client
        .delete(&ctx(), RecordKey::TenantKey("012-031-234-542".to_owned()))
        .await
        .unwrap();
    assert_eq!(status, ConfigStatus::deleted(true));

    let err = client
        .delete(&ctx(), RecordKey::TenantKey("012-031-234-542".to_owned()))
        .await
        .unwrap_err();
    assert!(matches!(err, ConfigurationError::NotFound { .. }));

    server.stop().await;
}

#[tokio::test]
async fn activating_unknown_global_is_not_found() {
    let server = TestServer::start().await;
    let ghost = server
        .client
        .add_global(&ctx(), new_global("ghost", false))
        .await
        .unwrap()
        .record;
    server
        .client
        .delete(&ctx(), RecordKey::GlobalId(ghost.global_id))
        .await
        .unwrap();

    let err = server
        .client
        .activate_global(&CallContext::with_timeout(Duration::from_secs(5)), ghost)
        .await
        .unwrap_err();

    assert!(matches!(err, ConfigurationError::NotFound { .. }));
    server.stop().await;
}

#[tokio::test]
async fn slow_store_maps_to_deadline_exceeded() {
    let db = inmem_db().await;
    let store = SlowStore {
        inner: SeaOrmConfigStore::new(db),
        delay: Duration::from_secs(2),
    };
    let service = Arc::new(Service::new(
        Arc::new(store),
        ServiceConfig {
            store_timeout: Duration::from_millis(100),
        },
    ));
    let server = TestServer::start_with(service).await;

    let err = server.client.get_active_global(&ctx()).await.unwrap_err();
    assert!(matches!(err, ConfigurationError::Timeout { .. }));
    assert!(err.is_transient());

    let err = server.client.list_globals(&ctx()).await.unwrap_err();
    assert!(matches!(err, ConfigurationError::Timeout { .. }));

    server.stop().await;
}

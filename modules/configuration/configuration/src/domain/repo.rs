use async_trait::async_trait;
use configuration_sdk::models::{ClientConfig, GlobalConfig, NewGlobalConfig, RecordKey};

/// Which client records a scan returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientScan {
    /// Records that are not soft-deleted.
    Live,
    /// Every record, soft-deleted ones included.
    All,
}

/// Persistence port for client and global configurations.
///
/// Mutations report the number of affected rows; interpreting zero rows is
/// left to the service.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn list_clients(&self, scan: ClientScan) -> anyhow::Result<Vec<ClientConfig>>;

    /// First live client configuration registered for `tenant_key`.
    async fn find_client_by_tenant(&self, tenant_key: &str)
    -> anyhow::Result<Option<ClientConfig>>;

    async fn insert_client(&self, client: &ClientConfig) -> anyhow::Result<ClientConfig>;

    /// Overwrite the mutable fields of the live record with the same `client_uuid`.
    async fn update_client(&self, client: &ClientConfig) -> anyhow::Result<u64>;

    /// Flag the records addressed by `key` as deleted.
    async fn mark_deleted(&self, key: &RecordKey) -> anyhow::Result<u64>;

    /// Every global configuration ordered by `global_id` ascending.
    async fn list_globals(&self) -> anyhow::Result<Vec<GlobalConfig>>;

    async fn find_global(&self, global_id: i32) -> anyhow::Result<Option<GlobalConfig>>;

    async fn find_active_global(&self) -> anyhow::Result<Option<GlobalConfig>>;

    async fn insert_global(&self, global: &NewGlobalConfig) -> anyhow::Result<GlobalConfig>;

    /// Overwrite the mutable fields of a global configuration, leaving `active` untouched.
    async fn update_global(&self, global: &GlobalConfig) -> anyhow::Result<u64>;

    /// Physically remove the records addressed by `key`.
    async fn remove(&self, key: &RecordKey) -> anyhow::Result<u64>;

    /// Atomically clear `active` on every other record and persist `global`
    /// with `active = true`.
    ///
    /// Returns the rows affected by the target update; zero means the target
    /// does not exist and nothing was changed.
    async fn activate_global(&self, global: &GlobalConfig) -> anyhow::Result<u64>;
}

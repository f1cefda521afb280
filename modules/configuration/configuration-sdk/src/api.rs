//! `ConfigurationApi` trait definition.
//!
//! This trait defines the public API for the configuration module.
//! It is implemented in-process by the module's `LocalClient` and remotely
//! by [`crate::ConfigurationGrpcClient`].

use async_trait::async_trait;

use crate::context::CallContext;
use crate::errors::ConfigurationError;
use crate::models::{
    ClientConfig, ConfigStatus, GlobalConfig, NewClientConfig, NewGlobalConfig, Persisted,
    RecordKey,
};

/// Public API trait for the configuration module.
///
/// Every method takes a [`CallContext`] whose deadline bounds the call.
#[async_trait]
pub trait ConfigurationApi: Send + Sync {
    /// All client configurations that are not soft-deleted.
    /// Returns `NotFound` when there are none.
    async fn list_clients(&self, ctx: &CallContext)
    -> Result<Vec<ClientConfig>, ConfigurationError>;

    /// The live client configuration registered for `tenant_key`.
    async fn get_client(
        &self,
        ctx: &CallContext,
        tenant_key: &str,
    ) -> Result<ClientConfig, ConfigurationError>;

    /// Create a client configuration; the identity is generated by the service.
    async fn add_client(
        &self,
        ctx: &CallContext,
        new_client: NewClientConfig,
    ) -> Result<Persisted<ClientConfig>, ConfigurationError>;

    /// Replace the mutable fields of the client configuration with the same identity.
    async fn update_client(
        &self,
        ctx: &CallContext,
        client: ClientConfig,
    ) -> Result<ConfigStatus, ConfigurationError>;

    /// All global configurations, in store order.
    /// Returns `NotFound` when there are none.
    async fn list_globals(&self, ctx: &CallContext)
    -> Result<Vec<GlobalConfig>, ConfigurationError>;

    async fn get_global(
        &self,
        ctx: &CallContext,
        global_id: i32,
    ) -> Result<GlobalConfig, ConfigurationError>;

    /// The active global configuration, or the first one when none is active.
    /// Returns `NoDefaultAvailable` when there is nothing to fall back to.
    async fn get_active_global(&self, ctx: &CallContext)
    -> Result<GlobalConfig, ConfigurationError>;

    async fn add_global(
        &self,
        ctx: &CallContext,
        new_global: NewGlobalConfig,
    ) -> Result<Persisted<GlobalConfig>, ConfigurationError>;

    /// Replace the mutable fields of a global configuration. Does not change
    /// which record is active.
    async fn update_global(
        &self,
        ctx: &CallContext,
        global: GlobalConfig,
    ) -> Result<ConfigStatus, ConfigurationError>;

    /// Make `global` the single active configuration, persisting its fields.
    async fn activate_global(
        &self,
        ctx: &CallContext,
        global: GlobalConfig,
    ) -> Result<Persisted<GlobalConfig>, ConfigurationError>;

    /// Soft-delete client configurations by tenant key, or remove a global
    /// configuration by id.
    async fn delete(
        &self,
        ctx: &CallContext,
        key: RecordKey,
    ) -> Result<ConfigStatus, ConfigurationError>;
}

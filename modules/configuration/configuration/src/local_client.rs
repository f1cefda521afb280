//! In-process implementation of the SDK API trait.

use std::sync::Arc;

use async_trait::async_trait;
use configuration_sdk::{
    CallContext, ClientConfig, ConfigStatus, ConfigurationApi, ConfigurationError, GlobalConfig,
    NewClientConfig, NewGlobalConfig, Persisted, RecordKey,
};

use crate::domain::repo::ConfigStore;
use crate::domain::service::Service;

pub struct LocalClient<R: ConfigStore + 'static> {
    service: Arc<Service<R>>,
}

impl<R: ConfigStore + 'static> LocalClient<R> {
    #[must_use]
    pub fn new(service: Arc<Service<R>>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl<R: ConfigStore + 'static> ConfigurationApi for LocalClient<R> {
    async fn list_clients(
        &self,
        ctx: &CallContext,
    ) -> Result<Vec<ClientConfig>, ConfigurationError> {
        self.service.list_clients(ctx).await.map_err(Into::into)
    }

    async fn get_client(
        &self,
        ctx: &CallContext,
        tenant_key: &str,
    ) -> Result<ClientConfig, ConfigurationError> {
        self.service
            .get_client(ctx, tenant_key)
            .await
            .map_err(Into::into)
    }

    async fn add_client(
        &self,
        ctx: &CallContext,
        new_client: NewClientConfig,
    ) -> Result<Persisted<ClientConfig>, ConfigurationError> {
        self.service
            .add_client(ctx, new_client)
            .await
            .map_err(Into::into)
    }

    async fn update_client(
        &self,
        ctx: &CallContext,
        client: ClientConfig,
    ) -> Result<ConfigStatus, ConfigurationError> {
        self.service
            .update_client(ctx, client)
            .await
            .map_err(Into::into)
    }

    async fn list_globals(
        &self,
        ctx: &CallContext,
    ) -> Result<Vec<GlobalConfig>, ConfigurationError> {
        self.service.list_globals(ctx).await.map_err(Into::into)
    }

    async fn get_global(
        &self,
        ctx: &CallContext,
        global_id: i32,
    ) -> Result<GlobalConfig, ConfigurationError> {
        self.service
            .get_global(ctx, global_id)
            .await
            .map_err(Into::into)
    }

    async fn get_active_global(
        &self,
        ctx: &CallContext,
    ) -> Result<GlobalConfig, ConfigurationError> {
        self.service.get_active(ctx).await.map_err(Into::into)
    }

    async fn add_global(
        &self,
        ctx: &CallContext,
        new_global: NewGlobalConfig,
    ) -> Result<Persisted<GlobalConfig>, ConfigurationError> {
        self.service
            .add_global(ctx, new_global)
            .await
            .map_err(Into::into)
    }

    async fn update_global(
        &self,
        ctx: &CallContext,
        global: GlobalConfig,
    ) -> Result<ConfigStatus, ConfigurationError> {
        self.service
            .update_global(ctx, global)
            .await
            .map_err(Into::into)
    }

    async fn activate_global(
        &self,
        ctx: &CallContext,
        global: GlobalConfig,
    ) -> Result<Persisted<GlobalConfig>, ConfigurationError> {
        self.service
            .activate(ctx, global)
            .await
            .map_err(Into::into)
    }

    async fn delete(
        &self,
        ctx: &CallContext,
        key: RecordKey,
    ) -> Result<ConfigStatus, ConfigurationError> {
        self.service.delete(ctx, key).await.map_err(Into::into)
    }
}

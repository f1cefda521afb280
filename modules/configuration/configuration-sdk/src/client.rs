//! gRPC client implementation of [`ConfigurationApi`].

use anyhow::Result;
use async_trait::async_trait;
use tonic::transport::Channel;

use crate::api::ConfigurationApi;
use crate::context::CallContext;
use crate::errors::ConfigurationError;
use crate::models::{
    ClientConfig, ConfigStatus, GlobalConfig, NewClientConfig, NewGlobalConfig, Persisted,
    RecordKey,
};
use crate::proto;
use crate::proto::configuration_service_client::ConfigurationServiceClient;
use crate::transport::{GrpcClientConfig, connect};

/// Remote client for the configuration service.
#[derive(Clone)]
pub struct ConfigurationGrpcClient {
    inner: ConfigurationServiceClient<Channel>,
}

impl ConfigurationGrpcClient {
    /// Connect using the default transport configuration.
    ///
    /// # Errors
    /// Returns an error if the connection cannot be established.
    pub async fn connect(uri: impl Into<String>) -> Result<Self> {
        Self::connect_with(uri, &GrpcClientConfig::default()).await
    }

    /// # Errors
    /// Returns an error if the connection cannot be established.
    pub async fn connect_with(uri: impl Into<String>, cfg: &GrpcClientConfig) -> Result<Self> {
        let channel = connect(uri, cfg).await?;
        Ok(Self::from_channel(channel))
    }

    #[must_use]
    pub fn from_channel(channel: Channel) -> Self {
        Self {
            inner: ConfigurationServiceClient::new(channel),
        }
    }

    fn request<T>(ctx: &CallContext, message: T) -> tonic::Request<T> {
        let mut request = tonic::Request::new(message);
        if let Some(remaining) = ctx.remaining() {
            request.set_timeout(remaining);
        }
        request
    }
}

fn missing(field: &str) -> ConfigurationError {
    ConfigurationError::transport(format!("response is missing '{field}'"))
}

#[async_trait]
impl ConfigurationApi for ConfigurationGrpcClient {
    async fn list_clients(
        &self,
        ctx: &CallContext,
    ) -> Result<Vec<ClientConfig>, ConfigurationError> {
        let mut client = self.inner.clone();
        let response = client
            .list_client_configs(Self::request(ctx, proto::ListClientConfigsRequest {}))
            .await?
            .into_inner();

        response
            .clients
            .into_iter()
            .map(ClientConfig::try_from)
            .collect()
    }

    async fn get_client(
        &self,
        ctx: &CallContext,
        tenant_key: &str,
    ) -> Result<ClientConfig, ConfigurationError> {
        let mut client = self.inner.clone();
        let request = proto::GetClientConfigRequest {
            tenant_key: tenant_key.to_owned(),
        };
        let response = client
            .get_client_config(Self::request(ctx, request))
            .await?
            .into_inner();

        response
            .client
            .ok_or_else(|| missing("client"))
            .and_then(ClientConfig::try_from)
    }

    async fn add_client(
        &self,
        ctx: &CallContext,
        new_client: NewClientConfig,
    ) -> Result<Persisted<ClientConfig>, ConfigurationError> {
        let mut client = self.inner.clone();
        let request = proto::ClientConfigRequest {
            client: Some(new_client.into()),
        };
        let response = client
            .add_client_config(Self::request(ctx, request))
            .await?
            .into_inner();

        let record = response
            .client
            .ok_or_else(|| missing("client"))
            .and_then(ClientConfig::try_from)?;
        Ok(Persisted {
            record,
            status: response.status.map(Into::into).unwrap_or_default(),
        })
    }

    async fn update_client(
        &self,
        ctx: &CallContext,
        client_config: ClientConfig,
    ) -> Result<ConfigStatus, ConfigurationError> {
        let mut client = self.inner.clone();
        let request = proto::ClientConfigRequest {
            client: Some(client_config.into()),
        };
        let response = client
            .update_client_config(Self::request(ctx, request))
            .await?
            .into_inner();

        Ok(response.status.map(Into::into).unwrap_or_default())
    }

    async fn list_globals(
        &self,
        ctx: &CallContext,
    ) -> Result<Vec<GlobalConfig>, ConfigurationError> {
        let mut client = self.inner.clone();
        let response = client
            .list_global_configs(Self::request(ctx, proto::ListGlobalConfigsRequest {}))
            .await?
            .into_inner();

        Ok(response.globals.into_iter().map(Into::into).collect())
    }

    async fn get_global(
        &self,
        ctx: &CallContext,
        global_id: i32,
    ) -> Result<GlobalConfig, ConfigurationError> {
        let mut client = self.inner.clone();
        let response = client
            .get_global_config(Self::request(
                ctx,
                proto::GetGlobalConfigRequest { global_id },
            ))
            .await?
            .into_inner();

        response.global.map(Into::into).ok_or_else(|| missing("global"))
    }

    async fn get_active_global(
        &self,
        ctx: &CallContext,
    ) -> Result<GlobalConfig, ConfigurationError> {
        let mut client = self.inner.clone();
        let response = client
            .get_active_global_config(Self::request(
                ctx,
                proto::GetActiveGlobalConfigRequest {},
            ))
            .await?
            .into_inner();

        response.global.map(Into::into).ok_or_else(|| missing("global"))
    }

    async fn add_global(
        &self,
        ctx: &CallContext,
        new_global: NewGlobalConfig,
    ) -> Result<Persisted<GlobalConfig>, ConfigurationError> {
        let mut client = self.inner.clone();
        let request = proto::GlobalConfigRequest {
            global: Some(new_global.into()),
        };
        let response = client
            .add_global_config(Self::request(ctx, request))
            .await?
            .into_inner();

        let record = response.global.map(Into::into).ok_or_else(|| missing("global"))?;
        Ok(Persisted {
            record,
            status: response.status.map(Into::into).unwrap_or_default(),
        })
    }

    async fn update_global(
        &self,
        ctx: &CallContext,
        global: GlobalConfig,
    ) -> Result<ConfigStatus, ConfigurationError> {
        let mut client = self.inner.clone();
        let request = proto::GlobalConfigRequest {
            global: Some(global.into()),
        };
        let response = client
            .update_global_config(Self::request(ctx, request))
            .await?
            .into_inner();

        Ok(response.status.map(Into::into).unwrap_or_default())
    }

    async fn activate_global(
        &self,
        ctx: &CallContext,
        global: GlobalConfig,
    ) -> Result<Persisted<GlobalConfig>, ConfigurationError> {
        let mut client = self.inner.clone();
        let request = proto::GlobalConfigRequest {
            global: Some(global.into()),
        };
        let response = client
            .activate_global_config(Self::request(ctx, request))
            .await?
            .into_inner();

        let record = response.global.map(Into::into).ok_or_else(|| missing("global"))?;
        Ok(Persisted {
            record,
            status: response.status.map(Into::into).unwrap_or_default(),
        })
    }

    async fn delete(
        &self,
        ctx: &CallContext,
        key: RecordKey,
    ) -> Result<ConfigStatus, ConfigurationError> {
        let mut client = self.inner.clone();
        let response = match key {
            RecordKey::TenantKey(tenant_key) => {
                client
                    .delete_client_config(Self::request(
                        ctx,
                        proto::DeleteClientConfigRequest { tenant_key },
                    ))
                    .await?
            }
            RecordKey::GlobalId(global_id) => {
                client
                    .delete_global_config(Self::request(
                        ctx,
                        proto::DeleteGlobalConfigRequest { global_id },
                    ))
                    .await?
            }
        };

        Ok(response
            .into_inner()
            .status
            .map(Into::into)
            .unwrap_or_default())
    }
}

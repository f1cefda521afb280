//! gRPC Server implementation for the configuration service
//!
//! Handlers translate wire messages to SDK models, run the domain Service
//! under the caller's deadline and map domain errors to status codes.

use std::sync::Arc;
use std::time::Duration;

use configuration_sdk::proto;
use configuration_sdk::{
    CallContext, ClientConfig, ConfigurationError, ConfigurationService, RecordKey,
};
use tonic::metadata::MetadataMap;
use tonic::{Request, Response, Status};

use crate::domain::error::DomainError;
use crate::domain::repo::ConfigStore;
use crate::domain::service::Service;

const GRPC_TIMEOUT_HEADER: &str = "grpc-timeout";

/// gRPC service implementation that wraps the domain Service.
pub struct ConfigurationServiceImpl<R: ConfigStore + 'static> {
    service: Arc<Service<R>>,
}

impl<R: ConfigStore + 'static> ConfigurationServiceImpl<R> {
    #[must_use]
    pub fn new(service: Arc<Service<R>>) -> Self {
        Self { service }
    }
}

/// Build the call context from request metadata. The deadline comes from the
/// `grpc-timeout` header when present and well formed.
#[must_use]
pub fn call_context(metadata: &MetadataMap) -> CallContext {
    metadata
        .get(GRPC_TIMEOUT_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_grpc_timeout)
        .map_or_else(CallContext::new, CallContext::with_timeout)
}

/// Parse a `grpc-timeout` value: up to eight ASCII digits followed by a unit
/// (`H`, `M`, `S`, `m`, `u`, `n`).
fn parse_grpc_timeout(value: &str) -> Option<Duration> {
    if value.len() < 2 || value.len() > 9 {
        return None;
    }
    let (digits, unit) = value.split_at(value.len() - 1);
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let amount: u64 = digits.parse().ok()?;

    match unit {
        "H" => Some(Duration::from_secs(amount * 3600)),
        "M" => Some(Duration::from_secs(amount * 60)),
        "S" => Some(Duration::from_secs(amount)),
        "m" => Some(Duration::from_millis(amount)),
        "u" => Some(Duration::from_micros(amount)),
        "n" => Some(Duration::from_nanos(amount)),
        _ => None,
    }
}

fn to_status(err: DomainError) -> Status {
    if let DomainError::Store(ref source) = err {
        tracing::error!(error = ?source, "Configuration store failure");
    }
    ConfigurationError::from(err).into()
}

fn required<T>(field: Option<T>, name: &str) -> Result<T, Status> {
    field.ok_or_else(|| Status::invalid_argument(format!("'{name}' is required")))
}

#[tonic::async_trait]
impl<R: ConfigStore + 'static> ConfigurationService for ConfigurationServiceImpl<R> {
    async fn list_client_configs(
        &self,
        request: Request<proto::ListClientConfigsRequest>,
    ) -> Result<Response<proto::ListClientConfigsResponse>, Status> {
        let ctx = call_context(request.metadata());
        let clients = self.service.list_clients(&ctx).await.map_err(to_status)?;

        Ok(Response::new(proto::ListClientConfigsResponse {
            clients: clients.into_iter().map(Into::into).collect(),
        }))
    }

    async fn get_client_config(
        &self,
        request: Request<proto::GetClientConfigRequest>,
    ) -> Result<Response<proto::ClientConfigResponse>, Status> {
        let ctx = call_context(request.metadata());
        let req = request.into_inner();
        let client = self
            .service
            .get_client(&ctx, &req.tenant_key)
            .await
            .map_err(to_status)?;

        Ok(Response::new(proto::ClientConfigResponse {
            client: Some(client.into()),
            status: None,
        }))
    }

    async fn add_client_config(
        &self,
        request: Request<proto::ClientConfigRequest>,
    ) -> Result<Response<proto::ClientConfigResponse>, Status> {
        let ctx = call_context(request.metadata());
        let client = required(request.into_inner().client, "client")?;

        let persisted = self
            .service
            .add_client(&ctx, client.into())
            .await
            .map_err(to_status)?;

        Ok(Response::new(proto::ClientConfigResponse {
            client: Some(persisted.record.into()),
            status: Some(persisted.status.into()),
        }))
    }

    async fn update_client_config(
        &self,
        request: Request<proto::ClientConfigRequest>,
    ) -> Result<Response<proto::StatusResponse>, Status> {
        let ctx = call_context(request.metadata());
        let client = required(request.into_inner().client, "client")?;
        let client = ClientConfig::try_from(client).map_err(Status::from)?;

        let status = self
            .service
            .update_client(&ctx, client)
            .await
            .map_err(to_status)?;

        Ok(Response::new(proto::StatusResponse {
            status: Some(status.into()),
        }))
    }

    async fn delete_client_config(
        &self,
        request: Request<proto::DeleteClientConfigRequest>,
    ) -> Result<Response<proto::StatusResponse>, Status> {
        let ctx = call_context(request.metadata());
        let key = RecordKey::TenantKey(request.into_inner().tenant_key);

        let status = self.service.delete(&ctx, key).await.map_err(to_status)?;

        Ok(Response::new(proto::StatusResponse {
            status: Some(status.into()),
        }))
    }

    async fn list_global_configs(
        &self,
        request: Request<proto::ListGlobalConfigsRequest>,
    ) -> Result<Response<proto::ListGlobalConfigsResponse>, Status> {
        let ctx = call_context(request.metadata());
        let globals = self.service.list_globals(&ctx).await.map_err(to_status)?;

        Ok(Response::new(proto::ListGlobalConfigsResponse {
            globals: globals.into_iter().map(Into::into).collect(),
        }))
    }

    async fn get_global_config(
        &self,
        request: Request<proto::GetGlobalConfigRequest>,
    ) -> Result<Response<proto::GlobalConfigResponse>, Status> {
        let ctx = call_context(request.metadata());
        let global_id = request.into_inner().global_id;
        let global = self
            .service
            .get_global(&ctx, global_id)
            .await
            .map_err(to_status)?;

        Ok(Response::new(proto::GlobalConfigResponse {
            global: Some(global.into()),
            status: None,
        }))
    }

    async fn get_active_global_config(
        &self,
        request: Request<proto::GetActiveGlobalConfigRequest>,
    ) -> Result<Response<proto::GlobalConfigResponse>, Status> {
        let ctx = call_context(request.metadata());
        let global = self.service.get_active(&ctx).await.map_err(to_status)?;

        Ok(Response::new(proto::GlobalConfigResponse {
            global: Some(global.into()),
            status: None,
        }))
    }

    async fn add_global_config(
        &self,
        request: Request<proto::GlobalConfigRequest>,
    ) -> Result<Response<proto::GlobalConfigResponse>, Status> {
        let ctx = call_context(request.metadata());
        let global = required(request.into_inner().global, "global")?;

        let persisted = self
            .service
            .add_global(&ctx, global.into())
            .await
            .map_err(to_status)?;

        Ok(Response::new(proto::GlobalConfigResponse {
            global: Some(persisted.record.into()),
            status: Some(persisted.status.into()),
        }))
    }

    async fn update_global_config(
        &self,
        request: Request<proto::GlobalConfigRequest>,
    ) -> Result<Response<proto::StatusResponse>, Status> {
        let ctx = call_context(request.metadata());
        let global = required(request.into_inner().global, "global")?;

        let status = self
            .service
            .update_global(&ctx, global.into())
            .await
            .map_err(to_status)?;

        Ok(Response::new(proto::StatusResponse {
            status: Some(status.into()),
        }))
    }

    async fn delete_global_config(
        &self,
        request: Request<proto::DeleteGlobalConfigRequest>,
    ) -> Result<Response<proto::StatusResponse>, Status> {
        let ctx = call_context(request.metadata());
        let key = RecordKey::GlobalId(request.into_inner().global_id);

        let status = self.service.delete(&ctx, key).await.map_err(to_status)?;

        Ok(Response::new(proto::StatusResponse {
            status: Some(status.into()),
        }))
    }

    async fn activate_global_config(
        &self,
        request: Request<proto::GlobalConfigRequest>,
    ) -> Result<Response<proto::GlobalConfigResponse>, Status> {
        let ctx = call_context(request.metadata());
        let global = required(request.into_inner().global, "global")?;

        let persisted = self
            .service
            .activate(&ctx, global.into())
            .await
            .map_err(to_status)?;

        Ok(Response::new(proto::GlobalConfigResponse {
            global: Some(persisted.record.into()),
            status: Some(persisted.status.into()),
        }))
    }
}

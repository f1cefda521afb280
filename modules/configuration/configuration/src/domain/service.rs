use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use configuration_sdk::CallContext;
use configuration_sdk::models::{
    ClientConfig, ConfigStatus, GlobalConfig, NewClientConfig, NewGlobalConfig, Persisted,
    RecordKey, RecordKind,
};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::error::DomainError;
use super::repo::{ClientScan, ConfigStore};
use crate::config::ConfigurationConfig;

// ============================================================================
// Service Configuration
// ============================================================================

pub struct ServiceConfig {
    /// Budget for the store work of one operation when the caller sets no
    /// tighter deadline.
    pub store_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            store_timeout: Duration::from_secs(5),
        }
    }
}

impl From<&ConfigurationConfig> for ServiceConfig {
    fn from(cfg: &ConfigurationConfig) -> Self {
        Self {
            store_timeout: cfg.store_timeout(),
        }
    }
}

// ============================================================================
// Service Implementation
// ============================================================================

/// Enforces the configuration invariants on top of a [`ConfigStore`].
///
/// Each operation derives one deadline (the caller's, capped by the store
/// timeout) and every store call it makes is bounded by it.
pub struct Service<R: ConfigStore> {
    repo: Arc<R>,
    config: ServiceConfig,
}

impl<R: ConfigStore> Service<R> {
    #[must_use]
    pub fn new(repo: Arc<R>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    #[instrument(skip(self, ctx))]
    pub async fn list_clients(&self, ctx: &CallContext) -> Result<Vec<ClientConfig>, DomainError> {
        let deadline = self.deadline(ctx);
        let clients = bounded(deadline, "list_clients", self.repo.list_clients(ClientScan::Live))
            .await?;

        if clients.is_empty() {
            return Err(DomainError::not_found(RecordKind::Client, &"any"));
        }
        debug!("Listed {} client configurations", clients.len());
        Ok(clients)
    }

    #[instrument(skip(self, ctx))]
    pub async fn get_client(
        &self,
        ctx: &CallContext,
        tenant_key: &str,
    ) -> Result<ClientConfig, DomainError> {
        let deadline = self.deadline(ctx);
        bounded(
            deadline,
            "get_client",
            self.repo.find_client_by_tenant(tenant_key),
        )
        .await?
        .ok_or_else(|| DomainError::not_found_key(&RecordKey::TenantKey(tenant_key.to_owned())))
    }

    #[instrument(skip(self, ctx, new_client), fields(tenant_key = %new_client.tenant_key))]
    pub async fn add_client(
        &self,
        ctx: &CallContext,
        new_client: NewClientConfig,
    ) -> Result<Persisted<ClientConfig>, DomainError> {
        let deadline = self.deadline(ctx);
        let client = new_client.with_identity(Uuid::new_v4());

        let record = bounded(deadline, "add_client", self.repo.insert_client(&client)).await?;

        info!(client_uuid = %record.client_uuid, "Created client configuration");
        Ok(Persisted {
            record,
            status: ConfigStatus::created(true),
        })
    }

    #[instrument(skip(self, ctx, client), fields(client_uuid = %client.client_uuid))]
    pub async fn update_client(
        &self,
        ctx: &CallContext,
        client: ClientConfig,
    ) -> Result<ConfigStatus, DomainError> {
        let deadline = self.deadline(ctx);
        let rows = bounded(deadline, "update_client", self.repo.update_client(&client)).await?;

        if rows == 0 {
            return Err(DomainError::not_found(
                RecordKind::Client,
                &format!("client_uuid={}", client.client_uuid),
            ));
        }
        debug!("Updated client configuration");
        Ok(ConfigStatus::updated(true))
    }

    #[instrument(skip(self, ctx))]
    pub async fn list_globals(&self, ctx: &CallContext) -> Result<Vec<GlobalConfig>, DomainError> {
        let deadline = self.deadline(ctx);
        let globals = bounded(deadline, "list_globals", self.repo.list_globals()).await?;

        if globals.is_empty() {
            return Err(DomainError::not_found(RecordKind::Global, &"any"));
        }
        debug!("Listed {} global configurations", globals.len());
        Ok(globals)
    }

    #[instrument(skip(self, ctx))]
    pub async fn get_global(
        &self,
        ctx: &CallContext,
        global_id: i32,
    ) -> Result<GlobalConfig, DomainError> {
        let deadline = self.deadline(ctx);
        bounded(deadline, "get_global", self.repo.find_global(global_id))
            .await?
            .ok_or_else(|| DomainError::not_found_key(&RecordKey::GlobalId(global_id)))
    }

    /// The active global configuration, falling back to the lowest id when
    /// none is active. The fallback record is returned as stored; its flag is
    /// not changed.
    #[instrument(skip(self, ctx))]
    pub async fn get_active(&self, ctx: &CallContext) -> Result<GlobalConfig, DomainError> {
        let deadline = self.deadline(ctx);

        if let Some(active) =
            bounded(deadline, "get_active", self.repo.find_active_global()).await?
        {
            return Ok(active);
        }

        debug!("No active global configuration, falling back to the first record");
        match bounded(deadline, "get_active", self.repo.list_globals()).await {
            Ok(globals) => globals
                .into_iter()
                .next()
                .ok_or(DomainError::NoDefaultAvailable),
            Err(e @ DomainError::Timeout { .. }) => Err(e),
            Err(e) => {
                warn!(error = %e, "Failed to read global configurations for the default");
                Err(DomainError::NoDefaultAvailable)
            }
        }
    }

    #[instrument(skip(self, ctx, new_global), fields(active = new_global.active))]
    pub async fn add_global(
        &self,
        ctx: &CallContext,
        new_global: NewGlobalConfig,
    ) -> Result<Persisted<GlobalConfig>, DomainError> {
        let deadline = self.deadline(ctx);
        let record = bounded(deadline, "add_global", self.repo.insert_global(&new_global)).await?;

        info!(global_id = record.global_id, "Created global configuration");
        Ok(Persisted {
            record,
            status: ConfigStatus::created(true),
        })
    }

    #[instrument(skip(self, ctx, global), fields(global_id = global.global_id))]
    pub async fn update_global(
        &self,
        ctx: &CallContext,
        global: GlobalConfig,
    ) -> Result<ConfigStatus, DomainError> {
        let deadline = self.deadline(ctx);
        let rows = bounded(deadline, "update_global", self.repo.update_global(&global)).await?;

        if rows == 0 {
            return Err(DomainError::not_found_key(&RecordKey::GlobalId(
                global.global_id,
            )));
        }
        debug!("Updated global configuration");
        Ok(ConfigStatus::updated(true))
    }

    /// Make `global` the only active configuration.
    ///
    /// The other records are deactivated in the same store transaction that
    /// persists the target, so the change is complete when this returns.
    #[instrument(skip(self, ctx, global), fields(global_id = global.global_id))]
    pub async fn activate(
        &self,
        ctx: &CallContext,
        mut global: GlobalConfig,
    ) -> Result<Persisted<GlobalConfig>, DomainError> {
        let deadline = self.deadline(ctx);
        global.active = true;

        let rows = bounded(deadline, "activate", self.repo.activate_global(&global))
            .await
            .inspect_err(|e| warn!(error = %e, "Activation rolled back"))?;

        if rows == 0 {
            return Err(DomainError::not_found_key(&RecordKey::GlobalId(
                global.global_id,
            )));
        }

        info!("Activated global configuration");
        Ok(Persisted {
            record: global,
            status: ConfigStatus::updated(true),
        })
    }

    #[instrument(skip(self, ctx, key), fields(key = %key))]
    pub async fn delete(
        &self,
        ctx: &CallContext,
        key: RecordKey,
    ) -> Result<ConfigStatus, DomainError> {
        let deadline = self.deadline(ctx);
        let soft = key.kind().supports_soft_delete();

        let rows = if soft {
            bounded(deadline, "delete", self.repo.mark_deleted(&key)).await?
        } else {
            bounded(deadline, "delete", self.repo.remove(&key)).await?
        };

        if rows == 0 {
            return Err(DomainError::not_found_key(&key));
        }

        info!(rows, soft, "Deleted {}", key.kind());
        Ok(ConfigStatus::deleted(true))
    }

    fn deadline(&self, ctx: &CallContext) -> Instant {
        let budget = Instant::now() + self.config.store_timeout;
        ctx.deadline().map_or(budget, |deadline| deadline.min(budget))
    }
}

/// Run one store call, failing with `Timeout` once `deadline` passes.
/// The store future is dropped on expiry.
async fn bounded<T>(
    deadline: Instant,
    operation: &'static str,
    call: impl Future<Output = anyhow::Result<T>>,
) -> Result<T, DomainError> {
    match tokio::time::timeout_at(deadline.into(), call).await {
        Ok(result) => result.map_err(DomainError::from),
        Err(_) => {
            warn!(operation, "Store call exceeded its deadline");
            Err(DomainError::timeout(operation))
        }
    }
}

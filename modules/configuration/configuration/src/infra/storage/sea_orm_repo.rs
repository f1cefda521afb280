use async_trait::async_trait;
use configuration_sdk::models::{ClientConfig, GlobalConfig, NewGlobalConfig, RecordKey};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

use crate::domain::repo::{ClientScan, ConfigStore};

use super::entity::client_config::{self, Entity as ClientEntity};
use super::entity::global_config::{self, Entity as GlobalEntity};

pub struct SeaOrmConfigStore {
    db: DatabaseConnection,
}

impl SeaOrmConfigStore {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// Mutable columns of a global record; `is_active` is only written by activation.
fn global_columns(
    update: sea_orm::UpdateMany<GlobalEntity>,
    global: &GlobalConfig,
) -> sea_orm::UpdateMany<GlobalEntity> {
    let transport = &global.transport;
    update
        .col_expr(
            global_config::Column::FooterText,
            Expr::value(global.footer_text.clone()),
        )
        .col_expr(
            global_config::Column::SmtpHost,
            Expr::value(transport.host.clone()),
        )
        .col_expr(global_config::Column::SmtpPort, Expr::value(transport.port))
        .col_expr(
            global_config::Column::Username,
            Expr::value(transport.username.clone()),
        )
        .col_expr(
            global_config::Column::Password,
            Expr::value(transport.password.clone()),
        )
        .col_expr(global_config::Column::UseSsl, Expr::value(transport.use_ssl))
        .col_expr(global_config::Column::UseAuth, Expr::value(transport.use_auth))
}

#[async_trait]
impl ConfigStore for SeaOrmConfigStore {
    async fn list_clients(&self, scan: ClientScan) -> anyhow::Result<Vec<ClientConfig>> {
        let mut query = ClientEntity::find();
        if scan == ClientScan::Live {
            query = query.filter(client_config::Column::IsDeleted.eq(false));
        }

        let models = query
            .order_by_asc(client_config::Column::TenantKey)
            .order_by_asc(client_config::Column::ClientUuid)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_client_by_tenant(
        &self,
        tenant_key: &str,
    ) -> anyhow::Result<Option<ClientConfig>> {
        let model = ClientEntity::find()
            .filter(client_config::Column::TenantKey.eq(tenant_key))
            .filter(client_config::Column::IsDeleted.eq(false))
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn insert_client(&self, client: &ClientConfig) -> anyhow::Result<ClientConfig> {
        let model = client_config::ActiveModel::from(client)
            .insert(&self.db)
            .await?;
        Ok(model.into())
    }

    async fn update_client(&self, client: &ClientConfig) -> anyhow::Result<u64> {
        let result = ClientEntity::update_many()
            .col_expr(
                client_config::Column::TenantKey,
                Expr::value(client.tenant_key.clone()),
            )
            .col_expr(
                client_config::Column::LanguageId,
                Expr::value(client.language_id),
            )
            .col_expr(
                client_config::Column::AppName,
                Expr::value(client.app_name.clone()),
            )
            .col_expr(
                client_config::Column::ReportTitle,
                Expr::value(client.report_title.clone()),
            )
            .filter(client_config::Column::ClientUuid.eq(client.client_uuid))
            .filter(client_config::Column::IsDeleted.eq(false))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn mark_deleted(&self, key: &RecordKey) -> anyhow::Result<u64> {
        let RecordKey::TenantKey(tenant_key) = key else {
            anyhow::bail!("{} records cannot be soft-deleted", key.kind());
        };

        let result = ClientEntity::update_many()
            .col_expr(client_config::Column::IsDeleted, Expr::value(true))
            .filter(client_config::Column::TenantKey.eq(tenant_key.as_str()))
            .filter(client_config::Column::IsDeleted.eq(false))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn list_globals(&self) -> anyhow::Result<Vec<GlobalConfig>> {
        let models = GlobalEntity::find()
            .order_by_asc(global_config::Column::GlobalId)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_global(&self, global_id: i32) -> anyhow::Result<Option<GlobalConfig>> {
        let model = GlobalEntity::find_by_id(global_id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn find_active_global(&self) -> anyhow::Result<Option<GlobalConfig>> {
        let model = GlobalEntity::find()
            .filter(global_config::Column::IsActive.eq(true))
            .one(&self.db)
            .await?;

        Ok(model.map(Into::into))
    }

    async fn insert_global(&self, global: &NewGlobalConfig) -> anyhow::Result<GlobalConfig> {
        let model = global_config::ActiveModel::from(global)
            .insert(&self.db)
            .await?;
        Ok(model.into())
    }

    async fn update_global(&self, global: &GlobalConfig) -> anyhow::Result<u64> {
        let result = global_columns(GlobalEntity::update_many(), global)
            .filter(global_config::Column::GlobalId.eq(global.global_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn remove(&self, key: &RecordKey) -> anyhow::Result<u64> {
        let RecordKey::GlobalId(global_id) = key else {
            anyhow::bail!("{} records are only soft-deleted", key.kind());
        };

        let result = GlobalEntity::delete_by_id(*global_id)
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn activate_global(&self, global: &GlobalConfig) -> anyhow::Result<u64> {
        let txn = self.db.begin().await?;

        // Clear first so the active-flag index never sees two active rows.
        let cleared = GlobalEntity::update_many()
            .col_expr(global_config::Column::IsActive, Expr::value(false))
            .filter(global_config::Column::IsActive.eq(true))
            .filter(global_config::Column::GlobalId.ne(global.global_id))
            .exec(&txn)
            .await?;

        let updated = global_columns(GlobalEntity::update_many(), global)
            .col_expr(global_config::Column::IsActive, Expr::value(true))
            .filter(global_config::Column::GlobalId.eq(global.global_id))
            .exec(&txn)
            .await?;

        if updated.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(0);
        }

        txn.commit().await?;
        tracing::debug!(
            global_id = global.global_id,
            deactivated = cleared.rows_affected,
            "Activation committed"
        );
        Ok(updated.rows_affected)
    }
}

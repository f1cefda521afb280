use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DatabaseBackend};

#[derive(DeriveMigrationName)]
pub struct Migration;

// Partial unique indexes: at most one active global record and one live
// client record per tenant key.
const PARTIAL_INDEXES: [&str; 2] = [
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_configuration_global_active \
     ON configuration_global (is_active) WHERE is_active",
    "CREATE UNIQUE INDEX IF NOT EXISTS ux_configuration_client_live_tenant \
     ON configuration_client (tenant_key) WHERE NOT is_deleted",
];

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ConfigurationClient::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ConfigurationClient::ClientUuid)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ConfigurationClient::TenantKey).string().not_null())
                    .col(ColumnDef::new(ConfigurationClient::LanguageId).integer().not_null())
                    .col(ColumnDef::new(ConfigurationClient::AppName).string().not_null())
                    .col(ColumnDef::new(ConfigurationClient::ReportTitle).string().not_null())
                    .col(
                        ColumnDef::new(ConfigurationClient::IsDeleted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ConfigurationGlobal::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ConfigurationGlobal::GlobalId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ConfigurationGlobal::FooterText).string().not_null())
                    .col(ColumnDef::new(ConfigurationGlobal::SmtpHost).string().not_null())
                    .col(ColumnDef::new(ConfigurationGlobal::SmtpPort).integer().not_null())
                    .col(ColumnDef::new(ConfigurationGlobal::Username).string().not_null())
                    .col(ColumnDef::new(ConfigurationGlobal::Password).string().not_null())
                    .col(ColumnDef::new(ConfigurationGlobal::UseSsl).boolean().not_null())
                    .col(ColumnDef::new(ConfigurationGlobal::UseAuth).boolean().not_null())
                    .col(
                        ColumnDef::new(ConfigurationGlobal::IsActive)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        let conn = manager.get_connection();
        match conn.get_database_backend() {
            DatabaseBackend::Postgres | DatabaseBackend::Sqlite => {
                for sql in PARTIAL_INDEXES {
                    conn.execute_unprepared(sql).await?;
                }
                Ok(())
            }
            DatabaseBackend::MySql => Err(DbErr::Migration(
                "MySQL has no partial indexes; use PostgreSQL or SQLite".to_owned(),
            )),
        }
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ConfigurationGlobal::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ConfigurationClient::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ConfigurationClient {
    Table,
    ClientUuid,
    TenantKey,
    LanguageId,
    AppName,
    ReportTitle,
    IsDeleted,
}

#[derive(DeriveIden)]
enum ConfigurationGlobal {
    Table,
    GlobalId,
    FooterText,
    SmtpHost,
    SmtpPort,
    Username,
    Password,
    UseSsl,
    UseAuth,
    IsActive,
}

#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Test support utilities for configuration integration tests.
//!
//! Provides an in-memory database with migrations applied and builders for
//! configuration records.

#![allow(dead_code)] // Support module provides utilities that may not all be used

use std::sync::Arc;

use configuration::domain::service::{Service, ServiceConfig};
use configuration::infra::storage::{Migrator, SeaOrmConfigStore};
use configuration::{CallContext, GlobalConfig, MailTransport, NewClientConfig, NewGlobalConfig};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

/// Create a fresh in-memory `SQLite` database with migrations applied.
pub async fn inmem_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

pub fn service(db: &DatabaseConnection) -> Arc<Service<SeaOrmConfigStore>> {
    Arc::new(Service::new(
        Arc::new(SeaOrmConfigStore::new(db.clone())),
        ServiceConfig::default(),
    ))
}

pub fn ctx() -> CallContext {
    CallContext::new()
}

pub fn new_client(tenant_key: &str) -> NewClientConfig {
    NewClientConfig {
        tenant_key: tenant_key.to_owned(),
        language_id: 1,
        app_name: format!("{tenant_key}.example.com"),
        report_title: format!("Report for {tenant_key}"),
    }
}

pub fn new_global(footer_text: &str, active: bool) -> NewGlobalConfig {
    NewGlobalConfig {
        footer_text: footer_text.to_owned(),
        transport: MailTransport {
            host: "smtp.example.com".to_owned(),
            port: 587,
            username: "mailer".to_owned(),
            password: "secret".to_owned(),
            use_ssl: true,
            use_auth: true,
        },
        active,
    }
}

/// Insert one global record per flag, in order, and return the stored records.
pub async fn seed_globals(
    service: &Service<SeaOrmConfigStore>,
    active_flags: &[bool],
) -> Vec<GlobalConfig> {
    let mut seeded = Vec::with_capacity(active_flags.len());
    for (i, active) in active_flags.iter().enumerate() {
        let persisted = service
            .add_global(&ctx(), new_global(&format!("footer {i}"), *active))
            .await
            .expect("Failed to seed global configuration");
        seeded.push(persisted.record);
    }
    seeded
}

/// `(global_id, active)` pairs in id order.
pub async fn active_flags(service: &Service<SeaOrmConfigStore>) -> Vec<(i32, bool)> {
    service
        .list_globals(&ctx())
        .await
        .expect("Failed to list global configurations")
        .into_iter()
        .map(|g| (g.global_id, g.active))
        .collect()
}

use configuration_sdk::models::{ClientConfig, GlobalConfig, MailTransport, NewGlobalConfig};
use sea_orm::ActiveValue;

use super::entity::{client_config, global_config};

impl From<client_config::Model> for ClientConfig {
    fn from(entity: client_config::Model) -> Self {
        Self {
            client_uuid: entity.client_uuid,
            tenant_key: entity.tenant_key,
            language_id: entity.language_id,
            app_name: entity.app_name,
            report_title: entity.report_title,
            deleted: entity.is_deleted,
        }
    }
}

impl From<global_config::Model> for GlobalConfig {
    fn from(entity: global_config::Model) -> Self {
        Self {
            global_id: entity.global_id,
            footer_text: entity.footer_text,
            transport: MailTransport {
                host: entity.smtp_host,
                port: entity.smtp_port,
                username: entity.username,
                password: entity.password,
                use_ssl: entity.use_ssl,
                use_auth: entity.use_auth,
            },
            active: entity.is_active,
        }
    }
}

impl From<&ClientConfig> for client_config::ActiveModel {
    fn from(client: &ClientConfig) -> Self {
        Self {
            client_uuid: ActiveValue::Set(client.client_uuid),
            tenant_key: ActiveValue::Set(client.tenant_key.clone()),
            language_id: ActiveValue::Set(client.language_id),
            app_name: ActiveValue::Set(client.app_name.clone()),
            report_title: ActiveValue::Set(client.report_title.clone()),
            is_deleted: ActiveValue::Set(client.deleted),
        }
    }
}

/// Insert model; the store assigns `global_id`.
impl From<&NewGlobalConfig> for global_config::ActiveModel {
    fn from(global: &NewGlobalConfig) -> Self {
        let transport = &global.transport;
        Self {
            global_id: ActiveValue::NotSet,
            footer_text: ActiveValue::Set(global.footer_text.clone()),
            smtp_host: ActiveValue::Set(transport.host.clone()),
            smtp_port: ActiveValue::Set(transport.port),
            username: ActiveValue::Set(transport.username.clone()),
            password: ActiveValue::Set(transport.password.clone()),
            use_ssl: ActiveValue::Set(transport.use_ssl),
            use_auth: ActiveValue::Set(transport.use_auth),
            is_active: ActiveValue::Set(global.active),
        }
    }
}

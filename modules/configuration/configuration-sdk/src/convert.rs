//! Conversions between the SDK models and the generated protobuf types.
//!
//! Shared by the gRPC client in this crate and the gRPC server in the
//! configuration module, so both ends agree on the wire mapping.

use uuid::Uuid;

use crate::errors::ConfigurationError;
use crate::models::{
    ClientConfig, ConfigStatus, GlobalConfig, MailTransport, NewClientConfig, NewGlobalConfig,
};
use crate::proto;

impl From<ClientConfig> for proto::ClientConfig {
    fn from(client: ClientConfig) -> Self {
        Self {
            client_uuid: client.client_uuid.to_string(),
            tenant_key: client.tenant_key,
            language_id: client.language_id,
            app_name: client.app_name,
            report_title: client.report_title,
            deleted: client.deleted,
        }
    }
}

impl TryFrom<proto::ClientConfig> for ClientConfig {
    type Error = ConfigurationError;

    fn try_from(client: proto::ClientConfig) -> Result<Self, Self::Error> {
        let client_uuid = Uuid::parse_str(&client.client_uuid).map_err(|e| {
            ConfigurationError::invalid_argument(format!(
                "client_uuid '{}' is not a valid UUID: {e}",
                client.client_uuid
            ))
        })?;

        Ok(Self {
            client_uuid,
            tenant_key: client.tenant_key,
            language_id: client.language_id,
            app_name: client.app_name,
            report_title: client.report_title,
            deleted: client.deleted,
        })
    }
}

impl From<NewClientConfig> for proto::ClientConfig {
    fn from(client: NewClientConfig) -> Self {
        Self {
            client_uuid: String::new(),
            tenant_key: client.tenant_key,
            language_id: client.language_id,
            app_name: client.app_name,
            report_title: client.report_title,
            deleted: false,
        }
    }
}

impl From<proto::ClientConfig> for NewClientConfig {
    fn from(client: proto::ClientConfig) -> Self {
        Self {
            tenant_key: client.tenant_key,
            language_id: client.language_id,
            app_name: client.app_name,
            report_title: client.report_title,
        }
    }
}

impl From<GlobalConfig> for proto::GlobalConfig {
    fn from(global: GlobalConfig) -> Self {
        let MailTransport {
            host,
            port,
            username,
            password,
            use_ssl,
            use_auth,
        } = global.transport;

        Self {
            global_id: global.global_id,
            footer_text: global.footer_text,
            smtp_host: host,
            smtp_port: port,
            username,
            password,
            use_ssl,
            use_auth,
            active: global.active,
        }
    }
}

impl From<proto::GlobalConfig> for GlobalConfig {
    fn from(global: proto::GlobalConfig) -> Self {
        Self {
            global_id: global.global_id,
            footer_text: global.footer_text,
            transport: MailTransport {
                host: global.smtp_host,
                port: global.smtp_port,
                username: global.username,
                password: global.password,
                use_ssl: global.use_ssl,
                use_auth: global.use_auth,
            },
            active: global.active,
        }
    }
}

impl From<NewGlobalConfig> for proto::GlobalConfig {
    fn from(global: NewGlobalConfig) -> Self {
        GlobalConfig {
            global_id: 0,
            footer_text: global.footer_text,
            transport: global.transport,
            active: global.active,
        }
        .into()
    }
}

impl From<proto::GlobalConfig> for NewGlobalConfig {
    fn from(global: proto::GlobalConfig) -> Self {
        let GlobalConfig {
            footer_text,
            transport,
            active,
            ..
        } = global.into();

        Self {
            footer_text,
            transport,
            active,
        }
    }
}

impl From<ConfigStatus> for proto::ConfigStatus {
    fn from(status: ConfigStatus) -> Self {
        Self {
            created: status.created,
            updated: status.updated,
            deleted: status.deleted,
        }
    }
}

impl From<proto::ConfigStatus> for ConfigStatus {
    fn from(status: proto::ConfigStatus) -> Self {
        Self {
            created: status.created,
            updated: status.updated,
            deleted: status.deleted,
        }
    }
}

impl From<ConfigurationError> for tonic::Status {
    fn from(err: ConfigurationError) -> Self {
        match err {
            ConfigurationError::NotFound { message } => Self::not_found(message),
            ConfigurationError::NoDefaultAvailable => {
                Self::failed_precondition(ConfigurationError::NoDefaultAvailable.to_string())
            }
            ConfigurationError::Store { message } => Self::internal(message),
            ConfigurationError::Timeout { message } => Self::deadline_exceeded(message),
            ConfigurationError::InvalidArgument { message } => Self::invalid_argument(message),
            ConfigurationError::Transport { message } => Self::unavailable(message),
        }
    }
}

impl From<tonic::Status> for ConfigurationError {
    fn from(status: tonic::Status) -> Self {
        let message = status.message().to_owned();
        match status.code() {
            tonic::Code::NotFound => Self::not_found(message),
            tonic::Code::FailedPrecondition => Self::NoDefaultAvailable,
            tonic::Code::Internal => Self::store(message),
            tonic::Code::DeadlineExceeded | tonic::Code::Cancelled => Self::timeout(message),
            tonic::Code::InvalidArgument => Self::invalid_argument(message),
            _ => Self::transport(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_global() -> GlobalConfig {
        GlobalConfig {
            global_id: 3,
            footer_text: "Regards".to_owned(),
            transport: MailTransport {
                host: "smtp.example.com".to_owned(),
                port: 587,
                username: "mailer".to_owned(),
                password: "secret".to_owned(),
                use_ssl: true,
                use_auth: true,
            },
            active: true,
        }
    }

    #[test]
    fn global_config_maps_transport_fields() {
        let wire: proto::GlobalConfig = sample_global().into();
        assert_eq!(wire.smtp_host, "smtp.example.com");
        assert_eq!(wire.smtp_port, 587);
        assert!(wire.use_ssl && wire.use_auth && wire.active);

        let back: GlobalConfig = wire.into();
        assert_eq!(back, sample_global());
    }

    #[test]
    fn client_config_rejects_malformed_uuid() {
        let wire = proto::ClientConfig {
            client_uuid: "not-a-uuid".to_owned(),
            tenant_key: "012-031-234-542".to_owned(),
            ..proto::ClientConfig::default()
        };

        let err = ClientConfig::try_from(wire).unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidArgument { .. }));
    }

    #[test]
    fn new_client_ignores_wire_identity() {
        let wire = proto::ClientConfig {
            client_uuid: Uuid::new_v4().to_string(),
            tenant_key: "tenant-a".to_owned(),
            language_id: 2,
            app_name: "client1.example.com".to_owned(),
            report_title: "Client One".to_owned(),
            deleted: true,
        };

        let new_client = NewClientConfig::from(wire);
        assert_eq!(new_client.tenant_key, "tenant-a");
        assert_eq!(new_client.language_id, 2);
    }

    #[test]
    fn status_codes_round_trip_through_errors() {
        let cases = [
            ConfigurationError::not_found("x"),
            ConfigurationError::NoDefaultAvailable,
            ConfigurationError::store("x"),
            ConfigurationError::timeout("x"),
            ConfigurationError::invalid_argument("x"),
            ConfigurationError::transport("x"),
        ];

        for err in cases {
            let status: tonic::Status = err.clone().into();
            let back = ConfigurationError::from(status);
            assert_eq!(std::mem::discriminant(&back), std::mem::discriminant(&err));
        }
    }
}

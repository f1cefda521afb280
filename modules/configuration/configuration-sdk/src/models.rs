//! Public models for the configuration module.
//!
//! These are transport-agnostic data structures that define the contract
//! between the configuration module and its consumers.

use std::fmt;

use uuid::Uuid;

/// Per-tenant client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Identity generated by the service on creation. Never changes.
    pub client_uuid: Uuid,
    /// Lookup attribute (company subscription id).
    pub tenant_key: String,
    pub language_id: i32,
    pub app_name: String,
    pub report_title: String,
    /// Soft-delete flag. Deleted records stay in the store.
    pub deleted: bool,
}

/// Data for creating a new client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewClientConfig {
    pub tenant_key: String,
    pub language_id: i32,
    pub app_name: String,
    pub report_title: String,
}

impl NewClientConfig {
    /// Attach an identity, producing a live (not deleted) record.
    #[must_use]
    pub fn with_identity(self, client_uuid: Uuid) -> ClientConfig {
        ClientConfig {
            client_uuid,
            tenant_key: self.tenant_key,
            language_id: self.language_id,
            app_name: self.app_name,
            report_title: self.report_title,
            deleted: false,
        }
    }
}

/// Outgoing mail server settings carried by a global configuration.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct MailTransport {
    pub host: String,
    pub port: i32,
    pub username: String,
    pub password: String,
    pub use_ssl: bool,
    pub use_auth: bool,
}

impl fmt::Debug for MailTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailTransport")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .field("use_ssl", &self.use_ssl)
            .field("use_auth", &self.use_auth)
            .finish()
    }
}

/// Global configuration record. At most one record is active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalConfig {
    /// Store-assigned identity.
    pub global_id: i32,
    pub footer_text: String,
    pub transport: MailTransport,
    pub active: bool,
}

/// Data for creating a new global configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewGlobalConfig {
    pub footer_text: String,
    pub transport: MailTransport,
    pub active: bool,
}

/// Outcome flags reported for mutations.
///
/// The default value (all flags `false`) is the status of a mutation that
/// definitely did not happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfigStatus {
    pub created: bool,
    pub updated: bool,
    pub deleted: bool,
}

impl ConfigStatus {
    #[must_use]
    pub fn created(created: bool) -> Self {
        Self {
            created,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn updated(updated: bool) -> Self {
        Self {
            updated,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn deleted(deleted: bool) -> Self {
        Self {
            deleted,
            ..Self::default()
        }
    }
}

/// A record as stored, together with the mutation status that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persisted<T> {
    pub record: T,
    pub status: ConfigStatus,
}

/// The two configuration collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Client,
    Global,
}

impl RecordKind {
    /// Whether deletion of this kind only flips a flag instead of removing the row.
    #[must_use]
    pub const fn supports_soft_delete(self) -> bool {
        match self {
            Self::Client => true,
            Self::Global => false,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client configuration",
            Self::Global => "global configuration",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key addressing the records removed by a delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordKey {
    /// Every live client configuration sharing this tenant key.
    TenantKey(String),
    /// The global configuration with this id.
    GlobalId(i32),
}

impl RecordKey {
    #[must_use]
    pub const fn kind(&self) -> RecordKind {
        match self {
            Self::TenantKey(_) => RecordKind::Client,
            Self::GlobalId(_) => RecordKind::Global,
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TenantKey(key) => write!(f, "tenant_key={key}"),
            Self::GlobalId(id) => write!(f, "global_id={id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_client_records_are_soft_deleted() {
        assert!(RecordKind::Client.supports_soft_delete());
        assert!(!RecordKind::Global.supports_soft_delete());
        assert_eq!(RecordKey::TenantKey("t".to_owned()).kind(), RecordKind::Client);
        assert_eq!(RecordKey::GlobalId(7).kind(), RecordKind::Global);
    }

    #[test]
    fn default_status_reports_nothing_happened() {
        let status = ConfigStatus::default();
        assert!(!status.created && !status.updated && !status.deleted);
        assert!(ConfigStatus::updated(true).updated);
        assert!(!ConfigStatus::updated(true).created);
    }

    #[test]
    fn debug_output_hides_mail_password() {
        let transport = MailTransport {
            password: "hunter2".to_owned(),
            ..MailTransport::default()
        };
        let rendered = format!("{transport:?}");
        assert!(!rendered.contains("hunter2"));
    }
}

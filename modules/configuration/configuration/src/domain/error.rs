use configuration_sdk::errors::ConfigurationError;
use configuration_sdk::models::{RecordKey, RecordKind};

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("{kind} not found ({key})")]
    NotFound { kind: RecordKind, key: String },

    #[error("No global configuration available to use as default")]
    NoDefaultAvailable,

    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),

    #[error("Operation '{operation}' exceeded its deadline")]
    Timeout { operation: &'static str },
}

impl DomainError {
    #[must_use]
    pub fn not_found(kind: RecordKind, key: &impl ToString) -> Self {
        Self::NotFound {
            kind,
            key: key.to_string(),
        }
    }

    #[must_use]
    pub fn not_found_key(key: &RecordKey) -> Self {
        Self::not_found(key.kind(), key)
    }

    #[must_use]
    pub fn timeout(operation: &'static str) -> Self {
        Self::Timeout { operation }
    }
}

impl From<DomainError> for ConfigurationError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound { kind, key } => {
                Self::not_found(format!("{kind} not found ({key})"))
            }
            DomainError::NoDefaultAvailable => Self::NoDefaultAvailable,
            DomainError::Store(_) => Self::store("internal store error"),
            DomainError::Timeout { operation } => Self::timeout(operation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_details_are_not_exposed() {
        let err = DomainError::Store(anyhow::anyhow!("password authentication failed for user"));
        let public: ConfigurationError = err.into();
        assert_eq!(public, ConfigurationError::store("internal store error"));
    }

    #[test]
    fn not_found_names_the_key() {
        let err = DomainError::not_found_key(&RecordKey::TenantKey("012-031".to_owned()));
        let public: ConfigurationError = err.into();
        assert_eq!(
            public,
            ConfigurationError::not_found("client configuration not found (tenant_key=012-031)")
        );
    }
}

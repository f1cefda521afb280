//! Configuration Module Implementation
//!
//! Client configurations keyed by tenant and global configurations with a
//! single active record. The public API is defined in `configuration-sdk`
//! and re-exported here.

pub use configuration_sdk::{
    CallContext, ClientConfig, ConfigStatus, ConfigurationApi, ConfigurationError, GlobalConfig,
    MailTransport, NewClientConfig, NewGlobalConfig, Persisted, RecordKey, RecordKind,
};

pub mod local_client;
pub use local_client::LocalClient;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod config;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod infra;

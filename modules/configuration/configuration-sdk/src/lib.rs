//! Configuration SDK
//!
//! This crate provides everything needed to consume the configuration service:
//! - API trait (`ConfigurationApi`)
//! - Models and error types (`ConfigurationError`)
//! - Remote gRPC client (`ConfigurationGrpcClient`)
//! - Proto stubs for server implementation
//!
//! ## Usage
//!
//! ```ignore
//! use configuration_sdk::{CallContext, ConfigurationApi, ConfigurationGrpcClient};
//!
//! let client = ConfigurationGrpcClient::connect("http://127.0.0.1:50051").await?;
//! let ctx = CallContext::with_timeout(Duration::from_secs(5));
//! let active = client.get_active_global(&ctx).await?;
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]

// === API TRAIT AND TYPES ===
pub mod api;
pub mod context;
pub mod errors;
pub mod models;

pub use api::ConfigurationApi;
pub use context::CallContext;
pub use errors::ConfigurationError;
pub use models::{
    ClientConfig, ConfigStatus, GlobalConfig, MailTransport, NewClientConfig, NewGlobalConfig,
    Persisted, RecordKey, RecordKind,
};

// === GRPC CLIENT ===
mod client;
mod convert;
pub mod transport;

pub use client::ConfigurationGrpcClient;
pub use transport::GrpcClientConfig;

// === GRPC PROTO STUBS (for server implementation) ===
/// Generated protobuf types for `ConfigurationService`
#[allow(clippy::pedantic)]
pub mod proto {
    tonic::include_proto!("configuration.v1");
}

// Re-export proto types needed by server
pub use proto::configuration_service_server::{ConfigurationService, ConfigurationServiceServer};

/// Service name constant for `ConfigurationService`
pub const SERVICE_NAME: &str = "configuration.v1.ConfigurationService";

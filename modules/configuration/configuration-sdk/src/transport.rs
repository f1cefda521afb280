//! gRPC client transport configuration.
//!
//! Connect and RPC timeouts plus HTTP/2 keepalive. Per-call deadlines from a
//! [`crate::CallContext`] are applied on top of the transport RPC timeout.

use std::time::Duration;

use tonic::transport::{Channel, Endpoint};
use tracing::Instrument;

/// Configuration for the gRPC client transport stack.
#[derive(Debug, Clone)]
pub struct GrpcClientConfig {
    /// Timeout for establishing the initial connection.
    pub connect_timeout: Duration,

    /// Upper bound for individual RPC calls.
    pub rpc_timeout: Duration,

    /// Service name for tracing.
    pub service_name: &'static str,
}

impl Default for GrpcClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            rpc_timeout: Duration::from_secs(30),
            service_name: crate::SERVICE_NAME,
        }
    }
}

impl GrpcClientConfig {
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_rpc_timeout(mut self, timeout: Duration) -> Self {
        self.rpc_timeout = timeout;
        self
    }
}

fn build_endpoint(uri: String, cfg: &GrpcClientConfig) -> Result<Endpoint, tonic::transport::Error> {
    let endpoint = Endpoint::from_shared(uri)?
        .connect_timeout(cfg.connect_timeout)
        .timeout(cfg.rpc_timeout)
        .tcp_keepalive(Some(Duration::from_secs(30)))
        .http2_keep_alive_interval(Duration::from_secs(30))
        .keep_alive_timeout(Duration::from_secs(10))
        .keep_alive_while_idle(true);

    Ok(endpoint)
}

/// Open a channel to `uri` using the configured timeouts and keepalive.
///
/// # Errors
/// Returns an error if the URI is invalid or the connection cannot be established.
pub async fn connect(uri: impl Into<String>, cfg: &GrpcClientConfig) -> anyhow::Result<Channel> {
    let uri = uri.into();
    let span = tracing::debug_span!("grpc_connect", service = cfg.service_name, uri = %uri);

    async move {
        let endpoint = build_endpoint(uri, cfg)?;
        let channel = endpoint.connect().await?;
        tracing::debug!(
            connect_timeout_ms = u64::try_from(cfg.connect_timeout.as_millis()).unwrap_or(u64::MAX),
            rpc_timeout_ms = u64::try_from(cfg.rpc_timeout.as_millis()).unwrap_or(u64::MAX),
            "gRPC channel established"
        );
        Ok(channel)
    }
    .instrument(span)
    .await
}

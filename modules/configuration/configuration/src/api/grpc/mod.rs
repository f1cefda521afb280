//! gRPC delivery for the configuration service.

mod server;

use std::sync::Arc;

use configuration_sdk::ConfigurationServiceServer;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tokio_util::sync::CancellationToken;
use tonic::transport::Server;

use crate::domain::repo::ConfigStore;
use crate::domain::service::Service;

pub use server::{ConfigurationServiceImpl, call_context};

/// Serve the configuration gRPC service on an already bound listener until
/// `cancel` fires.
///
/// # Errors
/// Returns an error if the listener address cannot be read or the server fails.
pub async fn serve<R: ConfigStore + 'static>(
    listener: TcpListener,
    service: Arc<Service<R>>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let bound_addr = listener.local_addr()?;
    tracing::info!(%bound_addr, transport = "tcp", "Configuration gRPC service listening");

    let incoming = TcpListenerStream::new(listener);
    Server::builder()
        .add_service(ConfigurationServiceServer::new(ConfigurationServiceImpl::new(
            service,
        )))
        .serve_with_incoming_shutdown(incoming, async move {
            cancel.cancelled().await;
        })
        .await?;

    tracing::info!("Configuration gRPC service stopped");
    Ok(())
}

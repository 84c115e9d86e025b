//! Traits at the seams between the core and its presentation layers

use crate::errors::PresentationError;
use async_trait::async_trait;

/// A server that exposes the EchoAPI operations to clients
#[async_trait]
pub trait PresentationAdapter: Send + Sync {
    /// Bind and serve until [`PresentationAdapter::stop`] is called
    async fn start(&self) -> Result<(), PresentationError>;

    /// Ask a running server to finish in-flight requests and return
    async fn stop(&self) -> Result<(), PresentationError>;
}

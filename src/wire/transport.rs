//! Transport seam between the driver and an RPC channel.
//!
//! The driver never speaks a concrete RPC framework. A [`Connector`]
//! establishes a channel for an endpoint URI and hands back a
//! [`GqlTransport`], which performs one call per protocol RPC. Statement
//! execution returns a [`FrameStream`] that yields frames lazily, one
//! network read per poll.

use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use futures::Stream;

use super::error::TransportResult;
use super::message::{
    BeginRequest, BeginResponse, CloseRequest, CommitRequest, CommitResponse, ConfigureRequest,
    Credentials, ExecuteRequest, ExecuteResponse, HandshakeRequest, HandshakeResponse,
    PingRequest, PingResponse, ResetRequest, RollbackRequest, RollbackResponse,
};

/// Server-streamed frames of one execution.
pub type FrameStream = Pin<Box<dyn Stream<Item = TransportResult<ExecuteResponse>> + Send>>;

/// One established RPC channel.
///
/// Implementations must be safe to share between tasks; the driver holds
/// the transport behind an `Arc` and may issue calls from several sessions.
#[async_trait]
pub trait GqlTransport: Send + Sync {
    /// Open a session.
    async fn handshake(&self, request: HandshakeRequest) -> TransportResult<HandshakeResponse>;

    /// Set one session property.
    async fn configure(&self, request: ConfigureRequest) -> TransportResult<()>;

    /// Restore session defaults.
    async fn reset(&self, request: ResetRequest) -> TransportResult<()>;

    /// Liveness check.
    async fn ping(&self, request: PingRequest) -> TransportResult<PingResponse>;

    /// End a session.
    async fn close(&self, request: CloseRequest) -> TransportResult<()>;

    /// Start an execution. Frames are read from the returned stream.
    async fn execute(&self, request: ExecuteRequest) -> TransportResult<FrameStream>;

    /// Begin an explicit transaction.
    async fn begin_transaction(&self, request: BeginRequest) -> TransportResult<BeginResponse>;

    /// Commit a transaction.
    async fn commit(&self, request: CommitRequest) -> TransportResult<CommitResponse>;

    /// Roll back a transaction.
    async fn rollback(&self, request: RollbackRequest) -> TransportResult<RollbackResponse>;

    /// Release the channel.
    async fn shutdown(&self) -> TransportResult<()> {
        Ok(())
    }
}

/// Establishes transports.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Open a channel to `uri` (`http://host:port`, or `https://` for TLS).
    async fn connect(
        &self,
        uri: &str,
        credentials: Option<&Credentials>,
    ) -> TransportResult<Arc<dyn GqlTransport>>;
}

/// Connector that always returns the same, already established transport.
#[derive(Clone)]
pub struct SharedTransport(pub Arc<dyn GqlTransport>);

#[async_trait]
impl Connector for SharedTransport {
    async fn connect(
        &self,
        _uri: &str,
        _credentials: Option<&Credentials>,
    ) -> TransportResult<Arc<dyn GqlTransport>> {
        Ok(Arc::clone(&self.0))
    }
}

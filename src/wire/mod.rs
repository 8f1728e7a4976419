//! # GQL Wire Protocol
//!
//! Low-level message types and the transport seam of the GQL wire protocol.
//!
//! ## Overview
//!
//! The protocol carries GQL statements over an RPC channel. This module
//! provides:
//!
//! - **Values** - The tagged-union value message and its graph/temporal parts
//! - **Messages** - Request/response pairs of every RPC plus execution frames
//! - **Transport** - Async traits a concrete RPC channel implements
//! - **Errors** - Transport-level failures
//!
//! ## Submodules
//!
//! - [`value`] - Wire value representation
//! - [`message`] - RPC messages and frames
//! - [`transport`] - `GqlTransport` and `Connector` traits
//! - [`error`] - Transport error types
//!
//! ## Note
//!
//! Most users should use the high-level [`crate::driver`] module instead of
//! interacting with wire messages directly.

pub mod error;
pub mod message;
pub mod transport;
pub mod value;

pub use error::{TransportError, TransportResult};
pub use message::{
    BeginRequest, BeginResponse, CloseRequest, ColumnDescriptor, CommitRequest, CommitResponse,
    ConfigureRequest, Credentials, DiagnosticRecord, ExecuteRequest, ExecuteResponse, Frame,
    GqlStatus, HandshakeRequest, HandshakeResponse, PingRequest, PingResponse, ResetRequest,
    ResetTarget, ResultHeader, ResultType, RollbackRequest, RollbackResponse, RowBatch,
    ServerInfo, SessionProperty, SummaryMessage, TransactionMode, PROTOCOL_VERSION,
};
pub use transport::{Connector, FrameStream, GqlTransport, SharedTransport};
pub use value::{
    Kind, WireDate, WireDecimal, WireDuration, WireEdge, WireField, WireLocalDateTime,
    WireLocalTime, WireNode, WirePath, WireRecord, WireRow, WireValue, WireZonedDateTime,
    WireZonedTime,
};

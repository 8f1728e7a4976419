//! Request and response messages of the GQL wire protocol.
//!
//! One request/response pair per RPC, grouped by service:
//!
//! - Session service: `Handshake`, `Configure`, `Reset`, `Ping`, `Close`
//! - Statement execution: `Execute` (server-streamed [`ExecuteResponse`] frames)
//! - Transactions: `BeginTransaction`, `Commit`, `Rollback`

use std::collections::HashMap;

use super::value::{WireRow, WireValue};

/// Protocol version announced in the handshake.
pub const PROTOCOL_VERSION: u32 = 1;

// ============================================================================
// Status
// ============================================================================

/// A GQLSTATUS outcome reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GqlStatus {
    /// Five-character GQLSTATUS code
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Diagnostic details
    pub diagnostic: Option<DiagnosticRecord>,
    /// Underlying status that caused this one
    pub cause: Option<Box<GqlStatus>>,
}

/// Diagnostic area attached to a status.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiagnosticRecord {
    /// Operation that produced the status (e.g. "INSERT")
    pub operation: String,
    /// Numeric operation code
    pub operation_code: i32,
    /// Schema current when the status was raised
    pub current_schema: Option<String>,
}

// ============================================================================
// Session service
// ============================================================================

/// Credentials presented in the handshake.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Credentials {
    /// Anonymous
    #[default]
    None,
    /// Username and password
    Basic {
        /// Login name
        username: String,
        /// Password
        password: String,
    },
    /// Opaque bearer token
    Bearer {
        /// Token value
        token: String,
    },
}

impl Credentials {
    /// Username/password credentials.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Bearer token credentials.
    pub fn bearer(token: impl Into<String>) -> Self {
        Credentials::Bearer {
            token: token.into(),
        }
    }

    /// Scheme name.
    pub fn scheme(&self) -> &'static str {
        match self {
            Credentials::None => "none",
            Credentials::Basic { .. } => "basic",
            Credentials::Bearer { .. } => "bearer",
        }
    }
}

/// Handshake request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HandshakeRequest {
    /// Version the client speaks
    pub protocol_version: u32,
    /// Authentication, if any
    pub credentials: Option<Credentials>,
    /// Free-form client metadata
    pub client_info: HashMap<String, String>,
}

/// Handshake response.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HandshakeResponse {
    /// Version the server agreed to
    pub protocol_version: u32,
    /// Identifier of the new session
    pub session_id: String,
    /// Server identification
    pub server_info: Option<ServerInfo>,
}

/// Server identification returned by the handshake.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ServerInfo {
    /// Product name
    pub name: String,
    /// Product version
    pub version: String,
    /// Optional features the server supports
    pub features: Vec<String>,
}

/// A single session property to set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionProperty {
    /// Current graph
    Graph(String),
    /// Current schema
    Schema(String),
    /// Time zone as minutes east of UTC
    TimeZoneOffsetMinutes(i32),
}

/// Configure request. Carries exactly one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigureRequest {
    /// Target session
    pub session_id: String,
    /// Property to set
    pub property: SessionProperty,
}

/// What a reset restores to defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetTarget {
    /// Every session characteristic
    #[default]
    All,
    /// Current schema only
    Schema,
    /// Current graph only
    Graph,
    /// Time zone only
    TimeZone,
}

/// Reset request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetRequest {
    /// Target session
    pub session_id: String,
    /// What to reset
    pub target: ResetTarget,
}

/// Ping request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PingRequest {
    /// Target session
    pub session_id: String,
}

/// Ping response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PingResponse {
    /// Server timestamp
    pub timestamp: i64,
}

/// Close request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseRequest {
    /// Session to close
    pub session_id: String,
}

// ============================================================================
// Statement execution
// ============================================================================

/// Execute request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExecuteRequest {
    /// Target session
    pub session_id: String,
    /// GQL text
    pub statement: String,
    /// Named parameters, without the `$` prefix
    pub parameters: HashMap<String, WireValue>,
    /// Set when the statement runs inside an explicit transaction
    pub transaction_id: Option<String>,
}

/// One streamed frame of an execution. The frame may be empty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExecuteResponse {
    /// Payload, absent for an empty frame
    pub frame: Option<Frame>,
}

/// Frame payloads. Order on the wire: Header?, RowBatch*, Summary.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// Result shape
    Header(ResultHeader),
    /// A batch of rows
    RowBatch(RowBatch),
    /// Final outcome
    Summary(SummaryMessage),
}

impl From<Frame> for ExecuteResponse {
    fn from(frame: Frame) -> Self {
        Self { frame: Some(frame) }
    }
}

/// Kind of result an execution produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultType {
    /// Unspecified
    #[default]
    Unspecified,
    /// Table of bindings (rows)
    BindingTable,
    /// Graph result
    Graph,
    /// No result body
    Omitted,
}

/// Column of a binding table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnDescriptor {
    /// Column name
    pub name: String,
    /// Declared value type, if the server reports one
    pub type_name: Option<String>,
}

impl ColumnDescriptor {
    /// Column with a name and no declared type.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: None,
        }
    }
}

/// Header frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultHeader {
    /// Kind of result
    pub result_type: ResultType,
    /// Columns in row order
    pub columns: Vec<ColumnDescriptor>,
}

impl ResultHeader {
    /// Binding-table header with the given column names.
    pub fn binding_table<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            result_type: ResultType::BindingTable,
            columns: names.into_iter().map(ColumnDescriptor::named).collect(),
        }
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

/// Row batch frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowBatch {
    /// Rows in stream order
    pub rows: Vec<WireRow>,
}

/// Summary frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummaryMessage {
    /// Final outcome of the statement
    pub status: Option<GqlStatus>,
    /// Additional warning statuses
    pub warnings: Vec<GqlStatus>,
    /// Rows changed by a data-modifying statement
    pub rows_affected: i64,
    /// Named update counters (e.g. "nodes_created")
    pub counters: HashMap<String, i64>,
}

// ============================================================================
// Transactions
// ============================================================================

/// Transaction access mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionMode {
    /// Read-only
    ReadOnly,
    /// Read-write (default)
    #[default]
    ReadWrite,
}

impl TransactionMode {
    /// Mode from a read-only flag.
    pub fn from_read_only(read_only: bool) -> Self {
        if read_only {
            TransactionMode::ReadOnly
        } else {
            TransactionMode::ReadWrite
        }
    }

    /// Convert to string for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionMode::ReadOnly => "READ ONLY",
            TransactionMode::ReadWrite => "READ WRITE",
        }
    }
}

/// Begin request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeginRequest {
    /// Target session
    pub session_id: String,
    /// Access mode
    pub mode: TransactionMode,
}

/// Begin response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BeginResponse {
    /// Identifier of the new transaction
    pub transaction_id: String,
    /// Outcome of the begin
    pub status: Option<GqlStatus>,
}

/// Commit request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRequest {
    /// Owning session
    pub session_id: String,
    /// Transaction to commit
    pub transaction_id: String,
}

/// Commit response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommitResponse {
    /// Outcome of the commit
    pub status: Option<GqlStatus>,
}

/// Rollback request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollbackRequest {
    /// Owning session
    pub session_id: String,
    /// Transaction to roll back
    pub transaction_id: String,
}

/// Rollback response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RollbackResponse {
    /// Outcome of the rollback
    pub status: Option<GqlStatus>,
}

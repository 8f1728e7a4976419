//! # GWP Driver
//!
//! An async Rust client for graph databases speaking the GQL wire protocol
//! (GWP): GQL statements carried over an RPC channel with server-streamed
//! results.
//!
//! ## Features
//!
//! - **Lazy result cursors** - Frames are pulled from the server stream only
//!   as rows are read
//! - **Async/Await** - Built on Tokio, with cancellation and request timeouts
//!   at every suspension point
//! - **Transactions** - Explicit begin/commit/rollback plus scoped transaction
//!   functions that commit on success and roll back on error
//! - **GQLSTATUS** - Server status codes classified into success, warning,
//!   no-data and exception
//! - **Type Safety** - Strongly typed values, graph elements and temporal types
//!
//! ## Transport
//!
//! The driver does not bundle an RPC stack. A concrete channel implements
//! [`wire::GqlTransport`], and a [`wire::Connector`] creates one for an
//! endpoint.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use gwp_driver::{Connection, Credentials};
//! use gwp_driver::wire::Connector;
//!
//! async fn run(connector: &dyn Connector) -> Result<(), Box<dyn std::error::Error>> {
//!     let conn = Connection::connect(
//!         connector,
//!         "gwp://localhost:50051",
//!         Some(Credentials::basic("admin", "secret")),
//!     )
//!     .await?;
//!     let mut session = conn.create_session().await?;
//!
//!     let mut cursor = session
//!         .execute(
//!             "MATCH (n:Person) WHERE n.age > $age RETURN n.name AS name",
//!             Some(gwp_driver::params! { "age" => 30i64 }),
//!         )
//!         .await?;
//!
//!     while let Some(row) = cursor.next_row().await? {
//!         println!("{}", row.get_string("name")?);
//!     }
//!     cursor.error_for_status().await?;
//!
//!     session.close().await?;
//!     conn.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Transaction Functions
//!
//! ```rust,no_run
//! # use gwp_driver::{Session, DriverResult};
//! # async fn example(session: &Session) -> DriverResult<()> {
//! let created = session
//!     .write_transaction(|tx| {
//!         Box::pin(async move {
//!             let mut cursor = tx.execute("INSERT (:Person {name: 'Alice'})", None).await?;
//!             cursor.rows_affected().await
//!         })
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Value Types
//!
//! ```rust
//! use gwp_driver::{Node, Value};
//!
//! let integer = Value::from(42i64);
//! let list = Value::from(vec![1i64, 2, 3]);
//! let node = Node::new(vec![1u8]).with_label("Person").with_property("name", "Alice");
//! assert!(node.has_label("Person"));
//! ```
//!
//! ## Modules
//!
//! - [`driver`] - Connection, session, transaction, cursor and value types
//! - [`wire`] - Protocol messages and the transport seam

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod driver;
pub mod wire;

// Re-exports for convenience
pub use driver::{
    Connection, ConnectionConfig, ConnectionConfigBuilder, Credentials, DriverError,
    DriverResult, Edge, Endpoint, GqlStatus, Node, Path, Record, ResultCursor, ResultSummary,
    Row, RowStream, Session, SessionConfig, SessionConfigBuilder, Statement, Transaction,
    TransactionMode, TransactionState, Value,
};

//! Driver Module
//!
//! GQL 와이어 프로토콜 클라이언트 엔진
//!
//! # 구성
//!
//! - 값 모델 (Value, Node, Edge, Path, Record, 시간 타입)
//! - 값 코덱 (Value ↔ WireValue)
//! - GQLSTATUS 분류
//! - 결과 커서와 행 스트림 (ResultCursor, RowStream)
//! - 세션, 트랜잭션, 연결 (Session, Transaction, Connection)
//!
//! # Example
//!
//! ```ignore
//! use gwp_driver::driver::{Connection, Credentials, TransactionMode};
//! use gwp_driver::params;
//!
//! let conn = Connection::connect(&connector, "gwp://localhost:50051", None).await?;
//! let mut session = conn.create_session().await?;
//!
//! // 문장 실행
//! let mut cursor = session
//!     .execute("MATCH (n:Person) RETURN n.name AS name", None)
//!     .await?;
//! while let Some(row) = cursor.next_row().await? {
//!     println!("{}", row.get_string("name")?);
//! }
//!
//! // 트랜잭션
//! let mut tx = session.begin_transaction(TransactionMode::ReadWrite).await?;
//! tx.execute("INSERT (:Person {name: $name})", Some(params! { "name" => "Alice" }))
//!     .await?;
//! tx.commit().await?;
//!
//! session.close().await?;
//! conn.close().await?;
//! ```

pub mod codec;
pub mod reactive;
pub mod status;
pub mod temporal;
mod connection;
mod cursor;
mod error;
mod row;
mod rpc;
mod session;
mod transaction;
mod types;

#[cfg(test)]
mod stub;

// Re-exports
pub use connection::{
    Connection, ConnectionConfig, ConnectionConfigBuilder, Endpoint, DEFAULT_PORT,
};
pub use cursor::{ResultCursor, ResultSummary, Termination};
pub use error::{DriverError, DriverResult};
pub use reactive::RowStream;
pub use row::{Columns, Row};
pub use session::{Session, SessionConfig, SessionConfigBuilder, Statement};
pub use status::StatusKind;
pub use temporal::{Date, Duration, LocalDateTime, LocalTime, ZonedDateTime, ZonedTime};
pub use transaction::{Transaction, TransactionState};
pub use types::{Edge, Field, Node, Path, Record, Value};

pub use crate::wire::{
    Credentials, DiagnosticRecord, GqlStatus, ResetTarget, ResultHeader, ResultType,
    ServerInfo, TransactionMode,
};

/// 파라미터 맵 생성 매크로
#[macro_export]
macro_rules! params {
    () => {
        std::collections::HashMap::<String, $crate::driver::Value>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = std::collections::HashMap::<String, $crate::driver::Value>::new();
        $(
            map.insert(String::from($key), $crate::driver::Value::from($value));
        )+
        map
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_macro() {
        let empty = params!();
        assert!(empty.is_empty());

        let params = params! {
            "name" => "Alice",
            "age" => 30i64,
            "tags" => vec!["a", "b"],
        };
        assert_eq!(params.len(), 3);
        assert_eq!(params.get("name"), Some(&Value::String("Alice".into())));
        assert_eq!(params.get("age"), Some(&Value::Integer(30)));
        assert!(matches!(params.get("tags"), Some(Value::List(items)) if items.len() == 2));
    }
}

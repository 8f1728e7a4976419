//! Driver Error Types
//!
//! 드라이버 에러 정의

use thiserror::Error;

use crate::wire::{DiagnosticRecord, GqlStatus, TransportError};

// ============================================================================
// DriverError - 드라이버 에러
// ============================================================================

/// 드라이버 에러
#[derive(Error, Debug)]
pub enum DriverError {
    /// 연결 수립 실패
    #[error("Connection error: {endpoint}: {message}")]
    Connection {
        /// 대상 엔드포인트
        endpoint: String,
        /// 실패 내용
        message: String,
        /// 전송 계층 원인
        #[source]
        source: Option<TransportError>,
    },

    /// 세션 에러
    #[error("Session error: {0}")]
    Session(String),

    /// 트랜잭션 에러
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// 서버가 보고한 GQLSTATUS 예외
    #[error("GQL status error: [{}] {}", .status.code, .status.message)]
    GqlStatus {
        /// 예외 상태
        status: GqlStatus,
    },

    /// 전송 계층 에러
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// 타임아웃 에러
    #[error("Timeout: {0}")]
    Timeout(String),

    /// 취소됨
    #[error("Operation cancelled")]
    Cancelled,

    /// 설정 에러
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// 타입 변환 에러
    #[error("Type conversion error: {0}")]
    TypeConversion(String),

    /// 속성/필드 조회 실패
    #[error("Lookup error: {0}")]
    Lookup(String),
}

impl DriverError {
    /// 연결 에러 생성
    pub fn connection(
        endpoint: impl Into<String>,
        message: impl Into<String>,
        source: Option<TransportError>,
    ) -> Self {
        Self::Connection {
            endpoint: endpoint.into(),
            message: message.into(),
            source,
        }
    }

    /// 세션 에러 생성
    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }

    /// 트랜잭션 에러 생성
    pub fn transaction(msg: impl Into<String>) -> Self {
        Self::Transaction(msg.into())
    }

    /// GQLSTATUS 에러 생성
    pub fn gql(status: GqlStatus) -> Self {
        Self::GqlStatus { status }
    }

    /// 타임아웃 에러 생성
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// 설정 에러 생성
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// 타입 변환 에러 생성
    pub fn type_conversion(msg: impl Into<String>) -> Self {
        Self::TypeConversion(msg.into())
    }

    /// 조회 에러 생성
    pub fn lookup(msg: impl Into<String>) -> Self {
        Self::Lookup(msg.into())
    }

    /// 상태가 예외 클래스면 에러로 변환
    pub fn check_status(status: Option<&GqlStatus>) -> DriverResult<()> {
        match status {
            Some(s) if s.is_exception() => Err(Self::gql(s.clone())),
            _ => Ok(()),
        }
    }

    /// GQLSTATUS
    pub fn gql_status(&self) -> Option<&GqlStatus> {
        match self {
            Self::GqlStatus { status } => Some(status),
            _ => None,
        }
    }

    /// GQLSTATUS 코드
    pub fn status_code(&self) -> Option<&str> {
        self.gql_status().map(|s| s.code.as_str())
    }

    /// 진단 정보
    pub fn diagnostic(&self) -> Option<&DiagnosticRecord> {
        self.gql_status().and_then(|s| s.diagnostic.as_ref())
    }

    /// 재시도 가능 여부
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::Transport(e) => e.is_transient(),
            Self::Connection { source, .. } => source.as_ref().map_or(true, |e| e.is_transient()),
            Self::GqlStatus { status } => status.class() == "40",
            _ => false,
        }
    }
}

// ============================================================================
// Result Type
// ============================================================================

/// 드라이버 결과 타입
pub type DriverResult<T> = Result<T, DriverError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::status;

    #[test]
    fn test_driver_error_display() {
        let err = DriverError::session("session is closed");
        assert_eq!(err.to_string(), "Session error: session is closed");

        let err = DriverError::gql(GqlStatus::error(status::INVALID_SYNTAX, "unexpected token"));
        assert_eq!(err.to_string(), "GQL status error: [42001] unexpected token");

        let err = DriverError::connection("db:50051", "refused", None);
        assert_eq!(err.to_string(), "Connection error: db:50051: refused");
    }

    #[test]
    fn test_check_status() {
        assert!(DriverError::check_status(None).is_ok());
        assert!(DriverError::check_status(Some(&GqlStatus::success())).is_ok());
        assert!(DriverError::check_status(Some(&GqlStatus::error(status::WARNING, "w"))).is_ok());

        let err = DriverError::check_status(Some(&GqlStatus::error(status::DIVISION_BY_ZERO, "x/0")))
            .unwrap_err();
        assert_eq!(err.status_code(), Some(status::DIVISION_BY_ZERO));
    }

    #[test]
    fn test_diagnostic_access() {
        let err = DriverError::gql(GqlStatus::error_with_diagnostic(
            status::GRAPH_TYPE_VIOLATION,
            "label not allowed",
            "INSERT",
            50,
        ));
        let diagnostic = err.diagnostic().unwrap();
        assert_eq!(diagnostic.operation, "INSERT");
        assert_eq!(diagnostic.operation_code, 50);
    }

    #[test]
    fn test_transport_source() {
        use std::error::Error;

        let err = DriverError::connection(
            "db:50051",
            "handshake failed",
            Some(TransportError::Unavailable("no route".into())),
        );
        assert!(err.source().is_some());

        let err: DriverError = TransportError::Closed.into();
        assert!(matches!(err, DriverError::Transport(TransportError::Closed)));
    }

    #[test]
    fn test_driver_error_retryable() {
        assert!(DriverError::timeout("ping").is_retryable());
        assert!(DriverError::Transport(TransportError::Timeout).is_retryable());
        assert!(DriverError::gql(GqlStatus::error(status::TRANSACTION_ROLLBACK, "")).is_retryable());
        assert!(!DriverError::gql(GqlStatus::error(status::INVALID_SYNTAX, "")).is_retryable());
        assert!(!DriverError::session("closed").is_retryable());
    }
}

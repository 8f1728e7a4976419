//! GQLSTATUS 분류
//!
//! 5자리 GQLSTATUS 코드의 클래스(앞 2자리)로 결과를 분류합니다.
//!
//! | 클래스 | 의미 |
//! |--------|------|
//! | `00` | 성공 |
//! | `01` | 경고 |
//! | `02` | 데이터 없음 |
//! | `03` | 정보 |
//! | `04`-`07` | 예약 (예외 아님) |
//! | `08` 이상, 영문자로 시작 | 예외 |

use crate::wire::{DiagnosticRecord, GqlStatus};

// ============================================================================
// 상태 코드 상수
// ============================================================================

/// 성공
pub const SUCCESS: &str = "00000";
/// 결과 생략
pub const OMITTED_RESULT: &str = "00001";
/// 경고
pub const WARNING: &str = "01000";
/// 문자열 잘림 경고
pub const WARNING_STRING_TRUNCATION: &str = "01004";
/// 집계 시 NULL 제거 경고
pub const WARNING_NULL_ELIMINATED: &str = "01G11";
/// 데이터 없음
pub const NO_DATA: &str = "02000";
/// 데이터 예외
pub const DATA_EXCEPTION: &str = "22000";
/// 문자열 잘림
pub const STRING_TRUNCATION: &str = "22001";
/// 수치 범위 초과
pub const NUMERIC_OUT_OF_RANGE: &str = "22003";
/// NULL 허용 안 됨
pub const NULL_NOT_ALLOWED: &str = "22004";
/// 잘못된 날짜/시간 형식
pub const INVALID_DATETIME_FORMAT: &str = "22007";
/// 날짜/시간 오버플로
pub const DATETIME_OVERFLOW: &str = "22008";
/// 0으로 나누기
pub const DIVISION_BY_ZERO: &str = "22012";
/// 잘못된 값 타입
pub const INVALID_VALUE_TYPE: &str = "22G03";
/// 비교 불가
pub const NOT_COMPARABLE: &str = "22G04";
/// 레코드 불일치
pub const RECORD_MISMATCH: &str = "22G0U";
/// 잘못된 경로
pub const MALFORMED_PATH: &str = "22G0Z";
/// 잘못된 트랜잭션 상태
pub const INVALID_TRANSACTION_STATE: &str = "25000";
/// 이미 활성 트랜잭션 존재
pub const ACTIVE_TRANSACTION: &str = "25G01";
/// 읽기 전용 트랜잭션
pub const READ_ONLY_TRANSACTION: &str = "25G03";
/// 잘못된 트랜잭션 종료
pub const INVALID_TRANSACTION_TERMINATION: &str = "2D000";
/// 트랜잭션 롤백
pub const TRANSACTION_ROLLBACK: &str = "40000";
/// 완료 여부 불명
pub const COMPLETION_UNKNOWN: &str = "40003";
/// 구문 또는 접근 규칙 위반
pub const SYNTAX_OR_ACCESS_ERROR: &str = "42000";
/// 잘못된 구문
pub const INVALID_SYNTAX: &str = "42001";
/// 잘못된 참조
pub const INVALID_REFERENCE: &str = "42002";
/// 그래프 타입 위반
pub const GRAPH_TYPE_VIOLATION: &str = "G2000";

// ============================================================================
// 분류 함수
// ============================================================================

/// 상태 클래스 (앞 2자리, 짧으면 전체)
pub fn class(code: &str) -> &str {
    code.get(..2).unwrap_or(code)
}

/// 성공 여부 (클래스 `00`)
pub fn is_success(code: &str) -> bool {
    class(code) == "00"
}

/// 경고 여부 (클래스 `01`)
pub fn is_warning(code: &str) -> bool {
    class(code) == "01"
}

/// 데이터 없음 여부 (클래스 `02`)
pub fn is_no_data(code: &str) -> bool {
    class(code) == "02"
}

/// 정보 여부 (클래스 `03`)
pub fn is_informational(code: &str) -> bool {
    class(code) == "03"
}

/// 예외 여부
///
/// 클래스가 영문자로 시작하거나 사전순으로 `"08"` 이상이면 예외입니다.
/// 2자 미만의 코드는 예외로 보지 않습니다.
pub fn is_exception(code: &str) -> bool {
    let c = class(code);
    if c.len() < 2 {
        return false;
    }
    match c.chars().next() {
        Some(first) if first.is_ascii_alphabetic() => true,
        _ => c >= "08",
    }
}

/// 상태 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// 성공
    Success,
    /// 경고
    Warning,
    /// 데이터 없음
    NoData,
    /// 정보
    Informational,
    /// 예외
    Exception,
    /// 예약 클래스 또는 형식 오류
    Other,
}

/// 코드를 종류로 분류
pub fn classify(code: &str) -> StatusKind {
    if is_exception(code) {
        return StatusKind::Exception;
    }
    match class(code) {
        "00" => StatusKind::Success,
        "01" => StatusKind::Warning,
        "02" => StatusKind::NoData,
        "03" => StatusKind::Informational,
        _ => StatusKind::Other,
    }
}

// ============================================================================
// GqlStatus 확장
// ============================================================================

impl GqlStatus {
    /// 새 상태 생성
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            diagnostic: None,
            cause: None,
        }
    }

    /// 성공 상태
    pub fn success() -> Self {
        Self::new(SUCCESS, "")
    }

    /// 결과 생략 상태
    pub fn omitted() -> Self {
        Self::new(OMITTED_RESULT, "")
    }

    /// 데이터 없음 상태
    pub fn no_data() -> Self {
        Self::new(NO_DATA, "")
    }

    /// 에러 상태
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, message)
    }

    /// 진단 정보가 있는 에러 상태
    pub fn error_with_diagnostic(
        code: impl Into<String>,
        message: impl Into<String>,
        operation: impl Into<String>,
        operation_code: i32,
    ) -> Self {
        Self {
            diagnostic: Some(DiagnosticRecord {
                operation: operation.into(),
                operation_code,
                current_schema: None,
            }),
            ..Self::new(code, message)
        }
    }

    /// 원인 상태 설정
    pub fn with_cause(mut self, cause: GqlStatus) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// 클래스 (코드 앞 두 글자)
    pub fn class(&self) -> &str {
        class(&self.code)
    }

    /// 성공 여부
    pub fn is_success(&self) -> bool {
        is_success(&self.code)
    }

    /// 경고 여부
    pub fn is_warning(&self) -> bool {
        is_warning(&self.code)
    }

    /// 데이터 없음 여부
    pub fn is_no_data(&self) -> bool {
        is_no_data(&self.code)
    }

    /// 정보성 여부
    pub fn is_informational(&self) -> bool {
        is_informational(&self.code)
    }

    /// 예외 여부
    pub fn is_exception(&self) -> bool {
        is_exception(&self.code)
    }

    /// 상태 분류
    pub fn kind(&self) -> StatusKind {
        classify(&self.code)
    }

    /// 진단 정보의 연산 이름
    pub fn operation(&self) -> Option<&str> {
        self.diagnostic.as_ref().map(|d| d.operation.as_str())
    }
}

impl std::fmt::Display for GqlStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

// ============================================================================
// Tests
// ============================================================================

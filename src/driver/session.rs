//! Session Management
//!
//! 세션 관리. 핸드셰이크로 열리고, 설정을 바꾸며 문장을 실행하다가
//! `close`로 닫힙니다.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;

use crate::wire::{
    CloseRequest, ConfigureRequest, GqlTransport, HandshakeRequest, PingRequest, ResetRequest,
    ResetTarget, ServerInfo, SessionProperty, TransactionMode, PROTOCOL_VERSION,
};

use super::cursor::ResultCursor;
use super::error::{DriverError, DriverResult};
use super::rpc::RpcContext;
use super::transaction::Transaction;
use super::types::Value;

// ============================================================================
// Statement - 문장
// ============================================================================

/// 실행할 GQL 문장과 파라미터
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// 문장 텍스트
    pub text: String,
    /// 파라미터
    pub parameters: HashMap<String, Value>,
}

impl Statement {
    /// 새 문장 생성
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parameters: HashMap::new(),
        }
    }

    /// 파라미터 추가
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// 파라미터들 추가
    pub fn with_params(mut self, params: HashMap<String, Value>) -> Self {
        self.parameters.extend(params);
        self
    }
}

impl From<&str> for Statement {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Statement {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

// ============================================================================
// SessionConfig - 세션 설정
// ============================================================================

/// 세션 설정
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionConfig {
    /// 초기 그래프
    pub graph: Option<String>,
    /// 초기 스키마
    pub schema: Option<String>,
    /// 초기 시간대 (UTC 기준 분)
    pub time_zone_offset_minutes: Option<i32>,
    /// 스트림 읽기 실패를 에러로 반환
    pub strict_streaming: bool,
    /// 인코딩할 수 없는 파라미터를 거부
    pub validate_parameters: bool,
}

impl SessionConfig {
    /// 새 설정 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 빌더 시작
    pub fn builder() -> SessionConfigBuilder {
        SessionConfigBuilder::new()
    }
}

/// 세션 설정 빌더
#[derive(Debug, Default)]
pub struct SessionConfigBuilder {
    config: SessionConfig,
}

impl SessionConfigBuilder {
    /// 새 빌더 생성
    pub fn new() -> Self {
        Self::default()
    }

    /// 그래프 설정
    pub fn with_graph(mut self, graph: impl Into<String>) -> Self {
        self.config.graph = Some(graph.into());
        self
    }

    /// 스키마 설정
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.config.schema = Some(schema.into());
        self
    }

    /// 시간대 설정
    pub fn with_time_zone_offset(mut self, minutes: i32) -> Self {
        self.config.time_zone_offset_minutes = Some(minutes);
        self
    }

    /// 엄격한 스트리밍
    pub fn with_strict_streaming(mut self, strict: bool) -> Self {
        self.config.strict_streaming = strict;
        self
    }

    /// 파라미터 검증
    pub fn with_parameter_validation(mut self, validate: bool) -> Self {
        self.config.validate_parameters = validate;
        self
    }

    /// 빌드
    pub fn build(self) -> SessionConfig {
        self.config
    }
}

// ============================================================================
// Session - 세션
// ============================================================================

/// GQL 세션
///
/// 한 번에 한 호출자만 사용합니다. 닫지 않고 버리면 백그라운드에서
/// Close를 보냅니다.
pub struct Session {
    /// 호출 컨텍스트
    ctx: RpcContext,
    /// 세션 설정
    config: SessionConfig,
    /// 서버 정보
    server_info: Option<ServerInfo>,
    /// 협상된 프로토콜 버전
    protocol_version: u32,
    /// 현재 그래프
    graph: Option<String>,
    /// 현재 스키마
    schema: Option<String>,
    /// 현재 시간대
    time_zone_offset_minutes: Option<i32>,
    /// 닫힌 상태
    closed: bool,
}

impl Session {
    /// 기본 설정으로 핸드셰이크
    pub async fn handshake(transport: Arc<dyn GqlTransport>) -> DriverResult<Self> {
        let request = HandshakeRequest {
            protocol_version: PROTOCOL_VERSION,
            ..Default::default()
        };
        Self::open(
            transport,
            CancellationToken::new(),
            None,
            request,
            SessionConfig::default(),
        )
        .await
    }

    /// 핸드셰이크 후 초기 설정 적용
    pub(crate) async fn open(
        transport: Arc<dyn GqlTransport>,
        root: CancellationToken,
        request_timeout: Option<Duration>,
        request: HandshakeRequest,
        config: SessionConfig,
    ) -> DriverResult<Self> {
        let mut ctx = RpcContext {
            transport,
            session_id: String::new(),
            cancel: root.child_token(),
            root,
            request_timeout,
            strict_streaming: config.strict_streaming,
            validate_parameters: config.validate_parameters,
        };

        let response = ctx
            .call("handshake", ctx.transport.handshake(request))
            .await?;
        if response.session_id.is_empty() {
            return Err(DriverError::session("Server returned an empty session id"));
        }
        ctx.session_id = response.session_id;

        tracing::debug!(
            session_id = %ctx.session_id,
            protocol_version = response.protocol_version,
            "session opened"
        );

        let mut session = Self {
            ctx,
            config,
            server_info: response.server_info,
            protocol_version: response.protocol_version,
            graph: None,
            schema: None,
            time_zone_offset_minutes: None,
            closed: false,
        };

        if let Some(graph) = session.config.graph.clone() {
            session.set_graph(graph).await?;
        }
        if let Some(schema) = session.config.schema.clone() {
            session.set_schema(schema).await?;
        }
        if let Some(offset) = session.config.time_zone_offset_minutes {
            session.set_time_zone(offset).await?;
        }

        Ok(session)
    }

    /// 문장 실행 (auto-commit)
    ///
    /// 스트림만 열고 프레임은 읽지 않습니다.
    pub async fn execute(
        &self,
        statement: impl Into<Statement>,
        params: Option<HashMap<String, Value>>,
    ) -> DriverResult<ResultCursor> {
        self.ensure_open()?;

        let mut statement = statement.into();
        if let Some(p) = params {
            statement = statement.with_params(p);
        }

        self.ctx.execute(statement, None).await
    }

    /// 트랜잭션 시작
    pub async fn begin_transaction(&self, mode: TransactionMode) -> DriverResult<Transaction> {
        self.ensure_open()?;
        Transaction::begin(self.ctx.clone(), mode).await
    }

    /// 읽기 전용 트랜잭션 시작
    pub async fn begin_read_only_transaction(&self) -> DriverResult<Transaction> {
        self.begin_transaction(TransactionMode::ReadOnly).await
    }

    /// 트랜잭션 함수 실행
    ///
    /// `work`가 성공하면 커밋하고, 실패하면 한 번 롤백한 뒤 원래 에러를
    /// 반환합니다. `work` 안에서 이미 커밋이나 롤백했다면 그대로 둡니다.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let count = session
    ///     .run_transaction(TransactionMode::ReadWrite, |tx| {
    ///         Box::pin(async move {
    ///             let mut cursor = tx.execute("INSERT (:Person {name: 'Alice'})", None).await?;
    ///             cursor.rows_affected().await
    ///         })
    ///     })
    ///     .await?;
    /// ```
    pub async fn run_transaction<T, F>(&self, mode: TransactionMode, work: F) -> DriverResult<T>
    where
        F: for<'t> FnOnce(&'t mut Transaction) -> BoxFuture<'t, DriverResult<T>>,
    {
        let mut tx = self.begin_transaction(mode).await?;

        match work(&mut tx).await {
            Ok(value) => {
                if tx.state().is_active() {
                    tx.commit().await?;
                }
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(
                        transaction_id = tx.id(),
                        error = %rollback_err,
                        "rollback after failed transaction work failed"
                    );
                }
                // 롤백은 한 번만 시도
                tx.release();
                Err(e)
            }
        }
    }

    /// 읽기 트랜잭션 함수
    pub async fn read_transaction<T, F>(&self, work: F) -> DriverResult<T>
    where
        F: for<'t> FnOnce(&'t mut Transaction) -> BoxFuture<'t, DriverResult<T>>,
    {
        self.run_transaction(TransactionMode::ReadOnly, work).await
    }

    /// 쓰기 트랜잭션 함수
    pub async fn write_transaction<T, F>(&self, work: F) -> DriverResult<T>
    where
        F: for<'t> FnOnce(&'t mut Transaction) -> BoxFuture<'t, DriverResult<T>>,
    {
        self.run_transaction(TransactionMode::ReadWrite, work).await
    }

    /// 현재 그래프 설정
    pub async fn set_graph(&mut self, graph: impl Into<String>) -> DriverResult<()> {
        let graph = graph.into();
        self.configure(SessionProperty::Graph(graph.clone())).await?;
        self.graph = Some(graph);
        Ok(())
    }

    /// 현재 스키마 설정
    pub async fn set_schema(&mut self, schema: impl Into<String>) -> DriverResult<()> {
        let schema = schema.into();
        self.configure(SessionProperty::Schema(schema.clone())).await?;
        self.schema = Some(schema);
        Ok(())
    }

    /// 시간대 설정 (UTC 기준 분)
    pub async fn set_time_zone(&mut self, offset_minutes: i32) -> DriverResult<()> {
        self.configure(SessionProperty::TimeZoneOffsetMinutes(offset_minutes))
            .await?;
        self.time_zone_offset_minutes = Some(offset_minutes);
        Ok(())
    }

    async fn configure(&self, property: SessionProperty) -> DriverResult<()> {
        self.ensure_open()?;
        tracing::debug!(session_id = %self.ctx.session_id, property = ?property, "configure");

        let request = ConfigureRequest {
            session_id: self.ctx.session_id.clone(),
            property,
        };
        self.ctx
            .call("configure", self.ctx.transport.configure(request))
            .await
    }

    /// 모든 세션 설정 초기화
    pub async fn reset(&mut self) -> DriverResult<()> {
        self.reset_target(ResetTarget::All).await
    }

    /// 지정한 세션 설정 초기화
    pub async fn reset_target(&mut self, target: ResetTarget) -> DriverResult<()> {
        self.ensure_open()?;

        let request = ResetRequest {
            session_id: self.ctx.session_id.clone(),
            target,
        };
        self.ctx
            .call("reset", self.ctx.transport.reset(request))
            .await?;

        match target {
            ResetTarget::All => {
                self.graph = None;
                self.schema = None;
                self.time_zone_offset_minutes = None;
            }
            ResetTarget::Graph => self.graph = None,
            ResetTarget::Schema => self.schema = None,
            ResetTarget::TimeZone => self.time_zone_offset_minutes = None,
        }
        Ok(())
    }

    /// 서버 타임스탬프 조회
    pub async fn ping(&self) -> DriverResult<i64> {
        self.ensure_open()?;

        let request = PingRequest {
            session_id: self.ctx.session_id.clone(),
        };
        let response = self
            .ctx
            .call("ping", self.ctx.transport.ping(request))
            .await?;
        Ok(response.timestamp)
    }

    /// Ping 왕복 시간
    pub async fn measure_latency(&self) -> DriverResult<Duration> {
        let start = tokio::time::Instant::now();
        self.ping().await?;
        Ok(start.elapsed())
    }

    /// 진행 중인 작업 취소
    ///
    /// 이 세션에서 열린 커서와 대기 중인 호출이 모두 `Cancelled`로 끝납니다.
    /// 세션 자체는 계속 사용할 수 있습니다.
    pub fn cancel(&mut self) {
        self.ctx.cancel.cancel();
        self.ctx.cancel = self.ctx.root.child_token();
        tracing::debug!(session_id = %self.ctx.session_id, "session work cancelled");
    }

    /// 세션 닫기. 두 번째 호출부터는 아무것도 하지 않습니다.
    pub async fn close(&mut self) -> DriverResult<()> {
        if self.closed {
            return Ok(());
        }

        let request = CloseRequest {
            session_id: self.ctx.session_id.clone(),
        };
        self.ctx
            .call_terminal("close", self.ctx.transport.close(request))
            .await?;

        self.closed = true;
        self.ctx.root.cancel();
        tracing::debug!(session_id = %self.ctx.session_id, "session closed");
        Ok(())
    }

    /// 열린 상태 확인
    fn ensure_open(&self) -> DriverResult<()> {
        if self.closed {
            Err(DriverError::session("Session is closed"))
        } else {
            Ok(())
        }
    }

    /// 세션 ID
    pub fn id(&self) -> &str {
        &self.ctx.session_id
    }

    /// 닫힌 상태 여부
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// 서버 정보
    pub fn server_info(&self) -> Option<&ServerInfo> {
        self.server_info.as_ref()
    }

    /// 협상된 프로토콜 버전
    pub fn protocol_version(&self) -> u32 {
        self.protocol_version
    }

    /// 현재 그래프
    pub fn current_graph(&self) -> Option<&str> {
        self.graph.as_deref()
    }

    /// 현재 스키마
    pub fn current_schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// 현재 시간대
    pub fn time_zone_offset(&self) -> Option<i32> {
        self.time_zone_offset_minutes
    }

    /// 세션 설정
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.ctx.session_id)
            .field("graph", &self.graph)
            .field("schema", &self.schema)
            .field("closed", &self.closed)
            .finish()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.closed || self.ctx.root.is_cancelled() {
            return;
        }

        tracing::warn!(session_id = %self.ctx.session_id, "session dropped while open, closing");

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let transport = self.ctx.transport.clone();
        let request = CloseRequest {
            session_id: self.ctx.session_id.clone(),
        };
        handle.spawn(async move {
            if let Err(e) = transport.close(request).await {
                tracing::warn!(error = %e, "background session close failed");
            }
        });
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Transaction API
//!
//! 명시적 트랜잭션 관리

use std::collections::HashMap;

use crate::wire::{BeginRequest, CommitRequest, RollbackRequest, TransactionMode};

use super::cursor::ResultCursor;
use super::error::{DriverError, DriverResult};
use super::rpc::RpcContext;
use super::session::Statement;
use super::types::Value;

// ============================================================================
// TransactionState - 트랜잭션 상태
// ============================================================================

/// 트랜잭션 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    /// 활성 상태
    Active,
    /// 커밋됨
    Committed,
    /// 롤백됨
    RolledBack,
}

impl TransactionState {
    /// 완료 상태 여부
    pub fn is_terminated(&self) -> bool {
        !matches!(self, Self::Active)
    }

    /// 활성 상태 여부
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

// ============================================================================
// Transaction - 트랜잭션
// ============================================================================

/// 명시적 트랜잭션
///
/// 커밋이나 롤백 중 먼저 수행된 것만 유효합니다. 활성 상태로 버려지면
/// 백그라운드에서 롤백을 시도합니다.
pub struct Transaction {
    /// 호출 컨텍스트
    ctx: RpcContext,
    /// 트랜잭션 ID
    id: String,
    /// 접근 모드
    mode: TransactionMode,
    /// 상태
    state: TransactionState,
    /// 정리 책임 해제 여부
    released: bool,
}

impl Transaction {
    /// 트랜잭션 시작
    pub(crate) async fn begin(ctx: RpcContext, mode: TransactionMode) -> DriverResult<Self> {
        let request = BeginRequest {
            session_id: ctx.session_id.clone(),
            mode,
        };
        let response = ctx
            .call("begin_transaction", ctx.transport.begin_transaction(request))
            .await?;

        DriverError::check_status(response.status.as_ref())?;
        if response.transaction_id.is_empty() {
            return Err(DriverError::transaction(
                "Server returned an empty transaction id",
            ));
        }

        tracing::debug!(
            session_id = %ctx.session_id,
            transaction_id = %response.transaction_id,
            mode = mode.as_str(),
            "transaction started"
        );

        Ok(Self {
            ctx,
            id: response.transaction_id,
            mode,
            state: TransactionState::Active,
            released: false,
        })
    }

    /// 문장 실행
    pub async fn execute(
        &self,
        statement: impl Into<Statement>,
        params: Option<HashMap<String, Value>>,
    ) -> DriverResult<ResultCursor> {
        self.ensure_active()?;

        let mut statement = statement.into();
        if let Some(p) = params {
            statement = statement.with_params(p);
        }

        self.ctx.execute(statement, Some(self.id.clone())).await
    }

    /// 커밋
    ///
    /// 서버 응답을 받으면 상태 확인 전에 `Committed`로 바뀝니다.
    pub async fn commit(&mut self) -> DriverResult<()> {
        self.ensure_active()?;

        let request = CommitRequest {
            session_id: self.ctx.session_id.clone(),
            transaction_id: self.id.clone(),
        };
        let response = self
            .ctx
            .call("commit", self.ctx.transport.commit(request))
            .await?;

        self.state = TransactionState::Committed;
        tracing::debug!(transaction_id = %self.id, "transaction committed");
        DriverError::check_status(response.status.as_ref())
    }

    /// 롤백. 이미 완료된 트랜잭션이면 아무것도 하지 않습니다.
    pub async fn rollback(&mut self) -> DriverResult<()> {
        if self.state.is_terminated() {
            return Ok(());
        }

        let request = RollbackRequest {
            session_id: self.ctx.session_id.clone(),
            transaction_id: self.id.clone(),
        };
        let response = self
            .ctx
            .call_terminal("rollback", self.ctx.transport.rollback(request))
            .await?;

        self.state = TransactionState::RolledBack;
        tracing::debug!(transaction_id = %self.id, "transaction rolled back");
        DriverError::check_status(response.status.as_ref())
    }

    /// 정리 책임 해제
    ///
    /// 이후 Drop은 롤백을 보내지 않습니다.
    pub(crate) fn release(&mut self) {
        self.released = true;
    }

    /// 활성 상태 확인
    fn ensure_active(&self) -> DriverResult<()> {
        match self.state {
            TransactionState::Active => Ok(()),
            TransactionState::Committed => {
                Err(DriverError::transaction("Transaction already committed"))
            }
            TransactionState::RolledBack => {
                Err(DriverError::transaction("Transaction already rolled back"))
            }
        }
    }

    /// 트랜잭션 ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// 접근 모드
    pub fn mode(&self) -> TransactionMode {
        self.mode
    }

    /// 트랜잭션 상태
    pub fn state(&self) -> TransactionState {
        self.state
    }
}

impl std::fmt::Debug for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transaction")
            .field("id", &self.id)
            .field("mode", &self.mode)
            .field("state", &self.state)
            .finish()
    }
}

impl Drop for Transaction {
    fn drop(&mut self) {
        if self.state.is_terminated() || self.released || self.ctx.root.is_cancelled() {
            return;
        }

        tracing::warn!(
            transaction_id = %self.id,
            "transaction dropped while active, rolling back"
        );

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let transport = self.ctx.transport.clone();
        let request = RollbackRequest {
            session_id: self.ctx.session_id.clone(),
            transaction_id: self.id.clone(),
        };
        handle.spawn(async move {
            if let Err(e) = transport.rollback(request).await {
                tracing::warn!(error = %e, "background rollback failed");
            }
        });
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::status;
    use crate::driver::stub::{Call, StubTransport};
    use crate::wire::{BeginResponse, GqlStatus};
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    fn context(stub: &Arc<StubTransport>) -> RpcContext {
        let root = CancellationToken::new();
        RpcContext {
            transport: stub.clone(),
            session_id: "session-1".to_string(),
            cancel: root.child_token(),
            root,
            request_timeout: None,
            strict_streaming: false,
            validate_parameters: false,
        }
    }

    #[test]
    fn test_transaction_state() {
        assert!(!TransactionState::Active.is_terminated());
        assert!(TransactionState::Active.is_active());
        assert!(TransactionState::Committed.is_terminated());
        assert!(TransactionState::RolledBack.is_terminated());
    }

    #[tokio::test]
    async fn test_begin_and_commit() {
        let stub = StubTransport::new();
        let mut tx = Transaction::begin(context(&stub), TransactionMode::ReadOnly)
            .await
            .unwrap();

        assert_eq!(tx.id(), "tx-1");
        assert_eq!(tx.mode(), TransactionMode::ReadOnly);
        tx.commit().await.unwrap();
        assert_eq!(tx.state(), TransactionState::Committed);

        assert!(stub.calls().contains(&Call::Begin(TransactionMode::ReadOnly)));
        assert_eq!(stub.count(|c| matches!(c, Call::Commit(id) if id == "tx-1")), 1);
    }

    #[tokio::test]
    async fn test_begin_exception_status() {
        let stub = StubTransport::new();
        stub.set_begin(BeginResponse {
            transaction_id: String::new(),
            status: Some(GqlStatus::error(status::ACTIVE_TRANSACTION, "already active")),
        });

        let err = Transaction::begin(context(&stub), TransactionMode::ReadWrite)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(status::ACTIVE_TRANSACTION));
    }

    #[tokio::test]
    async fn test_begin_empty_id() {
        let stub = StubTransport::new();
        stub.set_begin(BeginResponse {
            transaction_id: String::new(),
            status: Some(GqlStatus::success()),
        });

        let err = Transaction::begin(context(&stub), TransactionMode::ReadWrite)
            .await
            .unwrap_err();
        assert!(matches!(err, DriverError::Transaction(_)));
    }

    #[tokio::test]
    async fn test_execute_tags_transaction_id() {
        let stub = StubTransport::new();
        let mut tx = Transaction::begin(context(&stub), TransactionMode::ReadWrite)
            .await
            .unwrap();

        let mut cursor = tx.execute("INSERT (:Person)", None).await.unwrap();
        assert!(cursor.is_success().await.unwrap());
        tx.rollback().await.unwrap();

        let executed: Vec<_> = stub
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Execute(req) => Some(req),
                _ => None,
            })
            .collect();
        assert_eq!(executed.len(), 1);
        assert_eq!(executed[0].transaction_id.as_deref(), Some("tx-1"));
        assert_eq!(executed[0].session_id, "session-1");
    }

    #[tokio::test]
    async fn test_commit_twice_fails() {
        let stub = StubTransport::new();
        let mut tx = Transaction::begin(context(&stub), TransactionMode::ReadWrite)
            .await
            .unwrap();

        tx.commit().await.unwrap();
        let err = tx.commit().await.unwrap_err();
        assert!(matches!(err, DriverError::Transaction(_)));
        assert_eq!(stub.count(|c| matches!(c, Call::Commit(_))), 1);
    }

    #[tokio::test]
    async fn test_commit_exception_marks_committed() {
        let stub = StubTransport::new();
        stub.set_commit_status(GqlStatus::error(status::TRANSACTION_ROLLBACK, "conflict"));
        let mut tx = Transaction::begin(context(&stub), TransactionMode::ReadWrite)
            .await
            .unwrap();

        let err = tx.commit().await.unwrap_err();
        assert_eq!(err.status_code(), Some(status::TRANSACTION_ROLLBACK));
        assert_eq!(tx.state(), TransactionState::Committed);

        tx.rollback().await.unwrap();
        assert_eq!(stub.count(|c| matches!(c, Call::Rollback(_))), 0);
    }

    #[tokio::test]
    async fn test_rollback_idempotent() {
        let stub = StubTransport::new();
        let mut tx = Transaction::begin(context(&stub), TransactionMode::ReadWrite)
            .await
            .unwrap();

        tx.rollback().await.unwrap();
        tx.rollback().await.unwrap();
        assert_eq!(tx.state(), TransactionState::RolledBack);
        assert_eq!(stub.count(|c| matches!(c, Call::Rollback(_))), 1);

        let err = tx.execute("MATCH (n) RETURN n", None).await.unwrap_err();
        assert!(matches!(err, DriverError::Transaction(_)));
        assert!(tx.commit().await.is_err());
    }

    #[tokio::test]
    async fn test_rollback_exception_status() {
        let stub = StubTransport::new();
        stub.set_rollback_status(GqlStatus::error(status::INVALID_TRANSACTION_TERMINATION, "no"));
        let mut tx = Transaction::begin(context(&stub), TransactionMode::ReadWrite)
            .await
            .unwrap();

        let err = tx.rollback().await.unwrap_err();
        assert_eq!(err.status_code(), Some(status::INVALID_TRANSACTION_TERMINATION));
        assert_eq!(tx.state(), TransactionState::RolledBack);
    }

    #[tokio::test]
    async fn test_commit_transport_failure_keeps_active() {
        let stub = StubTransport::new();
        stub.fail("commit");
        let mut tx = Transaction::begin(context(&stub), TransactionMode::ReadWrite)
            .await
            .unwrap();

        let err = tx.commit().await.unwrap_err();
        assert!(matches!(err, DriverError::Transport(_)));
        assert_eq!(tx.state(), TransactionState::Active);
        tx.rollback().await.unwrap();
    }

    #[tokio::test]
    async fn test_drop_active_rolls_back() {
        let stub = StubTransport::new();
        let tx = Transaction::begin(context(&stub), TransactionMode::ReadWrite)
            .await
            .unwrap();
        drop(tx);

        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(stub.count(|c| matches!(c, Call::Rollback(id) if id == "tx-1")), 1);
    }

    #[tokio::test]
    async fn test_rollback_survives_work_cancel() {
        let stub = StubTransport::new();
        let ctx = context(&stub);
        let work = ctx.cancel.clone();
        let mut tx = Transaction::begin(ctx, TransactionMode::ReadWrite)
            .await
            .unwrap();

        work.cancel();
        assert!(tx.execute("MATCH (n) RETURN n", None).await.is_err());
        tx.rollback().await.unwrap();
        assert_eq!(tx.state(), TransactionState::RolledBack);
        assert_eq!(stub.count(|c| matches!(c, Call::Rollback(_))), 1);
    }

    #[tokio::test]
    async fn test_drop_released_skips_rollback() {
        let stub = StubTransport::new();
        let mut tx = Transaction::begin(context(&stub), TransactionMode::ReadWrite)
            .await
            .unwrap();
        tx.release();
        drop(tx);

        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(stub.count(|c| matches!(c, Call::Rollback(_))), 0);
    }

    #[tokio::test]
    async fn test_drop_after_session_close_skips_rollback() {
        let stub = StubTransport::new();
        let ctx = context(&stub);
        let root = ctx.root.clone();
        let tx = Transaction::begin(ctx, TransactionMode::ReadWrite)
            .await
            .unwrap();
        root.cancel();
        drop(tx);

        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(stub.count(|c| matches!(c, Call::Rollback(_))), 0);
    }
}

//! 테스트용 스크립트 전송 계층
//!
//! 모든 RPC 호출을 기록하고, 미리 넣어 둔 프레임 시퀀스를 재생합니다.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use parking_lot::Mutex;

use crate::wire::{
    BeginRequest, BeginResponse, CloseRequest, CommitRequest, CommitResponse, ConfigureRequest,
    ExecuteRequest, ExecuteResponse, FrameStream, GqlStatus, GqlTransport, HandshakeRequest,
    HandshakeResponse, PingRequest, PingResponse, ResetRequest, ResetTarget, RollbackRequest,
    RollbackResponse, ServerInfo, SessionProperty, TransactionMode, TransportError,
    TransportResult,
};

use super::cursor::tests::summary;
use super::status::SUCCESS;

/// 기록된 호출
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Handshake(HandshakeRequest),
    Configure(SessionProperty),
    Reset(ResetTarget),
    Ping,
    Close(String),
    Execute(ExecuteRequest),
    Begin(TransactionMode),
    Commit(String),
    Rollback(String),
    Shutdown,
}

pub(crate) struct StubTransport {
    session_id: Mutex<String>,
    calls: Mutex<Vec<Call>>,
    executions: Mutex<VecDeque<Vec<TransportResult<ExecuteResponse>>>>,
    begin: Mutex<BeginResponse>,
    commit_status: Mutex<Option<GqlStatus>>,
    rollback_status: Mutex<Option<GqlStatus>>,
    failing: Mutex<HashSet<&'static str>>,
    hanging: Mutex<HashSet<&'static str>>,
}

impl StubTransport {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            session_id: Mutex::new("session-1".to_string()),
            calls: Mutex::new(Vec::new()),
            executions: Mutex::new(VecDeque::new()),
            begin: Mutex::new(BeginResponse {
                transaction_id: "tx-1".to_string(),
                status: Some(GqlStatus::success()),
            }),
            commit_status: Mutex::new(Some(GqlStatus::success())),
            rollback_status: Mutex::new(Some(GqlStatus::success())),
            failing: Mutex::new(HashSet::new()),
            hanging: Mutex::new(HashSet::new()),
        })
    }

    pub(crate) fn set_session_id(&self, id: &str) {
        *self.session_id.lock() = id.to_string();
    }

    pub(crate) fn set_begin(&self, response: BeginResponse) {
        *self.begin.lock() = response;
    }

    pub(crate) fn set_commit_status(&self, status: GqlStatus) {
        *self.commit_status.lock() = Some(status);
    }

    pub(crate) fn set_rollback_status(&self, status: GqlStatus) {
        *self.rollback_status.lock() = Some(status);
    }

    /// 다음 execute 호출이 재생할 프레임
    pub(crate) fn push_execution(&self, frames: Vec<TransportResult<ExecuteResponse>>) {
        self.executions.lock().push_back(frames);
    }

    /// 해당 RPC를 Unavailable로 실패시킴
    pub(crate) fn fail(&self, rpc: &'static str) {
        self.failing.lock().insert(rpc);
    }

    /// 해당 RPC가 응답하지 않게 함
    pub(crate) fn hang(&self, rpc: &'static str) {
        self.hanging.lock().insert(rpc);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub(crate) fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().iter().filter(|c| pred(c)).count()
    }

    async fn enter(&self, rpc: &'static str, call: Call) -> TransportResult<()> {
        self.calls.lock().push(call);
        let hang = self.hanging.lock().contains(rpc);
        if hang {
            futures::future::pending::<()>().await;
        }
        if self.failing.lock().contains(rpc) {
            return Err(TransportError::Unavailable(format!("{} unavailable", rpc)));
        }
        Ok(())
    }
}

#[async_trait]
impl GqlTransport for StubTransport {
    async fn handshake(&self, request: HandshakeRequest) -> TransportResult<HandshakeResponse> {
        self.enter("handshake", Call::Handshake(request)).await?;
        Ok(HandshakeResponse {
            protocol_version: 1,
            session_id: self.session_id.lock().clone(),
            server_info: Some(ServerInfo {
                name: "stub".to_string(),
                version: "0.0.1".to_string(),
                features: vec!["transactions".to_string()],
            }),
        })
    }

    async fn configure(&self, request: ConfigureRequest) -> TransportResult<()> {
        self.enter("configure", Call::Configure(request.property)).await
    }

    async fn reset(&self, request: ResetRequest) -> TransportResult<()> {
        self.enter("reset", Call::Reset(request.target)).await
    }

    async fn ping(&self, _request: PingRequest) -> TransportResult<PingResponse> {
        self.enter("ping", Call::Ping).await?;
        Ok(PingResponse {
            timestamp: 1_700_000_000_000,
        })
    }

    async fn close(&self, request: CloseRequest) -> TransportResult<()> {
        self.enter("close", Call::Close(request.session_id)).await
    }

    async fn execute(&self, request: ExecuteRequest) -> TransportResult<FrameStream> {
        self.enter("execute", Call::Execute(request)).await?;
        let frames = self
            .executions
            .lock()
            .pop_front()
            .unwrap_or_else(|| vec![Ok(summary(SUCCESS, 0))]);
        Ok(futures::stream::iter(frames).boxed())
    }

    async fn begin_transaction(&self, request: BeginRequest) -> TransportResult<BeginResponse> {
        self.enter("begin_transaction", Call::Begin(request.mode)).await?;
        Ok(self.begin.lock().clone())
    }

    async fn commit(&self, request: CommitRequest) -> TransportResult<CommitResponse> {
        self.enter("commit", Call::Commit(request.transaction_id)).await?;
        Ok(CommitResponse {
            status: self.commit_status.lock().clone(),
        })
    }

    async fn rollback(&self, request: RollbackRequest) -> TransportResult<RollbackResponse> {
        self.enter("rollback", Call::Rollback(request.transaction_id)).await?;
        Ok(RollbackResponse {
            status: self.rollback_status.lock().clone(),
        })
    }

    async fn shutdown(&self) -> TransportResult<()> {
        self.calls.lock().push(Call::Shutdown);
        Ok(())
    }
}

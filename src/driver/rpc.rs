//! RPC 호출 컨텍스트
//!
//! 세션과 트랜잭션이 공유하는 호출 경로. 요청 타임아웃과 취소를 적용하고
//! 전송 에러를 드라이버 에러로 변환합니다.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::wire::{ExecuteRequest, GqlTransport, TransportResult};

use super::codec;
use super::cursor::ResultCursor;
use super::error::{DriverError, DriverResult};
use super::session::Statement;

#[derive(Clone)]
pub(crate) struct RpcContext {
    pub(crate) transport: Arc<dyn GqlTransport>,
    pub(crate) session_id: String,
    /// 세션 수명 토큰. 세션이나 연결이 닫힐 때만 취소됩니다.
    pub(crate) root: CancellationToken,
    /// 작업 토큰. `Session::cancel`이 교체합니다.
    pub(crate) cancel: CancellationToken,
    pub(crate) request_timeout: Option<Duration>,
    pub(crate) strict_streaming: bool,
    pub(crate) validate_parameters: bool,
}

impl RpcContext {
    /// 단일 RPC 실행
    pub(crate) async fn call<T, F>(&self, operation: &'static str, fut: F) -> DriverResult<T>
    where
        F: Future<Output = TransportResult<T>>,
    {
        self.race(&self.cancel, operation, fut).await
    }

    /// 정리용 RPC 실행 (롤백, Close)
    ///
    /// 작업 취소와 무관하게 세션이 살아 있는 동안 진행됩니다.
    pub(crate) async fn call_terminal<T, F>(
        &self,
        operation: &'static str,
        fut: F,
    ) -> DriverResult<T>
    where
        F: Future<Output = TransportResult<T>>,
    {
        self.race(&self.root, operation, fut).await
    }

    async fn race<T, F>(
        &self,
        token: &CancellationToken,
        operation: &'static str,
        fut: F,
    ) -> DriverResult<T>
    where
        F: Future<Output = TransportResult<T>>,
    {
        let limited = async {
            match self.request_timeout {
                Some(limit) => match tokio::time::timeout(limit, fut).await {
                    Ok(result) => result.map_err(DriverError::from),
                    Err(_) => Err(DriverError::timeout(format!(
                        "{} timed out after {:?}",
                        operation, limit
                    ))),
                },
                None => fut.await.map_err(DriverError::from),
            }
        };

        tokio::select! {
            biased;
            _ = token.cancelled() => Err(DriverError::Cancelled),
            result = limited => result,
        }
    }

    /// 문장 실행. 스트림이 열리면 지연 커서를 반환합니다.
    pub(crate) async fn execute(
        &self,
        statement: Statement,
        transaction_id: Option<String>,
    ) -> DriverResult<ResultCursor> {
        if self.validate_parameters {
            if let Some((name, value)) = statement
                .parameters
                .iter()
                .find(|(_, v)| !v.is_encodable())
            {
                return Err(DriverError::type_conversion(format!(
                    "Parameter '{}' of type {} cannot be encoded",
                    name,
                    value.type_name()
                )));
            }
        }

        tracing::debug!(
            session_id = %self.session_id,
            transaction_id = ?transaction_id,
            parameters = statement.parameters.len(),
            "executing statement"
        );

        let request = ExecuteRequest {
            session_id: self.session_id.clone(),
            statement: statement.text,
            parameters: codec::encode_parameters(statement.parameters),
            transaction_id,
        };
        let stream = self.call("execute", self.transport.execute(request)).await?;
        Ok(ResultCursor::new(
            stream,
            self.cancel.child_token(),
            self.strict_streaming,
        ))
    }
}

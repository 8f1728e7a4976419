//! Result Cursor
//!
//! 실행 결과 프레임 스트림 위의 지연 커서
//!
//! 프레임은 요청이 있을 때만 읽습니다. 수신 순서는 `Header?`, `RowBatch*`,
//! `Summary`이며, `Summary` 수신 또는 스트림 종료 시 커서가 완료됩니다.
//! 읽기 도중 전송 에러가 나면 기본적으로 커서를 `Truncated`로 표시하고
//! 정상 종료처럼 동작합니다. 엄격 모드에서는 에러를 함께 반환합니다.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::Arc;

use futures::StreamExt;
use tokio_util::sync::CancellationToken;

use crate::wire::{
    ExecuteResponse, Frame, FrameStream, GqlStatus, ResultHeader, SummaryMessage, TransportError,
};

use super::codec::decode_row;
use super::error::{DriverError, DriverResult};
use super::reactive::RowStream;
use super::row::{Columns, Row};
use super::status;

// ============================================================================
// ResultSummary - 결과 요약
// ============================================================================

/// 실행 결과 요약
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSummary {
    /// 최종 상태
    pub status: Option<GqlStatus>,
    /// 경고들
    pub warnings: Vec<GqlStatus>,
    /// 영향받은 행 수
    pub rows_affected: i64,
    /// 연산 카운터
    pub counters: HashMap<String, i64>,
}

impl ResultSummary {
    /// GQLSTATUS 코드 (상태가 없으면 빈 문자열)
    pub fn status_code(&self) -> &str {
        self.status.as_ref().map_or("", |s| s.code.as_str())
    }

    /// 상태 메시지 (상태가 없으면 빈 문자열)
    pub fn message(&self) -> &str {
        self.status.as_ref().map_or("", |s| s.message.as_str())
    }

    /// 성공 여부
    pub fn is_success(&self) -> bool {
        status::is_success(self.status_code())
    }

    /// 예외 여부
    pub fn is_exception(&self) -> bool {
        status::is_exception(self.status_code())
    }

    /// 카운터 값 (없으면 0)
    pub fn counter(&self, name: &str) -> i64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    /// 변경 사항 존재 여부
    pub fn contains_updates(&self) -> bool {
        self.rows_affected > 0 || self.counters.values().any(|&v| v > 0)
    }
}

impl From<SummaryMessage> for ResultSummary {
    fn from(msg: SummaryMessage) -> Self {
        Self {
            status: msg.status,
            warnings: msg.warnings,
            rows_affected: msg.rows_affected,
            counters: msg.counters,
        }
    }
}

// ============================================================================
// Termination - 종료 상태
// ============================================================================

/// 커서 종료 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// 아직 읽는 중
    Streaming,
    /// Summary 수신
    Completed,
    /// Summary 없이 스트림 종료
    EndOfStream,
    /// 전송 에러로 중단
    Truncated,
    /// 취소됨
    Cancelled,
}

impl Termination {
    /// 완료 상태 여부
    pub fn is_terminated(&self) -> bool {
        !matches!(self, Self::Streaming)
    }
}

// ============================================================================
// ResultCursor - 결과 커서
// ============================================================================

enum Pulled {
    Cancelled,
    Item(Option<Result<ExecuteResponse, TransportError>>),
}

/// 결과 커서
pub struct ResultCursor {
    /// 프레임 스트림 (완료 시 해제)
    stream: Option<FrameStream>,
    /// 헤더
    header: Option<ResultHeader>,
    /// 행이 공유하는 컬럼 정보
    columns: Arc<Columns>,
    /// 아직 읽지 않은 행
    pending: VecDeque<Row>,
    /// 수신한 전체 행 수
    rows_received: usize,
    /// 요약
    summary: Option<ResultSummary>,
    /// 종료 상태
    termination: Termination,
    /// 중단 원인
    transport_error: Option<TransportError>,
    /// 엄격 모드
    strict: bool,
    /// 취소 토큰
    cancel: CancellationToken,
}

impl ResultCursor {
    /// 새 커서 생성
    pub fn new(stream: FrameStream, cancel: CancellationToken, strict: bool) -> Self {
        Self {
            stream: Some(stream),
            header: None,
            columns: Arc::new(Columns::default()),
            pending: VecDeque::new(),
            rows_received: 0,
            summary: None,
            termination: Termination::Streaming,
            transport_error: None,
            strict,
            cancel,
        }
    }

    /// 컬럼 이름 목록
    ///
    /// 헤더를 받을 때까지 프레임을 읽습니다. 헤더 없이 끝나면 빈 목록입니다.
    pub async fn column_names(&mut self) -> DriverResult<Vec<String>> {
        while self.header.is_none() && !self.is_done() {
            self.pull_frame().await?;
        }
        Ok(self
            .header
            .as_ref()
            .map(ResultHeader::column_names)
            .unwrap_or_default())
    }

    /// 헤더
    pub async fn header(&mut self) -> DriverResult<Option<&ResultHeader>> {
        while self.header.is_none() && !self.is_done() {
            self.pull_frame().await?;
        }
        Ok(self.header.as_ref())
    }

    /// 다음 행. 더 이상 없으면 `None`.
    pub async fn next_row(&mut self) -> DriverResult<Option<Row>> {
        while self.pending.is_empty() && !self.is_done() {
            self.pull_frame().await?;
        }
        Ok(self.pending.pop_front())
    }

    /// 남은 행 모두 수집
    pub async fn collect_rows(&mut self) -> DriverResult<Vec<Row>> {
        let mut rows = Vec::new();
        while let Some(row) = self.next_row().await? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// 요약
    ///
    /// 읽지 않은 행을 건너뛰고 남은 프레임을 모두 소비합니다.
    /// Summary 없이 끝났으면 `None`입니다.
    pub async fn summary(&mut self) -> DriverResult<Option<&ResultSummary>> {
        self.pending.clear();
        while !self.is_done() {
            self.pull_frame().await?;
            self.pending.clear();
        }
        Ok(self.summary.as_ref())
    }

    /// 성공 여부 (Summary가 없으면 false)
    pub async fn is_success(&mut self) -> DriverResult<bool> {
        Ok(self.summary().await?.map_or(false, ResultSummary::is_success))
    }

    /// 영향받은 행 수 (Summary가 없으면 0)
    pub async fn rows_affected(&mut self) -> DriverResult<i64> {
        Ok(self.summary().await?.map_or(0, |s| s.rows_affected))
    }

    /// 예외 상태면 에러로 변환
    pub async fn error_for_status(&mut self) -> DriverResult<()> {
        let status = self.summary().await?.and_then(|s| s.status.as_ref());
        DriverError::check_status(status)
    }

    /// 행 스트림으로 변환
    pub fn into_stream(self) -> RowStream {
        RowStream::from_cursor(self)
    }

    /// 커서 취소. 스트림을 해제하며 이미 받은 행은 계속 읽을 수 있습니다.
    pub fn cancel(&mut self) {
        self.cancel.cancel();
        self.stream = None;
        self.finish(Termination::Cancelled);
    }

    /// 종료 상태
    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// 완료 여부
    pub fn is_done(&self) -> bool {
        self.termination.is_terminated()
    }

    /// 전송 에러로 중단되었는지 여부
    pub fn is_truncated(&self) -> bool {
        self.termination == Termination::Truncated
    }

    /// 중단 원인
    pub fn transport_error(&self) -> Option<&TransportError> {
        self.transport_error.as_ref()
    }

    /// 지금까지 받은 행 수
    pub fn rows_received(&self) -> usize {
        self.rows_received
    }

    /// 프레임 하나 읽기
    async fn pull_frame(&mut self) -> DriverResult<()> {
        let pulled = match self.stream.as_mut() {
            None => Pulled::Item(None),
            Some(stream) => tokio::select! {
                biased;
                _ = self.cancel.cancelled() => Pulled::Cancelled,
                item = stream.next() => Pulled::Item(item),
            },
        };

        match pulled {
            Pulled::Cancelled => {
                self.stream = None;
                self.finish(Termination::Cancelled);
                Err(DriverError::Cancelled)
            }
            Pulled::Item(None) => {
                self.stream = None;
                self.finish(Termination::EndOfStream);
                Ok(())
            }
            Pulled::Item(Some(Err(e))) => {
                tracing::warn!(
                    error = %e,
                    rows_received = self.rows_received,
                    "result stream interrupted"
                );
                self.stream = None;
                self.finish(Termination::Truncated);
                self.transport_error = Some(e.clone());
                if self.strict {
                    Err(DriverError::Transport(e))
                } else {
                    Ok(())
                }
            }
            Pulled::Item(Some(Ok(response))) => {
                self.apply(response);
                Ok(())
            }
        }
    }

    fn apply(&mut self, response: ExecuteResponse) {
        match response.frame {
            None => {}
            Some(Frame::Header(header)) => {
                tracing::debug!(columns = header.columns.len(), "result header received");
                self.columns = Arc::new(Columns::new(header.column_names()));
                self.header = Some(header);
            }
            Some(Frame::RowBatch(batch)) => {
                self.rows_received += batch.rows.len();
                for row in batch.rows {
                    self.pending
                        .push_back(Row::new(Arc::clone(&self.columns), decode_row(row)));
                }
            }
            Some(Frame::Summary(summary)) => {
                tracing::debug!(
                    rows_received = self.rows_received,
                    "result summary received"
                );
                self.summary = Some(summary.into());
                self.stream = None;
                self.finish(Termination::Completed);
            }
        }
    }

    fn finish(&mut self, termination: Termination) {
        if self.termination == Termination::Streaming {
            self.termination = termination;
        }
    }
}

impl fmt::Debug for ResultCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultCursor")
            .field("header", &self.header)
            .field("pending", &self.pending.len())
            .field("rows_received", &self.rows_received)
            .field("termination", &self.termination)
            .field("strict", &self.strict)
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::driver::types::Value;
    use crate::driver::status::{DIVISION_BY_ZERO, SUCCESS};
    use crate::wire::{RowBatch, TransportResult, WireRow, WireValue};
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub(crate) fn header(names: &[&str]) -> ExecuteResponse {
        Frame::Header(ResultHeader::binding_table(names.iter().copied())).into()
    }

    pub(crate) fn batch(rows: &[&[i64]]) -> ExecuteResponse {
        Frame::RowBatch(RowBatch {
            rows: rows
                .iter()
                .map(|r| WireRow {
                    values: r.iter().map(|&v| WireValue::integer(v)).collect(),
                })
                .collect(),
        })
        .into()
    }

    pub(crate) fn summary(code: &str, rows_affected: i64) -> ExecuteResponse {
        Frame::Summary(SummaryMessage {
            status: Some(GqlStatus::new(code, "")),
            rows_affected,
            ..Default::default()
        })
        .into()
    }

    fn cursor_over(items: Vec<TransportResult<ExecuteResponse>>) -> ResultCursor {
        ResultCursor::new(
            futures::stream::iter(items).boxed(),
            CancellationToken::new(),
            false,
        )
    }

    fn ints(rows: Vec<Row>) -> Vec<i64> {
        rows.iter()
            .map(|r| r.get_by_index(0).and_then(Value::as_int).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_header_rows_summary() {
        let mut cursor = cursor_over(vec![
            Ok(header(&["n"])),
            Ok(batch(&[&[1], &[2]])),
            Ok(batch(&[&[3]])),
            Ok(summary(SUCCESS, 0)),
        ]);

        assert_eq!(cursor.column_names().await.unwrap(), vec!["n".to_string()]);
        let rows = cursor.collect_rows().await.unwrap();
        assert_eq!(ints(rows.clone()), vec![1, 2, 3]);
        assert_eq!(rows[0].get("n"), Some(&Value::Integer(1)));
        assert!(cursor.is_success().await.unwrap());
        assert_eq!(cursor.termination(), Termination::Completed);
        assert_eq!(cursor.rows_received(), 3);
    }

    #[tokio::test]
    async fn test_empty_frames_are_skipped() {
        let mut cursor = cursor_over(vec![
            Ok(ExecuteResponse::default()),
            Ok(batch(&[&[7]])),
            Ok(ExecuteResponse::default()),
            Ok(summary(SUCCESS, 0)),
        ]);
        assert_eq!(ints(cursor.collect_rows().await.unwrap()), vec![7]);
        assert!(cursor.summary().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_no_header_gives_empty_columns() {
        let mut cursor = cursor_over(vec![Ok(summary(SUCCESS, 4))]);
        assert!(cursor.column_names().await.unwrap().is_empty());
        assert_eq!(cursor.rows_affected().await.unwrap(), 4);
        assert!(cursor.next_row().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_frames_after_summary_are_ignored() {
        let mut cursor = cursor_over(vec![Ok(summary(SUCCESS, 0)), Ok(batch(&[&[9]]))]);
        assert!(cursor.next_row().await.unwrap().is_none());
        assert_eq!(cursor.rows_received(), 0);
    }

    #[tokio::test]
    async fn test_summary_skips_unread_rows() {
        let mut cursor = cursor_over(vec![
            Ok(header(&["n"])),
            Ok(batch(&[&[1], &[2]])),
            Ok(batch(&[&[3]])),
            Ok(summary(SUCCESS, 0)),
        ]);
        assert_eq!(ints(vec![cursor.next_row().await.unwrap().unwrap()]), vec![1]);

        let summary = cursor.summary().await.unwrap().cloned().unwrap();
        assert_eq!(summary.status_code(), SUCCESS);
        assert!(cursor.next_row().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_end_of_stream_without_summary() {
        let mut cursor = cursor_over(vec![Ok(batch(&[&[1]]))]);
        assert_eq!(ints(cursor.collect_rows().await.unwrap()), vec![1]);
        assert!(cursor.summary().await.unwrap().is_none());
        assert!(!cursor.is_success().await.unwrap());
        assert_eq!(cursor.rows_affected().await.unwrap(), 0);
        assert_eq!(cursor.termination(), Termination::EndOfStream);
    }

    #[tokio::test]
    async fn test_transport_error_truncates_silently() {
        let mut cursor = cursor_over(vec![
            Ok(header(&["n"])),
            Ok(batch(&[&[1], &[2]])),
            Err(TransportError::stream("connection reset")),
            Ok(batch(&[&[3]])),
        ]);

        assert_eq!(ints(cursor.collect_rows().await.unwrap()), vec![1, 2]);
        assert!(cursor.is_truncated());
        assert!(cursor.summary().await.unwrap().is_none());
        assert_eq!(
            cursor.transport_error(),
            Some(&TransportError::stream("connection reset"))
        );
    }

    #[tokio::test]
    async fn test_strict_mode_surfaces_transport_error() {
        let mut cursor = ResultCursor::new(
            futures::stream::iter(vec![
                Ok(batch(&[&[1]])),
                Err(TransportError::stream("connection reset")),
            ])
            .boxed(),
            CancellationToken::new(),
            true,
        );

        assert!(cursor.next_row().await.unwrap().is_some());
        let err = cursor.next_row().await.unwrap_err();
        assert!(matches!(err, DriverError::Transport(TransportError::Stream(_))));
        assert!(cursor.is_truncated());
        assert!(cursor.next_row().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_error_for_status() {
        let mut cursor = cursor_over(vec![Ok(summary(DIVISION_BY_ZERO, 0))]);
        let err = cursor.error_for_status().await.unwrap_err();
        assert_eq!(err.status_code(), Some(DIVISION_BY_ZERO));

        let mut cursor = cursor_over(vec![Ok(summary(SUCCESS, 0))]);
        assert!(cursor.error_for_status().await.is_ok());
    }

    #[tokio::test]
    async fn test_frames_pulled_lazily() {
        let polled = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&polled);
        let frames = vec![
            Ok(header(&["n"])),
            Ok(batch(&[&[1]])),
            Ok(batch(&[&[2]])),
            Ok(summary(SUCCESS, 0)),
        ];
        let stream = futures::stream::iter(frames).inspect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        let mut cursor = ResultCursor::new(stream.boxed(), CancellationToken::new(), false);

        cursor.column_names().await.unwrap();
        assert_eq!(polled.load(Ordering::SeqCst), 1);
        cursor.next_row().await.unwrap();
        assert_eq!(polled.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_cancelled_token_aborts_read() {
        let token = CancellationToken::new();
        let mut cursor = ResultCursor::new(
            futures::stream::pending().boxed(),
            token.child_token(),
            false,
        );
        token.cancel();

        let err = cursor.next_row().await.unwrap_err();
        assert!(matches!(err, DriverError::Cancelled));
        assert_eq!(cursor.termination(), Termination::Cancelled);
    }

    #[tokio::test]
    async fn test_cancel_keeps_buffered_rows() {
        let mut cursor = cursor_over(vec![Ok(batch(&[&[1], &[2]])), Ok(summary(SUCCESS, 0))]);
        cursor.next_row().await.unwrap();
        cursor.cancel();

        assert_eq!(ints(cursor.collect_rows().await.unwrap()), vec![2]);
        assert_eq!(cursor.termination(), Termination::Cancelled);
    }

    #[test]
    fn test_summary_accessors() {
        let summary = ResultSummary {
            status: Some(GqlStatus::success()),
            counters: HashMap::from([("nodes_created".to_string(), 2)]),
            ..Default::default()
        };
        assert!(summary.is_success());
        assert!(!summary.is_exception());
        assert_eq!(summary.counter("nodes_created"), 2);
        assert_eq!(summary.counter("edges_created"), 0);
        assert!(summary.contains_updates());
        assert_eq!(ResultSummary::default().status_code(), "");
    }
}

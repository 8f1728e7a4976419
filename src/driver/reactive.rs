//! Reactive Streams
//!
//! 결과 커서를 `Stream`으로 감싼 단일 통과 행 스트림
//!
//! # Example
//!
//! ```ignore
//! use futures::StreamExt;
//!
//! let cursor = session.execute("MATCH (n:Person) RETURN n.name AS name", None).await?;
//! let names: Vec<String> = cursor
//!     .into_stream()
//!     .filter_map(|r| async move { r.ok()?.get_string("name").ok() })
//!     .collect()
//!     .await;
//! ```

use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;

use super::cursor::ResultCursor;
use super::error::{DriverError, DriverResult};
use super::row::Row;

// ============================================================================
// RowStream - 비동기 행 스트림
// ============================================================================

/// 비동기 행 스트림
///
/// 폴링할 때마다 커서에서 다음 행을 읽습니다. 에러가 나면 그 에러를
/// 한 번 내보내고 종료합니다.
pub struct RowStream {
    inner: Pin<Box<dyn Stream<Item = DriverResult<Row>> + Send>>,
}

impl std::fmt::Debug for RowStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RowStream").finish_non_exhaustive()
    }
}

impl RowStream {
    /// 커서에서 생성
    pub fn from_cursor(cursor: ResultCursor) -> Self {
        let inner = futures::stream::unfold(Some(cursor), |state| async move {
            let mut cursor = state?;
            match cursor.next_row().await {
                Ok(Some(row)) => Some((Ok(row), Some(cursor))),
                Ok(None) => None,
                Err(e) => Some((Err(e), None)),
            }
        });
        Self {
            inner: Box::pin(inner),
        }
    }

    /// 행 벡터에서 생성
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self {
            inner: Box::pin(tokio_stream::iter(rows.into_iter().map(Ok))),
        }
    }

    /// 빈 스트림 생성
    pub fn empty() -> Self {
        Self {
            inner: Box::pin(tokio_stream::empty()),
        }
    }

    /// 모든 행 수집 (성공한 것만)
    pub async fn collect(self) -> Vec<Row> {
        use tokio_stream::StreamExt;

        self.inner.filter_map(|r| r.ok()).collect().await
    }

    /// 모든 행 수집 (에러 포함)
    pub async fn try_collect(self) -> DriverResult<Vec<Row>> {
        use tokio_stream::StreamExt;

        let mut rows = Vec::new();
        let mut stream = self.inner;

        while let Some(result) = stream.next().await {
            rows.push(result?);
        }

        Ok(rows)
    }

    /// 첫 번째 행
    pub async fn first(self) -> DriverResult<Option<Row>> {
        use tokio_stream::StreamExt;

        let mut stream = self.inner;
        stream.next().await.transpose()
    }

    /// 단일 행 (정확히 1개)
    pub async fn single(self) -> DriverResult<Row> {
        use tokio_stream::StreamExt;

        let mut stream = self.inner;
        let first = stream.next().await.transpose()?;
        let second = stream.next().await.transpose()?;

        match (first, second) {
            (Some(row), None) => Ok(row),
            (None, _) => Err(DriverError::lookup("Expected exactly one row, got none")),
            (Some(_), Some(_)) => Err(DriverError::lookup("Expected exactly one row, got more")),
        }
    }

    /// 각 행에 비동기 함수 적용
    pub async fn for_each<F, Fut>(self, mut f: F) -> DriverResult<()>
    where
        F: FnMut(Row) -> Fut,
        Fut: std::future::Future<Output = ()>,
    {
        use tokio_stream::StreamExt;

        let mut stream = self.inner;
        while let Some(result) = stream.next().await {
            f(result?).await;
        }
        Ok(())
    }

    /// 행 개수 (에러에서 멈춤)
    pub async fn count(self) -> DriverResult<usize> {
        use tokio_stream::StreamExt;

        let mut stream = self.inner;
        let mut n = 0;
        while let Some(result) = stream.next().await {
            result?;
            n += 1;
        }
        Ok(n)
    }
}

impl Stream for RowStream {
    type Item = DriverResult<Row>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Temporal Types
//!
//! GQL 시간 타입 정의 및 chrono 변환
//!
//! 필드 값은 서버가 보낸 그대로 보존되며 유효성 검사를 하지 않습니다.
//! chrono 타입으로의 변환은 값이 유효한 경우에만 `Some`을 반환합니다.

use std::fmt;

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike,
};
use serde::{Deserialize, Serialize};

use super::error::{DriverError, DriverResult};

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// UTC 오프셋(분) 표기: `+09:00`, `-05:30`
fn write_offset(f: &mut fmt::Formatter<'_>, offset_minutes: i32) -> fmt::Result {
    let sign = if offset_minutes < 0 { '-' } else { '+' };
    let abs = offset_minutes.unsigned_abs();
    write!(f, "{}{:02}:{:02}", sign, abs / 60, abs % 60)
}

fn fixed_offset(offset_minutes: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(offset_minutes.checked_mul(60)?)
}

// ============================================================================
// Date - 날짜
// ============================================================================

/// 달력 날짜
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Date {
    /// 연도
    pub year: i32,
    /// 월 (1-12)
    pub month: u32,
    /// 일 (1-31)
    pub day: u32,
}

impl Date {
    /// 새 날짜 생성
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// chrono 날짜로 변환
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }
}

impl From<NaiveDate> for Date {
    fn from(d: NaiveDate) -> Self {
        Self::new(d.year(), d.month(), d.day())
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

// ============================================================================
// LocalTime - 로컬 시각
// ============================================================================

/// 오프셋 없는 시각
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct LocalTime {
    /// 시
    pub hour: u32,
    /// 분
    pub minute: u32,
    /// 초
    pub second: u32,
    /// 나노초
    pub nanosecond: u32,
}

impl LocalTime {
    /// 새 시각 생성
    pub fn new(hour: u32, minute: u32, second: u32, nanosecond: u32) -> Self {
        Self {
            hour,
            minute,
            second,
            nanosecond,
        }
    }

    /// chrono 시각으로 변환
    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_hms_nano_opt(self.hour, self.minute, self.second, self.nanosecond)
    }
}

impl From<NaiveTime> for LocalTime {
    fn from(t: NaiveTime) -> Self {
        Self::new(t.hour(), t.minute(), t.second(), t.nanosecond())
    }
}

impl fmt::Display for LocalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)?;
        if self.nanosecond != 0 {
            write!(f, ".{:09}", self.nanosecond)?;
        }
        Ok(())
    }
}

// ============================================================================
// ZonedTime - 오프셋 시각
// ============================================================================

/// UTC 오프셋이 있는 시각
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZonedTime {
    /// 시각
    pub time: LocalTime,
    /// UTC 오프셋 (분)
    pub offset_minutes: i32,
}

impl ZonedTime {
    /// 새 오프셋 시각 생성
    pub fn new(time: LocalTime, offset_minutes: i32) -> Self {
        Self {
            time,
            offset_minutes,
        }
    }

    /// chrono 오프셋
    pub fn offset(&self) -> Option<FixedOffset> {
        fixed_offset(self.offset_minutes)
    }
}

impl fmt::Display for ZonedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.time)?;
        write_offset(f, self.offset_minutes)
    }
}

// ============================================================================
// LocalDateTime - 로컬 일시
// ============================================================================

/// 오프셋 없는 일시
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LocalDateTime {
    /// 날짜
    pub date: Date,
    /// 시각
    pub time: LocalTime,
}

impl LocalDateTime {
    /// 새 일시 생성
    pub fn new(date: Date, time: LocalTime) -> Self {
        Self { date, time }
    }

    /// chrono 일시로 변환
    pub fn to_naive_datetime(&self) -> Option<NaiveDateTime> {
        Some(NaiveDateTime::new(
            self.date.to_naive_date()?,
            self.time.to_naive_time()?,
        ))
    }
}

impl From<NaiveDateTime> for LocalDateTime {
    fn from(dt: NaiveDateTime) -> Self {
        Self::new(dt.date().into(), dt.time().into())
    }
}

impl fmt::Display for LocalDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

// ============================================================================
// ZonedDateTime - 오프셋 일시
// ============================================================================

/// UTC 오프셋이 있는 일시
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZonedDateTime {
    /// 날짜
    pub date: Date,
    /// 시각
    pub time: LocalTime,
    /// UTC 오프셋 (분)
    pub offset_minutes: i32,
}

impl ZonedDateTime {
    /// 새 오프셋 일시 생성
    pub fn new(date: Date, time: LocalTime, offset_minutes: i32) -> Self {
        Self {
            date,
            time,
            offset_minutes,
        }
    }

    /// chrono 일시로 변환
    pub fn to_datetime(&self) -> Option<DateTime<FixedOffset>> {
        let naive = LocalDateTime::new(self.date, self.time).to_naive_datetime()?;
        fixed_offset(self.offset_minutes)?
            .from_local_datetime(&naive)
            .single()
    }
}

impl From<DateTime<FixedOffset>> for ZonedDateTime {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self::new(
            dt.date_naive().into(),
            dt.time().into(),
            dt.offset().local_minus_utc() / 60,
        )
    }
}

impl fmt::Display for ZonedDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)?;
        write_offset(f, self.offset_minutes)
    }
}

// ============================================================================
// Duration - 시간 간격
// ============================================================================

/// 시간 간격 (개월 + 나노초)
///
/// 개월과 나노초는 서로 환산되지 않습니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Duration {
    /// 개월
    pub months: i64,
    /// 나노초
    pub nanoseconds: i64,
}

impl Duration {
    /// 새 Duration 생성
    pub fn new(months: i64, nanoseconds: i64) -> Self {
        Self {
            months,
            nanoseconds,
        }
    }

    /// 개월에서 생성
    pub fn from_months(months: i64) -> Self {
        Self::new(months, 0)
    }

    /// 초에서 생성
    pub fn from_seconds(seconds: i64) -> Self {
        Self::new(0, seconds.saturating_mul(NANOS_PER_SECOND))
    }

    /// 나노초에서 생성
    pub fn from_nanos(nanoseconds: i64) -> Self {
        Self::new(0, nanoseconds)
    }

    /// chrono Duration으로 변환 (개월 성분이 없을 때만)
    pub fn to_chrono(&self) -> Option<chrono::Duration> {
        (self.months == 0).then(|| chrono::Duration::nanoseconds(self.nanoseconds))
    }
}

impl TryFrom<chrono::Duration> for Duration {
    type Error = DriverError;

    fn try_from(d: chrono::Duration) -> DriverResult<Self> {
        d.num_nanoseconds()
            .map(Self::from_nanos)
            .ok_or_else(|| DriverError::type_conversion("Duration exceeds i64 nanoseconds"))
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.nanoseconds < 0 { "-" } else { "" };
        let abs = self.nanoseconds.unsigned_abs();
        let seconds = abs / NANOS_PER_SECOND as u64;
        let fraction = abs % NANOS_PER_SECOND as u64;
        write!(f, "P{}MT{}{}", self.months, sign, seconds)?;
        if fraction != 0 {
            let digits = format!("{:09}", fraction);
            write!(f, ".{}", digits.trim_end_matches('0'))?;
        }
        write!(f, "S")
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Value Codec
//!
//! 와이어 값([`WireValue`])과 드라이버 값([`Value`]) 사이의 변환
//!
//! 디코딩은 항상 성공합니다. 지원하지 않는 수치 타입(BigInteger, BigFloat,
//! Decimal)과 비어 있는 값은 `Null`이 됩니다. 인코딩은 파라미터용으로
//! 스칼라, Date, Duration, List만 지원하며 나머지는 `Null`로 보냅니다.

use std::collections::HashMap;

use crate::wire::{
    Kind, WireDate, WireDuration, WireEdge, WireLocalTime, WireNode, WirePath, WireRecord,
    WireRow, WireValue,
};

use super::temporal::{Date, Duration, LocalDateTime, LocalTime, ZonedDateTime, ZonedTime};
use super::types::{Edge, Field, Node, Path, Record, Value};

// ============================================================================
// Decode - 와이어 -> 드라이버
// ============================================================================

/// 와이어 값 디코딩
pub fn decode(wire: WireValue) -> Value {
    let Some(kind) = wire.kind else {
        return Value::Null;
    };

    match kind {
        Kind::Null => Value::Null,
        Kind::Boolean(b) => Value::Boolean(b),
        Kind::Integer(i) => Value::Integer(i),
        Kind::UnsignedInteger(u) => Value::UnsignedInteger(u),
        Kind::Float(f) => Value::Float(f),
        Kind::String(s) => Value::String(s),
        Kind::Bytes(b) => Value::Bytes(b),
        Kind::Date(d) => Value::Date(decode_date(d)),
        Kind::LocalTime(t) => Value::LocalTime(decode_time(t)),
        Kind::ZonedTime(t) => Value::ZonedTime(ZonedTime::new(
            t.time.map(decode_time).unwrap_or_default(),
            t.offset_minutes,
        )),
        Kind::LocalDateTime(dt) => Value::LocalDateTime(LocalDateTime::new(
            dt.date.map(decode_date).unwrap_or(Date::new(0, 0, 0)),
            dt.time.map(decode_time).unwrap_or_default(),
        )),
        Kind::ZonedDateTime(dt) => Value::ZonedDateTime(ZonedDateTime::new(
            dt.date.map(decode_date).unwrap_or(Date::new(0, 0, 0)),
            dt.time.map(decode_time).unwrap_or_default(),
            dt.offset_minutes,
        )),
        Kind::Duration(d) => Value::Duration(Duration::new(d.months, d.nanoseconds)),
        Kind::List(items) => Value::List(items.into_iter().map(decode).collect()),
        Kind::Record(r) => Value::Record(decode_record(r)),
        Kind::Node(n) => Value::Node(decode_node(n)),
        Kind::Edge(e) => Value::Edge(decode_edge(e)),
        Kind::Path(p) => Value::Path(decode_path(p)),
        Kind::BigInteger(_) | Kind::BigFloat(_) | Kind::Decimal(_) => Value::Null,
    }
}

/// 행 디코딩
pub fn decode_row(row: WireRow) -> Vec<Value> {
    row.values.into_iter().map(decode).collect()
}

fn decode_date(d: WireDate) -> Date {
    Date::new(d.year, d.month, d.day)
}

fn decode_time(t: WireLocalTime) -> LocalTime {
    LocalTime::new(t.hour, t.minute, t.second, t.nanosecond)
}

fn decode_properties(properties: HashMap<String, WireValue>) -> HashMap<String, Value> {
    properties.into_iter().map(|(k, v)| (k, decode(v))).collect()
}

fn decode_record(r: WireRecord) -> Record {
    Record::new(
        r.fields
            .into_iter()
            .map(|f| Field {
                name: f.name,
                value: f.value.map(decode).unwrap_or(Value::Null),
            })
            .collect(),
    )
}

fn decode_node(n: WireNode) -> Node {
    Node {
        id: n.id,
        labels: n.labels,
        properties: decode_properties(n.properties),
    }
}

fn decode_edge(e: WireEdge) -> Edge {
    Edge {
        id: e.id,
        labels: e.labels,
        source_node_id: e.source_node_id,
        target_node_id: e.target_node_id,
        undirected: e.undirected,
        properties: decode_properties(e.properties),
    }
}

fn decode_path(p: WirePath) -> Path {
    Path::new(
        p.nodes.into_iter().map(decode_node).collect(),
        p.edges.into_iter().map(decode_edge).collect(),
    )
}

impl From<WireValue> for Value {
    fn from(wire: WireValue) -> Self {
        decode(wire)
    }
}

// ============================================================================
// Encode - 드라이버 -> 와이어
// ============================================================================

/// 파라미터 값 인코딩
///
/// 지원하지 않는 타입은 경고 로그를 남기고 `Null`로 보냅니다.
/// 손실 여부는 [`Value::is_encodable`]로 미리 확인할 수 있습니다.
pub fn encode(value: Value) -> WireValue {
    let kind = match value {
        Value::Null => Kind::Null,
        Value::Boolean(b) => Kind::Boolean(b),
        Value::Integer(i) => Kind::Integer(i),
        Value::Float(f) => Kind::Float(f),
        Value::String(s) => Kind::String(s),
        Value::Bytes(b) => Kind::Bytes(b),
        Value::Date(d) => Kind::Date(WireDate {
            year: d.year,
            month: d.month,
            day: d.day,
        }),
        Value::Duration(d) => Kind::Duration(WireDuration {
            months: d.months,
            nanoseconds: d.nanoseconds,
        }),
        Value::List(items) => Kind::List(items.into_iter().map(encode).collect()),
        other => {
            tracing::warn!(
                value_type = other.type_name(),
                "parameter type is not encodable, sending null"
            );
            Kind::Null
        }
    };
    kind.into()
}

/// 파라미터 맵 인코딩
pub fn encode_parameters(params: HashMap<String, Value>) -> HashMap<String, WireValue> {
    params.into_iter().map(|(k, v)| (k, encode(v))).collect()
}

impl From<Value> for WireValue {
    fn from(value: Value) -> Self {
        encode(value)
    }
}

// ============================================================================
// Tests
// ============================================================================

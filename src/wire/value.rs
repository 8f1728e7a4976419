//! Wire value messages.
//!
//! Mirrors the protocol's `Value` message: a tagged union whose tag may be
//! absent. Temporal sub-messages keep their optional nested fields so that
//! a partially populated message can be represented exactly as received.

use std::collections::HashMap;

/// A protocol value. `kind == None` means the sender left the union unset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WireValue {
    /// Populated union member
    pub kind: Option<Kind>,
}

/// The populated member of a [`WireValue`].
#[derive(Debug, Clone, PartialEq)]
pub enum Kind {
    /// Explicit null
    Null,
    /// Boolean
    Boolean(bool),
    /// Signed 64-bit integer
    Integer(i64),
    /// Unsigned 64-bit integer
    UnsignedInteger(u64),
    /// 64-bit float
    Float(f64),
    /// UTF-8 string
    String(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Calendar date
    Date(WireDate),
    /// Local time of day
    LocalTime(WireLocalTime),
    /// Time of day with UTC offset
    ZonedTime(WireZonedTime),
    /// Date and time without offset
    LocalDateTime(WireLocalDateTime),
    /// Date and time with UTC offset
    ZonedDateTime(WireZonedDateTime),
    /// Month/nanosecond duration
    Duration(WireDuration),
    /// Ordered list
    List(Vec<WireValue>),
    /// Named fields
    Record(WireRecord),
    /// Graph node
    Node(WireNode),
    /// Graph edge
    Edge(WireEdge),
    /// Graph path
    Path(WirePath),
    /// Arbitrary precision integer (two's complement, big-endian)
    BigInteger(Vec<u8>),
    /// Arbitrary precision float (decimal string)
    BigFloat(String),
    /// Decimal number
    Decimal(WireDecimal),
}

impl WireValue {
    /// Value with no union member set.
    pub fn unset() -> Self {
        Self { kind: None }
    }

    /// Explicit null.
    pub fn null() -> Self {
        Kind::Null.into()
    }

    /// Boolean value.
    pub fn boolean(v: bool) -> Self {
        Kind::Boolean(v).into()
    }

    /// Integer value.
    pub fn integer(v: i64) -> Self {
        Kind::Integer(v).into()
    }

    /// Float value.
    pub fn float(v: f64) -> Self {
        Kind::Float(v).into()
    }

    /// String value.
    pub fn string(v: impl Into<String>) -> Self {
        Kind::String(v.into()).into()
    }

    /// List value.
    pub fn list(values: Vec<WireValue>) -> Self {
        Kind::List(values).into()
    }

    /// Check if the union is unset or explicitly null.
    pub fn is_null(&self) -> bool {
        matches!(self.kind, None | Some(Kind::Null))
    }
}

impl From<Kind> for WireValue {
    fn from(kind: Kind) -> Self {
        Self { kind: Some(kind) }
    }
}

/// Calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WireDate {
    /// Proleptic Gregorian year
    pub year: i32,
    /// Month, 1-12
    pub month: u32,
    /// Day of month, 1-31
    pub day: u32,
}

/// Local time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WireLocalTime {
    /// Hour, 0-23
    pub hour: u32,
    /// Minute, 0-59
    pub minute: u32,
    /// Second, 0-59
    pub second: u32,
    /// Fraction of the second
    pub nanosecond: u32,
}

/// Time of day with offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WireZonedTime {
    /// Local time
    pub time: Option<WireLocalTime>,
    /// Offset east of UTC
    pub offset_minutes: i32,
}

/// Date-time without offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WireLocalDateTime {
    /// Calendar date
    pub date: Option<WireDate>,
    /// Time of day
    pub time: Option<WireLocalTime>,
}

/// Date-time with offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WireZonedDateTime {
    /// Calendar date
    pub date: Option<WireDate>,
    /// Time of day
    pub time: Option<WireLocalTime>,
    /// Offset east of UTC
    pub offset_minutes: i32,
}

/// Duration in months plus nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WireDuration {
    /// Calendar months
    pub months: i64,
    /// Exact part, in nanoseconds
    pub nanoseconds: i64,
}

/// Record of named fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WireRecord {
    /// Fields in order
    pub fields: Vec<WireField>,
}

/// One field of a [`WireRecord`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WireField {
    /// Field name
    pub name: String,
    /// Field value
    pub value: Option<WireValue>,
}

/// Graph node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WireNode {
    /// Opaque element id
    pub id: Vec<u8>,
    /// Label set
    pub labels: Vec<String>,
    /// Property map
    pub properties: HashMap<String, WireValue>,
}

/// Graph edge.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WireEdge {
    /// Opaque element id
    pub id: Vec<u8>,
    /// Label set
    pub labels: Vec<String>,
    /// Id of the source node
    pub source_node_id: Vec<u8>,
    /// Id of the target node
    pub target_node_id: Vec<u8>,
    /// Set for an undirected edge
    pub undirected: bool,
    /// Property map
    pub properties: HashMap<String, WireValue>,
}

/// Graph path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WirePath {
    /// Nodes along the path
    pub nodes: Vec<WireNode>,
    /// Edges between consecutive nodes
    pub edges: Vec<WireEdge>,
}

/// Decimal as unscaled big integer and scale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WireDecimal {
    /// Two's-complement big-endian unscaled value
    pub unscaled: Vec<u8>,
    /// Decimal scale
    pub scale: i32,
}

/// One result row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WireRow {
    /// Values in column order
    pub values: Vec<WireValue>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_and_null() {
        assert!(WireValue::unset().is_null());
        assert!(WireValue::null().is_null());
        assert!(!WireValue::integer(0).is_null());
        assert_eq!(WireValue::default(), WireValue::unset());
    }

    #[test]
    fn test_constructors() {
        assert_eq!(WireValue::string("a").kind, Some(Kind::String("a".to_string())));
        assert_eq!(
            WireValue::list(vec![WireValue::boolean(true)]).kind,
            Some(Kind::List(vec![WireValue::boolean(true)]))
        );
    }
}

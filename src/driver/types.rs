//! Driver Types
//!
//! 드라이버에서 사용하는 값 및 그래프 타입 정의

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use super::error::{DriverError, DriverResult};
use super::temporal::{Date, Duration, LocalDateTime, LocalTime, ZonedDateTime, ZonedTime};

/// 바이트 ID를 16진수로 표기
fn write_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    for b in bytes {
        write!(f, "{:02x}", b)?;
    }
    Ok(())
}

// ============================================================================
// Value - GQL 값
// ============================================================================

/// GQL 값 타입
///
/// 직렬화는 내보내기 전용입니다. 태그가 없어 형태만으로는 종류를 되살릴 수 없습니다.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Null
    Null,
    /// Boolean
    Boolean(bool),
    /// Integer (i64)
    Integer(i64),
    /// Unsigned integer (u64)
    UnsignedInteger(u64),
    /// Float (f64)
    Float(f64),
    /// String
    String(String),
    /// Bytes
    Bytes(Vec<u8>),
    /// Date
    Date(Date),
    /// LocalTime
    LocalTime(LocalTime),
    /// ZonedTime
    ZonedTime(ZonedTime),
    /// LocalDateTime
    LocalDateTime(LocalDateTime),
    /// ZonedDateTime
    ZonedDateTime(ZonedDateTime),
    /// Duration
    Duration(Duration),
    /// List
    List(Vec<Value>),
    /// Record
    Record(Record),
    /// Node
    Node(Node),
    /// Edge
    Edge(Edge),
    /// Path
    Path(Path),
}

impl Value {
    /// 바이트 값 생성
    pub fn bytes(v: impl Into<Vec<u8>>) -> Self {
        Value::Bytes(v.into())
    }

    /// Null 여부
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Boolean으로 변환
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer로 변환
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Unsigned integer로 변환
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            Value::UnsignedInteger(u) => Some(*u),
            Value::Integer(i) => u64::try_from(*i).ok(),
            _ => None,
        }
    }

    /// Float로 변환
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// String으로 변환
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Bytes로 변환
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// List로 변환
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Record로 변환
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Node로 변환
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Value::Node(n) => Some(n),
            _ => None,
        }
    }

    /// Edge로 변환
    pub fn as_edge(&self) -> Option<&Edge> {
        match self {
            Value::Edge(e) => Some(e),
            _ => None,
        }
    }

    /// Path로 변환
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Value::Path(p) => Some(p),
            _ => None,
        }
    }

    /// 파라미터로 손실 없이 인코딩 가능한지 여부
    ///
    /// 스칼라, Date, Duration, 그리고 이들로만 이루어진 List가 해당됩니다.
    pub fn is_encodable(&self) -> bool {
        match self {
            Value::Null
            | Value::Boolean(_)
            | Value::Integer(_)
            | Value::Float(_)
            | Value::String(_)
            | Value::Bytes(_)
            | Value::Date(_)
            | Value::Duration(_) => true,
            Value::List(items) => items.iter().all(Value::is_encodable),
            _ => false,
        }
    }

    /// 타입 이름
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "Null",
            Value::Boolean(_) => "Boolean",
            Value::Integer(_) => "Integer",
            Value::UnsignedInteger(_) => "UnsignedInteger",
            Value::Float(_) => "Float",
            Value::String(_) => "String",
            Value::Bytes(_) => "Bytes",
            Value::Date(_) => "Date",
            Value::LocalTime(_) => "LocalTime",
            Value::ZonedTime(_) => "ZonedTime",
            Value::LocalDateTime(_) => "LocalDateTime",
            Value::ZonedDateTime(_) => "ZonedDateTime",
            Value::Duration(_) => "Duration",
            Value::List(_) => "List",
            Value::Record(_) => "Record",
            Value::Node(_) => "Node",
            Value::Edge(_) => "Edge",
            Value::Path(_) => "Path",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::UnsignedInteger(u) => write!(f, "{}", u),
            Value::Float(fl) => write!(f, "{}", fl),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Bytes(b) => write!(f, "<{} bytes>", b.len()),
            Value::Date(d) => write!(f, "{}", d),
            Value::LocalTime(t) => write!(f, "{}", t),
            Value::ZonedTime(t) => write!(f, "{}", t),
            Value::LocalDateTime(dt) => write!(f, "{}", dt),
            Value::ZonedDateTime(dt) => write!(f, "{}", dt),
            Value::Duration(d) => write!(f, "{}", d),
            Value::List(l) => {
                write!(f, "[")?;
                for (i, item) in l.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Record(r) => write!(f, "{}", r),
            Value::Node(n) => write!(f, "{}", n),
            Value::Edge(e) => write!(f, "{}", e),
            Value::Path(p) => write!(f, "{}", p),
        }
    }
}

// From implementations
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UnsignedInteger(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

macro_rules! impl_from_variant {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )+
    };
}

impl_from_variant! {
    Date => Date,
    LocalTime => LocalTime,
    ZonedTime => ZonedTime,
    LocalDateTime => LocalDateTime,
    ZonedDateTime => ZonedDateTime,
    Duration => Duration,
    Record => Record,
    Node => Node,
    Edge => Edge,
    Path => Path,
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v.into())
    }
}

impl From<NaiveTime> for Value {
    fn from(v: NaiveTime) -> Self {
        Value::LocalTime(v.into())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::LocalDateTime(v.into())
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Value::ZonedDateTime(v.into())
    }
}

// ============================================================================
// Record - 이름 있는 필드 목록
// ============================================================================

/// 레코드 필드
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    /// 필드 이름
    pub name: String,
    /// 필드 값
    pub value: Value,
}

impl Field {
    /// 새 필드 생성
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// 순서 있는 필드 목록. 이름 중복을 허용합니다.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Record {
    /// 필드들
    pub fields: Vec<Field>,
}

impl Record {
    /// 새 레코드 생성
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// 필드 추가
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.push(Field::new(name, value));
        self
    }

    /// 이름으로 값 가져오기 (첫 번째 일치)
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }

    /// 이름으로 값 가져오기 (없으면 에러)
    pub fn value(&self, name: &str) -> DriverResult<&Value> {
        self.get(name)
            .ok_or_else(|| DriverError::lookup(format!("Record has no field '{}'", name)))
    }

    /// 필드 이름들
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// 필드 수
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// 비어 있는지 여부
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// 필드 순회
    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(name, value)| Field { name, value }).collect())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", field.name, field.value)?;
        }
        write!(f, "}}")
    }
}

// ============================================================================
// Node - 그래프 노드
// ============================================================================

/// 그래프 노드
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Node {
    /// 노드 ID (불투명 바이트)
    pub id: Vec<u8>,
    /// 레이블
    pub labels: Vec<String>,
    /// 속성
    pub properties: HashMap<String, Value>,
}

impl Node {
    /// 새 노드 생성
    pub fn new(id: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// 레이블 추가
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// 속성 추가
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// 레이블 포함 여부
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// 속성 가져오기
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// 속성 가져오기 (없으면 에러)
    pub fn property(&self, key: &str) -> DriverResult<&Value> {
        self.get(key)
            .ok_or_else(|| DriverError::lookup(format!("Node has no property '{}'", key)))
    }

    /// 속성 가져오기 (타입 변환)
    pub fn get_as<T: TryFrom<Value, Error = DriverError>>(&self, key: &str) -> DriverResult<T> {
        self.property(key).and_then(|v| T::try_from(v.clone()))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        write_hex(f, &self.id)?;
        for label in &self.labels {
            write!(f, ":{}", label)?;
        }
        write!(f, ")")
    }
}

// ============================================================================
// Edge - 그래프 간선
// ============================================================================

/// 그래프 간선
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Edge {
    /// 간선 ID (불투명 바이트)
    pub id: Vec<u8>,
    /// 레이블
    pub labels: Vec<String>,
    /// 시작 노드 ID
    pub source_node_id: Vec<u8>,
    /// 끝 노드 ID
    pub target_node_id: Vec<u8>,
    /// 무방향 여부
    pub undirected: bool,
    /// 속성
    pub properties: HashMap<String, Value>,
}

impl Edge {
    /// 방향 간선 생성
    pub fn directed(
        id: impl Into<Vec<u8>>,
        source: impl Into<Vec<u8>>,
        target: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            id: id.into(),
            source_node_id: source.into(),
            target_node_id: target.into(),
            ..Default::default()
        }
    }

    /// 무방향 간선 생성
    pub fn undirected(
        id: impl Into<Vec<u8>>,
        a: impl Into<Vec<u8>>,
        b: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            undirected: true,
            ..Self::directed(id, a, b)
        }
    }

    /// 레이블 추가
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// 속성 추가
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// 방향 간선 여부
    pub fn is_directed(&self) -> bool {
        !self.undirected
    }

    /// 레이블 포함 여부
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// 속성 가져오기
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// 속성 가져오기 (없으면 에러)
    pub fn property(&self, key: &str) -> DriverResult<&Value> {
        self.get(key)
            .ok_or_else(|| DriverError::lookup(format!("Edge has no property '{}'", key)))
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        write_hex(f, &self.source_node_id)?;
        write!(f, ")-[")?;
        for label in &self.labels {
            write!(f, ":{}", label)?;
        }
        write!(f, "]{}(", if self.undirected { "-" } else { "->" })?;
        write_hex(f, &self.target_node_id)?;
        write!(f, ")")
    }
}

// ============================================================================
// Path - 그래프 경로
// ============================================================================

/// 노드와 간선이 번갈아 이어진 경로 (`nodes.len() == edges.len() + 1`)
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Path {
    /// 노드들
    pub nodes: Vec<Node>,
    /// 간선들
    pub edges: Vec<Edge>,
}

impl Path {
    /// 새 경로 생성
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self { nodes, edges }
    }

    /// 단일 노드 경로
    pub fn from_node(node: Node) -> Self {
        Self::new(vec![node], Vec::new())
    }

    /// 간선과 다음 노드 추가
    pub fn with_step(mut self, edge: Edge, node: Node) -> Self {
        self.edges.push(edge);
        self.nodes.push(node);
        self
    }

    /// 경로 길이 (간선 수)
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// 빈 경로 여부
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// 시작 노드
    pub fn start(&self) -> Option<&Node> {
        self.nodes.first()
    }

    /// 끝 노드
    pub fn end(&self) -> Option<&Node> {
        self.nodes.last()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Path: {} nodes, {} edges>", self.nodes.len(), self.edges.len())
    }
}

// ============================================================================
// TryFrom implementations
// ============================================================================

macro_rules! impl_try_from_value {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl TryFrom<Value> for $ty {
                type Error = DriverError;

                fn try_from(value: Value) -> Result<Self, Self::Error> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        _ => Err(DriverError::type_conversion(format!(
                            "Cannot convert {} to {}",
                            value.type_name(),
                            stringify!($ty)
                        ))),
                    }
                }
            }
        )+
    };
}

impl_try_from_value! {
    bool => Boolean,
    i64 => Integer,
    String => String,
    Vec<u8> => Bytes,
    Vec<Value> => List,
    Date => Date,
    LocalTime => LocalTime,
    LocalDateTime => LocalDateTime,
    ZonedDateTime => ZonedDateTime,
    Duration => Duration,
    Record => Record,
    Node => Node,
    Edge => Edge,
    Path => Path,
}

impl TryFrom<Value> for u64 {
    type Error = DriverError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value.as_uint().ok_or_else(|| {
            DriverError::type_conversion(format!("Cannot convert {} to u64", value.type_name()))
        })
    }
}

impl TryFrom<Value> for f64 {
    type Error = DriverError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value.as_float().ok_or_else(|| {
            DriverError::type_conversion(format!("Cannot convert {} to f64", value.type_name()))
        })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_types() {
        assert!(Value::Null.is_null());
        assert_eq!(Value::Boolean(true).as_bool(), Some(true));
        assert_eq!(Value::Integer(42).as_int(), Some(42));
        assert_eq!(Value::Integer(42).as_uint(), Some(42));
        assert_eq!(Value::Integer(-1).as_uint(), None);
        assert_eq!(Value::Float(2.5).as_float(), Some(2.5));
        assert_eq!(Value::String("hello".into()).as_str(), Some("hello"));
        assert_eq!(Value::bytes(vec![1u8, 2]).as_bytes(), Some(&[1u8, 2][..]));
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Integer(42).to_string(), "42");
        assert_eq!(Value::String("a".into()).to_string(), "\"a\"");
        assert_eq!(Value::from(vec![1i64, 2]).to_string(), "[1, 2]");
        assert_eq!(Value::Date(Date::new(2024, 1, 5)).to_string(), "2024-01-05");
    }

    #[test]
    fn test_value_from() {
        assert_eq!(Value::from(7i32), Value::Integer(7));
        assert_eq!(Value::from(7u64), Value::UnsignedInteger(7));
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(
            Value::from(NaiveDate::from_ymd_opt(2020, 3, 1).unwrap()),
            Value::Date(Date::new(2020, 3, 1))
        );
    }

    #[test]
    fn test_is_encodable() {
        assert!(Value::Null.is_encodable());
        assert!(Value::Duration(Duration::from_months(1)).is_encodable());
        assert!(Value::from(vec![Value::Integer(1), Value::from("x")]).is_encodable());
        assert!(!Value::UnsignedInteger(1).is_encodable());
        assert!(!Value::LocalTime(LocalTime::default()).is_encodable());
        assert!(!Value::from(vec![Value::Node(Node::new(vec![1u8]))]).is_encodable());
    }

    #[test]
    fn test_try_from() {
        assert_eq!(i64::try_from(Value::Integer(3)).unwrap(), 3);
        assert_eq!(f64::try_from(Value::Integer(3)).unwrap(), 3.0);
        assert_eq!(u64::try_from(Value::UnsignedInteger(9)).unwrap(), 9);
        assert!(matches!(
            String::try_from(Value::Integer(3)),
            Err(DriverError::TypeConversion(_))
        ));
    }

    #[test]
    fn test_record_first_match() {
        let record = Record::default()
            .with_field("a", 1i64)
            .with_field("b", "x")
            .with_field("a", 2i64);

        assert_eq!(record.len(), 3);
        assert_eq!(record.get("a"), Some(&Value::Integer(1)));
        assert_eq!(record.names(), vec!["a", "b", "a"]);
        assert!(record.get("missing").is_none());
        assert!(matches!(record.value("missing"), Err(DriverError::Lookup(_))));
        assert_eq!(record.to_string(), "{a: 1, b: \"x\", a: 2}");
    }

    #[test]
    fn test_node() {
        let node = Node::new(vec![0x0au8, 0x1b])
            .with_label("Person")
            .with_property("name", "Alice")
            .with_property("age", 30i64);

        assert!(node.has_label("Person"));
        assert!(!node.has_label("Company"));
        assert_eq!(node.get("name"), Some(&Value::String("Alice".into())));
        assert_eq!(node.get_as::<i64>("age").unwrap(), 30);
        assert!(matches!(node.property("email"), Err(DriverError::Lookup(_))));
        assert_eq!(node.to_string(), "(0a1b:Person)");
    }

    #[test]
    fn test_edge() {
        let edge = Edge::directed(vec![9u8], vec![1u8], vec![2u8]).with_label("KNOWS");
        assert!(edge.is_directed());
        assert_eq!(edge.to_string(), "(01)-[:KNOWS]->(02)");

        let edge = Edge::undirected(vec![9u8], vec![1u8], vec![2u8]).with_property("since", 2020i64);
        assert!(!edge.is_directed());
        assert_eq!(edge.property("since").unwrap(), &Value::Integer(2020));
        assert!(edge.property("until").is_err());
    }

    #[test]
    fn test_path() {
        let a = Node::new(vec![1u8]);
        let b = Node::new(vec![2u8]);
        let c = Node::new(vec![3u8]);

        let single = Path::from_node(a.clone());
        assert!(single.is_empty());
        assert_eq!(single.start(), single.end());

        let path = Path::from_node(a.clone())
            .with_step(Edge::directed(vec![10u8], vec![1u8], vec![2u8]), b)
            .with_step(Edge::directed(vec![11u8], vec![2u8], vec![3u8]), c.clone());

        assert_eq!(path.len(), 2);
        assert_eq!(path.nodes.len(), path.edges.len() + 1);
        assert_eq!(path.start(), Some(&a));
        assert_eq!(path.end(), Some(&c));
    }

    #[test]
    fn test_serialize_node() {
        let node = Node::new(vec![1u8]).with_label("Person");
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["labels"], serde_json::json!(["Person"]));
        assert_eq!(json["id"], serde_json::json!([1]));
    }

    #[test]
    fn test_serialize_value_keeps_shape() {
        let edge = Value::Edge(Edge::directed(vec![9u8], vec![1u8], vec![2u8]).with_label("KNOWS"));
        let json = serde_json::to_value(&edge).unwrap();
        assert_eq!(json["source_node_id"], serde_json::json!([1]));
        assert_eq!(json["target_node_id"], serde_json::json!([2]));
        assert_eq!(json["undirected"], serde_json::json!(false));

        let zoned = Value::ZonedDateTime(ZonedDateTime::new(
            Date::new(2024, 6, 1),
            LocalTime::new(12, 30, 0, 0),
            540,
        ));
        let json = serde_json::to_value(&zoned).unwrap();
        assert_eq!(json["date"]["year"], serde_json::json!(2024));
        assert_eq!(json["offset_minutes"], serde_json::json!(540));

        let list = Value::from(vec![1i64, 2]);
        assert_eq!(serde_json::to_value(&list).unwrap(), serde_json::json!([1, 2]));
        assert_eq!(serde_json::to_value(&Value::Null).unwrap(), serde_json::Value::Null);
    }
}

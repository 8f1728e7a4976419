//! Row - 결과 행
//!
//! 바인딩 테이블의 단일 행. 같은 결과의 행들은 컬럼 정보를 공유합니다.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::error::{DriverError, DriverResult};
use super::types::{Edge, Field, Node, Path, Record, Value};

// ============================================================================
// Columns - 컬럼 정보
// ============================================================================

/// 컬럼 이름과 이름-인덱스 매핑
#[derive(Debug, Default)]
pub struct Columns {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl Columns {
    /// 새 컬럼 정보 생성. 중복 이름은 첫 번째 컬럼을 가리킵니다.
    pub fn new(names: Vec<String>) -> Self {
        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            index.entry(name.clone()).or_insert(i);
        }
        Self { names, index }
    }

    /// 컬럼 이름 목록
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// 이름으로 인덱스 찾기
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// 컬럼 수
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// 컬럼이 없는지 여부
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

// ============================================================================
// Row - 단일 행
// ============================================================================

/// 결과 행
#[derive(Debug, Clone)]
pub struct Row {
    /// 공유 컬럼 정보
    columns: Arc<Columns>,
    /// 값들
    values: Vec<Value>,
}

impl Row {
    /// 새 행 생성
    pub fn new(columns: Arc<Columns>, values: Vec<Value>) -> Self {
        Self { columns, values }
    }

    /// 컬럼 이름 목록
    pub fn keys(&self) -> &[String] {
        self.columns.names()
    }

    /// 값 목록
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// 값 소유권 가져오기
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }

    /// 행 길이
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 빈 행 여부
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 컬럼 이름으로 값 가져오기
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.columns.position(key).and_then(|i| self.values.get(i))
    }

    /// 인덱스로 값 가져오기
    pub fn get_by_index(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// 컬럼 이름으로 타입 변환된 값 가져오기
    pub fn get_as<T>(&self, key: &str) -> DriverResult<T>
    where
        T: TryFrom<Value, Error = DriverError>,
    {
        self.get(key)
            .cloned()
            .ok_or_else(|| DriverError::lookup(format!("Column '{}' not found", key)))
            .and_then(T::try_from)
    }

    /// Boolean 값 가져오기
    pub fn get_bool(&self, key: &str) -> DriverResult<bool> {
        self.get_as::<bool>(key)
    }

    /// Integer 값 가져오기
    pub fn get_int(&self, key: &str) -> DriverResult<i64> {
        self.get_as::<i64>(key)
    }

    /// Float 값 가져오기
    pub fn get_float(&self, key: &str) -> DriverResult<f64> {
        self.get_as::<f64>(key)
    }

    /// String 값 가져오기
    pub fn get_string(&self, key: &str) -> DriverResult<String> {
        self.get_as::<String>(key)
    }

    /// Node 값 가져오기
    pub fn get_node(&self, key: &str) -> DriverResult<Node> {
        self.get_as::<Node>(key)
    }

    /// Edge 값 가져오기
    pub fn get_edge(&self, key: &str) -> DriverResult<Edge> {
        self.get_as::<Edge>(key)
    }

    /// Path 값 가져오기
    pub fn get_path(&self, key: &str) -> DriverResult<Path> {
        self.get_as::<Path>(key)
    }

    /// Optional 값 가져오기 (Null이나 없는 컬럼은 None)
    pub fn get_optional<T>(&self, key: &str) -> DriverResult<Option<T>>
    where
        T: TryFrom<Value, Error = DriverError>,
    {
        match self.get(key) {
            Some(Value::Null) | None => Ok(None),
            Some(v) => T::try_from(v.clone()).map(Some),
        }
    }

    /// 컬럼 존재 여부
    pub fn contains_key(&self, key: &str) -> bool {
        self.columns.position(key).is_some()
    }

    /// Record로 변환 (컬럼 순서 유지)
    pub fn to_record(&self) -> Record {
        Record::new(
            self.keys()
                .iter()
                .zip(self.values.iter())
                .map(|(k, v)| Field::new(k.clone(), v.clone()))
                .collect(),
        )
    }
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        self.keys() == other.keys() && self.values == other.values
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .keys()
            .iter()
            .zip(self.values.iter())
            .map(|(k, v)| format!("{}: {}", k, v))
            .collect();
        write!(f, "{{{}}}", pairs.join(", "))
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::iter::Zip<std::slice::Iter<'a, String>, std::slice::Iter<'a, Value>>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.names.iter().zip(self.values.iter())
    }
}

// ============================================================================
// Tests
// ============================================================================

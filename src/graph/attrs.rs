//! Attribute value types for graph, node and edge records.
//!
//! Attribute records are string-keyed, insertion-ordered mappings to a
//! closed set of JSON-like values. Everything the conversion layer accepts
//! or produces is expressible in this type.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attribute record: string-keyed, insertion-ordered.
pub type AttrMap = IndexMap<String, AttrValue>;

/// A dynamically-typed attribute value.
///
/// Supports:
/// - Null
/// - Boolean
/// - Integer (i64)
/// - Float (f64)
/// - String
/// - List (Vec<AttrValue>)
/// - Map (IndexMap<String, AttrValue>)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<AttrValue>),
    Map(IndexMap<String, AttrValue>),
}

impl AttrValue {
    /// Check if value is null
    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }

    /// Get string value if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get integer value if this is an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AttrValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get float value if this is a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttrValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get boolean value if this is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get list value if this is a list
    pub fn as_list(&self) -> Option<&Vec<AttrValue>> {
        match self {
            AttrValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Get map value if this is a map
    pub fn as_map(&self) -> Option<&IndexMap<String, AttrValue>> {
        match self {
            AttrValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Numeric view of the value: integers widen to f64, floats pass
    /// through, everything else is None. Weighted degree sums use this.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AttrValue::Int(i) => Some(*i as f64),
            AttrValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get type name as string
    pub fn type_name(&self) -> &'static str {
        match self {
            AttrValue::Null => "Null",
            AttrValue::Bool(_) => "Bool",
            AttrValue::Int(_) => "Int",
            AttrValue::Float(_) => "Float",
            AttrValue::Str(_) => "Str",
            AttrValue::List(_) => "List",
            AttrValue::Map(_) => "Map",
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Null => write!(f, "null"),
            AttrValue::Bool(b) => write!(f, "{}", b),
            AttrValue::Int(i) => write!(f, "{}", i),
            AttrValue::Float(fl) => write!(f, "{}", fl),
            AttrValue::Str(s) => write!(f, "\"{}\"", s),
            AttrValue::List(items) => {
                write!(f, "[")?;
                for (i, val) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", val)?;
                }
                write!(f, "]")
            }
            AttrValue::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, val)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", key, val)?;
                }
                write!(f, "}}")
            }
        }
    }
}

// Convenience conversions
impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_string())
    }
}

impl From<i64> for AttrValue {
    fn from(i: i64) -> Self {
        AttrValue::Int(i)
    }
}

impl From<i32> for AttrValue {
    fn from(i: i32) -> Self {
        AttrValue::Int(i as i64)
    }
}

impl From<f64> for AttrValue {
    fn from(f: f64) -> Self {
        AttrValue::Float(f)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl From<Vec<AttrValue>> for AttrValue {
    fn from(items: Vec<AttrValue>) -> Self {
        AttrValue::List(items)
    }
}

impl From<IndexMap<String, AttrValue>> for AttrValue {
    fn from(map: IndexMap<String, AttrValue>) -> Self {
        AttrValue::Map(map)
    }
}

impl From<serde_json::Value> for AttrValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => AttrValue::Null,
            serde_json::Value::Bool(b) => AttrValue::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    AttrValue::Int(i)
                } else {
                    AttrValue::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => AttrValue::Str(s),
            serde_json::Value::Array(items) => {
                AttrValue::List(items.into_iter().map(AttrValue::from).collect())
            }
            serde_json::Value::Object(map) => AttrValue::Map(
                map.into_iter()
                    .map(|(k, v)| (k, AttrValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<AttrValue> for serde_json::Value {
    fn from(value: AttrValue) -> Self {
        match value {
            AttrValue::Null => serde_json::Value::Null,
            AttrValue::Bool(b) => serde_json::Value::Bool(b),
            AttrValue::Int(i) => serde_json::Value::from(i),
            AttrValue::Float(f) => {
                serde_json::Number::from_f64(f).map_or(serde_json::Value::Null, serde_json::Value::Number)
            }
            AttrValue::Str(s) => serde_json::Value::String(s),
            AttrValue::List(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            AttrValue::Map(map) => serde_json::Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

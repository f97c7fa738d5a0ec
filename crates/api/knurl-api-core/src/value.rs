//! Core value kinds and typed values held by parameter dimensions.

use serde::{Deserialize, Serialize};

/// Lightweight kind tag for `Value`, used for validation and error reporting.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Int,
    Double,
    Bool,
    Text,
    Index,
    TextList,
}

/// A single dimension's value. The variant set is closed: concrete parameter
/// kinds pick from these tags, they never extend them.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum Value {
    Int(i64),
    Double(f64),
    Bool(bool),
    /// Free-form text; step-only for interpolation.
    Text(String),
    /// Index into an enumerated entry list (combo boxes); step-only.
    Index(usize),
    /// Ordered list of strings (file sequences); step-only.
    TextList(Vec<String>),
}

impl Value {
    #[inline]
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Double(_) => ValueKind::Double,
            Value::Bool(_) => ValueKind::Bool,
            Value::Text(_) => ValueKind::Text,
            Value::Index(_) => ValueKind::Index,
            Value::TextList(_) => ValueKind::TextList,
        }
    }

    /// True for the kinds that interpolate; everything else holds between keys.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        self.kind().is_numeric()
    }

    /// Convenience constructors
    pub fn int(v: i64) -> Self {
        Value::Int(v)
    }

    pub fn double(v: f64) -> Self {
        Value::Double(v)
    }

    pub fn text(v: impl Into<String>) -> Self {
        Value::Text(v.into())
    }
}

impl ValueKind {
    #[inline]
    pub fn is_numeric(self) -> bool {
        matches!(self, ValueKind::Int | ValueKind::Double)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

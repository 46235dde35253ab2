// Stored value shapes.
// Encodes strings, numbers and JSON documents into the raw strings the backend holds.

use serde_json::Number;

use crate::util::format::number_to_string;

/// A value accepted by `Storage::set`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Stored verbatim.
    Str(String),
    /// Stored as its decimal rendering.
    Num(f64),
    /// Stored as compact JSON text.
    Json(serde_json::Value),
}

impl Value {
    /// Raw string written to the backend.
    pub fn encode(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Num(n) => number_to_string(*n),
            Value::Json(v) => v.to_string(),
        }
    }

    /// JSON node used when this value is assigned inside a stored document.
    /// Non-finite numbers become `null`.
    pub fn into_json(self) -> serde_json::Value {
        match self {
            Value::Str(s) => serde_json::Value::String(s),
            Value::Num(n) => number_node(n),
            Value::Json(v) => v,
        }
    }
}

fn number_node(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        return serde_json::Value::Number(Number::from(n as i64));
    }
    Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Num(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Num(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Num(n.into())
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Num(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Num(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Json(serde_json::Value::Bool(b))
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

use std::fmt;

use serde_json::Value;

/// Expected kind of a configuration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    String,
    Integer,
    Float,
    Bool,
    Array,
    Object,
    Any,
}

impl Expect {
    /// Whether `value` satisfies this expectation. `null` always does.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) | (Expect::Any, _) => true,
            (Expect::String, Value::String(_)) => true,
            (Expect::Integer, Value::Number(n)) => n.is_i64() || n.is_u64(),
            (Expect::Float, Value::Number(_)) => true,
            (Expect::Bool, Value::Bool(_)) => true,
            (Expect::Array, Value::Array(_)) => true,
            (Expect::Object, Value::Object(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Expect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Expect::String => "string",
            Expect::Integer => "integer",
            Expect::Float => "float",
            Expect::Bool => "bool",
            Expect::Array => "array",
            Expect::Object => "object",
            Expect::Any => "any",
        };
        f.write_str(name)
    }
}

/// Short name of a value's kind, for error messages.
pub fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

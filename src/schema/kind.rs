//! Leaf kinds and the values they carry.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The closed set of primitive kinds a leaf field can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Int,
    Float,
    Bool,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
        }
    }

    /// Parse a textual value (environment variable, command-line token) as this kind.
    ///
    /// Floats must be finite.
    pub fn parse(self, raw: &str) -> Result<Value, ParseValueError> {
        let invalid = || ParseValueError { kind: self, raw: raw.to_string() };
        match self {
            Self::String => Ok(Value::String(raw.to_string())),
            Self::Int => raw.parse::<i64>().map(Value::Int).map_err(|_| invalid()),
            Self::Float => match raw.parse::<f64>() {
                Ok(x) if x.is_finite() => Ok(Value::Float(x)),
                _ => Err(invalid()),
            },
            Self::Bool => parse_bool(raw).map(Value::Bool).ok_or_else(invalid),
        }
    }

    /// Read a JSON snapshot value as this kind. `None` on a type mismatch.
    pub fn decode_json(self, json: &serde_json::Value) -> Option<Value> {
        match self {
            Self::String => json.as_str().map(|s| Value::String(s.to_string())),
            Self::Int => json.as_i64().map(Value::Int),
            Self::Float => json.as_f64().map(Value::Float),
            Self::Bool => json.as_bool().map(Value::Bool),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// A leaf value tagged with its kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Self::String(_) => Kind::String,
            Self::Int(_) => Kind::Int,
            Self::Float(_) => Kind::Float,
            Self::Bool(_) => Kind::Bool,
        }
    }

    /// Render the value so that `Kind::parse` reads it back unchanged.
    ///
    /// Used for command-line defaults; `Display` is the diagnostic form.
    pub fn to_arg(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Int(i) => i.to_string(),
            Self::Float(x) => x.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:.6}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// A textual value that does not parse as the requested kind.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("'{raw}' is not a valid {kind} value")]
pub struct ParseValueError {
    pub kind: Kind,
    pub raw: String,
}

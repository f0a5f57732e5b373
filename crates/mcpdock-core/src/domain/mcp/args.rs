//! Typed tool and prompt arguments.
//!
//! Callers pass heterogeneous argument maps; values are carried as a tagged
//! union and converted to protocol JSON only at the protocol boundary.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// A single argument value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

/// Named arguments for a tool call or prompt render.
pub type Arguments = BTreeMap<String, ArgValue>;

impl ArgValue {
    /// Protocol representation of this value.
    ///
    /// Returns `None` for values the protocol cannot carry (`Null`, and
    /// floats that are NaN or infinite); such arguments are dropped.
    pub fn to_json(&self) -> Option<Value> {
        match self {
            Self::Null => None,
            Self::Boolean(b) => Some(Value::Bool(*b)),
            Self::Integer(i) => Some(Value::Number((*i).into())),
            Self::Float(f) => Number::from_f64(*f).map(Value::Number),
            Self::String(s) => Some(Value::String(s.clone())),
        }
    }

    /// String rendering used for prompt arguments, which are strings on the wire.
    pub fn to_prompt_string(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Float(f) if !f.is_finite() => None,
            Self::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Interpret a raw command-line value: boolean, then integer, then float,
    /// falling back to a string.
    pub fn parse_loose(raw: &str) -> Self {
        match raw {
            "true" => return Self::Boolean(true),
            "false" => return Self::Boolean(false),
            "null" => return Self::Null,
            _ => {}
        }
        if let Ok(i) = raw.parse::<i64>() {
            return Self::Integer(i);
        }
        if let Ok(f) = raw.parse::<f64>() {
            if f.is_finite() {
                return Self::Float(f);
            }
        }
        Self::String(raw.to_string())
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for ArgValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for ArgValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Convert tool arguments into a protocol argument object, dropping values
/// without a protocol representation.
pub fn to_protocol_arguments(arguments: &Arguments) -> Map<String, Value> {
    arguments
        .iter()
        .filter_map(|(name, value)| value.to_json().map(|json| (name.clone(), json)))
        .collect()
}

/// Convert prompt arguments into the string map prompts expect.
pub fn to_prompt_arguments(arguments: &Arguments) -> BTreeMap<String, String> {
    arguments
        .iter()
        .filter_map(|(name, value)| value.to_prompt_string().map(|s| (name.clone(), s)))
        .collect()
}

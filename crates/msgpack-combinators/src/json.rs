//! Conversion between [`DynamicValue`] and `serde_json::Value`.
//!
//! Mostly a debugging aid: JSON has no binary type, no integer beyond 64
//! bits and no non-string map keys, so the conversion is lossy for those.
//! Binary payloads travel as `data:application/octet-stream;base64,` URIs and
//! are recognized again on the way back.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{Map, Number, Value};

use crate::value::DynamicValue;

/// Prefix of a JSON string carrying binary data.
pub const BIN_URI_START: &str = "data:application/octet-stream;base64,";

fn float_to_json(value: f64) -> Value {
    Number::from_f64(value).map_or(Value::Null, Value::Number)
}

fn key_to_string(key: &DynamicValue) -> String {
    match key {
        DynamicValue::Str(s) => s.clone(),
        other => other.to_json().to_string(),
    }
}

impl DynamicValue {
    /// Renders the value as JSON.
    ///
    /// `BigInt` values outside the `u64` range become decimal strings and
    /// non-finite floats become `null`. Map keys that are not strings are
    /// written as their compact JSON text; a repeated key keeps its last
    /// value.
    pub fn to_json(&self) -> Value {
        match self {
            DynamicValue::Nil => Value::Null,
            DynamicValue::Bool(v) => Value::Bool(*v),
            DynamicValue::Int(v) => Value::from(*v),
            DynamicValue::Long(v) => Value::from(*v),
            DynamicValue::BigInt(v) => match u64::try_from(*v) {
                Ok(n) => Value::from(n),
                Err(_) => match i64::try_from(*v) {
                    Ok(n) => Value::from(n),
                    Err(_) => Value::String(v.to_string()),
                },
            },
            DynamicValue::Float(v) => float_to_json(f64::from(*v)),
            DynamicValue::Double(v) => float_to_json(*v),
            DynamicValue::Str(s) => Value::String(s.clone()),
            DynamicValue::Binary(bytes) => {
                Value::String(format!("{BIN_URI_START}{}", STANDARD.encode(bytes)))
            }
            DynamicValue::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            DynamicValue::Map(entries) => {
                let mut object = Map::new();
                for (key, value) in entries {
                    object.insert(key_to_string(key), value.to_json());
                }
                Value::Object(object)
            }
        }
    }

    /// Builds a value from JSON.
    ///
    /// Integers take the narrowest integer variant, other numbers become
    /// `Double`. Strings with the binary data URI prefix and a valid base64
    /// payload become `Binary`. Objects become maps with string keys in
    /// document order.
    pub fn from_json(json: &Value) -> Self {
        match json {
            Value::Null => DynamicValue::Nil,
            Value::Bool(v) => DynamicValue::Bool(*v),
            Value::Number(n) => {
                if let Some(v) = n.as_i64() {
                    DynamicValue::integer(v.into())
                } else if let Some(v) = n.as_u64() {
                    DynamicValue::integer(v.into())
                } else {
                    DynamicValue::Double(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => match s.strip_prefix(BIN_URI_START) {
                Some(payload) => match STANDARD.decode(payload) {
                    Ok(bytes) => DynamicValue::Binary(bytes),
                    Err(_) => DynamicValue::Str(s.clone()),
                },
                None => DynamicValue::Str(s.clone()),
            },
            Value::Array(items) => DynamicValue::Array(items.iter().map(Self::from_json).collect()),
            Value::Object(object) => DynamicValue::Map(
                object
                    .iter()
                    .map(|(k, v)| (DynamicValue::Str(k.clone()), Self::from_json(v)))
                    .collect(),
            ),
        }
    }
}

impl From<&Value> for DynamicValue {
    fn from(json: &Value) -> Self {
        DynamicValue::from_json(json)
    }
}

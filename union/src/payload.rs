//! Per-field payload helpers called from the derived field table
//!
//! These are the value-level primitives the union engine is built on: the zero test that
//! decides whether a field is set, and the encode/decode steps that move a single field's
//! payload to and from a `serde_json::Value`.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Number, Value};
use strum::Display;
use thiserror::Error;

/// Integral floats at or above this magnitude are left as floats when encoding
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// How strictly a payload must match its target type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum DecodeMode {
    /// Keys the target type does not declare are ignored
    Lenient,
    /// Any key the target type does not declare fails the decode, at any depth
    Strict,
}

/// Failure decoding a single payload
#[derive(Debug, Error)]
pub enum PayloadError {
    /// The payload does not deserialize into the target type
    #[error(transparent)]
    Decode(#[from] serde_json::Error),

    /// Strict decode saw keys the target type does not declare
    #[error("unknown fields: {}", .0.join(", "))]
    UnknownFields(Vec<String>),
}

/// Whether `value` is its type's zero value
///
/// A field holding its zero value counts as unset. This means a payload that is
/// legitimately all zeros (a circle of radius 0) cannot be told apart from an unset field.
#[must_use]
pub fn is_zero<T: Default + PartialEq>(value: &T) -> bool {
    *value == T::default()
}

/// Encode a payload to a JSON value
///
/// Floats with no fractional part are written as integers, so `5.0` goes on the wire as
/// `5`. Decoding accepts either form for float fields. The rewrite covers the whole payload
/// tree, so a payload that is itself a `serde_json::Value` holding `5.0` decodes back as `5`
/// and no longer compares equal. `-0.0` keeps its float form.
pub fn encode<T: Serialize>(value: &T) -> serde_json::Result<Value> {
    serde_json::to_value(value).map(integral_floats_as_integers)
}

/// Decode a payload from a JSON value
pub fn decode<T: DeserializeOwned>(value: &Value, mode: DecodeMode) -> Result<T, PayloadError> {
    match mode {
        DecodeMode::Lenient => Ok(T::deserialize(value)?),
        DecodeMode::Strict => {
            let mut unknown = Vec::new();
            let decoded = serde_ignored::deserialize(value, |path| unknown.push(path.to_string()))?;
            if unknown.is_empty() {
                Ok(decoded)
            } else {
                Err(PayloadError::UnknownFields(unknown))
            }
        }
    }
}

fn integral_floats_as_integers(value: Value) -> Value {
    match value {
        Value::Number(number) => Value::Number(integral_number(number)),
        Value::Array(items) => items.into_iter().map(integral_floats_as_integers).collect(),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key, integral_floats_as_integers(value)))
                .collect(),
        ),
        other => other,
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "only integral floats within the exact integer range are cast"
)]
fn integral_number(number: Number) -> Number {
    match number.as_f64() {
        Some(float)
            if number.is_f64()
                && float.fract() == 0.0
                && float.abs() < MAX_EXACT_INTEGER
                && !(float == 0.0 && float.is_sign_negative()) =>
        {
            Number::from(float as i64)
        }
        _ => number,
    }
}

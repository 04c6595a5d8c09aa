//! Per-field value coercion.
//!
//! Converts raw column values to a field's declared type. Malformed input is
//! always an error; nothing falls back to a default.

use super::schema::FieldType;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;
use thiserror::Error;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Error)]
#[error("expected {expected}, got {found} ({reason})")]
pub struct CoercionError {
    pub expected: FieldType,
    pub found: String,
    pub reason: String,
}

impl CoercionError {
    fn new(expected: &FieldType, found: &Value, reason: impl Into<String>) -> Self {
        Self {
            expected: expected.clone(),
            found: found.to_string(),
            reason: reason.into(),
        }
    }
}

pub fn coerce(raw: Value, ty: &FieldType) -> Result<Value, CoercionError> {
    match (ty, raw) {
        (FieldType::Untyped, value) => Ok(value),
        (FieldType::Nilable(_), Value::Null) => Ok(Value::Null),
        (FieldType::Nilable(inner), value) => coerce(value, inner),
        (_, Value::Null) => Err(CoercionError::new(ty, &Value::Null, "field is not nilable")),
        (FieldType::Integer, value) => to_integer(value, ty),
        (FieldType::Float, value) => to_float(value, ty),
        (FieldType::String, value) => to_string(value, ty),
        (FieldType::Boolean, value) => to_boolean(value, ty),
        (FieldType::Date, value) => to_date(value, ty),
        (FieldType::DateTime, value) => to_datetime(value, ty),
        (FieldType::Array(inner), Value::Array(items)) => items
            .into_iter()
            .map(|item| coerce(item, inner))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        (FieldType::Array(_), value) => Err(CoercionError::new(ty, &value, "not an array")),
    }
}

fn to_integer(value: Value, ty: &FieldType) -> Result<Value, CoercionError> {
    match &value {
        Value::Number(n) if n.is_i64() || n.is_u64() => Ok(value),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Ok(Value::from(f as i64))
            }
            _ => Err(CoercionError::new(ty, &value, "not an integral number")),
        },
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|e| CoercionError::new(ty, &value, e.to_string())),
        _ => Err(CoercionError::new(ty, &value, "unsupported value")),
    }
}

fn to_float(value: Value, ty: &FieldType) -> Result<Value, CoercionError> {
    let parsed = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(f) if f.is_finite() => Ok(Value::from(f)),
        _ => Err(CoercionError::new(ty, &value, "not a finite number")),
    }
}

fn to_string(value: Value, ty: &FieldType) -> Result<Value, CoercionError> {
    match value {
        Value::String(_) => Ok(value),
        Value::Number(n) => Ok(Value::String(n.to_string())),
        Value::Bool(b) => Ok(Value::String(b.to_string())),
        other => Err(CoercionError::new(ty, &other, "unsupported value")),
    }
}

fn to_boolean(value: Value, ty: &FieldType) -> Result<Value, CoercionError> {
    let parsed = match &value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "1" | "yes" => Some(true),
            "false" | "f" | "0" | "no" => Some(false),
            _ => None,
        },
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        _ => None,
    };
    parsed
        .map(Value::Bool)
        .ok_or_else(|| CoercionError::new(ty, &value, "not a boolean"))
}

fn to_date(value: Value, ty: &FieldType) -> Result<Value, CoercionError> {
    let Value::String(s) = &value else {
        return Err(CoercionError::new(ty, &value, "dates must be strings"));
    };
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map(|d| Value::String(d.format(DATE_FORMAT).to_string()))
        .map_err(|e| CoercionError::new(ty, &value, e.to_string()))
}

fn to_datetime(value: Value, ty: &FieldType) -> Result<Value, CoercionError> {
    let Value::String(s) = &value else {
        return Err(CoercionError::new(ty, &value, "timestamps must be strings"));
    };
    let s = s.trim();
    let parsed = DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(s, DATETIME_FORMAT).map(|dt| dt.and_utc()));
    parsed
        .map(|dt| Value::String(dt.to_rfc3339_opts(SecondsFormat::Secs, true)))
        .map_err(|e| CoercionError::new(ty, &value, e.to_string()))
}

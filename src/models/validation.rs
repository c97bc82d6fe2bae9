//! Request-body validation.
//!
//! A payload is checked field by field in schema order. Supplied values must
//! have the right JSON type, keys outside the schema are rejected, and the
//! remaining rules (required, non-empty) come from the DTO's `validator`
//! attributes.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::{Map, Value};
use validator::{Validate, ValidationErrors};

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Date,
}

/// A request DTO with a fixed, ordered set of recognized fields.
pub trait Schema: DeserializeOwned + Validate {
    const FIELDS: &'static [(&'static str, FieldKind)];
}

pub fn validate_payload<T: Schema>(body: Value) -> Result<T> {
    let Value::Object(mut body) = body else {
        return Err(Error::Validation(
            "\"value\" must be of type object".to_string(),
        ));
    };

    let mut recognized = Map::new();
    for &(name, kind) in T::FIELDS {
        let Some(value) = body.remove(name) else {
            continue;
        };
        check_type(name, kind, &value)?;
        recognized.insert(name.to_string(), value);
    }

    let payload: T = serde_json::from_value(Value::Object(recognized))
        .map_err(|err| Error::Validation(err.to_string()))?;

    payload
        .validate()
        .map_err(|errors| Error::Validation(first_message::<T>(&errors)))?;

    if let Some(unknown) = body.keys().next() {
        return Err(Error::Validation(format!("\"{unknown}\" is not allowed")));
    }

    Ok(payload)
}

fn check_type(name: &str, kind: FieldKind, value: &Value) -> Result<()> {
    let (valid, expectation) = match kind {
        FieldKind::Text => (value.is_string(), "must be a string"),
        FieldKind::Date => (parse_date(value).is_some(), "must be a valid date"),
    };

    if valid {
        Ok(())
    } else {
        Err(Error::Validation(format!("\"{name}\" {expectation}")))
    }
}

fn first_message<T: Schema>(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();

    let message = |errs: &[validator::ValidationError]| {
        errs.iter()
            .find_map(|err| err.message.as_ref().map(|message| message.to_string()))
    };

    // Renamed fields are keyed by their Rust name, so fall back to any field.
    T::FIELDS
        .iter()
        .filter_map(|(name, _)| field_errors.get(*name))
        .find_map(|errs| message(errs.as_slice()))
        .or_else(|| field_errors.values().find_map(|errs| message(errs.as_slice())))
        .unwrap_or_else(|| errors.to_string())
}

/// Accepts RFC 3339 timestamps, `YYYY-MM-DD`, `MM/DD/YYYY` and epoch millis.
pub fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(millis) => millis.as_i64().and_then(DateTime::from_timestamp_millis),
        Value::String(text) => parse_date_str(text.trim()),
        _ => None,
    }
}

fn parse_date_str(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(date_time) = DateTime::parse_from_rfc3339(text) {
        return Some(date_time.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }

    ["%Y-%m-%d", "%m/%d/%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

pub fn deserialize_date<'de, D>(deserializer: D) -> core::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None => Ok(None),
        Some(value) => parse_date(&value)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom("\"date\" must be a valid date")),
    }
}

//! Conversion of raw form strings into a typed JSON payload
//!
//! Rules are keyed by field name and apply to every resource:
//! `id` becomes an integer for update and delete, `duration` is whole
//! seconds, `distance` is a double and `date` is an absolute UTC instant.
//! Everything else passes through as the literal string.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::error::AdminError;
use crate::resource::Operation;
use crate::schema::{FieldDescriptor, FieldKind};

/// Raw form input, keyed by field name
pub type FormValues = BTreeMap<String, String>;

/// Field names with a dedicated coercion rule
const NAME_RULED: &[&str] = &["id", "duration", "duration_minutes", "duration_seconds", "distance", "date"];

/// Accepted shapes of a `datetime-local` input
const LOCAL_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"];

/// The typed JSON object sent to the server after coercion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

impl Payload {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn id(&self) -> Option<i64> {
        self.0.get("id").and_then(Value::as_i64)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }
}

/// Coerce with the client's local timezone.
pub fn coerce(operation: Operation, raw: &FormValues) -> Result<Payload, AdminError> {
    coerce_in(operation, raw, &chrono::Local)
}

/// Apply the name rules, interpreting local date-times in `tz`.
///
/// Fails on the first field that cannot be coerced; a partial payload is
/// never returned.
pub fn coerce_in<Tz: TimeZone>(operation: Operation, raw: &FormValues, tz: &Tz) -> Result<Payload, AdminError> {
    let mut payload = Payload::default();

    for (name, value) in raw {
        match name.as_str() {
            "id" => {
                if operation.requires_id() {
                    payload.insert("id", Value::from(parse_integer("id", value)?));
                }
            }
            "duration" => {
                payload.insert("duration", Value::from(parse_non_negative("duration", value)?));
            }
            "duration_minutes" | "duration_seconds" => {}
            "distance" => {
                payload.insert("distance", Value::from(parse_decimal("distance", value)?));
            }
            "date" => {
                payload.insert("date", Value::String(to_utc_instant("date", value, tz)?));
            }
            _ => payload.insert(name.clone(), Value::String(value.clone())),
        }
    }

    if !raw.contains_key("duration") {
        let minutes = raw.get("duration_minutes");
        let seconds = raw.get("duration_seconds");
        if minutes.is_some() || seconds.is_some() {
            let total = combine_duration(
                minutes.map(String::as_str).unwrap_or("0"),
                seconds.map(String::as_str).unwrap_or("0"),
            )?;
            payload.insert("duration", Value::from(total));
        }
    }

    if operation.requires_id() && payload.id().is_none() {
        return Err(AdminError::validation("id", "is required"));
    }

    Ok(payload)
}

/// Coerce only the fields of a resolved schema.
///
/// Required fields must be present and non-blank. After the name rules,
/// integer and decimal descriptors without a dedicated rule (for example
/// `set1` or `weights_log_id`) are converted to JSON numbers.
pub fn coerce_with_schema<Tz: TimeZone>(
    operation: Operation,
    fields: &[FieldDescriptor],
    raw: &FormValues,
    tz: &Tz,
) -> Result<Payload, AdminError> {
    for field in fields.iter().filter(|f| f.required) {
        let blank = raw.get(field.name).map_or(true, |v| v.trim().is_empty());
        if blank {
            return Err(AdminError::validation(field.name, "is required"));
        }
    }

    let scoped: FormValues = raw
        .iter()
        .filter(|(name, _)| fields.iter().any(|f| f.name == name.as_str()))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    let mut payload = coerce_in(operation, &scoped, tz)?;

    for field in fields.iter().filter(|f| !NAME_RULED.contains(&f.name)) {
        let Some(Value::String(text)) = payload.get(field.name).cloned() else {
            continue;
        };
        let typed = match field.kind {
            FieldKind::Integer => Value::from(parse_integer(field.name, &text)?),
            FieldKind::Decimal => Value::from(parse_decimal(field.name, &text)?),
            FieldKind::Timestamp => Value::String(to_utc_instant(field.name, &text, tz)?),
            FieldKind::Text => continue,
        };
        payload.insert(field.name, typed);
    }

    Ok(payload)
}

/// `minutes * 60 + seconds`, both given as form strings.
pub fn combine_duration(minutes: &str, seconds: &str) -> Result<i64, AdminError> {
    let minutes = parse_non_negative("duration_minutes", minutes)?;
    let seconds = parse_non_negative("duration_seconds", seconds)?;
    minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .ok_or_else(|| AdminError::validation("duration", "is too large"))
}

pub fn parse_integer(field: &str, raw: &str) -> Result<i64, AdminError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AdminError::validation(field, "is required"));
    }
    raw.parse::<i64>()
        .map_err(|_| AdminError::validation(field, format!("'{}' is not a whole number", raw)))
}

fn parse_non_negative(field: &str, raw: &str) -> Result<i64, AdminError> {
    let value = parse_integer(field, raw)?;
    if value < 0 {
        return Err(AdminError::validation(field, "must not be negative"));
    }
    Ok(value)
}

/// Locale-independent decimal parse; `,` is never a decimal separator.
pub fn parse_decimal(field: &str, raw: &str) -> Result<f64, AdminError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AdminError::validation(field, "is required"));
    }
    let value = raw
        .parse::<f64>()
        .map_err(|_| AdminError::validation(field, format!("'{}' is not a number", raw)))?;
    if !value.is_finite() {
        return Err(AdminError::validation(field, "must be a finite number"));
    }
    Ok(value)
}

/// Interpret `raw` as a date-time local to `tz` and serialize it as a UTC instant.
///
/// Inputs that already carry an offset keep the instant they denote. A local
/// time skipped by a DST transition is rejected; an ambiguous one resolves to
/// the earlier instant.
pub fn to_utc_instant<Tz: TimeZone>(field: &str, raw: &str, tz: &Tz) -> Result<String, AdminError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AdminError::validation(field, "is required"));
    }

    if let Ok(absolute) = DateTime::parse_from_rfc3339(raw) {
        return Ok(format_instant(&absolute.with_timezone(&Utc)));
    }

    let naive = LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| AdminError::validation(field, format!("'{}' is not a date and time", raw)))?;

    let local = tz
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| AdminError::validation(field, format!("'{}' does not exist in the local timezone", raw)))?;

    Ok(format_instant(&local.with_timezone(&Utc)))
}

/// ISO 8601 with millisecond precision and the `Z` designator
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

//! Records returned by `/admin/view/{resource}`
//!
//! Each resource has a typed variant. A record that does not match its
//! resource's shape exactly (missing or extra keys, wrong types) is kept as
//! [`Row::Unknown`] so the renderer can still show it.

use chrono::{DateTime, FixedOffset};
use serde::de::DeserializeOwned;
use std::ops::Deref;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AdminError;
use crate::resource::Resource;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRow {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    /// Whole seconds
    pub duration: i64,
    pub distance: f64,
    pub date: DateTime<FixedOffset>,
}

impl WorkoutRow {
    pub const COLUMNS: &'static [&'static str] = &["id", "type", "duration", "distance", "date"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightsLogRow {
    pub id: i64,
    pub workout_type: String,
    #[serde(default)]
    pub exercises: Option<Vec<ExerciseRow>>,
    pub date: DateTime<FixedOffset>,
}

impl WeightsLogRow {
    pub const COLUMNS: &'static [&'static str] = &["id", "workout_type", "exercises", "date"];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRow {
    pub id: i64,
    pub weights_log_id: i64,
    pub name: String,
    pub set1: i64,
    pub set2: i64,
    pub set3: i64,
}

impl ExerciseRow {
    pub const COLUMNS: &'static [&'static str] = &["id", "weights_log_id", "name", "set1", "set2", "set3"];
}

/// Workout of the day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WodRow {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: i64,
    pub distance: f64,
    pub date: DateTime<FixedOffset>,
}

impl WodRow {
    pub const COLUMNS: &'static [&'static str] = &["id", "type", "duration", "distance", "date"];
}

/// Catalog entry linking a weights workout type to one exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightWorkoutRow {
    pub id: i64,
    pub workout_type: String,
    pub exercise: String,
}

impl WeightWorkoutRow {
    pub const COLUMNS: &'static [&'static str] = &["id", "workout_type", "exercise"];
}

/// A typed record together with the object it was decoded from.
///
/// Cells are rendered from `raw`, so a server value such as `5` stays `5`
/// rather than round-tripping through the struct as `5.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Typed<T> {
    pub record: T,
    raw: Map<String, Value>,
}

impl<T> Typed<T> {
    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }
}

impl<T> Deref for Typed<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.record
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Workout(Typed<WorkoutRow>),
    WeightsLog(Typed<WeightsLogRow>),
    Exercise(Typed<ExerciseRow>),
    Wod(Typed<WodRow>),
    WeightWorkout(Typed<WeightWorkoutRow>),
    /// Forward-compatible fallback, in the server's key order
    Unknown(Map<String, Value>),
}

impl Row {
    /// Decode one record of `resource`, falling back to [`Row::Unknown`].
    pub fn decode(resource: Resource, value: Value) -> Row {
        let typed = match resource {
            Resource::Workouts => typed(&value, WorkoutRow::COLUMNS).map(Row::Workout),
            Resource::WeightsLogs => typed(&value, WeightsLogRow::COLUMNS).map(Row::WeightsLog),
            Resource::Exercises => typed(&value, ExerciseRow::COLUMNS).map(Row::Exercise),
            Resource::Wods => typed(&value, WodRow::COLUMNS).map(Row::Wod),
            Resource::WeightWorkouts => typed(&value, WeightWorkoutRow::COLUMNS).map(Row::WeightWorkout),
        };
        if let Some(row) = typed {
            return row;
        }

        log::debug!("{} record does not match its schema, keeping it untyped", resource);
        match value {
            Value::Object(map) => Row::Unknown(map),
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                Row::Unknown(map)
            }
        }
    }

    /// Decode a view response body. `null` is an empty result set.
    pub fn decode_all(resource: Resource, body: &str) -> Result<Vec<Row>, AdminError> {
        match serde_json::from_str::<Value>(body)? {
            Value::Null => Ok(Vec::new()),
            Value::Array(items) => Ok(items.into_iter().map(|v| Row::decode(resource, v)).collect()),
            other => Err(AdminError::Decode(format!(
                "expected an array of {} records, got {}",
                resource,
                kind_of(&other)
            ))),
        }
    }

    /// Field name to value, in the server's key order
    pub fn fields(&self) -> Map<String, Value> {
        self.raw().clone()
    }

    fn raw(&self) -> &Map<String, Value> {
        match self {
            Row::Workout(r) => r.raw(),
            Row::WeightsLog(r) => r.raw(),
            Row::Exercise(r) => r.raw(),
            Row::Wod(r) => r.raw(),
            Row::WeightWorkout(r) => r.raw(),
            Row::Unknown(map) => map,
        }
    }

    /// Column names, taken from the record's own keys
    pub fn columns(&self) -> Vec<String> {
        self.raw().keys().cloned().collect()
    }

    pub fn cell(&self, column: &str) -> Option<Value> {
        self.raw().get(column).cloned()
    }

    pub fn is_typed(&self) -> bool {
        !matches!(self, Row::Unknown(_))
    }
}

/// Typed only when the object carries exactly `columns`, no more and no fewer.
fn typed<T: DeserializeOwned>(value: &Value, columns: &[&str]) -> Option<Typed<T>> {
    let object = value.as_object()?;
    if object.len() != columns.len() || !columns.iter().all(|c| object.contains_key(*c)) {
        return None;
    }
    let record = serde_json::from_value(value.clone()).ok()?;
    Some(Typed {
        record,
        raw: object.clone(),
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_typed_workout() {
        let row = Row::decode(
            Resource::Workouts,
            json!({"id": 1, "type": "run", "duration": 1800, "distance": 5.0, "date": "2024-01-01T07:00:00Z"}),
        );
        match row {
            Row::Workout(w) => {
                assert_eq!(w.kind, "run");
                assert_eq!(w.duration, 1800);
            }
            other => panic!("expected workout row, got {:?}", other),
        }
    }

    #[test]
    fn test_weights_log_with_null_exercises() {
        let row = Row::decode(
            Resource::WeightsLogs,
            json!({"id": 3, "workout_type": "push", "exercises": null, "date": "2024-02-01T10:00:00+01:00"}),
        );
        assert!(row.is_typed());
        assert_eq!(row.columns(), vec!["id", "workout_type", "exercises", "date"]);
    }

    #[test]
    fn test_extra_key_falls_back_to_unknown() {
        let row = Row::decode(
            Resource::WeightWorkouts,
            json!({"id": 1, "workout_type": "push", "exercise": "Bench", "notes": "new"}),
        );
        assert!(!row.is_typed());
        assert_eq!(row.columns(), vec!["id", "workout_type", "exercise", "notes"]);
    }

    #[test]
    fn test_missing_key_falls_back_to_unknown() {
        let row = Row::decode(
            Resource::WeightsLogs,
            json!({"id": 1, "workout_type": "push", "date": "2024-02-01T09:00:00Z"}),
        );
        assert!(!row.is_typed());
        assert_eq!(row.columns(), vec!["id", "workout_type", "date"]);
    }

    #[test]
    fn test_typed_row_keeps_server_values() {
        let row = Row::decode(
            Resource::Workouts,
            json!({"id": 1, "type": "run", "duration": 1800, "distance": 5, "date": "2024-01-01T07:00:00Z"}),
        );
        assert!(row.is_typed());
        assert_eq!(row.cell("distance"), Some(json!(5)));
        assert_eq!(row.cell("date"), Some(json!("2024-01-01T07:00:00Z")));
    }

    #[test]
    fn test_decode_all_null_is_empty() {
        assert!(Row::decode_all(Resource::Wods, "null").unwrap().is_empty());
    }

    #[test]
    fn test_decode_all_rejects_object() {
        let err = Row::decode_all(Resource::Wods, r#"{"error":"boom"}"#).unwrap_err();
        assert!(matches!(err, AdminError::Decode(_)));
    }
}

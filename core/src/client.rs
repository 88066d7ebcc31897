//! Client for the workout logging endpoints used by the fitness pages

use async_trait::async_trait;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

use crate::coerce::{combine_duration, format_instant, parse_decimal, parse_integer};
use crate::error::AdminError;
use crate::orchestrator::SummaryRefresh;
use crate::row::{WeightWorkoutRow, WeightsLogRow, WodRow, WorkoutRow};
use crate::transport::{ApiRequest, Transport};

/// Workout types counted as cardio by the history endpoints
pub const CARDIO_TYPES: &[&str] = &["run", "bike", "row", "walk", "crosstrainer"];

pub const WEIGHTS_TYPES: &[&str] = &["push", "pull", "legs"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardioEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: i64,
    pub distance: f64,
    pub date: String,
}

impl CardioEntry {
    /// Build an entry from the cardio form, stamped with the current time.
    pub fn from_form(kind: &str, minutes: &str, seconds: &str, distance: &str) -> Result<Self, AdminError> {
        let kind = kind.trim();
        if kind.is_empty() {
            return Err(AdminError::validation("type", "is required"));
        }
        Ok(Self {
            kind: kind.to_string(),
            duration: combine_duration(minutes, seconds)?,
            distance: parse_decimal("distance", distance)?,
            date: format_instant(&Utc::now()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSets {
    pub name: String,
    pub set1: i64,
    pub set2: i64,
    pub set3: i64,
}

impl ExerciseSets {
    /// Blank set inputs count as zero.
    pub fn from_form(name: &str, sets: [&str; 3]) -> Result<Self, AdminError> {
        let mut parsed = [0i64; 3];
        for (i, raw) in sets.iter().enumerate() {
            if !raw.trim().is_empty() {
                parsed[i] = parse_integer(&format!("{} set {}", name, i + 1), raw)?;
            }
        }
        Ok(Self {
            name: name.to_string(),
            set1: parsed[0],
            set2: parsed[1],
            set3: parsed[2],
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightsLogEntry {
    pub workout_type: String,
    pub exercises: Vec<ExerciseSets>,
    pub date: String,
}

impl WeightsLogEntry {
    pub fn new(workout_type: impl Into<String>, exercises: Vec<ExerciseSets>) -> Self {
        Self {
            workout_type: workout_type.into(),
            exercises,
            date: format_instant(&Utc::now()),
        }
    }
}

pub struct WorkoutClient<T> {
    transport: T,
}

impl<T: Transport> WorkoutClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub async fn workout_of_the_day(&self) -> Result<WodRow, AdminError> {
        self.get_json("/workout/today").await
    }

    pub async fn log_cardio(&self, entry: &CardioEntry) -> Result<(), AdminError> {
        self.post_json("/workout/log/cardio", entry).await
    }

    pub async fn log_weights(&self, entry: &WeightsLogEntry) -> Result<(), AdminError> {
        self.post_json("/workout/log/weights", entry).await
    }

    pub async fn logged_cardio(&self) -> Result<Vec<WorkoutRow>, AdminError> {
        let rows: Option<Vec<WorkoutRow>> = self.get_json("/workout/logs/cardio").await?;
        Ok(rows.unwrap_or_default())
    }

    pub async fn logged_weights(&self) -> Result<Vec<WeightsLogRow>, AdminError> {
        let rows: Option<Vec<WeightsLogRow>> = self.get_json("/workout/logs/weights").await?;
        Ok(rows.unwrap_or_default())
    }

    /// Most recent weights log of `workout_type`, if any
    pub async fn last_weights(&self, workout_type: &str) -> Result<Option<WeightsLogRow>, AdminError> {
        let path = format!("/workout/last/weights?type={}", urlencoding::encode(workout_type));
        let response = self.transport.send(ApiRequest::get(path.clone())).await?;
        if response.status == 404 {
            log::debug!("No {} workout logged yet", workout_type);
            return Ok(None);
        }
        if !response.is_success() {
            return Err(AdminError::Status {
                path,
                status: response.status,
            });
        }
        Ok(serde_json::from_str(&response.body)?)
    }

    /// Exercise catalog for `workout_type`
    pub async fn weight_workouts(&self, workout_type: &str) -> Result<Vec<WeightWorkoutRow>, AdminError> {
        let path = format!("/workout/weight-workouts?type={}", urlencoding::encode(workout_type));
        let rows: Option<Vec<WeightWorkoutRow>> = self.get_json(&path).await?;
        Ok(rows.unwrap_or_default())
    }

    async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, AdminError> {
        let response = self.transport.send(ApiRequest::get(path)).await?;
        if !response.is_success() {
            log::error!("GET {} failed with status {}", path, response.status);
            return Err(AdminError::Status {
                path: path.to_string(),
                status: response.status,
            });
        }
        Ok(serde_json::from_str(&response.body)?)
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), AdminError> {
        let request = ApiRequest::post(path, Some(serde_json::to_value(body)?));
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            log::error!("POST {} failed with status {}", path, response.status);
            return Err(AdminError::Status {
                path: path.to_string(),
                status: response.status,
            });
        }
        Ok(())
    }
}

/// Cardio history table kept in sync after admin writes
pub struct CardioHistory<T> {
    client: WorkoutClient<T>,
    entries: RefCell<Vec<WorkoutRow>>,
}

impl<T: Transport> CardioHistory<T> {
    pub fn new(transport: T) -> Self {
        Self {
            client: WorkoutClient::new(transport),
            entries: RefCell::new(Vec::new()),
        }
    }

    pub fn entries(&self) -> Vec<WorkoutRow> {
        self.entries.borrow().clone()
    }
}

#[async_trait(?Send)]
impl<T: Transport> SummaryRefresh for CardioHistory<T> {
    fn name(&self) -> &str {
        "cardio log"
    }

    async fn refresh(&self) -> Result<(), AdminError> {
        let rows = self.client.logged_cardio().await?;
        log::info!("Fetched {} logged cardio workouts", rows.len());
        *self.entries.borrow_mut() = rows;
        Ok(())
    }
}

/// Weights history table kept in sync after admin writes
pub struct WeightsHistory<T> {
    client: WorkoutClient<T>,
    entries: RefCell<Vec<WeightsLogRow>>,
}

impl<T: Transport> WeightsHistory<T> {
    pub fn new(transport: T) -> Self {
        Self {
            client: WorkoutClient::new(transport),
            entries: RefCell::new(Vec::new()),
        }
    }

    pub fn entries(&self) -> Vec<WeightsLogRow> {
        self.entries.borrow().clone()
    }
}

#[async_trait(?Send)]
impl<T: Transport> SummaryRefresh for WeightsHistory<T> {
    fn name(&self) -> &str {
        "weights log"
    }

    async fn refresh(&self) -> Result<(), AdminError> {
        let rows = self.client.logged_weights().await?;
        log::info!("Fetched {} logged weights workouts", rows.len());
        *self.entries.borrow_mut() = rows;
        Ok(())
    }
}

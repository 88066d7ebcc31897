//! API client for the persistence service, reached through the host's proxy

use async_trait::async_trait;
use gloo_net::http::Request;
use momentum_core::client::WorkoutClient;
use momentum_core::row::{WeightWorkoutRow, WeightsLogRow, WodRow, WorkoutRow};
use momentum_core::session::{EmptyCommand, Submission};
use momentum_core::{AdminError, ApiRequest, ApiResponse, CardioEntry, ConsoleDefaults, Dispatcher, HttpMethod, Operation, Resource, Row, Transport, WeightsLogEntry};

/// [`Transport`] over the browser's fetch API, using same-origin paths
pub struct GlooTransport;

#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, AdminError> {
        let response = match (request.method, &request.body) {
            (HttpMethod::Get, _) => Request::get(&request.path).send().await,
            (HttpMethod::Post, Some(body)) => Request::post(&request.path)
                .json(body)
                .map_err(|e| AdminError::Transport(format!("Failed to serialize body: {}", e)))?
                .send()
                .await,
            (HttpMethod::Post, None) => Request::post(&request.path).send().await,
        }
        .map_err(|e| AdminError::Transport(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AdminError::Transport(format!("Failed to read response: {}", e)))?;

        Ok(ApiResponse::new(status, body))
    }
}

fn client() -> WorkoutClient<GlooTransport> {
    WorkoutClient::new(GlooTransport)
}

fn dispatcher() -> Dispatcher<GlooTransport> {
    Dispatcher::new(GlooTransport)
}

/// Opening table and operation configured on the host. Falls back to the
/// built-in defaults when the host cannot answer.
pub async fn console_defaults() -> ConsoleDefaults {
    let fetched = match Request::get("/api/console/defaults").send().await {
        Ok(response) if response.ok() => response
            .json::<ConsoleDefaults>()
            .await
            .map_err(|e| e.to_string()),
        Ok(response) => Err(format!("status {}", response.status())),
        Err(e) => Err(e.to_string()),
    };
    fetched.unwrap_or_else(|e| {
        log::warn!("Using built-in console defaults: {}", e);
        ConsoleDefaults::default()
    })
}

/// Fetch the current contents of an admin table
pub async fn view_table(resource: Resource) -> Result<Vec<Row>, AdminError> {
    dispatcher().view(resource).await
}

/// Send a coerced add, update or delete
pub async fn dispatch(submission: &Submission) -> Result<(), AdminError> {
    dispatcher()
        .dispatch(submission.resource, submission.operation, Some(&submission.payload))
        .await
        .map(|_| ())
}

pub async fn empty_table(command: EmptyCommand) -> Result<(), AdminError> {
    dispatcher()
        .dispatch(command.resource(), Operation::Empty, None)
        .await
        .map(|_| ())
}

pub async fn workout_of_the_day() -> Result<WodRow, String> {
    client().workout_of_the_day().await.map_err(|e| e.to_string())
}

pub async fn log_cardio(entry: &CardioEntry) -> Result<(), String> {
    client().log_cardio(entry).await.map_err(|e| e.to_string())
}

pub async fn log_weights(entry: &WeightsLogEntry) -> Result<(), String> {
    client().log_weights(entry).await.map_err(|e| e.to_string())
}

pub async fn logged_cardio() -> Result<Vec<WorkoutRow>, String> {
    client().logged_cardio().await.map_err(|e| e.to_string())
}

pub async fn logged_weights() -> Result<Vec<WeightsLogRow>, String> {
    client().logged_weights().await.map_err(|e| e.to_string())
}

pub async fn last_weights(workout_type: &str) -> Result<Option<WeightsLogRow>, String> {
    client().last_weights(workout_type).await.map_err(|e| e.to_string())
}

pub async fn weight_workouts(workout_type: &str) -> Result<Vec<WeightWorkoutRow>, String> {
    client().weight_workouts(workout_type).await.map_err(|e| e.to_string())
}

//! Momentum core: the schema-driven admin console and workout API client
//!
//! Everything here is free of UI and HTTP client code so the web UI and the
//! terminal console share one implementation. Requests leave the crate only
//! through the [`Transport`] trait.

pub mod client;
pub mod coerce;
pub mod dispatch;
pub mod error;
pub mod orchestrator;
pub mod render;
pub mod resource;
pub mod row;
pub mod schema;
pub mod session;
pub mod transport;
pub mod view;

pub use client::{CardioEntry, CardioHistory, ExerciseSets, WeightsHistory, WeightsLogEntry, WorkoutClient};
pub use coerce::{coerce, coerce_in, coerce_with_schema, FormValues, Payload};
pub use dispatch::{Dispatched, Dispatcher};
pub use error::AdminError;
pub use orchestrator::{Orchestrator, SubmitOutcome, SummaryRefresh};
pub use render::{render, Grid, ResultView, NO_DATA};
pub use resource::{ConsoleDefaults, Operation, Resource};
pub use row::Row;
pub use schema::{resolve, FieldDescriptor, FieldKind};
pub use session::{AdminSessionState, Notice, PendingEmpty, Phase, ViewTicket};
pub use transport::{ApiRequest, ApiResponse, HttpMethod, Transport};
pub use view::{field_views, FieldView, InputKind};

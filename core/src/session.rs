//! Admin console state machine
//!
//! `AdminSessionState` owns everything the admin page shows: selectors, the
//! resolved field set, raw form input, the result grid and the latest notice.
//! It performs no I/O. Callers start requests from the tickets and commands
//! it hands out, then feed the outcomes back in.

use chrono::{Local, TimeZone};

use crate::coerce::{coerce_with_schema, FormValues, Payload};
use crate::error::AdminError;
use crate::render::{render, ResultView};
use crate::resource::{ConsoleDefaults, Operation, Resource};
use crate::row::Row;
use crate::schema::{resolve, FieldDescriptor};
use crate::view::{field_views, FieldView};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No schema resolved yet
    Idle,
    SchemaShown,
    /// A write is in flight
    Submitting,
    /// A write succeeded and the field set was cleared
    ResultShown,
}

/// Message shown to the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

impl Notice {
    pub fn message(&self) -> &str {
        match self {
            Self::Success(m) | Self::Error(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Identifies one view fetch. Only the most recently issued ticket is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewTicket {
    generation: u64,
    resource: Resource,
}

impl ViewTicket {
    pub fn resource(&self) -> Resource {
        self.resource
    }
}

/// An empty request waiting for the operator's answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingEmpty {
    token: u64,
    resource: Resource,
}

impl PendingEmpty {
    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn prompt(&self) -> String {
        format!("Are you sure you want to empty the {} table?", self.resource)
    }
}

/// A confirmed empty, ready to dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyCommand {
    resource: Resource,
}

impl EmptyCommand {
    pub fn resource(&self) -> Resource {
        self.resource
    }
}

/// A coerced write, ready to dispatch
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub resource: Resource,
    pub operation: Operation,
    pub payload: Payload,
}

/// What the caller must do after a submit
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAction {
    Dispatch(Submission),
    /// View was selected: fetch the table again
    Refresh(ViewTicket),
    /// Empty was selected: ask for confirmation first
    Confirm(PendingEmpty),
}

/// Follow-up work after a successful write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AfterMutation {
    pub view: ViewTicket,
    pub refresh_summaries: bool,
}

#[derive(Debug, Clone)]
pub struct AdminSessionState {
    resource: Resource,
    operation: Operation,
    phase: Phase,
    fields: Vec<FieldDescriptor>,
    form: FormValues,
    view: Option<ResultView>,
    notice: Option<Notice>,
    pending_empty: Option<PendingEmpty>,
    view_generation: u64,
    empty_tokens: u64,
}

impl Default for AdminSessionState {
    fn default() -> Self {
        Self::from_defaults(ConsoleDefaults::default())
    }
}

impl AdminSessionState {
    pub fn from_defaults(defaults: ConsoleDefaults) -> Self {
        Self::new(defaults.resource, defaults.operation)
    }

    pub fn new(resource: Resource, operation: Operation) -> Self {
        Self {
            resource,
            operation,
            phase: Phase::Idle,
            fields: Vec::new(),
            form: FormValues::new(),
            view: None,
            notice: None,
            pending_empty: None,
            view_generation: 0,
            empty_tokens: 0,
        }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field_views(&self) -> Vec<FieldView> {
        field_views(&self.fields)
    }

    pub fn form(&self) -> &FormValues {
        &self.form
    }

    pub fn value(&self, field: &str) -> &str {
        self.form.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn view(&self) -> Option<&ResultView> {
        self.view.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn pending_empty(&self) -> Option<PendingEmpty> {
        self.pending_empty
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Page load: resolve the default schema and fetch its table.
    pub fn start(&mut self) -> Result<ViewTicket, AdminError> {
        self.show_schema()?;
        Ok(self.begin_view())
    }

    pub fn select_resource(&mut self, resource: Resource) -> Result<ViewTicket, AdminError> {
        self.resource = resource;
        self.pending_empty = None;
        self.show_schema()?;
        Ok(self.begin_view())
    }

    pub fn select_operation(&mut self, operation: Operation) -> Result<(), AdminError> {
        self.operation = operation;
        self.show_schema()
    }

    pub fn set_field(&mut self, field: &str, value: impl Into<String>) {
        self.form.insert(field.to_string(), value.into());
    }

    fn show_schema(&mut self) -> Result<(), AdminError> {
        self.form.clear();
        match resolve(self.resource, self.operation) {
            Ok(fields) => {
                self.fields = fields;
                self.phase = Phase::SchemaShown;
                Ok(())
            }
            Err(e) => {
                log::error!("Cannot show {} form for {}: {}", self.operation, self.resource, e);
                self.fields.clear();
                self.phase = Phase::Idle;
                self.notice = Some(Notice::Error(e.to_string()));
                Err(e)
            }
        }
    }

    /// Start a view fetch for the selected resource, superseding older ones.
    pub fn begin_view(&mut self) -> ViewTicket {
        self.view_generation += 1;
        ViewTicket {
            generation: self.view_generation,
            resource: self.resource,
        }
    }

    /// Apply a view result. Returns false when the ticket is stale and the
    /// result was discarded.
    pub fn apply_view(&mut self, ticket: ViewTicket, result: Result<Vec<Row>, AdminError>) -> bool {
        if ticket.generation != self.view_generation {
            log::debug!(
                "Discarding stale {} view (generation {}, current {})",
                ticket.resource,
                ticket.generation,
                self.view_generation
            );
            return false;
        }

        match result {
            Ok(rows) => self.view = Some(render(&rows)),
            Err(e) => {
                log::error!("Error fetching data for {}: {}", ticket.resource, e);
                self.notice = Some(Notice::Error(format!(
                    "Error fetching data for {}: {}",
                    ticket.resource, e
                )));
            }
        }
        true
    }

    pub fn begin_submit(&mut self) -> Result<SubmitAction, AdminError> {
        self.begin_submit_in(&Local)
    }

    /// Coerce the form in `tz` and decide what the submit turns into.
    ///
    /// A validation failure leaves the form populated and dispatches nothing.
    pub fn begin_submit_in<Tz: TimeZone>(&mut self, tz: &Tz) -> Result<SubmitAction, AdminError> {
        match self.operation {
            Operation::View => return Ok(SubmitAction::Refresh(self.begin_view())),
            Operation::Empty => return Ok(SubmitAction::Confirm(self.request_empty())),
            Operation::Add | Operation::Update | Operation::Delete => {}
        }

        if self.phase != Phase::SchemaShown {
            let form = std::mem::take(&mut self.form);
            self.show_schema()?;
            self.form = form;
        }

        match coerce_with_schema(self.operation, &self.fields, &self.form, tz) {
            Ok(payload) => {
                self.phase = Phase::Submitting;
                Ok(SubmitAction::Dispatch(Submission {
                    resource: self.resource,
                    operation: self.operation,
                    payload,
                }))
            }
            Err(e) => {
                log::warn!("Rejected {} on {}: {}", self.operation, self.resource, e);
                self.notice = Some(Notice::Error(e.to_string()));
                Err(e)
            }
        }
    }

    /// Apply the outcome of a dispatched submission.
    ///
    /// On success the form is reset, the field set cleared and a refresh of
    /// the table and the summary views is requested. On failure the form
    /// stays populated for correction.
    pub fn finish_submit(
        &mut self,
        submission: &Submission,
        outcome: Result<(), AdminError>,
    ) -> Option<AfterMutation> {
        let (resource, operation) = (submission.resource, submission.operation);
        match outcome {
            Ok(()) => {
                self.form.clear();
                self.fields.clear();
                self.phase = Phase::ResultShown;
                self.notice = Some(Notice::Success(format!(
                    "{} operation on {} table was successful!",
                    operation, resource
                )));
                Some(AfterMutation {
                    view: self.begin_view(),
                    refresh_summaries: true,
                })
            }
            Err(e) => {
                self.phase = Phase::SchemaShown;
                let message = match &e {
                    AdminError::Server { status, .. } => {
                        format!("Failed to {} {} (server status {}).", operation, resource, status)
                    }
                    other => format!("Error performing {} on {}: {}", operation, resource, other),
                };
                log::error!("{} ({})", message, e);
                self.notice = Some(Notice::Error(message));
                None
            }
        }
    }

    /// First step of the destructive empty action.
    pub fn request_empty(&mut self) -> PendingEmpty {
        self.empty_tokens += 1;
        let pending = PendingEmpty {
            token: self.empty_tokens,
            resource: self.resource,
        };
        self.pending_empty = Some(pending);
        pending
    }

    /// Accept the outstanding confirmation. Returns `None` if `pending` is not
    /// the outstanding request.
    pub fn confirm_empty(&mut self, pending: PendingEmpty) -> Option<EmptyCommand> {
        if self.pending_empty != Some(pending) {
            log::warn!("Ignoring confirmation for an empty request that is no longer pending");
            return None;
        }
        self.pending_empty = None;
        self.phase = Phase::Submitting;
        Some(EmptyCommand {
            resource: pending.resource,
        })
    }

    pub fn cancel_empty(&mut self) {
        self.pending_empty = None;
    }

    pub fn finish_empty(&mut self, command: EmptyCommand, outcome: Result<(), AdminError>) -> Option<AfterMutation> {
        self.phase = Phase::SchemaShown;
        match outcome {
            Ok(()) => {
                self.notice = Some(Notice::Success(format!(
                    "Emptied {} table successfully!",
                    command.resource
                )));
                Some(AfterMutation {
                    view: self.begin_view(),
                    refresh_summaries: true,
                })
            }
            Err(e) => {
                let message = match &e {
                    AdminError::Server { status, .. } => {
                        format!("Failed to empty {} table (server status {}).", command.resource, status)
                    }
                    other => format!("Error emptying {} table: {}", command.resource, other),
                };
                log::error!("{} ({})", message, e);
                self.notice = Some(Notice::Error(message));
                None
            }
        }
    }
}

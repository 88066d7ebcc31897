//! Drives [`AdminSessionState`] against a transport
//!
//! The orchestrator sequences one admin interaction: resolve the schema,
//! coerce, dispatch, then re-fetch the table and notify the summary views.

use async_trait::async_trait;
use chrono::{Local, TimeZone};

use crate::dispatch::Dispatcher;
use crate::error::AdminError;
use crate::resource::{Operation, Resource};
use crate::session::{AdminSessionState, AfterMutation, PendingEmpty, SubmitAction, ViewTicket};
use crate::transport::Transport;

/// A view outside the admin page that shows data an admin write may change.
#[async_trait(?Send)]
pub trait SummaryRefresh {
    fn name(&self) -> &str;

    async fn refresh(&self) -> Result<(), AdminError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A write succeeded and follow-up refreshes ran
    Applied,
    /// The table was fetched again
    Refreshed,
    /// Empty needs an explicit answer before anything is sent
    NeedsConfirmation(PendingEmpty),
}

pub struct Orchestrator<T, Tz: TimeZone = Local> {
    dispatcher: Dispatcher<T>,
    state: AdminSessionState,
    summaries: Vec<Box<dyn SummaryRefresh>>,
    tz: Tz,
}

impl<T: Transport> Orchestrator<T, Local> {
    pub fn new(transport: T, resource: Resource, operation: Operation) -> Self {
        Self::with_timezone(transport, resource, operation, Local)
    }
}

impl<T: Transport, Tz: TimeZone> Orchestrator<T, Tz> {
    /// Interpret local date-time inputs in `tz` instead of the host timezone.
    pub fn with_timezone(transport: T, resource: Resource, operation: Operation, tz: Tz) -> Self {
        Self {
            dispatcher: Dispatcher::new(transport),
            state: AdminSessionState::new(resource, operation),
            summaries: Vec::new(),
            tz,
        }
    }

    pub fn state(&self) -> &AdminSessionState {
        &self.state
    }

    pub fn add_summary(&mut self, summary: Box<dyn SummaryRefresh>) {
        self.summaries.push(summary);
    }

    pub async fn start(&mut self) -> Result<(), AdminError> {
        let ticket = self.state.start()?;
        self.load_view(ticket).await;
        Ok(())
    }

    /// Fetch the table for `ticket`; a superseded result is dropped.
    pub async fn load_view(&mut self, ticket: ViewTicket) -> bool {
        let result = self.dispatcher.view(ticket.resource()).await;
        self.state.apply_view(ticket, result)
    }

    pub async fn select_resource(&mut self, resource: Resource) -> Result<(), AdminError> {
        let ticket = self.state.select_resource(resource)?;
        self.load_view(ticket).await;
        Ok(())
    }

    pub fn select_operation(&mut self, operation: Operation) -> Result<(), AdminError> {
        self.state.select_operation(operation)
    }

    pub fn set_field(&mut self, field: &str, value: impl Into<String>) {
        self.state.set_field(field, value);
    }

    pub async fn submit(&mut self) -> Result<SubmitOutcome, AdminError> {
        match self.state.begin_submit_in(&self.tz)? {
            SubmitAction::Refresh(ticket) => {
                self.load_view(ticket).await;
                Ok(SubmitOutcome::Refreshed)
            }
            SubmitAction::Confirm(pending) => Ok(SubmitOutcome::NeedsConfirmation(pending)),
            SubmitAction::Dispatch(submission) => {
                let outcome = self
                    .dispatcher
                    .dispatch(submission.resource, submission.operation, Some(&submission.payload))
                    .await
                    .map(|_| ());
                let failure = outcome.as_ref().err().cloned();
                match self.state.finish_submit(&submission, outcome) {
                    Some(after) => {
                        self.after_mutation(after).await;
                        Ok(SubmitOutcome::Applied)
                    }
                    None => Err(failure.unwrap_or_else(|| AdminError::Transport("submission was not applied".into()))),
                }
            }
        }
    }

    pub fn request_empty(&mut self) -> PendingEmpty {
        self.state.request_empty()
    }

    /// Send the empty request for `pending`. Returns `Ok(false)` when the
    /// confirmation no longer matches an outstanding request.
    pub async fn confirm_empty(&mut self, pending: PendingEmpty) -> Result<bool, AdminError> {
        let Some(command) = self.state.confirm_empty(pending) else {
            return Ok(false);
        };
        let outcome = self
            .dispatcher
            .dispatch(command.resource(), Operation::Empty, None)
            .await
            .map(|_| ());
        let failure = outcome.as_ref().err().cloned();
        match self.state.finish_empty(command, outcome) {
            Some(after) => {
                self.after_mutation(after).await;
                Ok(true)
            }
            None => Err(failure.unwrap_or_else(|| AdminError::Transport("empty was not applied".into()))),
        }
    }

    pub fn cancel_empty(&mut self) {
        self.state.cancel_empty();
    }

    async fn after_mutation(&mut self, after: AfterMutation) {
        self.load_view(after.view).await;
        if !after.refresh_summaries {
            return;
        }
        for summary in &self.summaries {
            match summary.refresh().await {
                Ok(()) => log::debug!("Refreshed {}", summary.name()),
                Err(e) => log::error!("Failed to refresh {}: {}", summary.name(), e),
            }
        }
    }
}

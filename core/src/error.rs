//! Admin subsystem error types

use thiserror::Error;

use crate::resource::{Operation, Resource};

/// Errors surfaced to the operator by the admin subsystem.
///
/// None of these are retried automatically.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdminError {
    /// No field schema is registered for the requested resource
    #[error("No schema found for resource '{resource}'")]
    SchemaNotFound { resource: String },

    /// A form value failed coercion; nothing was dispatched
    #[error("Invalid value for field '{field}': {reason}")]
    Validation { field: String, reason: String },

    /// The request never reached the server
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("Failed to {operation} {resource}: server responded with status {status}")]
    Server {
        resource: Resource,
        operation: Operation,
        status: u16,
    },

    /// A non-admin endpoint answered with a non-success status
    #[error("Request to {path} failed with status {status}")]
    Status { path: String, status: u16 },

    /// The server answered with a body that could not be understood
    #[error("Malformed response: {0}")]
    Decode(String),
}

impl AdminError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True when the operator can fix the problem by editing the form.
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

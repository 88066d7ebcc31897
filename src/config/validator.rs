use momentum_core::{Operation, Resource};
use reqwest::Url;
use thiserror::Error;

use crate::config::{BackendSettings, ConsoleSettings, ServerSettings, Settings};

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_server(&settings.server) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_backend(&settings.backend) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_console(&settings.console) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(server: &ServerSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if server.host.is_empty() {
            errors.push(ValidationError::MissingField("server.host".to_string()));
        }

        if server.port == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_backend(backend: &BackendSettings) -> Result<(), Vec<ValidationError>> {
        if backend.url.is_empty() {
            return Err(vec![ValidationError::MissingField("backend.url".to_string())]);
        }

        match Url::parse(&backend.url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            Ok(url) => Err(vec![ValidationError::InvalidValue {
                field: "backend.url".to_string(),
                reason: format!("Unsupported scheme '{}', expected http or https", url.scheme()),
            }]),
            Err(e) => Err(vec![ValidationError::InvalidValue {
                field: "backend.url".to_string(),
                reason: e.to_string(),
            }]),
        }
    }

    fn validate_console(console: &ConsoleSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = console.default_resource.parse::<Resource>() {
            errors.push(ValidationError::InvalidValue {
                field: "console.default_resource".to_string(),
                reason: e.to_string(),
            });
        }

        if let Err(e) = console.default_operation.parse::<Operation>() {
            errors.push(ValidationError::InvalidValue {
                field: "console.default_operation".to_string(),
                reason: e.to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

use config::{Config, Environment, File};
use momentum_core::{ConsoleDefaults, Operation, Resource};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod validator;

use crate::cli::Cli;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub backend: BackendSettings,
    pub console: ConsoleSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// The workout persistence service that owns the tables
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendSettings {
    pub url: String,
}

/// Selection the admin consoles start with. The terminal console reads it
/// directly and the web console fetches it from `/api/console/defaults`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConsoleSettings {
    pub default_resource: String,
    pub default_operation: String,
}

impl ConsoleSettings {
    pub fn resource(&self) -> Result<Resource, anyhow::Error> {
        Ok(self.default_resource.parse()?)
    }

    pub fn operation(&self) -> Result<Operation, anyhow::Error> {
        Ok(self.default_operation.parse()?)
    }

    pub fn defaults(&self) -> Result<ConsoleDefaults, anyhow::Error> {
        Ok(ConsoleDefaults {
            resource: self.resource()?,
            operation: self.operation()?,
        })
    }
}

impl Settings {
    /// Create settings from CLI arguments (includes config file and CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::load(&cli.config)?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, anyhow::Error> {
        let settings = Self::load(path)?;
        settings.validate()?;
        Ok(settings)
    }

    fn load(path: &Path) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(
                Environment::with_prefix("MOMENTUM")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("backend.url", "http://127.0.0.1:8080")?
            .set_default("console.default_resource", "workouts")?
            .set_default("console.default_operation", "view")?
            .build()?;

        Ok(s.try_deserialize()?)
    }

    /// Apply CLI argument overrides to settings
    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(url) = &cli.backend_url {
            self.backend.url = url.clone();
        }
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }
}

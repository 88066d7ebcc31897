use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Momentum - fitness tracker console and admin tool
#[derive(Parser, Debug, Clone)]
#[command(name = "momentum", version, about, long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, env = "MOMENTUM_CONFIG", default_value = "momentum.toml")]
    pub config: PathBuf,

    /// Server host address
    #[arg(long, env = "MOMENTUM_HOST")]
    pub host: Option<String>,

    /// Server port
    #[arg(long, env = "MOMENTUM_PORT")]
    pub port: Option<u16>,

    /// Base URL of the workout persistence service
    #[arg(long, env = "MOMENTUM_BACKEND_URL")]
    pub backend_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Serve the web console (default)
    Serve,
    /// Run one admin operation against the persistence service
    Admin(AdminArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AdminArgs {
    /// Table to operate on (workouts, weights_logs, exercises, wods, weight_workouts)
    #[arg(short, long)]
    pub resource: Option<String>,

    /// Operation to run (view, add, update, delete, empty)
    #[arg(short, long)]
    pub operation: Option<String>,

    /// Form value as name=value, repeatable
    #[arg(short, long = "field", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,

    /// Skip the confirmation prompt of empty
    #[arg(short, long)]
    pub yes: bool,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing field name in '{}'", raw));
    }
    Ok((name.to_string(), value.to_string()))
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}

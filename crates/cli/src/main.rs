//! Herald CLI
//!
//! Dispatches a single notification event read from a JSON file.

mod services;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use herald_config::ConfigResolver;
use herald_core::Event;
use herald_dispatcher::Dispatcher;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

/// Herald: deliver a notification event by email, SMS, or Teams.
#[derive(Parser, Debug)]
#[command(name = "herald", version, about)]
struct Cli {
    /// Path to the event JSON file.
    #[arg(long)]
    event: PathBuf,

    /// Config file consulted when a setting is not in the environment.
    #[arg(long, env = "CONFIG_FILE", default_value = herald_config::settings::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Where offloaded attachments are stored.
    #[arg(long, value_enum, default_value = "s3")]
    attachments: AttachmentBackend,

    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum AttachmentBackend {
    S3,
    Memory,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Pretty,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let raw = std::fs::read_to_string(&cli.event)
        .with_context(|| format!("failed to read event file {}", cli.event.display()))?;
    let event: Event = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a valid event", cli.event.display()))?;

    let config = Arc::new(ConfigResolver::load(cli.config.clone())?);
    let services = services::build(config, cli.attachments).await?;
    let dispatcher = Dispatcher::new(services);

    let response = dispatcher.handle(event, &serde_json::json!({})).await?;
    info!(response = %response.response, "dispatch complete");

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&response)?),
        OutputFormat::Pretty => println!("{}", serde_json::to_string_pretty(&response)?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn event_path_is_required() {
        assert!(Cli::try_parse_from(["herald"]).is_err());
    }

    #[test]
    fn parses_event_and_backend() {
        let cli = Cli::try_parse_from([
            "herald",
            "--event",
            "event.json",
            "--config",
            "herald.toml",
            "--attachments",
            "memory",
        ])
        .unwrap();
        assert_eq!(cli.event, PathBuf::from("event.json"));
        assert_eq!(cli.config, PathBuf::from("herald.toml"));
        assert!(matches!(cli.attachments, AttachmentBackend::Memory));
        assert!(matches!(cli.format, OutputFormat::Json));
    }
}

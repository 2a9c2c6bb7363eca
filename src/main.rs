//! domloom - unified DOM trees from live browser pages.
//!
//! Main entry point for the domloom CLI.

mod cli;
mod cmd_config;
mod cmd_snapshot;

use std::sync::OnceLock;

use clap::Parser;
use domloom_config::{Config, ConfigLoader, LoggingConfig};
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands, ConfigAction};

static GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialize tracing with console and optional file output.
///
/// The filter comes from `--log-level`, then `RUST_LOG`, then the configured
/// level. Console output goes to stderr so stdout carries only results.
fn init_tracing(logging: &LoggingConfig, level: Option<&str>) -> anyhow::Result<()> {
    let env_filter = match level {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&logging.level))?,
    };

    let file_layer = if logging.file {
        let log_dir = ConfigLoader::expand_path(&logging.dir);
        std::fs::create_dir_all(&log_dir)?;

        let file_appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("domloom")
            .filename_suffix("log")
            .max_log_files(14)
            .build(&log_dir)?;

        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        let _ = GUARD.set(guard);
        Some(fmt::layer().with_writer(non_blocking).with_ansi(false))
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Config {
            action: ConfigAction::Check { path },
        } => {
            init_tracing(&LoggingConfig::default(), cli.log_level.as_deref())?;
            cmd_config::check(path.as_deref().or(cli.config.as_deref()))
        }
        command => {
            let mut config = ConfigLoader::load_or_default(cli.config.as_deref())?;
            init_tracing(&config.logging, cli.log_level.as_deref())?;
            debug!("Loaded configuration for {}", config.browser.endpoint);
            run(command, &mut config).await
        }
    }
}

async fn run(command: Commands, config: &mut Config) -> anyhow::Result<()> {
    match command {
        Commands::Snapshot(args) => {
            args.apply(config);
            cmd_snapshot::run_snapshot(config).await
        }
        Commands::Frames { endpoint } => {
            if let Some(endpoint) = endpoint {
                config.browser.endpoint = endpoint;
            }
            cmd_snapshot::run_frames(config).await
        }
        Commands::Config {
            action: ConfigAction::Check { path },
        } => cmd_config::check(path.as_deref()),
    }
}

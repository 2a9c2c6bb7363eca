//! `snapshot` and `frames` commands.

use std::sync::Arc;

use anyhow::Context;
use domloom_cdp::{CdpClient, CdpFrameResolver};
use domloom_config::{Config, ConfigValidator};
use domloom_core::{DomService, ElementFilter, OutputFormat};
use domloom_protocols::DomSession;
use tracing::{info, warn};

/// Build a tree for the configured page and print it in the configured format.
pub(crate) async fn run_snapshot(config: &Config) -> anyhow::Result<()> {
    let validation = ConfigValidator::validate(config)?;
    for warning in &validation.warnings {
        warn!("{}: {}", warning.path, warning.message);
    }
    if let Some(error) = validation.errors.first() {
        anyhow::bail!("Invalid configuration: {}: {}", error.path, error.message);
    }

    let filter = ElementFilter::parse(&config.output.filter, config.output.min_paint_order)?;
    let format: OutputFormat = config.output.format.parse()?;

    let client = CdpClient::connect(&config.browser.endpoint)
        .await
        .with_context(|| format!("Connecting to {}", config.browser.endpoint))?;
    let (resolver, main) =
        CdpFrameResolver::attach_page(Arc::new(client), config.browser.page.as_deref()).await?;
    let main = Arc::new(main);

    let service = DomService::from_config(Arc::new(resolver), main.clone(), config);
    let result = service.snapshot().await;
    if let Err(e) = main.detach().await {
        warn!("Failed to detach from {}: {}", main.url(), e);
    }
    let snapshot = result.context("Building DOM tree")?;

    if !snapshot.warnings.is_empty() {
        info!(
            "Tree for {} built with {} warning(s)",
            snapshot.frame_key,
            snapshot.warnings.len()
        );
    }

    println!("{}", snapshot.translate(filter, format)?);
    Ok(())
}

/// Print the live page and iframe targets.
pub(crate) async fn run_frames(config: &Config) -> anyhow::Result<()> {
    let client = CdpClient::connect(&config.browser.endpoint)
        .await
        .with_context(|| format!("Connecting to {}", config.browser.endpoint))?;
    let targets: Vec<_> = client
        .get_targets()
        .await?
        .into_iter()
        .filter(|t| t.is_frame())
        .collect();

    if targets.is_empty() {
        println!("No frames found.");
        return Ok(());
    }

    println!("{:<8} {:<34} {}", "TYPE", "TARGET", "URL");
    println!("{}", "-".repeat(80));
    for target in targets {
        println!("{:<8} {:<34} {}", target.target_type, target.target_id, target.url);
    }
    Ok(())
}

//! CLI definitions for domloom.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use domloom_config::Config;

/// domloom CLI.
#[derive(Parser)]
#[command(name = "domloom")]
#[command(about = "Build a unified, queryable DOM tree from a live browser page")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.domloom/config.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `domloom_core=trace`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Build a tree for a page and print it
    Snapshot(SnapshotArgs),

    /// List live page and iframe targets
    Frames {
        /// Browser debugging endpoint
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args)]
pub(crate) struct SnapshotArgs {
    /// Browser debugging endpoint (http://host:port or ws://...)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Pick the first page whose URL contains this substring
    #[arg(long)]
    pub page: Option<String>,

    /// Output format (json, csv, html, markdown)
    #[arg(long)]
    pub format: Option<String>,

    /// Element filter (all, visible, interactive, bbox, paint)
    #[arg(long)]
    pub filter: Option<String>,

    /// Minimum paint order for the `paint` filter
    #[arg(long)]
    pub min_paint_order: Option<i64>,

    /// Skip snapshot enrichment and classification
    #[arg(long)]
    pub no_enrich: bool,
}

impl SnapshotArgs {
    /// Apply command-line overrides on top of the loaded configuration.
    pub fn apply(&self, config: &mut Config) {
        if let Some(endpoint) = &self.endpoint {
            config.browser.endpoint = endpoint.clone();
        }
        if let Some(page) = &self.page {
            config.browser.page = Some(page.clone());
        }
        if let Some(format) = &self.format {
            config.output.format = format.clone();
        }
        if let Some(filter) = &self.filter {
            config.output.filter = filter.clone();
        }
        if let Some(min) = self.min_paint_order {
            config.output.min_paint_order = min;
        }
        if self.no_enrich {
            config.enrichment.enabled = false;
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Validate a configuration file
    Check {
        /// File to check (default: --config, then ~/.domloom/config.toml)
        path: Option<PathBuf>,
    },
}

//! Configuration schema definitions.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub enrichment: EnrichmentConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Browser connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// DevTools HTTP endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Pick the first page whose URL contains this substring.
    #[serde(default)]
    pub page: Option<String>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            page: None,
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:9222".to_string()
}

/// Tree construction limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Overall build timeout. Expiry aborts the build.
    #[serde(default = "default_build_timeout_ms")]
    pub timeout_ms: u64,

    /// Budget for fetching one iframe's content. Expiry leaves the iframe childless.
    #[serde(default = "default_iframe_timeout_ms")]
    pub iframe_timeout_ms: u64,

    #[serde(default = "default_session_timeout_ms")]
    pub session_timeout_ms: u64,

    #[serde(default = "default_document_timeout_ms")]
    pub document_timeout_ms: u64,

    /// Maximum number of nested, remotely fetched iframe documents.
    #[serde(default = "default_max_iframe_depth")]
    pub max_iframe_depth: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_build_timeout_ms(),
            iframe_timeout_ms: default_iframe_timeout_ms(),
            session_timeout_ms: default_session_timeout_ms(),
            document_timeout_ms: default_document_timeout_ms(),
            max_iframe_depth: default_max_iframe_depth(),
        }
    }
}

impl BuildConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn iframe_timeout(&self) -> Duration {
        Duration::from_millis(self.iframe_timeout_ms)
    }

    pub fn session_timeout(&self) -> Duration {
        Duration::from_millis(self.session_timeout_ms)
    }

    pub fn document_timeout(&self) -> Duration {
        Duration::from_millis(self.document_timeout_ms)
    }
}

fn default_build_timeout_ms() -> u64 {
    30_000
}

fn default_iframe_timeout_ms() -> u64 {
    10_000
}

fn default_session_timeout_ms() -> u64 {
    3_000
}

fn default_document_timeout_ms() -> u64 {
    5_000
}

fn default_max_iframe_depth() -> usize {
    3
}

/// Snapshot enrichment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Style properties requested from the snapshot, in decode order.
    #[serde(default = "default_computed_styles")]
    pub computed_styles: Vec<String>,

    #[serde(default = "default_snapshot_timeout_ms")]
    pub snapshot_timeout_ms: u64,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            computed_styles: default_computed_styles(),
            snapshot_timeout_ms: default_snapshot_timeout_ms(),
        }
    }
}

impl EnrichmentConfig {
    pub fn snapshot_timeout(&self) -> Duration {
        Duration::from_millis(self.snapshot_timeout_ms)
    }
}

/// Style properties used by the visibility and interactivity classifiers,
/// plus a few layout properties useful to consumers.
pub fn default_computed_styles() -> Vec<String> {
    [
        "display",
        "visibility",
        "opacity",
        "position",
        "z-index",
        "pointer-events",
        "cursor",
        "overflow",
        "overflow-x",
        "overflow-y",
        "width",
        "height",
        "top",
        "left",
        "right",
        "bottom",
        "transform",
        "clip",
        "clip-path",
        "user-select",
        "background-color",
        "color",
        "border",
        "margin",
        "padding",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_snapshot_timeout_ms() -> u64 {
    10_000
}

/// Output selection for the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// One of `json`, `csv`, `html`, `markdown`.
    #[serde(default = "default_format")]
    pub format: String,

    /// One of `all`, `visible`, `interactive`, `bbox`, `paint`.
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Threshold used by the `paint` filter.
    #[serde(default)]
    pub min_paint_order: i64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            filter: default_filter(),
            min_paint_order: 0,
        }
    }
}

fn default_format() -> String {
    "json".to_string()
}

fn default_filter() -> String {
    "all".to_string()
}

/// Log output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    /// Directory for rolling log files; `~` is expanded.
    #[serde(default = "default_log_dir")]
    pub dir: String,

    #[serde(default = "default_true")]
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            dir: default_log_dir(),
            file: true,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> String {
    dirs::home_dir()
        .map(|h| h.join(".domloom").join("logs").display().to_string())
        .unwrap_or_else(|| ".domloom/logs".to_string())
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;

//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Output formats understood by the serializers.
pub const OUTPUT_FORMATS: &[&str] = &["json", "csv", "html", "markdown"];

/// Element filters understood by the query layer.
pub const OUTPUT_FILTERS: &[&str] = &["all", "visible", "interactive", "bbox", "paint"];

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_browser(config, &mut result);
        Self::validate_build(config, &mut result);
        Self::validate_enrichment(config, &mut result);
        Self::validate_output(config, &mut result);

        Ok(result)
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        let endpoint = &config.browser.endpoint;
        if !endpoint.starts_with("http://")
            && !endpoint.starts_with("https://")
            && !endpoint.starts_with("ws://")
            && !endpoint.starts_with("wss://")
        {
            result.add_error(ValidationError::new(
                "browser.endpoint",
                "endpoint must start with http://, https://, ws:// or wss://",
            ));
        }

        if matches!(config.browser.page.as_deref(), Some("")) {
            result.add_warning(ValidationWarning::new(
                "browser.page",
                "empty page filter matches every page",
            ));
        }
    }

    fn validate_build(config: &Config, result: &mut ValidationResult) {
        let build = &config.build;
        for (path, value) in [
            ("build.timeout_ms", build.timeout_ms),
            ("build.iframe_timeout_ms", build.iframe_timeout_ms),
            ("build.session_timeout_ms", build.session_timeout_ms),
            ("build.document_timeout_ms", build.document_timeout_ms),
        ] {
            if value == 0 {
                result.add_error(ValidationError::new(path, "timeout must be greater than 0"));
            }
        }

        if build.iframe_timeout_ms > build.timeout_ms {
            result.add_warning(ValidationWarning::new(
                "build.iframe_timeout_ms",
                "iframe timeout exceeds the overall build timeout",
            ));
        }

        if build.max_iframe_depth == 0 {
            result.add_warning(ValidationWarning::new(
                "build.max_iframe_depth",
                "max_iframe_depth is 0, cross-origin iframes will not be expanded",
            ));
        } else if build.max_iframe_depth > 10 {
            result.add_warning(ValidationWarning::new(
                "build.max_iframe_depth",
                "max_iframe_depth is very high (>10), builds may hit the overall timeout",
            ));
        }
    }

    fn validate_enrichment(config: &Config, result: &mut ValidationResult) {
        let enrichment = &config.enrichment;
        if !enrichment.enabled {
            return;
        }

        if enrichment.snapshot_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "enrichment.snapshot_timeout_ms",
                "timeout must be greater than 0",
            ));
        }

        if enrichment.computed_styles.is_empty() {
            result.add_warning(ValidationWarning::new(
                "enrichment.computed_styles",
                "no computed styles requested, visibility and interactivity will be coarse",
            ));
        }

        for required in ["display", "visibility", "opacity"] {
            if !enrichment.computed_styles.iter().any(|s| s == required) {
                result.add_warning(ValidationWarning::new(
                    "enrichment.computed_styles",
                    format!("'{}' is not requested, visibility checks ignore it", required),
                ));
            }
        }
    }

    fn validate_output(config: &Config, result: &mut ValidationResult) {
        if !OUTPUT_FORMATS.contains(&config.output.format.as_str()) {
            result.add_error(ValidationError::new(
                "output.format",
                format!(
                    "Unknown format '{}', valid values: {:?}",
                    config.output.format, OUTPUT_FORMATS
                ),
            ));
        }

        if !OUTPUT_FILTERS.contains(&config.output.filter.as_str()) {
            result.add_error(ValidationError::new(
                "output.filter",
                format!(
                    "Unknown filter '{}', valid values: {:?}",
                    config.output.filter, OUTPUT_FILTERS
                ),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;

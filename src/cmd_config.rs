//! `config` commands.

use std::path::{Path, PathBuf};

use anyhow::Context;
use domloom_config::{ConfigLoader, ConfigValidator};

/// Load and validate a configuration file, printing every finding.
pub(crate) fn check(path: Option<&Path>) -> anyhow::Result<()> {
    let path: PathBuf = match path {
        Some(path) => path.to_path_buf(),
        None => ConfigLoader::default_path().context("Cannot locate home directory")?,
    };

    let config =
        ConfigLoader::load(&path).with_context(|| format!("Loading {}", path.display()))?;
    let result = ConfigValidator::validate(&config)?;

    for warning in &result.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for error in &result.errors {
        println!("error: {}: {}", error.path, error.message);
    }

    if !result.is_valid() {
        anyhow::bail!(
            "{} has {} error(s)",
            path.display(),
            result.errors.len()
        );
    }

    println!("{} is valid", path.display());
    Ok(())
}

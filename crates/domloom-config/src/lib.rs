//! # domloom Config
//!
//! Configuration management for the domloom tree builder.

mod error;
mod loader;
mod schema;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use validator::{
    ConfigValidator, OUTPUT_FILTERS, OUTPUT_FORMATS, ValidationError, ValidationResult,
    ValidationWarning,
};

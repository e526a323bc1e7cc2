//! Error handling for the svcgen library.
//!
//! This module defines the main error type `Error` used by configuration,
//! definition loading and the top-level generation entry point, along with a
//! convenient `Result` type alias. Rendering failures keep their own
//! [`GenerationError`] and are wrapped here.
//!
//! # Examples
//!
//! ```
//! use svcgen::core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::config("template_dir is required"))
//! }
//!
//! assert!(might_fail().is_err());
//! ```

use thiserror::Error;

use crate::generation::GenerationError;

/// Result type for svcgen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for svcgen operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Definition loading error
    #[error("Definition error: {0}")]
    Definitions(String),

    /// Template rendering error
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new definition loading error
    pub fn definitions<S: Into<String>>(msg: S) -> Self {
        Self::Definitions(msg.into())
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Config(s.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Config(s)
    }
}

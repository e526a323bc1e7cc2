//! Error types for the generation domain

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while rendering templates into output files
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Template discovery error in {}: {source}", .dir.display())]
    Discovery {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create output directory {}: {source}", .dir.display())]
    OutputRoot {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse template '{template}': {}", describe_chain(.source))]
    Parse {
        template: String,
        #[source]
        source: tera::Error,
    },

    #[error(
        "Failed to render template '{template}'{}: {}",
        describe_current(.current_file),
        describe_chain(.source)
    )]
    Render {
        template: String,
        /// File receiving output when the render failed
        current_file: Option<PathBuf>,
        /// Every file the template opened before failing, in order
        files_written: Vec<PathBuf>,
        #[source]
        source: tera::Error,
    },

    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create file {}: {source}", .path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to close file {}: {source}", .path.display())]
    CloseFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid output path '{path}': {reason}")]
    InvalidOutputPath { path: String, reason: String },

    #[error("Failed to build render context: {0}")]
    Context(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_current(current: &Option<PathBuf>) -> String {
    match current {
        Some(path) => format!(" while writing {}", path.display()),
        None => String::new(),
    }
}

/// Tera puts the useful message (missing variable, helper failure) at the
/// bottom of its chain, so join every level.
fn describe_chain(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl GenerationError {
    /// Create a new invalid output path error
    pub fn invalid_output_path<P: Into<String>, R: Into<String>>(path: P, reason: R) -> Self {
        Self::InvalidOutputPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

// src/error.rs

//! Error types for recipe orchestration
//!
//! Every lifecycle step maps its failures onto one variant so the host
//! can tell at a glance which step stopped the run. Nothing here is
//! retried: the first error aborts the lifecycle.

use thiserror::Error;

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running a recipe
#[derive(Error, Debug)]
pub enum Error {
    /// Bad folder layout or host environment (missing tool, unreadable cwd)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Toolchain description files could not be written
    #[error("Toolchain generation failed: {0}")]
    ToolchainGenerationError(String),

    /// The external build tool exited unsuccessfully
    #[error("{step} failed with exit code {}\n{stderr}", .code.map_or_else(|| "none".to_string(), |c| c.to_string()))]
    BuildError {
        step: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Network or version-control failure while fetching sources
    #[error("Source fetch failed: {0}")]
    SourceFetchError(String),

    /// Install step left no usable artifacts behind
    #[error("Packaging failed: {0}")]
    PackagingError(String),

    /// Recipe or command-line value could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Two handlers were registered for the same lifecycle hook
    #[error("Duplicate handler for lifecycle hook '{0}'")]
    DuplicateHook(String),

    /// Filesystem error outside a specific lifecycle step
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::IoError(e.to_string())
    }
}

impl Error {
    /// Name of the lifecycle step this error belongs to, if any
    ///
    /// A `BuildError` from `install` or a package hook belongs to the
    /// package step.
    pub fn step(&self) -> Option<&str> {
        match self {
            Error::ConfigurationError(_) => Some("layout"),
            Error::ToolchainGenerationError(_) => Some("generate"),
            Error::BuildError { step, .. }
                if step.ends_with("install") || step.starts_with("package") =>
            {
                Some("package")
            }
            Error::BuildError { .. } => Some("build"),
            Error::SourceFetchError(_) => Some("source"),
            Error::PackagingError(_) => Some("package"),
            _ => None,
        }
    }
}

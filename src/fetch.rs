// src/fetch.rs

//! Source fetching through version control

use crate::error::{Error, Result};
use crate::process::{run_step, StepOutput};
use std::path::PathBuf;
use std::process::Command;
use tracing::info;

/// One tagged checkout to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    /// Repository URL
    pub url: String,
    /// Tag to check out
    pub tag: String,
    /// History depth (0 = full history)
    pub depth: u32,
    /// Directory the clone is created in
    pub dest: PathBuf,
}

/// Trait for fetching a tagged source revision
///
/// Keeps the orchestrator independent of the version-control client.
pub trait SourceFetcher: Send + Sync {
    /// Fetch the requested revision into `request.dest`
    fn fetch(&self, request: &FetchRequest) -> Result<StepOutput>;
}

/// Fetches sources with the `git` client
#[derive(Debug, Clone)]
pub struct Git {
    program: PathBuf,
}

impl Default for Git {
    fn default() -> Self {
        Self::new()
    }
}

impl Git {
    /// Use `git` from `PATH`
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("git"),
        }
    }

    /// Use a specific git executable
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn clone_args(request: &FetchRequest) -> Vec<String> {
        let mut args = vec![
            "clone".to_string(),
            "--branch".to_string(),
            request.tag.clone(),
        ];
        if request.depth > 0 {
            args.push("--depth".to_string());
            args.push(request.depth.to_string());
        }
        args.push(request.url.clone());
        args.push(request.dest.to_string_lossy().to_string());
        args
    }
}

impl SourceFetcher for Git {
    fn fetch(&self, request: &FetchRequest) -> Result<StepOutput> {
        let program = which::which(&self.program).map_err(|e| {
            Error::ConfigurationError(format!(
                "Git executable '{}' not found: {}",
                self.program.display(),
                e
            ))
        })?;

        let occupied = request.dest.exists()
            && std::fs::read_dir(&request.dest)
                .map(|mut entries| entries.next().is_some())
                .unwrap_or(true);
        if occupied {
            return Err(Error::SourceFetchError(format!(
                "Destination {} already exists and is not empty",
                request.dest.display()
            )));
        }

        info!("Cloning {} at {}", request.url, request.tag);
        let mut cmd = Command::new(program);
        cmd.args(Self::clone_args(request));

        run_step("git clone", &mut cmd).map_err(|e| match e {
            Error::BuildError { code, stderr, .. } => Error::SourceFetchError(format!(
                "git clone of {} at tag {} exited with {}: {}",
                request.url,
                request.tag,
                code.map_or_else(|| "signal".to_string(), |c| c.to_string()),
                stderr.trim()
            )),
            other => other,
        })
    }
}

// src/process.rs

//! External process execution for lifecycle steps
//!
//! Every step blocks until its child exits. Output is captured so it can
//! be logged and handed back to the host verbatim on failure.

use crate::error::{Error, Result};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::{debug, warn};

/// Captured output of a successful step
#[derive(Debug, Clone, Default)]
pub struct StepOutput {
    /// Command line as it was run
    pub command: String,
    pub stdout: String,
    pub stderr: String,
}

/// Render a command line for logs
pub fn describe(cmd: &Command) -> String {
    let mut parts = vec![cmd.get_program().to_string_lossy().to_string()];
    parts.extend(cmd.get_args().map(|a| a.to_string_lossy().to_string()));
    parts.join(" ")
}

/// Run a command to completion
///
/// A child that cannot be spawned is a host precondition failure
/// (`ConfigurationError`); a non-zero exit is a `BuildError` carrying
/// the child's exit code and stderr.
pub fn run_step(step: &str, cmd: &mut Command) -> Result<StepOutput> {
    let command = describe(cmd);
    debug!("Running {}: {}", step, command);

    let output = cmd
        .stdin(Stdio::null())
        .output()
        .map_err(|e| Error::ConfigurationError(format!("Failed to run {}: {}", command, e)))?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    for line in stdout.lines() {
        debug!("[{}] {}", step, line);
    }

    if !output.status.success() {
        for line in stderr.lines() {
            warn!("[{}] {}", step, line);
        }
        return Err(Error::BuildError {
            step: step.to_string(),
            code: output.status.code(),
            stderr,
        });
    }

    Ok(StepOutput {
        command,
        stdout,
        stderr,
    })
}

/// Run a shell snippet in `workdir`
pub fn run_shell(
    step: &str,
    script: &str,
    workdir: &Path,
    env: &[(&str, String)],
) -> Result<StepOutput> {
    let mut cmd = Command::new("sh");
    cmd.arg("-c")
        .arg(script)
        .current_dir(workdir)
        .envs(env.iter().map(|(k, v)| (*k, v.as_str())));
    run_step(step, &mut cmd)
}

// src/toolchain/meson.rs

//! Meson adapter for the [`Toolchain`] capability

use crate::error::{Error, Result};
use crate::process::{run_step, StepOutput};
use crate::recipe::FolderLayout;
use std::path::PathBuf;
use std::process::Command;

use super::Toolchain;

/// Drives `meson setup`, `meson compile` and `meson install`
#[derive(Debug, Clone)]
pub struct Meson {
    program: PathBuf,
    jobs: Option<u32>,
}

impl Default for Meson {
    fn default() -> Self {
        Self::new()
    }
}

impl Meson {
    /// Use `meson` from `PATH`
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("meson"),
            jobs: None,
        }
    }

    /// Use a specific meson executable
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Limit parallel compile jobs
    pub fn with_jobs(mut self, jobs: u32) -> Self {
        self.jobs = Some(jobs);
        self
    }

    fn command(&self) -> Result<Command> {
        let program = which::which(&self.program).map_err(|e| {
            Error::ConfigurationError(format!(
                "Meson executable '{}' not found: {}",
                self.program.display(),
                e
            ))
        })?;
        Ok(Command::new(program))
    }

    /// Arguments for `meson setup`
    fn setup_args(&self, layout: &FolderLayout) -> Vec<String> {
        let mut args = vec![
            "setup".to_string(),
            "--native-file".to_string(),
            layout.native_file().to_string_lossy().to_string(),
        ];
        // A configured build root has to be reconfigured, not set up again
        if layout.build_root.join("meson-private").exists() {
            args.push("--reconfigure".to_string());
        }
        args.push(layout.build_root.to_string_lossy().to_string());
        args.push(layout.source_root.to_string_lossy().to_string());
        args
    }

    fn compile_args(&self, layout: &FolderLayout) -> Vec<String> {
        let mut args = vec![
            "compile".to_string(),
            "-C".to_string(),
            layout.build_root.to_string_lossy().to_string(),
        ];
        if let Some(jobs) = self.jobs {
            args.push("-j".to_string());
            args.push(jobs.to_string());
        }
        args
    }

    fn install_args(&self, layout: &FolderLayout) -> Vec<String> {
        vec![
            "install".to_string(),
            "-C".to_string(),
            layout.build_root.to_string_lossy().to_string(),
            "--destdir".to_string(),
            layout.package_folder.to_string_lossy().to_string(),
        ]
    }
}

impl Toolchain for Meson {
    fn configure(&self, layout: &FolderLayout) -> Result<StepOutput> {
        let mut cmd = self.command()?;
        cmd.args(self.setup_args(layout)).current_dir(&layout.source_root);
        run_step("meson setup", &mut cmd)
    }

    fn build(&self, layout: &FolderLayout) -> Result<StepOutput> {
        let mut cmd = self.command()?;
        cmd.args(self.compile_args(layout)).current_dir(&layout.source_root);
        run_step("meson compile", &mut cmd)
    }

    fn install(&self, layout: &FolderLayout) -> Result<StepOutput> {
        let mut cmd = self.command()?;
        cmd.args(self.install_args(layout)).current_dir(&layout.source_root);
        run_step("meson install", &mut cmd)
    }
}

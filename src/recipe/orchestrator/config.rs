// src/recipe/orchestrator/config.rs

//! Configuration and result types for the orchestrator

use crate::process::StepOutput;
use std::path::PathBuf;

use super::info::ConsumerInfo;

/// Configuration for the Orchestrator
#[derive(Debug, Clone, Default)]
pub struct OrchestratorConfig {
    /// Fetch the tagged source before building (`create` only)
    pub fetch_source: bool,
    /// Remove the build folder before generating toolchain files
    pub fresh_build: bool,
}

impl OrchestratorConfig {
    /// Configuration for a full run starting from a fresh clone
    pub fn from_source() -> Self {
        Self {
            fetch_source: true,
            fresh_build: true,
        }
    }
}

/// Outcome of the package step
#[derive(Debug, Clone)]
pub struct PackageReport {
    /// Staging folder
    pub package_folder: PathBuf,
    /// Library artifacts found after install
    pub artifacts: Vec<PathBuf>,
    /// Headers copied by the header rule
    pub headers: Vec<PathBuf>,
    /// Manifest written into the package folder
    pub manifest: PathBuf,
    /// pkg-config file written into the package folder
    pub pkg_config: PathBuf,
    /// Output of the install step
    pub output: StepOutput,
}

/// Result of a full lifecycle run
#[derive(Debug)]
pub struct CreateResult {
    /// Package id of the built configuration
    pub package_id: String,
    /// Packaged files
    pub package: PackageReport,
    /// Linkage metadata for consumers
    pub consumer_info: ConsumerInfo,
    /// Where the tagged source was cloned, if it was fetched
    pub fetched_source: Option<PathBuf>,
    /// Run log with the output of every external step
    pub log: String,
    /// Non-fatal problems found along the way
    pub warnings: Vec<String>,
}

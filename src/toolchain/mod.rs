// src/toolchain/mod.rs

//! External build tool integration
//!
//! The orchestrator never compiles anything itself. It writes toolchain
//! description files into the build root and then drives an external
//! build tool through the [`Toolchain`] capability. [`Meson`] is the
//! concrete adapter; tests substitute their own implementation.

mod meson;
mod native_file;
pub mod settings;

pub use meson::Meson;
pub use native_file::NativeFile;
pub use settings::{BuildType, Os, Settings};

use crate::error::{Error, Result};
use crate::process::StepOutput;
use crate::recipe::{BuildOptions, FolderLayout, PackageDescriptor};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Capability interface over an external build tool
///
/// Implementations block until the underlying process exits and report
/// a non-zero exit as [`Error::BuildError`].
pub trait Toolchain: Send + Sync {
    /// Configure the build root from the generated toolchain files
    fn configure(&self, layout: &FolderLayout) -> Result<StepOutput>;

    /// Compile everything configured in the build root
    fn build(&self, layout: &FolderLayout) -> Result<StepOutput>;

    /// Install compiled artifacts into the package folder
    fn install(&self, layout: &FolderLayout) -> Result<StepOutput>;
}

/// What the generate step wrote, for tools and humans to inspect
#[derive(Debug, Clone, Serialize)]
pub struct ToolchainRecord<'a> {
    pub package: &'a str,
    pub version: &'a str,
    pub settings: &'a Settings,
    pub options: &'a BuildOptions,
    pub native_file: PathBuf,
}

/// Write toolchain description files into the build root
///
/// Produces the Meson native file and a JSON record of the settings and
/// options it was derived from. Returns the paths written.
pub fn generate_toolchain(
    descriptor: &PackageDescriptor,
    settings: &Settings,
    options: &BuildOptions,
    layout: &FolderLayout,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(&layout.build_root).map_err(|e| {
        Error::ToolchainGenerationError(format!(
            "Failed to create build folder {}: {}",
            layout.build_root.display(),
            e
        ))
    })?;

    let native = NativeFile::new(settings, options);
    let native_path = layout.native_file();
    write_generated(&native_path, &native.render())?;
    debug!(
        "Native file: default_library={}, buildtype={}",
        native.default_library, native.buildtype
    );

    let record = ToolchainRecord {
        package: &descriptor.name,
        version: &descriptor.version,
        settings,
        options,
        native_file: native_path.clone(),
    };
    let json = serde_json::to_string_pretty(&record)
        .map_err(|e| Error::ToolchainGenerationError(format!("Failed to encode record: {}", e)))?;
    let record_path = layout.toolchain_file();
    write_generated(&record_path, &json)?;

    info!("Generated toolchain files in {}", layout.build_root.display());
    Ok(vec![native_path, record_path])
}

fn write_generated(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| {
        Error::ToolchainGenerationError(format!("Failed to write {}: {}", path.display(), e))
    })
}

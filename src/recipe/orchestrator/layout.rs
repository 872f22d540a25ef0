// src/recipe/orchestrator/layout.rs

//! Source, build and package folder layout

use crate::error::{Error, Result};
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

/// Build folder name under the source root
pub const BUILD_FOLDER: &str = "builddir";

/// Default staging folder name under the source root
pub const PACKAGE_FOLDER: &str = "package";

/// Meson native file written by the generate step
pub const NATIVE_FILE: &str = "kiln_meson_native.ini";

/// Machine-readable record of the generated toolchain
pub const TOOLCHAIN_FILE: &str = "kiln_toolchain.json";

/// Where a run reads sources and writes outputs
///
/// Computed once per invocation and never rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderLayout {
    pub source_root: PathBuf,
    pub build_root: PathBuf,
    pub package_folder: PathBuf,
}

impl FolderLayout {
    /// Layout rooted at the current working directory
    pub fn define() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| {
            Error::ConfigurationError(format!("Working directory is not accessible: {}", e))
        })?;
        Ok(Self::at(cwd))
    }

    /// Layout rooted at an explicit source root
    pub fn at(source_root: impl Into<PathBuf>) -> Self {
        let source_root = source_root.into();
        Self {
            build_root: source_root.join(BUILD_FOLDER),
            package_folder: source_root.join(PACKAGE_FOLDER),
            source_root,
        }
    }

    /// Stage into a different package folder
    ///
    /// Relative paths are taken against the source root.
    pub fn with_package_folder(mut self, folder: &Path) -> Self {
        self.package_folder = if folder.is_absolute() {
            folder.to_path_buf()
        } else {
            self.source_root.join(folder)
        };
        self
    }

    /// Reject a package folder the package step must not clear
    ///
    /// The package folder is wiped on every package step, so it may not
    /// be the source root, the build root, or an ancestor of either.
    pub fn check_package_folder(&self) -> Result<()> {
        let package = resolve(&self.package_folder);
        for (what, root) in [("source", &self.source_root), ("build", &self.build_root)] {
            if resolve(root).starts_with(&package) {
                return Err(Error::ConfigurationError(format!(
                    "Package folder {} would contain the {} folder {}",
                    self.package_folder.display(),
                    what,
                    root.display()
                )));
            }
        }
        Ok(())
    }

    pub fn native_file(&self) -> PathBuf {
        self.build_root.join(NATIVE_FILE)
    }

    pub fn toolchain_file(&self) -> PathBuf {
        self.build_root.join(TOOLCHAIN_FILE)
    }
}

/// Canonical path when it exists, lexically normalized otherwise
fn resolve(path: &Path) -> PathBuf {
    if let Ok(canonical) = std::fs::canonicalize(path) {
        return canonical;
    }
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

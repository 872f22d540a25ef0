// src/recipe/orchestrator/package.rs

//! Staging folder assembly: header copy, artifact discovery, manifest

use crate::error::{Error, Result};
use crate::recipe::format::{HeaderCopy, OptionValue, PackageDescriptor};
use crate::toolchain::{Os, Settings};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::info::ConsumerInfo;

/// Manifest file written at the top of the package folder
pub const MANIFEST_FILE: &str = "kiln_manifest.json";

/// Kind of library the build is expected to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryKind {
    Static,
    Shared,
}

impl LibraryKind {
    pub fn from_shared(shared: bool) -> Self {
        if shared { LibraryKind::Shared } else { LibraryKind::Static }
    }
}

/// Whether `file_name` is the `name` library of the given kind on `os`
pub fn is_library_artifact(file_name: &str, name: &str, kind: LibraryKind, os: Os) -> bool {
    let stem = format!("lib{}", name);
    match (os, kind) {
        (Os::Windows, LibraryKind::Static) => {
            file_name == format!("{}.lib", name) || file_name == format!("{}.a", stem)
        }
        (Os::Windows, LibraryKind::Shared) => {
            file_name == format!("{}.dll", name) || file_name == format!("{}.dll", stem)
        }
        (_, LibraryKind::Static) => file_name == format!("{}.a", stem),
        (Os::Macos, LibraryKind::Shared) => {
            file_name.starts_with(&format!("{}.", stem)) && file_name.ends_with(".dylib")
        }
        (_, LibraryKind::Shared) => {
            let so = format!("{}.so", stem);
            file_name == so || file_name.starts_with(&format!("{}.", so))
        }
    }
}

/// Find library artifacts for `name` anywhere under the package folder
pub fn find_artifacts(
    package_folder: &Path,
    name: &str,
    kind: LibraryKind,
    os: Os,
) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = WalkDir::new(package_folder)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| !e.file_type().is_dir())
        .filter(|e| {
            e.file_name()
                .to_str()
                .is_some_and(|f| is_library_artifact(f, name, kind, os))
        })
        .map(|e| e.into_path())
        .collect();
    found.sort();
    found
}

/// Copy headers matching the rule from the source root into the package
///
/// Relative paths below `rule.src` are preserved. Existing files are
/// overwritten, so repeated runs leave the same file set. A missing
/// source directory copies nothing.
pub fn copy_headers(
    rule: &HeaderCopy,
    source_root: &Path,
    package_folder: &Path,
) -> Result<Vec<PathBuf>> {
    let src = source_root.join(&rule.src);
    let dst = package_folder.join(&rule.dst);

    let pattern = glob::Pattern::new(&rule.pattern).map_err(|e| {
        Error::PackagingError(format!("Invalid header pattern '{}': {}", rule.pattern, e))
    })?;

    if !src.is_dir() {
        warn!("Header source {} does not exist, nothing to copy", src.display());
        return Ok(Vec::new());
    }

    let mut copied = Vec::new();
    for entry in WalkDir::new(&src).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            Error::PackagingError(format!("Failed to walk {}: {}", src.display(), e))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|f| pattern.matches(f));
        if !matches {
            continue;
        }

        let relative = entry.path().strip_prefix(&src).map_err(|e| {
            Error::PackagingError(format!("Header outside {}: {}", src.display(), e))
        })?;
        let target = dst.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &target).map_err(|e| {
            Error::PackagingError(format!(
                "Failed to copy {} to {}: {}",
                entry.path().display(),
                target.display(),
                e
            ))
        })?;
        debug!("Copied header {}", relative.display());
        copied.push(target);
    }

    Ok(copied)
}

/// Record of one packaged configuration
#[derive(Debug, Clone, Serialize)]
pub struct PackageManifest<'a> {
    pub package: &'a PackageDescriptor,
    pub package_id: &'a str,
    pub settings: &'a Settings,
    pub options: BTreeMap<&'a str, &'a OptionValue>,
    pub library_kind: LibraryKind,
    pub consumer_info: &'a ConsumerInfo,
    /// Artifact paths relative to the package folder
    pub artifacts: Vec<String>,
    /// Header paths relative to the package folder
    pub headers: Vec<String>,
}

/// Paths relative to `base`, with `/` separators
pub fn relative_paths(base: &Path, paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| {
            p.strip_prefix(base)
                .unwrap_or(p)
                .components()
                .map(|c| c.as_os_str().to_string_lossy().to_string())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect()
}

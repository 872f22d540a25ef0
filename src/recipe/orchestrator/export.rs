// src/recipe/orchestrator/export.rs

//! Copying a recipe's exported sources

use crate::error::{Error, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Copy files matching `patterns` (relative to `root`) into `dest`
///
/// Directories matched by a pattern are copied recursively. Returns the
/// relative paths copied, sorted and without duplicates.
pub fn export_files(root: &Path, patterns: &[String], dest: &Path) -> Result<Vec<PathBuf>> {
    let mut files = BTreeSet::new();

    for pattern in patterns {
        let full = root.join(pattern);
        let full = full.to_string_lossy();
        let matches = glob::glob(&full).map_err(|e| {
            Error::ParseError(format!("Invalid export pattern '{}': {}", pattern, e))
        })?;

        for entry in matches {
            let path = entry.map_err(|e| Error::IoError(e.to_string()))?;
            if path.is_dir() {
                for inner in WalkDir::new(&path).into_iter().filter_map(|e| e.ok()) {
                    if inner.file_type().is_file() {
                        files.insert(inner.into_path());
                    }
                }
            } else if path.is_file() {
                files.insert(path);
            }
        }
    }

    let mut exported = Vec::with_capacity(files.len());
    for file in files {
        let relative = file
            .strip_prefix(root)
            .map_err(|e| Error::IoError(format!("{}: {}", file.display(), e)))?
            .to_path_buf();
        let target = dest.join(&relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&file, &target)?;
        exported.push(relative);
    }

    Ok(exported)
}

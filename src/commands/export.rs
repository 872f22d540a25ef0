// src/commands/export.rs

//! Export command - copy a recipe's exported sources

use super::{load_context, orchestrator};
use crate::cli::RecipeArgs;
use anyhow::{Context, Result};
use kiln::recipe::OrchestratorConfig;
use std::path::Path;

/// Copy `exports_sources` from the source folder into `dest`
pub fn cmd_export(args: &RecipeArgs, dest: &str) -> Result<()> {
    let ctx = load_context(args)?;
    let orchestrator = orchestrator(args, OrchestratorConfig::default(), None);
    let dest = Path::new(dest);

    let exported = orchestrator
        .export_sources(&ctx, dest)
        .with_context(|| format!("Failed to export sources to {}", dest.display()))?;

    println!("[COMPLETE] Exported {} file(s) to {}", exported.len(), dest.display());
    Ok(())
}

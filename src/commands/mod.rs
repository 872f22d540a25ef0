// src/commands/mod.rs
//! Command handlers for the kiln CLI

mod export;
mod info;
mod lifecycle;

pub use export::cmd_export;
pub use info::{cmd_info, cmd_inspect};
pub use lifecycle::{cmd_build, cmd_create, cmd_generate, cmd_layout, cmd_package, cmd_source};

use crate::cli::RecipeArgs;
use anyhow::{Context, Result};
use kiln::recipe::{
    builtin_recipe, parse_assignment, parse_recipe_file, FolderLayout, Orchestrator,
    OrchestratorConfig, Recipe, RecipeContext,
};
use kiln::toolchain::{Meson, Settings};
use kiln::Git;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Recipe file looked up in the source folder
pub const RECIPE_FILE: &str = "kiln.toml";

/// Resolve the folder layout from the command line
fn resolve_layout(args: &RecipeArgs) -> Result<FolderLayout> {
    let layout = match &args.source_folder {
        Some(folder) => {
            let root = std::fs::canonicalize(folder)
                .with_context(|| format!("Source folder not accessible: {}", folder))?;
            FolderLayout::at(root)
        }
        None => FolderLayout::define()?,
    };

    let layout = match &args.package_folder {
        Some(folder) => layout.with_package_folder(Path::new(folder)),
        None => layout,
    };
    layout
        .check_package_folder()
        .context("Invalid --package-folder")?;
    Ok(layout)
}

/// Load the recipe named on the command line, in the source folder, or built in
fn load_recipe(args: &RecipeArgs, layout: &FolderLayout) -> Result<Recipe> {
    let path = match &args.recipe {
        Some(path) => Some(PathBuf::from(path)),
        None => {
            let local = layout.source_root.join(RECIPE_FILE);
            local.is_file().then_some(local)
        }
    };

    match path {
        Some(path) => {
            info!("Reading recipe: {}", path.display());
            parse_recipe_file(&path)
                .with_context(|| format!("Failed to parse recipe: {}", path.display()))
        }
        None => {
            debug!("No recipe file found, using the built-in fossil_media recipe");
            builtin_recipe().context("Built-in recipe is invalid")
        }
    }
}

/// Build the immutable run context from the command line
pub(crate) fn load_context(args: &RecipeArgs) -> Result<RecipeContext> {
    let layout = resolve_layout(args)?;
    let recipe = load_recipe(args, &layout)?;

    let option_overrides = args
        .options
        .iter()
        .map(|raw| parse_assignment(raw))
        .collect::<kiln::Result<Vec<_>>>()
        .context("Invalid --option")?;
    let setting_overrides = args
        .settings
        .iter()
        .map(|raw| parse_assignment(raw))
        .collect::<kiln::Result<Vec<_>>>()
        .context("Invalid --setting")?;

    let settings = Settings::detect()
        .with_overrides(&setting_overrides)
        .context("Invalid --setting")?;

    let ctx = RecipeContext::new(recipe, &option_overrides, settings, layout)
        .context("Recipe validation failed")?;

    for warning in ctx.warnings() {
        println!("Warning: {}", warning);
    }

    Ok(ctx)
}

/// Build an orchestrator over Meson and git
pub(crate) fn orchestrator(
    args: &RecipeArgs,
    config: OrchestratorConfig,
    jobs: Option<u32>,
) -> Orchestrator {
    let mut meson = Meson::new().with_program(&args.meson);
    if let Some(j) = jobs {
        meson = meson.with_jobs(j);
    }
    Orchestrator::new(config, Arc::new(meson), Arc::new(Git::with_program(&args.git)))
}

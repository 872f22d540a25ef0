// src/commands/lifecycle.rs

//! Lifecycle commands - one subcommand per recipe stage, plus `create`

use super::{load_context, orchestrator};
use crate::cli::RecipeArgs;
use anyhow::{Context, Result};
use kiln::recipe::OrchestratorConfig;
use tracing::info;

/// Print the folder layout
pub fn cmd_layout(args: &RecipeArgs) -> Result<()> {
    let ctx = load_context(args)?;
    let layout = ctx.layout();

    println!("Source folder:  {}", layout.source_root.display());
    println!("Build folder:   {}", layout.build_root.display());
    println!("Package folder: {}", layout.package_folder.display());
    Ok(())
}

/// Clone the tagged release
pub fn cmd_source(args: &RecipeArgs) -> Result<()> {
    let ctx = load_context(args)?;
    let orchestrator = orchestrator(args, OrchestratorConfig::default(), None);

    println!(
        "Fetching {} {} (tag {})",
        ctx.descriptor().name,
        ctx.descriptor().version,
        ctx.recipe().release_tag()
    );
    let (dir, _) = orchestrator
        .fetch_source(&ctx)
        .with_context(|| format!("Failed to fetch sources for {}", ctx.descriptor().name))?;

    println!("[COMPLETE] Sources in {}", dir.display());
    Ok(())
}

/// Write toolchain files
pub fn cmd_generate(args: &RecipeArgs, fresh: bool) -> Result<()> {
    let ctx = load_context(args)?;
    let config = OrchestratorConfig {
        fresh_build: fresh,
        ..Default::default()
    };
    let orchestrator = orchestrator(args, config, None);

    let written = orchestrator
        .generate_toolchain(&ctx)
        .context("Failed to generate toolchain files")?;

    println!(
        "Generated toolchain for {} (shared={}, build_type={})",
        ctx.descriptor().name,
        ctx.options().shared(),
        ctx.settings().build_type
    );
    for path in &written {
        println!("  - {}", path.display());
    }
    Ok(())
}

/// Configure and compile
pub fn cmd_build(args: &RecipeArgs, jobs: Option<u32>) -> Result<()> {
    let ctx = load_context(args)?;
    let orchestrator = orchestrator(args, OrchestratorConfig::default(), jobs);

    let outputs = orchestrator
        .build(&ctx)
        .with_context(|| format!("Failed to build {}", ctx.descriptor().name))?;

    for output in &outputs {
        info!("Ran: {}", output.command);
    }
    println!(
        "[COMPLETE] Built {} in {}",
        ctx.descriptor().name,
        ctx.layout().build_root.display()
    );
    Ok(())
}

/// Install and assemble the package folder
pub fn cmd_package(args: &RecipeArgs) -> Result<()> {
    let ctx = load_context(args)?;
    let orchestrator = orchestrator(args, OrchestratorConfig::default(), None);

    let report = orchestrator
        .package_artifacts(&ctx)
        .with_context(|| format!("Failed to package {}", ctx.descriptor().name))?;

    println!("[COMPLETE] Packaged into {}", report.package_folder.display());
    println!("  Artifacts:");
    for artifact in &report.artifacts {
        println!("    - {}", artifact.display());
    }
    println!("  Headers: {}", report.headers.len());
    println!("  Manifest: {}", report.manifest.display());
    Ok(())
}

/// Run the whole lifecycle
pub fn cmd_create(
    args: &RecipeArgs,
    fetch: bool,
    fresh: bool,
    jobs: Option<u32>,
    log_file: Option<&str>,
) -> Result<()> {
    let ctx = load_context(args)?;
    let config = OrchestratorConfig {
        fetch_source: fetch,
        fresh_build: fresh,
    };
    let orchestrator = orchestrator(args, config, jobs);

    println!(
        "Creating {} {} (shared={}, build_type={})",
        ctx.descriptor().name,
        ctx.descriptor().version,
        ctx.options().shared(),
        ctx.settings().build_type
    );

    let result = orchestrator
        .create(&ctx)
        .with_context(|| format!("Failed to create {}", ctx.descriptor().name))?;

    if let Some(path) = log_file {
        std::fs::write(path, &result.log)
            .with_context(|| format!("Failed to write log file: {}", path))?;
    }

    println!("\n[COMPLETE] {}", result.package.package_folder.display());
    println!("  Package id: {}", result.package_id);
    if let Some(dir) = &result.fetched_source {
        println!("  Source: {}", dir.display());
    }
    for artifact in &result.package.artifacts {
        println!("  Artifact: {}", artifact.display());
    }
    println!("  Libs: {}", result.consumer_info.libs.join(", "));
    println!("  Include dirs: {}", result.consumer_info.includedirs.join(", "));

    if !result.warnings.is_empty() {
        println!("\nWarnings:");
        for warning in &result.warnings {
            println!("  - {}", warning);
        }
    }

    info!(
        "Successfully created {} in {}",
        ctx.descriptor().name,
        result.package.package_folder.display()
    );
    Ok(())
}

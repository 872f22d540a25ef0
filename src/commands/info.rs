// src/commands/info.rs

//! Info and inspect commands

use super::load_context;
use crate::cli::RecipeArgs;
use anyhow::{Context, Result};
use kiln::recipe::ConsumerInfo;

/// Show consumer linkage metadata
pub fn cmd_info(args: &RecipeArgs, json: bool) -> Result<()> {
    let ctx = load_context(args)?;
    let info = ConsumerInfo::describe(ctx.descriptor());

    if json {
        let out = serde_json::to_string_pretty(&info).context("Failed to encode info")?;
        println!("{}", out);
        return Ok(());
    }

    println!("{}/{}", ctx.descriptor().name, ctx.descriptor().version);
    println!("  libs: {}", info.libs.join(", "));
    println!("  includedirs: {}", info.includedirs.join(", "));
    println!("  libdirs: {}", info.libdirs.join(", "));
    Ok(())
}

/// Validate the recipe and print its resolved form
pub fn cmd_inspect(args: &RecipeArgs) -> Result<()> {
    let ctx = load_context(args)?;
    let package = ctx.descriptor();

    println!("Recipe: {} version {}", package.name, package.version);
    if let Some(license) = &package.license {
        println!("  License: {}", license);
    }
    if let Some(author) = &package.author {
        println!("  Author: {}", author);
    }
    println!("  URL: {}", package.url);
    if let Some(description) = &package.description {
        println!("  Description: {}", description);
    }
    if !package.topics.is_empty() {
        println!("  Topics: {}", package.topics.join(", "));
    }

    println!("  Options:");
    for (name, value) in ctx.options().iter() {
        let allowed = ctx.recipe().options[name]
            .values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("|");
        println!("    {} = {} [{}]", name, value, allowed);
    }

    let settings = ctx.settings();
    println!(
        "  Settings: os={} arch={} compiler={} build_type={}",
        settings.os, settings.arch, settings.compiler, settings.build_type
    );
    println!("  Source tag: {} (depth {})", ctx.recipe().release_tag(), ctx.recipe().source.depth);

    if !ctx.hooks().is_empty() {
        println!("  Hooks:");
        for stage in ctx.hooks().stages() {
            println!("    {}: {}", stage, ctx.hooks().get(stage).unwrap_or_default());
        }
    }

    println!("  Package id: {}", ctx.package_id());
    println!("[OK] Recipe is valid");
    Ok(())
}

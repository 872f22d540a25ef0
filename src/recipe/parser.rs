// src/recipe/parser.rs

//! Recipe file parsing

use crate::error::{Error, Result};
use crate::recipe::format::Recipe;
use crate::recipe::hooks::HookTable;
use std::path::Path;

/// Recipe shipped with the binary for `fossil_media`
pub const BUILTIN_RECIPE: &str = include_str!("../../recipes/fossil_media.toml");

/// Parse a recipe from a TOML string
pub fn parse_recipe(content: &str) -> Result<Recipe> {
    toml::from_str(content).map_err(|e| Error::ParseError(format!("Invalid recipe: {}", e)))
}

/// Parse a recipe from a file
pub fn parse_recipe_file(path: &Path) -> Result<Recipe> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::IoError(format!("Failed to read recipe file: {}", e)))?;

    parse_recipe(&content)
}

/// Parse the built-in `fossil_media` recipe
pub fn builtin_recipe() -> Result<Recipe> {
    parse_recipe(BUILTIN_RECIPE)
}

/// Validate a recipe for completeness and correctness
///
/// Hard errors stop the load; softer problems come back as warnings.
pub fn validate_recipe(recipe: &Recipe) -> Result<Vec<String>> {
    let mut warnings = Vec::new();
    let package = &recipe.package;

    if package.name.is_empty() {
        return Err(Error::ParseError("Recipe package name cannot be empty".to_string()));
    }
    if package.version.is_empty() {
        return Err(Error::ParseError("Recipe package version cannot be empty".to_string()));
    }
    semver::Version::parse(&package.version).map_err(|e| {
        Error::ParseError(format!("Invalid package version '{}': {}", package.version, e))
    })?;
    if package.url.is_empty() {
        return Err(Error::ParseError("Recipe package url cannot be empty".to_string()));
    }

    for (name, spec) in &recipe.options {
        if spec.values.is_empty() {
            return Err(Error::ParseError(format!("Option '{}' has no allowed values", name)));
        }
        if !spec.values.contains(&spec.default) {
            return Err(Error::ParseError(format!(
                "Default '{}' of option '{}' is not among its allowed values",
                spec.default, name
            )));
        }
    }

    if recipe.headers.pattern.is_empty() {
        return Err(Error::ParseError("Header pattern cannot be empty".to_string()));
    }
    glob::Pattern::new(&recipe.headers.pattern).map_err(|e| {
        Error::ParseError(format!("Invalid header pattern '{}': {}", recipe.headers.pattern, e))
    })?;
    for pattern in &package.exports_sources {
        glob::Pattern::new(pattern).map_err(|e| {
            Error::ParseError(format!("Invalid exports_sources pattern '{}': {}", pattern, e))
        })?;
    }

    // Rejects duplicate stage handlers
    HookTable::from_entries(&recipe.hooks)?;

    if package.license.is_none() {
        warnings.push("Missing package license".to_string());
    }
    if package.author.is_none() {
        warnings.push("Missing package author".to_string());
    }
    if package.description.is_none() {
        warnings.push("Missing package description".to_string());
    }
    if !recipe.options.contains_key("shared") {
        warnings.push("No 'shared' option declared; building a static library".to_string());
    }
    if recipe.source.depth == 0 {
        warnings.push("Source depth is 0; the full history will be cloned".to_string());
    }

    Ok(warnings)
}

// src/recipe/mod.rs

//! Recipes: packaging a Meson-built C library
//!
//! A recipe describes one release of a library and how to turn its
//! source tree into a package folder that downstream builds can link
//! against. Running it is a strict sequence of lifecycle stages:
//! layout, source, generate, build, package, package_info.
//!
//! # Example Recipe
//!
//! ```toml
//! [package]
//! name = "fossil_media"
//! version = "0.1.1"
//! license = "MPL-2.0"
//! url = "https://github.com/fossillogic/fossil-media"
//! exports_sources = ["code/**", "meson.build", "meson.options"]
//!
//! [options.shared]
//! values = [true, false]
//! default = false
//!
//! [headers]
//! pattern = "*.h"
//! src = "code/logic/fossil/media"
//! dst = "include/fossil/media"
//!
//! [[hooks]]
//! stage = "source"
//! run = "git clone --branch v%(version)s --depth 1 %(url)s"
//! ```

mod context;
pub mod format;
pub mod hooks;
pub mod options;
pub mod orchestrator;
pub mod parser;

pub use context::RecipeContext;
pub use format::{
    HeaderCopy, HookEntry, OptionSpec, OptionValue, PackageDescriptor, Recipe, SourceSection,
};
pub use hooks::{Hook, HookTable};
pub use options::{parse_assignment, BuildOptions};
pub use orchestrator::{
    ConsumerInfo, CreateResult, FolderLayout, Orchestrator, OrchestratorConfig, PackageReport,
};
pub use parser::{builtin_recipe, parse_recipe, parse_recipe_file, validate_recipe};

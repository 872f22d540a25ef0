// src/lib.rs

//! Kiln: a recipe orchestrator for Meson-built C libraries
//!
//! Kiln reads a package recipe, lays out source and build folders,
//! generates a Meson native file, drives Meson through configure, build
//! and install, and assembles a package folder with headers, library
//! artifacts and consumer metadata.
//!
//! # Architecture
//!
//! - Recipes: TOML descriptions of one release (`recipe`)
//! - Orchestrator: strict linear lifecycle, first failure stops the run
//! - Toolchain: capability trait over the external build tool (`toolchain`)
//! - Fetcher: capability trait over version control (`fetch`)

mod error;
pub mod fetch;
pub mod hash;
pub mod process;
pub mod recipe;
pub mod toolchain;

pub use error::{Error, Result};
pub use fetch::{FetchRequest, Git, SourceFetcher};
pub use process::StepOutput;
pub use recipe::{
    BuildOptions, ConsumerInfo, CreateResult, FolderLayout, Hook, Orchestrator,
    OrchestratorConfig, PackageDescriptor, Recipe, RecipeContext,
};
pub use toolchain::{Meson, Settings, Toolchain};

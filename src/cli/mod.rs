// src/cli/mod.rs
//! CLI definitions for kiln
//!
//! Each lifecycle hook is a subcommand so a package-manager host can
//! drive stages one at a time:
//! - `layout` - Show the folder layout
//! - `source` - Clone the tagged release
//! - `generate` - Write toolchain files
//! - `build` - Configure and compile
//! - `package` - Install and assemble the package folder
//! - `info` - Show consumer linkage metadata
//!
//! Convenience:
//! - `create` - Run the whole lifecycle
//! - `export` - Copy the recipe's exported sources
//! - `inspect` - Validate and print the recipe
//!
//! The actual command implementations are in the `commands` module.

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kiln")]
#[command(author = "Kiln Contributors")]
#[command(version)]
#[command(about = "Recipe orchestrator for Meson-built C libraries", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct RecipeArgs {
    /// Recipe file (default: kiln.toml in the source folder, else built-in)
    #[arg(short, long)]
    pub recipe: Option<String>,

    /// Source folder (default: current directory)
    #[arg(long)]
    pub source_folder: Option<String>,

    /// Package staging folder (default: <source>/package)
    #[arg(long)]
    pub package_folder: Option<String>,

    /// Option override, e.g. `shared=True` (repeatable)
    #[arg(short = 'o', long = "option", value_name = "NAME=VALUE")]
    pub options: Vec<String>,

    /// Setting override, e.g. `build_type=Debug` (repeatable)
    #[arg(short = 's', long = "setting", value_name = "NAME=VALUE")]
    pub settings: Vec<String>,

    /// Meson executable
    #[arg(long, default_value = "meson")]
    pub meson: String,

    /// Git executable
    #[arg(long, default_value = "git")]
    pub git: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the source, build and package folders
    Layout {
        #[command(flatten)]
        recipe: RecipeArgs,
    },

    /// Clone the release tag of the upstream repository
    Source {
        #[command(flatten)]
        recipe: RecipeArgs,
    },

    /// Write Meson toolchain files into the build folder
    Generate {
        #[command(flatten)]
        recipe: RecipeArgs,

        /// Remove the build folder first
        #[arg(long)]
        fresh: bool,
    },

    /// Configure and compile with Meson
    Build {
        #[command(flatten)]
        recipe: RecipeArgs,

        /// Number of parallel compile jobs
        #[arg(short, long)]
        jobs: Option<u32>,
    },

    /// Install into the package folder and copy headers
    Package {
        #[command(flatten)]
        recipe: RecipeArgs,
    },

    /// Show linkage metadata for consumers
    Info {
        #[command(flatten)]
        recipe: RecipeArgs,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the whole lifecycle
    Create {
        #[command(flatten)]
        recipe: RecipeArgs,

        /// Clone the release tag before building
        #[arg(long)]
        fetch: bool,

        /// Remove the build folder before generating
        #[arg(long)]
        fresh: bool,

        /// Number of parallel compile jobs
        #[arg(short, long)]
        jobs: Option<u32>,

        /// Write the run log to this file
        #[arg(long)]
        log_file: Option<String>,
    },

    /// Copy the recipe's exported sources into a folder
    Export {
        #[command(flatten)]
        recipe: RecipeArgs,

        /// Destination folder
        dest: String,
    },

    /// Validate the recipe and print it
    Inspect {
        #[command(flatten)]
        recipe: RecipeArgs,
    },
}

// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Layout { recipe } => commands::cmd_layout(&recipe),
        Commands::Source { recipe } => commands::cmd_source(&recipe),
        Commands::Generate { recipe, fresh } => commands::cmd_generate(&recipe, fresh),
        Commands::Build { recipe, jobs } => commands::cmd_build(&recipe, jobs),
        Commands::Package { recipe } => commands::cmd_package(&recipe),
        Commands::Info { recipe, json } => commands::cmd_info(&recipe, json),
        Commands::Create {
            recipe,
            fetch,
            fresh,
            jobs,
            log_file,
        } => commands::cmd_create(&recipe, fetch, fresh, jobs, log_file.as_deref()),
        Commands::Export { recipe, dest } => commands::cmd_export(&recipe, &dest),
        Commands::Inspect { recipe } => commands::cmd_inspect(&recipe),
    }
}

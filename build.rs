// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common arguments: recipe, folders, overrides, tool paths
fn recipe_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("recipe")
            .short('r')
            .long("recipe")
            .value_name("PATH")
            .help("Recipe file (default: kiln.toml in the source folder, else built-in)"),
    )
    .arg(
        Arg::new("source_folder")
            .long("source-folder")
            .value_name("PATH")
            .help("Source folder (default: current directory)"),
    )
    .arg(
        Arg::new("package_folder")
            .long("package-folder")
            .value_name("PATH")
            .help("Package staging folder (default: <source>/package)"),
    )
    .arg(
        Arg::new("option")
            .short('o')
            .long("option")
            .value_name("NAME=VALUE")
            .action(ArgAction::Append)
            .help("Option override, e.g. shared=True"),
    )
    .arg(
        Arg::new("setting")
            .short('s')
            .long("setting")
            .value_name("NAME=VALUE")
            .action(ArgAction::Append)
            .help("Setting override, e.g. build_type=Debug"),
    )
    .arg(
        Arg::new("meson")
            .long("meson")
            .default_value("meson")
            .help("Meson executable"),
    )
    .arg(
        Arg::new("git")
            .long("git")
            .default_value("git")
            .help("Git executable"),
    )
}

fn jobs_arg() -> Arg {
    Arg::new("jobs")
        .short('j')
        .long("jobs")
        .value_name("N")
        .help("Number of parallel compile jobs")
}

fn build_cli() -> Command {
    Command::new("kiln")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Kiln Contributors")
        .about("Recipe orchestrator for Meson-built C libraries")
        .subcommand_required(true)
        .subcommand(recipe_args(
            Command::new("layout").about("Show the source, build and package folders"),
        ))
        .subcommand(recipe_args(
            Command::new("source").about("Clone the release tag of the upstream repository"),
        ))
        .subcommand(recipe_args(
            Command::new("generate")
                .about("Write Meson toolchain files into the build folder")
                .arg(
                    Arg::new("fresh")
                        .long("fresh")
                        .action(ArgAction::SetTrue)
                        .help("Remove the build folder first"),
                ),
        ))
        .subcommand(recipe_args(
            Command::new("build")
                .about("Configure and compile with Meson")
                .arg(jobs_arg()),
        ))
        .subcommand(recipe_args(
            Command::new("package").about("Install into the package folder and copy headers"),
        ))
        .subcommand(recipe_args(
            Command::new("info")
                .about("Show linkage metadata for consumers")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print as JSON"),
                ),
        ))
        .subcommand(recipe_args(
            Command::new("create")
                .about("Run the whole lifecycle")
                .arg(
                    Arg::new("fetch")
                        .long("fetch")
                        .action(ArgAction::SetTrue)
                        .help("Clone the release tag before building"),
                )
                .arg(
                    Arg::new("fresh")
                        .long("fresh")
                        .action(ArgAction::SetTrue)
                        .help("Remove the build folder before generating"),
                )
                .arg(jobs_arg())
                .arg(
                    Arg::new("log_file")
                        .long("log-file")
                        .value_name("PATH")
                        .help("Write the run log to this file"),
                ),
        ))
        .subcommand(recipe_args(
            Command::new("export")
                .about("Copy the recipe's exported sources into a folder")
                .arg(Arg::new("dest").required(true).help("Destination folder")),
        ))
        .subcommand(recipe_args(
            Command::new("inspect").about("Validate the recipe and print it"),
        ))
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=recipes/fossil_media.toml");

    // Create man directory - use CARGO_MANIFEST_DIR which is always set by cargo
    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let cmd = build_cli();
    let man = Man::new(cmd);
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("kiln.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}

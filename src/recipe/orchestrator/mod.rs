// src/recipe/orchestrator/mod.rs

//! Orchestrator: sequences the recipe lifecycle
//!
//! The orchestrator compiles nothing itself. It derives folders, writes
//! toolchain files, and defers to an external build tool and a
//! version-control client for the real work:
//!
//! 1. **Layout**: source root and `<source_root>/builddir`
//! 2. **Source**: clone the `v<version>` tag (optional)
//! 3. **Generate**: write the Meson native file
//! 4. **Build**: configure, then compile
//! 5. **Package**: install, copy headers, check artifacts, write manifest
//! 6. **Package info**: linkage metadata for consumers
//!
//! Steps run strictly in order and the first failure ends the run.
//! Nothing is retried.

mod config;
mod export;
mod info;
mod layout;
mod package;

pub use config::{CreateResult, OrchestratorConfig, PackageReport};
pub use export::export_files;
pub use info::ConsumerInfo;
pub use layout::{FolderLayout, BUILD_FOLDER, NATIVE_FILE, PACKAGE_FOLDER, TOOLCHAIN_FILE};
pub use package::{
    copy_headers, find_artifacts, is_library_artifact, relative_paths, LibraryKind,
    PackageManifest, MANIFEST_FILE,
};

use crate::error::{Error, Result};
use crate::fetch::{FetchRequest, Git, SourceFetcher};
use crate::process::{run_shell, StepOutput};
use crate::recipe::context::RecipeContext;
use crate::recipe::format::{release_tag, PackageDescriptor, SourceSection};
use crate::recipe::hooks::Hook;
use crate::toolchain::{generate_toolchain, Meson, Toolchain};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The Orchestrator: runs recipe lifecycles
pub struct Orchestrator {
    config: OrchestratorConfig,
    toolchain: Arc<dyn Toolchain>,
    fetcher: Arc<dyn SourceFetcher>,
}

impl Orchestrator {
    /// Create an orchestrator over the given build tool and fetcher
    pub fn new(
        config: OrchestratorConfig,
        toolchain: Arc<dyn Toolchain>,
        fetcher: Arc<dyn SourceFetcher>,
    ) -> Self {
        Self {
            config,
            toolchain,
            fetcher,
        }
    }

    /// Meson and git from `PATH`, default configuration
    pub fn with_defaults() -> Self {
        Self::new(
            OrchestratorConfig::default(),
            Arc::new(Meson::new()),
            Arc::new(Git::new()),
        )
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Clone the release tag into `<source_root>/<repo-name>`
    ///
    /// Returns the directory holding the fetched sources. A `source` hook
    /// replaces the clone; if it leaves no such directory behind, the
    /// source root itself is returned.
    pub fn fetch_source(&self, ctx: &RecipeContext) -> Result<(PathBuf, StepOutput)> {
        let layout = ctx.layout();
        let dest = layout.source_root.join(ctx.recipe().clone_dir_name());

        if let Some(command) = ctx.hooks().get(Hook::Source) {
            info!("Running source hook");
            let output = run_hook(ctx, Hook::Source, command).map_err(|e| match e {
                Error::BuildError { code, stderr, .. } => Error::SourceFetchError(format!(
                    "source hook exited with {}: {}",
                    code.map_or_else(|| "signal".to_string(), |c| c.to_string()),
                    stderr.trim()
                )),
                other => other,
            })?;
            let fetched = if dest.is_dir() {
                dest
            } else {
                layout.source_root.clone()
            };
            return Ok((fetched, output));
        }

        let request = fetch_request(ctx.descriptor(), &ctx.recipe().source, dest);
        info!(
            "Fetching {} {} (tag {})",
            ctx.descriptor().name,
            ctx.descriptor().version,
            request.tag
        );
        let output = self.fetcher.fetch(&request)?;
        Ok((request.dest, output))
    }

    /// Write toolchain description files into the build root
    pub fn generate_toolchain(&self, ctx: &RecipeContext) -> Result<Vec<PathBuf>> {
        let layout = ctx.layout();

        if self.config.fresh_build && layout.build_root.exists() {
            debug!("Removing previous build folder {}", layout.build_root.display());
            fs::remove_dir_all(&layout.build_root).map_err(|e| {
                Error::ToolchainGenerationError(format!(
                    "Failed to clear {}: {}",
                    layout.build_root.display(),
                    e
                ))
            })?;
        }

        if let Some(command) = ctx.hooks().get(Hook::Generate) {
            info!("Running generate hook");
            fs::create_dir_all(&layout.build_root).map_err(|e| {
                Error::ToolchainGenerationError(format!(
                    "Failed to create {}: {}",
                    layout.build_root.display(),
                    e
                ))
            })?;
            run_hook(ctx, Hook::Generate, command).map_err(|e| {
                Error::ToolchainGenerationError(format!("generate hook failed: {}", e))
            })?;
            return Ok(Vec::new());
        }

        generate_toolchain(ctx.descriptor(), ctx.settings(), ctx.options(), layout)
    }

    /// Configure and compile with the external build tool
    pub fn build(&self, ctx: &RecipeContext) -> Result<Vec<StepOutput>> {
        let layout = ctx.layout();
        if !layout.build_root.is_dir() {
            return Err(Error::ConfigurationError(format!(
                "Build folder {} does not exist; generate the toolchain first",
                layout.build_root.display()
            )));
        }

        if let Some(command) = ctx.hooks().get(Hook::Build) {
            info!("Running build hook");
            return Ok(vec![run_hook(ctx, Hook::Build, command)?]);
        }

        info!("Configuring {}", ctx.descriptor().name);
        let configured = self.toolchain.configure(layout)?;
        info!("Building {}", ctx.descriptor().name);
        let built = self.toolchain.build(layout)?;
        Ok(vec![configured, built])
    }

    /// Install into the package folder and complete the staging layout
    ///
    /// The package folder is recreated from scratch, so artifacts of an
    /// earlier configuration never linger.
    pub fn package_artifacts(&self, ctx: &RecipeContext) -> Result<PackageReport> {
        let layout = ctx.layout();
        let descriptor = ctx.descriptor();
        let package_folder = &layout.package_folder;
        layout.check_package_folder()?;

        if package_folder.exists() {
            debug!("Clearing package folder {}", package_folder.display());
            fs::remove_dir_all(package_folder).map_err(|e| {
                Error::PackagingError(format!(
                    "Failed to clear {}: {}",
                    package_folder.display(),
                    e
                ))
            })?;
        }
        fs::create_dir_all(package_folder)?;

        let output = match ctx.hooks().get(Hook::Package) {
            Some(command) => {
                info!("Running package hook");
                run_hook(ctx, Hook::Package, command)?
            }
            None => {
                info!("Installing {} into {}", descriptor.name, package_folder.display());
                self.toolchain.install(layout)?
            }
        };

        let headers = copy_headers(&ctx.recipe().headers, &layout.source_root, package_folder)?;
        if headers.is_empty() {
            warn!(
                "No headers matching '{}' under {}",
                ctx.recipe().headers.pattern,
                ctx.recipe().headers.src
            );
        }

        let kind = ctx.library_kind();
        let artifacts = find_artifacts(package_folder, &descriptor.name, kind, ctx.settings().os);
        if artifacts.is_empty() {
            return Err(Error::PackagingError(format!(
                "No {:?} library for '{}' found under {}",
                kind,
                descriptor.name,
                package_folder.display()
            )));
        }

        let consumer_info = self.describe_consumer_info(ctx);

        let pc_dir = package_folder.join("lib").join("pkgconfig");
        fs::create_dir_all(&pc_dir)?;
        let pkg_config = pc_dir.join(format!("{}.pc", descriptor.name));
        fs::write(&pkg_config, consumer_info.pkg_config(descriptor))?;

        let package_id = ctx.package_id();
        let manifest = PackageManifest {
            package: descriptor,
            package_id: &package_id,
            settings: ctx.settings(),
            options: ctx.options().iter().map(|(k, v)| (k.as_str(), v)).collect(),
            library_kind: kind,
            consumer_info: &consumer_info,
            artifacts: relative_paths(package_folder, &artifacts),
            headers: relative_paths(package_folder, &headers),
        };
        let manifest_path = package_folder.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(&manifest)
            .map_err(|e| Error::PackagingError(format!("Failed to encode manifest: {}", e)))?;
        fs::write(&manifest_path, json)?;

        info!(
            "Packaged {} ({} artifact(s), {} header(s))",
            descriptor.name,
            artifacts.len(),
            headers.len()
        );

        Ok(PackageReport {
            package_folder: package_folder.clone(),
            artifacts,
            headers,
            manifest: manifest_path,
            pkg_config,
            output,
        })
    }

    /// Linkage metadata for downstream builds
    pub fn describe_consumer_info(&self, ctx: &RecipeContext) -> ConsumerInfo {
        ConsumerInfo::describe(ctx.descriptor())
    }

    /// Copy the recipe's `exports_sources` into `dest`
    pub fn export_sources(&self, ctx: &RecipeContext, dest: &Path) -> Result<Vec<PathBuf>> {
        let patterns = &ctx.descriptor().exports_sources;
        if patterns.is_empty() {
            warn!("Recipe declares no exports_sources");
            return Ok(Vec::new());
        }
        fs::create_dir_all(dest)?;
        let exported = export_files(&ctx.layout().source_root, patterns, dest)?;
        info!("Exported {} file(s) to {}", exported.len(), dest.display());
        Ok(exported)
    }

    /// Run the whole lifecycle
    ///
    /// With `fetch_source` set, the tagged release is cloned first and
    /// the remaining steps run inside the clone.
    pub fn create(&self, ctx: &RecipeContext) -> Result<CreateResult> {
        info!(
            "Creating {} version {}",
            ctx.descriptor().name,
            ctx.descriptor().version
        );

        let mut log = String::new();
        let warnings = ctx.warnings().to_vec();

        let rebased;
        let (ctx, fetched_source) = if self.config.fetch_source {
            let (dir, output) = self.fetch_source(ctx)?;
            append_output(&mut log, "source", &output);
            rebased = ctx.rebased(&dir);
            (&rebased, Some(dir))
        } else {
            (ctx, None)
        };

        let generated = self.generate_toolchain(ctx)?;
        log_line(&mut log, "=== generate ===");
        for path in &generated {
            log_line(&mut log, &format!("wrote {}", path.display()));
        }

        for output in self.build(ctx)? {
            append_output(&mut log, "build", &output);
        }

        let package = self.package_artifacts(ctx)?;
        append_output(&mut log, "package", &package.output);

        let consumer_info = self.describe_consumer_info(ctx);
        let package_id = ctx.package_id();
        info!(
            "Created {}/{} ({})",
            ctx.descriptor().name,
            ctx.descriptor().version,
            &package_id[..12]
        );

        Ok(CreateResult {
            package_id,
            package,
            consumer_info,
            fetched_source,
            log,
            warnings,
        })
    }
}

/// Build the clone request for a release
pub fn fetch_request(
    descriptor: &PackageDescriptor,
    source: &SourceSection,
    dest: PathBuf,
) -> FetchRequest {
    FetchRequest {
        url: descriptor.url.clone(),
        tag: release_tag(&descriptor.version),
        depth: source.depth,
        dest,
    }
}

fn run_hook(ctx: &RecipeContext, stage: Hook, command: &str) -> Result<StepOutput> {
    let command = ctx.substitute(command);
    let step = format!("{} hook", stage);
    run_shell(&step, &command, &ctx.layout().source_root, &ctx.hook_env())
}

fn log_line(log: &mut String, line: &str) {
    log.push_str(line);
    log.push('\n');
}

/// Append a step's output with a phase header
fn append_output(log: &mut String, phase: &str, output: &StepOutput) {
    log_line(log, &format!("=== {} ===", phase));
    if !output.command.is_empty() {
        log_line(log, &format!("$ {}", output.command));
    }
    if !output.stdout.is_empty() {
        log_line(log, output.stdout.trim_end());
    }
    if !output.stderr.is_empty() {
        log_line(log, output.stderr.trim_end());
    }
}

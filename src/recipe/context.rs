// src/recipe/context.rs

//! The immutable inputs of one recipe run
//!
//! Descriptor, options, settings and layout are bundled once, validated
//! once, and then handed by reference to every lifecycle operation.

use crate::error::Result;
use crate::hash::package_id;
use crate::recipe::format::{PackageDescriptor, Recipe};
use crate::recipe::hooks::HookTable;
use crate::recipe::options::BuildOptions;
use crate::recipe::orchestrator::{FolderLayout, LibraryKind};
use crate::recipe::parser::validate_recipe;
use crate::toolchain::Settings;
use std::path::Path;

/// Validated, resolved inputs for a run
#[derive(Debug, Clone)]
pub struct RecipeContext {
    recipe: Recipe,
    hooks: HookTable,
    options: BuildOptions,
    settings: Settings,
    layout: FolderLayout,
    warnings: Vec<String>,
}

impl RecipeContext {
    /// Validate the recipe and resolve options against it
    pub fn new(
        recipe: Recipe,
        option_overrides: &[(String, String)],
        settings: Settings,
        layout: FolderLayout,
    ) -> Result<Self> {
        let warnings = validate_recipe(&recipe)?;
        let hooks = HookTable::from_entries(&recipe.hooks)?;
        let options = BuildOptions::resolve(&recipe.options, option_overrides)?;

        Ok(Self {
            recipe,
            hooks,
            options,
            settings,
            layout,
            warnings,
        })
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn descriptor(&self) -> &PackageDescriptor {
        &self.recipe.package
    }

    pub fn hooks(&self) -> &HookTable {
        &self.hooks
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn layout(&self) -> &FolderLayout {
        &self.layout
    }

    /// Validation warnings collected at load time
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Library kind requested by the `shared` option
    pub fn library_kind(&self) -> LibraryKind {
        LibraryKind::from_shared(self.options.shared())
    }

    /// Package id of this configuration
    pub fn package_id(&self) -> String {
        package_id(&self.recipe.package, &self.settings, &self.options)
    }

    /// Same inputs with sources and build folder under `source_root`
    ///
    /// The package folder stays where it was.
    pub fn rebased(&self, source_root: &Path) -> Self {
        let layout = FolderLayout::at(source_root).with_package_folder(&self.layout.package_folder);
        Self {
            layout,
            ..self.clone()
        }
    }

    /// Substitute recipe and folder variables in a hook command
    pub fn substitute(&self, command: &str) -> String {
        self.recipe.substitute(
            command,
            &self.layout.build_root.to_string_lossy(),
            &self.layout.package_folder.to_string_lossy(),
        )
    }

    /// Environment exported to hook commands
    pub fn hook_env(&self) -> Vec<(&'static str, String)> {
        vec![
            ("KILN_PACKAGE_NAME", self.recipe.package.name.clone()),
            ("KILN_PACKAGE_VERSION", self.recipe.package.version.clone()),
            (
                "KILN_SOURCE_FOLDER",
                self.layout.source_root.to_string_lossy().to_string(),
            ),
            (
                "KILN_BUILD_FOLDER",
                self.layout.build_root.to_string_lossy().to_string(),
            ),
            (
                "KILN_PACKAGE_FOLDER",
                self.layout.package_folder.to_string_lossy().to_string(),
            ),
            ("KILN_SHARED", self.options.shared().to_string()),
        ]
    }
}

// tests/common/mod.rs

//! Shared test utilities: a fake build tool, a fake fetcher, and a
//! source tree fixture shaped like fossil_media.

#![allow(dead_code)]

use kiln::recipe::{builtin_recipe, FolderLayout, Recipe, RecipeContext};
use kiln::toolchain::{BuildType, Os, Settings};
use kiln::{Error, FetchRequest, Result, SourceFetcher, StepOutput, Toolchain};
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tempfile::TempDir;

/// Headers shipped in the fixture source tree
pub const HEADERS: &[&str] = &["framework.h", "json.h", "media.h", "xml.h"];

/// Linux/gcc/release settings, independent of the host
pub fn linux_settings() -> Settings {
    Settings {
        os: Os::Linux,
        arch: "x86_64".to_string(),
        compiler: "gcc".to_string(),
        build_type: BuildType::Release,
    }
}

/// Populate `root` with a minimal fossil_media source tree
pub fn write_source_tree(root: &Path) {
    let headers = root.join("code/logic/fossil/media");
    fs::create_dir_all(&headers).unwrap();
    for header in HEADERS {
        fs::write(headers.join(header), format!("/* {} */\n", header)).unwrap();
    }
    fs::write(root.join("code/logic/json.c"), "int fossil_media_json;\n").unwrap();
    fs::write(
        root.join("meson.build"),
        "project('fossil_media', 'c')\n",
    )
    .unwrap();
    fs::write(root.join("meson.options"), "").unwrap();
}

/// A temp source tree and a context for the built-in recipe over it
pub fn setup(options: &[(&str, &str)]) -> (TempDir, RecipeContext) {
    setup_with_recipe(builtin_recipe().unwrap(), options)
}

pub fn setup_with_recipe(recipe: Recipe, options: &[(&str, &str)]) -> (TempDir, RecipeContext) {
    let dir = tempfile::tempdir().unwrap();
    write_source_tree(dir.path());
    let overrides: Vec<(String, String)> = options
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let ctx = RecipeContext::new(
        recipe,
        &overrides,
        linux_settings(),
        FolderLayout::at(dir.path()),
    )
    .unwrap();
    (dir, ctx)
}

/// Build tool stand-in
///
/// `install` reads the generated native file, like Meson would, and
/// drops a static or shared library into `<package>/lib`.
pub struct FakeToolchain {
    pub calls: Mutex<Vec<String>>,
    fail_on: Option<&'static str>,
    install_nothing: bool,
}

impl FakeToolchain {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_on: None,
            install_nothing: false,
        }
    }

    /// Fail the named step (`configure`, `build` or `install`)
    pub fn failing(step: &'static str) -> Self {
        Self {
            fail_on: Some(step),
            ..Self::new()
        }
    }

    /// Succeed at install without producing artifacts
    pub fn empty_install() -> Self {
        Self {
            install_nothing: true,
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn step(&self, name: &str) -> Result<StepOutput> {
        self.calls.lock().unwrap().push(name.to_string());
        if self.fail_on == Some(name) {
            return Err(Error::BuildError {
                step: format!("meson {}", name),
                code: Some(1),
                stderr: "ninja: build stopped: subcommand failed.".to_string(),
            });
        }
        Ok(StepOutput {
            command: format!("meson {}", name),
            stdout: format!("{} ok", name),
            stderr: String::new(),
        })
    }
}

impl Toolchain for FakeToolchain {
    fn configure(&self, layout: &FolderLayout) -> Result<StepOutput> {
        let output = self.step("configure")?;
        fs::create_dir_all(layout.build_root.join("meson-private"))?;
        Ok(output)
    }

    fn build(&self, layout: &FolderLayout) -> Result<StepOutput> {
        let output = self.step("build")?;
        fs::write(layout.build_root.join("json.c.o"), b"\x7fELF")?;
        Ok(output)
    }

    fn install(&self, layout: &FolderLayout) -> Result<StepOutput> {
        let output = self.step("install")?;
        if self.install_nothing {
            return Ok(output);
        }

        let native = fs::read_to_string(layout.native_file())?;
        let lib_dir = layout.package_folder.join("lib");
        fs::create_dir_all(&lib_dir)?;
        if native.contains("default_library = 'shared'") {
            fs::write(lib_dir.join("libfossil_media.so.0.1.1"), b"\x7fELF")?;
            fs::write(lib_dir.join("libfossil_media.so"), b"\x7fELF")?;
        } else {
            fs::write(lib_dir.join("libfossil_media.a"), b"!<arch>\n")?;
        }

        // Meson installs only some headers; the header rule fills the rest
        let include = layout.package_folder.join("include/fossil/media");
        fs::create_dir_all(&include)?;
        fs::write(include.join("media.h"), b"/* media.h */\n")?;
        Ok(output)
    }
}

/// Version-control stand-in that writes the fixture tree at `dest`
pub struct FakeFetcher {
    pub requests: Mutex<Vec<FetchRequest>>,
    fail: bool,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl SourceFetcher for FakeFetcher {
    fn fetch(&self, request: &FetchRequest) -> Result<StepOutput> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail {
            return Err(Error::SourceFetchError(format!(
                "Remote branch {} not found in upstream origin",
                request.tag
            )));
        }
        write_source_tree(&request.dest);
        Ok(StepOutput {
            command: format!("git clone --branch {} {}", request.tag, request.url),
            stdout: String::new(),
            stderr: format!("Cloning into '{}'...", request.dest.display()),
        })
    }
}

/// Sorted file names directly under `dir`
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

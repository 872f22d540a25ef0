// tests/lifecycle.rs

//! End-to-end lifecycle tests against a fake build tool and fetcher.

mod common;

use common::{file_names, setup, setup_with_recipe, FakeFetcher, FakeToolchain, HEADERS};
use kiln::recipe::orchestrator::MANIFEST_FILE;
use kiln::recipe::{
    builtin_recipe, Hook, HookEntry, Orchestrator, OrchestratorConfig, Recipe,
};
use kiln::Error;
use std::fs;
use std::sync::Arc;

fn orchestrator(
    config: OrchestratorConfig,
    toolchain: Arc<FakeToolchain>,
    fetcher: Arc<FakeFetcher>,
) -> Orchestrator {
    Orchestrator::new(config, toolchain, fetcher)
}

fn expected_headers() -> Vec<String> {
    HEADERS.iter().map(|h| h.to_string()).collect()
}

#[test]
fn test_create_static_package() {
    let (dir, ctx) = setup(&[]);
    let toolchain = Arc::new(FakeToolchain::new());
    let orch = orchestrator(
        OrchestratorConfig::default(),
        toolchain.clone(),
        Arc::new(FakeFetcher::new()),
    );

    let result = orch.create(&ctx).unwrap();
    let pkg = dir.path().join("package");

    assert_eq!(result.package.package_folder, pkg);
    assert_eq!(toolchain.calls(), vec!["configure", "build", "install"]);
    assert_eq!(file_names(&pkg.join("include/fossil/media")), expected_headers());
    assert!(pkg.join("lib/libfossil_media.a").is_file());
    assert!(!pkg.join("lib/libfossil_media.so").exists());
    assert_eq!(result.package.artifacts, vec![pkg.join("lib/libfossil_media.a")]);

    assert_eq!(result.consumer_info.libs, vec!["fossil_media".to_string()]);
    assert_eq!(result.consumer_info.includedirs, vec!["include".to_string()]);
    assert!(result.fetched_source.is_none());
    assert!(result.log.contains("=== build ===\n$ meson configure\nconfigure ok\n"));
}

#[test]
fn test_create_shared_package_same_headers() {
    let (static_dir, static_ctx) = setup(&[("shared", "False")]);
    let (shared_dir, shared_ctx) = setup(&[("shared", "True")]);

    let orch = orchestrator(
        OrchestratorConfig::default(),
        Arc::new(FakeToolchain::new()),
        Arc::new(FakeFetcher::new()),
    );
    let static_result = orch.create(&static_ctx).unwrap();
    let shared_result = orch.create(&shared_ctx).unwrap();

    let static_pkg = static_dir.path().join("package");
    let shared_pkg = shared_dir.path().join("package");

    assert!(shared_pkg.join("lib/libfossil_media.so").is_file());
    assert!(!shared_pkg.join("lib/libfossil_media.a").exists());
    assert_eq!(shared_result.package.artifacts.len(), 2);

    assert_eq!(
        file_names(&static_pkg.join("include/fossil/media")),
        file_names(&shared_pkg.join("include/fossil/media"))
    );
    assert_ne!(static_result.package_id, shared_result.package_id);

    let native = fs::read_to_string(shared_dir.path().join("builddir/kiln_meson_native.ini")).unwrap();
    assert!(native.contains("default_library = 'shared'"));
}

#[test]
fn test_build_failure_stops_before_packaging() {
    let (dir, ctx) = setup(&[]);
    let toolchain = Arc::new(FakeToolchain::failing("build"));
    let orch = orchestrator(
        OrchestratorConfig::default(),
        toolchain.clone(),
        Arc::new(FakeFetcher::new()),
    );

    let err = orch.create(&ctx).unwrap_err();
    match err {
        Error::BuildError { step, code, stderr } => {
            assert_eq!(step, "meson build");
            assert_eq!(code, Some(1));
            assert!(stderr.contains("subcommand failed"));
        }
        other => panic!("expected BuildError, got {other}"),
    }

    assert_eq!(toolchain.calls(), vec!["configure", "build"]);
    assert!(!dir.path().join("package").exists());
}

#[test]
fn test_configure_failure_is_build_error() {
    let (dir, ctx) = setup(&[]);
    let toolchain = Arc::new(FakeToolchain::failing("configure"));
    let orch = orchestrator(
        OrchestratorConfig::default(),
        toolchain.clone(),
        Arc::new(FakeFetcher::new()),
    );

    assert!(matches!(orch.create(&ctx), Err(Error::BuildError { .. })));
    assert_eq!(toolchain.calls(), vec!["configure"]);
    assert!(!dir.path().join("package").exists());
}

#[test]
fn test_package_twice_is_idempotent() {
    let (dir, ctx) = setup(&[]);
    let orch = orchestrator(
        OrchestratorConfig::default(),
        Arc::new(FakeToolchain::new()),
        Arc::new(FakeFetcher::new()),
    );

    orch.generate_toolchain(&ctx).unwrap();
    orch.build(&ctx).unwrap();
    let first = orch.package_artifacts(&ctx).unwrap();
    let include = dir.path().join("package/include/fossil/media");
    let first_names = file_names(&include);

    let second = orch.package_artifacts(&ctx).unwrap();
    assert_eq!(file_names(&include), first_names);
    assert_eq!(first.headers, second.headers);
    assert_eq!(first.artifacts, second.artifacts);
}

#[test]
fn test_empty_install_is_packaging_error() {
    let (_dir, ctx) = setup(&[]);
    let orch = orchestrator(
        OrchestratorConfig::default(),
        Arc::new(FakeToolchain::empty_install()),
        Arc::new(FakeFetcher::new()),
    );

    let err = orch.create(&ctx).unwrap_err();
    assert!(matches!(err, Error::PackagingError(ref m) if m.contains("fossil_media")));
}

#[test]
fn test_build_requires_generated_toolchain() {
    let (_dir, ctx) = setup(&[]);
    let toolchain = Arc::new(FakeToolchain::new());
    let orch = orchestrator(
        OrchestratorConfig::default(),
        toolchain.clone(),
        Arc::new(FakeFetcher::new()),
    );

    assert!(matches!(orch.build(&ctx), Err(Error::ConfigurationError(_))));
    assert!(toolchain.calls().is_empty());
}

#[test]
fn test_create_with_fetch_uses_release_tag() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = kiln::RecipeContext::new(
        kiln::recipe::builtin_recipe().unwrap(),
        &[],
        common::linux_settings(),
        kiln::FolderLayout::at(dir.path()),
    )
    .unwrap();

    let fetcher = Arc::new(FakeFetcher::new());
    let orch = orchestrator(
        OrchestratorConfig::from_source(),
        Arc::new(FakeToolchain::new()),
        fetcher.clone(),
    );

    let result = orch.create(&ctx).unwrap();
    let clone = dir.path().join("fossil-media");

    let requests = fetcher.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].tag, "v0.1.1");
    assert_eq!(requests[0].depth, 1);
    assert_eq!(requests[0].dest, clone);

    assert_eq!(result.fetched_source, Some(clone.clone()));
    assert!(clone.join("builddir/kiln_meson_native.ini").is_file());
    // Staging stays where the caller's layout put it
    assert!(dir.path().join("package/lib/libfossil_media.a").is_file());
    assert_eq!(
        file_names(&dir.path().join("package/include/fossil/media")),
        expected_headers()
    );
}

#[test]
fn test_fetch_failure_stops_run() {
    let (dir, ctx) = setup(&[]);
    let toolchain = Arc::new(FakeToolchain::new());
    let orch = orchestrator(
        OrchestratorConfig::from_source(),
        toolchain.clone(),
        Arc::new(FakeFetcher::failing()),
    );

    let err = orch.create(&ctx).unwrap_err();
    assert!(matches!(err, Error::SourceFetchError(ref m) if m.contains("v0.1.1")));
    assert!(toolchain.calls().is_empty());
    assert!(!dir.path().join("builddir").exists());
}

#[test]
fn test_manifest_and_pkg_config() {
    let (dir, ctx) = setup(&[]);
    let orch = orchestrator(
        OrchestratorConfig::default(),
        Arc::new(FakeToolchain::new()),
        Arc::new(FakeFetcher::new()),
    );

    let result = orch.create(&ctx).unwrap();
    let pkg = dir.path().join("package");

    let manifest: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(pkg.join(MANIFEST_FILE)).unwrap()).unwrap();
    assert_eq!(manifest["package"]["name"], "fossil_media");
    assert_eq!(manifest["package_id"], result.package_id.as_str());
    assert_eq!(manifest["options"]["shared"], false);
    assert_eq!(manifest["library_kind"], "static");
    assert_eq!(manifest["artifacts"][0], "lib/libfossil_media.a");
    assert_eq!(manifest["consumer_info"]["libs"][0], "fossil_media");
    assert_eq!(manifest["headers"].as_array().unwrap().len(), HEADERS.len());

    let pc = fs::read_to_string(pkg.join("lib/pkgconfig/fossil_media.pc")).unwrap();
    assert!(pc.contains("Libs: -L${libdir} -lfossil_media"));
    assert_eq!(result.package.pkg_config, pkg.join("lib/pkgconfig/fossil_media.pc"));
}

#[test]
fn test_stale_artifacts_removed_between_configurations() {
    let dir = tempfile::tempdir().unwrap();
    common::write_source_tree(dir.path());
    let orch = orchestrator(
        OrchestratorConfig {
            fresh_build: true,
            ..Default::default()
        },
        Arc::new(FakeToolchain::new()),
        Arc::new(FakeFetcher::new()),
    );

    for shared in ["True", "False"] {
        let ctx = kiln::RecipeContext::new(
            kiln::recipe::builtin_recipe().unwrap(),
            &[("shared".to_string(), shared.to_string())],
            common::linux_settings(),
            kiln::FolderLayout::at(dir.path()),
        )
        .unwrap();
        orch.create(&ctx).unwrap();
    }

    let lib = dir.path().join("package/lib");
    assert!(lib.join("libfossil_media.a").is_file());
    assert!(!lib.join("libfossil_media.so").exists());
}

fn recipe_with_hooks(hooks: &[(Hook, &str)]) -> Recipe {
    let mut recipe = builtin_recipe().unwrap();
    recipe.hooks = hooks
        .iter()
        .map(|(stage, run)| HookEntry {
            stage: *stage,
            run: run.to_string(),
        })
        .collect();
    recipe
}

#[cfg(unix)]
#[test]
fn test_hooks_replace_build_and_install() {
    let recipe = recipe_with_hooks(&[
        (Hook::Build, "touch %(build_folder)s/hook.stamp"),
        (
            Hook::Package,
            "mkdir -p \"$KILN_PACKAGE_FOLDER/lib\" && touch \"$KILN_PACKAGE_FOLDER/lib/lib${KILN_PACKAGE_NAME}.a\"",
        ),
    ]);
    let (dir, ctx) = setup_with_recipe(recipe, &[]);
    let toolchain = Arc::new(FakeToolchain::new());
    let orch = orchestrator(
        OrchestratorConfig::default(),
        toolchain.clone(),
        Arc::new(FakeFetcher::new()),
    );

    let result = orch.create(&ctx).unwrap();

    assert!(toolchain.calls().is_empty());
    assert!(dir.path().join("builddir/hook.stamp").is_file());
    assert!(dir.path().join("builddir/kiln_meson_native.ini").is_file());
    assert_eq!(result.package.artifacts.len(), 1);
    // Headers are still copied after a package hook
    assert_eq!(
        file_names(&dir.path().join("package/include/fossil/media")),
        expected_headers()
    );
}

#[cfg(unix)]
#[test]
fn test_failing_build_hook() {
    let recipe = recipe_with_hooks(&[(Hook::Build, "echo broken >&2; exit 3")]);
    let (dir, ctx) = setup_with_recipe(recipe, &[]);
    let orch = orchestrator(
        OrchestratorConfig::default(),
        Arc::new(FakeToolchain::new()),
        Arc::new(FakeFetcher::new()),
    );

    match orch.create(&ctx).unwrap_err() {
        Error::BuildError { code, stderr, .. } => {
            assert_eq!(code, Some(3));
            assert!(stderr.contains("broken"));
        }
        other => panic!("expected BuildError, got {other}"),
    }
    assert!(!dir.path().join("package").exists());
}

#[test]
fn test_duplicate_hook_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let recipe = recipe_with_hooks(&[(Hook::Source, "true"), (Hook::Source, "false")]);
    let err = kiln::RecipeContext::new(
        recipe,
        &[],
        common::linux_settings(),
        kiln::FolderLayout::at(dir.path()),
    )
    .unwrap_err();
    assert!(matches!(err, Error::DuplicateHook(ref stage) if stage == "source"));
}

#[test]
fn test_export_sources() {
    let (dir, ctx) = setup(&[]);
    let dest = dir.path().join("export");
    let orch = orchestrator(
        OrchestratorConfig::default(),
        Arc::new(FakeToolchain::new()),
        Arc::new(FakeFetcher::new()),
    );

    let exported = orch.export_sources(&ctx, &dest).unwrap();

    assert!(dest.join("meson.build").is_file());
    assert!(dest.join("meson.options").is_file());
    assert!(dest.join("code/logic/json.c").is_file());
    assert_eq!(
        file_names(&dest.join("code/logic/fossil/media")),
        expected_headers()
    );
    assert_eq!(exported.len(), HEADERS.len() + 3);
}

#[test]
fn test_package_folder_at_source_root_rejected() {
    let dir = tempfile::tempdir().unwrap();
    common::write_source_tree(dir.path());
    fs::write(dir.path().join("precious.c"), "int keep;\n").unwrap();

    let layout = kiln::FolderLayout::at(dir.path()).with_package_folder(std::path::Path::new("."));
    let ctx = kiln::RecipeContext::new(
        builtin_recipe().unwrap(),
        &[],
        common::linux_settings(),
        layout,
    )
    .unwrap();
    let toolchain = Arc::new(FakeToolchain::new());
    let orch = orchestrator(
        OrchestratorConfig::default(),
        toolchain.clone(),
        Arc::new(FakeFetcher::new()),
    );

    orch.generate_toolchain(&ctx).unwrap();
    orch.build(&ctx).unwrap();
    let err = orch.package_artifacts(&ctx).unwrap_err();

    assert!(matches!(err, Error::ConfigurationError(_)));
    assert!(!toolchain.calls().contains(&"install".to_string()));
    assert!(dir.path().join("precious.c").is_file());
    assert!(dir.path().join("meson.build").is_file());
    assert_eq!(
        file_names(&dir.path().join("code/logic/fossil/media")),
        expected_headers()
    );
}

#[test]
fn test_install_failure_writes_no_metadata() {
    let (dir, ctx) = setup(&[]);
    let toolchain = Arc::new(FakeToolchain::failing("install"));
    let orch = orchestrator(
        OrchestratorConfig::default(),
        toolchain.clone(),
        Arc::new(FakeFetcher::new()),
    );

    let err = orch.create(&ctx).unwrap_err();
    assert_eq!(err.step(), Some("package"));
    match err {
        Error::BuildError { step, .. } => assert_eq!(step, "meson install"),
        other => panic!("expected BuildError, got {other}"),
    }

    let pkg = dir.path().join("package");
    assert_eq!(toolchain.calls(), vec!["configure", "build", "install"]);
    assert!(!pkg.join(MANIFEST_FILE).exists());
    assert!(!pkg.join("lib/pkgconfig/fossil_media.pc").exists());
    assert!(!pkg.join("include").exists());
}

// src/toolchain/native_file.rs

//! Meson native file rendering
//!
//! The native file carries compiler binaries and built-in options so
//! `meson setup` needs no further flags. Installation uses prefix `/`
//! together with `--destdir`, which keeps the package folder out of the
//! configured build.

use crate::recipe::BuildOptions;
use crate::toolchain::settings::Settings;
use std::fmt::Write;

/// Contents of a Meson native file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeFile {
    pub c: String,
    pub cpp: String,
    pub buildtype: String,
    pub default_library: String,
    pub prefix: String,
    pub libdir: String,
    pub includedir: String,
}

impl NativeFile {
    /// Derive the native file from settings and resolved options
    pub fn new(settings: &Settings, options: &BuildOptions) -> Self {
        let (c, cpp) = settings.compiler_binaries();
        Self {
            c,
            cpp,
            buildtype: settings.build_type.meson_buildtype().to_string(),
            default_library: if options.shared() { "shared" } else { "static" }.to_string(),
            prefix: "/".to_string(),
            libdir: "lib".to_string(),
            includedir: "include".to_string(),
        }
    }

    /// Render as Meson's INI dialect
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("# Generated by kiln; do not edit\n\n");

        out.push_str("[binaries]\n");
        let _ = writeln!(out, "c = {}", quote(&self.c));
        let _ = writeln!(out, "cpp = {}", quote(&self.cpp));
        out.push('\n');

        out.push_str("[built-in options]\n");
        let _ = writeln!(out, "buildtype = {}", quote(&self.buildtype));
        let _ = writeln!(out, "default_library = {}", quote(&self.default_library));
        let _ = writeln!(out, "prefix = {}", quote(&self.prefix));
        let _ = writeln!(out, "libdir = {}", quote(&self.libdir));
        let _ = writeln!(out, "includedir = {}", quote(&self.includedir));
        out
    }
}

/// Meson string literal
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

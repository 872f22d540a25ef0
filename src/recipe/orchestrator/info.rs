// src/recipe/orchestrator/info.rs

//! Consumer-facing linkage metadata

use crate::recipe::format::PackageDescriptor;
use serde::{Deserialize, Serialize};

/// What downstream builds need to link against the package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerInfo {
    /// Library link names
    pub libs: Vec<String>,
    /// Include directories, relative to the package folder
    pub includedirs: Vec<String>,
    /// Library directories, relative to the package folder
    pub libdirs: Vec<String>,
}

impl ConsumerInfo {
    /// Describe a package: one library named exactly after the package
    pub fn describe(descriptor: &PackageDescriptor) -> Self {
        Self {
            libs: vec![descriptor.name.clone()],
            includedirs: vec!["include".to_string()],
            libdirs: vec!["lib".to_string()],
        }
    }

    /// Render a pkg-config file placed at `<package>/lib/pkgconfig/`
    pub fn pkg_config(&self, descriptor: &PackageDescriptor) -> String {
        let mut out = String::new();
        out.push_str("prefix=${pcfiledir}/../..\n");
        for (i, dir) in self.libdirs.iter().enumerate() {
            out.push_str(&format!("libdir{}=${{prefix}}/{}\n", suffix(i), dir));
        }
        for (i, dir) in self.includedirs.iter().enumerate() {
            out.push_str(&format!("includedir{}=${{prefix}}/{}\n", suffix(i), dir));
        }
        out.push('\n');

        out.push_str(&format!("Name: {}\n", descriptor.name));
        out.push_str(&format!(
            "Description: {}\n",
            descriptor.description.as_deref().unwrap_or(&descriptor.name)
        ));
        out.push_str(&format!("Version: {}\n", descriptor.version));

        let mut libs: Vec<String> = (0..self.libdirs.len())
            .map(|i| format!("-L${{libdir{}}}", suffix(i)))
            .collect();
        libs.extend(self.libs.iter().map(|l| format!("-l{}", l)));
        out.push_str(&format!("Libs: {}\n", libs.join(" ")));

        let cflags: Vec<String> = (0..self.includedirs.len())
            .map(|i| format!("-I${{includedir{}}}", suffix(i)))
            .collect();
        out.push_str(&format!("Cflags: {}\n", cflags.join(" ")));
        out
    }
}

fn suffix(i: usize) -> String {
    if i == 0 { String::new() } else { i.to_string() }
}

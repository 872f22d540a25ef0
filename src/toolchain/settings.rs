// src/toolchain/settings.rs

//! Host settings: os, arch, compiler and build type

use crate::error::{Error, Result};
use serde::Serialize;
use std::str::FromStr;
use strum_macros::{AsRefStr, Display, EnumString};

/// Build type, mapped onto Meson's `buildtype`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Display, EnumString, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BuildType {
    Debug,
    #[default]
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    /// Meson's spelling of this build type
    pub fn meson_buildtype(&self) -> &'static str {
        match self {
            BuildType::Debug => "debug",
            BuildType::Release => "release",
            BuildType::RelWithDebInfo => "debugoptimized",
            BuildType::MinSizeRel => "minsize",
        }
    }
}

/// Operating system family of the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum Os {
    Linux,
    Macos,
    Windows,
    FreeBSD,
}

/// Resolved settings for one build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    pub os: Os,
    pub arch: String,
    pub compiler: String,
    pub build_type: BuildType,
}

impl Settings {
    /// Detect settings from the running host
    ///
    /// The compiler comes from `CC` when set.
    pub fn detect() -> Self {
        let os = match std::env::consts::OS {
            "macos" => Os::Macos,
            "windows" => Os::Windows,
            "freebsd" => Os::FreeBSD,
            _ => Os::Linux,
        };

        let arch = match std::env::consts::ARCH {
            "aarch64" => "armv8".to_string(),
            "x86" => "x86".to_string(),
            other => other.to_string(),
        };

        let compiler = std::env::var("CC").ok().filter(|c| !c.is_empty()).unwrap_or_else(|| {
            match os {
                Os::Macos => "apple-clang",
                Os::Windows => "msvc",
                Os::FreeBSD => "clang",
                Os::Linux => "gcc",
            }
            .to_string()
        });

        Self {
            os,
            arch,
            compiler,
            build_type: BuildType::default(),
        }
    }

    /// Apply `name=value` overrides
    pub fn with_overrides(mut self, overrides: &[(String, String)]) -> Result<Self> {
        for (name, value) in overrides {
            match name.as_str() {
                "os" => {
                    self.os = Os::from_str(value)
                        .map_err(|_| Error::ParseError(format!("Unknown os '{}'", value)))?;
                }
                "arch" => self.arch = value.clone(),
                "compiler" => self.compiler = value.clone(),
                "build_type" => {
                    self.build_type = BuildType::from_str(value).map_err(|_| {
                        Error::ParseError(format!("Unknown build_type '{}'", value))
                    })?;
                }
                other => {
                    return Err(Error::ParseError(format!(
                        "Unknown setting '{}' (expected os, arch, compiler or build_type)",
                        other
                    )));
                }
            }
        }
        Ok(self)
    }

    /// C and C++ compiler executables for the native file
    pub fn compiler_binaries(&self) -> (String, String) {
        match self.compiler.as_str() {
            "gcc" => ("gcc".to_string(), "g++".to_string()),
            "clang" | "apple-clang" => ("clang".to_string(), "clang++".to_string()),
            "msvc" => ("cl".to_string(), "cl".to_string()),
            // An explicit path or name, e.g. from CC
            other => (other.to_string(), other.to_string()),
        }
    }
}

// src/recipe/format.rs

//! Recipe file format definitions
//!
//! A recipe is a TOML document describing one package release: who made
//! it, which build options it accepts, where its source lives, which
//! headers must end up in the package, and (optionally) shell commands
//! that replace the default action of a lifecycle stage.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::recipe::hooks::Hook;

/// A complete recipe for packaging a library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Package metadata
    pub package: PackageDescriptor,

    /// Build options and their allowed values
    #[serde(default)]
    pub options: BTreeMap<String, OptionSpec>,

    /// Version-control source settings
    #[serde(default)]
    pub source: SourceSection,

    /// Header copy rule applied after install
    #[serde(default)]
    pub headers: HeaderCopy,

    /// Stage overrides (at most one per stage)
    #[serde(default)]
    pub hooks: Vec<HookEntry>,
}

impl Recipe {
    /// Substitute variables in a string
    ///
    /// Replaces `%(name)s` patterns with recipe values. Unknown
    /// variables are left untouched.
    pub fn substitute(&self, template: &str, build_folder: &str, package_folder: &str) -> String {
        template
            .replace("%(name)s", &self.package.name)
            .replace("%(version)s", &self.package.version)
            .replace("%(url)s", &self.package.url)
            .replace("%(build_folder)s", build_folder)
            .replace("%(package_folder)s", package_folder)
    }

    /// The version-control tag for this release
    pub fn release_tag(&self) -> String {
        release_tag(&self.package.version)
    }

    /// Directory name a clone of `package.url` lands in
    pub fn clone_dir_name(&self) -> String {
        self.package
            .url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .map(|s| s.trim_end_matches(".git"))
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.package.name)
            .to_string()
    }
}

/// Tag name for a release version (`0.1.1` -> `v0.1.1`)
pub fn release_tag(version: &str) -> String {
    format!("v{}", version)
}

/// Package metadata section
///
/// Fixed for a given release; nothing in the lifecycle mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageDescriptor {
    /// Package name, also the library link name
    pub name: String,

    /// Release version (semver)
    pub version: String,

    /// License identifier (SPDX)
    #[serde(default)]
    pub license: Option<String>,

    /// Author and contact
    #[serde(default)]
    pub author: Option<String>,

    /// Upstream repository URL
    pub url: String,

    /// Human-readable description
    #[serde(default)]
    pub description: Option<String>,

    /// Topic tags
    #[serde(default)]
    pub topics: Vec<String>,

    /// Glob patterns exported alongside the recipe
    #[serde(default)]
    pub exports_sources: Vec<String>,
}

/// A single option value
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Str(String),
}

impl OptionValue {
    /// Parse a command-line value, accepting `True`/`False` spellings
    pub fn parse(raw: &str) -> Self {
        match raw {
            "true" | "True" | "TRUE" => OptionValue::Bool(true),
            "false" | "False" | "FALSE" => OptionValue::Bool(false),
            other => OptionValue::Str(other.to_string()),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            OptionValue::Str(_) => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Bool(b) => write!(f, "{}", b),
            OptionValue::Str(s) => f.write_str(s),
        }
    }
}

/// Allowed values and default for one build option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Value domain
    pub values: Vec<OptionValue>,

    /// Value used when nothing overrides it
    pub default: OptionValue,
}

/// Version-control source section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSection {
    /// Clone depth (0 = full history)
    #[serde(default = "default_depth")]
    pub depth: u32,
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            depth: default_depth(),
        }
    }
}

fn default_depth() -> u32 {
    1
}

/// Header copy rule
///
/// Guards against the build tool's install step omitting public headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderCopy {
    /// File name pattern
    #[serde(default = "default_header_pattern")]
    pub pattern: String,

    /// Directory under the source root holding the headers
    #[serde(default = "default_header_src")]
    pub src: String,

    /// Directory under the package folder receiving them
    #[serde(default = "default_header_dst")]
    pub dst: String,
}

impl Default for HeaderCopy {
    fn default() -> Self {
        Self {
            pattern: default_header_pattern(),
            src: default_header_src(),
            dst: default_header_dst(),
        }
    }
}

fn default_header_pattern() -> String {
    "*.h".to_string()
}

fn default_header_src() -> String {
    "code/logic/fossil/media".to_string()
}

fn default_header_dst() -> String {
    "include/fossil/media".to_string()
}

/// A shell command replacing one stage's default action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HookEntry {
    /// Stage the command belongs to
    pub stage: Hook,

    /// Shell command (supports `%(var)s` substitution)
    pub run: String,
}

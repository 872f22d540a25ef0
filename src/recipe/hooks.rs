// src/recipe/hooks.rs

//! Lifecycle hook table
//!
//! A recipe may replace the external-tool invocation of a stage with its
//! own shell command. Each stage accepts at most one handler; a second
//! registration is rejected when the recipe is loaded, never resolved by
//! letting the later one win.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use super::format::HookEntry;

/// Lifecycle stages, in execution order
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Hook {
    Layout,
    Source,
    Generate,
    Build,
    Package,
    PackageInfo,
}

impl Hook {
    /// Whether a recipe may override this stage with a command
    ///
    /// `layout` and `package_info` only compute in-memory values.
    pub fn accepts_command(&self) -> bool {
        !matches!(self, Hook::Layout | Hook::PackageInfo)
    }
}

/// At most one command per stage
#[derive(Debug, Clone, Default)]
pub struct HookTable {
    handlers: BTreeMap<Hook, String>,
}

impl HookTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from a recipe's `[[hooks]]` entries
    pub fn from_entries(entries: &[HookEntry]) -> Result<Self> {
        let mut table = Self::new();
        for entry in entries {
            table.register(entry.stage, &entry.run)?;
        }
        Ok(table)
    }

    /// Register a command for a stage
    pub fn register(&mut self, stage: Hook, command: &str) -> Result<()> {
        if !stage.accepts_command() {
            return Err(Error::ParseError(format!(
                "Stage '{}' cannot be overridden by a command",
                stage
            )));
        }
        if command.trim().is_empty() {
            return Err(Error::ParseError(format!(
                "Hook for stage '{}' has an empty command",
                stage
            )));
        }
        if self.handlers.contains_key(&stage) {
            return Err(Error::DuplicateHook(stage.to_string()));
        }
        self.handlers.insert(stage, command.to_string());
        Ok(())
    }

    /// The command registered for a stage, if any
    pub fn get(&self, stage: Hook) -> Option<&str> {
        self.handlers.get(&stage).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Registered stages in execution order
    pub fn stages(&self) -> impl Iterator<Item = Hook> + '_ {
        self.handlers.keys().copied()
    }
}

// src/recipe/options.rs

//! Build option resolution
//!
//! Options start at the recipe's declared defaults and may be overridden
//! from the command line. Every value is checked against the option's
//! domain before the lifecycle starts; the resolved set is immutable.

use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::BTreeMap;

use super::format::{OptionSpec, OptionValue};

/// Fully resolved build options
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BuildOptions {
    values: BTreeMap<String, OptionValue>,
}

impl BuildOptions {
    /// Resolve options from recipe declarations and overrides
    ///
    /// Overrides naming an undeclared option, or carrying a value outside
    /// the declared domain, are rejected.
    pub fn resolve(
        specs: &BTreeMap<String, OptionSpec>,
        overrides: &[(String, String)],
    ) -> Result<Self> {
        let mut values: BTreeMap<String, OptionValue> = specs
            .iter()
            .map(|(name, spec)| (name.clone(), spec.default.clone()))
            .collect();

        for (name, raw) in overrides {
            let spec = specs.get(name).ok_or_else(|| {
                Error::ParseError(format!(
                    "Unknown option '{}' (declared: {})",
                    name,
                    specs.keys().cloned().collect::<Vec<_>>().join(", ")
                ))
            })?;

            let value = OptionValue::parse(raw);
            if !spec.values.contains(&value) {
                return Err(Error::ParseError(format!(
                    "Invalid value '{}' for option '{}' (allowed: {})",
                    raw,
                    name,
                    spec.values
                        .iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                )));
            }
            values.insert(name.clone(), value);
        }

        Ok(Self { values })
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.get(name)
    }

    /// Whether a shared library is requested
    pub fn shared(&self) -> bool {
        self.get("shared").and_then(OptionValue::as_bool).unwrap_or(false)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &OptionValue)> {
        self.values.iter()
    }
}

/// Parse a `name=value` pair from the command line
pub fn parse_assignment(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw.split_once('=').ok_or_else(|| {
        Error::ParseError(format!("Expected name=value, got '{}'", raw))
    })?;
    let name = name.trim();
    let value = value.trim();
    if name.is_empty() || value.is_empty() {
        return Err(Error::ParseError(format!(
            "Expected name=value, got '{}'",
            raw
        )));
    }
    Ok((name.to_string(), value.to_string()))
}

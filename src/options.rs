// src/options.rs

//! Build option sets and cross-dependency propagation
//!
//! Options are recipe-declared boolean toggles (shared vs static
//! linking, position-independent code). They start at their declared
//! defaults, take consumer overrides, are conditioned for the target
//! platform (removal of options that are meaningless there), and may
//! propagate to dependency option sets before resolution. After the
//! configuration phase the set is frozen; nothing downstream mutates it.

use crate::error::{Error, Result};
use crate::recipe::{OptionDecl, Recipe};
use crate::settings::TargetOs;
use std::collections::BTreeMap;
use std::fmt;

/// The option set of one package during a cook
#[derive(Debug, Clone)]
pub struct OptionSet {
    package: String,
    declared: BTreeMap<String, OptionDecl>,
    values: BTreeMap<String, bool>,
}

impl OptionSet {
    /// Build an option set at declared defaults
    pub fn from_declarations(
        package: impl Into<String>,
        declarations: &BTreeMap<String, OptionDecl>,
    ) -> Self {
        let values = declarations
            .iter()
            .map(|(name, decl)| (name.clone(), decl.default))
            .collect();
        Self {
            package: package.into(),
            declared: declarations.clone(),
            values,
        }
    }

    /// Current value of an option, if present
    pub fn get(&self, name: &str) -> Option<bool> {
        self.values.get(name).copied()
    }

    /// Whether the option is currently present
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Override an option value
    ///
    /// Unknown names are errors; overriding an option that was removed
    /// for this platform is also an error.
    pub fn set(&mut self, name: &str, value: bool) -> Result<()> {
        if !self.values.contains_key(name) {
            return Err(Error::UnknownOption {
                package: self.package.clone(),
                option: name.to_string(),
            });
        }
        self.values.insert(name.to_string(), value);
        Ok(())
    }

    /// Remove an option if present; no error if absent
    pub fn remove_safe(&mut self, name: &str) {
        self.values.remove(name);
    }

    /// Condition the set for a target platform
    ///
    /// Removes every option whose declaration lists the target os in
    /// `remove_on`. Idempotent.
    pub fn configure_for(&mut self, os: TargetOs) {
        let doomed: Vec<String> = self
            .declared
            .iter()
            .filter(|(_, decl)| decl.remove_on.contains(&os))
            .map(|(name, _)| name.clone())
            .collect();
        for name in doomed {
            self.remove_safe(&name);
        }
    }

    /// Iterate over present options in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for OptionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        write!(f, "{}", rendered.join(", "))
    }
}

/// Options requested on dependencies before resolution
///
/// Filled by propagation rules (and nothing else); the resolver
/// validates each entry against the dependency's own declarations.
#[derive(Debug, Clone, Default)]
pub struct DependencyOptions {
    requested: BTreeMap<String, BTreeMap<String, bool>>,
}

impl DependencyOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request an option value on a dependency
    pub fn set(&mut self, dependency: &str, option: &str, value: bool) {
        self.requested
            .entry(dependency.to_string())
            .or_default()
            .insert(option.to_string(), value);
    }

    /// Requested value of an option on a dependency
    pub fn get(&self, dependency: &str, option: &str) -> Option<bool> {
        self.requested.get(dependency)?.get(option).copied()
    }

    /// All requested options for one dependency
    pub fn for_dependency(&self, dependency: &str) -> Option<&BTreeMap<String, bool>> {
        self.requested.get(dependency)
    }
}

/// Apply the recipe's propagation rules
///
/// A rule fires only when its option is present and true; a false or
/// removed option leaves the dependency untouched.
pub fn propagate_options(
    recipe: &Recipe,
    options: &OptionSet,
    deps: &mut DependencyOptions,
) {
    for rule in &recipe.propagate {
        if options.get(&rule.option) == Some(true) {
            deps.set(&rule.to, &rule.option, true);
        }
    }
}

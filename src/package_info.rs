// src/package_info.rs

//! Consumer-facing package description
//!
//! After a successful package step the cook publishes a descriptor
//! telling downstream consumers how to find and link the artifact:
//! the CMake package-discovery file name, the canonical target name,
//! the libraries to link, the include directory, and any system
//! libraries the target platform additionally requires. The descriptor
//! is purely derived data; producing it has no side effects on the
//! package tree beyond writing the JSON file.

use crate::error::{Error, Result};
use crate::recipe::Recipe;
use crate::settings::Settings;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Published description of a built package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageInfo {
    /// Package name
    pub name: String,

    /// Package version
    pub version: String,

    /// Name for the build system's package-discovery file
    pub cmake_file_name: String,

    /// Canonical link-target name
    pub cmake_target_name: String,

    /// Libraries consumers link against
    pub libs: Vec<String>,

    /// Include directories within the package tree
    pub includedirs: Vec<String>,

    /// System libraries required at link time on the target platform
    pub system_libs: Vec<String>,
}

impl PackageInfo {
    /// Derive the descriptor for a recipe cooked on the given settings
    ///
    /// The file and target names fall back to the package name and
    /// `name::name`. System libs are the recipe's entry for the target
    /// os; platforms without an entry get none.
    pub fn from_recipe(recipe: &Recipe, settings: &Settings) -> Self {
        let name = recipe.package.name.clone();
        let info = &recipe.package_info;

        let cmake_file_name = info.cmake_file_name.clone().unwrap_or_else(|| name.clone());
        let cmake_target_name = info
            .cmake_target_name
            .clone()
            .unwrap_or_else(|| format!("{}::{}", name, name));

        let system_libs = info
            .system_libs
            .get(&settings.os)
            .cloned()
            .unwrap_or_default();

        Self {
            name,
            version: recipe.package.version.clone(),
            cmake_file_name,
            cmake_target_name,
            libs: info.libs.clone(),
            includedirs: info.includedirs.clone(),
            system_libs,
        }
    }

    /// Write the descriptor as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::IoError(format!("Failed to serialize package info: {}", e)))?;
        std::fs::write(path, json)
            .map_err(|e| Error::IoError(format!("Failed to write {}: {}", path.display(), e)))?;
        Ok(())
    }

    /// Read a descriptor back from JSON
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::IoError(format!("Failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map_err(|e| Error::ParseError(format!("Invalid package info: {}", e)))
    }
}

// src/recipe/format.rs

//! Recipe file format definitions
//!
//! Recipes are TOML files that describe how to build and package a
//! CMake-based library: package metadata, build options, pinned
//! dependencies, forced cache definitions, and the package info the
//! built artifact exposes to consumers.

use crate::error::{Error, Result};
use crate::settings::TargetOs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// A complete recipe for building and packaging a library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Package metadata
    pub package: PackageSection,

    /// Source tree location
    #[serde(default)]
    pub source: SourceSection,

    /// Build option declarations, keyed by option name
    #[serde(default)]
    pub options: BTreeMap<String, OptionDecl>,

    /// Runtime and test-only requirements
    #[serde(default)]
    pub dependencies: DependencySection,

    /// Option propagation rules applied before dependency resolution
    #[serde(default)]
    pub propagate: Vec<PropagateRule>,

    /// Build configuration
    #[serde(default)]
    pub build: BuildSection,

    /// Consumer-facing package description
    pub package_info: PackageInfoSection,
}

impl Recipe {
    /// The `name/version` reference for this recipe
    pub fn reference(&self) -> String {
        format!("{}/{}", self.package.name, self.package.version)
    }

    /// Runtime requirements, in declaration order
    pub fn requires(&self) -> &[Requirement] {
        &self.dependencies.requires
    }

    /// Test-only requirements, never visible to consumers
    pub fn test_requires(&self) -> &[Requirement] {
        &self.dependencies.test_requires
    }

    /// Look up a runtime requirement by name
    pub fn find_requirement(&self, name: &str) -> Option<&Requirement> {
        self.dependencies.requires.iter().find(|r| r.name == name)
    }
}

/// Package metadata section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSection {
    /// Package name
    pub name: String,

    /// Package version
    pub version: String,

    /// Release number (for rebuilds of the same version)
    #[serde(default = "default_release")]
    pub release: String,

    /// License identifier (SPDX)
    #[serde(default)]
    pub license: Option<String>,

    /// Author
    #[serde(default)]
    pub author: Option<String>,

    /// Homepage URL
    #[serde(default)]
    pub homepage: Option<String>,

    /// Short description
    #[serde(default)]
    pub description: Option<String>,

    /// Topic tags for registry indexing
    #[serde(default)]
    pub topics: Vec<String>,
}

fn default_release() -> String {
    "1".to_string()
}

/// Source tree section
///
/// The path is resolved relative to the recipe file and must contain
/// the CMakeLists.txt the build consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSection {
    /// Source tree root, relative to the recipe file
    #[serde(default = "default_source_path")]
    pub path: PathBuf,
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            path: default_source_path(),
        }
    }
}

fn default_source_path() -> PathBuf {
    PathBuf::from(".")
}

/// Declaration of a single build option
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionDecl {
    /// Default value when the consumer does not override
    pub default: bool,

    /// Operating systems on which this option is removed during
    /// option configuration (e.g. fpic on Windows)
    #[serde(default)]
    pub remove_on: Vec<TargetOs>,
}

/// Requirement lists
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DependencySection {
    /// Runtime dependencies, linked into the produced package
    #[serde(default)]
    pub requires: Vec<Requirement>,

    /// Test-only dependencies
    ///
    /// Visible at build/test time only; never part of the consumer
    /// link surface and not resolved for packaging builds.
    #[serde(default)]
    pub test_requires: Vec<Requirement>,
}

/// A pinned requirement reference like `cpprestsdk/2.10.19`
///
/// Pins are exact versions; ranges are rejected at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Requirement {
    pub name: String,
    pub version: semver::Version,
}

impl Requirement {
    pub fn new(name: impl Into<String>, version: semver::Version) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }
}

impl FromStr for Requirement {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (name, version) = s.split_once('/').ok_or_else(|| {
            Error::ParseError(format!(
                "Invalid requirement '{}': expected name/version",
                s
            ))
        })?;
        if name.is_empty() {
            return Err(Error::ParseError(format!(
                "Invalid requirement '{}': empty name",
                s
            )));
        }
        let version = semver::Version::parse(version).map_err(|e| {
            Error::ParseError(format!("Invalid version in requirement '{}': {}", s, e))
        })?;
        Ok(Self {
            name: name.to_string(),
            version,
        })
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.name, self.version)
    }
}

impl TryFrom<String> for Requirement {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<Requirement> for String {
    fn from(r: Requirement) -> Self {
        r.to_string()
    }
}

/// Option propagation rule
///
/// When the named option is true on the package being cooked, the
/// same-named option is set to true on the dependency before
/// resolution. Resolution fails if the dependency does not declare it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropagateRule {
    /// Option on this package
    pub option: String,

    /// Dependency receiving the option
    pub to: String,
}

/// Build configuration section
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BuildSection {
    /// Cache variables forced at configure time
    ///
    /// The shipped recipe uses these to disable the test and demo
    /// targets so packaging never needs the test-only dependencies.
    #[serde(default)]
    pub definitions: BTreeMap<String, String>,

    /// Environment variables set for every build-tool invocation
    #[serde(default)]
    pub environment: BTreeMap<String, String>,
}

/// Consumer-facing package description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageInfoSection {
    /// Name for the build system's package-discovery file
    #[serde(default)]
    pub cmake_file_name: Option<String>,

    /// Canonical link-target name
    #[serde(default)]
    pub cmake_target_name: Option<String>,

    /// Libraries consumers link against
    #[serde(default)]
    pub libs: Vec<String>,

    /// Include directories within the package tree
    #[serde(default = "default_includedirs")]
    pub includedirs: Vec<String>,

    /// Additional system libraries, keyed by operating system
    #[serde(default)]
    pub system_libs: BTreeMap<TargetOs, Vec<String>>,
}

fn default_includedirs() -> Vec<String> {
    vec!["include".to_string()]
}

// src/lib.rs

//! galley - recipe-driven builder and packager for CMake-based C++ libraries
//!
//! A recipe declares what to package: metadata, build options, pinned
//! requirements, forced cache definitions, and the info the built
//! package exposes to consumers. galley conditions the options for the
//! target platform, propagates options across dependencies, resolves
//! pins against a local dependency store, generates the dependency and
//! toolchain description files, drives cmake through configure, build,
//! and install, and publishes the package descriptor.
//!
//! # Architecture
//!
//! - Declarative recipes: all build parameterization in one TOML file
//! - Delegation-only: compilation and linking belong to cmake
//! - Linear lifecycle: each cook phase is terminal on failure
//! - Frozen configuration: options are merged once, before resolution,
//!   and never mutated afterwards

pub mod cli;
pub mod cmake;
pub mod commands;
mod error;
pub mod kitchen;
pub mod options;
pub mod package_info;
pub mod recipe;
pub mod resolver;
pub mod settings;

pub use error::{Error, Result};
pub use kitchen::{CookResult, InstallManifest, Kitchen, KitchenConfig};
pub use options::{DependencyOptions, OptionSet, propagate_options};
pub use package_info::PackageInfo;
pub use recipe::{Recipe, Requirement, parse_recipe, parse_recipe_file, validate_recipe};
pub use resolver::{ResolvedDependency, Resolver};
pub use settings::{Arch, BuildType, Compiler, Settings, TargetOs};

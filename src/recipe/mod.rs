// src/recipe/mod.rs

//! Recipe system for building and packaging CMake-based libraries
//!
//! Recipes define how to turn a source tree into a consumable package:
//! - Package metadata (name, version, license, topics)
//! - Build options and their per-platform conditioning
//! - Pinned runtime and test-only requirements
//! - Cache definitions forced at configure time
//! - The package info published to consumers
//!
//! The recipe itself contains no build logic. Everything that compiles
//! or links is delegated to CMake; the recipe only parameterizes those
//! invocations and describes the result.
//!
//! # Example Recipe
//!
//! ```toml
//! [package]
//! name = "influxdb-cpp-rest"
//! version = "1.0.1"
//! license = "MPL-2.0"
//!
//! [options.shared]
//! default = false
//!
//! [dependencies]
//! requires = ["cpprestsdk/2.10.19", "rxcpp/4.1.1"]
//! test_requires = ["catch2/3.11.0"]
//!
//! [build]
//! definitions = { BUILD_TESTING = "OFF", BUILD_DEMO = "OFF" }
//!
//! [package_info]
//! libs = ["influxdb-cpp-rest"]
//! ```

mod format;
pub mod parser;

pub use format::{
    BuildSection, DependencySection, OptionDecl, PackageInfoSection, PackageSection,
    PropagateRule, Recipe, Requirement, SourceSection,
};
pub use parser::{parse_recipe, parse_recipe_file, validate_recipe};

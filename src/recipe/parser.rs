// src/recipe/parser.rs

//! Recipe file parsing

use crate::error::{Error, Result};
use crate::recipe::format::Recipe;
use std::collections::BTreeSet;
use std::path::Path;

/// Parse a recipe from a TOML string
pub fn parse_recipe(content: &str) -> Result<Recipe> {
    toml::from_str(content).map_err(|e| Error::ParseError(format!("Invalid recipe: {}", e)))
}

/// Parse a recipe from a file
pub fn parse_recipe_file(path: &Path) -> Result<Recipe> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::IoError(format!("Failed to read recipe file: {}", e)))?;

    parse_recipe(&content)
}

/// Validate a recipe for completeness and correctness
///
/// Hard inconsistencies are errors; stylistic gaps come back as warnings.
pub fn validate_recipe(recipe: &Recipe) -> Result<Vec<String>> {
    let mut warnings = Vec::new();

    if recipe.package.name.is_empty() {
        return Err(Error::ParseError(
            "Recipe package name cannot be empty".to_string(),
        ));
    }
    if recipe.package.version.is_empty() {
        return Err(Error::ParseError(
            "Recipe package version cannot be empty".to_string(),
        ));
    }
    if semver::Version::parse(&recipe.package.version).is_err() {
        return Err(Error::ParseError(format!(
            "Recipe package version '{}' is not a valid semantic version",
            recipe.package.version
        )));
    }

    // No requirement may appear twice, or as both runtime and test-only
    let mut seen = BTreeSet::new();
    for req in recipe.requires() {
        if !seen.insert(req.name.as_str()) {
            return Err(Error::ParseError(format!(
                "Duplicate requirement: {}",
                req.name
            )));
        }
    }
    for req in recipe.test_requires() {
        if !seen.insert(req.name.as_str()) {
            return Err(Error::ParseError(format!(
                "Requirement {} is declared both runtime and test-only",
                req.name
            )));
        }
    }

    // Propagation rules must name a declared option and a runtime dependency
    for rule in &recipe.propagate {
        if !recipe.options.contains_key(&rule.option) {
            return Err(Error::ParseError(format!(
                "Propagate rule references undeclared option '{}'",
                rule.option
            )));
        }
        if recipe.find_requirement(&rule.to).is_none() {
            return Err(Error::ParseError(format!(
                "Propagate rule targets '{}' which is not a runtime requirement",
                rule.to
            )));
        }
    }

    if recipe.package.license.is_none() {
        warnings.push("Missing package license".to_string());
    }
    if recipe.package.description.is_none() {
        warnings.push("Missing package description".to_string());
    }
    if recipe.package_info.libs.is_empty() {
        warnings.push("package_info declares no libraries to link".to_string());
    }

    Ok(warnings)
}

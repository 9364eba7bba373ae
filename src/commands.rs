// src/commands.rs

//! Command implementations for the galley CLI

use crate::kitchen::{Kitchen, KitchenConfig};
use crate::package_info::PackageInfo;
use crate::recipe::{parse_recipe_file, validate_recipe};
use crate::settings::Settings;
use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Settings axes as given on the command line
pub struct SettingsArgs {
    pub os: Option<String>,
    pub arch: Option<String>,
    pub compiler: Option<String>,
    pub build_type: Option<String>,
}

impl SettingsArgs {
    /// Host settings with the given axes overridden
    pub fn resolve(&self) -> Result<Settings> {
        let mut settings = Settings::host()?;
        if let Some(os) = &self.os {
            settings.os = os.parse()?;
        }
        if let Some(arch) = &self.arch {
            settings.arch = arch.parse()?;
        }
        if let Some(compiler) = &self.compiler {
            settings.compiler = Some(compiler.parse()?);
        }
        if let Some(build_type) = &self.build_type {
            settings.build_type = build_type.parse()?;
        }
        Ok(settings)
    }
}

/// Parse `name=value` option overrides from the command line
pub fn parse_option_overrides(raw: &[String]) -> Result<Vec<(String, bool)>> {
    let mut overrides = Vec::with_capacity(raw.len());
    for spec in raw {
        let Some((name, value)) = spec.split_once('=') else {
            bail!("Invalid option override '{}': expected NAME=VALUE", spec);
        };
        let value = match value.to_ascii_lowercase().as_str() {
            "true" | "on" | "1" => true,
            "false" | "off" | "0" => false,
            other => bail!(
                "Invalid value '{}' for option '{}': expected true or false",
                other,
                name
            ),
        };
        overrides.push((name.to_string(), value));
    }
    Ok(overrides)
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_cook(
    recipe_path: &Path,
    output: PathBuf,
    deps_root: PathBuf,
    settings_args: &SettingsArgs,
    raw_options: &[String],
    cmake: String,
    generator: Option<String>,
    jobs: Option<u32>,
    keep_builddir: bool,
) -> Result<()> {
    let recipe = parse_recipe_file(recipe_path)
        .with_context(|| format!("Failed to load {}", recipe_path.display()))?;
    let recipe_dir = recipe_dir(recipe_path);
    let settings = settings_args.resolve()?;
    let overrides = parse_option_overrides(raw_options)?;

    let mut config = KitchenConfig {
        deps_root,
        cmake_program: cmake,
        generator,
        keep_builddir,
        ..KitchenConfig::default()
    };
    if let Some(jobs) = jobs {
        config.jobs = jobs;
    }

    let result = Kitchen::new(config).cook(&recipe, &recipe_dir, &settings, &overrides, &output)?;

    for warning in &result.warnings {
        warn!("{}", warning);
    }
    info!("Packaged {} into {}", recipe.reference(), result.package_dir.display());
    println!("{}", result.package_dir.display());
    Ok(())
}

pub fn cmd_info(recipe_path: &Path, settings_args: &SettingsArgs) -> Result<()> {
    let recipe = parse_recipe_file(recipe_path)
        .with_context(|| format!("Failed to load {}", recipe_path.display()))?;
    let settings = settings_args.resolve()?;

    let info = PackageInfo::from_recipe(&recipe, &settings);
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

pub fn cmd_validate(recipe_path: &Path) -> Result<()> {
    let recipe = parse_recipe_file(recipe_path)
        .with_context(|| format!("Failed to load {}", recipe_path.display()))?;

    let warnings = validate_recipe(&recipe)?;
    for warning in &warnings {
        warn!("{}", warning);
    }
    println!(
        "{}: ok ({} warnings)",
        recipe.reference(),
        warnings.len()
    );
    Ok(())
}

fn recipe_dir(recipe_path: &Path) -> PathBuf {
    recipe_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

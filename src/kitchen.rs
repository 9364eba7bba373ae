// src/kitchen.rs

//! Kitchen: where recipes are cooked into packages
//!
//! The Kitchen drives the linear cook lifecycle:
//! option configuration -> option propagation -> requirement
//! resolution -> layout -> generation -> build -> package -> info.
//! Each phase is terminal on failure; a failed cook is retried from
//! the start after fixing the cause. All compilation is delegated to
//! cmake; the Kitchen only sequences and parameterizes it.

use crate::cmake::{CMake, Layout, write_deps_file, write_toolchain_file};
use crate::error::{Error, Result};
use crate::options::{DependencyOptions, OptionSet, propagate_options};
use crate::package_info::PackageInfo;
use crate::recipe::{Recipe, validate_recipe};
use crate::resolver::{ResolvedDependency, Resolver};
use crate::settings::Settings;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info};
use walkdir::WalkDir;

/// Configuration for the Kitchen
#[derive(Debug, Clone)]
pub struct KitchenConfig {
    /// Root of the local dependency store
    pub deps_root: PathBuf,
    /// cmake executable to invoke
    pub cmake_program: String,
    /// Explicit cmake generator (-G), if any
    pub generator: Option<String>,
    /// Number of parallel build jobs
    pub jobs: u32,
    /// Keep the build directory after completion (for debugging)
    pub keep_builddir: bool,
}

impl Default for KitchenConfig {
    fn default() -> Self {
        let jobs = std::thread::available_parallelism()
            .map(|p| p.get() as u32)
            .unwrap_or(4);

        Self {
            deps_root: PathBuf::from("/var/lib/galley/deps"),
            cmake_program: "cmake".to_string(),
            generator: None,
            jobs,
            keep_builddir: false,
        }
    }
}

/// Result of cooking a recipe
#[derive(Debug)]
pub struct CookResult {
    /// Directory the package was installed into
    pub package_dir: PathBuf,
    /// Build tree root, present only when keep_builddir was set
    pub build_root: Option<PathBuf>,
    /// Published package description
    pub info: PackageInfo,
    /// Accumulated cmake output
    pub log: String,
    /// Recipe validation warnings
    pub warnings: Vec<String>,
}

/// Manifest written next to the installed files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallManifest {
    pub name: String,
    pub version: String,
    pub release: String,
    pub settings: Settings,
    pub built_at: DateTime<Utc>,
    /// Installed files, relative to the package dir, sorted
    pub files: Vec<String>,
}

/// The Kitchen: where recipes are cooked
pub struct Kitchen {
    config: KitchenConfig,
}

impl Kitchen {
    /// Create a new Kitchen with the given configuration
    pub fn new(config: KitchenConfig) -> Self {
        Self { config }
    }

    /// Create a Kitchen with default configuration
    pub fn with_defaults() -> Self {
        Self::new(KitchenConfig::default())
    }

    /// Cook a recipe into an installed package
    ///
    /// `recipe_dir` anchors the recipe's relative source path;
    /// `overrides` are consumer option overrides; the package lands in
    /// `output_dir/<name>-<version>`.
    pub fn cook(
        &self,
        recipe: &Recipe,
        recipe_dir: &Path,
        settings: &Settings,
        overrides: &[(String, bool)],
        output_dir: &Path,
    ) -> Result<CookResult> {
        info!("Cooking {} for {}", recipe.reference(), settings);
        let warnings = validate_recipe(recipe)?;

        let mut cook = Cook::new(self, recipe, recipe_dir, settings, output_dir)?;

        cook.configure_options(overrides)?;
        cook.configure();

        info!("Resolving requirements...");
        cook.resolve_requirements()?;

        cook.layout()?;
        cook.generate()?;

        info!("Building...");
        cook.build()?;

        info!("Packaging...");
        cook.package()?;
        let info = cook.publish_info()?;

        let log = cook.cmake.take_log();
        let package_dir = cook.layout.package_dir.clone();
        let build_root = if self.config.keep_builddir {
            let path = cook.work.into_path();
            info!("Keeping build directory {}", path.display());
            Some(path)
        } else {
            None
        };

        Ok(CookResult {
            package_dir,
            build_root,
            info,
            log,
            warnings,
        })
    }
}

/// A single cook operation
struct Cook<'a> {
    kitchen: &'a Kitchen,
    recipe: &'a Recipe,
    settings: &'a Settings,
    /// Temporary build tree
    work: TempDir,
    layout: Layout,
    options: OptionSet,
    dep_options: DependencyOptions,
    resolved: Vec<ResolvedDependency>,
    cmake: CMake,
}

impl<'a> Cook<'a> {
    fn new(
        kitchen: &'a Kitchen,
        recipe: &'a Recipe,
        recipe_dir: &Path,
        settings: &'a Settings,
        output_dir: &Path,
    ) -> Result<Self> {
        let work = TempDir::new()
            .map_err(|e| Error::IoError(format!("Failed to create build directory: {}", e)))?;

        let source_dir = recipe_dir.join(&recipe.source.path);
        if !source_dir.is_dir() {
            return Err(Error::NotFound(format!(
                "Source directory {} does not exist",
                source_dir.display()
            )));
        }

        let package_dir = output_dir.join(format!(
            "{}-{}",
            recipe.package.name, recipe.package.version
        ));
        let layout = Layout::new(source_dir, work.path(), package_dir, settings.build_type);

        let options = OptionSet::from_declarations(&recipe.package.name, &recipe.options);
        let cmake = CMake::new(kitchen.config.cmake_program.as_str(), kitchen.config.jobs)
            .with_generator(kitchen.config.generator.clone())
            .with_environment(recipe.build.environment.clone());

        Ok(Self {
            kitchen,
            recipe,
            settings,
            work,
            layout,
            options,
            dep_options: DependencyOptions::new(),
            resolved: Vec::new(),
            cmake,
        })
    }

    /// Phase 1: apply consumer overrides, condition options for the os
    fn configure_options(&mut self, overrides: &[(String, bool)]) -> Result<()> {
        for (name, value) in overrides {
            self.options.set(name, *value)?;
        }
        self.options.configure_for(self.settings.os);
        debug!("Options: {}", self.options);
        Ok(())
    }

    /// Phase 2: propagate options to dependencies
    ///
    /// The option set is frozen after this point.
    fn configure(&mut self) {
        propagate_options(self.recipe, &self.options, &mut self.dep_options);
    }

    /// Phase 3: resolve runtime requirements
    ///
    /// Test-only requirements are skipped entirely: the forced build
    /// definitions disable the targets that would need them, so a
    /// packaging cook succeeds even where they are not resolvable.
    fn resolve_requirements(&mut self) -> Result<()> {
        for req in self.recipe.test_requires() {
            debug!("Skipping test-only requirement {} for packaging", req);
        }

        let resolver = Resolver::new(&self.kitchen.config.deps_root);
        self.resolved = resolver.resolve(self.recipe.requires(), &self.dep_options)?;
        Ok(())
    }

    /// Phase 4: establish the directory layout
    fn layout(&mut self) -> Result<()> {
        self.layout.create()
    }

    /// Phase 5: emit the dependency and toolchain description files
    fn generate(&mut self) -> Result<()> {
        write_deps_file(&self.layout.deps_file(), &self.resolved)?;
        write_toolchain_file(&self.layout.toolchain_file(), self.settings, &self.options)
    }

    /// Phase 6: configure and build
    fn build(&mut self) -> Result<()> {
        self.cmake
            .configure(&self.layout, &self.recipe.build.definitions)?;
        self.cmake.build(&self.layout)
    }

    /// Phase 7: install into the package dir and write the manifest
    fn package(&mut self) -> Result<()> {
        self.cmake.install(&self.layout)?;

        let files = installed_files(&self.layout.package_dir)?;
        if files.is_empty() {
            return Err(Error::NothingInstalled);
        }

        let manifest = InstallManifest {
            name: self.recipe.package.name.clone(),
            version: self.recipe.package.version.clone(),
            release: self.recipe.package.release.clone(),
            settings: *self.settings,
            built_at: Utc::now(),
            files,
        };
        let json = serde_json::to_string_pretty(&manifest)
            .map_err(|e| Error::IoError(format!("Failed to serialize manifest: {}", e)))?;
        fs::write(self.layout.package_dir.join("manifest.json"), json)?;
        Ok(())
    }

    /// Phase 8: publish the consumer-facing descriptor
    fn publish_info(&self) -> Result<PackageInfo> {
        let info = PackageInfo::from_recipe(self.recipe, self.settings);
        info.save(&self.layout.package_dir.join("package_info.json"))?;
        Ok(info)
    }
}

/// Installed files relative to the package dir, sorted
fn installed_files(package_dir: &Path) -> Result<Vec<String>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(package_dir) {
        let entry = entry.map_err(|e| Error::IoError(format!("Failed to walk package: {}", e)))?;
        if entry.file_type().is_file() {
            let relative = entry
                .path()
                .strip_prefix(package_dir)
                .unwrap_or(entry.path());
            files.push(relative.display().to_string());
        }
    }
    files.sort();
    Ok(files)
}

// src/cmake/layout.rs

//! Canonical directory layout for one cook
//!
//! Conventions understood by the generators and the cmake driver:
//!
//! ```text
//! <work>/build/<BuildType>/   out-of-source build tree
//! <work>/build/generators/    generated deps + toolchain files
//! <package dir>               install destination
//! ```

use crate::error::Result;
use crate::settings::BuildType;
use std::fs;
use std::path::{Path, PathBuf};

const DEPS_FILE: &str = "galley_deps.cmake";
const TOOLCHAIN_FILE: &str = "galley_toolchain.cmake";

/// Resolved directories for one cook
#[derive(Debug, Clone)]
pub struct Layout {
    /// Source tree containing CMakeLists.txt
    pub source_dir: PathBuf,
    /// Out-of-source build tree
    pub build_dir: PathBuf,
    /// Directory for generated build-description files
    pub generators_dir: PathBuf,
    /// Install destination
    pub package_dir: PathBuf,
}

impl Layout {
    pub fn new(
        source_dir: impl Into<PathBuf>,
        work_dir: &Path,
        package_dir: impl Into<PathBuf>,
        build_type: BuildType,
    ) -> Self {
        let build_root = work_dir.join("build");
        Self {
            source_dir: source_dir.into(),
            build_dir: build_root.join(build_type.as_cmake()),
            generators_dir: build_root.join("generators"),
            package_dir: package_dir.into(),
        }
    }

    /// Create the build, generators, and package directories
    pub fn create(&self) -> Result<()> {
        fs::create_dir_all(&self.build_dir)?;
        fs::create_dir_all(&self.generators_dir)?;
        fs::create_dir_all(&self.package_dir)?;
        Ok(())
    }

    pub fn deps_file(&self) -> PathBuf {
        self.generators_dir.join(DEPS_FILE)
    }

    pub fn toolchain_file(&self) -> PathBuf {
        self.generators_dir.join(TOOLCHAIN_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_layout_paths() {
        let work = TempDir::new().unwrap();
        let layout = Layout::new(
            "/src/project",
            work.path(),
            work.path().join("package"),
            BuildType::Release,
        );

        assert_eq!(layout.build_dir, work.path().join("build/Release"));
        assert_eq!(layout.generators_dir, work.path().join("build/generators"));
        assert!(layout.deps_file().ends_with("galley_deps.cmake"));
        assert!(layout.toolchain_file().ends_with("galley_toolchain.cmake"));
    }

    #[test]
    fn test_create_dirs() {
        let work = TempDir::new().unwrap();
        let layout = Layout::new(
            "/src/project",
            work.path(),
            work.path().join("package"),
            BuildType::Debug,
        );

        layout.create().unwrap();
        assert!(layout.build_dir.is_dir());
        assert!(layout.generators_dir.is_dir());
        assert!(layout.package_dir.is_dir());
    }
}

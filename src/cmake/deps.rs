// src/cmake/deps.rs

//! Dependency description file generation
//!
//! One imported interface target per resolved dependency, pointing at
//! the installed tree in the dependency root. The file is included
//! from the generated toolchain, so resolved locations reach the
//! project without touching its CMakeLists.txt.

use crate::error::{Error, Result};
use crate::resolver::ResolvedDependency;
use std::fmt::Write as _;
use std::path::Path;

/// Render the dependency file contents
pub fn render_deps(deps: &[ResolvedDependency]) -> String {
    let mut out = String::new();
    out.push_str("# Generated by galley - do not edit\n");

    for dep in deps {
        let target = format!("{}::{}", dep.name, dep.name);
        let _ = writeln!(out, "\n# {}/{}", dep.name, dep.version);
        if !dep.options.is_empty() {
            let rendered: Vec<String> = dep
                .options
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect();
            let _ = writeln!(out, "# options: {}", rendered.join(", "));
        }
        let _ = writeln!(out, "if(NOT TARGET {})", target);
        let _ = writeln!(out, "  add_library({} INTERFACE IMPORTED)", target);
        let _ = writeln!(
            out,
            "  set_target_properties({} PROPERTIES\n    INTERFACE_INCLUDE_DIRECTORIES \"{}\")",
            target,
            dep.include_dir().display()
        );
        if dep.lib_dir().is_dir() {
            let _ = writeln!(
                out,
                "  target_link_directories({} INTERFACE \"{}\")",
                target,
                dep.lib_dir().display()
            );
        }
        let _ = writeln!(out, "endif()");
        let _ = writeln!(
            out,
            "list(APPEND CMAKE_PREFIX_PATH \"{}\")",
            dep.root.display()
        );
    }

    out
}

/// Write the dependency file into the layout's generators directory
pub fn write_deps_file(path: &Path, deps: &[ResolvedDependency]) -> Result<()> {
    std::fs::write(path, render_deps(deps))
        .map_err(|e| Error::IoError(format!("Failed to write {}: {}", path.display(), e)))
}

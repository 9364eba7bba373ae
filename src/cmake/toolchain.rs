// src/cmake/toolchain.rs

//! Toolchain file generation
//!
//! The toolchain file carries everything platform- and
//! configuration-shaped into the cmake run: build type, shared vs
//! static linking, position-independent code, and compiler hints. It
//! also includes the generated dependency file so a single
//! `-DCMAKE_TOOLCHAIN_FILE=` argument activates both.

use crate::error::{Error, Result};
use crate::options::OptionSet;
use crate::settings::Settings;
use std::fmt::Write as _;
use std::path::Path;

/// Render the toolchain file contents
pub fn render_toolchain(settings: &Settings, options: &OptionSet) -> String {
    let mut out = String::new();

    out.push_str("# Generated by galley - do not edit\n");
    let _ = writeln!(
        out,
        "set(CMAKE_BUILD_TYPE \"{}\" CACHE STRING \"Build type\")",
        settings.build_type.as_cmake()
    );

    if let Some(shared) = options.get("shared") {
        let _ = writeln!(
            out,
            "set(BUILD_SHARED_LIBS {} CACHE BOOL \"Build shared libraries\")",
            on_off(shared)
        );
    }

    // Absent when the option was removed for this platform
    if let Some(fpic) = options.get("fpic") {
        let _ = writeln!(
            out,
            "set(CMAKE_POSITION_INDEPENDENT_CODE {} CACHE BOOL \"Position independent code\")",
            on_off(fpic)
        );
    }

    if let Some((cc, cxx)) = settings.compiler.and_then(|c| c.executables()) {
        let _ = writeln!(out, "set(CMAKE_C_COMPILER {})", cc);
        let _ = writeln!(out, "set(CMAKE_CXX_COMPILER {})", cxx);
    }

    out.push_str("include(\"${CMAKE_CURRENT_LIST_DIR}/galley_deps.cmake\")\n");

    out
}

/// Write the toolchain file into the layout's generators directory
pub fn write_toolchain_file(
    path: &Path,
    settings: &Settings,
    options: &OptionSet,
) -> Result<()> {
    std::fs::write(path, render_toolchain(settings, options))
        .map_err(|e| Error::IoError(format!("Failed to write {}: {}", path.display(), e)))
}

fn on_off(value: bool) -> &'static str {
    if value { "ON" } else { "OFF" }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::parse_recipe;
    use crate::settings::{Arch, BuildType, Compiler, TargetOs};

    fn options(os: TargetOs) -> OptionSet {
        let recipe = parse_recipe(
            r#"
[package]
name = "test"
version = "1.0.0"

[options.shared]
default = false

[options.fpic]
default = true
remove_on = ["windows"]

[package_info]
libs = ["test"]
"#,
        )
        .unwrap();
        let mut set = OptionSet::from_declarations("test", &recipe.options);
        set.configure_for(os);
        set
    }

    #[test]
    fn test_render_linux_defaults() {
        let settings = Settings::new(TargetOs::Linux, Arch::X86_64, BuildType::Release);
        let rendered = render_toolchain(&settings, &options(TargetOs::Linux));

        assert!(rendered.contains("set(CMAKE_BUILD_TYPE \"Release\""));
        assert!(rendered.contains("set(BUILD_SHARED_LIBS OFF"));
        assert!(rendered.contains("set(CMAKE_POSITION_INDEPENDENT_CODE ON"));
        assert!(rendered.contains("galley_deps.cmake"));
    }

    #[test]
    fn test_render_windows_no_fpic() {
        let settings = Settings::new(TargetOs::Windows, Arch::X86_64, BuildType::Release);
        let rendered = render_toolchain(&settings, &options(TargetOs::Windows));

        assert!(!rendered.contains("CMAKE_POSITION_INDEPENDENT_CODE"));
        assert!(rendered.contains("set(BUILD_SHARED_LIBS OFF"));
    }

    #[test]
    fn test_render_compiler_hints() {
        let settings = Settings::new(TargetOs::Linux, Arch::X86_64, BuildType::Debug)
            .with_compiler(Compiler::Clang);
        let rendered = render_toolchain(&settings, &options(TargetOs::Linux));

        assert!(rendered.contains("set(CMAKE_C_COMPILER clang)"));
        assert!(rendered.contains("set(CMAKE_CXX_COMPILER clang++)"));
        assert!(rendered.contains("set(CMAKE_BUILD_TYPE \"Debug\""));
    }
}

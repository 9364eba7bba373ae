// tests/common/mod.rs

//! Shared helpers for integration tests: stub dependency stores, a
//! recorder cmake script, and a sample project tree.

use std::fs;
use std::path::{Path, PathBuf};

pub const RECIPE: &str = r#"
[package]
name = "influxdb-cpp-rest"
version = "1.0.1"
license = "MPL-2.0"
description = "A C++ client library for InfluxDB using C++ REST SDK"

[source]
path = "."

[options.shared]
default = false

[options.fpic]
default = true
remove_on = ["windows"]

[dependencies]
requires = ["cpprestsdk/2.10.19", "rxcpp/4.1.1"]
test_requires = ["catch2/3.11.0"]

[[propagate]]
option = "shared"
to = "cpprestsdk"

[build]
definitions = { BUILD_TESTING = "OFF", BUILD_DEMO = "OFF" }

[package_info]
cmake_file_name = "influxdb-cpp-rest"
cmake_target_name = "influxdb-cpp-rest::influxdb-cpp-rest"
libs = ["influxdb-cpp-rest"]
includedirs = ["include"]

[package_info.system_libs]
linux = ["pthread"]
"#;

/// Write the sample recipe plus a minimal source tree, returning the
/// recipe path
pub fn write_project(dir: &Path) -> PathBuf {
    let recipe_path = dir.join("recipe.toml");
    fs::write(&recipe_path, RECIPE).unwrap();
    fs::write(dir.join("CMakeLists.txt"), "project(influxdb-cpp-rest)\n").unwrap();
    recipe_path
}

/// Populate a dependency root with the runtime pins
///
/// catch2 is deliberately absent: packaging cooks must succeed
/// without it. cpprestsdk declares a `shared` option only when
/// `cpprest_options` is set.
pub fn stub_deps_root(root: &Path, cpprest_options: bool) {
    let cpprestsdk = root.join("cpprestsdk/2.10.19");
    fs::create_dir_all(cpprestsdk.join("include")).unwrap();
    fs::create_dir_all(cpprestsdk.join("lib")).unwrap();
    if cpprest_options {
        fs::write(
            cpprestsdk.join("options.toml"),
            "[options.shared]\ndefault = false\n",
        )
        .unwrap();
    }

    let rxcpp = root.join("rxcpp/4.1.1");
    fs::create_dir_all(rxcpp.join("include")).unwrap();
}

/// Write a recorder cmake stub
///
/// Appends every invocation's arguments to `<dir>/args.log`. When
/// `install` is set, the `--install` step populates the `--prefix`
/// tree the way a real install would.
#[cfg(unix)]
pub fn fake_cmake(dir: &Path, install: bool) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let install_block = if install {
        r#"
if [ "$seen_install" = 1 ] && [ -n "$prefix" ]; then
  mkdir -p "$prefix/include/influxdb-cpp-rest" "$prefix/lib"
  printf 'header\n' > "$prefix/include/influxdb-cpp-rest/influxdb_simple_api.h"
  printf 'archive\n' > "$prefix/lib/libinfluxdb-cpp-rest.a"
fi
"#
    } else {
        ""
    };

    let script = format!(
        r#"#!/bin/sh
echo "$@" >> "{}/args.log"
prefix=""
prev=""
seen_install=0
for a in "$@"; do
  [ "$a" = "--install" ] && seen_install=1
  [ "$prev" = "--prefix" ] && prefix="$a"
  prev="$a"
done
{}exit 0
"#,
        dir.display(),
        install_block
    );

    let path = dir.join("cmake-stub");
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// Read the recorded cmake invocations
pub fn recorded_args(dir: &Path) -> String {
    fs::read_to_string(dir.join("args.log")).unwrap_or_default()
}

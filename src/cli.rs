// src/cli.rs

//! CLI definitions for galley
//!
//! This module contains all command-line interface definitions using
//! clap. The actual command implementations are in the `commands`
//! module.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "galley")]
#[command(author = "Galley Project")]
#[command(version)]
#[command(about = "Recipe-driven builder and packager for CMake-based C++ libraries", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Cook a recipe: build the source tree and install the package
    Cook {
        /// Path to the recipe file
        recipe: PathBuf,

        /// Directory the package is installed under
        #[arg(short = 'O', long, default_value = "out")]
        output: PathBuf,

        /// Root of the local dependency store
        #[arg(long, default_value = "/var/lib/galley/deps")]
        deps_root: PathBuf,

        /// Target operating system (default: host)
        #[arg(long)]
        os: Option<String>,

        /// Target architecture (default: host)
        #[arg(long)]
        arch: Option<String>,

        /// Compiler family (default: let cmake discover)
        #[arg(long)]
        compiler: Option<String>,

        /// Build type (default: release)
        #[arg(long)]
        build_type: Option<String>,

        /// Override a recipe option, e.g. -o shared=true (repeatable)
        #[arg(short = 'o', long = "option", value_name = "NAME=VALUE")]
        options: Vec<String>,

        /// cmake executable to invoke
        #[arg(long, default_value = "cmake")]
        cmake: String,

        /// Explicit cmake generator (-G)
        #[arg(short = 'G', long)]
        generator: Option<String>,

        /// Number of parallel build jobs (default: all cores)
        #[arg(short, long)]
        jobs: Option<u32>,

        /// Keep the build directory after completion
        #[arg(long)]
        keep_builddir: bool,
    },

    /// Print the package info a cook on these settings would publish
    Info {
        /// Path to the recipe file
        recipe: PathBuf,

        /// Target operating system (default: host)
        #[arg(long)]
        os: Option<String>,

        /// Target architecture (default: host)
        #[arg(long)]
        arch: Option<String>,

        /// Build type (default: release)
        #[arg(long)]
        build_type: Option<String>,
    },

    /// Parse and validate a recipe, printing any warnings
    Validate {
        /// Path to the recipe file
        recipe: PathBuf,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

// src/error.rs

//! Error types for galley

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing recipes or cooking packages
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid recipe, requirement, or settings syntax
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Filesystem or subprocess I/O failure
    #[error("I/O error: {0}")]
    IoError(String),

    /// A referenced file, directory, or entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// An option was set or propagated that the target package does not declare
    #[error("Package '{package}' does not expose option '{option}'")]
    UnknownOption { package: String, option: String },

    /// A pinned requirement could not be located in the dependency root
    #[error("Dependency '{name}/{version}' not found in dependency root")]
    DependencyMissing { name: String, version: String },

    /// The underlying build tool exited non-zero
    #[error("cmake {step} failed with exit code {code}")]
    BuildStep { step: String, code: i32 },

    /// The install step produced no files
    #[error("Install produced no files - build may not have run or defines no install targets")]
    NothingInstalled,
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::IoError(e.to_string())
    }
}

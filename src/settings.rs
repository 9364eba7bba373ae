// src/settings.rs

//! Build settings supplied by the invoking environment
//!
//! Settings are the four environment axes a cook is parameterized by:
//! operating system, compiler, build type, and architecture. They are
//! read-only inputs; recipes never set them. Values not given on the
//! command line fall back to host detection.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetOs {
    Linux,
    Windows,
    Macos,
    FreeBsd,
}

impl TargetOs {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetOs::Linux => "linux",
            TargetOs::Windows => "windows",
            TargetOs::Macos => "macos",
            TargetOs::FreeBsd => "freebsd",
        }
    }
}

impl FromStr for TargetOs {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "linux" => Ok(TargetOs::Linux),
            "windows" => Ok(TargetOs::Windows),
            "macos" | "darwin" => Ok(TargetOs::Macos),
            "freebsd" => Ok(TargetOs::FreeBsd),
            other => Err(Error::ParseError(format!(
                "Unknown operating system: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for TargetOs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Compiler family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Compiler {
    Gcc,
    Clang,
    Msvc,
    AppleClang,
}

impl Compiler {
    pub fn as_str(&self) -> &'static str {
        match self {
            Compiler::Gcc => "gcc",
            Compiler::Clang => "clang",
            Compiler::Msvc => "msvc",
            Compiler::AppleClang => "apple-clang",
        }
    }

    /// C and C++ compiler executables for this family, if unambiguous
    pub fn executables(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Compiler::Gcc => Some(("gcc", "g++")),
            Compiler::Clang => Some(("clang", "clang++")),
            // MSVC and Apple clang are located by CMake itself
            Compiler::Msvc | Compiler::AppleClang => None,
        }
    }
}

impl FromStr for Compiler {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "gcc" => Ok(Compiler::Gcc),
            "clang" => Ok(Compiler::Clang),
            "msvc" => Ok(Compiler::Msvc),
            "apple-clang" | "appleclang" => Ok(Compiler::AppleClang),
            other => Err(Error::ParseError(format!("Unknown compiler: {}", other))),
        }
    }
}

impl fmt::Display for Compiler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// CMake build type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BuildType {
    Debug,
    #[default]
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    /// The value CMake expects in CMAKE_BUILD_TYPE
    pub fn as_cmake(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
            BuildType::RelWithDebInfo => "RelWithDebInfo",
            BuildType::MinSizeRel => "MinSizeRel",
        }
    }
}

impl FromStr for BuildType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(BuildType::Debug),
            "release" => Ok(BuildType::Release),
            "relwithdebinfo" => Ok(BuildType::RelWithDebInfo),
            "minsizerel" => Ok(BuildType::MinSizeRel),
            other => Err(Error::ParseError(format!("Unknown build type: {}", other))),
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_cmake())
    }
}

/// Target architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    X86_64,
    Aarch64,
    X86,
    Armv7,
}

impl Arch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::Aarch64 => "aarch64",
            Arch::X86 => "x86",
            Arch::Armv7 => "armv7",
        }
    }
}

impl FromStr for Arch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "x86_64" | "amd64" => Ok(Arch::X86_64),
            "aarch64" | "arm64" => Ok(Arch::Aarch64),
            "x86" | "i686" => Ok(Arch::X86),
            "armv7" => Ok(Arch::Armv7),
            other => Err(Error::ParseError(format!(
                "Unknown architecture: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Complete settings for one cook invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub os: TargetOs,
    pub arch: Arch,
    pub build_type: BuildType,
    #[serde(default)]
    pub compiler: Option<Compiler>,
}

impl Settings {
    pub fn new(os: TargetOs, arch: Arch, build_type: BuildType) -> Self {
        Self {
            os,
            arch,
            build_type,
            compiler: None,
        }
    }

    /// Detect settings from the running host
    ///
    /// Build type defaults to Release; the compiler is left for CMake
    /// to discover unless set explicitly.
    pub fn host() -> Result<Self> {
        let os = std::env::consts::OS.parse()?;
        let arch = std::env::consts::ARCH.parse()?;
        Ok(Self::new(os, arch, BuildType::Release))
    }

    pub fn with_compiler(mut self, compiler: Compiler) -> Self {
        self.compiler = Some(compiler);
        self
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.os, self.arch, self.build_type)?;
        if let Some(compiler) = &self.compiler {
            write!(f, "/{}", compiler)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_os() {
        assert_eq!("linux".parse::<TargetOs>().unwrap(), TargetOs::Linux);
        assert_eq!("Windows".parse::<TargetOs>().unwrap(), TargetOs::Windows);
        assert_eq!("darwin".parse::<TargetOs>().unwrap(), TargetOs::Macos);
        assert!("beos".parse::<TargetOs>().is_err());
    }

    #[test]
    fn test_parse_build_type() {
        assert_eq!("release".parse::<BuildType>().unwrap(), BuildType::Release);
        assert_eq!(
            "RelWithDebInfo".parse::<BuildType>().unwrap(),
            BuildType::RelWithDebInfo
        );
        assert_eq!(BuildType::RelWithDebInfo.as_cmake(), "RelWithDebInfo");
        assert!("fastest".parse::<BuildType>().is_err());
    }

    #[test]
    fn test_parse_arch_aliases() {
        assert_eq!("amd64".parse::<Arch>().unwrap(), Arch::X86_64);
        assert_eq!("arm64".parse::<Arch>().unwrap(), Arch::Aarch64);
    }

    #[test]
    fn test_settings_display() {
        let settings = Settings::new(TargetOs::Linux, Arch::X86_64, BuildType::Release)
            .with_compiler(Compiler::Gcc);
        assert_eq!(settings.to_string(), "linux/x86_64/Release/gcc");
    }

    #[test]
    fn test_host_settings() {
        // Should succeed on any platform the test suite runs on
        let settings = Settings::host().unwrap();
        assert_eq!(settings.build_type, BuildType::Release);
        assert!(settings.compiler.is_none());
    }
}

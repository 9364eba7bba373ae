// src/cmake/invoke.rs

//! cmake subprocess driver
//!
//! Wraps the configure, build, and install invocations. Output is
//! captured into a running log; a non-zero exit from any step is fatal
//! to the cook, with no retry.

use crate::cmake::Layout;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::process::Command;
use tracing::{debug, error, info};

/// Driver for one cook's cmake invocations
#[derive(Debug)]
pub struct CMake {
    program: String,
    generator: Option<String>,
    jobs: u32,
    environment: BTreeMap<String, String>,
    log: String,
}

impl CMake {
    pub fn new(program: impl Into<String>, jobs: u32) -> Self {
        Self {
            program: program.into(),
            generator: None,
            jobs,
            environment: BTreeMap::new(),
            log: String::new(),
        }
    }

    pub fn with_generator(mut self, generator: Option<String>) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_environment(mut self, environment: BTreeMap<String, String>) -> Self {
        self.environment = environment;
        self
    }

    /// Configure step: toolchain file plus forced cache definitions
    pub fn configure(
        &mut self,
        layout: &Layout,
        definitions: &BTreeMap<String, String>,
    ) -> Result<()> {
        let mut args = vec![
            "-S".to_string(),
            layout.source_dir.display().to_string(),
            "-B".to_string(),
            layout.build_dir.display().to_string(),
            format!(
                "-DCMAKE_TOOLCHAIN_FILE={}",
                layout.toolchain_file().display()
            ),
        ];
        if let Some(generator) = &self.generator {
            args.push("-G".to_string());
            args.push(generator.clone());
        }
        for (key, value) in definitions {
            args.push(format!("-D{}={}", key, value));
        }

        self.run("configure", &args)
    }

    /// Build step
    pub fn build(&mut self, layout: &Layout) -> Result<()> {
        let args = vec![
            "--build".to_string(),
            layout.build_dir.display().to_string(),
            "--parallel".to_string(),
            self.jobs.to_string(),
        ];

        self.run("build", &args)
    }

    /// Install step into the package directory
    pub fn install(&mut self, layout: &Layout) -> Result<()> {
        let args = vec![
            "--install".to_string(),
            layout.build_dir.display().to_string(),
            "--prefix".to_string(),
            layout.package_dir.display().to_string(),
        ];

        self.run("install", &args)
    }

    /// Accumulated output of all steps so far
    pub fn take_log(&mut self) -> String {
        std::mem::take(&mut self.log)
    }

    fn run(&mut self, step: &str, args: &[String]) -> Result<()> {
        info!("Running cmake {} step", step);
        debug!("Command: {} {}", self.program, args.join(" "));

        let output = Command::new(&self.program)
            .args(args)
            .envs(&self.environment)
            .output()
            .map_err(|e| Error::IoError(format!("Failed to run cmake {}: {}", step, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        self.log.push_str(&format!("=== {} ===\n", step));
        if !stdout.is_empty() {
            self.log.push_str(&stdout);
            self.log.push('\n');
        }
        if !stderr.is_empty() {
            self.log.push_str(&stderr);
            self.log.push('\n');
        }

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            error!("cmake {} failed ({}): {}", step, code, stderr.trim_end());
            return Err(Error::BuildStep {
                step: step.to_string(),
                code,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::BuildType;
    use std::fs;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn stub_cmake(dir: &std::path::Path, exit_code: i32) -> String {
        use std::os::unix::fs::PermissionsExt;

        let script = dir.join("cmake-stub");
        fs::write(
            &script,
            format!(
                "#!/bin/sh\necho \"$@\" >> \"{}/args.log\"\nexit {}\n",
                dir.display(),
                exit_code
            ),
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        script.display().to_string()
    }

    fn layout(work: &TempDir) -> Layout {
        let layout = Layout::new(
            work.path().join("src"),
            work.path(),
            work.path().join("package"),
            BuildType::Release,
        );
        layout.create().unwrap();
        layout
    }

    #[test]
    #[cfg(unix)]
    fn test_configure_args() {
        let work = TempDir::new().unwrap();
        let layout = layout(&work);
        let mut cmake = CMake::new(stub_cmake(work.path(), 0), 4);

        let mut defs = BTreeMap::new();
        defs.insert("BUILD_TESTING".to_string(), "OFF".to_string());
        defs.insert("BUILD_DEMO".to_string(), "OFF".to_string());
        cmake.configure(&layout, &defs).unwrap();

        let recorded = fs::read_to_string(work.path().join("args.log")).unwrap();
        assert!(recorded.contains("-DBUILD_TESTING=OFF"));
        assert!(recorded.contains("-DBUILD_DEMO=OFF"));
        assert!(recorded.contains("-DCMAKE_TOOLCHAIN_FILE="));
    }

    #[test]
    #[cfg(unix)]
    fn test_build_and_install_args() {
        let work = TempDir::new().unwrap();
        let layout = layout(&work);
        let mut cmake = CMake::new(stub_cmake(work.path(), 0), 8);

        cmake.build(&layout).unwrap();
        cmake.install(&layout).unwrap();

        let recorded = fs::read_to_string(work.path().join("args.log")).unwrap();
        assert!(recorded.contains("--parallel 8"));
        assert!(recorded.contains("--install"));
        assert!(recorded.contains("--prefix"));
    }

    #[test]
    #[cfg(unix)]
    fn test_nonzero_exit_is_fatal() {
        let work = TempDir::new().unwrap();
        let layout = layout(&work);
        let mut cmake = CMake::new(stub_cmake(work.path(), 3), 1);

        let err = cmake.build(&layout).unwrap_err();
        assert!(matches!(
            err,
            Error::BuildStep { ref step, code: 3 } if step == "build"
        ));
    }

    #[test]
    fn test_missing_program() {
        let work = TempDir::new().unwrap();
        let layout = layout(&work);
        let mut cmake = CMake::new("/nonexistent/galley-cmake", 1);

        assert!(cmake.build(&layout).is_err());
    }
}

// src/resolver.rs

//! Pinned dependency resolution against a local dependency root
//!
//! The dependency root is a directory store laid out as
//! `<root>/<name>/<version>/` with the dependency's installed tree
//! (`include/`, `lib/`) and an optional `options.toml` declaring the
//! options that package exposes. Resolution is exact-pin lookup, no
//! version selection. Network fetch and version negotiation belong to
//! whatever populated the root; this component only consumes it.

use crate::error::{Error, Result};
use crate::options::DependencyOptions;
use crate::recipe::{OptionDecl, Requirement};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Option declarations shipped with an installed dependency
#[derive(Debug, Clone, Deserialize, Default)]
struct DependencyManifest {
    #[serde(default)]
    options: BTreeMap<String, OptionDecl>,
}

/// A requirement located in the dependency root
#[derive(Debug, Clone)]
pub struct ResolvedDependency {
    pub name: String,
    pub version: semver::Version,
    /// Installed tree of this dependency
    pub root: PathBuf,
    /// Effective option values after propagation
    pub options: BTreeMap<String, bool>,
}

impl ResolvedDependency {
    pub fn include_dir(&self) -> PathBuf {
        self.root.join("include")
    }

    pub fn lib_dir(&self) -> PathBuf {
        self.root.join("lib")
    }
}

/// Exact-pin resolver over a dependency root directory
#[derive(Debug, Clone)]
pub struct Resolver {
    root: PathBuf,
}

impl Resolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve requirements, applying requested dependency options
    ///
    /// Every requirement must be present at its exact version. A
    /// requested option a dependency does not declare is an error
    /// (this is where a shared-linkage propagation to a dependency
    /// without a `shared` option surfaces).
    pub fn resolve(
        &self,
        requirements: &[Requirement],
        requested: &DependencyOptions,
    ) -> Result<Vec<ResolvedDependency>> {
        let mut resolved = Vec::with_capacity(requirements.len());

        for req in requirements {
            let dir = self.root.join(&req.name).join(req.version.to_string());
            if !dir.is_dir() {
                return Err(Error::DependencyMissing {
                    name: req.name.clone(),
                    version: req.version.to_string(),
                });
            }

            let manifest = read_manifest(&dir)?;
            let mut options: BTreeMap<String, bool> = manifest
                .options
                .iter()
                .map(|(name, decl)| (name.clone(), decl.default))
                .collect();

            if let Some(wanted) = requested.for_dependency(&req.name) {
                for (name, value) in wanted {
                    if !manifest.options.contains_key(name) {
                        return Err(Error::UnknownOption {
                            package: req.name.clone(),
                            option: name.clone(),
                        });
                    }
                    options.insert(name.clone(), *value);
                }
            }

            debug!("Resolved {} at {}", req, dir.display());
            resolved.push(ResolvedDependency {
                name: req.name.clone(),
                version: req.version.clone(),
                root: dir,
                options,
            });
        }

        Ok(resolved)
    }
}

fn read_manifest(dir: &Path) -> Result<DependencyManifest> {
    let path = dir.join("options.toml");
    if !path.exists() {
        return Ok(DependencyManifest::default());
    }
    let content = std::fs::read_to_string(&path)
        .map_err(|e| Error::IoError(format!("Failed to read {}: {}", path.display(), e)))?;
    toml::from_str(&content).map_err(|e| {
        Error::ParseError(format!("Invalid options.toml in {}: {}", dir.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn stub_store() -> TempDir {
        let store = TempDir::new().unwrap();

        let cpprestsdk = store.path().join("cpprestsdk/2.10.19");
        fs::create_dir_all(cpprestsdk.join("include")).unwrap();
        fs::create_dir_all(cpprestsdk.join("lib")).unwrap();
        fs::write(
            cpprestsdk.join("options.toml"),
            "[options.shared]\ndefault = false\n",
        )
        .unwrap();

        let rxcpp = store.path().join("rxcpp/4.1.1");
        fs::create_dir_all(rxcpp.join("include")).unwrap();
        // Header-only: no lib dir, no options.toml

        store
    }

    fn requirements() -> Vec<Requirement> {
        vec![
            "cpprestsdk/2.10.19".parse().unwrap(),
            "rxcpp/4.1.1".parse().unwrap(),
        ]
    }

    #[test]
    fn test_resolve_pins() {
        let store = stub_store();
        let resolver = Resolver::new(store.path());

        let resolved = resolver
            .resolve(&requirements(), &DependencyOptions::new())
            .unwrap();

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].name, "cpprestsdk");
        assert_eq!(resolved[0].options.get("shared"), Some(&false));
        assert!(resolved[0].include_dir().is_dir());
        assert_eq!(resolved[1].name, "rxcpp");
        assert!(resolved[1].options.is_empty());
    }

    #[test]
    fn test_resolve_missing_version() {
        let store = stub_store();
        let resolver = Resolver::new(store.path());

        let reqs: Vec<Requirement> = vec!["cpprestsdk/2.10.18".parse().unwrap()];
        let err = resolver
            .resolve(&reqs, &DependencyOptions::new())
            .unwrap_err();
        assert!(matches!(err, Error::DependencyMissing { .. }));
    }

    #[test]
    fn test_propagated_option_applied() {
        let store = stub_store();
        let resolver = Resolver::new(store.path());

        let mut requested = DependencyOptions::new();
        requested.set("cpprestsdk", "shared", true);

        let resolved = resolver.resolve(&requirements(), &requested).unwrap();
        assert_eq!(resolved[0].options.get("shared"), Some(&true));
    }

    #[test]
    fn test_propagated_option_not_declared() {
        let store = stub_store();
        let resolver = Resolver::new(store.path());

        // rxcpp ships no options.toml, so it exposes no options at all
        let mut requested = DependencyOptions::new();
        requested.set("rxcpp", "shared", true);

        let err = resolver.resolve(&requirements(), &requested).unwrap_err();
        assert!(matches!(
            err,
            Error::UnknownOption { ref package, .. } if package == "rxcpp"
        ));
    }
}

//! Process-local repository.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::traits::Repository;
use crate::error::{FigError, Result};
use crate::package::Package;

/// Repository that keeps packages in memory
///
/// Used by tests and by callers that assemble package graphs programmatically.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    packages: RwLock<HashMap<(String, String), Arc<Package>>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-populated with packages
    pub fn with_packages(packages: impl IntoIterator<Item = Package>) -> Self {
        let map = packages
            .into_iter()
            .map(|pkg| ((pkg.name.clone(), pkg.version.clone()), Arc::new(pkg)))
            .collect();
        Self {
            packages: RwLock::new(map),
        }
    }

    /// Number of stored package versions
    pub fn len(&self) -> usize {
        self.packages.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Repository for MemoryRepository {
    fn read_package(&self, name: &str, version: &str) -> Result<Arc<Package>> {
        let packages = self
            .packages
            .read()
            .map_err(|_| FigError::Repository("memory repository lock poisoned".to_string()))?;

        packages
            .get(&(name.to_string(), version.to_string()))
            .cloned()
            .ok_or_else(|| FigError::package_not_found(name, version))
    }

    fn write_package(&self, package: &Package) -> Result<()> {
        let mut packages = self
            .packages
            .write()
            .map_err(|_| FigError::Repository("memory repository lock poisoned".to_string()))?;

        log::trace!("Storing {}/{} in memory", package.name, package.version);
        packages.insert(
            (package.name.clone(), package.version.clone()),
            Arc::new(package.clone()),
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}

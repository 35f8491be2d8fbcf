//! Repository trait shared by every package store.

use std::sync::Arc;

use crate::error::{FigError, Result};
use crate::package::Package;

/// Read and write access to package records keyed by name and version
///
/// Lookups are synchronous and deterministic. Implementations must be safe for
/// concurrent reads so that independent plans can share one repository.
pub trait Repository: Send + Sync {
    /// Get a package by exact name and version
    ///
    /// Fails with [`FigError::PackageNotFound`] when no such version is stored.
    fn read_package(&self, name: &str, version: &str) -> Result<Arc<Package>>;

    /// Store a package under its own name and version, replacing any previous
    /// record for that version
    fn write_package(&self, package: &Package) -> Result<()>;

    /// Check whether a version is stored
    fn has_package(&self, name: &str, version: &str) -> Result<bool> {
        match self.read_package(name, version) {
            Ok(_) => Ok(true),
            Err(FigError::PackageNotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Human readable repository name for diagnostics
    fn name(&self) -> &str;
}

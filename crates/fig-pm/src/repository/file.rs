//! On-disk repository.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::traits::Repository;
use crate::error::{FigError, Result};
use crate::package::Package;

/// File name of the package record inside a version directory
pub const PACKAGE_FILE: &str = "package.json";

/// Repository that stores one JSON record per package version
///
/// Layout:
///
/// ```text
/// <root>/
///     foo/
///         1.2.3/package.json
///         1.2.4/package.json
///     bar/
///         4.5.6/package.json
/// ```
#[derive(Debug, Clone)]
pub struct FileRepository {
    root: PathBuf,
    name: String,
}

impl FileRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let name = format!("file repository {}", root.display());
        Self { root, name }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the record for one package version
    pub fn package_path(&self, name: &str, version: &str) -> Result<PathBuf> {
        validate_component("package name", name)?;
        validate_component("version", version)?;
        Ok(self.root.join(name).join(version).join(PACKAGE_FILE))
    }
}

impl Repository for FileRepository {
    fn read_package(&self, name: &str, version: &str) -> Result<Arc<Package>> {
        let path = self.package_path(name, version)?;
        if !path.is_file() {
            return Err(FigError::package_not_found(name, version));
        }

        log::trace!("Reading {}", path.display());
        let content = fs::read_to_string(&path)?;
        let package: Package = serde_json::from_str(&content)?;

        if package.name != name || package.version != version {
            return Err(FigError::InvalidPackage {
                message: format!(
                    "{} declares {}/{} but is stored as {}/{}",
                    path.display(),
                    package.name,
                    package.version,
                    name,
                    version
                ),
            });
        }

        Ok(Arc::new(package))
    }

    fn write_package(&self, package: &Package) -> Result<()> {
        let path = self.package_path(&package.name, &package.version)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        log::debug!("Writing {}", path.display());
        let json = serde_json::to_string_pretty(package)?;
        fs::write(&path, json)?;

        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Reject names that would escape the repository root
fn validate_component(kind: &str, value: &str) -> Result<()> {
    let invalid = value.is_empty()
        || value == "."
        || value == ".."
        || value.contains('/')
        || value.contains('\\')
        || value.contains('\0');

    if invalid {
        return Err(FigError::InvalidPackage {
            message: format!("invalid {} \"{}\"", kind, value),
        });
    }
    Ok(())
}

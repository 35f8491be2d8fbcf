use serde::{Deserialize, Serialize};
use std::fmt;

use super::Descriptor;

/// A declared dependency from one config onto another package's config
///
/// An include has the same shape as a [`Descriptor`] but names a dependency that
/// has not been resolved yet. The version is always pinned exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Include {
    /// Target package name
    pub package: String,
    /// Exact target version
    pub version: String,
    /// Target config name
    pub config: String,
}

impl Include {
    pub fn new(
        package: impl Into<String>,
        version: impl Into<String>,
        config: impl Into<String>,
    ) -> Self {
        Self {
            package: package.into(),
            version: version.into(),
            config: config.into(),
        }
    }

    /// The descriptor this include resolves to
    pub fn descriptor(&self) -> Descriptor {
        Descriptor::new(&self.package, &self.version, &self.config)
    }
}

impl From<&Include> for Descriptor {
    fn from(include: &Include) -> Self {
        include.descriptor()
    }
}

impl fmt::Display for Include {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "include {}/{}:{}", self.package, self.version, self.config)
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one configuration of one package version
///
/// Descriptors are compared structurally: two descriptors are equal when the
/// package, version and config names all match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Descriptor {
    /// Package name
    pub package: String,
    /// Exact version name
    pub version: String,
    /// Config name within the package version
    pub config: String,
}

impl Descriptor {
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

    /// Returns the `package/version` part without the config
    pub fn package_ref(&self) -> String {
        format!("{}/{}", self.package, self.version)
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.package, self.version, self.config)
    }
}

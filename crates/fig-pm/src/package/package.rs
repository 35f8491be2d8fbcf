use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{Config, Descriptor};

/// A single version of a package and its named configs
///
/// Packages are immutable snapshots handed out by a repository. Configs keep
/// their declaration order so that printing a package reproduces its definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Package name
    pub name: String,
    /// Version name, equal to the key the package is stored under
    pub version: String,
    /// Configs keyed by name
    #[serde(default)]
    pub configs: IndexMap<String, Config>,
}

impl Package {
    /// Creates a package from its configs
    ///
    /// Config names are unique; a later config with the same name replaces an
    /// earlier one in place.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        configs: impl IntoIterator<Item = Config>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            configs: configs
                .into_iter()
                .map(|config| (config.name.clone(), config))
                .collect(),
        }
    }

    /// Looks up a config by name
    pub fn config(&self, name: &str) -> Option<&Config> {
        self.configs.get(name)
    }

    /// Config names in declaration order
    pub fn config_names(&self) -> impl Iterator<Item = &str> {
        self.configs.keys().map(|k| k.as_str())
    }

    /// Descriptor for one of this package's configs
    pub fn descriptor(&self, config: &str) -> Descriptor {
        Descriptor::new(&self.name, &self.version, config)
    }
}

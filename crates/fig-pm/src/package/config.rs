use serde::{Deserialize, Serialize};

use super::Include;

/// A named list of includes within one package version
///
/// Include order is significant: the planner visits includes in declaration
/// order, which determines the order of the resulting plan. Duplicate includes
/// are allowed and resolve to the same plan entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Config name
    pub name: String,
    /// Includes in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub includes: Vec<Include>,
}

impl Config {
    pub fn new(name: impl Into<String>, includes: impl IntoIterator<Item = Include>) -> Self {
        Self {
            name: name.into(),
            includes: includes.into_iter().collect(),
        }
    }

    /// A config with no includes
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }
}

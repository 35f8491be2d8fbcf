use serde::{Deserialize, Serialize};
use std::fmt;

use crate::package::Descriptor;

/// One inclusion path through a plan
///
/// The first entry is the node the backtrace was taken for; each following
/// entry is the descriptor that included the previous one, ending at the root
/// of the plan.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Backtrace {
    descriptors: Vec<Descriptor>,
}

impl Backtrace {
    /// Build a backtrace for `node` reached through `path` (root first)
    pub fn from_path(node: &Descriptor, path: &[Descriptor]) -> Self {
        let descriptors = std::iter::once(node)
            .chain(path.iter().rev())
            .cloned()
            .collect();
        Self { descriptors }
    }

    /// The descriptor the backtrace starts at
    pub fn head(&self) -> Option<&Descriptor> {
        self.descriptors.first()
    }

    /// The plan root the backtrace ends at
    pub fn root(&self) -> Option<&Descriptor> {
        self.descriptors.last()
    }

    pub fn as_slice(&self) -> &[Descriptor] {
        &self.descriptors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Descriptor> {
        self.descriptors.iter()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

impl From<Vec<Descriptor>> for Backtrace {
    fn from(descriptors: Vec<Descriptor>) -> Self {
        Self { descriptors }
    }
}

impl<'a> IntoIterator for &'a Backtrace {
    type Item = &'a Descriptor;
    type IntoIter = std::slice::Iter<'a, Descriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.iter()
    }
}

impl fmt::Display for Backtrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, desc) in self.descriptors.iter().enumerate() {
            if i > 0 {
                write!(f, " <- ")?;
            }
            write!(f, "{}", desc)?;
        }
        Ok(())
    }
}

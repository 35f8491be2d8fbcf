use serde::{Deserialize, Serialize};
use std::fmt;

use super::Backtrace;

/// The same package was required at two or more versions
///
/// Holds one backtrace per distinct version seen for the package. The most
/// recently discovered version comes first; the path that first committed the
/// package comes last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionConflictError {
    /// Name of the package required at several versions
    pub package: String,
    /// Inclusion paths, newest first
    pub backtraces: Vec<Backtrace>,
}

impl VersionConflictError {
    pub fn new(package: impl Into<String>, backtraces: Vec<Backtrace>) -> Self {
        Self {
            package: package.into(),
            backtraces,
        }
    }

    /// Distinct versions in backtrace order
    pub fn versions(&self) -> Vec<&str> {
        self.backtraces
            .iter()
            .filter_map(|bt| bt.head())
            .map(|desc| desc.version.as_str())
            .collect()
    }
}

impl fmt::Display for VersionConflictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "version conflict for package \"{}\":", self.package)?;
        for backtrace in &self.backtraces {
            write!(f, "\n  {}", backtrace)?;
        }
        Ok(())
    }
}

impl std::error::Error for VersionConflictError {}

/// A config transitively includes itself
///
/// The path starts at the descriptor that was reached a second time and walks
/// back through its includers to the plan root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleError {
    pub path: Backtrace,
}

impl fmt::Display for CycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cyclic include detected: {}", self.path)
    }
}

impl std::error::Error for CycleError {}

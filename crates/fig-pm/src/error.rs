use thiserror::Error;

use crate::plan::{CycleError, VersionConflictError};

#[derive(Error, Debug)]
pub enum FigError {
    // Lookup errors
    #[error("Package not found: {name}/{version}")]
    PackageNotFound { name: String, version: String },

    #[error("Config not found: {name}/{version}:{config}")]
    ConfigNotFound {
        name: String,
        version: String,
        config: String,
    },

    // Planner errors
    #[error(transparent)]
    VersionConflict(#[from] VersionConflictError),

    #[error(transparent)]
    Cycle(#[from] CycleError),

    // Repository errors
    #[error("Invalid package: {message}")]
    InvalidPackage { message: String },

    #[error("Repository error: {0}")]
    Repository(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse package metadata: {0}")]
    Json(#[from] serde_json::Error),
}

impl FigError {
    pub fn package_not_found(name: &str, version: &str) -> Self {
        FigError::PackageNotFound {
            name: name.to_string(),
            version: version.to_string(),
        }
    }

    /// True for both a missing package and a missing config
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            FigError::PackageNotFound { .. } | FigError::ConfigNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FigError>;

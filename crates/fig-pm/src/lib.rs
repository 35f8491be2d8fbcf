//! Package model, repositories and dependency planner for fig.
//!
//! A package version declares named configs, and each config lists pinned
//! includes of other package configs. The [`Planner`] turns a root
//! [`Descriptor`] into the ordered list of configs that have to be built,
//! reporting missing packages, include cycles and version conflicts.

pub mod error;
pub mod package;
pub mod plan;
pub mod repository;

pub use error::{FigError, Result};
pub use package::{Config, Descriptor, Include, Package, DEFAULT_CONFIG};
pub use plan::{Backtrace, CycleError, Planner, VersionConflictError};
pub use repository::{FileRepository, MemoryRepository, Repository};

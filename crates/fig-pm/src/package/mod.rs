// Package model for fig
//
// This module provides the value types the planner works on: descriptors naming
// a single package configuration, packages with their named configs, and the
// include edges between them.

mod config;
mod descriptor;
mod include;
mod package;

pub use config::Config;
pub use descriptor::Descriptor;
pub use include::Include;
pub use package::Package;

/// Config name used when a reference does not name one
pub const DEFAULT_CONFIG: &str = "default";

//! Dependency planner.
//!
//! Computes the ordered, deduplicated set of package configurations needed to
//! build a root descriptor. The traversal is depth-first in include declaration
//! order and emits every descriptor after all of its includes (post-order), so
//! the resulting list is a valid build order.
//!
//! A package may only be bound to one version per plan. The first path that
//! reaches a package commits its version; any later path that asks for another
//! version is recorded as a conflict and not expanded further. Conflicts are
//! reported once the traversal finishes, with one [`Backtrace`] per distinct
//! version.

mod backtrace;
mod conflict;

#[cfg(test)]
mod tests;

pub use backtrace::Backtrace;
pub use conflict::{CycleError, VersionConflictError};

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};

use crate::error::{FigError, Result};
use crate::package::Descriptor;
use crate::repository::Repository;

/// Resolves root descriptors into build plans
pub struct Planner {
    repository: Arc<dyn Repository>,
}

/// Version a package was first bound to and the path that bound it
struct Commitment {
    version: String,
    backtrace: Backtrace,
}

/// Mutable state of a single `plan` call
#[derive(Default)]
struct PlanContext {
    /// Resolved descriptors in post-order
    result: IndexSet<Descriptor>,
    /// Package name to committed version
    commitments: HashMap<String, Commitment>,
    /// Conflicting backtraces per package, in discovery order
    conflicts: IndexMap<String, Vec<Backtrace>>,
    /// Active inclusion path, root first
    path: Vec<Descriptor>,
}

impl PlanContext {
    fn record_conflict(&mut self, desc: &Descriptor, committed: &Backtrace) {
        let backtrace = Backtrace::from_path(desc, &self.path);
        let record = self
            .conflicts
            .entry(desc.package.clone())
            .or_insert_with(|| vec![committed.clone()]);

        let seen = record
            .iter()
            .any(|bt| bt.head().is_some_and(|head| head.version == desc.version));
        if seen {
            return;
        }

        log::warn!("Version conflict for {}: {}", desc.package, backtrace);
        record.insert(0, backtrace);
    }
}

impl Planner {
    pub fn new(repository: Arc<dyn Repository>) -> Self {
        Self { repository }
    }

    /// Compute the build plan for `root`
    ///
    /// Returns every descriptor reachable from `root` exactly once, with each
    /// descriptor placed after everything it includes. Fails without a partial
    /// result when a package or config is missing, when an include cycle is
    /// found, or when a package is required at more than one version.
    pub fn plan(&self, root: &Descriptor) -> Result<Vec<Descriptor>> {
        log::debug!("Planning {} using {}", root, self.repository.name());

        let mut ctx = PlanContext::default();
        self.resolve(root, &mut ctx)?;

        if let Some((package, backtraces)) = ctx
            .conflicts
            .into_iter()
            .find(|(_, backtraces)| backtraces.len() >= 2)
        {
            return Err(VersionConflictError::new(package, backtraces).into());
        }

        log::debug!("Plan for {} has {} configs", root, ctx.result.len());
        Ok(ctx.result.into_iter().collect())
    }

    fn resolve(&self, desc: &Descriptor, ctx: &mut PlanContext) -> Result<()> {
        if ctx.result.contains(desc) {
            return Ok(());
        }

        if ctx.path.contains(desc) {
            return Err(CycleError {
                path: Backtrace::from_path(desc, &ctx.path),
            }
            .into());
        }

        let package = self.repository.read_package(&desc.package, &desc.version)?;
        let config = package
            .config(&desc.config)
            .ok_or_else(|| FigError::ConfigNotFound {
                name: desc.package.clone(),
                version: desc.version.clone(),
                config: desc.config.clone(),
            })?;

        match ctx.commitments.get(&desc.package) {
            Some(commitment) if commitment.version != desc.version => {
                let committed = commitment.backtrace.clone();
                ctx.record_conflict(desc, &committed);
                return Ok(());
            }
            Some(_) => {}
            None => {
                let backtrace = Backtrace::from_path(desc, &ctx.path);
                ctx.commitments.insert(
                    desc.package.clone(),
                    Commitment {
                        version: desc.version.clone(),
                        backtrace,
                    },
                );
            }
        }

        log::trace!("Resolving {} ({} includes)", desc, config.includes.len());

        ctx.path.push(desc.clone());
        for include in &config.includes {
            self.resolve(&include.descriptor(), ctx)?;
        }
        ctx.path.pop();

        ctx.result.insert(desc.clone());
        Ok(())
    }
}

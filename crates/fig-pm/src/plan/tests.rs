//! Planner tests covering ordering, deduplication and conflict reporting.

use std::sync::Arc;

use super::*;
use crate::package::{Config, Include, Package};
use crate::repository::MemoryRepository;

/// Helper to create a descriptor for the default config
fn desc(name: &str, version: &str) -> Descriptor {
    Descriptor::new(name, version, "default")
}

/// Helper to create a package whose default config includes the given
/// `(name, version)` pairs
fn pkg(name: &str, version: &str, includes: Vec<(&str, &str)>) -> Package {
    Package::new(
        name,
        version,
        vec![Config::new(
            "default",
            includes
                .into_iter()
                .map(|(n, v)| Include::new(n, v, "default")),
        )],
    )
}

fn planner(packages: Vec<Package>) -> Planner {
    Planner::new(Arc::new(MemoryRepository::with_packages(packages)))
}

/// Assert that every include edge of every planned descriptor points at an
/// entry earlier in the plan, and that no entry appears twice.
fn assert_valid_order(repo: &MemoryRepository, plan: &[Descriptor]) {
    for (index, entry) in plan.iter().enumerate() {
        assert_eq!(
            plan.iter().position(|d| d == entry),
            Some(index),
            "{} appears more than once in {:?}",
            entry,
            plan
        );

        let package = repo.read_package(&entry.package, &entry.version).unwrap();
        let config = package.config(&entry.config).unwrap();
        for include in &config.includes {
            let dep = include.descriptor();
            let dep_index = plan
                .iter()
                .position(|d| *d == dep)
                .unwrap_or_else(|| panic!("{} missing from plan", dep));
            assert!(dep_index < index, "{} must precede {}", dep, entry);
        }
    }
}

fn expect_conflict(result: Result<Vec<Descriptor>>) -> VersionConflictError {
    match result {
        Err(FigError::VersionConflict(conflict)) => conflict,
        other => panic!("Expected version conflict error, got {:?}", other),
    }
}

#[test]
fn test_no_dependencies() {
    let planner = planner(vec![pkg("foo", "1.2.3", vec![])]);

    let configs = planner.plan(&desc("foo", "1.2.3")).unwrap();

    assert_eq!(configs, vec![desc("foo", "1.2.3")]);
}

#[test]
fn test_simple_dependency() {
    let planner = planner(vec![
        pkg("foo", "1.2.3", vec![("bar", "4.5.6")]),
        pkg("bar", "4.5.6", vec![]),
    ]);

    let configs = planner.plan(&desc("foo", "1.2.3")).unwrap();

    assert_eq!(configs, vec![desc("bar", "4.5.6"), desc("foo", "1.2.3")]);
}

#[test]
fn test_transitive_dependency() {
    let planner = planner(vec![
        pkg("foo", "1.2.3", vec![("bar", "4.5.6")]),
        pkg("bar", "4.5.6", vec![("baz", "7.8.9")]),
        pkg("baz", "7.8.9", vec![]),
    ]);

    let configs = planner.plan(&desc("foo", "1.2.3")).unwrap();

    assert_eq!(
        configs,
        vec![desc("baz", "7.8.9"), desc("bar", "4.5.6"), desc("foo", "1.2.3")]
    );
}

#[test]
fn test_diamond_dependency() {
    let planner = planner(vec![
        pkg("foo", "1.2.3", vec![("bar", "4.5.6"), ("baz", "7.8.9")]),
        pkg("bar", "4.5.6", vec![("util", "0.0.0")]),
        pkg("baz", "7.8.9", vec![("util", "0.0.0")]),
        pkg("util", "0.0.0", vec![]),
    ]);

    let configs = planner.plan(&desc("foo", "1.2.3")).unwrap();

    assert_eq!(
        configs,
        vec![
            desc("util", "0.0.0"),
            desc("bar", "4.5.6"),
            desc("baz", "7.8.9"),
            desc("foo", "1.2.3"),
        ]
    );
}

#[test]
fn test_version_mismatch() {
    let planner = planner(vec![
        pkg("foo", "1.2.3", vec![("bar", "4.5.6"), ("baz", "7.8.9")]),
        pkg("bar", "4.5.6", vec![("util", "0.0.0")]),
        pkg("baz", "7.8.9", vec![("util", "9.9.9")]),
        pkg("util", "0.0.0", vec![]),
        pkg("util", "9.9.9", vec![]),
    ]);

    let conflict = expect_conflict(planner.plan(&desc("foo", "1.2.3")));

    assert_eq!(conflict.package, "util");
    assert_eq!(conflict.backtraces.len(), 2);
    assert_eq!(
        conflict.backtraces[0].as_slice(),
        &[desc("util", "9.9.9"), desc("baz", "7.8.9"), desc("foo", "1.2.3")]
    );
    assert_eq!(
        conflict.backtraces[1].as_slice(),
        &[desc("util", "0.0.0"), desc("bar", "4.5.6"), desc("foo", "1.2.3")]
    );
}

#[test]
fn test_conflict_backtraces_newest_first() {
    let planner = planner(vec![
        pkg("app", "1.0", vec![("a", "1.0"), ("b", "1.0"), ("c", "1.0")]),
        pkg("a", "1.0", vec![("util", "1")]),
        pkg("b", "1.0", vec![("util", "2")]),
        pkg("c", "1.0", vec![("util", "3")]),
        pkg("util", "1", vec![]),
        pkg("util", "2", vec![]),
        pkg("util", "3", vec![]),
    ]);

    let conflict = expect_conflict(planner.plan(&desc("app", "1.0")));

    assert_eq!(conflict.package, "util");
    assert_eq!(conflict.versions(), vec!["3", "2", "1"]);
    assert_eq!(
        conflict.backtraces[0].as_slice(),
        &[desc("util", "3"), desc("c", "1.0"), desc("app", "1.0")]
    );
}

#[test]
fn test_conflict_recorded_once_per_version() {
    let planner = planner(vec![
        pkg("foo", "1.2.3", vec![("bar", "4.5.6"), ("baz", "7.8.9"), ("qux", "1.0.0")]),
        pkg("bar", "4.5.6", vec![("util", "0.0.0")]),
        pkg("baz", "7.8.9", vec![("util", "9.9.9")]),
        pkg("qux", "1.0.0", vec![("util", "9.9.9")]),
        pkg("util", "0.0.0", vec![]),
        pkg("util", "9.9.9", vec![]),
    ]);

    let conflict = expect_conflict(planner.plan(&desc("foo", "1.2.3")));

    assert_eq!(conflict.versions(), vec!["9.9.9", "0.0.0"]);
    assert_eq!(
        conflict.backtraces[0].as_slice(),
        &[desc("util", "9.9.9"), desc("baz", "7.8.9"), desc("foo", "1.2.3")]
    );
}

#[test]
fn test_conflicting_branch_is_not_expanded() {
    // util 9.9.9 includes a package that does not exist; since that branch
    // conflicts it must never be looked at.
    let planner = planner(vec![
        pkg("foo", "1.2.3", vec![("bar", "4.5.6"), ("baz", "7.8.9")]),
        pkg("bar", "4.5.6", vec![("util", "0.0.0")]),
        pkg("baz", "7.8.9", vec![("util", "9.9.9")]),
        pkg("util", "0.0.0", vec![]),
        pkg("util", "9.9.9", vec![("ghost", "1.0.0")]),
    ]);

    let conflict = expect_conflict(planner.plan(&desc("foo", "1.2.3")));

    assert_eq!(conflict.package, "util");
}

#[test]
fn test_first_conflicting_package_is_reported() {
    let planner = planner(vec![
        pkg("foo", "1.2.3", vec![("bar", "4.5.6"), ("baz", "7.8.9")]),
        pkg("bar", "4.5.6", vec![("util", "0.0.0"), ("lib", "1.0.0")]),
        pkg("baz", "7.8.9", vec![("util", "9.9.9"), ("lib", "2.0.0")]),
        pkg("util", "0.0.0", vec![]),
        pkg("util", "9.9.9", vec![]),
        pkg("lib", "1.0.0", vec![]),
        pkg("lib", "2.0.0", vec![]),
    ]);

    let conflict = expect_conflict(planner.plan(&desc("foo", "1.2.3")));

    assert_eq!(conflict.package, "util");
    assert_eq!(conflict.versions(), vec!["9.9.9", "0.0.0"]);
}

#[test]
fn test_conflict_with_root_package() {
    let planner = planner(vec![
        pkg("foo", "1.2.3", vec![("bar", "4.5.6")]),
        pkg("bar", "4.5.6", vec![("foo", "2.0.0")]),
        pkg("foo", "2.0.0", vec![]),
    ]);

    let conflict = expect_conflict(planner.plan(&desc("foo", "1.2.3")));

    assert_eq!(conflict.package, "foo");
    assert_eq!(
        conflict.backtraces[0].as_slice(),
        &[desc("foo", "2.0.0"), desc("bar", "4.5.6"), desc("foo", "1.2.3")]
    );
    assert_eq!(conflict.backtraces[1].as_slice(), &[desc("foo", "1.2.3")]);
}

#[test]
fn test_missing_dependency() {
    let planner = planner(vec![pkg("foo", "1.2.3", vec![("bar", "4.5.6")])]);

    let err = planner.plan(&desc("foo", "1.2.3")).unwrap_err();

    assert!(matches!(
        err,
        FigError::PackageNotFound { ref name, ref version } if name == "bar" && version == "4.5.6"
    ));
    assert!(err.is_not_found());
}

#[test]
fn test_missing_root() {
    let planner = planner(vec![]);

    let err = planner.plan(&desc("foo", "1.2.3")).unwrap_err();

    assert!(matches!(err, FigError::PackageNotFound { .. }));
}

#[test]
fn test_missing_config() {
    let planner = planner(vec![
        Package::new(
            "foo",
            "1.2.3",
            vec![Config::new("default", vec![Include::new("bar", "4.5.6", "runtime")])],
        ),
        pkg("bar", "4.5.6", vec![]),
    ]);

    let err = planner.plan(&desc("foo", "1.2.3")).unwrap_err();

    assert!(matches!(
        err,
        FigError::ConfigNotFound { ref name, ref config, .. } if name == "bar" && config == "runtime"
    ));
}

#[test]
fn test_missing_package_aborts_before_conflict() {
    let planner = planner(vec![
        pkg("foo", "1.2.3", vec![("bar", "4.5.6"), ("baz", "7.8.9"), ("qux", "1.0.0")]),
        pkg("bar", "4.5.6", vec![("util", "0.0.0")]),
        pkg("baz", "7.8.9", vec![("util", "9.9.9")]),
        pkg("util", "0.0.0", vec![]),
        pkg("util", "9.9.9", vec![]),
    ]);

    let err = planner.plan(&desc("foo", "1.2.3")).unwrap_err();

    assert!(matches!(err, FigError::PackageNotFound { ref name, .. } if name == "qux"));
}

#[test]
fn test_self_include_is_a_cycle() {
    let planner = planner(vec![pkg("foo", "1.2.3", vec![("foo", "1.2.3")])]);

    let err = planner.plan(&desc("foo", "1.2.3")).unwrap_err();

    match err {
        FigError::Cycle(CycleError { path }) => {
            assert_eq!(path.as_slice(), &[desc("foo", "1.2.3"), desc("foo", "1.2.3")]);
        }
        other => panic!("Expected cycle error, got {:?}", other),
    }
}

#[test]
fn test_indirect_cycle() {
    let planner = planner(vec![
        pkg("foo", "1.2.3", vec![("bar", "4.5.6")]),
        pkg("bar", "4.5.6", vec![("baz", "7.8.9")]),
        pkg("baz", "7.8.9", vec![("bar", "4.5.6")]),
    ]);

    let err = planner.plan(&desc("foo", "1.2.3")).unwrap_err();

    match err {
        FigError::Cycle(CycleError { path }) => {
            assert_eq!(
                path.as_slice(),
                &[
                    desc("bar", "4.5.6"),
                    desc("baz", "7.8.9"),
                    desc("bar", "4.5.6"),
                    desc("foo", "1.2.3"),
                ]
            );
        }
        other => panic!("Expected cycle error, got {:?}", other),
    }
}

#[test]
fn test_duplicate_includes_resolve_once() {
    let planner = planner(vec![
        pkg("foo", "1.2.3", vec![("bar", "4.5.6"), ("bar", "4.5.6")]),
        pkg("bar", "4.5.6", vec![]),
    ]);

    let configs = planner.plan(&desc("foo", "1.2.3")).unwrap();

    assert_eq!(configs, vec![desc("bar", "4.5.6"), desc("foo", "1.2.3")]);
}

#[test]
fn test_configs_of_same_version_are_distinct_entries() {
    let planner = planner(vec![
        Package::new(
            "foo",
            "1.2.3",
            vec![Config::new(
                "default",
                vec![
                    Include::new("bar", "4.5.6", "runtime"),
                    Include::new("bar", "4.5.6", "default"),
                ],
            )],
        ),
        Package::new(
            "bar",
            "4.5.6",
            vec![Config::empty("default"), Config::empty("runtime")],
        ),
    ]);

    let configs = planner.plan(&desc("foo", "1.2.3")).unwrap();

    assert_eq!(
        configs,
        vec![
            Descriptor::new("bar", "4.5.6", "runtime"),
            desc("bar", "4.5.6"),
            desc("foo", "1.2.3"),
        ]
    );
}

#[test]
fn test_sibling_subgraphs_follow_post_order() {
    let planner = planner(vec![
        pkg("app", "1.0", vec![("a", "1.0"), ("b", "1.0")]),
        pkg("a", "1.0", vec![("c", "1.0")]),
        pkg("b", "1.0", vec![("d", "1.0"), ("c", "1.0")]),
        pkg("c", "1.0", vec![]),
        pkg("d", "1.0", vec![]),
    ]);

    let configs = planner.plan(&desc("app", "1.0")).unwrap();

    assert_eq!(
        configs,
        vec![
            desc("c", "1.0"),
            desc("a", "1.0"),
            desc("d", "1.0"),
            desc("b", "1.0"),
            desc("app", "1.0"),
        ]
    );
}

#[test]
fn test_plan_is_deterministic_and_topological() {
    let packages = vec![
        pkg("app", "1.0", vec![("web", "2.1"), ("cli", "0.3"), ("log", "1.1")]),
        pkg("web", "2.1", vec![("http", "0.9"), ("json", "1.0"), ("log", "1.1")]),
        pkg("cli", "0.3", vec![("args", "4.0"), ("json", "1.0")]),
        pkg("http", "0.9", vec![("io", "1.0"), ("log", "1.1")]),
        pkg("json", "1.0", vec![("io", "1.0")]),
        pkg("args", "4.0", vec![]),
        pkg("io", "1.0", vec![]),
        pkg("log", "1.1", vec![("io", "1.0")]),
    ];
    let repo = Arc::new(MemoryRepository::with_packages(packages));
    let planner = Planner::new(repo.clone());

    let first = planner.plan(&desc("app", "1.0")).unwrap();
    let second = planner.plan(&desc("app", "1.0")).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 8);
    assert_eq!(first.last(), Some(&desc("app", "1.0")));
    assert_valid_order(&repo, &first);
}

#[test]
fn test_concurrent_plans_share_repository() {
    let repo = Arc::new(MemoryRepository::with_packages(vec![
        pkg("foo", "1.2.3", vec![("bar", "4.5.6"), ("baz", "7.8.9")]),
        pkg("bar", "4.5.6", vec![("util", "0.0.0")]),
        pkg("baz", "7.8.9", vec![("util", "0.0.0")]),
        pkg("util", "0.0.0", vec![]),
    ]));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let repo = repo.clone();
            std::thread::spawn(move || Planner::new(repo).plan(&desc("foo", "1.2.3")))
        })
        .collect();

    for handle in handles {
        let configs = handle.join().unwrap().unwrap();
        assert_eq!(configs.len(), 4);
        assert_eq!(configs[0], desc("util", "0.0.0"));
    }
}

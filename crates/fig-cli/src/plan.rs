//! Plan command - compute the build order for a package config.

use anyhow::Result;
use clap::Args;
use console::style;
use std::io::Write;
use std::sync::Arc;

use fig_format::parse_descriptor;
use fig_pm::{Descriptor, FigError, Planner, Repository, VersionConflictError};

#[derive(Args, Debug)]
pub struct PlanArgs {
    /// Root descriptor (e.g. foo/1.2.3 or foo/1.2.3:runtime)
    #[arg(value_name = "PACKAGE/VERSION[:CONFIG]")]
    pub descriptor: String,

    /// Output format: text or json
    #[arg(short = 'f', long, default_value = "text")]
    pub format: String,
}

pub fn execute(args: PlanArgs, repo: Arc<dyn Repository>, default_config: &str) -> Result<i32> {
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    plan(&args, repo, default_config, &mut stdout.lock(), &mut stderr.lock())
}

fn plan(
    args: &PlanArgs,
    repo: Arc<dyn Repository>,
    default_config: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<i32> {
    if args.format != "text" && args.format != "json" {
        writeln!(err, "Error: Unsupported format '{}'. Use 'text' or 'json'.", args.format)?;
        return Ok(1);
    }

    let root = match parse_descriptor(&args.descriptor).and_then(|d| d.into_descriptor(default_config)) {
        Ok(root) => root,
        Err(e) => {
            writeln!(err, "{} {}", style("Error:").red().bold(), e)?;
            return Ok(1);
        }
    };

    match Planner::new(repo).plan(&root) {
        Ok(configs) => {
            write_plan(out, &configs, &args.format)?;
            Ok(0)
        }
        Err(FigError::VersionConflict(conflict)) => {
            write_conflict(err, &conflict)?;
            Ok(1)
        }
        Err(e) => {
            writeln!(err, "{} {}", style("Error:").red().bold(), e)?;
            Ok(1)
        }
    }
}

fn write_plan(out: &mut dyn Write, configs: &[Descriptor], format: &str) -> Result<()> {
    if format == "json" {
        writeln!(out, "{}", serde_json::to_string_pretty(configs)?)?;
    } else {
        for desc in configs {
            writeln!(out, "{}", desc)?;
        }
    }
    Ok(())
}

/// Print every conflicting inclusion path, one block per version
fn write_conflict(err: &mut dyn Write, conflict: &VersionConflictError) -> std::io::Result<()> {
    writeln!(
        err,
        "{} package {} is required at {} different versions:",
        style("Version conflict:").red().bold(),
        style(&conflict.package).yellow(),
        conflict.backtraces.len()
    )?;

    for backtrace in &conflict.backtraces {
        writeln!(err)?;
        for (depth, desc) in backtrace.iter().enumerate() {
            if depth == 0 {
                writeln!(err, "  {}", style(desc).bold())?;
            } else {
                writeln!(err, "  {}included by {}", "  ".repeat(depth - 1), desc)?;
            }
        }
    }
    Ok(())
}

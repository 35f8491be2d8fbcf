//! Show command - print a package definition.

use anyhow::Result;
use clap::Args;
use std::io::Write;

use fig_format::{parse_descriptor, Unparser};
use fig_pm::Repository;

const USAGE: &str = "Please specify a package and version (e.g. foo/1.2.3)";

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Package and version to show (e.g. foo/1.2.3)
    #[arg(value_name = "PACKAGE/VERSION")]
    pub package: Option<String>,
}

pub fn execute(args: ShowArgs, repo: &dyn Repository) -> Result<i32> {
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    show(args.package.as_deref(), repo, &mut stdout.lock(), &mut stderr.lock())
}

fn show(
    reference: Option<&str>,
    repo: &dyn Repository,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<i32> {
    let Some(reference) = reference else {
        writeln!(err, "{}", USAGE)?;
        return Ok(1);
    };

    let desc = match parse_descriptor(reference) {
        Ok(desc) => desc,
        Err(e) => {
            writeln!(err, "{}", e)?;
            return Ok(1);
        }
    };
    let Some(version) = desc.version.as_deref() else {
        writeln!(err, "{}", USAGE)?;
        return Ok(1);
    };

    let package = match repo.read_package(&desc.package, version) {
        Ok(package) => package,
        Err(e) => {
            writeln!(err, "{}", e)?;
            return Ok(1);
        }
    };

    Unparser::new(out).unparse_package(&package)?;
    Ok(0)
}

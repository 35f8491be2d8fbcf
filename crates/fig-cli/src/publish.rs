//! Publish command - store a package definition in the repository.

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use std::path::PathBuf;

use fig_format::parse_package;
use fig_pm::Repository;

#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Package definition file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Overwrite an already published version
    #[arg(long)]
    pub force: bool,
}

pub fn execute(args: PublishArgs, repo: &dyn Repository) -> Result<i32> {
    let content = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let package = match parse_package(&args.file.display().to_string(), &content) {
        Ok(package) => package,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            return Ok(1);
        }
    };

    if !args.force && repo.has_package(&package.name, &package.version)? {
        eprintln!(
            "{} {}/{} is already published in {}. Use --force to overwrite it.",
            style("Error:").red().bold(),
            package.name,
            package.version,
            repo.name()
        );
        return Ok(1);
    }

    repo.write_package(&package)?;
    log::info!("Published {}/{} to {}", package.name, package.version, repo.name());
    println!(
        "{} {}/{}",
        style("Published").green(),
        package.name,
        package.version
    );

    Ok(0)
}

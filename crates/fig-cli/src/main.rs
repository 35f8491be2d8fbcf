mod config;
mod plan;
mod publish;
mod show;

use config::Settings;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use fig_pm::{FileRepository, Repository};

#[derive(Parser, Debug)]
#[command(name = "fig")]
#[command(about = "Plan the package configurations needed to build a package")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Package repository directory (overrides FIG_REPOSITORY and fig.toml)
    #[arg(long, value_name = "DIR", global = true)]
    repository: Option<PathBuf>,

    /// Working directory
    #[arg(short = 'd', long, default_value = ".", global = true)]
    working_dir: PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the definition of a package version
    Show(show::ShowArgs),

    /// Compute the ordered list of configs needed to build a package config
    Plan(plan::PlanArgs),

    /// Store a package definition file in the repository
    Publish(publish::PublishArgs),
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    // RUST_LOG, when set, takes precedence over the flags
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

fn run(args: Args) -> Result<i32> {
    let working_dir = args
        .working_dir
        .canonicalize()
        .context("Failed to resolve working directory")?;

    let settings = Settings::build(&working_dir, args.repository, true)?;
    log::debug!("Using repository {}", settings.repository_path.display());

    let repo: Arc<dyn Repository> = Arc::new(FileRepository::new(&settings.repository_path));

    match args.command {
        Commands::Show(cmd) => show::execute(cmd, repo.as_ref()),
        Commands::Plan(cmd) => plan::execute(cmd, repo, &settings.default_config),
        Commands::Publish(cmd) => publish::execute(cmd, repo.as_ref()),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose, args.quiet);

    match run(args) {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
            ExitCode::FAILURE
        }
    }
}

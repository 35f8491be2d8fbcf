use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use fig_pm::DEFAULT_CONFIG;

/// Name of the project configuration file
pub const CONFIG_FILE: &str = "fig.toml";

/// Environment variable overriding the repository location
pub const REPOSITORY_ENV: &str = "FIG_REPOSITORY";

/// The fig configuration file structure (fig.toml)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FigConfig {
    /// Package repository configuration
    pub repository: RepositoryConfig,

    /// Planner defaults
    pub plan: PlanConfig,

    /// Directory the file was loaded from
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// Repository location
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Repository root, relative to the directory containing fig.toml
    pub path: Option<PathBuf>,
}

/// Planner configuration
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// Config used when a descriptor does not name one
    pub default_config: Option<String>,
}

impl FigConfig {
    /// Load configuration from fig.toml, searching upward from the given directory
    pub fn load(start_dir: &Path) -> Result<Option<Self>> {
        let mut current = start_dir.to_path_buf();

        loop {
            let config_path = current.join(CONFIG_FILE);

            if config_path.is_file() {
                log::debug!("Loading {}", config_path.display());
                let content = std::fs::read_to_string(&config_path)
                    .with_context(|| format!("Failed to read {}", config_path.display()))?;
                let mut config: FigConfig = toml::from_str(&content)
                    .with_context(|| format!("Failed to parse {}", config_path.display()))?;
                config.base_dir = Some(current);
                return Ok(Some(config));
            }

            if !current.pop() {
                return Ok(None);
            }
        }
    }
}

/// Effective settings after merging defaults, fig.toml, the environment and
/// command line flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub repository_path: PathBuf,
    pub default_config: String,
}

impl Settings {
    /// Build settings for a working directory
    ///
    /// Priority, highest first: `cli_repository`, `FIG_REPOSITORY` (only when
    /// `use_environment` is set), fig.toml, the platform data directory.
    pub fn build(
        working_dir: &Path,
        cli_repository: Option<PathBuf>,
        use_environment: bool,
    ) -> Result<Self> {
        let file = FigConfig::load(working_dir)?.unwrap_or_default();
        Ok(Self::from_config(
            file,
            working_dir,
            cli_repository,
            env_repository(use_environment),
        ))
    }

    fn from_config(
        file: FigConfig,
        working_dir: &Path,
        cli_repository: Option<PathBuf>,
        env_repository: Option<PathBuf>,
    ) -> Self {
        let repository_path = if let Some(path) = cli_repository {
            working_dir.join(path)
        } else if let Some(path) = env_repository {
            working_dir.join(path)
        } else if let Some(path) = file.repository.path {
            file.base_dir.as_deref().unwrap_or(working_dir).join(path)
        } else {
            default_repository_path()
        };

        let default_config = file
            .plan
            .default_config
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CONFIG.to_string());

        Self {
            repository_path,
            default_config,
        }
    }
}

fn env_repository(use_environment: bool) -> Option<PathBuf> {
    if !use_environment {
        return None;
    }
    std::env::var(REPOSITORY_ENV)
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

fn default_repository_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "fig")
        .map(|dirs| dirs.data_dir().join("repository"))
        .unwrap_or_else(|| PathBuf::from(".fig").join("repository"))
}

//! Locating and loading `alias-lint.toml`.
//!
//! Lookup order:
//!
//! 1. `--config <FILE>`
//! 2. `alias-lint.toml` or `.alias-lint.toml` in the checked directory or
//!    the nearest ancestor that has one
//! 3. `$ALIAS_LINT_CONFIG_DIR/config.toml`, else `~/.alias-lint/config.toml`
//! 4. built-in defaults (no aliases, so nothing is reported)

use alias_lint_core::Config;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Where the configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found next to, or above, the checked directory.
    Project(PathBuf),
    /// Found in the user-wide config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// The config file, unless defaults are in use.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }

    /// Reads and validates the configuration.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, parsed or validated.
    pub fn load(&self) -> Result<Config> {
        let Some(path) = self.path() else {
            tracing::debug!("No alias-lint config found, using defaults");
            return Ok(Config::default());
        };
        if matches!(self, Self::Global(_)) {
            tracing::info!("Using global config: {}", path.display());
        }

        let config = Config::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }
}

const PROJECT_FILE_NAMES: [&str; 2] = ["alias-lint.toml", ".alias-lint.toml"];

const GLOBAL_FILE_NAME: &str = "config.toml";

/// Finds the configuration for a check rooted at `start`.
#[must_use]
pub fn resolve(start: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_with(start, explicit, global_config_dir().as_deref())
}

fn resolve_with(start: &Path, explicit: Option<&Path>, global_dir: Option<&Path>) -> ConfigSource {
    if let Some(path) = explicit {
        return ConfigSource::Explicit(path.to_path_buf());
    }

    if let Some(found) = find_project_config(start) {
        tracing::debug!("Found project config: {}", found.display());
        return ConfigSource::Project(found);
    }

    global_dir
        .map(|dir| dir.join(GLOBAL_FILE_NAME))
        .filter(|p| p.is_file())
        .map_or(ConfigSource::Default, ConfigSource::Global)
}

fn find_project_config(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
    let start = if start.is_file() {
        start.parent()?.to_path_buf()
    } else {
        start
    };

    start.ancestors().find_map(|dir| {
        PROJECT_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|p| p.is_file())
    })
}

/// `$ALIAS_LINT_CONFIG_DIR`, else `~/.alias-lint`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    match std::env::var_os("ALIAS_LINT_CONFIG_DIR") {
        Some(dir) => Some(PathBuf::from(dir)),
        None => home::home_dir().map(|h| h.join(".alias-lint")),
    }
}

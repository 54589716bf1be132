//! Configuration types for alias-lint.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::alias::{AliasTable, PathPattern};
use crate::types::Severity;

/// Top-level configuration for alias-lint.
///
/// ```toml
/// severity = "warning"
/// fixable = true
///
/// [analyzer]
/// source_root = "imports"
///
/// [aliases]
/// "@scope/lib" = ["imports/lib"]
/// "@scope/lib/*" = ["imports/lib/*"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Severity of reported violations (default: "warning").
    #[serde(default = "default_severity")]
    pub severity: Severity,

    /// Whether replacements are offered as automatic fixes.
    /// Suggestions are attached either way.
    #[serde(default, alias = "fixible")]
    pub fixable: bool,

    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Alias key -> ordered targets. Only the first target is used.
    #[serde(default)]
    pub aliases: HashMap<String, Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            severity: default_severity(),
            fixable: false,
            analyzer: AnalyzerConfig::default(),
            aliases: HashMap::new(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Validates alias definitions and analyzer settings.
    ///
    /// # Errors
    ///
    /// Returns error describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analyzer.source_root.trim_matches('/').is_empty() {
            return Err(ConfigError::Validation(
                "analyzer.source_root must not be empty".to_string(),
            ));
        }

        let mut keys: Vec<&String> = self.aliases.keys().collect();
        keys.sort();

        for key in keys {
            let Some(target) = self.aliases[key].first() else {
                return Err(ConfigError::Validation(format!(
                    "aliases.\"{key}\": at least one target is required"
                )));
            };
            let Some(key_pattern) = PathPattern::parse(key) else {
                return Err(ConfigError::Validation(format!(
                    "aliases.\"{key}\": only one '*' is supported"
                )));
            };
            let Some(target_pattern) = PathPattern::parse(target) else {
                return Err(ConfigError::Validation(format!(
                    "aliases.\"{key}\": target '{target}' has more than one '*'"
                )));
            };
            if key_pattern.is_wildcard() != target_pattern.is_wildcard() {
                return Err(ConfigError::Validation(format!(
                    "aliases.\"{key}\": key and target '{target}' must both use '*' or neither"
                )));
            }
        }

        Ok(())
    }

    /// Builds the alias table, or `None` when no aliases are configured
    /// and the rule is disabled.
    #[must_use]
    pub fn alias_table(&self) -> Option<AliasTable> {
        AliasTable::build(
            self.aliases
                .iter()
                .map(|(key, targets)| (key.clone(), targets.clone())),
        )
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Path segment(s) where logical project paths begin.
    /// Files outside it are not checked.
    #[serde(default = "default_source_root")]
    pub source_root: String,

    /// File extensions to check.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Glob-like patterns to exclude from analysis.
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            source_root: default_source_root(),
            extensions: default_extensions(),
            exclude: default_exclude(),
            respect_gitignore: true,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_source_root() -> String {
    "imports".to_string()
}

fn default_extensions() -> Vec<String> {
    [".js", ".jsx", ".ts", ".tsx", ".mjs", ".cjs"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_exclude() -> Vec<String> {
    vec!["**/node_modules/**".to_string()]
}

fn default_severity() -> Severity {
    Severity::Warning
}

fn default_true() -> bool {
    true
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// Config is structurally invalid.
    #[error("Invalid config: {0}")]
    Validation(String),
}

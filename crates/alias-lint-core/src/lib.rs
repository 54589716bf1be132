//! # alias-lint-core
//!
//! Core of alias-lint: canonical import specifiers for projects that
//! configure path aliases (`@scope/lib/*` → `imports/lib/*`).
//!
//! - [`AliasTable`] holds the configured aliases in specificity order
//! - [`PathCanonicalizer`] decides, per import, whether the specifier is
//!   canonical or names the alias / relative path that should replace it
//! - [`Violation`] and [`LintResult`] carry findings to the reporters
//! - [`Config`] loads the TOML configuration
//!
//! ## Example
//!
//! ```
//! use alias_lint_core::{Config, LogicalPath, PathCanonicalizer, Verdict};
//!
//! let config = Config::parse(
//!     r#"
//! [aliases]
//! "@scope/api/*" = ["imports/api/*"]
//! "#,
//! )
//! .unwrap();
//! let table = config.alias_table().unwrap();
//!
//! let dir = LogicalPath::new("imports/api/calls/server");
//! let verdict = PathCanonicalizer::new(&table).canonicalize(&dir, "../../users");
//! assert_eq!(verdict, Verdict::Replace("@scope/api/users".into()));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod alias;
mod canonical;
mod config;
mod logical;
mod types;

/// Text edits for `--fix`.
pub mod fix;
/// Helpers shared by rule engines.
pub mod utils;

pub use alias::{AliasEntry, AliasTable, MatchResult, PathPattern, WILDCARD};
pub use canonical::{PathCanonicalizer, Verdict};
pub use config::{AnalyzerConfig, Config, ConfigError};
pub use fix::{apply_edits, FixError, TextEdit};
pub use logical::{to_relative_specifier, LogicalPath, RelativeSpecifier};
pub use types::{
    LintResult, Location, Replacement, Severity, Suggestion, Violation, ViolationDiagnostic,
};
pub use utils::allowance::AllowCheck;

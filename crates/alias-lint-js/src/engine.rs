//! Import alias rule engine.
//!
//! Runs every import of a [`FileAnalysis`] through the
//! [`PathCanonicalizer`] and reports the ones that are not in canonical
//! form, producing [`Violation`]s from alias-lint-core.

use std::path::Path;

use alias_lint_core::utils::check_allow;
use alias_lint_core::{
    AliasTable, Config, Location, LogicalPath, PathCanonicalizer, Replacement, Severity,
    Suggestion, Verdict, Violation,
};
use tracing::debug;

use crate::extractor::{FileAnalysis, ImportInfo};

/// Rule name used in output and allow directives.
pub const RULE_NAME: &str = "import-alias";

/// Rule code.
pub const RULE_CODE: &str = "ALIAS001";

/// Checks import specifiers against the configured aliases.
#[derive(Debug, Clone)]
pub struct AliasRuleEngine {
    table: AliasTable,
    source_root: String,
    severity: Severity,
    fixable: bool,
}

impl AliasRuleEngine {
    /// Creates an engine from config.
    ///
    /// Returns `None` when no aliases are configured; the rule is then
    /// disabled.
    #[must_use]
    pub fn new(config: &Config) -> Option<Self> {
        let table = config.alias_table()?;
        Some(Self {
            table,
            source_root: config.analyzer.source_root.clone(),
            severity: config.severity,
            fixable: config.fixable,
        })
    }

    /// The alias table in use.
    #[must_use]
    pub fn table(&self) -> &AliasTable {
        &self.table
    }

    /// Logical directory of `file`, or `None` if it lies outside the
    /// source root.
    #[must_use]
    pub fn logical_dir(&self, file: &Path) -> Option<LogicalPath> {
        LogicalPath::from_file(file, &self.source_root)
    }

    /// Canonical form of one specifier as written in `file`.
    ///
    /// Returns `None` when the file is out of scope.
    #[must_use]
    pub fn resolve(&self, file: &Path, specifier: &str) -> Option<Verdict> {
        let dir = self.logical_dir(file)?;
        Some(PathCanonicalizer::new(&self.table).canonicalize(&dir, specifier))
    }

    /// Checks a file whose logical directory is derived from
    /// `analysis.file_path`.
    #[must_use]
    pub fn check(&self, analysis: &FileAnalysis, content: &str) -> Vec<Violation> {
        match self.logical_dir(&analysis.file_path) {
            Some(dir) => self.check_in(&dir, analysis, content),
            None => {
                debug!(
                    "{} is outside source root '{}'",
                    analysis.file_path.display(),
                    self.source_root
                );
                Vec::new()
            }
        }
    }

    /// Checks a file living in `dir`.
    #[must_use]
    pub fn check_in(
        &self,
        dir: &LogicalPath,
        analysis: &FileAnalysis,
        content: &str,
    ) -> Vec<Violation> {
        let canonicalizer = PathCanonicalizer::new(&self.table);

        analysis
            .imports
            .iter()
            .filter_map(|import| {
                let Verdict::Replace(canonical) =
                    canonicalizer.canonicalize(dir, &import.specifier)
                else {
                    return None;
                };

                let allow = check_allow(content, import.line, RULE_NAME);
                if allow.is_allowed() {
                    debug!(
                        "{}:{} {} allowed ({})",
                        analysis.file_path.display(),
                        import.line,
                        import.kind,
                        allow.reason().unwrap_or("no reason")
                    );
                    return None;
                }

                debug!(
                    "{}:{} {} '{}' should be '{}'",
                    analysis.file_path.display(),
                    import.line,
                    import.kind,
                    import.specifier,
                    canonical
                );

                Some(self.violation(analysis, import, &canonical))
            })
            .collect()
    }

    fn violation(&self, analysis: &FileAnalysis, import: &ImportInfo, canonical: &str) -> Violation {
        let location = Location::new(analysis.file_path.clone(), import.line, import.column + 1)
            .with_span(import.offset, import.length);
        let replacement = Replacement::new(location.clone(), import.quoted(canonical));

        let violation = Violation::new(
            RULE_CODE,
            RULE_NAME,
            self.severity,
            location,
            format!("Use '{canonical}' instead"),
        )
        .with_suggestion(Suggestion::with_fix(
            format!("Replace import path to '{canonical}'"),
            replacement.clone(),
        ));

        if self.fixable {
            violation.with_fix(replacement)
        } else {
            violation
        }
    }
}

//! Reported violations, their locations and the per-run summary.

use miette::{Diagnostic, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How seriously a non-canonical import is reported; set by `severity` in the
/// config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Reported only.
    Info,
    /// Reported; the default.
    Warning,
    /// Reported and makes `check` exit non-zero.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// Where an import specifier sits in a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Path as discovered, relative to the checked root.
    pub file: PathBuf,
    /// 1-based line.
    pub line: usize,
    /// 1-based column of the opening quote.
    pub column: usize,
    /// Byte offset of the string literal.
    pub offset: usize,
    /// Byte length of the string literal, quotes included.
    pub length: usize,
}

impl Location {
    /// A location without a byte span.
    #[must_use]
    pub fn new(file: PathBuf, line: usize, column: usize) -> Self {
        Self {
            file,
            line,
            column,
            offset: 0,
            length: 0,
        }
    }

    /// Attaches the literal's byte span.
    #[must_use]
    pub fn with_span(mut self, offset: usize, length: usize) -> Self {
        self.offset = offset;
        self.length = length;
        self
    }
}

/// Help text shown with a violation, optionally with the rewrite it implies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// Shown as `help:` in text output.
    pub message: String,
    /// The literal that would replace the import, if known.
    pub replacement: Option<Replacement>,
}

impl Suggestion {
    /// Help text alone.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            replacement: None,
        }
    }

    /// Help text plus the literal to write.
    #[must_use]
    pub fn with_fix(message: impl Into<String>, replacement: Replacement) -> Self {
        Self {
            message: message.into(),
            replacement: Some(replacement),
        }
    }
}

/// New text for the span of a [`Location`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    /// `offset` and `length` delimit the bytes being replaced.
    pub location: Location,
    /// Replacement literal, quotes included.
    pub new_text: String,
}

impl Replacement {
    /// Pairs a span with its new text.
    #[must_use]
    pub fn new(location: Location, new_text: impl Into<String>) -> Self {
        Self {
            location,
            new_text: new_text.into(),
        }
    }
}

/// One import whose specifier is not in canonical form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    /// Stable code such as `ALIAS001`.
    pub code: String,
    /// Rule name, as used in allow directives.
    pub rule: String,
    /// Configured severity.
    pub severity: Severity,
    /// Span of the offending string literal.
    pub location: Location,
    /// `Use '<canonical>' instead`.
    pub message: String,
    /// Always present for import violations.
    pub suggestion: Option<Suggestion>,
    /// Set only when `fixable = true`; `--fix` applies it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<Replacement>,
}

impl Violation {
    /// A violation with neither help nor fix.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        location: Location,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            location,
            message: message.into(),
            suggestion: None,
            fix: None,
        }
    }

    /// Attaches help text.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: Suggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    /// Lets `--fix` rewrite the span.
    #[must_use]
    pub fn with_fix(mut self, replacement: Replacement) -> Self {
        self.fix = Some(replacement);
        self
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}] {}",
            self.location.file.display(),
            self.location.line,
            self.location.column,
            self.severity,
            self.code,
            self.message
        )
    }
}

/// Adapter used by the `pretty` output format.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct ViolationDiagnostic {
    message: String,
    #[help]
    help: Option<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

impl From<&Violation> for ViolationDiagnostic {
    fn from(v: &Violation) -> Self {
        Self {
            message: format!("[{}] {}", v.code, v.message),
            help: v.suggestion.as_ref().map(|s| s.message.clone()),
            span: SourceSpan::from((v.location.offset, v.location.length)),
            label_message: v.rule.clone(),
        }
    }
}

/// Totals for one `check` run.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// Violations left after any fixes, in file order.
    pub violations: Vec<Violation>,
    /// Files under the source root that were read.
    pub files_checked: usize,
    /// Files written back by `--fix`.
    #[serde(default)]
    pub files_fixed: usize,
}

impl LintResult {
    /// An empty run.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any violation is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == Severity::Error)
    }

    /// `(errors, warnings, infos)`.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |severity| {
            self.violations
                .iter()
                .filter(|v| v.severity == severity)
                .count()
        };
        (
            count(Severity::Error),
            count(Severity::Warning),
            count(Severity::Info),
        )
    }

    /// Violations `--fix` could rewrite.
    #[must_use]
    pub fn fixable_count(&self) -> usize {
        self.violations.iter().filter(|v| v.fix.is_some()).count()
    }

    /// Orders by file, then position.
    pub fn sort(&mut self) {
        self.violations.sort_by(|a, b| {
            a.location
                .file
                .cmp(&b.location.file)
                .then(a.location.line.cmp(&b.location.line))
                .then(a.location.column.cmp(&b.location.column))
        });
    }
}

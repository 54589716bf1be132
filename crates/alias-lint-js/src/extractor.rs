//! Language-agnostic extraction types and trait.
//!
//! `LanguageExtractor` is the extension point for new source languages.
//! An extractor only has to find import specifiers and their spans; the
//! rule engine does the rest.

use std::fmt;
use std::path::PathBuf;

/// How a module is referenced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    /// `import x from '…'`, `export { x } from '…'`
    Static,
    /// `import '…'`
    SideEffect,
    /// `require('…')`
    Require,
    /// `import('…')`
    Dynamic,
}

impl ImportKind {
    /// Short name used in logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static import",
            Self::SideEffect => "side-effect import",
            Self::Require => "require",
            Self::Dynamic => "dynamic import",
        }
    }
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single module reference extracted from source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportInfo {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column (0-indexed byte offset within line) of the opening quote.
    pub column: usize,
    /// Byte offset of the string literal, opening quote included.
    pub offset: usize,
    /// Byte length of the string literal, both quotes included.
    pub length: usize,
    /// The specifier without quotes.
    pub specifier: String,
    /// Quote character used in the source.
    pub quote: char,
    /// Kind of reference.
    pub kind: ImportKind,
}

impl ImportInfo {
    /// Renders `specifier` as a literal using this import's quote style.
    #[must_use]
    pub fn quoted(&self, specifier: &str) -> String {
        format!("{q}{specifier}{q}", q = self.quote)
    }
}

/// Result of analyzing a single source file.
#[derive(Debug, Clone, Default)]
pub struct FileAnalysis {
    /// Path relative to project root.
    pub file_path: PathBuf,
    /// All module references found, in source order.
    pub imports: Vec<ImportInfo>,
}

/// Trait for language-specific import extraction.
///
/// The extractor receives raw source text and returns a [`FileAnalysis`];
/// callers fill in `file_path`.
pub trait LanguageExtractor: Send + Sync {
    /// Language identifier (e.g., `"ecmascript"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this extractor handles (e.g., `&[".js", ".ts"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Extract module references from source code.
    fn analyze(&self, source: &str) -> FileAnalysis;
}

/// Errors constructing an extractor.
#[derive(Debug, thiserror::Error)]
pub enum ExtractorError {
    /// An import pattern failed to compile.
    #[error("invalid import pattern: {0}")]
    Pattern(#[from] regex::Error),
}

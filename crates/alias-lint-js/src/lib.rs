//! # alias-lint-js
//!
//! JavaScript and TypeScript support for alias-lint.
//!
//! This crate turns source files into import specifiers and runs them
//! through `alias-lint-core`'s canonicalizer:
//!
//! - [`LanguageExtractor`] trait for pluggable import extraction
//! - [`EsModuleExtractor`] for ES modules, CommonJS `require` and dynamic
//!   `import()`
//! - [`AliasRuleEngine`] for turning non-canonical specifiers into
//!   [`Violation`](alias_lint_core::Violation)s

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod engine;
pub mod esm;
pub mod extractor;

pub use engine::{AliasRuleEngine, RULE_CODE, RULE_NAME};
pub use esm::EsModuleExtractor;
pub use extractor::{ExtractorError, FileAnalysis, ImportInfo, ImportKind, LanguageExtractor};

//! Applying replacements to source text.
//!
//! Pure string operations over byte offsets; reading and writing files is
//! left to the caller.

use thiserror::Error;

use crate::types::{Replacement, Violation};

/// Error type for fix application.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FixError {
    /// Two edits touch the same bytes.
    #[error("Overlapping edits detected at byte {0}")]
    OverlappingEdits(usize),

    /// An edit reaches past the end of the source.
    #[error("Edit range [{start}..{end}) exceeds source length {source_len}")]
    InvalidRange {
        /// Start of the edit.
        start: usize,
        /// End of the edit.
        end: usize,
        /// Length of the source text.
        source_len: usize,
    },

    /// An edit does not fall on UTF-8 character boundaries.
    #[error("Edit range [{start}..{end}) splits a character")]
    NotCharBoundary {
        /// Start of the edit.
        start: usize,
        /// End of the edit.
        end: usize,
    },
}

/// A text edit over the byte range `[start_byte..end_byte)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Starting byte offset (inclusive).
    pub start_byte: usize,
    /// Ending byte offset (exclusive).
    pub end_byte: usize,
    /// Text to insert in place of the range.
    pub replacement: String,
}

impl TextEdit {
    /// Creates a replacement edit.
    #[must_use]
    pub fn replace(start_byte: usize, end_byte: usize, replacement: impl Into<String>) -> Self {
        Self {
            start_byte,
            end_byte,
            replacement: replacement.into(),
        }
    }

    /// Returns true if this edit overlaps with another.
    #[must_use]
    pub fn overlaps_with(&self, other: &TextEdit) -> bool {
        self.start_byte < other.end_byte && other.start_byte < self.end_byte
    }

    fn validate(&self, source: &str) -> Result<(), FixError> {
        if self.start_byte > self.end_byte || self.end_byte > source.len() {
            return Err(FixError::InvalidRange {
                start: self.start_byte,
                end: self.end_byte,
                source_len: source.len(),
            });
        }
        if !source.is_char_boundary(self.start_byte) || !source.is_char_boundary(self.end_byte) {
            return Err(FixError::NotCharBoundary {
                start: self.start_byte,
                end: self.end_byte,
            });
        }
        Ok(())
    }
}

impl From<&Replacement> for TextEdit {
    fn from(r: &Replacement) -> Self {
        let start = r.location.offset;
        Self::replace(start, start + r.location.length, r.new_text.clone())
    }
}

/// Collects the automatic fixes carried by `violations`.
#[must_use]
pub fn auto_fix_edits<'a>(violations: impl IntoIterator<Item = &'a Violation>) -> Vec<TextEdit> {
    violations
        .into_iter()
        .filter_map(|v| v.fix.as_ref())
        .map(TextEdit::from)
        .collect()
}

/// Applies non-overlapping edits to `source`.
///
/// Edits are applied from the end of the text backwards so earlier offsets
/// stay valid.
///
/// # Errors
///
/// Returns an error if edits overlap or fall outside the source.
///
/// ```
/// use alias_lint_core::fix::{apply_edits, TextEdit};
///
/// let source = "import { a } from '../../../users';";
/// let edits = vec![TextEdit::replace(18, 34, "'@scope/api/users'")];
/// assert_eq!(
///     apply_edits(source, &edits).unwrap(),
///     "import { a } from '@scope/api/users';"
/// );
/// ```
pub fn apply_edits(source: &str, edits: &[TextEdit]) -> Result<String, FixError> {
    if edits.is_empty() {
        return Ok(source.to_string());
    }

    for edit in edits {
        edit.validate(source)?;
    }

    let mut sorted = edits.to_vec();
    sorted.sort_by(|a, b| b.start_byte.cmp(&a.start_byte));

    for pair in sorted.windows(2) {
        if pair[0].overlaps_with(&pair[1]) {
            return Err(FixError::OverlappingEdits(pair[1].start_byte));
        }
    }

    let mut result = source.to_string();
    for edit in sorted {
        result.replace_range(edit.start_byte..edit.end_byte, &edit.replacement);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Location, Severity};
    use std::path::PathBuf;

    #[test]
    fn overlaps_with() {
        let a = TextEdit::replace(0, 10, "a");
        let b = TextEdit::replace(5, 15, "b");
        let c = TextEdit::replace(10, 20, "c");
        assert!(a.overlaps_with(&b));
        assert!(b.overlaps_with(&a));
        assert!(!a.overlaps_with(&c));
    }

    #[test]
    fn applies_multiple_edits_back_to_front() {
        let source = "import a from '../a';\nimport b from '../b';\n";
        let edits = vec![
            TextEdit::replace(14, 20, "'@x/a'"),
            TextEdit::replace(36, 42, "'@x/b'"),
        ];
        assert_eq!(
            apply_edits(source, &edits).unwrap(),
            "import a from '@x/a';\nimport b from '@x/b';\n"
        );
    }

    #[test]
    fn rejects_overlap() {
        let edits = vec![TextEdit::replace(0, 10, "a"), TextEdit::replace(5, 15, "b")];
        assert_eq!(
            apply_edits("0123456789abcdef", &edits),
            Err(FixError::OverlappingEdits(0))
        );
    }

    #[test]
    fn rejects_out_of_range() {
        let edits = vec![TextEdit::replace(0, 15, "a")];
        assert!(matches!(
            apply_edits("short", &edits),
            Err(FixError::InvalidRange { .. })
        ));
    }

    #[test]
    fn rejects_split_character() {
        let edits = vec![TextEdit::replace(1, 2, "a")];
        assert!(matches!(
            apply_edits("é", &edits),
            Err(FixError::NotCharBoundary { .. })
        ));
    }

    #[test]
    fn empty_edits_return_source() {
        assert_eq!(apply_edits("abc", &[]).unwrap(), "abc");
    }

    #[test]
    fn collects_only_auto_fixes() {
        let location = Location::new(PathBuf::from("a.ts"), 1, 15).with_span(14, 6);
        let with_fix = Violation::new("ALIAS001", "import-alias", Severity::Warning, location.clone(), "m")
            .with_fix(Replacement::new(location.clone(), "'@x/a'"));
        let without = Violation::new("ALIAS001", "import-alias", Severity::Warning, location, "m");

        let edits = auto_fix_edits([&with_fix, &without]);
        assert_eq!(edits, vec![TextEdit::replace(14, 20, "'@x/a'")]);
    }
}

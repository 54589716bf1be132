//! Logical paths: `/`-normalized, project-relative path strings.
//!
//! The directory of the file being checked, an import specifier and an
//! alias target all share this one representation so they can be compared
//! and matched as plain strings, independent of the host separator.

use std::fmt;
use std::path::Path;

/// A `/`-delimited path that never contains a backslash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogicalPath(String);

impl LogicalPath {
    /// Creates a logical path, converting `\` separators to `/`.
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(normalize_separators(raw.as_ref()))
    }

    /// Derives the logical directory of `file`, truncated so that it begins
    /// at the first occurrence of `source_root`.
    ///
    /// Returns `None` when the file does not live under the source root, in
    /// which case the file is out of scope for canonicalization.
    ///
    /// ```
    /// use alias_lint_core::LogicalPath;
    /// use std::path::Path;
    ///
    /// let dir = LogicalPath::from_file(Path::new("app/imports/api/calls/index.ts"), "imports");
    /// assert_eq!(dir.unwrap().as_str(), "imports/api/calls");
    /// ```
    #[must_use]
    pub fn from_file(file: &Path, source_root: &str) -> Option<Self> {
        let full = normalize_separators(&file.to_string_lossy());
        let root: Vec<&str> = segments(source_root).collect();
        if root.is_empty() {
            return None;
        }

        let parts: Vec<&str> = segments(&full).collect();
        let (_file_name, dir) = parts.split_last()?;
        let start = dir
            .windows(root.len())
            .position(|window| window == root.as_slice())?;

        Some(Self(dir[start..].join("/")))
    }

    /// Returns the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the number of non-empty segments.
    #[must_use]
    pub fn depth(&self) -> usize {
        segments(&self.0).count()
    }

    /// Strips `count` trailing segments.
    ///
    /// Returns `None` when that would leave nothing, i.e. the result would
    /// climb out of the source root.
    #[must_use]
    pub fn ancestor(&self, count: usize) -> Option<Self> {
        let parts: Vec<&str> = segments(&self.0).collect();
        if count >= parts.len() {
            return None;
        }
        Some(Self(parts[..parts.len() - count].join("/")))
    }

    /// Appends segments to this path.
    #[must_use]
    pub fn join(&self, rest: &[&str]) -> Self {
        let mut joined = self.0.clone();
        for segment in rest {
            if !joined.is_empty() {
                joined.push('/');
            }
            joined.push_str(segment);
        }
        Self(joined)
    }

    /// Computes the relative path from this directory to `target`.
    ///
    /// Both sides are treated as directories below the same root. The result
    /// uses `..` for each step up and is empty when both are the same path.
    #[must_use]
    pub fn relative_to(&self, target: &str) -> String {
        let from: Vec<&str> = segments(&self.0).collect();
        let to: Vec<&str> = segments(target).collect();

        let common = from
            .iter()
            .zip(&to)
            .take_while(|(a, b)| a == b)
            .count();

        let ups = std::iter::repeat("..").take(from.len() - common);
        ups.chain(to[common..].iter().copied())
            .collect::<Vec<_>>()
            .join("/")
    }
}

impl fmt::Display for LogicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LogicalPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A relative specifier after lexical normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeSpecifier<'a> {
    /// Number of leading `..` steps.
    pub ups: usize,
    /// Forward segments after the last `..`.
    pub rest: Vec<&'a str>,
}

impl<'a> RelativeSpecifier<'a> {
    /// Normalizes `specifier` lexically: `.` segments are dropped and
    /// `name/..` pairs collapse.
    ///
    /// ```
    /// use alias_lint_core::RelativeSpecifier;
    ///
    /// let rel = RelativeSpecifier::parse("./../a/../b");
    /// assert_eq!(rel.ups, 1);
    /// assert_eq!(rel.rest, vec!["b"]);
    /// ```
    #[must_use]
    pub fn parse(specifier: &'a str) -> Self {
        let mut ups = 0;
        let mut rest: Vec<&str> = Vec::new();

        for segment in segments(specifier) {
            match segment {
                "." => {}
                ".." => {
                    if rest.pop().is_none() {
                        ups += 1;
                    }
                }
                name => rest.push(name),
            }
        }

        Self { ups, rest }
    }
}

/// Formats a relative path as an import specifier.
///
/// Paths that do not start with a `.` or `..` segment get a `./` prefix, and
/// a trailing bare `..` gets a `/` so it reads as a directory.
#[must_use]
pub fn to_relative_specifier(relative: &str) -> String {
    if relative.is_empty() {
        return "./".to_owned();
    }

    let first = relative.split('/').next().unwrap_or_default();
    let mut specifier = if first == "." || first == ".." {
        relative.to_owned()
    } else {
        format!("./{relative}")
    };

    let last = specifier.rsplit('/').next().unwrap_or_default();
    if last == "." || last == ".." {
        specifier.push('/');
    }

    specifier
}

fn normalize_separators(raw: &str) -> String {
    raw.replace('\\', "/")
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_file_truncates_at_source_root() {
        let dir = LogicalPath::from_file(
            Path::new("/home/dev/app/imports/api/calls/server/api/createCall.ts"),
            "imports",
        );
        assert_eq!(
            dir.as_ref().map(LogicalPath::as_str),
            Some("imports/api/calls/server/api")
        );
    }

    #[test]
    fn from_file_normalizes_backslashes() {
        let dir = LogicalPath::from_file(Path::new(r"C:\app\imports\lib\client\x.ts"), "imports");
        assert_eq!(dir.map(|d| d.to_string()).as_deref(), Some("imports/lib/client"));
    }

    #[test]
    fn from_file_outside_source_root_is_none() {
        assert!(LogicalPath::from_file(Path::new("src/lib/x.ts"), "imports").is_none());
    }

    #[test]
    fn from_file_does_not_match_partial_segment() {
        assert!(LogicalPath::from_file(Path::new("myimports/lib/x.ts"), "imports").is_none());
    }

    #[test]
    fn from_file_supports_nested_source_root() {
        let dir = LogicalPath::from_file(Path::new("pkg/src/app/ui/button.tsx"), "src/app");
        assert_eq!(dir.map(|d| d.to_string()).as_deref(), Some("src/app/ui"));
    }

    #[test]
    fn ancestor_strips_trailing_segments() {
        let p = LogicalPath::new("imports/api/calls/server/api");
        assert_eq!(p.ancestor(2).map(|a| a.to_string()).as_deref(), Some("imports/api/calls"));
        assert_eq!(p.ancestor(0), Some(p.clone()));
    }

    #[test]
    fn ancestor_cannot_leave_root() {
        let p = LogicalPath::new("imports/api");
        assert!(p.ancestor(2).is_none());
        assert!(p.ancestor(5).is_none());
    }

    #[test]
    fn join_appends_segments() {
        let p = LogicalPath::new("imports/api");
        assert_eq!(p.join(&["users", "model"]).as_str(), "imports/api/users/model");
        assert_eq!(p.join(&[]).as_str(), "imports/api");
    }

    #[test]
    fn relative_to_parent() {
        let p = LogicalPath::new("imports/api/calls/server/api");
        assert_eq!(p.relative_to("imports/api/calls"), "../..");
    }

    #[test]
    fn relative_to_sibling_branch() {
        let p = LogicalPath::new("imports/lib/client");
        assert_eq!(p.relative_to("imports/lib/server/x"), "../server/x");
    }

    #[test]
    fn relative_to_child_and_self() {
        let p = LogicalPath::new("imports/lib");
        assert_eq!(p.relative_to("imports/lib/client"), "client");
        assert_eq!(p.relative_to("imports/lib"), "");
    }

    #[test]
    fn relative_specifier_counts_leading_ups() {
        let rel = RelativeSpecifier::parse("../../../users");
        assert_eq!(rel.ups, 3);
        assert_eq!(rel.rest, vec!["users"]);
    }

    #[test]
    fn relative_specifier_trailing_slash() {
        let rel = RelativeSpecifier::parse("../../");
        assert_eq!(rel.ups, 2);
        assert!(rel.rest.is_empty());
    }

    #[test]
    fn relative_specifier_local_only() {
        let rel = RelativeSpecifier::parse("./helpers/format");
        assert_eq!(rel.ups, 0);
        assert_eq!(rel.rest, vec!["helpers", "format"]);
    }

    #[test]
    fn relative_specifier_collapses_inner_parent() {
        let rel = RelativeSpecifier::parse("../x/../y");
        assert_eq!(rel.ups, 1);
        assert_eq!(rel.rest, vec!["y"]);
    }

    #[test]
    fn specifier_formatting() {
        assert_eq!(to_relative_specifier(""), "./");
        assert_eq!(to_relative_specifier(".."), "../");
        assert_eq!(to_relative_specifier("../.."), "../../");
        assert_eq!(to_relative_specifier("../users"), "../users");
        assert_eq!(to_relative_specifier("client/x"), "./client/x");
        assert_eq!(to_relative_specifier(".hidden/x"), "./.hidden/x");
    }
}

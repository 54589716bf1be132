//! Alias tables: configured alias keys and the target paths they stand for.
//!
//! Keys and targets are patterns with at most one `*` wildcard, where the
//! wildcard stands for one or more word characters or slashes. Entries are
//! kept in specificity order so that the most deeply nested target wins
//! whenever several aliases could describe the same concrete path.

use std::cmp::Ordering;

use tracing::warn;

/// Wildcard marker used in alias keys and targets.
pub const WILDCARD: char = '*';

/// A key or target pattern split around its optional wildcard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    prefix: String,
    suffix: Option<String>,
}

impl PathPattern {
    /// Parses a pattern. Returns `None` if it carries more than one wildcard.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.split_once(WILDCARD) {
            None => Some(Self {
                raw: raw.to_owned(),
                prefix: raw.to_owned(),
                suffix: None,
            }),
            Some((_, suffix)) if suffix.contains(WILDCARD) => None,
            Some((prefix, suffix)) => Some(Self {
                raw: raw.to_owned(),
                prefix: prefix.to_owned(),
                suffix: Some(suffix.to_owned()),
            }),
        }
    }

    /// The pattern as configured.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Whether the pattern carries a wildcard.
    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        self.suffix.is_some()
    }

    /// The literal text before the wildcard (the whole pattern if literal).
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The pattern with its wildcard marker removed.
    #[must_use]
    pub fn stripped(&self) -> String {
        match &self.suffix {
            Some(suffix) => format!("{}{suffix}", self.prefix),
            None => self.raw.clone(),
        }
    }

    /// Returns the part of `path` covered by the wildcard.
    ///
    /// Literal patterns never capture. The captured remainder is one or more
    /// word characters (`[A-Za-z0-9_]`) or slashes, so `.`/`..` segments,
    /// dashes and file extensions never match.
    #[must_use]
    pub fn capture<'p>(&self, path: &'p str) -> Option<&'p str> {
        let suffix = self.suffix.as_deref()?;
        let remainder = path.strip_prefix(&self.prefix)?.strip_suffix(suffix)?;
        is_wildcard_remainder(remainder).then_some(remainder)
    }

    /// Whether `path` matches the whole pattern.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        if self.is_wildcard() {
            self.capture(path).is_some()
        } else {
            self.raw == path
        }
    }

    /// Substitutes `captured` for the wildcard.
    ///
    /// Returns `None` for literal patterns.
    #[must_use]
    pub fn expand(&self, captured: &str) -> Option<String> {
        let suffix = self.suffix.as_deref()?;
        Some(format!("{}{captured}{suffix}", self.prefix))
    }
}

fn is_wildcard_remainder(remainder: &str) -> bool {
    !remainder.is_empty()
        && remainder
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '/')
}

/// One configured alias: a key and the target it resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasEntry {
    key: PathPattern,
    target: PathPattern,
}

impl AliasEntry {
    /// Builds an entry from the first configured target, returning `None`
    /// if there is none or either pattern carries more than one wildcard.
    #[must_use]
    pub fn new(key: impl Into<String>, targets: Vec<String>) -> Option<Self> {
        let key = key.into();
        let primary = targets.first()?;
        Some(Self {
            key: PathPattern::parse(&key)?,
            target: PathPattern::parse(primary)?,
        })
    }

    /// The alias key as configured (e.g. `@scope/lib/*`).
    #[must_use]
    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    /// The primary target as configured (e.g. `imports/lib/*`).
    #[must_use]
    pub fn target(&self) -> &str {
        self.target.as_str()
    }

    /// The parsed key pattern.
    #[must_use]
    pub fn key_pattern(&self) -> &PathPattern {
        &self.key
    }

    /// The parsed primary target pattern.
    #[must_use]
    pub fn target_pattern(&self) -> &PathPattern {
        &self.target
    }

    /// Maps a specifier written with this alias to the project path it
    /// denotes.
    ///
    /// A wildcard key carries its captured remainder over to the target; a
    /// literal key maps to its literal target. Mixed forms have no
    /// expansion.
    #[must_use]
    pub fn expand(&self, specifier: &str) -> Option<String> {
        if self.key.is_wildcard() {
            let captured = self.key.capture(specifier)?;
            return self.target.expand(captured);
        }
        if self.target.is_wildcard() || self.key.as_str() != specifier {
            return None;
        }
        Some(self.target.as_str().to_owned())
    }

    /// Maps a project path back to a specifier written with this alias.
    ///
    /// A path deeper than a literal target has no alias form.
    #[must_use]
    pub fn alias_for(&self, path: &str) -> Option<String> {
        if self.key.is_wildcard() {
            let captured = self.target.capture(path)?;
            return self.key.expand(captured);
        }
        if self.target.is_wildcard() || self.target.as_str() != path {
            return None;
        }
        Some(self.key.as_str().to_owned())
    }

    fn depth(&self) -> usize {
        self.target.stripped().split('/').count()
    }

    fn specificity(&self, other: &Self) -> Ordering {
        other
            .depth()
            .cmp(&self.depth())
            .then_with(|| other.target().len().cmp(&self.target().len()))
            .then_with(|| self.key().cmp(other.key()))
    }
}

/// The alias an import path resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult<'a> {
    entry: &'a AliasEntry,
}

impl<'a> MatchResult<'a> {
    /// The matched alias key.
    #[must_use]
    pub fn alias_key(&self) -> &'a str {
        self.entry.key()
    }

    /// The matched alias's primary target.
    #[must_use]
    pub fn alias_target(&self) -> &'a str {
        self.entry.target()
    }

    /// The matched entry.
    #[must_use]
    pub fn entry(&self) -> &'a AliasEntry {
        self.entry
    }
}

/// Immutable, specificity-sorted set of aliases.
///
/// Built once per configuration and shared read-only by every check.
#[derive(Debug, Clone)]
pub struct AliasTable {
    entries: Vec<AliasEntry>,
}

impl AliasTable {
    /// Builds a table from raw `key -> targets` pairs.
    ///
    /// Returns `None` ("disabled") when no usable alias is configured.
    /// Entries without targets or with more than one wildcard are skipped.
    ///
    /// ```
    /// use alias_lint_core::AliasTable;
    ///
    /// let table = AliasTable::build([
    ///     ("@app/lib/*", vec!["src/lib/*".to_string()]),
    ///     ("@app/ui", vec!["src/lib/ui".to_string()]),
    /// ])
    /// .unwrap();
    ///
    /// assert_eq!(table.match_by_key("@app/lib/net").unwrap().alias_key(), "@app/lib/*");
    /// assert!(AliasTable::build(Vec::<(String, Vec<String>)>::new()).is_none());
    /// ```
    #[must_use]
    pub fn build<I, K>(raw: I) -> Option<Self>
    where
        I: IntoIterator<Item = (K, Vec<String>)>,
        K: Into<String>,
    {
        let mut entries: Vec<AliasEntry> = Vec::new();
        for (key, targets) in raw {
            let key = key.into();
            if targets.len() > 1 {
                warn!(
                    "Alias '{}' lists {} targets; only '{}' is used",
                    key,
                    targets.len(),
                    targets[0]
                );
            }
            match AliasEntry::new(key.clone(), targets) {
                Some(entry) => entries.push(entry),
                None => warn!("Skipping alias '{}': needs a target and at most one '*'", key),
            }
        }

        if entries.is_empty() {
            return None;
        }

        entries.sort_by(AliasEntry::specificity);
        Some(Self { entries })
    }

    /// Entries in specificity order.
    #[must_use]
    pub fn entries(&self) -> &[AliasEntry] {
        &self.entries
    }

    /// Number of aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a built table; present for API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether an alias with exactly this key exists.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key() == key)
    }

    /// Finds the most specific alias whose key matches `path` entirely.
    #[must_use]
    pub fn match_by_key(&self, path: &str) -> Option<MatchResult<'_>> {
        self.entries
            .iter()
            .find(|e| e.key.matches(path))
            .map(|entry| MatchResult { entry })
    }

    /// Finds the most specific alias whose target matches one of `paths`.
    ///
    /// In `strict` mode a candidate must equal a target verbatim; the first
    /// candidate equal to any target decides. Otherwise wildcard targets
    /// match by pattern and the first entry matching any candidate wins.
    #[must_use]
    pub fn match_by_target<S: AsRef<str>>(
        &self,
        paths: &[S],
        strict: bool,
    ) -> Option<MatchResult<'_>> {
        if strict {
            let hit = paths
                .iter()
                .map(AsRef::as_ref)
                .find(|p| self.entries.iter().any(|e| e.target() == *p))?;
            return self
                .entries
                .iter()
                .find(|e| e.target() == hit)
                .map(|entry| MatchResult { entry });
        }

        self.covering_targets(paths).next()
    }

    /// Every alias whose target matches one of `paths`, most specific first.
    pub fn covering_targets<'t: 'p, 'p, S: AsRef<str>>(
        &'t self,
        paths: &'p [S],
    ) -> impl Iterator<Item = MatchResult<'t>> + 'p {
        self.entries
            .iter()
            .filter(|e| paths.iter().any(|p| e.target.matches(p.as_ref())))
            .map(|entry| MatchResult { entry })
    }

    /// Whether the table also defines the complementary form of `key`:
    /// `k/*` for a literal `k`, or `k` for a wildcard `k/*`.
    #[must_use]
    pub fn has_sibling_alias_variant(&self, key: &str) -> bool {
        let sibling = if key.contains(WILDCARD) {
            key.replacen("/*", "", 1)
        } else {
            format!("{key}/*")
        };
        sibling != key && self.contains_key(&sibling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope_table() -> AliasTable {
        AliasTable::build([
            ("@scope/lib", vec!["imports/lib".to_string()]),
            ("@scope/lib/*", vec!["imports/lib/*".to_string()]),
            ("@scope/api/*", vec!["imports/api/*".to_string()]),
            (
                "@scope/hooks",
                vec!["imports/lib/client/reactHooks".to_string()],
            ),
        ])
        .expect("table should build")
    }

    fn keys(table: &AliasTable) -> Vec<&str> {
        table.entries().iter().map(AliasEntry::key).collect()
    }

    #[test]
    fn pattern_rejects_second_wildcard() {
        assert!(PathPattern::parse("a/*/b/*").is_none());
        assert!(PathPattern::parse("a/*").is_some());
    }

    #[test]
    fn wildcard_captures_one_or_more_segments() {
        let p = PathPattern::parse("imports/api/*").unwrap();
        assert_eq!(p.capture("imports/api/users"), Some("users"));
        assert_eq!(p.capture("imports/api/calls/server"), Some("calls/server"));
        assert_eq!(p.capture("imports/api/"), None);
        assert_eq!(p.capture("imports/api"), None);
    }

    #[test]
    fn wildcard_rejects_dot_segments_and_markers() {
        let p = PathPattern::parse("@scope/lib/*").unwrap();
        assert_eq!(p.capture("@scope/lib/../x"), None);
        assert_eq!(p.capture("@scope/lib/./x"), None);
        assert_eq!(p.capture("@scope/lib/x/*"), None);
    }

    #[test]
    fn wildcard_only_captures_word_characters() {
        let p = PathPattern::parse("@scope/api/*").unwrap();
        assert_eq!(p.capture("@scope/api/date-utils"), None);
        assert_eq!(p.capture("@scope/api/users/@x"), None);
        assert_eq!(p.capture("@scope/api/date_utils2"), Some("date_utils2"));
    }

    #[test]
    fn dashed_and_dotted_specifiers_match_no_key() {
        let table = scope_table();
        assert!(table.match_by_key("@scope/api/date-utils").is_none());
        assert!(table.match_by_key("@scope/lib/x.js").is_none());
        assert!(table.match_by_target(&["imports/api/date-utils"], false).is_none());
    }

    #[test]
    fn wildcard_in_the_middle() {
        let p = PathPattern::parse("src/*/index").unwrap();
        assert_eq!(p.capture("src/widgets/index"), Some("widgets"));
        assert_eq!(p.expand("forms").as_deref(), Some("src/forms/index"));
        assert!(!p.matches("src/widgets/main"));
    }

    #[test]
    fn literal_pattern_matches_exactly() {
        let p = PathPattern::parse("@scope/lib").unwrap();
        assert!(p.matches("@scope/lib"));
        assert!(!p.matches("@scope/lib/x"));
        assert_eq!(p.capture("@scope/lib"), None);
    }

    #[test]
    fn entries_sorted_by_target_depth_then_length() {
        let table = scope_table();
        assert_eq!(
            keys(&table),
            vec!["@scope/hooks", "@scope/api/*", "@scope/lib/*", "@scope/lib"]
        );
    }

    #[test]
    fn sort_is_independent_of_insertion_order() {
        let forward = scope_table();
        let reversed = AliasTable::build([
            (
                "@scope/hooks",
                vec!["imports/lib/client/reactHooks".to_string()],
            ),
            ("@scope/api/*", vec!["imports/api/*".to_string()]),
            ("@scope/lib/*", vec!["imports/lib/*".to_string()]),
            ("@scope/lib", vec!["imports/lib".to_string()]),
        ])
        .unwrap();
        assert_eq!(keys(&forward), keys(&reversed));
    }

    #[test]
    fn empty_table_is_disabled() {
        assert!(AliasTable::build(Vec::<(&str, Vec<String>)>::new()).is_none());
    }

    #[test]
    fn invalid_entries_are_skipped() {
        let table = AliasTable::build([
            ("@bad", Vec::new()),
            ("@bad/*/x/*", vec!["src/*/x/*".to_string()]),
            ("@ok", vec!["src/ok".to_string()]),
        ])
        .unwrap();
        assert_eq!(keys(&table), vec!["@ok"]);
    }

    #[test]
    fn only_invalid_entries_is_disabled() {
        assert!(AliasTable::build([("@bad", Vec::<String>::new())]).is_none());
    }

    #[test]
    fn match_by_key_prefers_specific_target() {
        let table = scope_table();
        let m = table.match_by_key("@scope/lib/client/reactHooks").unwrap();
        assert_eq!(m.alias_key(), "@scope/lib/*");
        assert_eq!(m.alias_target(), "imports/lib/*");

        assert_eq!(
            table.match_by_key("@scope/lib").map(|m| m.alias_key()),
            Some("@scope/lib")
        );
        assert!(table.match_by_key("../../users").is_none());
        assert!(table.match_by_key("react").is_none());
    }

    #[test]
    fn match_by_target_non_strict_uses_patterns() {
        let table = scope_table();
        let m = table
            .match_by_target(&["imports/lib/client/reactHooks/x", "imports/lib/client/reactHooks"], false)
            .unwrap();
        assert_eq!(m.alias_key(), "@scope/hooks");

        let m = table.match_by_target(&["imports/api/users"], false).unwrap();
        assert_eq!(m.alias_key(), "@scope/api/*");
    }

    #[test]
    fn match_by_target_strict_requires_equality() {
        let table = scope_table();
        assert!(table.match_by_target(&["imports/api/users"], true).is_none());
        let m = table
            .match_by_target(&["imports/lib/client/reactHooks"], true)
            .unwrap();
        assert_eq!(m.alias_key(), "@scope/hooks");
    }

    #[test]
    fn covering_targets_lists_every_match_in_order() {
        let table = scope_table();
        let paths = [
            "imports/lib/client/reactHooks/useTimer",
            "imports/lib/client/reactHooks",
        ];
        let covering: Vec<&str> = table
            .covering_targets(&paths)
            .map(|m| m.alias_key())
            .collect();
        assert_eq!(covering, vec!["@scope/hooks", "@scope/lib/*"]);
    }

    #[test]
    fn extra_targets_are_ignored() {
        let table = AliasTable::build([(
            "@a/*",
            vec!["src/a/*".to_string(), "lib/a/*".to_string()],
        )])
        .unwrap();
        assert_eq!(table.entries()[0].target(), "src/a/*");
        assert!(table.match_by_target(&["lib/a/x"], false).is_none());
    }

    #[test]
    fn nested_targets_prefer_deeper_alias() {
        let table = AliasTable::build([
            ("@ab/*", vec!["a/b/*".to_string()]),
            ("@abc/*", vec!["a/b/c/*".to_string()]),
        ])
        .unwrap();
        let m = table.match_by_target(&["a/b/c/d"], false).unwrap();
        assert_eq!(m.alias_key(), "@abc/*");
        let m = table.match_by_target(&["a/b/x"], false).unwrap();
        assert_eq!(m.alias_key(), "@ab/*");
    }

    #[test]
    fn sibling_variants() {
        let table = scope_table();
        assert!(table.has_sibling_alias_variant("@scope/lib"));
        assert!(table.has_sibling_alias_variant("@scope/lib/*"));
        assert!(!table.has_sibling_alias_variant("@scope/api/*"));
        assert!(!table.has_sibling_alias_variant("@scope/hooks"));
    }

    #[test]
    fn entry_expand_and_alias_for_are_inverse() {
        let entry = AliasEntry::new("@scope/api/*", vec!["imports/api/*".to_string()]).unwrap();
        assert_eq!(entry.expand("@scope/api/users").as_deref(), Some("imports/api/users"));
        assert_eq!(entry.alias_for("imports/api/users").as_deref(), Some("@scope/api/users"));
    }

    #[test]
    fn literal_entry_has_no_deeper_alias_form() {
        let entry = AliasEntry::new("@hooks", vec!["src/hooks".to_string()]).unwrap();
        assert_eq!(entry.alias_for("src/hooks").as_deref(), Some("@hooks"));
        assert_eq!(entry.alias_for("src/hooks/useX"), None);
    }

    #[test]
    fn mixed_wildcard_forms_do_not_expand() {
        let entry = AliasEntry::new("@lib", vec!["src/lib/*".to_string()]).unwrap();
        assert_eq!(entry.expand("@lib"), None);
        let entry = AliasEntry::new("@lib/*", vec!["src/lib".to_string()]).unwrap();
        assert_eq!(entry.expand("@lib/x"), None);
    }
}

//! Import path canonicalization.
//!
//! Given an [`AliasTable`], the logical directory of the importing file and
//! the literal specifier it uses, [`PathCanonicalizer`] decides whether the
//! specifier is already in canonical form or should be replaced by a
//! specific alias or relative path.
//!
//! Two branches exist per call:
//!
//! - the specifier matches an alias key: expand it, prefer a more specific
//!   alias if one names the expanded path exactly, otherwise keep the alias
//!   unless the file may not reference that alias (then go relative);
//! - the specifier is relative and climbs with `..`: take the most specific
//!   alias whose target covers the resolved path and can spell it, and
//!   suggest it when allowed.

use tracing::debug;

use crate::alias::{AliasTable, MatchResult};
use crate::logical::{to_relative_specifier, LogicalPath, RelativeSpecifier};

/// Outcome of canonicalizing one import specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The specifier is already canonical.
    Unchanged,
    /// The specifier should be replaced with this one.
    Replace(String),
}

impl Verdict {
    /// Returns the replacement specifier, if any.
    #[must_use]
    pub fn replacement(&self) -> Option<&str> {
        match self {
            Self::Unchanged => None,
            Self::Replace(s) => Some(s),
        }
    }
}

/// Computes canonical import specifiers against an alias table.
#[derive(Debug, Clone, Copy)]
pub struct PathCanonicalizer<'a> {
    table: &'a AliasTable,
}

impl<'a> PathCanonicalizer<'a> {
    /// Creates a canonicalizer over `table`.
    #[must_use]
    pub fn new(table: &'a AliasTable) -> Self {
        Self { table }
    }

    /// Canonicalizes `specifier` as written in a file living in `current`.
    ///
    /// ```
    /// use alias_lint_core::{AliasTable, LogicalPath, PathCanonicalizer, Verdict};
    ///
    /// let table = AliasTable::build([
    ///     ("@scope/api/*", vec!["imports/api/*".to_string()]),
    /// ])
    /// .unwrap();
    /// let canonicalizer = PathCanonicalizer::new(&table);
    /// let current = LogicalPath::new("imports/api/calls/server/api");
    ///
    /// assert_eq!(
    ///     canonicalizer.canonicalize(&current, "../../../users"),
    ///     Verdict::Replace("@scope/api/users".into())
    /// );
    /// ```
    #[must_use]
    pub fn canonicalize(&self, current: &LogicalPath, specifier: &str) -> Verdict {
        let specifier = match specifier {
            "" => return Verdict::Unchanged,
            "." => "./",
            ".." => "../",
            other => other,
        };

        match self.table.match_by_key(specifier) {
            Some(alias) => self.canonicalize_alias(current, specifier, alias),
            None => self.canonicalize_relative(current, specifier),
        }
    }

    fn canonicalize_alias(
        &self,
        current: &LogicalPath,
        specifier: &str,
        alias: MatchResult<'_>,
    ) -> Verdict {
        let Some(expanded) = alias.entry().expand(specifier) else {
            debug!("'{}' has no expansion through '{}'", specifier, alias.alias_key());
            return Verdict::Unchanged;
        };

        if let Some(alternate) = self.table.match_by_target(&[expanded.as_str()], true) {
            let key = alternate.alias_key();
            if key != specifier
                && !alternate.entry().key_pattern().is_wildcard()
                && self.can_use_alias(current, &expanded, alternate)
            {
                debug!("'{}' is named exactly by alias '{}'", specifier, key);
                return Verdict::Replace(key.to_owned());
            }
        }

        if self.can_use_alias(current, &expanded, alias) {
            return Verdict::Unchanged;
        }

        let relative = to_relative_specifier(&current.relative_to(&expanded));
        debug!(
            "'{}' from {} must be relative: '{}'",
            specifier, current, relative
        );
        Verdict::Replace(relative)
    }

    fn canonicalize_relative(&self, current: &LogicalPath, specifier: &str) -> Verdict {
        let relative = RelativeSpecifier::parse(specifier);
        if relative.ups == 0 {
            return Verdict::Unchanged;
        }

        let Some(base) = current.ancestor(relative.ups) else {
            debug!("'{}' climbs out of the source root from {}", specifier, current);
            return Verdict::Unchanged;
        };

        let candidates = candidate_paths(&base, &relative.rest);
        let resolved = base.join(&relative.rest);

        // A literal target shallower than `resolved` has no alias form for
        // it; the next covering alias is tried instead.
        for alias in self.table.covering_targets(&candidates) {
            if !self.can_use_alias(current, resolved.as_str(), alias) {
                return Verdict::Unchanged;
            }
            if let Some(aliased) = alias.entry().alias_for(resolved.as_str()) {
                debug!("'{}' resolves into alias '{}'", specifier, alias.alias_key());
                return Verdict::Replace(aliased);
            }
        }
        Verdict::Unchanged
    }

    /// Decides whether a file in `current` should reach `candidate` through
    /// `alias` rather than a relative path.
    ///
    /// A file never aliases its own directory or the alias target it lives
    /// in. Files outside every aliased region may use any alias. For a
    /// wildcard alias without a literal sibling, only imports crossing into
    /// another sub-module of the target go through the alias. Otherwise a
    /// file does not alias-reference the region it belongs to.
    #[must_use]
    pub fn can_use_alias(
        &self,
        current: &LogicalPath,
        candidate: &str,
        alias: MatchResult<'_>,
    ) -> bool {
        let current = current.as_str();
        if current == candidate || current == alias.alias_target() {
            return false;
        }

        let Some(owner) = self.table.match_by_target(&[current], false) else {
            return true;
        };

        let key = alias.alias_key();
        let target = alias.entry().target_pattern();
        if target.is_wildcard() && !self.table.has_sibling_alias_variant(key) {
            let prefix = target.prefix();
            let Some(current_module) = owning_module(current, prefix) else {
                return true;
            };
            return owning_module(candidate, prefix)
                .is_some_and(|candidate_module| candidate_module != current_module);
        }

        let owner_key = owner.alias_key();
        owner_key != key && owner_key != format!("{key}/*")
    }
}

/// First segment of `path` below `prefix`, i.e. the sub-module owning it.
fn owning_module<'p>(path: &'p str, prefix: &str) -> Option<&'p str> {
    path.strip_prefix(prefix)?
        .split('/')
        .next()
        .filter(|s| !s.is_empty())
}

/// Candidate paths for a relative import, most specific first.
///
/// Each prefix of `rest` (longest first, down to `base` itself) is offered
/// both as a wildcard family (`path/*`) and as an exact module path.
fn candidate_paths(base: &LogicalPath, rest: &[&str]) -> Vec<String> {
    (0..=rest.len())
        .rev()
        .flat_map(|len| {
            let path = base.join(&rest[..len]).to_string();
            [format!("{path}/*"), path]
        })
        .collect()
}

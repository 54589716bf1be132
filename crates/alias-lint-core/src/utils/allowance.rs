//! Comment directives that silence a rule for one import.
//!
//! ```text
//! // alias-lint: allow(import-alias) reason="generated bridge"
//! import { x } from '../../legacy';
//! ```
//!
//! The directive may sit on the line above the import or trail it on the
//! same line. Block comments (`/* alias-lint: allow(...) */`) are accepted
//! too.

use std::collections::BTreeSet;

const DIRECTIVE: &str = "alias-lint:";

/// Result of looking for an allow directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowCheck {
    /// No directive covers the rule.
    Denied,
    /// A directive covers the rule.
    Allowed {
        /// The reason given, if any.
        reason: Option<String>,
    },
}

impl AllowCheck {
    /// Returns true if allowed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Returns the reason if allowed.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allowed { reason } => reason.as_deref(),
            Self::Denied => None,
        }
    }
}

#[derive(Debug)]
struct AllowDirective {
    rules: BTreeSet<String>,
    reason: Option<String>,
}

impl AllowDirective {
    fn covers(&self, rule: &str) -> bool {
        self.rules.contains(rule) || self.rules.contains("all")
    }
}

/// Checks whether `rule` is allowed at `line` (1-indexed) of `content`.
///
/// ```
/// use alias_lint_core::utils::check_allow;
///
/// let src = "// alias-lint: allow(import-alias)\nimport a from '../../a';\n";
/// assert!(check_allow(src, 2, "import-alias").is_allowed());
/// assert!(!check_allow(src, 2, "other").is_allowed());
/// ```
#[must_use]
pub fn check_allow(content: &str, line: usize, rule: &str) -> AllowCheck {
    if line == 0 {
        return AllowCheck::Denied;
    }
    let lines: Vec<&str> = content.lines().collect();

    // Same line first, so a trailing directive wins over one above.
    for idx in [line, line - 1] {
        let Some(text) = idx.checked_sub(1).and_then(|i| lines.get(i)) else {
            continue;
        };
        if let Some(directive) = find_directive(text) {
            if directive.covers(rule) {
                return AllowCheck::Allowed {
                    reason: directive.reason,
                };
            }
        }
    }

    AllowCheck::Denied
}

fn find_directive(line: &str) -> Option<AllowDirective> {
    let comment = line
        .find("//")
        .map(|i| &line[i + 2..])
        .or_else(|| {
            let start = line.find("/*")?;
            let body = &line[start + 2..];
            Some(body.find("*/").map_or(body, |end| &body[..end]))
        })?;

    parse_directive(comment.trim_start_matches('/').trim())
}

fn parse_directive(comment: &str) -> Option<AllowDirective> {
    let body = comment.strip_prefix(DIRECTIVE)?.trim_start();
    let body = body.strip_prefix("allow(")?;
    let close = body.find(')')?;

    let rules: BTreeSet<String> = body[..close]
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();
    if rules.is_empty() {
        return None;
    }

    let reason = body[close + 1..]
        .trim()
        .strip_prefix("reason=")
        .and_then(|r| r.trim().strip_prefix('"'))
        .and_then(|r| r.find('"').map(|end| r[..end].to_string()));

    Some(AllowDirective { rules, reason })
}

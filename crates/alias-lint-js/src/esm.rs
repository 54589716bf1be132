//! ES module / CommonJS import extractor.
//!
//! Module references are found with a handful of regular expressions.
//! Matches that start inside a comment or a string literal are dropped, so
//! commented-out imports and strings that merely look like imports are not
//! reported.

use std::collections::BTreeMap;
use std::ops::Range;

use regex::{Captures, Regex};
use tracing::trace;

use crate::extractor::{ExtractorError, FileAnalysis, ImportInfo, ImportKind, LanguageExtractor};

/// Single- or double-quoted specifier; the body lands in `sq` or `dq`.
const STRING_LITERAL: &str = r#"(?:'(?P<sq>[^'\r\n]*)'|"(?P<dq>[^"\r\n]*)")"#;

/// Extracts module specifiers from JavaScript and TypeScript source.
#[derive(Debug, Clone)]
pub struct EsModuleExtractor {
    from_clause: Regex,
    side_effect: Regex,
    call: Regex,
}

impl EsModuleExtractor {
    /// Creates a new extractor.
    ///
    /// # Errors
    ///
    /// Returns an error if an import pattern fails to compile.
    pub fn new() -> Result<Self, ExtractorError> {
        Ok(Self {
            from_clause: Regex::new(&format!(
                r#"(?m)^[ \t]*(?:import|export)\b[^;'"`]*?\bfrom\s*{STRING_LITERAL}"#
            ))?,
            side_effect: Regex::new(&format!(r"(?m)^[ \t]*import\s*{STRING_LITERAL}"))?,
            call: Regex::new(&format!(
                r"\b(?P<callee>require|import)\s*\(\s*{STRING_LITERAL}\s*\)"
            ))?,
        })
    }

    fn collect(
        source: &str,
        regex: &Regex,
        non_code: &[Range<usize>],
        found: &mut BTreeMap<usize, (usize, String, char, ImportKind)>,
        kind_of: impl Fn(&Captures<'_>) -> Option<ImportKind>,
    ) {
        for caps in regex.captures_iter(source) {
            let Some(whole) = caps.get(0) else { continue };
            if in_spans(non_code, whole.start()) {
                trace!("Skipping import-like text at byte {}", whole.start());
                continue;
            }
            let Some(kind) = kind_of(&caps) else { continue };

            let (body, quote) = match (caps.name("sq"), caps.name("dq")) {
                (Some(m), _) => (m, '\''),
                (None, Some(m)) => (m, '"'),
                (None, None) => continue,
            };
            found
                .entry(body.start() - 1)
                .or_insert_with(|| (body.len() + 2, body.as_str().to_owned(), quote, kind));
        }
    }
}

impl LanguageExtractor for EsModuleExtractor {
    fn language_id(&self) -> &'static str {
        "ecmascript"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".js", ".jsx", ".ts", ".tsx", ".mjs", ".cjs", ".mts", ".cts"]
    }

    fn analyze(&self, source: &str) -> FileAnalysis {
        let non_code = non_code_spans(source);
        let mut found = BTreeMap::new();

        Self::collect(source, &self.from_clause, &non_code, &mut found, |_| {
            Some(ImportKind::Static)
        });
        Self::collect(source, &self.side_effect, &non_code, &mut found, |_| {
            Some(ImportKind::SideEffect)
        });
        Self::collect(source, &self.call, &non_code, &mut found, |caps| {
            let callee = caps.name("callee")?;
            // `obj.require('x')` is a method call, not a module reference.
            if source[..callee.start()].ends_with('.') {
                return None;
            }
            Some(if callee.as_str() == "require" {
                ImportKind::Require
            } else {
                ImportKind::Dynamic
            })
        });

        let line_starts = line_starts(source);
        let imports = found
            .into_iter()
            .map(|(offset, (length, specifier, quote, kind))| {
                let line = line_starts.partition_point(|&start| start <= offset);
                let column = offset - line_starts[line - 1];
                ImportInfo {
                    line,
                    column,
                    offset,
                    length,
                    specifier,
                    quote,
                    kind,
                }
            })
            .collect();

        FileAnalysis {
            file_path: std::path::PathBuf::new(),
            imports,
        }
    }
}

fn line_starts(source: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(source.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}

fn in_spans(spans: &[Range<usize>], pos: usize) -> bool {
    let idx = spans.partition_point(|s| s.end <= pos);
    spans.get(idx).is_some_and(|s| s.start <= pos)
}

/// Byte ranges of comments and string/template literals, in order.
fn non_code_spans(source: &str) -> Vec<Range<usize>> {
    let bytes = source.as_bytes();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        match (bytes[i], bytes.get(i + 1)) {
            (b'/', Some(b'/')) => {
                i = source[i..].find('\n').map_or(bytes.len(), |p| i + p);
            }
            (b'/', Some(b'*')) => {
                i = source[i + 2..].find("*/").map_or(bytes.len(), |p| i + p + 4);
            }
            (quote @ (b'\'' | b'"' | b'`'), _) => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    if bytes[i] == b'\\' {
                        i += 1;
                    } else if bytes[i] == b'\n' && quote != b'`' {
                        break;
                    }
                    i += 1;
                }
                i = (i + 1).min(bytes.len());
            }
            _ => {
                i += 1;
                continue;
            }
        }
        spans.push(start..i);
    }

    spans
}

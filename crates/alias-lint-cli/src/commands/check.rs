//! Check command implementation.

use alias_lint_core::fix::{apply_edits, auto_fix_edits};
use alias_lint_core::{AnalyzerConfig, LintResult};
use alias_lint_js::{AliasRuleEngine, EsModuleExtractor, LanguageExtractor};
use anyhow::{Context, Result};
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::output::{self, Sources};
use crate::config_resolver;
use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    fix: bool,
    exclude: Vec<String>,
    explicit_config: Option<&Path>,
) -> Result<()> {
    let mut config = config_resolver::resolve(path, explicit_config).load()?;
    config.analyzer.exclude.extend(exclude);

    let Some(engine) = AliasRuleEngine::new(&config) else {
        tracing::warn!("No [aliases] configured, nothing to check");
        return output::print(&LintResult::new(), format, &Sources::new());
    };
    if fix && !config.fixable {
        tracing::warn!("--fix has no effect while `fixable = false`");
    }

    let root = if config.analyzer.root.is_absolute() {
        config.analyzer.root.clone()
    } else {
        path.join(&config.analyzer.root)
    };

    let (result, sources) = lint(&root, &config.analyzer, &engine, fix)?;

    output::print(&result, format, &sources)?;

    if result.files_fixed > 0 {
        tracing::info!("Fixed imports in {} file(s)", result.files_fixed);
    }
    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

/// Checks every file under `root`, rewriting auto-fixable imports when
/// `fix` is set. Fixed violations are not reported.
fn lint(
    root: &Path,
    analyzer: &AnalyzerConfig,
    engine: &AliasRuleEngine,
    fix: bool,
) -> Result<(LintResult, Sources)> {
    let extractor = EsModuleExtractor::new()?;
    let extensions = checked_extensions(analyzer, &extractor);
    let files = discover_files(root, analyzer, &extensions)?;

    tracing::info!(
        "Checking {} {} files with {} aliases",
        files.len(),
        extractor.language_id(),
        engine.table().len()
    );

    let mut result = LintResult::new();
    let mut sources = HashMap::new();

    for file in &files {
        let Some(dir) = engine.logical_dir(file) else {
            tracing::debug!("Skipping {}: outside source root", file.display());
            continue;
        };

        let content = fs::read_to_string(file)
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let rel = file.strip_prefix(root).unwrap_or(file).to_path_buf();

        let mut analysis = extractor.analyze(&content);
        analysis.file_path = rel.clone();

        let mut violations = engine.check_in(&dir, &analysis, &content);
        result.files_checked += 1;

        if fix {
            let edits = auto_fix_edits(&violations);
            if !edits.is_empty() {
                let fixed = apply_edits(&content, &edits)
                    .with_context(|| format!("Failed to fix {}", file.display()))?;
                fs::write(file, fixed)
                    .with_context(|| format!("Failed to write {}", file.display()))?;
                tracing::debug!("Applied {} fix(es) to {}", edits.len(), rel.display());
                result.files_fixed += 1;
                violations.retain(|v| v.fix.is_none());
            }
        }

        if !violations.is_empty() {
            sources.insert(rel, content);
        }
        result.violations.extend(violations);
    }

    result.sort();
    Ok((result, sources))
}

/// Configured extensions the extractor can parse; the others are dropped
/// with a warning.
fn checked_extensions<'c>(
    analyzer: &'c AnalyzerConfig,
    extractor: &dyn LanguageExtractor,
) -> Vec<&'c str> {
    let supported = extractor.extensions();
    analyzer
        .extensions
        .iter()
        .map(String::as_str)
        .filter(|ext| {
            let known = supported.iter().any(|s| s == ext);
            if !known {
                tracing::warn!(
                    "Ignoring extension '{}': not a {} source",
                    ext,
                    extractor.language_id()
                );
            }
            known
        })
        .collect()
}

fn discover_files(
    root: &Path,
    analyzer: &AnalyzerConfig,
    extensions: &[&str],
) -> Result<Vec<PathBuf>> {
    let mut overrides = OverrideBuilder::new(root);
    for pattern in &analyzer.exclude {
        overrides
            .add(&format!("!{pattern}"))
            .with_context(|| format!("Invalid exclude pattern: {pattern}"))?;
    }

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(false)
        .git_ignore(analyzer.respect_gitignore)
        .require_git(false)
        .overrides(overrides.build()?);

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{e}"))
            .unwrap_or_default();
        if extensions.iter().any(|e| *e == ext) {
            files.push(path.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

//! Resolve command: the canonical form of one specifier.

use alias_lint_core::Verdict;
use alias_lint_js::AliasRuleEngine;
use anyhow::{Context, Result};
use std::path::Path;

use crate::config_resolver;

/// Runs the resolve command.
pub fn run(file: &Path, specifier: &str, explicit_config: Option<&Path>) -> Result<()> {
    let file = file.canonicalize().unwrap_or_else(|_| file.to_path_buf());
    let start = file.parent().unwrap_or_else(|| Path::new("."));
    let config = config_resolver::resolve(start, explicit_config).load()?;

    let engine = AliasRuleEngine::new(&config).context("No [aliases] configured")?;
    println!("{}", describe(&engine, &file, specifier, &config.analyzer.source_root));
    Ok(())
}

fn describe(engine: &AliasRuleEngine, file: &Path, specifier: &str, source_root: &str) -> String {
    match engine.resolve(file, specifier) {
        None => format!(
            "{} is outside source root '{source_root}', not checked",
            file.display()
        ),
        Some(Verdict::Unchanged) => format!("{specifier} (canonical)"),
        Some(Verdict::Replace(canonical)) => format!("{specifier} -> {canonical}"),
    }
}

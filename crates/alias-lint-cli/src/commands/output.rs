//! Report rendering.

use alias_lint_core::{LintResult, Severity, Violation, ViolationDiagnostic};
use anyhow::Result;
use miette::{NamedSource, Report};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::OutputFormat;

/// Source text of files with violations, keyed by reported path.
pub type Sources = HashMap<PathBuf, String>;

/// Print lint results in the specified format.
pub fn print(result: &LintResult, format: OutputFormat, sources: &Sources) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for violation in &result.violations {
                println!("{}", text_block(violation, true));
            }
            print_summary(result);
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(result)?),
        OutputFormat::Compact => {
            for violation in &result.violations {
                println!("{violation}");
            }
        }
        OutputFormat::Pretty => {
            for violation in &result.violations {
                eprintln!("{:?}", render_pretty(violation, sources));
            }
            print_summary(result);
        }
    }
    Ok(())
}

fn paint(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "\x1b[31m",
        Severity::Warning => "\x1b[33m",
        Severity::Info => "\x1b[34m",
    }
}

/// Multi-line text rendering of one violation, optionally with ANSI color.
fn text_block(violation: &Violation, color: bool) -> String {
    let severity = if color {
        format!("{}{}\x1b[0m", paint(violation.severity), violation.severity)
    } else {
        violation.severity.to_string()
    };

    let mut lines = vec![
        format!(
            "{} {} at {}:{}:{}",
            violation.code,
            violation.rule,
            violation.location.file.display(),
            violation.location.line,
            violation.location.column,
        ),
        format!("  {severity}: {}", violation.message),
    ];
    if let Some(suggestion) = &violation.suggestion {
        lines.push(format!("  = help: {}", suggestion.message));
    }
    if violation.fix.is_some() {
        lines.push("  = note: fixable with --fix".to_string());
    }
    lines.push(String::new());
    lines.join("\n")
}

fn render_pretty(violation: &Violation, sources: &Sources) -> Report {
    let report = Report::new(ViolationDiagnostic::from(violation));
    match sources.get(&violation.location.file) {
        Some(text) => report.with_source_code(NamedSource::new(
            violation.location.file.display().to_string(),
            text.clone(),
        )),
        None => report,
    }
}

fn print_summary(result: &LintResult) {
    let (errors, warnings, infos) = result.count_by_severity();
    let color = if errors > 0 {
        paint(Severity::Error)
    } else if warnings > 0 {
        paint(Severity::Warning)
    } else {
        "\x1b[32m"
    };

    println!(
        "{color}Found {errors} error(s), {warnings} warning(s), {infos} info(s) in {} file(s)\x1b[0m",
        result.files_checked
    );

    let fixable = result.fixable_count();
    if fixable > 0 {
        println!("{fixable} import(s) can be rewritten with `alias-lint check --fix`");
    }
    if result.files_fixed > 0 {
        println!("Rewrote imports in {} file(s)", result.files_fixed);
    }
}

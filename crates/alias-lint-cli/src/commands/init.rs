//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "alias-lint.toml";

const TEMPLATE: &str = r#"# alias-lint configuration

# Severity of non-canonical imports: "info", "warning" or "error"
severity = "warning"

# Let `alias-lint check --fix` rewrite imports in place
fixable = false

[analyzer]
# Directory to walk, relative to the checked path
# root = "."

# Path segment where project paths begin; files outside it are skipped
source_root = "imports"

extensions = [".js", ".jsx", ".ts", ".tsx", ".mjs", ".cjs"]

exclude = [
    "**/node_modules/**",
    "**/dist/**",
]

respect_gitignore = true

# Alias key -> targets; only the first target is used.
# A `*` stands for one or more path segments and must appear in both
# the key and its target.
[aliases]
# "@app/lib" = ["imports/lib"]
# "@app/lib/*" = ["imports/lib/*"]
# "@app/api/*" = ["imports/api/*"]
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let path = write_template(Path::new("."), force)?;

    println!("Created {}", path.display());
    println!("\nNext steps:");
    println!("  1. Add your path aliases under [aliases]");
    println!("  2. Run: alias-lint check");

    Ok(())
}

fn write_template(dir: &Path, force: bool) -> Result<PathBuf> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    std::fs::write(&path, TEMPLATE)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

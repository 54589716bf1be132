//! Integration test: extract → check → fix → re-check on files on disk.

use alias_lint_core::fix::{apply_edits, auto_fix_edits};
use alias_lint_core::Config;
use alias_lint_js::{AliasRuleEngine, EsModuleExtractor, LanguageExtractor};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG: &str = r#"
fixable = true

[aliases]
"@scope/lib" = ["imports/lib"]
"@scope/lib/*" = ["imports/lib/*"]
"@scope/api/*" = ["imports/api/*"]
"@scope/hooks" = ["imports/lib/client/reactHooks"]
"#;

const CREATE_CALL: &str = "imports/api/calls/server/api/createCall.js";

const SOURCE: &str = r#"import { User } from '../../../users';
import { useTimer } from "@scope/lib/client/reactHooks";
import calls from '@scope/api/calls';
import api from '../../';
"#;

fn write_fixture(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().expect("fixture has a parent")).expect("create dirs");
    fs::write(&path, content).expect("write fixture");
    path
}

fn check(engine: &AliasRuleEngine, rel: &str, content: &str) -> Vec<alias_lint_core::Violation> {
    let mut analysis = EsModuleExtractor::new()
        .expect("patterns compile")
        .analyze(content);
    analysis.file_path = PathBuf::from(rel);
    engine.check(&analysis, content)
}

#[test]
fn reports_every_non_canonical_import() {
    let config = Config::parse(CONFIG).expect("config should parse");
    let engine = AliasRuleEngine::new(&config).expect("aliases configured");

    let report: Vec<String> = check(&engine, CREATE_CALL, SOURCE)
        .iter()
        .map(ToString::to_string)
        .collect();

    insta::assert_snapshot!(report.join("\n"), @r"
    imports/api/calls/server/api/createCall.js:1:22: warning [ALIAS001] Use '@scope/api/users' instead
    imports/api/calls/server/api/createCall.js:2:26: warning [ALIAS001] Use '@scope/hooks' instead
    imports/api/calls/server/api/createCall.js:3:19: warning [ALIAS001] Use '../../' instead
    ");
}

#[test]
fn fixed_file_is_clean() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_fixture(dir.path(), CREATE_CALL, SOURCE);

    let config = Config::parse(CONFIG).expect("config should parse");
    let engine = AliasRuleEngine::new(&config).expect("aliases configured");

    let content = fs::read_to_string(&path).expect("read fixture");
    let violations = check(&engine, CREATE_CALL, &content);
    assert_eq!(violations.len(), 3);

    let fixed = apply_edits(&content, &auto_fix_edits(&violations)).expect("edits apply");
    fs::write(&path, &fixed).expect("write fixed");

    let reread = fs::read_to_string(&path).expect("read fixed");
    assert_eq!(
        reread,
        "import { User } from '@scope/api/users';\n\
         import { useTimer } from \"@scope/hooks\";\n\
         import calls from '../../';\n\
         import api from '../../';\n"
    );
    assert!(check(&engine, CREATE_CALL, &reread).is_empty());
}

#[test]
fn not_fixable_leaves_only_suggestions() {
    let mut config = Config::parse(CONFIG).expect("config should parse");
    config.fixable = false;
    let engine = AliasRuleEngine::new(&config).expect("aliases configured");

    let violations = check(&engine, CREATE_CALL, SOURCE);
    assert_eq!(violations.len(), 3);
    assert!(auto_fix_edits(&violations).is_empty());
    assert!(violations
        .iter()
        .all(|v| v.suggestion.as_ref().is_some_and(|s| s.replacement.is_some())));
}

//! Error Handling and Edge Case Tests

use semdiff::{diff, extract, EntityMap, Lang};

use crate::common::TestRepo;

fn ts(source: &str) -> EntityMap {
    extract(source, &Lang::TypeScript.tree_sitter_language()).unwrap()
}

// ============================================================================
// EMPTY AND MALFORMED SOURCE
// ============================================================================

#[test]
fn test_empty_file_both_revisions() {
    let repo = TestRepo::new();
    let old = repo.commit_file("empty.ts", "");
    let new = repo.commit("empty commit");

    let output = repo.run_cli_success(&["empty.ts", &old, &new, "--color", "never"]);
    assert!(output.contains("No structural logic changes detected."));
}

#[test]
fn test_file_emptied() {
    let repo = TestRepo::new();
    let old = repo.commit_file("a.ts", "class Foo {\n  bar() {}\n}\n");
    let new = repo.commit_file("a.ts", "");

    let output = repo.run_cli_success(&["a.ts", &old, &new, "--color", "never"]);
    assert!(output.contains("- Foo (class)"));
    assert!(output.contains("- bar (method)"));
}

#[test]
fn test_syntax_error_in_new_revision() {
    let old = ts("function stable() {\n  return 1;\n}\n");
    let new = ts("function stable() {\n  return 1;\n}\n\nfunction broken( {\n  return\n");

    let result = diff(&old, &new);
    assert!(!result.removed_names().contains(&"stable"));
}

#[test]
fn test_syntax_error_through_cli() {
    let repo = TestRepo::new();
    let old = repo.commit_file("a.ts", "function ok() {}\n");
    let new = repo.commit_file("a.ts", "function ok() {}\nclass {{{{ = ;\n");

    // Must not fail; whatever is found is reported
    repo.run_cli_success(&["a.ts", &old, &new, "--color", "never"]);
}

// ============================================================================
// NAMES
// ============================================================================

#[test]
fn test_duplicate_top_level_names_do_not_crash() {
    let map = ts(r#"
if (debug) {
  const x = () => "verbose";
} else {
  const x = () => "quiet";
}
"#);
    assert_eq!(map.len(), 1);
    assert!(map.get("x").unwrap().text.contains("quiet"));
}

#[test]
fn test_unicode_identifiers_and_content() {
    let old = ts("function grüße() {\n  return \"hallo\";\n}\n");
    let new = ts("function grüße() {\n  return \"héllo 👋\";\n}\n");

    let result = diff(&old, &new);
    assert_eq!(result.modified_names(), vec!["grüße"]);
    let lines = &result.modified[0].diff.hunks[0].lines;
    assert_eq!(lines[1].text, "  return \"héllo 👋\";");
}

#[test]
fn test_same_name_different_kind_is_modification() {
    let old = ts("function handler() { return 1; }\n");
    let new = ts("const handler = () => 1;\n");

    let result = diff(&old, &new);
    assert_eq!(result.modified_names(), vec!["handler"]);
    assert!(result.added.is_empty() && result.removed.is_empty());
}

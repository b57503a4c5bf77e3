//! Exit codes and messages for failing invocations

use crate::common::TestRepo;

#[test]
fn test_missing_arguments_prints_usage() {
    let repo = TestRepo::new();
    let (code, stdout, stderr) = repo.run_cli_failure(&["src/app.ts", "HEAD"]);
    assert_eq!(code, Some(2));
    assert!(stdout.is_empty());
    assert!(stderr.contains("Usage"), "{}", stderr);
}

#[test]
fn test_help_exits_successfully() {
    let repo = TestRepo::new();
    let output = repo.run_cli(&["--help"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("OLD_REV"));
}

#[test]
fn test_unsupported_extension_fails_before_retrieval() {
    let repo = TestRepo::new();
    // Neither revision exists; the extension check must come first
    let (code, _, stderr) = repo.run_cli_failure(&["main.py", "nope1", "nope2"]);
    assert_eq!(code, Some(3));
    assert!(stderr.contains("Unsupported extension: py"), "{}", stderr);
}

#[test]
fn test_unknown_revision() {
    let repo = TestRepo::new();
    let sha = repo.commit_file("a.ts", "function a() {}\n");

    let (code, stdout, stderr) = repo.run_cli_failure(&["a.ts", "no-such-branch", &sha]);
    assert_eq!(code, Some(4));
    assert!(stdout.is_empty(), "no partial report expected: {}", stdout);
    assert!(stderr.contains("Could not retrieve a.ts from no-such-branch"), "{}", stderr);
}

#[test]
fn test_file_absent_at_revision() {
    let repo = TestRepo::new();
    let first = repo.commit_file("other.ts", "function x() {}\n");
    let second = repo.commit_file("a.ts", "function a() {}\n");

    let (code, _, stderr) = repo.run_cli_failure(&["a.ts", &first, &second]);
    assert_eq!(code, Some(4));
    assert!(stderr.contains(&first), "{}", stderr);
}

#[test]
fn test_malformed_config() {
    let repo = TestRepo::new();
    let sha = repo.commit_file("a.ts", "function a() {}\n");
    repo.write_config("[logging]\nlevel = \"shouty\"\n");

    let (code, _, stderr) = repo.run_cli_failure(&["a.ts", &sha, &sha]);
    assert_eq!(code, Some(6));
    assert!(stderr.contains("Invalid log level"), "{}", stderr);
}

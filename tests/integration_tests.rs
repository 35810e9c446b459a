//! Integration tests for the tdesk CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get a tdesk command isolated from the user's config
fn tdesk(tmp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tdesk").unwrap();
    cmd.current_dir(tmp.path())
        .env("TDESK_GLOBAL_CONFIG", tmp.path().join("global-config.yaml"))
        .env_remove("TDESK_LOG")
        .env_remove("TDESK_LOG_LEVEL")
        .env_remove("TDESK_COLOR");
    cmd
}

/// Helper to create an initialized workspace in a temp directory
fn setup_workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    tdesk(&tmp).arg("init").assert().success();
    tmp
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    let tmp = TempDir::new().unwrap();
    tdesk(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("export"));
}

#[test]
fn test_version_displays() {
    let tmp = TempDir::new().unwrap();
    tdesk(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tdesk"));
}

#[test]
fn test_unknown_command_fails() {
    let tmp = TempDir::new().unwrap();
    tdesk(&tmp)
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

// ============================================================================
// Export Command Tests
// ============================================================================

#[test]
fn test_export_relative_path_prints_status_then_contents() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("notes.txt"), "hello\n").unwrap();

    tdesk(&tmp)
        .args(["export", "notes.txt"])
        .assert()
        .success()
        .stdout("Exporting to notes.txt\nhello\n");
}

#[test]
fn test_export_named_file_option() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("notes.txt"), "hello\n").unwrap();

    tdesk(&tmp)
        .args(["export", "--file", "notes.txt"])
        .assert()
        .success()
        .stdout("Exporting to notes.txt\nhello\n");
}

#[test]
fn test_export_preserves_bytes_without_trailing_newline() {
    let tmp = TempDir::new().unwrap();
    let contents = "第一行\r\n\ttabbed <target>&amp;</target>\nno newline at end";
    fs::write(tmp.path().join("tgt.txt"), contents).unwrap();

    tdesk(&tmp)
        .args(["export", "tgt.txt"])
        .assert()
        .success()
        .stdout(format!("Exporting to tgt.txt\n{}", contents));
}

#[test]
fn test_export_empty_file_prints_only_status() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("empty.txt"), "").unwrap();

    tdesk(&tmp)
        .args(["export", "empty.txt"])
        .assert()
        .success()
        .stdout("Exporting to empty.txt\n");
}

#[test]
fn test_export_absolute_and_relative_match() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("src.txt");
    fs::write(&file, "The valve must be closed.\n").unwrap();

    let relative = tdesk(&tmp).args(["export", "src.txt"]).output().unwrap();
    let absolute = tdesk(&tmp)
        .arg("export")
        .arg(&file)
        .output()
        .unwrap();

    assert!(relative.status.success());
    assert!(absolute.status.success());

    let relative = String::from_utf8(relative.stdout).unwrap();
    let absolute = String::from_utf8(absolute.stdout).unwrap();
    assert_eq!(relative, "Exporting to src.txt\nThe valve must be closed.\n");
    assert_eq!(
        absolute,
        format!("Exporting to {}\nThe valve must be closed.\n", file.display())
    );

    let strip = |s: &str| s.split_once('\n').map(|(_, rest)| rest.to_string());
    assert_eq!(strip(&relative), strip(&absolute));
}

#[test]
fn test_export_from_subdirectory_resolves_against_cwd() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("chapter1")).unwrap();
    fs::write(tmp.path().join("chapter1/src.txt"), "Chapter one.\n").unwrap();

    tdesk(&tmp)
        .current_dir(tmp.path().join("chapter1"))
        .args(["export", "src.txt"])
        .assert()
        .success()
        .stdout("Exporting to src.txt\nChapter one.\n");

    tdesk(&tmp)
        .args(["export", "chapter1/../chapter1/src.txt"])
        .assert()
        .success()
        .stdout("Exporting to chapter1/../chapter1/src.txt\nChapter one.\n");
}

#[test]
fn test_export_missing_file_reports_error() {
    let tmp = TempDir::new().unwrap();

    let assert = tdesk(&tmp)
        .args(["export", "missing.txt"])
        .assert()
        .failure()
        .code(1)
        .stdout("Exporting to missing.txt\n")
        .stderr(predicate::str::contains("not found"));

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr);
    let first_line = stderr.lines().next().unwrap_or_default();
    assert!(first_line.starts_with("Error:"), "stderr: {stderr}");
    assert!(
        first_line.contains("cannot export missing.txt"),
        "stderr: {stderr}"
    );
}

#[test]
fn test_export_invalid_utf8_reports_error() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("binary.bin"), [0x66, 0x6f, 0xff, 0xfe]).unwrap();

    tdesk(&tmp)
        .args(["export", "binary.bin"])
        .assert()
        .failure()
        .stdout("Exporting to binary.bin\n")
        .stderr(predicate::str::contains("invalid encoding"));
}

#[test]
fn test_export_directory_reports_error() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir(tmp.path().join("sub")).unwrap();

    tdesk(&tmp)
        .args(["export", "sub"])
        .assert()
        .failure()
        .stdout("Exporting to sub\n")
        .stderr(predicate::str::starts_with("Error:"))
        .stderr(predicate::str::contains("cannot export sub: is a directory"));
}

#[test]
fn test_export_requires_argument() {
    let tmp = TempDir::new().unwrap();

    tdesk(&tmp)
        .arg("export")
        .assert()
        .failure()
        .code(2)
        .stdout("");
}

#[test]
fn test_export_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("notes.txt"), "hello\n").unwrap();

    let first = tdesk(&tmp).args(["export", "notes.txt"]).output().unwrap();
    let second = tdesk(&tmp).args(["export", "notes.txt"]).output().unwrap();

    assert_eq!(first.stdout, second.stdout);
    assert_eq!(fs::read_to_string(tmp.path().join("notes.txt")).unwrap(), "hello\n");
}

#[test]
fn test_export_verbose_logs_to_stderr_only() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("notes.txt"), "hello\n").unwrap();

    tdesk(&tmp)
        .args(["--verbose", "export", "notes.txt"])
        .assert()
        .success()
        .stdout("Exporting to notes.txt\nhello\n")
        .stderr(predicate::str::contains("exported"));
}

#[test]
fn test_export_warns_about_malformed_project_config() {
    let tmp = setup_workspace();
    fs::write(tmp.path().join(".tdesk/config.yaml"), "color: [unclosed\n").unwrap();
    fs::write(tmp.path().join("notes.txt"), "hello\n").unwrap();

    tdesk(&tmp)
        .args(["export", "notes.txt"])
        .assert()
        .success()
        .stdout("Exporting to notes.txt\nhello\n")
        .stderr(predicate::str::contains("ignoring config file"))
        .stderr(predicate::str::contains("config.yaml"));
}

// ============================================================================
// Init Command Tests
// ============================================================================

#[test]
fn test_init_creates_workspace() {
    let tmp = TempDir::new().unwrap();

    tdesk(&tmp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));

    assert!(tmp.path().join(".tdesk/config.yaml").exists());
    assert!(tmp.path().join("TRANSLATING.md").exists());
    assert!(tmp.path().join("glossary.tsv").exists());
    assert!(tmp.path().join("src.txt").exists());
    assert!(tmp.path().join("tgt.txt").exists());
    assert!(!tmp.path().join("translation.xml").exists());
}

#[test]
fn test_init_existing_workspace_warns() {
    let tmp = setup_workspace();

    tdesk(&tmp)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn test_init_force_keeps_translator_files() {
    let tmp = setup_workspace();
    fs::write(tmp.path().join("tgt.txt"), "翻訳済み\n").unwrap();

    tdesk(&tmp).args(["init", "--force"]).assert().success();

    assert_eq!(
        fs::read_to_string(tmp.path().join("tgt.txt")).unwrap(),
        "翻訳済み\n"
    );
}

#[test]
fn test_init_into_new_directory() {
    let tmp = TempDir::new().unwrap();

    tdesk(&tmp)
        .args(["init", "book"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created directory"));

    assert!(tmp.path().join("book/.tdesk").is_dir());
}

#[test]
fn test_exported_guidelines_match_scaffold() {
    let tmp = setup_workspace();
    let guide = fs::read_to_string(tmp.path().join("TRANSLATING.md")).unwrap();

    tdesk(&tmp)
        .args(["export", "TRANSLATING.md"])
        .assert()
        .success()
        .stdout(format!("Exporting to TRANSLATING.md\n{}", guide));
}

// ============================================================================
// Config Command Tests
// ============================================================================

#[test]
fn test_config_set_and_show_key() {
    let tmp = setup_workspace();

    tdesk(&tmp)
        .args(["config", "set", "color", "never"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set"));

    tdesk(&tmp)
        .args(["config", "show", "color"])
        .assert()
        .success()
        .stdout("never\n");
}

#[test]
fn test_config_env_overrides_project() {
    let tmp = setup_workspace();
    tdesk(&tmp)
        .args(["config", "set", "color", "never"])
        .assert()
        .success();

    tdesk(&tmp)
        .env("TDESK_COLOR", "always")
        .args(["config", "show", "color"])
        .assert()
        .success()
        .stdout("always\n");
}

#[test]
fn test_config_set_rejects_unknown_key() {
    let tmp = setup_workspace();

    tdesk(&tmp)
        .args(["config", "set", "editor", "vi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown configuration key"));
}

#[test]
fn test_config_set_rejects_bad_value() {
    let tmp = setup_workspace();

    tdesk(&tmp)
        .args(["config", "set", "color", "purple"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_config_set_global_writes_global_file() {
    let tmp = TempDir::new().unwrap();

    tdesk(&tmp)
        .args(["config", "set", "--global", "log_level", "info"])
        .assert()
        .success();

    let global = fs::read_to_string(tmp.path().join("global-config.yaml")).unwrap();
    assert!(global.contains("log_level: info"));
}

#[test]
fn test_config_unset_removes_key() {
    let tmp = setup_workspace();
    tdesk(&tmp)
        .args(["config", "set", "default_format", "json"])
        .assert()
        .success();

    tdesk(&tmp)
        .args(["config", "unset", "default_format"])
        .assert()
        .success();

    tdesk(&tmp)
        .args(["config", "show", "default_format"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not set"));
}

#[test]
fn test_config_unset_missing_key_fails() {
    let tmp = setup_workspace();

    tdesk(&tmp)
        .args(["config", "unset", "color"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_config_show_json() {
    let tmp = setup_workspace();
    tdesk(&tmp)
        .args(["config", "set", "log_level", "info"])
        .assert()
        .success();

    tdesk(&tmp)
        .args(["config", "show", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"log_level\": \"info\""));
}

#[test]
fn test_config_project_requires_workspace() {
    let tmp = TempDir::new().unwrap();

    tdesk(&tmp)
        .args(["config", "set", "color", "never"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a tdesk workspace"));
}

#[test]
fn test_config_keys_lists_all() {
    let tmp = TempDir::new().unwrap();

    tdesk(&tmp)
        .args(["config", "keys"])
        .assert()
        .success()
        .stdout(predicate::str::contains("log_level"))
        .stdout(predicate::str::contains("color"))
        .stdout(predicate::str::contains("default_format"));
}

#[test]
fn test_config_path_project_only() {
    let tmp = setup_workspace();

    tdesk(&tmp)
        .args(["config", "path", "--project-only"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".tdesk"));
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn test_completions_bash() {
    let tmp = TempDir::new().unwrap();

    tdesk(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tdesk"));
}

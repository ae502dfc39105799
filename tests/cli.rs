use assert_cmd::Command;
use filetime::{set_file_mtime, FileTime};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::{tempdir, TempDir};

fn write_aged(path: &Path, age_days: u64) {
    fs::write(path, "content").unwrap();
    let mtime = SystemTime::now() - Duration::from_secs(age_days * 24 * 60 * 60);
    set_file_mtime(path, FileTime::from_system_time(mtime)).unwrap();
}

/// Target with `old.txt` (10 days) and `new.txt` (today).
fn setup_target() -> TempDir {
    let dir = tempdir().unwrap();
    write_aged(&dir.path().join("old.txt"), 10);
    write_aged(&dir.path().join("new.txt"), 0);
    dir
}

fn age_prune(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("age-prune").unwrap();
    cmd.current_dir(cwd)
        .env_remove("AGE_PRUNE_MDAYS")
        .env_remove("AGE_PRUNE_DRY_RUN")
        .env_remove("AGE_PRUNE_REGEX")
        .env_remove("AGE_PRUNE_LOG_DIR")
        .env_remove("AGE_PRUNE_PRUNE_EMPTY_DIRS")
        .env_remove("LOG_FILE_PATH");
    cmd
}

#[test]
fn test_dry_run_prints_notice_and_keeps_files() {
    let target = setup_target();
    let logs = tempdir().unwrap();

    age_prune(logs.path())
        .arg(target.path())
        .arg("--dry-run")
        .arg("--log-dir")
        .arg(logs.path())
        .arg("--log-file-name")
        .arg("run.csv")
        .assert()
        .success()
        .stdout(predicate::str::contains("would delete: "))
        .stdout(predicate::str::contains("old.txt"))
        .stdout(predicate::str::contains("new.txt").not())
        .stdout(predicate::str::contains(format!(
            "Log: {}",
            logs.path().join("run.csv").display()
        )));

    assert!(target.path().join("old.txt").exists());
    assert!(target.path().join("new.txt").exists());

    let log = fs::read_to_string(logs.path().join("run.csv")).unwrap();
    assert!(log.starts_with("\"Date\",\"File\",\"LastWriteTime\",\"Message\""));
    assert!(log.contains("\"dry-run\""));
}

#[test]
fn test_deletes_old_files() {
    let target = setup_target();

    age_prune(target.path())
        .arg(target.path())
        .arg("--mdays")
        .arg("8")
        .assert()
        .success()
        .stdout(predicate::str::contains("Log: "))
        .stdout(predicate::str::contains("cleanup-"));

    assert!(!target.path().join("old.txt").exists());
    assert!(target.path().join("new.txt").exists());
}

#[test]
fn test_invalid_target_exits_with_error() {
    let cwd = tempdir().unwrap();

    age_prune(cwd.path())
        .arg(cwd.path().join("missing"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not a directory"));
}

#[test]
fn test_invalid_log_dir_exits_with_error() {
    let target = setup_target();

    age_prune(target.path())
        .arg(target.path())
        .arg("--log-dir")
        .arg(target.path().join("old.txt"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("log-dir"))
        .stderr(predicate::str::contains("is not a directory"));

    assert!(target.path().join("old.txt").exists());
}

#[test]
fn test_invalid_regex_warns_and_continues() {
    let target = setup_target();
    let logs = tempdir().unwrap();

    age_prune(logs.path())
        .arg(target.path())
        .args(["--regex", "(", "--regex", r"\.txt$"])
        .arg("--log-dir")
        .arg(logs.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping invalid regex '('"));

    assert!(!target.path().join("old.txt").exists());
}

#[test]
fn test_settings_file_supplies_defaults() {
    let target = setup_target();
    let logs = tempdir().unwrap();
    let settings = logs.path().join("prune.toml");
    fs::write(&settings, "mdays = 30\n").unwrap();

    age_prune(logs.path())
        .arg(target.path())
        .arg("--config")
        .arg(&settings)
        .arg("--log-dir")
        .arg(logs.path())
        .assert()
        .success();

    assert!(target.path().join("old.txt").exists());
}

#[test]
fn test_missing_settings_file_is_fatal() {
    let target = setup_target();

    age_prune(target.path())
        .arg(target.path())
        .arg("--config")
        .arg(target.path().join("absent.toml"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error loading configuration"));

    assert!(target.path().join("old.txt").exists());
}

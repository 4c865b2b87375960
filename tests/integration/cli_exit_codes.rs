//! Exit status contract: 0 unchanged, 1 failure, 2 upgraded.

use super::test_utils::{updater_command, yaml, Playbook, CURRENT, DEFAULTS};
use settings_updater::document::load_document;

#[test]
fn test_no_changes_exits_zero_and_keeps_file() {
    let original = "# my settings\nuser:\n  name: me\n";
    let playbook = Playbook::new("user:\n  name: default\n", original);

    let output = playbook.run(&[]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(playbook.read_current(), original);
}

#[test]
fn test_upgrade_exits_two_and_rewrites_file() {
    let playbook = Playbook::new(
        "user:\n  name: default\n  domain: example.com\nmounts:\n  - /mnt/local\n",
        "user:\n  name: me\n",
    );

    let output = playbook.run(&[]);

    assert_eq!(
        output.status.code(),
        Some(2),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let written = playbook.read_current();
    assert!(written.starts_with("---\n"));
    assert_eq!(
        load_document(&playbook.current_path()).unwrap(),
        yaml("user:\n  name: me\n  domain: example.com\nmounts: [/mnt/local]\n")
    );
}

#[test]
fn test_second_run_reports_no_changes() {
    let playbook = Playbook::new("a: 1\nb: {c: [x, y]}\n", "b: {c: [y]}\n");

    assert_eq!(playbook.run(&[]).status.code(), Some(2));
    assert_eq!(playbook.run(&[]).status.code(), Some(0));
}

#[test]
fn test_overwrite_flag_reverts_mapping() {
    let playbook = Playbook::new("a: 1\nb: 2\n", "a: 1\nb: 3\n");

    assert_eq!(playbook.run(&["--overwrite"]).status.code(), Some(2));
    assert_eq!(
        load_document(&playbook.current_path()).unwrap(),
        yaml("a: 1\nb: 2\n")
    );
}

#[test]
fn test_missing_current_exits_one() {
    let playbook = Playbook::new("a: 1\n", "a: 1\n");
    std::fs::remove_file(playbook.current_path()).unwrap();

    let output = playbook.run(&[]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!playbook.current_path().exists());
}

#[test]
fn test_empty_defaults_exits_one() {
    let playbook = Playbook::new("", "a: 1\n");
    assert_eq!(playbook.run(&[]).status.code(), Some(1));
    assert_eq!(playbook.read_current(), "a: 1\n");
}

#[test]
fn test_unparseable_current_exits_one() {
    let playbook = Playbook::new("a: 1\n", "a: [oops\n");
    assert_eq!(playbook.run(&[]).status.code(), Some(1));
}

#[test]
fn test_shape_mismatch_exits_one_without_writing() {
    let playbook = Playbook::new("core: {version: 2}\n", "core: legacy\n");
    let output = playbook.run(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Shape mismatch"));
    assert_eq!(playbook.read_current(), "core: legacy\n");
}

#[test]
fn test_missing_arguments_exit_one() {
    let output = updater_command().arg("/tmp").arg(DEFAULTS).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_help_exits_zero() {
    let output = updater_command().arg("--help").output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("BASE_DIR"));
}

#[test]
fn test_missing_base_dir_exits_one() {
    let temp = tempfile::TempDir::new().unwrap();
    let missing = temp.path().join("nope");
    let output = updater_command()
        .arg(&missing)
        .arg(DEFAULTS)
        .arg(CURRENT)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(!missing.exists());
}

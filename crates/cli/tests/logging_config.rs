use assert_cmd::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn test_logging_to_file() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let log_file = root.join("logs").join("linepatch.log");

    let config_path = root.join("config.toml");
    let config_content = format!(
        r#"
version = 1
[profiles.default]
document_root = "{}"
recipes_dir = "recipes"

[logging]
level = "debug"
file = "{}"
"#,
        root.display(),
        log_file.display()
    );
    fs::write(&config_path, &config_content).unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("linepatch"));
    cmd.arg("--config").arg(&config_path).arg("doctor").assert().success();

    assert!(log_file.exists(), "Log file should be created");
}

#[test]
fn test_logging_level_parsing() {
    let dir = tempdir().unwrap();
    let root = dir.path();

    let config_path = root.join("config.toml");
    let config_content = format!(
        r#"
version = 1
[profiles.default]
document_root = "{}"
recipes_dir = "recipes"

[logging]
level = "trace"
"#,
        root.display()
    );
    fs::write(&config_path, &config_content).unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("linepatch"));
    cmd.arg("--config").arg(&config_path).arg("doctor").assert().success();
}

#[test]
fn test_apply_writes_step_events_to_file() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    let log_file = root.join("linepatch.log");

    let config_path = root.join("config.toml");
    let config_content = format!(
        r#"
version = 1
[profiles.default]
document_root = "{root}"
recipes_dir = "{{{{document_root}}}}/recipes"

[logging]
level = "error"
file_level = "info"
file = "{log}"
"#,
        root = root.display(),
        log = log_file.display()
    );
    fs::write(&config_path, &config_content).unwrap();
    fs::create_dir_all(root.join("recipes")).unwrap();
    fs::write(
        root.join("recipes/mark.yaml"),
        "name: mark\ntarget:\n  file: page.txt\nsteps:\n  - anchor: start\n    op: insert_after\n    content: marked\n",
    )
    .unwrap();
    fs::write(root.join("page.txt"), "start\nend\n").unwrap();

    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("linepatch"));
    cmd.arg("--config").arg(&config_path).args(["apply", "mark"]).assert().success();

    assert_eq!(fs::read_to_string(root.join("page.txt")).unwrap(), "start\nmarked\nend\n");
    let log = fs::read_to_string(&log_file).unwrap();
    assert!(log.contains("step finished"), "log was: {log}");
}

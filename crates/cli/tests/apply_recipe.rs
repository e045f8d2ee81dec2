use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{TempDir, tempdir};

const INDEX: &str = "<div class=\"card\">
\t<div class=\"label\">Data Reset Operations</div>
\t<div class=\"row\">
\t\t<button id=\"admin-reset-season\">Reset</button>
\t</div>
</div>
";

const STATUS_RECIPE: &str = r#"
name: status
description: Status line under a reset button
target:
  file: index.html
steps:
  - name: season status
    anchor: Data Reset Operations
    within:
      marker: 'id="{{button}}"'
    boundary:
      open: "<div"
      close: "</div"
      mode: enclosing
    op: insert_after
    indent: inherit
    content: '<div id="{{button}}-status"></div>'
"#;

const BROKEN_RECIPE: &str = r#"
name: broken
target:
  file: index.html
steps:
  - name: rename label
    anchor: Data Reset Operations
    op: edit_line
    find: Data Reset
    replace: Danger Zone
  - name: past the end
    anchor: 'class="label"'
    offset: 10
    op: replace
    content: "<p>gone</p>"
"#;

fn write(path: &PathBuf, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// A site with `index.html`, two recipes and a config pointing at them.
fn setup() -> (TempDir, PathBuf, PathBuf) {
    let tmp = tempdir().unwrap();
    let root = tmp.path().join("site");
    let cfg_path = tmp.path().join("config.toml");

    write(
        &cfg_path,
        &format!(
            r#"
version = 1
profile = "test"

[profiles.test]
document_root = "{}"
recipes_dir = "{{{{document_root}}}}/.linepatch/recipes"
"#,
            root.display()
        ),
    );
    write(&root.join("index.html"), INDEX);
    write(&root.join(".linepatch/recipes/status.yaml"), STATUS_RECIPE);
    write(&root.join(".linepatch/recipes/broken.yaml"), BROKEN_RECIPE);

    (tmp, cfg_path, root)
}

fn apply(cfg: &Path, extra: &[&str]) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("linepatch"));
    cmd.arg("--config").arg(cfg).arg("apply").args(extra);
    cmd
}

#[test]
fn apply_inserts_status_line() {
    let (_tmp, cfg, root) = setup();

    apply(&cfg, &["status", "--var", "button=admin-reset-season"])
        .assert()
        .success()
        .stdout(predicate::str::contains("OK   linepatch apply"))
        .stdout(predicate::str::contains("recipe: status"))
        .stdout(predicate::str::contains("season status"))
        .stdout(predicate::str::contains("matched"))
        .stdout(predicate::str::contains("applied: 1, skipped: 0"));

    let html = fs::read_to_string(root.join("index.html")).unwrap();
    assert_eq!(
        html,
        "<div class=\"card\">
\t<div class=\"label\">Data Reset Operations</div>
\t<div class=\"row\">
\t\t<button id=\"admin-reset-season\">Reset</button>
\t</div>
\t<div id=\"admin-reset-season-status\"></div>
</div>
"
    );
}

#[test]
fn apply_twice_changes_nothing_the_second_time() {
    let (_tmp, cfg, root) = setup();

    apply(&cfg, &["status", "--var", "button=admin-reset-season"]).assert().success();
    let first = fs::read_to_string(root.join("index.html")).unwrap();

    apply(&cfg, &["status", "--var", "button=admin-reset-season"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already-present"))
        .stdout(predicate::str::contains("unchanged"));

    let second = fs::read_to_string(root.join("index.html")).unwrap();
    assert_eq!(first, second);
    assert_eq!(second.matches("admin-reset-season-status").count(), 1);
}

#[test]
fn dry_run_leaves_file_untouched() {
    let (_tmp, cfg, root) = setup();

    apply(&cfg, &["status", "--var", "button=admin-reset-season", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("applied: 1, skipped: 0"))
        .stdout(predicate::str::contains("dry run: changes not written"));

    assert_eq!(fs::read_to_string(root.join("index.html")).unwrap(), INDEX);
}

#[test]
fn json_report() {
    let (_tmp, cfg, _root) = setup();

    let out = apply(&cfg, &["status", "--var", "button=admin-reset-season", "--json"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["recipe"], "status");
    assert_eq!(json["changed"], true);
    assert_eq!(json["dry_run"], false);
    assert_eq!(json["applied"], 1);
    assert_eq!(json["steps"][0]["op"], "insert_after");
    assert_eq!(json["steps"][0]["reason"], "matched");
    assert_eq!(json["steps"][0]["line"], 5);
}

#[test]
fn missing_anchor_is_reported_not_fatal() {
    let (_tmp, cfg, root) = setup();

    // without --var the nested marker is never rendered, so it cannot match
    apply(&cfg, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("anchor-not-found"))
        .stdout(predicate::str::contains("applied: 0, skipped: 1"));

    assert_eq!(fs::read_to_string(root.join("index.html")).unwrap(), INDEX);
}

#[test]
fn range_error_fails_and_rolls_back() {
    let (_tmp, cfg, root) = setup();

    apply(&cfg, &["broken"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("FAIL linepatch apply"))
        .stderr(predicate::str::contains("past the end"))
        .stderr(predicate::str::contains("left unchanged"));

    // the first step's edit was discarded too
    assert_eq!(fs::read_to_string(root.join("index.html")).unwrap(), INDEX);
}

#[test]
fn unknown_recipe_lists_available() {
    let (_tmp, cfg, _root) = setup();

    apply(&cfg, &["nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Recipe not found: nope"))
        .stderr(predicate::str::contains("  - broken"))
        .stderr(predicate::str::contains("  - status"));
}

#[test]
fn file_override_patches_another_document() {
    let (tmp, cfg, root) = setup();
    let other = tmp.path().join("copy.html");
    write(&other, INDEX);

    apply(&cfg, &["status", "--var", "button=admin-reset-season", "--file"])
        .arg(&other)
        .assert()
        .success()
        .stdout(predicate::str::contains(other.display().to_string()));

    assert!(fs::read_to_string(&other).unwrap().contains("admin-reset-season-status"));
    assert_eq!(fs::read_to_string(root.join("index.html")).unwrap(), INDEX);
}

#[test]
fn missing_target_file_fails() {
    let (_tmp, cfg, root) = setup();
    fs::remove_file(root.join("index.html")).unwrap();

    apply(&cfg, &["status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read target file"));
}

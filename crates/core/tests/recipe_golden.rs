use std::collections::HashMap;
use std::path::PathBuf;

use insta::assert_snapshot;
use linepatch_core::document::{Document, fingerprint};
use linepatch_core::patch::Reason;
use linepatch_core::recipe::{RecipeRunner, load_recipe};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn vars() -> HashMap<String, String> {
    HashMap::from([("prefix".to_string(), "admin-reset".to_string())])
}

#[test]
fn golden_admin_reset_recipe() {
    let spec = load_recipe(&fixture("admin_reset.yaml")).unwrap();
    let mut doc = Document::parse(include_str!("fixtures/admin_panel.html"));

    let report = RecipeRunner::default().run(&mut doc, &spec, &vars()).unwrap();

    let reasons: Vec<_> = report.steps.iter().map(|s| (s.step.as_str(), s.outcome.reason)).collect();
    assert_eq!(
        reasons,
        [
            ("description", Reason::Matched),
            ("show controls", Reason::Matched),
            ("telemetry status", Reason::Matched),
            ("seasonal stats status", Reason::AlreadyPresent),
            ("season status", Reason::Matched),
            ("legacy card", Reason::Matched),
        ]
    );
    assert_eq!(report.applied_count(), 5);
    assert!(doc.has_trailing_newline());

    assert_snapshot!("admin_reset_recipe", doc.render());
}

#[test]
fn rerunning_the_recipe_changes_nothing() {
    let spec = load_recipe(&fixture("admin_reset.yaml")).unwrap();
    let mut doc = Document::parse(include_str!("fixtures/admin_panel.html"));
    let runner = RecipeRunner::default();

    runner.run(&mut doc, &spec, &vars()).unwrap();
    let after_first = fingerprint(&doc);

    let report = runner.run(&mut doc, &spec, &vars()).unwrap();
    assert_eq!(report.applied_count(), 0);
    assert!(report.steps.iter().all(|s| s.outcome.reason == Reason::AlreadyPresent));
    assert_eq!(fingerprint(&doc), after_first);
}

#[test]
fn legacy_card_copy_is_left_alone() {
    let spec = load_recipe(&fixture("admin_reset.yaml")).unwrap();
    let mut doc = Document::parse(include_str!("fixtures/admin_panel.html"));
    RecipeRunner::default().run(&mut doc, &spec, &vars()).unwrap();

    // the edits target the first card only
    let text = doc.render();
    assert_eq!(text.matches("\"I understand this affects all players.\"").count(), 1);
    assert_eq!(text.matches("display:none;").count(), 1);
    assert!(text.contains("Legacy Emergency Controls"));
}

#[test]
fn recipe_lists_its_variables() {
    let spec = load_recipe(&fixture("admin_reset.yaml")).unwrap();
    let vars: Vec<_> = spec.variables().into_iter().collect();
    assert_eq!(vars, ["document_root", "prefix"]);
}

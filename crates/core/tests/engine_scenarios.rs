use linepatch_core::anchor::{Marker, SearchWindow, find_anchor, find_anchor_in, find_within};
use linepatch_core::depth::{TokenPair, find_boundary, find_enclosing_close, find_enclosing_open};
use linepatch_core::document::Document;
use linepatch_core::patch::{Patch, PatchApplier, PatchError, PatchOutcome, Reason};
use rstest::rstest;

fn admin_card() -> Vec<&'static str> {
    vec![
        r#"<div class="card">"#,                                          // 0
        r#"	<div class="label">Data Reset Operations</div>"#,             // 1
        r#"	<div class="admin-control-strip" data-admin-controls>"#,      // 2
        r#"		<div class="row">"#,                                      // 3
        r#"			<button id="admin-reset-telemetry">Reset</button>"#,   // 4
        r#"			<div class="muted">Clears telemetry.</div>"#,          // 5
        r#"		</div>"#,                                                 // 6
        r#"	</div>"#,                                                     // 7
        r#"</div>"#,                                                      // 8
        r#"<div class="card">"#,                                          // 9
        r#"	<button id="admin-reset-telemetry">Legacy</button>"#,         // 10
        r#"</div>"#,                                                      // 11
    ]
}

#[test]
fn scenario_simple_block_boundary() {
    let lines = ["<div>", "<p>X</p>", "</div>"];
    let tokens = TokenPair::new("<div>", "</div>");
    assert_eq!(find_boundary(&lines, 0, &tokens, 10), Some(2));
}

#[test]
fn scenario_insert_twice_inserts_once() {
    let mut doc = Document::from_lines([r#"<div id="foo"></div>"#]);
    let applier = PatchApplier::default();
    let patch = Patch::insert_after(0, r#"<div id="foo-status"></div>"#).with_signature("foo-status");

    assert_eq!(applier.apply(&mut doc, &patch).unwrap(), PatchOutcome::applied());
    assert_eq!(
        applier.apply(&mut doc, &patch).unwrap(),
        PatchOutcome::skipped(Reason::AlreadyPresent)
    );
    assert_eq!(doc.lines(), [r#"<div id="foo"></div>"#, r#"<div id="foo-status"></div>"#]);
}

#[test]
fn scenario_missing_anchor_leaves_document_alone() {
    let doc = Document::from_lines(["a", "b", "c"]);
    let anchor = find_anchor(doc.lines(), &Marker::literal("zzz"));
    assert!(anchor.is_none());

    let outcome = match anchor {
        Some(a) => PatchApplier::default()
            .apply(&mut doc.clone(), &Patch::insert_after(a.line, "x"))
            .unwrap(),
        None => PatchOutcome::skipped(Reason::AnchorNotFound),
    };
    assert_eq!(outcome.reason, Reason::AnchorNotFound);
    assert_eq!(doc.lines(), ["a", "b", "c"]);
}

#[rstest]
#[case("Data Reset Operations", Some(1))]
#[case(r#"id="admin-reset-telemetry""#, Some(4))]
#[case("admin-reset-season", None)]
fn first_occurrence_wins(#[case] marker: &str, #[case] expected: Option<usize>) {
    let lines = admin_card();
    assert_eq!(find_anchor(&lines, &Marker::literal(marker)).map(|a| a.line), expected);
}

#[rstest]
#[case(30, Some(4))]
#[case(4, Some(4))]
#[case(3, None)]
fn nested_marker_respects_window(#[case] window: usize, #[case] expected: Option<usize>) {
    let lines = admin_card();
    let found = find_within(&lines, 1, &Marker::literal("admin-reset-telemetry"), window);
    assert_eq!(found.map(|a| a.line), expected);
}

#[test]
fn nested_search_from_second_card_finds_its_own_button() {
    let lines = admin_card();
    let found = find_within(&lines, 9, &Marker::literal("admin-reset-telemetry"), 5).unwrap();
    assert_eq!(found.line, 10);
    assert!(lines[found.line].contains("Legacy"));
}

#[test]
fn regex_marker_reports_matched_text() {
    let lines = admin_card();
    let marker = Marker::pattern(r#"id="admin-reset-[a-z-]+""#).unwrap();
    let found = find_anchor_in(&lines, &marker, SearchWindow::starting_at(5, 10)).unwrap();
    assert_eq!(found.line, 10);
    assert_eq!(found.matched, r#"id="admin-reset-telemetry""#);
}

#[rstest]
#[case(0, Some(8))]
#[case(2, Some(7))]
#[case(3, Some(6))]
#[case(9, Some(11))]
fn block_boundary_for_each_opener(#[case] start: usize, #[case] expected: Option<usize>) {
    let lines = admin_card();
    let tokens = TokenPair::new("<div", "</div");
    assert_eq!(find_boundary(&lines, start, &tokens, 50), expected);
}

#[test]
fn boundary_beyond_lookahead_is_not_found() {
    let lines = admin_card();
    let tokens = TokenPair::new("<div", "</div");
    assert_eq!(find_boundary(&lines, 0, &tokens, 8), None);
    assert_eq!(find_boundary(&lines, 0, &tokens, 9), Some(8));
}

#[test]
fn enclosing_block_of_a_button() {
    let lines = admin_card();
    let tokens = TokenPair::new("<div", "</div");
    assert_eq!(find_enclosing_close(&lines, 4, &tokens, 5), Some(6));
    assert_eq!(find_enclosing_open(&lines, 4, &tokens, 5), Some(3));
    assert_eq!(find_enclosing_close(&lines, 4, &tokens, 1), None);
}

#[test]
fn reindent_range_shifts_a_misindented_card() {
    let mut doc = Document::from_lines([
        "<section>",
        "\t\t<div class=\"card\">",
        "\t\t\t<p>x</p>",
        "",
        "\t\t</div>",
        "</section>",
    ]);
    let lines = doc.lines().to_vec();
    let start = find_anchor(&lines, &Marker::literal("class=\"card\"")).unwrap().line;
    let end = find_boundary(&lines, start, &TokenPair::new("<div", "</div"), 50).unwrap();

    PatchApplier::default().apply(&mut doc, &Patch::reindent_range(start, end, -1)).unwrap();
    assert_eq!(
        doc.lines(),
        ["<section>", "\t<div class=\"card\">", "\t\t<p>x</p>", "", "\t</div>", "</section>"]
    );
}

#[rstest]
#[case(Patch::replace_range(2, 1, "x"))]
#[case(Patch::replace_range(0, 3, "x"))]
#[case(Patch::reindent_range(3, 3, 1))]
#[case(Patch::edit_line(7, "a", "b"))]
fn out_of_range_patches_are_rejected(#[case] patch: Patch) {
    let mut doc = Document::from_lines(["a", "b", "c"]);
    let err = PatchApplier::default().apply(&mut doc, &patch).unwrap_err();
    assert!(matches!(err, PatchError::Range { len: 3, .. }));
    assert_eq!(doc.lines(), ["a", "b", "c"]);
}

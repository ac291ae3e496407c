//! End-to-end tests on OpenCover fixtures
//!
//! `run_unit.xml` and `run_integration.xml` describe the same assembly
//! instrumented in two separate runs, numbering their files differently.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use covmerge::{
    encode_session, merge_documents, merge_files, parse_report, CoverageSession, MergeStats,
    Module,
};
use std::collections::HashSet;
use std::path::PathBuf;

const CORE: &str = r"C:\build\Shop.Core.dll";
const WEB: &str = r"C:\build\Shop.Web.dll";

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture(name: &str) -> CoverageSession {
    let text = std::fs::read_to_string(fixture_path(name)).expect("fixture should exist");
    parse_report(&text).expect("fixture should decode")
}

fn file_path_of(module: &Module, uid: u32) -> &str {
    module
        .files
        .iter()
        .find(|f| f.uid == uid)
        .map(|f| f.full_path.as_str())
        .expect("reference should point at a file of the module")
}

fn merged_reversed() -> CoverageSession {
    merge_documents([fixture("run_integration.xml"), fixture("run_unit.xml")]).unwrap()
}

fn merged_in_order() -> CoverageSession {
    merge_documents([fixture("run_unit.xml"), fixture("run_integration.xml")]).unwrap()
}

// ============================================================================
// Identity matching and visit sums
// ============================================================================

#[test]
fn test_shared_points_are_summed() {
    let merged = merged_in_order();
    let cart = merged.module(CORE).unwrap().class("Shop.Core.Cart").unwrap();

    let add = cart.method("System.Void Shop.Core.Cart::Add(Shop.Core.Item)").unwrap();
    assert_eq!(add.point(1).unwrap().visit_count, 14);
    assert_eq!(add.point(2).unwrap().visit_count, 14);

    let clear = cart.method("System.Void Shop.Core.Cart::Clear()").unwrap();
    assert_eq!(clear.point(3).unwrap().visit_count, 2);
}

#[test]
fn test_points_only_in_first_run_are_kept() {
    let merged = merged_in_order();
    let round = merged
        .module(CORE)
        .unwrap()
        .class("Shop.Core.Price")
        .unwrap()
        .method("System.Decimal Shop.Core.Price::Round(System.Decimal)")
        .unwrap();
    assert_eq!(round.point(4).unwrap().visit_count, 1);
    assert_eq!(round.point(5).unwrap().visit_count, 0);
}

#[test]
fn test_matched_files_keep_first_run_uids() {
    let merged = merged_in_order();
    let core = merged.module(CORE).unwrap();
    assert_eq!(core.file(r"C:\src\Shop.Core\Cart.cs").unwrap().uid, 1);
    assert_eq!(core.file(r"C:\src\Shop.Core\Price.cs").unwrap().uid, 2);
    assert_eq!(core.files.len(), 3);
}

#[test]
fn test_new_class_references_its_renumbered_file() {
    let merged = merged_in_order();
    let core = merged.module(CORE).unwrap();
    let checkout = core.file(r"C:\src\Shop.Core\Checkout.cs").unwrap();
    assert_eq!(checkout.uid, 3);

    let pay = core
        .class("Shop.Core.Checkout")
        .unwrap()
        .method("System.Boolean Shop.Core.Checkout::Pay(Shop.Core.Cart)")
        .unwrap();
    assert_eq!(pay.file_ref, Some(3));
    assert_eq!(pay.point(6).unwrap().file_id, Some(3));
}

#[test]
fn test_new_module_with_colliding_uid_is_renumbered() {
    let merged = merged_in_order();
    let web = merged.module(WEB).unwrap();
    let uid = web.files[0].uid;
    assert_eq!(uid, 4);

    let index = &web.classes[0].methods[0];
    assert_eq!(index.file_ref, Some(uid));
    assert_eq!(index.point(1).unwrap().file_id, Some(uid));
}

#[test]
fn test_skipped_module_is_carried_over() {
    let merged = merged_in_order();
    let skipped = merged.module(r"C:\build\nunit.framework.dll").unwrap();
    assert!(skipped.files.is_empty());
    assert!(skipped.classes.is_empty());
}

#[test]
fn test_module_order_is_first_seen() {
    let merged = merged_in_order();
    let paths: Vec<&str> = merged.modules.iter().map(|m| m.path.as_str()).collect();
    assert_eq!(paths, [CORE, r"C:\build\nunit.framework.dll", WEB]);
}

// ============================================================================
// Whole-document properties
// ============================================================================

#[test]
fn test_file_uids_are_unique() {
    for merged in [merged_in_order(), merged_reversed()] {
        let mut seen = HashSet::new();
        for module in &merged.modules {
            for file in &module.files {
                assert!(seen.insert(file.uid), "uid {} used twice", file.uid);
            }
        }
    }
}

#[test]
fn test_every_reference_resolves_to_the_right_file() {
    for merged in [merged_in_order(), merged_reversed()] {
        let core = merged.module(CORE).unwrap();
        let cart = core.class("Shop.Core.Cart").unwrap();
        for method in &cart.methods {
            assert!(file_path_of(core, method.file_ref.unwrap()).ends_with("Cart.cs"));
            for point in &method.sequence_points {
                assert!(file_path_of(core, point.file_id.unwrap()).ends_with("Cart.cs"));
            }
        }
        let checkout = core.class("Shop.Core.Checkout").unwrap();
        let pay = &checkout.methods[0];
        assert!(file_path_of(core, pay.file_ref.unwrap()).ends_with("Checkout.cs"));
    }
}

#[test]
fn test_merge_order_does_not_change_stats() {
    let forward = MergeStats::from_session(&merged_in_order(), 2);
    let backward = MergeStats::from_session(&merged_reversed(), 2);
    assert_eq!(forward, backward);
    assert_eq!(forward.modules, 3);
    assert_eq!(forward.files, 4);
    assert_eq!(forward.classes, 4);
    assert_eq!(forward.methods, 5);
    assert_eq!(forward.sequence_points, 7);
    assert_eq!(forward.visited_points, 6);
    assert_eq!(forward.total_visits, 35);
}

#[test]
fn test_single_report_survives_encode() {
    let original = fixture("run_unit.xml");
    let merged = merge_documents([original.clone()]).unwrap();
    let reparsed = parse_report(&encode_session(&merged)).unwrap();
    assert_eq!(reparsed, original);
}

// ============================================================================
// Encoded output
// ============================================================================

#[test]
fn test_output_has_empty_session_summary() {
    let xml = encode_session(&merged_in_order());
    assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
    assert!(xml.contains("<CoverageSession>\n  <Summary/>\n  <Modules>"));
    assert!(!xml.contains("xmlns:xsd"));
}

#[test]
fn test_output_keeps_passthrough_attributes() {
    let xml = encode_session(&merged_in_order());
    assert!(xml.contains(r#"<Module hash="9C-1A-22-4B">"#));
    assert!(xml.contains(r#"skippedDueTo="Filter""#));
    assert!(xml.contains("<MetadataToken>100663310</MetadataToken>"));
    assert!(xml.contains(
        r#"<SequencePoint vc="14" uspid="1" ordinal="0" offset="0" sl="12" sc="9" el="12" ec="10" bec="0" bev="0" fileid="1"/>"#
    ));
}

#[tokio::test]
async fn test_merge_files_writes_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("merged.xml");

    let stats = merge_files(
        &[fixture_path("run_unit.xml"), fixture_path("run_integration.xml")],
        &output,
    )
    .await
    .unwrap();

    assert_eq!(stats.documents, 2);
    assert_eq!(stats.total_visits, 35);

    let written = std::fs::read_to_string(&output).unwrap();
    assert_eq!(written, encode_session(&merged_in_order()));
    assert!(!written.contains(r#"<FileRef uid="7"/>"#));
}

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use fplx_cli::pipeline::{CheckInputs, load_hierarchy, run_check};
use fplx_ingest::CheckConfig;
use fplx_model::{FindingKind, TableKind, Term};
use fplx_report::Outcome;

/// Write the four required tables, CRLF-terminated, into a fresh directory.
fn resources(
    entities: &[&str],
    relations: &[&str],
    grounding: &[&str],
    prefixes: &[&str],
) -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    write_table(dir.path(), "entities.csv", entities);
    write_table(dir.path(), "relations.csv", relations);
    write_table(dir.path(), "grounding_map.csv", grounding);
    write_table(dir.path(), "gene_prefixes.csv", prefixes);
    dir
}

fn write_table(dir: &Path, name: &str, rows: &[&str]) {
    let contents: String = rows.iter().map(|row| format!("{row}\r\n")).collect();
    fs::write(dir.join(name), contents).expect("write table");
}

fn check(dir: &TempDir) -> fplx_cli::pipeline::CheckRun {
    run_check(&CheckInputs::new(dir.path()), &CheckConfig::default())
}

#[test]
fn self_loop_is_a_single_cycle() {
    let dir = resources(&["F1"], &["BE,F1,isa,BE,F1"], &[], &[]);
    let run = check(&dir);
    assert_eq!(run.report.outcome(), Outcome::Fail);
    assert_eq!(run.report.findings.len(), 1);
    let finding = &run.report.findings[0];
    assert_eq!(finding.kind, FindingKind::Cycle);
    assert_eq!(finding.cycle, vec!["F1".to_string(), "F1".to_string()]);
    assert_eq!(finding.line, Some(1));
}

#[test]
fn both_endpoints_unresolved_against_empty_registry() {
    let dir = resources(&[], &["BE,X,isa,BE,Y"], &[], &[]);
    let run = check(&dir);
    assert_eq!(run.report.outcome(), Outcome::Fail);
    assert_eq!(run.report.count(FindingKind::UnresolvedReference), 2);
    assert_eq!(run.report.findings.len(), 2);
    assert!(run.report.findings[0].message.contains('X'));
    assert!(run.report.findings[1].message.contains('Y'));
}

#[test]
fn resolved_grounding_passes_cleanly() {
    let dir = resources(&["C1"], &[], &["akt1,BE,C1"], &[]);
    let run = check(&dir);
    assert_eq!(run.report.outcome(), Outcome::Pass);
    assert!(run.report.findings.is_empty(), "{}", run.report.render_text());
    assert_eq!(
        run.report.render_text(),
        "PASS: 0 errors, 0 warnings, 0 info\n"
    );
}

#[test]
fn unknown_prefix_category_is_reported_once() {
    let dir = resources(&[], &[], &[], &["mEGFP-{gene},unknown-cat,"]);
    let run = check(&dir);
    assert_eq!(run.report.outcome(), Outcome::Fail);
    assert_eq!(run.report.findings.len(), 1);
    assert_eq!(run.report.findings[0].kind, FindingKind::UnknownCategory);
    assert_eq!(run.report.findings[0].table, TableKind::GenePrefixes);
}

#[test]
fn repeated_runs_render_identically() {
    let dir = resources(
        &["AKT", "AKT", "MEK", "ORPHAN"],
        &[
            "HGNC,AKT1,isa,FPLX,AKT",
            "FPLX,AKT,isa,FPLX,MEK",
            "FPLX,MEK,partof,FPLX,AKT",
            "HGNC,AKT1,isa,FPLX,AKT",
        ],
        &["akt,FPLX,AKT,HGNC,391", "akt,FPLX,MEK,,", "the,,,,"],
        &["h{gene},species,", "h{gene},species,"],
    );
    let first = check(&dir).report;
    let second = check(&dir).report;
    assert_eq!(first.render_text(), second.render_text());
    assert_eq!(
        first.to_json().expect("json"),
        second.to_json().expect("json")
    );
    assert_eq!(first.count(FindingKind::DuplicateId), 1);
    assert_eq!(first.count(FindingKind::DuplicateRelation), 1);
    assert_eq!(first.count(FindingKind::Cycle), 1);
    assert_eq!(first.count(FindingKind::ConflictingDuplicateGrounding), 1);
    assert_eq!(first.count(FindingKind::DuplicatePattern), 1);
    assert_eq!(first.count(FindingKind::EntityWithoutRelations), 1);
    assert_eq!(first.count(FindingKind::ExplicitlyUngroundedCount), 1);
}

#[test]
fn missing_required_table_skips_dependent_checks() {
    let dir = resources(&["AKT"], &["FPLX,MISSING,isa,FPLX,AKT"], &[], &["h{gene},nope,"]);
    fs::remove_file(dir.path().join("entities.csv")).expect("remove");
    let run = check(&dir);
    assert!(run.registry.is_none());
    assert!(run.graph.is_none());
    assert_eq!(run.report.outcome(), Outcome::Fail);
    let kinds: Vec<FindingKind> = run.report.findings.iter().map(|f| f.kind).collect();
    // Relations depend on the registry and are skipped; prefixes still run.
    assert_eq!(
        kinds,
        vec![FindingKind::UnreadableTable, FindingKind::UnknownCategory]
    );
    assert_eq!(run.report.findings[0].table, TableKind::Entities);
}

#[test]
fn missing_optional_tables_are_silent() {
    let dir = resources(&["AKT"], &[], &[], &[]);
    let run = check(&dir);
    assert_eq!(run.report.outcome(), Outcome::Pass);
    assert!(run.report.findings.is_empty());
}

#[test]
fn optional_tables_are_checked_when_present() {
    let dir = resources(&["AKT"], &[], &[], &[]);
    write_table(dir.path(), "equivalences.csv", &["BEL,AKT Family,AKT", "BEL,ERK Family,ERK"]);
    write_table(dir.path(), "descriptions.csv", &["AKT,PMID:1,Serine kinase family"]);
    let run = check(&dir);
    assert_eq!(run.report.count(FindingKind::UnresolvedReference), 1);
    let finding = &run.report.findings[0];
    assert_eq!(finding.table, TableKind::Equivalences);
    assert_eq!(finding.line, Some(2));
}

#[test]
fn lf_table_is_unreadable_under_crlf_dialect() {
    let dir = resources(&["AKT"], &[], &[], &[]);
    fs::write(dir.path().join("relations.csv"), "HGNC,AKT1,isa,FPLX,AKT\n").expect("write");
    let run = check(&dir);
    assert!(run.graph.is_none());
    assert_eq!(run.report.count(FindingKind::UnreadableTable), 1);
    assert_eq!(run.report.findings[0].table, TableKind::Relations);
}

#[test]
fn overrides_replace_configured_paths() {
    let dir = resources(&[], &[], &[], &[]);
    let elsewhere = tempfile::tempdir().expect("tempdir");
    write_table(elsewhere.path(), "my_entities.csv", &["C1"]);
    let inputs = CheckInputs::new(dir.path()).with_override(
        TableKind::Entities,
        Some(elsewhere.path().join("my_entities.csv")),
    );
    let run = run_check(&inputs, &CheckConfig::default());
    let registry = run.registry.expect("registry");
    assert!(registry.contains("C1"));
}

#[test]
fn overridden_tables_are_cited_by_name() {
    let dir = resources(&[], &[], &[], &[]);
    let elsewhere = tempfile::tempdir().expect("tempdir");
    write_table(elsewhere.path(), "entity_list.csv", &["C1", "C1"]);
    let inputs = CheckInputs::new(dir.path()).with_override(
        TableKind::Entities,
        Some(elsewhere.path().join("entity_list.csv")),
    );
    let run = run_check(&inputs, &CheckConfig::default());
    let text = run.report.render_text();
    assert!(text.starts_with("entities:2: error[duplicate-id]"), "{text}");
    assert!(!text.contains("entities.csv"));
}

#[test]
fn hierarchy_answers_lineage_queries() {
    let dir = resources(
        &["AKT", "PI3K_AKT"],
        &["HGNC,AKT1,isa,FPLX,AKT", "FPLX,AKT,partof,FPLX,PI3K_AKT"],
        &[],
        &[],
    );
    let graph = load_hierarchy(&CheckInputs::new(dir.path()), &CheckConfig::default())
        .expect("hierarchy");
    let akt1 = Term::new("HGNC", "AKT1");
    assert!(graph.is_member(&akt1));
    assert_eq!(
        graph.ancestors(&akt1),
        vec![Term::new("FPLX", "AKT"), Term::new("FPLX", "PI3K_AKT")]
    );
    assert_eq!(graph.roots(), vec![Term::new("FPLX", "PI3K_AKT")]);
}

#[test]
fn hierarchy_refuses_cyclic_relations() {
    let dir = resources(
        &["A", "B"],
        &["FPLX,A,isa,FPLX,B", "FPLX,B,isa,FPLX,A"],
        &[],
        &[],
    );
    let error = load_hierarchy(&CheckInputs::new(dir.path()), &CheckConfig::default())
        .expect_err("cycle");
    assert!(error.to_string().contains("cycle"));
}

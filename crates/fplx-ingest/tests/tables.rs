use std::fs;
use std::path::PathBuf;

use fplx_ingest::{
    LineTerminator, LoadError, load_entities, load_gene_prefixes, load_grounding_map,
    load_relations,
};
use fplx_model::{FindingKind, GroundingOutcome, Relation, TableKind, Term};
use tempfile::TempDir;

fn write_table(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write table");
    path
}

#[test]
fn loads_relations_with_crlf_terminators() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_table(
        &dir,
        "relations.csv",
        "HGNC,AKT1,isa,FPLX,AKT\r\nFPLX,AMPK_alpha,partof,FPLX,AMPK\r\n",
    );
    let loaded = load_relations(&path, LineTerminator::Crlf).expect("load relations");
    assert!(loaded.findings.is_empty(), "{:?}", loaded.findings);
    assert_eq!(loaded.records.len(), 2);
    assert_eq!(loaded.records[0].subject, Term::new("HGNC", "AKT1"));
    assert_eq!(loaded.records[1].relation, Relation::Partof);
    assert_eq!(loaded.records[1].line, 2);
}

#[test]
fn short_relation_row_is_reported_and_skipped() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_table(
        &dir,
        "relations.csv",
        "HGNC,AKT1,isa,FPLX,AKT\r\nHGNC,AKT2,isa,FPLX\r\nHGNC,AKT3,isa,FPLX,AKT\r\n",
    );
    let loaded = load_relations(&path, LineTerminator::Crlf).expect("load relations");
    assert_eq!(loaded.records.len(), 2);
    assert_eq!(loaded.findings.len(), 1);
    let finding = &loaded.findings[0];
    assert_eq!(finding.kind, FindingKind::MalformedRow);
    assert_eq!(finding.table, TableKind::Relations);
    assert_eq!(finding.line, Some(2));
    assert!(finding.message.contains("4 fields, expected 5"));
}

#[test]
fn grounding_rows_must_match_widest_row() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_table(
        &dir,
        "grounding_map.csv",
        "AKT,FPLX,AKT,,\r\nAKT1,HGNC,391,UP,P31749\r\nthe\r\nit,,,,\r\n",
    );
    let loaded = load_grounding_map(&path, LineTerminator::Crlf).expect("load grounding map");
    assert_eq!(loaded.records.len(), 3);
    assert_eq!(loaded.findings.len(), 1);
    assert_eq!(loaded.findings[0].line, Some(3));
    let ungrounded = loaded
        .records
        .iter()
        .find(|entry| entry.text == "it")
        .expect("padded ungrounded row");
    assert_eq!(ungrounded.outcome, GroundingOutcome::ExplicitlyUngrounded);
}

#[test]
fn quoted_fields_keep_commas() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_table(
        &dir,
        "gene_prefixes.csv",
        "Pattern,Category,Notes\r\np-{gene},protein-state,\"phospho, any site\"\r\n",
    );
    let loaded = load_gene_prefixes(&path, LineTerminator::Crlf).expect("load prefixes");
    assert!(loaded.findings.is_empty());
    assert_eq!(loaded.records.len(), 1);
    assert_eq!(loaded.records[0].notes, "phospho, any site");
    assert_eq!(loaded.records[0].line, 2);
}

#[test]
fn lf_file_is_fatal_under_crlf_dialect() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_table(&dir, "entities.csv", "AKT\nAMPK\n");
    let err = load_entities(&path, LineTerminator::Crlf).unwrap_err();
    assert!(matches!(err, LoadError::Dialect { .. }));

    let loaded = load_entities(&path, LineTerminator::Lf).expect("lf dialect");
    assert_eq!(loaded.records.len(), 2);
}

#[test]
fn stray_lf_line_is_a_row_finding() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_table(&dir, "entities.csv", "AKT\r\nAMPK\nERK\r\n");
    let loaded = load_entities(&path, LineTerminator::Crlf).expect("load entities");
    assert_eq!(loaded.records.len(), 3);
    assert_eq!(loaded.findings.len(), 1);
    assert_eq!(loaded.findings[0].line, Some(2));
    assert!(loaded.findings[0].message.contains("LF"));
}

#[test]
fn crlf_rows_are_numbered_by_physical_line() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_table(
        &dir,
        "relations.csv",
        "HGNC,AKT1,isa,FPLX,AKT\r\nHGNC,AKT2,isa,FPLX,AKT\r\nHGNC,AKT3,isa,FPLX,AKT\r\n",
    );
    let loaded = load_relations(&path, LineTerminator::Crlf).expect("load relations");
    let lines: Vec<usize> = loaded.records.iter().map(|triple| triple.line).collect();
    assert_eq!(lines, vec![1, 2, 3]);
    assert!(loaded.findings.is_empty(), "{:?}", loaded.findings);
}

#[test]
fn quoted_line_breaks_advance_the_line_count() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_table(
        &dir,
        "gene_prefixes.csv",
        "Pattern,Category,Notes\r\n\
         p-{gene},protein-state,\"phospho,\r\nany site\"\r\n\
         {gene}-P,protein-state,\r\n",
    );
    let loaded = load_gene_prefixes(&path, LineTerminator::Crlf).expect("load prefixes");
    assert!(loaded.findings.is_empty(), "{:?}", loaded.findings);
    let lines: Vec<usize> = loaded.records.iter().map(|prefix| prefix.line).collect();
    assert_eq!(lines, vec![2, 4]);
    assert_eq!(loaded.records[0].notes, "phospho,\r\nany site");
}

#[test]
fn stray_quote_does_not_hide_later_terminators() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_table(&dir, "entities.csv", "5\"-nucleotidase\nAKT\nERK\n");
    let err = load_entities(&path, LineTerminator::Crlf).unwrap_err();
    assert!(matches!(err, LoadError::Dialect { found: "LF", .. }));

    let loaded = load_entities(&path, LineTerminator::Lf).expect("lf dialect");
    let ids: Vec<&str> = loaded.records.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["5\"-nucleotidase", "AKT", "ERK"]);

    let mixed = write_table(&dir, "mixed.csv", "5\"-nucleotidase\r\nAKT\nERK\r\n");
    let loaded = load_entities(&mixed, LineTerminator::Crlf).expect("load entities");
    assert_eq!(loaded.findings.len(), 1);
    assert_eq!(loaded.findings[0].line, Some(2));
}

#[test]
fn blank_lines_are_row_findings() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_table(
        &dir,
        "relations.csv",
        "HGNC,AKT1,isa,FPLX,AKT\r\n\r\nHGNC,AKT2,isa,FPLX,AKT\r\n\r\n",
    );
    let loaded = load_relations(&path, LineTerminator::Crlf).expect("load relations");
    let lines: Vec<usize> = loaded.records.iter().map(|triple| triple.line).collect();
    assert_eq!(lines, vec![1, 3]);
    let flagged: Vec<Option<usize>> = loaded.findings.iter().map(|f| f.line).collect();
    assert_eq!(flagged, vec![Some(2), Some(4)]);
    assert!(
        loaded
            .findings
            .iter()
            .all(|finding| finding.kind == FindingKind::MalformedRow)
    );
}

#[test]
fn missing_file_is_fatal() {
    let dir = TempDir::new().expect("temp dir");
    let err = load_entities(&dir.path().join("entities.csv"), LineTerminator::Crlf).unwrap_err();
    assert!(matches!(err, LoadError::FileNotFound { .. }));
}

#[test]
fn utf16_file_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("entities.csv");
    fs::write(&path, [0xFF, 0xFE, b'A', 0, b'\r', 0, b'\n', 0]).expect("write table");
    let err = load_entities(&path, LineTerminator::Crlf).unwrap_err();
    assert!(matches!(
        err,
        LoadError::UnsupportedEncoding {
            encoding: "UTF-16 LE",
            ..
        }
    ));
}

#[test]
fn utf8_bom_is_stripped() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_table(&dir, "entities.csv", "\u{feff}AKT\r\nAMPK\r\n");
    let loaded = load_entities(&path, LineTerminator::Crlf).expect("load entities");
    assert_eq!(loaded.records[0].id, "AKT");
}

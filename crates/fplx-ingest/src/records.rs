//! Typed record loaders for each resource table.

use std::path::Path;

use tracing::info;

use fplx_model::{
    DescriptionEntry, Entity, EntityKind, EquivalenceEntry, Finding, FindingKind, GroundingEntry,
    GroundingOutcome, PrefixPatternEntry, Relation, RelationTriple, TableKind, Term,
};

use crate::dialect::LineTerminator;
use crate::error::Result;
use crate::table::{RawRow, TableSchema, read_table};

/// Records loaded from one table together with its row-level findings.
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub records: Vec<T>,
    pub findings: Vec<Finding>,
}

fn load_with<T>(
    path: &Path,
    table: TableKind,
    terminator: LineTerminator,
    parse: impl Fn(&RawRow) -> std::result::Result<T, String>,
) -> Result<Loaded<T>> {
    let (raw, mut findings) = read_table(path, TableSchema::for_table(table), terminator)?;
    let mut records = Vec::with_capacity(raw.rows.len());
    for row in &raw.rows {
        match parse(row) {
            Ok(record) => records.push(record),
            Err(reason) => findings.push(
                Finding::new(table, FindingKind::MalformedRow, reason).at_line(row.line),
            ),
        }
    }
    info!(
        table = %table,
        records = records.len(),
        malformed = findings.len(),
        "table loaded"
    );
    Ok(Loaded { records, findings })
}

fn required<'a>(row: &'a RawRow, idx: usize, column: &str) -> std::result::Result<&'a str, String> {
    let value = row.field(idx);
    if value.trim().is_empty() {
        Err(format!("missing required {column}"))
    } else {
        Ok(value)
    }
}

fn optional(row: &RawRow, idx: usize) -> Option<String> {
    let value = row.field(idx);
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

pub fn parse_entity(row: &RawRow) -> std::result::Result<Entity, String> {
    let id = required(row, 0, "entity id")?;
    let kind = optional(row, 1)
        .map(|raw| raw.parse::<EntityKind>())
        .transpose()
        .map_err(|e| e.to_string())?;
    Ok(Entity {
        id: id.to_string(),
        kind,
        notes: optional(row, 2),
        line: row.line,
    })
}

pub fn parse_relation(row: &RawRow) -> std::result::Result<RelationTriple, String> {
    let subject_ns = required(row, 0, "subject namespace")?;
    let subject_id = required(row, 1, "subject id")?;
    let relation = required(row, 2, "relation")?
        .parse::<Relation>()
        .map_err(|e| e.to_string())?;
    let object_ns = required(row, 3, "object namespace")?;
    let object_id = required(row, 4, "object id")?;
    Ok(RelationTriple {
        subject: Term::new(subject_ns, subject_id),
        relation,
        object: Term::new(object_ns, object_id),
        line: row.line,
    })
}

/// Grounding rows are `text` followed by `namespace, id` pairs. Unused pairs
/// are padded with empty fields; a pair with only one side filled in is an
/// editing mistake.
pub fn parse_grounding(row: &RawRow) -> std::result::Result<GroundingEntry, String> {
    let text = required(row, 0, "grounding text")?;
    let mut targets = Vec::new();
    for (pair_idx, pair) in row.fields[1..].chunks(2).enumerate() {
        let column = 2 + pair_idx * 2;
        match pair {
            [namespace, id] => match (namespace.is_empty(), id.is_empty()) {
                (true, true) => {}
                (false, false) => targets.push(Term::new(namespace, id)),
                (false, true) => {
                    return Err(format!(
                        "namespace '{namespace}' in column {column} has no id"
                    ));
                }
                (true, false) => {
                    return Err(format!("id '{id}' in column {} has no namespace", column + 1));
                }
            },
            [dangling] if !dangling.is_empty() => {
                return Err(format!(
                    "namespace '{dangling}' in column {column} has no id column"
                ));
            }
            _ => {}
        }
    }
    Ok(GroundingEntry {
        text: text.to_string(),
        outcome: GroundingOutcome::from_targets(targets),
        line: row.line,
    })
}

pub fn parse_prefix(row: &RawRow) -> std::result::Result<PrefixPatternEntry, String> {
    Ok(PrefixPatternEntry {
        pattern: required(row, 0, "pattern")?.to_string(),
        category: required(row, 1, "category")?.to_string(),
        notes: row.field(2).to_string(),
        line: row.line,
    })
}

pub fn parse_equivalence(row: &RawRow) -> std::result::Result<EquivalenceEntry, String> {
    let namespace = required(row, 0, "namespace")?;
    let id = required(row, 1, "id")?;
    let local_id = required(row, 2, "local id")?;
    Ok(EquivalenceEntry {
        external: Term::new(namespace, id),
        local_id: local_id.to_string(),
        line: row.line,
    })
}

pub fn parse_description(row: &RawRow) -> std::result::Result<DescriptionEntry, String> {
    Ok(DescriptionEntry {
        local_id: required(row, 0, "entity id")?.to_string(),
        source: row.field(1).to_string(),
        description: row.field(2).to_string(),
        line: row.line,
    })
}

pub fn load_entities(path: &Path, terminator: LineTerminator) -> Result<Loaded<Entity>> {
    load_with(path, TableKind::Entities, terminator, parse_entity)
}

pub fn load_relations(path: &Path, terminator: LineTerminator) -> Result<Loaded<RelationTriple>> {
    load_with(path, TableKind::Relations, terminator, parse_relation)
}

pub fn load_grounding_map(
    path: &Path,
    terminator: LineTerminator,
) -> Result<Loaded<GroundingEntry>> {
    load_with(path, TableKind::GroundingMap, terminator, parse_grounding)
}

pub fn load_gene_prefixes(
    path: &Path,
    terminator: LineTerminator,
) -> Result<Loaded<PrefixPatternEntry>> {
    load_with(path, TableKind::GenePrefixes, terminator, parse_prefix)
}

pub fn load_equivalences(
    path: &Path,
    terminator: LineTerminator,
) -> Result<Loaded<EquivalenceEntry>> {
    load_with(path, TableKind::Equivalences, terminator, parse_equivalence)
}

pub fn load_descriptions(
    path: &Path,
    terminator: LineTerminator,
) -> Result<Loaded<DescriptionEntry>> {
    load_with(path, TableKind::Descriptions, terminator, parse_description)
}

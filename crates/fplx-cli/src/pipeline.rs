//! One validation pass over the resource tables.
//!
//! Tables are loaded first, then checked leaves-first: the entity registry,
//! the relation graph on top of it, then the validators that consume the
//! registry. A table that cannot be read becomes an unreadable-table finding
//! and every check depending on it is skipped; independent checks still run.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Result, anyhow};
use tracing::{debug, error, info, info_span, warn};

use fplx_ingest::{
    CheckConfig, LineTerminator, LoadError, Loaded, load_descriptions, load_entities,
    load_equivalences, load_gene_prefixes, load_grounding_map, load_relations,
};
use fplx_model::{Finding, FindingKind, TableKind};
use fplx_report::Report;
use fplx_validate::{
    EntityRegistry, RelationGraph, find_entities_without_relations, validate_descriptions,
    validate_equivalences, validate_groundings, validate_prefixes,
};

/// Where to find the tables for a run.
#[derive(Debug, Clone)]
pub struct CheckInputs {
    pub resources_dir: PathBuf,
    /// Explicit paths that replace the configured file names.
    pub overrides: BTreeMap<TableKind, PathBuf>,
}

impl CheckInputs {
    pub fn new(resources_dir: impl Into<PathBuf>) -> Self {
        Self {
            resources_dir: resources_dir.into(),
            overrides: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_override(mut self, table: TableKind, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.overrides.insert(table, path);
        }
        self
    }

    pub fn path(&self, config: &CheckConfig, table: TableKind) -> PathBuf {
        self.overrides
            .get(&table)
            .cloned()
            .unwrap_or_else(|| config.table_path(&self.resources_dir, table))
    }
}

/// Everything a run produced.
#[derive(Debug)]
pub struct CheckRun {
    pub report: Report,
    /// Absent when the entity table could not be read.
    pub registry: Option<EntityRegistry>,
    /// Absent when the entity or relation table could not be read.
    pub graph: Option<RelationGraph>,
}

type Loader<T> = fn(&Path, LineTerminator) -> fplx_ingest::Result<Loaded<T>>;

fn load_or_report<T>(
    inputs: &CheckInputs,
    config: &CheckConfig,
    table: TableKind,
    loader: Loader<T>,
    findings: &mut Vec<Finding>,
) -> Option<Vec<T>> {
    let path = inputs.path(config, table);
    match loader(&path, config.dialect.line_terminator) {
        Ok(loaded) => {
            findings.extend(loaded.findings);
            Some(loaded.records)
        }
        Err(LoadError::FileNotFound { .. }) if table.is_optional() => {
            debug!(table = %table, path = %path.display(), "optional table absent, skipping");
            None
        }
        Err(load_error) => {
            error!(table = %table, path = %path.display(), error = %load_error, "table unreadable");
            findings.push(Finding::new(
                table,
                FindingKind::UnreadableTable,
                load_error.to_string(),
            ));
            None
        }
    }
}

/// Run every check and aggregate the findings into a report.
pub fn run_check(inputs: &CheckInputs, config: &CheckConfig) -> CheckRun {
    let started = Instant::now();
    let policy = &config.namespaces;
    let mut findings = Vec::new();

    let load_span = info_span!("load", resources_dir = %inputs.resources_dir.display());
    let load_guard = load_span.enter();
    let entities = load_or_report(
        inputs,
        config,
        TableKind::Entities,
        load_entities,
        &mut findings,
    );
    let triples = load_or_report(
        inputs,
        config,
        TableKind::Relations,
        load_relations,
        &mut findings,
    );
    let groundings = load_or_report(
        inputs,
        config,
        TableKind::GroundingMap,
        load_grounding_map,
        &mut findings,
    );
    let prefixes = load_or_report(
        inputs,
        config,
        TableKind::GenePrefixes,
        load_gene_prefixes,
        &mut findings,
    );
    let equivalences = load_or_report(
        inputs,
        config,
        TableKind::Equivalences,
        load_equivalences,
        &mut findings,
    );
    let descriptions = load_or_report(
        inputs,
        config,
        TableKind::Descriptions,
        load_descriptions,
        &mut findings,
    );
    drop(load_guard);

    let validate_span = info_span!("validate");
    let _validate_guard = validate_span.enter();

    let registry = entities.map(|records| {
        let (registry, registry_findings) = EntityRegistry::build(records);
        info!(
            entities = registry.len(),
            duplicates = registry_findings.len(),
            "entity registry built"
        );
        findings.extend(registry_findings);
        registry
    });

    let graph = match (&registry, &triples) {
        (Some(registry), Some(triples)) => {
            let (graph, graph_findings) = RelationGraph::build(triples, registry, policy);
            info!(
                triples = triples.len(),
                terms = graph.universe().len(),
                findings = graph_findings.len(),
                "relation graph checked"
            );
            findings.extend(graph_findings);
            // An empty relation table means the hierarchy is not curated yet.
            if !triples.is_empty() {
                findings.extend(find_entities_without_relations(registry, &graph));
            }
            Some(graph)
        }
        _ => None,
    };

    if let (Some(registry), Some(groundings)) = (&registry, &groundings) {
        let grounding_findings = validate_groundings(groundings, registry, policy);
        info!(
            entries = groundings.len(),
            findings = grounding_findings.len(),
            "grounding map checked"
        );
        findings.extend(grounding_findings);
    }

    if let Some(prefixes) = &prefixes {
        let prefix_findings = validate_prefixes(prefixes, &config.prefixes.placeholder);
        info!(entries = prefixes.len(), findings = prefix_findings.len(), "gene prefixes checked");
        findings.extend(prefix_findings);
    }

    if let Some(registry) = &registry {
        if let Some(equivalences) = &equivalences {
            findings.extend(validate_equivalences(equivalences, registry, policy));
        }
        if let Some(descriptions) = &descriptions {
            findings.extend(validate_descriptions(descriptions, registry));
        }
    }

    let report = Report::aggregate(findings);
    if report.has_errors() {
        warn!(errors = report.totals.errors, "resource tables are inconsistent");
    }
    info!(
        outcome = %report.outcome(),
        errors = report.totals.errors,
        warnings = report.totals.warnings,
        duration_ms = started.elapsed().as_millis(),
        "check complete"
    );
    CheckRun {
        report,
        registry,
        graph,
    }
}

/// Load only the entity and relation tables and build the hierarchy.
///
/// Unlike [`run_check`] this fails when either table is unusable, since a
/// partial hierarchy would give misleading query answers.
pub fn load_hierarchy(inputs: &CheckInputs, config: &CheckConfig) -> Result<RelationGraph> {
    let terminator = config.dialect.line_terminator;
    let entities = load_entities(&inputs.path(config, TableKind::Entities), terminator)?;
    let relations = load_relations(&inputs.path(config, TableKind::Relations), terminator)?;
    let (registry, _) = EntityRegistry::build(entities.records);
    let (graph, findings) = RelationGraph::build(&relations.records, &registry, &config.namespaces);
    if graph.cycle_count() > 0 {
        let first = findings
            .iter()
            .find(|finding| finding.kind == FindingKind::Cycle)
            .map(|finding| finding.message.clone())
            .unwrap_or_default();
        return Err(anyhow!(
            "relations contain {} cycle(s); first: {first}",
            graph.cycle_count()
        ));
    }
    Ok(graph)
}

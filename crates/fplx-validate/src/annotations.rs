//! Checks for the optional equivalences and descriptions tables, and for
//! entities that never appear in the hierarchy.

use std::collections::HashMap;

use fplx_model::{
    DescriptionEntry, EquivalenceEntry, Finding, FindingKind, NamespacePolicy, TableKind, Term,
};

use crate::graph::RelationGraph;
use crate::registry::EntityRegistry;

pub fn validate_equivalences(
    entries: &[EquivalenceEntry],
    registry: &EntityRegistry,
    policy: &NamespacePolicy,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut first_seen: HashMap<(&Term, &str), usize> = HashMap::new();
    for entry in entries {
        if !policy.is_grounding_namespace(&entry.external.namespace) {
            findings.push(
                Finding::new(
                    TableKind::Equivalences,
                    FindingKind::MalformedNamespace,
                    format!(
                        "unrecognized namespace '{}' in equivalence for {}",
                        entry.external.namespace, entry.local_id
                    ),
                )
                .at_line(entry.line),
            );
        }
        if !registry.contains(&entry.local_id) {
            findings.push(
                Finding::new(
                    TableKind::Equivalences,
                    FindingKind::UnresolvedReference,
                    format!(
                        "id {} mapped from {} is not in the entity list",
                        entry.local_id, entry.external
                    ),
                )
                .at_line(entry.line),
            );
        }
        let key = (&entry.external, entry.local_id.as_str());
        if let Some(first) = first_seen.get(&key) {
            findings.push(
                Finding::new(
                    TableKind::Equivalences,
                    FindingKind::DuplicateEquivalence,
                    format!(
                        "equivalence {} = {} already listed on line {first}",
                        entry.external, entry.local_id
                    ),
                )
                .at_line(entry.line)
                .related_to(*first),
            );
        } else {
            first_seen.insert(key, entry.line);
        }
    }
    findings
}

pub fn validate_descriptions(
    entries: &[DescriptionEntry],
    registry: &EntityRegistry,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        if !registry.contains(&entry.local_id) {
            findings.push(
                Finding::new(
                    TableKind::Descriptions,
                    FindingKind::UnresolvedReference,
                    format!("described id {} is not in the entity list", entry.local_id),
                )
                .at_line(entry.line),
            );
        }
        if let Some(first) = first_seen.get(entry.local_id.as_str()) {
            findings.push(
                Finding::new(
                    TableKind::Descriptions,
                    FindingKind::DuplicateDescription,
                    format!("{} already described on line {first}", entry.local_id),
                )
                .at_line(entry.line)
                .related_to(*first),
            );
        } else {
            first_seen.insert(entry.local_id.as_str(), entry.line);
        }
    }
    findings
}

/// Entities that appear in no relation triple.
pub fn find_entities_without_relations(
    registry: &EntityRegistry,
    graph: &RelationGraph,
) -> Vec<Finding> {
    registry
        .entities()
        .filter(|entity| !graph.mentions_local(&entity.id))
        .map(|entity| {
            Finding::new(
                TableKind::Entities,
                FindingKind::EntityWithoutRelations,
                format!("{} has no known relations", entity.id),
            )
            .at_line(entity.line)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use fplx_model::{Entity, Relation, RelationTriple};

    use super::*;

    fn registry(ids: &[&str]) -> EntityRegistry {
        let records = ids
            .iter()
            .enumerate()
            .map(|(idx, id)| Entity::new(*id, idx + 1))
            .collect();
        EntityRegistry::build(records).0
    }

    fn equivalence(line: usize, ns: &str, id: &str, local: &str) -> EquivalenceEntry {
        EquivalenceEntry {
            external: Term::new(ns, id),
            local_id: local.to_string(),
            line,
        }
    }

    #[test]
    fn equivalence_checks() {
        let findings = validate_equivalences(
            &[
                equivalence(1, "BEL", "AMP Activated Protein Kinase Complex", "AMPK"),
                equivalence(2, "BEL", "AMP Activated Protein Kinase Complex", "AMPK"),
                equivalence(3, "XYZ", "1", "AMPK"),
                equivalence(4, "PF", "PF00069", "MISSING"),
            ],
            &registry(&["AMPK"]),
            &NamespacePolicy::default(),
        );
        let kinds: Vec<_> = findings.iter().map(|f| (f.line, f.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                (Some(2), FindingKind::DuplicateEquivalence),
                (Some(3), FindingKind::MalformedNamespace),
                (Some(4), FindingKind::UnresolvedReference),
            ]
        );
    }

    #[test]
    fn description_checks() {
        let entry = |line: usize, id: &str| DescriptionEntry {
            local_id: id.to_string(),
            source: "PMID:1".to_string(),
            description: "text".to_string(),
            line,
        };
        let findings = validate_descriptions(
            &[entry(1, "AKT"), entry(2, "AKT"), entry(3, "NOPE")],
            &registry(&["AKT"]),
        );
        let kinds: Vec<_> = findings.iter().map(|f| (f.line, f.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                (Some(2), FindingKind::DuplicateDescription),
                (Some(3), FindingKind::UnresolvedReference),
            ]
        );
    }

    #[test]
    fn entities_missing_from_hierarchy() {
        let registry = registry(&["AKT", "LONELY"]);
        let triples = vec![RelationTriple {
            subject: Term::new("HGNC", "AKT1"),
            relation: Relation::Isa,
            object: Term::new("FPLX", "AKT"),
            line: 1,
        }];
        let (graph, _) = RelationGraph::build(&triples, &registry, &NamespacePolicy::default());
        let findings = find_entities_without_relations(&registry, &graph);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::EntityWithoutRelations);
        assert_eq!(findings[0].line, Some(2));
    }
}

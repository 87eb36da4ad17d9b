//! Grounding map checks.

use std::collections::HashMap;

use tracing::debug;

use fplx_model::{
    Finding, FindingKind, GroundingEntry, GroundingOutcome, NamespacePolicy, TableKind, Term,
};

use crate::registry::EntityRegistry;

/// Namespaces whose ids carry a conventional prefix, and that prefix.
const PREFIXED_NAMESPACES: &[(&str, &str)] =
    &[("GO", "GO:"), ("CHEBI", "CHEBI:"), ("CHEMBL", "CHEMBL")];

pub fn validate_groundings(
    entries: &[GroundingEntry],
    registry: &EntityRegistry,
    policy: &NamespacePolicy,
) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut first_by_text: HashMap<&str, &GroundingEntry> = HashMap::new();
    let mut ungrounded = 0usize;

    for entry in entries {
        match first_by_text.get(entry.text.as_str()) {
            Some(first) => {
                if first.outcome.target_set() != entry.outcome.target_set() {
                    findings.push(
                        Finding::new(
                            TableKind::GroundingMap,
                            FindingKind::ConflictingDuplicateGrounding,
                            format!(
                                "text '{}' is grounded differently than on line {}",
                                entry.text, first.line
                            ),
                        )
                        .at_line(entry.line)
                        .related_to(first.line),
                    );
                }
            }
            None => {
                first_by_text.insert(entry.text.as_str(), entry);
            }
        }

        match &entry.outcome {
            GroundingOutcome::ExplicitlyUngrounded => ungrounded += 1,
            GroundingOutcome::Grounded(targets) => {
                for target in targets {
                    check_target(entry, target, registry, policy, &mut findings);
                }
                check_chemical_pairing(entry, &mut findings);
            }
        }
    }

    if ungrounded > 0 {
        findings.push(Finding::new(
            TableKind::GroundingMap,
            FindingKind::ExplicitlyUngroundedCount,
            format!("{ungrounded} entries are explicitly ungrounded"),
        ));
    }
    debug!(entries = entries.len(), ungrounded, "grounding map checked");
    findings
}

fn check_target(
    entry: &GroundingEntry,
    target: &Term,
    registry: &EntityRegistry,
    policy: &NamespacePolicy,
    findings: &mut Vec<Finding>,
) {
    if policy.is_local(&target.namespace) {
        if !registry.contains(&target.id) {
            findings.push(
                Finding::new(
                    TableKind::GroundingMap,
                    FindingKind::UnresolvedGroundingReference,
                    format!(
                        "id {} referenced for text '{}' is not in the entity list",
                        target.id, entry.text
                    ),
                )
                .at_line(entry.line),
            );
        }
        return;
    }
    if !policy.is_grounding_namespace(&target.namespace) {
        findings.push(
            Finding::new(
                TableKind::GroundingMap,
                FindingKind::MalformedNamespace,
                format!(
                    "unrecognized namespace '{}' for text '{}'",
                    target.namespace, entry.text
                ),
            )
            .at_line(entry.line),
        );
        return;
    }
    if let Some((_, prefix)) = PREFIXED_NAMESPACES
        .iter()
        .find(|(namespace, _)| *namespace == target.namespace)
        && !target.id.starts_with(prefix)
    {
        findings.push(
            Finding::new(
                TableKind::GroundingMap,
                FindingKind::UnprefixedIdentifier,
                format!(
                    "{} id '{}' for text '{}' should start with '{prefix}'",
                    target.namespace, target.id, entry.text
                ),
            )
            .at_line(entry.line),
        );
    }
}

/// PubChem and ChEBI groundings are expected to come in pairs.
fn check_chemical_pairing(entry: &GroundingEntry, findings: &mut Vec<Finding>) {
    let missing = match (entry.target_in("PUBCHEM"), entry.target_in("CHEBI")) {
        (Some(_), None) => "CHEBI",
        (None, Some(_)) => "PUBCHEM",
        _ => return,
    };
    let present = if missing == "CHEBI" { "PUBCHEM" } else { "CHEBI" };
    findings.push(
        Finding::new(
            TableKind::GroundingMap,
            FindingKind::IncompleteChemicalGrounding,
            format!("text '{}' has a {present} id but no {missing} id", entry.text),
        )
        .at_line(entry.line),
    );
}

#[cfg(test)]
mod tests {
    use fplx_model::Entity;

    use super::*;

    fn entry(line: usize, text: &str, targets: &[(&str, &str)]) -> GroundingEntry {
        GroundingEntry {
            text: text.to_string(),
            outcome: GroundingOutcome::from_targets(
                targets.iter().map(|(ns, id)| Term::new(*ns, *id)).collect(),
            ),
            line,
        }
    }

    fn check(entries: &[GroundingEntry], ids: &[&str]) -> Vec<Finding> {
        let records = ids
            .iter()
            .enumerate()
            .map(|(idx, id)| Entity::new(*id, idx + 1))
            .collect();
        let (registry, _) = EntityRegistry::build(records);
        validate_groundings(entries, &registry, &NamespacePolicy::default())
    }

    #[test]
    fn local_target_resolves() {
        let findings = check(&[entry(1, "akt1", &[("BE", "C1")])], &["C1"]);
        assert!(findings.is_empty(), "{findings:?}");
    }

    #[test]
    fn unresolved_local_target() {
        let findings = check(&[entry(2, "AKT", &[("FPLX", "AKT")])], &[]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::UnresolvedGroundingReference);
        assert_eq!(findings[0].line, Some(2));
    }

    #[test]
    fn identical_duplicates_are_accepted() {
        let findings = check(
            &[
                entry(1, "ERK", &[("FPLX", "ERK"), ("HGNC", "6871")]),
                entry(2, "ERK", &[("HGNC", "6871"), ("FPLX", "ERK")]),
            ],
            &["ERK"],
        );
        assert!(findings.is_empty(), "{findings:?}");
    }

    #[test]
    fn conflicting_duplicates_are_reported_once() {
        let findings = check(
            &[
                entry(1, "ERK", &[("FPLX", "ERK")]),
                entry(2, "ERK", &[("HGNC", "6871")]),
            ],
            &["ERK"],
        );
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::ConflictingDuplicateGrounding);
        assert_eq!(findings[0].line, Some(2));
        assert_eq!(findings[0].related_line, Some(1));
    }

    #[test]
    fn ungrounded_entries_are_only_counted() {
        let findings = check(&[entry(1, "the", &[]), entry(2, "cells", &[])], &[]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::ExplicitlyUngroundedCount);
        assert!(!findings[0].is_error());
        assert_eq!(findings[0].line, None);
        assert!(findings[0].message.starts_with("2 entries"));
    }

    #[test]
    fn unknown_namespace_is_malformed() {
        let findings = check(&[entry(3, "x", &[("HNGC", "AKT1")])], &[]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, FindingKind::MalformedNamespace);
    }

    #[test]
    fn chemical_warnings() {
        let findings = check(
            &[
                entry(1, "ATP", &[("CHEBI", "CHEBI:15422"), ("PUBCHEM", "5957")]),
                entry(2, "ADP", &[("PUBCHEM", "6022")]),
                entry(3, "GTP", &[("CHEBI", "15996")]),
            ],
            &[],
        );
        let kinds: Vec<_> = findings.iter().map(|f| (f.line, f.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                (Some(2), FindingKind::IncompleteChemicalGrounding),
                (Some(3), FindingKind::UnprefixedIdentifier),
                (Some(3), FindingKind::IncompleteChemicalGrounding),
            ]
        );
        assert!(findings.iter().all(|f| !f.is_error()));
    }
}

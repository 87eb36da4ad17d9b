use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Namespace tokens used by the FamPlex tables.
///
/// `FPLX` is the current local namespace; `BE` is the legacy Bioentities
/// token and still resolves against the entity registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespacePolicy {
    pub local: BTreeSet<String>,
    /// External namespaces allowed as relation endpoints.
    pub relation: BTreeSet<String>,
    /// External namespaces allowed as grounding and equivalence targets.
    pub grounding: BTreeSet<String>,
}

const DEFAULT_LOCAL: &[&str] = &["FPLX", "BE"];
const DEFAULT_RELATION: &[&str] = &["HGNC", "UP"];
const DEFAULT_GROUNDING: &[&str] = &[
    "BEL", "CHEBI", "CHEMBL", "DRUGBANK", "ECCODE", "EGID", "GO", "HGNC", "HMDB", "HMS-LINCS",
    "IP", "LINCS", "MEDSCAN", "MESH", "NCIT", "NXP", "NXPFA", "PF", "PR", "PUBCHEM", "RE",
    "REACTOME", "SIGNOR", "UN", "UP", "UPPRO",
];

fn token_set(tokens: &[&str]) -> BTreeSet<String> {
    tokens.iter().map(|token| (*token).to_string()).collect()
}

impl Default for NamespacePolicy {
    fn default() -> Self {
        Self {
            local: token_set(DEFAULT_LOCAL),
            relation: token_set(DEFAULT_RELATION),
            grounding: token_set(DEFAULT_GROUNDING),
        }
    }
}

impl NamespacePolicy {
    pub fn is_local(&self, namespace: &str) -> bool {
        self.local.contains(namespace)
    }

    pub fn is_relation_namespace(&self, namespace: &str) -> bool {
        self.is_local(namespace) || self.relation.contains(namespace)
    }

    pub fn is_grounding_namespace(&self, namespace: &str) -> bool {
        self.is_local(namespace) || self.grounding.contains(namespace)
    }
}

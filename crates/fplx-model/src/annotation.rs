//! Supplementary tables that annotate local entities.

use serde::{Deserialize, Serialize};

use crate::relation::Term;

/// A row of the equivalences table: an external term mapped onto a local id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquivalenceEntry {
    pub external: Term,
    pub local_id: String,
    pub line: usize,
}

/// A row of the descriptions table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionEntry {
    pub local_id: String,
    pub source: String,
    pub description: String,
    pub line: usize,
}

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::relation::Term;

/// Result of grounding a text string.
///
/// An empty target list is never used to mean "ungrounded"; rows with no
/// targets load as [`GroundingOutcome::ExplicitlyUngrounded`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "targets", rename_all = "snake_case")]
pub enum GroundingOutcome {
    Grounded(Vec<Term>),
    ExplicitlyUngrounded,
}

impl GroundingOutcome {
    pub fn from_targets(targets: Vec<Term>) -> Self {
        if targets.is_empty() {
            Self::ExplicitlyUngrounded
        } else {
            Self::Grounded(targets)
        }
    }

    pub fn targets(&self) -> &[Term] {
        match self {
            Self::Grounded(targets) => targets,
            Self::ExplicitlyUngrounded => &[],
        }
    }

    pub fn is_grounded(&self) -> bool {
        matches!(self, Self::Grounded(_))
    }

    /// Order-insensitive view of the targets used when comparing duplicate rows.
    pub fn target_set(&self) -> BTreeSet<&Term> {
        self.targets().iter().collect()
    }
}

/// A row of the grounding map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingEntry {
    pub text: String,
    pub outcome: GroundingOutcome,
    pub line: usize,
}

impl GroundingEntry {
    /// First target in the given namespace, if any.
    pub fn target_in(&self, namespace: &str) -> Option<&Term> {
        self.outcome
            .targets()
            .iter()
            .find(|term| term.namespace == namespace)
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A `(namespace, id)` pair referencing either a local entity or an external
/// database record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Term {
    pub namespace: String,
    pub id: String,
}

impl Term {
    pub fn new(namespace: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            id: id.into(),
        }
    }

    /// Parses `NAMESPACE:ID`. Only the first colon separates the parts, so
    /// ids such as `GO:0005737` survive intact.
    pub fn parse_qualified(raw: &str) -> Option<Self> {
        let (namespace, id) = raw.split_once(':')?;
        if namespace.is_empty() || id.is_empty() {
            return None;
        }
        Some(Self::new(namespace, id))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.id)
    }
}

/// Membership relation between two terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    /// Member of a family.
    Isa,
    /// Constituent of a complex.
    Partof,
}

impl Relation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Isa => "isa",
            Self::Partof => "partof",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Relation {
    type Err = ModelError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "isa" => Ok(Self::Isa),
            "partof" => Ok(Self::Partof),
            _ => Err(ModelError::UnknownRelation(raw.to_string())),
        }
    }
}

/// A directed edge `subject --relation--> object` (member to container).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationTriple {
    pub subject: Term,
    pub relation: Relation,
    pub object: Term,
    pub line: usize,
}

impl RelationTriple {
    /// Identity of the triple, ignoring where it was read from.
    pub fn key(&self) -> (&Term, Relation, &Term) {
        (&self.subject, self.relation, &self.object)
    }
}

impl fmt::Display for RelationTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.subject, self.relation, self.object)
    }
}

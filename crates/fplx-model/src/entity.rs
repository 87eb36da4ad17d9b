use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Kind of a locally defined entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Family,
    Complex,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Family => "family",
            Self::Complex => "complex",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = ModelError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "family" => Ok(Self::Family),
            "complex" => Ok(Self::Complex),
            _ => Err(ModelError::UnknownEntityKind(raw.to_string())),
        }
    }
}

/// A row of the entity registry table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    /// Absent when the table only carries the id column.
    pub kind: Option<EntityKind>,
    pub notes: Option<String>,
    /// 1-based source line.
    pub line: usize,
}

impl Entity {
    pub fn new(id: impl Into<String>, line: usize) -> Self {
        Self {
            id: id.into(),
            kind: None,
            notes: None,
            line,
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

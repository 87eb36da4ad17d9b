use std::fmt;

use serde::{Deserialize, Serialize};

/// The resource tables, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Entities,
    Relations,
    GroundingMap,
    GenePrefixes,
    Equivalences,
    Descriptions,
}

impl TableKind {
    pub const ALL: [TableKind; 6] = [
        Self::Entities,
        Self::Relations,
        Self::GroundingMap,
        Self::GenePrefixes,
        Self::Equivalences,
        Self::Descriptions,
    ];

    /// Logical table name, independent of the file it was read from.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Entities => "entities",
            Self::Relations => "relations",
            Self::GroundingMap => "grounding_map",
            Self::GenePrefixes => "gene_prefixes",
            Self::Equivalences => "equivalences",
            Self::Descriptions => "descriptions",
        }
    }

    /// Conventional file name inside the resources directory.
    pub fn default_file_name(self) -> &'static str {
        match self {
            Self::Entities => "entities.csv",
            Self::Relations => "relations.csv",
            Self::GroundingMap => "grounding_map.csv",
            Self::GenePrefixes => "gene_prefixes.csv",
            Self::Equivalences => "equivalences.csv",
            Self::Descriptions => "descriptions.csv",
        }
    }

    /// Optional tables are skipped when their file is absent.
    pub fn is_optional(self) -> bool {
        matches!(self, Self::Equivalences | Self::Descriptions)
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FindingKind {
    MalformedRow,
    UnreadableTable,
    DuplicateId,
    UnresolvedReference,
    DuplicateRelation,
    Cycle,
    ConflictingDuplicateGrounding,
    UnresolvedGroundingReference,
    MalformedNamespace,
    UnknownCategory,
    MalformedPattern,
    DuplicatePattern,
    IncompleteChemicalGrounding,
    UnprefixedIdentifier,
    DuplicateEquivalence,
    DuplicateDescription,
    EntityWithoutRelations,
    ExplicitlyUngroundedCount,
}

impl FindingKind {
    pub fn severity(self) -> Severity {
        match self {
            Self::MalformedRow
            | Self::UnreadableTable
            | Self::DuplicateId
            | Self::UnresolvedReference
            | Self::DuplicateRelation
            | Self::Cycle
            | Self::ConflictingDuplicateGrounding
            | Self::UnresolvedGroundingReference
            | Self::MalformedNamespace
            | Self::UnknownCategory
            | Self::MalformedPattern => Severity::Error,
            Self::DuplicatePattern
            | Self::IncompleteChemicalGrounding
            | Self::UnprefixedIdentifier
            | Self::DuplicateEquivalence
            | Self::DuplicateDescription
            | Self::EntityWithoutRelations => Severity::Warning,
            Self::ExplicitlyUngroundedCount => Severity::Info,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::MalformedRow => "malformed-row",
            Self::UnreadableTable => "unreadable-table",
            Self::DuplicateId => "duplicate-id",
            Self::UnresolvedReference => "unresolved-reference",
            Self::DuplicateRelation => "duplicate-relation",
            Self::Cycle => "cycle",
            Self::ConflictingDuplicateGrounding => "conflicting-duplicate-grounding",
            Self::UnresolvedGroundingReference => "unresolved-grounding-reference",
            Self::MalformedNamespace => "malformed-namespace",
            Self::UnknownCategory => "unknown-category",
            Self::MalformedPattern => "malformed-pattern",
            Self::DuplicatePattern => "duplicate-pattern",
            Self::IncompleteChemicalGrounding => "incomplete-chemical-grounding",
            Self::UnprefixedIdentifier => "unprefixed-identifier",
            Self::DuplicateEquivalence => "duplicate-equivalence",
            Self::DuplicateDescription => "duplicate-description",
            Self::EntityWithoutRelations => "entity-without-relations",
            Self::ExplicitlyUngroundedCount => "explicitly-ungrounded-count",
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single diagnostic produced by a loader or validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub table: TableKind,
    /// 1-based line of the offending row; `None` for table-level findings.
    pub line: Option<usize>,
    /// Line of an earlier row the finding refers back to (first occurrence).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_line: Option<usize>,
    pub kind: FindingKind,
    pub severity: Severity,
    pub message: String,
    /// Full cycle path for cycle findings, first id repeated at the end.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cycle: Vec<String>,
}

impl Finding {
    pub fn new(table: TableKind, kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            table,
            line: None,
            related_line: None,
            kind,
            severity: kind.severity(),
            message: message.into(),
            cycle: Vec::new(),
        }
    }

    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    #[must_use]
    pub fn related_to(mut self, line: usize) -> Self {
        self.related_line = Some(line);
        self
    }

    #[must_use]
    pub fn with_cycle(mut self, path: Vec<String>) -> Self {
        self.cycle = path;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

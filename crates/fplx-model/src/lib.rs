pub mod annotation;
pub mod entity;
pub mod error;
pub mod finding;
pub mod grounding;
pub mod namespace;
pub mod prefix;
pub mod relation;

pub use annotation::{DescriptionEntry, EquivalenceEntry};
pub use entity::{Entity, EntityKind};
pub use error::{ModelError, Result};
pub use finding::{Finding, FindingKind, Severity, TableKind};
pub use grounding::{GroundingEntry, GroundingOutcome};
pub use namespace::NamespacePolicy;
pub use prefix::{DEFAULT_GENE_PLACEHOLDER, PrefixCategory, PrefixPatternEntry};
pub use relation::{Relation, RelationTriple, Term};


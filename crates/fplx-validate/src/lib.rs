//! Cross-reference integrity checks over loaded FamPlex tables.
//!
//! Every check returns the findings it collected; none of them stop at the
//! first problem.

mod annotations;
mod graph;
mod grounding;
mod prefixes;
mod registry;

pub use annotations::{
    find_entities_without_relations, validate_descriptions, validate_equivalences,
};
pub use graph::RelationGraph;
pub use grounding::validate_groundings;
pub use prefixes::validate_prefixes;
pub use registry::EntityRegistry;

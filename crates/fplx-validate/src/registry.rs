//! Canonical set of locally defined identifiers.

use std::collections::BTreeMap;

use fplx_model::{Entity, EntityKind, Finding, FindingKind, TableKind};

#[derive(Debug, Clone, Default)]
pub struct EntityRegistry {
    entities: BTreeMap<String, Entity>,
}

impl EntityRegistry {
    /// Build the registry, reporting every repeated id. The first
    /// occurrence of an id is the one kept.
    pub fn build(records: Vec<Entity>) -> (Self, Vec<Finding>) {
        let mut entities: BTreeMap<String, Entity> = BTreeMap::new();
        let mut findings = Vec::new();
        for entity in records {
            if let Some(first) = entities.get(&entity.id) {
                findings.push(
                    Finding::new(
                        TableKind::Entities,
                        FindingKind::DuplicateId,
                        format!(
                            "duplicate entity id {} (first defined on line {})",
                            entity.id, first.line
                        ),
                    )
                    .at_line(entity.line)
                    .related_to(first.line),
                );
                continue;
            }
            entities.insert(entity.id.clone(), entity);
        }
        (Self { entities }, findings)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entities.contains_key(id)
    }

    pub fn kind_of(&self, id: &str) -> Option<EntityKind> {
        self.entities.get(id).and_then(|entity| entity.kind)
    }

    pub fn get(&self, id: &str) -> Option<&Entity> {
        self.entities.get(id)
    }

    /// Line of the kept definition of `id`.
    pub fn line_of(&self, id: &str) -> Option<usize> {
        self.entities.get(id).map(|entity| entity.line)
    }

    /// Entities in id order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! EntityGraph - the mutable entity store

use crate::owner::OwnerContext;
use ifc_lite_model::{
    AttributeValue, Entity, EntityId, EntityResolver, GraphError, IfcType, Result, SchemaVersion,
};
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;

/// In-memory entity graph
///
/// Holds every entity of one model together with a type index and an
/// explicit inverse index (referenced id -> referencing ids). The store never
/// cascades: removing an entity that is still referenced fails, detaching is
/// the usecases' job.
pub struct EntityGraph {
    /// Schema release of the model
    schema: SchemaVersion,
    /// Entity ID -> entity
    entities: FxHashMap<EntityId, Entity>,
    /// Type -> entity IDs, creation order
    type_index: FxHashMap<IfcType, BTreeSet<EntityId>>,
    /// Referenced ID -> (referencing ID -> number of references)
    inverse: FxHashMap<EntityId, FxHashMap<EntityId, u32>>,
    /// Next id to hand out
    next_id: u32,
    /// User and application recorded in new owner histories
    owner_context: Option<OwnerContext>,
}

impl EntityGraph {
    /// Create an empty graph for a schema release
    pub fn new(schema: SchemaVersion) -> Self {
        Self {
            schema,
            entities: FxHashMap::default(),
            type_index: FxHashMap::default(),
            inverse: FxHashMap::default(),
            next_id: 1,
            owner_context: None,
        }
    }

    /// Schema release of the graph
    pub fn schema(&self) -> SchemaVersion {
        self.schema
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the graph holds no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Check if an entity exists
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Create an entity without attributes
    pub fn create(&mut self, ifc_type: IfcType) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.type_index.entry(ifc_type.clone()).or_default().insert(id);
        self.entities.insert(id, Entity::new(id, ifc_type));
        log::trace!("created {}", id);
        id
    }

    /// Create an entity with initial attributes.
    ///
    /// Every referenced entity must exist; nothing is created otherwise.
    pub fn create_with<'a>(
        &mut self,
        ifc_type: IfcType,
        attributes: impl IntoIterator<Item = (&'a str, AttributeValue)>,
    ) -> Result<EntityId> {
        let attributes: Vec<_> = attributes.into_iter().collect();
        for (_, value) in &attributes {
            self.check_refs(value)?;
        }

        let id = self.create(ifc_type);
        for (name, value) in attributes {
            self.apply_attribute(id, name, value);
        }
        Ok(id)
    }

    /// Set a named attribute, keeping the inverse index in step.
    ///
    /// Fails without mutating anything if the entity or any entity referenced
    /// by `value` does not exist.
    pub fn set_attribute(
        &mut self,
        id: EntityId,
        name: &str,
        value: impl Into<AttributeValue>,
    ) -> Result<()> {
        let value = value.into();
        if !self.contains(id) {
            return Err(GraphError::EntityNotFound(id));
        }
        self.check_refs(&value)?;
        self.apply_attribute(id, name, value);
        Ok(())
    }

    /// Remove an entity that nothing references any more.
    ///
    /// Returns `DanglingReferenceOnRemove` if other entities still reference
    /// `id`. References held by `id` itself are unlinked.
    pub fn remove(&mut self, id: EntityId) -> Result<()> {
        let entity = self.entities.get(&id).ok_or(GraphError::EntityNotFound(id))?;

        let referenced_by: Vec<EntityId> = self
            .inverse_references(id)
            .into_iter()
            .filter(|referrer| *referrer != id)
            .collect();
        if !referenced_by.is_empty() {
            return Err(GraphError::DanglingReferenceOnRemove {
                entity: id,
                referenced_by,
            });
        }

        let targets = entity.references();
        let ifc_type = entity.ifc_type.clone();
        for target in targets {
            self.unlink(target, id);
        }
        if let Some(ids) = self.type_index.get_mut(&ifc_type) {
            ids.remove(&id);
            if ids.is_empty() {
                self.type_index.remove(&ifc_type);
            }
        }
        self.inverse.remove(&id);
        self.entities.remove(&id);
        log::trace!("removed {}", id);
        Ok(())
    }

    /// Remove an entity and, transitively, every auxiliary record it
    /// exclusively owned.
    ///
    /// Only non-rooted entities (owner histories, people, applications, ...)
    /// are followed, and only once nothing else references them. Records
    /// named by the owner context are kept. Returns the removed ids in
    /// removal order.
    pub fn remove_deep(&mut self, id: EntityId) -> Result<Vec<EntityId>> {
        if !self.contains(id) {
            return Err(GraphError::EntityNotFound(id));
        }
        let mut removed = Vec::new();
        let mut pending = vec![id];

        while let Some(current) = pending.pop() {
            if !self.contains(current) {
                continue;
            }
            let mut targets = self.entities[&current].references();
            targets.sort();
            targets.dedup();

            // The starting entity reports dangling references; cascaded
            // records are only reached once they are unreferenced.
            self.remove(current)?;
            removed.push(current);

            for target in targets.into_iter().rev() {
                let eligible = self
                    .entities
                    .get(&target)
                    .is_some_and(|e| !e.ifc_type.is_rooted())
                    && self.is_unreferenced(target)
                    && !self.is_context_record(target);
                if eligible {
                    pending.push(target);
                }
            }
        }

        if removed.len() > 1 {
            log::debug!("deep-removed {} with {} owned records", id, removed.len() - 1);
        }
        Ok(removed)
    }

    /// Whether no entity references `id`
    pub fn is_unreferenced(&self, id: EntityId) -> bool {
        self.inverse
            .get(&id)
            .map_or(true, |referrers| referrers.is_empty())
    }

    /// Whether `id` is the user or application of the owner context
    fn is_context_record(&self, id: EntityId) -> bool {
        self.owner_context
            .is_some_and(|ctx| ctx.user == id || ctx.application == id)
    }

    /// Ids of entities whose class is exactly `ifc_type`, in creation order
    pub fn by_type(&self, ifc_type: &IfcType) -> Vec<EntityId> {
        self.type_index
            .get(ifc_type)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Current owner-history context
    pub fn owner_context(&self) -> Option<OwnerContext> {
        self.owner_context
    }

    /// Replace the owner-history context.
    ///
    /// The user must be an `IfcPersonAndOrganization` and the application an
    /// `IfcApplication`.
    pub fn set_owner_context(&mut self, context: Option<OwnerContext>) -> Result<()> {
        if let Some(ctx) = &context {
            self.expect_class(ctx.user, &IfcType::IfcPersonAndOrganization)?;
            self.expect_class(ctx.application, &IfcType::IfcApplication)?;
        }
        self.owner_context = context;
        Ok(())
    }

    fn expect_class(&self, id: EntityId, ifc_type: &IfcType) -> Result<()> {
        let entity = self.entities.get(&id).ok_or(GraphError::EntityNotFound(id))?;
        if entity.is_a(ifc_type) {
            Ok(())
        } else {
            Err(GraphError::type_mismatch(id, ifc_type.name(), &entity.ifc_type))
        }
    }

    fn check_refs(&self, value: &AttributeValue) -> Result<()> {
        let mut refs = Vec::new();
        value.collect_refs(&mut refs);
        match refs.into_iter().find(|r| !self.contains(*r)) {
            Some(missing) => Err(GraphError::EntityNotFound(missing)),
            None => Ok(()),
        }
    }

    /// Write an attribute whose references were already validated
    fn apply_attribute(&mut self, id: EntityId, name: &str, value: AttributeValue) {
        let mut new_refs = Vec::new();
        value.collect_refs(&mut new_refs);

        let Some(entity) = self.entities.get_mut(&id) else {
            return;
        };
        let previous = entity.set(name, value);

        let mut old_refs = Vec::new();
        if let Some(previous) = previous {
            previous.collect_refs(&mut old_refs);
        }
        for target in old_refs {
            self.unlink(target, id);
        }
        for target in new_refs {
            *self
                .inverse
                .entry(target)
                .or_default()
                .entry(id)
                .or_insert(0) += 1;
        }
    }

    fn unlink(&mut self, target: EntityId, referrer: EntityId) {
        if let Some(referrers) = self.inverse.get_mut(&target) {
            if let Some(count) = referrers.get_mut(&referrer) {
                *count -= 1;
                if *count == 0 {
                    referrers.remove(&referrer);
                }
            }
            if referrers.is_empty() {
                self.inverse.remove(&target);
            }
        }
    }
}

impl Default for EntityGraph {
    fn default() -> Self {
        Self::new(SchemaVersion::default())
    }
}

impl EntityResolver for EntityGraph {
    fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    fn entities_by_type(&self, ifc_type: &IfcType) -> Vec<EntityId> {
        self.by_type(ifc_type)
    }

    fn entities_of_class(&self, ifc_type: &IfcType) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self
            .type_index
            .iter()
            .filter(|(t, _)| t.is_a(ifc_type))
            .flat_map(|(_, ids)| ids.iter().copied())
            .collect();
        ids.sort();
        ids
    }

    fn inverse_references(&self, id: EntityId) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self
            .inverse
            .get(&id)
            .map(|referrers| referrers.keys().copied().collect())
            .unwrap_or_default();
        ids.sort();
        ids
    }

    fn all_ids(&self) -> Vec<EntityId> {
        let mut ids: Vec<EntityId> = self.entities.keys().copied().collect();
        ids.sort();
        ids
    }

    fn entity_count(&self) -> usize {
        self.entities.len()
    }

    fn schema(&self) -> SchemaVersion {
        self.schema
    }
}

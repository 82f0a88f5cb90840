// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity resolution trait for looking up entities and their inverse references

use crate::{Entity, EntityId, GraphError, IfcType, SchemaVersion};

/// Read-only entity lookup
///
/// This trait provides the functionality the query helpers need: O(1)
/// lookup by id, type extents, and the explicit inverse index listing every
/// entity that references a given one.
///
/// # Example
///
/// ```ignore
/// use ifc_lite_model::{EntityResolver, EntityId, IfcType};
///
/// fn containing_rels(resolver: &dyn EntityResolver, wall: EntityId) -> Vec<EntityId> {
///     resolver
///         .inverse_references(wall)
///         .into_iter()
///         .filter(|id| resolver.is_a(*id, &IfcType::IfcRelContainedInSpatialStructure))
///         .collect()
/// }
/// ```
pub trait EntityResolver: Send + Sync {
    /// Get entity by ID
    fn get(&self, id: EntityId) -> Option<&Entity>;

    /// Ids of all entities whose class is exactly `ifc_type`, in creation order
    fn entities_by_type(&self, ifc_type: &IfcType) -> Vec<EntityId>;

    /// Ids of all entities whose class is `ifc_type` or one of its subtypes
    fn entities_of_class(&self, ifc_type: &IfcType) -> Vec<EntityId>;

    /// Find entities by type name string (case-insensitive, exact class)
    fn find_by_type_name(&self, type_name: &str) -> Vec<EntityId> {
        self.entities_by_type(&IfcType::parse(type_name))
    }

    /// Count entities of a specific type
    fn count_by_type(&self, ifc_type: &IfcType) -> usize {
        self.entities_by_type(ifc_type).len()
    }

    /// Ids of every entity referencing `id` through any attribute, sorted
    fn inverse_references(&self, id: EntityId) -> Vec<EntityId>;

    /// Get all entity IDs in the model
    fn all_ids(&self) -> Vec<EntityId>;

    /// Get total entity count
    fn entity_count(&self) -> usize {
        self.all_ids().len()
    }

    /// Schema release of the model
    fn schema(&self) -> SchemaVersion;
}

/// Extension methods for EntityResolver
pub trait EntityResolverExt: EntityResolver {
    /// Check if an entity exists
    fn exists(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Schema subtype test by id; false for missing entities
    fn is_a(&self, id: EntityId, ifc_type: &IfcType) -> bool {
        self.get(id).is_some_and(|e| e.is_a(ifc_type))
    }

    /// Get entity or return error
    fn get_or_err(&self, id: EntityId) -> crate::Result<&Entity> {
        self.get(id).ok_or(GraphError::EntityNotFound(id))
    }

    /// Get entity, requiring it to conform to `ifc_type`
    fn get_as(&self, id: EntityId, ifc_type: &IfcType) -> crate::Result<&Entity> {
        let entity = self.get_or_err(id)?;
        if entity.is_a(ifc_type) {
            Ok(entity)
        } else {
            Err(GraphError::type_mismatch(id, ifc_type.name(), &entity.ifc_type))
        }
    }

    /// Inverse references filtered to one relationship class
    fn inverse_of_type(&self, id: EntityId, rel_type: &IfcType) -> Vec<EntityId> {
        self.inverse_references(id)
            .into_iter()
            .filter(|rel| self.is_a(*rel, rel_type))
            .collect()
    }
}

// Blanket implementation for all EntityResolver types
impl<T: EntityResolver + ?Sized> EntityResolverExt for T {}

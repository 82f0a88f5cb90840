// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Query helpers
//!
//! Read-only traversals over the inverse index. Missing entities and missing
//! relationships give `None` or an empty list; nothing here returns an error.

use crate::usecases::relation;
use ifc_lite_model::{EntityId, EntityResolver, EntityResolverExt, IfcType, RelationshipKind};

/// Relating side of the first relationship of `kind` listing `member`
fn relating(resolver: &dyn EntityResolver, kind: RelationshipKind, member: EntityId) -> Option<EntityId> {
    let rule = kind.rule();
    relation::relationships_of(resolver, &rule, member)
        .first()
        .and_then(|rel| relation::relating_of(resolver, &rule, *rel))
}

/// Relating sides of every relationship of `kind` listing `member`
fn all_relating(resolver: &dyn EntityResolver, kind: RelationshipKind, member: EntityId) -> Vec<EntityId> {
    let rule = kind.rule();
    let mut out = Vec::new();
    for rel in relation::relationships_of(resolver, &rule, member) {
        if let Some(owner) = relation::relating_of(resolver, &rule, rel) {
            if !out.contains(&owner) {
                out.push(owner);
            }
        }
    }
    out
}

/// Members of every relationship of `kind` owned by `relating`, in order
fn related(resolver: &dyn EntityResolver, kind: RelationshipKind, relating: EntityId) -> Vec<EntityId> {
    let rule = kind.rule();
    let mut out = Vec::new();
    for rel in relation::relationships_for(resolver, &rule, relating) {
        for member in relation::members(resolver, &rule, rel) {
            if !out.contains(&member) {
                out.push(member);
            }
        }
    }
    out
}

/// Spatial structure containing the element
pub fn get_container(resolver: &dyn EntityResolver, element: EntityId) -> Option<EntityId> {
    relating(resolver, RelationshipKind::Containment, element)
}

/// Whole that the element is a part of
pub fn get_aggregate(resolver: &dyn EntityResolver, element: EntityId) -> Option<EntityId> {
    relating(resolver, RelationshipKind::Aggregation, element)
}

/// Object the element is nested under
pub fn get_nest(resolver: &dyn EntityResolver, element: EntityId) -> Option<EntityId> {
    relating(resolver, RelationshipKind::Nesting, element)
}

/// Type object of an occurrence
pub fn get_type(resolver: &dyn EntityResolver, element: EntityId) -> Option<EntityId> {
    relating(resolver, RelationshipKind::Typing, element)
}

/// Ordered members of a system, empty when it has none
pub fn get_system_elements(resolver: &dyn EntityResolver, system: EntityId) -> Vec<EntityId> {
    related(resolver, RelationshipKind::Grouping, system)
}

/// Parts of an aggregate
pub fn get_parts(resolver: &dyn EntityResolver, whole: EntityId) -> Vec<EntityId> {
    related(resolver, RelationshipKind::Aggregation, whole)
}

/// Children nested under `parent`, in nesting order
pub fn get_nested_children(resolver: &dyn EntityResolver, parent: EntityId) -> Vec<EntityId> {
    related(resolver, RelationshipKind::Nesting, parent)
}

/// Occurrences typed by a type object
pub fn get_typed_elements(resolver: &dyn EntityResolver, element_type: EntityId) -> Vec<EntityId> {
    related(resolver, RelationshipKind::Typing, element_type)
}

/// Single material associated with the element
pub fn get_material(resolver: &dyn EntityResolver, element: EntityId) -> Option<EntityId> {
    relating(resolver, RelationshipKind::MaterialAssociation, element)
}

/// Groups (systems included) the element belongs to
pub fn get_groups(resolver: &dyn EntityResolver, element: EntityId) -> Vec<EntityId> {
    all_relating(resolver, RelationshipKind::Grouping, element)
}

/// Systems the element belongs to
pub fn get_element_systems(resolver: &dyn EntityResolver, element: EntityId) -> Vec<EntityId> {
    get_groups(resolver, element)
        .into_iter()
        .filter(|group| resolver.is_a(*group, &IfcType::IfcSystem))
        .collect()
}

/// Presentation layers listing the item
pub fn get_layers(resolver: &dyn EntityResolver, item: EntityId) -> Vec<EntityId> {
    all_relating(resolver, RelationshipKind::LayerAssignment, item)
}

/// Spatial structures referencing (not containing) the element
pub fn get_referenced_structures(resolver: &dyn EntityResolver, element: EntityId) -> Vec<EntityId> {
    all_relating(resolver, RelationshipKind::SpatialReference, element)
}

/// Library references associated with the object
pub fn get_library_references(resolver: &dyn EntityResolver, object: EntityId) -> Vec<EntityId> {
    all_relating(resolver, RelationshipKind::LibraryReference, object)
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! External libraries and library references
//!
//! Removing a reference cuts the association edges only; the associated
//! products stay valid.

use super::relation;
use crate::registry::operation;
use crate::Registry;
use ifc_lite_model::{
    AttributeValue, EntityId, EntityResolverExt, IfcType, RelationshipKind, Result,
};
use ifc_lite_store::EntityGraph;
use std::sync::Arc;

/// Create an `IfcLibraryInformation`
pub fn add_library(graph: &mut EntityGraph, name: Option<&str>) -> Result<EntityId> {
    graph.create_with(
        IfcType::IfcLibraryInformation,
        [("Name", AttributeValue::from(name.unwrap_or("Unnamed")))],
    )
}

/// Create an `IfcLibraryReference` pointing at `library`
pub fn add_reference(graph: &mut EntityGraph, library: EntityId) -> Result<EntityId> {
    graph.get_as(library, &IfcType::IfcLibraryInformation)?;
    graph.create_with(
        IfcType::IfcLibraryReference,
        [("ReferencedLibrary", AttributeValue::from(library))],
    )
}

/// Associate products with a library reference
pub fn assign_reference(
    graph: &mut EntityGraph,
    products: &[EntityId],
    reference: EntityId,
) -> Result<EntityId> {
    let rule = relation::rule(graph, RelationshipKind::LibraryReference);
    relation::validate_relating(graph, &rule, reference)?;
    relation::validate_members(graph, &rule, products)?;
    relation::assign_shared(graph, &rule, products, reference)
}

/// Drop the association between products and a library reference
pub fn unassign_reference(
    graph: &mut EntityGraph,
    products: &[EntityId],
    reference: EntityId,
) -> Result<()> {
    let rule = relation::rule(graph, RelationshipKind::LibraryReference);
    relation::validate_relating(graph, &rule, reference)?;
    relation::require_all(graph, products)?;
    relation::unassign(graph, &rule, products, Some(reference))
}

/// Remove a library reference and every association to it.
///
/// Association histories are removed once nothing else uses them.
pub fn remove_reference(graph: &mut EntityGraph, reference: EntityId) -> Result<()> {
    let rule = relation::rule(graph, RelationshipKind::LibraryReference);
    relation::validate_relating(graph, &rule, reference)?;
    relation::remove_object(graph, reference)
}

operation!(
    AddLibrary,
    "library.add_library",
    |graph, args| add_library(graph, args.text("name")?).map(Some)
);

operation!(
    AddReference,
    "library.add_reference",
    |graph, args| add_reference(graph, args.entity("library")?).map(Some)
);

operation!(
    AssignReference,
    "library.assign_reference",
    |graph, args| {
        assign_reference(graph, &args.entities("products")?, args.entity("reference")?).map(Some)
    }
);

operation!(
    UnassignReference,
    "library.unassign_reference",
    |graph, args| {
        unassign_reference(graph, &args.entities("products")?, args.entity("reference")?)?;
        Ok(None)
    }
);

operation!(
    RemoveReference,
    "library.remove_reference",
    |graph, args| {
        remove_reference(graph, args.entity("reference")?)?;
        Ok(None)
    }
);

pub(crate) fn register(registry: &mut Registry) {
    registry.register(Arc::new(AddLibrary));
    registry.register(Arc::new(AddReference));
    registry.register(Arc::new(AssignReference));
    registry.register(Arc::new(UnassignReference));
    registry.register(Arc::new(RemoveReference));
}

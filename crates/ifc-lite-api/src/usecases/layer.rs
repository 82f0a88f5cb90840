// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Presentation layers
//!
//! A layer lists its items directly in `AssignedItems`; there is no separate
//! relationship entity. A layer left without items is kept.

use super::relation;
use crate::registry::operation;
use crate::Registry;
use ifc_lite_model::{AttributeValue, EntityId, IfcType, RelationshipKind, Result};
use ifc_lite_store::EntityGraph;
use std::sync::Arc;

/// Create an empty presentation layer
pub fn add_layer(graph: &mut EntityGraph, name: Option<&str>) -> Result<EntityId> {
    graph.create_with(
        IfcType::IfcPresentationLayerAssignment,
        [
            ("Name", AttributeValue::from(name.unwrap_or("Unnamed"))),
            ("AssignedItems", AttributeValue::List(Vec::new())),
        ],
    )
}

/// Merge items into the layer, without duplicates
pub fn assign_layer(graph: &mut EntityGraph, items: &[EntityId], layer: EntityId) -> Result<EntityId> {
    let rule = relation::rule(graph, RelationshipKind::LayerAssignment);
    relation::validate_relating(graph, &rule, layer)?;
    relation::validate_members(graph, &rule, items)?;
    relation::assign_shared(graph, &rule, items, layer)
}

/// Remove items from the layer; the rest keep their order
pub fn unassign_layer(graph: &mut EntityGraph, items: &[EntityId], layer: EntityId) -> Result<()> {
    let rule = relation::rule(graph, RelationshipKind::LayerAssignment);
    relation::validate_relating(graph, &rule, layer)?;
    relation::require_all(graph, items)?;
    relation::unassign(graph, &rule, items, Some(layer))
}

/// Remove a layer. Its items are kept.
pub fn remove_layer(graph: &mut EntityGraph, layer: EntityId) -> Result<()> {
    let rule = relation::rule(graph, RelationshipKind::LayerAssignment);
    relation::validate_relating(graph, &rule, layer)?;
    relation::remove_object(graph, layer)
}

operation!(
    AddLayer,
    "layer.add_layer",
    |graph, args| add_layer(graph, args.text("name")?).map(Some)
);

operation!(
    AssignLayer,
    "layer.assign_layer",
    |graph, args| assign_layer(graph, &args.entities("items")?, args.entity("layer")?).map(Some)
);

operation!(
    UnassignLayer,
    "layer.unassign_layer",
    |graph, args| {
        unassign_layer(graph, &args.entities("items")?, args.entity("layer")?)?;
        Ok(None)
    }
);

operation!(
    RemoveLayer,
    "layer.remove_layer",
    |graph, args| {
        remove_layer(graph, args.entity("layer")?)?;
        Ok(None)
    }
);

pub(crate) fn register(registry: &mut Registry) {
    registry.register(Arc::new(AddLayer));
    registry.register(Arc::new(AssignLayer));
    registry.register(Arc::new(UnassignLayer));
    registry.register(Arc::new(RemoveLayer));
}

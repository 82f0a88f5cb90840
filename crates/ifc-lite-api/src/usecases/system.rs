// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Distribution and building systems
//!
//! Systems are groups, so membership is recorded with the same
//! `IfcRelAssignsToGroup` relationship as plain groups.

use super::relation;
use crate::registry::operation;
use crate::Registry;
use ifc_lite_model::{EntityId, EntityResolverExt, GraphError, IfcType, RelationshipKind, Result};
use ifc_lite_store::EntityGraph;
use std::sync::Arc;

/// Create a system of class `ifc_class` (default `IfcSystem`)
pub fn add_system(
    graph: &mut EntityGraph,
    ifc_class: Option<&str>,
    name: Option<&str>,
) -> Result<EntityId> {
    let ifc_type = ifc_class.map(IfcType::parse).unwrap_or(IfcType::IfcSystem);
    if !ifc_type.is_a(&IfcType::IfcSystem) {
        return Err(GraphError::invalid_argument(
            "ifc_class",
            format!("{ifc_type} is not a system class"),
        ));
    }
    relation::create_rooted(graph, ifc_type, name.or(Some("Unnamed")))
}

fn check_system(graph: &EntityGraph, system: EntityId) -> Result<()> {
    graph.get_as(system, &IfcType::IfcSystem).map(|_| ())
}

/// Add products to a system
pub fn assign_system(
    graph: &mut EntityGraph,
    products: &[EntityId],
    system: EntityId,
) -> Result<EntityId> {
    check_system(graph, system)?;
    let rule = relation::rule(graph, RelationshipKind::Grouping);
    relation::validate_members(graph, &rule, products)?;
    relation::assign_shared(graph, &rule, products, system)
}

/// Remove products from a system
pub fn unassign_system(
    graph: &mut EntityGraph,
    products: &[EntityId],
    system: EntityId,
) -> Result<()> {
    check_system(graph, system)?;
    relation::require_all(graph, products)?;
    let rule = relation::rule(graph, RelationshipKind::Grouping);
    relation::unassign(graph, &rule, products, Some(system))
}

/// Remove a system and its assignments. Members are kept.
pub fn remove_system(graph: &mut EntityGraph, system: EntityId) -> Result<()> {
    check_system(graph, system)?;
    relation::remove_object(graph, system)
}

operation!(
    AddSystem,
    "system.add_system",
    |graph, args| add_system(graph, args.text("ifc_class")?, args.text("name")?).map(Some)
);

operation!(
    AssignSystem,
    "system.assign_system",
    |graph, args| {
        assign_system(graph, &args.entities("products")?, args.entity("system")?).map(Some)
    }
);

operation!(
    UnassignSystem,
    "system.unassign_system",
    |graph, args| {
        unassign_system(graph, &args.entities("products")?, args.entity("system")?)?;
        Ok(None)
    }
);

operation!(
    RemoveSystem,
    "system.remove_system",
    |graph, args| {
        remove_system(graph, args.entity("system")?)?;
        Ok(None)
    }
);

pub(crate) fn register(registry: &mut Registry) {
    registry.register(Arc::new(AddSystem));
    registry.register(Arc::new(AssignSystem));
    registry.register(Arc::new(UnassignSystem));
    registry.register(Arc::new(RemoveSystem));
}

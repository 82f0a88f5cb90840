// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Creating and removing objects

use super::relation;
use crate::registry::operation;
use crate::Registry;
use ifc_lite_model::{EntityId, EntityResolverExt, GraphError, IfcType, RelationshipKind, Result};
use ifc_lite_store::EntityGraph;
use std::sync::Arc;

/// Create an entity of a schema class.
///
/// Rooted classes get a GlobalId and, when an owner context is set, an
/// owner history.
pub fn create_entity(graph: &mut EntityGraph, ifc_class: &str, name: Option<&str>) -> Result<EntityId> {
    let ifc_type = IfcType::parse(ifc_class);
    if let IfcType::Unknown(_) = ifc_type {
        return Err(GraphError::invalid_argument(
            "ifc_class",
            format!("unknown class {ifc_class}"),
        ));
    }
    if ifc_type.is_relationship() {
        return Err(GraphError::invalid_argument(
            "ifc_class",
            "relationships are created by the assign usecases",
        ));
    }
    relation::create_rooted(graph, ifc_type, name)
}

/// Remove products and every relationship edge they take part in.
///
/// Relationships left without members are removed; the entities on their
/// other side are kept. Fails before any change if a product is referenced
/// from outside the relationship taxonomy.
pub fn remove_product(graph: &mut EntityGraph, products: &[EntityId]) -> Result<()> {
    let products = relation::dedup(products);
    for &product in &products {
        relation::check_detachable(graph, product)?;
    }
    for product in products {
        relation::remove_object(graph, product)?;
    }
    Ok(())
}

/// Remove a relationship entity together with its unshared owner history.
///
/// The entities on both sides are kept. Layers own their items directly and
/// are removed with `layer.remove_layer` instead.
pub fn remove_relationship(graph: &mut EntityGraph, relationship: EntityId) -> Result<()> {
    graph.get_or_err(relationship)?;
    let rule = RelationshipKind::ALL
        .into_iter()
        .map(|kind| relation::rule(graph, kind))
        .find(|rule| graph.is_a(relationship, &rule.rel_type))
        .ok_or_else(|| {
            GraphError::invalid_argument(
                "relationship",
                format!("{relationship} is not a relationship"),
            )
        })?;
    if rule.is_self_relating() {
        return Err(GraphError::invalid_argument(
            "relationship",
            format!("{} is removed with its own usecase", rule.rel_type),
        ));
    }
    relation::remove_relationship(graph, relationship)
}

operation!(
    /// `root.create_entity(ifc_class, [name])`
    CreateEntity,
    "root.create_entity",
    |graph, args| {
        let ifc_class = args
            .text("ifc_class")?
            .ok_or_else(|| GraphError::MissingArgument("ifc_class".to_string()))?;
        create_entity(graph, ifc_class, args.text("name")?).map(Some)
    }
);

operation!(
    /// `root.remove_product(products)`
    RemoveProduct,
    "root.remove_product",
    |graph, args| {
        remove_product(graph, &args.entities("products")?)?;
        Ok(None)
    }
);

operation!(
    /// `root.remove_relationship(relationship)`
    RemoveRelationship,
    "root.remove_relationship",
    |graph, args| {
        remove_relationship(graph, args.entity("relationship")?)?;
        Ok(None)
    }
);

pub(crate) fn register(registry: &mut Registry) {
    registry.register(Arc::new(CreateEntity));
    registry.register(Arc::new(RemoveProduct));
    registry.register(Arc::new(RemoveRelationship));
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Whole/part decomposition
//!
//! A part belongs to at most one aggregate. Project, site, building and
//! storey are chained through aggregation in every schema release.

use super::relation;
use crate::registry::operation;
use crate::Registry;
use ifc_lite_model::{EntityId, RelationshipKind, Result};
use ifc_lite_store::EntityGraph;
use std::sync::Arc;

/// Make products parts of `relating_object`, replacing any previous
/// aggregate. Returns the aggregation relationship.
pub fn assign_object(
    graph: &mut EntityGraph,
    products: &[EntityId],
    relating_object: EntityId,
) -> Result<EntityId> {
    let rule = relation::rule(graph, RelationshipKind::Aggregation);
    relation::validate_relating(graph, &rule, relating_object)?;
    relation::validate_members(graph, &rule, products)?;
    relation::check_acyclic(graph, &rule, products, relating_object)?;
    relation::assign_exclusive(graph, &rule, products, relating_object)
}

/// Detach products from their aggregate
pub fn unassign_object(graph: &mut EntityGraph, products: &[EntityId]) -> Result<()> {
    relation::require_all(graph, products)?;
    let rule = relation::rule(graph, RelationshipKind::Aggregation);
    relation::unassign(graph, &rule, products, None)
}

operation!(
    AssignObject,
    "aggregate.assign_object",
    |graph, args| {
        assign_object(
            graph,
            &args.entities("products")?,
            args.entity("relating_object")?,
        )
        .map(Some)
    }
);

operation!(
    UnassignObject,
    "aggregate.unassign_object",
    |graph, args| {
        unassign_object(graph, &args.entities("products")?)?;
        Ok(None)
    }
);

pub(crate) fn register(registry: &mut Registry) {
    registry.register(Arc::new(AssignObject));
    registry.register(Arc::new(UnassignObject));
}

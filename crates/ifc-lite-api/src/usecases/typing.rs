// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Occurrence typing (`type.*` operations)

use super::relation;
use crate::registry::operation;
use crate::Registry;
use ifc_lite_model::{EntityId, RelationshipKind, Result};
use ifc_lite_store::EntityGraph;
use std::sync::Arc;

/// Type occurrences by `relating_type`, replacing any previous type
pub fn assign_type(
    graph: &mut EntityGraph,
    related_objects: &[EntityId],
    relating_type: EntityId,
) -> Result<EntityId> {
    let rule = relation::rule(graph, RelationshipKind::Typing);
    relation::validate_relating(graph, &rule, relating_type)?;
    relation::validate_members(graph, &rule, related_objects)?;
    relation::assign_exclusive(graph, &rule, related_objects, relating_type)
}

/// Untype occurrences; other occurrences of the same type are unaffected
pub fn unassign_type(graph: &mut EntityGraph, related_objects: &[EntityId]) -> Result<()> {
    relation::require_all(graph, related_objects)?;
    let rule = relation::rule(graph, RelationshipKind::Typing);
    relation::unassign(graph, &rule, related_objects, None)
}

operation!(
    AssignType,
    "type.assign_type",
    |graph, args| {
        assign_type(
            graph,
            &args.entities("related_objects")?,
            args.entity("relating_type")?,
        )
        .map(Some)
    }
);

operation!(
    UnassignType,
    "type.unassign_type",
    |graph, args| {
        unassign_type(graph, &args.entities("related_objects")?)?;
        Ok(None)
    }
);

pub(crate) fn register(registry: &mut Registry) {
    registry.register(Arc::new(AssignType));
    registry.register(Arc::new(UnassignType));
}

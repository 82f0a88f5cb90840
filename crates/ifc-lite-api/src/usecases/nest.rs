// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ordered nesting (ports on a terminal, sub-tasks of a task)

use super::relation;
use crate::registry::operation;
use crate::Registry;
use ifc_lite_model::{EntityId, RelationshipKind, Result};
use ifc_lite_store::EntityGraph;
use std::sync::Arc;

/// Nest objects under `relating_object`, appended in the given order
pub fn assign_object(
    graph: &mut EntityGraph,
    related_objects: &[EntityId],
    relating_object: EntityId,
) -> Result<EntityId> {
    let rule = relation::rule(graph, RelationshipKind::Nesting);
    relation::validate_relating(graph, &rule, relating_object)?;
    relation::validate_members(graph, &rule, related_objects)?;
    relation::check_acyclic(graph, &rule, related_objects, relating_object)?;
    relation::assign_exclusive(graph, &rule, related_objects, relating_object)
}

/// Take objects out of their nest; siblings keep their order
pub fn unassign_object(graph: &mut EntityGraph, related_objects: &[EntityId]) -> Result<()> {
    relation::require_all(graph, related_objects)?;
    let rule = relation::rule(graph, RelationshipKind::Nesting);
    relation::unassign(graph, &rule, related_objects, None)
}

operation!(
    AssignObject,
    "nest.assign_object",
    |graph, args| {
        assign_object(
            graph,
            &args.entities("related_objects")?,
            args.entity("relating_object")?,
        )
        .map(Some)
    }
);

operation!(
    UnassignObject,
    "nest.unassign_object",
    |graph, args| {
        unassign_object(graph, &args.entities("related_objects")?)?;
        Ok(None)
    }
);

pub(crate) fn register(registry: &mut Registry) {
    registry.register(Arc::new(AssignObject));
    registry.register(Arc::new(UnassignObject));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query;
    use ifc_lite_model::{EntityResolver, EntityResolverExt, IfcType};

    #[test]
    fn test_assign_nest() {
        let mut graph = EntityGraph::default();
        let terminal = graph.create(IfcType::IfcSanitaryTerminal);
        let valve = graph.create(IfcType::IfcValve);

        let rel = assign_object(&mut graph, &[valve], terminal).unwrap();
        assert!(graph.is_a(rel, &IfcType::IfcRelNests));
        assert_eq!(query::get_nest(&graph, valve), Some(terminal));
    }

    #[test]
    fn test_unassign_keeps_sibling_order() {
        let mut graph = EntityGraph::default();
        let task = graph.create(IfcType::IfcTask);
        let subtasks: Vec<_> = (0..3).map(|_| graph.create(IfcType::IfcTask)).collect();

        let rel = assign_object(&mut graph, &subtasks, task).unwrap();
        unassign_object(&mut graph, &[subtasks[1]]).unwrap();

        assert_eq!(
            graph.get(rel).unwrap().get_refs("RelatedObjects"),
            vec![subtasks[0], subtasks[2]]
        );
        assert_eq!(query::get_nest(&graph, subtasks[1]), None);
        assert_eq!(
            query::get_nested_children(&graph, task),
            vec![subtasks[0], subtasks[2]]
        );
    }

    #[test]
    fn test_unassign_last_child_removes_nest() {
        let mut graph = EntityGraph::default();
        let task = graph.create(IfcType::IfcTask);
        let subtask = graph.create(IfcType::IfcTask);
        assign_object(&mut graph, &[subtask], task).unwrap();

        unassign_object(&mut graph, &[subtask]).unwrap();
        assert!(graph.by_type(&IfcType::IfcRelNests).is_empty());
    }
}

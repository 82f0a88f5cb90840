// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Group membership
//!
//! An object may belong to any number of groups. Unassigning the last member
//! removes the group assignment but never the group itself.

use super::relation;
use crate::registry::operation;
use crate::Registry;
use ifc_lite_model::{EntityId, IfcType, RelationshipKind, Result};
use ifc_lite_store::EntityGraph;
use std::sync::Arc;

/// Create an `IfcGroup`
pub fn add_group(graph: &mut EntityGraph, name: Option<&str>) -> Result<EntityId> {
    relation::create_rooted(graph, IfcType::IfcGroup, name.or(Some("Unnamed")))
}

/// Add products to a group (or system); members already present are kept
/// in place
pub fn assign_group(graph: &mut EntityGraph, products: &[EntityId], group: EntityId) -> Result<EntityId> {
    let rule = relation::rule(graph, RelationshipKind::Grouping);
    relation::validate_relating(graph, &rule, group)?;
    relation::validate_members(graph, &rule, products)?;
    relation::assign_shared(graph, &rule, products, group)
}

/// Remove products from one group, keeping their other memberships
pub fn unassign_group(graph: &mut EntityGraph, products: &[EntityId], group: EntityId) -> Result<()> {
    relation::require_all(graph, products)?;
    let rule = relation::rule(graph, RelationshipKind::Grouping);
    relation::validate_relating(graph, &rule, group)?;
    relation::unassign(graph, &rule, products, Some(group))
}

/// Remove a group together with its assignments. Members are kept.
pub fn remove_group(graph: &mut EntityGraph, group: EntityId) -> Result<()> {
    let rule = relation::rule(graph, RelationshipKind::Grouping);
    relation::validate_relating(graph, &rule, group)?;
    relation::remove_object(graph, group)
}

operation!(
    AddGroup,
    "group.add_group",
    |graph, args| add_group(graph, args.text("name")?).map(Some)
);

operation!(
    AssignGroup,
    "group.assign_group",
    |graph, args| {
        assign_group(graph, &args.entities("products")?, args.entity("group")?).map(Some)
    }
);

operation!(
    UnassignGroup,
    "group.unassign_group",
    |graph, args| {
        unassign_group(graph, &args.entities("products")?, args.entity("group")?)?;
        Ok(None)
    }
);

operation!(
    RemoveGroup,
    "group.remove_group",
    |graph, args| {
        remove_group(graph, args.entity("group")?)?;
        Ok(None)
    }
);

pub(crate) fn register(registry: &mut Registry) {
    registry.register(Arc::new(AddGroup));
    registry.register(Arc::new(AssignGroup));
    registry.register(Arc::new(UnassignGroup));
    registry.register(Arc::new(RemoveGroup));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query;
    use ifc_lite_model::EntityResolver;

    #[test]
    fn test_group_unassignment() {
        let mut graph = EntityGraph::default();
        let a = graph.create(IfcType::IfcPump);
        let b = graph.create(IfcType::IfcPump);
        let group = add_group(&mut graph, None).unwrap();

        assign_group(&mut graph, &[a, b], group).unwrap();
        unassign_group(&mut graph, &[b], group).unwrap();

        let rels = graph.by_type(&IfcType::IfcRelAssignsToGroup);
        assert_eq!(rels.len(), 1);
        let rel = graph.get(rels[0]).unwrap();
        assert_eq!(rel.get_ref("RelatingGroup"), Some(group));
        assert_eq!(rel.get_refs("RelatedObjects"), vec![a]);
    }

    #[test]
    fn test_membership_in_several_groups() {
        let mut graph = EntityGraph::default();
        let pump = graph.create(IfcType::IfcPump);
        let g1 = add_group(&mut graph, Some("Pumps")).unwrap();
        let g2 = add_group(&mut graph, Some("Level 1")).unwrap();

        assign_group(&mut graph, &[pump], g1).unwrap();
        assign_group(&mut graph, &[pump], g2).unwrap();
        assert_eq!(query::get_groups(&graph, pump), vec![g1, g2]);

        unassign_group(&mut graph, &[pump], g1).unwrap();
        assert_eq!(query::get_groups(&graph, pump), vec![g2]);
        assert!(graph.contains(g1));
    }

    #[test]
    fn test_remove_group_keeps_members() {
        let mut graph = EntityGraph::default();
        let pump = graph.create(IfcType::IfcPump);
        let group = add_group(&mut graph, None).unwrap();
        assign_group(&mut graph, &[pump], group).unwrap();

        remove_group(&mut graph, group).unwrap();
        assert!(!graph.contains(group));
        assert!(graph.contains(pump));
        assert!(graph.by_type(&IfcType::IfcRelAssignsToGroup).is_empty());
    }
}

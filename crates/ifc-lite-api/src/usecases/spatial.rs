// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Spatial containment and spatial references
//!
//! A product is contained in at most one spatial structure, but may be
//! referenced by any number of them (a column spanning several storeys).

use super::relation;
use crate::registry::operation;
use crate::Registry;
use ifc_lite_model::{EntityId, RelationshipKind, Result};
use ifc_lite_store::EntityGraph;
use std::sync::Arc;

/// Contain products in a spatial structure, moving them out of any previous
/// container. Returns the containment relationship.
pub fn assign_container(
    graph: &mut EntityGraph,
    products: &[EntityId],
    relating_structure: EntityId,
) -> Result<EntityId> {
    let rule = relation::rule(graph, RelationshipKind::Containment);
    relation::validate_relating(graph, &rule, relating_structure)?;
    relation::validate_members(graph, &rule, products)?;
    relation::assign_exclusive(graph, &rule, products, relating_structure)
}

/// Take products out of their spatial container
pub fn unassign_container(graph: &mut EntityGraph, products: &[EntityId]) -> Result<()> {
    relation::require_all(graph, products)?;
    let rule = relation::rule(graph, RelationshipKind::Containment);
    relation::unassign(graph, &rule, products, None)
}

/// Same as [`unassign_container`]; kept for callers of the older name
pub fn remove_container(graph: &mut EntityGraph, products: &[EntityId]) -> Result<()> {
    unassign_container(graph, products)
}

/// Reference products from a spatial structure without containing them
pub fn reference_structure(
    graph: &mut EntityGraph,
    products: &[EntityId],
    relating_structure: EntityId,
) -> Result<EntityId> {
    let rule = relation::rule(graph, RelationshipKind::SpatialReference);
    relation::validate_relating(graph, &rule, relating_structure)?;
    relation::validate_members(graph, &rule, products)?;
    relation::assign_shared(graph, &rule, products, relating_structure)
}

/// Drop spatial references of products, from one structure or from all
pub fn dereference_structure(
    graph: &mut EntityGraph,
    products: &[EntityId],
    relating_structure: Option<EntityId>,
) -> Result<()> {
    relation::require_all(graph, products)?;
    let rule = relation::rule(graph, RelationshipKind::SpatialReference);
    if let Some(structure) = relating_structure {
        relation::validate_relating(graph, &rule, structure)?;
    }
    relation::unassign(graph, &rule, products, relating_structure)
}

operation!(
    AssignContainer,
    "spatial.assign_container",
    |graph, args| {
        assign_container(
            graph,
            &args.entities("products")?,
            args.entity("relating_structure")?,
        )
        .map(Some)
    }
);

operation!(
    UnassignContainer,
    "spatial.unassign_container",
    |graph, args| {
        unassign_container(graph, &args.entities("products")?)?;
        Ok(None)
    }
);

operation!(
    RemoveContainer,
    "spatial.remove_container",
    |graph, args| {
        remove_container(graph, &args.entities("products")?)?;
        Ok(None)
    }
);

operation!(
    ReferenceStructure,
    "spatial.reference_structure",
    |graph, args| {
        reference_structure(
            graph,
            &args.entities("products")?,
            args.entity("relating_structure")?,
        )
        .map(Some)
    }
);

operation!(
    DereferenceStructure,
    "spatial.dereference_structure",
    |graph, args| {
        dereference_structure(
            graph,
            &args.entities("products")?,
            args.opt_entity("relating_structure")?,
        )?;
        Ok(None)
    }
);

pub(crate) fn register(registry: &mut Registry) {
    registry.register(Arc::new(AssignContainer));
    registry.register(Arc::new(UnassignContainer));
    registry.register(Arc::new(RemoveContainer));
    registry.register(Arc::new(ReferenceStructure));
    registry.register(Arc::new(DereferenceStructure));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query;
    use ifc_lite_model::{EntityResolver, EntityResolverExt, GraphError, IfcType};

    fn graph() -> EntityGraph {
        EntityGraph::default()
    }

    #[test]
    fn test_assign_container() {
        let mut graph = graph();
        let building = graph.create(IfcType::IfcBuilding);
        let wall = graph.create(IfcType::IfcWall);

        let rel = assign_container(&mut graph, &[wall], building).unwrap();
        assert_eq!(query::get_container(&graph, wall), Some(building));
        assert!(graph.is_a(rel, &IfcType::IfcRelContainedInSpatialStructure));
    }

    #[test]
    fn test_reassigning_moves_product() {
        let mut graph = graph();
        let level_1 = graph.create(IfcType::IfcBuildingStorey);
        let level_2 = graph.create(IfcType::IfcBuildingStorey);
        let a = graph.create(IfcType::IfcWall);
        let b = graph.create(IfcType::IfcWall);

        let first = assign_container(&mut graph, &[a, b], level_1).unwrap();
        let second = assign_container(&mut graph, &[a], level_2).unwrap();

        assert_ne!(first, second);
        assert_eq!(query::get_container(&graph, a), Some(level_2));
        assert_eq!(query::get_container(&graph, b), Some(level_1));
        assert_eq!(graph.get(first).unwrap().get_refs("RelatedElements"), vec![b]);
    }

    #[test]
    fn test_assigning_twice_merges() {
        let mut graph = graph();
        let building = graph.create(IfcType::IfcBuilding);
        let a = graph.create(IfcType::IfcWall);
        let b = graph.create(IfcType::IfcWall);

        let first = assign_container(&mut graph, &[a], building).unwrap();
        let second = assign_container(&mut graph, &[b], building).unwrap();
        assert_eq!(first, second);
        assert_eq!(graph.count_by_type(&IfcType::IfcRelContainedInSpatialStructure), 1);
    }

    #[test]
    fn test_unassign_with_other_elements() {
        let mut graph = graph();
        let building = graph.create(IfcType::IfcBuilding);
        let a = graph.create(IfcType::IfcWall);
        let b = graph.create(IfcType::IfcWall);
        assign_container(&mut graph, &[a, b], building).unwrap();

        unassign_container(&mut graph, &[a]).unwrap();
        assert_eq!(query::get_container(&graph, a), None);
        let rel = graph.by_type(&IfcType::IfcRelContainedInSpatialStructure)[0];
        assert_eq!(graph.get(rel).unwrap().get_refs("RelatedElements"), vec![b]);
    }

    #[test]
    fn test_unassign_last_removes_relationship() {
        let mut graph = graph();
        let building = graph.create(IfcType::IfcBuilding);
        let wall = graph.create(IfcType::IfcWall);
        assign_container(&mut graph, &[wall], building).unwrap();

        remove_container(&mut graph, &[wall]).unwrap();
        assert!(graph.by_type(&IfcType::IfcRelContainedInSpatialStructure).is_empty());
        assert!(graph.contains(building));
    }

    #[test]
    fn test_unassign_uncontained_is_noop() {
        let mut graph = graph();
        let wall = graph.create(IfcType::IfcWall);
        let before = graph.len();
        unassign_container(&mut graph, &[wall]).unwrap();
        assert_eq!(graph.len(), before);
    }

    #[test]
    fn test_container_must_be_spatial() {
        let mut graph = graph();
        let wall = graph.create(IfcType::IfcWall);
        let other = graph.create(IfcType::IfcWall);
        assert!(matches!(
            assign_container(&mut graph, &[wall], other),
            Err(GraphError::TypeMismatch { .. })
        ));
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn test_spatial_references_are_shared() {
        let mut graph = graph();
        let level_1 = graph.create(IfcType::IfcBuildingStorey);
        let level_2 = graph.create(IfcType::IfcBuildingStorey);
        let column = graph.create(IfcType::IfcColumn);

        assign_container(&mut graph, &[column], level_1).unwrap();
        reference_structure(&mut graph, &[column], level_1).unwrap();
        reference_structure(&mut graph, &[column], level_2).unwrap();
        assert_eq!(
            query::get_referenced_structures(&graph, column),
            vec![level_1, level_2]
        );
        assert_eq!(query::get_container(&graph, column), Some(level_1));

        dereference_structure(&mut graph, &[column], Some(level_1)).unwrap();
        assert_eq!(query::get_referenced_structures(&graph, column), vec![level_2]);

        dereference_structure(&mut graph, &[column], None).unwrap();
        assert!(graph
            .by_type(&IfcType::IfcRelReferencedInSpatialStructure)
            .is_empty());
        assert_eq!(query::get_container(&graph, column), Some(level_1));
    }
}

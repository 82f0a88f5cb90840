// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end relationship scenarios through the public API

use ifc_lite_api::usecases::{
    aggregate, group, layer, library, material, nest, root, spatial, system, typing,
};
use ifc_lite_api::{query, Arguments, Registry, Settings};
use ifc_lite_model::{EntityId, EntityResolver, GraphError, IfcType, SchemaVersion};
use ifc_lite_store::{EntityGraph, OwnerContext};

fn create(graph: &mut EntityGraph, class: &str) -> EntityId {
    root::create_entity(graph, class, None).unwrap()
}

#[test]
fn test_containment_scenario() {
    let mut graph = EntityGraph::default();
    let building = create(&mut graph, "IfcBuilding");
    let wall = create(&mut graph, "IfcWall");

    spatial::assign_container(&mut graph, &[wall], building).unwrap();
    assert_eq!(query::get_container(&graph, wall), Some(building));

    let wall_2 = create(&mut graph, "IfcWall");
    let rel = spatial::assign_container(&mut graph, &[wall, wall_2], building).unwrap();
    spatial::unassign_container(&mut graph, &[wall]).unwrap();

    assert_eq!(query::get_container(&graph, wall), None);
    assert_eq!(graph.get(rel).unwrap().get_refs("RelatedElements"), vec![wall_2]);
}

#[test]
fn test_aggregation_scenario() {
    let mut graph = EntityGraph::default();
    let site = create(&mut graph, "IfcSite");
    let building = create(&mut graph, "IfcBuilding");

    let rel = aggregate::assign_object(&mut graph, &[building], site).unwrap();
    assert_eq!(query::get_aggregate(&graph, building), Some(site));

    aggregate::unassign_object(&mut graph, &[building]).unwrap();
    assert_eq!(query::get_aggregate(&graph, building), None);
    assert!(!graph.contains(rel));
    assert!(graph.by_type(&IfcType::IfcRelAggregates).is_empty());
}

#[test]
fn test_material_reassignment_scenario() {
    let mut graph = EntityGraph::default();
    let wall = create(&mut graph, "IfcWall");
    let old = material::add_material(&mut graph, Some("CON01")).unwrap();
    let new = material::add_material(&mut graph, Some("CON02")).unwrap();

    let old_rel = material::assign_material(&mut graph, &[wall], "IfcMaterial", old).unwrap();
    material::assign_material(&mut graph, &[wall], "IfcMaterial", new).unwrap();

    let rels = graph.by_type(&IfcType::IfcRelAssociatesMaterial);
    assert_eq!(rels.len(), 1);
    assert_eq!(graph.get(rels[0]).unwrap().get_ref("RelatingMaterial"), Some(new));
    assert!(graph.contains(old));
    assert!(!graph.contains(old_rel));
}

#[test]
fn test_layer_order_preservation() {
    let mut graph = EntityGraph::default();
    let l = layer::add_layer(&mut graph, Some("A-WALL")).unwrap();
    let a = graph.create(IfcType::IfcExtrudedAreaSolid);
    let b = graph.create(IfcType::IfcExtrudedAreaSolid);
    let c = graph.create(IfcType::IfcExtrudedAreaSolid);

    layer::assign_layer(&mut graph, &[a, b, c], l).unwrap();
    layer::unassign_layer(&mut graph, &[b], l).unwrap();
    assert_eq!(graph.get(l).unwrap().get_refs("AssignedItems"), vec![a, c]);
}

#[test]
fn test_idempotent_unassign_leaves_graph_unchanged() {
    let mut graph = EntityGraph::default();
    let wall = create(&mut graph, "IfcWall");
    let system = system::add_system(&mut graph, None, None).unwrap();
    let snapshot: Vec<_> = graph
        .all_ids()
        .into_iter()
        .map(|id| graph.get(id).cloned())
        .collect();

    spatial::unassign_container(&mut graph, &[wall]).unwrap();
    aggregate::unassign_object(&mut graph, &[wall]).unwrap();
    material::unassign_material(&mut graph, &[wall]).unwrap();
    system::unassign_system(&mut graph, &[wall], system).unwrap();

    let after: Vec<_> = graph
        .all_ids()
        .into_iter()
        .map(|id| graph.get(id).cloned())
        .collect();
    assert_eq!(snapshot, after);
}

#[test]
fn test_failed_assign_leaves_no_partial_relationship() {
    let mut graph = EntityGraph::default();
    let building = create(&mut graph, "IfcBuilding");
    let wall = create(&mut graph, "IfcWall");
    let before = graph.len();

    let err = spatial::assign_container(&mut graph, &[wall, EntityId(999)], building).unwrap_err();
    assert_eq!(err, GraphError::EntityNotFound(EntityId(999)));
    assert_eq!(graph.len(), before);
    assert_eq!(query::get_container(&graph, wall), None);
}

#[test]
fn test_direct_removal_of_related_entity_is_loud() {
    let mut graph = EntityGraph::default();
    let building = create(&mut graph, "IfcBuilding");
    let wall = create(&mut graph, "IfcWall");
    let rel = spatial::assign_container(&mut graph, &[wall], building).unwrap();

    assert_eq!(
        graph.remove(wall),
        Err(GraphError::DanglingReferenceOnRemove {
            entity: wall,
            referenced_by: vec![rel],
        })
    );
    root::remove_product(&mut graph, &[wall]).unwrap();
    assert!(!graph.contains(rel));
}

#[test]
fn test_owner_histories_are_cleaned_up() {
    let mut graph = EntityGraph::new(SchemaVersion::Ifc2x3);
    let user = graph.create(IfcType::IfcPersonAndOrganization);
    let application = graph.create(IfcType::IfcApplication);
    graph
        .set_owner_context(Some(OwnerContext { user, application }))
        .unwrap();

    let storey = create(&mut graph, "IfcBuildingStorey");
    let wall = create(&mut graph, "IfcWall");
    let histories = graph.count_by_type(&IfcType::IfcOwnerHistory);

    spatial::assign_container(&mut graph, &[wall], storey).unwrap();
    assert_eq!(graph.count_by_type(&IfcType::IfcOwnerHistory), histories + 1);

    spatial::unassign_container(&mut graph, &[wall]).unwrap();
    assert_eq!(graph.count_by_type(&IfcType::IfcOwnerHistory), histories);
    assert!(graph.contains(user));
    assert!(graph.contains(application));
}

#[test]
fn test_library_reference_removal_cuts_edges_only() {
    let registry = Registry::default();
    let mut graph = EntityGraph::default();
    let run = |graph: &mut EntityGraph, key: &str, args: Arguments| registry.run(key, graph, args);

    let wall = run(&mut graph, "root.create_entity", Arguments::new().with("ifc_class", "IfcWall"))
        .unwrap()
        .unwrap();
    let lib = run(&mut graph, "library.add_library", Arguments::new().with("name", "Brickschema"))
        .unwrap()
        .unwrap();
    let reference = run(&mut graph, "library.add_reference", Arguments::new().with("library", lib))
        .unwrap()
        .unwrap();
    run(
        &mut graph,
        "library.assign_reference",
        Arguments::new()
            .with("products", vec![wall])
            .with("reference", reference),
    )
    .unwrap();
    assert_eq!(query::get_library_references(&graph, wall), vec![reference]);

    run(&mut graph, "library.remove_reference", Arguments::new().with("reference", reference))
        .unwrap();
    assert!(graph.contains(wall));
    assert!(!graph.contains(reference));
    assert!(graph.by_type(&IfcType::IfcRelAssociatesLibrary).is_empty());
    assert!(library::add_reference(&mut graph, lib).is_ok());
}

#[test]
fn test_registry_from_json_arguments() {
    let settings = Settings::from_json(r#"{ "schema": "IFC4X3" }"#).unwrap();
    let registry = Registry::with_default_operations(settings.clone());
    let mut graph = settings.new_graph();
    let road = graph.create(IfcType::IfcRoad);
    let part = graph.create(IfcType::IfcRoadPart);

    let args = Arguments::from_json(&serde_json::json!({
        "products": [part.0],
        "relating_object": road.0,
    }))
    .unwrap();
    registry.run("aggregate.assign_object", &mut graph, args).unwrap();
    assert_eq!(query::get_aggregate(&graph, part), Some(road));
}

#[test]
fn test_assign_without_members_is_refused() {
    let mut graph = EntityGraph::default();
    let building = create(&mut graph, "IfcBuilding");
    let assembly = create(&mut graph, "IfcElementAssembly");
    let wall_type = create(&mut graph, "IfcWallType");
    let group = group::add_group(&mut graph, None).unwrap();
    let system = system::add_system(&mut graph, None, None).unwrap();
    let layer = layer::add_layer(&mut graph, Some("A-WALL")).unwrap();
    let material = material::add_material(&mut graph, Some("CON01")).unwrap();
    let lib = library::add_library(&mut graph, None).unwrap();
    let reference = library::add_reference(&mut graph, lib).unwrap();
    let count = graph.len();

    let results = [
        spatial::assign_container(&mut graph, &[], building),
        spatial::reference_structure(&mut graph, &[], building),
        aggregate::assign_object(&mut graph, &[], building),
        nest::assign_object(&mut graph, &[], assembly),
        typing::assign_type(&mut graph, &[], wall_type),
        group::assign_group(&mut graph, &[], group),
        system::assign_system(&mut graph, &[], system),
        layer::assign_layer(&mut graph, &[], layer),
        material::assign_material(&mut graph, &[], "IfcMaterial", material),
        library::assign_reference(&mut graph, &[], reference),
    ];
    for result in results {
        assert!(matches!(result, Err(GraphError::InvalidArgument { .. })), "{result:?}");
    }
    assert_eq!(graph.len(), count);
    assert!(graph.by_type(&IfcType::IfcRelContainedInSpatialStructure).is_empty());
    assert!(graph.by_type(&IfcType::IfcRelAssignsToGroup).is_empty());
}

#[test]
fn test_registry_unassign_with_empty_list_is_noop() {
    let registry = Registry::default();
    let mut graph = EntityGraph::default();
    let storey = create(&mut graph, "IfcBuildingStorey");
    let wall = create(&mut graph, "IfcWall");
    spatial::assign_container(&mut graph, &[wall], storey).unwrap();
    let count = graph.len();

    let empty = || Arguments::new().with("products", Vec::<EntityId>::new());
    registry
        .run("spatial.unassign_container", &mut graph, empty())
        .unwrap();
    registry.run("root.remove_product", &mut graph, empty()).unwrap();
    assert_eq!(query::get_container(&graph, wall), Some(storey));
    assert_eq!(graph.len(), count);

    let err = registry
        .run(
            "spatial.assign_container",
            &mut graph,
            empty().with("relating_structure", storey),
        )
        .unwrap_err();
    assert!(matches!(err, GraphError::InvalidArgument { .. }));
}

#[test]
fn test_registry_removes_relationship_by_id() {
    let registry = Registry::default();
    let mut graph = EntityGraph::default();
    let assembly = create(&mut graph, "IfcElementAssembly");
    let beam = create(&mut graph, "IfcBeam");
    let wall_type = create(&mut graph, "IfcWallType");
    let wall = create(&mut graph, "IfcWall");
    let nesting = nest::assign_object(&mut graph, &[beam], assembly).unwrap();
    let typing = typing::assign_type(&mut graph, &[wall], wall_type).unwrap();

    for rel in [nesting, typing] {
        registry
            .run(
                "root.remove_relationship",
                &mut graph,
                Arguments::new().with("relationship", rel),
            )
            .unwrap();
        assert!(!graph.contains(rel));
    }
    for id in [assembly, beam, wall_type, wall] {
        assert!(graph.contains(id));
    }
    assert_eq!(query::get_nest(&graph, beam), None);
    assert_eq!(query::get_type(&graph, wall), None);
}

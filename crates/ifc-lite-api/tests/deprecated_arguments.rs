// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Singular argument forms accepted until they are removed
//!
//! Every call here uses the deprecated singular names through the registry,
//! the way older scripts do.

use ifc_lite_api::{query, Arguments, Registry, Settings, SingularArguments};
use ifc_lite_model::{EntityId, EntityResolver, EntityResolverExt, GraphError, IfcType};
use ifc_lite_store::EntityGraph;

struct Fixture {
    registry: Registry,
    graph: EntityGraph,
}

impl Fixture {
    fn new() -> Self {
        let settings = Settings::new().with_singular_arguments(SingularArguments::Accept);
        Self {
            graph: settings.new_graph(),
            registry: Registry::with_default_operations(settings),
        }
    }

    fn run(&mut self, key: &str, args: Arguments) -> Option<EntityId> {
        self.registry.run(key, &mut self.graph, args).unwrap()
    }

    fn create(&mut self, class: &str) -> EntityId {
        self.run("root.create_entity", Arguments::new().with("ifc_class", class))
            .unwrap()
    }
}

#[test]
fn test_assigning_a_container() {
    let mut f = Fixture::new();
    let element = f.create("IfcBuilding");
    let subelement = f.create("IfcWall");
    let rel = f
        .run(
            "spatial.assign_container",
            Arguments::new()
                .with("product", subelement)
                .with("relating_structure", element),
        )
        .unwrap();
    assert_eq!(query::get_container(&f.graph, subelement), Some(element));
    assert!(f.graph.is_a(rel, &IfcType::IfcRelContainedInSpatialStructure));
}

#[test]
fn test_unassigning_a_container_with_other_elements() {
    let mut f = Fixture::new();
    let element = f.create("IfcBuilding");
    let a = f.create("IfcWall");
    let b = f.create("IfcWall");
    f.run(
        "spatial.assign_container",
        Arguments::new()
            .with("products", vec![a, b])
            .with("relating_structure", element),
    );
    f.run("spatial.unassign_container", Arguments::new().with("product", a));

    let rel = f.graph.by_type(&IfcType::IfcRelContainedInSpatialStructure)[0];
    assert_eq!(f.graph.get(rel).unwrap().get_refs("RelatedElements"), vec![b]);
}

#[test]
fn test_removing_a_container() {
    let mut f = Fixture::new();
    let element = f.create("IfcBuilding");
    let subelement = f.create("IfcWall");
    f.run(
        "spatial.assign_container",
        Arguments::new()
            .with("products", vec![subelement])
            .with("relating_structure", element),
    );
    f.run("spatial.remove_container", Arguments::new().with("product", subelement));
    assert_eq!(query::get_container(&f.graph, subelement), None);
}

#[test]
fn test_group_unassignment() {
    let mut f = Fixture::new();
    let a = f.create("IfcPump");
    let b = f.create("IfcPump");
    let group = f.run("group.add_group", Arguments::new()).unwrap();
    f.run(
        "group.assign_group",
        Arguments::new().with("products", vec![a, b]).with("group", group),
    );
    f.run(
        "group.unassign_group",
        Arguments::new().with("product", b).with("group", group),
    );

    let rels = f.graph.by_type(&IfcType::IfcRelAssignsToGroup);
    assert_eq!(rels.len(), 1);
    let rel = f.graph.get(rels[0]).unwrap();
    assert_eq!(rel.get_ref("RelatingGroup"), Some(group));
    assert_eq!(rel.get_refs("RelatedObjects"), vec![a]);
}

#[test]
fn test_assign_layer_to_items() {
    let mut f = Fixture::new();
    let item = f.graph.create(IfcType::IfcExtrudedAreaSolid);
    let layer = f.graph.create(IfcType::IfcPresentationLayerAssignment);
    f.run(
        "layer.assign_layer",
        Arguments::new().with("item", item).with("layer", layer),
    );
    assert_eq!(f.graph.get(layer).unwrap().get_refs("AssignedItems"), vec![item]);
}

#[test]
fn test_unassign_layer_from_items() {
    let mut f = Fixture::new();
    let items: Vec<_> = (0..3)
        .map(|_| f.graph.create(IfcType::IfcExtrudedAreaSolid))
        .collect();
    let layer = f.graph.create(IfcType::IfcPresentationLayerAssignment);
    f.run(
        "layer.assign_layer",
        Arguments::new().with("items", items.clone()).with("layer", layer),
    );
    f.run(
        "layer.unassign_layer",
        Arguments::new().with("item", items[2]).with("layer", layer),
    );
    assert_eq!(
        f.graph.get(layer).unwrap().get_refs("AssignedItems"),
        items[..2].to_vec()
    );
}

#[test]
fn test_assigning_an_aggregate() {
    let mut f = Fixture::new();
    let element = f.create("IfcSite");
    let subelement = f.create("IfcBuilding");
    let rel = f
        .run(
            "aggregate.assign_object",
            Arguments::new()
                .with("product", subelement)
                .with("relating_object", element),
        )
        .unwrap();
    assert_eq!(query::get_aggregate(&f.graph, subelement), Some(element));
    assert!(f.graph.is_a(rel, &IfcType::IfcRelAggregates));
}

#[test]
fn test_unassigning_an_aggregate() {
    let mut f = Fixture::new();
    let element = f.create("IfcSite");
    let subelement = f.create("IfcBuilding");
    f.run(
        "aggregate.assign_object",
        Arguments::new()
            .with("product", subelement)
            .with("relating_object", element),
    );
    f.run("aggregate.unassign_object", Arguments::new().with("product", subelement));
    assert_eq!(query::get_aggregate(&f.graph, subelement), None);
}

#[test]
fn test_assigning_a_nesting() {
    let mut f = Fixture::new();
    let element = f.create("IfcSanitaryTerminal");
    let subelement = f.create("IfcValve");
    let rel = f
        .run(
            "nest.assign_object",
            Arguments::new()
                .with("related_object", subelement)
                .with("relating_object", element),
        )
        .unwrap();
    assert_eq!(query::get_nest(&f.graph, subelement), Some(element));
    assert!(f.graph.is_a(rel, &IfcType::IfcRelNests));
}

#[test]
fn test_unassigning_a_nesting() {
    let mut f = Fixture::new();
    let element = f.create("IfcTask");
    let subelement = f.create("IfcTask");
    f.run(
        "nest.assign_object",
        Arguments::new()
            .with("related_objects", vec![subelement])
            .with("relating_object", element),
    );
    f.run("nest.unassign_object", Arguments::new().with("related_object", subelement));
    assert_eq!(query::get_nest(&f.graph, subelement), None);
}

#[test]
fn test_assigning_a_type() {
    let mut f = Fixture::new();
    let element = f.create("IfcWall");
    let element_type = f.create("IfcWallType");
    let rel = f
        .run(
            "type.assign_type",
            Arguments::new()
                .with("related_object", element)
                .with("relating_type", element_type),
        )
        .unwrap();
    assert_eq!(query::get_type(&f.graph, element), Some(element_type));
    assert!(f.graph.is_a(rel, &IfcType::IfcRelDefinesByType));
}

#[test]
fn test_unassigning_a_type() {
    let mut f = Fixture::new();
    let element_type = f.create("IfcWallType");
    let element = f.create("IfcWall");
    f.run(
        "type.assign_type",
        Arguments::new()
            .with("related_objects", vec![element])
            .with("relating_type", element_type),
    );
    f.run("type.unassign_type", Arguments::new().with("related_object", element));
    assert_eq!(query::get_type(&f.graph, element), None);
}

#[test]
fn test_assign_system() {
    let mut f = Fixture::new();
    let element = f.create("IfcPump");
    let system = f.run("system.add_system", Arguments::new()).unwrap();
    f.run(
        "system.assign_system",
        Arguments::new().with("product", element).with("system", system),
    );

    let rels = f.graph.by_type(&IfcType::IfcRelAssignsToGroup);
    assert_eq!(rels.len(), 1);
    let rel = f.graph.get(rels[0]).unwrap();
    assert_eq!(rel.get_ref("RelatingGroup"), Some(system));
    assert_eq!(rel.get_refs("RelatedObjects"), vec![element]);
}

#[test]
fn test_unassign_system() {
    let mut f = Fixture::new();
    let a = f.create("IfcFlowSegment");
    let b = f.create("IfcFlowSegment");
    let system = f.run("system.add_system", Arguments::new()).unwrap();
    f.run(
        "system.assign_system",
        Arguments::new().with("products", vec![a, b]).with("system", system),
    );
    f.run(
        "system.unassign_system",
        Arguments::new().with("product", a).with("system", system),
    );
    assert_eq!(query::get_system_elements(&f.graph, system), vec![b]);

    f.run(
        "system.unassign_system",
        Arguments::new().with("product", b).with("system", system),
    );
    assert!(query::get_system_elements(&f.graph, system).is_empty());
}

#[test]
fn test_assign_element_single_material() {
    let mut f = Fixture::new();
    let element = f.create("IfcWall");
    let material = f
        .run("material.add_material", Arguments::new().with("name", "CON01"))
        .unwrap();
    f.run(
        "material.assign_material",
        Arguments::new()
            .with("product", element)
            .with("type", "IfcMaterial")
            .with("material", material),
    );
    assert_eq!(f.graph.count_by_type(&IfcType::IfcRelAssociatesMaterial), 1);
    assert_eq!(query::get_material(&f.graph, element), Some(material));
}

#[test]
fn test_unassign_single_material() {
    let mut f = Fixture::new();
    let element = f.create("IfcWall");
    let material = f
        .run("material.add_material", Arguments::new().with("name", "CON01"))
        .unwrap();
    f.run(
        "material.assign_material",
        Arguments::new()
            .with("products", vec![element])
            .with("type", "IfcMaterial")
            .with("material", material),
    );
    f.run("material.unassign_material", Arguments::new().with("product", element));
    assert_eq!(f.graph.count_by_type(&IfcType::IfcRelAssociatesMaterial), 0);
    assert_eq!(f.graph.count_by_type(&IfcType::IfcWall), 1);
    assert_eq!(f.graph.count_by_type(&IfcType::IfcMaterial), 1);
}

#[test]
fn test_singular_forms_rejected_after_removal() {
    let settings = Settings::new().with_singular_arguments(SingularArguments::Reject);
    let registry = Registry::with_default_operations(settings);
    let mut graph = EntityGraph::default();
    let site = graph.create(IfcType::IfcSite);
    let building = graph.create(IfcType::IfcBuilding);

    let result = registry.run(
        "aggregate.assign_object",
        &mut graph,
        Arguments::new()
            .with("product", building)
            .with("relating_object", site),
    );
    assert_eq!(
        result,
        Err(GraphError::DeprecatedArgument {
            name: "product".to_string(),
            replacement: "products".to_string(),
        })
    );
    assert!(registry
        .run(
            "aggregate.assign_object",
            &mut graph,
            Arguments::new()
                .with("products", vec![building])
                .with("relating_object", site),
        )
        .is_ok());
}

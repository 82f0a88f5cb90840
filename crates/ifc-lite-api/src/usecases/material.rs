// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Single material association

use super::relation;
use crate::registry::operation;
use crate::Registry;
use ifc_lite_model::{AttributeValue, EntityId, GraphError, IfcType, RelationshipKind, Result};
use ifc_lite_store::EntityGraph;
use std::sync::Arc;

/// Material kinds accepted by [`assign_material`]
const SUPPORTED_MATERIAL_TYPES: [&str; 1] = ["IfcMaterial"];

/// Create an `IfcMaterial`
pub fn add_material(graph: &mut EntityGraph, name: Option<&str>) -> Result<EntityId> {
    graph.create_with(
        IfcType::IfcMaterial,
        [("Name", AttributeValue::from(name.unwrap_or("Unnamed")))],
    )
}

/// Associate products with a single material, replacing any material they
/// were associated with before.
///
/// `material_type` names the kind of material definition being assigned;
/// only `"IfcMaterial"` is supported.
pub fn assign_material(
    graph: &mut EntityGraph,
    products: &[EntityId],
    material_type: &str,
    material: EntityId,
) -> Result<EntityId> {
    if !SUPPORTED_MATERIAL_TYPES
        .iter()
        .any(|t| t.eq_ignore_ascii_case(material_type))
    {
        return Err(GraphError::invalid_argument(
            "type",
            format!("unsupported material type {material_type}"),
        ));
    }
    let rule = relation::rule(graph, RelationshipKind::MaterialAssociation);
    relation::validate_relating(graph, &rule, material)?;
    relation::validate_members(graph, &rule, products)?;
    relation::assign_exclusive(graph, &rule, products, material)
}

/// Remove the material association of products. The material is kept.
pub fn unassign_material(graph: &mut EntityGraph, products: &[EntityId]) -> Result<()> {
    relation::require_all(graph, products)?;
    let rule = relation::rule(graph, RelationshipKind::MaterialAssociation);
    relation::unassign(graph, &rule, products, None)
}

/// Remove a material and its associations
pub fn remove_material(graph: &mut EntityGraph, material: EntityId) -> Result<()> {
    let rule = relation::rule(graph, RelationshipKind::MaterialAssociation);
    relation::validate_relating(graph, &rule, material)?;
    relation::remove_object(graph, material)
}

operation!(
    AddMaterial,
    "material.add_material",
    |graph, args| add_material(graph, args.text("name")?).map(Some)
);

operation!(
    AssignMaterial,
    "material.assign_material",
    |graph, args| {
        let material_type = args.text("type")?.unwrap_or("IfcMaterial");
        assign_material(
            graph,
            &args.entities("products")?,
            material_type,
            args.entity("material")?,
        )
        .map(Some)
    }
);

operation!(
    UnassignMaterial,
    "material.unassign_material",
    |graph, args| {
        unassign_material(graph, &args.entities("products")?)?;
        Ok(None)
    }
);

operation!(
    RemoveMaterial,
    "material.remove_material",
    |graph, args| {
        remove_material(graph, args.entity("material")?)?;
        Ok(None)
    }
);

pub(crate) fn register(registry: &mut Registry) {
    registry.register(Arc::new(AddMaterial));
    registry.register(Arc::new(AssignMaterial));
    registry.register(Arc::new(UnassignMaterial));
    registry.register(Arc::new(RemoveMaterial));
}

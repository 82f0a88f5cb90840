// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Relationship taxonomy
//!
//! Static knowledge about which relationship kinds exist, which entity class
//! records them and which attributes hold the relating and related sides.
//! Usecases are driven by these rows instead of repeating the rules per kind.

use crate::{GraphError, IfcType, Result, SchemaVersion};
use serde::{Deserialize, Serialize};

/// Whether one side of a relationship holds one or many entities
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cardinality {
    One,
    Many,
}

/// Relationship kinds managed by the core
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipKind {
    /// Element contained in exactly one spatial structure
    Containment,
    /// Element referenced by any number of spatial structures
    SpatialReference,
    /// Part of exactly one aggregate (whole/part decomposition)
    Aggregation,
    /// Ordered child of exactly one nest
    Nesting,
    /// Occurrence typed by exactly one type object
    Typing,
    /// Member of any number of groups and systems
    Grouping,
    /// Representation item shown on any number of presentation layers
    LayerAssignment,
    /// Element associated with exactly one single-value material
    MaterialAssociation,
    /// Object linked to any number of library references
    LibraryReference,
}

impl RelationshipKind {
    /// All kinds, in taxonomy order
    pub const ALL: [RelationshipKind; 9] = [
        RelationshipKind::Containment,
        RelationshipKind::SpatialReference,
        RelationshipKind::Aggregation,
        RelationshipKind::Nesting,
        RelationshipKind::Typing,
        RelationshipKind::Grouping,
        RelationshipKind::LayerAssignment,
        RelationshipKind::MaterialAssociation,
        RelationshipKind::LibraryReference,
    ];

    /// Taxonomy row for this kind, independent of schema version
    pub fn rule(self) -> RelationshipRule {
        RelationshipRule::of(self)
    }
}

/// One row of the taxonomy table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelationshipRule {
    pub kind: RelationshipKind,
    /// Entity class recording the relationship
    pub rel_type: IfcType,
    /// Attribute holding the owner side. `None` when the relationship entity
    /// is itself the owner (presentation layers).
    pub relating_attribute: Option<&'static str>,
    /// Attribute holding the ordered member list
    pub related_attribute: &'static str,
    pub relating: Cardinality,
    pub related: Cardinality,
    /// A related entity may take part in at most one relationship of this kind
    pub exclusive: bool,
    /// Relationship entities of this kind must carry an owner history
    pub requires_owner_history: bool,
    /// Class the relating entity must conform to
    pub relating_class: IfcType,
    /// Classes a related entity may conform to (any of them)
    pub related_classes: Vec<IfcType>,
}

impl RelationshipRule {
    /// Schema-neutral row for a kind
    pub fn of(kind: RelationshipKind) -> Self {
        use Cardinality::{Many, One};
        let (rel_type, relating_attribute, related_attribute, relating, exclusive, relating_class) =
            match kind {
                RelationshipKind::Containment => (
                    IfcType::IfcRelContainedInSpatialStructure,
                    Some("RelatingStructure"),
                    "RelatedElements",
                    One,
                    true,
                    IfcType::IfcSpatialElement,
                ),
                RelationshipKind::SpatialReference => (
                    IfcType::IfcRelReferencedInSpatialStructure,
                    Some("RelatingStructure"),
                    "RelatedElements",
                    One,
                    false,
                    IfcType::IfcSpatialElement,
                ),
                RelationshipKind::Aggregation => (
                    IfcType::IfcRelAggregates,
                    Some("RelatingObject"),
                    "RelatedObjects",
                    One,
                    true,
                    IfcType::IfcObjectDefinition,
                ),
                RelationshipKind::Nesting => (
                    IfcType::IfcRelNests,
                    Some("RelatingObject"),
                    "RelatedObjects",
                    One,
                    true,
                    IfcType::IfcObjectDefinition,
                ),
                RelationshipKind::Typing => (
                    IfcType::IfcRelDefinesByType,
                    Some("RelatingType"),
                    "RelatedObjects",
                    One,
                    true,
                    IfcType::IfcTypeObject,
                ),
                RelationshipKind::Grouping => (
                    IfcType::IfcRelAssignsToGroup,
                    Some("RelatingGroup"),
                    "RelatedObjects",
                    One,
                    false,
                    IfcType::IfcGroup,
                ),
                RelationshipKind::LayerAssignment => (
                    IfcType::IfcPresentationLayerAssignment,
                    None,
                    "AssignedItems",
                    Many,
                    false,
                    IfcType::IfcPresentationLayerAssignment,
                ),
                RelationshipKind::MaterialAssociation => (
                    IfcType::IfcRelAssociatesMaterial,
                    Some("RelatingMaterial"),
                    "RelatedObjects",
                    One,
                    true,
                    IfcType::IfcMaterial,
                ),
                RelationshipKind::LibraryReference => (
                    IfcType::IfcRelAssociatesLibrary,
                    Some("RelatingLibrary"),
                    "RelatedObjects",
                    One,
                    false,
                    IfcType::IfcLibraryReference,
                ),
            };

        let related_classes = match kind {
            RelationshipKind::Containment | RelationshipKind::SpatialReference => {
                vec![IfcType::IfcProduct]
            }
            RelationshipKind::Typing => vec![IfcType::IfcObject],
            RelationshipKind::LayerAssignment => vec![
                IfcType::IfcRepresentationItem,
                IfcType::IfcRepresentation,
            ],
            _ => vec![IfcType::IfcObjectDefinition],
        };

        Self {
            kind,
            rel_type,
            relating_attribute,
            related_attribute,
            relating,
            related: Many,
            exclusive,
            requires_owner_history: false,
            relating_class,
            related_classes,
        }
    }

    /// Whether an entity class may sit on the related side
    pub fn accepts_related(&self, ifc_type: &IfcType) -> bool {
        self.related_classes.iter().any(|class| ifc_type.is_a(class))
    }

    /// Row adjusted to a schema release.
    ///
    /// IFC2X3 makes OwnerHistory mandatory on every rooted entity, so rooted
    /// relationship classes require one there. The attribute names and
    /// cardinalities of the kinds in this table are identical across
    /// IFC2X3, IFC4 and IFC4X3.
    pub fn for_schema(kind: RelationshipKind, schema: SchemaVersion) -> Self {
        let mut rule = Self::of(kind);
        rule.requires_owner_history = schema == SchemaVersion::Ifc2x3 && rule.rel_type.is_rooted();
        rule
    }

    /// True when the relationship entity is itself the relating owner
    pub fn is_self_relating(&self) -> bool {
        self.relating_attribute.is_none()
    }

    /// Check the row can drive the shared usecase logic
    pub fn validate(&self) -> Result<()> {
        if self.exclusive && self.relating != Cardinality::One {
            return Err(GraphError::cardinality(
                self.kind,
                "exclusive relationships need a single relating side",
            ));
        }
        if self.exclusive && self.relating_attribute.is_none() {
            return Err(GraphError::cardinality(
                self.kind,
                "exclusive relationships need a relating attribute",
            ));
        }
        if self.related != Cardinality::Many {
            return Err(GraphError::cardinality(
                self.kind,
                "related side must be an ordered collection",
            ));
        }
        Ok(())
    }
}

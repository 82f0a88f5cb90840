// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Core types for the in-memory IFC entity graph
//!
//! This module defines entity identifiers, the schema class hierarchy the
//! relationship core understands, attribute values and the entity record
//! itself.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Type-safe entity identifier
///
/// Wraps the numeric instance id of an entity (e.g., #123 becomes EntityId(123)).
/// Ids are stable for the lifetime of a graph and never reused.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize, Default,
)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        EntityId(id)
    }
}

impl From<EntityId> for u32 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl From<EntityId> for u64 {
    fn from(id: EntityId) -> Self {
        id.0 as u64
    }
}

/// IFC schema release a graph conforms to
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, Default)]
pub enum SchemaVersion {
    #[serde(rename = "IFC2X3")]
    Ifc2x3,
    #[default]
    #[serde(rename = "IFC4")]
    Ifc4,
    #[serde(rename = "IFC4X3")]
    Ifc4x3,
}

impl SchemaVersion {
    /// Parse a schema identifier as found in FILE_SCHEMA (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "IFC2X3" => Some(SchemaVersion::Ifc2x3),
            "IFC4" => Some(SchemaVersion::Ifc4),
            "IFC4X3" | "IFC4X3_ADD2" => Some(SchemaVersion::Ifc4x3),
            _ => None,
        }
    }

    /// Canonical schema identifier
    pub fn name(&self) -> &'static str {
        match self {
            SchemaVersion::Ifc2x3 => "IFC2X3",
            SchemaVersion::Ifc4 => "IFC4",
            SchemaVersion::Ifc4x3 => "IFC4X3",
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Declares the `IfcType` enum together with its supertype chain.
///
/// Each line is `Class;` for a root class or `Class: Supertype;`.
macro_rules! ifc_types {
    (@parent) => { None };
    (@parent $parent:ident) => { Some(IfcType::$parent) };
    ($( $name:ident $(: $parent:ident)? ; )*) => {
        /// IFC entity class
        ///
        /// Covers the classes taking part in the relationship core. Unknown
        /// classes are captured with their original name.
        #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        pub enum IfcType {
            $( $name, )*
            /// Unknown type - stores the original type name string
            Unknown(String),
        }

        impl IfcType {
            /// Parse a type name string into an IfcType (case-insensitive)
            pub fn parse(s: &str) -> Self {
                $(
                    if s.eq_ignore_ascii_case(stringify!($name)) {
                        return IfcType::$name;
                    }
                )*
                IfcType::Unknown(s.to_string())
            }

            /// Get the schema class name (e.g. "IfcWall")
            pub fn name(&self) -> &str {
                match self {
                    $( IfcType::$name => stringify!($name), )*
                    IfcType::Unknown(s) => s,
                }
            }

            /// Direct supertype in the schema hierarchy
            pub fn supertype(&self) -> Option<IfcType> {
                match self {
                    $( IfcType::$name => ifc_types!(@parent $($parent)?), )*
                    IfcType::Unknown(_) => None,
                }
            }
        }
    };
}

ifc_types! {
    // ========================================================================
    // Rooted objects
    // ========================================================================
    IfcRoot;
    IfcObjectDefinition: IfcRoot;
    IfcContext: IfcObjectDefinition;
    IfcProject: IfcContext;
    IfcProjectLibrary: IfcContext;
    IfcObject: IfcObjectDefinition;
    IfcProduct: IfcObject;

    // Spatial structure
    IfcSpatialElement: IfcProduct;
    IfcSpatialStructureElement: IfcSpatialElement;
    IfcSite: IfcSpatialStructureElement;
    IfcBuilding: IfcSpatialStructureElement;
    IfcBuildingStorey: IfcSpatialStructureElement;
    IfcSpace: IfcSpatialStructureElement;
    IfcFacility: IfcSpatialStructureElement;
    IfcFacilityPart: IfcSpatialStructureElement;
    IfcRoad: IfcFacility;
    IfcBridge: IfcFacility;
    IfcRailway: IfcFacility;
    IfcRoadPart: IfcFacilityPart;
    IfcBridgePart: IfcFacilityPart;
    IfcRailwayPart: IfcFacilityPart;
    IfcSpatialZone: IfcSpatialElement;
    IfcExternalSpatialElement: IfcSpatialElement;

    // Building elements
    IfcElement: IfcProduct;
    IfcBuildingElement: IfcElement;
    IfcWall: IfcBuildingElement;
    IfcWallStandardCase: IfcWall;
    IfcCurtainWall: IfcBuildingElement;
    IfcSlab: IfcBuildingElement;
    IfcRoof: IfcBuildingElement;
    IfcBeam: IfcBuildingElement;
    IfcColumn: IfcBuildingElement;
    IfcDoor: IfcBuildingElement;
    IfcWindow: IfcBuildingElement;
    IfcStair: IfcBuildingElement;
    IfcStairFlight: IfcBuildingElement;
    IfcRamp: IfcBuildingElement;
    IfcRailing: IfcBuildingElement;
    IfcCovering: IfcBuildingElement;
    IfcPlate: IfcBuildingElement;
    IfcMember: IfcBuildingElement;
    IfcFooting: IfcBuildingElement;
    IfcPile: IfcBuildingElement;
    IfcBuildingElementProxy: IfcBuildingElement;
    IfcElementAssembly: IfcElement;

    // Distribution elements (MEP)
    IfcDistributionElement: IfcElement;
    IfcDistributionFlowElement: IfcDistributionElement;
    IfcDistributionControlElement: IfcDistributionElement;
    IfcFlowSegment: IfcDistributionFlowElement;
    IfcFlowFitting: IfcDistributionFlowElement;
    IfcFlowTerminal: IfcDistributionFlowElement;
    IfcFlowController: IfcDistributionFlowElement;
    IfcFlowMovingDevice: IfcDistributionFlowElement;
    IfcFlowStorageDevice: IfcDistributionFlowElement;
    IfcFlowTreatmentDevice: IfcDistributionFlowElement;
    IfcEnergyConversionDevice: IfcDistributionFlowElement;
    IfcPipeSegment: IfcFlowSegment;
    IfcDuctSegment: IfcFlowSegment;
    IfcPipeFitting: IfcFlowFitting;
    IfcSanitaryTerminal: IfcFlowTerminal;
    IfcValve: IfcFlowController;
    IfcPump: IfcFlowMovingDevice;
    IfcTank: IfcFlowStorageDevice;
    IfcBoiler: IfcEnergyConversionDevice;

    // Furnishing, features
    IfcFurnishingElement: IfcElement;
    IfcFurniture: IfcFurnishingElement;
    IfcFeatureElement: IfcElement;
    IfcOpeningElement: IfcFeatureElement;
    IfcVoidingFeature: IfcFeatureElement;
    IfcProjectionElement: IfcFeatureElement;

    // Other products
    IfcAnnotation: IfcProduct;
    IfcGrid: IfcProduct;

    // Processes, groups and actors
    IfcProcess: IfcObject;
    IfcTask: IfcProcess;
    IfcControl: IfcObject;
    IfcResource: IfcObject;
    IfcActor: IfcObject;
    IfcGroup: IfcObject;
    IfcSystem: IfcGroup;
    IfcDistributionSystem: IfcSystem;
    IfcDistributionCircuit: IfcDistributionSystem;
    IfcBuildingSystem: IfcSystem;
    IfcZone: IfcSystem;

    // Type objects
    IfcTypeObject: IfcObjectDefinition;
    IfcTypeProduct: IfcTypeObject;
    IfcElementType: IfcTypeProduct;
    IfcBuildingElementType: IfcElementType;
    IfcWallType: IfcBuildingElementType;
    IfcSlabType: IfcBuildingElementType;
    IfcBeamType: IfcBuildingElementType;
    IfcColumnType: IfcBuildingElementType;
    IfcDoorType: IfcBuildingElementType;
    IfcWindowType: IfcBuildingElementType;
    IfcCoveringType: IfcBuildingElementType;
    IfcMemberType: IfcBuildingElementType;
    IfcPlateType: IfcBuildingElementType;
    IfcRailingType: IfcBuildingElementType;
    IfcBuildingElementProxyType: IfcBuildingElementType;
    IfcDistributionElementType: IfcElementType;
    IfcPumpType: IfcDistributionElementType;
    IfcValveType: IfcDistributionElementType;
    IfcPipeSegmentType: IfcDistributionElementType;
    IfcFurnitureType: IfcElementType;
    IfcTypeProcess: IfcTypeObject;
    IfcTaskType: IfcTypeProcess;

    // ========================================================================
    // Relationships
    // ========================================================================
    IfcRelationship: IfcRoot;
    IfcRelDecomposes: IfcRelationship;
    IfcRelAggregates: IfcRelDecomposes;
    IfcRelNests: IfcRelDecomposes;
    IfcRelVoidsElement: IfcRelDecomposes;
    IfcRelConnects: IfcRelationship;
    IfcRelContainedInSpatialStructure: IfcRelConnects;
    IfcRelReferencedInSpatialStructure: IfcRelConnects;
    IfcRelFillsElement: IfcRelConnects;
    IfcRelDefines: IfcRelationship;
    IfcRelDefinesByType: IfcRelDefines;
    IfcRelDefinesByProperties: IfcRelDefines;
    IfcRelAssigns: IfcRelationship;
    IfcRelAssignsToGroup: IfcRelAssigns;
    IfcRelAssignsToProcess: IfcRelAssigns;
    IfcRelAssociates: IfcRelationship;
    IfcRelAssociatesMaterial: IfcRelAssociates;
    IfcRelAssociatesLibrary: IfcRelAssociates;
    IfcRelAssociatesClassification: IfcRelAssociates;
    IfcRelDeclares: IfcRelationship;

    // Property definitions
    IfcPropertyDefinition: IfcRoot;
    IfcPropertySet: IfcPropertyDefinition;
    IfcElementQuantity: IfcPropertyDefinition;

    // ========================================================================
    // Auxiliary (non-rooted) resources
    // ========================================================================
    IfcOwnerHistory;
    IfcPerson;
    IfcOrganization;
    IfcPersonAndOrganization;
    IfcApplication;

    // Materials
    IfcMaterialDefinition;
    IfcMaterial: IfcMaterialDefinition;
    IfcMaterialLayerSet: IfcMaterialDefinition;
    IfcMaterialConstituentSet: IfcMaterialDefinition;
    IfcMaterialProfileSet: IfcMaterialDefinition;
    IfcMaterialList;
    IfcMaterialUsageDefinition;
    IfcMaterialLayerSetUsage: IfcMaterialUsageDefinition;
    IfcMaterialProfileSetUsage: IfcMaterialUsageDefinition;

    // External references and libraries
    IfcExternalReference;
    IfcLibraryReference: IfcExternalReference;
    IfcClassificationReference: IfcExternalReference;
    IfcExternalInformation;
    IfcLibraryInformation: IfcExternalInformation;

    // Presentation
    IfcPresentationLayerAssignment;
    IfcPresentationLayerWithStyle: IfcPresentationLayerAssignment;
    IfcRepresentation;
    IfcShapeRepresentation: IfcRepresentation;
    IfcRepresentationItem;
    IfcMappedItem: IfcRepresentationItem;
    IfcGeometricRepresentationItem: IfcRepresentationItem;
    IfcSolidModel: IfcGeometricRepresentationItem;
    IfcExtrudedAreaSolid: IfcSolidModel;
    IfcFacetedBrep: IfcSolidModel;
    IfcTriangulatedFaceSet: IfcGeometricRepresentationItem;
}

impl FromStr for IfcType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl IfcType {
    /// Schema subtype test: true if `self` is `other` or inherits from it
    pub fn is_a(&self, other: &IfcType) -> bool {
        let mut current = Some(self.clone());
        while let Some(t) = current {
            if &t == other {
                return true;
            }
            current = t.supertype();
        }
        false
    }

    /// Check if this type is a spatial element (site, building, storey, space, facility, zone)
    pub fn is_spatial(&self) -> bool {
        self.is_a(&IfcType::IfcSpatialElement)
    }

    /// Check if this type is the project root
    pub fn is_project(&self) -> bool {
        *self == IfcType::IfcProject
    }

    /// Check if this type is a physical or virtual element (wall, pump, ...)
    pub fn is_element(&self) -> bool {
        self.is_a(&IfcType::IfcElement)
    }

    /// Check if this type is an object that may carry relationships
    pub fn is_object_definition(&self) -> bool {
        self.is_a(&IfcType::IfcObjectDefinition)
    }

    /// Check if this type is a type object (IfcWallType, IfcPumpType, ...)
    pub fn is_type_object(&self) -> bool {
        self.is_a(&IfcType::IfcTypeObject)
    }

    /// Check if this type is an objectified relationship
    pub fn is_relationship(&self) -> bool {
        self.is_a(&IfcType::IfcRelationship)
    }

    /// Rooted entities have a GlobalId and an identity of their own.
    /// Non-rooted ones are auxiliary records eligible for deep removal.
    pub fn is_rooted(&self) -> bool {
        self.is_a(&IfcType::IfcRoot)
    }
}

impl Default for IfcType {
    fn default() -> Self {
        IfcType::Unknown(String::new())
    }
}

impl fmt::Display for IfcType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Attribute value
///
/// Represents any value that can appear in an entity's attribute map.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum AttributeValue {
    /// Null value ($)
    #[default]
    Null,
    /// Entity reference (#123)
    EntityRef(EntityId),
    /// Boolean value
    Bool(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// String value
    String(String),
    /// Enumeration value (.VALUE.)
    Enum(String),
    /// Ordered list of values
    List(Vec<AttributeValue>),
}

impl AttributeValue {
    /// Build an ordered list of entity references
    pub fn refs(ids: impl IntoIterator<Item = EntityId>) -> Self {
        AttributeValue::List(ids.into_iter().map(AttributeValue::EntityRef).collect())
    }

    /// Try to get as entity reference
    pub fn as_entity_ref(&self) -> Option<EntityId> {
        match self {
            AttributeValue::EntityRef(id) => Some(*id),
            _ => None,
        }
    }

    /// Try to get as string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(f) => Some(*f),
            AttributeValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get as integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Bool(b) => Some(*b),
            AttributeValue::Enum(s) => match s.to_uppercase().as_str() {
                "TRUE" | "T" => Some(true),
                "FALSE" | "F" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Try to get as enum string
    pub fn as_enum(&self) -> Option<&str> {
        match self {
            AttributeValue::Enum(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get as list
    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::List(list) => Some(list),
            _ => None,
        }
    }

    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }

    /// Append every entity referenced by this value, depth first, to `out`
    pub fn collect_refs(&self, out: &mut Vec<EntityId>) {
        match self {
            AttributeValue::EntityRef(id) => out.push(*id),
            AttributeValue::List(items) => items.iter().for_each(|item| item.collect_refs(out)),
            _ => {}
        }
    }
}

impl From<EntityId> for AttributeValue {
    fn from(id: EntityId) -> Self {
        AttributeValue::EntityRef(id)
    }
}

impl From<Option<EntityId>> for AttributeValue {
    fn from(id: Option<EntityId>) -> Self {
        id.map(AttributeValue::EntityRef).unwrap_or_default()
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

/// Entity record
///
/// A typed node of the graph. Attributes are addressed by their schema name
/// (e.g. "RelatingObject"). Unset attributes read as absent.
#[derive(Clone, Debug, PartialEq)]
pub struct Entity {
    /// Entity ID
    pub id: EntityId,
    /// Entity type
    pub ifc_type: IfcType,
    attributes: BTreeMap<String, AttributeValue>,
}

impl Entity {
    /// Create an entity without attributes
    pub fn new(id: EntityId, ifc_type: IfcType) -> Self {
        Self {
            id,
            ifc_type,
            attributes: BTreeMap::new(),
        }
    }

    /// Schema subtype test on the entity's class
    pub fn is_a(&self, ifc_type: &IfcType) -> bool {
        self.ifc_type.is_a(ifc_type)
    }

    /// Get attribute by name
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name).filter(|v| !v.is_null())
    }

    /// Get entity reference attribute
    pub fn get_ref(&self, name: &str) -> Option<EntityId> {
        self.get(name).and_then(|v| v.as_entity_ref())
    }

    /// Get list of entity references, in stored order
    pub fn get_refs(&self, name: &str) -> Vec<EntityId> {
        self.get(name)
            .and_then(|v| v.as_list())
            .map(|list| list.iter().filter_map(|v| v.as_entity_ref()).collect())
            .unwrap_or_default()
    }

    /// Get string attribute
    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.as_string())
    }

    /// Get enum attribute
    pub fn get_enum(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.as_enum())
    }

    /// Iterate attributes in name order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Every entity this entity references, with duplicates
    pub fn references(&self) -> Vec<EntityId> {
        let mut out = Vec::new();
        for value in self.attributes.values() {
            value.collect_refs(&mut out);
        }
        out
    }

    /// Set an attribute, returning the previous value.
    ///
    /// Only the graph store calls this; it keeps the inverse index in step.
    pub fn set(&mut self, name: impl Into<String>, value: AttributeValue) -> Option<AttributeValue> {
        let name = name.into();
        if value.is_null() {
            self.attributes.remove(&name)
        } else {
            self.attributes.insert(name, value)
        }
    }
}

/// Identifier of a display proxy (an object in the host application's scene)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct ProxyId(pub u64);

impl fmt::Display for ProxyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "proxy:{}", self.0)
    }
}

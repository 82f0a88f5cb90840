// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-Lite Model - Shared types for the IFC relationship core
//!
//! This crate provides the vocabulary every other crate of the workspace
//! speaks: entity ids and records, the schema class hierarchy, attribute
//! values, the relationship taxonomy and the error type.
//!
//! # Architecture
//!
//! - [`IfcType`] - schema classes with their supertype chain
//! - [`Entity`] - a typed node with named attributes
//! - [`RelationshipRule`] - one row of the relationship taxonomy
//! - [`EntityResolver`] - read-only lookup and inverse references
//! - [`DisplayBinding`] - entity/display-proxy translation (external collaborator)
//! - [`GraphError`] - error taxonomy shared by store and usecases
//!
//! # Example
//!
//! ```ignore
//! use ifc_lite_model::{EntityResolver, IfcType, RelationshipKind};
//!
//! let rule = RelationshipKind::Containment.rule();
//! for rel in resolver.entities_by_type(&rule.rel_type) {
//!     println!("{} holds {:?}", rel, resolver.get(rel).map(|e| e.get_refs(rule.related_attribute)));
//! }
//! ```

pub mod error;
pub mod relationship;
pub mod resolver;
pub mod traits;
pub mod types;

// Re-export all public types
pub use error::*;
pub use relationship::*;
pub use resolver::*;
pub use traits::*;
pub use types::*;

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-Lite Store - In-memory entity graph
//!
//! This crate holds a materialized IFC model as a graph of entities and
//! implements the `EntityResolver` trait from `ifc-lite-model`.
//!
//! # Features
//!
//! - **O(1) lookup** by entity id using `FxHashMap`
//! - **Type extents** kept in creation order
//! - **Explicit inverse index** updated on every attribute write
//! - **Loud removal** - removing a still-referenced entity is an error
//! - **Deep removal** of exclusively owned auxiliary records
//!
//! # Example
//!
//! ```ignore
//! use ifc_lite_store::EntityGraph;
//! use ifc_lite_model::{EntityResolver, IfcType, SchemaVersion};
//!
//! let mut graph = EntityGraph::new(SchemaVersion::Ifc4);
//! let wall = graph.create(IfcType::IfcWall);
//! assert!(graph.inverse_references(wall).is_empty());
//! ```

mod graph;
pub mod owner;

pub use graph::EntityGraph;
pub use owner::{ChangeAction, OwnerContext};

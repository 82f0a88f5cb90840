// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IFC-Lite API - Relationship usecases
//!
//! Invariant-preserving operations that assign, unassign and remove typed
//! relationships on an [`EntityGraph`](ifc_lite_store::EntityGraph).
//!
//! ## Overview
//!
//! - **Usecases**: one module per domain (`spatial`, `aggregate`, `nest`,
//!   `typing`, `group`, `system`, `layer`, `material`, `library`), all driven
//!   by the relationship taxonomy in `ifc-lite-model`
//! - **Queries**: read-only helpers such as [`query::get_container`]
//! - **Registry**: string-keyed dispatch (`"spatial.assign_container"`) with
//!   named [`Arguments`]
//! - **Session**: a graph and registry shared between threads
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use ifc_lite_api::{query, Arguments, Registry, Settings};
//!
//! let settings = Settings::new();
//! let registry = Registry::with_default_operations(settings.clone());
//! let mut graph = settings.new_graph();
//!
//! let building = registry.run("root.create_entity", &mut graph,
//!     Arguments::new().with("ifc_class", "IfcBuilding"))?.unwrap();
//! let wall = registry.run("root.create_entity", &mut graph,
//!     Arguments::new().with("ifc_class", "IfcWall"))?.unwrap();
//!
//! registry.run("spatial.assign_container", &mut graph, Arguments::new()
//!     .with("products", vec![wall])
//!     .with("relating_structure", building))?;
//!
//! assert_eq!(query::get_container(&graph, wall), Some(building));
//! ```

pub mod args;
pub mod guid;
pub mod query;
pub mod registry;
pub mod session;
pub mod settings;
pub mod usecases;

pub use args::{ArgValue, Arguments, SingularArguments, SINGULAR_ARGUMENTS_REMOVED_IN};
pub use registry::{Operation, Registry};
pub use session::Session;
pub use settings::Settings;

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Relationship usecases
//!
//! One module per invocation domain. Every module exposes typed functions for
//! direct use from Rust and an [`Operation`](crate::Operation) per function
//! for the registry.

pub mod aggregate;
pub mod group;
pub mod layer;
pub mod library;
pub mod material;
pub mod nest;
pub mod owner;
pub(crate) mod relation;
pub mod root;
pub mod spatial;
pub mod system;
pub mod typing;

use crate::Registry;

/// Register every usecase operation
pub(crate) fn register_all(registry: &mut Registry) {
    root::register(registry);
    spatial::register(registry);
    aggregate::register(registry);
    nest::register(registry);
    typing::register(registry);
    group::register(registry);
    system::register(registry);
    layer::register(registry);
    material::register(registry);
    library::register(registry);
    owner::register(registry);
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! IFC-Lite Tool - Helpers for applications displaying a model
//!
//! Applications show entities through display proxies of their own. This
//! crate keeps the proxy/entity table and answers questions the UI asks
//! before invoking a usecase, such as whether two selected proxies may be
//! aggregated.
//!
//! # Example
//!
//! ```ignore
//! use ifc_lite_model::{DisplayBinding, ProxyId};
//! use ifc_lite_tool::{can_aggregate, ProxyTable};
//!
//! let mut table = ProxyTable::new();
//! table.link(assembly, ProxyId(1));
//! table.link(beam, ProxyId(2));
//! if can_aggregate(&graph, &table, ProxyId(1), ProxyId(2)) {
//!     ifc_lite_api::usecases::aggregate::assign_object(&mut graph, &[beam], assembly)?;
//! }
//! ```

pub mod aggregate;
pub mod binding;

pub use aggregate::{can_aggregate, get_container};
pub use binding::ProxyTable;

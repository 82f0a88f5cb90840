// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Collaborator traits at the edge of the relationship core
//!
//! The core never sees the host application's scene. Whatever displays the
//! model only has to translate between display proxies and entities and
//! report whether a proxy carries visual geometry.

use crate::{EntityId, ProxyId};

/// Binding between entities and their display proxies
///
/// Implementations keep the mapping one-to-one: linking a proxy to a new
/// entity (or an entity to a new proxy) replaces the previous link.
///
/// # Example
///
/// ```ignore
/// use ifc_lite_model::{DisplayBinding, EntityId, ProxyId};
///
/// fn is_linked(binding: &dyn DisplayBinding, proxy: ProxyId) -> bool {
///     binding.get_entity(proxy).is_some()
/// }
/// ```
pub trait DisplayBinding {
    /// Link an entity to a display proxy
    fn link(&mut self, entity: EntityId, proxy: ProxyId);

    /// Entity a proxy stands for, if the proxy is linked
    fn get_entity(&self, proxy: ProxyId) -> Option<EntityId>;

    /// Proxy displaying an entity, if any
    fn get_proxy(&self, entity: EntityId) -> Option<ProxyId>;

    /// Whether the proxy owns directly attached visual geometry (a mesh),
    /// as opposed to being an empty placeholder
    fn has_attached_geometry(&self, proxy: ProxyId) -> bool;
}

// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Proxy table - entity/display-proxy binding kept in memory

use ifc_lite_model::{DisplayBinding, EntityId, ProxyId};
use rustc_hash::{FxHashMap, FxHashSet};

/// One-to-one table between entities and display proxies
#[derive(Debug, Default, Clone)]
pub struct ProxyTable {
    entity_by_proxy: FxHashMap<ProxyId, EntityId>,
    proxy_by_entity: FxHashMap<EntityId, ProxyId>,
    /// Proxies carrying a mesh
    with_geometry: FxHashSet<ProxyId>,
}

impl ProxyTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Record whether a proxy carries directly attached geometry
    pub fn set_geometry(&mut self, proxy: ProxyId, has_geometry: bool) {
        if has_geometry {
            self.with_geometry.insert(proxy);
        } else {
            self.with_geometry.remove(&proxy);
        }
    }

    /// Drop the link of a proxy. Returns the entity it stood for.
    pub fn unlink(&mut self, proxy: ProxyId) -> Option<EntityId> {
        let entity = self.entity_by_proxy.remove(&proxy)?;
        self.proxy_by_entity.remove(&entity);
        Some(entity)
    }

    /// Number of linked proxies
    pub fn len(&self) -> usize {
        self.entity_by_proxy.len()
    }

    /// Whether no proxy is linked
    pub fn is_empty(&self) -> bool {
        self.entity_by_proxy.is_empty()
    }
}

impl DisplayBinding for ProxyTable {
    fn link(&mut self, entity: EntityId, proxy: ProxyId) {
        if let Some(previous) = self.proxy_by_entity.insert(entity, proxy) {
            if previous != proxy {
                self.entity_by_proxy.remove(&previous);
            }
        }
        if let Some(previous) = self.entity_by_proxy.insert(proxy, entity) {
            if previous != entity {
                self.proxy_by_entity.remove(&previous);
            }
        }
        log::trace!("linked {} to proxy {}", entity, proxy);
    }

    fn get_entity(&self, proxy: ProxyId) -> Option<EntityId> {
        self.entity_by_proxy.get(&proxy).copied()
    }

    fn get_proxy(&self, entity: EntityId) -> Option<ProxyId> {
        self.proxy_by_entity.get(&entity).copied()
    }

    fn has_attached_geometry(&self, proxy: ProxyId) -> bool {
        self.with_geometry.contains(&proxy)
    }
}

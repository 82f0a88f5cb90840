// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Aggregation checks for display proxies

use ifc_lite_api::query;
use ifc_lite_model::{DisplayBinding, EntityId, EntityResolver, ProxyId};

/// Whether `parent` may become the aggregate of `child`.
///
/// Rules, in order:
/// 1. both proxies must be linked to an entity
/// 2. element under element is allowed, unless the parent carries its own
///    mesh and so is not a logical container
/// 3. spatial under spatial, or spatial under a project, is allowed in
///    every schema release whatever geometry the parent shows
/// 4. anything else is refused
pub fn can_aggregate(
    resolver: &dyn EntityResolver,
    binding: &dyn DisplayBinding,
    parent: ProxyId,
    child: ProxyId,
) -> bool {
    let (Some(parent_id), Some(child_id)) = (binding.get_entity(parent), binding.get_entity(child))
    else {
        return false;
    };
    let (Some(parent_entity), Some(child_entity)) = (resolver.get(parent_id), resolver.get(child_id))
    else {
        log::debug!("proxy linked to a missing entity");
        return false;
    };

    let parent_type = &parent_entity.ifc_type;
    let child_type = &child_entity.ifc_type;
    if parent_type.is_element() && child_type.is_element() {
        return !binding.has_attached_geometry(parent);
    }
    child_type.is_spatial() && (parent_type.is_spatial() || parent_type.is_project())
}

/// Spatial container of the entity a tool is working on
pub fn get_container(resolver: &dyn EntityResolver, element: EntityId) -> Option<EntityId> {
    query::get_container(resolver, element)
}

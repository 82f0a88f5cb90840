// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Owner history context

use crate::registry::operation;
use crate::Registry;
use ifc_lite_model::{EntityId, Result};
use ifc_lite_store::{EntityGraph, OwnerContext};
use std::sync::Arc;

/// Set the user and application stamped onto new owner histories, or clear
/// them when either is `None`.
pub fn set_context(
    graph: &mut EntityGraph,
    user: Option<EntityId>,
    application: Option<EntityId>,
) -> Result<()> {
    let context = user
        .zip(application)
        .map(|(user, application)| OwnerContext { user, application });
    graph.set_owner_context(context)?;
    log::debug!("owner context set to {:?}", context);
    Ok(())
}

operation!(
    SetContext,
    "owner.set_context",
    |graph, args| {
        set_context(graph, args.opt_entity("user")?, args.opt_entity("application")?)?;
        Ok(None)
    }
);

pub(crate) fn register(registry: &mut Registry) {
    registry.register(Arc::new(SetContext));
}

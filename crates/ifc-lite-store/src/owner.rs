// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Owner history records
//!
//! Rooted entities may point at an `IfcOwnerHistory` naming who created or
//! last changed them. Histories can be shared between entities, so changes
//! and removals check for sole ownership through the inverse index first.

use crate::EntityGraph;
use ifc_lite_model::{AttributeValue, EntityId, EntityResolver, IfcType, Result};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// User and application stamped onto new owner histories
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerContext {
    /// `IfcPersonAndOrganization`
    pub user: EntityId,
    /// `IfcApplication`
    pub application: EntityId,
}

/// `IfcChangeActionEnum`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeAction {
    Added,
    Modified,
    Deleted,
    NoChange,
    NotDefined,
}

impl ChangeAction {
    /// Enumeration literal as written in the schema
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeAction::Added => "ADDED",
            ChangeAction::Modified => "MODIFIED",
            ChangeAction::Deleted => "DELETED",
            ChangeAction::NoChange => "NOCHANGE",
            ChangeAction::NotDefined => "NOTDEFINED",
        }
    }

    /// Parse an enumeration literal (case-insensitive, dots optional)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim_matches('.').to_uppercase().as_str() {
            "ADDED" => Some(ChangeAction::Added),
            "MODIFIED" => Some(ChangeAction::Modified),
            "DELETED" => Some(ChangeAction::Deleted),
            "NOCHANGE" => Some(ChangeAction::NoChange),
            "NOTDEFINED" => Some(ChangeAction::NotDefined),
            _ => None,
        }
    }
}

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

/// Create an owner history for a new rooted entity.
///
/// Returns `None` when no owner context is configured on the graph.
pub fn create_history(graph: &mut EntityGraph) -> Result<Option<EntityId>> {
    let Some(context) = graph.owner_context() else {
        return Ok(None);
    };

    let history = graph.create_with(
        IfcType::IfcOwnerHistory,
        [
            ("OwningUser", context.user.into()),
            ("OwningApplication", context.application.into()),
            (
                "ChangeAction",
                AttributeValue::Enum(ChangeAction::Added.as_str().to_string()),
            ),
            ("CreationDate", AttributeValue::Integer(now())),
        ],
    )?;
    Ok(Some(history))
}

/// Record a modification on an entity's owner history.
///
/// A history shared with other entities is copied first so the change does
/// not leak onto them. Entities without a history are left alone.
pub fn touch(graph: &mut EntityGraph, entity: EntityId) -> Result<()> {
    let Some(history) = graph.get(entity).and_then(|e| e.get_ref("OwnerHistory")) else {
        return Ok(());
    };

    let shared = graph
        .inverse_references(history)
        .into_iter()
        .any(|referrer| referrer != entity);

    let target = if shared {
        let attributes: Vec<(String, AttributeValue)> = graph
            .get(history)
            .map(|h| {
                h.attributes()
                    .map(|(name, value)| (name.to_string(), value.clone()))
                    .collect()
            })
            .unwrap_or_default();
        let copy = graph.create_with(
            IfcType::IfcOwnerHistory,
            attributes.iter().map(|(n, v)| (n.as_str(), v.clone())),
        )?;
        graph.set_attribute(entity, "OwnerHistory", copy)?;
        copy
    } else {
        history
    };

    graph.set_attribute(
        target,
        "ChangeAction",
        AttributeValue::Enum(ChangeAction::Modified.as_str().to_string()),
    )?;
    graph.set_attribute(target, "LastModifiedDate", AttributeValue::Integer(now()))?;
    if let Some(context) = graph.owner_context() {
        graph.set_attribute(target, "LastModifyingUser", context.user)?;
        graph.set_attribute(target, "LastModifyingApplication", context.application)?;
    }
    Ok(())
}

/// Deep-remove a history once nothing references it any more.
///
/// Returns true if the history was removed.
pub fn remove_if_orphaned(graph: &mut EntityGraph, history: EntityId) -> Result<bool> {
    if !graph.contains(history) || !graph.is_unreferenced(history) {
        return Ok(false);
    }
    graph.remove_deep(history)?;
    Ok(true)
}

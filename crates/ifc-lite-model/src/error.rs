// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for graph and relationship operations

use crate::{EntityId, RelationshipKind};
use thiserror::Error;

/// Result type alias for graph operations
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors that can occur while mutating or querying the entity graph
///
/// Unassigning or removing a relationship that does not exist is not an
/// error; those operations are no-ops.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    /// A relationship rule cannot express the requested single ownership
    #[error("Invalid cardinality for {kind:?}: {reason}")]
    InvalidCardinality {
        kind: RelationshipKind,
        reason: String,
    },

    /// Direct removal of an entity that other entities still reference
    #[error("Cannot remove {entity}: still referenced by {referenced_by:?}")]
    DanglingReferenceOnRemove {
        entity: EntityId,
        referenced_by: Vec<EntityId>,
    },

    /// Entity not found
    #[error("Entity {0} not found")]
    EntityNotFound(EntityId),

    /// Entity is not of the schema class an operation expects
    #[error("Type mismatch for entity {entity}: expected {expected}, got {actual}")]
    TypeMismatch {
        entity: EntityId,
        expected: String,
        actual: String,
    },

    /// A required named argument was not supplied
    #[error("Missing argument: {0}")]
    MissingArgument(String),

    /// A named argument has the wrong shape or conflicts with another
    #[error("Invalid argument {name}: {reason}")]
    InvalidArgument { name: String, reason: String },

    /// A singular argument form used after it stopped being accepted
    #[error("Argument {name} is no longer supported, use {replacement}")]
    DeprecatedArgument { name: String, replacement: String },

    /// No operation registered under the key
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// Malformed settings document
    #[error("Invalid settings: {0}")]
    Settings(String),
}

impl GraphError {
    /// Create a type mismatch error
    pub fn type_mismatch(entity: EntityId, expected: impl Into<String>, actual: impl ToString) -> Self {
        GraphError::TypeMismatch {
            entity,
            expected: expected.into(),
            actual: actual.to_string(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        GraphError::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid cardinality error
    pub fn cardinality(kind: RelationshipKind, reason: impl Into<String>) -> Self {
        GraphError::InvalidCardinality {
            kind,
            reason: reason.into(),
        }
    }
}

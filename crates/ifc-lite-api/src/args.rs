// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Named arguments for registry operations
//!
//! Operations take their inputs as a map of named values. Scripts can build
//! one with the builder methods or from a JSON object.

use ifc_lite_model::{EntityId, GraphError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Release in which the singular argument forms stop being accepted
pub const SINGULAR_ARGUMENTS_REMOVED_IN: &str = "2.0.0";

/// Deprecated singular argument names and their plural replacements
const SINGULAR_FORMS: [(&str, &str); 3] = [
    ("product", "products"),
    ("related_object", "related_objects"),
    ("item", "items"),
];

/// How the invocation boundary treats deprecated singular argument forms
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SingularArguments {
    /// Coerce silently into the plural form
    Accept,
    /// Coerce and log a deprecation warning
    #[default]
    Warn,
    /// Refuse with `DeprecatedArgument`
    Reject,
}

/// A single named argument value
#[derive(Clone, Debug, PartialEq)]
pub enum ArgValue {
    Null,
    Entity(EntityId),
    Entities(Vec<EntityId>),
    Text(String),
}

impl From<EntityId> for ArgValue {
    fn from(id: EntityId) -> Self {
        ArgValue::Entity(id)
    }
}

impl From<Option<EntityId>> for ArgValue {
    fn from(id: Option<EntityId>) -> Self {
        id.map(ArgValue::Entity).unwrap_or(ArgValue::Null)
    }
}

impl From<Vec<EntityId>> for ArgValue {
    fn from(ids: Vec<EntityId>) -> Self {
        ArgValue::Entities(ids)
    }
}

impl From<&[EntityId]> for ArgValue {
    fn from(ids: &[EntityId]) -> Self {
        ArgValue::Entities(ids.to_vec())
    }
}

impl<const N: usize> From<[EntityId; N]> for ArgValue {
    fn from(ids: [EntityId; N]) -> Self {
        ArgValue::Entities(ids.to_vec())
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::Text(s.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        ArgValue::Text(s)
    }
}

/// Named arguments passed to an operation
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Arguments {
    values: FxHashMap<String, ArgValue>,
}

impl Arguments {
    /// Create an empty argument map
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an argument (builder style)
    pub fn with(mut self, name: &str, value: impl Into<ArgValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Add or replace an argument
    pub fn insert(&mut self, name: &str, value: impl Into<ArgValue>) {
        self.values.insert(name.to_string(), value.into());
    }

    /// Remove an argument, returning its value
    pub fn take(&mut self, name: &str) -> Option<ArgValue> {
        self.values.remove(name)
    }

    /// Whether a non-null argument is present
    pub fn contains(&self, name: &str) -> bool {
        self.values
            .get(name)
            .is_some_and(|v| !matches!(v, ArgValue::Null))
    }

    /// Build arguments from a JSON object.
    ///
    /// Integers become entity ids, arrays of integers entity lists, strings
    /// text and `null` an absent value.
    pub fn from_json(value: &Value) -> Result<Self> {
        let object = value
            .as_object()
            .ok_or_else(|| GraphError::invalid_argument("arguments", "expected a JSON object"))?;

        let mut args = Self::new();
        for (name, value) in object {
            let arg = match value {
                Value::Null => ArgValue::Null,
                Value::String(s) => ArgValue::Text(s.clone()),
                Value::Number(_) => ArgValue::Entity(json_id(name, value)?),
                Value::Array(items) => ArgValue::Entities(
                    items
                        .iter()
                        .map(|item| json_id(name, item))
                        .collect::<Result<_>>()?,
                ),
                _ => {
                    return Err(GraphError::invalid_argument(
                        name.as_str(),
                        "unsupported JSON value",
                    ))
                }
            };
            args.values.insert(name.clone(), arg);
        }
        Ok(args)
    }

    /// Required single entity
    pub fn entity(&self, name: &str) -> Result<EntityId> {
        self.opt_entity(name)?
            .ok_or_else(|| GraphError::MissingArgument(name.to_string()))
    }

    /// Optional single entity
    pub fn opt_entity(&self, name: &str) -> Result<Option<EntityId>> {
        match self.values.get(name) {
            None | Some(ArgValue::Null) => Ok(None),
            Some(ArgValue::Entity(id)) => Ok(Some(*id)),
            Some(_) => Err(GraphError::invalid_argument(name, "expected a single entity")),
        }
    }

    /// Required list of entities. A single entity counts as a one-element
    /// list. An empty list is passed through; assign usecases refuse it,
    /// unassign usecases treat it as nothing to do.
    pub fn entities(&self, name: &str) -> Result<Vec<EntityId>> {
        match self.values.get(name) {
            None | Some(ArgValue::Null) => Err(GraphError::MissingArgument(name.to_string())),
            Some(ArgValue::Entity(id)) => Ok(vec![*id]),
            Some(ArgValue::Entities(ids)) => Ok(ids.clone()),
            Some(ArgValue::Text(_)) => Err(GraphError::invalid_argument(name, "expected entities")),
        }
    }

    /// Optional text
    pub fn text(&self, name: &str) -> Result<Option<&str>> {
        match self.values.get(name) {
            None | Some(ArgValue::Null) => Ok(None),
            Some(ArgValue::Text(s)) => Ok(Some(s)),
            Some(_) => Err(GraphError::invalid_argument(name, "expected text")),
        }
    }

    /// Coerce deprecated singular forms into their plural form.
    ///
    /// This is the only place that knows about the singular names; operations
    /// read the plural names exclusively. Scheduled for removal in
    /// [`SINGULAR_ARGUMENTS_REMOVED_IN`].
    pub fn normalize(&mut self, policy: SingularArguments) -> Result<()> {
        for (singular, plural) in SINGULAR_FORMS {
            if !self.values.contains_key(singular) {
                continue;
            }
            if policy == SingularArguments::Reject {
                return Err(GraphError::DeprecatedArgument {
                    name: singular.to_string(),
                    replacement: plural.to_string(),
                });
            }
            if self.contains(plural) {
                return Err(GraphError::invalid_argument(
                    singular,
                    format!("cannot be combined with {plural}"),
                ));
            }

            let value = match self.take(singular) {
                Some(ArgValue::Entity(id)) => ArgValue::Entities(vec![id]),
                Some(other) => other,
                None => continue,
            };
            if policy == SingularArguments::Warn {
                log::warn!(
                    "argument `{}` is deprecated and will be removed in {}, use `{}`",
                    singular,
                    SINGULAR_ARGUMENTS_REMOVED_IN,
                    plural
                );
            }
            self.values.insert(plural.to_string(), value);
        }
        Ok(())
    }
}

fn json_id(name: &str, value: &Value) -> Result<EntityId> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .map(EntityId)
        .ok_or_else(|| GraphError::invalid_argument(name, "expected an entity id"))
}

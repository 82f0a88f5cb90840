// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Settings for a model session

use crate::args::SingularArguments;
use ifc_lite_model::{GraphError, Result, SchemaVersion};
use ifc_lite_store::EntityGraph;
use serde::{Deserialize, Serialize};

/// Session settings
///
/// Deserializable from JSON; missing fields take their defaults.
///
/// ```ignore
/// let settings = Settings::from_json(r#"{ "schema": "IFC2X3", "singular_arguments": "reject" }"#)?;
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Schema release of new graphs
    pub schema: SchemaVersion,
    /// Treatment of deprecated singular argument names
    pub singular_arguments: SingularArguments,
}

impl Settings {
    /// Create settings with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| GraphError::Settings(e.to_string()))
    }

    /// Set the schema release
    pub fn with_schema(mut self, schema: SchemaVersion) -> Self {
        self.schema = schema;
        self
    }

    /// Set the singular-argument policy
    pub fn with_singular_arguments(mut self, policy: SingularArguments) -> Self {
        self.singular_arguments = policy;
        self
    }

    /// Create an empty graph for the configured schema
    pub fn new_graph(&self) -> EntityGraph {
        EntityGraph::new(self.schema)
    }
}

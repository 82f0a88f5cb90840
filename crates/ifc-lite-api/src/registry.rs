// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operation Registry - Dynamic dispatch by `"domain.verb_noun"` key
//!
//! Scripts and tooling invoke usecases through a stable string key and a map
//! of named arguments, without depending on the module layout of this crate.

use crate::{Arguments, Settings};
use ifc_lite_model::{EntityId, GraphError, Result};
use ifc_lite_store::EntityGraph;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Operation trait
///
/// Each operation wraps one usecase. Arguments arrive already normalized, so
/// only plural argument names are ever seen here.
pub trait Operation: Send + Sync {
    /// Stable invocation key (e.g. `"aggregate.assign_object"`)
    fn key(&self) -> &'static str;

    /// Run the usecase against the graph
    ///
    /// # Returns
    /// The created or updated entity, or `None` for operations that only
    /// remove or detach.
    fn execute(&self, graph: &mut EntityGraph, args: &Arguments) -> Result<Option<EntityId>>;
}

/// Declare a unit struct implementing [`Operation`].
macro_rules! operation {
    ($(#[$meta:meta])* $name:ident, $key:literal, |$graph:ident, $args:ident| $body:expr) => {
        $(#[$meta])*
        pub struct $name;

        impl $crate::registry::Operation for $name {
            fn key(&self) -> &'static str {
                $key
            }

            fn execute(
                &self,
                $graph: &mut ::ifc_lite_store::EntityGraph,
                $args: &$crate::args::Arguments,
            ) -> ::ifc_lite_model::Result<Option<::ifc_lite_model::EntityId>> {
                $body
            }
        }
    };
}

pub(crate) use operation;

/// Operation registry - routes keys to operations
pub struct Registry {
    /// Registered operations by key
    operations: FxHashMap<&'static str, Arc<dyn Operation>>,
    settings: Settings,
}

impl Registry {
    /// Create a registry without any operations registered
    pub fn new(settings: Settings) -> Self {
        Self {
            operations: FxHashMap::default(),
            settings,
        }
    }

    /// Create a registry with every relationship usecase registered
    pub fn with_default_operations(settings: Settings) -> Self {
        let mut registry = Self::new(settings);
        crate::usecases::register_all(&mut registry);
        registry
    }

    /// Register an operation, replacing any previous one with the same key
    pub fn register(&mut self, operation: Arc<dyn Operation>) {
        let key = operation.key();
        if self.operations.insert(key, operation).is_some() {
            log::debug!("replaced operation {}", key);
        }
    }

    /// Whether an operation is registered under `key`
    pub fn has_operation(&self, key: &str) -> bool {
        self.operations.contains_key(key)
    }

    /// Registered keys, sorted
    pub fn keys(&self) -> Vec<&'static str> {
        let mut keys: Vec<_> = self.operations.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    /// Settings the registry was created with
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Normalize the arguments and run the operation registered under `key`
    pub fn run(
        &self,
        key: &str,
        graph: &mut EntityGraph,
        mut args: Arguments,
    ) -> Result<Option<EntityId>> {
        let operation = self
            .operations
            .get(key)
            .ok_or_else(|| GraphError::UnknownOperation(key.to_string()))?;
        args.normalize(self.settings.singular_arguments)?;

        log::debug!("running {}", key);
        let result = operation.execute(graph, &args);
        if let Err(e) = &result {
            log::debug!("{} failed: {}", key, e);
        }
        result
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_default_operations(Settings::default())
    }
}

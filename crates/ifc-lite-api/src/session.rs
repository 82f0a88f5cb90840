// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared model session
//!
//! The graph itself is single-threaded. A session puts it behind a
//! read/write lock so several threads can use one model; each operation
//! holds the write lock until it has finished.

use crate::{Arguments, Registry, Settings};
use ifc_lite_model::{EntityId, Result};
use ifc_lite_store::EntityGraph;
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::sync::Arc;

/// A loaded model plus the registry used to change it
#[derive(Clone)]
pub struct Session {
    graph: Arc<RwLock<EntityGraph>>,
    registry: Arc<Registry>,
}

impl Session {
    /// Start a session on an empty graph for the configured schema
    pub fn new(settings: Settings) -> Self {
        let graph = settings.new_graph();
        Self::with_graph(graph, Registry::with_default_operations(settings))
    }

    /// Start a session on an existing graph
    pub fn with_graph(graph: EntityGraph, registry: Registry) -> Self {
        Self {
            graph: Arc::new(RwLock::new(graph)),
            registry: Arc::new(registry),
        }
    }

    /// Run an operation under the write lock
    pub fn run(&self, key: &str, args: Arguments) -> Result<Option<EntityId>> {
        let mut graph = self.graph.write();
        self.registry.run(key, &mut graph, args)
    }

    /// Shared access for queries
    pub fn read(&self) -> RwLockReadGuard<'_, EntityGraph> {
        self.graph.read()
    }

    /// Exclusive access for direct usecase calls
    pub fn write(&self) -> RwLockWriteGuard<'_, EntityGraph> {
        self.graph.write()
    }

    /// Operations this session dispatches to
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

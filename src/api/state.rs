//! Application state for the overwork tracker API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::ConfigLoader;
use crate::store::InMemoryStore;

/// Shared application state.
///
/// Holds the loaded configuration and the record store. Handlers that
/// compute reports hold a read lock for the whole evaluation, so every
/// calculation sees one consistent snapshot of the store.
#[derive(Clone)]
pub struct AppState {
    /// The loaded tracker configuration.
    config: Arc<ConfigLoader>,
    /// Issues and work sessions.
    store: Arc<RwLock<InMemoryStore>>,
}

impl AppState {
    /// Creates a new application state with an empty store.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_store(config, InMemoryStore::new())
    }

    /// Creates a new application state around an existing store.
    pub fn with_store(config: ConfigLoader, store: InMemoryStore) -> Self {
        Self {
            config: Arc::new(config),
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the shared store.
    pub fn store(&self) -> &RwLock<InMemoryStore> {
        &self.store
    }
}

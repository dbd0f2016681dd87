//! Application state for the web layer.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::store::{DocumentStore, StoreError};

/// Shared application state.
///
/// Holds the store handle constructed at startup. The store is absent
/// when no database was configured or the connection failed; handlers
/// that need it then fail with [`StoreError::Unavailable`].
pub struct AppState<S> {
    /// Document store, if connected
    pub store: Option<Arc<S>>,

    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl<S: DocumentStore> AppState<S> {
    /// Create a new app state with a connected store.
    pub fn new(store: S, config: ServerConfig) -> Self {
        Self {
            store: Some(Arc::new(store)),
            config: Arc::new(config),
        }
    }

    /// Create an app state with no store.
    pub fn disconnected(config: ServerConfig) -> Self {
        Self {
            store: None,
            config: Arc::new(config),
        }
    }

    /// The store, or an error if none is connected.
    pub fn store(&self) -> Result<&S, StoreError> {
        self.store.as_deref().ok_or(StoreError::Unavailable)
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}

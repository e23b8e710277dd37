//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! only carries the immutable server config; every request builds its own
//! random source and buffers, so nothing here needs a lock.

use std::sync::Arc;

use crate::config::ServerConfig;

/// Clone is required by Axum; the config sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self { config: Arc::new(config) }
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;

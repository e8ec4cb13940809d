//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::render::{BadgeRenderer, RenderError};
use crate::services::IdentityGate;
use crate::store::ProjectStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// project store, the badge renderer and the token gate.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: ProjectStore,
    renderer: BadgeRenderer,
    identity: IdentityGate,
}

impl AppState {
    /// Create a new application state with an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if the renderer's HTTP client cannot be built.
    pub fn new(config: ServerConfig) -> Result<Self, RenderError> {
        let store = ProjectStore::new(config.product_name);
        let renderer = BadgeRenderer::new(config.fetch_timeout)?;
        let identity = IdentityGate::new(config.token_ttl);

        Ok(Self {
            inner: Arc::new(AppStateInner {
                store,
                renderer,
                identity,
            }),
        })
    }

    /// Get a reference to the project store.
    #[must_use]
    pub fn store(&self) -> &ProjectStore {
        &self.inner.store
    }

    /// Get a reference to the badge renderer.
    #[must_use]
    pub fn renderer(&self) -> &BadgeRenderer {
        &self.inner.renderer
    }

    /// Get a reference to the token gate.
    #[must_use]
    pub fn identity(&self) -> &IdentityGate {
        &self.inner.identity
    }
}

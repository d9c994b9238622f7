//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor and
//! holds only the long-lived auth provider. Everything request-specific
//! lives in the `AuthClient` built per request by `routes::auth`.

use std::sync::Arc;

use crate::provider::AuthProvider;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; the provider is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn AuthProvider>,
}

impl AppState {
    #[must_use]
    pub fn new(provider: Arc<dyn AuthProvider>) -> Self {
        Self { provider }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

//! Hosted auth provider adapter.
//!
//! DESIGN
//! ======
//! The signup action depends on the narrow [`AuthProvider`] trait rather than
//! a concrete HTTP client. [`GoTrueClient`] is the production implementation;
//! tests substitute a mock. An [`AuthClient`] pairs the shared provider with
//! the [`RequestScope`] of one inbound request and is discarded with it.

pub mod gotrue;
pub mod types;

use std::sync::Arc;

pub use gotrue::GoTrueClient;
pub use types::{Credentials, ProviderError, RequestScope, SignUpReceipt};

/// Narrow contract the signup action needs from the auth provider.
#[async_trait::async_trait]
pub trait AuthProvider: Send + Sync {
    /// Register a new account with the given credentials.
    async fn sign_up(&self, scope: &RequestScope, credentials: &Credentials) -> Result<SignUpReceipt, ProviderError>;
}

/// Request-scoped handle to the auth provider.
///
/// Built per request by the route layer (see `routes::auth`) and passed
/// explicitly into the signup action.
pub struct AuthClient {
    provider: Arc<dyn AuthProvider>,
    scope: RequestScope,
}

impl AuthClient {
    #[must_use]
    pub fn new(provider: Arc<dyn AuthProvider>, scope: RequestScope) -> Self {
        Self { provider, scope }
    }

    /// Forward a signup to the provider on behalf of this request.
    ///
    /// # Errors
    ///
    /// Returns whatever the provider reports; see [`ProviderError`].
    pub async fn sign_up(&self, credentials: &Credentials) -> Result<SignUpReceipt, ProviderError> {
        self.provider.sign_up(&self.scope, credentials).await
    }
}

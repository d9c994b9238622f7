//! Signup action: forward submitted credentials to the auth provider.
//!
//! The action never performs navigation itself. It returns a
//! [`SignupOutcome`] and the route layer turns `Redirect` into a `303` and
//! `Failure` into a re-rendered form or an `{"error": ...}` body.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::provider::{AuthClient, Credentials, ProviderError};

/// Where a successful signup lands.
pub const ONBOARDING_PATH: &str = "/onboarding";

/// Raw signup form fields. Absent fields stay `None` and are forwarded as-is.
#[derive(Default, Deserialize)]
pub struct SignupForm {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for SignupForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupForm")
            .field("email", &self.email.as_ref().map(|_| "[REDACTED]"))
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Provider-reported failure, shaped as the `{"error": "..."}` body callers render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupFailure {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupOutcome {
    /// Account accepted; navigate to this path.
    Redirect(String),
    /// Provider refused; show this message and stay on the form.
    Failure(SignupFailure),
}

/// Forward `form` to the provider once and map its answer to an outcome.
///
/// Provider rejections are recovered into [`SignupOutcome::Failure`] with the
/// provider's message verbatim. Nothing is retried.
///
/// # Errors
///
/// Returns the provider error when the call itself did not complete.
pub async fn sign_up(client: &AuthClient, form: SignupForm) -> Result<SignupOutcome, ProviderError> {
    let credentials = Credentials::new(form.email, form.password);

    match client.sign_up(&credentials).await {
        Ok(receipt) => {
            tracing::info!(
                user_id = receipt.user_id.as_deref().unwrap_or("-"),
                confirmation_pending = receipt.confirmation_pending,
                "signup accepted"
            );
            Ok(SignupOutcome::Redirect(ONBOARDING_PATH.to_owned()))
        }
        Err(ProviderError::Rejected { status, code, message }) => {
            tracing::info!(status, code = code.as_deref().unwrap_or("-"), "signup rejected by provider");
            Ok(SignupOutcome::Failure(SignupFailure { error: message }))
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
#[path = "signup_test.rs"]
mod tests;

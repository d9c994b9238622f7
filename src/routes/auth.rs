//! Auth routes: signup form, signup action, onboarding landing.

use std::convert::Infallible;

use axum::Form;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{Html, IntoResponse, Json, Redirect, Response};

use crate::pages;
use crate::provider::{AuthClient, ProviderError, RequestScope};
use crate::services::signup::{self, SignupForm, SignupOutcome};
use crate::state::AppState;

const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

// =============================================================================
// REQUEST-SCOPED PROVIDER HANDLE
// =============================================================================

/// Binds the shared provider to the caller's address.
/// Use as a handler parameter to get a handle for this request only.
impl<S> FromRequestParts<S> for AuthClient
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let forwarded_for = parts
            .headers
            .get(FORWARDED_FOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_owned);

        let app_state = AppState::from_ref(state);
        Ok(Self::new(app_state.provider, RequestScope { forwarded_for }))
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `GET /signup`: render the empty signup form.
pub async fn signup_page() -> Html<String> {
    Html(pages::render_signup(None, None))
}

/// `POST /signup`: run the signup action; redirect or re-render with the error.
pub async fn signup_submit(client: AuthClient, Form(form): Form<SignupForm>) -> Response {
    let email = form.email.clone();
    match signup::sign_up(&client, form).await {
        Ok(SignupOutcome::Redirect(path)) => Redirect::to(&path).into_response(),
        Ok(SignupOutcome::Failure(failure)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Html(pages::render_signup(Some(failure.error), email)),
        )
            .into_response(),
        Err(e) => provider_unavailable(&e),
    }
}

/// `POST /api/auth/signup`: run the signup action; redirect or `{"error": ...}`.
pub async fn signup_api(client: AuthClient, Form(form): Form<SignupForm>) -> Response {
    match signup::sign_up(&client, form).await {
        Ok(SignupOutcome::Redirect(path)) => Redirect::to(&path).into_response(),
        Ok(SignupOutcome::Failure(failure)) => (StatusCode::UNPROCESSABLE_ENTITY, Json(failure)).into_response(),
        Err(e) => provider_unavailable(&e),
    }
}

/// `GET /onboarding`: post-signup landing page.
pub async fn onboarding_page() -> Html<String> {
    Html(pages::render_onboarding())
}

fn provider_unavailable(e: &ProviderError) -> Response {
    tracing::error!(error = %e, "signup provider call failed");
    (StatusCode::BAD_GATEWAY, "Authentication service unavailable").into_response()
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the auth section's pages and form actions under a single
//! Axum router. Pages are rendered on the server; the stylesheet they link is
//! served from the binary.

pub mod auth;

use axum::Router;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Redirect};
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::pages::layout::{AUTH_STYLESHEET, AUTH_STYLESHEET_PATH};
use crate::pages::signup::SIGNUP_PATH;
use crate::services::signup::ONBOARDING_PATH;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(redirect_root_to_signup))
        .route(SIGNUP_PATH, get(auth::signup_page).post(auth::signup_submit))
        .route("/api/auth/signup", post(auth::signup_api))
        .route(ONBOARDING_PATH, get(auth::onboarding_page))
        .route(AUTH_STYLESHEET_PATH, get(stylesheet))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn redirect_root_to_signup() -> Redirect {
    Redirect::to(SIGNUP_PATH)
}

async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], AUTH_STYLESHEET)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

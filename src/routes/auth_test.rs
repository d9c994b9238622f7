use super::*;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, header};
use secrecy::SecretString;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use crate::config::{AuthConfig, AuthTimeouts};
use crate::provider::{GoTrueClient, SignUpReceipt};
use crate::routes::app;
use crate::state::test_helpers::{MockProvider, RecordedSignUp, test_app_state};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, FORM_CONTENT_TYPE)
        .body(Body::from(body.to_owned()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_string(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

// =============================================================================
// AuthClient extractor
// =============================================================================

async fn extract_scope(request: Request<()>) -> RecordedSignUp {
    let provider = MockProvider::accepting();
    let state = test_app_state(provider.clone());
    let (mut parts, ()) = request.into_parts();
    let client = AuthClient::from_request_parts(&mut parts, &state).await.unwrap();

    client
        .sign_up(&crate::provider::Credentials::new(None, None))
        .await
        .unwrap();
    provider.calls().remove(0)
}

#[tokio::test]
async fn extractor_binds_forwarded_for() {
    let request = Request::builder()
        .header("x-forwarded-for", " 203.0.113.7, 10.0.0.1 ")
        .body(())
        .unwrap();

    let call = extract_scope(request).await;
    assert_eq!(call.forwarded_for.as_deref(), Some("203.0.113.7, 10.0.0.1"));
}

#[tokio::test]
async fn extractor_without_forwarded_for_leaves_scope_empty() {
    let request = Request::builder()
        .header("x-forwarded-for", "   ")
        .body(())
        .unwrap();

    let call = extract_scope(request).await;
    assert_eq!(call.forwarded_for, None);
}

// =============================================================================
// POST /signup
// =============================================================================

#[tokio::test]
async fn signup_accepted_redirects_to_onboarding() {
    let provider = MockProvider::accepting();
    let response = app(test_app_state(provider.clone()))
        .oneshot(post_form("/signup", "email=a%40b.com&password=Secret123%21"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/onboarding"));

    let calls = provider.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].email.as_deref(), Some("a@b.com"));
    assert_eq!(calls[0].password.as_deref(), Some("Secret123!"));
}

#[tokio::test]
async fn signup_rejected_rerenders_form_with_message() {
    let provider = MockProvider::rejecting("Password too short");
    let response = app(test_app_state(provider))
        .oneshot(post_form("/signup", "email=a%40b.com&password=x"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(location(&response), None);
    let html = body_string(response).await;
    assert!(html.contains("Password too short"), "{html}");
    assert!(html.contains(r#"value="a@b.com""#), "{html}");
    assert!(!html.contains("value=\"x\""), "password must not be echoed: {html}");
}

#[tokio::test]
async fn signup_missing_password_surfaces_provider_answer() {
    let provider = MockProvider::rejecting("Signup requires a valid password");
    let response = app(test_app_state(provider.clone()))
        .oneshot(post_form("/signup", "email=a%40b.com"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(provider.calls()[0].password, None);
    let html = body_string(response).await;
    assert!(html.contains("Signup requires a valid password"), "{html}");
}

#[tokio::test]
async fn signup_transport_failure_is_bad_gateway() {
    let provider = MockProvider::with_reply(Err(ProviderError::Request("timed out".into())));
    let response = app(test_app_state(provider))
        .oneshot(post_form("/signup", "email=a%40b.com&password=Secret123%21"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(location(&response), None);
}

// =============================================================================
// POST /api/auth/signup
// =============================================================================

#[tokio::test]
async fn api_signup_rejected_returns_error_object() {
    let provider = MockProvider::rejecting("User already registered");
    let response = app(test_app_state(provider))
        .oneshot(post_form("/api/auth/signup", "email=a%40b.com&password=Secret123%21"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(location(&response), None);
    let body: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body, serde_json::json!({ "error": "User already registered" }));
}

#[tokio::test]
async fn api_signup_accepted_redirects_without_body_error() {
    let provider = MockProvider::with_reply(Ok(SignUpReceipt::default()));
    let response = app(test_app_state(provider))
        .oneshot(post_form("/api/auth/signup", "email=a%40b.com&password=Secret123%21"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/onboarding"));
    assert!(!body_string(response).await.contains("error"));
}

// =============================================================================
// Against a GoTrue-compatible provider
// =============================================================================

type SeenAuth = Arc<Mutex<Vec<Option<String>>>>;

/// App wired to a real `GoTrueClient` that talks to a local provider stand-in
/// answering every signup with `status` and `reply`.
async fn app_with_provider(status: StatusCode, reply: &'static str) -> (axum::Router, SeenAuth) {
    let seen: SeenAuth = Arc::new(Mutex::new(Vec::new()));
    let recorded = seen.clone();
    let provider = axum::Router::new().route(
        "/signup",
        axum::routing::post(move |headers: HeaderMap| {
            let recorded = recorded.clone();
            async move {
                let auth = headers
                    .get(header::AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_owned);
                recorded.lock().unwrap().push(auth);
                (status, reply)
            }
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, provider).await.unwrap();
    });

    let client = GoTrueClient::new(&AuthConfig {
        url: format!("http://{addr}"),
        anon_key: SecretString::from("anon-key".to_owned()),
        email_redirect_url: None,
        timeouts: AuthTimeouts { request_secs: 5, connect_secs: 2 },
    })
    .unwrap();
    (app(AppState::new(Arc::new(client))), seen)
}

#[tokio::test]
async fn signup_accepted_with_unreadable_receipt_still_redirects() {
    let (app, seen) = app_with_provider(StatusCode::OK, "OK").await;
    let response = app
        .oneshot(post_form("/signup", "email=a%40b.com&password=Secret123%21"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/onboarding"));
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn signup_ignores_session_cookie_and_uses_anon_key() {
    let (app, seen) = app_with_provider(StatusCode::OK, r#"{"id":"u-1"}"#).await;
    let mut request = post_form("/api/auth/signup", "email=a%40b.com&password=Secret123%21");
    request
        .headers_mut()
        .insert(header::COOKIE, "sb-access-token=stale-token".parse().unwrap());

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(seen.lock().unwrap().as_slice(), [Some("Bearer anon-key".to_owned())]);
}

// =============================================================================
// Pages and static routes
// =============================================================================

#[tokio::test]
async fn signup_page_renders_form() {
    let response = app(test_app_state(MockProvider::accepting()))
        .oneshot(get("/signup"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(r#"action="/signup""#), "{html}");
}

#[tokio::test]
async fn root_redirects_to_signup() {
    let response = app(test_app_state(MockProvider::accepting()))
        .oneshot(get("/"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), Some("/signup"));
}

#[tokio::test]
async fn onboarding_page_renders() {
    let response = app(test_app_state(MockProvider::accepting()))
        .oneshot(get("/onboarding"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Welcome aboard"));
}

#[tokio::test]
async fn stylesheet_is_served_as_css() {
    let response = app(test_app_state(MockProvider::accepting()))
        .oneshot(get("/assets/auth.css"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("text/css; charset=utf-8")
    );
    assert!(body_string(response).await.contains(".auth-layout"));
}

#[tokio::test]
async fn healthz_is_ok() {
    let provider: Arc<MockProvider> = MockProvider::accepting();
    let response = app(test_app_state(provider.clone()))
        .oneshot(get("/healthz"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(provider.calls().is_empty());
}

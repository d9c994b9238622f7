//! GoTrue-compatible auth API client.
//!
//! Thin HTTP wrapper for `POST {base}/signup`. Pure parsing in
//! `parse_receipt` and `rejection` for testability.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use super::AuthProvider;
use super::types::{Credentials, ProviderError, RequestScope, SignUpReceipt};
use crate::config::AuthConfig;

const SIGNUP_PATH: &str = "/signup";

/// Body fields checked, in order, for a human-readable rejection message.
const MESSAGE_FIELDS: [&str; 4] = ["msg", "message", "error_description", "error"];

/// Largest provider response body read into memory; the rest is dropped.
const MAX_BODY_BYTES: usize = 64 * 1024;

// =============================================================================
// CLIENT
// =============================================================================

pub struct GoTrueClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: SecretString,
    email_redirect_url: Option<String>,
}

impl GoTrueClient {
    /// Build a client with one pooled HTTP connection set for the process.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &AuthConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| ProviderError::HttpClientBuild(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.url.clone(),
            anon_key: config.anon_key.clone(),
            email_redirect_url: config.email_redirect_url.clone(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl AuthProvider for GoTrueClient {
    async fn sign_up(&self, scope: &RequestScope, credentials: &Credentials) -> Result<SignUpReceipt, ProviderError> {
        let body = SignUpRequest {
            email: credentials.email.as_deref(),
            password: credentials.password.as_ref().map(|p| p.expose_secret()),
        };
        let mut request = self
            .http
            .post(format!("{}{SIGNUP_PATH}", self.base_url))
            .header("apikey", self.anon_key.expose_secret())
            .bearer_auth(self.anon_key.expose_secret())
            .json(&body);
        if let Some(redirect_to) = &self.email_redirect_url {
            request = request.query(&[("redirect_to", redirect_to)]);
        }
        if let Some(forwarded_for) = &scope.forwarded_for {
            request = request.header("x-forwarded-for", forwarded_for);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        let status = response.status();
        let text = read_body(response).await?;

        if !status.is_success() {
            return Err(rejection(status.as_u16(), &text));
        }

        // The account exists once the provider says 2xx; the receipt only feeds logs.
        Ok(parse_receipt(&text).unwrap_or_else(|e| {
            tracing::warn!(error = %e, status = status.as_u16(), "unreadable signup receipt");
            SignUpReceipt::default()
        }))
    }
}

/// Read at most `MAX_BODY_BYTES` of the response body.
async fn read_body(mut response: reqwest::Response) -> Result<String, ProviderError> {
    let mut buf = Vec::new();
    while let Some(chunk) = response
        .chunk()
        .await
        .map_err(|e| ProviderError::Request(e.to_string()))?
    {
        let take = chunk.len().min(MAX_BODY_BYTES - buf.len());
        buf.extend_from_slice(&chunk[..take]);
        if buf.len() >= MAX_BODY_BYTES {
            tracing::warn!(limit = MAX_BODY_BYTES, "auth provider response body truncated");
            break;
        }
    }
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
struct SignUpRequest<'a> {
    email: Option<&'a str>,
    password: Option<&'a str>,
}

/// Either a bare user object (confirmation pending) or a session wrapping one.
#[derive(serde::Deserialize)]
struct SignUpResponse {
    id: Option<String>,
    access_token: Option<serde::de::IgnoredAny>,
    user: Option<UserBody>,
}

#[derive(serde::Deserialize)]
struct UserBody {
    id: Option<String>,
}

// =============================================================================
// PARSING
// =============================================================================

fn parse_receipt(body: &str) -> Result<SignUpReceipt, ProviderError> {
    if body.trim().is_empty() {
        return Ok(SignUpReceipt::default());
    }
    let api: SignUpResponse = serde_json::from_str(body).map_err(|e| ProviderError::Parse(e.to_string()))?;

    Ok(SignUpReceipt {
        user_id: api.id.or_else(|| api.user.and_then(|u| u.id)),
        confirmation_pending: api.access_token.is_none(),
    })
}

fn rejection(status: u16, body: &str) -> ProviderError {
    let json: Value = serde_json::from_str(body).unwrap_or_default();

    let message = MESSAGE_FIELDS
        .iter()
        .find_map(|name| str_field(&json, name))
        .map_or_else(|| format!("auth provider returned status {status}"), str::to_owned);
    let code = str_field(&json, "error_code").map(str::to_owned);

    ProviderError::Rejected { status, code, message }
}

fn str_field<'a>(json: &'a Value, name: &str) -> Option<&'a str> {
    json.get(name)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
#[path = "gotrue_test.rs"]
mod tests;

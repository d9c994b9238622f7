//! Provider-neutral types shared by the signup action and provider clients.

use secrecy::SecretString;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by auth provider operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// The provider answered and refused the request (duplicate account,
    /// weak password, malformed email, outage surfaced as a status code).
    #[error("{message}")]
    Rejected { status: u16, code: Option<String>, message: String },

    /// The HTTP request never produced a response.
    #[error("auth provider request failed: {0}")]
    Request(String),

    /// A success response body could not be decoded.
    #[error("auth provider response parse failed: {0}")]
    Parse(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

// =============================================================================
// CREDENTIALS
// =============================================================================

/// Email and password for a single signup request.
///
/// Either field may be absent when the submitted form omitted it; absent
/// values are forwarded as-is and left to the provider to reject.
#[derive(Debug)]
pub struct Credentials {
    pub email: Option<String>,
    pub password: Option<SecretString>,
}

impl Credentials {
    #[must_use]
    pub fn new(email: Option<String>, password: Option<String>) -> Self {
        Self { email, password: password.map(SecretString::from) }
    }
}

// =============================================================================
// REQUEST SCOPE
// =============================================================================

/// Inbound request the provider call is made on behalf of.
///
/// Signup always authenticates upstream with the project key, so no caller
/// session material is carried here.
#[derive(Debug, Default)]
pub struct RequestScope {
    /// Client address chain, forwarded so the provider sees the real caller.
    pub forwarded_for: Option<String>,
}

// =============================================================================
// RECEIPT
// =============================================================================

/// What the provider reported for an accepted signup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpReceipt {
    pub user_id: Option<String>,
    /// Set when the provider emailed a confirmation link instead of
    /// confirming the account immediately.
    pub confirmation_pending: bool,
}

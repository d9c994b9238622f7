//! Service configuration parsed from environment variables.

use secrecy::SecretString;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_AUTH_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_AUTH_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env var {var}")]
    Missing { var: &'static str },
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// Connection settings for the hosted auth provider.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Base URL of the GoTrue API, without a trailing slash.
    pub url: String,
    pub anon_key: SecretString,
    /// Forwarded as `redirect_to` so confirmation emails land back on the app.
    pub email_redirect_url: Option<String>,
    pub timeouts: AuthTimeouts,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `AUTH_URL`: base URL of the auth API (e.g. `https://project.example.co/auth/v1`)
    /// - `AUTH_ANON_KEY`: public API key sent with every provider request
    ///
    /// Optional:
    /// - `AUTH_EMAIL_REDIRECT_URL`: where confirmation emails link back to
    /// - `AUTH_REQUEST_TIMEOUT_SECS`: default 30
    /// - `AUTH_CONNECT_TIMEOUT_SECS`: default 10
    /// - `PORT`: default 3000
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a numeric one
    /// does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`], reading values through `lookup`.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let url = required(&lookup, "AUTH_URL")?
            .trim_end_matches('/')
            .to_owned();
        let anon_key = SecretString::from(required(&lookup, "AUTH_ANON_KEY")?);
        let email_redirect_url = lookup("AUTH_EMAIL_REDIRECT_URL")
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty());
        let timeouts = AuthTimeouts {
            request_secs: parse_or(&lookup, "AUTH_REQUEST_TIMEOUT_SECS", DEFAULT_AUTH_REQUEST_TIMEOUT_SECS)?,
            connect_secs: parse_or(&lookup, "AUTH_CONNECT_TIMEOUT_SECS", DEFAULT_AUTH_CONNECT_TIMEOUT_SECS)?,
        };
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT)?;

        Ok(Self { port, auth: AuthConfig { url, anon_key, email_redirect_url, timeouts } })
    }
}

fn required(lookup: &impl Fn(&str) -> Option<String>, var: &'static str) -> Result<String, ConfigError> {
    lookup(var)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing { var })
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { var, value: raw }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

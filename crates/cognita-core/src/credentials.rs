//! Credential material attached to every outgoing request

use base64::{engine::general_purpose, Engine as _};
use std::fmt;

/// Authentication material for one service instance.
///
/// Either a plain API key or a username/password pair, supplied once at
/// client construction and immutable afterwards. The `Debug` impl redacts
/// secret material so credentials never reach logs in plaintext.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// API key, sent as `Authorization: Bearer <key>`.
    ApiKey(String),
    /// Username/password pair, sent as `Authorization: Basic <base64>`.
    Basic { username: String, password: String },
}

impl Credentials {
    /// Credentials from a plain API key.
    pub fn api_key(key: impl Into<String>) -> Self {
        Credentials::ApiKey(key.into())
    }

    /// Credentials from a username/password pair.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials::Basic { username: username.into(), password: password.into() }
    }

    /// Value of the `Authorization` header for this credential form.
    pub(crate) fn authorization_header(&self) -> String {
        match self {
            Credentials::ApiKey(key) => format!("Bearer {}", key),
            Credentials::Basic { username, password } => {
                let raw = format!("{}:{}", username, password);
                format!("Basic {}", general_purpose::STANDARD.encode(raw))
            }
        }
    }

    /// Checks that secret material is present, for construction-time
    /// validation.
    pub(crate) fn validate(&self) -> Result<(), String> {
        match self {
            Credentials::ApiKey(key) if key.is_empty() => {
                Err("api key must not be empty".to_string())
            }
            Credentials::Basic { username, .. } if username.is_empty() => {
                Err("username must not be empty".to_string())
            }
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::ApiKey(_) => f.write_str("Credentials::ApiKey(***)"),
            Credentials::Basic { username, .. } => f
                .debug_struct("Credentials::Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
        }
    }
}

//! Authentication for quill
//!
//! There is exactly one credential (a shared username/password pair) and
//! exactly one privilege level. A request either carries a valid session
//! cookie — making it an [`AuthContext::Editor`] with the secret privilege —
//! or it is [`AuthContext::Anonymous`].
//!
//! The context is built once per request from the request headers and passed
//! into handlers explicitly; nothing here reads ambient state.

use crate::core::error::AppError;
use crate::core::session::SessionManager;
use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::http::HeaderMap;
use axum::http::header::COOKIE;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

/// The single configured credential pair.
///
/// The password side is either an Argon2 PHC hash (`password_hash`,
/// preferred) or a plaintext password compared in constant time
/// (`password`, development fallback). When both are set the hash wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,

    /// Plaintext password, compared in constant time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Argon2 PHC-format hash, e.g. `$argon2id$v=19$...`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
}

impl Credential {
    /// Verify a submitted username/password pair against this credential.
    ///
    /// Both sides are checked unconditionally so a wrong username does not
    /// return measurably faster than a wrong password.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let username_ok = ct_eq(self.username.as_bytes(), username.as_bytes());

        let password_ok = if let Some(hash) = &self.password_hash {
            verify_argon2(hash, password)
        } else if let Some(expected) = &self.password {
            ct_eq(expected.as_bytes(), password.as_bytes())
        } else {
            tracing::warn!("credential has neither password nor password_hash configured");
            false
        };

        username_ok & password_ok
    }
}

/// Constant-time byte comparison. Differing lengths compare unequal.
fn ct_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}

fn verify_argon2(hash: &str, password: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(err) => {
            tracing::warn!(error = %err, "configured password_hash is not a valid PHC string");
            false
        }
    }
}

/// Authorization context extracted from a request
///
/// Carried into every handler as an extractor; holds the authenticated
/// identity when the session cookie verifies.
#[derive(Debug, Clone)]
pub enum AuthContext {
    /// Authenticated editor holding the secret privilege
    Editor { username: String },

    /// No authentication (public access)
    Anonymous,
}

impl AuthContext {
    /// Build the context from request headers by verifying the session
    /// cookie, if any.
    pub fn from_headers(headers: &HeaderMap, sessions: &SessionManager) -> Self {
        for value in headers.get_all(COOKIE) {
            let Ok(raw) = value.to_str() else { continue };
            if let Some(username) = sessions.verify_cookie_header(raw) {
                return AuthContext::Editor { username };
            }
        }
        AuthContext::Anonymous
    }

    /// Check if context carries the secret privilege
    pub fn is_editor(&self) -> bool {
        matches!(self, AuthContext::Editor { .. })
    }

    /// Get the authenticated username if available
    pub fn username(&self) -> Option<&str> {
        match self {
            AuthContext::Editor { username } => Some(username),
            AuthContext::Anonymous => None,
        }
    }

    /// Require the secret privilege, failing with 403 otherwise.
    pub fn require_editor(&self) -> Result<&str, AppError> {
        self.username().ok_or_else(|| AppError::Forbidden {
            message: "secret privilege required".to_string(),
        })
    }
}

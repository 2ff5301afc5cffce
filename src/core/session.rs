//! Signed cookie sessions
//!
//! The session is entirely client-side: a cookie whose value is
//! `base64url(username) . base64url(hmac-sha256(key, username))`. The server
//! stores nothing — login issues the cookie, logout expires it, and every
//! request re-verifies the signature to recover the identity.
//!
//! Tampering with either half invalidates the MAC, so possession of a
//! verifying cookie proves it was issued by this server's key.

use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Cookie name used when the configuration does not override it.
pub const DEFAULT_COOKIE_NAME: &str = "quill_session";

/// Issues, clears, and verifies the authentication cookie.
pub struct SessionManager {
    key: Vec<u8>,
    cookie_name: String,
    max_age_secs: u64,
}

impl SessionManager {
    pub fn new(key: Vec<u8>, cookie_name: String, max_age_secs: u64) -> Self {
        Self {
            key,
            cookie_name,
            max_age_secs,
        }
    }

    /// Session-issuance headers for an authenticated identity.
    pub fn issue(&self, username: &str) -> HeaderMap {
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.cookie_name,
            self.encode(username),
            self.max_age_secs
        );
        set_cookie_headers(&cookie)
    }

    /// Session-clearing headers: expires the cookie immediately.
    pub fn clear(&self) -> HeaderMap {
        let cookie = format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
            self.cookie_name
        );
        set_cookie_headers(&cookie)
    }

    /// Verify a `Cookie` request header, returning the username iff our
    /// cookie is present and its signature checks out.
    pub fn verify_cookie_header(&self, header: &str) -> Option<String> {
        header.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            if name == self.cookie_name {
                self.verify_value(value)
            } else {
                None
            }
        })
    }

    /// Verify a raw cookie value.
    pub fn verify_value(&self, value: &str) -> Option<String> {
        let (body, tag) = value.split_once('.')?;
        let payload = URL_SAFE_NO_PAD.decode(body).ok()?;
        let tag = URL_SAFE_NO_PAD.decode(tag).ok()?;

        let mut mac = self.mac();
        mac.update(&payload);
        // verify_slice is constant-time
        mac.verify_slice(&tag).ok()?;

        String::from_utf8(payload).ok()
    }

    fn encode(&self, username: &str) -> String {
        let mut mac = self.mac();
        mac.update(username.as_bytes());
        let tag = mac.finalize().into_bytes();
        format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(username.as_bytes()),
            URL_SAFE_NO_PAD.encode(tag)
        )
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.key).expect("HMAC accepts keys of any length")
    }
}

fn set_cookie_headers(cookie: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    // Name comes from config, value is base64url: always a valid header.
    headers.insert(
        SET_COOKIE,
        HeaderValue::from_str(cookie).expect("cookie string is ASCII"),
    );
    headers
}

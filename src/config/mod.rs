//! Configuration loading and management

use crate::core::auth::Credential;
use crate::core::session::DEFAULT_COOKIE_NAME;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use rand::RngCore;
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or interpreting configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("session signing_key is not valid base64: {0}")]
    InvalidSigningKey(base64::DecodeError),
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Address the server binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Title shown in the page header
    #[serde(default = "default_site_title")]
    pub site_title: String,

    /// The single shared credential gating create/edit
    pub credential: Credential,

    /// Session cookie settings
    #[serde(default)]
    pub session: SessionConfig,

    /// Whether a failed login re-renders the form with a visible message.
    /// Off by default: the form silently re-renders.
    #[serde(default)]
    pub show_login_error: bool,
}

/// Session cookie settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Base64-encoded HMAC signing key. When absent a random key is
    /// generated at startup, so sessions do not survive restarts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_key: Option<String>,

    /// Cookie lifetime in seconds
    #[serde(default = "default_max_age")]
    pub max_age_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            signing_key: None,
            max_age_secs: default_max_age(),
        }
    }
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_site_title() -> String {
    "My Journal".to_string()
}

fn default_cookie_name() -> String {
    DEFAULT_COOKIE_NAME.to_string()
}

fn default_max_age() -> u64 {
    // Two weeks
    14 * 24 * 60 * 60
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Development defaults: local bind address, a well-known credential,
    /// and an ephemeral signing key. Override everything in production.
    pub fn default_config() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            site_title: default_site_title(),
            credential: Credential {
                username: "editor".to_string(),
                password: Some("changeme".to_string()),
                password_hash: None,
            },
            session: SessionConfig::default(),
            show_login_error: false,
        }
    }
}

impl SessionConfig {
    /// Decode the configured signing key, or generate a fresh random one.
    pub fn key_bytes(&self) -> Result<Vec<u8>, ConfigError> {
        match &self.signing_key {
            Some(encoded) => STANDARD
                .decode(encoded)
                .map_err(ConfigError::InvalidSigningKey),
            None => {
                tracing::info!(
                    "no session signing key configured, generating an ephemeral one"
                );
                let mut key = vec![0u8; 32];
                OsRng.fill_bytes(&mut key);
                Ok(key)
            }
        }
    }
}

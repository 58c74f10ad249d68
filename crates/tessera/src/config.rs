//! Client configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tessera_session::SessionConfig;

/// Endpoint root used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Environment variable read by [`ClientConfig::from_env`].
pub const API_URL_ENV: &str = "API_URL";

/// Settings for an [`AuthClient`](crate::AuthClient).
///
/// Hosts usually build this in code or deserialize it from their own
/// config file; every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Root the auth endpoints hang off (`{base_url}/auth/login`, ...).
    pub base_url: String,

    /// Per-request timeout. `None` waits for as long as the server takes.
    pub timeout: Option<Duration>,

    /// Store keys used by the session manager.
    pub session: SessionConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            session: SessionConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Defaults, with `base_url` taken from `API_URL` when it is set and
    /// non-empty.
    ///
    /// The environment is only read when this is called.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(base_url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            config.base_url = base_url;
        }
        config
    }
}

//! Gfycat integration client library.
//!
//! Provides OAuth2 client-credentials authentication, token refresh,
//! and typed access to the Gfycat REST API (single-item lookup and
//! text search).

pub mod api;
pub mod auth;
pub mod client;

use serde::{Deserialize, Serialize};

pub use api::{
    ContentUrls, ContentVariant, GfycatItem, SearchItem, SearchQuery, SearchResults, UserData,
};
pub use auth::AuthClient;
pub use client::GfycatClient;

/// Production API base URL. Override via [`ClientConfig::with_base_url`]
/// to point the client at a mock server.
pub const DEFAULT_BASE_URL: &str = "https://api.gfycat.com/v1";

/// Bearer token data returned by the token endpoint.
///
/// Every field defaults when absent from the wire. `expires_in` is the
/// delta in seconds as received; it is carried but never consulted by the
/// token-presence check (see [`GfycatClient::has_valid_token`]).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Token {
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default)]
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token_expires_in: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_owner: Option<String>,
}

/// Configuration for constructing a [`GfycatClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub client_id: String,
    pub client_secret: String,
    pub base_url: String,
}

impl ClientConfig {
    /// Create a configuration against the production API.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the API base URL (mock servers, staging).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Unified error type for the gfycat-client crate.
#[derive(Debug, thiserror::Error)]
pub enum GfycatError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("authentication failed (status {status}): {message}")]
    AuthenticationFailed { status: u16, message: String },

    #[error("authentication required: no valid access token")]
    Unauthenticated,

    #[error("not found: {0}")]
    NotFound(String),
}

//! OAuth token management for Gfycat authentication.
//!
//! Handles the two token endpoint interactions: client-credentials grant
//! (initial authentication) and token refresh. Both POST a JSON body to
//! `{base}/oauth/token`.

use serde::Serialize;

use crate::{ClientConfig, GfycatError, Token};

const TOKEN_ENDPOINT: &str = "/oauth/token";

const GRANT_TYPE_CLIENT_CREDENTIALS: &str = "client_credentials";
const GRANT_TYPE_REFRESH: &str = "refresh";

/// Request body for the token endpoint.
#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    grant_type: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh_token: Option<&'a str>,
}

/// Manages Gfycat OAuth authentication.
///
/// One attempt per call; no retry or backoff. Callers decide whether to
/// retry a failed grant.
pub struct AuthClient {
    client_id: String,
    client_secret: String,
    token_url: String,
    http: reqwest::Client,
}

impl AuthClient {
    /// Create a new auth manager from client configuration.
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            token_url: format!("{}{TOKEN_ENDPOINT}", config.base_url),
            http: reqwest::Client::new(),
        }
    }

    /// Request a bearer token with the client-credentials grant.
    pub async fn acquire_token(&self) -> Result<Token, GfycatError> {
        let body = TokenRequest {
            grant_type: GRANT_TYPE_CLIENT_CREDENTIALS,
            client_id: &self.client_id,
            client_secret: &self.client_secret,
            refresh_token: None,
        };

        let resp = self.http.post(&self.token_url).json(&body).send().await?;
        self.parse_token_response(resp).await
    }

    /// Exchange a refresh token for a new bearer token.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<Token, GfycatError> {
        tracing::info!("Refreshing Gfycat OAuth token");

        let body = TokenRequest {
            grant_type: GRANT_TYPE_REFRESH,
            client_id: &self.client_id,
            client_secret: &self.client_secret,
            refresh_token: Some(refresh_token),
        };

        let resp = self.http.post(&self.token_url).json(&body).send().await?;
        self.parse_token_response(resp).await
    }

    /// Parse the token endpoint response into a [`Token`].
    async fn parse_token_response(&self, resp: reqwest::Response) -> Result<Token, GfycatError> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Token endpoint rejected credentials");
            return Err(GfycatError::AuthenticationFailed {
                status: status.as_u16(),
                message: body,
            });
        }

        let token: Token = serde_json::from_str(&body)?;
        Ok(token)
    }
}

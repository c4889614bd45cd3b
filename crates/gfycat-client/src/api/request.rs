use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use super::*;

/// Error payload the API attaches to 404 responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default, rename = "errorMessage")]
    error_message: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Execute a GET request with the bearer token attached.
    ///
    /// 401/403 mean the server rejected the token; 404 carries an
    /// `errorMessage` payload; any other non-2xx surfaces as a transport
    /// error.
    pub(super) async fn authenticated_get(
        &self,
        url: Url,
        token: &Token,
    ) -> Result<String, GfycatError> {
        let resp = self
            .http
            .get(url.clone())
            .bearer_auth(&token.access_token)
            .send()
            .await?;

        let status = resp.status();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                tracing::warn!(%url, status = status.as_u16(), "Server rejected access token");
                Err(GfycatError::Unauthenticated)
            }
            StatusCode::NOT_FOUND => {
                let body = resp.text().await?;
                let err: ApiErrorBody = serde_json::from_str(&body)?;
                Err(GfycatError::NotFound(err.error_message))
            }
            _ => {
                let resp = resp.error_for_status()?;
                Ok(resp.text().await?)
            }
        }
    }
}

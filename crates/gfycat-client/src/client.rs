//! Owning Gfycat client: credentials, current token, and resource calls.
//!
//! The token is replaced wholesale by `authenticate`/`refresh` (both
//! `&mut self`), while resource calls read it through `&self`. Borrow
//! rules therefore serialize token replacement against in-flight reads
//! without any locking.

use crate::api::{ApiClient, GfycatItem, SearchQuery, SearchResults};
use crate::auth::AuthClient;
use crate::{ClientConfig, GfycatError, Token};

/// Client for the Gfycat REST API.
///
/// Starts unauthenticated; call [`authenticate`](Self::authenticate)
/// before any resource operation. There is no logout transition — a new
/// client starts the lifecycle over.
pub struct GfycatClient {
    auth: AuthClient,
    api: ApiClient,
    token: Option<Token>,
}

impl GfycatClient {
    /// Create an unauthenticated client from configuration.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            auth: AuthClient::new(&config),
            api: ApiClient::new(config.base_url),
            token: None,
        }
    }

    /// Authenticate with the client-credentials grant and store the
    /// resulting token. Errors from the token endpoint propagate
    /// untouched.
    pub async fn authenticate(&mut self) -> Result<(), GfycatError> {
        let token = self.auth.acquire_token().await?;
        self.token = Some(token);
        Ok(())
    }

    /// Replace the stored token using its refresh token.
    ///
    /// Fails with [`GfycatError::Unauthenticated`] when no token or no
    /// refresh token is held.
    pub async fn refresh(&mut self) -> Result<(), GfycatError> {
        let refresh = self
            .token
            .as_ref()
            .and_then(|t| t.refresh_token.as_deref())
            .filter(|r| !r.is_empty())
            .ok_or(GfycatError::Unauthenticated)?
            .to_owned();

        let token = self.auth.refresh_token(&refresh).await?;
        self.token = Some(token);
        Ok(())
    }

    /// Whether an access token is present.
    ///
    /// Presence check only: an expired-but-present token still counts as
    /// valid. Callers may rely on this.
    pub fn has_valid_token(&self) -> bool {
        self.token
            .as_ref()
            .is_some_and(|t| !t.access_token.is_empty())
    }

    /// The currently stored token, if any.
    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// Fetch a single gfycat by ID.
    pub async fn get_gfycat(&self, gfy_id: &str) -> Result<GfycatItem, GfycatError> {
        let token = self.current_token()?;
        self.api.get_gfycat(token, gfy_id).await
    }

    /// Search the gfycat library by text.
    pub async fn search(&self, search_text: &str) -> Result<SearchResults, GfycatError> {
        let token = self.current_token()?;
        self.api.search(token, &SearchQuery::new(search_text)).await
    }

    /// Search with explicit pagination parameters.
    pub async fn search_with(&self, query: &SearchQuery) -> Result<SearchResults, GfycatError> {
        let token = self.current_token()?;
        self.api.search(token, query).await
    }

    /// Token-presence precondition, checked before every authorized call.
    fn current_token(&self) -> Result<&Token, GfycatError> {
        match &self.token {
            Some(token) if !token.access_token.is_empty() => Ok(token),
            _ => Err(GfycatError::Unauthenticated),
        }
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{bearer_token, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_client(base_url: String) -> GfycatClient {
        GfycatClient::new(ClientConfig::new("client_id", "client_secret").with_base_url(base_url))
    }

    async fn mount_token_endpoint(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token_type": "bearer",
                "scope": "",
                "expires_in": 3600,
                "access_token": "access_token"
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn fresh_client_has_no_valid_token() {
        let server = MockServer::start().await;
        let client = test_client(server.uri());
        assert!(!client.has_valid_token());
        assert!(client.token().is_none());
    }

    #[tokio::test]
    async fn authenticate_stores_token() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server).await;

        let mut client = test_client(server.uri());
        client.authenticate().await.expect("should authenticate");

        assert!(client.has_valid_token());
        assert_eq!(client.token().unwrap().access_token, "access_token");
    }

    #[tokio::test]
    async fn authenticate_propagates_rejection() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let mut client = test_client(server.uri());
        let result = client.authenticate().await;

        assert!(matches!(
            result,
            Err(GfycatError::AuthenticationFailed { status: 401, .. })
        ));
        assert!(!client.has_valid_token());
    }

    #[tokio::test]
    async fn get_gfycat_without_token_makes_no_request() {
        let server = MockServer::start().await;

        let client = test_client(server.uri());
        let result = client.get_gfycat("mockID").await;

        assert!(matches!(result, Err(GfycatError::Unauthenticated)));
        let requests = server.received_requests().await.unwrap();
        assert!(requests.is_empty(), "precondition must short-circuit before I/O");
    }

    #[tokio::test]
    async fn get_gfycat_decodes_item() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server).await;

        Mock::given(method("GET"))
            .and(path("/gfycats/mockID"))
            .and(bearer_token("access_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "gfyItem": { "gfyId": "id", "likes": 0 }
            })))
            .mount(&server)
            .await;

        let mut client = test_client(server.uri());
        client.authenticate().await.unwrap();

        let item = client.get_gfycat("mockID").await.expect("should fetch");
        assert_eq!(item.gfy_id, "id");
        assert_eq!(item.likes, 0);
    }

    #[tokio::test]
    async fn get_gfycat_maps_404_to_not_found() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server).await;

        Mock::given(method("GET"))
            .and(path("/gfycats/mockID"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "errorMessage": "does not exist."
            })))
            .mount(&server)
            .await;

        let mut client = test_client(server.uri());
        client.authenticate().await.unwrap();

        match client.get_gfycat("mockID").await {
            Err(GfycatError::NotFound(message)) => {
                assert!(message.contains("does not exist."));
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_gfycat_maps_401_to_unauthenticated() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server).await;

        Mock::given(method("GET"))
            .and(path("/gfycats/mockID"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let mut client = test_client(server.uri());
        client.authenticate().await.unwrap();

        let result = client.get_gfycat("mockID").await;
        assert!(matches!(result, Err(GfycatError::Unauthenticated)));
    }

    #[tokio::test]
    async fn get_gfycat_maps_server_error_to_transport_error() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server).await;

        Mock::given(method("GET"))
            .and(path("/gfycats/mockID"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut client = test_client(server.uri());
        client.authenticate().await.unwrap();

        let result = client.get_gfycat("mockID").await;
        assert!(matches!(result, Err(GfycatError::Http(_))));
    }

    #[tokio::test]
    async fn search_returns_decoded_results() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server).await;

        Mock::given(method("GET"))
            .and(path("/gfycats/search"))
            .and(query_param("search_text", "michael scott"))
            .and(bearer_token("access_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "cursor": "cursor"
            })))
            .mount(&server)
            .await;

        let mut client = test_client(server.uri());
        client.authenticate().await.unwrap();

        let results = client.search("michael scott").await.expect("should search");
        assert_eq!(results.cursor, "cursor");
    }

    #[tokio::test]
    async fn search_without_token_fails_unauthenticated() {
        let server = MockServer::start().await;

        let client = test_client(server.uri());
        let result = client.search("michael scott").await;

        assert!(matches!(result, Err(GfycatError::Unauthenticated)));
    }

    #[tokio::test]
    async fn search_maps_403_to_unauthenticated() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server).await;

        Mock::given(method("GET"))
            .and(path("/gfycats/search"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let mut client = test_client(server.uri());
        client.authenticate().await.unwrap();

        let result = client.search("michael scott").await;
        assert!(matches!(result, Err(GfycatError::Unauthenticated)));
    }

    #[tokio::test]
    async fn search_with_sends_pagination_params() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server).await;

        Mock::given(method("GET"))
            .and(path("/gfycats/search"))
            .and(query_param("search_text", "dogs"))
            .and(query_param("count", "25"))
            .and(query_param("cursor", "page-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "cursor": "page-3",
                "found": 120
            })))
            .mount(&server)
            .await;

        let mut client = test_client(server.uri());
        client.authenticate().await.unwrap();

        let query = SearchQuery::new("dogs").with_count(25).with_cursor("page-2");
        let results = client.search_with(&query).await.expect("should search");
        assert_eq!(results.cursor, "page-3");
        assert_eq!(results.found, 120);
    }

    #[tokio::test]
    async fn refresh_without_refresh_token_fails_unauthenticated() {
        let server = MockServer::start().await;
        mount_token_endpoint(&server).await;

        let mut client = test_client(server.uri());
        client.authenticate().await.unwrap();

        // Client-credentials grant carries no refresh token
        let result = client.refresh().await;
        assert!(matches!(result, Err(GfycatError::Unauthenticated)));
    }

    #[tokio::test]
    async fn refresh_replaces_stored_token() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token_type": "bearer",
                "expires_in": 3600,
                "access_token": "first_token",
                "refresh_token": "rt_1"
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token_type": "bearer",
                "expires_in": 3600,
                "access_token": "second_token",
                "refresh_token": "rt_2"
            })))
            .mount(&server)
            .await;

        let mut client = test_client(server.uri());
        client.authenticate().await.unwrap();
        assert_eq!(client.token().unwrap().access_token, "first_token");

        client.refresh().await.expect("should refresh");
        assert_eq!(client.token().unwrap().access_token, "second_token");
        assert_eq!(client.token().unwrap().refresh_token.as_deref(), Some("rt_2"));
        assert!(client.has_valid_token());
    }
}

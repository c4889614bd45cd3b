use url::Url;

use super::models::SearchResults;
use super::{ApiClient, SEARCH_ENDPOINT};
use crate::{GfycatError, Token};

/// Query parameters accepted by the search endpoint.
///
/// `count` and `cursor` page through results; a plain text search sends
/// neither.
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub search_text: String,
    pub count: Option<u32>,
    pub cursor: Option<String>,
}

impl SearchQuery {
    pub fn new(search_text: impl Into<String>) -> Self {
        Self {
            search_text: search_text.into(),
            count: None,
            cursor: None,
        }
    }

    /// Limit the number of results per page.
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Resume from a cursor returned by a previous page.
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }
}

impl ApiClient {
    /// Search the gfycat library by text.
    pub async fn search(
        &self,
        token: &Token,
        query: &SearchQuery,
    ) -> Result<SearchResults, GfycatError> {
        let mut url = Url::parse(&format!("{}{SEARCH_ENDPOINT}", self.base_url))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("search_text", &query.search_text);
            if let Some(count) = query.count {
                pairs.append_pair("count", &count.to_string());
            }
            if let Some(cursor) = query.cursor.as_deref().filter(|c| !c.is_empty()) {
                pairs.append_pair("cursor", cursor);
            }
        }

        let body = self.authenticated_get(url, token).await?;
        let results: SearchResults = serde_json::from_str(&body)?;
        Ok(results)
    }
}

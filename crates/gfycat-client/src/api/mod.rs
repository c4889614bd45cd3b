//! Gfycat REST API client.
//!
//! Provides typed access to the item and search endpoints with
//! automatic Bearer token injection and status-code classification.

mod gfycats;
mod request;
mod search;

pub mod models;

pub use models::{
    ContentUrls, ContentVariant, GfycatItem, GfycatResponse, SearchItem, SearchResults, UserData,
};
pub use search::SearchQuery;

use crate::{GfycatError, Token};

const GFYCATS_ENDPOINT: &str = "/gfycats";
const SEARCH_ENDPOINT: &str = "/gfycats/search";

/// Gfycat API client with automatic auth header injection.
///
/// Stateless with respect to authentication: every call takes the
/// caller's current [`Token`].
pub struct ApiClient {
    pub(super) http: reqwest::Client,
    pub(super) base_url: String,
}

use url::Url;

use super::models::{GfycatItem, GfycatResponse};
use super::{ApiClient, GFYCATS_ENDPOINT};
use crate::{GfycatError, Token};

impl ApiClient {
    /// Fetch a single gfycat by ID.
    ///
    /// The response wraps the item under a `gfyItem` envelope; the inner
    /// item is returned.
    pub async fn get_gfycat(&self, token: &Token, gfy_id: &str) -> Result<GfycatItem, GfycatError> {
        let url = Url::parse(&format!("{}{GFYCATS_ENDPOINT}/{gfy_id}", self.base_url))?;
        let body = self.authenticated_get(url, token).await?;
        let resp: GfycatResponse = serde_json::from_str(&body)?;
        Ok(resp.gfy_item)
    }
}

//! Typed response models for the Gfycat REST API.
//!
//! The API is loose about numeric encodings: several fields arrive
//! sometimes as JSON numbers and sometimes as numeric strings. Those
//! fields go through the `lenient` deserializers so a stray `"640"`
//! never fails the whole decode.

use serde::{Deserialize, Serialize};

/// Envelope for GET `/gfycats/{id}`: the item sits under `gfyItem`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GfycatResponse {
    pub gfy_item: GfycatItem,
}

/// A single gfycat item: identifiers, rendition URLs, dimensions, and
/// engagement counters. Missing fields default to empty/zero.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GfycatItem {
    pub gfy_id: String,
    pub gfy_name: String,
    pub gfy_number: String,
    pub webm_url: String,
    pub gif_url: String,
    pub mobile_url: String,
    pub mobile_poster_url: String,
    pub mini_url: String,
    pub mini_poster_url: String,
    pub poster_url: String,
    pub thumb_100_poster_url: String,
    pub max_5mb_gif: String,
    pub max_2mb_gif: String,
    pub max_1mb_gif: String,
    pub gif_100px: String,
    #[serde(deserialize_with = "lenient::u64_or_string")]
    pub width: u64,
    #[serde(deserialize_with = "lenient::u64_or_string")]
    pub height: u64,
    pub avg_color: String,
    pub frame_rate: f32,
    pub num_frames: f32,
    #[serde(deserialize_with = "lenient::u64_or_string")]
    pub mp4_size: u64,
    #[serde(deserialize_with = "lenient::u64_or_string")]
    pub webm_size: u64,
    #[serde(deserialize_with = "lenient::u64_or_string")]
    pub gif_size: u64,
    #[serde(deserialize_with = "lenient::u64_or_string")]
    pub source: u64,
    #[serde(deserialize_with = "lenient::u64_or_string")]
    pub create_date: u64,
    #[serde(deserialize_with = "lenient::u64_or_string")]
    pub nsfw: u64,
    pub mp4_url: String,
    #[serde(deserialize_with = "lenient::u64_or_string")]
    pub likes: u64,
    #[serde(deserialize_with = "lenient::u64_or_string")]
    pub published: u64,
    #[serde(deserialize_with = "lenient::u64_or_string")]
    pub dislikes: u64,
    pub extra_lemmas: String,
    pub md5: String,
    #[serde(deserialize_with = "lenient::u64_or_string")]
    pub views: u64,
    pub tags: Vec<String>,
    pub user_name: String,
    pub title: String,
    pub description: String,
    pub language_text: String,
    pub language_categories: Vec<String>,
    pub subreddit: String,
    pub reddit_id: String,
    pub reddit_id_text: String,
    pub domain_whitelist: Vec<serde_json::Value>,
}

/// Response for GET `/gfycats/search`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResults {
    pub cursor: String,
    pub gfycats: Vec<SearchItem>,
    pub related: Vec<String>,
    #[serde(deserialize_with = "lenient::u64_or_string")]
    pub found: u64,
}

/// A search hit: the base item plus uploader metadata and per-variant
/// rendition URLs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchItem {
    #[serde(flatten)]
    pub item: GfycatItem,
    #[serde(rename = "userData", skip_serializing_if = "Option::is_none")]
    pub user_data: Option<UserData>,
    #[serde(rename = "content_urls", skip_serializing_if = "Option::is_none")]
    pub content_urls: Option<ContentUrls>,
}

/// Uploader metadata attached to search results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserData {
    pub name: String,
    pub profile_image_url: String,
    pub url: String,
    pub username: String,
    pub followers: u64,
    pub subscription: u64,
    pub following: u64,
    pub profile_url: String,
    pub views: u64,
    pub verified: bool,
}

/// Rendition URLs keyed by size/format variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentUrls {
    pub max_2mb_gif: Option<ContentVariant>,
    pub webp: Option<ContentVariant>,
    pub max_1mb_gif: Option<ContentVariant>,
    #[serde(rename = "100pxGif")]
    pub gif_100px: Option<ContentVariant>,
    pub mobile_poster: Option<ContentVariant>,
    pub mp4: Option<ContentVariant>,
    pub webm: Option<ContentVariant>,
    pub max_5mb_gif: Option<ContentVariant>,
    pub large_gif: Option<ContentVariant>,
    pub mobile: Option<ContentVariant>,
}

/// One rendition: URL plus byte size and pixel dimensions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentVariant {
    pub url: String,
    pub size: u64,
    pub height: u64,
    pub width: u64,
}

mod lenient {
    use serde::{Deserialize, Deserializer};

    /// Accept a JSON number or a numeric string. Null and empty strings
    /// decode to zero.
    pub(super) fn u64_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Float(f64),
            String(String),
        }

        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(0),
            Some(Raw::Number(n)) => Ok(n),
            Some(Raw::Float(f)) => Ok(f as u64),
            Some(Raw::String(s)) if s.trim().is_empty() => Ok(0),
            Some(Raw::String(s)) => s.trim().parse().map_err(serde::de::Error::custom),
        }
    }
}

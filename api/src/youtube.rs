// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Latest upload lookup through the YouTube Data API search endpoint.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::config::{ServiceConfig, YOUTUBE_BASE_URL};
use crate::error::ApiError;
use crate::http::HttpClient;

/// The newest video of a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatestVideo {
    /// Video id
    pub video_id: String,
    /// Video title
    pub title: String,
    /// Medium thumbnail URL, if the API returned one
    pub thumbnail: Option<String>,
    /// Short watch link, `https://youtu.be/{video_id}`
    pub url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    medium: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

/// YouTube Data API client.
#[derive(Debug)]
pub struct YouTubeClient {
    http: HttpClient,
    api_key: String,
}

impl YouTubeClient {
    /// Creates a client against the public API.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client initialization fails.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_config(ServiceConfig::new(YOUTUBE_BASE_URL), api_key)
    }

    /// Creates a client from a full service config.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client initialization fails.
    pub fn with_config(config: ServiceConfig, api_key: impl Into<String>) -> Result<Self, ApiError> {
        Ok(Self {
            http: HttpClient::new(config)?,
            api_key: api_key.into(),
        })
    }

    /// The most recently published video of `channel_id`, or `None` if the
    /// channel has no videos.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be decoded.
    #[tracing::instrument(skip(self))]
    pub async fn latest_video(&self, channel_id: &str) -> Result<Option<LatestVideo>, ApiError> {
        let req = self.http.build_request(Method::GET, "/search").query(&[
            ("part", "snippet"),
            ("channelId", channel_id),
            ("order", "date"),
            ("maxResults", "1"),
            ("type", "video"),
            ("key", self.api_key.as_str()),
        ]);
        let resp: SearchResponse = self.http.execute_json(req).await?;

        let Some(item) = resp.items.into_iter().next() else {
            tracing::debug!("channel has no videos");
            return Ok(None);
        };
        let video_id = item
            .id
            .video_id
            .ok_or_else(|| ApiError::InvalidResponse("search result without videoId".into()))?;

        Ok(Some(LatestVideo {
            url: format!("https://youtu.be/{video_id}"),
            video_id,
            title: item.snippet.title,
            thumbnail: item.snippet.thumbnails.medium.map(|t| t.url),
        }))
    }
}

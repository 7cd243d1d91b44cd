// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Published iCalendar feed download.

use reqwest::Method;

use crate::config::ServiceConfig;
use crate::error::ApiError;
use crate::http::HttpClient;

/// Downloads a published `.ics` feed.
#[derive(Debug)]
pub struct IcsFeedClient {
    http: HttpClient,
}

impl IcsFeedClient {
    /// Creates a client for the feed at `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client initialization fails.
    pub fn new(url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_config(ServiceConfig::new(url))
    }

    /// Creates a client from a full service config; `base_url` is the feed URL.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client initialization fails.
    pub fn with_config(config: ServiceConfig) -> Result<Self, ApiError> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    /// Fetches the raw feed text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server answers with an
    /// error status.
    #[tracing::instrument(skip(self), fields(url = %self.http.config().base_url))]
    pub async fn fetch(&self) -> Result<String, ApiError> {
        let req = self
            .http
            .build_request(Method::GET, "")
            .header(reqwest::header::ACCEPT, "text/calendar, text/plain, */*");
        let text = self.http.execute(req).await?.text().await?;
        tracing::debug!(bytes = text.len(), "downloaded calendar feed");
        Ok(text)
    }
}

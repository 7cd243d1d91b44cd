// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client wrapper with authentication and status handling.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::{AuthMethod, ServiceConfig};
use crate::error::ApiError;

/// HTTP client bound to one service.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    config: ServiceConfig,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client creation fails.
    pub fn new(config: ServiceConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, config })
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Joins a path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Builds a request for `path` with authentication headers.
    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self.client.request(method, self.url(path));

        match &self.config.auth {
            AuthMethod::Basic { username, password } => {
                req = req.basic_auth(username, Some(password));
            }
            AuthMethod::Bearer { token } => {
                req = req.bearer_auth(token);
            }
            AuthMethod::Header { name, value } => {
                req = req.header(name.as_str(), value.as_str());
            }
            AuthMethod::None => {}
        }

        req
    }

    /// Executes a request and checks for HTTP errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or returns an error status code.
    pub async fn execute(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        let resp = req.send().await?;

        match resp.status() {
            status if status.is_success() => Ok(resp),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(ApiError::Auth(format!("{} rejected the credentials", resp.url())))
            }
            status => {
                let body = resp
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unable to read response".to_string());
                Err(ApiError::Status {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }

    /// Executes a request and decodes the JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body does not decode as `T`.
    pub async fn execute_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let resp = self.execute(req).await?;
        let text = resp.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

/// Default base URL of the Planning Center API.
pub const PLANNING_CENTER_BASE_URL: &str = "https://api.planningcenteronline.com";

/// Default base URL of the YouTube Data API.
pub const YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Default base URL of the Gemini API.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Authentication method.
#[derive(Debug, Clone, Default, serde::Deserialize)]
#[serde(tag = "type")]
pub enum AuthMethod {
    /// No authentication.
    #[serde(rename = "none")]
    #[default]
    None,
    /// Basic authentication, used with Planning Center personal access tokens
    /// and Mailchimp API keys.
    #[serde(rename = "basic")]
    Basic {
        /// Username or application id.
        username: String,
        /// Password or secret.
        password: String,
    },
    /// Bearer token authentication.
    #[serde(rename = "bearer")]
    Bearer {
        /// Bearer token.
        token: String,
    },
    /// API key sent in a request header.
    #[serde(rename = "header")]
    Header {
        /// Header name.
        name: String,
        /// Key value.
        value: String,
    },
}

/// Connection settings for one external service.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct ServiceConfig {
    /// Base URL, without trailing slash.
    pub base_url: String,
    /// Authentication method.
    #[serde(default)]
    pub auth: AuthMethod,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl ServiceConfig {
    /// Creates a config for `base_url` with no authentication.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Sets the authentication method, builder style.
    #[must_use]
    pub fn with_auth(mut self, auth: AuthMethod) -> Self {
        self.auth = auth;
        self
    }

    /// Sets the timeout, builder style.
    #[must_use]
    pub const fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

const fn default_timeout() -> u64 {
    10
}

fn default_user_agent() -> String {
    concat!("wire-api/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            auth: AuthMethod::default(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

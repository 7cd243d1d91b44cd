// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Text generation through the Gemini `generateContent` endpoint.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::config::{AuthMethod, GEMINI_BASE_URL, ServiceConfig};
use crate::error::ApiError;
use crate::http::HttpClient;

/// Default model used for summaries.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

/// Gemini API client.
#[derive(Debug)]
pub struct GeminiClient {
    http: HttpClient,
    model: String,
}

impl GeminiClient {
    /// Creates a client against the public API using `model`.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client initialization fails.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, ApiError> {
        let config = ServiceConfig::new(GEMINI_BASE_URL)
            .with_auth(AuthMethod::Header {
                name: "x-goog-api-key".into(),
                value: api_key.into(),
            })
            .with_timeout(60);
        Self::with_config(config, model)
    }

    /// Creates a client from a full service config.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client initialization fails.
    pub fn with_config(config: ServiceConfig, model: impl Into<String>) -> Result<Self, ApiError> {
        Ok(Self {
            http: HttpClient::new(config)?,
            model: model.into(),
        })
    }

    /// The model requests are sent to.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generates text for a single prompt and returns it trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response carries no text.
    #[tracing::instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    pub async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };
        let req = self
            .http
            .build_request(Method::POST, &format!("/models/{}:generateContent", self.model))
            .json(&body);
        let resp: GenerateResponse = self.http.execute_json(req).await?;

        let text: String = resp
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();
        let text = text.trim();
        if text.is_empty() {
            return Err(ApiError::InvalidResponse("model returned no text".into()));
        }
        Ok(text.to_string())
    }
}

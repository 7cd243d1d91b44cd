// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

/// Errors talking to the external services.
#[non_exhaustive]
#[derive(Debug)]
pub enum ApiError {
    /// HTTP layer error.
    Http(String),

    /// The server answered with an unexpected status.
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, or a placeholder if it could not be read
        body: String,
    },

    /// Authentication was rejected.
    Auth(String),

    /// The response body could not be decoded.
    Decode(String),

    /// The response was well formed but lacked what was asked for.
    InvalidResponse(String),

    /// Configuration error.
    Config(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "HTTP error: {e}"),
            Self::Status { status, body } => write!(f, "Unexpected status {status}: {body}"),
            Self::Auth(e) => write!(f, "Authentication failed: {e}"),
            Self::Decode(e) => write!(f, "Failed to decode response: {e}"),
            Self::InvalidResponse(e) => write!(f, "Invalid server response: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

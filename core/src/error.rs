// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use wire_api::ApiError;

/// Errors produced while gathering content and assembling the newsletter.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A remote service failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Date arithmetic left the supported range.
    #[error("Date arithmetic failed: {0}")]
    Time(#[from] jiff::Error),

    /// The configured time zone is not in the time zone database.
    #[error("Unknown time zone '{name}'")]
    UnknownTimeZone {
        /// The configured name
        name: String,
    },

    /// No plan of the service type has a sort date in the past.
    #[error("No past plan found for service type {service_type_id}")]
    NoPastPlan {
        /// Service type searched
        service_type_id: String,
    },

    /// The plan has no header item titled "Message".
    #[error("No \"Message\" header found in plan {plan_id}")]
    NoMessageHeader {
        /// Plan searched
        plan_id: String,
    },

    /// The "Message" header is the last non-header item of the plan.
    #[error("No item found after the \"Message\" header in plan {plan_id}")]
    NoItemAfterHeader {
        /// Plan searched
        plan_id: String,
    },

    /// A required setting is missing.
    #[error("Missing configuration: {0}")]
    NotConfigured(&'static str),

    /// A configured path cannot be resolved.
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath {
        /// The configured path
        path: String,
        /// Why it cannot be used
        reason: &'static str,
    },

    /// Reading or writing a file failed.
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        /// The file involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
}

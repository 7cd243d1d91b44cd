// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Thin clients for the services the newsletter pulls from and publishes to:
//! a published iCalendar feed, Planning Center, YouTube, Gemini and Mailchimp.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::option_option,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool
)]

mod config;
mod error;
mod gemini;
mod http;
mod ics;
mod mailchimp;
mod planning_center;
mod youtube;

pub use crate::config::{
    AuthMethod, GEMINI_BASE_URL, PLANNING_CENTER_BASE_URL, ServiceConfig, YOUTUBE_BASE_URL,
};
pub use crate::error::ApiError;
pub use crate::gemini::{DEFAULT_GEMINI_MODEL, GeminiClient};
pub use crate::ics::IcsFeedClient;
pub use crate::mailchimp::{CampaignDraft, CreatedCampaign, MailchimpClient, datacenter};
pub use crate::planning_center::{
    Document, PlanningCenterClient, Relationship, RelationshipData, Resource, ResourceRef,
};
pub use crate::youtube::{LatestVideo, YouTubeClient};

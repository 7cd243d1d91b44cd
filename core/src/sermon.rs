// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Last week's message: the video, the outline from the service plan and a
//! short summary.

use async_trait::async_trait;
use jiff::{Timestamp, Zoned};
use wire_api::{Document, GeminiClient, LatestVideo, PlanningCenterClient, Resource, YouTubeClient};

use crate::error::CoreError;

/// Text used whenever no summary can be produced.
pub const SUMMARY_FALLBACK: &str = "Listen to this week's message on our YouTube channel, our website, or even through our Apple or Spotify Podcast channels!";

/// Title used when no video is known.
pub const DEFAULT_SERMON_TITLE: &str = "This Week's Message";

const MIN_TRANSCRIPT_CHARS: usize = 100;
const MAX_TRANSCRIPT_CHARS: usize = 12_000;
const PLANS_PER_PAGE: u32 = 25;

/// The sermon item of the most recent service plan.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MessageOutline {
    /// Plan the outline was taken from
    pub plan_id: String,
    /// Sort date of that plan, as sent by the API
    pub plan_sort_date: Option<String>,
    /// The "Message" header item
    pub header_id: String,
    /// The item following the header
    pub item_id: String,
    /// Its title
    pub item_title: String,
    /// Its description, or its HTML details when the description is empty
    pub description: String,
}

/// Fetches the most recent upload of a channel.
///
/// # Errors
///
/// Returns an error if the search request fails.
pub async fn fetch_latest_sermon(
    client: Option<&YouTubeClient>,
    channel_id: Option<&str>,
) -> Result<Option<LatestVideo>, CoreError> {
    match (client, channel_id) {
        (Some(client), Some(channel_id)) => Ok(client.latest_video(channel_id).await?),
        _ => {
            tracing::info!("no YouTube channel configured");
            Ok(None)
        }
    }
}

/// Fetches the outline of the newest plan whose sort date is not after `now`.
///
/// # Errors
///
/// Returns an error if a request fails, if no past plan exists, or if the
/// plan has no "Message" header followed by an item.
#[tracing::instrument(skip(client, now))]
pub async fn fetch_message_outline(
    client: &PlanningCenterClient,
    service_type_id: &str,
    now: &Zoned,
) -> Result<MessageOutline, CoreError> {
    let plans = client.plans(service_type_id, PLANS_PER_PAGE).await?;
    let plan = find_past_plan(&plans, now.timestamp()).ok_or_else(|| CoreError::NoPastPlan {
        service_type_id: service_type_id.to_string(),
    })?;
    tracing::debug!(plan = %plan.id, "using plan");

    let items = client.plan_items(service_type_id, &plan.id).await?;
    outline_from_items(plan, &items.data)
}

/// The first plan, in the given (newest first) order, whose sort date is at or
/// before `now`.
#[must_use]
pub fn find_past_plan(plans: &Document, now: Timestamp) -> Option<&Resource> {
    plans.data.iter().find(|plan| {
        plan.attr_str("sort_date")
            .and_then(|s| s.parse::<Timestamp>().ok())
            .is_some_and(|t| t <= now)
    })
}

/// Locates the "Message" header in position-ordered `items` and takes the
/// first non-header item after it.
///
/// # Errors
///
/// Returns [`CoreError::NoMessageHeader`] or [`CoreError::NoItemAfterHeader`].
pub fn outline_from_items(plan: &Resource, items: &[Resource]) -> Result<MessageOutline, CoreError> {
    let is_header = |item: &Resource| {
        item.attr_str("item_type")
            .is_some_and(|t| t.eq_ignore_ascii_case("header"))
    };

    let header_at = items
        .iter()
        .position(|item| {
            is_header(item)
                && item
                    .attr_str("title")
                    .is_some_and(|t| t.trim().eq_ignore_ascii_case("message"))
        })
        .ok_or_else(|| CoreError::NoMessageHeader {
            plan_id: plan.id.clone(),
        })?;

    let mut after = items.iter().skip(header_at + 1);
    let item = after
        .find(|item| !is_header(item))
        .ok_or_else(|| CoreError::NoItemAfterHeader {
            plan_id: plan.id.clone(),
        })?;
    let header_id = items.get(header_at).map(|h| h.id.clone()).unwrap_or_default();

    Ok(MessageOutline {
        plan_id: plan.id.clone(),
        plan_sort_date: plan.attr_str("sort_date").map(str::to_string),
        header_id,
        item_id: item.id.clone(),
        item_title: item.attr_str("title").unwrap_or_default().to_string(),
        description: item
            .attr_str("description")
            .or_else(|| item.attr_str("html_details"))
            .unwrap_or_default()
            .to_string(),
    })
}

/// Produces newsletter prose from a prompt.
#[async_trait]
pub trait Summarizer {
    /// Generates text for `prompt`.
    async fn summarize(&self, prompt: &str) -> Result<String, CoreError>;
}

#[async_trait]
impl Summarizer for GeminiClient {
    async fn summarize(&self, prompt: &str) -> Result<String, CoreError> {
        Ok(self.generate(prompt).await?)
    }
}

/// The prompt sent to the model; the transcript is cut to its first 12000
/// characters.
#[must_use]
pub fn summary_prompt(title: &str, transcript: &str) -> String {
    let transcript: String = transcript.chars().take(MAX_TRANSCRIPT_CHARS).collect();
    format!(
        "Summarize the sermon for a church newsletter.\n- 180-220 words, warm pastoral tone.\n\nTitle: {title}\nTranscript:\n{transcript}"
    )
}

/// Summarizes the sermon, or returns [`SUMMARY_FALLBACK`] when the transcript
/// is too short or no summarizer is available.
///
/// # Errors
///
/// Returns an error if the summarizer fails.
pub async fn summarize_sermon<S: Summarizer + Sync + ?Sized>(
    summarizer: Option<&S>,
    title: &str,
    transcript: &str,
) -> Result<String, CoreError> {
    if transcript.trim().chars().count() < MIN_TRANSCRIPT_CHARS {
        tracing::debug!("transcript too short, using fallback summary");
        return Ok(SUMMARY_FALLBACK.to_string());
    }
    let Some(summarizer) = summarizer else {
        tracing::info!("no summarizer configured, using fallback summary");
        return Ok(SUMMARY_FALLBACK.to_string());
    };
    summarizer.summarize(&summary_prompt(title, transcript)).await
}

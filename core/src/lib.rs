// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Core of the Wire newsletter: gathers calendar events, registrations, the
//! latest sermon and giving statistics, and renders them into the weekly
//! email.

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
    clippy::match_bool,
    clippy::missing_panics_doc
)]

mod calendar;
mod config;
mod dedupe;
mod error;
mod event;
mod finance;
mod newsletter;
mod registration;
mod render;
mod sermon;
mod wire;

pub use crate::calendar::{
    CalendarOptions, DEFAULT_LOCATION, IcsSource, events_from_ics, fetch_calendar_events,
    rank_events,
};
pub use crate::config::{
    APP_NAME, CalendarConfig, Config, CountScopeConfig, GeminiConfig, MailchimpConfig,
    NewsletterConfig, PlanningCenterConfig, YouTubeConfig,
};
pub use crate::dedupe::{
    DedupeOptions, dedupe_events, is_more_specific_location, merge_events, normalize_title,
};
pub use crate::error::CoreError;
pub use crate::event::CalendarEvent;
pub use crate::finance::{FinancialStats, format_usd, group_thousands};
pub use crate::newsletter::{Newsletter, NewsletterContent, assemble, fill_template, subject_for};
pub use crate::registration::{Registration, fetch_open_registrations, registrations_from_document};
pub use crate::render::{
    REGISTRATION_BLOCK_END, REGISTRATION_BLOCK_START, escape_html, format_date,
    left_align_paragraphs, render_calendar, render_registrations, render_remaining_amount,
    render_sermon, render_statistic, render_upcoming_events, sanitize,
};
pub use crate::sermon::{
    DEFAULT_SERMON_TITLE, MessageOutline, SUMMARY_FALLBACK, Summarizer, fetch_latest_sermon,
    fetch_message_outline, find_past_plan, outline_from_items, summarize_sermon, summary_prompt,
};
pub use crate::wire::Wire;

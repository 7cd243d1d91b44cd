// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! The calendar pipeline: ICS text in, a short ranked list of events out.

use async_trait::async_trait;
use jiff::Zoned;
use jiff::tz::TimeZone;
use wire_api::IcsFeedClient;
use wire_ical::{
    EventSeed, ExpandOptions, OccurrenceSource, Window, format_instant, unfold,
    vevent_blocks,
};

use crate::dedupe::{DedupeOptions, dedupe_events};
use crate::error::CoreError;
use crate::event::CalendarEvent;

/// Location used when an event does not name one.
pub const DEFAULT_LOCATION: &str = "Cana Campus";

/// Something that can hand over the text of an iCalendar feed.
#[async_trait]
pub trait IcsSource {
    /// Fetches the complete feed text.
    async fn fetch_ics(&self) -> Result<String, CoreError>;
}

#[async_trait]
impl IcsSource for IcsFeedClient {
    async fn fetch_ics(&self) -> Result<String, CoreError> {
        Ok(self.fetch().await?)
    }
}

/// How the calendar pipeline windows, expands and trims events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarOptions {
    /// Days before `now` included in the window
    pub lookback_days: i64,
    /// Days after `now` included in the window
    pub lookahead_days: i64,
    /// Location for events that have none
    pub default_location: String,
    /// Upper bound on the number of events returned
    pub max_events: usize,
    /// Near-duplicate merging
    pub dedupe: DedupeOptions,
    /// Recurrence expansion
    pub expand: ExpandOptions,
}

impl Default for CalendarOptions {
    fn default() -> Self {
        Self {
            lookback_days: 0,
            lookahead_days: 14,
            default_location: DEFAULT_LOCATION.to_string(),
            max_events: 8,
            dedupe: DedupeOptions::default(),
            expand: ExpandOptions::default(),
        }
    }
}

/// Turns every VEVENT of `text` into the events falling inside `window`.
///
/// Blocks without a SUMMARY or with an unusable DTSTART are skipped. Events of
/// weekly series get ids of the form `"{uid}#{start}"`; events of a series
/// without UID carry no id. The result is unsorted and not deduplicated.
#[must_use]
pub fn events_from_ics(
    text: &str,
    window: &Window,
    tz: &TimeZone,
    options: &CalendarOptions,
) -> Vec<CalendarEvent> {
    let unfolded = unfold(text);
    let mut events = Vec::new();

    for block in vevent_blocks(&unfolded) {
        let seed = match EventSeed::from_block(&block, tz) {
            Ok(seed) => seed,
            Err(error) => {
                tracing::debug!(%error, "skipping event");
                continue;
            }
        };

        let location = seed
            .location
            .clone()
            .unwrap_or_else(|| options.default_location.clone());
        for occurrence in seed.occurrences(window, tz, options.expand) {
            let id = match occurrence.source {
                OccurrenceSource::Seed => seed.uid.clone(),
                OccurrenceSource::Rule | OccurrenceSource::Extra => seed
                    .uid
                    .as_ref()
                    .map(|uid| format!("{uid}#{}", format_instant(&occurrence.start))),
            };
            let mut event = CalendarEvent::new(seed.title.clone(), occurrence.start, location.clone())
                .with_end(occurrence.end);
            event.id = id;
            event.url.clone_from(&seed.url);
            events.push(event);
        }
    }

    tracing::debug!(count = events.len(), "extracted calendar events");
    events
}

/// Fetches, expands, deduplicates and truncates the calendar.
///
/// With no source configured the result is empty and nothing is fetched.
///
/// # Errors
///
/// Returns an error if the feed cannot be fetched or the window cannot be
/// computed around `now`.
#[tracing::instrument(skip_all)]
pub async fn fetch_calendar_events<S: IcsSource + Sync + ?Sized>(
    source: Option<&S>,
    now: &Zoned,
    tz: &TimeZone,
    options: &CalendarOptions,
) -> Result<Vec<CalendarEvent>, CoreError> {
    let Some(source) = source else {
        tracing::info!("no calendar feed configured");
        return Ok(Vec::new());
    };

    let text = source.fetch_ics().await?;
    let now = now.with_time_zone(tz.clone());
    let window = Window::around(&now, options.lookback_days, options.lookahead_days)?;
    Ok(rank_events(events_from_ics(&text, &window, tz, options), options))
}

/// Sorts, deduplicates and truncates to `max_events`.
#[must_use]
pub fn rank_events(mut events: Vec<CalendarEvent>, options: &CalendarOptions) -> Vec<CalendarEvent> {
    events.sort_by_key(|e| e.start.timestamp());
    let mut events = dedupe_events(events, options.dedupe);
    events.truncate(options.max_events);
    events
}

// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Collapsing duplicate and near-duplicate events.
//!
//! The same real-world gathering often reaches the newsletter twice, e.g. once
//! from the church calendar and once from a registration system, with slightly
//! different titles and start times. Deduplication runs in two passes:
//!
//! 1. events sharing a non-empty `id` collapse to the first one seen;
//! 2. events whose normalized titles match and whose starts fall into the same
//!    or an adjacent time bucket are merged into one record.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use jiff::{SignedDuration, Timestamp, Zoned};
use regex::Regex;

use crate::event::CalendarEvent;

/// Knobs for [`dedupe_events`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DedupeOptions {
    /// Width of a start-time bucket, in minutes.
    pub bucket_minutes: i64,
    /// Whether the location takes part in the merge key.
    pub include_location_in_key: bool,
}

impl Default for DedupeOptions {
    fn default() -> Self {
        Self {
            bucket_minutes: 10,
            include_location_in_key: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MergeKey {
    title: String,
    bucket: Timestamp,
    location: Option<String>,
}

/// Deduplicates `events`, returning them sorted ascending by start.
///
/// The fuzzy pass visits events in start order, so the earlier of two merged
/// events is the one kept on ties and running the function on its own output
/// changes nothing.
#[must_use]
pub fn dedupe_events(events: Vec<CalendarEvent>, options: DedupeOptions) -> Vec<CalendarEvent> {
    let mut unique = dedupe_by_id(events);
    unique.sort_by_key(|e| e.start.timestamp());

    let bucket_minutes = options.bucket_minutes.max(1);
    let width = SignedDuration::from_mins(bucket_minutes);

    let mut kept: Vec<CalendarEvent> = Vec::with_capacity(unique.len());
    let mut index: HashMap<MergeKey, usize> = HashMap::new();

    for event in unique {
        let title = normalize_title(&event.title);
        let location = options
            .include_location_in_key
            .then(|| normalize_location(&event.location));
        let Some(center) = bucket(&event.start, bucket_minutes) else {
            tracing::debug!(title = %event.title, "start cannot be bucketed, keeping as is");
            kept.push(event);
            continue;
        };

        let candidates = [Some(center), center.checked_sub(width).ok(), center.checked_add(width).ok()];
        let hit = candidates.into_iter().flatten().find_map(|b| {
            let key = MergeKey {
                title: title.clone(),
                bucket: b,
                location: location.clone(),
            };
            index.get(&key).copied()
        });

        match hit {
            Some(i) => {
                if let Some(existing) = kept.get_mut(i) {
                    tracing::trace!(kept = %existing.title, merged = %event.title, "merging near-duplicate");
                    *existing = merge_events(existing, &event);
                }
            }
            None => {
                let key = MergeKey {
                    title,
                    bucket: center,
                    location,
                };
                index.insert(key, kept.len());
                kept.push(event);
            }
        }
    }

    kept.sort_by_key(|e| e.start.timestamp());
    kept
}

/// Exact identity pass: first event per id wins; id-less events follow in
/// their original order.
fn dedupe_by_id(events: Vec<CalendarEvent>) -> Vec<CalendarEvent> {
    let mut seen = HashSet::new();
    let (with_id, without_id): (Vec<_>, Vec<_>) = events
        .into_iter()
        .partition(|e| e.id.as_deref().is_some_and(|id| !id.is_empty()));

    with_id
        .into_iter()
        .filter(|e| seen.insert(e.id.clone()))
        .chain(without_id)
        .collect()
}

/// Lowercases, collapses whitespace, drops any subtitle introduced by `:` or
/// a dash, then keeps only letters, digits and whitespace.
///
/// `"Born from Above: Bible Study"` and `"Born  from Above"` both become
/// `"born from above"`.
#[must_use]
pub fn normalize_title(title: &str) -> String {
    let collapsed = title.to_lowercase().split_whitespace().collect::<Vec<_>>().join(" ");
    let head = match collapsed.find([':', '-', '\u{2013}', '\u{2014}']) {
        Some(i) => collapsed.get(..i).unwrap_or_default(),
        None => collapsed.as_str(),
    };
    head.chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

fn normalize_location(location: &str) -> String {
    location
        .to_lowercase()
        .replace("\\n", " ")
        .replace("\\,", " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Floors the local minute of `start` to a multiple of `minutes` and zeroes
/// the seconds.
fn bucket(start: &Zoned, minutes: i64) -> Option<Timestamp> {
    let minute = i64::from(start.minute());
    let floored = i8::try_from(minute - minute.rem_euclid(minutes)).ok()?;
    start
        .with()
        .minute(floored)
        .second(0)
        .subsec_nanosecond(0)
        .build()
        .ok()
        .map(|z| z.timestamp())
}

/// Combines two events judged to be the same occurrence. `a` is the one
/// already kept.
#[must_use]
pub fn merge_events(a: &CalendarEvent, b: &CalendarEvent) -> CalendarEvent {
    let start = if b.start.timestamp() < a.start.timestamp() {
        b.start.clone()
    } else {
        a.start.clone()
    };
    let end = if b.end.timestamp() > a.end.timestamp() {
        b.end.clone()
    } else {
        a.end.clone()
    };
    let title = if a.title.chars().count() >= b.title.chars().count() {
        a.title.clone()
    } else {
        b.title.clone()
    };
    let location = if is_more_specific_location(&a.location, &b.location) {
        a.location.clone()
    } else {
        b.location.clone()
    };

    CalendarEvent {
        id: a.id.clone().or_else(|| b.id.clone()),
        title,
        start,
        end,
        location,
        url: pick_url(a.url.as_deref(), b.url.as_deref()).map(str::to_string),
    }
}

/// Whether `a` names a place more precisely than `b`: a room, suite or
/// number marker wins, otherwise the longer text.
#[must_use]
pub fn is_more_specific_location(a: &str, b: &str) -> bool {
    static ROOM: OnceLock<Regex> = OnceLock::new();
    let re = ROOM.get_or_init(|| Regex::new(r"(?i)(room|rm|suite|#)\s*\w+").unwrap());

    match (re.is_match(a), re.is_match(b)) {
        (true, false) => true,
        (false, true) => false,
        _ => a.chars().count() > b.chars().count(),
    }
}

/// Prefers a registration link; otherwise the first present url.
fn pick_url<'a>(a: Option<&'a str>, b: Option<&'a str>) -> Option<&'a str> {
    static REGISTRATION: OnceLock<Regex> = OnceLock::new();
    let re = REGISTRATION.get_or_init(|| Regex::new(r"churchcenter\.com|registrations").unwrap());

    let preferred = |u: Option<&str>| u.is_some_and(|u| re.is_match(u));
    match (preferred(a), preferred(b)) {
        (true, false) => a,
        (false, true) => b,
        _ => a.or(b),
    }
}

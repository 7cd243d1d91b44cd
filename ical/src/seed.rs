// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! The event seed: what one VEVENT block says before expansion.

use std::collections::BTreeSet;

use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};

use crate::datetime::{parse_date, parse_date_list};
use crate::expand::{ExpandOptions, Occurrence, OccurrenceSource, Recurrence, Window, expand};
use crate::property::{PropertyKey, RawProperty};
use crate::rrule::RRuleSpec;
use crate::text::{VEventBlock, unescape_text};

/// The interpreted content of a VEVENT block.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSeed {
    /// `UID`, if present
    pub uid: Option<String>,
    /// Unescaped `SUMMARY`
    pub title: String,
    /// Unescaped `LOCATION`, if present and not blank
    pub location: Option<String>,
    /// `URL`, if present and not blank
    pub url: Option<String>,
    /// The raw `DTSTART` line
    pub start_raw: Option<RawProperty>,
    /// The raw `DTEND` line
    pub end_raw: Option<RawProperty>,
    /// The parsed `RRULE`, if present and valid
    pub rrule: Option<RRuleSpec>,
    /// Instants excluded by `EXDATE`
    pub exception_dates: BTreeSet<Timestamp>,
    /// Instants added by `RDATE`
    pub extra_dates: BTreeSet<Timestamp>,
}

impl EventSeed {
    /// Interprets a block. Dates inside the rule and the EXDATE/RDATE lists
    /// are normalized into `tz`.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError::MissingSummary`] when the block has no `SUMMARY`
    /// or only a blank one.
    pub fn from_block(block: &VEventBlock<'_>, tz: &TimeZone) -> Result<Self, SeedError> {
        let title = non_blank(block.value(PropertyKey::Summary))
            .map(|s| unescape_text(&s))
            .ok_or(SeedError::MissingSummary)?;

        let rrule = block
            .value(PropertyKey::RRule)
            .and_then(|value| match RRuleSpec::parse(&value, tz) {
                Ok(rule) => Some(rule),
                Err(error) => {
                    tracing::debug!(%error, title, "ignoring unusable recurrence rule");
                    None
                }
            });

        Ok(Self {
            uid: non_blank(block.value(PropertyKey::Uid)),
            title,
            location: non_blank(block.value(PropertyKey::Location)).map(|s| unescape_text(&s)),
            url: non_blank(block.value(PropertyKey::Url)),
            start_raw: block.property(PropertyKey::DtStart),
            end_raw: block.property(PropertyKey::DtEnd),
            rrule,
            exception_dates: parse_date_list(&block.properties(PropertyKey::ExDate), tz),
            extra_dates: parse_date_list(&block.properties(PropertyKey::RDate), tz),
        })
    }

    /// The normalized start, or `None` if `DTSTART` is absent or unparseable.
    #[must_use]
    pub fn start(&self, tz: &TimeZone) -> Option<Zoned> {
        let raw = self.start_raw.as_ref()?;
        parse_date(raw, tz)
            .inspect_err(|error| tracing::debug!(%error, title = %self.title, "invalid DTSTART"))
            .ok()
    }

    /// The normalized end. Falls back to `DTSTART` when `DTEND` is absent, and
    /// to the start instant itself when the chosen value does not parse.
    #[must_use]
    pub fn end(&self, start: &Zoned, tz: &TimeZone) -> Zoned {
        self.end_raw
            .as_ref()
            .or(self.start_raw.as_ref())
            .and_then(|raw| parse_date(raw, tz).ok())
            .unwrap_or_else(|| start.clone())
    }

    /// Whether the seed carries a weekly rule.
    #[must_use]
    pub fn is_weekly(&self) -> bool {
        self.rrule.as_ref().is_some_and(RRuleSpec::is_weekly)
    }

    /// All occurrences of the seed inside `window`, sorted by start.
    ///
    /// A seed without a weekly rule yields its own start when that lies in
    /// the window, plus any RDATE instants. A seed whose start cannot be
    /// parsed yields nothing.
    #[must_use]
    pub fn occurrences(&self, window: &Window, tz: &TimeZone, options: ExpandOptions) -> Vec<Occurrence> {
        let Some(start) = self.start(tz) else {
            return Vec::new();
        };
        let end = self.end(&start, tz);
        let weekly = self.rrule.as_ref().filter(|rule| rule.is_weekly());
        let recurrence = Recurrence {
            rule: weekly,
            exception_dates: &self.exception_dates,
            extra_dates: &self.extra_dates,
        };
        let expanded = expand(&start, &end, &recurrence, window, options);
        if weekly.is_some() {
            return expanded;
        }

        let mut out = Vec::with_capacity(expanded.len() + 1);
        if window.contains(start.timestamp()) {
            let end = if end.timestamp() < start.timestamp() {
                start.clone()
            } else {
                end
            };
            out.push(Occurrence {
                start,
                end,
                source: OccurrenceSource::Seed,
            });
        }
        for occurrence in expanded {
            if out.iter().all(|o| o.start.timestamp() != occurrence.start.timestamp()) {
                out.push(occurrence);
            }
        }
        out.sort_by_key(|o| o.start.timestamp());
        out
    }
}

/// Failure to interpret a VEVENT block.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeedError {
    /// The block has no `SUMMARY` line, or its value is blank.
    #[error("Event has no SUMMARY")]
    MissingSummary,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence rule (`RRULE`) parsing.
//!
//! Only the rule parts needed for weekly expansion are interpreted: `FREQ`,
//! `INTERVAL`, `BYDAY`, `UNTIL` and `COUNT`. Other parts are ignored.

use std::fmt;
use std::str::FromStr;

use jiff::Zoned;
use jiff::civil::Weekday;
use jiff::tz::TimeZone;

use crate::datetime::parse_date;
use crate::keyword::{
    KW_RRULE_BYDAY, KW_RRULE_COUNT, KW_RRULE_FREQ, KW_RRULE_INTERVAL, KW_RRULE_UNTIL,
};
use crate::property::RawProperty;

/// Recurrence frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[expect(missing_docs)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Day of the week, numbered Monday = 1 through Sunday = 7.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, strum::Display, strum::EnumString,
)]
#[expect(missing_docs)]
pub enum WeekDay {
    #[strum(serialize = "MO")]
    Monday = 1,
    #[strum(serialize = "TU")]
    Tuesday = 2,
    #[strum(serialize = "WE")]
    Wednesday = 3,
    #[strum(serialize = "TH")]
    Thursday = 4,
    #[strum(serialize = "FR")]
    Friday = 5,
    #[strum(serialize = "SA")]
    Saturday = 6,
    #[strum(serialize = "SU")]
    Sunday = 7,
}

impl WeekDay {
    /// The ISO number of the day, Monday = 1 through Sunday = 7.
    #[must_use]
    pub const fn number(self) -> i8 {
        self as i8
    }

    /// Parses a `BYDAY` entry, tolerating an ordinal prefix such as `1MO` or
    /// `-1FR`; the ordinal is meaningless for weekly rules and is dropped.
    #[must_use]
    pub fn from_byday(entry: &str) -> Option<Self> {
        let code = entry.trim().trim_start_matches(['+', '-']);
        let code = code.trim_start_matches(|c: char| c.is_ascii_digit());
        code.to_ascii_uppercase().parse().ok()
    }
}

impl From<Weekday> for WeekDay {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Monday => WeekDay::Monday,
            Weekday::Tuesday => WeekDay::Tuesday,
            Weekday::Wednesday => WeekDay::Wednesday,
            Weekday::Thursday => WeekDay::Thursday,
            Weekday::Friday => WeekDay::Friday,
            Weekday::Saturday => WeekDay::Saturday,
            Weekday::Sunday => WeekDay::Sunday,
        }
    }
}

impl From<WeekDay> for Weekday {
    fn from(day: WeekDay) -> Self {
        match day {
            WeekDay::Monday => Weekday::Monday,
            WeekDay::Tuesday => Weekday::Tuesday,
            WeekDay::Wednesday => Weekday::Wednesday,
            WeekDay::Thursday => Weekday::Thursday,
            WeekDay::Friday => Weekday::Friday,
            WeekDay::Saturday => Weekday::Saturday,
            WeekDay::Sunday => Weekday::Sunday,
        }
    }
}

/// A parsed recurrence rule.
#[derive(Debug, Clone, PartialEq)]
pub struct RRuleSpec {
    /// Frequency of recurrence
    pub frequency: Frequency,
    /// Interval between recurrences, always at least 1
    pub interval: u32,
    /// Weekdays the rule fires on, in rule order; empty means "the seed's weekday"
    pub by_day: Vec<WeekDay>,
    /// Inclusive upper bound of the recurrence set
    pub until: Option<Zoned>,
    /// Maximum number of instances produced by the rule
    pub count: Option<u32>,
}

impl RRuleSpec {
    /// Creates a rule with the given frequency and default parts.
    #[must_use]
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            interval: 1,
            by_day: Vec::new(),
            until: None,
            count: None,
        }
    }

    /// Parses an `RRULE` value such as
    /// `FREQ=WEEKLY;BYDAY=MO,WE;INTERVAL=2;UNTIL=20251231T235959Z`.
    ///
    /// `UNTIL` is normalized into `tz`; an unparseable `UNTIL` is dropped, as
    /// is an invalid `COUNT`. An `INTERVAL` that is missing, zero or not a
    /// number means 1.
    ///
    /// # Errors
    ///
    /// Returns an error if `FREQ` is missing or unknown.
    pub fn parse(value: &str, tz: &TimeZone) -> Result<Self, RRuleParseError> {
        let mut frequency = None;
        let mut rule = RRuleSpec::new(Frequency::Weekly);

        for part in value.split(';').filter(|p| !p.trim().is_empty()) {
            let (name, val) = part.split_once('=').unwrap_or((part, ""));
            let name = name.trim().to_ascii_uppercase();
            let val = val.trim();
            match name.as_str() {
                KW_RRULE_FREQ => {
                    frequency = Some(Frequency::from_str(val).map_err(|_| {
                        RRuleParseError::UnknownFrequency {
                            value: val.to_string(),
                        }
                    })?);
                }
                KW_RRULE_INTERVAL => {
                    rule.interval = val.parse().ok().filter(|n| *n > 0).unwrap_or(1);
                }
                KW_RRULE_BYDAY => {
                    rule.by_day = val.split(',').filter_map(WeekDay::from_byday).collect();
                }
                KW_RRULE_UNTIL => {
                    rule.until = match parse_date(&RawProperty::new(val), tz) {
                        Ok(until) => Some(until),
                        Err(error) => {
                            tracing::debug!(%error, "ignoring unparseable UNTIL");
                            None
                        }
                    };
                }
                KW_RRULE_COUNT => rule.count = val.parse().ok(),
                _ => tracing::trace!(part, "ignoring unsupported rule part"),
            }
        }

        rule.frequency = frequency.ok_or(RRuleParseError::MissingFrequency)?;
        Ok(rule)
    }

    /// Whether the rule is one this crate expands.
    #[must_use]
    pub fn is_weekly(&self) -> bool {
        self.frequency == Frequency::Weekly
    }
}

impl fmt::Display for RRuleSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{KW_RRULE_FREQ}={}", self.frequency)?;
        if self.interval != 1 {
            write!(f, ";{KW_RRULE_INTERVAL}={}", self.interval)?;
        }
        if !self.by_day.is_empty() {
            let days: Vec<String> = self.by_day.iter().map(ToString::to_string).collect();
            write!(f, ";{KW_RRULE_BYDAY}={}", days.join(","))?;
        }
        if let Some(until) = &self.until {
            let utc = until.with_time_zone(TimeZone::UTC);
            write!(f, ";{KW_RRULE_UNTIL}={}", utc.strftime("%Y%m%dT%H%M%SZ"))?;
        }
        if let Some(count) = self.count {
            write!(f, ";{KW_RRULE_COUNT}={count}")?;
        }
        Ok(())
    }
}

/// Failure to parse an `RRULE` value.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RRuleParseError {
    /// The rule has no `FREQ` part.
    #[error("Recurrence rule has no FREQ")]
    MissingFrequency,

    /// The `FREQ` part is not a known frequency.
    #[error("Unknown recurrence frequency '{value}'")]
    UnknownFrequency {
        /// The offending value
        value: String,
    },
}

// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Normalization of DATE and DATE-TIME property values into zoned instants.
//!
//! Recognized value forms:
//!
//! - `YYYYMMDD`: a date, interpreted as local midnight
//! - `YYYYMMDDTHHMMSS` and `YYYYMMDDTHHMM`, optionally followed by `Z`
//!
//! The zone used for interpretation is the `TZID` parameter when present and
//! the caller's default zone otherwise; a trailing `Z` always means UTC. The
//! result is converted to the default zone so every instant produced by this
//! crate is directly comparable.

use std::collections::BTreeSet;

use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned, civil};

use crate::property::RawProperty;

/// Failure to turn a property value into an instant.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateParseError {
    /// The value matches none of the accepted forms.
    #[error("Unrecognized date value '{value}'")]
    Format {
        /// The offending value
        value: String,
    },

    /// The value has the right shape but is not a real date or time.
    #[error("Invalid calendar date or time '{value}'")]
    OutOfRange {
        /// The offending value
        value: String,
    },

    /// The `TZID` parameter names a zone that is not in the time zone database.
    #[error("Unknown time zone '{tzid}'")]
    UnknownZone {
        /// The zone identifier
        tzid: String,
    },
}

/// Parses a DATE or DATE-TIME property into an instant in `tz`.
///
/// # Errors
///
/// Returns [`DateParseError`] when the value is not one of the recognized
/// forms, does not denote a valid date/time, or names an unknown zone.
pub fn parse_date(prop: &RawProperty, tz: &TimeZone) -> Result<Zoned, DateParseError> {
    let value = prop.value.as_str();
    // UTC values never consult TZID, so an unknown zone name only matters for
    // floating values.
    let local_zone = || match prop.params.tzid() {
        Some(tzid) => TimeZone::get(tzid).map_err(|_| DateParseError::UnknownZone {
            tzid: tzid.to_string(),
        }),
        None => Ok(tz.clone()),
    };

    let is_date_only = prop.params.is_date_value() || is_date_form(value);
    let zoned = if is_date_only {
        let date = parse_civil_date(value)?;
        date.to_zoned(local_zone()?).map_err(|_| out_of_range(value))?
    } else {
        let (base, zone) = match value.strip_suffix('Z') {
            Some(base) => (base, TimeZone::UTC),
            None => (value, local_zone()?),
        };
        let datetime = parse_civil_datetime(base).map_err(|e| match e {
            DateParseError::OutOfRange { .. } => out_of_range(value),
            _ => DateParseError::Format {
                value: value.to_string(),
            },
        })?;
        datetime.to_zoned(zone).map_err(|_| out_of_range(value))?
    };

    Ok(zoned.with_time_zone(tz.clone()))
}

/// Parses every comma-separated value of every given property (EXDATE/RDATE
/// lines) into a set of instants. Pieces that fail to parse are skipped.
#[must_use]
pub fn parse_date_list(props: &[RawProperty], tz: &TimeZone) -> BTreeSet<Timestamp> {
    let mut out = BTreeSet::new();
    for prop in props {
        for piece in prop.value.split(',') {
            let single = RawProperty {
                value: piece.trim().to_string(),
                params: prop.params.clone(),
            };
            match parse_date(&single, tz) {
                Ok(zoned) => {
                    out.insert(zoned.timestamp());
                }
                Err(error) => tracing::debug!(%error, "skipping unparseable date list entry"),
            }
        }
    }
    out
}

/// Formats an instant as ISO 8601 with a numeric offset, e.g.
/// `2025-01-15T19:00:00-06:00`.
#[must_use]
pub fn format_instant(zoned: &Zoned) -> String {
    zoned.strftime("%Y-%m-%dT%H:%M:%S%:z").to_string()
}

fn is_date_form(value: &str) -> bool {
    value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit())
}

fn parse_civil_date(value: &str) -> Result<civil::Date, DateParseError> {
    if !is_date_form(value) {
        return Err(DateParseError::Format {
            value: value.to_string(),
        });
    }
    let year = digits(value, 0..4)?;
    let month = digits(value, 4..6)?;
    let day = digits(value, 6..8)?;
    civil::Date::new(as_i16(year, value)?, as_i8(month, value)?, as_i8(day, value)?)
        .map_err(|_| out_of_range(value))
}

fn parse_civil_datetime(value: &str) -> Result<civil::DateTime, DateParseError> {
    let format_error = || DateParseError::Format {
        value: value.to_string(),
    };
    if !matches!(value.len(), 13 | 15) || value.as_bytes().get(8) != Some(&b'T') {
        return Err(format_error());
    }

    let date = parse_civil_date(value.get(..8).ok_or_else(format_error)?)
        .map_err(|_| format_error())?;
    let hour = digits(value, 9..11)?;
    let minute = digits(value, 11..13)?;
    let second = if value.len() == 15 {
        digits(value, 13..15)?
    } else {
        0
    };

    civil::DateTime::new(
        date.year(),
        date.month(),
        date.day(),
        as_i8(hour, value)?,
        as_i8(minute, value)?,
        as_i8(second, value)?,
        0,
    )
    .map_err(|_| out_of_range(value))
}

fn digits(value: &str, range: std::ops::Range<usize>) -> Result<u32, DateParseError> {
    value
        .get(range)
        .filter(|s| s.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| DateParseError::Format {
            value: value.to_string(),
        })
}

fn as_i16(n: u32, value: &str) -> Result<i16, DateParseError> {
    i16::try_from(n).map_err(|_| out_of_range(value))
}

fn as_i8(n: u32, value: &str) -> Result<i8, DateParseError> {
    i8::try_from(n).map_err(|_| out_of_range(value))
}

fn out_of_range(value: &str) -> DateParseError {
    DateParseError::OutOfRange {
        value: value.to_string(),
    }
}

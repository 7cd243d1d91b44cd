// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Read VEVENT blocks out of iCalendar feeds and expand weekly recurrences.
//!
//! The pipeline is intentionally narrow: unfold the text, cut it into VEVENT
//! blocks, look up a fixed set of properties, normalize their date values into
//! one output time zone, and expand `FREQ=WEEKLY` rules into concrete
//! occurrences inside a window.

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

pub mod datetime;
pub mod expand;
pub mod keyword;
pub mod property;
pub mod rrule;
pub mod seed;
pub mod text;

pub use crate::datetime::{DateParseError, format_instant, parse_date, parse_date_list};
pub use crate::expand::{
    CountScope, ExpandOptions, Occurrence, OccurrenceSource, Recurrence, Window, expand,
};
pub use crate::property::{Params, PropertyKey, RawProperty};
pub use crate::rrule::{Frequency, RRuleParseError, RRuleSpec, WeekDay};
pub use crate::seed::{EventSeed, SeedError};
pub use crate::text::{VEventBlock, unescape_text, unfold, vevent_blocks};

// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Keywords defined in iCalendar RFC 5545 that the feed reader understands.

pub const KW_BEGIN_VEVENT: &str = "BEGIN:VEVENT";
pub const KW_END_VEVENT: &str = "END:VEVENT";

// Section 3.2 - Property Parameters
pub const KW_TZID: &str = "TZID";
pub const KW_VALUE: &str = "VALUE";

// Section 3.3 - Property Value Data Types
pub const KW_DATE: &str = "DATE";

// Section 3.3.10 - Recurrence Rule
pub const KW_RRULE_FREQ: &str = "FREQ";
pub const KW_RRULE_INTERVAL: &str = "INTERVAL";
pub const KW_RRULE_BYDAY: &str = "BYDAY";
pub const KW_RRULE_UNTIL: &str = "UNTIL";
pub const KW_RRULE_COUNT: &str = "COUNT";

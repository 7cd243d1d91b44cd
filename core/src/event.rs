// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Zoned;

/// One dated event ready for display.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CalendarEvent {
    /// Source identity. Instances of a recurring event carry
    /// `"{uid}#{start}"` so that every occurrence is distinct.
    pub id: Option<String>,
    /// Display title
    pub title: String,
    /// Start instant
    pub start: Zoned,
    /// End instant, never before `start`
    pub end: Zoned,
    /// Where it happens
    pub location: String,
    /// Link for details or registration
    pub url: Option<String>,
}

impl CalendarEvent {
    /// Creates an event lasting zero time, without id or url.
    pub fn new(title: impl Into<String>, start: Zoned, location: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            end: start.clone(),
            start,
            location: location.into(),
            url: None,
        }
    }

    /// Sets the id, builder style.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the end, builder style. An end before the start is clamped to it.
    #[must_use]
    pub fn with_end(mut self, end: Zoned) -> Self {
        self.end = if end.timestamp() < self.start.timestamp() {
            self.start.clone()
        } else {
            end
        };
        self
    }

    /// Sets the url, builder style.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

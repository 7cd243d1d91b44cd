// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Filling the newsletter template.
//!
//! The template is plain HTML with these placeholders:
//!
//! | Placeholder | Content |
//! |---|---|
//! | `{{F_R}}` | dollars remaining to the giving goal |
//! | `{{F_G}}` | giving goal |
//! | `{{F_T}}`, `{{F_N}}`, `{{F_U}}` | total gifts, new givers, unique givers |
//! | `{{F_TG}}`, `{{F_NG}}`, `{{F_UG}}` | goals for the three counts, if configured |
//! | `{{CALENDAR}}` | calendar at a glance |
//! | `{{EVENTS}}` | condensed registration list |
//! | `{{SERMON}}` | latest message with its summary |
//!
//! plus the region between the registration block markers, which is repeated
//! per registration (see [`render_registrations`]).

use jiff::Zoned;
use wire_api::LatestVideo;

use crate::event::CalendarEvent;
use crate::finance::{FinancialStats, format_usd};
use crate::registration::Registration;
use crate::render::{
    render_calendar, render_registrations, render_remaining_amount, render_sermon,
    render_statistic, render_upcoming_events,
};

/// Everything gathered for one issue.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct NewsletterContent {
    /// Giving statistics
    pub financial: FinancialStats,
    /// Upcoming calendar events
    pub calendar: Vec<CalendarEvent>,
    /// Open registrations
    pub registrations: Vec<Registration>,
    /// Latest sermon video
    pub sermon: Option<LatestVideo>,
    /// Summary of the sermon
    pub summary: String,
}

/// A rendered issue.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Newsletter {
    /// Subject line, also the campaign title
    pub subject: String,
    /// Complete HTML body
    pub html: String,
    /// What went into it
    pub content: NewsletterContent,
}

/// Subject line for an issue sent on `now`'s date, e.g.
/// `January 19, 2025 Wire`.
#[must_use]
pub fn subject_for(now: &Zoned) -> String {
    now.strftime("%B %-d, %Y Wire").to_string()
}

/// Replaces every placeholder of `template` with rendered content.
#[must_use]
pub fn fill_template(template: &str, content: &NewsletterContent) -> String {
    let f = &content.financial;
    let goal = |g: Option<u64>| g.map(render_statistic).unwrap_or_default();

    let html = template
        .replace(
            "{{F_R}}",
            &render_remaining_amount(f.giving_goal, f.gifts_received),
        )
        .replace("{{F_G}}", &format_usd(f.giving_goal))
        .replace("{{F_TG}}", &goal(f.total_gifts_goal))
        .replace("{{F_NG}}", &goal(f.new_givers_goal))
        .replace("{{F_UG}}", &goal(f.unique_givers_goal))
        .replace("{{F_T}}", &render_statistic(f.total_gifts))
        .replace("{{F_N}}", &render_statistic(f.new_givers))
        .replace("{{F_U}}", &render_statistic(f.unique_givers))
        .replace("{{CALENDAR}}", &render_calendar(&content.calendar))
        .replace("{{EVENTS}}", &render_upcoming_events(&content.registrations))
        .replace(
            "{{SERMON}}",
            &render_sermon(content.sermon.as_ref(), &content.summary),
        );
    render_registrations(&html, &content.registrations)
}

/// Renders an issue for `now`.
#[must_use]
pub fn assemble(template: &str, content: NewsletterContent, now: &Zoned) -> Newsletter {
    Newsletter {
        subject: subject_for(now),
        html: fill_template(template, &content),
        content,
    }
}

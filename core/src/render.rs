// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! HTML fragments for the newsletter template.

use std::fmt::Write as _;
use std::sync::OnceLock;

use jiff::Zoned;
use regex::{Captures, Regex};
use wire_api::LatestVideo;

use crate::event::CalendarEvent;
use crate::finance::{format_usd, group_thousands};
use crate::registration::Registration;
use crate::sermon::DEFAULT_SERMON_TITLE;

/// Marker opening the repeated registration region of the template.
pub const REGISTRATION_BLOCK_START: &str = r#"<div data-block="registration_block_start"></div>"#;
/// Marker closing the repeated registration region of the template.
pub const REGISTRATION_BLOCK_END: &str = r#"<div data-block="registration_block_end"></div>"#;

const DEFAULT_SERMON_URL: &str = "canachurch.com/sermons";

/// Escapes the five HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Strips everything but ordinary formatting markup, images and links.
#[must_use]
pub fn sanitize(html: &str) -> String {
    ammonia::Builder::default()
        .add_tags(["img"])
        .add_tag_attributes("a", ["href", "title", "target", "rel"])
        .add_tag_attributes("img", ["src", "alt"])
        .link_rel(None)
        .clean(html)
        .to_string()
}

/// Gives every `<p>` without an explicit alignment `text-align:left`,
/// prepending it to an existing style attribute when there is one.
#[must_use]
pub fn left_align_paragraphs(html: &str) -> String {
    static PARAGRAPH: OnceLock<Regex> = OnceLock::new();
    static STYLE: OnceLock<Regex> = OnceLock::new();
    static ALIGN: OnceLock<Regex> = OnceLock::new();
    let paragraph = PARAGRAPH.get_or_init(|| Regex::new(r"(?i)<p(\s[^>]*)?>").unwrap());
    let style = STYLE.get_or_init(|| Regex::new(r#"(?i)(\sstyle\s*=\s*")"#).unwrap());
    let align = ALIGN.get_or_init(|| Regex::new(r"(?i)text-align\s*:").unwrap());

    paragraph
        .replace_all(html, |caps: &Captures<'_>| {
            let whole = caps.get(0).map_or("", |m| m.as_str());
            let attrs = caps.get(1).map_or("", |m| m.as_str());
            if align.is_match(attrs) {
                whole.to_string()
            } else if style.is_match(attrs) {
                format!("<p{}>", style.replacen(attrs, 1, "${1}text-align:left; "))
            } else {
                format!(r#"<p style="text-align:left;"{attrs}>"#)
            }
        })
        .into_owned()
}

/// Formats a start for readers, e.g. `Monday, Jan 5, 7:00 PM`.
#[must_use]
pub fn format_date(when: &Zoned) -> String {
    when.strftime("%A, %b %-d, %-I:%M %p").to_string()
}

/// A count with thousands separators.
#[must_use]
pub fn render_statistic(value: u64) -> String {
    group_thousands(value)
}

/// Dollars left until the goal, e.g. `$15,000`.
#[must_use]
pub fn render_remaining_amount(giving_goal: u64, gifts_received: u64) -> String {
    format_usd(giving_goal.saturating_sub(gifts_received))
}

/// Condensed list of registrations linking to their full entries below.
#[must_use]
pub fn render_upcoming_events(registrations: &[Registration]) -> String {
    if registrations.is_empty() {
        return "<p>No upcoming registrations.</p>".to_string();
    }

    let items: Vec<String> = registrations
        .iter()
        .map(|r| {
            let when = r
                .display_starts_at
                .as_ref()
                .map(|z| format!("<strong>{}</strong> - ", format_date(z)))
                .unwrap_or_default();
            format!(
                "<li>{when}{} \u{2014} <a href=\"#{}\">Details</a></li>",
                escape_html(&r.title),
                r.anchor_id()
            )
        })
        .collect();
    sanitize(&format!("<ul>{}</ul>", items.join("\n")))
}

/// Video thumbnail, title and summary of the latest message.
#[must_use]
pub fn render_sermon(video: Option<&LatestVideo>, summary: &str) -> String {
    let title = video.map_or(DEFAULT_SERMON_TITLE, |v| v.title.as_str());
    let url = video.map_or(DEFAULT_SERMON_URL, |v| v.url.as_str());
    let image = video
        .and_then(|v| v.thumbnail.as_deref())
        .map(|thumb| {
            format!(
                r#"<p><a href="{url}" target="_blank" rel="noopener"><img src="{thumb}" alt="{}"/></a></p>"#,
                escape_html(title)
            )
        })
        .unwrap_or_default();
    sanitize(&format!(
        r#"{image}<h3 style="margin-top:12px;">{}</h3><div>{summary}</div>"#,
        escape_html(title)
    ))
}

/// Repeats the template region between the registration markers once per
/// registration. Leaves `html` untouched when a marker is missing or the
/// markers are out of order.
#[must_use]
pub fn render_registrations(html: &str, registrations: &[Registration]) -> String {
    let (Some(start), Some(end)) = (
        html.find(REGISTRATION_BLOCK_START),
        html.find(REGISTRATION_BLOCK_END),
    ) else {
        tracing::warn!("registration markers not found in template");
        return html.to_string();
    };
    let body_start = start + REGISTRATION_BLOCK_START.len();
    let Some(template) = html.get(body_start..end) else {
        tracing::warn!("registration markers out of order");
        return html.to_string();
    };

    let blocks: Vec<String> = registrations
        .iter()
        .map(|r| render_registration(template, r))
        .collect();

    let mut out = String::with_capacity(html.len() + blocks.iter().map(String::len).sum::<usize>());
    out.push_str(html.get(..body_start).unwrap_or_default());
    out.push('\n');
    out.push_str(&blocks.join("\n"));
    out.push('\n');
    out.push_str(html.get(end..).unwrap_or_default());
    out
}

fn render_registration(template: &str, r: &Registration) -> String {
    let name = escape_html(&r.title);
    let image = if r.logo_url.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div style="text-align:center;margin:0 0 12px 0;"><img src="{}" alt="{name}" style="max-width:100%;height:auto;border-radius:16px;display:inline-block;" /></div>"#,
            escape_html(&r.logo_url)
        )
    };
    let description = left_align_paragraphs(r.description_html.as_deref().unwrap_or_default());
    let anchor = r.anchor_id();

    let filled = template
        .replace("{{REGISTRATION_NAME}}", &name)
        .replacen(
            "{{REGISTRATION}}",
            &format!(r#"{image}<div style="text-align:left;">{description}</div>"#),
            1,
        )
        .replace("{{REGISTRATION_LINK}}", "View Details")
        .replacen(r#"href="""#, &format!(r#"href="{}""#, escape_html(&r.url)), 1);

    format!("<a id=\"{anchor}\" name=\"{anchor}\"></a>\n{filled}")
}

/// Calendar-at-a-glance list.
#[must_use]
pub fn render_calendar(events: &[CalendarEvent]) -> String {
    let mut list = String::new();
    if events.is_empty() {
        list.push_str("<p>No upcoming events.</p>");
    } else {
        list.push_str("<ul>");
        for e in events {
            let _ = write!(
                list,
                "<li><strong>{}</strong> - {}",
                format_date(&e.start),
                escape_html(&e.title)
            );
            if !e.location.is_empty() {
                let _ = write!(list, " ({})", escape_html(&e.location));
            }
            list.push_str("</li>");
        }
        list.push_str("</ul>");
    }
    format!(
        r#"<div mc:edit="weekly_events" class="mceText" style="width:100%;text-align:left;">{list}</div>"#
    )
}

// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Test data factories for integration tests.

use jiff::Zoned;

/// A small newsletter template using every placeholder.
pub const TEMPLATE: &str = r#"<html><body>
<p>Remaining: {{F_R}} of {{F_G}}</p>
<p>Gifts {{F_T}}, new {{F_N}}, unique {{F_U}}</p>
<section id="calendar">{{CALENDAR}}</section>
<section id="events">{{EVENTS}}</section>
<section id="sermon">{{SERMON}}</section>
<div data-block="registration_block_start"></div>
<h2>{{REGISTRATION_NAME}}</h2>
{{REGISTRATION}}
<a class="button" href="">{{REGISTRATION_LINK}}</a>
<div data-block="registration_block_end"></div>
</body></html>"#;

/// Sunday, January 19, 2025, 8:00 in Chicago.
#[must_use]
pub fn sunday_morning() -> Zoned {
    "2025-01-19T08:00:00-06:00[America/Chicago]"
        .parse()
        .expect("valid zoned datetime")
}

/// Wraps VEVENT bodies (lines separated by `\n`) into a CRLF calendar.
#[must_use]
pub fn ics_calendar(bodies: &[&str]) -> String {
    let mut out = String::from("BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Cana//Test//EN\r\n");
    for body in bodies {
        out.push_str("BEGIN:VEVENT\r\n");
        out.push_str(&body.replace('\n', "\r\n"));
        out.push_str("\r\nEND:VEVENT\r\n");
    }
    out.push_str("END:VCALENDAR\r\n");
    out
}

/// A signups document with one dated and one ongoing registration, and one
/// closed registration that must not be listed.
#[must_use]
pub fn signups_body() -> serde_json::Value {
    serde_json::json!({
        "data": [
            {
                "type": "Signup",
                "id": "101",
                "attributes": {
                    "name": "Winter Retreat",
                    "open_at": "2025-01-01T00:00:00Z",
                    "close_at": "2025-02-01T00:00:00Z",
                    "new_registration_url": "https://cana.churchcenter.com/registrations/events/101/reservations/new",
                    "logo_url": "https://img.example/101.png",
                    "description": "<p>Two days at the lake.</p>"
                },
                "relationships": {
                    "next_signup_time": {"data": {"type": "SignupTime", "id": "t1"}}
                }
            },
            {
                "type": "Signup",
                "id": "102",
                "attributes": {
                    "name": "Serve Team",
                    "open_at": "2024-12-01T00:00:00Z",
                    "new_registration_url": "https://cana.churchcenter.com/registrations/events/102/reservations/new",
                    "logo_url": "https://img.example/102.png"
                }
            },
            {
                "type": "Signup",
                "id": "103",
                "attributes": {
                    "name": "Fall Picnic",
                    "open_at": "2024-09-01T00:00:00Z",
                    "close_at": "2024-10-01T00:00:00Z",
                    "new_registration_url": "https://cana.churchcenter.com/registrations/events/103/reservations/new",
                    "logo_url": "https://img.example/103.png"
                }
            }
        ],
        "included": [
            {"type": "SignupTime", "id": "t1", "attributes": {"starts_at": "2025-01-24T23:00:00Z"}}
        ]
    })
}

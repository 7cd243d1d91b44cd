// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! The calendar pipeline fed from an HTTP iCalendar feed.

use jiff::tz::TimeZone;
use wire_api::IcsFeedClient;
use wire_core::{CalendarOptions, fetch_calendar_events};

use crate::common::{MockServices, ics_calendar, sunday_morning};

async fn fetch(bodies: &[&str]) -> Vec<wire_core::CalendarEvent> {
    let services = MockServices::start().await;
    services.calendar(ics_calendar(bodies)).await;
    let client = IcsFeedClient::new(format!("{}/calendar.ics", services.uri())).unwrap();
    let tz = TimeZone::get("America/Chicago").unwrap();
    fetch_calendar_events(Some(&client), &sunday_morning(), &tz, &CalendarOptions::default())
        .await
        .unwrap()
}

#[tokio::test]
async fn three_weekdays_over_two_weeks() {
    let events = fetch(&[
        "UID:gym\nSUMMARY:Open Gym\nDTSTART;TZID=America/Chicago:20250106T180000\nRRULE:FREQ=WEEKLY;BYDAY=MO,WE,FR",
    ])
    .await;
    assert_eq!(events.len(), 6);
    let days: Vec<_> = events.iter().map(|e| e.start.day()).collect();
    assert_eq!(days, [20, 22, 24, 27, 29, 31]);
    assert!(events.iter().all(|e| e.id.as_deref().is_some_and(|id| id.starts_with("gym#"))));
}

#[tokio::test]
async fn long_lists_are_truncated_to_eight() {
    let events = fetch(&[
        "UID:daily\nSUMMARY:Morning Prayer\nDTSTART;TZID=America/Chicago:20250106T063000\nRRULE:FREQ=WEEKLY;BYDAY=MO,TU,WE,TH,FR",
    ])
    .await;
    assert_eq!(events.len(), 8);
    assert!(events.windows(2).all(|w| w[0].start.timestamp() < w[1].start.timestamp()));
    assert_eq!(events[0].start.day(), 20);
}

#[tokio::test]
async fn extra_dates_without_rule_and_folded_lines() {
    let events = fetch(&[
        "UID:concert\nSUMMARY:Winter Concert with the Youth Choir and\n  Friends\nDTSTART;TZID=America/Chicago:20241215T190000\nRDATE;TZID=America/Chicago:20250125T190000,20250301T190000",
    ])
    .await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].title, "Winter Concert with the Youth Choir and Friends");
    assert_eq!(events[0].start.day(), 25);
}

#[tokio::test]
async fn utc_values_are_shown_in_local_time() {
    let events = fetch(&["UID:z\nSUMMARY:Staff Meeting\nDTSTART;TZID=Asia/Tokyo:20250121T150000Z"]).await;
    assert_eq!(events.len(), 1);
    assert_eq!((events[0].start.day(), events[0].start.hour()), (21, 9));
    assert_eq!(events[0].start, events[0].end);
}

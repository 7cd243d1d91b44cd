// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Full newsletter assembly against mocked services.

use wire_core::Wire;

use crate::common::{MockServices, TEMPLATE, ics_calendar, mock_config, signups_body, sunday_morning};

fn plans() -> serde_json::Value {
    serde_json::json!({"data": [
        {"type": "Plan", "id": "p2", "attributes": {"sort_date": "2025-01-26T16:00:00Z"}},
        {"type": "Plan", "id": "p1", "attributes": {"sort_date": "2025-01-12T16:00:00Z"}}
    ]})
}

fn items() -> serde_json::Value {
    serde_json::json!({"data": [
        {"type": "Item", "id": "i1", "attributes": {"item_type": "header", "title": "Worship"}},
        {"type": "Item", "id": "i2", "attributes": {"item_type": "song", "title": "Doxology"}},
        {"type": "Item", "id": "i3", "attributes": {"item_type": "header", "title": "Message"}},
        {"type": "Item", "id": "i4", "attributes": {
            "item_type": "item",
            "title": "Born from Above",
            "description": "Nicodemus comes to Jesus at night. ".repeat(10)
        }}
    ]})
}

async fn services() -> MockServices {
    let services = MockServices::start().await;
    services
        .calendar(ics_calendar(&[
            "UID:worship\nSUMMARY:Sunday Worship\nLOCATION:Sanctuary\nDTSTART;TZID=America/Chicago:20250105T100000\nDTEND;TZID=America/Chicago:20250105T113000\nRRULE:FREQ=WEEKLY;BYDAY=SU\nEXDATE;TZID=America/Chicago:20250126T100000",
            "UID:prayer\nSUMMARY:Midweek Prayer\nDTSTART;TZID=America/Chicago:20250108T190000\nRRULE:FREQ=WEEKLY",
            "UID:study-a\nSUMMARY:Bible Study\nDTSTART;TZID=America/Chicago:20250123T190000",
            "UID:study-b\nSUMMARY:Bible Study: Romans\nLOCATION:Room 204\nDTSTART;TZID=America/Chicago:20250123T190500",
        ]))
        .await;
    services.signups(signups_body()).await;
    services.plans(plans(), items()).await;
    services.video().await;
    services.summary(200, "Grace and peace to you.").await;
    services
}

#[tokio::test]
async fn newsletter_contains_every_section() {
    let services = services().await;
    let wire = Wire::new(mock_config(&services)).unwrap();

    let newsletter = wire
        .build_newsletter(TEMPLATE, &sunday_morning())
        .await
        .unwrap();

    assert_eq!(newsletter.subject, "January 19, 2025 Wire");

    let html = &newsletter.html;
    assert!(html.contains("Remaining: $15,000 of $45,000"));
    assert!(html.contains("Gifts 100, new 10, unique 5"));

    assert!(html.contains("<strong>Sunday, Jan 19, 10:00 AM</strong> - Sunday Worship (Sanctuary)"));
    assert!(!html.contains("Jan 26, 10:00 AM"));
    assert!(html.contains("<strong>Wednesday, Jan 22, 7:00 PM</strong> - Midweek Prayer (Cana Campus)"));
    assert!(html.contains("Bible Study: Romans (Room 204)"));
    assert_eq!(newsletter.content.calendar.len(), 4);

    assert!(html.contains("<strong>Friday, Jan 24, 5:00 PM</strong> - Winter Retreat"));
    assert!(html.contains("<li>Serve Team \u{2014} <a href=\"#reg-102\">Details</a></li>"));
    assert!(!html.contains("Fall Picnic"));

    assert!(html.contains("<h3>Born from Above</h3><div>Grace and peace to you.</div>"));
    assert!(html.contains(r#"<img src="https://i.ytimg.com/vi/vid1/mqdefault.jpg""#));

    assert!(html.contains(r#"<a id="reg-101" name="reg-101"></a>"#));
    assert!(html.contains(r#"<a class="button" href="https://cana.churchcenter.com/registrations/events/101">View Details</a>"#));
    assert!(html.contains(r#"<p style="text-align:left;">Two days at the lake.</p>"#));
    assert!(!html.contains("{{"));
}

#[tokio::test]
async fn registrations_are_sorted_with_ongoing_last() {
    let services = services().await;
    let wire = Wire::new(mock_config(&services)).unwrap();

    let regs = wire.registrations(&sunday_morning()).await.unwrap();
    let ids: Vec<_> = regs.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, ["101", "102"]);
    assert!(regs[1].display_starts_at.is_none());
}

#[tokio::test]
async fn sermon_is_summarized_from_the_outline() {
    let services = services().await;
    let wire = Wire::new(mock_config(&services)).unwrap();

    let (video, summary) = wire.sermon(&sunday_morning()).await.unwrap();
    assert_eq!(video.map(|v| v.url).as_deref(), Some("https://youtu.be/vid1"));
    assert_eq!(summary, "Grace and peace to you.");
}

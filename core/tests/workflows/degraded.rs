// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Behavior when services are missing or failing.

use wire_api::ApiError;
use wire_core::{Config, CoreError, SUMMARY_FALLBACK, Wire};
use wiremock::matchers::method;
use wiremock::{Mock, ResponseTemplate};

use crate::common::{MockServices, TEMPLATE, ics_calendar, mock_config, signups_body, sunday_morning};

#[tokio::test]
async fn nothing_configured_still_renders() {
    let wire = Wire::new(Config::default()).unwrap();
    let newsletter = wire
        .build_newsletter(TEMPLATE, &sunday_morning())
        .await
        .unwrap();

    assert!(newsletter.content.calendar.is_empty());
    assert!(newsletter.content.registrations.is_empty());
    assert_eq!(newsletter.content.sermon, None);
    assert_eq!(newsletter.content.summary, SUMMARY_FALLBACK);
    assert!(newsletter.html.contains("No upcoming events."));
    assert!(newsletter.html.contains("<p>No upcoming registrations.</p>"));
    assert!(newsletter.html.contains("<h3>This Week's Message</h3>"));
    assert!(newsletter.html.contains("Remaining: $0 of $0"));
}

#[tokio::test]
async fn failed_summary_falls_back() {
    let services = MockServices::start().await;
    services.calendar(ics_calendar(&[])).await;
    services.signups(serde_json::json!({"data": []})).await;
    services
        .plans(
            serde_json::json!({"data": [{"type": "Plan", "id": "p1", "attributes": {"sort_date": "2025-01-12T16:00:00Z"}}]}),
            serde_json::json!({"data": [
                {"type": "Item", "id": "h", "attributes": {"item_type": "header", "title": "Message"}},
                {"type": "Item", "id": "m", "attributes": {"item_type": "item", "title": "Sermon", "description": "x".repeat(500)}}
            ]}),
        )
        .await;
    services.video().await;
    services.summary(500, "quota exceeded").await;

    let wire = Wire::new(mock_config(&services)).unwrap();
    let (video, summary) = wire.sermon(&sunday_morning()).await.unwrap();
    assert!(video.is_some());
    assert_eq!(summary, SUMMARY_FALLBACK);
}

#[tokio::test]
async fn plan_without_message_header_falls_back() {
    let services = MockServices::start().await;
    services
        .plans(
            serde_json::json!({"data": [{"type": "Plan", "id": "p1", "attributes": {"sort_date": "2025-01-12T16:00:00Z"}}]}),
            serde_json::json!({"data": [
                {"type": "Item", "id": "h", "attributes": {"item_type": "header", "title": "Welcome"}}
            ]}),
        )
        .await;
    services.video().await;
    services.summary(200, "should not be used").await;

    let wire = Wire::new(mock_config(&services)).unwrap();
    let (_, summary) = wire.sermon(&sunday_morning()).await.unwrap();
    assert_eq!(summary, SUMMARY_FALLBACK);
}

#[tokio::test]
async fn calendar_outage_fails_the_build() {
    let services = MockServices::start().await;
    services.signups(signups_body()).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&services.server)
        .await;

    let wire = Wire::new(mock_config(&services)).unwrap();
    let result = wire.calendar_events(&sunday_morning()).await;
    assert!(matches!(
        result,
        Err(CoreError::Api(ApiError::Status { status: 503, .. }))
    ));
}

#[tokio::test]
async fn rejected_credentials_are_reported() {
    let services = MockServices::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&services.server)
        .await;

    let wire = Wire::new(mock_config(&services)).unwrap();
    assert!(matches!(
        wire.registrations(&sunday_morning()).await,
        Err(CoreError::Api(ApiError::Auth(_)))
    ));
}

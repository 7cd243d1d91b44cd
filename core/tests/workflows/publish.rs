// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Draft campaign creation.

use wire_core::{Config, CoreError, Wire, assemble};
use wiremock::matchers::{body_json, body_partial_json, header_exists, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{MockServices, mock_config, sunday_morning};

#[tokio::test]
async fn publish_creates_draft_and_uploads_html() {
    let services = MockServices::start().await;

    Mock::given(method("POST"))
        .and(path("/mailchimp/campaigns"))
        .and(header_exists("Authorization"))
        .and(body_partial_json(serde_json::json!({
            "type": "regular",
            "recipients": {"list_id": "list1"},
            "settings": {
                "subject_line": "January 19, 2025 Wire",
                "title": "January 19, 2025 Wire",
                "from_name": "Cana Church",
                "reply_to": "cana@canachurch.com"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"id":"c-9","web_id":4242}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&services.server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/mailchimp/campaigns/c-9/content"))
        .and(body_json(serde_json::json!({"html": "<p>Hello {{F_R}}</p>"})))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .expect(1)
        .mount(&services.server)
        .await;

    let wire = Wire::new(mock_config(&services)).unwrap();
    let mut newsletter = assemble("", empty_content(&wire), &sunday_morning());
    newsletter.html = "<p>Hello {{F_R}}</p>".to_string();

    let created = wire.publish(&newsletter).await.unwrap();
    assert_eq!(created.id, "c-9");
    assert_eq!(created.web_id, 4242);
}

#[tokio::test]
async fn publish_without_mailchimp_is_not_configured() {
    let wire = Wire::new(Config::default()).unwrap();
    let newsletter = assemble("<p></p>", empty_content(&wire), &sunday_morning());
    assert!(matches!(
        wire.publish(&newsletter).await,
        Err(CoreError::NotConfigured(_))
    ));
}

#[tokio::test]
async fn publish_without_list_is_not_configured() {
    let mut config = Config::default();
    config.mailchimp.api_key = Some("key-us1".to_string());
    let wire = Wire::new(config).unwrap();
    let newsletter = assemble("<p></p>", empty_content(&wire), &sunday_morning());
    assert!(matches!(
        wire.publish(&newsletter).await,
        Err(CoreError::NotConfigured("mailchimp.list_id"))
    ));
}

fn empty_content(wire: &Wire) -> wire_core::NewsletterContent {
    wire_core::NewsletterContent {
        financial: wire.config().giving,
        calendar: Vec::new(),
        registrations: Vec::new(),
        sermon: None,
        summary: String::new(),
    }
}

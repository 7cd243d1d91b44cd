// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! A wiremock server standing in for every external service.

use wire_core::Config;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const JSON_API: &str = "application/vnd.api+json";

/// Mock server plus helpers mounting canned responses.
pub struct MockServices {
    pub server: MockServer,
}

impl MockServices {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub async fn calendar(&self, ics: String) {
        Mock::given(method("GET"))
            .and(path("/calendar.ics"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(ics, "text/calendar"))
            .mount(&self.server)
            .await;
    }

    pub async fn signups(&self, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/registrations/v2/signups"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_string(), JSON_API))
            .mount(&self.server)
            .await;
    }

    pub async fn plans(&self, plans: serde_json::Value, items: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/services/v2/service_types/884831/plans"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(plans.to_string(), JSON_API))
            .mount(&self.server)
            .await;
        Mock::given(method("GET"))
            .and(path("/services/v2/service_types/884831/plans/p1/items"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(items.to_string(), JSON_API))
            .mount(&self.server)
            .await;
    }

    pub async fn video(&self) {
        Mock::given(method("GET"))
            .and(path("/youtube/search"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                serde_json::json!({"items": [{
                    "id": {"kind": "youtube#video", "videoId": "vid1"},
                    "snippet": {
                        "title": "Born from Above",
                        "thumbnails": {"medium": {"url": "https://i.ytimg.com/vi/vid1/mqdefault.jpg"}}
                    }
                }]})
                .to_string(),
                "application/json",
            ))
            .mount(&self.server)
            .await;
    }

    pub async fn summary(&self, status: u16, text: &str) {
        Mock::given(method("POST"))
            .and(path("/gemini/models/gemini-2.0-flash:generateContent"))
            .respond_with(ResponseTemplate::new(status).set_body_raw(
                serde_json::json!({"candidates": [{"content": {"parts": [{"text": text}]}}]})
                    .to_string(),
                "application/json",
            ))
            .mount(&self.server)
            .await;
    }
}

/// A configuration with every service pointed at `services`.
pub fn mock_config(services: &MockServices) -> Config {
    let uri = services.uri();
    let mut config = Config::default();
    config.calendar.ics_url = Some(format!("{uri}/calendar.ics"));
    config.planning_center.app_id = Some("app".to_string());
    config.planning_center.secret = Some("secret".to_string());
    config.planning_center.base_url = Some(uri.clone());
    config.youtube.channel_id = Some("UC1".to_string());
    config.youtube.api_key = Some("yt".to_string());
    config.youtube.base_url = Some(format!("{uri}/youtube"));
    config.gemini.api_key = Some("g".to_string());
    config.gemini.base_url = Some(format!("{uri}/gemini"));
    config.mailchimp.api_key = Some("key-us1".to_string());
    config.mailchimp.list_id = Some("list1".to_string());
    config.mailchimp.base_url = Some(format!("{uri}/mailchimp"));
    config.giving.gifts_received = 30_000;
    config.giving.giving_goal = 45_000;
    config.giving.total_gifts = 100;
    config.giving.new_givers = 10;
    config.giving.unique_givers = 5;
    config
}

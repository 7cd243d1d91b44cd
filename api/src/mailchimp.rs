// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Mailchimp Marketing API: draft campaign creation.

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::config::{AuthMethod, ServiceConfig};
use crate::error::ApiError;
use crate::http::HttpClient;

/// The datacenter part of a Mailchimp API key, the suffix after the last `-`.
#[must_use]
pub fn datacenter(api_key: &str) -> Option<&str> {
    api_key
        .rsplit_once('-')
        .map(|(_, dc)| dc)
        .filter(|dc| !dc.is_empty())
}

/// What a new draft campaign should look like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignDraft {
    /// Audience (list) id
    pub list_id: String,
    /// Subject line, also used as the campaign title
    pub subject: String,
    /// Sender name
    pub from_name: String,
    /// Reply-to address
    pub reply_to: String,
    /// Campaign folder, if any
    pub folder_id: Option<String>,
}

/// Identifiers of a created campaign.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedCampaign {
    /// API id
    pub id: String,
    /// Id used in the web UI
    #[serde(default)]
    pub web_id: u64,
}

#[derive(Debug, Serialize)]
struct CreateCampaign<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    recipients: Recipients<'a>,
    settings: Settings<'a>,
}

#[derive(Debug, Serialize)]
struct Recipients<'a> {
    list_id: &'a str,
}

#[derive(Debug, Serialize)]
struct Settings<'a> {
    subject_line: &'a str,
    from_name: &'a str,
    reply_to: &'a str,
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    folder_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct SetContent<'a> {
    html: &'a str,
}

/// Mailchimp Marketing API client.
#[derive(Debug)]
pub struct MailchimpClient {
    http: HttpClient,
}

impl MailchimpClient {
    /// Creates a client for the datacenter encoded in `api_key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key has no datacenter suffix or HTTP client
    /// initialization fails.
    pub fn new(api_key: &str) -> Result<Self, ApiError> {
        let dc = datacenter(api_key).ok_or_else(|| {
            ApiError::Config("Mailchimp API key has no datacenter suffix".into())
        })?;
        let config = ServiceConfig::new(format!("https://{dc}.api.mailchimp.com/3.0")).with_auth(
            AuthMethod::Basic {
                username: "wire".into(),
                password: api_key.into(),
            },
        );
        Self::with_config(config)
    }

    /// Creates a client from a full service config.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client initialization fails.
    pub fn with_config(config: ServiceConfig) -> Result<Self, ApiError> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    /// Creates a regular campaign draft.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    #[tracing::instrument(skip(self, draft), fields(subject = %draft.subject))]
    pub async fn create_campaign(&self, draft: &CampaignDraft) -> Result<CreatedCampaign, ApiError> {
        let body = CreateCampaign {
            kind: "regular",
            recipients: Recipients {
                list_id: &draft.list_id,
            },
            settings: Settings {
                subject_line: &draft.subject,
                from_name: &draft.from_name,
                reply_to: &draft.reply_to,
                title: &draft.subject,
                folder_id: draft.folder_id.as_deref(),
            },
        };
        let req = self.http.build_request(Method::POST, "/campaigns").json(&body);
        let created: CreatedCampaign = self.http.execute_json(req).await?;
        tracing::info!(campaign = %created.id, web_id = created.web_id, "created draft");
        Ok(created)
    }

    /// Replaces the HTML content of a campaign.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[tracing::instrument(skip(self, html), fields(html_len = html.len()))]
    pub async fn set_content(&self, campaign_id: &str, html: &str) -> Result<(), ApiError> {
        let req = self
            .http
            .build_request(Method::PUT, &format!("/campaigns/{campaign_id}/content"))
            .json(&SetContent { html });
        self.http.execute(req).await?;
        Ok(())
    }

    /// Creates a draft and sets its HTML in one go.
    ///
    /// # Errors
    ///
    /// Returns an error if either request fails.
    pub async fn create_draft_with_html(
        &self,
        draft: &CampaignDraft,
        html: &str,
    ) -> Result<CreatedCampaign, ApiError> {
        let created = self.create_campaign(draft).await?;
        self.set_content(&created.id, html).await?;
        Ok(created)
    }
}

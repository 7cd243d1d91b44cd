// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

use jiff::Zoned;
use jiff::tz::TimeZone;
use wire_api::{
    AuthMethod, CampaignDraft, CreatedCampaign, GEMINI_BASE_URL, GeminiClient, IcsFeedClient,
    LatestVideo, MailchimpClient, PLANNING_CENTER_BASE_URL, PlanningCenterClient, ServiceConfig,
    YOUTUBE_BASE_URL, YouTubeClient,
};

use crate::calendar::fetch_calendar_events;
use crate::config::Config;
use crate::error::CoreError;
use crate::event::CalendarEvent;
use crate::newsletter::{Newsletter, NewsletterContent, assemble};
use crate::registration::{Registration, fetch_open_registrations};
use crate::sermon::{
    DEFAULT_SERMON_TITLE, SUMMARY_FALLBACK, fetch_latest_sermon, fetch_message_outline,
    summarize_sermon,
};

/// Wire newsletter application core.
#[derive(Debug)]
pub struct Wire {
    config: Config,
    tz: TimeZone,
    ics: Option<IcsFeedClient>,
    planning_center: Option<PlanningCenterClient>,
    youtube: Option<YouTubeClient>,
    gemini: Option<GeminiClient>,
    mailchimp: Option<MailchimpClient>,
}

impl Wire {
    /// Creates a new instance, building a client for every configured
    /// service. Services without credentials are left out.
    ///
    /// # Errors
    ///
    /// Returns an error if the time zone is unknown or a client cannot be
    /// built.
    pub fn new(config: Config) -> Result<Self, CoreError> {
        let tz = config.time_zone()?;

        let ics = config
            .calendar
            .ics_url
            .as_deref()
            .map(IcsFeedClient::new)
            .transpose()?;

        let pco = &config.planning_center;
        let planning_center = match (&pco.app_id, &pco.secret) {
            (Some(app_id), Some(secret)) => {
                let base = pco.base_url.as_deref().unwrap_or(PLANNING_CENTER_BASE_URL);
                let service = ServiceConfig::new(base).with_auth(AuthMethod::Basic {
                    username: app_id.clone(),
                    password: secret.clone(),
                });
                Some(PlanningCenterClient::with_config(service)?)
            }
            _ => None,
        };

        let youtube = match &config.youtube.api_key {
            Some(key) => {
                let base = config.youtube.base_url.as_deref().unwrap_or(YOUTUBE_BASE_URL);
                Some(YouTubeClient::with_config(ServiceConfig::new(base), key.clone())?)
            }
            None => None,
        };

        let gemini = match &config.gemini.api_key {
            Some(key) => {
                let base = config.gemini.base_url.as_deref().unwrap_or(GEMINI_BASE_URL);
                let service = ServiceConfig::new(base)
                    .with_auth(AuthMethod::Header {
                        name: "x-goog-api-key".into(),
                        value: key.clone(),
                    })
                    .with_timeout(60);
                Some(GeminiClient::with_config(service, config.gemini.model.clone())?)
            }
            None => None,
        };

        let mailchimp = match (&config.mailchimp.api_key, &config.mailchimp.base_url) {
            (Some(key), Some(base)) => {
                let service = ServiceConfig::new(base.clone()).with_auth(AuthMethod::Basic {
                    username: "wire".into(),
                    password: key.clone(),
                });
                Some(MailchimpClient::with_config(service)?)
            }
            (Some(key), None) => Some(MailchimpClient::new(key)?),
            (None, _) => None,
        };

        Ok(Self {
            config,
            tz,
            ics,
            planning_center,
            youtube,
            gemini,
            mailchimp,
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The zone all dates are computed and shown in.
    pub fn time_zone(&self) -> &TimeZone {
        &self.tz
    }

    /// The current time in the configured zone.
    pub fn now(&self) -> Zoned {
        Zoned::now().with_time_zone(self.tz.clone())
    }

    /// Upcoming calendar events, deduplicated and truncated.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed cannot be fetched.
    pub async fn calendar_events(&self, now: &Zoned) -> Result<Vec<CalendarEvent>, CoreError> {
        let options = self.config.calendar_options();
        fetch_calendar_events(self.ics.as_ref(), now, &self.tz, &options).await
    }

    /// Registrations open at `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the signups cannot be fetched.
    pub async fn registrations(&self, now: &Zoned) -> Result<Vec<Registration>, CoreError> {
        fetch_open_registrations(self.planning_center.as_ref(), now, &self.tz).await
    }

    /// The latest sermon video and its summary.
    ///
    /// A missing outline or a failed summary falls back to the stock
    /// invitation text.
    ///
    /// # Errors
    ///
    /// Returns an error if the video search fails.
    pub async fn sermon(&self, now: &Zoned) -> Result<(Option<LatestVideo>, String), CoreError> {
        let video = fetch_latest_sermon(
            self.youtube.as_ref(),
            self.config.youtube.channel_id.as_deref(),
        )
        .await?;

        let transcript = match &self.planning_center {
            Some(client) => {
                let service_type_id = &self.config.planning_center.service_type_id;
                match fetch_message_outline(client, service_type_id, now).await {
                    Ok(outline) => outline.description,
                    Err(error) => {
                        tracing::warn!(%error, "no message outline, using fallback summary");
                        String::new()
                    }
                }
            }
            None => String::new(),
        };

        let title = video.as_ref().map_or(DEFAULT_SERMON_TITLE, |v| v.title.as_str());
        let summary = summarize_sermon(self.gemini.as_ref(), title, &transcript)
            .await
            .unwrap_or_else(|error| {
                tracing::warn!(%error, "summarization failed, using fallback summary");
                SUMMARY_FALLBACK.to_string()
            });
        Ok((video, summary))
    }

    /// Gathers every section of the newsletter concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first error of any section.
    pub async fn gather(&self, now: &Zoned) -> Result<NewsletterContent, CoreError> {
        let (calendar, registrations, sermon) = tokio::join!(
            self.calendar_events(now),
            self.registrations(now),
            self.sermon(now),
        );
        let (sermon, summary) = sermon?;
        Ok(NewsletterContent {
            financial: self.config.giving,
            calendar: calendar?,
            registrations: registrations?,
            sermon,
            summary,
        })
    }

    /// Gathers all content and renders it into `template`.
    ///
    /// # Errors
    ///
    /// Returns an error if gathering fails.
    #[tracing::instrument(skip_all)]
    pub async fn build_newsletter(&self, template: &str, now: &Zoned) -> Result<Newsletter, CoreError> {
        let now = now.with_time_zone(self.tz.clone());
        let content = self.gather(&now).await?;
        tracing::info!(
            calendar = content.calendar.len(),
            registrations = content.registrations.len(),
            video = ?content.sermon.as_ref().map(|v| &v.video_id),
            "gathered newsletter content"
        );
        Ok(assemble(template, content, &now))
    }

    /// Reads the configured template file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub async fn read_template(&self) -> Result<String, CoreError> {
        let path = &self.config.newsletter.template;
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CoreError::Io {
                path: path.clone(),
                source,
            })
    }

    /// Creates the campaign draft for `newsletter`.
    ///
    /// # Errors
    ///
    /// Returns an error if Mailchimp is not configured or a request fails.
    #[tracing::instrument(skip_all, fields(subject = %newsletter.subject))]
    pub async fn publish(&self, newsletter: &Newsletter) -> Result<CreatedCampaign, CoreError> {
        let client = self
            .mailchimp
            .as_ref()
            .ok_or(CoreError::NotConfigured("mailchimp.api_key"))?;
        let list_id = self
            .config
            .mailchimp
            .list_id
            .clone()
            .ok_or(CoreError::NotConfigured("mailchimp.list_id"))?;

        let draft = CampaignDraft {
            list_id,
            subject: newsletter.subject.clone(),
            from_name: self.config.newsletter.from_name.clone(),
            reply_to: self.config.newsletter.reply_to.clone(),
            folder_id: self.config.mailchimp.folder_id.clone(),
        };
        Ok(client.create_draft_with_html(&draft, &newsletter.html).await?)
    }
}

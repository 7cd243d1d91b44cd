// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

use jiff::tz::TimeZone;
use wire_api::DEFAULT_GEMINI_MODEL;
use wire_ical::{CountScope, ExpandOptions};

use crate::calendar::{CalendarOptions, DEFAULT_LOCATION};
use crate::dedupe::DedupeOptions;
use crate::error::CoreError;
use crate::finance::FinancialStats;

/// The name of the Wire application.
pub const APP_NAME: &str = "wire";

/// Configuration for the Wire application.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output, template and sender settings
    pub newsletter: NewsletterConfig,
    /// Calendar feed and event list settings
    pub calendar: CalendarConfig,
    /// Planning Center credentials and service type
    pub planning_center: PlanningCenterConfig,
    /// Sermon video lookup
    pub youtube: YouTubeConfig,
    /// Sermon summarization
    pub gemini: GeminiConfig,
    /// Draft campaign creation
    pub mailchimp: MailchimpConfig,
    /// Giving statistics for the current period
    pub giving: FinancialStats,
}

impl Config {
    /// Overrides file values with the environment, using `lookup` to read
    /// variables. Empty values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(v) = var("CALENDAR_ICS") {
            self.calendar.ics_url = Some(v);
        }
        if let Some(v) = var("PCO_PAT_ID") {
            self.planning_center.app_id = Some(v);
        }
        if let Some(v) = var("PCO_PAT_SECRET") {
            self.planning_center.secret = Some(v);
        }
        if let Some(v) = var("YT_CHANNEL_ID") {
            self.youtube.channel_id = Some(v);
        }
        if let Some(v) = var("YT_API_KEY") {
            self.youtube.api_key = Some(v);
        }
        if let Some(v) = var("GEMINI_API_KEY") {
            self.gemini.api_key = Some(v);
        }
        if let Some(v) = var("GEMINI_MODEL") {
            self.gemini.model = v;
        }
        if let Some(v) = var("MAILCHIMP_API_KEY") {
            self.mailchimp.api_key = Some(v);
        }
        if let Some(v) = var("MAILCHIMP_LIST_ID") {
            self.mailchimp.list_id = Some(v);
        }
        if let Some(v) = var("MC_FROM_NAME") {
            self.newsletter.from_name = v;
        }
        if let Some(v) = var("MC_REPLY_TO") {
            self.newsletter.reply_to = v;
        }
    }

    /// Normalize the configuration, expanding `~` and config-directory
    /// prefixes in paths.
    ///
    /// # Errors
    ///
    /// Returns an error if a path cannot be expanded.
    pub fn normalize(&mut self) -> Result<(), CoreError> {
        self.newsletter.template = expand_path(&self.newsletter.template)?;
        self.newsletter.output = expand_path(&self.newsletter.output)?;
        Ok(())
    }

    /// The default time zone all dates are rendered in.
    ///
    /// # Errors
    ///
    /// Returns an error if the zone is not in the time zone database.
    pub fn time_zone(&self) -> Result<TimeZone, CoreError> {
        TimeZone::get(&self.newsletter.time_zone).map_err(|_| CoreError::UnknownTimeZone {
            name: self.newsletter.time_zone.clone(),
        })
    }

    /// Options for the calendar pipeline.
    #[must_use]
    pub fn calendar_options(&self) -> CalendarOptions {
        let c = &self.calendar;
        CalendarOptions {
            lookback_days: c.lookback_days,
            lookahead_days: c.lookahead_days,
            default_location: c.default_location.clone(),
            max_events: c.max_events,
            dedupe: DedupeOptions {
                bucket_minutes: c.bucket_minutes,
                include_location_in_key: c.include_location_in_key,
            },
            expand: ExpandOptions {
                count_scope: c.count_scope.into(),
            },
        }
    }
}

/// Output, template and sender settings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct NewsletterConfig {
    /// IANA zone used for every date shown
    pub time_zone: String,
    /// HTML template with placeholders
    pub template: PathBuf,
    /// Where dry runs write the rendered HTML
    pub output: PathBuf,
    /// Sender name of the campaign
    pub from_name: String,
    /// Reply-to address of the campaign
    pub reply_to: String,
}

impl Default for NewsletterConfig {
    fn default() -> Self {
        Self {
            time_zone: "America/Chicago".to_string(),
            template: PathBuf::from("templates/base.html"),
            output: PathBuf::from("test.html"),
            from_name: "Cana Church".to_string(),
            reply_to: "cana@canachurch.com".to_string(),
        }
    }
}

/// Calendar feed and event list settings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    /// Published iCalendar feed; no events are listed without it
    pub ics_url: Option<String>,
    /// Days before today included
    pub lookback_days: i64,
    /// Days after today included
    pub lookahead_days: i64,
    /// Maximum number of events listed
    pub max_events: usize,
    /// Location for events without one
    pub default_location: String,
    /// Start-time bucket for near-duplicate detection, in minutes
    pub bucket_minutes: i64,
    /// Whether events at different places are never merged
    pub include_location_in_key: bool,
    /// How `COUNT` applies to rules on several weekdays
    pub count_scope: CountScopeConfig,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        let options = CalendarOptions::default();
        Self {
            ics_url: None,
            lookback_days: options.lookback_days,
            lookahead_days: options.lookahead_days,
            max_events: options.max_events,
            default_location: DEFAULT_LOCATION.to_string(),
            bucket_minutes: options.dedupe.bucket_minutes,
            include_location_in_key: options.dedupe.include_location_in_key,
            count_scope: CountScopeConfig::default(),
        }
    }
}

/// Configured form of [`CountScope`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CountScopeConfig {
    /// Each weekday counted separately
    #[default]
    PerWeekday,
    /// One count across all weekdays
    Shared,
}

impl From<CountScopeConfig> for CountScope {
    fn from(value: CountScopeConfig) -> Self {
        match value {
            CountScopeConfig::PerWeekday => CountScope::PerWeekday,
            CountScopeConfig::Shared => CountScope::Shared,
        }
    }
}

/// Planning Center credentials and service type.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct PlanningCenterConfig {
    /// Personal access token application id
    pub app_id: Option<String>,
    /// Personal access token secret
    pub secret: Option<String>,
    /// Service type whose plans carry the sermon outline
    pub service_type_id: String,
    /// API root override
    pub base_url: Option<String>,
}

impl Default for PlanningCenterConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            secret: None,
            service_type_id: "884831".to_string(),
            base_url: None,
        }
    }
}

/// Sermon video lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct YouTubeConfig {
    /// Channel to take the latest upload from
    pub channel_id: Option<String>,
    /// Data API key
    pub api_key: Option<String>,
    /// API root override
    pub base_url: Option<String>,
}

/// Sermon summarization.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    /// API key; the fallback summary is used without it
    pub api_key: Option<String>,
    /// Model name
    pub model: String,
    /// API root override
    pub base_url: Option<String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: None,
        }
    }
}

/// Draft campaign creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct MailchimpConfig {
    /// API key, ending in `-<datacenter>`
    pub api_key: Option<String>,
    /// Audience receiving the newsletter
    pub list_id: Option<String>,
    /// Campaign folder
    pub folder_id: Option<String>,
    /// API root override
    pub base_url: Option<String>,
}

fn expand_path(path: &Path) -> Result<PathBuf, CoreError> {
    if path.is_absolute() {
        return Ok(path.to_owned());
    }

    let invalid = |reason| CoreError::InvalidPath {
        path: path.display().to_string(),
        reason,
    };
    let s = path.to_str().ok_or_else(|| invalid("not valid UTF-8"))?;

    // Handle tilde and home directory
    let home_prefixes: &[&str] = if cfg!(unix) {
        &["~/", "$HOME/", "${HOME}/"]
    } else {
        &[r"~\", "~/", r"%UserProfile%\", r"%UserProfile%/"]
    };
    for prefix in home_prefixes {
        if let Some(stripped) = s.strip_prefix(prefix) {
            let home = dirs::home_dir().ok_or_else(|| invalid("home directory not found"))?;
            return Ok(home.join(stripped));
        }
    }

    // Handle config directories
    let config_prefixes: &[&str] = if cfg!(unix) {
        &["$XDG_CONFIG_HOME/", "${XDG_CONFIG_HOME}/"]
    } else {
        &[r"%LOCALAPPDATA%\", "%LOCALAPPDATA%/"]
    };
    for prefix in config_prefixes {
        if let Some(stripped) = s.strip_prefix(prefix) {
            let config = get_config_dir().ok_or_else(|| invalid("config directory not found"))?;
            return Ok(config.join(stripped));
        }
    }

    Ok(path.into())
}

fn get_config_dir() -> Option<PathBuf> {
    #[cfg(unix)]
    let config_dir = xdg::BaseDirectories::new().get_config_home();
    #[cfg(windows)]
    let config_dir = dirs::config_dir();
    config_dir
}

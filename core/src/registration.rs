// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Open registrations (Planning Center signups).

use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};
use wire_api::{Document, PlanningCenterClient, Resource};

use crate::error::CoreError;

/// A signup currently open for registration.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Registration {
    /// Signup id
    pub id: String,
    /// Signup name
    pub title: String,
    /// First known start: next signup time, else the earliest signup time,
    /// else the opening of registration
    pub starts_at: Zoned,
    /// Start shown to readers; `None` for ongoing signups
    pub display_starts_at: Option<Zoned>,
    /// Public page of the signup
    pub url: String,
    /// Description as HTML
    pub description_html: Option<String>,
    /// Logo image
    pub logo_url: String,
}

impl Registration {
    /// Anchor used to link from the summary list to the full entry.
    #[must_use]
    pub fn anchor_id(&self) -> String {
        if self.id.is_empty() {
            format!("reg-{}", self.title.split_whitespace().collect::<Vec<_>>().join("-").to_lowercase())
        } else {
            format!("reg-{}", self.id)
        }
    }
}

/// Fetches the signups that are open right now.
///
/// Without a client (no credentials configured) the list is empty.
///
/// # Errors
///
/// Returns an error if the request fails.
#[tracing::instrument(skip_all)]
pub async fn fetch_open_registrations(
    client: Option<&PlanningCenterClient>,
    now: &Zoned,
    tz: &TimeZone,
) -> Result<Vec<Registration>, CoreError> {
    let Some(client) = client else {
        tracing::info!("no Planning Center credentials, skipping registrations");
        return Ok(Vec::new());
    };
    let doc = client.signups().await?;
    Ok(registrations_from_document(&doc, now, tz))
}

/// Interprets a signups document.
///
/// Keeps only signups that have a start, a public url, a logo and are open
/// at `now`; sorted by display time with ongoing signups last.
#[must_use]
pub fn registrations_from_document(doc: &Document, now: &Zoned, tz: &TimeZone) -> Vec<Registration> {
    let now = now.timestamp();
    let mut out: Vec<Registration> = doc
        .data
        .iter()
        .filter_map(|signup| interpret(doc, signup, now, tz))
        .collect();
    out.sort_by_key(|r| {
        r.display_starts_at
            .as_ref()
            .map_or(Timestamp::MAX, Zoned::timestamp)
    });
    out
}

fn interpret(doc: &Document, signup: &Resource, now: Timestamp, tz: &TimeZone) -> Option<Registration> {
    let next = signup
        .related("next_signup_time")
        .first()
        .and_then(|r| doc.find_included(r))
        .and_then(|r| timestamp_attr(r, "starts_at"));

    let mut times: Vec<Timestamp> = signup
        .related("signup_times")
        .into_iter()
        .filter_map(|r| doc.find_included(r))
        .filter_map(|r| timestamp_attr(r, "starts_at"))
        .collect();
    times.sort();

    let open_at = timestamp_attr(signup, "open_at");
    let close_at = timestamp_attr(signup, "close_at");

    let starts_at = next.or_else(|| times.first().copied()).or(open_at);
    let open_now = (open_at.is_some() || close_at.is_some())
        && open_at.is_none_or(|t| t <= now)
        && close_at.is_none_or(|t| t > now);

    let next_future = next
        .filter(|t| *t > now)
        .or_else(|| times.iter().copied().find(|t| *t > now));
    let ongoing = open_now && next_future.is_none();
    let display = if ongoing { None } else { next_future.or(starts_at) };

    let url = signup
        .attr_str("new_registration_url")
        .and_then(|u| u.split("/reservations/new").next())
        .filter(|u| !u.is_empty());
    let logo = signup.attr_str("logo_url");

    let (Some(starts_at), Some(url), Some(logo), true) = (starts_at, url, logo, open_now) else {
        tracing::trace!(id = %signup.id, open_now, "signup not listed");
        return None;
    };

    Some(Registration {
        id: signup.id.clone(),
        title: signup.attr_str("name").unwrap_or_default().to_string(),
        starts_at: starts_at.to_zoned(tz.clone()),
        display_starts_at: display.map(|t| t.to_zoned(tz.clone())),
        url: url.to_string(),
        description_html: signup.attr_str("description").map(str::to_string),
        logo_url: logo.to_string(),
    })
}

fn timestamp_attr(resource: &Resource, name: &str) -> Option<Timestamp> {
    let raw = resource.attr_str(name)?;
    raw.parse()
        .inspect_err(|error| tracing::debug!(%error, id = %resource.id, name, "unparseable timestamp"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> Zoned {
        "2025-01-15T12:00:00-06:00[America/Chicago]".parse().unwrap()
    }

    fn chicago() -> TimeZone {
        TimeZone::get("America/Chicago").unwrap()
    }

    fn doc(json: serde_json::Value) -> Document {
        serde_json::from_value(json).unwrap()
    }

    fn signup(id: &str, name: &str, extra: serde_json::Value) -> serde_json::Value {
        let mut attributes = serde_json::json!({
            "name": name,
            "new_registration_url": format!("https://cana.churchcenter.com/registrations/events/{id}/reservations/new"),
            "logo_url": format!("https://img.example/{id}.png"),
            "open_at": "2025-01-01T00:00:00Z",
        });
        if let (Some(target), Some(extra)) = (attributes.as_object_mut(), extra.as_object()) {
            for (k, v) in extra {
                target.insert(k.clone(), v.clone());
            }
        }
        serde_json::json!({"type": "Signup", "id": id, "attributes": attributes})
    }

    #[test]
    fn next_signup_time_drives_display() {
        let mut s = signup("1", "Fall Retreat", serde_json::json!({}));
        s["relationships"] = serde_json::json!({
            "next_signup_time": {"data": {"type": "SignupTime", "id": "t1"}}
        });
        let d = doc(serde_json::json!({
            "data": [s],
            "included": [{"type": "SignupTime", "id": "t1", "attributes": {"starts_at": "2025-02-01T15:00:00Z"}}]
        }));
        let regs = registrations_from_document(&d, &now(), &chicago());
        assert_eq!(regs.len(), 1);
        let r = &regs[0];
        assert_eq!(r.url, "https://cana.churchcenter.com/registrations/events/1");
        assert_eq!(r.starts_at.timestamp().to_string(), "2025-02-01T15:00:00Z");
        assert_eq!(r.display_starts_at.as_ref().map(|z| z.hour()), Some(9));
        assert_eq!(r.anchor_id(), "reg-1");
    }

    #[test]
    fn earliest_signup_time_is_fallback_and_past_times_are_skipped_for_display() {
        let mut s = signup("2", "Class", serde_json::json!({}));
        s["relationships"] = serde_json::json!({
            "next_signup_time": {"data": null},
            "signup_times": {"data": [
                {"type": "SignupTime", "id": "b"},
                {"type": "SignupTime", "id": "a"}
            ]}
        });
        let d = doc(serde_json::json!({
            "data": [s],
            "included": [
                {"type": "SignupTime", "id": "a", "attributes": {"starts_at": "2025-01-10T15:00:00Z"}},
                {"type": "SignupTime", "id": "b", "attributes": {"starts_at": "2025-01-20T15:00:00Z"}}
            ]
        }));
        let regs = registrations_from_document(&d, &now(), &chicago());
        assert_eq!(regs[0].starts_at.timestamp().to_string(), "2025-01-10T15:00:00Z");
        assert_eq!(
            regs[0].display_starts_at.as_ref().map(|z| z.timestamp().to_string()),
            Some("2025-01-20T15:00:00Z".to_string())
        );
    }

    #[test]
    fn ongoing_signups_sort_last_without_display_time() {
        let ongoing = signup("3", "Nursery Volunteers", serde_json::json!({}));
        let mut dated = signup("4", "Gala", serde_json::json!({}));
        dated["relationships"] = serde_json::json!({
            "signup_times": {"data": [{"type": "SignupTime", "id": "x"}]}
        });
        let d = doc(serde_json::json!({
            "data": [ongoing, dated],
            "included": [{"type": "SignupTime", "id": "x", "attributes": {"starts_at": "2025-03-01T01:00:00Z"}}]
        }));
        let regs = registrations_from_document(&d, &now(), &chicago());
        assert_eq!(regs.len(), 2);
        assert_eq!(regs[0].id, "4");
        assert_eq!(regs[1].id, "3");
        assert_eq!(regs[1].display_starts_at, None);
        // falls back to open_at
        assert_eq!(regs[1].starts_at.timestamp().to_string(), "2025-01-01T00:00:00Z");
    }

    #[test]
    fn closed_unscheduled_or_incomplete_signups_are_dropped() {
        let closed = signup("5", "Closed", serde_json::json!({"close_at": "2025-01-14T00:00:00Z"}));
        let future = signup("6", "Not Yet", serde_json::json!({"open_at": "2025-02-01T00:00:00Z"}));
        let unscheduled = signup("7", "Whenever", serde_json::json!({"open_at": null}));
        let no_logo = signup("8", "Plain", serde_json::json!({"logo_url": ""}));
        let d = doc(serde_json::json!({"data": [closed, future, unscheduled, no_logo]}));
        assert!(registrations_from_document(&d, &now(), &chicago()).is_empty());
    }

    #[test]
    fn anchor_falls_back_to_slugged_title() {
        let r = Registration {
            id: String::new(),
            title: "Fall  Men's Retreat".to_string(),
            starts_at: now(),
            display_starts_at: None,
            url: String::new(),
            description_html: None,
            logo_url: String::new(),
        };
        assert_eq!(r.anchor_id(), "reg-fall-men's-retreat");
    }

    #[tokio::test]
    async fn without_client_nothing_is_fetched() {
        let regs = fetch_open_registrations(None, &now(), &chicago()).await.unwrap();
        assert!(regs.is_empty());
    }
}

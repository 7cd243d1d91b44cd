// SPDX-FileCopyrightText: 2025-2026 Cana Church Communications <wire@canachurch.com>
//
// SPDX-License-Identifier: Apache-2.0

//! Planning Center registrations and services endpoints.
//!
//! Responses follow JSON:API: a `data` array of resources plus an optional
//! `included` array of related resources referenced by `(type, id)`.

use std::collections::HashMap;

use reqwest::Method;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::config::{AuthMethod, PLANNING_CENTER_BASE_URL, ServiceConfig};
use crate::error::ApiError;
use crate::http::HttpClient;

const JSON_API: &str = "application/vnd.api+json";

/// A JSON:API top-level document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    /// Primary resources
    #[serde(default)]
    pub data: Vec<Resource>,
    /// Related resources pulled in via `include=`
    #[serde(default)]
    pub included: Vec<Resource>,
}

impl Document {
    /// Looks up an included resource by reference.
    #[must_use]
    pub fn find_included(&self, reference: &ResourceRef) -> Option<&Resource> {
        self.included
            .iter()
            .find(|r| r.kind == reference.kind && r.id == reference.id)
    }

    /// Index of the included resources keyed by `(type, id)`.
    #[must_use]
    pub fn included_index(&self) -> HashMap<(&str, &str), &Resource> {
        self.included
            .iter()
            .map(|r| ((r.kind.as_str(), r.id.as_str()), r))
            .collect()
    }
}

/// A single JSON:API resource.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Resource {
    /// Resource type
    #[serde(rename = "type")]
    pub kind: String,
    /// Resource id
    pub id: String,
    /// Attributes, kept untyped
    #[serde(default)]
    pub attributes: Map<String, Value>,
    /// Relationships by name
    #[serde(default)]
    pub relationships: HashMap<String, Relationship>,
}

impl Resource {
    /// A string attribute; empty strings count as absent.
    #[must_use]
    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// References of the named relationship, empty when absent.
    #[must_use]
    pub fn related(&self, name: &str) -> Vec<&ResourceRef> {
        match self.relationships.get(name).and_then(|r| r.data.as_ref()) {
            Some(RelationshipData::One(one)) => vec![one],
            Some(RelationshipData::Many(many)) => many.iter().collect(),
            None => Vec::new(),
        }
    }
}

/// A JSON:API relationship object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Relationship {
    /// Linkage, `null` for an empty to-one relationship
    #[serde(default)]
    pub data: Option<RelationshipData>,
}

/// Resource linkage of a relationship.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RelationshipData {
    /// To-one linkage
    One(ResourceRef),
    /// To-many linkage
    Many(Vec<ResourceRef>),
}

/// A `(type, id)` pointer to another resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct ResourceRef {
    /// Resource type
    #[serde(rename = "type")]
    pub kind: String,
    /// Resource id
    pub id: String,
}

/// Planning Center API client, authenticated with a personal access token.
#[derive(Debug)]
pub struct PlanningCenterClient {
    http: HttpClient,
}

impl PlanningCenterClient {
    /// Creates a client against the public API.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client initialization fails.
    pub fn new(app_id: impl Into<String>, secret: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_config(ServiceConfig::new(PLANNING_CENTER_BASE_URL).with_auth(
            AuthMethod::Basic {
                username: app_id.into(),
                password: secret.into(),
            },
        ))
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

    /// Unarchived signups with their next signup time and all signup times
    /// included.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a JSON:API
    /// document.
    #[tracing::instrument(skip(self))]
    pub async fn signups(&self) -> Result<Document, ApiError> {
        let req = self
            .get("/registrations/v2/signups")
            .query(&[
                ("filter", "unarchived"),
                ("include", "next_signup_time,signup_times"),
            ]);
        let doc: Document = self.http.execute_json(req).await?;
        tracing::debug!(signups = doc.data.len(), "fetched signups");
        Ok(doc)
    }

    /// The most recent plans of a service type, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a JSON:API
    /// document.
    #[tracing::instrument(skip(self))]
    pub async fn plans(&self, service_type_id: &str, per_page: u32) -> Result<Document, ApiError> {
        let per_page = per_page.to_string();
        let req = self
            .get(&format!("/services/v2/service_types/{service_type_id}/plans"))
            .query(&[("order", "-sort_date"), ("per_page", per_page.as_str())]);
        self.http.execute_json(req).await
    }

    /// The items of a plan ordered by position, with their parents included.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a JSON:API
    /// document.
    #[tracing::instrument(skip(self))]
    pub async fn plan_items(&self, service_type_id: &str, plan_id: &str) -> Result<Document, ApiError> {
        let req = self
            .get(&format!(
                "/services/v2/service_types/{service_type_id}/plans/{plan_id}/items"
            ))
            .query(&[
                ("order", "position"),
                ("per_page", "200"),
                ("include", "parent"),
                ("fields[items]", "title,description,html_details,item_type,position"),
            ]);
        self.http.execute_json(req).await
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http
            .build_request(Method::GET, path)
            .header(reqwest::header::ACCEPT, JSON_API)
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! REST backend for appointment metadata, contacts and events.

use std::sync::Arc;

use async_trait::async_trait;
use clinibook_core::{
    ContactDirectory, ContactId, ContactRequest, EventId, EventRequest, EventScheduler,
    MetadataLookup, ObjectInfo, PicklistCatalog, RecordTypeId, RemoteError,
};
use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::config::RemoteConfig;
use crate::error::ClientError;
use crate::http::HttpClient;

/// Client for the appointment backend.
///
/// # Example
///
/// ```ignore
/// use clinibook_remote::{AuthMethod, RemoteConfig, RestBackend};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = RemoteConfig {
///     base_url: "https://clinic.my.salesforce.com".to_string(),
///     auth: AuthMethod::Bearer {
///         token: "00D...".to_string(),
///     },
///     ..Default::default()
/// };
///
/// let backend = RestBackend::new(config)?;
/// let info = backend.object_info("Appointment__c").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RestBackend {
    http: Arc<HttpClient>,
    config: RemoteConfig,
}

impl RestBackend {
    /// Creates a new backend client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is missing or HTTP client initialization fails.
    pub fn new(config: RemoteConfig) -> Result<Self, ClientError> {
        if config.base_url.trim().is_empty() {
            return Err(ClientError::Config("base_url is required".to_string()));
        }

        let http = HttpClient::new(config.clone())?;
        Ok(Self {
            http: Arc::new(http),
            config,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &RemoteConfig {
        &self.config
    }

    /// Builds a full URL from a path.
    fn full_url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn ui_api_url(&self, path: &str) -> String {
        self.full_url(&format!("{}{path}", self.config.ui_api_path.trim_end_matches('/')))
    }

    fn apex_url(&self, path: &str) -> String {
        self.full_url(&format!("{}{path}", self.config.apex_path.trim_end_matches('/')))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, RemoteError> {
        tracing::debug!(url, "GET");
        let req = self.http.build_request(Method::GET, url);
        let resp = self.http.execute(req).await?;
        let text = HttpClient::text(resp).await?;
        serde_json::from_str(&text)
            .map_err(|e| RemoteError::new(format!("Invalid response from {url}: {e}")))
    }

    /// Posts a JSON body and extracts an identifier from the response.
    async fn post_for_id<B: serde::Serialize + Sync>(
        &self,
        url: &str,
        body: &B,
        key: &str,
    ) -> Result<String, RemoteError> {
        tracing::debug!(url, "POST");
        let req = self.http.build_request(Method::POST, url).json(body);
        let resp = self.http.execute(req).await?;
        let text = HttpClient::text(resp).await?;
        parse_id(&text, key)
            .map_err(|e| RemoteError::new(format!("Invalid response from {url}: {e}")))
    }
}

#[async_trait]
impl MetadataLookup for RestBackend {
    async fn object_info(&self, object: &str) -> Result<ObjectInfo, RemoteError> {
        let url = self.ui_api_url(&format!("/object-info/{object}"));
        self.get_json(&url).await
    }

    async fn picklist_values(
        &self,
        object: &str,
        record_type_id: &RecordTypeId,
        field: &str,
    ) -> Result<PicklistCatalog, RemoteError> {
        let url = self.ui_api_url(&format!(
            "/object-info/{object}/picklist-values/{record_type_id}/{field}"
        ));
        self.get_json(&url).await
    }
}

#[async_trait]
impl ContactDirectory for RestBackend {
    async fn find_or_create_contact(
        &self,
        request: &ContactRequest,
    ) -> Result<ContactId, RemoteError> {
        let url = self.apex_url("/contacts");
        let id = self.post_for_id(&url, request, "contactId").await?;
        Ok(ContactId::new(id))
    }
}

#[async_trait]
impl EventScheduler for RestBackend {
    async fn create_event(&self, request: &EventRequest) -> Result<EventId, RemoteError> {
        let url = self.apex_url("/events");
        let id = self.post_for_id(&url, request, "eventId").await?;
        Ok(EventId::new(id))
    }
}

/// Extracts an identifier from a response body.
///
/// Accepts a bare JSON string, an object keyed by `key` or `id`, `null`, or an empty body.
/// The last two yield an empty identifier.
fn parse_id(text: &str, key: &str) -> Result<String, String> {
    if text.trim().is_empty() {
        return Ok(String::new());
    }

    let value: serde_json::Value = serde_json::from_str(text).map_err(|e| e.to_string())?;
    match value {
        serde_json::Value::String(id) => Ok(id),
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::Object(map) => match map.get(key).or_else(|| map.get("id")) {
            Some(serde_json::Value::String(id)) => Ok(id.clone()),
            Some(serde_json::Value::Null) | None => Ok(String::new()),
            Some(other) => Err(format!("unexpected {key}: {other}")),
        },
        other => Err(format!("unexpected identifier: {other}")),
    }
}

// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client wrapper with authentication and error body handling.

use clinibook_core::{ErrorBody, RemoteError};
use reqwest::{Client, RequestBuilder, Response};

use crate::config::{AuthMethod, RemoteConfig};
use crate::error::ClientError;

/// HTTP client for backend operations.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    config: RemoteConfig,
}

impl HttpClient {
    /// Creates a new HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client creation fails.
    pub fn new(config: RemoteConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client, config })
    }

    /// Builds a request with authentication headers.
    pub fn build_request(&self, method: reqwest::Method, url: &str) -> RequestBuilder {
        let mut req = self.client.request(method, url);

        match &self.config.auth {
            AuthMethod::Basic { username, password } => {
                req = req.basic_auth(username, Some(password));
            }
            AuthMethod::Bearer { token } => {
                req = req.bearer_auth(token);
            }
            AuthMethod::None => {}
        }

        req.header(reqwest::header::ACCEPT, "application/json")
    }

    /// Executes a request and checks for HTTP errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or returns a non-success status code. The
    /// error carries the parsed error body when the server sent one.
    pub async fn execute(&self, req: RequestBuilder) -> Result<Response, RemoteError> {
        let resp = req
            .send()
            .await
            .map_err(|e| RemoteError::new(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let text = resp
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read response".to_string());
        tracing::debug!(%status, body = %text, "request rejected");

        let mut err = RemoteError::new(format!("{status}: {text}")).status(status.as_u16());
        if let Some(body) = parse_error_body(&text) {
            err = err.body(body);
        }
        Err(err)
    }

    /// Reads the response body as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be read.
    pub async fn text(resp: Response) -> Result<String, RemoteError> {
        resp.text()
            .await
            .map_err(|e| RemoteError::new(format!("Failed to read response: {e}")))
    }
}

/// Parses an error body, either a single object or a list of objects.
///
/// From a list, the first entry with a message wins.
pub fn parse_error_body(text: &str) -> Option<ErrorBody> {
    match serde_json::from_str::<serde_json::Value>(text).ok()? {
        value @ serde_json::Value::Object(_) => serde_json::from_value(value).ok(),
        serde_json::Value::Array(items) => {
            let list: Vec<ErrorBody> = items
                .into_iter()
                .filter_map(|a| serde_json::from_value(a).ok())
                .collect();
            list.iter()
                .find(|b| b.message.as_deref().is_some_and(|m| !m.is_empty()))
                .or_else(|| list.first())
                .cloned()
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_object() {
        let body = parse_error_body(r#"{ "message": "Duplicate email" }"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("Duplicate email"));
    }

    #[test]
    fn parse_error_list() {
        let body = parse_error_body(
            r#"[{ "errorCode": "APEX_ERROR", "message": "Insert failed" }, { "message": "other" }]"#,
        )
        .unwrap();
        assert_eq!(body.message.as_deref(), Some("Insert failed"));
    }

    #[test]
    fn parse_error_object_without_message() {
        let body = parse_error_body(r#"{ "errorCode": "UNKNOWN" }"#).unwrap();
        assert_eq!(body.message, None);
    }

    #[test]
    fn parse_error_plain_text() {
        assert_eq!(parse_error_body("Internal Server Error"), None);
        assert_eq!(parse_error_body(""), None);
        assert_eq!(parse_error_body("[]"), None);
    }
}

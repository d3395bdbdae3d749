// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Backend authentication method.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(tag = "type")]
pub enum AuthMethod {
    /// No authentication.
    #[serde(rename = "none")]
    #[default]
    None,
    /// Basic authentication (username/password).
    #[serde(rename = "basic")]
    Basic {
        /// Username for authentication.
        username: String,
        /// Password for authentication.
        password: String,
    },
    /// Bearer token authentication (OAuth session).
    #[serde(rename = "bearer")]
    Bearer {
        /// Bearer token.
        token: String,
    },
}

/// Backend server configuration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the backend, e.g. `https://example.my.salesforce.com`.
    pub base_url: String,
    /// Path of the metadata API.
    #[serde(default = "default_ui_api_path")]
    pub ui_api_path: String,
    /// Path of the appointment endpoints.
    #[serde(default = "default_apex_path")]
    pub apex_path: String,
    /// Authentication method.
    #[serde(default)]
    pub auth: AuthMethod,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_ui_api_path() -> String {
    "/services/data/v60.0/ui-api".to_string()
}

fn default_apex_path() -> String {
    "/services/apexrest/appointment-request".to_string()
}

const fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("clinibook-remote/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            ui_api_path: default_ui_api_path(),
            apex_path: default_apex_path(),
            auth: AuthMethod::default(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

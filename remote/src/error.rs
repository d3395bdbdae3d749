// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

/// Errors raised while setting up the backend client.
///
/// Failures of individual calls are reported as [`clinibook_core::RemoteError`].
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP layer error.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e.to_string())
    }
}

//! Response envelope normalization for the ticket backend.
//!
//! The backend wraps payloads inconsistently across endpoints: `status` is a
//! boolean on some routes and the strings `"success"`/`"failure"` on others,
//! `message` is optional, and list routes skip the envelope entirely. All of
//! that is normalized here, once, so callers only ever see typed data or a
//! typed error.

use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::util::compact_text;

/// Success/failure discriminant as the backend actually sends it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ApiStatus {
    Flag(bool),
    Text(String),
}

impl ApiStatus {
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Text(text) => text.eq_ignore_ascii_case("success"),
        }
    }
}

/// Standard `{status, message, data}` envelope.
///
/// No `#[serde(default)]` on `data`: serde already treats a missing field as
/// `None` for `Option`, and the attribute would force a `T: Default` bound
/// onto the derived `Deserialize` impl.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub status: Option<ApiStatus>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Unwrap the payload, surfacing the server's message on business failure.
    ///
    /// A missing `status` field counts as success; the ticket backend omits
    /// it on some legacy routes that still carry `data`.
    pub fn into_data(self, fallback: &str) -> Result<T> {
        let success = self.status.as_ref().is_none_or(ApiStatus::is_success);
        if !success {
            return Err(Error::Api(
                self.message.unwrap_or_else(|| fallback.to_string()),
            ));
        }
        self.data
            .ok_or_else(|| Error::Api(format!("{fallback}: response did not include data")))
    }

    /// Surface success/failure alone, for acknowledgement-style responses.
    pub fn into_ack(self, fallback: &str) -> Result<String> {
        let success = self.status.as_ref().is_none_or(ApiStatus::is_success);
        if success {
            Ok(self.message.unwrap_or_else(|| fallback.to_string()))
        } else {
            Err(Error::Api(
                self.message.unwrap_or_else(|| fallback.to_string()),
            ))
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Render a non-2xx response into one message string.
#[must_use]
pub fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ErrorResponse>(body) {
        if let Some(message) = payload.message.or(payload.msg).or(payload.error) {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", compact_text(trimmed), status.as_u16())
    }
}

//! Shared utility functions used across multiple modules.

use std::time::Duration;

use crate::error::{Error, Result};

/// Uniform timeout applied to every outgoing HTTP request.
const HTTP_TIMEOUT_SECS: u64 = 30;

/// Build the shared HTTP client with the uniform timeout policy.
pub fn http_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
        .build()?)
}

/// Normalize an API base URL: require an http(s) scheme, strip trailing `/`.
pub fn normalize_base_url(url: &str) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(Error::InvalidConfiguration("API base URL must not be empty"));
    }
    if !is_http_url(trimmed) {
        return Err(Error::InvalidConfiguration(
            "API base URL must include http:// or https://",
        ));
    }
    Ok(trimmed.to_string())
}

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Check if a string starts with `http://` or `https://`.
pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Truncate text to at most 180 characters for error messages.
pub fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}

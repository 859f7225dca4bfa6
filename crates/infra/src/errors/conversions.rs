//! Conversions from external infrastructure errors into domain and port
//! errors.

use std::time::Duration;

use linkreach_core::RemoteError;
use linkreach_domain::LinkReachError;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Error as HttpError, StatusCode};

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub LinkReachError);

impl From<InfraError> for LinkReachError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<LinkReachError> for InfraError {
    fn from(value: LinkReachError) -> Self {
        Self(value)
    }
}

/// Conversion of transport failures into the remote source's error classes.
pub(crate) trait IntoRemoteError {
    fn into_remote(self) -> RemoteError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → RemoteError / LinkReachError */
/* -------------------------------------------------------------------------- */

impl IntoRemoteError for HttpError {
    fn into_remote(self) -> RemoteError {
        if self.is_timeout() {
            return RemoteError::transport("HTTP request timed out");
        }

        if self.is_connect() {
            return RemoteError::transport("HTTP connection failure");
        }

        if self.is_decode() {
            return RemoteError::Malformed(format!("undecodable response body: {self}"));
        }

        if let Some(status) = self.status() {
            return status_error(status, &HeaderMap::new(), None);
        }

        RemoteError::transport(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        Self(value.into_remote().into())
    }
}

/// Map a non-success gateway status onto a remote error class.
///
/// `reason` is the policy reason code the gateway returns with a 409.
pub(crate) fn status_error(
    status: StatusCode,
    headers: &HeaderMap,
    reason: Option<String>,
) -> RemoteError {
    let code = status.as_u16();
    let message = format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

    match code {
        401 | 403 => RemoteError::Authentication(message),
        404 => RemoteError::NotFound(message),
        409 => RemoteError::PolicyRejected { reason: reason.unwrap_or(message) },
        429 => RemoteError::Transport { message, retry_after: retry_after(headers) },
        400..=499 => RemoteError::Malformed(message),
        _ => RemoteError::transport(message),
    }
}

fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

/* -------------------------------------------------------------------------- */
/* Configuration parsing errors → LinkReachError::Config */
/* -------------------------------------------------------------------------- */

impl From<toml::de::Error> for InfraError {
    fn from(value: toml::de::Error) -> Self {
        Self(LinkReachError::Config(format!("Invalid TOML format: {value}")))
    }
}

impl From<serde_json::Error> for InfraError {
    fn from(value: serde_json::Error) -> Self {
        Self(LinkReachError::Config(format!("Invalid JSON format: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */

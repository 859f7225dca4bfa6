//! Error types crossing the core's port boundaries

use std::fmt;
use std::time::Duration;

use linkreach_common::{ErrorClassification, ErrorSeverity};
use linkreach_domain::{CursorScheme, LinkReachError, ResourceKind};
use thiserror::Error;

/// Failure reported by a [`RemoteSource`](crate::ports::RemoteSource)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteError {
    /// Network, timeout or upstream 5xx/429 failure.
    #[error("transport failure: {message}")]
    Transport { message: String, retry_after: Option<Duration> },

    /// Session cookies were rejected.
    #[error("authentication rejected: {0}")]
    Authentication(String),

    /// The platform refused the operation on policy grounds.
    #[error("rejected by platform policy: {reason}")]
    PolicyRejected { reason: String },

    #[error("not found: {0}")]
    NotFound(String),

    /// The response could not be mapped onto a typed record.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl RemoteError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport { message: message.into(), retry_after: None }
    }

    pub fn policy(reason: impl Into<String>) -> Self {
        Self::PolicyRejected { reason: reason.into() }
    }

    /// Policy reason code, if this is a policy rejection.
    pub fn policy_reason(&self) -> Option<&str> {
        match self {
            Self::PolicyRejected { reason } => Some(reason),
            _ => None,
        }
    }
}

impl ErrorClassification for RemoteError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::PolicyRejected { .. })
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotFound(_) => ErrorSeverity::Info,
            Self::Transport { .. } | Self::PolicyRejected { .. } => ErrorSeverity::Warning,
            Self::Authentication(_) | Self::Malformed(_) => ErrorSeverity::Error,
        }
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Transport { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

impl From<RemoteError> for LinkReachError {
    fn from(err: RemoteError) -> Self {
        match err {
            RemoteError::Transport { message, .. } => Self::Network(message),
            RemoteError::Authentication(message) => Self::Auth(message),
            RemoteError::NotFound(message) => Self::NotFound(message),
            RemoteError::PolicyRejected { reason } => Self::Remote(format!("policy rejected: {reason}")),
            RemoteError::Malformed(message) => Self::Remote(format!("malformed response: {message}")),
        }
    }
}

/// Failure reported by a [`Notifier`](crate::ports::Notifier) or an
/// [`AutomationFallback`](crate::ports::AutomationFallback)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    #[error("notification channel closed")]
    Closed,

    #[error("notification rejected: {0}")]
    Rejected(String),
}

impl ErrorClassification for NotifyError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Closed => ErrorSeverity::Error,
            Self::Rejected(_) => ErrorSeverity::Warning,
        }
    }

    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

impl From<NotifyError> for LinkReachError {
    fn from(err: NotifyError) -> Self {
        Self::Notification(err.to_string())
    }
}

/// Why a fetch cycle ended without a page
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("No session found")]
    SessionMissing,

    #[error("{kind} expects a {expected:?} cursor, got {actual:?}")]
    CursorMismatch { kind: ResourceKind, expected: CursorScheme, actual: CursorScheme },
}

impl ErrorClassification for FetchFailure {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Remote(err) => err.is_retryable(),
            Self::SessionMissing => true,
            Self::CursorMismatch { .. } => false,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Remote(err) => err.severity(),
            Self::SessionMissing => ErrorSeverity::Warning,
            Self::CursorMismatch { .. } => ErrorSeverity::Error,
        }
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Remote(err) => err.retry_after(),
            _ => None,
        }
    }
}

/// Emit a tracing event for a caught failure at the level its severity implies.
pub(crate) fn log_caught<E>(err: &E, event: &'static str, integration_id: &str)
where
    E: ErrorClassification + fmt::Display,
{
    let severity = err.severity().as_label();
    let retryable = err.is_retryable();
    match err.severity() {
        ErrorSeverity::Info => {
            tracing::info!(integration_id, error = %err, severity, retryable, "{event}");
        }
        ErrorSeverity::Warning => {
            tracing::warn!(integration_id, error = %err, severity, retryable, "{event}");
        }
        ErrorSeverity::Error | ErrorSeverity::Critical => {
            tracing::error!(integration_id, error = %err, severity, retryable, "{event}");
        }
    }
}

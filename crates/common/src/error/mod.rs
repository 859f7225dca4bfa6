//! Error classification shared by every LinkReach crate
//!
//! Module-specific error enums stay local to the module that raises them.
//! What they share is the [`ErrorClassification`] interface, which lets the
//! dispatcher and the pagination engine make control decisions (retry or
//! not, which log level) on structured data rather than on concrete types.
//!
//! ## Severity guide
//!
//! | Severity | Meaning | In LinkReach |
//! |---|---|---|
//! | **Info** | Expected conditions | Nothing to react to, empty results |
//! | **Warning** | Degraded but operational | Weekly invitation limit, transient transport failure |
//! | **Error** | Failure requiring attention | Rejected credentials, malformed payloads |
//! | **Critical** | System integrity at risk | Internal invariant violations |
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//!
//! use linkreach_common::error::{ErrorClassification, ErrorSeverity};
//!
//! #[derive(Debug)]
//! enum FetchError {
//!     Transient,
//!     Rejected,
//! }
//!
//! impl ErrorClassification for FetchError {
//!     fn is_retryable(&self) -> bool {
//!         matches!(self, Self::Transient)
//!     }
//!
//!     fn severity(&self) -> ErrorSeverity {
//!         match self {
//!             Self::Transient => ErrorSeverity::Warning,
//!             Self::Rejected => ErrorSeverity::Error,
//!         }
//!     }
//!
//!     fn retry_after(&self) -> Option<Duration> {
//!         None
//!     }
//! }
//!
//! assert!(FetchError::Transient.is_retryable());
//! assert!(!FetchError::Rejected.is_critical());
//! ```

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Structured view of an error used for retry and logging decisions
pub trait ErrorClassification {
    /// Whether the same call may succeed later (timeouts, platform throttling).
    fn is_retryable(&self) -> bool;

    /// Drives the log level a caught error is recorded at.
    fn severity(&self) -> ErrorSeverity;

    /// Shorthand for `severity() == Critical`.
    fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }

    /// Delay the remote asked for before the next attempt, if it named one.
    fn retry_after(&self) -> Option<Duration>;
}

/// How loudly a failure should be reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorSeverity {
    Info,
    /// Degraded, the run continues.
    Warning,
    Error,
    /// Integrity at risk.
    Critical,
}

impl ErrorSeverity {
    /// Stable label used as a structured logging field.
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "INFO",
            Self::Warning => "WARN",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        })
    }
}

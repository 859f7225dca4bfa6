//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for LinkReach
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum LinkReachError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Remote platform error: {0}")]
    Remote(String),

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for LinkReach operations
pub type Result<T> = std::result::Result<T, LinkReachError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_and_message_tags() {
        let err = LinkReachError::Config("delivery chunk size must be positive".into());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "Config", "message": "delivery chunk size must be positive"})
        );
    }

    #[test]
    fn display_includes_category() {
        let err = LinkReachError::NotFound("session for integration int-1".into());
        assert_eq!(err.to_string(), "Not found: session for integration int-1");
    }
}

//! Delivery chunks handed to the downstream consumer

use serde::{Deserialize, Serialize};

use crate::types::cursor::FetchCursor;
use crate::types::records::RemoteRecord;

/// A slice of fetched items annotated with completion state
///
/// `fetch_completed = true` implies `resume_cursor = None`. A failed cycle is
/// delivered as an empty completed chunk with `failure` set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryChunk {
    pub items: Vec<RemoteRecord>,
    pub fetch_completed: bool,
    pub resume_cursor: Option<FetchCursor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl DeliveryChunk {
    /// Definitive end-of-stream signal with no items.
    pub const fn terminal_empty() -> Self {
        Self { items: Vec::new(), fetch_completed: true, resume_cursor: None, failure: None }
    }

    /// End-of-stream signal for a cycle that failed.
    pub fn failed(message: impl Into<String>) -> Self {
        Self { failure: Some(message.into()), ..Self::terminal_empty() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub const fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

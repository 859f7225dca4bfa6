//! Configuration management

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    ACTION_DELAY_MAX_SECS, ACTION_DELAY_MIN_SECS, DEFAULT_DELIVERY_CHUNK_SIZE,
    MAX_CONNECTION_BATCH, MAX_INVITATION_BATCH, MAX_MESSAGE_BATCH, MAX_SEARCH_BATCH,
};
use crate::errors::{LinkReachError, Result};
use crate::types::ResourceKind;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub pagination: PaginationConfig,
    pub dispatcher: DispatcherConfig,
    pub continuation: ContinuationConfig,
    pub logging: LoggingConfig,
}

/// Page sizing and delivery granularity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub delivery_chunk_size: usize,
    pub connections_batch: u32,
    pub invitations_batch: u32,
    /// Shared by the conversation list and per-conversation messages.
    pub messages_batch: u32,
    pub search_batch: u32,
}

/// Inclusive delay bounds in whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayBounds {
    pub min_secs: u64,
    pub max_secs: u64,
}

/// Action dispatcher pacing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    pub action_delay: DelayBounds,
}

/// Delays applied by the caller-side runner between fetch cycles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContinuationConfig {
    pub connections: DelayBounds,
    pub invitations: DelayBounds,
    pub conversations: DelayBounds,
    pub messages: DelayBounds,
    pub search: DelayBounds,
    /// Upper bound on cycles per run; `None` runs until a terminal cycle.
    pub max_cycles: Option<u32>,
}

/// Tracing subscriber settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl DelayBounds {
    pub const fn new(min_secs: u64, max_secs: u64) -> Self {
        Self { min_secs, max_secs }
    }

    pub const fn is_inverted(&self) -> bool {
        self.min_secs > self.max_secs
    }

    pub const fn min(&self) -> Duration {
        Duration::from_secs(self.min_secs)
    }

    pub const fn max(&self) -> Duration {
        Duration::from_secs(self.max_secs)
    }
}

impl PaginationConfig {
    /// Maximum items requested from the remote per call for `kind`.
    pub const fn batch_cap(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Connections => self.connections_batch,
            ResourceKind::Invitations => self.invitations_batch,
            ResourceKind::Conversations | ResourceKind::Messages => self.messages_batch,
            ResourceKind::Search => self.search_batch,
        }
    }
}

impl ContinuationConfig {
    pub const fn delay_for(&self, kind: ResourceKind) -> DelayBounds {
        match kind {
            ResourceKind::Connections => self.connections,
            ResourceKind::Invitations => self.invitations,
            ResourceKind::Conversations => self.conversations,
            ResourceKind::Messages => self.messages,
            ResourceKind::Search => self.search,
        }
    }
}

impl Config {
    /// Reject values that would stall or invert the fetch and dispatch loops.
    pub fn validate(&self) -> Result<()> {
        let p = &self.pagination;
        if p.delivery_chunk_size == 0 {
            return Err(LinkReachError::Config("pagination.delivery_chunk_size must be positive".into()));
        }
        for kind in ResourceKind::ALL {
            if p.batch_cap(*kind) == 0 {
                return Err(LinkReachError::Config(format!(
                    "pagination batch cap for {kind} must be positive"
                )));
            }
            let bounds = self.continuation.delay_for(*kind);
            if bounds.is_inverted() {
                return Err(LinkReachError::Config(format!(
                    "continuation.{kind} delay is inverted ({} > {})",
                    bounds.min_secs, bounds.max_secs
                )));
            }
        }
        let action = self.dispatcher.action_delay;
        if action.is_inverted() {
            return Err(LinkReachError::Config(format!(
                "dispatcher.action_delay is inverted ({} > {})",
                action.min_secs, action.max_secs
            )));
        }
        if self.continuation.max_cycles == Some(0) {
            return Err(LinkReachError::Config("continuation.max_cycles must be positive".into()));
        }
        Ok(())
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            delivery_chunk_size: DEFAULT_DELIVERY_CHUNK_SIZE,
            connections_batch: MAX_CONNECTION_BATCH,
            invitations_batch: MAX_INVITATION_BATCH,
            messages_batch: MAX_MESSAGE_BATCH,
            search_batch: MAX_SEARCH_BATCH,
        }
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self { action_delay: DelayBounds::new(ACTION_DELAY_MIN_SECS, ACTION_DELAY_MAX_SECS) }
    }
}

impl Default for ContinuationConfig {
    fn default() -> Self {
        Self {
            connections: DelayBounds::new(7, 10),
            invitations: DelayBounds::new(4, 8),
            conversations: DelayBounds::new(3, 10),
            messages: DelayBounds::new(3, 10),
            search: DelayBounds::new(4, 8),
            max_cycles: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}

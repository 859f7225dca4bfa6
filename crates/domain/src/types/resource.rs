//! Resource kinds and page requests

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::impl_domain_label_conversions;
use crate::types::cursor::{CursorScheme, FetchCursor};

/// Paginated resource stream exposed by the remote platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Connections,
    Invitations,
    Conversations,
    Messages,
    Search,
}

impl_domain_label_conversions!(ResourceKind {
    Connections => "connections",
    Invitations => "invitations",
    Conversations => "conversations",
    Messages => "messages",
    Search => "search",
});

impl ResourceKind {
    pub const fn cursor_scheme(&self) -> CursorScheme {
        match self {
            Self::Connections | Self::Invitations | Self::Search => CursorScheme::Offset,
            Self::Conversations | Self::Messages => CursorScheme::TimeWindow,
        }
    }
}

/// Which side of an invitation the integration is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvitationDirection {
    /// Invitations waiting for the integration's answer. Upstream requests
    /// name these `PENDING`.
    #[serde(alias = "PENDING")]
    Received,
    Sent,
}

impl_domain_label_conversions!(InvitationDirection {
    Received => "received",
    Sent => "sent",
});

/// How a search is expressed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum SearchQuery {
    /// A search results URL copied from the platform UI.
    Url(String),
    /// A raw query string.
    Query(String),
}

/// A resource stream together with its scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resource {
    Connections,
    Invitations {
        direction: InvitationDirection,
        /// Forwarded untouched to the consumer.
        #[serde(default)]
        refresh_db: bool,
    },
    Conversations,
    Messages {
        conversation_urn: String,
    },
    Search {
        query: SearchQuery,
    },
}

impl Resource {
    pub const fn kind(&self) -> ResourceKind {
        match self {
            Self::Connections => ResourceKind::Connections,
            Self::Invitations { .. } => ResourceKind::Invitations,
            Self::Conversations => ResourceKind::Conversations,
            Self::Messages { .. } => ResourceKind::Messages,
            Self::Search { .. } => ResourceKind::Search,
        }
    }
}

/// How many items a caller wants across all cycles of one fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TargetTotalRepr", into = "TargetTotalRepr")]
pub enum TargetTotal {
    All,
    Count(u32),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
#[doc(hidden)]
pub enum TargetTotalRepr {
    Count(u32),
    Label(String),
}

impl TargetTotal {
    /// Items still wanted after `fetched`; `None` means unbounded.
    pub const fn remaining(&self, fetched: u32) -> Option<u32> {
        match self {
            Self::All => None,
            Self::Count(total) => Some(total.saturating_sub(fetched)),
        }
    }

    pub const fn is_reached(&self, fetched: u32) -> bool {
        match self {
            Self::All => false,
            Self::Count(total) => fetched >= *total,
        }
    }
}

impl TryFrom<TargetTotalRepr> for TargetTotal {
    type Error = String;

    fn try_from(value: TargetTotalRepr) -> Result<Self, Self::Error> {
        match value {
            TargetTotalRepr::Count(count) => Ok(Self::Count(count)),
            TargetTotalRepr::Label(label) if label.eq_ignore_ascii_case("all") => Ok(Self::All),
            TargetTotalRepr::Label(label) => {
                label.trim().parse().map(Self::Count).map_err(|_| format!("Invalid TargetTotal: {label}"))
            }
        }
    }
}

impl From<TargetTotal> for TargetTotalRepr {
    fn from(value: TargetTotal) -> Self {
        match value {
            TargetTotal::All => Self::Label("ALL".to_string()),
            TargetTotal::Count(count) => Self::Count(count),
        }
    }
}

impl fmt::Display for TargetTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("ALL"),
            Self::Count(count) => write!(f, "{count}"),
        }
    }
}

/// One fetch cycle's input
///
/// `fetched_so_far` is the caller-owned accumulation from earlier cycles of
/// the same stream; the engine never keeps it between calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub resource: Resource,
    pub cursor: FetchCursor,
    #[serde(default)]
    pub limit: Option<u32>,
    pub target_total: TargetTotal,
    #[serde(default)]
    pub fetched_so_far: u32,
}

impl PageRequest {
    /// Start of a stream for `resource`, fetching everything.
    pub fn new(resource: Resource) -> Self {
        let cursor = FetchCursor::initial(resource.kind().cursor_scheme());
        Self { resource, cursor, limit: None, target_total: TargetTotal::All, fetched_so_far: 0 }
    }

    pub fn connections() -> Self {
        Self::new(Resource::Connections)
    }

    pub fn invitations(direction: InvitationDirection, refresh_db: bool) -> Self {
        Self::new(Resource::Invitations { direction, refresh_db })
    }

    pub fn conversations(created_after: Option<i64>) -> Self {
        Self::new(Resource::Conversations).with_cursor(FetchCursor::time_window(None, created_after))
    }

    pub fn messages(conversation_urn: impl Into<String>, created_after: Option<i64>) -> Self {
        Self::new(Resource::Messages { conversation_urn: conversation_urn.into() })
            .with_cursor(FetchCursor::time_window(None, created_after))
    }

    pub fn search(query: SearchQuery) -> Self {
        Self::new(Resource::Search { query })
    }

    #[must_use]
    pub fn with_cursor(mut self, cursor: FetchCursor) -> Self {
        self.cursor = cursor;
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_target(mut self, target_total: TargetTotal) -> Self {
        self.target_total = target_total;
        self
    }

    #[must_use]
    pub fn with_fetched_so_far(mut self, fetched_so_far: u32) -> Self {
        self.fetched_so_far = fetched_so_far;
        self
    }

    pub const fn kind(&self) -> ResourceKind {
        self.resource.kind()
    }

    /// Follow-up request for the next cycle of the same stream.
    #[must_use]
    pub fn resume(&self, cursor: FetchCursor, fetched_so_far: u32) -> Self {
        Self { cursor, fetched_so_far, ..self.clone() }
    }
}

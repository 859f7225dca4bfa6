//! Resumption positions in a paginated resource stream

use serde::{Deserialize, Serialize};

/// Pagination scheme used by a resource kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorScheme {
    Offset,
    TimeWindow,
}

/// Opaque position in a resource stream.
///
/// Timestamps are epoch milliseconds as reported by the remote platform.
/// `created_before` walks backwards in time; `created_after` is a fixed lower
/// bound carried through every resume cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "snake_case")]
pub enum FetchCursor {
    Offset {
        start: u32,
    },
    TimeWindow {
        created_before: Option<i64>,
        created_after: Option<i64>,
    },
}

impl FetchCursor {
    pub const fn offset(start: u32) -> Self {
        Self::Offset { start }
    }

    pub const fn time_window(created_before: Option<i64>, created_after: Option<i64>) -> Self {
        Self::TimeWindow { created_before, created_after }
    }

    pub const fn scheme(&self) -> CursorScheme {
        match self {
            Self::Offset { .. } => CursorScheme::Offset,
            Self::TimeWindow { .. } => CursorScheme::TimeWindow,
        }
    }

    /// First position of a stream using `scheme`.
    pub const fn initial(scheme: CursorScheme) -> Self {
        match scheme {
            CursorScheme::Offset => Self::offset(0),
            CursorScheme::TimeWindow => Self::time_window(None, None),
        }
    }

    /// True when a time window has closed: nothing can be both older than
    /// `created_before` and newer than `created_after`. Offset cursors never
    /// exhaust this way.
    pub const fn is_window_exhausted(&self) -> bool {
        match self {
            Self::TimeWindow { created_before: Some(before), created_after: Some(after) } => {
                *before <= *after
            }
            _ => false,
        }
    }
}

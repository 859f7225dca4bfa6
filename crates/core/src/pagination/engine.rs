use std::sync::Arc;

use linkreach_domain::{Credentials, FetchCursor, PageRequest, PaginationConfig, RemoteRecord};
use tracing::{debug, instrument};

use super::scheme::scheme_for;
use crate::errors::FetchFailure;
use crate::ports::RemoteSource;

/// What follows a fetched page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// No further remote calls for this stream.
    Terminal,
    /// More data may exist; resume from this cursor.
    Resume(FetchCursor),
}

impl Continuation {
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminal)
    }

    pub const fn cursor(&self) -> Option<FetchCursor> {
        match self {
            Self::Terminal => None,
            Self::Resume(cursor) => Some(*cursor),
        }
    }
}

/// Result of one fetch cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub items: Vec<RemoteRecord>,
    pub continuation: Continuation,
    /// Page size asked of the remote; zero when no call was made.
    pub requested: u32,
}

impl FetchedPage {
    /// Terminal cycle that made no remote call.
    pub const fn exhausted() -> Self {
        Self { items: Vec::new(), continuation: Continuation::Terminal, requested: 0 }
    }
}

/// Stateless driver of single fetch cycles
#[derive(Clone)]
pub struct PaginationEngine {
    remote: Arc<dyn RemoteSource>,
    config: PaginationConfig,
}

impl PaginationEngine {
    pub fn new(remote: Arc<dyn RemoteSource>, config: PaginationConfig) -> Self {
        Self { remote, config }
    }

    pub const fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Items to ask for in this cycle: the caller's limit clamped to the
    /// per-kind cap, then to what the target still needs.
    pub fn page_size(&self, request: &PageRequest) -> u32 {
        let cap = self.config.batch_cap(request.kind());
        let batch = request.limit.map_or(cap, |limit| limit.min(cap));
        request.target_total.remaining(request.fetched_so_far).map_or(batch, |left| batch.min(left))
    }

    /// Run one fetch cycle.
    ///
    /// Makes no remote call when the time window is already closed or the
    /// target is already met. Remote failures are returned, never retried.
    #[instrument(skip(self, request, credentials), fields(kind = %request.kind(), cursor = ?request.cursor))]
    pub async fn fetch_page(
        &self,
        request: &PageRequest,
        credentials: &Credentials,
    ) -> Result<FetchedPage, FetchFailure> {
        let kind = request.kind();
        let scheme = scheme_for(kind);
        if request.cursor.scheme() != scheme.cursor_scheme() {
            return Err(FetchFailure::CursorMismatch {
                kind,
                expected: scheme.cursor_scheme(),
                actual: request.cursor.scheme(),
            });
        }

        if request.cursor.is_window_exhausted() {
            debug!("time_window_exhausted");
            return Ok(FetchedPage::exhausted());
        }

        let requested = self.page_size(request);
        if requested == 0 {
            debug!(fetched_so_far = request.fetched_so_far, "target_already_reached");
            return Ok(FetchedPage::exhausted());
        }

        let page =
            self.remote.fetch_page(&request.resource, credentials, &request.cursor, requested).await?;
        let count = u32::try_from(page.len()).unwrap_or(u32::MAX);
        let accumulated = request.fetched_so_far.saturating_add(count);

        let continuation = if page.is_empty()
            || !scheme.has_more(&page, requested)
            || request.target_total.is_reached(accumulated)
        {
            Continuation::Terminal
        } else {
            scheme
                .next_cursor(&page, &request.cursor, requested)
                .map_or(Continuation::Terminal, Continuation::Resume)
        };

        debug!(
            requested,
            received = count,
            accumulated,
            terminal = continuation.is_terminal(),
            "page_fetched"
        );

        Ok(FetchedPage { items: page.items, continuation, requested })
    }
}

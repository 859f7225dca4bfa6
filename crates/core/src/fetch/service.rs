use std::sync::Arc;

use linkreach_common::ErrorClassification;
use linkreach_domain::{DeliveryChunk, FetchCursor, PageRequest, ResourceKind};
use serde::Serialize;
use tracing::{info, instrument};

use crate::delivery::split_page;
use crate::errors::{log_caught, FetchFailure};
use crate::pagination::PaginationEngine;
use crate::ports::{Notifier, SessionProvider};

/// Summary of one fetch cycle returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchCycleReport {
    pub kind: ResourceKind,
    /// Items delivered in this cycle.
    pub items_fetched: u32,
    /// Items delivered across all cycles so far, including this one.
    pub fetched_total: u32,
    pub chunks_delivered: usize,
    /// Present exactly when the cycle was not terminal.
    pub resume_cursor: Option<FetchCursor>,
    pub failure: Option<String>,
    /// Whether the failure, if any, is worth retrying later.
    pub retryable: bool,
}

impl FetchCycleReport {
    pub const fn is_terminal(&self) -> bool {
        self.resume_cursor.is_none()
    }

    /// Request for the next cycle, if the stream continues.
    pub fn next_request(&self, request: &PageRequest) -> Option<PageRequest> {
        self.resume_cursor.map(|cursor| request.resume(cursor, self.fetched_total))
    }
}

/// Runs single fetch cycles and delivers their chunks
pub struct FetchService {
    engine: PaginationEngine,
    sessions: Arc<dyn SessionProvider>,
    notifier: Arc<dyn Notifier>,
}

impl FetchService {
    pub fn new(
        engine: PaginationEngine,
        sessions: Arc<dyn SessionProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self { engine, sessions, notifier }
    }

    pub const fn engine(&self) -> &PaginationEngine {
        &self.engine
    }

    /// Fetch one page for `request` and deliver it as chunks.
    ///
    /// Every cycle delivers at least one chunk. Failures end the stream with
    /// an empty completed chunk carrying the failure message.
    #[instrument(skip(self, request), fields(kind = %request.kind()))]
    pub async fn run_cycle(&self, integration_id: &str, request: &PageRequest) -> FetchCycleReport {
        let kind = request.kind();
        let outcome = match self.sessions.credentials(integration_id).await {
            Some(credentials) => self.engine.fetch_page(request, &credentials).await,
            None => Err(FetchFailure::SessionMissing),
        };

        let (chunks, failure) = match outcome {
            Ok(page) => {
                let chunk_size = self.engine.config().delivery_chunk_size;
                (split_page(page.items, chunk_size, page.continuation), None)
            }
            Err(err) => {
                log_caught(&err, "fetch_cycle_failed", integration_id);
                (vec![DeliveryChunk::failed(err.to_string())], Some(err))
            }
        };

        let items_fetched =
            u32::try_from(chunks.iter().map(DeliveryChunk::len).sum::<usize>()).unwrap_or(u32::MAX);
        let resume_cursor = chunks.last().and_then(|chunk| chunk.resume_cursor);

        for chunk in &chunks {
            if let Err(err) = self.notifier.on_delivery_chunk(integration_id, &request.resource, chunk).await {
                log_caught(&err, "delivery_chunk_not_acknowledged", integration_id);
            }
        }

        let report = FetchCycleReport {
            kind,
            items_fetched,
            fetched_total: request.fetched_so_far.saturating_add(items_fetched),
            chunks_delivered: chunks.len(),
            resume_cursor,
            retryable: failure.as_ref().is_some_and(|err| err.is_retryable()),
            failure: failure.map(|err| err.to_string()),
        };

        info!(
            items = report.items_fetched,
            total = report.fetched_total,
            chunks = report.chunks_delivered,
            terminal = report.is_terminal(),
            "fetch_cycle_finished"
        );
        report
    }
}

//! Caller-side continuation of fetch cycles
//!
//! The core never reschedules itself: each fetch cycle returns a resume
//! cursor and stops. [`ContinuationRunner`] plays the orchestrator's part,
//! waiting a randomized per-resource delay between cycles and feeding the
//! cursor back in until the stream ends.

use std::sync::Arc;

use linkreach_common::DelayRange;
use linkreach_core::FetchService;
use linkreach_domain::{ContinuationConfig, PageRequest};
use serde::Serialize;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument};

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// A cycle ended the stream normally.
    Completed,
    /// A cycle ended the stream with a failure.
    Failed,
    Cancelled,
    CycleLimit,
}

/// Outcome of one continuation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub cycles: u32,
    pub fetched_total: u32,
    pub stop: StopReason,
    /// Request to resume from when the run stopped before the stream ended.
    pub resume: Option<PageRequest>,
}

/// Drives fetch cycles until the stream is terminal
pub struct ContinuationRunner {
    service: Arc<FetchService>,
    config: ContinuationConfig,
    cancel: CancellationToken,
}

impl ContinuationRunner {
    pub fn new(service: Arc<FetchService>, config: ContinuationConfig) -> Self {
        Self { service, config, cancel: CancellationToken::new() }
    }

    /// Share an externally owned cancellation token.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run cycles for `request` until it is terminal, cancelled, or the cycle
    /// limit is hit.
    ///
    /// Cancellation is observed before a cycle starts and during the wait
    /// between cycles; a cycle in flight always completes.
    #[instrument(skip(self, request), fields(kind = %request.kind()))]
    pub async fn run(&self, integration_id: &str, request: PageRequest) -> RunSummary {
        let bounds = self.config.delay_for(request.kind());
        let delay = DelayRange::new(bounds.min(), bounds.max()).unwrap_or_else(|_| DelayRange::zero());
        let mut request = request;
        let mut cycles = 0_u32;

        loop {
            if self.cancel.is_cancelled() {
                return self.finish(cycles, request.fetched_so_far, StopReason::Cancelled, Some(request));
            }

            let report = self.service.run_cycle(integration_id, &request).await;
            cycles = cycles.saturating_add(1);

            let Some(next) = report.next_request(&request) else {
                let stop = if report.failure.is_some() { StopReason::Failed } else { StopReason::Completed };
                return self.finish(cycles, report.fetched_total, stop, None);
            };
            request = next;

            if self.config.max_cycles.is_some_and(|max| cycles >= max) {
                return self.finish(cycles, request.fetched_so_far, StopReason::CycleLimit, Some(request));
            }

            tokio::select! {
                () = self.cancel.cancelled() => {
                    return self.finish(cycles, request.fetched_so_far, StopReason::Cancelled, Some(request));
                }
                waited = delay.sleep() => {
                    debug!(cycles, waited_ms = u64::try_from(waited.as_millis()).unwrap_or(u64::MAX), "continuation_resuming");
                }
            }
        }
    }

    /// Run on a background task.
    pub fn spawn(self: Arc<Self>, integration_id: String, request: PageRequest) -> JoinHandle<RunSummary> {
        tokio::spawn(async move { self.run(&integration_id, request).await })
    }

    fn finish(
        &self,
        cycles: u32,
        fetched_total: u32,
        stop: StopReason,
        resume: Option<PageRequest>,
    ) -> RunSummary {
        info!(cycles, fetched_total, stop = ?stop, "continuation_stopped");
        RunSummary { cycles, fetched_total, stop, resume }
    }
}

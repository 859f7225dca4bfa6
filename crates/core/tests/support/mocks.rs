//! Mock port implementations for testing
//!
//! Every mock records what it was asked to do behind `Arc<Mutex<..>>` so
//! tests can assert on calls after the fact.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use linkreach_core::ports::{
    AutomationFallback, Notifier, Page, RemoteSource, SessionProvider, WithdrawReport,
};
use linkreach_core::{NotifyError, RemoteError};
use linkreach_domain::{
    Action, ActionBatch, ActionReply, ActionRequest, ActionResult, Credentials, DeliveryChunk,
    FetchCursor, Resource,
};

/// One recorded `fetch_page` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCall {
    pub resource: Resource,
    pub cursor: FetchCursor,
    pub limit: u32,
}

/// Remote source answering from scripted queues.
///
/// Page responses are consumed in order; an exhausted queue yields an empty
/// page. Action replies are queued per operation name; an exhausted queue
/// yields `Acknowledged { ok: true }`.
#[derive(Default, Clone)]
pub struct ScriptedRemoteSource {
    pages: Arc<Mutex<VecDeque<Result<Page, RemoteError>>>>,
    replies: Arc<Mutex<HashMap<&'static str, VecDeque<Result<ActionReply, RemoteError>>>>>,
    fetch_calls: Arc<Mutex<Vec<FetchCall>>>,
    action_calls: Arc<Mutex<Vec<ActionRequest>>>,
}

impl ScriptedRemoteSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, items: Vec<linkreach_domain::RemoteRecord>) -> Self {
        self.pages.lock().unwrap().push_back(Ok(Page::new(items)));
        self
    }

    pub fn with_page_result(self, page: Result<Page, RemoteError>) -> Self {
        self.pages.lock().unwrap().push_back(page);
        self
    }

    pub fn with_reply(self, operation: &'static str, reply: Result<ActionReply, RemoteError>) -> Self {
        self.replies.lock().unwrap().entry(operation).or_default().push_back(reply);
        self
    }

    pub fn fetch_calls(&self) -> Vec<FetchCall> {
        self.fetch_calls.lock().unwrap().clone()
    }

    pub fn action_calls(&self) -> Vec<ActionRequest> {
        self.action_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteSource for ScriptedRemoteSource {
    async fn fetch_page(
        &self,
        resource: &Resource,
        _credentials: &Credentials,
        cursor: &FetchCursor,
        limit: u32,
    ) -> Result<Page, RemoteError> {
        self.fetch_calls.lock().unwrap().push(FetchCall {
            resource: resource.clone(),
            cursor: *cursor,
            limit,
        });
        self.pages.lock().unwrap().pop_front().unwrap_or_else(|| Ok(Page::default()))
    }

    async fn perform_action(
        &self,
        _credentials: &Credentials,
        request: &ActionRequest,
    ) -> Result<ActionReply, RemoteError> {
        self.action_calls.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .get_mut(request.name())
            .and_then(VecDeque::pop_front)
            .unwrap_or(Ok(ActionReply::Acknowledged { ok: true }))
    }
}

/// Remote source that fails the test if it is ever called.
#[derive(Default, Clone)]
pub struct UntouchableRemoteSource;

#[async_trait]
impl RemoteSource for UntouchableRemoteSource {
    async fn fetch_page(
        &self,
        _resource: &Resource,
        _credentials: &Credentials,
        _cursor: &FetchCursor,
        _limit: u32,
    ) -> Result<Page, RemoteError> {
        panic!("remote source must not be called");
    }

    async fn perform_action(
        &self,
        _credentials: &Credentials,
        _request: &ActionRequest,
    ) -> Result<ActionReply, RemoteError> {
        panic!("remote source must not be called");
    }
}

/// One recorded action report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionReport {
    pub integration_id: String,
    pub campaign_id: String,
    pub action: Action,
    pub result: ActionResult,
}

/// Notifier that records every event and optionally rejects them all.
#[derive(Default, Clone)]
pub struct RecordingNotifier {
    chunks: Arc<Mutex<Vec<(Resource, DeliveryChunk)>>>,
    reports: Arc<Mutex<Vec<ActionReport>>>,
    withdrawals: Arc<Mutex<Vec<WithdrawReport>>>,
    reject: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every call fails after recording.
    pub fn rejecting() -> Self {
        Self { reject: true, ..Self::default() }
    }

    pub fn chunks(&self) -> Vec<DeliveryChunk> {
        self.chunks.lock().unwrap().iter().map(|(_, c)| c.clone()).collect()
    }

    pub fn chunk_resources(&self) -> Vec<Resource> {
        self.chunks.lock().unwrap().iter().map(|(r, _)| r.clone()).collect()
    }

    pub fn reports(&self) -> Vec<ActionReport> {
        self.reports.lock().unwrap().clone()
    }

    pub fn withdrawals(&self) -> Vec<WithdrawReport> {
        self.withdrawals.lock().unwrap().clone()
    }

    fn outcome(&self) -> Result<(), NotifyError> {
        if self.reject {
            Err(NotifyError::Rejected("consumer offline".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn on_delivery_chunk(
        &self,
        _integration_id: &str,
        resource: &Resource,
        chunk: &DeliveryChunk,
    ) -> Result<(), NotifyError> {
        self.chunks.lock().unwrap().push((resource.clone(), chunk.clone()));
        self.outcome()
    }

    async fn on_action_result(
        &self,
        integration_id: &str,
        campaign_id: &str,
        action: &Action,
        result: &ActionResult,
    ) -> Result<(), NotifyError> {
        self.reports.lock().unwrap().push(ActionReport {
            integration_id: integration_id.to_string(),
            campaign_id: campaign_id.to_string(),
            action: action.clone(),
            result: result.clone(),
        });
        self.outcome()
    }

    async fn on_withdraw_finished(
        &self,
        _integration_id: &str,
        report: &WithdrawReport,
    ) -> Result<(), NotifyError> {
        self.withdrawals.lock().unwrap().push(report.clone());
        self.outcome()
    }
}

/// Session provider backed by a fixed map.
#[derive(Default, Clone)]
pub struct FixedSessionProvider {
    sessions: Arc<HashMap<String, Credentials>>,
}

impl FixedSessionProvider {
    pub fn with(credentials: Credentials) -> Self {
        let mut sessions = HashMap::new();
        sessions.insert(credentials.integration_id.clone(), credentials);
        Self { sessions: Arc::new(sessions) }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionProvider for FixedSessionProvider {
    async fn credentials(&self, integration_id: &str) -> Option<Credentials> {
        self.sessions.get(integration_id).cloned()
    }
}

/// Automation fallback that records hand-offs.
#[derive(Default, Clone)]
pub struct RecordingFallback {
    batches: Arc<Mutex<Vec<ActionBatch>>>,
}

impl RecordingFallback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batches(&self) -> Vec<ActionBatch> {
        self.batches.lock().unwrap().clone()
    }
}

#[async_trait]
impl AutomationFallback for RecordingFallback {
    async fn hand_off(&self, batch: &ActionBatch) -> Result<(), NotifyError> {
        self.batches.lock().unwrap().push(batch.clone());
        Ok(())
    }
}

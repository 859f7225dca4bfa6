//! Port interfaces for the integration layer
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use async_trait::async_trait;
use linkreach_domain::{
    Action, ActionBatch, ActionReply, ActionRequest, ActionResult, Credentials, DeliveryChunk,
    FetchCursor, RemoteRecord, Resource,
};
use serde::{Deserialize, Serialize};

use crate::errors::{NotifyError, RemoteError};

/// One page of records returned by a single remote call
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub items: Vec<RemoteRecord>,
    /// Total advertised by the remote, when it reports one (search only).
    /// Never used to decide completion.
    #[serde(default)]
    pub reported_total: Option<u32>,
}

impl Page {
    pub fn new(items: Vec<RemoteRecord>) -> Self {
        Self { items, reported_total: None }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Outcome of a withdraw attempt, reported outside the action stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawReport {
    pub invitation_id: Option<String>,
    pub mailbox_item_id: String,
    pub urn_id: String,
    pub success: bool,
}

/// Trait for calling the remote platform
///
/// Implementations are stateless per call; timeouts are theirs to enforce.
#[async_trait]
pub trait RemoteSource: Send + Sync {
    /// Fetch at most `limit` records of `resource` starting at `cursor`
    async fn fetch_page(
        &self,
        resource: &Resource,
        credentials: &Credentials,
        cursor: &FetchCursor,
        limit: u32,
    ) -> Result<Page, RemoteError>;

    /// Perform one single-shot operation
    async fn perform_action(
        &self,
        credentials: &Credentials,
        request: &ActionRequest,
    ) -> Result<ActionReply, RemoteError>;
}

/// Trait for the downstream consumer of chunks and reports
///
/// Delivery and ordering guarantees belong to the implementation.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one chunk of a fetch cycle
    async fn on_delivery_chunk(
        &self,
        integration_id: &str,
        resource: &Resource,
        chunk: &DeliveryChunk,
    ) -> Result<(), NotifyError>;

    /// Report the single terminal result of a dispatched action
    async fn on_action_result(
        &self,
        integration_id: &str,
        campaign_id: &str,
        action: &Action,
        result: &ActionResult,
    ) -> Result<(), NotifyError>;

    /// Report a finished withdraw
    async fn on_withdraw_finished(
        &self,
        _integration_id: &str,
        _report: &WithdrawReport,
    ) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Trait for looking up the session of an integration
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Credentials for `integration_id`, or `None` when no session is stored
    async fn credentials(&self, integration_id: &str) -> Option<Credentials>;
}

/// Trait for the non-API automation path
#[async_trait]
pub trait AutomationFallback: Send + Sync {
    /// Take over `batch`; its actions are no longer the dispatcher's to report
    async fn hand_off(&self, batch: &ActionBatch) -> Result<(), NotifyError>;
}

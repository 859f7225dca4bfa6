//! Notifier that forwards events into a tokio channel

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use linkreach_core::ports::{AutomationFallback, Notifier, WithdrawReport};
use linkreach_core::NotifyError;
use linkreach_domain::{Action, ActionBatch, ActionResult, DeliveryChunk, Resource};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

/// What happened
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NotifierPayload {
    DeliveryChunk { resource: Resource, chunk: DeliveryChunk },
    ActionResult { campaign_id: String, action: Action, result: ActionResult },
    WithdrawFinished { report: WithdrawReport },
    HandOff { batch: ActionBatch },
}

/// One event as seen by the orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifierEvent {
    pub id: Uuid,
    pub integration_id: String,
    pub emitted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: NotifierPayload,
}

impl NotifierEvent {
    fn new(integration_id: &str, payload: NotifierPayload) -> Self {
        Self { id: Uuid::now_v7(), integration_id: integration_id.to_string(), emitted_at: Utc::now(), payload }
    }
}

/// [`Notifier`] and [`AutomationFallback`] over a bounded mpsc channel
///
/// Sends wait for capacity; a dropped receiver turns every call into
/// [`NotifyError::Closed`].
#[derive(Clone)]
pub struct ChannelNotifier {
    sender: mpsc::Sender<NotifierEvent>,
}

impl ChannelNotifier {
    pub fn new(sender: mpsc::Sender<NotifierEvent>) -> Self {
        Self { sender }
    }

    /// Notifier plus the receiving end of a channel holding `capacity` events.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<NotifierEvent>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self::new(sender), receiver)
    }

    async fn emit(&self, integration_id: &str, payload: NotifierPayload) -> Result<(), NotifyError> {
        let event = NotifierEvent::new(integration_id, payload);
        debug!(event_id = %event.id, integration_id, "notifier_event_emitted");
        self.sender.send(event).await.map_err(|_| NotifyError::Closed)
    }
}

#[async_trait]
impl Notifier for ChannelNotifier {
    async fn on_delivery_chunk(
        &self,
        integration_id: &str,
        resource: &Resource,
        chunk: &DeliveryChunk,
    ) -> Result<(), NotifyError> {
        self.emit(
            integration_id,
            NotifierPayload::DeliveryChunk { resource: resource.clone(), chunk: chunk.clone() },
        )
        .await
    }

    async fn on_action_result(
        &self,
        integration_id: &str,
        campaign_id: &str,
        action: &Action,
        result: &ActionResult,
    ) -> Result<(), NotifyError> {
        self.emit(
            integration_id,
            NotifierPayload::ActionResult {
                campaign_id: campaign_id.to_string(),
                action: action.clone(),
                result: result.clone(),
            },
        )
        .await
    }

    async fn on_withdraw_finished(
        &self,
        integration_id: &str,
        report: &WithdrawReport,
    ) -> Result<(), NotifyError> {
        self.emit(integration_id, NotifierPayload::WithdrawFinished { report: report.clone() }).await
    }
}

#[async_trait]
impl AutomationFallback for ChannelNotifier {
    async fn hand_off(&self, batch: &ActionBatch) -> Result<(), NotifyError> {
        self.emit(&batch.integration_id, NotifierPayload::HandOff { batch: batch.clone() }).await
    }
}

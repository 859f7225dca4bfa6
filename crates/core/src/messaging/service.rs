use std::sync::Arc;

use linkreach_domain::{ActionReply, ActionRequest, LinkReachError, Result, SendTarget};
use tracing::{debug, instrument};

use crate::errors::log_caught;
use crate::ports::{RemoteSource, SessionProvider};

/// Send messages, typing indicators and read receipts
#[derive(Clone)]
pub struct MessagingService {
    remote: Arc<dyn RemoteSource>,
    sessions: Arc<dyn SessionProvider>,
}

impl MessagingService {
    pub fn new(remote: Arc<dyn RemoteSource>, sessions: Arc<dyn SessionProvider>) -> Self {
        Self { remote, sessions }
    }

    /// Send `message` to a conversation or a recipient.
    #[instrument(skip(self, message))]
    pub async fn send_message(
        &self,
        integration_id: &str,
        target: SendTarget,
        message: &str,
    ) -> Result<bool> {
        if message.trim().is_empty() {
            return Err(LinkReachError::InvalidInput("message must not be empty".into()));
        }
        let request = ActionRequest::SendMessage { target, message: message.to_string() };
        self.acknowledge(integration_id, &request).await
    }

    #[instrument(skip(self))]
    pub async fn send_typing(
        &self,
        integration_id: &str,
        conversation_urn: &str,
        profile_urn: &str,
    ) -> Result<bool> {
        let request = ActionRequest::SendTyping {
            conversation_urn: conversation_urn.to_string(),
            profile_urn: profile_urn.to_string(),
        };
        self.acknowledge(integration_id, &request).await
    }

    /// Mark a conversation as seen.
    #[instrument(skip(self))]
    pub async fn mark_seen(
        &self,
        integration_id: &str,
        conversation_urn: &str,
        profile_urn: &str,
    ) -> Result<bool> {
        let request = ActionRequest::MarkSeen {
            conversation_urn: conversation_urn.to_string(),
            profile_urn: profile_urn.to_string(),
        };
        self.acknowledge(integration_id, &request).await
    }

    async fn acknowledge(&self, integration_id: &str, request: &ActionRequest) -> Result<bool> {
        let credentials = self
            .sessions
            .credentials(integration_id)
            .await
            .ok_or_else(|| LinkReachError::NotFound(format!("No session found for {integration_id}")))?;

        match self.remote.perform_action(&credentials, request).await {
            Ok(ActionReply::Acknowledged { ok }) => Ok(ok),
            Ok(ActionReply::NothingToDo { reason }) => {
                debug!(operation = request.name(), reason = %reason, "nothing_to_do");
                Ok(true)
            }
            Ok(other) => Err(LinkReachError::Remote(format!(
                "unexpected reply to {}: {other:?}",
                request.name()
            ))),
            Err(err) => {
                log_caught(&err, "messaging_operation_failed", integration_id);
                Err(err.into())
            }
        }
    }
}

use std::sync::Arc;

use linkreach_domain::constants::{CAMPAIGN_WITHDRAW_PLACEHOLDER_ID, INVITATION_URN_PREFIX};
use linkreach_domain::{
    ActionReply, ActionRequest, Credentials, InvitationDecision, LinkReachError, Result,
    WithdrawOutcome, WithdrawTarget,
};
use tracing::{info, instrument, warn};

use crate::errors::log_caught;
use crate::ports::{Notifier, RemoteSource, SessionProvider, WithdrawReport};

/// Accept, ignore and withdraw invitations
#[derive(Clone)]
pub struct InvitationService {
    remote: Arc<dyn RemoteSource>,
    sessions: Arc<dyn SessionProvider>,
    notifier: Arc<dyn Notifier>,
}

fn invitation_urn(mailbox_item_id: &str) -> String {
    if mailbox_item_id.starts_with(INVITATION_URN_PREFIX) {
        mailbox_item_id.to_string()
    } else {
        format!("{INVITATION_URN_PREFIX}{mailbox_item_id}")
    }
}

impl InvitationService {
    pub fn new(
        remote: Arc<dyn RemoteSource>,
        sessions: Arc<dyn SessionProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self { remote, sessions, notifier }
    }

    async fn credentials(&self, integration_id: &str) -> Result<Credentials> {
        self.sessions
            .credentials(integration_id)
            .await
            .ok_or_else(|| LinkReachError::NotFound(format!("No session found for {integration_id}")))
    }

    /// Accept or ignore a received invitation.
    #[instrument(skip(self, shared_secret))]
    pub async fn respond(
        &self,
        integration_id: &str,
        mailbox_item_id: &str,
        shared_secret: &str,
        decision: InvitationDecision,
    ) -> Result<bool> {
        let credentials = self.credentials(integration_id).await?;
        let request = ActionRequest::ManageInvitation {
            mailbox_item_id: invitation_urn(mailbox_item_id),
            shared_secret: shared_secret.to_string(),
            decision,
        };
        match self.remote.perform_action(&credentials, &request).await {
            Ok(ActionReply::Acknowledged { ok }) => Ok(ok),
            Ok(other) => {
                warn!(reply = ?other, "unexpected_manage_invitation_reply");
                Ok(false)
            }
            Err(err) => {
                log_caught(&err, "manage_invitation_failed", integration_id);
                Err(err.into())
            }
        }
    }

    /// Withdraw a sent invitation and report the outcome.
    ///
    /// `invitation_id` is the upstream record this withdraw belongs to, if any.
    #[instrument(skip(self))]
    pub async fn withdraw(
        &self,
        integration_id: &str,
        target: WithdrawTarget,
        invitation_id: Option<&str>,
    ) -> Result<WithdrawOutcome> {
        let credentials = self.credentials(integration_id).await?;
        Ok(self.withdraw_with(&credentials, integration_id, target, invitation_id).await)
    }

    /// Withdraw with already-resolved credentials. Remote failures become an
    /// unsuccessful outcome.
    pub(crate) async fn withdraw_with(
        &self,
        credentials: &Credentials,
        integration_id: &str,
        target: WithdrawTarget,
        invitation_id: Option<&str>,
    ) -> WithdrawOutcome {
        let target = match target {
            WithdrawTarget::MailboxItem { mailbox_item_id } => {
                WithdrawTarget::MailboxItem { mailbox_item_id: invitation_urn(&mailbox_item_id) }
            }
            profile @ WithdrawTarget::Profile { .. } => profile,
        };
        let request = ActionRequest::WithdrawInvite { target };

        let outcome = match self.remote.perform_action(credentials, &request).await {
            Ok(ActionReply::Withdraw(outcome)) => outcome,
            Ok(other) => {
                warn!(reply = ?other, "unexpected_withdraw_reply");
                WithdrawOutcome::default()
            }
            Err(err) => {
                log_caught(&err, "withdraw_failed", integration_id);
                WithdrawOutcome::default()
            }
        };

        let tracked = invitation_id.is_some_and(|id| !id.is_empty() && id != CAMPAIGN_WITHDRAW_PLACEHOLDER_ID);
        if outcome.success || tracked {
            let report = WithdrawReport {
                invitation_id: invitation_id.map(str::to_string),
                mailbox_item_id: if outcome.success {
                    outcome
                        .mailbox_item_id
                        .as_deref()
                        .map(|id| id.strip_prefix(INVITATION_URN_PREFIX).unwrap_or(id).to_string())
                        .unwrap_or_default()
                } else {
                    String::new()
                },
                urn_id: if outcome.success { outcome.urn_id.clone().unwrap_or_default() } else { String::new() },
                success: outcome.success,
            };
            if let Err(err) = self.notifier.on_withdraw_finished(integration_id, &report).await {
                log_caught(&err, "withdraw_report_not_acknowledged", integration_id);
            }
        }

        info!(success = outcome.success, "withdraw_finished");
        outcome
    }
}

use std::sync::Arc;

use linkreach_common::DelayRange;
use linkreach_domain::constants::{CAMPAIGN_WITHDRAW_PLACEHOLDER_ID, MSG_NO_SESSION};
use linkreach_domain::{
    Action, ActionBatch, ActionReply, ActionRequest, ActionResult, Credentials, DelayBounds,
    DispatcherConfig, FailureReason,
};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use super::outcome::{evaluate, request_for, DispatchOutcome, Verdict};
use crate::errors::{log_caught, RemoteError};
use crate::invitations::InvitationService;
use crate::ports::{AutomationFallback, Notifier, RemoteSource, SessionProvider};

/// Per-action outcomes of one dispatch run, in input order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub run_id: Uuid,
    pub outcomes: Vec<DispatchOutcome>,
}

impl DispatchReport {
    pub fn succeeded(&self) -> usize {
        self.count(|o| matches!(o, DispatchOutcome::Succeeded))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, DispatchOutcome::Failed { .. }))
    }

    pub fn handed_off(&self) -> usize {
        self.count(|o| matches!(o, DispatchOutcome::HandedOff))
    }

    fn count(&self, predicate: impl Fn(&DispatchOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| predicate(o)).count()
    }
}

/// Sequential, paced executor of campaign actions
pub struct ActionDispatcher {
    remote: Arc<dyn RemoteSource>,
    sessions: Arc<dyn SessionProvider>,
    notifier: Arc<dyn Notifier>,
    fallback: Arc<dyn AutomationFallback>,
    invitations: InvitationService,
    delay: DelayRange,
}

impl ActionDispatcher {
    /// Dispatcher paced by the default platform delay window.
    pub fn new(
        remote: Arc<dyn RemoteSource>,
        sessions: Arc<dyn SessionProvider>,
        notifier: Arc<dyn Notifier>,
        fallback: Arc<dyn AutomationFallback>,
    ) -> Self {
        Self::from_config(remote, sessions, notifier, fallback, &DispatcherConfig::default())
    }

    /// Dispatcher paced by `config.action_delay`.
    ///
    /// Inverted bounds fall back to the default window.
    pub fn from_config(
        remote: Arc<dyn RemoteSource>,
        sessions: Arc<dyn SessionProvider>,
        notifier: Arc<dyn Notifier>,
        fallback: Arc<dyn AutomationFallback>,
        config: &DispatcherConfig,
    ) -> Self {
        let invitations = InvitationService::new(remote.clone(), sessions.clone(), notifier.clone());
        Self {
            remote,
            sessions,
            notifier,
            fallback,
            invitations,
            delay: delay_range(config.action_delay),
        }
    }

    /// Replace the inter-action delay.
    #[must_use]
    pub fn with_delay(mut self, delay: DelayRange) -> Self {
        self.delay = delay;
        self
    }

    /// Dispatch every action of `batch`, one at a time.
    ///
    /// Each API action is preceded by a random delay and ends in exactly one
    /// report to the notifier, unless it is handed to the automation
    /// fallback. A failing action never stops the rest of the batch.
    #[instrument(
        skip(self, batch),
        fields(integration_id = %batch.integration_id, campaign_id = %batch.campaign_id, actions = batch.actions.len())
    )]
    pub async fn dispatch(&self, batch: &ActionBatch) -> DispatchReport {
        let run_id = Uuid::now_v7();
        let mut outcomes = vec![DispatchOutcome::HandedOff; batch.actions.len()];

        let Some(credentials) = self.sessions.credentials(&batch.integration_id).await else {
            warn!(%run_id, "dispatch_without_session");
            let missing =
                ActionResult::error_with_reason(MSG_NO_SESSION, true, FailureReason::SessionMissing);
            for (slot, action) in outcomes.iter_mut().zip(&batch.actions) {
                self.report(batch, action, &missing).await;
                *slot = DispatchOutcome::from(&missing);
            }
            return DispatchReport { run_id, outcomes };
        };

        let (api, unsupported): (Vec<_>, Vec<_>) =
            batch.actions.iter().enumerate().partition(|(_, a)| a.action_type.is_api_dispatchable());

        if !unsupported.is_empty() {
            let actions: Vec<Action> = unsupported.iter().map(|(_, a)| (*a).clone()).collect();
            warn!(%run_id, count = actions.len(), "unsupported_actions_handed_off");
            self.hand_off(batch, actions).await;
        }

        for (index, action) in api {
            let waited = self.delay.sleep().await;
            debug!(
                %run_id,
                index,
                action_type = ?action.action_type,
                waited_ms = u64::try_from(waited.as_millis()).unwrap_or(u64::MAX),
                "dispatching_action"
            );

            let verdict = match request_for(action) {
                Ok(request) => self.execute(batch, &credentials, &request).await.map_or_else(
                    || Verdict::HandOff,
                    |reply| evaluate(action.action_type, &reply),
                ),
                Err(report) => Verdict::Report(report),
            };

            outcomes[index] = match verdict {
                Verdict::Report(result) => {
                    self.report(batch, action, &result).await;
                    DispatchOutcome::from(&result)
                }
                Verdict::HandOff => {
                    self.hand_off(batch, vec![action.clone()]).await;
                    DispatchOutcome::HandedOff
                }
            };
        }

        let report = DispatchReport { run_id, outcomes };
        info!(
            %run_id,
            succeeded = report.succeeded(),
            failed = report.failed(),
            handed_off = report.handed_off(),
            "dispatch_finished"
        );
        report
    }

    /// Perform `request`; `None` means the withdraw path gave no usable reply.
    async fn execute(
        &self,
        batch: &ActionBatch,
        credentials: &Credentials,
        request: &ActionRequest,
    ) -> Option<Result<ActionReply, RemoteError>> {
        if let ActionRequest::WithdrawInvite { target } = request {
            let outcome = self
                .invitations
                .withdraw_with(
                    credentials,
                    &batch.integration_id,
                    target.clone(),
                    Some(CAMPAIGN_WITHDRAW_PLACEHOLDER_ID),
                )
                .await;
            return outcome.success.then_some(Ok(ActionReply::Withdraw(outcome)));
        }

        let reply = self.remote.perform_action(credentials, request).await;
        if let Err(err) = &reply {
            log_caught(err, "action_failed", &batch.integration_id);
        }
        Some(reply)
    }

    async fn report(&self, batch: &ActionBatch, action: &Action, result: &ActionResult) {
        if let Err(err) = self
            .notifier
            .on_action_result(&batch.integration_id, &batch.campaign_id, action, result)
            .await
        {
            log_caught(&err, "action_result_not_acknowledged", &batch.integration_id);
        }
    }

    async fn hand_off(&self, batch: &ActionBatch, actions: Vec<Action>) {
        let handed = ActionBatch {
            integration_id: batch.integration_id.clone(),
            campaign_id: batch.campaign_id.clone(),
            actions,
        };
        if let Err(err) = self.fallback.hand_off(&handed).await {
            log_caught(&err, "automation_hand_off_failed", &batch.integration_id);
        }
    }
}

fn delay_range(bounds: DelayBounds) -> DelayRange {
    DelayRange::new(bounds.min(), bounds.max()).unwrap_or_else(|err| {
        warn!(error = %err, "action_delay_rejected");
        let fallback = DispatcherConfig::default().action_delay;
        DelayRange::new(fallback.min(), fallback.max()).unwrap_or_else(|_| DelayRange::zero())
    })
}

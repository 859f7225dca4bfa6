//! Dispatch table: action to remote operation, reply to report

use linkreach_domain::constants::{
    MSG_ENDORSE_FAILED, MSG_FOLLOW_FAILED, MSG_INVITE_FAILED, MSG_INVITE_LIMIT_REACHED,
    MSG_PROFILE_FETCH_FAILED, MSG_REACTION_FAILED, MSG_SEND_MESSAGE_FAILED,
};
use linkreach_domain::{
    Action, ActionReply, ActionRequest, ActionResult, ActionType, FailureReason, InMailOutcome,
    InviteOutcome, ProfileSummary, Reaction, SendTarget, WithdrawTarget,
};
use serde::Serialize;

use crate::errors::RemoteError;

const WEEKLY_LIMIT_REASON: &str = "WEEKLY_LIMIT_REACHED";

/// Terminal state of one action in a dispatch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DispatchOutcome {
    Succeeded,
    Failed { should_retry: bool },
    /// Given to the automation fallback; it reports from here on.
    HandedOff,
}

/// What the dispatcher does with a reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Verdict {
    Report(ActionResult),
    HandOff,
}

/// Remote operation for an API-dispatchable action. `Err` carries the report
/// for actions that cannot be turned into a request.
pub(crate) fn request_for(action: &Action) -> Result<ActionRequest, ActionResult> {
    let urn_id = action.profile_id.clone();
    let payload = &action.payload;
    let request = match action.action_type {
        ActionType::ProfileFetch => ActionRequest::FetchProfile { urn_id },
        ActionType::SendMessage => match payload.message.as_deref().filter(|m| !m.trim().is_empty()) {
            Some(message) => ActionRequest::SendMessage {
                target: SendTarget::Recipient { recipient_urn: urn_id },
                message: message.to_string(),
            },
            None => return Err(ActionResult::error(MSG_SEND_MESSAGE_FAILED, false)),
        },
        ActionType::LikePost => ActionRequest::React { urn_id, reaction: Reaction::Like },
        ActionType::EndorseSkill => ActionRequest::EndorseSkill { urn_id },
        ActionType::FollowRequest => ActionRequest::Follow { urn_id },
        ActionType::SendInvite => ActionRequest::SendInvite { urn_id, message: payload.message.clone() },
        ActionType::WithdrawInvite => {
            ActionRequest::WithdrawInvite { target: WithdrawTarget::Profile { urn_id } }
        }
        ActionType::SendInMail => ActionRequest::SendInMail {
            recipient_urn: urn_id,
            mailbox_urn: payload.mailbox_urn.clone(),
            subject: payload.subject.clone(),
            message: payload.message.clone(),
            is_premium: payload.is_premium,
        },
        other => {
            return Err(ActionResult::error(format!("{other:?} has no API operation"), false));
        }
    };
    Ok(request)
}

fn acknowledged(reply: &Result<ActionReply, RemoteError>) -> bool {
    matches!(
        reply,
        Ok(ActionReply::Acknowledged { ok: true } | ActionReply::NothingToDo { .. })
    )
}

fn boolean_verdict(reply: &Result<ActionReply, RemoteError>, failure_message: &str) -> Verdict {
    if acknowledged(reply) {
        Verdict::Report(ActionResult::success())
    } else {
        Verdict::Report(ActionResult::error(failure_message, false))
    }
}

/// Map a reply onto the report for `action_type`.
pub(crate) fn evaluate(action_type: ActionType, reply: &Result<ActionReply, RemoteError>) -> Verdict {
    match action_type {
        ActionType::ProfileFetch => {
            let summary = match reply {
                Ok(ActionReply::Profile { profile: Some(profile) }) => ProfileSummary::from_profile(profile),
                _ => None,
            };
            Verdict::Report(summary.map_or_else(
                || ActionResult::error(MSG_PROFILE_FETCH_FAILED, true),
                ActionResult::with_profile,
            ))
        }
        ActionType::SendMessage => boolean_verdict(reply, MSG_SEND_MESSAGE_FAILED),
        ActionType::LikePost => boolean_verdict(reply, MSG_REACTION_FAILED),
        ActionType::EndorseSkill => boolean_verdict(reply, MSG_ENDORSE_FAILED),
        ActionType::FollowRequest => boolean_verdict(reply, MSG_FOLLOW_FAILED),
        ActionType::SendInvite => Verdict::Report(match reply {
            Ok(ActionReply::Invite { outcome: InviteOutcome::Sent }) => ActionResult::success(),
            Ok(ActionReply::Invite { outcome: InviteOutcome::WeeklyLimitReached }) => {
                weekly_limit_reached()
            }
            Err(err) if err.policy_reason() == Some(WEEKLY_LIMIT_REASON) => weekly_limit_reached(),
            _ => ActionResult::error(MSG_INVITE_FAILED, true),
        }),
        ActionType::WithdrawInvite => match reply {
            Ok(ActionReply::Withdraw(outcome)) if outcome.success => {
                Verdict::Report(ActionResult::success())
            }
            _ => Verdict::HandOff,
        },
        ActionType::SendInMail => Verdict::Report(match reply {
            Ok(ActionReply::InMail(outcome)) if outcome.success => ActionResult::success(),
            Ok(ActionReply::InMail(outcome)) => ActionResult::error(outcome.failure_message(), false),
            Err(err) => {
                let outcome = InMailOutcome { success: false, message: Some(err.to_string()), reason: None };
                ActionResult::error(outcome.failure_message(), false)
            }
            Ok(_) => ActionResult::error(InMailOutcome::default().failure_message(), false),
        }),
        other => Verdict::Report(ActionResult::error(format!("{other:?} has no API operation"), false)),
    }
}

fn weekly_limit_reached() -> ActionResult {
    ActionResult::error_with_reason(MSG_INVITE_LIMIT_REACHED, true, FailureReason::WeeklyLimitReached)
}

impl From<&ActionResult> for DispatchOutcome {
    fn from(result: &ActionResult) -> Self {
        match result {
            ActionResult::Success(_) => Self::Succeeded,
            ActionResult::Error(failure) => Self::Failed { should_retry: failure.should_retry },
        }
    }
}

#[cfg(test)]
mod tests {
    use linkreach_domain::{ActionPayload, Profile, WithdrawOutcome};

    use super::*;

    fn action(action_type: ActionType) -> Action {
        Action {
            action_type,
            profile_id: "urn:li:member:42".into(),
            campaign_id: "camp-1".into(),
            audience_id: "aud-1".into(),
            lead_id: "lead-1".into(),
            payload: ActionPayload::default(),
        }
    }

    fn failure_of(verdict: Verdict) -> (String, bool, Option<FailureReason>) {
        match verdict {
            Verdict::Report(ActionResult::Error(f)) => (f.message, f.should_retry, f.reason),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn profile_without_public_identifier_is_retryable_failure() {
        let reply = Ok(ActionReply::Profile { profile: Some(Profile::default()) });
        let (message, retry, _) = failure_of(evaluate(ActionType::ProfileFetch, &reply));
        assert_eq!(message, "Unable to fetch profile");
        assert!(retry);
    }

    #[test]
    fn profile_success_carries_summary() {
        let profile = Profile { public_identifier: Some("jane".into()), ..Profile::default() };
        let reply = Ok(ActionReply::Profile { profile: Some(profile) });
        match evaluate(ActionType::ProfileFetch, &reply) {
            Verdict::Report(ActionResult::Success(success)) => {
                assert_eq!(success.profile.unwrap().profile_url, "https://www.linkedin.com/in/jane");
            }
            other => panic!("unexpected verdict {other:?}"),
        }
    }

    #[test]
    fn boolean_operations_fail_without_retry() {
        let reply = Ok(ActionReply::Acknowledged { ok: false });
        for (action_type, expected) in [
            (ActionType::SendMessage, "Unable to send message"),
            (ActionType::LikePost, "Unable to react to any kind of post"),
            (ActionType::EndorseSkill, "Unable to endorse skill"),
            (ActionType::FollowRequest, "Unable to follow"),
        ] {
            let (message, retry, _) = failure_of(evaluate(action_type, &reply));
            assert_eq!(message, expected);
            assert!(!retry);
        }
    }

    #[test]
    fn missing_post_counts_as_success() {
        let reply = Ok(ActionReply::NothingToDo { reason: "no post found".into() });
        assert_eq!(evaluate(ActionType::LikePost, &reply), Verdict::Report(ActionResult::success()));
    }

    #[test]
    fn weekly_limit_is_flagged_and_retryable() {
        let reply = Ok(ActionReply::Invite { outcome: InviteOutcome::WeeklyLimitReached });
        let (message, retry, reason) = failure_of(evaluate(ActionType::SendInvite, &reply));
        assert!(message.contains("Limit reached"));
        assert!(retry);
        assert_eq!(reason, Some(FailureReason::WeeklyLimitReached));

        let policy = Err(RemoteError::policy("WEEKLY_LIMIT_REACHED"));
        let (_, _, reason) = failure_of(evaluate(ActionType::SendInvite, &policy));
        assert_eq!(reason, Some(FailureReason::WeeklyLimitReached));
    }

    #[test]
    fn other_invite_failures_retry() {
        let reply = Err(RemoteError::transport("timeout"));
        let (message, retry, reason) = failure_of(evaluate(ActionType::SendInvite, &reply));
        assert_eq!(message, "Unable to send invitation. Will retry again.");
        assert!(retry);
        assert_eq!(reason, None);
    }

    #[test]
    fn failed_withdraw_is_handed_off() {
        let reply = Ok(ActionReply::Withdraw(WithdrawOutcome::default()));
        assert_eq!(evaluate(ActionType::WithdrawInvite, &reply), Verdict::HandOff);
        let reply = Err(RemoteError::NotFound("invitation".into()));
        assert_eq!(evaluate(ActionType::WithdrawInvite, &reply), Verdict::HandOff);
    }

    #[test]
    fn inmail_failure_uses_first_sentence() {
        let reply = Ok(ActionReply::InMail(InMailOutcome {
            success: false,
            message: Some("Insufficient credits. Buy more.".into()),
            reason: None,
        }));
        let (message, retry, _) = failure_of(evaluate(ActionType::SendInMail, &reply));
        assert_eq!(message, "Insufficient credits");
        assert!(!retry);
    }

    #[test]
    fn send_message_without_text_is_rejected_before_dispatch() {
        let report = request_for(&action(ActionType::SendMessage)).unwrap_err();
        assert_eq!(report, ActionResult::error("Unable to send message", false));
    }

    #[test]
    fn requests_target_the_action_profile() {
        let request = request_for(&action(ActionType::FollowRequest)).unwrap();
        assert_eq!(request, ActionRequest::Follow { urn_id: "urn:li:member:42".into() });
        let request = request_for(&action(ActionType::WithdrawInvite)).unwrap();
        assert_eq!(
            request,
            ActionRequest::WithdrawInvite {
                target: WithdrawTarget::Profile { urn_id: "urn:li:member:42".into() }
            }
        );
    }
}

//! Single-shot remote operations and their replies

use serde::{Deserialize, Serialize};

use crate::constants::MSG_INMAIL_DEFAULT_FAILURE;
use crate::types::records::Profile;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Reaction {
    #[default]
    Like,
    Praise,
    Empathy,
    Interest,
    Appreciation,
    Entertainment,
}

/// Where a direct message goes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum SendTarget {
    /// An existing conversation thread.
    Conversation { conversation_urn: String },
    /// A member; the platform opens or reuses a thread.
    Recipient { recipient_urn: String },
}

/// Which sent invitation to withdraw
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "target", rename_all = "snake_case")]
pub enum WithdrawTarget {
    MailboxItem { mailbox_item_id: String },
    /// Resolved to a mailbox item by the remote source.
    Profile { urn_id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationDecision {
    Accept,
    Ignore,
}

/// One call against the remote platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum ActionRequest {
    FetchProfile {
        urn_id: String,
    },
    SendMessage {
        target: SendTarget,
        message: String,
    },
    React {
        urn_id: String,
        reaction: Reaction,
    },
    EndorseSkill {
        urn_id: String,
    },
    Follow {
        urn_id: String,
    },
    SendInvite {
        urn_id: String,
        message: Option<String>,
    },
    WithdrawInvite {
        target: WithdrawTarget,
    },
    SendInMail {
        recipient_urn: String,
        mailbox_urn: Option<String>,
        subject: Option<String>,
        message: Option<String>,
        is_premium: bool,
    },
    ManageInvitation {
        mailbox_item_id: String,
        shared_secret: String,
        decision: InvitationDecision,
    },
    SendTyping {
        conversation_urn: String,
        profile_urn: String,
    },
    MarkSeen {
        conversation_urn: String,
        profile_urn: String,
    },
}

impl ActionRequest {
    /// Operation label for logs and request routing.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FetchProfile { .. } => "fetch_profile",
            Self::SendMessage { .. } => "send_message",
            Self::React { .. } => "react",
            Self::EndorseSkill { .. } => "endorse_skill",
            Self::Follow { .. } => "follow",
            Self::SendInvite { .. } => "send_invite",
            Self::WithdrawInvite { .. } => "withdraw_invite",
            Self::SendInMail { .. } => "send_inmail",
            Self::ManageInvitation { .. } => "manage_invitation",
            Self::SendTyping { .. } => "send_typing",
            Self::MarkSeen { .. } => "mark_seen",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InviteOutcome {
    Sent,
    WeeklyLimitReached,
    Failed { message: Option<String> },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawOutcome {
    pub success: bool,
    pub mailbox_item_id: Option<String>,
    pub urn_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMailOutcome {
    pub success: bool,
    pub message: Option<String>,
    pub reason: Option<String>,
}

impl InMailOutcome {
    /// First sentence of the remote message, else the reason, else the
    /// insufficient-credit default.
    pub fn failure_message(&self) -> String {
        self.message
            .as_deref()
            .and_then(|m| m.split('.').next())
            .filter(|first| !first.is_empty())
            .or_else(|| self.reason.as_deref().filter(|r| !r.is_empty()))
            .unwrap_or(MSG_INMAIL_DEFAULT_FAILURE)
            .to_string()
    }
}

/// Typed reply to an [`ActionRequest`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
pub enum ActionReply {
    Profile { profile: Option<Profile> },
    /// Boolean acknowledgement used by most write operations.
    Acknowledged { ok: bool },
    /// Expected data was absent (no post to react to, no skill to endorse).
    NothingToDo { reason: String },
    Invite { outcome: InviteOutcome },
    Withdraw(WithdrawOutcome),
    InMail(InMailOutcome),
}

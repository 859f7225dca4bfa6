//! Campaign actions and their reported outcomes

use serde::{Deserialize, Serialize};

use crate::constants::PROFILE_URL_PREFIX;
use crate::types::records::Profile;

/// Discrete operation kinds an orchestrator can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    ProfileFetch,
    SendMessage,
    LikePost,
    EndorseSkill,
    FollowRequest,
    SendInvite,
    WithdrawInvite,
    #[serde(rename = "SEND_INEMAIL")]
    SendInMail,
    ViewProfile,
    CreatePost,
    ReplyMessage,
    CheckConnectionStatus,
    /// Any type this build does not know about.
    #[serde(other)]
    Unsupported,
}

impl ActionType {
    /// Action types with a direct API operation. Everything else belongs to
    /// the automation fallback.
    pub const API_DISPATCHABLE: [Self; 8] = [
        Self::ProfileFetch,
        Self::SendMessage,
        Self::LikePost,
        Self::EndorseSkill,
        Self::FollowRequest,
        Self::SendInvite,
        Self::WithdrawInvite,
        Self::SendInMail,
    ];

    pub const fn is_api_dispatchable(&self) -> bool {
        matches!(
            self,
            Self::ProfileFetch
                | Self::SendMessage
                | Self::LikePost
                | Self::EndorseSkill
                | Self::FollowRequest
                | Self::SendInvite
                | Self::WithdrawInvite
                | Self::SendInMail
        )
    }
}

/// Free-form inputs some action types need
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActionPayload {
    pub message: Option<String>,
    pub subject: Option<String>,
    pub mailbox_urn: Option<String>,
    pub is_premium: bool,
}

/// One discrete operation against one target profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub profile_id: String,
    pub campaign_id: String,
    pub audience_id: String,
    pub lead_id: String,
    #[serde(default, alias = "data")]
    pub payload: ActionPayload,
}

/// An ordered list of actions for one integration and campaign
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionBatch {
    pub integration_id: String,
    pub campaign_id: String,
    pub actions: Vec<Action>,
}

/// Why an action failed, when the cause is more specific than its message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureReason {
    WeeklyLimitReached,
    SessionMissing,
}

/// Profile fields reported upstream after a successful profile fetch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    pub urn_id: String,
    pub public_id: String,
    pub first_name: String,
    pub last_name: String,
    pub headline: Option<String>,
    pub profile_url: String,
    pub propic_url: Option<String>,
    pub country: Option<String>,
    pub company: Option<String>,
    pub current_position: Option<String>,
    pub in_employment: bool,
    pub school: Option<String>,
    pub industries: Vec<String>,
    pub email: String,
    pub phone: String,
}

impl ProfileSummary {
    /// `None` when the profile has no public identifier.
    pub fn from_profile(profile: &Profile) -> Option<Self> {
        let public_id = profile.public_identifier.as_deref().filter(|id| !id.is_empty())?;
        Some(Self {
            urn_id: profile.urn_id.clone(),
            public_id: public_id.to_string(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            headline: profile.headline.clone(),
            profile_url: format!("{PROFILE_URL_PREFIX}{public_id}"),
            propic_url: profile.profile_picture_url.clone(),
            country: profile.country.clone(),
            company: profile.company.clone(),
            current_position: profile.current_position.clone(),
            in_employment: profile.still_working,
            school: profile.school.clone(),
            industries: profile.industries.clone(),
            email: profile.email.clone().unwrap_or_default(),
            phone: profile.phone_numbers.first().map(|p| p.number.clone()).unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionSuccess {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionFailure {
    pub message: String,
    pub should_retry: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<FailureReason>,
}

/// The single report every dispatched action ends in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ActionResult {
    Success(ActionSuccess),
    Error(ActionFailure),
}

impl ActionResult {
    pub fn success() -> Self {
        Self::Success(ActionSuccess::default())
    }

    pub fn with_profile(profile: ProfileSummary) -> Self {
        Self::Success(ActionSuccess { profile: Some(profile) })
    }

    pub fn error(message: impl Into<String>, should_retry: bool) -> Self {
        Self::Error(ActionFailure { message: message.into(), should_retry, reason: None })
    }

    pub fn error_with_reason(
        message: impl Into<String>,
        should_retry: bool,
        reason: FailureReason,
    ) -> Self {
        Self::Error(ActionFailure { message: message.into(), should_retry, reason: Some(reason) })
    }

    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub const fn should_retry(&self) -> bool {
        match self {
            Self::Success(_) => false,
            Self::Error(failure) => failure.should_retry,
        }
    }
}

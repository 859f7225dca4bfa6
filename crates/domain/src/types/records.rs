//! Typed records returned by the remote platform
//!
//! Adapters translate raw payloads into these shapes. Timestamps are epoch
//! milliseconds.

use serde::{Deserialize, Serialize};

/// A first-degree connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub urn_id: String,
    pub public_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub headline: Option<String>,
    pub profile_picture_url: Option<String>,
    pub connected_at: Option<i64>,
}

/// A pending invitation, received or sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub invitation_id: String,
    pub shared_secret: Option<String>,
    pub urn_id: String,
    pub first_name: String,
    pub last_name: String,
    pub headline: Option<String>,
    pub message: Option<String>,
    pub sent_at: Option<i64>,
}

/// A single message inside a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub message_urn: String,
    pub sender_urn: String,
    pub text: String,
    pub created_at: i64,
}

/// A conversation summary with its most recent messages, newest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub conversation_urn: String,
    pub participants: Vec<String>,
    pub unread_count: u32,
    pub last_activity_at: Option<i64>,
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// A lead found by a people search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchLead {
    pub urn_id: String,
    pub public_id: Option<String>,
    pub full_name: String,
    pub headline: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    pub number: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Full profile as fetched for a single member
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub urn_id: String,
    pub public_identifier: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub headline: Option<String>,
    pub profile_picture_url: Option<String>,
    pub country: Option<String>,
    pub company: Option<String>,
    pub current_position: Option<String>,
    #[serde(default)]
    pub still_working: bool,
    pub school: Option<String>,
    #[serde(default)]
    pub industries: Vec<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub phone_numbers: Vec<PhoneNumber>,
}

/// Any item of a fetched page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "recordType", rename_all = "snake_case")]
pub enum RemoteRecord {
    Connection(Connection),
    Invitation(Invitation),
    Conversation(Conversation),
    Message(Message),
    SearchLead(SearchLead),
}

impl Conversation {
    /// Creation time of the newest message, falling back to the last activity.
    pub fn created_at(&self) -> Option<i64> {
        self.messages.first().map(|m| m.created_at).or(self.last_activity_at)
    }
}

impl RemoteRecord {
    /// Timestamp used to walk time-window cursors backwards.
    pub fn created_at(&self) -> Option<i64> {
        match self {
            Self::Connection(c) => c.connected_at,
            Self::Invitation(i) => i.sent_at,
            Self::Conversation(c) => c.created_at(),
            Self::Message(m) => Some(m.created_at),
            Self::SearchLead(_) => None,
        }
    }
}

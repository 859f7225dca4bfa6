//! Record and action fixtures

use linkreach_domain::{
    Action, ActionBatch, ActionPayload, ActionType, Connection, Conversation, Credentials, Message,
    RemoteRecord, SessionCookie,
};

pub const INTEGRATION_ID: &str = "int-1";
pub const CAMPAIGN_ID: &str = "camp-1";

pub fn credentials() -> Credentials {
    Credentials::new(
        INTEGRATION_ID,
        vec![SessionCookie { name: "li_at".into(), value: "token".into() }],
    )
    .with_user_agent("Mozilla/5.0")
}

pub fn connection(i: usize) -> RemoteRecord {
    RemoteRecord::Connection(Connection {
        urn_id: format!("urn:li:member:{i}"),
        public_id: Some(format!("member-{i}")),
        first_name: format!("First{i}"),
        last_name: "Last".into(),
        headline: None,
        profile_picture_url: None,
        connected_at: None,
    })
}

pub fn connections(range: std::ops::Range<usize>) -> Vec<RemoteRecord> {
    range.map(connection).collect()
}

/// Conversation whose newest message was created at `created_at`.
pub fn conversation(created_at: i64) -> RemoteRecord {
    RemoteRecord::Conversation(Conversation {
        conversation_urn: format!("urn:li:msg_conversation:{created_at}"),
        participants: vec!["urn:li:member:1".into()],
        unread_count: 0,
        last_activity_at: Some(created_at),
        messages: vec![Message {
            message_urn: format!("urn:li:msg:{created_at}"),
            sender_urn: "urn:li:member:1".into(),
            text: "hello".into(),
            created_at,
        }],
    })
}

/// Conversations with descending timestamps `newest, newest - 10, ...`.
pub fn conversations(newest: i64, count: usize) -> Vec<RemoteRecord> {
    (0..count).map(|i| conversation(newest - 10 * i as i64)).collect()
}

pub fn action(action_type: ActionType, profile_id: &str) -> Action {
    Action {
        action_type,
        profile_id: profile_id.to_string(),
        campaign_id: CAMPAIGN_ID.into(),
        audience_id: format!("aud-{profile_id}"),
        lead_id: format!("lead-{profile_id}"),
        payload: ActionPayload::default(),
    }
}

pub fn message_action(profile_id: &str, message: &str) -> Action {
    let mut action = action(ActionType::SendMessage, profile_id);
    action.payload.message = Some(message.to_string());
    action
}

pub fn batch(actions: Vec<Action>) -> ActionBatch {
    ActionBatch { integration_id: INTEGRATION_ID.into(), campaign_id: CAMPAIGN_ID.into(), actions }
}

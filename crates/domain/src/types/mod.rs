//! Domain data types

pub mod action;
pub mod cursor;
pub mod delivery;
pub mod operation;
pub mod records;
pub mod resource;
pub mod session;

pub use action::{
    Action, ActionBatch, ActionFailure, ActionPayload, ActionResult, ActionSuccess, ActionType,
    FailureReason, ProfileSummary,
};
pub use cursor::{CursorScheme, FetchCursor};
pub use delivery::DeliveryChunk;
pub use operation::{
    ActionReply, ActionRequest, InMailOutcome, InvitationDecision, InviteOutcome, Reaction,
    SendTarget, WithdrawOutcome, WithdrawTarget,
};
pub use records::{
    Connection, Conversation, Invitation, Message, PhoneNumber, Profile, RemoteRecord, SearchLead,
};
pub use resource::{InvitationDirection, PageRequest, Resource, ResourceKind, SearchQuery, TargetTotal};
pub use session::{Credentials, SessionCookie};

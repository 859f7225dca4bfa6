//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Pagination caps per resource kind (items per remote call)
pub const MAX_CONNECTION_BATCH: u32 = 100;
pub const MAX_INVITATION_BATCH: u32 = 100;
pub const MAX_MESSAGE_BATCH: u32 = 20;
pub const MAX_SEARCH_BATCH: u32 = 50;

// Delivery granularity towards the notifier
pub const DEFAULT_DELIVERY_CHUNK_SIZE: usize = 25;

// Inter-action pacing for the dispatcher (seconds)
pub const ACTION_DELAY_MIN_SECS: u64 = 15;
pub const ACTION_DELAY_MAX_SECS: u64 = 45;

// Search URL validation
pub const SEARCH_CHECK_COUNT: u32 = 25;
pub const PREMIUM_VISIBLE_LEADS_THRESHOLD: u32 = 5;

// Remote identifiers
pub const PROFILE_URL_PREFIX: &str = "https://www.linkedin.com/in/";
pub const INVITATION_URN_PREFIX: &str = "urn:li:fsd_invitation:";
pub const CAMPAIGN_WITHDRAW_PLACEHOLDER_ID: &str = "Campaign Action: No Invitation Id";

// Dispatcher report messages
pub const MSG_NO_SESSION: &str = "No session found";
pub const MSG_PROFILE_FETCH_FAILED: &str = "Unable to fetch profile";
pub const MSG_SEND_MESSAGE_FAILED: &str = "Unable to send message";
pub const MSG_REACTION_FAILED: &str = "Unable to react to any kind of post";
pub const MSG_ENDORSE_FAILED: &str = "Unable to endorse skill";
pub const MSG_FOLLOW_FAILED: &str = "Unable to follow";
pub const MSG_INVITE_LIMIT_REACHED: &str = "Unable to send invitation for a day. Limit reached.";
pub const MSG_INVITE_FAILED: &str = "Unable to send invitation. Will retry again.";
pub const MSG_INMAIL_DEFAULT_FAILURE: &str = "Not Enough Inmail Credit";

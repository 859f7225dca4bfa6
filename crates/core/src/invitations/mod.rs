//! Invitation management outside the dispatch table

mod service;

pub use service::InvitationService;

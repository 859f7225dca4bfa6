//! Notifier adapters

pub mod channel;

pub use channel::{ChannelNotifier, NotifierEvent, NotifierPayload};

//! # LinkReach Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - Configuration loading from environment variables and files
//! - Tracing subscriber initialisation
//! - The HTTP gateway remote source and its retrying client
//! - The channel-backed notifier
//! - The caller-side continuation runner
//!
//! ## Architecture
//! - Implements traits defined in `linkreach-core`
//! - Depends on `linkreach-common`, `linkreach-domain` and `linkreach-core`
//! - Contains all "impure" code (I/O, network, timers)

pub mod config;
pub mod errors;
pub mod http;
pub mod notifier;
pub mod observability;
pub mod remote;
pub mod scheduling;

// Re-export commonly used items
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder, RetryPolicy};
pub use notifier::{ChannelNotifier, NotifierEvent, NotifierPayload};
pub use observability::init_tracing;
pub use remote::HttpRemoteSource;
pub use scheduling::{ContinuationRunner, RunSummary, StopReason};

//! # LinkReach Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces for the remote source, notifier, session store and
//!   automation fallback
//! - The pagination engine and its per-scheme cursor logic
//! - The batch delivery splitter
//! - The fetch cycle service and the action dispatcher
//! - Single-shot services for search, invitations and messaging
//!
//! ## Architecture Principles
//! - Only depends on `linkreach-common` and `linkreach-domain`
//! - No HTTP, channel or scheduling code
//! - All external dependencies via traits
//! - Never schedules its own continuation; callers resume with the returned
//!   cursor

pub mod delivery;
pub mod dispatch;
pub mod errors;
pub mod fetch;
pub mod invitations;
pub mod messaging;
pub mod pagination;
pub mod ports;
pub mod search;

pub use delivery::split_page;
pub use dispatch::{ActionDispatcher, DispatchOutcome, DispatchReport};
pub use errors::{FetchFailure, NotifyError, RemoteError};
pub use fetch::{FetchCycleReport, FetchService};
pub use invitations::InvitationService;
pub use messaging::MessagingService;
pub use pagination::{Continuation, FetchedPage, PaginationEngine, PaginationScheme};
pub use ports::{AutomationFallback, Notifier, Page, RemoteSource, SessionProvider, WithdrawReport};
pub use search::{SearchService, SearchUrlCheck};

//! Pagination engine
//!
//! One call of [`PaginationEngine::fetch_page`] is one fetch cycle: at most
//! one remote call, followed by a terminal/non-terminal decision and the
//! cursor for the next cycle. Cursor arithmetic lives behind
//! [`PaginationScheme`], one implementation per cursor shape.

mod engine;
mod scheme;

pub use engine::{Continuation, FetchedPage, PaginationEngine};
pub use scheme::{scheme_for, OffsetScheme, PaginationScheme, TimeWindowScheme};

//! Search URL validation

mod service;

pub use service::{SearchService, SearchUrlCheck};

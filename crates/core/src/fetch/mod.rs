//! Fetch cycle service: session lookup, one engine cycle, chunked delivery

mod service;

pub use service::{FetchCycleReport, FetchService};

//! Scheduling of repeated fetch cycles
//!
//! Runners own their cancellation token and never interrupt a cycle in
//! flight.

pub mod continuation;

pub use continuation::{ContinuationRunner, RunSummary, StopReason};

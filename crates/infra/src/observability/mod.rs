//! Observability: structured logging setup
//!
//! Every component logs through `tracing`; this module only decides where
//! the events go.

pub mod logging;

pub use logging::{build_filter, init_tracing};

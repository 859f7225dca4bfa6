//! # LinkReach Domain
//!
//! Business domain types and models for the LinkReach integration layer.
//!
//! This crate contains:
//! - Fetch cursors, page requests and delivery chunks
//! - Campaign actions, remote operations and their outcomes
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other LinkReach crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;

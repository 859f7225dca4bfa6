//! Time utilities
//!
//! - **[`delay`]**: bounded random delays used to pace outbound traffic to the
//!   remote platform (inter-action delays, continuation back-off)

pub mod delay;

// Re-export commonly used items
pub use delay::{DelayRange, DelayRangeError};

//! Action dispatcher

mod dispatcher;
mod outcome;

pub use dispatcher::{ActionDispatcher, DispatchReport};
pub use outcome::DispatchOutcome;
